//! CLI command implementations
//!
//! Each command loads its input table once, runs a fixed query shape and
//! renders the result as a JSON value. `execute` does no stdout I/O, so
//! commands can be driven directly from tests.

use std::path::Path;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::classify::tier_counts;
use crate::format::FileFormat;
use crate::observability::{CommandScope, Logger, Severity};
use crate::query::{
    compare_revenue, filter, increase_prices, mask_zero_quantity, most_purchased_product,
    product_revenue, revenue_within, row_revenue, top_products_by_revenue, total_revenue,
    transaction_counts_per_user, unique_user_count, DateRange, RowPredicate,
};
use crate::table::{
    parse_timestamp_str, sample_transactions, RowSource, TransactionRecord, TransactionTable,
};

use super::args::{Cli, Command, InputArgs, OutputArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Parse arguments, run one command, print its JSON result
pub fn run() -> CliResult<()> {
    run_cli(Cli::parse_args())
}

pub fn run_cli(cli: Cli) -> CliResult<()> {
    let config = match Config::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            return Err(e);
        }
    };

    let severity = match cli.log_level.as_deref() {
        Some(level) => parse_severity(level),
        None => config.severity(),
    };
    match severity {
        Ok(severity) => Logger::set_min_severity(severity),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            return Err(e);
        }
    }

    run_command(&cli.command, &config)
}

/// Run one command inside a command scope and print the response
pub fn run_command(command: &Command, config: &Config) -> CliResult<()> {
    let scope = CommandScope::begin(command.name());
    match execute(command, config) {
        Ok(data) => {
            scope.complete();
            write_response(data)
        }
        Err(e) => {
            scope.fail(e.code_str(), e.message());
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Run one command and return its JSON payload
pub fn execute(command: &Command, config: &Config) -> CliResult<Value> {
    match command {
        Command::Summary { input } => summary(&load_input(input, config)?, config),
        Command::Revenue {
            input,
            start,
            end,
            per_row,
        } => {
            let table = load_input(input, config)?;
            let range = optional_range(start.as_deref(), end.as_deref())?;
            revenue(&table, range, *per_row)
        }
        Command::Compare {
            input,
            start1,
            end1,
            start2,
            end2,
        } => {
            let table = load_input(input, config)?;
            let period1 = (parse_timestamp(start1)?, parse_timestamp(end1)?);
            let period2 = (parse_timestamp(start2)?, parse_timestamp(end2)?);
            let (first, second) = compare_revenue(&table, period1, period2)?;
            Ok(json!({
                "period1": { "start": period1.0, "end": period1.1, "revenue": first },
                "period2": { "start": period2.0, "end": period2.1, "revenue": second },
            }))
        }
        Command::Filter {
            input,
            min_quantity,
            start,
            end,
            user,
            product,
            skip_zero_quantity,
            output,
        } => {
            let table = load_input(input, config)?;
            let mut predicates = Vec::new();
            if let Some(threshold) = min_quantity {
                predicates.push(RowPredicate::quantity_greater_than(*threshold));
            }
            if start.is_some() || end.is_some() {
                let range = optional_range(start.as_deref(), end.as_deref())?;
                predicates.push(RowPredicate::in_date_range(range));
            }
            if let Some(user_id) = user {
                predicates.push(RowPredicate::user(*user_id));
            }
            if let Some(product_id) = product {
                predicates.push(RowPredicate::product(*product_id));
            }

            let view;
            let subset = if *skip_zero_quantity {
                view = mask_zero_quantity(&table);
                filter(&view, &predicates)
            } else {
                filter(&table, &predicates)
            };
            emit_rows(&subset, output, config)
        }
        Command::Top {
            input,
            count,
            output,
        } => {
            let table = load_input(input, config)?;
            let n = count.unwrap_or(config.top_n);
            let products: Vec<_> = product_revenue(&table)?.into_iter().take(n).collect();
            let subset = top_products_by_revenue(&table, n)?;
            let mut data = emit_rows(&subset, output, config)?;
            data["n"] = json!(n);
            data["products"] = json!(products);
            Ok(data)
        }
        Command::Mask { input } => mask(&load_input(input, config)?),
        Command::Reprice {
            input,
            percent,
            output,
        } => {
            let table = load_input(input, config)?;
            let percent: Decimal = percent
                .trim()
                .parse()
                .map_err(|_| CliError::invalid_argument(format!("Invalid percent '{}'", percent)))?;
            let repriced = increase_prices(&table, percent)?;
            let mut data = emit_table(&repriced, output, config)?;
            data["percent"] = json!(percent);
            data["unit_prices"] = json!(repriced.unit_prices());
            Ok(data)
        }
        Command::Convert {
            input,
            destination,
            output_format,
        } => {
            let from = input_format(input, config)?;
            let table = from.load_path(&input.input)?;
            let to = resolve_format(destination, output_format.as_deref(), config)?;
            to.save_path(&table, destination)?;
            Ok(json!({
                "rows": table.len(),
                "from": from,
                "to": to,
                "output": destination.display().to_string(),
            }))
        }
        Command::Sample { output } => {
            let table = TransactionTable::new(sample_transactions())?;
            emit_table(&table, output, config)
        }
    }
}

fn summary(table: &TransactionTable, config: &Config) -> CliResult<Value> {
    let schema: Vec<Value> = table
        .schema()
        .into_iter()
        .map(|(name, ty)| json!({ "name": name.as_str(), "type": ty.type_name() }))
        .collect();

    Ok(json!({
        "rows": table.len(),
        "schema": schema,
        "total_revenue": total_revenue(table)?,
        "unique_users": unique_user_count(table),
        "most_purchased_product": most_purchased_product(table)?,
        "transactions_per_user": transaction_counts_per_user(table),
        "product_revenue": product_revenue(table)?,
        "price_tiers": tier_counts(table, &config.price_tiers),
    }))
}

fn revenue(table: &TransactionTable, range: DateRange, per_row: bool) -> CliResult<Value> {
    let mut data = json!({
        "start": range.start(),
        "end": range.end(),
        "revenue": revenue_within(table, &range)?,
    });
    if per_row {
        data["rows"] = json!(row_revenue(table)?);
    }
    Ok(data)
}

fn mask(table: &TransactionTable) -> CliResult<Value> {
    let view = mask_zero_quantity(table);
    let masked: Vec<usize> = (0..view.len()).filter(|&i| !view.is_valid(i)).collect();
    Ok(json!({
        "rows": view.len(),
        "valid_rows": view.valid_count(),
        "masked_rows": masked,
        "total_revenue": total_revenue(&view)?,
        "unique_users": unique_user_count(&view),
        "most_purchased_product": most_purchased_product(&view).ok(),
        "transactions_per_user": transaction_counts_per_user(&view),
    }))
}

/// Print the rows, or materialize them to the output file
fn emit_rows<S: RowSource + ?Sized>(rows: &S, output: &OutputArgs, config: &Config) -> CliResult<Value> {
    match &output.output {
        Some(path) => {
            let table = TransactionTable::new(rows.rows().into_iter().cloned().collect())?;
            write_table(&table, path, output.output_format.as_deref(), config)
        }
        None => Ok(rows_json(rows.rows())),
    }
}

fn emit_table(table: &TransactionTable, output: &OutputArgs, config: &Config) -> CliResult<Value> {
    match &output.output {
        Some(path) => write_table(table, path, output.output_format.as_deref(), config),
        None => Ok(rows_json(table.iter().collect())),
    }
}

fn write_table(
    table: &TransactionTable,
    path: &Path,
    explicit: Option<&str>,
    config: &Config,
) -> CliResult<Value> {
    let format = resolve_format(path, explicit, config)?;
    format.save_path(table, path)?;
    Ok(json!({
        "count": table.len(),
        "output": path.display().to_string(),
        "format": format,
    }))
}

fn rows_json(rows: Vec<&TransactionRecord>) -> Value {
    json!({ "count": rows.len(), "rows": rows })
}

fn load_input(input: &InputArgs, config: &Config) -> CliResult<TransactionTable> {
    let format = input_format(input, config)?;
    Ok(format.load_path(&input.input)?)
}

fn input_format(input: &InputArgs, config: &Config) -> CliResult<FileFormat> {
    resolve_format(&input.input, input.input_format.as_deref(), config)
}

/// Explicit name wins, then the extension, then the configured default
fn resolve_format(path: &Path, explicit: Option<&str>, config: &Config) -> CliResult<FileFormat> {
    match explicit {
        Some(name) => Ok(name.parse()?),
        None => Ok(FileFormat::from_path(path).unwrap_or(config.default_format)),
    }
}

fn parse_timestamp(raw: &str) -> CliResult<NaiveDateTime> {
    parse_timestamp_str(raw)
        .ok_or_else(|| CliError::invalid_argument(format!("Invalid timestamp '{}'", raw)))
}

/// Missing bounds are open
fn optional_range(start: Option<&str>, end: Option<&str>) -> CliResult<DateRange> {
    let open = DateRange::unbounded();
    let start = start.map(parse_timestamp).transpose()?.unwrap_or(open.start());
    let end = end.map(parse_timestamp).transpose()?.unwrap_or(open.end());
    Ok(DateRange::new(start, end)?)
}

fn parse_severity(level: &str) -> CliResult<Severity> {
    level
        .parse()
        .map_err(|e: String| CliError::invalid_argument(format!("Invalid --log-level: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use crate::query::QueryErrorCode;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_sample(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        let table = TransactionTable::new(sample_transactions()).unwrap();
        FileFormat::from_path(&path)
            .unwrap()
            .save_path(&table, &path)
            .unwrap();
        path
    }

    fn input(path: &Path) -> InputArgs {
        InputArgs {
            input: path.to_path_buf(),
            input_format: None,
        }
    }

    #[test]
    fn test_summary() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "t.csv");
        let data = execute(
            &Command::Summary { input: input(&path) },
            &Config::default(),
        )
        .unwrap();
        assert_eq!(data["rows"], 8);
        assert_eq!(data["total_revenue"], "258.19");
        assert_eq!(data["unique_users"], 4);
        assert_eq!(data["most_purchased_product"], 302);
        assert_eq!(data["schema"][4]["name"], "unit_price");
        assert_eq!(data["price_tiers"]["low"], 8);
    }

    #[test]
    fn test_revenue_with_range() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "t.txnc");
        let data = execute(
            &Command::Revenue {
                input: input(&path),
                start: Some("2024-08-05 10:00".into()),
                end: Some("2024-08-05T10:26".into()),
                per_row: true,
            },
            &Config::default(),
        )
        .unwrap();
        assert_eq!(data["revenue"], "87.93");
        assert_eq!(data["rows"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_compare_inverted_period() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "t.txt");
        let err = execute(
            &Command::Compare {
                input: input(&path),
                start1: "2024-08-05T10:00".into(),
                end1: "2024-08-05T10:26".into(),
                start2: "2024-08-05T10:30".into(),
                end2: "2024-08-05T10:00".into(),
            },
            &Config::default(),
        )
        .unwrap_err();
        assert_eq!(err.code(), CliErrorCode::Query(QueryErrorCode::InvalidRange));
    }

    #[test]
    fn test_filter_to_file() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "t.csv");
        let out = dir.path().join("big.txnc");
        let data = execute(
            &Command::Filter {
                input: input(&path),
                min_quantity: Some(1),
                start: None,
                end: None,
                user: None,
                product: None,
                skip_zero_quantity: false,
                output: OutputArgs {
                    output: Some(out.clone()),
                    output_format: None,
                },
            },
            &Config::default(),
        )
        .unwrap();
        assert_eq!(data["count"], 3);
        assert_eq!(data["format"], "columnar");
        let loaded = FileFormat::Columnar.load_path(&out).unwrap();
        assert_eq!(loaded.quantities(), vec![2, 4, 3]);
    }

    #[test]
    fn test_top_uses_configured_n() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "t.csv");
        let config = Config {
            top_n: 1,
            ..Config::default()
        };
        let data = execute(
            &Command::Top {
                input: input(&path),
                count: None,
                output: OutputArgs::default(),
            },
            &config,
        )
        .unwrap();
        assert_eq!(data["n"], 1);
        assert_eq!(data["count"], 1);
        assert_eq!(data["products"][0]["product_id"], 304);
    }

    #[test]
    fn test_mask() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "t.csv");
        let data = execute(&Command::Mask { input: input(&path) }, &Config::default()).unwrap();
        assert_eq!(data["rows"], 8);
        assert_eq!(data["valid_rows"], 7);
        assert_eq!(data["masked_rows"], json!([5]));
        assert_eq!(data["total_revenue"], "258.19");
    }

    #[test]
    fn test_reprice_rejects_bad_percent() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "t.csv");
        let err = execute(
            &Command::Reprice {
                input: input(&path),
                percent: "five".into(),
                output: OutputArgs::default(),
            },
            &Config::default(),
        )
        .unwrap_err();
        assert_eq!(err.code(), CliErrorCode::InvalidArgument);
    }

    #[test]
    fn test_reprice_prices() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "t.csv");
        let data = execute(
            &Command::Reprice {
                input: input(&path),
                percent: "5".into(),
                output: OutputArgs::default(),
            },
            &Config::default(),
        )
        .unwrap();
        assert_eq!(data["unit_prices"][6], "0.21");
        assert_eq!(data["unit_prices"][0], "16.7895");
    }

    #[test]
    fn test_convert_between_formats() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "t.txt");
        let dest = dir.path().join("t.csv");
        let data = execute(
            &Command::Convert {
                input: input(&path),
                destination: dest.clone(),
                output_format: None,
            },
            &Config::default(),
        )
        .unwrap();
        assert_eq!(data["from"], "text");
        assert_eq!(data["to"], "delimited");
        let text = std::fs::read_to_string(&dest).unwrap();
        assert!(text.starts_with("transaction_id,"));
    }

    #[test]
    fn test_unknown_extension_uses_default_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.data");
        let table = TransactionTable::new(sample_transactions()).unwrap();
        FileFormat::Columnar.save_path(&table, &path).unwrap();
        let config = Config {
            default_format: FileFormat::Columnar,
            ..Config::default()
        };
        let data = execute(&Command::Summary { input: input(&path) }, &config).unwrap();
        assert_eq!(data["rows"], 8);
    }

    #[test]
    fn test_sample_rows() {
        let data = execute(
            &Command::Sample {
                output: OutputArgs::default(),
            },
            &Config::default(),
        )
        .unwrap();
        assert_eq!(data["count"], 8);
        assert_eq!(data["rows"][0]["transaction_id"], 1001);
        assert_eq!(data["rows"][0]["timestamp"], "2024-08-05T10:15:00");
    }

    #[test]
    fn test_bad_timestamp() {
        assert_eq!(
            optional_range(Some("yesterday"), None).unwrap_err().code(),
            CliErrorCode::InvalidArgument
        );
    }
}
