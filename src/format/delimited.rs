//! Comma-separated rows behind a header naming the six columns.

use std::io::{BufRead, BufReader, Read, Write};

use crate::table::{ColumnName, TransactionTable};

use super::errors::{FormatError, FormatResult};
use super::TIMESTAMP_FORMAT;

const DELIMITER: char = ',';

fn header() -> String {
    ColumnName::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn save<W: Write>(table: &TransactionTable, writer: &mut W) -> FormatResult<()> {
    writeln!(writer, "{}", header())?;
    for r in table {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            r.transaction_id,
            r.user_id,
            r.product_id,
            r.quantity,
            r.unit_price,
            r.timestamp.format(TIMESTAMP_FORMAT)
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load<R: Read>(reader: R) -> FormatResult<TransactionTable> {
    let mut lines = BufReader::new(reader).lines();

    let expected = header();
    let found = match lines.next() {
        Some(line) => line?,
        None => String::new(),
    };
    let normalized: Vec<&str> = found.split(DELIMITER).map(str::trim).collect();
    if normalized.join(",") != expected {
        return Err(FormatError::InvalidHeader {
            expected,
            found: found.trim().to_string(),
        });
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(line.split(DELIMITER).map(str::to_string).collect());
    }
    Ok(TransactionTable::from_rows(rows)?)
}
