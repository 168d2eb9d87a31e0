//! Whitespace-separated text, one record per line, no header.
//!
//! Blank lines and lines starting with `#` are skipped.

use std::io::{BufRead, BufReader, Read, Write};

use crate::table::TransactionTable;

use super::errors::FormatResult;
use super::TIMESTAMP_FORMAT;

pub fn save<W: Write>(table: &TransactionTable, writer: &mut W) -> FormatResult<()> {
    for r in table {
        writeln!(
            writer,
            "{} {} {} {} {} {}",
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
    let mut rows: Vec<Vec<String>> = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rows.push(trimmed.split_whitespace().map(str::to_string).collect());
    }
    Ok(TransactionTable::from_rows(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatError;
    use crate::table::{sample_transactions, TableErrorCode};

    #[test]
    fn test_save_layout() {
        let table = TransactionTable::new(sample_transactions()).unwrap();
        let mut out = Vec::new();
        save(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "1001 1 302 2 15.99 2024-08-05T10:15:00");
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn test_load_skips_blank_and_comment_lines() {
        let input = "# exported\n\n1 2 3 4 5.50 2024-01-01T00:00:00\n   \n";
        let table = load(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.quantities(), vec![4]);
    }

    #[test]
    fn test_load_bad_field() {
        let input = "1 2 3 x 5.50 2024-01-01T00:00:00\n";
        match load(input.as_bytes()) {
            Err(FormatError::Table(e)) => {
                assert_eq!(e.code(), TableErrorCode::SchemaViolation);
                assert_eq!(e.violation().unwrap().column, "quantity");
            }
            other => panic!("expected table error, got {:?}", other),
        }
    }
}
