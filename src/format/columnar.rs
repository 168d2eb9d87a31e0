//! Binary column-major table file
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! magic "TXNC" | version u16 | row count u32
//! column block x 6, schema order:
//!     type tag u8 | values
//! checksum u32 (CRC32 over every preceding byte)
//! ```
//!
//! Value encodings: ids `i64`, quantity `u32`, unit price as the 16-byte
//! decimal representation, timestamp as `i64` seconds since the epoch
//! followed by `u32` subsecond nanoseconds. Bad magic, unknown version, checksum mismatch and truncation are all load
//! errors.

use std::io::{Read, Write};

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;

use crate::table::{Column, ColumnName, ColumnType, TransactionRecord, TransactionTable};

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{FormatError, FormatResult};

pub const MAGIC: &[u8; 4] = b"TXNC";
pub const VERSION: u16 = 2;

const HEADER_LEN: usize = 4 + 2 + 4;
const CHECKSUM_LEN: usize = 4;
/// Encoded bytes per row across all six columns
const ROW_LEN: usize = 8 * 3 + 4 + 16 + TIMESTAMP_LEN;
const TIMESTAMP_LEN: usize = 8 + 4;
/// One type tag per column
const TAGS_LEN: usize = 6;

fn type_tag(column_type: ColumnType) -> u8 {
    match column_type {
        ColumnType::Int => 1,
        ColumnType::Quantity => 2,
        ColumnType::Decimal => 3,
        ColumnType::Timestamp => 4,
    }
}

pub fn save<W: Write>(table: &TransactionTable, writer: &mut W) -> FormatResult<()> {
    let bytes = encode(table)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

pub fn load<R: Read>(mut reader: R) -> FormatResult<TransactionTable> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(&bytes)
}

/// Encodes a table into the columnar layout
pub fn encode(table: &TransactionTable) -> FormatResult<Vec<u8>> {
    let row_count = u32::try_from(table.len())
        .map_err(|_| FormatError::Corrupted(format!("{} rows exceed u32", table.len())))?;

    let mut buf = Vec::with_capacity(HEADER_LEN + TAGS_LEN + table.len() * ROW_LEN + CHECKSUM_LEN);
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&VERSION.to_le_bytes());
    buf.extend_from_slice(&row_count.to_le_bytes());

    for name in ColumnName::ALL {
        let column = table.column(name);
        buf.push(type_tag(column.column_type()));
        match column {
            Column::Int(values) => {
                for v in values {
                    buf.extend_from_slice(&v.to_le_bytes());
                }
            }
            Column::Quantity(values) => {
                for v in values {
                    buf.extend_from_slice(&v.to_le_bytes());
                }
            }
            Column::Decimal(values) => {
                for v in values {
                    buf.extend_from_slice(&v.serialize());
                }
            }
            Column::Timestamp(values) => {
                for v in values {
                    let utc = v.and_utc();
                    buf.extend_from_slice(&utc.timestamp().to_le_bytes());
                    buf.extend_from_slice(&utc.timestamp_subsec_nanos().to_le_bytes());
                }
            }
        }
    }

    let checksum = compute_checksum(&buf);
    buf.extend_from_slice(&checksum.to_le_bytes());
    Ok(buf)
}

/// Decodes and verifies a columnar buffer
pub fn decode(bytes: &[u8]) -> FormatResult<TransactionTable> {
    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(FormatError::truncated("header"));
    }
    if &bytes[..4] != MAGIC {
        return Err(FormatError::Corrupted("bad magic".into()));
    }

    let (body, trailer) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    let expected = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    if !verify_checksum(body, expected) {
        return Err(FormatError::ChecksumMismatch {
            expected,
            actual: compute_checksum(body),
        });
    }

    let mut cursor = Cursor::new(&body[4..]);
    let version = u16::from_le_bytes(cursor.take_array("version")?);
    if version != VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }
    let rows = u32::from_le_bytes(cursor.take_array("row count")?) as usize;
    let expected_len = rows.checked_mul(ROW_LEN).and_then(|n| n.checked_add(TAGS_LEN));
    if expected_len != Some(cursor.remaining()) {
        return Err(FormatError::Corrupted(format!(
            "{} rows declared but {} column bytes present",
            rows,
            cursor.remaining()
        )));
    }

    let transaction_ids = read_ints(&mut cursor, ColumnName::TransactionId, rows)?;
    let user_ids = read_ints(&mut cursor, ColumnName::UserId, rows)?;
    let product_ids = read_ints(&mut cursor, ColumnName::ProductId, rows)?;
    let quantities = read_quantities(&mut cursor, rows)?;
    let prices = read_prices(&mut cursor, rows)?;
    let timestamps = read_timestamps(&mut cursor, rows)?;

    if !cursor.is_empty() {
        return Err(FormatError::Corrupted(format!(
            "{} trailing bytes after last column",
            cursor.remaining()
        )));
    }

    let records = (0..rows)
        .map(|i| {
            TransactionRecord::new(
                transaction_ids[i],
                user_ids[i],
                product_ids[i],
                quantities[i],
                prices[i],
                timestamps[i],
            )
        })
        .collect();
    Ok(TransactionTable::new(records)?)
}

/// Forward-only reader over a byte slice
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize, what: &str) -> FormatResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| FormatError::truncated(what))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self, what: &str) -> FormatResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

fn expect_tag(cursor: &mut Cursor<'_>, name: ColumnName) -> FormatResult<()> {
    let [tag] = cursor.take_array::<1>(name.as_str())?;
    let expected = type_tag(name.column_type());
    if tag != expected {
        return Err(FormatError::Corrupted(format!(
            "column '{}' has type tag {}, expected {}",
            name, tag, expected
        )));
    }
    Ok(())
}

fn read_ints(cursor: &mut Cursor<'_>, name: ColumnName, rows: usize) -> FormatResult<Vec<i64>> {
    expect_tag(cursor, name)?;
    let mut values = Vec::with_capacity(rows);
    for _ in 0..rows {
        values.push(i64::from_le_bytes(cursor.take_array(name.as_str())?));
    }
    Ok(values)
}

fn read_quantities(cursor: &mut Cursor<'_>, rows: usize) -> FormatResult<Vec<u32>> {
    expect_tag(cursor, ColumnName::Quantity)?;
    let mut values = Vec::with_capacity(rows);
    for _ in 0..rows {
        values.push(u32::from_le_bytes(cursor.take_array("quantity")?));
    }
    Ok(values)
}

fn read_prices(cursor: &mut Cursor<'_>, rows: usize) -> FormatResult<Vec<Decimal>> {
    expect_tag(cursor, ColumnName::UnitPrice)?;
    let mut values = Vec::with_capacity(rows);
    for _ in 0..rows {
        values.push(Decimal::deserialize(cursor.take_array("unit_price")?));
    }
    Ok(values)
}

fn read_timestamps(cursor: &mut Cursor<'_>, rows: usize) -> FormatResult<Vec<NaiveDateTime>> {
    expect_tag(cursor, ColumnName::Timestamp)?;
    let mut values = Vec::with_capacity(rows);
    for _ in 0..rows {
        let secs = i64::from_le_bytes(cursor.take_array("timestamp")?);
        let nanos = u32::from_le_bytes(cursor.take_array("timestamp")?);
        let ts = DateTime::from_timestamp(secs, nanos)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| {
                FormatError::Corrupted(format!("timestamp {}s {}ns out of range", secs, nanos))
            })?;
        values.push(ts);
    }
    Ok(values)
}
