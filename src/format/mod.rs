//! Table file formats
//!
//! One variant per on-disk representation, chosen by an explicit
//! [`FileFormat`] tag:
//!
//! | Tag         | Extension | Layout                                  |
//! |-------------|-----------|-----------------------------------------|
//! | `Text`      | `.txt`    | whitespace-separated, no header         |
//! | `Delimited` | `.csv`    | comma-separated with a header row       |
//! | `Columnar`  | `.txnc`   | binary column blocks, CRC32 trailer     |
//!
//! Every format round-trips a table exactly. Loading goes through table
//! construction, so a malformed row surfaces as the table's schema error.

mod checksum;
mod columnar;
mod delimited;
mod errors;
mod text;

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event};
use crate::table::TransactionTable;

pub use checksum::{compute_checksum, verify_checksum};
pub use columnar::{decode as decode_columnar, encode as encode_columnar, MAGIC, VERSION};
pub use errors::{FormatError, FormatResult};

/// Timestamp text form written by the text formats
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Table file format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Text,
    Delimited,
    Columnar,
}

impl FileFormat {
    pub const ALL: [FileFormat; 3] = [FileFormat::Text, FileFormat::Delimited, FileFormat::Columnar];

    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Text => "text",
            FileFormat::Delimited => "delimited",
            FileFormat::Columnar => "columnar",
        }
    }

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Text => "txt",
            FileFormat::Delimited => "csv",
            FileFormat::Columnar => "txnc",
        }
    }

    /// Infers the format from a path's extension (case-insensitive)
    pub fn from_path(path: &Path) -> FormatResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|f| f.extension() == ext)
            .ok_or_else(|| FormatError::UnknownFormat(path.display().to_string()))
    }

    pub fn save<W: Write>(&self, table: &TransactionTable, writer: &mut W) -> FormatResult<()> {
        match self {
            FileFormat::Text => text::save(table, writer),
            FileFormat::Delimited => delimited::save(table, writer),
            FileFormat::Columnar => columnar::save(table, writer),
        }
    }

    pub fn load<R: Read>(&self, reader: R) -> FormatResult<TransactionTable> {
        match self {
            FileFormat::Text => text::load(reader),
            FileFormat::Delimited => delimited::load(reader),
            FileFormat::Columnar => columnar::load(reader),
        }
    }

    /// Writes `table` to `path`, replacing any existing file
    pub fn save_path(&self, table: &TransactionTable, path: &Path) -> FormatResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.save(table, &mut writer)?;

        log_event_with_fields(
            Event::FileSaved,
            &[
                ("format", self.name()),
                ("path", &path.display().to_string()),
                ("rows", &table.len().to_string()),
            ],
        );
        Ok(())
    }

    /// Reads a table from `path`
    pub fn load_path(&self, path: &Path) -> FormatResult<TransactionTable> {
        let path_str = path.display().to_string();
        let result = File::open(path)
            .map_err(FormatError::from)
            .and_then(|file| self.load(BufReader::new(file)));

        match &result {
            Ok(table) => log_event_with_fields(
                Event::FileLoaded,
                &[
                    ("format", self.name()),
                    ("path", &path_str),
                    ("rows", &table.len().to_string()),
                ],
            ),
            Err(e) => log_event_with_fields(
                Event::FileRejected,
                &[
                    ("code", e.code()),
                    ("format", self.name()),
                    ("path", &path_str),
                    ("reason", &e.to_string()),
                ],
            ),
        }
        result
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FileFormat {
    type Err = FormatError;

    /// Accepts the format name or its extension
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s || f.extension() == s)
            .ok_or(FormatError::UnknownFormat(s))
    }
}

/// Loads a table, inferring the format from the extension
pub fn load_table(path: &Path) -> FormatResult<TransactionTable> {
    FileFormat::from_path(path)?.load_path(path)
}

/// Saves a table, inferring the format from the extension
pub fn save_table(table: &TransactionTable, path: &Path) -> FormatResult<()> {
    FileFormat::from_path(path)?.save_path(table, path)
}
