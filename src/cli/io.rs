//! JSON output for the CLI
//!
//! - One JSON object per invocation on stdout
//! - `{"status":"ok","data":...}` or `{"status":"error","code":..,"message":..}`
//! - UTF-8 only

use std::io::{self, Write};

use serde_json::{json, Value};

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(&mut io::stdout(), data)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_error_to(&mut io::stdout(), code, message)
}

pub fn write_response_to<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    write_line(writer, &json!({ "status": "ok", "data": data }))
}

pub fn write_error_to<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    write_line(
        writer,
        &json!({ "status": "error", "code": code, "message": message }),
    )
}

fn write_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shape() {
        let mut out = Vec::new();
        write_response_to(&mut out, json!({ "rows": 8 })).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["data"]["rows"], 8);
    }

    #[test]
    fn test_error_shape() {
        let mut out = Vec::new();
        write_error_to(&mut out, "TXN_INVALID_RANGE", "start after end").unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["code"], "TXN_INVALID_RANGE");
        assert_eq!(parsed["message"], "start after end");
    }
}
