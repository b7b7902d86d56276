//! Encoding and decoding between canonical field values and stored lines.
//!
//! Fields are joined with `,` and terminated with `\n`. There is no quoting:
//! canonical values never contain a comma, and nothing here checks that
//! they don't.

use intake_core::field::FIELD_COUNT;

use crate::{Error, Result};

pub const DELIMITER: u8 = b',';

pub fn encode_line(fields: &[&str; FIELD_COUNT]) -> String {
  let mut line = fields.join(",");
  line.push('\n');
  line
}

/// Split one stored line (terminator included or not) into its raw fields.
/// `line_no` is 1-based and only used for error reporting.
pub fn decode_line(raw: &[u8], line_no: usize) -> Result<[&[u8]; FIELD_COUNT]> {
  let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
  let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

  let parts: Vec<&[u8]> = raw.split(|b| *b == DELIMITER).collect();
  <[&[u8]; FIELD_COUNT]>::try_from(parts).map_err(|parts| {
    Error::MalformedLine {
      line:     line_no,
      fields:   parts.len(),
      expected: FIELD_COUNT,
    }
  })
}
