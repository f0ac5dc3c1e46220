//! Line-oriented parser for bulk import files.
//!
//! Each non-blank line holds one `name,phone` record. Fields may be wrapped
//! in double quotes so that a name can contain a comma; inside a quoted
//! field `""` stands for a literal quote. Fields after the second are
//! ignored. No header row is assumed.
//!
//! # Example
//!
//! ```
//! use phonebook_core::parse_records;
//!
//! let parsed = parse_records("Dan,333\n\"Smith, Eve\",444\nbroken\n");
//! assert_eq!(parsed.records.len(), 2);
//! assert_eq!(parsed.records[1].first_name, "Smith, Eve");
//! assert_eq!(parsed.malformed[0].line, 3);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::ContactRecord;

/// A line that could not be turned into a [`ContactRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line: usize,
    /// The raw line text, without its line terminator.
    pub text: String,
}

/// Result of parsing an import source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecords {
    /// Records in source order.
    pub records: Vec<ContactRecord>,
    /// Lines with fewer than two fields.
    pub malformed: Vec<MalformedLine>,
}

/// Parses import text into records.
///
/// Blank lines are skipped. Lines that do not yield at least two fields are
/// collected in [`ParsedRecords::malformed`] rather than failing the parse.
pub fn parse_records(text: &str) -> ParsedRecords {
    let mut parsed = ParsedRecords::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = split_fields(line).into_iter();
        match (fields.next(), fields.next()) {
            (Some(first_name), Some(phone_number)) => parsed
                .records
                .push(ContactRecord::new(first_name, phone_number).at_line(idx + 1)),
            _ => parsed.malformed.push(MalformedLine {
                line: idx + 1,
                text: line.to_string(),
            }),
        }
    }

    parsed
}

/// Reads and parses an import file.
///
/// # Errors
///
/// Returns [`IoError`](crate::CoreError::IoError) if the file cannot be read
/// or is not valid UTF-8.
pub fn read_records(path: impl AsRef<Path>) -> Result<ParsedRecords> {
    let text = fs::read_to_string(path)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Ok(parse_records(text))
}

/// Splits one line into comma-separated fields, honoring double quotes.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
