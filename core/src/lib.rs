//! Core contact types, import parsing and configuration for the phonebook.
//!
//! This crate holds everything the storage backend and the CLI share:
//!
//! - [`Contact`] — a stored row of the `phonebook` table.
//! - [`ContactRecord`] — a name/phone pair waiting to be inserted.
//! - [`ContactField`] — the closed set of field names callers may filter,
//!   update, or delete by.
//! - [`parse_records`] / [`read_records`] — the line-oriented `name,phone`
//!   parser used by bulk import.
//! - [`PhonebookConfig`] — YAML configuration loaded once at startup.
//!
//! # Example
//!
//! ```
//! use phonebook_core::*;
//!
//! let field: ContactField = "first_name".parse().unwrap();
//! assert_eq!(field.as_str(), "first_name");
//! assert_eq!(Contact::new(1, "Alice", "111").to_string(), "1 | Alice | 111");
//!
//! let parsed = parse_records("Bob,222\n");
//! assert_eq!(parsed.records[0], ContactRecord::new("Bob", "222").at_line(1));
//! ```

mod config;
mod error;
mod record;
mod types;

pub use config::{DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DATABASE_PATH, DatabaseConfig, PhonebookConfig};
pub use error::{CoreError, Result};
pub use record::{MalformedLine, ParsedRecords, parse_records, read_records};
pub use types::*;
