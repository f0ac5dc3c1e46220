//! Contact type definitions.
//!
//! This module defines the data model for the single `phonebook` table.
//! The types are designed for serialization with [`serde`] so the CLI can
//! print them as JSON as well as plain text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A stored contact: one row of the `phonebook` table.
///
/// The `id` is assigned by the database on insert and never changes.
///
/// # Examples
///
/// ```
/// use phonebook_core::Contact;
///
/// let contact = Contact::new(1, "Alice", "111");
/// assert_eq!(contact.to_string(), "1 | Alice | 111");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Database-assigned primary key.
    pub id: i64,
    /// Contact name; may repeat across contacts.
    pub first_name: String,
    /// Phone number; unique across all contacts.
    pub phone_number: String,
}

impl Contact {
    pub fn new(id: i64, first_name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            phone_number: phone_number.into(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.id, self.first_name, self.phone_number)
    }
}

/// A name/phone pair that has not been stored yet.
///
/// Produced by the import record parser and consumed by the store's insert
/// and import operations. `line` is the 1-based source line when the record
/// came from a file.
///
/// # Examples
///
/// ```
/// use phonebook_core::ContactRecord;
///
/// let record = ContactRecord::new("Dan", "333").at_line(4);
/// assert_eq!(record.line, Some(4));
/// assert_eq!(record.to_string(), "Dan,333");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub first_name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ContactRecord {
    pub fn new(first_name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            phone_number: phone_number.into(),
            line: None,
        }
    }

    /// Attaches the source line number.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.first_name, self.phone_number)
    }
}

/// A contact column that callers may filter, update, or delete by.
///
/// This is the closed set of field names accepted from user input. The
/// storage layer maps each variant to a fixed SQL statement, so caller
/// text never reaches a query string.
///
/// # Examples
///
/// ```
/// use phonebook_core::ContactField;
///
/// let field: ContactField = "phone_number".parse().unwrap();
/// assert_eq!(field, ContactField::PhoneNumber);
/// assert_eq!(field.as_str(), "phone_number");
///
/// assert!("email".parse::<ContactField>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    FirstName,
    PhoneNumber,
}

impl ContactField {
    /// All accepted fields, in column order.
    pub const ALL: [ContactField; 2] = [ContactField::FirstName, ContactField::PhoneNumber];

    /// Returns the column name.
    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::FirstName => "first_name",
            ContactField::PhoneNumber => "phone_number",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "first_name" => Ok(ContactField::FirstName),
            "phone_number" => Ok(ContactField::PhoneNumber),
            _ => Err(CoreError::UnknownField(raw.to_string())),
        }
    }
}
