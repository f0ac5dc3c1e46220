//! SQL for the `phonebook` table.
//!
//! Every statement the store runs is a constant in this module. Statements
//! that depend on a caller-chosen column come in one variant per
//! [`ContactField`] and are selected by matching on the field, so caller
//! text never ends up in a query string.
//!
//! # Table structure
//!
//! - `id` — `INTEGER PRIMARY KEY AUTOINCREMENT`; ids are never reused,
//!   even after the row holding the largest id is deleted
//! - `first_name` — `TEXT NOT NULL`
//! - `phone_number` — `TEXT NOT NULL UNIQUE`

use phonebook_core::ContactField;

/// Name of the contacts table.
pub const TABLE_NAME: &str = "phonebook";

pub(crate) const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS phonebook (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    phone_number TEXT NOT NULL UNIQUE
);
"#;

pub(crate) const TABLE_EXISTS_SQL: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";

pub(crate) const INSERT_SQL: &str =
    "INSERT INTO phonebook (first_name, phone_number) VALUES (?1, ?2)";

pub(crate) const COUNT_SQL: &str = "SELECT COUNT(*) FROM phonebook";

pub(crate) const SELECT_ALL_SQL: &str =
    "SELECT id, first_name, phone_number FROM phonebook ORDER BY id";

/// Returns the `UPDATE` statement for `field`.
///
/// Parameters: `?1` new value, `?2` old value.
pub(crate) fn update_sql(field: ContactField) -> &'static str {
    match field {
        ContactField::FirstName => "UPDATE phonebook SET first_name = ?1 WHERE first_name = ?2",
        ContactField::PhoneNumber => {
            "UPDATE phonebook SET phone_number = ?1 WHERE phone_number = ?2"
        }
    }
}

/// Returns the exact-match `DELETE` statement for `field`.
///
/// Parameters: `?1` value.
pub(crate) fn delete_sql(field: ContactField) -> &'static str {
    match field {
        ContactField::FirstName => "DELETE FROM phonebook WHERE first_name = ?1",
        ContactField::PhoneNumber => "DELETE FROM phonebook WHERE phone_number = ?1",
    }
}

/// Returns the substring `SELECT` statement for `field`.
///
/// Parameters: `?1` a `LIKE` pattern escaped with `\`. Both sides go
/// through `pb_lower`, which must be registered on the connection.
pub(crate) fn search_sql(field: ContactField) -> &'static str {
    match field {
        ContactField::FirstName => {
            "SELECT id, first_name, phone_number FROM phonebook \
             WHERE pb_lower(first_name) LIKE pb_lower(?1) ESCAPE '\\' ORDER BY id"
        }
        ContactField::PhoneNumber => {
            "SELECT id, first_name, phone_number FROM phonebook \
             WHERE pb_lower(phone_number) LIKE pb_lower(?1) ESCAPE '\\' ORDER BY id"
        }
    }
}
