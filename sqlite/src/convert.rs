//! Row-level conversions between SQLite and contact types.

use phonebook_core::Contact;
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, Row};

/// Name of the Unicode lowercase SQL function used by the search statements.
pub(crate) const LOWER_FN: &str = "pb_lower";

/// Registers [`LOWER_FN`] on `conn`.
///
/// SQLite's built-in `lower()` and `LIKE` fold ASCII letters only, so
/// searches compare `pb_lower(column)` against `pb_lower(pattern)` instead.
pub(crate) fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|value| value.to_lowercase()))
        },
    )
}

/// Reads a [`Contact`] from a row selected as `id, first_name, phone_number`.
pub(crate) fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        first_name: row.get(1)?,
        phone_number: row.get(2)?,
    })
}

/// Builds a `LIKE` pattern matching any value that contains `needle`.
///
/// `%`, `_` and the escape character itself are escaped with `\` so they
/// match literally; the statement must declare `ESCAPE '\'`.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
