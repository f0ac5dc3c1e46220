//! Contact store operations.
//!
//! Provides [`ContactStore`], the data-access layer for the `phonebook`
//! table. The store keeps only its configuration: every operation opens a
//! fresh connection and drops it before returning, on success and on
//! error alike.
//!
//! # Example
//!
//! ```no_run
//! use phonebook_core::DatabaseConfig;
//! use phonebook_sqlite::{ContactStore, StoreError};
//!
//! let store = ContactStore::new(DatabaseConfig::at("phonebook.db"));
//! store.ensure_schema().unwrap();
//!
//! store.add_contact("Alice", "111").unwrap();
//! match store.add_contact("Alicia", "111") {
//!     Err(StoreError::DuplicateEntry { phone_number }) => {
//!         println!("{phone_number} is taken");
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//!
//! let found = store.search(Some("first_name"), Some("ali")).unwrap();
//! assert_eq!(found.len(), 1);
//! ```

use std::path::Path;
use std::time::Duration;

use phonebook_core::{Contact, ContactField, ContactRecord, DatabaseConfig, read_records};
use rusqlite::{Connection, OpenFlags, params};
use tracing::{debug, info, warn};

use crate::convert::{contact_from_row, contains_pattern, register_functions};
use crate::error::{Result, StoreError};
use crate::import::ImportReport;
use crate::schema::{self, TABLE_NAME};

/// Data-access layer for the `phonebook` table.
///
/// Construct it with the [`DatabaseConfig`] loaded at startup. Uniqueness
/// of phone numbers is enforced by the table's `UNIQUE` constraint, and
/// violations surface as [`StoreError::DuplicateEntry`].
///
/// # Examples
///
/// ```no_run
/// use phonebook_core::{ContactRecord, DatabaseConfig};
/// use phonebook_sqlite::ContactStore;
///
/// let store = ContactStore::new(DatabaseConfig::at("phonebook.db"));
/// store.ensure_schema().unwrap();
///
/// let report = store
///     .import_contacts(vec![
///         ContactRecord::new("Dan", "333"),
///         ContactRecord::new("Eve", "333"),
///         ContactRecord::new("Fay", "444"),
///     ])
///     .unwrap();
/// assert_eq!(report.inserted.len(), 2);
/// assert_eq!(report.skipped[0].first_name, "Eve");
///
/// store.update_field("first_name", "Dan", "Daniel").unwrap();
/// store.delete_contact("phone_number", "444").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ContactStore {
    config: DatabaseConfig,
}

impl ContactStore {
    /// Creates a store for the given database. Does not touch the database.
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this store connects with.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Creates the `phonebook` table if it does not exist.
    ///
    /// Uses `CREATE TABLE IF NOT EXISTS` so it is safe to call on every
    /// startup.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(schema::CREATE_TABLE_SQL)?;
        info!(path = %self.config.path.display(), "Phonebook table created or already exists");
        Ok(())
    }

    /// Returns `true` if the `phonebook` table exists.
    pub fn schema_exists(&self) -> Result<bool> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row(schema::TABLE_EXISTS_SQL, [TABLE_NAME], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Inserts one contact and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateEntry`] if the phone number is already
    /// stored. The store is unchanged and remains usable.
    pub fn add_contact(&self, first_name: &str, phone_number: &str) -> Result<Contact> {
        let conn = self.connect()?;
        let contact = insert_contact(&conn, first_name, phone_number)?;
        info!(id = contact.id, first_name, phone_number, "Contact added");
        Ok(contact)
    }

    /// Inserts each record in its own transaction.
    ///
    /// A record whose phone number is already taken is rolled back, logged,
    /// and listed in [`ImportReport::skipped`]; the remaining records are
    /// still processed. Any other failure stops the import and is returned,
    /// leaving the records committed so far in place.
    pub fn import_contacts<I>(&self, records: I) -> Result<ImportReport>
    where
        I: IntoIterator<Item = ContactRecord>,
    {
        let mut conn = self.connect()?;
        let mut report = ImportReport::default();

        for record in records {
            let tx = conn.transaction()?;
            match insert_contact(&tx, &record.first_name, &record.phone_number) {
                Ok(contact) => {
                    tx.commit()?;
                    debug!(id = contact.id, line = ?record.line, "Imported contact");
                    report.inserted.push(contact);
                }
                Err(StoreError::DuplicateEntry { .. }) => {
                    tx.rollback()?;
                    warn!(
                        first_name = %record.first_name,
                        phone_number = %record.phone_number,
                        line = ?record.line,
                        "Skipped duplicate contact"
                    );
                    report.skipped.push(record);
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            inserted = report.inserted.len(),
            skipped = report.skipped.len(),
            "Import finished"
        );
        Ok(report)
    }

    /// Reads `name,phone` records from a file and imports them.
    ///
    /// Lines without two fields are listed in [`ImportReport::malformed`]
    /// and not inserted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] if the file cannot be read, otherwise
    /// the same errors as [`import_contacts`](Self::import_contacts).
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportReport> {
        let path = path.as_ref();
        let parsed = read_records(path)?;
        debug!(
            path = %path.display(),
            records = parsed.records.len(),
            malformed = parsed.malformed.len(),
            "Parsed import file"
        );

        for bad in &parsed.malformed {
            warn!(line = bad.line, text = %bad.text, "Skipped malformed line");
        }

        let mut report = self.import_contacts(parsed.records)?;
        report.malformed = parsed.malformed;
        Ok(report)
    }

    /// Sets `field` to `new_value` on every contact where it equals
    /// `old_value`, returning the number of contacts changed.
    ///
    /// Matching no contacts is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidField`] without opening a connection if
    /// `field` is not a known field, and [`StoreError::DuplicateEntry`] if a
    /// phone number update collides with another contact.
    pub fn update_field(&self, field: &str, old_value: &str, new_value: &str) -> Result<usize> {
        let field = parse_field(field)?;
        let conn = self.connect()?;
        let rows = conn
            .execute(schema::update_sql(field), params![new_value, old_value])
            .map_err(|e| StoreError::from_write(e, new_value))?;
        info!(%field, old_value, new_value, rows, "Updated contacts");
        Ok(rows)
    }

    /// Returns contacts whose `field` contains `value`, ignoring case.
    ///
    /// Case folding uses Unicode lowercase mapping, so `"алия"` finds
    /// `"Алия"` and `"émile"` finds `"Émile"`.
    ///
    /// When either argument is missing or empty, returns every contact.
    /// Results are ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidField`] if both arguments are given and
    /// `field` is not a known field.
    pub fn search(&self, field: Option<&str>, value: Option<&str>) -> Result<Vec<Contact>> {
        let filter = match (field, value) {
            (Some(field), Some(value)) if !field.trim().is_empty() && !value.is_empty() => {
                Some((parse_field(field)?, value))
            }
            _ => None,
        };

        let conn = self.connect()?;
        let (sql, pattern) = match filter {
            Some((field, value)) => (schema::search_sql(field), Some(contains_pattern(value))),
            None => (schema::SELECT_ALL_SQL, None),
        };

        let mut stmt = conn.prepare(sql)?;
        let rows = match &pattern {
            Some(pattern) => stmt.query_map([pattern], contact_from_row)?,
            None => stmt.query_map([], contact_from_row)?,
        };
        let contacts: Vec<Contact> = rows.collect::<std::result::Result<_, _>>()?;

        debug!(matches = contacts.len(), "Search finished");
        Ok(contacts)
    }

    /// Deletes every contact whose `field` equals `value` exactly,
    /// returning the number removed.
    ///
    /// Deleting nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidField`] without opening a connection if
    /// `field` is not a known field.
    pub fn delete_contact(&self, field: &str, value: &str) -> Result<usize> {
        let field = parse_field(field)?;
        let conn = self.connect()?;
        let rows = conn.execute(schema::delete_sql(field), [value])?;
        info!(%field, value, rows, "Deleted contacts");
        Ok(rows)
    }

    /// Returns the number of stored contacts.
    pub fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row(schema::COUNT_SQL, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Opens a connection for a single operation.
    fn connect(&self) -> Result<Connection> {
        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if self.config.create_if_missing {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }

        debug!(path = %self.config.path.display(), "Opening connection");
        let conn = Connection::open_with_flags(&self.config.path, flags)?;
        conn.busy_timeout(Duration::from_millis(self.config.busy_timeout_ms))?;
        register_functions(&conn)?;
        Ok(conn)
    }
}

fn parse_field(raw: &str) -> Result<ContactField> {
    raw.parse()
        .map_err(|_| StoreError::InvalidField(raw.to_string()))
}

fn insert_contact(conn: &Connection, first_name: &str, phone_number: &str) -> Result<Contact> {
    conn.execute(schema::INSERT_SQL, params![first_name, phone_number])
        .map_err(|e| StoreError::from_write(e, phone_number))?;
    Ok(Contact::new(conn.last_insert_rowid(), first_name, phone_number))
}
