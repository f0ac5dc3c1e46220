//! SQLite contact store for the phonebook.
//!
//! This crate owns the `phonebook` table: its schema, every statement run
//! against it, and the mapping of SQLite failures onto the errors callers
//! act on.
//!
//! # Architecture
//!
//! The crate is organized into five modules:
//!
//! - **`schema`** — table DDL and the fixed per-field statements
//! - **`store`** — [`ContactStore`], one connection per operation
//! - **`import`** — [`ImportReport`] for duplicate-tolerant bulk loads
//! - **`convert`** — row ↔ [`Contact`](phonebook_core::Contact) mapping
//! - **`error`** — [`StoreError`] classification
//!
//! # Quick start
//!
//! ```no_run
//! use phonebook_core::PhonebookConfig;
//! use phonebook_sqlite::ContactStore;
//!
//! let config = PhonebookConfig::load("phonebook.yml").unwrap();
//! let store = ContactStore::new(config.database);
//! store.ensure_schema().unwrap();
//!
//! let report = store.import_file("contacts.csv").unwrap();
//! for record in &report.skipped {
//!     println!("[DUPLICATE] Skipped: {record}");
//! }
//!
//! for contact in store.search(None, None).unwrap() {
//!     println!("{contact}");
//! }
//! ```
//!
//! # Field names
//!
//! Update, delete and filtered search take the field name as text, the way
//! it arrives from the user. It is parsed into
//! [`ContactField`](phonebook_core::ContactField) before any database work,
//! and each variant selects a fixed statement.

mod convert;
mod error;
mod import;
mod schema;
mod store;

pub use error::{Result, StoreError};
pub use import::ImportReport;
pub use schema::TABLE_NAME;
pub use store::ContactStore;
