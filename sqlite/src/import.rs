//! Outcome of a bulk import.

use phonebook_core::{Contact, ContactRecord, MalformedLine};

/// Report of an import, listing what was stored and what was left out.
///
/// Returned by [`ContactStore::import_contacts`](crate::ContactStore::import_contacts)
/// and [`ContactStore::import_file`](crate::ContactStore::import_file). A
/// non-empty `skipped` or `malformed` list does not mean the import failed;
/// every other row was still stored.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Contacts stored, in input order, with their new ids.
    pub inserted: Vec<Contact>,
    /// Records rejected because their phone number was already taken.
    pub skipped: Vec<ContactRecord>,
    /// Source lines that did not contain a name and a phone number.
    pub malformed: Vec<MalformedLine>,
}

impl ImportReport {
    /// Number of input rows seen, stored or not.
    pub fn total(&self) -> usize {
        self.inserted.len() + self.skipped.len() + self.malformed.len()
    }

    /// Returns `true` when every input row was stored.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.malformed.is_empty()
    }
}
