//! Integration tests for the phonebook-sqlite crate.

use phonebook_core::{ContactRecord, DatabaseConfig};
use phonebook_sqlite::{ContactStore, StoreError};
use rusqlite::Connection;
use std::fs;
use tempfile::TempDir;

/// Creates a store backed by a fresh database file with the table in place.
fn fresh_store() -> (TempDir, ContactStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = ContactStore::new(DatabaseConfig::at(dir.path().join("phonebook.db")));
    store.ensure_schema().unwrap();
    (dir, store)
}

/// Opens a side connection for inspecting the database directly.
fn inspect(store: &ContactStore) -> Connection {
    Connection::open(&store.config().path).unwrap()
}

fn phones(store: &ContactStore) -> Vec<String> {
    store
        .search(None, None)
        .unwrap()
        .into_iter()
        .map(|c| c.phone_number)
        .collect()
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[test]
fn test_ensure_schema_is_idempotent() {
    let (_dir, store) = fresh_store();
    store.add_contact("Alice", "111").unwrap();
    store.ensure_schema().unwrap();

    let conn = inspect(&store);
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'phonebook'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
    // Second call keeps existing rows.
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_schema_columns_and_constraints() {
    let (_dir, store) = fresh_store();
    let conn = inspect(&store);

    let mut stmt = conn.prepare("PRAGMA table_info(phonebook)").unwrap();
    let columns: Vec<(String, String, bool, bool)> = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)? != 0,
                row.get::<_, i64>(5)? != 0,
            ))
        })
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        columns,
        vec![
            ("id".to_string(), "INTEGER".to_string(), false, true),
            ("first_name".to_string(), "TEXT".to_string(), true, false),
            ("phone_number".to_string(), "TEXT".to_string(), true, false),
        ]
    );

    let unique_on_phone: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_index_list('phonebook') AS il \
             JOIN pragma_index_info(il.name) AS ii \
             WHERE il.\"unique\" = 1 AND ii.name = 'phone_number'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(unique_on_phone, 1);
}

#[test]
fn test_schema_exists_reports_table_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = ContactStore::new(DatabaseConfig::at(dir.path().join("phonebook.db")));
    assert!(!store.schema_exists().unwrap());
    store.ensure_schema().unwrap();
    assert!(store.schema_exists().unwrap());
}

// ---------------------------------------------------------------------------
// Insert and search
// ---------------------------------------------------------------------------

#[test]
fn test_insert_then_search_by_partial_name() {
    let (_dir, store) = fresh_store();
    let added = store.add_contact("Alice", "111").unwrap();
    store.add_contact("Bob", "222").unwrap();

    let found = store.search(Some("first_name"), Some("Ali")).unwrap();
    assert_eq!(found, vec![added]);
    assert_eq!(found[0].first_name, "Alice");
    assert_eq!(found[0].phone_number, "111");
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let (_dir, store) = fresh_store();
    store.add_contact("Alice", "111").unwrap();
    store.add_contact("MALIK", "222").unwrap();
    store.add_contact("Bob", "333").unwrap();

    let names: Vec<_> = store
        .search(Some("first_name"), Some("aLi"))
        .unwrap()
        .into_iter()
        .map(|c| c.first_name)
        .collect();
    assert_eq!(names, vec!["Alice", "MALIK"]);

    let by_phone = store.search(Some("phone_number"), Some("3")).unwrap();
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0].first_name, "Bob");
}

#[test]
fn test_search_ignores_case_for_non_ascii_names() {
    let (_dir, store) = fresh_store();
    store.add_contact("Алия", "111").unwrap();
    store.add_contact("Émile", "222").unwrap();
    store.add_contact("ÉMILIA", "333").unwrap();

    let cyrillic = store.search(Some("first_name"), Some("алия")).unwrap();
    assert_eq!(cyrillic.len(), 1);
    assert_eq!(cyrillic[0].first_name, "Алия");

    let names: Vec<_> = store
        .search(Some("first_name"), Some("émil"))
        .unwrap()
        .into_iter()
        .map(|c| c.first_name)
        .collect();
    assert_eq!(names, vec!["Émile", "ÉMILIA"]);

    // Upper-case needle against mixed-case values.
    let upper = store.search(Some("first_name"), Some("ЛИЯ")).unwrap();
    assert_eq!(upper.len(), 1);
}

#[test]
fn test_search_treats_like_wildcards_literally() {
    let (_dir, store) = fresh_store();
    store.add_contact("100% Plumbing", "111").unwrap();
    store.add_contact("1000 Plumbing", "222").unwrap();
    store.add_contact("snake_case", "333").unwrap();
    store.add_contact("snakeXcase", "444").unwrap();

    let percent = store.search(Some("first_name"), Some("0%")).unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].phone_number, "111");

    let underscore = store.search(Some("first_name"), Some("e_c")).unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].phone_number, "333");
}

#[test]
fn test_search_without_filter_returns_all_in_id_order() {
    let (_dir, store) = fresh_store();
    store.add_contact("Cy", "3").unwrap();
    store.add_contact("Ann", "1").unwrap();
    store.add_contact("Bo", "2").unwrap();

    let all = store.search(None, None).unwrap();
    let ids: Vec<_> = all.iter().map(|c| c.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(phones(&store), vec!["3", "1", "2"]);

    assert_eq!(store.search(Some("first_name"), None).unwrap().len(), 3);
    assert_eq!(store.search(None, Some("Ann")).unwrap().len(), 3);
}

#[test]
fn test_search_empty_table() {
    let (_dir, store) = fresh_store();
    assert!(store.search(None, None).unwrap().is_empty());
    assert!(store.search(Some("phone_number"), Some("1")).unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Uniqueness
// ---------------------------------------------------------------------------

#[test]
fn test_duplicate_phone_is_rejected() {
    let (_dir, store) = fresh_store();
    store.add_contact("Bob", "222").unwrap();

    let err = store.add_contact("Carol", "222").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEntry { ref phone_number } if phone_number == "222"));
    assert!(err.is_recoverable());

    let matches = store.search(Some("phone_number"), Some("222")).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].first_name, "Bob");

    // Store stays usable.
    store.add_contact("Carol", "223").unwrap();
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn test_names_may_repeat() {
    let (_dir, store) = fresh_store();
    store.add_contact("Sam", "1").unwrap();
    store.add_contact("Sam", "2").unwrap();
    assert_eq!(store.search(Some("first_name"), Some("Sam")).unwrap().len(), 2);
}

#[test]
fn test_update_phone_to_existing_number_is_duplicate() {
    let (_dir, store) = fresh_store();
    store.add_contact("Alice", "111").unwrap();
    store.add_contact("Bob", "222").unwrap();

    let err = store.update_field("phone_number", "222", "111").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEntry { ref phone_number } if phone_number == "111"));
    assert_eq!(phones(&store), vec!["111", "222"]);
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[test]
fn test_import_skips_duplicates_and_continues() {
    let (_dir, store) = fresh_store();
    let report = store
        .import_contacts(vec![
            ContactRecord::new("Dan", "333"),
            ContactRecord::new("Eve", "333"),
            ContactRecord::new("Fay", "444"),
        ])
        .unwrap();

    let stored: Vec<_> = report
        .inserted
        .iter()
        .map(|c| (c.first_name.as_str(), c.phone_number.as_str()))
        .collect();
    assert_eq!(stored, vec![("Dan", "333"), ("Fay", "444")]);
    assert_eq!(report.skipped, vec![ContactRecord::new("Eve", "333")]);
    assert_eq!(report.total(), 3);
    assert!(!report.is_complete());

    let all = store.search(None, None).unwrap();
    assert_eq!(all, report.inserted);
}

#[test]
fn test_import_skips_rows_already_in_store() {
    let (_dir, store) = fresh_store();
    store.add_contact("Old", "555").unwrap();

    let report = store
        .import_contacts(vec![
            ContactRecord::new("New", "555"),
            ContactRecord::new("Other", "556"),
        ])
        .unwrap();
    assert_eq!(report.inserted.len(), 1);
    assert_eq!(report.skipped.len(), 1);

    let kept = store.search(Some("phone_number"), Some("555")).unwrap();
    assert_eq!(kept[0].first_name, "Old");
}

#[test]
fn test_import_empty_input() {
    let (_dir, store) = fresh_store();
    let report = store.import_contacts(Vec::new()).unwrap();
    assert_eq!(report.total(), 0);
    assert!(report.is_complete());
}

#[test]
fn test_import_file_reports_duplicates_and_malformed_lines() {
    let (dir, store) = fresh_store();
    let path = dir.path().join("contacts.csv");
    fs::write(
        &path,
        "Dan,333\nEve,333\nnot a record\n\n\"Smith, Fay\",444\n",
    )
    .unwrap();

    let report = store.import_file(&path).unwrap();
    assert_eq!(report.inserted.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, Some(2));
    assert_eq!(report.malformed.len(), 1);
    assert_eq!(report.malformed[0].line, 3);

    let fay = store.search(Some("phone_number"), Some("444")).unwrap();
    assert_eq!(fay[0].first_name, "Smith, Fay");
}

#[test]
fn test_import_missing_file_is_core_error() {
    let (dir, store) = fresh_store();
    let err = store.import_file(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, StoreError::Core(_)));
    assert_eq!(store.count().unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn test_update_name_changes_every_match() {
    let (_dir, store) = fresh_store();
    store.add_contact("Sam", "1").unwrap();
    store.add_contact("Sam", "2").unwrap();
    store.add_contact("Samantha", "3").unwrap();

    let rows = store.update_field("first_name", "Sam", "Samuel").unwrap();
    assert_eq!(rows, 2);

    let samuels = store.search(Some("first_name"), Some("Samuel")).unwrap();
    assert_eq!(samuels.len(), 2);
    // Exact match only.
    assert_eq!(
        store.search(Some("first_name"), Some("Samantha")).unwrap().len(),
        1
    );
}

#[test]
fn test_update_phone_keeps_id() {
    let (_dir, store) = fresh_store();
    let before = store.add_contact("Alice", "111").unwrap();

    assert_eq!(store.update_field("phone_number", "111", "999").unwrap(), 1);

    let after = store.search(Some("phone_number"), Some("999")).unwrap();
    assert_eq!(after[0].id, before.id);
    assert_eq!(after[0].first_name, "Alice");
}

#[test]
fn test_update_with_no_match_affects_zero_rows() {
    let (_dir, store) = fresh_store();
    store.add_contact("Alice", "111").unwrap();
    assert_eq!(store.update_field("first_name", "Nobody", "X").unwrap(), 0);
    assert_eq!(store.search(None, None).unwrap()[0].first_name, "Alice");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn test_delete_by_exact_phone() {
    let (_dir, store) = fresh_store();
    store.add_contact("Alice", "111").unwrap();
    store.add_contact("Ali", "1111").unwrap();
    store.add_contact("Al", "0111").unwrap();

    assert_eq!(store.delete_contact("phone_number", "111").unwrap(), 1);
    assert_eq!(phones(&store), vec!["1111", "0111"]);
}

#[test]
fn test_delete_by_name_removes_all_exact_matches() {
    let (_dir, store) = fresh_store();
    store.add_contact("Sam", "1").unwrap();
    store.add_contact("Sam", "2").unwrap();
    store.add_contact("sam", "3").unwrap();

    assert_eq!(store.delete_contact("first_name", "Sam").unwrap(), 2);
    assert_eq!(phones(&store), vec!["3"]);
}

#[test]
fn test_delete_without_match_is_ok() {
    let (_dir, store) = fresh_store();
    assert_eq!(store.delete_contact("first_name", "Ghost").unwrap(), 0);
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let (_dir, store) = fresh_store();
    store.add_contact("A", "1").unwrap();
    let last = store.add_contact("B", "2").unwrap();
    store.delete_contact("phone_number", "2").unwrap();

    let next = store.add_contact("C", "3").unwrap();
    assert!(next.id > last.id);
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_field_leaves_store_unchanged() {
    let (_dir, store) = fresh_store();
    store.add_contact("Alice", "x").unwrap();

    let err = store.update_field("email", "x", "y").unwrap_err();
    assert!(matches!(err, StoreError::InvalidField(ref f) if f == "email"));
    let err = store.delete_contact("email", "x").unwrap_err();
    assert!(matches!(err, StoreError::InvalidField(_)));
    assert!(err.is_recoverable());

    assert_eq!(phones(&store), vec!["x"]);
}

#[test]
fn test_field_names_are_never_interpolated() {
    let (_dir, store) = fresh_store();
    store.add_contact("Alice", "111").unwrap();

    let err = store
        .delete_contact("phone_number = phone_number OR 1 = 1; --", "x")
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidField(_)));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_unopenable_path_is_connectivity_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = ContactStore::new(DatabaseConfig::at(dir.path().join("no/such/dir/pb.db")));

    let err = store.ensure_schema().unwrap_err();
    assert!(matches!(err, StoreError::Connectivity(_)), "{err:?}");
    assert!(!err.is_recoverable());
    assert!(matches!(
        store.add_contact("A", "1"),
        Err(StoreError::Connectivity(_))
    ));
}

#[test]
fn test_missing_database_without_create_is_connectivity_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = DatabaseConfig::at(dir.path().join("phonebook.db"));
    config.create_if_missing = false;
    let store = ContactStore::new(config);

    assert!(matches!(
        store.ensure_schema(),
        Err(StoreError::Connectivity(_))
    ));
    assert!(!store.config().path.exists());
}

#[test]
fn test_non_database_file_is_connectivity_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phonebook.db");
    fs::write(&path, vec![0x42u8; 4096]).unwrap();
    let store = ContactStore::new(DatabaseConfig::at(&path));

    assert!(matches!(
        store.ensure_schema(),
        Err(StoreError::Connectivity(_))
    ));
}

#[test]
fn test_operations_before_schema_are_database_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = ContactStore::new(DatabaseConfig::at(dir.path().join("phonebook.db")));
    assert!(matches!(
        store.add_contact("A", "1"),
        Err(StoreError::Database(_))
    ));
}
