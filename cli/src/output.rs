//! Text and JSON rendering shared by the menu and the subcommands.

use std::io::{self, Write};

use phonebook_core::Contact;
use phonebook_sqlite::ImportReport;

/// How search results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `id | name | phone` line per contact.
    #[default]
    Table,
    /// A pretty-printed JSON array.
    Json,
}

/// Writes search results.
pub fn write_contacts(out: &mut impl Write, contacts: &[Contact], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Table => {
            if contacts.is_empty() {
                writeln!(out, "[INFO] No contacts found.")?;
            }
            for contact in contacts {
                writeln!(out, "{contact}")?;
            }
        }
        OutputFormat::Json => {
            let raw = serde_json::to_string_pretty(contacts).map_err(io::Error::other)?;
            writeln!(out, "{raw}")?;
        }
    }
    Ok(())
}

/// Writes one line per skipped or malformed row, then a summary.
pub fn write_import_report(out: &mut impl Write, report: &ImportReport) -> io::Result<()> {
    for record in &report.skipped {
        writeln!(out, "[DUPLICATE] Skipped: {record}")?;
    }
    for bad in &report.malformed {
        writeln!(out, "[MALFORMED] Line {}: {}", bad.line, bad.text)?;
    }
    writeln!(
        out,
        "[INFO] Imported {} contact(s), skipped {} duplicate(s) and {} malformed line(s).",
        report.inserted.len(),
        report.skipped.len(),
        report.malformed.len()
    )
}
