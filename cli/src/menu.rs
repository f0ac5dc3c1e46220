//! Interactive numbered menu over standard input and output.
//!
//! The loop reads a choice, prompts for that action's arguments, runs one
//! store operation and prints the outcome. Store failures are printed as
//! `[ERROR]` lines and never end the loop; only `0` or end of input does.

use std::io::{self, BufRead, Write};

use phonebook_sqlite::{ContactStore, StoreError};

use crate::output::{OutputFormat, write_contacts, write_import_report};

const MENU: &str = "
 PHONEBOOK MENU
1. Add manually
2. Load from file
3. Update record
4. Search
5. Delete record
0. Exit";

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// Menu loop bound to a store and a pair of streams.
pub struct Menu<'a, R, W> {
    store: &'a ContactStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a ContactStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Runs until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Only I/O failures on the streams themselves are returned.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Your choice: ")? else {
                break;
            };

            let step = match choice.trim() {
                "1" => self.add()?,
                "2" => self.import()?,
                "3" => self.update()?,
                "4" => self.search()?,
                "5" => self.delete()?,
                "0" => Step::Exit,
                _ => {
                    writeln!(self.output, "[ERROR] Invalid input.")?;
                    Step::Continue
                }
            };
            if step == Step::Exit {
                break;
            }
        }

        writeln!(self.output, "Exit.")?;
        self.output.flush()
    }

    fn add(&mut self) -> io::Result<Step> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(Step::Exit);
        };
        let Some(phone) = self.prompt("Phone: ")? else {
            return Ok(Step::Exit);
        };

        match self.store.add_contact(&name, &phone) {
            Ok(contact) => writeln!(
                self.output,
                "[INFO] Contact added: {} {}",
                contact.first_name, contact.phone_number
            )?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(Step::Continue)
    }

    fn import(&mut self) -> io::Result<Step> {
        let Some(path) = self.prompt("Path to file: ")? else {
            return Ok(Step::Exit);
        };

        match self.store.import_file(path.trim()) {
            Ok(report) => write_import_report(&mut self.output, &report)?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(Step::Continue)
    }

    fn update(&mut self) -> io::Result<Step> {
        let Some(field) = self.prompt("Field to update (first_name/phone_number): ")? else {
            return Ok(Step::Exit);
        };
        let Some(old_value) = self.prompt("Old value: ")? else {
            return Ok(Step::Exit);
        };
        let Some(new_value) = self.prompt("New value: ")? else {
            return Ok(Step::Exit);
        };

        match self.store.update_field(&field, &old_value, &new_value) {
            Ok(rows) => writeln!(
                self.output,
                "[INFO] Updated: {} = {old_value} → {new_value} ({rows} row(s))",
                field.trim()
            )?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(Step::Continue)
    }

    fn search(&mut self) -> io::Result<Step> {
        let Some(field) = self.prompt("Filter (first_name/phone_number or Enter for all): ")? else {
            return Ok(Step::Exit);
        };

        let result = if field.trim().is_empty() {
            self.store.search(None, None)
        } else {
            let Some(value) = self.prompt("Value: ")? else {
                return Ok(Step::Exit);
            };
            self.store.search(Some(&field), Some(&value))
        };

        match result {
            Ok(contacts) => write_contacts(&mut self.output, &contacts, OutputFormat::Table)?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(Step::Continue)
    }

    fn delete(&mut self) -> io::Result<Step> {
        let Some(field) = self.prompt("Delete by (first_name/phone_number): ")? else {
            return Ok(Step::Exit);
        };
        let Some(value) = self.prompt("Value: ")? else {
            return Ok(Step::Exit);
        };

        match self.store.delete_contact(&field, &value) {
            Ok(rows) => writeln!(
                self.output,
                "[INFO] Deleted by {} = {value} ({rows} row(s))",
                field.trim()
            )?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(Step::Continue)
    }

    fn report_error(&mut self, err: &StoreError) -> io::Result<()> {
        if !err.is_recoverable() {
            tracing::error!(error = %err, "Store operation failed");
        }
        writeln!(self.output, "[ERROR] {err}")
    }

    /// Prints `label` and reads one line without its terminator.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}
