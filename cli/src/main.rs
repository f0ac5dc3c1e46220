use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use phonebook_core::PhonebookConfig;
use phonebook_sqlite::ContactStore;
use tracing::Level;

mod menu;
mod output;

use menu::Menu;
use output::{OutputFormat, write_contacts, write_import_report};

/// Configuration file read when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "phonebook.yml";

#[derive(Debug, Parser)]
#[command(name = "phonebook")]
#[command(about = "Phonebook of contacts stored in SQLite")]
#[command(version)]
struct Cli {
    /// YAML configuration file (default: phonebook.yml, if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Database file; overrides `database.path` from the configuration.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Increase log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Runs the interactive menu when omitted.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive menu.
    Menu,
    /// Create the phonebook table if it does not exist.
    Init,
    /// Add one contact.
    Add(AddArgs),
    /// Load `name,phone` lines from a file, skipping duplicate phone numbers.
    Import(ImportArgs),
    /// Set a field to a new value on every contact where it equals the old value.
    Update(UpdateArgs),
    /// List contacts, optionally filtered by a case-insensitive substring.
    Search(SearchArgs),
    /// Delete every contact whose field equals the value exactly.
    Delete(DeleteArgs),
    /// Show the database location and contact count.
    Status,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Contact name.
    name: String,
    /// Phone number; must not already be stored.
    phone: String,
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// File with one `name,phone` record per line.
    path: PathBuf,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Field to update (first_name or phone_number).
    field: String,
    /// Current value to match exactly.
    old: String,
    /// Replacement value.
    new: String,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Field to filter on (first_name or phone_number).
    #[arg(long, requires = "value")]
    field: Option<String>,
    /// Substring to look for in the field.
    #[arg(long, requires = "field")]
    value: Option<String>,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Field to match (first_name or phone_number).
    field: String,
    /// Value to match exactly.
    value: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(cli.config.as_ref(), cli.db)?;
    let store = ContactStore::new(config.database);

    store
        .ensure_schema()
        .map_err(|e| format!("Failed to prepare database '{}': {e}", store.config().path.display()))?;

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => run_menu(&store),
        Command::Init => {
            println!(
                "Phonebook table ready in '{}'.",
                store.config().path.display()
            );
            Ok(())
        }
        Command::Add(args) => run_add(&store, args),
        Command::Import(args) => run_import(&store, args),
        Command::Update(args) => run_update(&store, args),
        Command::Search(args) => run_search(&store, args),
        Command::Delete(args) => run_delete(&store, args),
        Command::Status => run_status(&store),
    }
}

/// Loads configuration once and applies command-line overrides.
///
/// An explicit `--config` must exist; the default file is optional.
fn load_config(path: Option<&PathBuf>, db: Option<PathBuf>) -> Result<PhonebookConfig, String> {
    let mut config = match path {
        Some(path) => PhonebookConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?,
        None => PhonebookConfig::load_or_default(DEFAULT_CONFIG_PATH)
            .map_err(|e| format!("Failed to load config '{DEFAULT_CONFIG_PATH}': {e}"))?,
    };
    if let Some(db) = db {
        config.database.path = db;
    }
    Ok(config)
}

fn run_menu(store: &ContactStore) -> Result<(), String> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(store, stdin.lock(), stdout.lock())
        .run()
        .map_err(|e| format!("Terminal I/O failed: {e}"))
}

fn run_add(store: &ContactStore, args: AddArgs) -> Result<(), String> {
    let contact = store
        .add_contact(&args.name, &args.phone)
        .map_err(|e| e.to_string())?;
    println!("Contact added: {contact}");
    Ok(())
}

fn run_import(store: &ContactStore, args: ImportArgs) -> Result<(), String> {
    let report = store
        .import_file(&args.path)
        .map_err(|e| format!("Import from '{}' failed: {e}", args.path.display()))?;
    write_import_report(&mut io::stdout().lock(), &report).map_err(|e| e.to_string())
}

fn run_update(store: &ContactStore, args: UpdateArgs) -> Result<(), String> {
    let rows = store
        .update_field(&args.field, &args.old, &args.new)
        .map_err(|e| e.to_string())?;
    println!(
        "Updated {rows} contact(s): {} = {} → {}",
        args.field.trim(),
        args.old,
        args.new
    );
    Ok(())
}

fn run_search(store: &ContactStore, args: SearchArgs) -> Result<(), String> {
    let contacts = store
        .search(args.field.as_deref(), args.value.as_deref())
        .map_err(|e| e.to_string())?;
    write_contacts(&mut io::stdout().lock(), &contacts, args.format).map_err(|e| e.to_string())
}

fn run_delete(store: &ContactStore, args: DeleteArgs) -> Result<(), String> {
    let rows = store
        .delete_contact(&args.field, &args.value)
        .map_err(|e| e.to_string())?;
    println!(
        "Deleted {rows} contact(s) where {} = {}",
        args.field.trim(),
        args.value
    );
    Ok(())
}

fn run_status(store: &ContactStore) -> Result<(), String> {
    let count = store.count().map_err(|e| e.to_string())?;
    println!("Phonebook Status:");
    println!("  Database: {}", store.config().path.display());
    println!("  Contacts: {count}");
    Ok(())
}
