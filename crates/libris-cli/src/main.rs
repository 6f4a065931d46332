//! Libris CLI
//!
//! Command-line editor surface for the Libris catalog. Validates input,
//! asks for confirmation before deletes, and reports outcomes; the store
//! itself does none of that.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use libris_core::{Book, CatalogStore, Config, Reader};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "libris")]
#[command(about = "Libris - local library catalog of books and readers")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON (scripting mode: confirmation prompts are skipped)
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output, confirmation prompts are skipped
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage books
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
    /// Manage readers
    Reader {
        #[command(subcommand)]
        command: ReaderCommands,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum BookCommands {
    /// Add a book to the catalog
    #[command(alias = "create")]
    Add {
        /// Title
        title: String,
        /// Author
        author: String,
        /// Year of publication
        year: i32,
        /// Genre
        genre: String,
        /// ISBN (10 or 13 digits, separators allowed)
        isbn: String,
    },
    /// List books
    #[command(alias = "ls")]
    List {
        /// Sort by column (title, author, year, genre, isbn)
        #[arg(short, long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Replace a book's fields (full record, not a partial edit)
    Update {
        /// Book id
        id: u32,
        /// Title
        title: String,
        /// Author
        author: String,
        /// Year of publication
        year: i32,
        /// Genre
        genre: String,
        /// ISBN (10 or 13 digits, separators allowed)
        isbn: String,
    },
    /// Delete a book
    #[command(alias = "rm")]
    Delete {
        /// Book id
        id: u32,
    },
}

#[derive(Subcommand)]
enum ReaderCommands {
    /// Register a reader
    #[command(alias = "create")]
    Add {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// Email address
        email: String,
        /// Phone number
        phone: String,
        /// Registration date (YYYY-MM-DD)
        registration_date: NaiveDate,
    },
    /// List readers
    #[command(alias = "ls")]
    List {
        /// Sort by column (firstName, lastName, email, phone, registrationDate)
        #[arg(short, long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Replace a reader's fields (full record, not a partial edit)
    Update {
        /// Reader id
        id: u32,
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// Email address
        email: String,
        /// Phone number
        phone: String,
        /// Registration date (YYYY-MM-DD)
        registration_date: NaiveDate,
    },
    /// Delete a reader
    #[command(alias = "rm")]
    Delete {
        /// Reader id
        id: u32,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    match cli.command {
        Commands::Config { command } => handle_config_command(command, &output),
        Commands::Book { command } => {
            let config = Config::load()?;
            debug!("opening book store in {:?}", config.data_dir);
            let mut store: CatalogStore<Book> = CatalogStore::open(&config);
            handle_book_command(command, &mut store, &output)
        }
        Commands::Reader { command } => {
            let config = Config::load()?;
            debug!("opening reader store in {:?}", config.data_dir);
            let mut store: CatalogStore<Reader> = CatalogStore::open(&config);
            handle_reader_command(command, &mut store, &output)
        }
    }
}

fn handle_book_command(
    command: BookCommands,
    store: &mut CatalogStore<Book>,
    output: &Output,
) -> Result<()> {
    match command {
        BookCommands::Add {
            title,
            author,
            year,
            genre,
            isbn,
        } => commands::book::add(store, Book::new(title, author, year, genre, isbn), output),
        BookCommands::List { sort, desc } => commands::book::list(store, sort, desc, output),
        BookCommands::Update {
            id,
            title,
            author,
            year,
            genre,
            isbn,
        } => commands::book::update(store, id, Book::new(title, author, year, genre, isbn), output),
        BookCommands::Delete { id } => commands::book::delete(store, id, output),
    }
}

fn handle_reader_command(
    command: ReaderCommands,
    store: &mut CatalogStore<Reader>,
    output: &Output,
) -> Result<()> {
    match command {
        ReaderCommands::Add {
            first_name,
            last_name,
            email,
            phone,
            registration_date,
        } => commands::reader::add(
            store,
            Reader::new(first_name, last_name, email, phone, registration_date),
            output,
        ),
        ReaderCommands::List { sort, desc } => commands::reader::list(store, sort, desc, output),
        ReaderCommands::Update {
            id,
            first_name,
            last_name,
            email,
            phone,
            registration_date,
        } => commands::reader::update(
            store,
            id,
            Reader::new(first_name, last_name, email, phone, registration_date),
            output,
        ),
        ReaderCommands::Delete { id } => commands::reader::delete(store, id, output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("libris_core=warn,libris=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
