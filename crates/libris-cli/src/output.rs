//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use libris_core::{Book, Reader};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single book
    pub fn print_book(&self, book: &Book) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", format_id(book.id));
                println!("Title:     {}", book.title);
                println!("Author:    {}", book.author);
                println!("Year:      {}", book.year);
                println!("Genre:     {}", book.genre);
                println!("ISBN:      {}", book.isbn);
                println!("Available: {}", yes_no(book.available));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(book).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", format_id(book.id));
            }
        }
    }

    /// Print a list of books
    pub fn print_books(&self, books: &[Book]) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No books found.");
                    return;
                }
                for book in books {
                    println!(
                        "{:>4} | {} | {} | {} | {} | {}",
                        format_id(book.id),
                        truncate(&book.title, 30),
                        truncate(&book.author, 20),
                        book.year,
                        truncate(&book.genre, 12),
                        yes_no(book.available)
                    );
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(books).unwrap());
            }
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", format_id(book.id));
                }
            }
        }
    }

    /// Print a single reader
    pub fn print_reader(&self, reader: &Reader) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:         {}", format_id(reader.id));
                println!("Name:       {} {}", reader.first_name, reader.last_name);
                println!("Email:      {}", reader.email);
                println!("Phone:      {}", reader.phone);
                println!("Registered: {}", reader.registration_date.format("%Y-%m-%d"));
                println!("Active:     {}", yes_no(reader.active));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(reader).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", format_id(reader.id));
            }
        }
    }

    /// Print a list of readers
    pub fn print_readers(&self, readers: &[Reader]) {
        match self.format {
            OutputFormat::Human => {
                if readers.is_empty() {
                    println!("No readers found.");
                    return;
                }
                for reader in readers {
                    let name = format!("{} {}", reader.first_name, reader.last_name);
                    println!(
                        "{:>4} | {} | {} | {} | {}",
                        format_id(reader.id),
                        truncate(&name, 30),
                        truncate(&reader.email, 30),
                        reader.registration_date.format("%Y-%m-%d"),
                        yes_no(reader.active)
                    );
                }
                println!("\n{} reader(s)", readers.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(readers).unwrap());
            }
            OutputFormat::Quiet => {
                for reader in readers {
                    println!("{}", format_id(reader.id));
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    ///
    /// Json and Quiet are scripting modes: prompting there would either
    /// corrupt the machine-readable output or hang a pipeline, so
    /// confirmation is a Human-mode behavior only.
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }
}

fn format_id(id: Option<u32>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "-".to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
