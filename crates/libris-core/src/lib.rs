//! Libris Core Library
//!
//! This crate provides the core functionality for Libris, a local library
//! catalog of books and readers.
//!
//! # Architecture
//!
//! Each record kind gets one [`CatalogStore`]: the authoritative in-memory
//! collection, mirrored to a persisted JSON slot after every mutation and
//! announced on a replay-latest broadcast stream. The store never fails
//! once constructed; validation belongs to the editor surface and lives in
//! [`validate`].
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut books: CatalogStore<Book> = CatalogStore::open(&config);
//!
//! let book = Book::new("Dune", "Herbert", 1965, "SF", "1234567890");
//! validate::validate_book(&book)?;
//! books.add(book);
//! ```
//!
//! # Modules
//!
//! - `store`: persist-and-publish collection store (main entry point)
//! - `models`: Book and Reader data structures and the `Record` seam
//! - `stream`: replay-latest broadcast primitive
//! - `storage`: best-effort file-per-slot persistence
//! - `sort`: shared column sort
//! - `validate`: editor-surface field rules
//! - `config`: application configuration

pub mod config;
pub mod models;
pub mod sort;
pub mod storage;
pub mod store;
pub mod stream;
pub mod validate;

pub use config::Config;
pub use models::{Book, Reader, Record};
pub use sort::{sorted_by, SortDirection, SortKey};
pub use storage::SlotStorage;
pub use store::CatalogStore;
pub use stream::{Broadcast, SubscriberId};
pub use validate::{validate_book, validate_reader, ValidationError};
