//! Data models for Libris
//!
//! Defines the two catalog record kinds, Book and Reader, plus the
//! `Record` trait that lets one generic `CatalogStore` manage both.
//!
//! Field names serialize in camelCase so the persisted slots keep the
//! catalog's established JSON layout (`firstName`, `registrationDate`).

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A record kind that can live in a [`CatalogStore`](crate::CatalogStore)
///
/// The store assigns identifiers and forces the derived availability flag;
/// everything else on the record is caller-supplied data.
pub trait Record: Clone + Serialize + DeserializeOwned + 'static {
    /// Name of the persisted slot holding this kind's collection
    const SLOT: &'static str;

    /// Store-assigned identifier, `None` until the record is added
    fn id(&self) -> Option<u32>;

    /// Set the store-issued identifier
    fn assign_id(&mut self, id: u32);

    /// Force the derived flag (`available` / `active`) on
    fn mark_active(&mut self);
}

/// A book in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier, assigned by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Year of publication
    pub year: i32,
    /// Genre
    pub genre: String,
    /// ISBN, 10 or 13 digits with optional separators
    pub isbn: String,
    /// Whether the book is available for lending
    #[serde(default = "default_flag")]
    pub available: bool,
}

impl Book {
    /// Create a new, not-yet-stored book
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            isbn: isbn.into(),
            available: true,
        }
    }
}

impl Record for Book {
    const SLOT: &'static str = "books";

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn assign_id(&mut self, id: u32) {
        self.id = Some(id);
    }

    fn mark_active(&mut self) {
        self.available = true;
    }
}

/// A registered reader
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reader {
    /// Unique identifier, assigned by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Date the reader registered, stored as an ISO `YYYY-MM-DD` string
    pub registration_date: NaiveDate,
    /// Whether the reader's membership is active
    #[serde(default = "default_flag")]
    pub active: bool,
}

impl Reader {
    /// Create a new, not-yet-stored reader
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        registration_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
            registration_date,
            active: true,
        }
    }
}

impl Record for Reader {
    const SLOT: &'static str = "readers";

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn assign_id(&mut self, id: u32) {
        self.id = Some(id);
    }

    fn mark_active(&mut self) {
        self.active = true;
    }
}

fn default_flag() -> bool {
    true
}
