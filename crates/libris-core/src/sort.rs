//! Column sorting
//!
//! One shared, pure sort used by both record kinds: given a collection, a
//! key name, and a direction, produce a new ordered sequence without
//! mutating the input. Unknown key names leave the order untouched. Key
//! names use the serialized spelling (`firstName`, `registrationDate`)
//! since that is what the editor surface's column headers carry.

use std::cmp::Ordering;

use crate::models::{Book, Reader};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Per-kind three-way comparison on a named field
pub trait SortKey {
    /// Compare `self` to `other` on the named key, `None` when the key is
    /// not a sortable field of this kind
    fn compare_by(&self, other: &Self, key: &str) -> Option<Ordering>;
}

/// Return a copy of `items` ordered by the named key
///
/// Descending reverses the comparison. An unrecognized key returns the
/// input order unchanged.
pub fn sorted_by<T: SortKey + Clone>(items: &[T], key: &str, direction: SortDirection) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = a.compare_by(b, key).unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

impl SortKey for Book {
    fn compare_by(&self, other: &Self, key: &str) -> Option<Ordering> {
        match key {
            "title" => Some(self.title.cmp(&other.title)),
            "author" => Some(self.author.cmp(&other.author)),
            "year" => Some(self.year.cmp(&other.year)),
            "genre" => Some(self.genre.cmp(&other.genre)),
            "isbn" => Some(self.isbn.cmp(&other.isbn)),
            _ => None,
        }
    }
}

impl SortKey for Reader {
    fn compare_by(&self, other: &Self, key: &str) -> Option<Ordering> {
        match key {
            "firstName" => Some(self.first_name.cmp(&other.first_name)),
            "lastName" => Some(self.last_name.cmp(&other.last_name)),
            "email" => Some(self.email.cmp(&other.email)),
            "phone" => Some(self.phone.cmp(&other.phone)),
            "registrationDate" => Some(self.registration_date.cmp(&other.registration_date)),
            _ => None,
        }
    }
}
