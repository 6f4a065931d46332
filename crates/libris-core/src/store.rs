//! Catalog collection store
//!
//! `CatalogStore<T>` is the single source of truth for one record kind's
//! collection. Every mutation runs the same tail: recompute the in-memory
//! sequence, mirror it to the kind's persisted slot, then publish the full
//! collection on the broadcast stream. Subscribers therefore always see
//! the state the slot holds.
//!
//! The store never fails once constructed: persistence is best-effort, a
//! malformed snapshot at open degrades to an empty collection, and
//! mutations referencing unknown ids are silent no-ops that still publish.
//!
//! ## Usage
//!
//! ```ignore
//! let mut books: CatalogStore<Book> = CatalogStore::open(&config);
//!
//! books.subscribe(|collection| render(collection));
//! let id = books.add(Book::new("Dune", "Herbert", 1965, "SF", "1234567890"));
//! books.delete(id);
//! ```

use tracing::warn;

use crate::config::Config;
use crate::models::Record;
use crate::storage::SlotStorage;
use crate::stream::{Broadcast, SubscriberId};

/// Persist-and-publish collection store, one instance per record kind
pub struct CatalogStore<T: Record> {
    /// The authoritative ordered collection
    items: Vec<T>,
    /// Broadcast of the current full collection, replay-latest
    stream: Broadcast<Vec<T>>,
    /// Storage backend, `None` when the medium is unavailable
    storage: Option<SlotStorage>,
}

impl<T: Record> CatalogStore<T> {
    /// Open the store over the configured data directory
    ///
    /// Probes the storage backend once. An existing snapshot is loaded
    /// into memory and published; a missing backend, missing slot, or
    /// malformed snapshot all start empty, and nothing is published until
    /// the first mutation.
    pub fn open(config: &Config) -> Self {
        Self::with_storage(SlotStorage::open(&config.data_dir))
    }

    /// Open a store with no persistence backend
    ///
    /// Mutations behave identically but nothing is written anywhere.
    pub fn in_memory() -> Self {
        Self::with_storage(None)
    }

    fn with_storage(storage: Option<SlotStorage>) -> Self {
        let mut store = Self {
            items: Vec::new(),
            stream: Broadcast::new(),
            storage,
        };
        store.load_snapshot();
        store
    }

    /// Load the persisted snapshot, if the backend holds a readable one
    fn load_snapshot(&mut self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let Some(snapshot) = storage.read(T::SLOT) else {
            return;
        };
        match serde_json::from_str::<Vec<T>>(&snapshot) {
            Ok(items) => {
                self.items = items;
                self.stream.publish(self.items.clone());
            }
            Err(e) => {
                // A malformed snapshot is treated as absent
                warn!("discarding malformed '{}' snapshot: {}", T::SLOT, e);
            }
        }
    }

    /// Register a subscriber on the collection stream
    ///
    /// The callback receives the current collection immediately when one
    /// has been published, then every collection after each mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&[T]) + 'static) -> SubscriberId {
        let mut callback = callback;
        self.stream.subscribe(move |items: &Vec<T>| callback(items))
    }

    /// Remove a subscriber
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.stream.unsubscribe(id);
    }

    /// The current collection
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Add a record, assigning the next identifier
    ///
    /// The id is `max(existing ids) + 1`, recomputed per call, so deleting
    /// the highest-id record frees that id for the next add. The derived
    /// active flag is forced on regardless of the candidate's value.
    /// Returns the assigned id. Callers are expected to have validated the
    /// record already; the store does not.
    pub fn add(&mut self, candidate: T) -> u32 {
        let id = self.next_id();
        let mut record = candidate;
        record.assign_id(id);
        record.mark_active();
        self.items.push(record);
        self.sync();
        id
    }

    /// Replace the record whose id matches, verbatim
    ///
    /// Full overwrite, never a field merge. When no record matches, the
    /// collection is left unchanged but the slot is rewritten and the
    /// stream still publishes.
    pub fn update(&mut self, record: T) {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id() == record.id()) {
            *existing = record;
        }
        self.sync();
    }

    /// Remove every record with the given id
    ///
    /// Persists and publishes unconditionally, even when nothing matched;
    /// calling it twice is idempotent on the collection contents.
    pub fn delete(&mut self, id: u32) {
        self.items.retain(|item| item.id() != Some(id));
        self.sync();
    }

    fn next_id(&self) -> u32 {
        self.items.iter().filter_map(|item| item.id()).max().unwrap_or(0) + 1
    }

    /// Mirror the collection to its slot, then publish it
    fn sync(&mut self) {
        if let Some(storage) = &self.storage {
            match serde_json::to_string(&self.items) {
                Ok(json) => storage.write(T::SLOT, &json),
                Err(e) => warn!("failed to serialize '{}' collection: {}", T::SLOT, e),
            }
        }
        self.stream.publish(self.items.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, Reader};
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
        }
    }

    fn book(title: &str) -> Book {
        Book::new(title, "Author", 2000, "Fiction", "1234567890")
    }

    fn reader(first_name: &str) -> Reader {
        Reader::new(
            first_name,
            "Reader",
            "reader@example.com",
            "5550102030",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    /// Collects every emission from a store's stream
    fn record_emissions(store: &mut CatalogStore<Book>) -> Rc<RefCell<Vec<Vec<Book>>>> {
        let emissions = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&emissions);
        store.subscribe(move |items| sink.borrow_mut().push(items.to_vec()));
        emissions
    }

    #[test]
    fn test_ids_increment_from_one() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();

        assert_eq!(store.add(book("First")), 1);
        assert_eq!(store.add(book("Second")), 2);
        assert_eq!(store.add(book("Third")), 3);
    }

    #[test]
    fn test_add_forces_available_flag() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();

        let mut candidate = book("Dune");
        candidate.available = false;
        store.add(candidate);

        assert!(store.items()[0].available);
    }

    #[test]
    fn test_add_ignores_caller_supplied_id() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();

        let mut candidate = book("Dune");
        candidate.id = Some(42);
        let id = store.add(candidate);

        // ids come from the existing collection only; the caller's value
        // is overwritten
        assert_eq!(id, 1);
        assert_eq!(store.items()[0].id, Some(1));
    }

    #[test]
    fn test_id_not_reused_after_deleting_lower_id() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();

        store.add(book("Dune"));
        store.add(book("Foo"));
        store.delete(1);

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id, Some(2));
        assert_eq!(store.add(book("Bar")), 3);
    }

    #[test]
    fn test_reuses_id_after_deleting_max() {
        // The id scheme is max+1 recomputed per call, not a persisted
        // counter, so deleting the highest id frees it. Pinned here so a
        // future "fix" shows up as a test change.
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();

        store.add(book("Dune"));
        store.add(book("Foo"));
        store.delete(2);

        assert_eq!(store.add(book("Bar")), 2);
    }

    #[test]
    fn test_update_replaces_matching_record() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();
        let id = store.add(book("Dune"));

        let mut updated = book("Dune Messiah");
        updated.id = Some(id);
        updated.year = 1969;
        store.update(updated.clone());

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0], updated);
    }

    #[test]
    fn test_update_unknown_id_is_noop_but_publishes() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();
        store.add(book("Dune"));

        let emissions = record_emissions(&mut store);
        let before = store.items().to_vec();

        let mut phantom = book("Ghost");
        phantom.id = Some(99);
        store.update(phantom);

        assert_eq!(store.items(), before.as_slice());
        // replay + publish from the no-op update
        assert_eq!(emissions.borrow().len(), 2);
        assert_eq!(emissions.borrow()[1], before);
    }

    #[test]
    fn test_delete_is_idempotent_but_always_publishes() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();
        let id = store.add(book("Dune"));

        let emissions = record_emissions(&mut store);
        store.delete(id);
        store.delete(id);

        assert!(store.items().is_empty());
        // replay + two publishes, the second from the no-op delete
        assert_eq!(emissions.borrow().len(), 3);
        assert!(emissions.borrow()[2].is_empty());
    }

    #[test]
    fn test_subscribe_replays_current_collection() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();
        store.add(book("Dune"));

        let emissions = record_emissions(&mut store);
        assert_eq!(emissions.borrow().len(), 1);
        assert_eq!(emissions.borrow()[0][0].title, "Dune");
    }

    #[test]
    fn test_no_emission_before_first_mutation() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();
        let emissions = record_emissions(&mut store);
        assert!(emissions.borrow().is_empty());
    }

    #[test]
    fn test_mutation_notifies_subscriber_synchronously() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();
        let emissions = record_emissions(&mut store);

        store.add(book("Dune"));
        assert_eq!(emissions.borrow().len(), 1);

        store.add(book("Foo"));
        assert_eq!(emissions.borrow().len(), 2);
        assert_eq!(emissions.borrow()[1].len(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();
        let emissions = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&emissions);
        let id = store.subscribe(move |items: &[Book]| sink.borrow_mut().push(items.to_vec()));

        store.add(book("Dune"));
        store.unsubscribe(id);
        store.add(book("Foo"));

        assert_eq!(emissions.borrow().len(), 1);
    }

    #[test]
    fn test_dune_scenario() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();

        let id = store.add(Book::new("Dune", "Herbert", 1965, "SF", "1234567890"));
        assert_eq!(id, 1);

        let emissions = record_emissions(&mut store);
        {
            let replayed = &emissions.borrow()[0];
            assert_eq!(replayed.len(), 1);
            assert_eq!(replayed[0].id, Some(1));
            assert!(replayed[0].available);
        }

        assert_eq!(store.add(book("Foo")), 2);
        store.delete(1);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id, Some(2));

        // max(0, 2) + 1, not a reuse of the freed 1
        assert_eq!(store.add(book("Bar")), 3);
    }

    #[test]
    fn test_persists_and_reloads_books() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let mut store: CatalogStore<Book> = CatalogStore::open(&config);
            store.add(book("Dune"));
            store.add(book("Foo"));
            store.delete(1);
        }

        let reopened: CatalogStore<Book> = CatalogStore::open(&config);
        assert_eq!(reopened.items().len(), 1);
        assert_eq!(reopened.items()[0].id, Some(2));
        assert_eq!(reopened.items()[0].title, "Foo");
    }

    #[test]
    fn test_reload_reconstitutes_reader_dates() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let date = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();

        {
            let mut store: CatalogStore<Reader> = CatalogStore::open(&config);
            let mut candidate = reader("Ada");
            candidate.registration_date = date;
            store.add(candidate);
        }

        let reopened: CatalogStore<Reader> = CatalogStore::open(&config);
        assert_eq!(reopened.items()[0].registration_date, date);
    }

    #[test]
    fn test_open_publishes_loaded_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let mut store: CatalogStore<Book> = CatalogStore::open(&config);
            store.add(book("Dune"));
        }

        let mut reopened: CatalogStore<Book> = CatalogStore::open(&config);
        let emissions = record_emissions(&mut reopened);
        // the loaded snapshot was published at open, so subscribe replays it
        assert_eq!(emissions.borrow().len(), 1);
        assert_eq!(emissions.borrow()[0][0].title, "Dune");
    }

    #[test]
    fn test_malformed_snapshot_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        std::fs::write(temp_dir.path().join("books.json"), "{not json").unwrap();

        let mut store: CatalogStore<Book> = CatalogStore::open(&config);
        assert!(store.items().is_empty());

        // treated as absent: nothing published until the first mutation
        let emissions = record_emissions(&mut store);
        assert!(emissions.borrow().is_empty());

        // and the store still works
        assert_eq!(store.add(book("Dune")), 1);
    }

    #[test]
    fn test_slot_mirrors_collection_after_each_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let slot = temp_dir.path().join("books.json");

        let mut store: CatalogStore<Book> = CatalogStore::open(&config);
        store.add(book("Dune"));

        let on_disk: Vec<Book> =
            serde_json::from_str(&std::fs::read_to_string(&slot).unwrap()).unwrap();
        assert_eq!(on_disk, store.items());

        store.delete(1);
        let on_disk: Vec<Book> =
            serde_json::from_str(&std::fs::read_to_string(&slot).unwrap()).unwrap();
        assert!(on_disk.is_empty());
    }

    #[test]
    fn test_book_and_reader_stores_do_not_collide() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let mut books: CatalogStore<Book> = CatalogStore::open(&config);
        let mut readers: CatalogStore<Reader> = CatalogStore::open(&config);
        books.add(book("Dune"));
        readers.add(reader("Ada"));

        assert!(temp_dir.path().join("books.json").exists());
        assert!(temp_dir.path().join("readers.json").exists());

        let books_again: CatalogStore<Book> = CatalogStore::open(&config);
        assert_eq!(books_again.items().len(), 1);
    }

    #[test]
    fn test_in_memory_store_writes_nothing() {
        let mut store: CatalogStore<Book> = CatalogStore::in_memory();
        store.add(book("Dune"));
        assert_eq!(store.items().len(), 1);
        assert!(!PathBuf::from("books.json").exists());
    }
}
