//! Book command handlers

use anyhow::{bail, Result};

use libris_core::{sorted_by, validate_book, Book, CatalogStore, SortDirection};

use crate::output::Output;
use crate::prompt::confirm;

/// Add a book after validating it
pub fn add(store: &mut CatalogStore<Book>, book: Book, output: &Output) -> Result<()> {
    if let Err(e) = validate_book(&book) {
        bail!("Invalid book: {}", e);
    }

    let id = store.add(book);

    output.success(&format!("Added book {}", id));
    if let Some(added) = store.items().iter().find(|b| b.id == Some(id)) {
        output.print_book(added);
    }

    Ok(())
}

/// List books, optionally sorted by a column
pub fn list(
    store: &CatalogStore<Book>,
    sort: Option<String>,
    desc: bool,
    output: &Output,
) -> Result<()> {
    let books = match sort {
        Some(ref key) => sorted_by(store.items(), key, direction(desc)),
        None => store.items().to_vec(),
    };

    output.print_books(&books);
    Ok(())
}

/// Replace a book's fields with a full new record
///
/// The availability flag is not form-editable; the current record's value
/// is carried over.
pub fn update(store: &mut CatalogStore<Book>, id: u32, book: Book, output: &Output) -> Result<()> {
    let Some(current) = store.items().iter().find(|b| b.id == Some(id)) else {
        bail!("Book not found: {}", id);
    };
    if let Err(e) = validate_book(&book) {
        bail!("Invalid book: {}", e);
    }

    let mut record = book;
    record.id = Some(id);
    record.available = current.available;
    store.update(record.clone());

    output.success("Book updated");
    output.print_book(&record);

    Ok(())
}

/// Delete a book, asking for confirmation on a TTY
pub fn delete(store: &mut CatalogStore<Book>, id: u32, output: &Output) -> Result<()> {
    let book = store
        .items()
        .iter()
        .find(|b| b.id == Some(id))
        .ok_or_else(|| anyhow::anyhow!("Book not found: {}", id))?;

    if output.should_prompt() {
        println!("Delete book: {} - {}", id, book.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete(id);
    output.success(&format!("Deleted book {}", id));

    Ok(())
}

fn direction(desc: bool) -> SortDirection {
    if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn book(title: &str) -> Book {
        Book::new(title, "Author", 2000, "Fiction", "1234567890")
    }

    #[test]
    fn test_add_valid_book() {
        let mut store = CatalogStore::in_memory();
        add(&mut store, book("Dune"), &quiet()).unwrap();
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id, Some(1));
    }

    #[test]
    fn test_add_rejects_invalid_book() {
        let mut store = CatalogStore::in_memory();
        let result = add(&mut store, book("D"), &quiet());
        assert!(result.is_err());
        // the store was never called
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_update_missing_book_fails() {
        let mut store = CatalogStore::in_memory();
        let result = update(&mut store, 9, book("Dune"), &quiet());
        assert!(result.is_err());
    }

    #[test]
    fn test_update_overwrites_record() {
        let mut store = CatalogStore::in_memory();
        add(&mut store, book("Dune"), &quiet()).unwrap();

        update(&mut store, 1, book("Dune Messiah"), &quiet()).unwrap();

        assert_eq!(store.items()[0].title, "Dune Messiah");
        assert_eq!(store.items()[0].id, Some(1));
    }

    #[test]
    fn test_update_preserves_availability() {
        let mut store = CatalogStore::in_memory();
        add(&mut store, book("Dune"), &quiet()).unwrap();

        let mut checked_out = store.items()[0].clone();
        checked_out.available = false;
        store.update(checked_out);

        // the form path never edits the flag, even if the payload does
        let mut replacement = book("Dune");
        replacement.available = true;
        update(&mut store, 1, replacement, &quiet()).unwrap();
        assert!(!store.items()[0].available);
    }

    #[test]
    fn test_delete_missing_book_fails() {
        let mut store = CatalogStore::in_memory();
        assert!(delete(&mut store, 1, &quiet()).is_err());
    }

    #[test]
    fn test_delete_without_prompt_in_quiet_mode() {
        let mut store = CatalogStore::in_memory();
        add(&mut store, book("Dune"), &quiet()).unwrap();

        delete(&mut store, 1, &quiet()).unwrap();
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_list_sorted() {
        let mut store = CatalogStore::in_memory();
        add(&mut store, book("Solaris"), &quiet()).unwrap();
        add(&mut store, book("Dune"), &quiet()).unwrap();

        // sorting never touches the store's own order
        list(&store, Some("title".to_string()), false, &quiet()).unwrap();
        assert_eq!(store.items()[0].title, "Solaris");
    }
}
