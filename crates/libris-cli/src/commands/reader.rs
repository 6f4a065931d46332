//! Reader command handlers

use anyhow::{bail, Result};

use libris_core::{sorted_by, validate_reader, CatalogStore, Reader, SortDirection};

use crate::output::Output;
use crate::prompt::confirm;

/// Register a reader after validating them
pub fn add(store: &mut CatalogStore<Reader>, reader: Reader, output: &Output) -> Result<()> {
    if let Err(e) = validate_reader(&reader) {
        bail!("Invalid reader: {}", e);
    }

    let id = store.add(reader);

    output.success(&format!("Added reader {}", id));
    if let Some(added) = store.items().iter().find(|r| r.id == Some(id)) {
        output.print_reader(added);
    }

    Ok(())
}

/// List readers, optionally sorted by a column
pub fn list(
    store: &CatalogStore<Reader>,
    sort: Option<String>,
    desc: bool,
    output: &Output,
) -> Result<()> {
    let readers = match sort {
        Some(ref key) => sorted_by(store.items(), key, direction(desc)),
        None => store.items().to_vec(),
    };

    output.print_readers(&readers);
    Ok(())
}

/// Replace a reader's fields with a full new record
///
/// The active flag is not form-editable; the current record's value is
/// carried over.
pub fn update(
    store: &mut CatalogStore<Reader>,
    id: u32,
    reader: Reader,
    output: &Output,
) -> Result<()> {
    let Some(current) = store.items().iter().find(|r| r.id == Some(id)) else {
        bail!("Reader not found: {}", id);
    };
    if let Err(e) = validate_reader(&reader) {
        bail!("Invalid reader: {}", e);
    }

    let mut record = reader;
    record.id = Some(id);
    record.active = current.active;
    store.update(record.clone());

    output.success("Reader updated");
    output.print_reader(&record);

    Ok(())
}

/// Delete a reader, asking for confirmation on a TTY
pub fn delete(store: &mut CatalogStore<Reader>, id: u32, output: &Output) -> Result<()> {
    let reader = store
        .items()
        .iter()
        .find(|r| r.id == Some(id))
        .ok_or_else(|| anyhow::anyhow!("Reader not found: {}", id))?;

    if output.should_prompt() {
        println!(
            "Delete reader: {} - {} {}",
            id, reader.first_name, reader.last_name
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete(id);
    output.success(&format!("Deleted reader {}", id));

    Ok(())
}

fn direction(desc: bool) -> SortDirection {
    if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    }
}
