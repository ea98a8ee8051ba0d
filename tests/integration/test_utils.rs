//! Shared test utilities for integration tests

use oomax::exchange::Exchange;
use oomax::memory::{DocumentId, LibraryFlags, MemoryOffice, Scope};
use std::sync::Mutex;

/// Serializes tests that touch process environment variables.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Exchange over a clone of `office`; both see the same state.
pub fn exchange(office: &MemoryOffice) -> Exchange {
    Exchange::new(Box::new(office.clone()))
}

/// An office with one open document carrying an empty, writable `Standard` library.
pub fn office_with_document(title: &str) -> (MemoryOffice, DocumentId) {
    let office = MemoryOffice::new();
    let doc = office.open_document(title);
    office.add_library(Scope::Document(doc), "Standard", LibraryFlags::default());
    (office, doc)
}
