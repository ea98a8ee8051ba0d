//! Read-only, password and load handling when the exchange opens a library.

use oomax::error::ExchangeError;
use oomax::memory::{LibraryFlags, MemoryOffice, RemoteCall, Scope};
use oomax::resolver::DocumentName;

use crate::integration::test_utils::exchange;

fn office_with_library(flags: LibraryFlags) -> (MemoryOffice, Scope) {
    let office = MemoryOffice::new();
    let doc = office.open_document("Untitled 1");
    let scope = Scope::Document(doc);
    office.add_library(scope, "Locked", flags);
    office.set_module(scope, "Locked", "Module1", "rem kept");
    (office, scope)
}

fn untitled() -> DocumentName {
    DocumentName::parse("Untitled 1")
}

#[test]
fn test_push_to_read_only_library_fails_before_password_check() {
    let (office, scope) = office_with_library(LibraryFlags {
        read_only: true,
        password_protected: true,
        ..LibraryFlags::default()
    });
    office.clear_journal();

    match exchange(&office).push(&untitled(), "Locked", "Module1", ["rem new"], false) {
        Err(ExchangeError::ReadOnly(name)) => assert_eq!(name, "Locked"),
        other => panic!("expected ReadOnly, got {:?}", other.err()),
    }
    let journal = office.journal();
    assert!(!journal
        .iter()
        .any(|c| matches!(c, RemoteCall::IsPasswordProtected { .. })));
    assert_eq!(
        office.module(scope, "Locked", "Module1").as_deref(),
        Some("rem kept")
    );
}

#[test]
fn test_pull_from_read_only_library_succeeds() {
    let (office, _) = office_with_library(LibraryFlags {
        read_only: true,
        ..LibraryFlags::default()
    });
    let source = exchange(&office)
        .pull(&untitled(), "Locked", "Module1")
        .unwrap();
    assert_eq!(source.text(), "rem kept");
}

#[test]
fn test_unverified_password_blocks_pull() {
    let (office, _) = office_with_library(LibraryFlags {
        password_protected: true,
        ..LibraryFlags::default()
    });
    assert!(matches!(
        exchange(&office).pull(&untitled(), "Locked", "Module1"),
        Err(ExchangeError::PasswordProtected(ref name)) if name == "Locked"
    ));
}

#[test]
fn test_verified_password_allows_push() {
    let (office, scope) = office_with_library(LibraryFlags {
        password_protected: true,
        password_verified: true,
        ..LibraryFlags::default()
    });
    exchange(&office)
        .push(&untitled(), "Locked", "Module1", ["rem new"], false)
        .unwrap();
    assert_eq!(
        office.module(scope, "Locked", "Module1").as_deref(),
        Some("rem new")
    );
}

#[test]
fn test_unloaded_library_is_loaded_before_access() {
    let (office, scope) = office_with_library(LibraryFlags {
        loaded: false,
        ..LibraryFlags::default()
    });
    office.clear_journal();

    let source = exchange(&office)
        .pull(&untitled(), "Locked", "Module1")
        .unwrap();
    assert_eq!(source.text(), "rem kept");
    assert!(office.journal().contains(&RemoteCall::LoadLibrary {
        scope,
        library: "Locked".to_string(),
    }));
}
