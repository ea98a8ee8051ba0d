//! Push and pull through the exchange against an in-memory office.

use oomax::container::Upsert;
use oomax::error::ExchangeError;
use oomax::exchange::join_source;
use oomax::memory::{RemoteCall, Scope};
use oomax::resolver::DocumentName;
use proptest::prelude::*;

use crate::integration::test_utils::{exchange, office_with_document};

fn untitled() -> DocumentName {
    DocumentName::parse("Untitled 1")
}

#[test]
fn test_push_then_pull_greet_module() {
    let (office, _) = office_with_document("Untitled 1");
    let ex = exchange(&office);

    let pushed = ex
        .push(
            &untitled(),
            "Standard",
            "Greet",
            ["sub main", "msgbox \"hi\"", "end sub"],
            false,
        )
        .unwrap();
    assert_eq!(pushed.upsert, Upsert::Inserted);

    let lines: Vec<String> = ex
        .pull(&untitled(), "Standard", "Greet")
        .unwrap()
        .lines()
        .collect();
    assert_eq!(lines, vec!["sub main\n", "msgbox \"hi\"\n", "end sub\n"]);
}

#[test]
fn test_second_identical_push_is_a_replace_with_no_visible_change() {
    let (office, doc) = office_with_document("Untitled 1");
    let ex = exchange(&office);
    let source = ["sub main", "end sub"];

    ex.push(&untitled(), "Standard", "Module1", source, false)
        .unwrap();
    let names_before = office.module_names(Scope::Document(doc), "Standard");
    let text_before = office.module(Scope::Document(doc), "Standard", "Module1");

    let pushed = ex
        .push(&untitled(), "Standard", "Module1", source, false)
        .unwrap();
    assert_eq!(pushed.upsert, Upsert::Replaced);
    assert_eq!(office.module_names(Scope::Document(doc), "Standard"), names_before);
    assert_eq!(
        office.module(Scope::Document(doc), "Standard", "Module1"),
        text_before
    );
}

#[test]
fn test_push_into_new_library_creates_it_once_and_inserts() {
    let (office, doc) = office_with_document("Untitled 1");
    office.clear_journal();

    exchange(&office)
        .push(&untitled(), "Tools", "Strings", ["sub trim_all", "end sub"], false)
        .unwrap();

    let journal = office.journal();
    let creates = journal
        .iter()
        .filter(|c| matches!(c, RemoteCall::CreateLibrary { library, .. } if library == "Tools"))
        .count();
    assert_eq!(creates, 1);
    assert!(journal.contains(&RemoteCall::InsertModule {
        scope: Scope::Document(doc),
        library: "Tools".to_string(),
        module: "Strings".to_string(),
    }));
    assert!(!journal
        .iter()
        .any(|c| matches!(c, RemoteCall::ReplaceModule { .. })));
}

#[test]
fn test_pull_from_missing_library_fails_without_creating_it() {
    let (office, doc) = office_with_document("Untitled 1");
    match exchange(&office).pull(&untitled(), "Tools", "Strings") {
        Err(ExchangeError::ContainerNotFound(name)) => assert_eq!(name, "Tools"),
        other => panic!("expected ContainerNotFound, got {:?}", other.err()),
    }
    assert_eq!(office.library_names(Scope::Document(doc)), vec!["Standard"]);
}

#[test]
fn test_pull_missing_module_is_key_not_found() {
    let (office, _) = office_with_document("Untitled 1");
    assert!(matches!(
        exchange(&office).pull(&untitled(), "Standard", "Nope"),
        Err(ExchangeError::KeyNotFound(ref key)) if key == "Nope"
    ));
}

#[test]
fn test_push_to_document_marks_modified_without_save() {
    let (office, doc) = office_with_document("Untitled 1");
    exchange(&office)
        .push(&untitled(), "Standard", "Module1", ["x = 1"], false)
        .unwrap();
    assert!(office.is_modified(Scope::Document(doc)));
    assert!(office.is_document_modified(doc));
    assert!(office.journal().contains(&RemoteCall::SetDocumentModified {
        document: doc,
        modified: true,
    }));
    assert_eq!(office.store_count(doc), 0);
}

#[test]
fn test_push_to_document_with_save_stores_it() {
    let (office, doc) = office_with_document("Untitled 1");
    let pushed = exchange(&office)
        .push(&untitled(), "Standard", "Module1", ["x = 1"], true)
        .unwrap();
    assert!(pushed.saved);
    assert_eq!(office.store_count(doc), 1);
    assert!(!office.is_document_modified(doc));
}

#[test]
fn test_push_to_application_marks_active_document_modified() {
    let (office, doc) = office_with_document("Untitled 1");
    office.clear_journal();

    exchange(&office)
        .push(&DocumentName::Application, "Standard", "Shared", ["x"], false)
        .unwrap();
    assert!(office.is_modified(Scope::Application));
    assert!(office.is_document_modified(doc));
    assert!(office.journal().contains(&RemoteCall::SetDocumentModified {
        document: doc,
        modified: true,
    }));
    assert_eq!(
        office.module(Scope::Application, "Standard", "Shared").as_deref(),
        Some("x")
    );
}

#[test]
fn test_push_to_application_with_save_stores_libraries_and_active_document() {
    let (office, doc) = office_with_document("Untitled 1");
    exchange(&office)
        .push(&DocumentName::Application, "Standard", "Shared", ["y"], true)
        .unwrap();
    assert_eq!(office.application_store_count(), 1);
    assert!(!office.is_modified(Scope::Application));
    assert_eq!(office.store_count(doc), 1);
}

#[test]
fn test_push_to_application_without_active_document() {
    let office = oomax::memory::MemoryOffice::new();
    let pushed = exchange(&office)
        .push(&DocumentName::Application, "Standard", "Shared", ["x"], false)
        .unwrap();
    assert!(pushed.document.is_none());
    assert_eq!(pushed.upsert, Upsert::Inserted);
    assert!(office.is_modified(Scope::Application));
    assert!(!office
        .journal()
        .iter()
        .any(|c| matches!(c, RemoteCall::SetDocumentModified { .. })));
}

fn source_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 =\"()._']{0,24}"
}

proptest! {
    #[test]
    fn prop_pull_returns_pushed_lines(lines in proptest::collection::vec(source_line(), 1..12)) {
        let (office, _) = office_with_document("Untitled 1");
        let ex = exchange(&office);
        ex.push(&untitled(), "Standard", "Module1", &lines, false).unwrap();

        let source = ex.pull(&untitled(), "Standard", "Module1").unwrap();
        prop_assert_eq!(source.text(), join_source(&lines));
        let pulled: Vec<String> = source.lines().collect();
        let expected: Vec<String> = lines.iter().map(|l| format!("{}\n", l)).collect();
        prop_assert_eq!(pulled, expected);
    }
}
