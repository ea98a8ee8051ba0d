//! Document resolution as seen through the exchange operations.

use oomax::error::ExchangeError;
use oomax::memory::{MemoryOffice, RemoteCall, Scope};
use oomax::resolver::DocumentName;

use crate::integration::test_utils::exchange;

#[test]
fn test_application_push_never_enumerates_frames() {
    let office = MemoryOffice::new();
    office.open_document("Untitled 1");
    office.open_document("Untitled 2");
    office.clear_journal();

    exchange(&office)
        .push(&DocumentName::Application, "Standard", "Module1", ["x"], false)
        .unwrap();
    let journal = office.journal();
    assert!(!journal.contains(&RemoteCall::GetFrames));
    assert!(!journal
        .iter()
        .any(|c| matches!(c, RemoteCall::FrameByIndex(_) | RemoteCall::FrameCount)));
}

#[test]
fn test_duplicate_titles_resolve_to_first_frame() {
    let office = MemoryOffice::new();
    let first = office.open_document("Report");
    let second = office.open_document("Report");

    exchange(&office)
        .push(&DocumentName::parse("Report"), "Standard", "Module1", ["x"], false)
        .unwrap();
    assert!(office.module(Scope::Document(first), "Standard", "Module1").is_some());
    assert!(office.library_names(Scope::Document(second)).is_empty());
}

#[test]
fn test_unknown_title_is_document_not_found() {
    let office = MemoryOffice::new();
    office.open_document("Untitled 1");
    office.add_empty_frame();

    let ex = exchange(&office);
    let missing = DocumentName::parse("Untitled 9");
    assert!(matches!(
        ex.pull(&missing, "Standard", "Module1"),
        Err(ExchangeError::DocumentNotFound(ref t)) if t == "Untitled 9"
    ));
    assert!(matches!(
        ex.push(&missing, "Standard", "Module1", ["x"], false),
        Err(ExchangeError::DocumentNotFound(_))
    ));
    assert!(matches!(
        ex.invoke(&missing, "Standard.Module1.main"),
        Err(ExchangeError::DocumentNotFound(_))
    ));
}

#[test]
fn test_resolution_sees_documents_opened_between_calls() {
    let office = MemoryOffice::new();
    let ex = exchange(&office);
    let name = DocumentName::parse("Late.odt");
    assert!(ex.pull(&name, "Standard", "Module1").is_err());

    let doc = office.open_document("Late.odt");
    office.set_module(Scope::Document(doc), "Standard", "Module1", "rem late");
    assert_eq!(
        ex.pull(&name, "Standard", "Module1").unwrap().text(),
        "rem late"
    );
}
