//! Macro invocation through the script locator.

use oomax::container::Upsert;
use oomax::error::ExchangeError;
use oomax::macro_path::{script_uri, ModulePath, ScriptLocation};
use oomax::memory::{MemoryOffice, RemoteCall, Scope};
use oomax::resolver::DocumentName;
use serde_json::json;

use crate::integration::test_utils::exchange;

#[test]
fn test_two_segment_name_is_forwarded_unchanged() {
    let office = MemoryOffice::new();
    office.open_document("Untitled 1");
    let uri = "vnd.sun.star.script:Standard.Module1?language=Basic&location=document";
    office.register_script(uri, json!("done"));
    office.clear_journal();

    let result = exchange(&office)
        .invoke(&DocumentName::parse("Untitled 1"), "Standard.Module1")
        .unwrap();
    assert_eq!(result, json!("done"));
    assert!(office
        .journal()
        .contains(&RemoteCall::InvokeScript(uri.to_string())));
}

#[test]
fn test_application_invokes_in_application_space_on_active_document() {
    let office = MemoryOffice::new();
    office.open_document("Untitled 1");
    let uri = script_uri("Tools.Strings.main", ScriptLocation::Application);
    office.register_script(&uri, json!(null));

    let result = exchange(&office)
        .invoke(&DocumentName::Application, "Tools.Strings.main")
        .unwrap();
    assert!(result.is_null());
    assert!(uri.ends_with("location=application"));
}

#[test]
fn test_application_invoke_without_active_document() {
    let office = MemoryOffice::new();
    office.open_document("Untitled 1");
    office.set_active(None);
    assert!(matches!(
        exchange(&office).invoke(&DocumentName::Application, "Standard.Module1.main"),
        Err(ExchangeError::NoActiveDocument)
    ));
}

#[test]
fn test_script_failure_surfaces_as_remote_error() {
    let office = MemoryOffice::new();
    office.open_document("Untitled 1");
    assert!(matches!(
        exchange(&office).invoke(&DocumentName::parse("Untitled 1"), "Standard.Nope.main"),
        Err(ExchangeError::Remote(_))
    ));
}

#[test]
fn test_push_and_run_inserts_before_invoking() {
    let office = MemoryOffice::new();
    let doc = office.open_document("Untitled 1");
    let uri = script_uri("Standard.Greet.main", ScriptLocation::Document);
    office.register_script(&uri, json!("hi"));
    office.clear_journal();

    let macro_path = ModulePath::parse("Standard.Greet.main").unwrap();
    let (pushed, result) = exchange(&office)
        .push_and_run(
            &DocumentName::parse("Untitled 1"),
            &macro_path,
            ["function main", "main = \"hi\"", "end function"],
            false,
        )
        .unwrap();
    assert_eq!(pushed.upsert, Upsert::Inserted);
    assert_eq!(result, json!("hi"));

    let journal = office.journal();
    let insert = journal
        .iter()
        .position(|c| {
            *c == RemoteCall::InsertModule {
                scope: Scope::Document(doc),
                library: "Standard".to_string(),
                module: "Greet".to_string(),
            }
        })
        .unwrap();
    let run = journal
        .iter()
        .position(|c| *c == RemoteCall::InvokeScript(uri.clone()))
        .unwrap();
    assert!(insert < run);
}

#[test]
fn test_push_and_run_on_application_uses_active_document() {
    let office = MemoryOffice::new();
    office.open_document("Untitled 1");
    let uri = script_uri("Tools.Strings.main", ScriptLocation::Application);
    office.register_script(&uri, json!(1));

    let macro_path = ModulePath::parse("Tools.Strings.main").unwrap();
    let (_, result) = exchange(&office)
        .push_and_run(&DocumentName::Application, &macro_path, ["sub main", "end sub"], false)
        .unwrap();
    assert_eq!(result, json!(1));
    assert!(office
        .module(Scope::Application, "Tools", "Strings")
        .is_some());
}

#[test]
fn test_push_and_run_on_application_needs_an_active_document() {
    let office = MemoryOffice::new();
    let macro_path = ModulePath::parse("Tools.Strings.main").unwrap();
    assert!(matches!(
        exchange(&office).push_and_run(&DocumentName::Application, &macro_path, ["x"], false),
        Err(ExchangeError::NoActiveDocument)
    ));
    assert!(office.module(Scope::Application, "Tools", "Strings").is_some());
}
