//! Remote object adapters. The office's own method names appear only in this file.

use super::client::{BridgeClient, SERVICE_MANAGER};
use crate::error::RemoteError;
use crate::remote::{
    Controller, Desktop, Document, Frame, FrameList, IndexAccess, LibraryContainer,
    ModuleLibrary, NameAccess, NameContainer, RemoteResult, Script, ScriptProvider,
    ServiceFactory,
};
use serde_json::{json, Value};
use std::sync::Arc;

const DESKTOP_SERVICE: &str = "com.sun.star.frame.Desktop";
const APPLICATION_LIBRARIES_SERVICE: &str = "com.sun.star.script.ApplicationScriptLibraryContainer";

/// Key marking an object reference in a bridge result.
const OBJECT_KEY: &str = "$object";

fn unexpected(method: &str, expected: &'static str) -> RemoteError {
    RemoteError::UnexpectedValue {
        method: method.to_string(),
        expected,
    }
}

/// A reference to one object living in the office process.
#[derive(Clone)]
struct RemoteObject {
    client: Arc<BridgeClient>,
    id: String,
}

impl RemoteObject {
    fn call(&self, method: &str, args: &[Value]) -> RemoteResult<Value> {
        self.client.call(&self.id, method, args)
    }

    fn call_unit(&self, method: &str, args: &[Value]) -> RemoteResult<()> {
        self.call(method, args).map(|_| ())
    }

    fn call_bool(&self, method: &str, args: &[Value]) -> RemoteResult<bool> {
        self.call(method, args)?
            .as_bool()
            .ok_or_else(|| unexpected(method, "a boolean"))
    }

    fn call_string(&self, method: &str, args: &[Value]) -> RemoteResult<String> {
        match self.call(method, args)? {
            Value::String(s) => Ok(s),
            _ => Err(unexpected(method, "a string")),
        }
    }

    fn call_count(&self, method: &str) -> RemoteResult<usize> {
        self.call(method, &[])?
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| unexpected(method, "a non-negative integer"))
    }

    /// Element names; an entry that is not text fails with `InvalidKey`.
    fn call_names(&self, method: &str) -> RemoteResult<Vec<String>> {
        match self.call(method, &[])? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(RemoteError::InvalidKey(other.to_string())),
                })
                .collect(),
            _ => Err(unexpected(method, "an array of names")),
        }
    }

    fn call_object(&self, method: &str, args: &[Value]) -> RemoteResult<Option<RemoteObject>> {
        let value = self.call(method, args)?;
        object_from(&self.client, method, value)
    }

    fn call_required_object(&self, method: &str, args: &[Value]) -> RemoteResult<RemoteObject> {
        self.call_object(method, args)?
            .ok_or_else(|| unexpected(method, "an object"))
    }
}

fn object_from(
    client: &Arc<BridgeClient>,
    method: &str,
    value: Value,
) -> RemoteResult<Option<RemoteObject>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => match map.get(OBJECT_KEY).and_then(Value::as_str) {
            Some(id) => Ok(Some(RemoteObject {
                client: Arc::clone(client),
                id: id.to_string(),
            })),
            None => Err(unexpected(method, "an object reference")),
        },
        _ => Err(unexpected(method, "an object reference")),
    }
}

/// Session over the bridge. Creating it makes no remote call; the first operation does.
pub struct BridgeSession {
    service_manager: RemoteObject,
}

impl BridgeSession {
    pub fn new(client: BridgeClient) -> Self {
        Self {
            service_manager: RemoteObject {
                client: Arc::new(client),
                id: SERVICE_MANAGER.to_string(),
            },
        }
    }

    fn create_instance(&self, service: &str) -> RemoteResult<RemoteObject> {
        self.service_manager
            .call_required_object("createInstance", &[json!(service)])
    }
}

impl ServiceFactory for BridgeSession {
    fn desktop(&self) -> RemoteResult<Box<dyn Desktop>> {
        Ok(Box::new(BridgeDesktop(self.create_instance(DESKTOP_SERVICE)?)))
    }

    fn application_libraries(&self) -> RemoteResult<Box<dyn LibraryContainer>> {
        Ok(Box::new(BridgeLibraries(
            self.create_instance(APPLICATION_LIBRARIES_SERVICE)?,
        )))
    }
}

struct BridgeDesktop(RemoteObject);

impl Desktop for BridgeDesktop {
    fn current_component(&self) -> RemoteResult<Option<Box<dyn Document>>> {
        Ok(self
            .0
            .call_object("getCurrentComponent", &[])?
            .map(|o| Box::new(BridgeDocument(o)) as Box<dyn Document>))
    }

    fn frames(&self) -> RemoteResult<Box<FrameList>> {
        Ok(Box::new(BridgeFrames(self.0.call_required_object("getFrames", &[])?)))
    }
}

struct BridgeFrames(RemoteObject);

impl IndexAccess for BridgeFrames {
    type Element = Box<dyn Frame>;

    fn count(&self) -> RemoteResult<usize> {
        self.0.call_count("getCount")
    }

    fn by_index(&self, index: usize) -> RemoteResult<Box<dyn Frame>> {
        let frame = self.0.call_required_object("getByIndex", &[json!(index)])?;
        Ok(Box::new(BridgeFrame(frame)))
    }
}

struct BridgeFrame(RemoteObject);

impl Frame for BridgeFrame {
    fn controller(&self) -> RemoteResult<Option<Box<dyn Controller>>> {
        Ok(self
            .0
            .call_object("getController", &[])?
            .map(|o| Box::new(BridgeController(o)) as Box<dyn Controller>))
    }
}

struct BridgeController(RemoteObject);

impl Controller for BridgeController {
    fn title(&self) -> RemoteResult<String> {
        self.0.call_string("getTitle", &[])
    }

    fn model(&self) -> RemoteResult<Box<dyn Document>> {
        Ok(Box::new(BridgeDocument(self.0.call_required_object("getModel", &[])?)))
    }
}

struct BridgeDocument(RemoteObject);

impl Document for BridgeDocument {
    fn title(&self) -> RemoteResult<String> {
        self.0.call_string("getTitle", &[])
    }

    fn basic_libraries(&self) -> RemoteResult<Box<dyn LibraryContainer>> {
        let libraries = self
            .0
            .call_required_object("getPropertyValue", &[json!("BasicLibraries")])?;
        Ok(Box::new(BridgeLibraries(libraries)))
    }

    fn script_provider(&self) -> RemoteResult<Box<dyn ScriptProvider>> {
        Ok(Box::new(BridgeScriptProvider(
            self.0.call_required_object("getScriptProvider", &[])?,
        )))
    }

    fn store(&self) -> RemoteResult<()> {
        self.0.call_unit("store", &[])
    }

    fn set_modified(&self, modified: bool) -> RemoteResult<()> {
        self.0.call_unit("setModified", &[json!(modified)])
    }
}

struct BridgeLibraries(RemoteObject);

impl NameAccess for BridgeLibraries {
    type Element = Box<ModuleLibrary>;

    fn has_by_name(&self, name: &str) -> RemoteResult<bool> {
        self.0.call_bool("hasByName", &[json!(name)])
    }

    fn by_name(&self, name: &str) -> RemoteResult<Box<ModuleLibrary>> {
        Ok(Box::new(BridgeLibrary(
            self.0.call_required_object("getByName", &[json!(name)])?,
        )))
    }

    fn element_names(&self) -> RemoteResult<Vec<String>> {
        self.0.call_names("getElementNames")
    }
}

impl LibraryContainer for BridgeLibraries {
    fn create_library(&self, name: &str) -> RemoteResult<()> {
        self.0.call_unit("createLibrary", &[json!(name)])
    }

    fn is_library_loaded(&self, name: &str) -> RemoteResult<bool> {
        self.0.call_bool("isLibraryLoaded", &[json!(name)])
    }

    fn load_library(&self, name: &str) -> RemoteResult<()> {
        self.0.call_unit("loadLibrary", &[json!(name)])
    }

    fn is_library_read_only(&self, name: &str) -> RemoteResult<bool> {
        self.0.call_bool("isLibraryReadOnly", &[json!(name)])
    }

    fn is_library_password_protected(&self, name: &str) -> RemoteResult<bool> {
        self.0.call_bool("isLibraryPasswordProtected", &[json!(name)])
    }

    fn is_library_password_verified(&self, name: &str) -> RemoteResult<bool> {
        self.0.call_bool("isLibraryPasswordVerified", &[json!(name)])
    }

    fn set_modified(&self, modified: bool) -> RemoteResult<()> {
        self.0.call_unit("setModified", &[json!(modified)])
    }

    fn store_libraries(&self) -> RemoteResult<()> {
        self.0.call_unit("storeLibraries", &[])
    }
}

struct BridgeLibrary(RemoteObject);

impl NameAccess for BridgeLibrary {
    type Element = String;

    fn has_by_name(&self, name: &str) -> RemoteResult<bool> {
        self.0.call_bool("hasByName", &[json!(name)])
    }

    fn by_name(&self, name: &str) -> RemoteResult<String> {
        self.0.call_string("getByName", &[json!(name)])
    }

    fn element_names(&self) -> RemoteResult<Vec<String>> {
        self.0.call_names("getElementNames")
    }
}

impl NameContainer for BridgeLibrary {
    fn insert_by_name(&self, name: &str, element: String) -> RemoteResult<()> {
        self.0.call_unit("insertByName", &[json!(name), json!(element)])
    }

    fn replace_by_name(&self, name: &str, element: String) -> RemoteResult<()> {
        self.0.call_unit("replaceByName", &[json!(name), json!(element)])
    }

    fn remove_by_name(&self, name: &str) -> RemoteResult<()> {
        self.0.call_unit("removeByName", &[json!(name)])
    }
}

struct BridgeScriptProvider(RemoteObject);

impl ScriptProvider for BridgeScriptProvider {
    fn script(&self, uri: &str) -> RemoteResult<Box<dyn Script>> {
        Ok(Box::new(BridgeScript(
            self.0.call_required_object("getScript", &[json!(uri)])?,
        )))
    }
}

struct BridgeScript(RemoteObject);

impl Script for BridgeScript {
    fn invoke(&self, args: &[Value]) -> RemoteResult<Value> {
        self.0
            .call("invoke", &[Value::Array(args.to_vec()), json!([]), json!([])])
    }
}
