//! In-Process Office
//!
//! A complete office instance held in memory: documents shown in frames, document and
//! application library containers with their flags, and a registry of invocable scripts.
//! Every remote operation is recorded in a journal so callers can check which round trips
//! a resolution or access actually made.

use crate::error::RemoteError;
use crate::remote::{
    Controller, Desktop, Document, Frame, FrameList, IndexAccess, LibraryContainer,
    ModuleLibrary, NameAccess, NameContainer, RemoteResult, Script, ScriptProvider,
    ServiceFactory,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Index of a document in the order it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(usize);

/// Owner of a library container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Application,
    Document(DocumentId),
}

/// Library state flags as the remote side reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryFlags {
    pub loaded: bool,
    pub read_only: bool,
    pub password_protected: bool,
    pub password_verified: bool,
}

impl Default for LibraryFlags {
    fn default() -> Self {
        Self {
            loaded: true,
            read_only: false,
            password_protected: false,
            password_verified: false,
        }
    }
}

/// One recorded remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    CurrentComponent,
    GetFrames,
    FrameCount,
    FrameByIndex(usize),
    ApplicationLibraries,
    DocumentLibraries(DocumentId),
    CreateLibrary { scope: Scope, library: String },
    LoadLibrary { scope: Scope, library: String },
    IsLibraryLoaded { scope: Scope, library: String },
    IsReadOnly { scope: Scope, library: String },
    IsPasswordProtected { scope: Scope, library: String },
    IsPasswordVerified { scope: Scope, library: String },
    InsertModule { scope: Scope, library: String, module: String },
    ReplaceModule { scope: Scope, library: String, module: String },
    RemoveModule { scope: Scope, library: String, module: String },
    SetModified { scope: Scope, modified: bool },
    SetDocumentModified { document: DocumentId, modified: bool },
    StoreDocument(DocumentId),
    StoreLibraries,
    InvokeScript(String),
}

#[derive(Default)]
struct LibraryState {
    flags: LibraryFlags,
    modules: Vec<(String, String)>,
}

#[derive(Default)]
struct LibrarySet {
    libraries: Vec<(String, LibraryState)>,
    modified: bool,
}

impl LibrarySet {
    fn get(&self, name: &str) -> Option<&LibraryState> {
        self.libraries.iter().find(|(n, _)| n == name).map(|(_, l)| l)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut LibraryState> {
        self.libraries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, l)| l)
    }
}

struct DocumentState {
    title: String,
    libraries: LibrarySet,
    modified: bool,
    stores: usize,
}

#[derive(Default)]
struct OfficeState {
    documents: Vec<DocumentState>,
    /// Frames in enumeration order; `None` is a frame without a controller.
    frames: Vec<Option<DocumentId>>,
    active: Option<DocumentId>,
    application: LibrarySet,
    application_stores: usize,
    scripts: HashMap<String, Value>,
    journal: Vec<RemoteCall>,
}

impl OfficeState {
    fn record(&mut self, call: RemoteCall) {
        self.journal.push(call);
    }

    fn libraries(&self, scope: Scope) -> &LibrarySet {
        match scope {
            Scope::Application => &self.application,
            Scope::Document(id) => &self.documents[id.0].libraries,
        }
    }

    fn libraries_mut(&mut self, scope: Scope) -> &mut LibrarySet {
        match scope {
            Scope::Application => &mut self.application,
            Scope::Document(id) => &mut self.documents[id.0].libraries,
        }
    }

    fn library(&self, scope: Scope, name: &str) -> RemoteResult<&LibraryState> {
        self.libraries(scope)
            .get(name)
            .ok_or_else(|| RemoteError::NoSuchElement(name.to_string()))
    }

    fn library_mut(&mut self, scope: Scope, name: &str) -> RemoteResult<&mut LibraryState> {
        self.libraries_mut(scope)
            .get_mut(name)
            .ok_or_else(|| RemoteError::NoSuchElement(name.to_string()))
    }
}

/// Shared handle to an in-memory office instance. Clones observe the same state.
#[derive(Clone, Default)]
pub struct MemoryOffice {
    state: Arc<Mutex<OfficeState>>,
}

impl MemoryOffice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a document in a new frame and make it the active one.
    pub fn open_document(&self, title: &str) -> DocumentId {
        let mut state = self.state.lock();
        let id = DocumentId(state.documents.len());
        state.documents.push(DocumentState {
            title: title.to_string(),
            libraries: LibrarySet::default(),
            modified: false,
            stores: 0,
        });
        state.frames.push(Some(id));
        state.active = Some(id);
        id
    }

    /// Add a frame that has no controller, such as the start center.
    pub fn add_empty_frame(&self) {
        self.state.lock().frames.push(None);
    }

    pub fn set_active(&self, document: Option<DocumentId>) {
        self.state.lock().active = document;
    }

    pub fn add_library(&self, scope: Scope, name: &str, flags: LibraryFlags) {
        let mut state = self.state.lock();
        let set = state.libraries_mut(scope);
        match set.get_mut(name) {
            Some(library) => library.flags = flags,
            None => set.libraries.push((
                name.to_string(),
                LibraryState {
                    flags,
                    modules: Vec::new(),
                },
            )),
        }
    }

    /// Store module text directly, creating the library if needed.
    pub fn set_module(&self, scope: Scope, library: &str, module: &str, source: &str) {
        let mut state = self.state.lock();
        let set = state.libraries_mut(scope);
        if set.get(library).is_none() {
            set.libraries
                .push((library.to_string(), LibraryState::default()));
        }
        if let Some(lib) = set.get_mut(library) {
            match lib.modules.iter_mut().find(|(n, _)| n == module) {
                Some(slot) => slot.1 = source.to_string(),
                None => lib.modules.push((module.to_string(), source.to_string())),
            }
        }
    }

    pub fn register_script(&self, uri: &str, result: Value) {
        self.state.lock().scripts.insert(uri.to_string(), result);
    }

    pub fn module(&self, scope: Scope, library: &str, module: &str) -> Option<String> {
        let state = self.state.lock();
        state
            .libraries(scope)
            .get(library)?
            .modules
            .iter()
            .find(|(n, _)| n == module)
            .map(|(_, s)| s.clone())
    }

    pub fn library_names(&self, scope: Scope) -> Vec<String> {
        let state = self.state.lock();
        state
            .libraries(scope)
            .libraries
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    pub fn module_names(&self, scope: Scope, library: &str) -> Vec<String> {
        let state = self.state.lock();
        state
            .libraries(scope)
            .get(library)
            .map(|l| l.modules.iter().map(|(n, _)| n.clone()).collect())
            .unwrap_or_default()
    }

    pub fn is_modified(&self, scope: Scope) -> bool {
        let state = self.state.lock();
        state.libraries(scope).modified
    }

    pub fn is_document_modified(&self, document: DocumentId) -> bool {
        self.state.lock().documents[document.0].modified
    }

    pub fn store_count(&self, document: DocumentId) -> usize {
        self.state.lock().documents[document.0].stores
    }

    pub fn application_store_count(&self) -> usize {
        self.state.lock().application_stores
    }

    pub fn journal(&self) -> Vec<RemoteCall> {
        self.state.lock().journal.clone()
    }

    pub fn clear_journal(&self) {
        self.state.lock().journal.clear();
    }
}

impl ServiceFactory for MemoryOffice {
    fn desktop(&self) -> RemoteResult<Box<dyn Desktop>> {
        Ok(Box::new(MemoryDesktop {
            state: Arc::clone(&self.state),
        }))
    }

    fn application_libraries(&self) -> RemoteResult<Box<dyn LibraryContainer>> {
        self.state.lock().record(RemoteCall::ApplicationLibraries);
        Ok(Box::new(MemoryLibraries {
            state: Arc::clone(&self.state),
            scope: Scope::Application,
        }))
    }
}

struct MemoryDesktop {
    state: Arc<Mutex<OfficeState>>,
}

impl Desktop for MemoryDesktop {
    fn current_component(&self) -> RemoteResult<Option<Box<dyn Document>>> {
        let mut state = self.state.lock();
        state.record(RemoteCall::CurrentComponent);
        Ok(state.active.map(|id| {
            Box::new(MemoryDocument {
                state: Arc::clone(&self.state),
                id,
            }) as Box<dyn Document>
        }))
    }

    fn frames(&self) -> RemoteResult<Box<FrameList>> {
        self.state.lock().record(RemoteCall::GetFrames);
        Ok(Box::new(MemoryFrames {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MemoryFrames {
    state: Arc<Mutex<OfficeState>>,
}

impl IndexAccess for MemoryFrames {
    type Element = Box<dyn Frame>;

    fn count(&self) -> RemoteResult<usize> {
        let mut state = self.state.lock();
        state.record(RemoteCall::FrameCount);
        Ok(state.frames.len())
    }

    fn by_index(&self, index: usize) -> RemoteResult<Box<dyn Frame>> {
        let mut state = self.state.lock();
        state.record(RemoteCall::FrameByIndex(index));
        let document = *state
            .frames
            .get(index)
            .ok_or(RemoteError::IndexOutOfBounds(index))?;
        Ok(Box::new(MemoryFrame {
            state: Arc::clone(&self.state),
            document,
        }))
    }
}

struct MemoryFrame {
    state: Arc<Mutex<OfficeState>>,
    document: Option<DocumentId>,
}

impl Frame for MemoryFrame {
    fn controller(&self) -> RemoteResult<Option<Box<dyn Controller>>> {
        Ok(self.document.map(|id| {
            Box::new(MemoryDocument {
                state: Arc::clone(&self.state),
                id,
            }) as Box<dyn Controller>
        }))
    }
}

struct MemoryDocument {
    state: Arc<Mutex<OfficeState>>,
    id: DocumentId,
}

impl MemoryDocument {
    fn title_now(&self) -> String {
        self.state.lock().documents[self.id.0].title.clone()
    }
}

impl Controller for MemoryDocument {
    fn title(&self) -> RemoteResult<String> {
        Ok(self.title_now())
    }

    fn model(&self) -> RemoteResult<Box<dyn Document>> {
        Ok(Box::new(MemoryDocument {
            state: Arc::clone(&self.state),
            id: self.id,
        }))
    }
}

impl Document for MemoryDocument {
    fn title(&self) -> RemoteResult<String> {
        Ok(self.title_now())
    }

    fn basic_libraries(&self) -> RemoteResult<Box<dyn LibraryContainer>> {
        self.state
            .lock()
            .record(RemoteCall::DocumentLibraries(self.id));
        Ok(Box::new(MemoryLibraries {
            state: Arc::clone(&self.state),
            scope: Scope::Document(self.id),
        }))
    }

    fn script_provider(&self) -> RemoteResult<Box<dyn ScriptProvider>> {
        Ok(Box::new(MemoryScriptProvider {
            state: Arc::clone(&self.state),
        }))
    }

    fn store(&self) -> RemoteResult<()> {
        let mut state = self.state.lock();
        state.record(RemoteCall::StoreDocument(self.id));
        let document = &mut state.documents[self.id.0];
        document.stores += 1;
        document.modified = false;
        document.libraries.modified = false;
        Ok(())
    }

    fn set_modified(&self, modified: bool) -> RemoteResult<()> {
        let mut state = self.state.lock();
        state.record(RemoteCall::SetDocumentModified {
            document: self.id,
            modified,
        });
        state.documents[self.id.0].modified = modified;
        Ok(())
    }
}

struct MemoryLibraries {
    state: Arc<Mutex<OfficeState>>,
    scope: Scope,
}

impl MemoryLibraries {
    fn flag(
        &self,
        name: &str,
        call: RemoteCall,
        read: impl Fn(&LibraryFlags) -> bool,
    ) -> RemoteResult<bool> {
        let mut state = self.state.lock();
        state.record(call);
        Ok(read(&state.library(self.scope, name)?.flags))
    }
}

impl NameAccess for MemoryLibraries {
    type Element = Box<ModuleLibrary>;

    fn has_by_name(&self, name: &str) -> RemoteResult<bool> {
        Ok(self.state.lock().libraries(self.scope).get(name).is_some())
    }

    fn by_name(&self, name: &str) -> RemoteResult<Box<ModuleLibrary>> {
        self.state.lock().library(self.scope, name)?;
        Ok(Box::new(MemoryLibrary {
            state: Arc::clone(&self.state),
            scope: self.scope,
            name: name.to_string(),
        }))
    }

    fn element_names(&self) -> RemoteResult<Vec<String>> {
        let state = self.state.lock();
        Ok(state
            .libraries(self.scope)
            .libraries
            .iter()
            .map(|(n, _)| n.clone())
            .collect())
    }
}

impl LibraryContainer for MemoryLibraries {
    fn create_library(&self, name: &str) -> RemoteResult<()> {
        let mut state = self.state.lock();
        state.record(RemoteCall::CreateLibrary {
            scope: self.scope,
            library: name.to_string(),
        });
        let set = state.libraries_mut(self.scope);
        if set.get(name).is_some() {
            return Err(RemoteError::Exception {
                kind: "com.sun.star.container.ElementExistException".to_string(),
                message: name.to_string(),
            });
        }
        set.libraries
            .push((name.to_string(), LibraryState::default()));
        Ok(())
    }

    fn is_library_loaded(&self, name: &str) -> RemoteResult<bool> {
        let call = RemoteCall::IsLibraryLoaded {
            scope: self.scope,
            library: name.to_string(),
        };
        self.flag(name, call, |f| f.loaded)
    }

    fn load_library(&self, name: &str) -> RemoteResult<()> {
        let mut state = self.state.lock();
        state.record(RemoteCall::LoadLibrary {
            scope: self.scope,
            library: name.to_string(),
        });
        state.library_mut(self.scope, name)?.flags.loaded = true;
        Ok(())
    }

    fn is_library_read_only(&self, name: &str) -> RemoteResult<bool> {
        let call = RemoteCall::IsReadOnly {
            scope: self.scope,
            library: name.to_string(),
        };
        self.flag(name, call, |f| f.read_only)
    }

    fn is_library_password_protected(&self, name: &str) -> RemoteResult<bool> {
        let call = RemoteCall::IsPasswordProtected {
            scope: self.scope,
            library: name.to_string(),
        };
        self.flag(name, call, |f| f.password_protected)
    }

    fn is_library_password_verified(&self, name: &str) -> RemoteResult<bool> {
        let call = RemoteCall::IsPasswordVerified {
            scope: self.scope,
            library: name.to_string(),
        };
        self.flag(name, call, |f| f.password_verified)
    }

    fn set_modified(&self, modified: bool) -> RemoteResult<()> {
        let mut state = self.state.lock();
        state.record(RemoteCall::SetModified {
            scope: self.scope,
            modified,
        });
        state.libraries_mut(self.scope).modified = modified;
        Ok(())
    }

    fn store_libraries(&self) -> RemoteResult<()> {
        let mut state = self.state.lock();
        state.record(RemoteCall::StoreLibraries);
        state.libraries_mut(self.scope).modified = false;
        if self.scope == Scope::Application {
            state.application_stores += 1;
        }
        Ok(())
    }
}

struct MemoryLibrary {
    state: Arc<Mutex<OfficeState>>,
    scope: Scope,
    name: String,
}

impl MemoryLibrary {
    fn not_loaded(&self) -> RemoteError {
        RemoteError::Exception {
            kind: "com.sun.star.lang.WrappedTargetException".to_string(),
            message: format!("library {} is not loaded", self.name),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&LibraryState) -> T) -> RemoteResult<T> {
        let state = self.state.lock();
        let library = state.library(self.scope, &self.name)?;
        if !library.flags.loaded {
            return Err(self.not_loaded());
        }
        Ok(f(library))
    }

    fn write(
        &self,
        call: RemoteCall,
        f: impl FnOnce(&mut LibraryState) -> RemoteResult<()>,
    ) -> RemoteResult<()> {
        let mut state = self.state.lock();
        state.record(call);
        let library = state.library_mut(self.scope, &self.name)?;
        if !library.flags.loaded {
            return Err(self.not_loaded());
        }
        if library.flags.read_only {
            return Err(RemoteError::Exception {
                kind: "com.sun.star.lang.IllegalArgumentException".to_string(),
                message: format!("library {} is read-only", self.name),
            });
        }
        f(library)
    }
}

impl NameAccess for MemoryLibrary {
    type Element = String;

    fn has_by_name(&self, name: &str) -> RemoteResult<bool> {
        self.read(|l| l.modules.iter().any(|(n, _)| n == name))
    }

    fn by_name(&self, name: &str) -> RemoteResult<String> {
        self.read(|l| {
            l.modules
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, s)| s.clone())
        })?
        .ok_or_else(|| RemoteError::NoSuchElement(name.to_string()))
    }

    fn element_names(&self) -> RemoteResult<Vec<String>> {
        self.read(|l| l.modules.iter().map(|(n, _)| n.clone()).collect())
    }
}

impl NameContainer for MemoryLibrary {
    fn insert_by_name(&self, name: &str, element: String) -> RemoteResult<()> {
        let call = RemoteCall::InsertModule {
            scope: self.scope,
            library: self.name.clone(),
            module: name.to_string(),
        };
        self.write(call, |l| {
            if l.modules.iter().any(|(n, _)| n == name) {
                return Err(RemoteError::Exception {
                    kind: "com.sun.star.container.ElementExistException".to_string(),
                    message: name.to_string(),
                });
            }
            l.modules.push((name.to_string(), element));
            Ok(())
        })
    }

    fn replace_by_name(&self, name: &str, element: String) -> RemoteResult<()> {
        let call = RemoteCall::ReplaceModule {
            scope: self.scope,
            library: self.name.clone(),
            module: name.to_string(),
        };
        self.write(call, |l| {
            let slot = l
                .modules
                .iter_mut()
                .find(|(n, _)| n == name)
                .ok_or_else(|| RemoteError::NoSuchElement(name.to_string()))?;
            slot.1 = element;
            Ok(())
        })
    }

    fn remove_by_name(&self, name: &str) -> RemoteResult<()> {
        let call = RemoteCall::RemoveModule {
            scope: self.scope,
            library: self.name.clone(),
            module: name.to_string(),
        };
        self.write(call, |l| {
            let before = l.modules.len();
            l.modules.retain(|(n, _)| n != name);
            if l.modules.len() == before {
                return Err(RemoteError::NoSuchElement(name.to_string()));
            }
            Ok(())
        })
    }
}

struct MemoryScriptProvider {
    state: Arc<Mutex<OfficeState>>,
}

impl ScriptProvider for MemoryScriptProvider {
    fn script(&self, uri: &str) -> RemoteResult<Box<dyn Script>> {
        Ok(Box::new(MemoryScript {
            state: Arc::clone(&self.state),
            uri: uri.to_string(),
        }))
    }
}

struct MemoryScript {
    state: Arc<Mutex<OfficeState>>,
    uri: String,
}

impl Script for MemoryScript {
    fn invoke(&self, _args: &[Value]) -> RemoteResult<Value> {
        let mut state = self.state.lock();
        state.record(RemoteCall::InvokeScript(self.uri.clone()));
        state
            .scripts
            .get(&self.uri)
            .cloned()
            .ok_or_else(|| RemoteError::Exception {
                kind: "com.sun.star.script.provider.ScriptFrameworkErrorException".to_string(),
                message: format!("no script at {}", self.uri),
            })
    }
}
