//! Remote Object Interfaces
//!
//! The narrow set of remote capabilities the exchange relies on. Every remote method name
//! lives in an adapter implementing these traits (`bridge` for a live office, `memory` for
//! an in-process instance); the rest of the crate only sees the traits.

use crate::error::RemoteError;
use serde_json::Value;

pub type RemoteResult<T> = Result<T, RemoteError>;

/// A remote collection addressed by position.
pub trait IndexAccess {
    type Element;

    fn count(&self) -> RemoteResult<usize>;

    fn by_index(&self, index: usize) -> RemoteResult<Self::Element>;
}

/// A remote collection addressed by name.
pub trait NameAccess {
    type Element;

    fn has_by_name(&self, name: &str) -> RemoteResult<bool>;

    fn by_name(&self, name: &str) -> RemoteResult<Self::Element>;

    /// Names in the remote's own enumeration order.
    fn element_names(&self) -> RemoteResult<Vec<String>>;
}

/// A remote named collection that accepts insertion, replacement and removal.
pub trait NameContainer: NameAccess {
    fn insert_by_name(&self, name: &str, element: Self::Element) -> RemoteResult<()>;

    fn replace_by_name(&self, name: &str, element: Self::Element) -> RemoteResult<()>;

    fn remove_by_name(&self, name: &str) -> RemoteResult<()>;
}

/// One Basic library: module name to module source.
pub type ModuleLibrary = dyn NameContainer<Element = String>;

/// The set of Basic libraries owned by a document or by the application.
pub trait LibraryContainer: NameAccess<Element = Box<ModuleLibrary>> {
    fn create_library(&self, name: &str) -> RemoteResult<()>;

    fn is_library_loaded(&self, name: &str) -> RemoteResult<bool>;

    fn load_library(&self, name: &str) -> RemoteResult<()>;

    fn is_library_read_only(&self, name: &str) -> RemoteResult<bool>;

    fn is_library_password_protected(&self, name: &str) -> RemoteResult<bool>;

    fn is_library_password_verified(&self, name: &str) -> RemoteResult<bool>;

    fn set_modified(&self, modified: bool) -> RemoteResult<()>;

    /// Persist the libraries of a container that has no owning document.
    fn store_libraries(&self) -> RemoteResult<()>;
}

/// An open document model.
pub trait Document {
    fn title(&self) -> RemoteResult<String>;

    fn basic_libraries(&self) -> RemoteResult<Box<dyn LibraryContainer>>;

    fn script_provider(&self) -> RemoteResult<Box<dyn ScriptProvider>>;

    fn store(&self) -> RemoteResult<()>;

    fn set_modified(&self, modified: bool) -> RemoteResult<()>;
}

pub trait Controller {
    fn title(&self) -> RemoteResult<String>;

    fn model(&self) -> RemoteResult<Box<dyn Document>>;
}

/// A window showing one document. Frames without a controller show nothing.
pub trait Frame {
    fn controller(&self) -> RemoteResult<Option<Box<dyn Controller>>>;
}

pub type FrameList = dyn IndexAccess<Element = Box<dyn Frame>>;

pub trait Desktop {
    /// The active document, if the instance has one.
    fn current_component(&self) -> RemoteResult<Option<Box<dyn Document>>>;

    fn frames(&self) -> RemoteResult<Box<FrameList>>;
}

pub trait ScriptProvider {
    fn script(&self, uri: &str) -> RemoteResult<Box<dyn Script>>;
}

pub trait Script {
    fn invoke(&self, args: &[Value]) -> RemoteResult<Value>;
}

/// Well-known singletons of a connected instance.
pub trait ServiceFactory {
    fn desktop(&self) -> RemoteResult<Box<dyn Desktop>>;

    fn application_libraries(&self) -> RemoteResult<Box<dyn LibraryContainer>>;
}
