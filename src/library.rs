//! Library Access
//!
//! Gatekeeper between a library container and the modules inside one of its libraries.
//! Every flag is read from the remote side right before the decision it drives, in a fixed
//! order: existence, then write permission, then password state, then loading.

use crate::container::{MapView, MutableMapView, Upsert};
use crate::error::ExchangeError;
use crate::remote::{LibraryContainer, ModuleLibrary};
use std::ops::Deref;
use tracing::{debug, info};

/// Whether the caller intends to modify the library.
///
/// Read mode still refuses password protected libraries; it only drops the requirement
/// that the library be writable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}

/// What to do when the requested library does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMissing {
    Fail,
    Create,
}

/// A loaded, accessible library. The capability is fixed when the library is opened.
pub enum LibraryHandle {
    Writable {
        name: String,
        modules: MutableMapView<ModuleLibrary>,
    },
    ReadOnly {
        name: String,
        modules: MapView<ModuleLibrary>,
    },
}

impl LibraryHandle {
    pub fn name(&self) -> &str {
        match self {
            LibraryHandle::Writable { name, .. } | LibraryHandle::ReadOnly { name, .. } => name,
        }
    }

    pub fn is_writable(&self) -> bool {
        matches!(self, LibraryHandle::Writable { .. })
    }

    /// Read access to the modules regardless of capability.
    pub fn modules(&self) -> &MapView<ModuleLibrary> {
        match self {
            LibraryHandle::Writable { modules, .. } => modules.deref(),
            LibraryHandle::ReadOnly { modules, .. } => modules,
        }
    }

    pub fn contains(&self, module: &str) -> Result<bool, ExchangeError> {
        self.modules().contains(module)
    }

    pub fn source(&self, module: &str) -> Result<String, ExchangeError> {
        self.modules().get(module)
    }

    pub fn module_names(&self) -> Result<Vec<String>, ExchangeError> {
        self.modules().keys()
    }

    pub fn upsert(&self, module: &str, source: String) -> Result<Upsert, ExchangeError> {
        match self {
            LibraryHandle::Writable { modules, .. } => modules.upsert(module, source),
            LibraryHandle::ReadOnly { name, .. } => Err(ExchangeError::ReadOnly(name.clone())),
        }
    }

    pub fn delete(&self, module: &str) -> Result<(), ExchangeError> {
        match self {
            LibraryHandle::Writable { modules, .. } => modules.delete(module),
            LibraryHandle::ReadOnly { name, .. } => Err(ExchangeError::ReadOnly(name.clone())),
        }
    }
}

/// Opens libraries of one container.
pub struct LibraryAccess<'a> {
    libraries: &'a dyn LibraryContainer,
}

impl<'a> LibraryAccess<'a> {
    pub fn new(libraries: &'a dyn LibraryContainer) -> Self {
        Self { libraries }
    }

    pub fn open(
        &self,
        name: &str,
        mode: AccessMode,
        on_missing: OnMissing,
    ) -> Result<LibraryHandle, ExchangeError> {
        debug!(library = name, mode = ?mode, "Opening library");

        if !self.libraries.has_by_name(name)? {
            match on_missing {
                OnMissing::Create => {
                    info!(library = name, "Creating library");
                    self.libraries.create_library(name)?;
                }
                OnMissing::Fail => return Err(ExchangeError::ContainerNotFound(name.to_string())),
            }
        }

        let read_only = self.libraries.is_library_read_only(name)?;
        if mode == AccessMode::Write && read_only {
            return Err(ExchangeError::ReadOnly(name.to_string()));
        }

        if self.libraries.is_library_password_protected(name)?
            && !self.libraries.is_library_password_verified(name)?
        {
            return Err(ExchangeError::PasswordProtected(name.to_string()));
        }

        if !self.libraries.is_library_loaded(name)? {
            debug!(library = name, "Loading library");
            self.libraries.load_library(name)?;
        }

        let modules = self.libraries.by_name(name)?;
        let name = name.to_string();
        Ok(if read_only {
            LibraryHandle::ReadOnly {
                name,
                modules: MapView::new(modules),
            }
        } else {
            LibraryHandle::Writable {
                name,
                modules: MutableMapView::new(modules),
            }
        })
    }
}
