//! Document Resolution
//!
//! Turns a document name into a live document and the library container to work in.
//! Resolution runs again on every call: the active document and the set of open frames
//! belong to the office instance and can change between two commands.

use crate::container::SequenceView;
use crate::error::ExchangeError;
use crate::macro_path::ScriptLocation;
use crate::remote::{Document, LibraryContainer, ServiceFactory};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Name that selects the active document together with the application libraries.
pub const APPLICATION: &str = "application";

/// A document as named by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentName {
    /// The active document, with the application-wide library container.
    Application,
    /// The open document whose window title matches exactly.
    Titled(String),
}

impl DocumentName {
    pub fn parse(raw: &str) -> Self {
        if raw == APPLICATION {
            DocumentName::Application
        } else {
            DocumentName::Titled(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DocumentName::Application => APPLICATION,
            DocumentName::Titled(title) => title,
        }
    }

    /// Script space that holds macros for this document name.
    pub fn script_location(&self) -> ScriptLocation {
        match self {
            DocumentName::Application => ScriptLocation::Application,
            DocumentName::Titled(_) => ScriptLocation::Document,
        }
    }
}

impl FromStr for DocumentName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved document and the libraries that go with it.
pub struct ResolvedDocument {
    pub name: DocumentName,
    /// `None` only for [`DocumentName::Application`] when no document is active.
    pub document: Option<Box<dyn Document>>,
    pub libraries: Box<dyn LibraryContainer>,
}

impl ResolvedDocument {
    pub fn document(&self) -> Result<&dyn Document, ExchangeError> {
        self.document
            .as_deref()
            .ok_or(ExchangeError::NoActiveDocument)
    }
}

pub struct NameResolver<'a> {
    factory: &'a dyn ServiceFactory,
}

impl<'a> NameResolver<'a> {
    pub fn new(factory: &'a dyn ServiceFactory) -> Self {
        Self { factory }
    }

    /// Resolve the document and its library container.
    pub fn resolve(&self, name: &DocumentName) -> Result<ResolvedDocument, ExchangeError> {
        match name {
            DocumentName::Application => {
                let document = self.factory.desktop()?.current_component()?;
                let libraries = self.factory.application_libraries()?;
                debug!(active = document.is_some(), "Resolved application libraries");
                Ok(ResolvedDocument {
                    name: name.clone(),
                    document,
                    libraries,
                })
            }
            DocumentName::Titled(title) => {
                let document = self.find_by_title(title)?;
                let libraries = document.basic_libraries()?;
                Ok(ResolvedDocument {
                    name: name.clone(),
                    document: Some(document),
                    libraries,
                })
            }
        }
    }

    /// Resolve the document alone, leaving its libraries untouched.
    pub fn resolve_document(
        &self,
        name: &DocumentName,
    ) -> Result<Option<Box<dyn Document>>, ExchangeError> {
        match name {
            DocumentName::Application => Ok(self.factory.desktop()?.current_component()?),
            DocumentName::Titled(title) => Ok(Some(self.find_by_title(title)?)),
        }
    }

    /// First frame, in enumeration order, whose controller carries `title`. Duplicate
    /// titles are not detected; the earliest frame wins.
    fn find_by_title(&self, title: &str) -> Result<Box<dyn Document>, ExchangeError> {
        let desktop = self.factory.desktop()?;
        let frames = SequenceView::new(desktop.frames()?);
        for frame in frames.iter() {
            let Some(controller) = frame?.controller()? else {
                continue;
            };
            if controller.title()? == title {
                debug!(document = title, "Resolved document by frame title");
                return Ok(controller.model()?);
            }
        }
        Err(ExchangeError::DocumentNotFound(title.to_string()))
    }
}
