//! Macro Exchange
//!
//! Push module source into an office instance, pull it back out, and invoke macros.
//! Each operation resolves its document from scratch and holds nothing between calls.

use crate::bridge::BridgeSession;
use crate::config::ConnectionConfig;
use crate::container::Upsert;
use crate::error::ExchangeError;
use crate::library::{AccessMode, LibraryAccess, OnMissing};
use crate::macro_path::{script_uri, ModulePath};
use crate::remote::{Document, ServiceFactory};
use crate::resolver::{DocumentName, NameResolver};
use serde_json::Value;
use std::str::Split;
use tracing::{debug, info};

/// Result of a push.
pub struct Pushed {
    /// The document the module was pushed into; `None` when pushing to the application
    /// libraries while no document is active.
    pub document: Option<Box<dyn Document>>,
    pub upsert: Upsert,
    pub saved: bool,
}

/// Source text of one module as stored in the office.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSource {
    text: String,
}

impl ModuleSource {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines of the module, each ending in `\n`. Every call starts a fresh pass.
    pub fn lines(&self) -> ModuleLines<'_> {
        ModuleLines {
            inner: self.text.split('\n'),
        }
    }
}

impl<'a> IntoIterator for &'a ModuleSource {
    type Item = String;
    type IntoIter = ModuleLines<'a>;

    fn into_iter(self) -> ModuleLines<'a> {
        self.lines()
    }
}

pub struct ModuleLines<'a> {
    inner: Split<'a, char>,
}

impl<'a> Iterator for ModuleLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next().map(|line| format!("{}\n", line))
    }
}

/// Join caller lines into module text: line terminators are stripped from each line and
/// the lines are joined with a single `\n`.
pub fn join_source<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().trim_end_matches(['\n', '\r']).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Owns the session to one office instance.
pub struct Exchange {
    session: Box<dyn ServiceFactory>,
}

impl Exchange {
    pub fn new(session: Box<dyn ServiceFactory>) -> Self {
        Self { session }
    }

    /// Connect to the office bridge described by `config`.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, ExchangeError> {
        let session = BridgeSession::connect(config)?;
        Ok(Self::new(Box::new(session)))
    }

    fn resolver(&self) -> NameResolver<'_> {
        NameResolver::new(self.session.as_ref())
    }

    /// Write `lines` into `library.module` of `document`, creating the library if needed.
    ///
    /// With `save` the document is stored, together with the application library container
    /// when pushing to `application`; otherwise the libraries and the document are only
    /// marked modified. Pushing to `application` with no active document touches the
    /// library container alone.
    pub fn push<I, S>(
        &self,
        document: &DocumentName,
        library: &str,
        module: &str,
        lines: I,
        save: bool,
    ) -> Result<Pushed, ExchangeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolved = self.resolver().resolve(document)?;
        let handle = LibraryAccess::new(resolved.libraries.as_ref()).open(
            library,
            AccessMode::Write,
            OnMissing::Create,
        )?;

        let source = join_source(lines);
        let upsert = handle.upsert(module, source)?;
        info!(
            document = %document,
            library,
            module,
            upsert = ?upsert,
            "Pushed module"
        );

        match (resolved.document.as_deref(), save) {
            (Some(doc), true) => {
                if resolved.name == DocumentName::Application {
                    resolved.libraries.store_libraries()?;
                }
                doc.store()?;
            }
            (Some(doc), false) => {
                resolved.libraries.set_modified(true)?;
                doc.set_modified(true)?;
            }
            (None, _) => match &resolved.name {
                DocumentName::Application if save => resolved.libraries.store_libraries()?,
                DocumentName::Application => resolved.libraries.set_modified(true)?,
                DocumentName::Titled(title) => {
                    return Err(ExchangeError::DocumentNotFound(title.clone()))
                }
            },
        }
        debug!(document = %document, saved = save, "Recorded push on document");

        Ok(Pushed {
            document: resolved.document,
            upsert,
            saved: save,
        })
    }

    /// Read the source of `library.module` from `document`.
    pub fn pull(
        &self,
        document: &DocumentName,
        library: &str,
        module: &str,
    ) -> Result<ModuleSource, ExchangeError> {
        let resolved = self.resolver().resolve(document)?;
        let handle = LibraryAccess::new(resolved.libraries.as_ref()).open(
            library,
            AccessMode::Read,
            OnMissing::Fail,
        )?;
        let text = handle.source(module)?;
        info!(document = %document, library, module, "Pulled module");
        Ok(ModuleSource::new(text))
    }

    /// Run the Basic macro `macro_name` with no arguments and return what it returns.
    ///
    /// The name is handed to the script locator as is; the office decides what it means.
    pub fn invoke(&self, document: &DocumentName, macro_name: &str) -> Result<Value, ExchangeError> {
        let doc = self
            .resolver()
            .resolve_document(document)?
            .ok_or(ExchangeError::NoActiveDocument)?;
        self.run_on(doc.as_ref(), document, macro_name)
    }

    /// Push `lines` into the module named by `macro_path`, then run `macro_path` on the
    /// document the push landed in. For `application` that is the active document.
    pub fn push_and_run<I, S>(
        &self,
        document: &DocumentName,
        macro_path: &ModulePath,
        lines: I,
        save: bool,
    ) -> Result<(Pushed, Value), ExchangeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pushed = self.push(
            document,
            macro_path.library(),
            macro_path.module(),
            lines,
            save,
        )?;
        let doc = pushed
            .document
            .as_deref()
            .ok_or(ExchangeError::NoActiveDocument)?;
        let result = self.run_on(doc, document, macro_path.as_str())?;
        Ok((pushed, result))
    }

    fn run_on(
        &self,
        doc: &dyn Document,
        document: &DocumentName,
        macro_name: &str,
    ) -> Result<Value, ExchangeError> {
        let uri = script_uri(macro_name, document.script_location());
        debug!(document = %document, uri = %uri, "Invoking macro");
        let script = doc.script_provider()?.script(&uri)?;
        let result = script.invoke(&[])?;
        info!(document = %document, macro_name, "Invoked macro");
        Ok(result)
    }
}
