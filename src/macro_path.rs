//! Macro names as typed on the command line.

use crate::error::ExchangeError;
use std::fmt;
use std::str::FromStr;

/// `library.module`, optionally followed by more dotted segments.
///
/// Only the two leading segments address the module. The third, when present, is kept as
/// the routine name; anything after it plays no part in push or pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath {
    raw: String,
    library: String,
    module: String,
    routine: Option<String>,
}

impl ModulePath {
    pub fn parse(raw: &str) -> Result<Self, ExchangeError> {
        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() < 2 {
            return Err(ExchangeError::IllegalMacroName(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            library: parts[0].to_string(),
            module: parts[1].to_string(),
            routine: parts.get(2).map(|r| r.to_string()),
        })
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn routine(&self) -> Option<&str> {
        self.routine.as_deref()
    }

    /// The name as given, suitable for invoking.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for ModulePath {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Which script space a locator points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLocation {
    Document,
    Application,
}

impl ScriptLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptLocation::Document => "document",
            ScriptLocation::Application => "application",
        }
    }
}

/// Script locator URL for a Basic macro. The macro name is passed through untouched.
pub fn script_uri(macro_name: &str, location: ScriptLocation) -> String {
    format!(
        "vnd.sun.star.script:{}?language=Basic&location={}",
        macro_name,
        location.as_str()
    )
}
