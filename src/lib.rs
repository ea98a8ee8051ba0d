//! Oomax: Office Basic Macro Exchange
//!
//! Push Basic module source into a running office instance, pull it back out, and
//! invoke macros, addressing documents by window title.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod container;
pub mod error;
pub mod exchange;
pub mod library;
pub mod logging;
pub mod macro_path;
pub mod memory;
pub mod remote;
pub mod resolver;
