//! Integration tests for the office macro exchange

mod cli_binary;
mod invoke;
mod library_guards;
mod push_pull;
mod resolution;
mod test_utils;
