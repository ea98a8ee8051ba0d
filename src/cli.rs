//! CLI domain: parse, route and output only.
//! Exchange orchestration lives in the library; the route table dispatches to it.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{parse_module_path, Cli, Commands};
pub use route::RunContext;
