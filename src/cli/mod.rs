//! CLI command implementations
//!
//! - `simple`: Rule commands (quote, parse, sanitize, coverage)
//! - `config`: Schema command
//! - `util`: Shared utility functions

pub mod config;
pub mod simple;
pub mod util;

pub use config::cmd_schema;
pub use simple::{cmd_coverage, cmd_parse, cmd_quote, cmd_sanitize};
