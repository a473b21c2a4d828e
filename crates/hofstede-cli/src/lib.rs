//! Library components of the `hofstede` command-line tool.

pub mod config;
pub mod logging;
