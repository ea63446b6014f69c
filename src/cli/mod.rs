// CLI module for flacmeta
//
// Command-line front end over the library: argument parsing, command
// implementations and output formatting. Only compiled into the binary.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{Commands, Config};
pub use output::OutputFormatter;
