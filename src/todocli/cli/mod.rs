//! # CLI Layer
//!
//! This is **one possible UI client** for todocli. It is the only place that knows
//! about terminal I/O, exit codes and output formatting.
//!
//! ## Structure
//!
//! - `setup.rs`: the static command registry and the clap `Command` built from it
//! - `commands.rs`: `run()`, context setup and one handler per registry entry
//! - `render.rs`: turns `CmdResult` data into terminal text
//!
//! Each invocation opens the store once, runs one command, closes the store and
//! exits. Handlers check their arguments before opening the store, so a usage
//! mistake never touches the file.

mod commands;
mod render;
mod setup;

pub use commands::run;
