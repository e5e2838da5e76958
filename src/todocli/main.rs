//! # Todocli Binary
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! Everything the binary does to the store goes through `todocli::api`, so the
//! CLI layer owns only user-facing concerns: the command registry, argument
//! parsing, context setup, logging setup, rendering and exit codes.
//!
//! Any error that reaches `main` is fatal: it is printed to stderr and the
//! process exits with status 1. Usage mistakes never get here; handlers print
//! guidance and return normally.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
