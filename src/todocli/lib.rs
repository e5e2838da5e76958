//! # Todocli Architecture
//!
//! Todocli keeps short text items under auto-incrementing numeric identifiers in a
//! local embedded store. The binary is a thin client: everything that touches the
//! store lives in this library, and the library never prints or exits.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Command registry, argument parsing, printing, exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade owning the store                             │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - add / remove / show logic over any ItemStore             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ItemStore trait                                          │
//! │  - SqliteStore (production), InMemoryStore (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Storage Contract
//!
//! The store owns two mappings: `todos` (identifier → text) and `idgen` (the
//! single key `"id"` → last issued identifier). Identifiers are strictly
//! increasing and never reused, even after the item they named is removed.
//! Identifiers are stored as decimal text, so enumeration follows string
//! order: `"10"` sorts before `"2"`.
//!
//! The production store holds an exclusive lock on its file from open until
//! close (or drop), so at most one process reads or writes it at a time.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Identifier`, `TodoItem`)
//! - [`config`]: Configuration loading and store path resolution
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
