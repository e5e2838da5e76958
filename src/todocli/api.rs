//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for todocli operations, whatever the UI.
//!
//! It dispatches to `commands/*.rs` and returns `Result<CmdResult>`. It does no
//! printing and never exits the process; callers decide what an error means.
//!
//! `TodoApi<S: ItemStore>` owns its store:
//! - Production: `TodoApi<SqliteStore>`
//! - Testing: `TodoApi<InMemoryStore>`
//!
//! Owning the store ties the store's exclusive hold to the facade's lifetime.
//! Call [`TodoApi::close`] to release it and surface flush errors; dropping the
//! facade releases it too, which is what happens on error paths.

use crate::commands;
use crate::error::Result;
use crate::store::ItemStore;

pub struct TodoApi<S: ItemStore> {
    store: S,
}

impl<S: ItemStore> TodoApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn add_items<T: AsRef<[u8]>>(&mut self, texts: &[T]) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, texts)
    }

    pub fn remove_items<T: AsRef<str>>(&mut self, ids: &[T]) -> Result<commands::CmdResult> {
        commands::remove::run(&mut self.store, ids)
    }

    pub fn show_items(&self) -> Result<commands::CmdResult> {
        commands::show::run(&self.store)
    }

    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TodoError;
    use crate::model::{Identifier, TodoItem};
    use crate::store::memory::InMemoryStore;
    use crate::store::sqlite::{SqliteStore, StoreOptions};

    #[test]
    fn add_then_show_round_trip() {
        let mut api = TodoApi::new(InMemoryStore::new());
        let added = api.add_items(&["buy milk"]).unwrap();
        assert_eq!(added.added, vec![Identifier::new(1)]);

        let shown = api.show_items().unwrap();
        assert_eq!(shown.listed_items, vec![TodoItem::new("1", "buy milk")]);
    }

    #[test]
    fn remove_dispatches_every_id() {
        let mut api = TodoApi::new(InMemoryStore::new());
        api.add_items(&["a", "b"]).unwrap();
        let result = api.remove_items(&["1", "7"]).unwrap();
        assert_eq!(result.removed, vec!["1", "7"]);
        assert_eq!(api.show_items().unwrap().listed_items.len(), 1);
    }

    #[test]
    fn usage_errors_pass_through() {
        let mut api = TodoApi::new(InMemoryStore::new());
        let none: [&str; 0] = [];
        assert!(matches!(api.add_items(&none), Err(TodoError::Usage(_))));
        assert!(matches!(api.remove_items(&none), Err(TodoError::Usage(_))));
    }

    #[test]
    fn close_releases_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todocli.db");
        let options = StoreOptions::default();

        let mut api = TodoApi::new(SqliteStore::open(&path, &options).unwrap());
        api.add_items(&["persisted"]).unwrap();
        api.close().unwrap();

        let api = TodoApi::new(SqliteStore::open(&path, &options).unwrap());
        let shown = api.show_items().unwrap();
        assert_eq!(shown.listed_items, vec![TodoItem::new("1", "persisted")]);
    }
}
