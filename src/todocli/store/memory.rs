use super::{advance_counter, ItemStore, Items};
use crate::error::{Result, TodoError};
use crate::model::{Identifier, TodoItem};
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    todos: BTreeMap<String, Vec<u8>>,
    counter: Option<Vec<u8>>,
    writes_left: Option<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw counter value as it would sit on disk.
    pub fn counter_value(&self) -> Option<&[u8]> {
        self.counter.as_deref()
    }

    fn spend_write(&mut self, what: &str) -> Result<()> {
        match self.writes_left.as_mut() {
            Some(0) => Err(TodoError::write_failure(what, "injected failure")),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl ItemStore for InMemoryStore {
    fn next_id(&mut self) -> Result<Identifier> {
        let next = advance_counter(self.counter.as_deref())?;
        self.spend_write("update id counter")?;
        self.counter = Some(next.key().into_bytes());
        Ok(next)
    }

    fn put_item(&mut self, id: &Identifier, text: &[u8]) -> Result<()> {
        self.spend_write("put item")?;
        self.todos.insert(id.key(), text.to_vec());
        Ok(())
    }

    fn remove_item(&mut self, id: &str) -> Result<()> {
        self.spend_write("remove item")?;
        self.todos.remove(id);
        Ok(())
    }

    fn items(&self) -> Result<Items> {
        Ok(Items::new(
            self.todos
                .iter()
                .map(|(k, v)| TodoItem::new(k.clone(), v.clone()))
                .collect(),
        ))
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` items through the regular id allocation path.
        pub fn with_items(mut self, count: usize) -> Self {
            for i in 0..count {
                let id = self.store.next_id().unwrap();
                let text = format!("Test item {}", i + 1);
                self.store.put_item(&id, text.as_bytes()).unwrap();
            }
            self
        }

        pub fn with_counter_value(mut self, raw: &str) -> Self {
            self.store.counter = Some(raw.as_bytes().to_vec());
            self
        }

        /// Every write after the next `count` fails with a WriteFailure.
        pub fn failing_after_writes(mut self, count: usize) -> Self {
            self.store.writes_left = Some(count);
            self
        }
    }
}
