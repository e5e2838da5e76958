//! # Storage Layer
//!
//! This module defines the storage abstraction for todocli. The [`ItemStore`] trait
//! is the whole storage contract: identifier generation, item writes, deletes and
//! enumeration.
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: Production store
//!   - One SQLite database file, opened with owner-only permissions
//!   - Tables `todos` and `idgen` stand in for the two named mappings
//!   - Holds an exclusive lock on the file until closed or dropped
//!
//! - [`memory::InMemoryStore`]: In-memory store for testing
//!   - No persistence
//!   - Same ordering and corruption semantics as the SQLite store
//!
//! ## Storage Format
//!
//! ```text
//! todocli.db
//! ├── todos   key TEXT (decimal identifier) → value BLOB (item text)
//! └── idgen   key TEXT ("id")               → value TEXT (last issued identifier)
//! ```
//!
//! Keys compare byte-wise, so items come back in string order of their
//! identifiers ("1", "10", "11", "2", ...), not numeric order.

use crate::error::{Result, TodoError};
use crate::model::{Identifier, TodoItem};

pub mod memory;
pub mod sqlite;

/// Abstract interface for item storage.
pub trait ItemStore {
    /// Allocate the next identifier: read the counter (absent means 0), add one,
    /// store it durably and return it. Never returns the same value twice.
    fn next_id(&mut self) -> Result<Identifier>;

    /// Write `text` under `id` in the item mapping.
    fn put_item(&mut self, id: &Identifier, text: &[u8]) -> Result<()>;

    /// Delete the item stored under `id`. Deleting a missing key succeeds.
    fn remove_item(&mut self, id: &str) -> Result<()>;

    /// One full pass over the item mapping in key order.
    fn items(&self) -> Result<Items>;

    /// Release the store, flushing pending writes.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// A single pass over the items present when [`ItemStore::items`] was called.
///
/// Not restartable: call `items()` again for a fresh pass.
#[derive(Debug)]
pub struct Items {
    inner: std::vec::IntoIter<TodoItem>,
}

impl Items {
    pub(crate) fn new(items: Vec<TodoItem>) -> Self {
        Self {
            inner: items.into_iter(),
        }
    }
}

impl Iterator for Items {
    type Item = TodoItem;

    fn next(&mut self) -> Option<TodoItem> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Items {}

/// Compute the identifier that follows the stored counter value.
///
/// `None` is a fresh store. A value that is not a decimal integer, or one that
/// cannot be incremented, is corruption; nothing is reset.
pub(crate) fn advance_counter(raw: Option<&[u8]>) -> Result<Identifier> {
    let current = match raw {
        None => 0,
        Some(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| {
                TodoError::DataCorruption(format!(
                    "id counter holds a non-numeric value: {:?}",
                    String::from_utf8_lossy(bytes)
                ))
            })?,
    };
    let next = current
        .checked_add(1)
        .ok_or_else(|| TodoError::DataCorruption("id counter overflowed".to_string()))?;
    Ok(Identifier::new(next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_counter_starts_at_one() {
        assert_eq!(advance_counter(None).unwrap(), Identifier::new(1));
    }

    #[test]
    fn present_counter_increments() {
        assert_eq!(advance_counter(Some(&b"41"[..])).unwrap(), Identifier::new(42));
    }

    #[test]
    fn garbage_counter_is_corruption() {
        let err = advance_counter(Some(&b"forty-two"[..])).unwrap_err();
        assert!(matches!(err, TodoError::DataCorruption(_)));
    }

    #[test]
    fn max_counter_is_corruption() {
        let raw = u64::MAX.to_string();
        let err = advance_counter(Some(raw.as_bytes())).unwrap_err();
        assert!(matches!(err, TodoError::DataCorruption(_)));
    }
}
