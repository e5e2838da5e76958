use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TodoError};
use crate::model::Identifier;
use crate::store::ItemStore;

pub const USAGE: &str = "please add text for your todo-list item.";

/// Add each text as its own item, in order. Texts are stored as the exact
/// bytes given; they need not be UTF-8.
///
/// Each item is committed before the next one starts. On failure the items
/// already added stay in the store and the rest are not attempted.
pub fn run<S: ItemStore, T: AsRef<[u8]>>(store: &mut S, texts: &[T]) -> Result<CmdResult> {
    if texts.is_empty() {
        return Err(TodoError::Usage(USAGE.to_string()));
    }

    let mut result = CmdResult::default();
    for text in texts {
        let text = text.as_ref();
        let id = add_one(store, text)?;
        result.add_message(CmdMessage::success(format!(
            "added item: todo number {} - {}",
            id,
            String::from_utf8_lossy(text)
        )));
        result.added.push(id);
    }

    Ok(result)
}

/// Allocate an identifier, then write the item under it.
///
/// The two steps commit separately: if the write fails the identifier is
/// spent and never handed out again.
pub fn add_one<S: ItemStore>(store: &mut S, text: &[u8]) -> Result<Identifier> {
    let id = store.next_id()?;
    store.put_item(&id, text)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{remove, show};
    use crate::model::TodoItem;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn first_item_gets_id_one() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &["buy milk"]).unwrap();

        assert_eq!(result.added, vec![Identifier::new(1)]);
        assert_eq!(
            result.messages[0].content,
            "added item: todo number 1 - buy milk"
        );

        let listed = show::run(&store).unwrap().listed_items;
        assert_eq!(listed, vec![TodoItem::new("1", "buy milk")]);
    }

    #[test]
    fn batch_ids_strictly_increase() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &["a", "b", "c", "d"]).unwrap();
        let values: Vec<u64> = result.added.iter().map(Identifier::value).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut store = InMemoryStore::new();
        let first = run(&mut store, &["one"]).unwrap().added[0];
        let second = run(&mut store, &["two"]).unwrap().added[0];
        remove::run(&mut store, &[first.key()]).unwrap();
        let third = run(&mut store, &["three"]).unwrap().added[0];

        assert!(third > first);
        assert!(third > second);
        assert_eq!(third, Identifier::new(3));
    }

    #[test]
    fn empty_batch_is_usage_error() {
        let mut store = InMemoryStore::new();
        let texts: [&str; 0] = [];
        let err = run(&mut store, &texts).unwrap_err();
        assert!(matches!(err, TodoError::Usage(ref m) if m == USAGE));
        assert_eq!(store.counter_value(), None);
    }

    #[test]
    fn failure_mid_batch_keeps_earlier_items() {
        // Two writes per item: the second item's put fails.
        let mut store = StoreFixture::new().failing_after_writes(3).store;
        let err = run(&mut store, &["first", "second", "third"]).unwrap_err();
        assert!(matches!(err, TodoError::WriteFailure(_)));

        let listed = show::run(&store).unwrap().listed_items;
        assert_eq!(listed, vec![TodoItem::new("1", "first")]);
        // The id allocated for the failed write is spent.
        assert_eq!(store.counter_value(), Some(&b"2"[..]));
    }

    #[test]
    fn non_utf8_text_is_stored_verbatim() {
        let mut store = InMemoryStore::new();
        let raw = &b"caf\xe9"[..];
        let result = run(&mut store, &[raw]).unwrap();
        assert_eq!(result.messages[0].content, "added item: todo number 1 - caf\u{fffd}");

        let listed = show::run(&store).unwrap().listed_items;
        assert_eq!(listed, vec![TodoItem::new("1", raw)]);
    }

    #[test]
    fn corrupt_counter_aborts_add() {
        let mut store = StoreFixture::new().with_counter_value("x1").store;
        let err = run(&mut store, &["anything"]).unwrap_err();
        assert!(matches!(err, TodoError::DataCorruption(_)));
        assert!(show::run(&store).unwrap().listed_items.is_empty());
    }
}
