use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TodoError};
use crate::store::ItemStore;

pub const USAGE: &str = "please select a todolist item.";

/// Remove each identifier in turn. Identifiers that name nothing are reported
/// as removed all the same.
pub fn run<S: ItemStore, T: AsRef<str>>(store: &mut S, ids: &[T]) -> Result<CmdResult> {
    if ids.is_empty() {
        return Err(TodoError::Usage(USAGE.to_string()));
    }

    let mut result = CmdResult::default();
    for id in ids {
        let id = id.as_ref();
        store.remove_item(id)?;
        result.add_message(CmdMessage::success(format!("removed item: {}", id)));
        result.removed.push(id.to_string());
    }

    Ok(result)
}
