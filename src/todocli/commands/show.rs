use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::ItemStore;

pub fn run<S: ItemStore>(store: &S) -> Result<CmdResult> {
    let items = store.items()?.collect();
    Ok(CmdResult::default().with_listed_items(items))
}
