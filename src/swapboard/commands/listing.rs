use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::MarketStore;

/// Lists items in insertion order; `include_unavailable` adds SOLD and DELETED ones.
pub fn run<S: MarketStore>(store: &S, include_unavailable: bool) -> Result<CmdResult> {
    let listed: Vec<_> = store
        .list_items()
        .iter()
        .filter(|item| include_unavailable || item.is_available())
        .cloned()
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No items to show."));
    }
    Ok(result.with_listed_items(listed))
}
