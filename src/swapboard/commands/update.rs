use crate::commands::helpers::{require_owner_or_admin, validate_price};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MarketError, Result};
use crate::model::{ItemDraft, ItemId, UserId};
use crate::store::MarketStore;

/// Replaces name, description, category and price of an AVAILABLE listing.
pub fn run<S: MarketStore>(
    store: &mut S,
    item_id: ItemId,
    requester: UserId,
    draft: ItemDraft,
) -> Result<CmdResult> {
    validate_price(draft.price)?;
    let item = require_owner_or_admin(store, item_id, requester)?;
    if !item.is_available() {
        return Err(MarketError::ItemUnavailable {
            id: item_id,
            status: item.status,
        });
    }

    let item = store
        .get_item_mut(item_id)
        .ok_or(MarketError::ItemNotFound(item_id))?;
    item.update_info(draft);
    let item = item.clone();
    tracing::debug!(item = %item_id, %requester, "item updated");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Item updated (id {}): {}",
            item_id, item.name
        )))
        .with_affected_items(vec![item]))
}
