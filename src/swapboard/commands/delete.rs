use crate::commands::helpers::require_owner_or_admin;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MarketError, Result};
use crate::model::{ItemId, ItemStatus, UserId};
use crate::store::MarketStore;

/// Soft-deletes a listing. Only the seller or an admin may do this.
///
/// The item stays in the collection with status DELETED, whatever its status was.
/// A sold listing can be taken down too; the buyer's purchase record is kept.
pub fn run<S: MarketStore>(store: &mut S, item_id: ItemId, requester: UserId) -> Result<CmdResult> {
    require_owner_or_admin(store, item_id, requester)?;

    let item = store
        .get_item_mut(item_id)
        .ok_or(MarketError::ItemNotFound(item_id))?;
    item.status = ItemStatus::Deleted;
    let item = item.clone();
    tracing::info!(item = %item_id, %requester, "item deleted");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Item deleted (id {}): {}",
            item_id, item.name
        )))
        .with_affected_items(vec![item]))
}
