use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MarketError, Result};
use crate::model::{ItemId, ItemStatus, UserId};
use crate::store::MarketStore;

/// Marks an AVAILABLE item SOLD and records it on a regular buyer.
///
/// Check and write happen under the same `&mut` borrow, so at most one call per
/// item ever succeeds. The buyer is not required to exist; unknown or admin
/// buyers still complete the sale without any list being updated.
pub fn run<S: MarketStore>(store: &mut S, item_id: ItemId, buyer: UserId) -> Result<CmdResult> {
    let item = store
        .get_item_mut(item_id)
        .ok_or(MarketError::ItemNotFound(item_id))?;
    if item.status != ItemStatus::Available {
        tracing::debug!(item = %item_id, status = %item.status, "purchase refused");
        return Err(MarketError::ItemUnavailable {
            id: item_id,
            status: item.status,
        });
    }
    item.status = ItemStatus::Sold;
    let item = item.clone();

    if let Some(activity) = store.get_user_mut(buyer).and_then(|u| u.activity_mut()) {
        activity.purchased.push(item_id);
    }
    tracing::info!(item = %item_id, %buyer, price = item.price, "item sold");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Purchased (id {}): {} for {:.2}",
            item_id, item.name, item.price
        )))
        .with_affected_items(vec![item]))
}
