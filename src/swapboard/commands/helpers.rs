use crate::error::{MarketError, Result};
use crate::model::{Activity, Item, ItemId, User, UserId};
use crate::store::MarketStore;

pub fn require_user<S: MarketStore>(store: &S, id: UserId) -> Result<&User> {
    store.get_user(id).ok_or(MarketError::UserNotFound(id))
}

pub fn require_item<S: MarketStore>(store: &S, id: ItemId) -> Result<&Item> {
    store.get_item(id).ok_or(MarketError::ItemNotFound(id))
}

pub fn require_available<S: MarketStore>(store: &S, id: ItemId) -> Result<&Item> {
    let item = require_item(store, id)?;
    if !item.is_available() {
        return Err(MarketError::ItemUnavailable {
            id,
            status: item.status,
        });
    }
    Ok(item)
}

/// Owner-or-admin rule shared by delete and update.
pub fn require_owner_or_admin<S: MarketStore>(
    store: &S,
    item_id: ItemId,
    requester: UserId,
) -> Result<&Item> {
    let user = require_user(store, requester)?;
    let item = require_item(store, item_id)?;
    if user.is_admin() || item.seller_id == requester {
        Ok(item)
    } else {
        tracing::warn!(%requester, item = %item_id, "refused modification by non-owner");
        Err(MarketError::Unauthorized {
            requester,
            item: item_id,
        })
    }
}

pub fn regular_activity_mut<S: MarketStore>(store: &mut S, id: UserId) -> Result<&mut Activity> {
    let user = store.get_user_mut(id).ok_or(MarketError::UserNotFound(id))?;
    user.activity_mut().ok_or(MarketError::NotRegularUser(id))
}

/// Resolves ids to items in the given order, skipping ids that match nothing.
pub fn items_by_ids<S: MarketStore>(store: &S, ids: &[ItemId]) -> Vec<Item> {
    ids.iter()
        .filter_map(|id| store.get_item(*id).cloned())
        .collect()
}

pub fn validate_price(price: f64) -> Result<()> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(MarketError::InvalidPrice(price))
    }
}
