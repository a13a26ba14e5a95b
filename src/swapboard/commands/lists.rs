//! Cart and favorites.
//!
//! Both lists share one contract and behave like sets keyed by item id:
//! adding needs an existing regular user and an AVAILABLE item, and re-adding
//! is rejected with a benign error. Removing only needs a regular user; an id
//! that is not in the list is reported, not treated as a failure. Item state is
//! never touched.

use crate::commands::helpers::{regular_activity_mut, require_available, require_user};
use crate::commands::{CmdMessage, CmdResult, ItemList};
use crate::error::{MarketError, Result};
use crate::model::{Activity, ItemId, UserId};
use crate::store::MarketStore;

/// A list a user can add to and remove from directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedList {
    Cart,
    Favorites,
}

impl SavedList {
    fn ids_mut(self, activity: &mut Activity) -> &mut Vec<ItemId> {
        match self {
            SavedList::Cart => &mut activity.cart,
            SavedList::Favorites => &mut activity.favorites,
        }
    }

    fn already_present(self, id: ItemId) -> MarketError {
        match self {
            SavedList::Cart => MarketError::AlreadyInCart(id),
            SavedList::Favorites => MarketError::AlreadyFavorited(id),
        }
    }
}

impl From<SavedList> for ItemList {
    fn from(list: SavedList) -> Self {
        match list {
            SavedList::Cart => ItemList::Cart,
            SavedList::Favorites => ItemList::Favorites,
        }
    }
}

pub fn add<S: MarketStore>(
    store: &mut S,
    list: SavedList,
    item_id: ItemId,
    user: UserId,
) -> Result<CmdResult> {
    require_user(store, user)?;
    let item = require_available(store, item_id)?.clone();

    let ids = list.ids_mut(regular_activity_mut(store, user)?);
    if ids.contains(&item_id) {
        return Err(list.already_present(item_id));
    }
    ids.push(item_id);
    tracing::debug!(item = %item_id, %user, ?list, "added to list");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Added to {} (id {}): {}",
            ItemList::from(list),
            item_id,
            item.name
        )))
        .with_affected_items(vec![item]))
}

pub fn remove<S: MarketStore>(
    store: &mut S,
    list: SavedList,
    item_id: ItemId,
    user: UserId,
) -> Result<CmdResult> {
    let ids = list.ids_mut(regular_activity_mut(store, user)?);
    let mut result = CmdResult::default();

    match ids.iter().position(|id| *id == item_id) {
        Some(pos) => {
            ids.remove(pos);
            tracing::debug!(item = %item_id, %user, ?list, "removed from list");
            result.add_message(CmdMessage::success(format!(
                "Removed item {} from {}",
                item_id,
                ItemList::from(list)
            )));
        }
        None => {
            result.add_message(CmdMessage::info(format!(
                "Item {} is not in your {}",
                item_id,
                ItemList::from(list)
            )));
        }
    }

    Ok(result)
}
