use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Item, ItemDraft, UserId};
use crate::store::MarketStore;

/// Creates an AVAILABLE listing dated today.
///
/// The seller id is not checked: an unknown seller still gets an item, it is just
/// not linked into anyone's published list. Admin sellers are not linked either.
/// The price is taken as given; only `update_item` checks it.
pub fn run<S: MarketStore>(store: &mut S, draft: ItemDraft, seller: UserId) -> Result<CmdResult> {
    let id = store.next_item_id();
    let item = Item::new(id, draft, seller);
    store.insert_item(item.clone())?;

    let linked = match store.get_user_mut(seller).and_then(|u| u.activity_mut()) {
        Some(activity) => {
            activity.published.push(id);
            true
        }
        None => false,
    };
    tracing::info!(item = %id, %seller, linked, "item published");

    let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Item published (id {}): {}",
        id, item.name
    )));
    result.affected_items.push(item);
    Ok(result)
}
