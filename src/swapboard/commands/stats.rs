use crate::commands::{CmdResult, PlatformStats};
use crate::error::Result;
use crate::model::ItemStatus;
use crate::store::MarketStore;

pub fn collect<S: MarketStore>(store: &S) -> PlatformStats {
    let items = store.list_items();
    let count = |status: ItemStatus| items.iter().filter(|i| i.status == status).count();
    PlatformStats {
        users: store.list_users().len(),
        items: items.len(),
        available: count(ItemStatus::Available),
        sold: count(ItemStatus::Sold),
        deleted: count(ItemStatus::Deleted),
    }
}

pub fn run<S: MarketStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(collect(store)))
}
