use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Item;
use crate::search::{self, SearchCriteria};
use crate::store::MarketStore;

fn listed(items: Vec<Item>, what: String) -> CmdResult {
    let mut result = CmdResult::default();
    if items.is_empty() {
        result.add_message(CmdMessage::info(format!("No items match {}", what)));
    }
    result.with_listed_items(items)
}

/// Case-sensitive substring match on item names, AVAILABLE items only.
pub fn by_name<S: MarketStore>(store: &S, keyword: &str) -> Result<CmdResult> {
    let items = search::name_search(store.list_items(), keyword);
    tracing::debug!(%keyword, hits = items.len(), "name search");
    Ok(listed(items, format!("\"{}\"", keyword)))
}

/// Exact category match, AVAILABLE items only.
pub fn by_category<S: MarketStore>(store: &S, category: &str) -> Result<CmdResult> {
    let items = search::category_search(store.list_items(), category);
    tracing::debug!(%category, hits = items.len(), "category search");
    Ok(listed(items, format!("category \"{}\"", category)))
}

pub fn by_criteria<S: MarketStore>(store: &S, criteria: &SearchCriteria) -> Result<CmdResult> {
    let items = criteria.apply(store.list_items());
    tracing::debug!(?criteria, hits = items.len(), "criteria search");
    Ok(listed(items, "the search".to_string()))
}
