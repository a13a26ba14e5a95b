//! # Search
//!
//! Stateless filtering and sorting over a snapshot of items. Nothing here
//! touches the store: callers pass in whatever slice they obtained from it.
//!
//! [`SearchCriteria`] bundles every filter; the free functions are the
//! single-predicate shortcuts for callers that need only one of them.
//!
//! All text matching is case-sensitive substring or exact matching, and every
//! filter except [`sort_by_price`] keeps AVAILABLE items only. Sorting is
//! stable, so items with equal prices keep their relative order.

use crate::model::Item;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Upper price bound used when none is given.
pub const DEFAULT_MAX_PRICE: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Keep the order of the snapshot.
    #[default]
    Insertion,
    PriceAsc,
    PriceDesc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_asc" => Ok(SortOrder::PriceAsc),
            "price_desc" => Ok(SortOrder::PriceDesc),
            "" | "none" => Ok(SortOrder::Insertion),
            other => Err(format!(
                "Unknown sort key: {} (expected price_asc or price_desc)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Substring of the name or the description. Empty matches everything.
    pub keyword: String,
    /// Exact category. Empty matches everything.
    pub category: String,
    pub min_price: f64,
    pub max_price: f64,
    pub sort: SortOrder,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            category: String::new(),
            min_price: 0.0,
            max_price: DEFAULT_MAX_PRICE,
            sort: SortOrder::Insertion,
        }
    }
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Both bounds are inclusive.
    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        item.is_available()
            && item.price >= self.min_price
            && item.price <= self.max_price
            && (self.keyword.is_empty() || mentions(item, &self.keyword))
            && (self.category.is_empty() || item.category == self.category)
    }

    pub fn apply(&self, items: &[Item]) -> Vec<Item> {
        let mut result: Vec<Item> = items.iter().filter(|i| self.matches(i)).cloned().collect();
        match self.sort {
            SortOrder::Insertion => {}
            SortOrder::PriceAsc => result.sort_by(price_ascending),
            SortOrder::PriceDesc => result.sort_by(|a, b| price_ascending(b, a)),
        }
        result
    }
}

fn mentions(item: &Item, keyword: &str) -> bool {
    item.name.contains(keyword) || item.description.contains(keyword)
}

fn price_ascending(a: &Item, b: &Item) -> Ordering {
    a.price.total_cmp(&b.price)
}

/// AVAILABLE items whose name or description contains `keyword`.
pub fn text_search(items: &[Item], keyword: &str) -> Vec<Item> {
    items
        .iter()
        .filter(|i| i.is_available() && mentions(i, keyword))
        .cloned()
        .collect()
}

/// AVAILABLE items whose name contains `keyword`.
pub fn name_search(items: &[Item], keyword: &str) -> Vec<Item> {
    items
        .iter()
        .filter(|i| i.is_available() && i.name.contains(keyword))
        .cloned()
        .collect()
}

/// AVAILABLE items in exactly `category`.
pub fn category_search(items: &[Item], category: &str) -> Vec<Item> {
    items
        .iter()
        .filter(|i| i.is_available() && i.category == category)
        .cloned()
        .collect()
}

/// Stable sort by price. Does not filter on status.
pub fn sort_by_price(items: &[Item], ascending: bool) -> Vec<Item> {
    let mut sorted = items.to_vec();
    if ascending {
        sorted.sort_by(price_ascending);
    } else {
        sorted.sort_by(|a, b| price_ascending(b, a));
    }
    sorted
}
