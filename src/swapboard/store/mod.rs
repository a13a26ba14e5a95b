//! # Storage Layer
//!
//! This module defines the storage abstraction for swapboard. The [`MarketStore`]
//! trait owns the two entity collections and the id counters; it knows nothing
//! about roles, authorization or item lifecycles. Those rules live in the command
//! layer, which only ever talks to a `MarketStore`.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: the only backend. Users and items are kept in
//!   insertion order and looked up by linear scan.
//!
//! ## Identity
//!
//! Ids come from two post-increment counters that start at 1. A counter never
//! goes backwards and nothing is ever removed from a collection, so an id is
//! never handed out twice, even for deleted items.
//!
//! ## Ownership
//!
//! Callers never hold a reference into the store across operations. They keep
//! a [`UserId`] / [`ItemId`] and every mutation goes back through the store,
//! keyed by id.

use crate::error::Result;
use crate::model::{Item, ItemId, User, UserId};

pub mod memory;

/// Abstract interface for marketplace storage.
pub trait MarketStore {
    /// Reserve the next user id (post-increment).
    fn next_user_id(&mut self) -> UserId;

    /// Reserve the next item id (post-increment).
    fn next_item_id(&mut self) -> ItemId;

    /// Append a user. Fails if the id is already taken.
    fn insert_user(&mut self, user: User) -> Result<()>;

    fn get_user(&self, id: UserId) -> Option<&User>;

    fn get_user_mut(&mut self, id: UserId) -> Option<&mut User>;

    /// All users, in insertion order
    fn list_users(&self) -> &[User];

    /// Append an item. Fails if the id is already taken.
    fn insert_item(&mut self, item: Item) -> Result<()>;

    fn get_item(&self, id: ItemId) -> Option<&Item>;

    fn get_item_mut(&mut self, id: ItemId) -> Option<&mut Item>;

    /// All items regardless of status, in insertion order
    fn list_items(&self) -> &[Item];
}
