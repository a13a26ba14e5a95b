//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every marketplace operation, whatever the UI in front of it.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Owns the store** and seeds the administrator account on construction
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: authorization, status transitions and list rules live
//!   in `commands/*.rs`
//! - **Presentation**: no stdout, stderr or formatting
//!
//! ## Generic Over MarketStore
//!
//! `TradingPlatform<S: MarketStore>` is generic over the storage backend, so the
//! whole platform can be exercised against `InMemoryStore` in tests.
//!
//! ## Identity
//!
//! Users and items are addressed by id only. Lookups hand out shared
//! references for reading; every mutation goes back through a method keyed by
//! id, so no caller ever holds a live handle into the store.

use crate::commands::{self, lists::SavedList};
use crate::config::MarketConfig;
use crate::error::Result;
use crate::model::{Item, ItemDraft, ItemId, Profile, Role, User, UserId};
use crate::search::SearchCriteria;
use crate::store::MarketStore;

/// The marketplace: owns every user and item and arbitrates all changes.
pub struct TradingPlatform<S: MarketStore> {
    store: S,
}

impl<S: MarketStore> TradingPlatform<S> {
    /// Creates a platform seeded with the default administrator.
    pub fn new(store: S) -> Result<Self> {
        Self::with_config(store, &MarketConfig::default())
    }

    /// Creates a platform whose administrator comes from `config`.
    ///
    /// The seed is the first registration, so on an empty store the admin gets
    /// user id 1.
    pub fn with_config(store: S, config: &MarketConfig) -> Result<Self> {
        let mut platform = Self { store };
        platform.register_user(config.admin.profile(), Role::Admin)?;
        tracing::info!(email = %config.admin.email, "administrator seeded");
        Ok(platform)
    }

    pub fn register_user(&mut self, profile: Profile, role: Role) -> Result<commands::CmdResult> {
        commands::register::run(&mut self.store, profile, role)
    }

    pub fn login(&self, email: &str, password: &str) -> Option<UserId> {
        commands::auth::login(&self.store, email, password)
    }

    pub fn publish_item(&mut self, draft: ItemDraft, seller: UserId) -> Result<commands::CmdResult> {
        commands::publish::run(&mut self.store, draft, seller)
    }

    pub fn update_item(
        &mut self,
        item: ItemId,
        requester: UserId,
        draft: ItemDraft,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, item, requester, draft)
    }

    pub fn delete_item(&mut self, item: ItemId, requester: UserId) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, item, requester)
    }

    pub fn purchase_item(&mut self, item: ItemId, buyer: UserId) -> Result<commands::CmdResult> {
        commands::purchase::run(&mut self.store, item, buyer)
    }

    pub fn add_to_cart(&mut self, item: ItemId, user: UserId) -> Result<commands::CmdResult> {
        commands::lists::add(&mut self.store, SavedList::Cart, item, user)
    }

    pub fn remove_from_cart(&mut self, item: ItemId, user: UserId) -> Result<commands::CmdResult> {
        commands::lists::remove(&mut self.store, SavedList::Cart, item, user)
    }

    pub fn add_to_favorites(&mut self, item: ItemId, user: UserId) -> Result<commands::CmdResult> {
        commands::lists::add(&mut self.store, SavedList::Favorites, item, user)
    }

    pub fn remove_from_favorites(
        &mut self,
        item: ItemId,
        user: UserId,
    ) -> Result<commands::CmdResult> {
        commands::lists::remove(&mut self.store, SavedList::Favorites, item, user)
    }

    pub fn edit_profile(
        &mut self,
        user: UserId,
        update: commands::ProfileUpdate,
    ) -> Result<commands::CmdResult> {
        commands::profile::edit(&mut self.store, user, update)
    }

    pub fn search_items_by_name(&self, keyword: &str) -> Result<commands::CmdResult> {
        commands::search::by_name(&self.store, keyword)
    }

    pub fn search_items_by_category(&self, category: &str) -> Result<commands::CmdResult> {
        commands::search::by_category(&self.store, category)
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Result<commands::CmdResult> {
        commands::search::by_criteria(&self.store, criteria)
    }

    pub fn available_items(&self) -> Result<commands::CmdResult> {
        commands::listing::run(&self.store, false)
    }

    /// Every item ever published, SOLD and DELETED included.
    pub fn all_items(&self) -> Result<commands::CmdResult> {
        commands::listing::run(&self.store, true)
    }

    pub fn user_items(&self, user: UserId, list: commands::ItemList) -> Result<commands::CmdResult> {
        commands::profile::items(&self.store, user, list)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn user_count(&self) -> usize {
        self.store.list_users().len()
    }

    pub fn item_count(&self) -> usize {
        self.store.list_items().len()
    }

    pub fn find_user_by_id(&self, id: UserId) -> Option<&User> {
        self.store.get_user(id)
    }

    pub fn find_item_by_id(&self, id: ItemId) -> Option<&Item> {
        self.store.get_item(id)
    }

    /// The user who published `item`, for "contact seller".
    pub fn seller_of(&self, item: ItemId) -> Option<&User> {
        self.find_item_by_id(item)
            .and_then(|item| self.find_user_by_id(item.seller_id))
    }

    pub fn users(&self) -> &[User] {
        self.store.list_users()
    }

    pub fn items(&self) -> &[Item] {
        self.store.list_items()
    }
}

pub use commands::{CmdMessage, CmdResult, ItemList, MessageLevel, PlatformStats, ProfileUpdate};
