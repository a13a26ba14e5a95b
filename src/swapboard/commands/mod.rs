use crate::model::{Item, ItemId, UserId};
use serde::Serialize;

pub mod auth;
pub mod delete;
pub mod helpers;
pub mod lists;
pub mod listing;
pub mod profile;
pub mod publish;
pub mod purchase;
pub mod register;
pub mod search;
pub mod stats;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Aggregate counts for the admin view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformStats {
    pub users: usize,
    pub items: usize,
    pub available: usize,
    pub sold: usize,
    pub deleted: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_items: Vec<Item>,
    pub listed_items: Vec<Item>,
    pub affected_user: Option<UserId>,
    pub stats: Option<PlatformStats>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_items(mut self, items: Vec<Item>) -> Self {
        self.affected_items = items;
        self
    }

    pub fn with_listed_items(mut self, items: Vec<Item>) -> Self {
        self.listed_items = items;
        self
    }

    pub fn with_affected_user(mut self, id: UserId) -> Self {
        self.affected_user = Some(id);
        self
    }

    pub fn with_stats(mut self, stats: PlatformStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.add_message(message);
        self
    }

    /// Id of the first affected item, e.g. the listing a publish just created.
    pub fn item_id(&self) -> Option<ItemId> {
        self.affected_items.first().map(|item| item.id)
    }
}

/// The per-user item id lists a regular user keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemList {
    Published,
    Purchased,
    Cart,
    Favorites,
}

impl std::fmt::Display for ItemList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemList::Published => write!(f, "published items"),
            ItemList::Purchased => write!(f, "purchased items"),
            ItemList::Cart => write!(f, "cart"),
            ItemList::Favorites => write!(f, "favorites"),
        }
    }
}

/// Optional replacement values for a profile edit; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.password.is_none()
    }
}
