use super::MarketStore;
use crate::error::{MarketError, Result};
use crate::model::{Item, ItemId, User, UserId};

/// In-memory storage. Does NOT persist data.
#[derive(Debug)]
pub struct InMemoryStore {
    users: Vec<User>,
    items: Vec<Item>,
    next_user_id: u32,
    next_item_id: u32,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            items: Vec::new(),
            next_user_id: 1,
            next_item_id: 1,
        }
    }
}

impl MarketStore for InMemoryStore {
    fn next_user_id(&mut self) -> UserId {
        let id = UserId(self.next_user_id);
        self.next_user_id += 1;
        id
    }

    fn next_item_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        id
    }

    fn insert_user(&mut self, user: User) -> Result<()> {
        if self.get_user(user.id).is_some() {
            return Err(MarketError::Store(format!("duplicate user id {}", user.id)));
        }
        self.users.push(user);
        Ok(())
    }

    fn get_user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn get_user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    fn list_users(&self) -> &[User] {
        &self.users
    }

    fn insert_item(&mut self, item: Item) -> Result<()> {
        if self.get_item(item.id).is_some() {
            return Err(MarketError::Store(format!("duplicate item id {}", item.id)));
        }
        self.items.push(item);
        Ok(())
    }

    fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    fn get_item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    fn list_items(&self) -> &[Item] {
        &self.items
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::api::TradingPlatform;
    use crate::model::{ItemDraft, Profile, Role};

    /// Builds a platform (with its seeded admin, id 1) plus extra users and items.
    pub struct PlatformFixture {
        pub platform: TradingPlatform<InMemoryStore>,
    }

    impl Default for PlatformFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PlatformFixture {
        pub fn new() -> Self {
            Self {
                platform: TradingPlatform::new(InMemoryStore::new())
                    .expect("seeding the admin cannot fail on an empty store"),
            }
        }

        pub fn admin_id(&self) -> UserId {
            UserId(1)
        }

        /// Registers a regular user whose email is `{username}@campus.edu`.
        pub fn with_user(mut self, username: &str) -> Self {
            let profile = Profile::new(username, "pw", format!("{}@campus.edu", username))
                .with_phone("13800000000")
                .with_college("Engineering");
            self.platform.register_user(profile, Role::Regular).unwrap();
            self
        }

        pub fn with_item(mut self, seller: UserId, name: &str, category: &str, price: f64) -> Self {
            let draft = ItemDraft::new(name, format!("{} for sale", name), category, price);
            self.platform.publish_item(draft, seller).unwrap();
            self
        }

        pub fn user_id(&self, username: &str) -> UserId {
            self.platform
                .users()
                .iter()
                .find(|u| u.username() == username)
                .map(|u| u.id)
                .unwrap_or_else(|| panic!("no fixture user named {}", username))
        }

        pub fn build(self) -> TradingPlatform<InMemoryStore> {
            self.platform
        }
    }
}
