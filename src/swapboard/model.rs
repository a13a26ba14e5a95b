use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemStatus {
    Available,
    Sold,
    Deleted,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::Available => write!(f, "available"),
            ItemStatus::Sold => write!(f, "sold"),
            ItemStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// The editable fields of a listing, used both to publish and to update it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    // Image references are carried but never populated.
    pub images: Vec<String>,
    pub status: ItemStatus,
    pub published_on: NaiveDate,
    pub seller_id: UserId,
}

impl Item {
    pub fn new(id: ItemId, draft: ItemDraft, seller_id: UserId) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            price: draft.price,
            images: Vec::new(),
            status: ItemStatus::Available,
            published_on: Local::now().date_naive(),
            seller_id,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }

    pub fn update_info(&mut self, draft: ItemDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.category = draft.category;
        self.price = draft.price;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Regular,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Regular => write!(f, "regular"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub email: String,
    pub phone: String,
    pub student_id: String,
    pub real_name: String,
    pub college: String,
}

impl Profile {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_student_id(mut self, student_id: impl Into<String>) -> Self {
        self.student_id = student_id.into();
        self
    }

    pub fn with_real_name(mut self, real_name: impl Into<String>) -> Self {
        self.real_name = real_name.into();
        self
    }

    pub fn with_college(mut self, college: impl Into<String>) -> Self {
        self.college = college.into();
        self
    }
}

/// Item id lists kept for a regular user. Cart and favorites hold no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub published: Vec<ItemId>,
    pub purchased: Vec<ItemId>,
    pub cart: Vec<ItemId>,
    pub favorites: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Account {
    Regular(Activity),
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub profile: Profile,
    pub account: Account,
}

impl User {
    /// Builds the role-specific variant. Admins keep only username, password and email.
    pub fn new(id: UserId, profile: Profile, role: Role) -> Self {
        match role {
            Role::Regular => Self {
                id,
                profile,
                account: Account::Regular(Activity::default()),
            },
            Role::Admin => Self {
                id,
                profile: Profile::new(profile.username, profile.password, profile.email),
                account: Account::Admin,
            },
        }
    }

    pub fn role(&self) -> Role {
        match self.account {
            Account::Regular(_) => Role::Regular,
            Account::Admin => Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }

    pub fn username(&self) -> &str {
        &self.profile.username
    }

    /// Plain equality; passwords are stored as given.
    pub fn check_password(&self, candidate: &str) -> bool {
        self.profile.password == candidate
    }

    pub fn reset_password(&mut self, password: impl Into<String>) {
        self.profile.password = password.into();
    }

    pub fn activity(&self) -> Option<&Activity> {
        match &self.account {
            Account::Regular(activity) => Some(activity),
            Account::Admin => None,
        }
    }

    pub fn activity_mut(&mut self) -> Option<&mut Activity> {
        match &mut self.account {
            Account::Regular(activity) => Some(activity),
            Account::Admin => None,
        }
    }
}
