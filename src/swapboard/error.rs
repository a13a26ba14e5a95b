use crate::model::{ItemId, ItemStatus, UserId};
use thiserror::Error;

/// Broad failure categories. Every category leaves the platform untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authorization,
    NotFound,
    Conflict,
    /// Expected, harmless outcome (e.g. re-adding an item already in the cart).
    Rejected,
    Internal,
}

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("User {requester} is not allowed to modify item {item}")]
    Unauthorized { requester: UserId, item: ItemId },

    #[error("User {0} is not a regular user")]
    NotRegularUser(UserId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Item {id} is {status}")]
    ItemUnavailable { id: ItemId, status: ItemStatus },

    #[error("Item {0} is already in the cart")]
    AlreadyInCart(ItemId),

    #[error("Item {0} is already in favorites")]
    AlreadyFavorited(ItemId),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl MarketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::DuplicateEmail(_) | MarketError::InvalidPrice(_) => ErrorKind::Validation,
            MarketError::Unauthorized { .. } | MarketError::NotRegularUser(_) => {
                ErrorKind::Authorization
            }
            MarketError::UserNotFound(_) | MarketError::ItemNotFound(_) => ErrorKind::NotFound,
            MarketError::ItemUnavailable { .. } => ErrorKind::Conflict,
            MarketError::AlreadyInCart(_) | MarketError::AlreadyFavorited(_) => ErrorKind::Rejected,
            MarketError::Store(_)
            | MarketError::Io(_)
            | MarketError::Serialization(_)
            | MarketError::Api(_) => ErrorKind::Internal,
        }
    }

    pub fn is_benign(&self) -> bool {
        self.kind() == ErrorKind::Rejected
    }
}

pub type Result<T> = std::result::Result<T, MarketError>;
