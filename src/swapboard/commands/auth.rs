use crate::model::UserId;
use crate::store::MarketStore;

/// Returns the first user, in registration order, whose email and password both match.
pub fn login<S: MarketStore>(store: &S, email: &str, password: &str) -> Option<UserId> {
    let found = store
        .list_users()
        .iter()
        .find(|u| u.email() == email && u.check_password(password))
        .map(|u| u.id);
    match found {
        Some(id) => tracing::debug!(user = %id, "login succeeded"),
        None => tracing::debug!(%email, "login failed"),
    }
    found
}
