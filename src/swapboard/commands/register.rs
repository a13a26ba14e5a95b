use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MarketError, Result};
use crate::model::{Profile, Role, User};
use crate::store::MarketStore;

pub fn run<S: MarketStore>(store: &mut S, profile: Profile, role: Role) -> Result<CmdResult> {
    // Case-sensitive exact match, checked only here and never on profile edits.
    if store.list_users().iter().any(|u| u.email() == profile.email) {
        tracing::debug!(email = %profile.email, "registration refused, email taken");
        return Err(MarketError::DuplicateEmail(profile.email));
    }

    let id = store.next_user_id();
    let user = User::new(id, profile, role);
    let message = format!("Registered {} as {} user (id {})", user.username(), role, id);
    store.insert_user(user)?;
    tracing::info!(user = %id, %role, "user registered");

    Ok(CmdResult::default()
        .with_affected_user(id)
        .with_message(CmdMessage::success(message)))
}
