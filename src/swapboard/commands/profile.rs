use crate::commands::helpers::{items_by_ids, require_user};
use crate::commands::{CmdMessage, CmdResult, ItemList, ProfileUpdate};
use crate::error::{MarketError, Result};
use crate::model::UserId;
use crate::store::MarketStore;

/// Applies phone, email and password changes.
///
/// Email uniqueness is not re-checked; only registration enforces it.
pub fn edit<S: MarketStore>(store: &mut S, user: UserId, update: ProfileUpdate) -> Result<CmdResult> {
    let target = store
        .get_user_mut(user)
        .ok_or(MarketError::UserNotFound(user))?;

    if update.is_empty() {
        return Ok(CmdResult::default()
            .with_affected_user(user)
            .with_message(CmdMessage::info("Nothing to update")));
    }

    if let Some(phone) = update.phone {
        target.profile.phone = phone;
    }
    if let Some(email) = update.email {
        target.profile.email = email;
    }
    if let Some(password) = update.password {
        target.reset_password(password);
    }
    tracing::debug!(%user, "profile updated");

    Ok(CmdResult::default()
        .with_affected_user(user)
        .with_message(CmdMessage::success("Profile updated")))
}

/// Lists the items behind one of a regular user's id lists, skipping dangling ids.
pub fn items<S: MarketStore>(store: &S, user: UserId, list: ItemList) -> Result<CmdResult> {
    let activity = require_user(store, user)?
        .activity()
        .ok_or(MarketError::NotRegularUser(user))?;
    let ids = match list {
        ItemList::Published => &activity.published,
        ItemList::Purchased => &activity.purchased,
        ItemList::Cart => &activity.cart,
        ItemList::Favorites => &activity.favorites,
    };

    let listed = items_by_ids(store, ids);
    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(format!("Nothing in your {}", list)));
    }
    Ok(result.with_listed_items(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::lists::{self, SavedList};
    use crate::commands::{auth, publish, register};
    use crate::model::{ItemDraft, ItemId, Profile, Role};
    use crate::store::memory::InMemoryStore;

    fn setup() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        register::run(&mut store, Profile::new("root", "pw", "root@x"), Role::Admin).unwrap();
        register::run(
            &mut store,
            Profile::new("reg", "old", "reg@x").with_phone("111"),
            Role::Regular,
        )
        .unwrap();
        store
    }

    #[test]
    fn edits_phone_email_and_password() {
        let mut store = setup();
        let update = ProfileUpdate {
            phone: Some("222".into()),
            email: Some("new@x".into()),
            password: Some("new".into()),
        };
        edit(&mut store, UserId(2), update).unwrap();

        assert_eq!(auth::login(&store, "new@x", "new"), Some(UserId(2)));
        assert_eq!(auth::login(&store, "reg@x", "old"), None);
        assert_eq!(store.get_user(UserId(2)).unwrap().profile.phone, "222");
    }

    #[test]
    fn email_edit_does_not_check_uniqueness() {
        let mut store = setup();
        let update = ProfileUpdate {
            email: Some("root@x".into()),
            ..ProfileUpdate::default()
        };
        assert!(edit(&mut store, UserId(2), update).is_ok());
        let dupes = store
            .list_users()
            .iter()
            .filter(|u| u.email() == "root@x")
            .count();
        assert_eq!(dupes, 2);
    }

    #[test]
    fn empty_update_changes_nothing() {
        let mut store = setup();
        let result = edit(&mut store, UserId(2), ProfileUpdate::default()).unwrap();
        assert_eq!(result.messages[0].content, "Nothing to update");
        assert_eq!(auth::login(&store, "reg@x", "old"), Some(UserId(2)));
    }

    #[test]
    fn lists_resolve_to_items_and_skip_dangling_ids() {
        let mut store = setup();
        publish::run(&mut store, ItemDraft::new("Pen", "", "Office", 2.0), UserId(2)).unwrap();
        lists::add(&mut store, SavedList::Favorites, ItemId(1), UserId(2)).unwrap();
        store
            .get_user_mut(UserId(2))
            .unwrap()
            .activity_mut()
            .unwrap()
            .favorites
            .push(ItemId(40));

        let favorites = items(&store, UserId(2), ItemList::Favorites).unwrap();
        assert_eq!(favorites.listed_items.len(), 1);
        let published = items(&store, UserId(2), ItemList::Published).unwrap();
        assert_eq!(published.listed_items[0].name, "Pen");
        let purchased = items(&store, UserId(2), ItemList::Purchased).unwrap();
        assert!(purchased.listed_items.is_empty());
        assert!(purchased.messages[0].content.contains("Nothing in your purchased items"));
    }

    #[test]
    fn admins_have_no_lists() {
        let store = setup();
        assert!(matches!(
            items(&store, UserId(1), ItemList::Cart),
            Err(MarketError::NotRegularUser(_))
        ));
    }
}
