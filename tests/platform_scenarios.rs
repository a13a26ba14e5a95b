use swapboard::api::{ItemList, ProfileUpdate, TradingPlatform};
use swapboard::error::{ErrorKind, MarketError};
use swapboard::model::{ItemDraft, ItemId, ItemStatus, Profile, Role, UserId};
use swapboard::search::{self, SearchCriteria, SortOrder};
use swapboard::store::memory::InMemoryStore;

const ADMIN: UserId = UserId(1);

fn platform() -> TradingPlatform<InMemoryStore> {
    TradingPlatform::new(InMemoryStore::new()).unwrap()
}

fn register(platform: &mut TradingPlatform<InMemoryStore>, name: &str) -> UserId {
    let profile = Profile::new(name, "pw", format!("{}@campus.edu", name));
    platform
        .register_user(profile, Role::Regular)
        .unwrap()
        .affected_user
        .unwrap()
}

fn publish(
    platform: &mut TradingPlatform<InMemoryStore>,
    seller: UserId,
    name: &str,
    category: &str,
    price: f64,
) -> ItemId {
    platform
        .publish_item(ItemDraft::new(name, "", category, price), seller)
        .unwrap()
        .item_id()
        .unwrap()
}

#[test]
fn duplicate_email_never_registers() {
    let mut p = platform();
    register(&mut p, "alice");
    let before = p.user_count();

    let err = p
        .register_user(
            Profile::new("alice2", "other", "alice@campus.edu"),
            Role::Regular,
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(p.user_count(), before);

    // Case-sensitive comparison: a different case is a different email.
    p.register_user(
        Profile::new("alice3", "pw", "Alice@campus.edu"),
        Role::Regular,
    )
    .unwrap();
    assert_eq!(p.user_count(), before + 1);
}

#[test]
fn ids_increase_and_are_never_reused() {
    let mut p = platform();
    let alice = register(&mut p, "alice");
    let bob = register(&mut p, "bob");
    assert_eq!((alice, bob), (UserId(2), UserId(3)));

    let first = publish(&mut p, alice, "A", "Misc", 1.0);
    p.delete_item(first, alice).unwrap();
    let second = publish(&mut p, alice, "B", "Misc", 1.0);
    assert!(second > first);
    assert_eq!(p.item_count(), 2);
}

#[test]
fn only_one_purchase_succeeds() {
    let mut p = platform();
    let seller = register(&mut p, "seller");
    let buyers: Vec<_> = (0..4).map(|i| register(&mut p, &format!("b{}", i))).collect();
    let item = publish(&mut p, seller, "Guitar", "Music", 450.0);

    let successes = buyers
        .iter()
        .filter(|buyer| p.purchase_item(item, **buyer).is_ok())
        .count();
    assert_eq!(successes, 1);
    assert_eq!(p.find_item_by_id(item).unwrap().status, ItemStatus::Sold);

    let err = p.purchase_item(item, buyers[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(p.find_item_by_id(item).unwrap().status, ItemStatus::Sold);

    let owners: Vec<_> = buyers
        .iter()
        .filter(|b| {
            p.find_user_by_id(**b)
                .and_then(|u| u.activity())
                .map_or(false, |a| a.purchased.contains(&item))
        })
        .collect();
    assert_eq!(owners.len(), 1);
}

#[test]
fn deletion_is_a_soft_flag() {
    let mut p = platform();
    let seller = register(&mut p, "seller");
    let item = publish(&mut p, seller, "Chair", "Furniture", 30.0);
    p.delete_item(item, ADMIN).unwrap();

    assert_eq!(p.find_item_by_id(item).unwrap().status, ItemStatus::Deleted);
    assert!(p.available_items().unwrap().listed_items.is_empty());
    assert_eq!(p.all_items().unwrap().listed_items[0].id, item);
    assert!(p.search_items_by_name("Chair").unwrap().listed_items.is_empty());
}

#[test]
fn delete_authorization() {
    let mut p = platform();
    let owner = register(&mut p, "owner");
    let other = register(&mut p, "other");
    let item = publish(&mut p, owner, "Kettle", "Home", 25.0);

    let err = p.delete_item(item, other).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert!(p.find_item_by_id(item).unwrap().is_available());

    let err = p.delete_item(item, UserId(99)).unwrap_err();
    assert!(matches!(err, MarketError::UserNotFound(_)));
    let err = p.delete_item(ItemId(99), owner).unwrap_err();
    assert!(matches!(err, MarketError::ItemNotFound(_)));

    p.delete_item(item, owner).unwrap();
    assert_eq!(p.find_item_by_id(item).unwrap().status, ItemStatus::Deleted);
}

#[test]
fn authorized_delete_applies_to_sold_items() {
    let mut p = platform();
    let seller = register(&mut p, "seller");
    let buyer = register(&mut p, "buyer");
    let fan = publish(&mut p, seller, "Fan", "Home", 40.0);
    let heater = publish(&mut p, seller, "Heater", "Home", 90.0);
    p.purchase_item(fan, buyer).unwrap();
    p.purchase_item(heater, buyer).unwrap();

    // Only the seller or an admin, even once sold.
    let err = p.delete_item(fan, buyer).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(p.find_item_by_id(fan).unwrap().status, ItemStatus::Sold);

    p.delete_item(fan, ADMIN).unwrap();
    p.delete_item(heater, seller).unwrap();
    assert_eq!(p.find_item_by_id(fan).unwrap().status, ItemStatus::Deleted);
    assert_eq!(p.find_item_by_id(heater).unwrap().status, ItemStatus::Deleted);

    let purchased = p.user_items(buyer, ItemList::Purchased).unwrap().listed_items;
    assert_eq!(purchased.len(), 2);
    assert_eq!(p.stats().unwrap().stats.unwrap().deleted, 2);
}

#[test]
fn publish_accepts_any_price() {
    let mut p = platform();
    let seller = register(&mut p, "seller");
    let item = publish(&mut p, seller, "Free stuff", "Misc", -1.0);
    assert_eq!(p.find_item_by_id(item).unwrap().price, -1.0);
    assert!(p.find_item_by_id(item).unwrap().is_available());
}

#[test]
fn search_filters_out_unavailable_items() {
    let mut p = platform();
    let seller = register(&mut p, "seller");
    let buyer = register(&mut p, "buyer");
    let sold = publish(&mut p, seller, "Phone X", "Phone", 900.0);
    let deleted = publish(&mut p, seller, "Phone Y", "Phone", 800.0);
    let live = publish(&mut p, seller, "Phone Z", "Phone", 700.0);
    p.purchase_item(sold, buyer).unwrap();
    p.delete_item(deleted, seller).unwrap();

    let ids = |items: &[swapboard::model::Item]| items.iter().map(|i| i.id).collect::<Vec<_>>();
    assert_eq!(ids(&p.search_items_by_name("Phone").unwrap().listed_items), vec![live]);
    assert_eq!(ids(&p.search_items_by_category("Phone").unwrap().listed_items), vec![live]);
    assert_eq!(ids(&p.search(&SearchCriteria::new()).unwrap().listed_items), vec![live]);
}

#[test]
fn phone_and_accessory_catalog() {
    let mut p = platform();
    let seller = register(&mut p, "seller");
    publish(&mut p, seller, "iPhone 15", "Phone", 8999.0);
    publish(&mut p, seller, "OPPO Phone", "Phone", 4599.0);
    publish(&mut p, seller, "Phone Charger", "Accessory", 99.0);

    let names = |criteria: SearchCriteria| -> Vec<String> {
        p.search(&criteria)
            .unwrap()
            .listed_items
            .into_iter()
            .map(|i| i.name)
            .collect()
    };

    assert_eq!(
        names(
            SearchCriteria::new()
                .with_keyword("Phone")
                .with_sort(SortOrder::PriceAsc)
        ),
        vec!["Phone Charger", "OPPO Phone", "iPhone 15"]
    );
    assert_eq!(
        names(
            SearchCriteria::new()
                .with_category("Phone")
                .with_price_range(0.0, 5000.0)
        ),
        vec!["OPPO Phone"]
    );
    assert_eq!(
        names(SearchCriteria::new().with_sort(SortOrder::PriceDesc)),
        vec!["iPhone 15", "OPPO Phone", "Phone Charger"]
    );

    let sorted = search::sort_by_price(p.items(), true);
    assert_eq!(sorted[0].name, "Phone Charger");
}

#[test]
fn cart_and_favorites_behave_like_sets() {
    let mut p = platform();
    let seller = register(&mut p, "seller");
    let shopper = register(&mut p, "shopper");
    let item = publish(&mut p, seller, "Desk", "Furniture", 60.0);

    p.add_to_cart(item, shopper).unwrap();
    let err = p.add_to_cart(item, shopper).unwrap_err();
    assert!(err.is_benign());
    p.add_to_favorites(item, shopper).unwrap();
    let err = p.add_to_favorites(item, shopper).unwrap_err();
    assert!(err.is_benign());

    let activity = p.find_user_by_id(shopper).unwrap().activity().unwrap();
    assert_eq!(activity.cart, vec![item]);
    assert_eq!(activity.favorites, vec![item]);

    // Removing something that is not there still succeeds.
    p.remove_from_cart(item, shopper).unwrap();
    let again = p.remove_from_cart(item, shopper).unwrap();
    assert!(again.messages[0].content.contains("not in your cart"));

    let err = p.add_to_cart(item, ADMIN).unwrap_err();
    assert!(matches!(err, MarketError::NotRegularUser(_)));
}

#[test]
fn unavailable_items_cannot_be_carted() {
    let mut p = platform();
    let seller = register(&mut p, "seller");
    let shopper = register(&mut p, "shopper");
    let item = publish(&mut p, seller, "Rug", "Home", 15.0);
    p.purchase_item(item, seller).unwrap();

    let err = p.add_to_cart(item, shopper).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    let err = p.add_to_favorites(ItemId(42), shopper).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn unknown_seller_creates_an_unlinked_item() {
    let mut p = platform();
    let item = publish(&mut p, UserId(77), "Orphan", "Misc", 5.0);
    assert!(p.find_item_by_id(item).unwrap().is_available());
    assert!(p.seller_of(item).is_none());
}

#[test]
fn login_takes_the_first_match_after_profile_edits() {
    let mut p = platform();
    let first = register(&mut p, "first");
    let second = register(&mut p, "second");

    // Email uniqueness is only checked at registration.
    p.edit_profile(
        second,
        ProfileUpdate {
            email: Some("first@campus.edu".into()),
            ..ProfileUpdate::default()
        },
    )
    .unwrap();
    assert_eq!(p.login("first@campus.edu", "pw"), Some(first));

    p.edit_profile(
        second,
        ProfileUpdate {
            password: Some("new".into()),
            ..ProfileUpdate::default()
        },
    )
    .unwrap();
    assert_eq!(p.login("first@campus.edu", "new"), Some(second));
    assert_eq!(p.login("first@campus.edu", "wrong"), None);
}

#[test]
fn user_lists_follow_activity() {
    let mut p = platform();
    let seller = register(&mut p, "seller");
    let buyer = register(&mut p, "buyer");
    let a = publish(&mut p, seller, "A", "Misc", 1.0);
    let b = publish(&mut p, seller, "B", "Misc", 2.0);
    p.purchase_item(b, buyer).unwrap();

    let published = p.user_items(seller, ItemList::Published).unwrap().listed_items;
    assert_eq!(published.iter().map(|i| i.id).collect::<Vec<_>>(), vec![a, b]);
    let purchased = p.user_items(buyer, ItemList::Purchased).unwrap().listed_items;
    assert_eq!(purchased.iter().map(|i| i.id).collect::<Vec<_>>(), vec![b]);

    let err = p.user_items(ADMIN, ItemList::Cart).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
}

#[test]
fn failed_operations_change_nothing() {
    let mut p = platform();
    let seller = register(&mut p, "seller");
    let item = publish(&mut p, seller, "Lamp", "Home", 20.0);
    let snapshot = (p.users().to_vec(), p.items().to_vec());

    assert!(p
        .update_item(item, seller, ItemDraft::new("Bad", "", "Misc", -1.0))
        .is_err());
    assert!(p
        .update_item(item, UserId(1234), ItemDraft::new("X", "", "Misc", 1.0))
        .is_err());
    assert!(p.purchase_item(ItemId(500), seller).is_err());
    assert!(p
        .register_user(Profile::new("dup", "pw", "seller@campus.edu"), Role::Regular)
        .is_err());

    assert_eq!((p.users().to_vec(), p.items().to_vec()), snapshot);
}
