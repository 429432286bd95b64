//! ItemStore behaviour against the in-memory inventory service.

use std::sync::Arc;

use fridgekit_core::{Entity, ItemId};
use fridgekit_inventory::{Category, Outcome, Quantity, Residence, Zone};

use crate::common::{self, FakeApi, Gate};

// ============================================================================
// load
// ============================================================================

#[tokio::test]
async fn test_load_replaces_both_collections() {
    let api = Arc::new(
        FakeApi::new()
            .with_fridge(vec![common::confirmed("1", "Carrot", Category::Vegetable)])
            .with_cart(vec![common::confirmed("2", "Milk", Category::Other)]),
    );
    let (store, _) = common::store(api, true);

    store.load().await;

    assert_eq!(store.fridge_items().len(), 1);
    assert_eq!(store.cart_items().len(), 1);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_logged_out_load_empties_both_collections() {
    let api = Arc::new(
        FakeApi::new()
            .with_fridge(vec![common::confirmed("1", "Carrot", Category::Vegetable)])
            .with_cart(vec![common::confirmed("2", "Milk", Category::Other)]),
    );
    let (store, _) = common::store(api.clone(), true);
    store.load().await;
    assert!(!store.snapshot().is_empty());

    store.auth().set_logged_in(false);
    store.load().await;

    assert!(store.fridge_items().is_empty());
    assert!(store.cart_items().is_empty());
    assert_eq!(api.calls(), vec!["GET /workspace".to_string()]);
}

#[tokio::test]
async fn test_failed_load_clears_stale_data() {
    let api = Arc::new(
        FakeApi::new().with_fridge(vec![common::confirmed("1", "Carrot", Category::Vegetable)]),
    );
    let (store, _) = common::store(api.clone(), true);
    store.load().await;
    assert_eq!(store.fridge_items().len(), 1);

    api.fail_workspace();
    store.load().await;

    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn test_load_during_pending_create_wins() {
    let gate = Arc::new(Gate::default());
    let api = Arc::new(FakeApi::new().gated(gate.clone()));
    let (store, _) = common::store(api.clone(), true);

    let pending = tokio::spawn({
        let store = store.clone();
        async move {
            store
                .add_item("Carrot", Quantity::ONE, Category::Vegetable)
                .await
        }
    });
    gate.entered().await;

    store.load().await;
    assert!(store.fridge_items().is_empty());

    gate.open();
    assert_eq!(pending.await.unwrap(), Some(Outcome::Stale));
    assert!(store.fridge_items().is_empty());
    assert_eq!(store.in_flight(), 0);

    store.load().await;
    assert_eq!(store.fridge_items()[0].name(), "Carrot");
}

// ============================================================================
// add_item
// ============================================================================

#[tokio::test]
async fn test_added_item_is_visible_before_the_service_answers() {
    let gate = Arc::new(Gate::default());
    let api = Arc::new(FakeApi::new().gated(gate.clone()));
    let (store, _) = common::store(api.clone(), true);

    let pending = tokio::spawn({
        let store = store.clone();
        async move {
            store
                .add_item("Carrot", Quantity::new(2).unwrap(), Category::Vegetable)
                .await
        }
    });
    gate.entered().await;

    let fridge = store.fridge_items();
    assert_eq!(fridge.len(), 1);
    assert!(fridge[0].is_provisional());
    assert_eq!(fridge[0].name(), "Carrot");
    assert_eq!(fridge[0].quantity().get(), 2);
    assert_eq!(fridge[0].category(), Category::Vegetable);
    assert_eq!(store.in_flight(), 1);

    gate.open();
    let outcome = pending.await.unwrap();

    assert!(matches!(outcome, Some(Outcome::Confirmed { .. })));
    let fridge = store.fridge_items();
    assert_eq!(fridge.len(), 1);
    assert_eq!(fridge[0].id().server_id().map(|id| id.as_str()), Some("100"));
    assert_eq!(fridge[0].name(), "Carrot");
    assert_eq!(store.in_flight(), 0);
}

#[tokio::test]
async fn test_failed_create_keeps_the_provisional_item() {
    let api = Arc::new(FakeApi::new());
    api.fail_writes();
    let (store, notices) = common::store(api, true);

    let outcome = store
        .add_item("Carrot", Quantity::ONE, Category::Vegetable)
        .await;

    assert_eq!(outcome, Some(Outcome::Settled));
    let fridge = store.fridge_items();
    assert_eq!(fridge.len(), 1);
    assert!(fridge[0].is_provisional());
    assert!(notices.messages().is_empty());
}

#[tokio::test]
async fn test_logged_out_add_stays_local() {
    let api = Arc::new(FakeApi::new());
    let (store, _) = common::store(api.clone(), false);

    let outcome = store.add_item("Leek", Quantity::ONE, Category::Vegetable).await;

    assert_eq!(outcome, Some(Outcome::Settled));
    assert!(store.fridge_items()[0].is_provisional());
    assert!(api.calls().is_empty());
}

// ============================================================================
// remove_item
// ============================================================================

#[tokio::test]
async fn test_double_remove_is_a_noop() {
    let carrot = common::confirmed("7", "Carrot", Category::Vegetable);
    let api = Arc::new(FakeApi::new().with_fridge(vec![carrot.clone()]));
    let (store, _) = common::store(api.clone(), true);
    store.load().await;

    let first = store.remove_item(carrot.id(), Residence::Fridge).await;
    let second = store.remove_item(carrot.id(), Residence::Fridge).await;

    assert_eq!(first, Some(Outcome::Settled));
    assert_eq!(second, None);
    assert!(store.fridge_items().is_empty());
    let deletes: Vec<_> = api
        .calls()
        .into_iter()
        .filter(|call| call.starts_with("DELETE"))
        .collect();
    assert_eq!(deletes, vec!["DELETE /ingredients/7".to_string()]);
}

#[tokio::test]
async fn test_remove_from_cart_uses_cart_endpoint() {
    let milk = common::confirmed("c1", "Milk", Category::Other);
    let api = Arc::new(FakeApi::new().with_cart(vec![milk.clone()]));
    let (store, _) = common::store(api.clone(), true);
    store.load().await;

    store.remove_item(milk.id(), Residence::Cart).await;

    assert!(store.cart_items().is_empty());
    assert!(api.calls().contains(&"DELETE /cart/c1".to_string()));
}

#[tokio::test]
async fn test_failed_delete_is_not_rolled_back() {
    let carrot = common::confirmed("7", "Carrot", Category::Vegetable);
    let api = Arc::new(FakeApi::new().with_fridge(vec![carrot.clone()]));
    let (store, _) = common::store(api.clone(), true);
    store.load().await;
    api.fail_writes();

    let outcome = store.remove_item(carrot.id(), Residence::Fridge).await;

    assert_eq!(outcome, Some(Outcome::Settled));
    assert!(store.fridge_items().is_empty());
}

#[tokio::test]
async fn test_removing_a_provisional_item_never_calls_the_service() {
    let api = Arc::new(FakeApi::new());
    api.fail_writes();
    let (store, _) = common::store(api.clone(), true);
    store.add_item("Leek", Quantity::ONE, Category::Vegetable).await;
    let id = store.fridge_items()[0].id().clone();
    assert!(id.is_provisional());

    store.remove_item(&id, Residence::Fridge).await;

    assert!(store.fridge_items().is_empty());
    assert!(!api.calls().iter().any(|call| call.starts_with("DELETE")));
}

// ============================================================================
// move_item: fridge -> fridge
// ============================================================================

#[tokio::test]
async fn test_refused_shelf_move_restores_category_and_id() {
    let carrot = common::confirmed("7", "Carrot", Category::Vegetable);
    let steak = common::confirmed("8", "Steak", Category::Meat);
    let gate = Arc::new(Gate::default());
    let api = Arc::new(
        FakeApi::new()
            .with_fridge(vec![carrot.clone(), steak])
            .refusing_category(409, Some("Vegetables belong on the vegetable shelf"))
            .gated(gate.clone()),
    );
    let (store, notices) = common::store(api, true);
    store.load().await;
    let before = store.snapshot();

    let pending = tokio::spawn({
        let store = store.clone();
        let id = carrot.id().clone();
        async move { store.move_item(&id, Zone::Meat, Residence::Fridge).await }
    });
    gate.entered().await;
    let moved = store.snapshot().find(carrot.id(), Residence::Fridge).cloned();
    assert_eq!(moved.map(|item| item.category()), Some(Category::Meat));

    gate.open();
    let outcome = pending.await.unwrap();

    assert!(matches!(outcome, Some(Outcome::RolledBack { .. })));
    assert_eq!(store.snapshot(), before);
    let restored = store.snapshot().find(carrot.id(), Residence::Fridge).cloned().unwrap();
    assert_eq!(restored.category(), Category::Vegetable);
    assert_eq!(restored.id(), carrot.id());
    assert_eq!(
        notices.messages(),
        vec!["Vegetables belong on the vegetable shelf".to_string()]
    );
}

#[tokio::test]
async fn test_refused_shelf_move_without_reason_names_the_target() {
    let carrot = common::confirmed("7", "Carrot", Category::Vegetable);
    let api = Arc::new(
        FakeApi::new()
            .with_fridge(vec![carrot.clone()])
            .refusing_category(500, None),
    );
    let (store, notices) = common::store(api, true);
    store.load().await;

    store.move_item(carrot.id(), Zone::Meat, Residence::Fridge).await;

    assert_eq!(notices.messages(), vec!["Cannot move to 'Meat'.".to_string()]);
    assert_eq!(store.fridge_items()[0].category(), Category::Vegetable);
}

#[tokio::test]
async fn test_accepted_shelf_move_announces_the_new_shelf() {
    let carrot = common::confirmed("7", "Carrot", Category::Vegetable);
    let api = Arc::new(FakeApi::new().with_fridge(vec![carrot.clone()]));
    let (store, notices) = common::store(api.clone(), true);
    store.load().await;

    let outcome = store
        .move_item(carrot.id(), Zone::Freezer, Residence::Fridge)
        .await;

    assert_eq!(outcome, Some(Outcome::Settled));
    assert_eq!(store.fridge_items()[0].category(), Category::Freezer);
    assert_eq!(store.fridge_items()[0].id(), carrot.id());
    assert_eq!(
        notices.messages(),
        vec!["'Carrot' moved to the Freezer shelf.".to_string()]
    );
    assert!(
        api.calls()
            .contains(&"PATCH /ingredients/7/category freezer".to_string())
    );
}

#[tokio::test]
async fn test_same_shelf_drop_does_nothing() {
    let carrot = common::confirmed("7", "Carrot", Category::Vegetable);
    let api = Arc::new(FakeApi::new().with_fridge(vec![carrot.clone()]));
    let (store, notices) = common::store(api.clone(), true);
    store.load().await;

    let outcome = store
        .move_item(carrot.id(), Zone::Vegetable, Residence::Fridge)
        .await;

    assert_eq!(outcome, None);
    assert_eq!(api.calls(), vec!["GET /workspace".to_string()]);
    assert!(notices.messages().is_empty());
}

#[tokio::test]
async fn test_logged_out_shelf_move_is_local_and_silent() {
    let (store, notices) = common::store(Arc::new(FakeApi::new()), false);
    store.add_item("Carrot", Quantity::ONE, Category::Vegetable).await;
    let id = store.fridge_items()[0].id().clone();

    let outcome = store.move_item(&id, Zone::Other, Residence::Fridge).await;

    assert_eq!(outcome, Some(Outcome::Settled));
    assert_eq!(store.fridge_items()[0].category(), Category::Other);
    assert!(notices.messages().is_empty());
}

// ============================================================================
// move_item: cart <-> fridge
// ============================================================================

#[tokio::test]
async fn test_cart_to_freezer_optimistic_then_confirmed() {
    let milk = common::confirmed("c1", "Milk", Category::Other);
    let gate = Arc::new(Gate::default());
    let api = Arc::new(
        FakeApi::new()
            .with_cart(vec![milk.clone()])
            .gated(gate.clone()),
    );
    let (store, _) = common::store(api.clone(), true);
    store.load().await;

    let pending = tokio::spawn({
        let store = store.clone();
        let id = milk.id().clone();
        async move { store.move_item(&id, Zone::Freezer, Residence::Cart).await }
    });
    gate.entered().await;

    assert!(store.cart_items().is_empty());
    let fridge = store.fridge_items();
    assert_eq!(fridge.len(), 1);
    assert!(fridge[0].is_provisional());
    assert_eq!(fridge[0].category(), Category::Freezer);

    gate.open();
    let outcome = pending.await.unwrap();

    assert!(matches!(outcome, Some(Outcome::Confirmed { .. })));
    assert!(store.cart_items().is_empty());
    let fridge = store.fridge_items();
    assert_eq!(fridge.len(), 1);
    assert!(!fridge[0].is_provisional());
    assert_eq!(fridge[0].category(), Category::Freezer);
    assert_eq!(fridge[0].name(), "Milk");
    assert!(
        api.calls()
            .contains(&"POST /cart/c1/move-to-fridge freezer".to_string())
    );
}

#[tokio::test]
async fn test_cart_item_dropped_on_cart_is_ignored() {
    let milk = common::confirmed("c1", "Milk", Category::Other);
    let api = Arc::new(FakeApi::new().with_cart(vec![milk.clone()]));
    let (store, _) = common::store(api, true);
    store.load().await;

    let outcome = store.move_item(milk.id(), Zone::Cart, Residence::Cart).await;

    assert_eq!(outcome, None);
    assert_eq!(store.cart_items().len(), 1);
}

#[tokio::test]
async fn test_fridge_to_cart_always_announces_the_item() {
    let carrot = common::confirmed("7", "Carrot", Category::Vegetable);
    let api = Arc::new(FakeApi::new().with_fridge(vec![carrot.clone()]));
    api.fail_writes();
    let (store, notices) = common::store(api, true);
    store.load().await;

    let outcome = store.move_item(carrot.id(), Zone::Cart, Residence::Fridge).await;

    assert_eq!(outcome, Some(Outcome::Settled));
    assert!(store.fridge_items().is_empty());
    let cart = store.cart_items();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].name(), "Carrot");
    assert_eq!(cart[0].category(), Category::Vegetable);
    assert_eq!(notices.messages(), vec!["'Carrot' moved to the cart.".to_string()]);
}

#[tokio::test]
async fn test_fridge_to_cart_adopts_the_server_item() {
    let carrot = common::confirmed("7", "Carrot", Category::Vegetable);
    let api = Arc::new(FakeApi::new().with_fridge(vec![carrot.clone()]));
    let (store, _) = common::store(api, true);
    store.load().await;

    store.move_item(carrot.id(), Zone::Cart, Residence::Fridge).await;

    let cart = store.cart_items();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].id(), &ItemId::from(fridgekit_core::ServerId::new("100").unwrap()));
}

#[tokio::test]
async fn test_moving_a_missing_item_is_a_noop() {
    let api = Arc::new(FakeApi::new());
    let (store, notices) = common::store(api.clone(), true);
    let ghost = common::confirmed("404", "Ghost", Category::Other);

    assert_eq!(store.move_item(ghost.id(), Zone::Freezer, Residence::Cart).await, None);
    assert_eq!(store.move_item(ghost.id(), Zone::Cart, Residence::Fridge).await, None);
    assert_eq!(store.move_item(ghost.id(), Zone::Meat, Residence::Fridge).await, None);
    assert!(api.calls().is_empty());
    assert!(notices.messages().is_empty());
}
