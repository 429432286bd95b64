//! Drag gestures ending on zone containers.

use std::sync::Arc;

use fridgekit_client::{DragPayload, DragSession, DropIndicator, DropResult, Point, ZoneContainer};
use fridgekit_core::Entity;
use fridgekit_inventory::{Category, Outcome, Residence, Zone};

use crate::common::{self, FakeApi};

fn drag_to(session: &mut DragSession, payload: DragPayload, zone: Zone) {
    session.pointer_down(payload, Point::new(10.0, 10.0));
    session.pointer_move(Point::new(60.0, 80.0));
    session.enter_zone(zone);
}

#[tokio::test]
async fn test_meat_dropped_on_vegetables_is_refused() {
    let steak = common::confirmed("8", "Steak", Category::Meat);
    let api = Arc::new(FakeApi::new().with_fridge(vec![steak.clone()]));
    let (store, _) = common::store(api.clone(), true);
    store.load().await;
    let vegetables = ZoneContainer::shelf(Category::Vegetable);

    let mut session = DragSession::new();
    drag_to(
        &mut session,
        DragPayload::from_item(&steak, Residence::Fridge),
        Zone::Vegetable,
    );
    assert_eq!(vegetables.indicator(&session), DropIndicator::NotDroppable);

    let (payload, zone) = session.finish().unwrap();
    assert_eq!(zone, Some(Zone::Vegetable));
    assert_eq!(vegetables.accept_drop(&payload, &store).await, DropResult::Refused);

    assert_eq!(store.fridge_items()[0].category(), Category::Meat);
    assert_eq!(api.calls(), vec!["GET /workspace".to_string()]);
}

#[tokio::test]
async fn test_meat_dropped_in_freezer_moves() {
    let steak = common::confirmed("8", "Steak", Category::Meat);
    let api = Arc::new(FakeApi::new().with_fridge(vec![steak.clone()]));
    let (store, _) = common::store(api, true);
    store.load().await;
    let freezer = ZoneContainer::shelf(Category::Freezer);

    let mut session = DragSession::new();
    drag_to(
        &mut session,
        DragPayload::from_item(&steak, Residence::Fridge),
        Zone::Freezer,
    );
    assert_eq!(freezer.indicator(&session), DropIndicator::Droppable);
    let (payload, _) = session.finish().unwrap();

    let result = freezer.accept_drop(&payload, &store).await;

    assert_eq!(result, DropResult::Moved(Some(Outcome::Settled)));
    assert_eq!(store.fridge_items()[0].category(), Category::Freezer);
    assert_eq!(store.fridge_items()[0].id(), steak.id());
}

#[tokio::test]
async fn test_cart_takes_fridge_items_but_not_its_own() {
    let steak = common::confirmed("8", "Steak", Category::Meat);
    let api = Arc::new(FakeApi::new().with_fridge(vec![steak.clone()]));
    let (store, notices) = common::store(api, true);
    store.load().await;
    let cart = ZoneContainer::cart();

    let payload = DragPayload::from_item(&steak, Residence::Fridge);
    let result = cart.accept_drop(&payload, &store).await;
    assert!(matches!(result, DropResult::Moved(Some(Outcome::Confirmed { .. }))));
    assert_eq!(notices.messages(), vec!["'Steak' moved to the cart.".to_string()]);

    let in_cart = store.cart_items()[0].clone();
    let payload = DragPayload::from_item(&in_cart, Residence::Cart);
    assert_eq!(cart.accept_drop(&payload, &store).await, DropResult::Refused);
    assert_eq!(store.cart_items().len(), 1);
}

#[tokio::test]
async fn test_cart_item_goes_back_onto_its_own_shelf() {
    let leek = common::confirmed("c1", "Leek", Category::Vegetable);
    let api = Arc::new(FakeApi::new().with_cart(vec![leek.clone()]));
    let (store, _) = common::store(api, true);
    store.load().await;

    let payload = DragPayload::from_item(&leek, Residence::Cart);
    assert_eq!(
        ZoneContainer::shelf(Category::Meat)
            .accept_drop(&payload, &store)
            .await,
        DropResult::Refused
    );

    let result = ZoneContainer::shelf(Category::Vegetable)
        .accept_drop(&payload, &store)
        .await;

    assert!(matches!(result, DropResult::Moved(Some(Outcome::Confirmed { .. }))));
    assert!(store.cart_items().is_empty());
    assert_eq!(store.fridge_items()[0].category(), Category::Vegetable);
}
