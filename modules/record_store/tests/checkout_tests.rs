//! Integration tests for checkout: stock lookup, order placement and order status

mod common;

use common::*;
use record_store::config::StockPolicySetting;
use record_store::contract::{CartItem, InventoryUpdate, OrderStatus, StoreError};
use record_store::domain::StoreEvent;
use rust_decimal::Decimal;
use std::sync::Arc;

fn line(recording_id: i32, quantity: i32, cents: i64) -> CartItem {
    CartItem {
        recording_id,
        quantity,
        unit_price: Decimal::new(cents, 2),
    }
}

async fn stock(ctx: &TestContext, store_id: i32, recording_id: i32) -> i32 {
    ctx.service
        .stock_lookup(store_id, &[recording_id])
        .await
        .unwrap()[0]
        .in_stock
}

#[tokio::test]
async fn test_stock_lookup_keeps_request_order_and_zero_fills() {
    print_test_header(
        "test_stock_lookup_keeps_request_order_and_zero_fills",
        "Unstocked recordings report zero and order follows the request",
    );
    let ctx = setup().await;

    let levels = ctx
        .service
        .stock_lookup(CENTRAL_STORE, &[BACK_IN_BLACK, HIGHWAY_TO_HELL, THRILLER])
        .await
        .unwrap();

    let pairs: Vec<(i32, i32)> = levels.iter().map(|l| (l.recording_id, l.in_stock)).collect();
    assert_eq!(pairs, vec![(BACK_IN_BLACK, 15), (HIGHWAY_TO_HELL, 0), (THRILLER, 25)]);
}

#[tokio::test]
async fn test_place_order_decrements_stock_and_records_lines() {
    print_test_header(
        "test_place_order_decrements_stock_and_records_lines",
        "A placed order writes header, lines and stock together",
    );
    let ctx = setup().await;
    let buyer = ctx.customer("alice").await;

    let order = ctx
        .service
        .place_order(
            &buyer,
            Some(CENTRAL_STORE),
            vec![line(THRILLER, 2, 1200), line(ABBEY_ROAD, 1, 1800)],
        )
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.user_id, buyer.user_id);
    assert_eq!(order.total_amount, Decimal::new(4200, 2));
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].recording_title.as_deref(), Some("Thriller"));

    assert_eq!(stock(&ctx, CENTRAL_STORE, THRILLER).await, 23);
    assert_eq!(stock(&ctx, CENTRAL_STORE, ABBEY_ROAD).await, 9);
    // Other stores are untouched
    assert_eq!(stock(&ctx, MUSIC_WORLD, THRILLER).await, 20);

    let mine = ctx.service.my_orders(&buyer).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, order.id);

    assert!(ctx.events.events().iter().any(|event| matches!(
        event,
        StoreEvent::OrderPlaced(placed) if placed.order_id == order.id && placed.line_count == 2
    )));
}

#[tokio::test]
async fn test_insufficient_stock_rejects_whole_order() {
    print_test_header(
        "test_insufficient_stock_rejects_whole_order",
        "A short line aborts the order and earlier decrements are rolled back",
    );
    let ctx = setup().await;
    let buyer = ctx.customer("bob").await;

    let err = ctx
        .service
        .place_order(
            &buyer,
            Some(CENTRAL_STORE),
            vec![line(THRILLER, 2, 1200), line(BACK_IN_BLACK, 16, 1500)],
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        StoreError::InsufficientStock {
            recording_id: BACK_IN_BLACK,
            requested: 16,
            available: 15,
        }
    );
    assert_eq!(stock(&ctx, CENTRAL_STORE, THRILLER).await, 25);
    assert_eq!(stock(&ctx, CENTRAL_STORE, BACK_IN_BLACK).await, 15);
    assert!(ctx.service.my_orders(&buyer).await.unwrap().is_empty());
    assert!(ctx.events.events().is_empty());
}

#[tokio::test]
async fn test_clamp_policy_floors_stock_at_zero() {
    print_test_header(
        "test_clamp_policy_floors_stock_at_zero",
        "With the clamp policy an oversized line empties the row instead of failing",
    );
    let mut config = test_config();
    config.stock_policy = StockPolicySetting::Clamp;
    let ctx = setup_with(config).await;
    let buyer = ctx.customer("carol").await;

    let order = ctx
        .service
        .place_order(&buyer, Some(CENTRAL_STORE), vec![line(BACK_IN_BLACK, 20, 1500)])
        .await
        .unwrap();

    assert_eq!(order.items[0].quantity, 20);
    assert_eq!(stock(&ctx, CENTRAL_STORE, BACK_IN_BLACK).await, 0);
}

#[tokio::test]
async fn test_line_without_inventory_row_is_still_ordered() {
    print_test_header(
        "test_line_without_inventory_row_is_still_ordered",
        "Recordings a store does not track are ordered without a stock change",
    );
    let ctx = setup().await;
    let buyer = ctx.customer("dave").await;

    let order = ctx
        .service
        .place_order(
            &buyer,
            Some(CENTRAL_STORE),
            vec![line(HIGHWAY_TO_HELL, 1, 900), line(THRILLER, 1, 1200)],
        )
        .await
        .unwrap();

    assert_eq!(order.items.len(), 2);
    assert_eq!(stock(&ctx, CENTRAL_STORE, HIGHWAY_TO_HELL).await, 0);
    assert_eq!(stock(&ctx, CENTRAL_STORE, THRILLER).await, 24);
}

#[tokio::test]
async fn test_storage_failure_rolls_back_decrements() {
    print_test_header(
        "test_storage_failure_rolls_back_decrements",
        "A failing line insert leaves stock exactly as it was",
    );
    let ctx = setup().await;
    let buyer = ctx.customer("erin").await;

    // Unknown recording: no inventory row, then the line insert violates its foreign key
    let err = ctx
        .service
        .place_order(
            &buyer,
            Some(CENTRAL_STORE),
            vec![line(THRILLER, 3, 1200), line(999, 1, 100)],
        )
        .await
        .unwrap_err();

    assert_eq!(err, StoreError::Internal);
    assert_eq!(stock(&ctx, CENTRAL_STORE, THRILLER).await, 25);
    assert!(ctx.service.my_orders(&buyer).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_validation_order() {
    let ctx = setup().await;
    let buyer = ctx.customer("frank").await;

    let err = ctx.service.place_order(&buyer, None, vec![]).await.unwrap_err();
    assert_eq!(err, StoreError::validation("empty cart"));

    let err = ctx
        .service
        .place_order(&buyer, None, vec![line(THRILLER, 1, 1200)])
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::validation("no store selected"));

    let err = ctx
        .service
        .place_order(&buyer, Some(CENTRAL_STORE), vec![line(THRILLER, 0, 1200)])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));

    let err = ctx
        .service
        .place_order(&buyer, Some(99), vec![line(THRILLER, 1, 1200)])
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::not_found("store", 99));
}

#[tokio::test]
async fn test_oversized_prices_are_rejected_without_side_effects() {
    print_test_header(
        "test_oversized_prices_are_rejected_without_side_effects",
        "Huge unit or wholesale prices fail validation instead of overflowing",
    );
    let ctx = setup().await;
    let buyer = ctx.customer("grace").await;
    let huge = Decimal::from_scientific("5e28").unwrap();

    let err = ctx
        .service
        .place_order(
            &buyer,
            Some(CENTRAL_STORE),
            vec![CartItem {
                recording_id: THRILLER,
                quantity: 2,
                unit_price: huge,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
    assert_eq!(stock(&ctx, CENTRAL_STORE, THRILLER).await, 25);
    assert!(ctx.service.my_orders(&buyer).await.unwrap().is_empty());

    let admin = ctx.admin().await;
    let err = ctx
        .service
        .restock(
            &admin,
            CENTRAL_STORE,
            THRILLER,
            InventoryUpdate {
                wholesale_price: huge,
                in_stock: 1,
                sales_count: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
    assert_eq!(stock(&ctx, CENTRAL_STORE, THRILLER).await, 25);
}

#[tokio::test]
async fn test_concurrent_orders_never_oversell() {
    print_test_header(
        "test_concurrent_orders_never_oversell",
        "Two buyers racing for the last units cannot both succeed",
    );
    let ctx = setup().await;
    let first = ctx.customer("gina").await;
    let second = ctx.customer("hank").await;
    let service = Arc::clone(&ctx.service);

    // Kind of Blue has 5 units at the central store
    let (a, b) = tokio::join!(
        service.place_order(&first, Some(CENTRAL_STORE), vec![line(KIND_OF_BLUE, 3, 1100)]),
        service.place_order(&second, Some(CENTRAL_STORE), vec![line(KIND_OF_BLUE, 3, 1100)]),
    );

    let placed = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(placed, 1);
    let failure = a.err().or(b.err()).unwrap();
    assert!(matches!(
        failure,
        StoreError::InsufficientStock { available: 2, .. }
    ));
    assert_eq!(stock(&ctx, CENTRAL_STORE, KIND_OF_BLUE).await, 2);
}

#[tokio::test]
async fn test_order_status_transitions() {
    print_test_header(
        "test_order_status_transitions",
        "Only administrators move orders, and only out of pending",
    );
    let ctx = setup().await;
    let admin = ctx.admin().await;
    let buyer = ctx.customer("ivan").await;

    let order = ctx
        .service
        .place_order(&buyer, Some(CENTRAL_STORE), vec![line(THRILLER, 1, 1200)])
        .await
        .unwrap();

    let err = ctx
        .service
        .change_order_status(&buyer, order.id, "completed")
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::Forbidden);

    let err = ctx
        .service
        .change_order_status(&admin, order.id, "shipped")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));

    let updated = ctx
        .service
        .change_order_status(&admin, order.id, "completed")
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Completed);

    let err = ctx
        .service
        .change_order_status(&admin, order.id, "cancelled")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));

    let err = ctx
        .service
        .change_order_status(&admin, 4242, "completed")
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::not_found("order", 4242));

    assert!(ctx
        .events
        .events()
        .iter()
        .any(|event| matches!(event, StoreEvent::OrderStatusChanged(changed) if changed.to == "completed")));
}
