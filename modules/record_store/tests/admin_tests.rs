//! Integration tests for accounts, user administration, stores and groups

mod common;

use common::*;
use record_store::config::BootstrapAdmin;
use record_store::contract::{CartItem, InventoryUpdate, Role, StoreDraft, StoreError};
use record_store::domain::{Registration, StoreEvent};
use record_store::infra::storage::entity::user;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

#[tokio::test]
async fn test_bootstrap_admin_is_idempotent() {
    let ctx = setup().await;

    ctx.service
        .ensure_admin(&BootstrapAdmin {
            username: ADMIN_USERNAME.to_string(),
            email: "admin@example.com".to_string(),
            password: "different".to_string(),
        })
        .await
        .unwrap();

    let admin = ctx.admin().await;
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(ctx.service.list_users(&admin).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_passwords_are_stored_as_argon2_hashes() {
    print_test_header(
        "test_passwords_are_stored_as_argon2_hashes",
        "Stored credentials are salted Argon2id PHC strings that still log in",
    );
    let ctx = setup().await;
    ctx.register("heidi").await;

    for username in ["heidi", ADMIN_USERNAME] {
        let row = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(ctx.db.as_ref())
            .await
            .unwrap()
            .unwrap();
        assert!(
            row.password_hash.starts_with("$argon2id$"),
            "{} has hash {}",
            username,
            row.password_hash
        );
    }

    assert!(ctx.service.login("heidi", "secret").await.is_ok());
    assert!(matches!(
        ctx.service.login("heidi", "Secret").await,
        Err(StoreError::Unauthorized { .. })
    ));
}

#[tokio::test]
async fn test_registration_validation() {
    let ctx = setup().await;

    let err = ctx
        .service
        .register(Registration {
            username: "kim".to_string(),
            email: "not-an-email".to_string(),
            password: "pw".to_string(),
            ..Registration::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));

    let err = ctx
        .service
        .register(Registration::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
}

#[tokio::test]
async fn test_role_changes_take_effect_on_next_request() {
    print_test_header(
        "test_role_changes_take_effect_on_next_request",
        "The role is read from the user row, so a promotion applies to existing tokens",
    );
    let ctx = setup().await;
    let admin = ctx.admin().await;
    let token = ctx.register("promoted").await;
    let before = ctx.service.resolve_principal(&token).await.unwrap();
    assert_eq!(before.role, Role::User);

    let updated = ctx
        .service
        .change_user_role(&admin, before.user_id, "admin")
        .await
        .unwrap();
    assert_eq!(updated.role, Role::Admin);

    let after = ctx.service.resolve_principal(&token).await.unwrap();
    assert!(after.is_admin());

    let err = ctx
        .service
        .change_user_role(&admin, admin.user_id, "user")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));

    let err = ctx
        .service
        .change_user_role(&admin, before.user_id, "superuser")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));

    let err = ctx
        .service
        .change_user_role(&admin, 999, "user")
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::not_found("user", 999));
}

#[tokio::test]
async fn test_delete_user_rules() {
    let ctx = setup().await;
    let admin = ctx.admin().await;
    let idle = ctx.customer("idle").await;
    let buyer = ctx.customer("buyer").await;

    ctx.service
        .place_order(
            &buyer,
            Some(CENTRAL_STORE),
            vec![CartItem {
                recording_id: THRILLER,
                quantity: 1,
                unit_price: Decimal::new(1200, 2),
            }],
        )
        .await
        .unwrap();

    let err = ctx.service.delete_user(&admin, admin.user_id).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));

    let err = ctx.service.delete_user(&admin, buyer.user_id).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));

    ctx.service.delete_user(&admin, idle.user_id).await.unwrap();

    // Tokens of a deleted user stop resolving
    let err = ctx.service.me(&idle).await.unwrap_err();
    assert!(matches!(err, StoreError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_store_lifecycle_and_restock_event() {
    let ctx = setup().await;
    let admin = ctx.admin().await;

    let store = ctx
        .service
        .create_store(
            &admin,
            StoreDraft {
                name: "Groove Station".to_string(),
                address: "9 Beat Blvd".to_string(),
                phone: "555-0177".to_string(),
            },
        )
        .await
        .unwrap();

    let row = ctx
        .service
        .restock(
            &admin,
            store.id,
            THRILLER,
            InventoryUpdate {
                wholesale_price: Decimal::new(790, 2),
                in_stock: 3,
                sales_count: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(row.in_stock, 3);
    assert!(ctx
        .events
        .events()
        .iter()
        .any(|event| matches!(event, StoreEvent::InventoryRestocked(_))));

    let details = ctx.service.get_store_details(store.id).await.unwrap();
    assert_eq!(details.inventory.len(), 1);
    assert_eq!(details.inventory[0].retail_price, Some(Decimal::new(1200, 2)));

    let err = ctx
        .service
        .restock(
            &admin,
            store.id,
            THRILLER,
            InventoryUpdate {
                wholesale_price: Decimal::new(790, 2),
                in_stock: -1,
                sales_count: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));

    ctx.service.delete_store(&admin, store.id).await.unwrap();
    let err = ctx.service.get_store_details(store.id).await.unwrap_err();
    assert_eq!(err, StoreError::not_found("store", store.id));
}

#[tokio::test]
async fn test_store_with_orders_cannot_be_deleted() {
    let ctx = setup().await;
    let admin = ctx.admin().await;
    let buyer = ctx.customer("loyal").await;

    ctx.service
        .place_order(
            &buyer,
            Some(MUSIC_WORLD),
            vec![CartItem {
                recording_id: HIGHWAY_TO_HELL,
                quantity: 1,
                unit_price: Decimal::new(900, 2),
            }],
        )
        .await
        .unwrap();

    let err = ctx.service.delete_store(&admin, MUSIC_WORLD).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));
}

#[tokio::test]
async fn test_groups_collect_recordings() {
    let ctx = setup().await;
    let admin = ctx.admin().await;
    let buyer = ctx.customer("curator").await;

    let err = ctx
        .service
        .create_group(&buyer, "Classics", None)
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::Forbidden);

    let group = ctx
        .service
        .create_group(&admin, "Classics", Some("Essential albums"))
        .await
        .unwrap();

    ctx.service
        .add_recording_to_group(&admin, group.id, ABBEY_ROAD)
        .await
        .unwrap();
    ctx.service
        .add_recording_to_group(&admin, group.id, KIND_OF_BLUE)
        .await
        .unwrap();
    // Adding twice is a no-op
    ctx.service
        .add_recording_to_group(&admin, group.id, ABBEY_ROAD)
        .await
        .unwrap();

    let members: Vec<i32> = ctx
        .service
        .group_recordings(group.id)
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(members, vec![ABBEY_ROAD, KIND_OF_BLUE]);

    let err = ctx
        .service
        .add_recording_to_group(&admin, group.id, 999)
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::not_found("recording", 999));

    assert_eq!(ctx.service.list_groups().await.unwrap().len(), 1);
}
