//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{
    catalog, group, order_item, recording, store, store_inventory, user, user_order,
};
use crate::contract::{
    CatalogEntry, Group, InventoryRow, Order, OrderItem, OrderStatus, Recording, RecordingDraft,
    Role, Store, StoreDraft, User,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::{NotSet, Set};

/// Default artwork for recordings created without an image
pub const DEFAULT_IMAGE: &str = "default.jpg";

// ===== Money =====

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub fn to_cents(amount: Decimal) -> anyhow::Result<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.round().to_i64())
        .ok_or_else(|| anyhow::anyhow!("amount {} does not fit in cents", amount))
}

// ===== Enum Conversions =====

impl From<user::UserRole> for Role {
    fn from(role: user::UserRole) -> Self {
        match role {
            user::UserRole::User => Role::User,
            user::UserRole::Admin => Role::Admin,
        }
    }
}

impl From<Role> for user::UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => user::UserRole::User,
            Role::Admin => user::UserRole::Admin,
        }
    }
}

impl From<user_order::OrderStatus> for OrderStatus {
    fn from(status: user_order::OrderStatus) -> Self {
        match status {
            user_order::OrderStatus::Pending => OrderStatus::Pending,
            user_order::OrderStatus::Completed => OrderStatus::Completed,
            user_order::OrderStatus::Cancelled => OrderStatus::Cancelled,
        }
    }
}

impl From<OrderStatus> for user_order::OrderStatus {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => user_order::OrderStatus::Pending,
            OrderStatus::Completed => user_order::OrderStatus::Completed,
            OrderStatus::Cancelled => user_order::OrderStatus::Cancelled,
        }
    }
}

// ===== Catalog =====

impl From<recording::Model> for Recording {
    fn from(entity: recording::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            artist: entity.artist,
            genre: entity.genre,
            subgenre: entity.subgenre,
            release_year: entity.release_year,
            publisher: entity.publisher,
            media_type: entity.media_type,
            image_url: entity.image_url,
        }
    }
}

impl From<&RecordingDraft> for recording::ActiveModel {
    fn from(draft: &RecordingDraft) -> Self {
        Self {
            id: NotSet,
            title: Set(draft.title.trim().to_string()),
            artist: Set(draft.artist.trim().to_string()),
            genre: Set(draft.genre.trim().to_string()),
            subgenre: Set(draft
                .subgenre
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)),
            release_year: Set(draft.release_year),
            publisher: Set(draft.publisher.trim().to_string()),
            media_type: Set(draft.media_type.trim().to_string()),
            image_url: Set(draft
                .image_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string())),
        }
    }
}

impl From<catalog::Model> for CatalogEntry {
    fn from(entity: catalog::Model) -> Self {
        Self {
            id: entity.id,
            recording_id: entity.recording_id,
            retail_price: from_cents(entity.retail_price_cents),
            media_type: entity.media_type,
        }
    }
}

// ===== Stores =====

impl From<store::Model> for Store {
    fn from(entity: store::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            address: entity.address,
            phone: entity.phone,
        }
    }
}

impl From<&StoreDraft> for store::ActiveModel {
    fn from(draft: &StoreDraft) -> Self {
        Self {
            id: NotSet,
            name: Set(draft.name.trim().to_string()),
            address: Set(draft.address.trim().to_string()),
            phone: Set(draft.phone.trim().to_string()),
        }
    }
}

impl From<store_inventory::Model> for InventoryRow {
    fn from(entity: store_inventory::Model) -> Self {
        Self {
            id: entity.id,
            store_id: entity.store_id,
            recording_id: entity.recording_id,
            wholesale_price: from_cents(entity.wholesale_price_cents),
            in_stock: entity.in_stock,
            sales_count: entity.sales_count,
        }
    }
}

// ===== Users =====

impl From<user::Model> for User {
    fn from(entity: user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            role: entity.role.into(),
        }
    }
}

// ===== Orders =====

/// Order header with its lines; titles are `None` when unknown
pub fn order_from_entities(
    header: user_order::Model,
    items: Vec<(order_item::Model, Option<String>)>,
) -> Order {
    Order {
        id: header.id,
        user_id: header.user_id,
        store_id: header.store_id,
        date: header.date,
        status: header.status.into(),
        total_amount: from_cents(header.total_amount_cents),
        items: items
            .into_iter()
            .map(|(item, title)| OrderItem {
                id: item.id,
                order_id: item.order_id,
                recording_id: item.recording_id,
                recording_title: title,
                quantity: item.quantity,
                unit_price: from_cents(item.unit_price_cents),
            })
            .collect(),
    }
}

// ===== Groups =====

impl From<group::Model> for Group {
    fn from(entity: group::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_conversion() {
        assert_eq!(to_cents(Decimal::new(1250, 2)).unwrap(), 1250);
        assert_eq!(to_cents(Decimal::new(12, 0)).unwrap(), 1200);
        assert_eq!(from_cents(1999), Decimal::new(1999, 2));
    }

    #[test]
    fn test_cents_overflow_is_an_error() {
        assert!(to_cents(Decimal::MAX).is_err());
        assert!(to_cents(Decimal::from_scientific("5e28").unwrap()).is_err());
    }

    #[test]
    fn test_draft_defaults_image_and_blank_subgenre() {
        let draft = RecordingDraft {
            title: " Nevermind ".to_string(),
            artist: "Nirvana".to_string(),
            genre: "Rock".to_string(),
            subgenre: Some("  ".to_string()),
            release_year: 1991,
            publisher: "DGC".to_string(),
            media_type: "CD".to_string(),
            image_url: None,
        };

        let active: recording::ActiveModel = (&draft).into();

        assert_eq!(active.title, Set("Nevermind".to_string()));
        assert_eq!(active.subgenre, Set(None));
        assert_eq!(active.image_url, Set(DEFAULT_IMAGE.to_string()));
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(Role::from(user::UserRole::from(role)), role);
        }
    }
}
