//! Domain events for the record store
//!
//! Events are emitted after the corresponding write has committed:
//! - Order placed at checkout
//! - Order status changed by an administrator
//! - Inventory row restocked by an administrator

use crate::contract::{InventoryRow, Order, OrderStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum StoreEvent {
    OrderPlaced(OrderPlacedEvent),
    OrderStatusChanged(OrderStatusChangedEvent),
    InventoryRestocked(InventoryRestockedEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlacedEvent {
    pub order_id: i32,
    pub user_id: i32,
    pub store_id: i32,
    pub total_amount: Decimal,
    pub line_count: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChangedEvent {
    pub order_id: i32,
    pub from: String,
    pub to: String,
    /// Administrator who made the change
    pub changed_by: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRestockedEvent {
    pub store_id: i32,
    pub recording_id: i32,
    pub in_stock: i32,
    pub changed_by: i32,
    pub timestamp: DateTime<Utc>,
}

/// Event publisher trait for publishing domain events
///
/// Publishing is best effort: the service logs failures and never
/// fails an already committed operation because of them.
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: StoreEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: StoreEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes every event to the `record_store::events` tracing target as JSON
pub struct TracingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: StoreEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(target: "record_store::events", event = %payload, "domain event");
        Ok(())
    }
}

impl StoreEvent {
    pub fn order_placed(order: &Order) -> Self {
        StoreEvent::OrderPlaced(OrderPlacedEvent {
            order_id: order.id,
            user_id: order.user_id,
            store_id: order.store_id,
            total_amount: order.total_amount,
            line_count: order.items.len(),
            timestamp: Utc::now(),
        })
    }

    pub fn status_changed(
        order_id: i32,
        from: OrderStatus,
        to: OrderStatus,
        changed_by: i32,
    ) -> Self {
        StoreEvent::OrderStatusChanged(OrderStatusChangedEvent {
            order_id,
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
            changed_by,
            timestamp: Utc::now(),
        })
    }

    pub fn restocked(row: &InventoryRow, changed_by: i32) -> Self {
        StoreEvent::InventoryRestocked(InventoryRestockedEvent {
            store_id: row.store_id,
            recording_id: row.recording_id,
            in_stock: row.in_stock,
            changed_by,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec2(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn sample_order() -> Order {
        Order {
            id: 7,
            user_id: 3,
            store_id: 1,
            date: Utc::now(),
            status: OrderStatus::Pending,
            total_amount: dec2(3600),
            items: vec![],
        }
    }

    #[test]
    fn test_order_placed_event_creation() {
        let order = sample_order();
        match StoreEvent::order_placed(&order) {
            StoreEvent::OrderPlaced(e) => {
                assert_eq!(e.order_id, 7);
                assert_eq!(e.user_id, 3);
                assert_eq!(e.total_amount, dec2(3600));
                assert_eq!(e.line_count, 0);
            }
            other => panic!("Expected OrderPlaced event, got {:?}", other),
        }
    }

    #[test]
    fn test_status_event_serializes_with_tag() {
        let event = StoreEvent::status_changed(7, OrderStatus::Pending, OrderStatus::Completed, 1);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "order_status_changed");
        assert_eq!(json["from"], "pending");
        assert_eq!(json["to"], "completed");
    }

    #[tokio::test]
    async fn test_publishers_do_not_fail() {
        let event = StoreEvent::order_placed(&sample_order());
        assert!(NoOpEventPublisher.publish(event.clone()).await.is_ok());
        assert!(TracingEventPublisher.publish(event).await.is_ok());
    }
}
