//! Checkout: stock lookup, order placement and order lifecycle

use super::events::StoreEvent;
use super::service::{internal, Service};
use super::validation;
use crate::contract::{
    CartItem, NewOrder, Order, OrderStatus, PlacementOutcome, Principal, StockLevel, StoreError,
};
use std::collections::HashMap;

impl Service {
    /// Current stock for each requested recording, in request order
    ///
    /// Recordings without an inventory row at the store report zero.
    pub async fn stock_lookup(
        &self,
        store_id: i32,
        recording_ids: &[i32],
    ) -> Result<Vec<StockLevel>, StoreError> {
        let levels: HashMap<i32, i32> = self
            .repos
            .stores
            .stock_levels(store_id, recording_ids)
            .await
            .map_err(internal)?
            .into_iter()
            .map(|level| (level.recording_id, level.in_stock))
            .collect();

        Ok(recording_ids
            .iter()
            .map(|&recording_id| StockLevel {
                recording_id,
                in_stock: levels.get(&recording_id).copied().unwrap_or(0),
            })
            .collect())
    }

    /// Place an order for the principal
    ///
    /// Stock decrement, header and lines are written in one transaction.
    #[tracing::instrument(skip(self, items), fields(user_id = principal.user_id, lines = items.len()))]
    pub async fn place_order(
        &self,
        principal: &Principal,
        store_id: Option<i32>,
        items: Vec<CartItem>,
    ) -> Result<Order, StoreError> {
        let store_id = validation::validate_cart(store_id, &items)?;
        self.require_store(store_id).await?;

        let new_order = NewOrder {
            user_id: principal.user_id,
            store_id,
            date: chrono::Utc::now(),
            total_amount: validation::cart_total(&items)?,
            items,
        };

        let outcome = self
            .repos
            .orders
            .place(&new_order, self.stock_policy)
            .await
            .map_err(internal)?;

        match outcome {
            PlacementOutcome::Placed(order) => {
                tracing::info!(
                    order_id = order.id,
                    store_id,
                    total = %order.total_amount,
                    "Order placed"
                );
                self.publish(StoreEvent::order_placed(&order)).await;
                Ok(order)
            }
            PlacementOutcome::InsufficientStock {
                recording_id,
                requested,
                available,
            } => {
                tracing::warn!(
                    store_id,
                    recording_id,
                    requested,
                    available,
                    "Order rejected for insufficient stock"
                );
                Err(StoreError::InsufficientStock {
                    recording_id,
                    requested,
                    available,
                })
            }
        }
    }

    /// Orders of the principal, newest first
    pub async fn my_orders(&self, principal: &Principal) -> Result<Vec<Order>, StoreError> {
        self.repos
            .orders
            .list_for_user(principal.user_id)
            .await
            .map_err(internal)
    }

    /// Move an order out of `pending`; stock is left untouched
    pub async fn change_order_status(
        &self,
        principal: &Principal,
        order_id: i32,
        status: &str,
    ) -> Result<Order, StoreError> {
        Self::require_admin(principal)?;

        let next = OrderStatus::parse(status).ok_or_else(|| {
            StoreError::validation(format!(
                "status '{}' must be one of pending, completed, cancelled",
                status
            ))
        })?;

        let current = self
            .repos
            .orders
            .find(order_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| StoreError::not_found("order", order_id))?;

        if !current.status.can_transition_to(next) {
            return Err(StoreError::conflict(format!(
                "order {} cannot move from {} to {}",
                order_id,
                current.status.as_str(),
                next.as_str()
            )));
        }

        let updated = self
            .repos
            .orders
            .set_status(order_id, next)
            .await
            .map_err(internal)?
            .ok_or_else(|| StoreError::not_found("order", order_id))?;

        tracing::info!(order_id, status = next.as_str(), "Order status changed");
        self.publish(StoreEvent::status_changed(
            order_id,
            current.status,
            next,
            principal.user_id,
        ))
        .await;
        Ok(updated)
    }
}
