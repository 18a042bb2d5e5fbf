//! Domain service - business logic orchestration
//!
//! Checkout lives in `checkout.rs`, reports in `reports.rs` and accounts in
//! `accounts.rs`; this file holds the catalog, store and group operations.

use super::auth::TokenCodec;
use super::events::{EventPublisher, StoreEvent};
use super::repository::{
    GroupRepository, OrderRepository, RecordingRepository, ReportRepository, StoreRepository,
    UserRepository,
};
use super::validation;
use crate::config::Config;
use crate::contract::{
    CatalogListing, Group, InventoryRow, InventoryUpdate, Principal, Recording, RecordingDraft,
    StockPolicy, Store, StoreDetails, StoreDraft, StoreError,
};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Storage handles the service depends on
#[derive(Clone)]
pub struct Repositories {
    pub recordings: Arc<dyn RecordingRepository>,
    pub stores: Arc<dyn StoreRepository>,
    pub users: Arc<dyn UserRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub groups: Arc<dyn GroupRepository>,
}

/// Domain service for the record store
pub struct Service {
    pub(super) repos: Repositories,
    pub(super) event_publisher: Arc<dyn EventPublisher>,
    pub(super) tokens: TokenCodec,
    pub(super) stock_policy: StockPolicy,
    pub(super) bestsellers_default_limit: u64,
}

/// Log an infrastructure failure and hide it behind [`StoreError::Internal`]
pub(super) fn internal(error: anyhow::Error) -> StoreError {
    tracing::error!("Storage error: {:?}", error);
    StoreError::Internal
}

impl Service {
    /// Create a new service instance
    pub fn new(
        repos: Repositories,
        event_publisher: Arc<dyn EventPublisher>,
        config: &Config,
    ) -> Self {
        Self {
            repos,
            event_publisher,
            tokens: TokenCodec::new(&config.jwt_secret, config.token_ttl),
            stock_policy: config.stock_policy.into(),
            bestsellers_default_limit: config.bestsellers_default_limit,
        }
    }

    pub(super) async fn publish(&self, event: StoreEvent) {
        if let Err(e) = self.event_publisher.publish(event).await {
            // Log error but don't fail the operation
            tracing::warn!("Failed to publish domain event: {}", e);
        }
    }

    /// Require the administrator role
    pub fn require_admin(principal: &Principal) -> Result<(), StoreError> {
        if principal.is_admin() {
            Ok(())
        } else {
            tracing::warn!(
                user_id = principal.user_id,
                "Administrator action refused for non-admin user"
            );
            Err(StoreError::Forbidden)
        }
    }

    pub(super) async fn require_store(&self, store_id: i32) -> Result<Store, StoreError> {
        self.repos
            .stores
            .find(store_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| StoreError::not_found("store", store_id))
    }

    pub(super) async fn require_recording(&self, recording_id: i32) -> Result<Recording, StoreError> {
        self.repos
            .recordings
            .find(recording_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| StoreError::not_found("recording", recording_id))
    }

    // ===== Recording Operations =====

    pub async fn list_recordings(&self) -> Result<Vec<Recording>, StoreError> {
        self.repos.recordings.list().await.map_err(internal)
    }

    pub async fn get_recording(&self, id: i32) -> Result<Recording, StoreError> {
        self.require_recording(id).await
    }

    pub async fn recordings_by_genre(&self, genre: &str) -> Result<Vec<Recording>, StoreError> {
        self.repos
            .recordings
            .find_by_genre(genre.trim())
            .await
            .map_err(internal)
    }

    pub async fn create_recording(
        &self,
        principal: &Principal,
        draft: RecordingDraft,
        retail_price: Option<Decimal>,
    ) -> Result<Recording, StoreError> {
        Self::require_admin(principal)?;
        validation::validate_recording(&draft)?;
        let retail_price = retail_price.unwrap_or(Decimal::ZERO);
        validation::validate_price("retailPrice", retail_price)?;

        let recording = self
            .repos
            .recordings
            .create(&draft, retail_price)
            .await
            .map_err(internal)?;

        tracing::info!(recording_id = recording.id, title = %recording.title, "Recording created");
        Ok(recording)
    }

    pub async fn update_recording(
        &self,
        principal: &Principal,
        id: i32,
        draft: RecordingDraft,
        retail_price: Option<Decimal>,
    ) -> Result<Recording, StoreError> {
        Self::require_admin(principal)?;
        validation::validate_recording(&draft)?;
        if let Some(price) = retail_price {
            validation::validate_price("retailPrice", price)?;
        }

        self.repos
            .recordings
            .update(id, &draft, retail_price)
            .await
            .map_err(internal)?
            .ok_or_else(|| StoreError::not_found("recording", id))
    }

    pub async fn delete_recording(&self, principal: &Principal, id: i32) -> Result<(), StoreError> {
        Self::require_admin(principal)?;

        if self.repos.recordings.is_ordered(id).await.map_err(internal)? {
            return Err(StoreError::conflict(format!(
                "recording {} appears in orders and cannot be deleted",
                id
            )));
        }

        if !self.repos.recordings.delete(id).await.map_err(internal)? {
            return Err(StoreError::not_found("recording", id));
        }

        tracing::info!(recording_id = id, "Recording deleted");
        Ok(())
    }

    pub async fn list_catalog(&self) -> Result<Vec<CatalogListing>, StoreError> {
        self.repos.recordings.list_catalog().await.map_err(internal)
    }

    // ===== Store Operations =====

    pub async fn list_stores(&self) -> Result<Vec<Store>, StoreError> {
        self.repos.stores.list().await.map_err(internal)
    }

    pub async fn get_store_details(&self, id: i32) -> Result<StoreDetails, StoreError> {
        let store = self.require_store(id).await?;
        let inventory = self.repos.stores.inventory(id).await.map_err(internal)?;
        Ok(StoreDetails { store, inventory })
    }

    pub async fn create_store(
        &self,
        principal: &Principal,
        draft: StoreDraft,
    ) -> Result<Store, StoreError> {
        Self::require_admin(principal)?;
        validation::validate_store(&draft)?;

        let store = self.repos.stores.create(&draft).await.map_err(internal)?;
        tracing::info!(store_id = store.id, name = %store.name, "Store created");
        Ok(store)
    }

    pub async fn update_store(
        &self,
        principal: &Principal,
        id: i32,
        draft: StoreDraft,
    ) -> Result<Store, StoreError> {
        Self::require_admin(principal)?;
        validation::validate_store(&draft)?;

        self.repos
            .stores
            .update(id, &draft)
            .await
            .map_err(internal)?
            .ok_or_else(|| StoreError::not_found("store", id))
    }

    pub async fn delete_store(&self, principal: &Principal, id: i32) -> Result<(), StoreError> {
        Self::require_admin(principal)?;

        if self.repos.stores.has_orders(id).await.map_err(internal)? {
            return Err(StoreError::conflict(format!(
                "store {} has orders and cannot be deleted",
                id
            )));
        }

        if !self.repos.stores.delete(id).await.map_err(internal)? {
            return Err(StoreError::not_found("store", id));
        }

        tracing::info!(store_id = id, "Store deleted");
        Ok(())
    }

    /// Admin restock: set stock and wholesale price for one (store, recording) pair
    pub async fn restock(
        &self,
        principal: &Principal,
        store_id: i32,
        recording_id: i32,
        update: InventoryUpdate,
    ) -> Result<InventoryRow, StoreError> {
        Self::require_admin(principal)?;
        validation::validate_inventory(&update)?;
        self.require_store(store_id).await?;
        self.require_recording(recording_id).await?;

        let row = self
            .repos
            .stores
            .upsert_inventory(store_id, recording_id, &update)
            .await
            .map_err(internal)?;

        tracing::info!(store_id, recording_id, in_stock = row.in_stock, "Inventory restocked");
        self.publish(StoreEvent::restocked(&row, principal.user_id)).await;
        Ok(row)
    }

    // ===== Group Operations =====

    pub async fn list_groups(&self) -> Result<Vec<Group>, StoreError> {
        self.repos.groups.list().await.map_err(internal)
    }

    pub async fn create_group(
        &self,
        principal: &Principal,
        name: &str,
        description: Option<&str>,
    ) -> Result<Group, StoreError> {
        Self::require_admin(principal)?;
        if name.trim().is_empty() {
            return Err(StoreError::validation("name is required"));
        }

        self.repos
            .groups
            .create(name.trim(), description)
            .await
            .map_err(internal)
    }

    pub async fn add_recording_to_group(
        &self,
        principal: &Principal,
        group_id: i32,
        recording_id: i32,
    ) -> Result<(), StoreError> {
        Self::require_admin(principal)?;

        self.repos
            .groups
            .find(group_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| StoreError::not_found("group", group_id))?;
        self.require_recording(recording_id).await?;

        self.repos
            .groups
            .add_recording(group_id, recording_id)
            .await
            .map_err(internal)
    }

    pub async fn group_recordings(&self, group_id: i32) -> Result<Vec<Recording>, StoreError> {
        self.repos
            .groups
            .find(group_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| StoreError::not_found("group", group_id))?;

        self.repos.groups.recordings(group_id).await.map_err(internal)
    }
}
