//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.

use crate::contract::{
    ArtistSales, CatalogListing, Group, InventoryLine, InventoryRow, InventoryUpdate, NewOrder,
    NewUser, Order, OrderStatus, PlacementOutcome, Recording, RecordingDraft, RecordingRevenue,
    RecordingSales, Role, StockLevel, StockPolicy, Store, StoreDraft, User, UserCredentials,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Repository for recordings and their catalog entries
#[async_trait]
pub trait RecordingRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Recording>>;

    async fn find(&self, id: i32) -> Result<Option<Recording>>;

    /// Recordings whose genre or subgenre matches, case-insensitive
    async fn find_by_genre(&self, genre: &str) -> Result<Vec<Recording>>;

    async fn find_by_artist(&self, artist: &str) -> Result<Vec<Recording>>;

    /// Create the recording and its catalog entry in one transaction
    async fn create(&self, draft: &RecordingDraft, retail_price: Decimal) -> Result<Recording>;

    /// Replace the recording fields; `retail_price` also updates the catalog entry
    async fn update(
        &self,
        id: i32,
        draft: &RecordingDraft,
        retail_price: Option<Decimal>,
    ) -> Result<Option<Recording>>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: i32) -> Result<bool>;

    /// Whether any order line references the recording
    async fn is_ordered(&self, id: i32) -> Result<bool>;

    async fn list_catalog(&self) -> Result<Vec<CatalogListing>>;

    async fn count(&self) -> Result<u64>;
}

/// Repository for stores and per-store inventory
#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Store>>;

    async fn find(&self, id: i32) -> Result<Option<Store>>;

    async fn create(&self, draft: &StoreDraft) -> Result<Store>;

    async fn update(&self, id: i32, draft: &StoreDraft) -> Result<Option<Store>>;

    async fn delete(&self, id: i32) -> Result<bool>;

    async fn has_orders(&self, id: i32) -> Result<bool>;

    /// Inventory rows of one store with recording and retail price
    async fn inventory(&self, store_id: i32) -> Result<Vec<InventoryLine>>;

    /// Inventory rows of every store, paired with their store
    async fn all_inventory(&self) -> Result<Vec<(Store, InventoryLine)>>;

    /// Stock for the requested recordings; pairs without a row are omitted
    async fn stock_levels(&self, store_id: i32, recording_ids: &[i32]) -> Result<Vec<StockLevel>>;

    /// Insert or replace the (store, recording) inventory row
    async fn upsert_inventory(
        &self,
        store_id: i32,
        recording_id: i32,
        update: &InventoryUpdate,
    ) -> Result<InventoryRow>;

    async fn count(&self) -> Result<u64>;
}

/// Repository for accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find(&self, id: i32) -> Result<Option<User>>;

    /// Look up by username or email
    async fn find_credentials(&self, login: &str) -> Result<Option<UserCredentials>>;

    async fn username_or_email_taken(&self, username: &str, email: &str) -> Result<bool>;

    async fn create(&self, user: &NewUser) -> Result<User>;

    async fn list(&self) -> Result<Vec<User>>;

    async fn set_role(&self, id: i32, role: Role) -> Result<Option<User>>;

    async fn delete(&self, id: i32) -> Result<bool>;

    async fn has_orders(&self, id: i32) -> Result<bool>;

    async fn count(&self) -> Result<u64>;
}

/// Repository for checkout orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Decrement stock, write the header and every line in a single transaction.
    ///
    /// Any error rolls the whole transaction back; so does
    /// [`PlacementOutcome::InsufficientStock`].
    async fn place(&self, order: &NewOrder, policy: StockPolicy) -> Result<PlacementOutcome>;

    /// Orders of one user, newest first, with items
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Order>>;

    async fn find(&self, id: i32) -> Result<Option<Order>>;

    async fn set_status(&self, id: i32, status: OrderStatus) -> Result<Option<Order>>;

    async fn count(&self) -> Result<u64>;
}

/// Aggregation queries over order lines
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Quantity per recording, largest first
    async fn recording_sales(&self, limit: Option<u64>) -> Result<Vec<RecordingSales>>;

    /// Quantity per artist, largest first
    async fn artist_sales(&self) -> Result<Vec<ArtistSales>>;

    /// Quantity and revenue per recording for orders dated in `[from, until)`
    async fn revenue_between(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Result<Vec<RecordingRevenue>>;
}

/// Repository for curated recording groups
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Group>>;

    async fn find(&self, id: i32) -> Result<Option<Group>>;

    async fn create(&self, name: &str, description: Option<&str>) -> Result<Group>;

    /// No-op when the recording is already a member
    async fn add_recording(&self, group_id: i32, recording_id: i32) -> Result<()>;

    async fn recordings(&self, group_id: i32) -> Result<Vec<Recording>>;
}
