//! Contract models for the record store
//!
//! These models are transport-agnostic and shared by the domain, storage and REST layers.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

// ===== Catalog =====

/// A recording (album, single) as published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    pub id: i32,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub subgenre: Option<String>,
    pub release_year: i32,
    pub publisher: String,
    pub media_type: String,
    pub image_url: String,
}

/// Fields for creating or replacing a recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingDraft {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub subgenre: Option<String>,
    pub release_year: i32,
    pub publisher: String,
    pub media_type: String,
    pub image_url: Option<String>,
}

/// Retail price for a recording, independent of any store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: i32,
    pub recording_id: i32,
    pub retail_price: Decimal,
    pub media_type: String,
}

/// Catalog entry together with its recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogListing {
    pub entry: CatalogEntry,
    pub recording: Option<Recording>,
}

// ===== Stores and inventory =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDraft {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Per-store stock and wholesale price for one recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    pub id: i32,
    pub store_id: i32,
    pub recording_id: i32,
    pub wholesale_price: Decimal,
    pub in_stock: i32,
    pub sales_count: i32,
}

/// Admin restock request for one (store, recording) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryUpdate {
    pub wholesale_price: Decimal,
    pub in_stock: i32,
    pub sales_count: Option<i32>,
}

/// Inventory row joined with display data for store pages and reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLine {
    pub row: InventoryRow,
    pub recording: Recording,
    /// `None` when the recording has no catalog entry
    pub retail_price: Option<Decimal>,
}

/// Store together with its stocked recordings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDetails {
    pub store: Store,
    pub inventory: Vec<InventoryLine>,
}

/// Current stock for one recording at a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub recording_id: i32,
    pub in_stock: i32,
}

// ===== Users =====

/// Role of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// User row including the stored password hash; never leaves the domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Identity resolved for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        match self.role {
            Role::Admin => true,
            Role::User => false,
        }
    }
}

/// Issued access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

// ===== Orders =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Orders only ever leave `pending`, and only once
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Completed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }
}

/// One cart line as submitted at checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub recording_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Validated checkout request handed to the order repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: i32,
    pub store_id: i32,
    pub date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub recording_id: i32,
    pub recording_title: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub store_id: i32,
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub items: Vec<OrderItem>,
}

/// How the order transaction treats a line that exceeds the stock on hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockPolicy {
    /// Abort the whole order
    #[default]
    Reject,
    /// Take what is there and leave the row at zero
    Clamp,
}

/// Result of the order transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed(Order),
    /// Nothing was written
    InsufficientStock {
        recording_id: i32,
        requested: i32,
        available: i32,
    },
}

// ===== Groups =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

// ===== Reports =====

/// Summed order quantity for one recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSales {
    pub recording_id: i32,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub total_sales: i64,
}

/// Summed order quantity for one artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistSales {
    pub artist: String,
    pub total_sales: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestsellingArtist {
    pub leader: Option<(ArtistSales, Vec<Recording>)>,
    pub all_artists: Vec<ArtistSales>,
}

/// Out-of-stock entry for a row that exists with zero stock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepletedRecording {
    pub recording: Recording,
    pub sales_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfStockReport {
    pub store: Store,
    pub depleted: Vec<DepletedRecording>,
    pub missing: Vec<Recording>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesLine {
    pub recording_id: i32,
    pub title: String,
    pub artist: String,
    pub sales_count: i32,
    pub retail_price: Decimal,
    pub wholesale_price: Decimal,
    pub retail_sales: Decimal,
    pub wholesale_sales: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSalesReport {
    pub store: Store,
    pub total_retail_sales: Decimal,
    pub total_wholesale_sales: Decimal,
    pub total_profit: Decimal,
    pub lines: Vec<SalesLine>,
}

/// Retail/wholesale spread for one recording at one store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarginEntry {
    pub recording_id: i32,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub retail_price: Decimal,
    pub wholesale_price: Decimal,
    pub margin: Decimal,
    /// `None` when the wholesale price is zero
    pub margin_percentage: Option<Decimal>,
    pub store_id: i32,
    pub store_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarginAnalysis {
    /// Sorted by margin, largest first
    pub entries: Vec<MarginEntry>,
    pub average_margin: Option<Decimal>,
}

impl MarginAnalysis {
    pub fn max(&self) -> Option<&MarginEntry> {
        self.entries.first()
    }
}

/// Inclusive calendar-date window for the admin sales report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingRevenue {
    pub recording_id: i32,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub total_sales: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesReport {
    pub sales: Vec<RecordingRevenue>,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub users: u64,
    pub recordings: u64,
    pub stores: u64,
    pub orders: u64,
}
