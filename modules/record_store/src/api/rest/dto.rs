//! REST DTOs with serde derives for HTTP API
//!
//! Field names are camelCase on the wire; money is a JSON number with two decimals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Catalog DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordingDto {
    pub id: i32,
    #[schema(example = "Kind of Blue")]
    pub title: String,
    #[schema(example = "Miles Davis")]
    pub artist: String,
    #[schema(example = "Jazz")]
    pub genre: String,
    pub subgenre: Option<String>,
    #[schema(example = 1959)]
    pub release_year: i32,
    pub publisher: String,
    #[schema(example = "CD")]
    pub media_type: String,
    pub image_url: String,
}

/// Create or replace a recording
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordingRequest {
    pub title: String,
    pub artist: String,
    pub genre: String,
    #[serde(default)]
    pub subgenre: Option<String>,
    pub release_year: i32,
    pub publisher: String,
    pub media_type: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Catalog retail price; defaults to 0 on create, unchanged on update
    #[serde(default)]
    pub retail_price: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryDto {
    pub id: i32,
    pub recording_id: i32,
    pub retail_price: Decimal,
    pub media_type: String,
    pub recording: Option<RecordingDto>,
}

// ===== Store DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreDto {
    pub id: i32,
    #[schema(example = "Central Music Store")]
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRowDto {
    pub id: i32,
    pub store_id: i32,
    pub recording_id: i32,
    pub wholesale_price: Decimal,
    pub in_stock: i32,
    pub sales_count: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLineDto {
    pub id: i32,
    pub recording_id: i32,
    pub wholesale_price: Decimal,
    pub retail_price: Option<Decimal>,
    pub in_stock: i32,
    pub sales_count: i32,
    pub recording: RecordingDto,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreDetailsDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub inventory: Vec<InventoryLineDto>,
}

/// Admin restock of one (store, recording) pair
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestockRequest {
    pub wholesale_price: Decimal,
    pub in_stock: i32,
    #[serde(default)]
    pub sales_count: Option<i32>,
}

// ===== Checkout DTOs =====

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockLookupRequest {
    pub store_id: i32,
    #[serde(default)]
    pub recording_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockLevelDto {
    pub recording_id: i32,
    pub in_stock: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub recording_id: i32,
    pub quantity: i32,
    /// Price shown to the customer; stored as the order-time price
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub store_id: Option<i32>,
    #[serde(default)]
    pub items: Vec<CartItemDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlacedResponse {
    pub message: String,
    pub order_id: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: i32,
    pub recording_id: i32,
    pub title: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i32,
    pub user_id: i32,
    pub store_id: i32,
    pub date: DateTime<Utc>,
    #[schema(example = "pending")]
    pub status: String,
    pub total_amount: Decimal,
    pub items: Vec<OrderItemDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderStatusRequest {
    #[schema(example = "completed")]
    pub status: String,
}

// ===== Report DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordingSalesDto {
    pub recording_id: i32,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub total_sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BestsellersResponse {
    pub bestsellers: Vec<RecordingSalesDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSalesDto {
    pub artist: String,
    pub total_sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BestsellingArtistDto {
    pub artist: String,
    pub total_sales: i64,
    pub recordings: Vec<RecordingDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BestsellingArtistResponse {
    pub bestselling_artist: Option<BestsellingArtistDto>,
    pub all_artists_by_sales: Vec<ArtistSalesDto>,
}

/// Recording that cannot be bought at a store right now
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableRecordingDto {
    pub recording_id: i32,
    pub title: String,
    pub artist: String,
    pub genre: String,
    /// Present for depleted rows only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_count: Option<i32>,
    /// `out_of_stock` or `missing`
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutOfStockResponse {
    pub store_id: i32,
    pub store_name: String,
    pub out_of_stock: Vec<UnavailableRecordingDto>,
    pub missing_completely: Vec<UnavailableRecordingDto>,
    pub all_unavailable: Vec<UnavailableRecordingDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesLineDto {
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

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalSalesResponse {
    pub store_id: i32,
    pub store_name: String,
    pub total_retail_sales: Decimal,
    pub total_wholesale_sales: Decimal,
    pub total_profit: Decimal,
    pub sales_details: Vec<SalesLineDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarginDto {
    pub recording_id: i32,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub retail_price: Decimal,
    pub wholesale_price: Decimal,
    pub margin: Decimal,
    /// `null` when the wholesale price is zero
    pub margin_percentage: Option<Decimal>,
    pub store_id: i32,
    pub store_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaxMarginResponse {
    pub max_margin_recording: Option<MarginDto>,
    pub all_recordings_with_margins: Vec<MarginDto>,
    pub average_margin: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummaryResponse {
    pub max_margin: Option<MarginDto>,
    pub avg_margin: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordingRevenueDto {
    pub recording_id: i32,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub total_sales: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportResponse {
    pub sales: Vec<RecordingRevenueDto>,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatsResponse {
    pub users: u64,
    pub recordings: u64,
    pub stores: u64,
    pub orders: u64,
}

// ===== Account DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "user")]
    pub role: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Login by username or email
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(alias = "email")]
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub message: String,
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RoleRequest {
    #[schema(example = "admin")]
    pub role: String,
}

// ===== Group DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberRequest {
    pub recording_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
