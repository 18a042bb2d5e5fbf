//! HTTP request handlers - thin layer that delegates to domain service

use super::dto::*;
use super::error::Problem;
use super::extract::{AdminOnly, Authenticated, JsonBody, QueryParams, SessionCookie};
use crate::contract::{CartItem, DateRange};
use crate::domain::validation::parse_report_date;
use crate::domain::Service;
use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

type ApiResult<T> = Result<T, Problem>;

// ===== Recording Handlers =====

pub async fn list_recordings(
    Extension(service): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<RecordingDto>>> {
    let recordings = service.list_recordings().await?;
    Ok(Json(recordings.into_iter().map(Into::into).collect()))
}

pub async fn get_recording(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<RecordingDto>> {
    Ok(Json(service.get_recording(id).await?.into()))
}

pub async fn recordings_by_genre(
    Extension(service): Extension<Arc<Service>>,
    Path(genre): Path<String>,
) -> ApiResult<Json<Vec<RecordingDto>>> {
    let recordings = service.recordings_by_genre(&genre).await?;
    Ok(Json(recordings.into_iter().map(Into::into).collect()))
}

pub async fn create_recording(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    JsonBody(req): JsonBody<RecordingRequest>,
) -> ApiResult<(StatusCode, Json<RecordingDto>)> {
    let (draft, retail_price) = req.into_parts();
    let recording = service
        .create_recording(&principal, draft, retail_price)
        .await?;
    Ok((StatusCode::CREATED, Json(recording.into())))
}

pub async fn update_recording(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    Path(id): Path<i32>,
    JsonBody(req): JsonBody<RecordingRequest>,
) -> ApiResult<Json<RecordingDto>> {
    let (draft, retail_price) = req.into_parts();
    let recording = service
        .update_recording(&principal, id, draft, retail_price)
        .await?;
    Ok(Json(recording.into()))
}

pub async fn delete_recording(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    service.delete_recording(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_catalog(
    Extension(service): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<CatalogEntryDto>>> {
    let catalog = service.list_catalog().await?;
    Ok(Json(catalog.into_iter().map(Into::into).collect()))
}

// ===== Store Handlers =====

pub async fn list_stores(
    Extension(service): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<StoreDto>>> {
    let stores = service.list_stores().await?;
    Ok(Json(stores.into_iter().map(Into::into).collect()))
}

pub async fn get_store(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<StoreDetailsDto>> {
    Ok(Json(service.get_store_details(id).await?.into()))
}

pub async fn create_store(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    JsonBody(req): JsonBody<StoreRequest>,
) -> ApiResult<(StatusCode, Json<StoreDto>)> {
    let store = service.create_store(&principal, req.into()).await?;
    Ok((StatusCode::CREATED, Json(store.into())))
}

pub async fn update_store(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    Path(id): Path<i32>,
    JsonBody(req): JsonBody<StoreRequest>,
) -> ApiResult<Json<StoreDto>> {
    let store = service.update_store(&principal, id, req.into()).await?;
    Ok(Json(store.into()))
}

pub async fn delete_store(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    service.delete_store(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn restock(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    Path((store_id, recording_id)): Path<(i32, i32)>,
    JsonBody(req): JsonBody<RestockRequest>,
) -> ApiResult<Json<InventoryRowDto>> {
    let row = service
        .restock(&principal, store_id, recording_id, req.into())
        .await?;
    Ok(Json(row.into()))
}

// ===== Checkout Handlers =====

/// Current stock for a list of recordings at one store
#[utoipa::path(
    post,
    path = "/api/store-inventory",
    request_body = StockLookupRequest,
    responses(
        (status = 200, description = "Stock per recording, in request order", body = [StockLevelDto]),
        (status = 400, description = "Malformed request", body = Problem)
    ),
    tag = "checkout"
)]
pub async fn stock_lookup(
    Extension(service): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<StockLookupRequest>,
) -> ApiResult<Json<Vec<StockLevelDto>>> {
    let levels = service
        .stock_lookup(req.store_id, &req.recording_ids)
        .await?;
    Ok(Json(levels.into_iter().map(Into::into).collect()))
}

/// Place an order; stock, header and lines are written atomically
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderPlacedResponse),
        (status = 400, description = "Empty cart, missing store or invalid line", body = Problem),
        (status = 401, description = "Not authenticated", body = Problem),
        (status = 404, description = "Unknown store", body = Problem),
        (status = 409, description = "Insufficient stock", body = Problem),
        (status = 500, description = "Transaction failed and was rolled back", body = Problem)
    ),
    tag = "checkout"
)]
pub async fn place_order(
    Extension(service): Extension<Arc<Service>>,
    Authenticated(principal): Authenticated,
    JsonBody(req): JsonBody<PlaceOrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderPlacedResponse>)> {
    let items: Vec<CartItem> = req.items.into_iter().map(Into::into).collect();
    let order = service.place_order(&principal, req.store_id, items).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderPlacedResponse {
            message: "Order placed successfully".to_string(),
            order_id: order.id,
        }),
    ))
}

pub async fn my_orders(
    Extension(service): Extension<Arc<Service>>,
    Authenticated(principal): Authenticated,
) -> ApiResult<Json<Vec<OrderDto>>> {
    let orders = service.my_orders(&principal).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

pub async fn change_order_status(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    Path(id): Path<i32>,
    JsonBody(req): JsonBody<OrderStatusRequest>,
) -> ApiResult<Json<OrderDto>> {
    let order = service
        .change_order_status(&principal, id, &req.status)
        .await?;
    Ok(Json(order.into()))
}

// ===== Report Handlers =====

#[derive(Debug, Deserialize)]
pub struct BestsellersQuery {
    pub limit: Option<u64>,
}

/// Recordings ranked by summed order quantity
#[utoipa::path(
    get,
    path = "/api/recordings/bestsellers",
    params(("limit" = Option<u64>, Query, description = "Maximum number of recordings")),
    responses((status = 200, description = "Bestsellers, largest first", body = BestsellersResponse)),
    tag = "reports"
)]
pub async fn bestsellers(
    Extension(service): Extension<Arc<Service>>,
    QueryParams(query): QueryParams<BestsellersQuery>,
) -> ApiResult<Json<BestsellersResponse>> {
    let sales = service.bestsellers(query.limit).await?;
    Ok(Json(BestsellersResponse {
        bestsellers: sales.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/artists/bestselling",
    responses((status = 200, description = "Top artist and every artist by sales", body = BestsellingArtistResponse)),
    tag = "reports"
)]
pub async fn bestselling_artist(
    Extension(service): Extension<Arc<Service>>,
) -> ApiResult<Json<BestsellingArtistResponse>> {
    Ok(Json(service.bestselling_artist().await?.into()))
}

#[utoipa::path(
    get,
    path = "/api/stores/{id}/out-of-stock",
    params(("id" = i32, Path, description = "Store id")),
    responses(
        (status = 200, description = "Depleted and never-stocked recordings", body = OutOfStockResponse),
        (status = 404, description = "Unknown store", body = Problem)
    ),
    tag = "reports"
)]
pub async fn out_of_stock(
    Extension(service): Extension<Arc<Service>>,
    Path(store_id): Path<i32>,
) -> ApiResult<Json<OutOfStockResponse>> {
    Ok(Json(service.out_of_stock(store_id).await?.into()))
}

#[utoipa::path(
    get,
    path = "/api/stores/{id}/total-sales",
    params(("id" = i32, Path, description = "Store id")),
    responses(
        (status = 200, description = "Per-recording sales and store totals", body = TotalSalesResponse),
        (status = 404, description = "Unknown store", body = Problem)
    ),
    tag = "reports"
)]
pub async fn total_sales(
    Extension(service): Extension<Arc<Service>>,
    Path(store_id): Path<i32>,
) -> ApiResult<Json<TotalSalesResponse>> {
    Ok(Json(service.store_total_sales(store_id).await?.into()))
}

#[utoipa::path(
    get,
    path = "/api/recordings/max-margin",
    responses((status = 200, description = "Margins across stores", body = MaxMarginResponse)),
    tag = "reports"
)]
pub async fn max_margin(
    Extension(service): Extension<Arc<Service>>,
) -> ApiResult<Json<MaxMarginResponse>> {
    Ok(Json(service.margin_analysis().await?.into()))
}

pub async fn margin_summary(
    Extension(service): Extension<Arc<Service>>,
    Authenticated(_principal): Authenticated,
) -> ApiResult<Json<MarginSummaryResponse>> {
    Ok(Json(service.margin_analysis().await?.into()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Admin sales report for an inclusive `YYYY-MM-DD` range
#[utoipa::path(
    get,
    path = "/api/admin/reports/sales",
    params(
        ("dateFrom" = Option<String>, Query, description = "First day, YYYY-MM-DD"),
        ("dateTo" = Option<String>, Query, description = "Last day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Quantity and revenue per recording", body = SalesReportResponse),
        (status = 400, description = "Malformed date", body = Problem),
        (status = 401, description = "Not authenticated", body = Problem),
        (status = 403, description = "Not an administrator", body = Problem)
    ),
    tag = "admin"
)]
pub async fn sales_report(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    QueryParams(query): QueryParams<SalesReportQuery>,
) -> ApiResult<Json<SalesReportResponse>> {
    let from = query
        .date_from
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(|value| parse_report_date("dateFrom", value))
        .transpose()?;
    let to = query
        .date_to
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(|value| parse_report_date("dateTo", value))
        .transpose()?;

    let report = service
        .sales_report(&principal, DateRange { from, to })
        .await?;
    Ok(Json(report.into()))
}

// ===== Admin Handlers =====

pub async fn stats(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
) -> ApiResult<Json<StatsResponse>> {
    Ok(Json(service.stats(&principal).await?.into()))
}

pub async fn list_users(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
) -> ApiResult<Json<Vec<UserDto>>> {
    let users = service.list_users(&principal).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

pub async fn change_user_role(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    Path(id): Path<i32>,
    JsonBody(req): JsonBody<RoleRequest>,
) -> ApiResult<Json<UserDto>> {
    let user = service.change_user_role(&principal, id, &req.role).await?;
    Ok(Json(user.into()))
}

pub async fn delete_user(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    Path(id): Path<i32>,
) -> ApiResult<Json<MessageResponse>> {
    service.delete_user(&principal, id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}

// ===== Auth Handlers =====

pub async fn register(
    Extension(service): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let session = service.register(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            message: "Registration successful".to_string(),
            user: session.user.into(),
            token: session.token,
        }),
    ))
}

pub async fn login(
    Extension(service): Extension<Arc<Service>>,
    Extension(cookie): Extension<SessionCookie>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let session = service.login(&req.username, &req.password).await?;
    let set_cookie = cookie.issue(&session.token);

    Ok((
        [(header::SET_COOKIE, set_cookie)],
        Json(SessionResponse {
            message: "Login successful".to_string(),
            user: session.user.into(),
            token: session.token,
        }),
    ))
}

pub async fn logout(Extension(cookie): Extension<SessionCookie>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, cookie.clear())],
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

pub async fn me(
    Extension(service): Extension<Arc<Service>>,
    Authenticated(principal): Authenticated,
) -> ApiResult<Json<MeResponse>> {
    let user = service.me(&principal).await?;
    Ok(Json(MeResponse { user: user.into() }))
}

// ===== Group Handlers =====

pub async fn list_groups(
    Extension(service): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<GroupDto>>> {
    let groups = service.list_groups().await?;
    Ok(Json(groups.into_iter().map(Into::into).collect()))
}

pub async fn create_group(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    JsonBody(req): JsonBody<GroupRequest>,
) -> ApiResult<(StatusCode, Json<GroupDto>)> {
    let group = service
        .create_group(&principal, &req.name, req.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(group.into())))
}

pub async fn add_group_recording(
    Extension(service): Extension<Arc<Service>>,
    AdminOnly(principal): AdminOnly,
    Path(group_id): Path<i32>,
    JsonBody(req): JsonBody<GroupMemberRequest>,
) -> ApiResult<Json<MessageResponse>> {
    service
        .add_recording_to_group(&principal, group_id, req.recording_id)
        .await?;
    Ok(Json(MessageResponse {
        message: "Recording added to group".to_string(),
    }))
}

pub async fn group_recordings(
    Extension(service): Extension<Arc<Service>>,
    Path(group_id): Path<i32>,
) -> ApiResult<Json<Vec<RecordingDto>>> {
    let recordings = service.group_recordings(group_id).await?;
    Ok(Json(recordings.into_iter().map(Into::into).collect()))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
