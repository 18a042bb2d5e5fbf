//! Route registration for the record store REST API

use super::extract::SessionCookie;
use super::{handlers, openapi};
use crate::domain::Service;
use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the router with every REST endpoint
pub fn router(service: Arc<Service>, cookie: SessionCookie) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/openapi.json", get(openapi::openapi_json))
        // Auth
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/me", get(handlers::me))
        // Catalog
        .route(
            "/api/recordings",
            get(handlers::list_recordings).post(handlers::create_recording),
        )
        .route("/api/recordings/bestsellers", get(handlers::bestsellers))
        .route("/api/recordings/max-margin", get(handlers::max_margin))
        .route(
            "/api/recordings/genre/{genre}",
            get(handlers::recordings_by_genre),
        )
        .route(
            "/api/recordings/{id}",
            get(handlers::get_recording)
                .put(handlers::update_recording)
                .delete(handlers::delete_recording),
        )
        .route("/api/catalog", get(handlers::list_catalog))
        .route("/api/artists/bestselling", get(handlers::bestselling_artist))
        // Stores
        .route(
            "/api/stores",
            get(handlers::list_stores).post(handlers::create_store),
        )
        .route(
            "/api/stores/{id}",
            get(handlers::get_store)
                .put(handlers::update_store)
                .delete(handlers::delete_store),
        )
        .route(
            "/api/stores/{id}/out-of-stock",
            get(handlers::out_of_stock),
        )
        .route("/api/stores/{id}/total-sales", get(handlers::total_sales))
        .route(
            "/api/stores/{id}/inventory/{recording_id}",
            put(handlers::restock),
        )
        // Checkout
        .route("/api/store-inventory", post(handlers::stock_lookup))
        .route("/api/orders", post(handlers::place_order))
        .route("/api/admin/orders/{id}/status", put(handlers::change_order_status))
        .route("/api/my-orders", get(handlers::my_orders))
        .route("/api/analysis/max-margin", get(handlers::margin_summary))
        // Groups
        .route(
            "/api/groups",
            get(handlers::list_groups).post(handlers::create_group),
        )
        .route(
            "/api/groups/{id}/recordings",
            get(handlers::group_recordings).post(handlers::add_group_recording),
        )
        // Admin
        .route("/api/admin/users", get(handlers::list_users))
        .route(
            "/api/admin/users/{id}",
            delete(handlers::delete_user),
        )
        .route("/api/admin/users/{id}/role", put(handlers::change_user_role))
        .route("/api/admin/stats", get(handlers::stats))
        .route("/api/admin/reports/sales", get(handlers::sales_report))
        .layer(Extension(service))
        .layer(Extension(cookie))
        .layer(TraceLayer::new_for_http())
}
