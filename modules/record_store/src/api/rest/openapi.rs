//! OpenAPI document for the documented endpoints

use super::dto::*;
use super::error::Problem;
use super::handlers;
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Record Store API", description = "Catalog, checkout and sales reporting"),
    paths(
        handlers::stock_lookup,
        handlers::place_order,
        handlers::bestsellers,
        handlers::bestselling_artist,
        handlers::out_of_stock,
        handlers::total_sales,
        handlers::max_margin,
        handlers::sales_report,
    ),
    components(schemas(
        Problem,
        StockLookupRequest,
        StockLevelDto,
        CartItemDto,
        PlaceOrderRequest,
        OrderPlacedResponse,
        RecordingSalesDto,
        BestsellersResponse,
        ArtistSalesDto,
        BestsellingArtistDto,
        BestsellingArtistResponse,
        UnavailableRecordingDto,
        OutOfStockResponse,
        SalesLineDto,
        TotalSalesResponse,
        MarginDto,
        MaxMarginResponse,
        RecordingRevenueDto,
        SalesReportResponse,
    )),
    tags(
        (name = "checkout", description = "Stock lookup and order placement"),
        (name = "reports", description = "Sales and inventory reports"),
        (name = "admin", description = "Administrator-only endpoints")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_checkout_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/orders"));
        assert!(doc.paths.paths.contains_key("/api/store-inventory"));
        assert!(doc.paths.paths.contains_key("/api/admin/reports/sales"));
    }
}
