//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract;

// ===== Catalog conversions =====

impl From<contract::Recording> for RecordingDto {
    fn from(recording: contract::Recording) -> Self {
        Self {
            id: recording.id,
            title: recording.title,
            artist: recording.artist,
            genre: recording.genre,
            subgenre: recording.subgenre,
            release_year: recording.release_year,
            publisher: recording.publisher,
            media_type: recording.media_type,
            image_url: recording.image_url,
        }
    }
}

impl RecordingRequest {
    /// Split into the recording fields and the optional catalog price
    pub fn into_parts(self) -> (contract::RecordingDraft, Option<rust_decimal::Decimal>) {
        let draft = contract::RecordingDraft {
            title: self.title,
            artist: self.artist,
            genre: self.genre,
            subgenre: self.subgenre,
            release_year: self.release_year,
            publisher: self.publisher,
            media_type: self.media_type,
            image_url: self.image_url,
        };
        (draft, self.retail_price)
    }
}

impl From<contract::CatalogListing> for CatalogEntryDto {
    fn from(listing: contract::CatalogListing) -> Self {
        Self {
            id: listing.entry.id,
            recording_id: listing.entry.recording_id,
            retail_price: listing.entry.retail_price,
            media_type: listing.entry.media_type,
            recording: listing.recording.map(Into::into),
        }
    }
}

// ===== Store conversions =====

impl From<contract::Store> for StoreDto {
    fn from(store: contract::Store) -> Self {
        Self {
            id: store.id,
            name: store.name,
            address: store.address,
            phone: store.phone,
        }
    }
}

impl From<StoreRequest> for contract::StoreDraft {
    fn from(req: StoreRequest) -> Self {
        Self {
            name: req.name,
            address: req.address,
            phone: req.phone,
        }
    }
}

impl From<contract::InventoryRow> for InventoryRowDto {
    fn from(row: contract::InventoryRow) -> Self {
        Self {
            id: row.id,
            store_id: row.store_id,
            recording_id: row.recording_id,
            wholesale_price: row.wholesale_price,
            in_stock: row.in_stock,
            sales_count: row.sales_count,
        }
    }
}

impl From<contract::InventoryLine> for InventoryLineDto {
    fn from(line: contract::InventoryLine) -> Self {
        Self {
            id: line.row.id,
            recording_id: line.row.recording_id,
            wholesale_price: line.row.wholesale_price,
            retail_price: line.retail_price,
            in_stock: line.row.in_stock,
            sales_count: line.row.sales_count,
            recording: line.recording.into(),
        }
    }
}

impl From<contract::StoreDetails> for StoreDetailsDto {
    fn from(details: contract::StoreDetails) -> Self {
        Self {
            id: details.store.id,
            name: details.store.name,
            address: details.store.address,
            phone: details.store.phone,
            inventory: details.inventory.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RestockRequest> for contract::InventoryUpdate {
    fn from(req: RestockRequest) -> Self {
        Self {
            wholesale_price: req.wholesale_price,
            in_stock: req.in_stock,
            sales_count: req.sales_count,
        }
    }
}

// ===== Checkout conversions =====

impl From<contract::StockLevel> for StockLevelDto {
    fn from(level: contract::StockLevel) -> Self {
        Self {
            recording_id: level.recording_id,
            in_stock: level.in_stock,
        }
    }
}

impl From<CartItemDto> for contract::CartItem {
    fn from(item: CartItemDto) -> Self {
        Self {
            recording_id: item.recording_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

impl From<contract::Order> for OrderDto {
    fn from(order: contract::Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            store_id: order.store_id,
            date: order.date,
            status: order.status.as_str().to_string(),
            total_amount: order.total_amount,
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemDto {
                    id: item.id,
                    recording_id: item.recording_id,
                    title: item.recording_title,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
        }
    }
}

// ===== Report conversions =====

impl From<contract::RecordingSales> for RecordingSalesDto {
    fn from(sales: contract::RecordingSales) -> Self {
        Self {
            recording_id: sales.recording_id,
            title: sales.title,
            artist: sales.artist,
            genre: sales.genre,
            total_sales: sales.total_sales,
        }
    }
}

impl From<contract::ArtistSales> for ArtistSalesDto {
    fn from(sales: contract::ArtistSales) -> Self {
        Self {
            artist: sales.artist,
            total_sales: sales.total_sales,
        }
    }
}

impl From<contract::BestsellingArtist> for BestsellingArtistResponse {
    fn from(report: contract::BestsellingArtist) -> Self {
        Self {
            bestselling_artist: report.leader.map(|(sales, recordings)| BestsellingArtistDto {
                artist: sales.artist,
                total_sales: sales.total_sales,
                recordings: recordings.into_iter().map(Into::into).collect(),
            }),
            all_artists_by_sales: report.all_artists.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::OutOfStockReport> for OutOfStockResponse {
    fn from(report: contract::OutOfStockReport) -> Self {
        let out_of_stock: Vec<UnavailableRecordingDto> = report
            .depleted
            .into_iter()
            .map(|depleted| UnavailableRecordingDto {
                recording_id: depleted.recording.id,
                title: depleted.recording.title,
                artist: depleted.recording.artist,
                genre: depleted.recording.genre,
                sales_count: Some(depleted.sales_count),
                status: "out_of_stock".to_string(),
            })
            .collect();

        let missing_completely: Vec<UnavailableRecordingDto> = report
            .missing
            .into_iter()
            .map(|recording| UnavailableRecordingDto {
                recording_id: recording.id,
                title: recording.title,
                artist: recording.artist,
                genre: recording.genre,
                sales_count: None,
                status: "missing".to_string(),
            })
            .collect();

        let all_unavailable = out_of_stock
            .iter()
            .chain(missing_completely.iter())
            .cloned()
            .collect();

        Self {
            store_id: report.store.id,
            store_name: report.store.name,
            out_of_stock,
            missing_completely,
            all_unavailable,
        }
    }
}

impl From<contract::StoreSalesReport> for TotalSalesResponse {
    fn from(report: contract::StoreSalesReport) -> Self {
        Self {
            store_id: report.store.id,
            store_name: report.store.name,
            total_retail_sales: report.total_retail_sales,
            total_wholesale_sales: report.total_wholesale_sales,
            total_profit: report.total_profit,
            sales_details: report
                .lines
                .into_iter()
                .map(|line| SalesLineDto {
                    recording_id: line.recording_id,
                    title: line.title,
                    artist: line.artist,
                    sales_count: line.sales_count,
                    retail_price: line.retail_price,
                    wholesale_price: line.wholesale_price,
                    retail_sales: line.retail_sales,
                    wholesale_sales: line.wholesale_sales,
                    profit: line.profit,
                })
                .collect(),
        }
    }
}

impl From<contract::MarginEntry> for MarginDto {
    fn from(entry: contract::MarginEntry) -> Self {
        Self {
            recording_id: entry.recording_id,
            title: entry.title,
            artist: entry.artist,
            genre: entry.genre,
            retail_price: entry.retail_price,
            wholesale_price: entry.wholesale_price,
            margin: entry.margin,
            margin_percentage: entry.margin_percentage,
            store_id: entry.store_id,
            store_name: entry.store_name,
        }
    }
}

impl From<contract::MarginAnalysis> for MaxMarginResponse {
    fn from(analysis: contract::MarginAnalysis) -> Self {
        Self {
            max_margin_recording: analysis.max().cloned().map(Into::into),
            average_margin: analysis.average_margin,
            all_recordings_with_margins: analysis.entries.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::MarginAnalysis> for MarginSummaryResponse {
    fn from(analysis: contract::MarginAnalysis) -> Self {
        Self {
            max_margin: analysis.max().cloned().map(Into::into),
            avg_margin: analysis.average_margin,
        }
    }
}

impl From<contract::SalesReport> for SalesReportResponse {
    fn from(report: contract::SalesReport) -> Self {
        Self {
            sales: report
                .sales
                .into_iter()
                .map(|line| RecordingRevenueDto {
                    recording_id: line.recording_id,
                    title: line.title,
                    artist: line.artist,
                    genre: line.genre,
                    total_sales: line.total_sales,
                    total_revenue: line.total_revenue,
                })
                .collect(),
            total_revenue: report.total_revenue,
        }
    }
}

impl From<contract::StoreStats> for StatsResponse {
    fn from(stats: contract::StoreStats) -> Self {
        Self {
            users: stats.users,
            recordings: stats.recordings,
            stores: stats.stores,
            orders: stats.orders,
        }
    }
}

// ===== Account conversions =====

impl From<contract::User> for UserDto {
    fn from(user: contract::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role.as_str().to_string(),
        }
    }
}

impl From<RegisterRequest> for crate::domain::Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

impl From<contract::Group> for GroupDto {
    fn from(group: contract::Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            description: group.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{DepletedRecording, OutOfStockReport, Recording, Store};

    fn recording(id: i32) -> Recording {
        Recording {
            id,
            title: format!("Title {}", id),
            artist: "Artist".to_string(),
            genre: "Rock".to_string(),
            subgenre: None,
            release_year: 1991,
            publisher: "Label".to_string(),
            media_type: "CD".to_string(),
            image_url: "default.jpg".to_string(),
        }
    }

    #[test]
    fn test_out_of_stock_lists_concatenate() {
        let report = OutOfStockReport {
            store: Store {
                id: 1,
                name: "Central".to_string(),
                address: "1 Main St".to_string(),
                phone: "555".to_string(),
            },
            depleted: vec![DepletedRecording {
                recording: recording(3),
                sales_count: 95,
            }],
            missing: vec![recording(7)],
        };

        let dto = OutOfStockResponse::from(report);

        assert_eq!(dto.store_name, "Central");
        assert_eq!(dto.out_of_stock[0].sales_count, Some(95));
        assert_eq!(dto.missing_completely[0].status, "missing");
        let all: Vec<i32> = dto.all_unavailable.iter().map(|r| r.recording_id).collect();
        assert_eq!(all, vec![3, 7]);
    }

    #[test]
    fn test_dto_field_names_are_camel_case() {
        let json = serde_json::to_value(RecordingDto::from(recording(1))).unwrap();
        assert_eq!(json["releaseYear"], 1991);
        assert_eq!(json["mediaType"], "CD");
        assert_eq!(json["imageUrl"], "default.jpg");
    }
}
