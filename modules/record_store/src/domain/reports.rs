//! Sales and inventory reports
//!
//! Quantity aggregations run in SQL; per-store arithmetic over inventory rows
//! happens here in plain functions so it can be tested without a database.

use super::service::{internal, Service};
use crate::contract::{
    BestsellingArtist, DateRange, DepletedRecording, InventoryLine, MarginAnalysis,
    MarginEntry, OutOfStockReport, Principal, Recording, RecordingSales, SalesLine, SalesReport,
    Store, StoreError, StoreSalesReport, StoreStats,
};
use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;

impl Service {
    /// Recordings by summed order quantity, largest first
    pub async fn bestsellers(&self, limit: Option<u64>) -> Result<Vec<RecordingSales>, StoreError> {
        let limit = limit.unwrap_or(self.bestsellers_default_limit);
        self.repos
            .reports
            .recording_sales(Some(limit))
            .await
            .map_err(internal)
    }

    pub async fn bestselling_artist(&self) -> Result<BestsellingArtist, StoreError> {
        let all_artists = self.repos.reports.artist_sales().await.map_err(internal)?;

        let leader = match all_artists.first() {
            Some(top) => {
                let recordings = self
                    .repos
                    .recordings
                    .find_by_artist(&top.artist)
                    .await
                    .map_err(internal)?;
                Some((top.clone(), recordings))
            }
            None => None,
        };

        Ok(BestsellingArtist {
            leader,
            all_artists,
        })
    }

    pub async fn out_of_stock(&self, store_id: i32) -> Result<OutOfStockReport, StoreError> {
        let store = self.require_store(store_id).await?;
        let inventory = self.repos.stores.inventory(store_id).await.map_err(internal)?;
        let recordings = self.repos.recordings.list().await.map_err(internal)?;

        Ok(partition_unavailable(store, &inventory, recordings))
    }

    pub async fn store_total_sales(&self, store_id: i32) -> Result<StoreSalesReport, StoreError> {
        let store = self.require_store(store_id).await?;
        let inventory = self.repos.stores.inventory(store_id).await.map_err(internal)?;

        Ok(total_sales(store, &inventory))
    }

    pub async fn margin_analysis(&self) -> Result<MarginAnalysis, StoreError> {
        let inventory = self.repos.stores.all_inventory().await.map_err(internal)?;
        Ok(analyze_margins(&inventory))
    }

    /// Admin sales report for orders dated within the inclusive range
    pub async fn sales_report(
        &self,
        principal: &Principal,
        range: DateRange,
    ) -> Result<SalesReport, StoreError> {
        Self::require_admin(principal)?;

        if let (Some(from), Some(to)) = (range.from, range.to) {
            if from > to {
                return Err(StoreError::validation("dateFrom must not be after dateTo"));
            }
        }

        let from = range.from.map(start_of_day);
        let until = match range.to {
            Some(to) => Some(start_of_day(to.checked_add_days(Days::new(1)).ok_or_else(
                || StoreError::validation("dateTo is out of range"),
            )?)),
            None => None,
        };

        let sales = self
            .repos
            .reports
            .revenue_between(from, until)
            .await
            .map_err(internal)?;
        let total_revenue = sales.iter().map(|line| line.total_revenue).sum();

        Ok(SalesReport {
            sales,
            total_revenue,
        })
    }

    pub async fn stats(&self, principal: &Principal) -> Result<StoreStats, StoreError> {
        Self::require_admin(principal)?;

        Ok(StoreStats {
            users: self.repos.users.count().await.map_err(internal)?,
            recordings: self.repos.recordings.count().await.map_err(internal)?,
            stores: self.repos.stores.count().await.map_err(internal)?,
            orders: self.repos.orders.count().await.map_err(internal)?,
        })
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Split the unavailable recordings of a store into depleted rows and never-stocked ones
///
/// The two lists are disjoint: a recording with any inventory row never counts as missing.
pub fn partition_unavailable(
    store: Store,
    inventory: &[InventoryLine],
    recordings: Vec<Recording>,
) -> OutOfStockReport {
    let stocked: HashSet<i32> = inventory.iter().map(|line| line.row.recording_id).collect();

    let depleted = inventory
        .iter()
        .filter(|line| line.row.in_stock == 0)
        .map(|line| DepletedRecording {
            recording: line.recording.clone(),
            sales_count: line.row.sales_count,
        })
        .collect();

    let missing = recordings
        .into_iter()
        .filter(|recording| !stocked.contains(&recording.id))
        .collect();

    OutOfStockReport {
        store,
        depleted,
        missing,
    }
}

/// Retail, wholesale and profit totals from the per-row sales counters
pub fn total_sales(store: Store, inventory: &[InventoryLine]) -> StoreSalesReport {
    let lines: Vec<SalesLine> = inventory
        .iter()
        .map(|line| {
            let count = Decimal::from(line.row.sales_count);
            let retail_price = line.retail_price.unwrap_or(Decimal::ZERO);
            let retail_sales = count * retail_price;
            let wholesale_sales = count * line.row.wholesale_price;
            SalesLine {
                recording_id: line.recording.id,
                title: line.recording.title.clone(),
                artist: line.recording.artist.clone(),
                sales_count: line.row.sales_count,
                retail_price,
                wholesale_price: line.row.wholesale_price,
                retail_sales,
                wholesale_sales,
                profit: retail_sales - wholesale_sales,
            }
        })
        .collect();

    StoreSalesReport {
        store,
        total_retail_sales: lines.iter().map(|l| l.retail_sales).sum(),
        total_wholesale_sales: lines.iter().map(|l| l.wholesale_sales).sum(),
        total_profit: lines.iter().map(|l| l.profit).sum(),
        lines,
    }
}

/// Margin for every (recording, store) pair that has a retail price
pub fn analyze_margins(inventory: &[(Store, InventoryLine)]) -> MarginAnalysis {
    let mut entries: Vec<MarginEntry> = inventory
        .iter()
        .filter_map(|(store, line)| {
            let retail_price = line.retail_price?;
            let wholesale_price = line.row.wholesale_price;
            let margin = retail_price - wholesale_price;
            let margin_percentage = (!wholesale_price.is_zero())
                .then(|| (margin / wholesale_price * Decimal::ONE_HUNDRED).round_dp(2));

            Some(MarginEntry {
                recording_id: line.recording.id,
                title: line.recording.title.clone(),
                artist: line.recording.artist.clone(),
                genre: line.recording.genre.clone(),
                retail_price,
                wholesale_price,
                margin,
                margin_percentage,
                store_id: store.id,
                store_name: store.name.clone(),
            })
        })
        .collect();

    // Stable: equal margins keep inventory order
    entries.sort_by(|a, b| b.margin.cmp(&a.margin));

    let average_margin = if entries.is_empty() {
        None
    } else {
        let sum: Decimal = entries.iter().map(|e| e.margin).sum();
        Some((sum / Decimal::from(entries.len())).round_dp(2))
    };

    MarginAnalysis {
        entries,
        average_margin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::InventoryRow;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn store(id: i32, name: &str) -> Store {
        Store {
            id,
            name: name.to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn recording(id: i32, title: &str) -> Recording {
        Recording {
            id,
            title: title.to_string(),
            artist: "Artist".to_string(),
            genre: "Rock".to_string(),
            subgenre: None,
            release_year: 1980,
            publisher: "Label".to_string(),
            media_type: "CD".to_string(),
            image_url: "default.jpg".to_string(),
        }
    }

    fn line(
        recording_id: i32,
        in_stock: i32,
        sales_count: i32,
        wholesale: i64,
        retail: Option<i64>,
    ) -> InventoryLine {
        InventoryLine {
            row: InventoryRow {
                id: recording_id,
                store_id: 1,
                recording_id,
                wholesale_price: dec(wholesale),
                in_stock,
                sales_count,
            },
            recording: recording(recording_id, &format!("Title {}", recording_id)),
            retail_price: retail.map(dec),
        }
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let inventory = vec![line(1, 3, 0, 800, Some(1200)), line(2, 0, 7, 800, Some(1200))];
        let recordings = (1..=4).map(|id| recording(id, "t")).collect();

        let report = partition_unavailable(store(1, "Central"), &inventory, recordings);

        let depleted: Vec<i32> = report.depleted.iter().map(|d| d.recording.id).collect();
        let missing: Vec<i32> = report.missing.iter().map(|r| r.id).collect();
        assert_eq!(depleted, vec![2]);
        assert_eq!(report.depleted[0].sales_count, 7);
        assert_eq!(missing, vec![3, 4]);
    }

    #[test]
    fn test_total_sales_uses_zero_retail_without_catalog_entry() {
        let inventory = vec![line(1, 5, 10, 800, Some(1200)), line(2, 5, 4, 500, None)];

        let report = total_sales(store(1, "Central"), &inventory);

        assert_eq!(report.lines[0].retail_sales, dec(12000));
        assert_eq!(report.lines[0].profit, dec(4000));
        assert_eq!(report.lines[1].retail_sales, Decimal::ZERO);
        assert_eq!(report.lines[1].profit, dec(-2000));
        assert_eq!(report.total_retail_sales, dec(12000));
        assert_eq!(report.total_wholesale_sales, dec(10000));
        assert_eq!(report.total_profit, dec(2000));
    }

    #[test]
    fn test_margins_sorted_with_average() {
        let inventory = vec![
            (store(1, "Central"), line(1, 1, 0, 800, Some(1200))),
            (store(2, "World"), line(2, 1, 0, 600, Some(1500))),
            (store(2, "World"), line(3, 1, 0, 100, None)),
        ];

        let analysis = analyze_margins(&inventory);

        assert_eq!(analysis.entries.len(), 2);
        let max = analysis.max().unwrap();
        assert_eq!(max.recording_id, 2);
        assert_eq!(max.store_name, "World");
        assert_eq!(max.margin, dec(900));
        assert_eq!(max.margin_percentage, Some(Decimal::new(150, 0)));
        assert_eq!(analysis.average_margin, Some(dec(650)));
    }

    #[test]
    fn test_zero_wholesale_has_no_percentage() {
        let inventory = vec![(store(1, "Central"), line(1, 1, 0, 0, Some(1000)))];

        let analysis = analyze_margins(&inventory);

        assert_eq!(analysis.entries[0].margin, dec(1000));
        assert_eq!(analysis.entries[0].margin_percentage, None);
    }

    #[test]
    fn test_no_pairs_means_no_average() {
        let analysis = analyze_margins(&[]);
        assert!(analysis.max().is_none());
        assert_eq!(analysis.average_margin, None);
    }
}
