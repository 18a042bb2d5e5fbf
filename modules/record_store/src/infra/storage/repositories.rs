//! SeaORM repository implementations

use crate::contract::{
    ArtistSales, CatalogListing, Group, InventoryLine, InventoryRow, InventoryUpdate, NewOrder,
    NewUser, Order, OrderStatus, PlacementOutcome, Recording, RecordingDraft, RecordingRevenue,
    RecordingSales, Role, StockLevel, StockPolicy, Store, StoreDraft, User, UserCredentials,
};
use crate::domain::repository::{
    GroupRepository, OrderRepository, RecordingRepository, ReportRepository, StoreRepository,
    UserRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::entity::{
    catalog, group, group_recording, order_item, recording, store, store_inventory, user,
    user_order,
};
use super::mapper::{from_cents, order_from_entities, to_cents};

// ===== Recording Repository =====

pub struct SeaOrmRecordingRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmRecordingRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordingRepository for SeaOrmRecordingRepository {
    async fn list(&self) -> Result<Vec<Recording>> {
        let results = recording::Entity::find()
            .order_by_asc(recording::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Recording>> {
        let result = recording::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn find_by_genre(&self, genre: &str) -> Result<Vec<Recording>> {
        let genre = genre.to_lowercase();
        let results = recording::Entity::find()
            .filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(recording::Column::Genre)))
                            .eq(genre.clone()),
                    )
                    .add(Expr::expr(Func::lower(Expr::col(recording::Column::Subgenre))).eq(genre)),
            )
            .order_by_asc(recording::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_by_artist(&self, artist: &str) -> Result<Vec<Recording>> {
        let results = recording::Entity::find()
            .filter(recording::Column::Artist.eq(artist))
            .order_by_asc(recording::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn create(&self, draft: &RecordingDraft, retail_price: Decimal) -> Result<Recording> {
        let txn = self.db.begin().await?;

        let created = recording::ActiveModel::from(draft).insert(&txn).await?;

        catalog::ActiveModel {
            id: NotSet,
            recording_id: Set(created.id),
            retail_price_cents: Set(to_cents(retail_price)?),
            media_type: Set(created.media_type.clone()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(created.into())
    }

    async fn update(
        &self,
        id: i32,
        draft: &RecordingDraft,
        retail_price: Option<Decimal>,
    ) -> Result<Option<Recording>> {
        let txn = self.db.begin().await?;

        if recording::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(None);
        }

        let mut active = recording::ActiveModel::from(draft);
        active.id = Set(id);
        let updated = active.update(&txn).await?;

        let entry = catalog::Entity::find()
            .filter(catalog::Column::RecordingId.eq(id))
            .one(&txn)
            .await?;

        match (entry, retail_price) {
            (Some(entry), price) => {
                let mut active: catalog::ActiveModel = entry.into();
                active.media_type = Set(updated.media_type.clone());
                if let Some(price) = price {
                    active.retail_price_cents = Set(to_cents(price)?);
                }
                active.update(&txn).await?;
            }
            (None, Some(price)) => {
                catalog::ActiveModel {
                    id: NotSet,
                    recording_id: Set(id),
                    retail_price_cents: Set(to_cents(price)?),
                    media_type: Set(updated.media_type.clone()),
                }
                .insert(&txn)
                .await?;
            }
            (None, None) => {}
        }

        txn.commit().await?;
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = recording::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn is_ordered(&self, id: i32) -> Result<bool> {
        let count = order_item::Entity::find()
            .filter(order_item::Column::RecordingId.eq(id))
            .count(&*self.db)
            .await?;
        Ok(count > 0)
    }

    async fn list_catalog(&self) -> Result<Vec<CatalogListing>> {
        let results = catalog::Entity::find()
            .find_also_related(recording::Entity)
            .order_by_asc(catalog::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results
            .into_iter()
            .map(|(entry, recording)| CatalogListing {
                entry: entry.into(),
                recording: recording.map(Into::into),
            })
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(recording::Entity::find().count(&*self.db).await?)
    }
}

// ===== Store Repository =====

pub struct SeaOrmStoreRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmStoreRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Inventory rows joined with recordings and retail prices, ordered by store then recording
    async fn inventory_lines(&self, store_id: Option<i32>) -> Result<Vec<InventoryLine>> {
        let mut query = store_inventory::Entity::find();
        if let Some(store_id) = store_id {
            query = query.filter(store_inventory::Column::StoreId.eq(store_id));
        }

        let rows = query
            .order_by_asc(store_inventory::Column::StoreId)
            .order_by_asc(store_inventory::Column::RecordingId)
            .find_also_related(recording::Entity)
            .all(&*self.db)
            .await?;

        let recording_ids: Vec<i32> = rows.iter().map(|(row, _)| row.recording_id).collect();
        let prices: HashMap<i32, i64> = catalog::Entity::find()
            .filter(catalog::Column::RecordingId.is_in(recording_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|entry| (entry.recording_id, entry.retail_price_cents))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|(row, recording)| {
                let recording = recording?;
                Some(InventoryLine {
                    retail_price: prices.get(&row.recording_id).copied().map(from_cents),
                    row: row.into(),
                    recording: recording.into(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl StoreRepository for SeaOrmStoreRepository {
    async fn list(&self) -> Result<Vec<Store>> {
        let results = store::Entity::find()
            .order_by_asc(store::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Store>> {
        let result = store::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn create(&self, draft: &StoreDraft) -> Result<Store> {
        let created = store::ActiveModel::from(draft).insert(&*self.db).await?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, draft: &StoreDraft) -> Result<Option<Store>> {
        if store::Entity::find_by_id(id).one(&*self.db).await?.is_none() {
            return Ok(None);
        }

        let mut active = store::ActiveModel::from(draft);
        active.id = Set(id);
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = store::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn has_orders(&self, id: i32) -> Result<bool> {
        let count = user_order::Entity::find()
            .filter(user_order::Column::StoreId.eq(id))
            .count(&*self.db)
            .await?;
        Ok(count > 0)
    }

    async fn inventory(&self, store_id: i32) -> Result<Vec<InventoryLine>> {
        self.inventory_lines(Some(store_id)).await
    }

    async fn all_inventory(&self) -> Result<Vec<(Store, InventoryLine)>> {
        let stores: HashMap<i32, Store> = store::Entity::find()
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|model| (model.id, model.into()))
            .collect();

        let lines = self.inventory_lines(None).await?;
        Ok(lines
            .into_iter()
            .filter_map(|line| {
                let store = stores.get(&line.row.store_id)?.clone();
                Some((store, line))
            })
            .collect())
    }

    async fn stock_levels(&self, store_id: i32, recording_ids: &[i32]) -> Result<Vec<StockLevel>> {
        if recording_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = store_inventory::Entity::find()
            .filter(store_inventory::Column::StoreId.eq(store_id))
            .filter(store_inventory::Column::RecordingId.is_in(recording_ids.to_vec()))
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| StockLevel {
                recording_id: row.recording_id,
                in_stock: row.in_stock,
            })
            .collect())
    }

    async fn upsert_inventory(
        &self,
        store_id: i32,
        recording_id: i32,
        update: &InventoryUpdate,
    ) -> Result<InventoryRow> {
        let wholesale_price_cents = to_cents(update.wholesale_price)?;

        let existing = store_inventory::Entity::find()
            .filter(store_inventory::Column::StoreId.eq(store_id))
            .filter(store_inventory::Column::RecordingId.eq(recording_id))
            .one(&*self.db)
            .await?;

        let saved = match existing {
            Some(row) => {
                let mut active: store_inventory::ActiveModel = row.into();
                active.wholesale_price_cents = Set(wholesale_price_cents);
                active.in_stock = Set(update.in_stock);
                if let Some(sales_count) = update.sales_count {
                    active.sales_count = Set(sales_count);
                }
                active.update(&*self.db).await?
            }
            None => {
                store_inventory::ActiveModel {
                    id: NotSet,
                    store_id: Set(store_id),
                    recording_id: Set(recording_id),
                    wholesale_price_cents: Set(wholesale_price_cents),
                    in_stock: Set(update.in_stock),
                    sales_count: Set(update.sales_count.unwrap_or(0)),
                }
                .insert(&*self.db)
                .await?
            }
        };

        Ok(saved.into())
    }

    async fn count(&self) -> Result<u64> {
        Ok(store::Entity::find().count(&*self.db).await?)
    }
}

// ===== User Repository =====

pub struct SeaOrmUserRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find(&self, id: i32) -> Result<Option<User>> {
        let result = user::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn find_credentials(&self, login: &str) -> Result<Option<UserCredentials>> {
        let result = user::Entity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(login))
                    .add(user::Column::Email.eq(login)),
            )
            .order_by_asc(user::Column::Id)
            .one(&*self.db)
            .await?;

        Ok(result.map(|model| UserCredentials {
            password_hash: model.password_hash.clone(),
            user: model.into(),
        }))
    }

    async fn username_or_email_taken(&self, username: &str, email: &str) -> Result<bool> {
        let count = user::Entity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(username))
                    .add(user::Column::Email.eq(email)),
            )
            .count(&*self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User> {
        let created = user::ActiveModel {
            id: NotSet,
            username: Set(new_user.username.clone()),
            email: Set(new_user.email.clone()),
            password_hash: Set(new_user.password_hash.clone()),
            first_name: Set(new_user.first_name.clone()),
            last_name: Set(new_user.last_name.clone()),
            role: Set(new_user.role.into()),
        }
        .insert(&*self.db)
        .await?;

        Ok(created.into())
    }

    async fn list(&self) -> Result<Vec<User>> {
        let results = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn set_role(&self, id: i32, role: Role) -> Result<Option<User>> {
        let Some(existing) = user::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        active.role = Set(role.into());
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = user::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn has_orders(&self, id: i32) -> Result<bool> {
        let count = user_order::Entity::find()
            .filter(user_order::Column::UserId.eq(id))
            .count(&*self.db)
            .await?;
        Ok(count > 0)
    }

    async fn count(&self) -> Result<u64> {
        Ok(user::Entity::find().count(&*self.db).await?)
    }
}

// ===== Order Repository =====

pub struct SeaOrmOrderRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Attach items (with recording titles) to order headers, keeping header order
    async fn with_items<C: ConnectionTrait>(
        conn: &C,
        headers: Vec<user_order::Model>,
    ) -> Result<Vec<Order>> {
        let order_ids: Vec<i32> = headers.iter().map(|h| h.id).collect();

        let mut items: HashMap<i32, Vec<(order_item::Model, Option<String>)>> = HashMap::new();
        let rows = order_item::Entity::find()
            .filter(order_item::Column::OrderId.is_in(order_ids))
            .order_by_asc(order_item::Column::Id)
            .find_also_related(recording::Entity)
            .all(conn)
            .await?;
        for (item, recording) in rows {
            items
                .entry(item.order_id)
                .or_default()
                .push((item, recording.map(|r| r.title)));
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let lines = items.remove(&header.id).unwrap_or_default();
                order_from_entities(header, lines)
            })
            .collect())
    }
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn place(&self, order: &NewOrder, policy: StockPolicy) -> Result<PlacementOutcome> {
        // Dropping the transaction without commit rolls every write back
        let txn = self.db.begin().await?;

        for item in &order.items {
            let decremented = store_inventory::Entity::update_many()
                .col_expr(
                    store_inventory::Column::InStock,
                    Expr::col(store_inventory::Column::InStock).sub(item.quantity),
                )
                .filter(store_inventory::Column::StoreId.eq(order.store_id))
                .filter(store_inventory::Column::RecordingId.eq(item.recording_id))
                .filter(store_inventory::Column::InStock.gte(item.quantity))
                .exec(&txn)
                .await?;

            if decremented.rows_affected > 0 {
                continue;
            }

            let row = store_inventory::Entity::find()
                .filter(store_inventory::Column::StoreId.eq(order.store_id))
                .filter(store_inventory::Column::RecordingId.eq(item.recording_id))
                .one(&txn)
                .await?;

            // No inventory tracked for this pairing
            let Some(row) = row else {
                continue;
            };

            match policy {
                StockPolicy::Reject => {
                    txn.rollback().await?;
                    return Ok(PlacementOutcome::InsufficientStock {
                        recording_id: item.recording_id,
                        requested: item.quantity,
                        available: row.in_stock,
                    });
                }
                StockPolicy::Clamp => {
                    store_inventory::Entity::update_many()
                        .col_expr(store_inventory::Column::InStock, Expr::value(0))
                        .filter(store_inventory::Column::Id.eq(row.id))
                        .exec(&txn)
                        .await?;
                }
            }
        }

        let header = user_order::ActiveModel {
            id: NotSet,
            user_id: Set(order.user_id),
            store_id: Set(order.store_id),
            date: Set(order.date),
            status: Set(user_order::OrderStatus::Pending),
            total_amount_cents: Set(to_cents(order.total_amount)?),
        }
        .insert(&txn)
        .await?;

        for item in &order.items {
            order_item::ActiveModel {
                id: NotSet,
                order_id: Set(header.id),
                recording_id: Set(item.recording_id),
                quantity: Set(item.quantity),
                unit_price_cents: Set(to_cents(item.unit_price)?),
            }
            .insert(&txn)
            .await?;
        }

        let mut placed = Self::with_items(&txn, vec![header]).await?;
        txn.commit().await?;

        placed
            .pop()
            .map(PlacementOutcome::Placed)
            .ok_or_else(|| anyhow::anyhow!("placed order vanished before commit"))
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Order>> {
        let headers = user_order::Entity::find()
            .filter(user_order::Column::UserId.eq(user_id))
            .order_by_desc(user_order::Column::Date)
            .order_by_desc(user_order::Column::Id)
            .all(&*self.db)
            .await?;

        Self::with_items(&*self.db, headers).await
    }

    async fn find(&self, id: i32) -> Result<Option<Order>> {
        let Some(header) = user_order::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        Ok(Self::with_items(&*self.db, vec![header]).await?.pop())
    }

    async fn set_status(&self, id: i32, status: OrderStatus) -> Result<Option<Order>> {
        let Some(header) = user_order::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active: user_order::ActiveModel = header.into();
        active.status = Set(status.into());
        let updated = active.update(&*self.db).await?;

        Ok(Self::with_items(&*self.db, vec![updated]).await?.pop())
    }

    async fn count(&self) -> Result<u64> {
        Ok(user_order::Entity::find().count(&*self.db).await?)
    }
}

// ===== Report Repository =====

#[derive(Debug, FromQueryResult)]
struct RecordingSalesRow {
    recording_id: i32,
    title: String,
    artist: String,
    genre: String,
    total_sales: i64,
}

#[derive(Debug, FromQueryResult)]
struct ArtistSalesRow {
    artist: String,
    total_sales: i64,
}

#[derive(Debug, FromQueryResult)]
struct RevenueRow {
    recording_id: i32,
    title: String,
    artist: String,
    genre: String,
    total_sales: i64,
    total_revenue_cents: i64,
}

const TOTAL_QUANTITY: &str = "CAST(SUM(order_items.quantity) AS BIGINT)";
const TOTAL_REVENUE_CENTS: &str =
    "CAST(SUM(order_items.quantity * order_items.unit_price_cents) AS BIGINT)";

pub struct SeaOrmReportRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmReportRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Order lines of non-cancelled orders joined to their recording and header
    fn sold_lines() -> sea_orm::Select<order_item::Entity> {
        order_item::Entity::find()
            .select_only()
            .join(JoinType::InnerJoin, order_item::Relation::Recording.def())
            .join(JoinType::InnerJoin, order_item::Relation::Order.def())
            .filter(user_order::Column::Status.ne(user_order::OrderStatus::Cancelled))
    }

    fn per_recording(select: sea_orm::Select<order_item::Entity>) -> sea_orm::Select<order_item::Entity> {
        select
            .column_as(recording::Column::Id, "recording_id")
            .column_as(recording::Column::Title, "title")
            .column_as(recording::Column::Artist, "artist")
            .column_as(recording::Column::Genre, "genre")
            .column_as(Expr::cust(TOTAL_QUANTITY), "total_sales")
            .group_by(recording::Column::Id)
            .group_by(recording::Column::Title)
            .group_by(recording::Column::Artist)
            .group_by(recording::Column::Genre)
    }
}

#[async_trait]
impl ReportRepository for SeaOrmReportRepository {
    async fn recording_sales(&self, limit: Option<u64>) -> Result<Vec<RecordingSales>> {
        let mut query = Self::per_recording(Self::sold_lines())
            .order_by_desc(Expr::cust("total_sales"))
            .order_by_asc(recording::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = query
            .into_model::<RecordingSalesRow>()
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| RecordingSales {
                recording_id: row.recording_id,
                title: row.title,
                artist: row.artist,
                genre: row.genre,
                total_sales: row.total_sales,
            })
            .collect())
    }

    async fn artist_sales(&self) -> Result<Vec<ArtistSales>> {
        let rows = Self::sold_lines()
            .column_as(recording::Column::Artist, "artist")
            .column_as(Expr::cust(TOTAL_QUANTITY), "total_sales")
            .group_by(recording::Column::Artist)
            .order_by_desc(Expr::cust("total_sales"))
            .order_by_asc(recording::Column::Artist)
            .into_model::<ArtistSalesRow>()
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ArtistSales {
                artist: row.artist,
                total_sales: row.total_sales,
            })
            .collect())
    }

    async fn revenue_between(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Result<Vec<RecordingRevenue>> {
        let mut query = Self::per_recording(Self::sold_lines())
            .column_as(Expr::cust(TOTAL_REVENUE_CENTS), "total_revenue_cents");
        if let Some(from) = from {
            query = query.filter(user_order::Column::Date.gte(from));
        }
        if let Some(until) = until {
            query = query.filter(user_order::Column::Date.lt(until));
        }

        let rows = query
            .order_by_desc(Expr::cust("total_revenue_cents"))
            .order_by_asc(recording::Column::Id)
            .into_model::<RevenueRow>()
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| RecordingRevenue {
                recording_id: row.recording_id,
                title: row.title,
                artist: row.artist,
                genre: row.genre,
                total_sales: row.total_sales,
                total_revenue: from_cents(row.total_revenue_cents),
            })
            .collect())
    }
}

// ===== Group Repository =====

pub struct SeaOrmGroupRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmGroupRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for SeaOrmGroupRepository {
    async fn list(&self) -> Result<Vec<Group>> {
        let results = group::Entity::find()
            .order_by_asc(group::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Group>> {
        let result = group::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn create(&self, name: &str, description: Option<&str>) -> Result<Group> {
        let created = group::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            description: Set(description.map(str::to_string)),
        }
        .insert(&*self.db)
        .await?;

        Ok(created.into())
    }

    async fn add_recording(&self, group_id: i32, recording_id: i32) -> Result<()> {
        let existing = group_recording::Entity::find_by_id((group_id, recording_id))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        group_recording::Entity::insert(group_recording::ActiveModel {
            group_id: Set(group_id),
            recording_id: Set(recording_id),
        })
        .exec_without_returning(&*self.db)
        .await?;

        Ok(())
    }

    async fn recordings(&self, group_id: i32) -> Result<Vec<Recording>> {
        let results = recording::Entity::find()
            .join(
                JoinType::InnerJoin,
                group_recording::Relation::Recording.def().rev(),
            )
            .filter(group_recording::Column::GroupId.eq(group_id))
            .order_by_asc(recording::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }
}
