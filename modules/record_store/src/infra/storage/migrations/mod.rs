//! Database migrations for the record store

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_catalog::Migration),
            Box::new(m20250101_000002_create_stores::Migration),
            Box::new(m20250101_000003_create_orders::Migration),
            Box::new(m20250101_000004_create_groups::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Recordings {
    Table,
    Id,
    Title,
    Artist,
    Genre,
    Subgenre,
    ReleaseYear,
    Publisher,
    MediaType,
    ImageUrl,
}

#[derive(DeriveIden)]
enum Catalog {
    Table,
    Id,
    RecordingId,
    RetailPriceCents,
    MediaType,
}

#[derive(DeriveIden)]
enum Stores {
    Table,
    Id,
    Name,
    Address,
    Phone,
}

#[derive(DeriveIden)]
enum StoreInventory {
    Table,
    Id,
    StoreId,
    RecordingId,
    WholesalePriceCents,
    InStock,
    SalesCount,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Role,
}

#[derive(DeriveIden)]
enum UserOrders {
    Table,
    Id,
    UserId,
    StoreId,
    Date,
    Status,
    TotalAmountCents,
}

#[derive(DeriveIden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    RecordingId,
    Quantity,
    UnitPriceCents,
}

#[derive(DeriveIden)]
enum Groups {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum GroupRecordings {
    Table,
    GroupId,
    RecordingId,
}

fn id_column<T: IntoIden>(iden: T) -> ColumnDef {
    ColumnDef::new(iden)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

mod m20250101_000001_create_catalog {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_catalog"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Recordings::Table)
                        .if_not_exists()
                        .col(id_column(Recordings::Id))
                        .col(ColumnDef::new(Recordings::Title).string().not_null())
                        .col(ColumnDef::new(Recordings::Artist).string().not_null())
                        .col(ColumnDef::new(Recordings::Genre).string().not_null())
                        .col(ColumnDef::new(Recordings::Subgenre).string())
                        .col(ColumnDef::new(Recordings::ReleaseYear).integer().not_null())
                        .col(ColumnDef::new(Recordings::Publisher).string().not_null())
                        .col(ColumnDef::new(Recordings::MediaType).string().not_null())
                        .col(
                            ColumnDef::new(Recordings::ImageUrl)
                                .string()
                                .not_null()
                                .default("default.jpg"),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_recordings_artist")
                        .table(Recordings::Table)
                        .col(Recordings::Artist)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Catalog::Table)
                        .if_not_exists()
                        .col(id_column(Catalog::Id))
                        .col(
                            ColumnDef::new(Catalog::RecordingId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Catalog::RetailPriceCents)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Catalog::MediaType).string().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_catalog_recording")
                                .from(Catalog::Table, Catalog::RecordingId)
                                .to(Recordings::Table, Recordings::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Catalog::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Recordings::Table).to_owned())
                .await
        }
    }
}

mod m20250101_000002_create_stores {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_stores"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Stores::Table)
                        .if_not_exists()
                        .col(id_column(Stores::Id))
                        .col(ColumnDef::new(Stores::Name).string().not_null())
                        .col(ColumnDef::new(Stores::Address).string().not_null())
                        .col(ColumnDef::new(Stores::Phone).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StoreInventory::Table)
                        .if_not_exists()
                        .col(id_column(StoreInventory::Id))
                        .col(ColumnDef::new(StoreInventory::StoreId).integer().not_null())
                        .col(
                            ColumnDef::new(StoreInventory::RecordingId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StoreInventory::WholesalePriceCents)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(StoreInventory::InStock)
                                .integer()
                                .not_null()
                                .default(0)
                                .check(Expr::col(StoreInventory::InStock).gte(0)),
                        )
                        .col(
                            ColumnDef::new(StoreInventory::SalesCount)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_store_inventory_store")
                                .from(StoreInventory::Table, StoreInventory::StoreId)
                                .to(Stores::Table, Stores::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_store_inventory_recording")
                                .from(StoreInventory::Table, StoreInventory::RecordingId)
                                .to(Recordings::Table, Recordings::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // One stock row per recording per store
            manager
                .create_index(
                    Index::create()
                        .name("idx_store_inventory_store_recording")
                        .table(StoreInventory::Table)
                        .col(StoreInventory::StoreId)
                        .col(StoreInventory::RecordingId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StoreInventory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Stores::Table).to_owned())
                .await
        }
    }
}

mod m20250101_000003_create_orders {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_orders"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(id_column(Users::Id))
                        .col(
                            ColumnDef::new(Users::Username)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(
                            ColumnDef::new(Users::FirstName)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Users::LastName)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Users::Role)
                                .string_len(16)
                                .not_null()
                                .default("user"),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UserOrders::Table)
                        .if_not_exists()
                        .col(id_column(UserOrders::Id))
                        .col(ColumnDef::new(UserOrders::UserId).integer().not_null())
                        .col(ColumnDef::new(UserOrders::StoreId).integer().not_null())
                        .col(
                            ColumnDef::new(UserOrders::Date)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(UserOrders::Status)
                                .string_len(16)
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(UserOrders::TotalAmountCents)
                                .big_integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_user_orders_user")
                                .from(UserOrders::Table, UserOrders::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_user_orders_store")
                                .from(UserOrders::Table, UserOrders::StoreId)
                                .to(Stores::Table, Stores::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_user_orders_user")
                        .table(UserOrders::Table)
                        .col(UserOrders::UserId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_user_orders_date")
                        .table(UserOrders::Table)
                        .col(UserOrders::Date)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderItems::Table)
                        .if_not_exists()
                        .col(id_column(OrderItems::Id))
                        .col(ColumnDef::new(OrderItems::OrderId).integer().not_null())
                        .col(ColumnDef::new(OrderItems::RecordingId).integer().not_null())
                        .col(
                            ColumnDef::new(OrderItems::Quantity)
                                .integer()
                                .not_null()
                                .check(Expr::col(OrderItems::Quantity).gte(1)),
                        )
                        .col(
                            ColumnDef::new(OrderItems::UnitPriceCents)
                                .big_integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_order")
                                .from(OrderItems::Table, OrderItems::OrderId)
                                .to(UserOrders::Table, UserOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_recording")
                                .from(OrderItems::Table, OrderItems::RecordingId)
                                .to(Recordings::Table, Recordings::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_order_items_recording")
                        .table(OrderItems::Table)
                        .col(OrderItems::RecordingId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(UserOrders::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }
}

mod m20250101_000004_create_groups {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_groups"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Groups::Table)
                        .if_not_exists()
                        .col(id_column(Groups::Id))
                        .col(ColumnDef::new(Groups::Name).string().not_null())
                        .col(ColumnDef::new(Groups::Description).text())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(GroupRecordings::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(GroupRecordings::GroupId).integer().not_null())
                        .col(
                            ColumnDef::new(GroupRecordings::RecordingId)
                                .integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(GroupRecordings::GroupId)
                                .col(GroupRecordings::RecordingId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_group_recordings_group")
                                .from(GroupRecordings::Table, GroupRecordings::GroupId)
                                .to(Groups::Table, Groups::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_group_recordings_recording")
                                .from(GroupRecordings::Table, GroupRecordings::RecordingId)
                                .to(Recordings::Table, Recordings::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(GroupRecordings::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Groups::Table).to_owned())
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, Database};
    use std::collections::HashSet;

    #[test]
    fn test_migration_names_are_unique() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        let unique: HashSet<&String> = names.iter().collect();

        assert_eq!(names.len(), 4);
        assert_eq!(unique.len(), names.len(), "duplicate names: {:?}", names);
        assert!(names.iter().all(|n| n.starts_with("m2025")));
    }

    #[tokio::test]
    async fn test_fresh_database_migrates_and_reruns_cleanly() {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();

        Migrator::up(&db, None).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let applied = Migrator::get_applied_migrations(&db).await.unwrap();
        assert_eq!(applied.len(), 4);
        assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
    }
}
