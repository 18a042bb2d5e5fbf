//! SeaORM entities for database tables
//!
//! Money columns hold integer cents.

/// Recordings table
pub mod recording {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "recordings")]
    pub struct Model {
        #[sea_orm(primary_key)]
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

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_one = "super::catalog::Entity")]
        Catalog,
        #[sea_orm(has_many = "super::store_inventory::Entity")]
        Inventory,
        #[sea_orm(has_many = "super::order_item::Entity")]
        OrderItems,
    }

    impl Related<super::catalog::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Catalog.def()
        }
    }

    impl Related<super::store_inventory::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Inventory.def()
        }
    }

    impl Related<super::order_item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::OrderItems.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Retail price per recording
pub mod catalog {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "catalog")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(unique)]
        pub recording_id: i32,
        pub retail_price_cents: i64,
        pub media_type: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::recording::Entity",
            from = "Column::RecordingId",
            to = "super::recording::Column::Id",
            on_delete = "Cascade"
        )]
        Recording,
    }

    impl Related<super::recording::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Recording.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod store {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "stores")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub address: String,
        pub phone: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::store_inventory::Entity")]
        Inventory,
        #[sea_orm(has_many = "super::user_order::Entity")]
        Orders,
    }

    impl Related<super::store_inventory::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Inventory.def()
        }
    }

    impl Related<super::user_order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Orders.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Per-store stock; unique on (store_id, recording_id)
pub mod store_inventory {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "store_inventory")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub store_id: i32,
        pub recording_id: i32,
        pub wholesale_price_cents: i64,
        pub in_stock: i32,
        pub sales_count: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::store::Entity",
            from = "Column::StoreId",
            to = "super::store::Column::Id",
            on_delete = "Cascade"
        )]
        Store,
        #[sea_orm(
            belongs_to = "super::recording::Entity",
            from = "Column::RecordingId",
            to = "super::recording::Column::Id",
            on_delete = "Cascade"
        )]
        Recording,
    }

    impl Related<super::store::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Store.def()
        }
    }

    impl Related<super::recording::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Recording.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod user {
    use sea_orm::entity::prelude::*;

    /// Stored account role
    #[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
    #[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
    pub enum UserRole {
        #[sea_orm(string_value = "user")]
        User,
        #[sea_orm(string_value = "admin")]
        Admin,
    }

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(unique)]
        pub username: String,
        #[sea_orm(unique)]
        pub email: String,
        pub password_hash: String,
        pub first_name: String,
        pub last_name: String,
        pub role: UserRole,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::user_order::Entity")]
        Orders,
    }

    impl Related<super::user_order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Orders.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod user_order {
    use sea_orm::entity::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
    #[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
    pub enum OrderStatus {
        #[sea_orm(string_value = "pending")]
        Pending,
        #[sea_orm(string_value = "completed")]
        Completed,
        #[sea_orm(string_value = "cancelled")]
        Cancelled,
    }

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "user_orders")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub user_id: i32,
        pub store_id: i32,
        pub date: DateTimeUtc,
        pub status: OrderStatus,
        pub total_amount_cents: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::user::Entity",
            from = "Column::UserId",
            to = "super::user::Column::Id",
            on_delete = "Restrict"
        )]
        User,
        #[sea_orm(
            belongs_to = "super::store::Entity",
            from = "Column::StoreId",
            to = "super::store::Column::Id",
            on_delete = "Restrict"
        )]
        Store,
        #[sea_orm(has_many = "super::order_item::Entity")]
        Items,
    }

    impl Related<super::user::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl Related<super::store::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Store.def()
        }
    }

    impl Related<super::order_item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Items.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod order_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "order_items")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub order_id: i32,
        pub recording_id: i32,
        pub quantity: i32,
        pub unit_price_cents: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::user_order::Entity",
            from = "Column::OrderId",
            to = "super::user_order::Column::Id",
            on_delete = "Cascade"
        )]
        Order,
        #[sea_orm(
            belongs_to = "super::recording::Entity",
            from = "Column::RecordingId",
            to = "super::recording::Column::Id",
            on_delete = "Restrict"
        )]
        Recording,
    }

    impl Related<super::user_order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Order.def()
        }
    }

    impl Related<super::recording::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Recording.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Curated recording groups
pub mod group {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "groups")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub description: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::group_recording::Entity")]
        Members,
    }

    impl Related<super::group_recording::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Members.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod group_recording {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "group_recordings")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub group_id: i32,
        #[sea_orm(primary_key, auto_increment = false)]
        pub recording_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::group::Entity",
            from = "Column::GroupId",
            to = "super::group::Column::Id",
            on_delete = "Cascade"
        )]
        Group,
        #[sea_orm(
            belongs_to = "super::recording::Entity",
            from = "Column::RecordingId",
            to = "super::recording::Column::Id",
            on_delete = "Cascade"
        )]
        Recording,
    }

    impl Related<super::group::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Group.def()
        }
    }

    impl Related<super::recording::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Recording.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
