//! Module lifecycle: migrations, service wiring and REST registration

use crate::api::rest::extract::SessionCookie;
use crate::api::rest::routes;
use crate::config::Config;
use crate::domain::{EventPublisher, Repositories, Service};
use crate::infra::storage::repositories::{
    SeaOrmGroupRepository, SeaOrmOrderRepository, SeaOrmRecordingRepository,
    SeaOrmReportRepository, SeaOrmStoreRepository, SeaOrmUserRepository,
};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Record store module
pub struct RecordStoreModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for RecordStoreModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl RecordStoreModule {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            service: RwLock::new(None),
        }
    }

    /// Apply pending schema migrations
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Record store migrations completed");
        Ok(())
    }

    /// Build repositories and the domain service on top of a migrated database
    pub async fn init(
        &self,
        db: Arc<DatabaseConnection>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Result<Arc<Service>> {
        let cfg = self.config.read().clone();

        let repos = Repositories {
            recordings: Arc::new(SeaOrmRecordingRepository::new(db.clone())),
            stores: Arc::new(SeaOrmStoreRepository::new(db.clone())),
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            orders: Arc::new(SeaOrmOrderRepository::new(db.clone())),
            reports: Arc::new(SeaOrmReportRepository::new(db.clone())),
            groups: Arc::new(SeaOrmGroupRepository::new(db.clone())),
        };
        let service = Arc::new(Service::new(repos, event_publisher, &cfg));

        if let Some(admin) = &cfg.bootstrap_admin {
            service.ensure_admin(admin).await?;
        }

        if cfg.seed_demo_data {
            let seeded = crate::infra::storage::seed::seed_demo_data(&db).await?;
            tracing::info!(seeded, "Demo catalog check finished");
        }

        *self.service.write() = Some(service.clone());
        tracing::info!(
            stock_policy = ?cfg.stock_policy,
            "Record store service initialized"
        );
        Ok(service)
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// REST router for the initialized service
    pub fn router(&self) -> Result<axum::Router> {
        let service = self.service()?;
        let cookie = SessionCookie {
            secure: self.config.read().cookie_secure,
            max_age_secs: service.token_ttl().as_secs(),
        };

        tracing::info!("Registering record store REST routes");
        Ok(routes::router(service, cookie))
    }
}
