//! Common test utilities: in-memory database, seeded service and accounts

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use record_store::config::{BootstrapAdmin, Config};
use record_store::contract::Principal;
use record_store::domain::{EventPublisher, Registration, Service, StoreEvent};
use record_store::RecordStoreModule;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-pass";

// Seeded ids, in insertion order
pub const CENTRAL_STORE: i32 = 1;
pub const MUSIC_WORLD: i32 = 2;
pub const THRILLER: i32 = 1;
pub const BACK_IN_BLACK: i32 = 2;
pub const DARK_SIDE: i32 = 3;
pub const ABBEY_ROAD: i32 = 4;
pub const KIND_OF_BLUE: i32 = 5;
pub const NEVERMIND: i32 = 6;
pub const HIGHWAY_TO_HELL: i32 = 7;

/// Publisher that keeps every event for inspection
#[derive(Default)]
pub struct CapturingPublisher {
    events: Mutex<Vec<StoreEvent>>,
}

impl CapturingPublisher {
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl EventPublisher for CapturingPublisher {
    async fn publish(&self, event: StoreEvent) -> anyhow::Result<()> {
        self.events.lock().push(event);
        Ok(())
    }
}

pub struct TestContext {
    pub module: RecordStoreModule,
    pub service: Arc<Service>,
    pub db: Arc<DatabaseConnection>,
    pub events: Arc<CapturingPublisher>,
}

impl TestContext {
    pub async fn admin(&self) -> Principal {
        let session = self
            .service
            .login(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .unwrap();
        self.service.resolve_principal(&session.token).await.unwrap()
    }

    /// Register a regular user and return its principal
    pub async fn customer(&self, username: &str) -> Principal {
        let token = self.register(username).await;
        self.service.resolve_principal(&token).await.unwrap()
    }

    /// Register a regular user and return its token
    pub async fn register(&self, username: &str) -> String {
        self.service
            .register(Registration {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password: "secret".to_string(),
                first_name: Some("Test".to_string()),
                last_name: None,
            })
            .await
            .unwrap()
            .token
    }

    pub async fn admin_token(&self) -> String {
        self.service
            .login(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .unwrap()
            .token
    }
}

pub fn test_config() -> Config {
    Config {
        jwt_secret: "test-secret".to_string(),
        seed_demo_data: true,
        bootstrap_admin: Some(BootstrapAdmin {
            username: ADMIN_USERNAME.to_string(),
            email: "admin@example.com".to_string(),
            password: ADMIN_PASSWORD.to_string(),
        }),
        ..Config::default()
    }
}

/// Fresh in-memory SQLite database with the schema applied
pub async fn test_db() -> Arc<DatabaseConnection> {
    // A single connection keeps every query on the same in-memory database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    RecordStoreModule::migrate(&db).await.unwrap();
    Arc::new(db)
}

/// Seeded store with a bootstrap administrator
pub async fn setup() -> TestContext {
    setup_with(test_config()).await
}

pub async fn setup_with(config: Config) -> TestContext {
    let db = test_db().await;
    let events = Arc::new(CapturingPublisher::default());
    let module = RecordStoreModule::new(config);
    let service = module.init(db.clone(), events.clone()).await.unwrap();

    TestContext {
        module,
        service,
        db,
        events,
    }
}

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}
