//! Domain layer - business logic and services

pub mod accounts;
pub mod auth;
pub mod checkout;
pub mod events;
pub mod reports;
pub mod repository;
pub mod service;
pub mod validation;

pub use accounts::Registration;
pub use events::{EventPublisher, NoOpEventPublisher, StoreEvent, TracingEventPublisher};
pub use repository::{
    GroupRepository, OrderRepository, RecordingRepository, ReportRepository, StoreRepository,
    UserRepository,
};
pub use service::{Repositories, Service};
