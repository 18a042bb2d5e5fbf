//! Record Store Module
//!
//! Catalog of recordings, per-store inventory, transactional checkout,
//! sales reporting and role-gated administration over a REST API.

// Public exports
pub mod contract;
pub use contract::{
    error::StoreError, CartItem, Order, OrderStatus, Principal, Recording, Role, StockPolicy,
    Store,
};

pub mod module;
pub use module::RecordStoreModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
