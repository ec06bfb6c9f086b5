//! # Rental Service Core
//!
//! Object assembly and referential integrity layer for a vehicle rental
//! backend, on top of a pluggable row store.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, construction-time validation and
//!   the relationship registrar
//! - **assembly**: Entity assemblers turning raw rows into fully wired
//!   aggregates, absorbing referentially broken rows
//! - **application**: Lifecycle services, one per aggregate
//! - **infrastructure**: External concerns (row store trait and the
//!   in-memory store)
//! - **dto**: Serialized views of the assembled aggregates

pub mod application;
pub mod assembly;
pub mod config;
pub mod domain;
pub mod dto;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, init_tracing, AppConfig};

// Re-export storage types for easy access
pub use infrastructure::storage::{InMemoryRowStore, RowStore, SharedRowStore};

// Re-export the service set
pub use application::Services;

pub use shared::errors::{DomainError, DomainResult};
