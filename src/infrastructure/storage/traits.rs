//! Row store contract.
//!
//! One generic persistence seam covers every entity table: callers pass the
//! entity's [`TableSpec`] and get ordered-tuple rows back. The durable SQL
//! backend lives outside this crate; implementations only have to honor the
//! tuple layout (key first, declared column order).

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::row::{Filter, Key, Row, TableSpec, Value};
use crate::shared::errors::DomainError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate key {key} in table {table}")]
    DuplicateKey { table: &'static str, key: String },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            dup @ StoreError::DuplicateKey { .. } => DomainError::Conflict(dup.to_string()),
            StoreError::Backend(msg) => DomainError::Storage(msg),
        }
    }
}

#[async_trait]
pub trait RowStore: Send + Sync {
    /// Fetch a single row by primary key.
    async fn get_by_key(&self, spec: &TableSpec, key: &Key) -> StoreResult<Option<Row>>;

    /// All rows of the table, in stable key order.
    async fn list_all(&self, spec: &TableSpec) -> StoreResult<Vec<Row>>;

    /// Rows matching a single-column predicate.
    async fn list_where(&self, spec: &TableSpec, filter: Filter) -> StoreResult<Vec<Row>>;

    /// Insert a new row and return the key it was stored under.
    ///
    /// `key` is `None` for store-generated integer keys and `Some` for
    /// natural keys supplied by the caller (vehicle plates). A supplied key
    /// that already exists is a [`StoreError::DuplicateKey`].
    async fn insert(
        &self,
        spec: &TableSpec,
        key: Option<Key>,
        fields: Vec<Value>,
    ) -> StoreResult<Key>;

    /// Replace the non-key columns of an existing row. A missing key is a
    /// silent no-op, as in SQL UPDATE; existence checks belong to callers.
    async fn update(&self, spec: &TableSpec, key: &Key, fields: Vec<Value>) -> StoreResult<()>;

    /// Delete a row by key. A missing key is a silent no-op.
    async fn delete(&self, spec: &TableSpec, key: &Key) -> StoreResult<()>;
}

pub type SharedRowStore = Arc<dyn RowStore>;
