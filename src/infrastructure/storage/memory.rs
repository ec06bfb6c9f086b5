//! In-memory row store for tests and embedding.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::row::{Filter, Key, Row, TableSpec, Value};
use super::traits::{RowStore, StoreError, StoreResult};

/// Row store backed by per-table ordered maps. Listing order is key order,
/// so results are deterministic across runs.
pub struct InMemoryRowStore {
    tables: DashMap<&'static str, BTreeMap<Key, Row>>,
    counters: DashMap<&'static str, AtomicI64>,
}

impl InMemoryRowStore {
    pub fn new() -> Self {
        Self {
            tables: DashMap::new(),
            counters: DashMap::new(),
        }
    }

    /// Next generated key for a table. Keys start at 1 and are never reused,
    /// matching auto-increment semantics.
    fn next_key(&self, table: &'static str) -> i64 {
        self.counters
            .entry(table)
            .or_insert_with(|| AtomicI64::new(0))
            .fetch_add(1, Ordering::SeqCst)
            + 1
    }
}

impl Default for InMemoryRowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn get_by_key(&self, spec: &TableSpec, key: &Key) -> StoreResult<Option<Row>> {
        Ok(self
            .tables
            .get(spec.table)
            .and_then(|table| table.get(key).cloned()))
    }

    async fn list_all(&self, spec: &TableSpec) -> StoreResult<Vec<Row>> {
        Ok(self
            .tables
            .get(spec.table)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn list_where(&self, spec: &TableSpec, filter: Filter) -> StoreResult<Vec<Row>> {
        Ok(self
            .tables
            .get(spec.table)
            .map(|table| {
                table
                    .values()
                    .filter(|row| filter.matches(spec, row))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(
        &self,
        spec: &TableSpec,
        key: Option<Key>,
        fields: Vec<Value>,
    ) -> StoreResult<Key> {
        let key = match key {
            Some(k) => k,
            None => Key::Int(self.next_key(spec.table)),
        };
        let mut table = self.tables.entry(spec.table).or_default();
        if table.contains_key(&key) {
            return Err(StoreError::DuplicateKey {
                table: spec.table,
                key: key.to_string(),
            });
        }
        let mut row = Vec::with_capacity(fields.len() + 1);
        row.push(Value::from(key.clone()));
        row.extend(fields);
        table.insert(key.clone(), row);
        Ok(key)
    }

    async fn update(&self, spec: &TableSpec, key: &Key, fields: Vec<Value>) -> StoreResult<()> {
        if let Some(mut table) = self.tables.get_mut(spec.table) {
            if let Some(row) = table.get_mut(key) {
                let mut replacement = Vec::with_capacity(fields.len() + 1);
                replacement.push(Value::from(key.clone()));
                replacement.extend(fields);
                *row = replacement;
            }
        }
        Ok(())
    }

    async fn delete(&self, spec: &TableSpec, key: &Key) -> StoreResult<()> {
        if let Some(mut table) = self.tables.get_mut(spec.table) {
            table.remove(key);
        }
        Ok(())
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────
