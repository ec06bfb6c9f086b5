//! Fine assembly

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::client::ClientId;
use crate::domain::fine::{Fine, FineId};
use crate::domain::registrar;
use crate::domain::rental::RentalId;
use crate::infrastructure::storage::{Filter, Key, Row, SharedRowStore, TableSpec, Value};
use crate::shared::errors::{DomainError, DomainResult};

use super::rental::RentalAssembler;
use super::AssemblyOptions;

struct RawFine {
    id: FineId,
    rental_id: RentalId,
    description: String,
    amount: Decimal,
    incident_date: NaiveDate,
}

/// Builds [`Fine`] aggregates from FINE rows. Each fine nests the full
/// rental it was charged against.
pub struct FineAssembler {
    store: SharedRowStore,
    options: AssemblyOptions,
    rentals: Arc<RentalAssembler>,
}

impl FineAssembler {
    pub const TABLE: TableSpec = TableSpec {
        table: "FINE",
        key_column: "fine_id",
        columns: &["rental_id", "description", "amount", "incident_date"],
    };

    pub fn new(store: SharedRowStore, options: AssemblyOptions, rentals: Arc<RentalAssembler>) -> Self {
        Self {
            store,
            options,
            rentals,
        }
    }

    /// Non-key column values in declared order.
    pub fn to_row_fields(fine: &Fine) -> DomainResult<Vec<Value>> {
        let rental_id = fine
            .rental
            .id
            .ok_or_else(|| DomainError::Validation("fine references an unsaved rental".into()))?;
        Ok(vec![
            Value::from(rental_id),
            Value::from(fine.description.as_str()),
            Value::from(fine.amount),
            Value::from(fine.incident_date),
        ])
    }

    fn decode(row: &Row) -> Option<RawFine> {
        Some(RawFine {
            id: row.first()?.as_int()?,
            rental_id: row.get(1)?.as_int()?,
            description: row.get(2)?.as_text()?.to_string(),
            amount: row.get(3)?.as_decimal()?,
            incident_date: row.get(4)?.as_date()?,
        })
    }

    /// Build a fine from its raw row, resolving the rental it belongs to.
    pub async fn assemble(&self, row: &Row) -> DomainResult<Option<Fine>> {
        let Some(raw) = Self::decode(row) else {
            self.options.report_malformed("fine", row);
            return Ok(None);
        };
        let Some(rental) = self.rentals.find_by_key(raw.rental_id).await? else {
            self.options
                .report_orphaned("fine", raw.id, "rental", raw.rental_id);
            return Ok(None);
        };
        match Fine::new(
            Some(raw.id),
            raw.description,
            raw.amount,
            raw.incident_date,
            rental,
        ) {
            Ok(mut fine) => {
                registrar::register_fine(&mut fine);
                Ok(Some(fine))
            }
            Err(error) => {
                self.options.report_invalid("fine", raw.id, &error);
                Ok(None)
            }
        }
    }

    async fn assemble_all(&self, rows: &[Row]) -> DomainResult<Vec<Fine>> {
        let mut fines = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(fine) = self.assemble(row).await? {
                fines.push(fine);
            }
        }
        Ok(fines)
    }

    pub async fn find_by_key(&self, id: FineId) -> DomainResult<Option<Fine>> {
        let row = self.store.get_by_key(&Self::TABLE, &Key::Int(id)).await?;
        match row {
            Some(row) => self.assemble(&row).await,
            None => Ok(None),
        }
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Fine>> {
        let rows = self.store.list_all(&Self::TABLE).await?;
        self.assemble_all(&rows).await
    }

    /// Fines charged against one rental.
    pub async fn find_by_rental(&self, rental_id: RentalId) -> DomainResult<Vec<Fine>> {
        let rows = self
            .store
            .list_where(&Self::TABLE, Filter::eq("rental_id", rental_id))
            .await?;
        self.assemble_all(&rows).await
    }

    /// Fines charged to a client, composed through the client's rentals.
    pub async fn find_by_client(&self, client_id: ClientId) -> DomainResult<Vec<Fine>> {
        let rentals = self.rentals.find_by_client(client_id).await?;
        let mut fines = Vec::new();
        for rental in rentals {
            let Some(rental_id) = rental.id else { continue };
            fines.extend(self.find_by_rental(rental_id).await?);
        }
        Ok(fines)
    }

    /// Fines accumulated by a vehicle, composed through its rentals.
    pub async fn find_by_plate(&self, plate: &str) -> DomainResult<Vec<Fine>> {
        let rentals = self.rentals.find_by_plate(plate).await?;
        let mut fines = Vec::new();
        for rental in rentals {
            let Some(rental_id) = rental.id else { continue };
            fines.extend(self.find_by_rental(rental_id).await?);
        }
        Ok(fines)
    }
}

// ── Tests ──────────────────────────────────────────────────────
