//! Rental assembly
//!
//! The deepest composite: a rental row resolves its client, employee and
//! vehicle before the aggregate can exist, one lookup at a time.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::client::ClientId;
use crate::domain::employee::EmployeeId;
use crate::domain::registrar;
use crate::domain::rental::{Rental, RentalId};
use crate::infrastructure::storage::{Filter, Key, Row, SharedRowStore, TableSpec, Value};
use crate::shared::errors::{DomainError, DomainResult};

use super::client::ClientAssembler;
use super::employee::EmployeeAssembler;
use super::vehicle::VehicleAssembler;
use super::AssemblyOptions;

struct RawRental {
    id: RentalId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_cost: Decimal,
    created_date: NaiveDate,
    employee_id: EmployeeId,
    plate: String,
    client_id: ClientId,
}

/// Builds [`Rental`] aggregates from RENTAL rows.
pub struct RentalAssembler {
    store: SharedRowStore,
    options: AssemblyOptions,
    clients: Arc<ClientAssembler>,
    employees: Arc<EmployeeAssembler>,
    vehicles: Arc<VehicleAssembler>,
}

impl RentalAssembler {
    pub const TABLE: TableSpec = TableSpec {
        table: "RENTAL",
        key_column: "rental_id",
        columns: &[
            "start_date",
            "end_date",
            "total_cost",
            "created_date",
            "employee_id",
            "plate",
            "client_id",
        ],
    };

    pub fn new(
        store: SharedRowStore,
        options: AssemblyOptions,
        clients: Arc<ClientAssembler>,
        employees: Arc<EmployeeAssembler>,
        vehicles: Arc<VehicleAssembler>,
    ) -> Self {
        Self {
            store,
            options,
            clients,
            employees,
            vehicles,
        }
    }

    /// Non-key column values in declared order. Fails when a referenced
    /// aggregate has never been persisted, since its key would be NULL.
    pub fn to_row_fields(rental: &Rental) -> DomainResult<Vec<Value>> {
        let employee_id = rental
            .employee
            .id
            .ok_or_else(|| DomainError::Validation("rental references an unsaved employee".into()))?;
        let client_id = rental
            .client
            .id
            .ok_or_else(|| DomainError::Validation("rental references an unsaved client".into()))?;
        Ok(vec![
            Value::from(rental.start_date),
            Value::from(rental.end_date),
            Value::from(rental.total_cost),
            Value::from(rental.created_date),
            Value::from(employee_id),
            Value::from(rental.vehicle.plate.as_str()),
            Value::from(client_id),
        ])
    }

    fn decode(row: &Row) -> Option<RawRental> {
        Some(RawRental {
            id: row.first()?.as_int()?,
            start_date: row.get(1)?.as_date()?,
            end_date: row.get(2)?.as_date()?,
            total_cost: row.get(3)?.as_decimal()?,
            created_date: row.get(4)?.as_date()?,
            employee_id: row.get(5)?.as_int()?,
            plate: row.get(6)?.as_text()?.to_string(),
            client_id: row.get(7)?.as_int()?,
        })
    }

    /// Build a rental from its raw row, resolving all three references.
    /// `Ok(None)` means the row was dropped and reported; store failures
    /// propagate.
    pub async fn assemble(&self, row: &Row) -> DomainResult<Option<Rental>> {
        let Some(raw) = Self::decode(row) else {
            self.options.report_malformed("rental", row);
            return Ok(None);
        };
        let Some(client) = self.clients.find_by_key(raw.client_id).await? else {
            self.options
                .report_orphaned("rental", raw.id, "client", raw.client_id);
            return Ok(None);
        };
        let Some(employee) = self.employees.find_by_key(raw.employee_id).await? else {
            self.options
                .report_orphaned("rental", raw.id, "employee", raw.employee_id);
            return Ok(None);
        };
        let Some(vehicle) = self.vehicles.find_by_plate(&raw.plate).await? else {
            self.options
                .report_orphaned("rental", raw.id, "vehicle", &raw.plate);
            return Ok(None);
        };
        match Rental::new(
            Some(raw.id),
            raw.start_date,
            raw.end_date,
            raw.total_cost,
            raw.created_date,
            client,
            employee,
            vehicle,
        ) {
            Ok(mut rental) => {
                registrar::register_rental(&mut rental);
                Ok(Some(rental))
            }
            Err(error) => {
                self.options.report_invalid("rental", raw.id, &error);
                Ok(None)
            }
        }
    }

    async fn assemble_all(&self, rows: &[Row]) -> DomainResult<Vec<Rental>> {
        let mut rentals = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(rental) = self.assemble(row).await? {
                rentals.push(rental);
            }
        }
        Ok(rentals)
    }

    pub async fn find_by_key(&self, id: RentalId) -> DomainResult<Option<Rental>> {
        let row = self.store.get_by_key(&Self::TABLE, &Key::Int(id)).await?;
        match row {
            Some(row) => self.assemble(&row).await,
            None => Ok(None),
        }
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Rental>> {
        let rows = self.store.list_all(&Self::TABLE).await?;
        self.assemble_all(&rows).await
    }

    pub async fn find_by_client(&self, client_id: ClientId) -> DomainResult<Vec<Rental>> {
        let rows = self
            .store
            .list_where(&Self::TABLE, Filter::eq("client_id", client_id))
            .await?;
        self.assemble_all(&rows).await
    }

    /// Rentals that claimed a given vehicle.
    pub async fn find_by_plate(&self, plate: &str) -> DomainResult<Vec<Rental>> {
        let normalized = plate.trim().to_uppercase();
        let rows = self
            .store
            .list_where(&Self::TABLE, Filter::eq("plate", normalized))
            .await?;
        self.assemble_all(&rows).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
