//! Maintenance record assembly

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::maintenance::{MaintenanceId, MaintenanceRecord};
use crate::domain::registrar;
use crate::infrastructure::storage::{Filter, Key, Row, SharedRowStore, TableSpec, Value};
use crate::shared::errors::DomainResult;

use super::vehicle::VehicleAssembler;
use super::AssemblyOptions;

struct RawMaintenance {
    id: MaintenanceId,
    plate: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    service_type: String,
    cost: Decimal,
}

/// Builds [`MaintenanceRecord`] aggregates from MAINTENANCE rows.
pub struct MaintenanceAssembler {
    store: SharedRowStore,
    options: AssemblyOptions,
    vehicles: Arc<VehicleAssembler>,
}

impl MaintenanceAssembler {
    pub const TABLE: TableSpec = TableSpec {
        table: "MAINTENANCE",
        key_column: "maintenance_id",
        columns: &["plate", "start_date", "end_date", "service_type", "cost"],
    };

    pub fn new(store: SharedRowStore, options: AssemblyOptions, vehicles: Arc<VehicleAssembler>) -> Self {
        Self {
            store,
            options,
            vehicles,
        }
    }

    /// Non-key column values in declared order.
    pub fn to_row_fields(record: &MaintenanceRecord) -> Vec<Value> {
        vec![
            Value::from(record.vehicle.plate.as_str()),
            Value::from(record.start_date),
            Value::from(record.end_date),
            Value::from(record.service_type.as_str()),
            Value::from(record.cost),
        ]
    }

    fn decode(row: &Row) -> Option<RawMaintenance> {
        Some(RawMaintenance {
            id: row.first()?.as_int()?,
            plate: row.get(1)?.as_text()?.to_string(),
            start_date: row.get(2)?.as_date()?,
            end_date: row.get(3)?.as_date()?,
            service_type: row.get(4)?.as_text()?.to_string(),
            cost: row.get(5)?.as_decimal()?,
        })
    }

    /// Build a maintenance record from its raw row, resolving the vehicle.
    pub async fn assemble(&self, row: &Row) -> DomainResult<Option<MaintenanceRecord>> {
        let Some(raw) = Self::decode(row) else {
            self.options.report_malformed("maintenance", row);
            return Ok(None);
        };
        let Some(vehicle) = self.vehicles.find_by_plate(&raw.plate).await? else {
            self.options
                .report_orphaned("maintenance", raw.id, "vehicle", &raw.plate);
            return Ok(None);
        };
        match MaintenanceRecord::new(
            Some(raw.id),
            raw.start_date,
            raw.end_date,
            raw.service_type,
            raw.cost,
            vehicle,
        ) {
            Ok(mut record) => {
                registrar::register_maintenance(&mut record);
                Ok(Some(record))
            }
            Err(error) => {
                self.options.report_invalid("maintenance", raw.id, &error);
                Ok(None)
            }
        }
    }

    async fn assemble_all(&self, rows: &[Row]) -> DomainResult<Vec<MaintenanceRecord>> {
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(record) = self.assemble(row).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    pub async fn find_by_key(&self, id: MaintenanceId) -> DomainResult<Option<MaintenanceRecord>> {
        let row = self.store.get_by_key(&Self::TABLE, &Key::Int(id)).await?;
        match row {
            Some(row) => self.assemble(&row).await,
            None => Ok(None),
        }
    }

    pub async fn list_all(&self) -> DomainResult<Vec<MaintenanceRecord>> {
        let rows = self.store.list_all(&Self::TABLE).await?;
        self.assemble_all(&rows).await
    }

    /// Service history of one vehicle.
    pub async fn find_by_plate(&self, plate: &str) -> DomainResult<Vec<MaintenanceRecord>> {
        let normalized = plate.trim().to_uppercase();
        let rows = self
            .store
            .list_where(&Self::TABLE, Filter::eq("plate", normalized))
            .await?;
        self.assemble_all(&rows).await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::Assemblers;
    use crate::domain::vehicle::Availability;
    use crate::infrastructure::storage::{InMemoryRowStore, RowStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (Assemblers, SharedRowStore) {
        let store: SharedRowStore = Arc::new(InMemoryRowStore::new());
        (
            Assemblers::new(store.clone(), AssemblyOptions::default()),
            store,
        )
    }

    async fn seed_vehicle(store: &SharedRowStore, plate: &str) {
        store
            .insert(
                &VehicleAssembler::TABLE,
                Some(Key::from(plate)),
                vec![
                    Value::from("Toyota"),
                    Value::from("Corolla"),
                    Value::from(2021),
                    Value::from("50.00"),
                    Value::from("Available"),
                ],
            )
            .await
            .unwrap();
    }

    fn maintenance_fields(plate: &str, service_type: &str) -> Vec<Value> {
        vec![
            Value::from(plate),
            Value::from(date(2024, 5, 1)),
            Value::from(date(2024, 5, 2)),
            Value::from(service_type),
            Value::from("80.00"),
        ]
    }

    #[tokio::test]
    async fn assembles_and_registers_on_the_vehicle() {
        let (assemblers, store) = setup();
        seed_vehicle(&store, "ABC123").await;
        store
            .insert(
                &MaintenanceAssembler::TABLE,
                None,
                maintenance_fields("ABC123", "oil change"),
            )
            .await
            .unwrap();

        let record = assemblers
            .maintenance
            .find_by_key(1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.service_type, "oil change");
        assert_eq!(record.vehicle.maintenance, vec![1]);
        // Maintenance never claims the vehicle.
        assert_eq!(record.vehicle.availability, Availability::Available);
    }

    #[tokio::test]
    async fn missing_vehicle_drops_the_record() {
        let (assemblers, store) = setup();
        store
            .insert(
                &MaintenanceAssembler::TABLE,
                None,
                maintenance_fields("GONE99", "oil change"),
            )
            .await
            .unwrap();

        assert!(assemblers
            .maintenance
            .find_by_key(1)
            .await
            .unwrap()
            .is_none());
        assert!(assemblers.maintenance.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn finds_history_by_plate() {
        let (assemblers, store) = setup();
        seed_vehicle(&store, "ABC123").await;
        seed_vehicle(&store, "XYZ789").await;
        store
            .insert(
                &MaintenanceAssembler::TABLE,
                None,
                maintenance_fields("ABC123", "oil change"),
            )
            .await
            .unwrap();
        store
            .insert(
                &MaintenanceAssembler::TABLE,
                None,
                maintenance_fields("ABC123", "brakes"),
            )
            .await
            .unwrap();
        store
            .insert(
                &MaintenanceAssembler::TABLE,
                None,
                maintenance_fields("XYZ789", "tires"),
            )
            .await
            .unwrap();

        let history = assemblers.maintenance.find_by_plate(" abc123 ").await.unwrap();
        assert_eq!(history.len(), 2);
    }
}
