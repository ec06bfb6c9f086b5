//! Vehicle assembly

use crate::domain::vehicle::{Availability, Vehicle};
use crate::infrastructure::storage::{Key, Row, SharedRowStore, TableSpec, Value};
use crate::shared::errors::DomainResult;
use rust_decimal::Decimal;

use super::AssemblyOptions;

/// Builds [`Vehicle`] aggregates from VEHICLE rows, keyed by plate.
pub struct VehicleAssembler {
    store: SharedRowStore,
    options: AssemblyOptions,
}

impl VehicleAssembler {
    pub const TABLE: TableSpec = TableSpec {
        table: "VEHICLE",
        key_column: "plate",
        columns: &["make", "model", "year", "daily_price", "state"],
    };

    pub fn new(store: SharedRowStore, options: AssemblyOptions) -> Self {
        Self { store, options }
    }

    /// Non-key column values in declared order. The plate itself is the
    /// key and travels separately on insert.
    pub fn to_row_fields(vehicle: &Vehicle) -> Vec<Value> {
        vec![
            Value::from(vehicle.make.as_str()),
            Value::from(vehicle.model.as_str()),
            Value::from(vehicle.year),
            Value::from(vehicle.daily_price),
            Value::from(vehicle.availability.as_str()),
        ]
    }

    fn decode(row: &Row) -> Option<(String, String, String, i32, Decimal, Availability)> {
        Some((
            row.first()?.as_text()?.to_string(),
            row.get(1)?.as_text()?.to_string(),
            row.get(2)?.as_text()?.to_string(),
            i32::try_from(row.get(3)?.as_int()?).ok()?,
            row.get(4)?.as_decimal()?,
            Availability::from_str(row.get(5)?.as_text()?)?,
        ))
    }

    /// Build a vehicle from its raw row. An unknown stored state counts as
    /// a malformed row, not a default.
    pub fn assemble(&self, row: &Row) -> Option<Vehicle> {
        let Some((plate, make, model, year, daily_price, availability)) = Self::decode(row) else {
            self.options.report_malformed("vehicle", row);
            return None;
        };
        match Vehicle::new(&plate, make, model, year, daily_price, availability) {
            Ok(vehicle) => Some(vehicle),
            Err(error) => {
                self.options.report_invalid("vehicle", &plate, &error);
                None
            }
        }
    }

    /// Fetch by plate. Input is normalized the same way stored plates are,
    /// so lookups are case- and whitespace-insensitive.
    pub async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>> {
        let key = Key::Text(plate.trim().to_uppercase());
        let row = self.store.get_by_key(&Self::TABLE, &key).await?;
        Ok(row.as_ref().and_then(|row| self.assemble(row)))
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Vehicle>> {
        let rows = self.store.list_all(&Self::TABLE).await?;
        Ok(rows.iter().filter_map(|row| self.assemble(row)).collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::{InMemoryRowStore, RowStore};
    use std::sync::Arc;

    fn assembler_with_store() -> (VehicleAssembler, SharedRowStore) {
        let store: SharedRowStore = Arc::new(InMemoryRowStore::new());
        (
            VehicleAssembler::new(store.clone(), AssemblyOptions::default()),
            store,
        )
    }

    fn vehicle_fields(state: &str) -> Vec<Value> {
        vec![
            Value::from("Toyota"),
            Value::from("Corolla"),
            Value::from(2021),
            Value::from("50.00"),
            Value::from(state),
        ]
    }

    #[tokio::test]
    async fn plate_lookup_is_normalized() {
        let (assembler, store) = assembler_with_store();
        store
            .insert(
                &VehicleAssembler::TABLE,
                Some(Key::from("ABC123")),
                vehicle_fields("Available"),
            )
            .await
            .unwrap();

        let vehicle = assembler.find_by_plate(" abc123 ").await.unwrap().unwrap();
        assert_eq!(vehicle.plate, "ABC123");
        assert_eq!(vehicle.daily_price, Decimal::new(5000, 2));
        assert!(vehicle.is_available());
    }

    #[tokio::test]
    async fn unknown_stored_state_is_malformed() {
        let (assembler, store) = assembler_with_store();
        store
            .insert(
                &VehicleAssembler::TABLE,
                Some(Key::from("ABC123")),
                vehicle_fields("InTheShop"),
            )
            .await
            .unwrap();

        assert!(assembler.find_by_plate("ABC123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unavailable_state_survives_assembly() {
        let (assembler, store) = assembler_with_store();
        store
            .insert(
                &VehicleAssembler::TABLE,
                Some(Key::from("XYZ789")),
                vehicle_fields("Unavailable"),
            )
            .await
            .unwrap();

        let vehicle = assembler.find_by_plate("XYZ789").await.unwrap().unwrap();
        assert_eq!(vehicle.availability, Availability::Unavailable);
    }

    #[tokio::test]
    async fn listing_skips_the_bad_row_only() {
        let (assembler, store) = assembler_with_store();
        store
            .insert(
                &VehicleAssembler::TABLE,
                Some(Key::from("ABC123")),
                vehicle_fields("Available"),
            )
            .await
            .unwrap();
        store
            .insert(
                &VehicleAssembler::TABLE,
                Some(Key::from("Bad1")),
                vehicle_fields("Available"),
            )
            .await
            .unwrap();

        // "Bad1" fails plate validation during assembly.
        let vehicles = assembler.list_all().await.unwrap();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].plate, "ABC123");
    }

    #[test]
    fn row_fields_serialize_state_as_text() {
        let vehicle = Vehicle::new(
            "ABC123",
            "Toyota",
            "Corolla",
            2021,
            Decimal::new(5000, 2),
            Availability::Unavailable,
        )
        .unwrap();
        let fields = VehicleAssembler::to_row_fields(&vehicle);
        assert_eq!(fields[4], Value::from("Unavailable"));
    }
}
