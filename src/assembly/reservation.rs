//! Reservation assembly

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::client::ClientId;
use crate::domain::registrar;
use crate::domain::reservation::{Reservation, ReservationId};
use crate::infrastructure::storage::{
    nullable_text, Filter, Key, Row, SharedRowStore, TableSpec, Value,
};
use crate::shared::errors::{DomainError, DomainResult};

use super::client::ClientAssembler;
use super::vehicle::VehicleAssembler;
use super::AssemblyOptions;

struct RawReservation {
    id: ReservationId,
    plate: Option<String>,
    client_id: ClientId,
    reservation_date: NaiveDate,
    desired_start: NaiveDate,
    desired_end: NaiveDate,
}

/// Builds [`Reservation`] aggregates from RESERVATION rows.
///
/// The vehicle reference is optional: a NULL plate assembles to no vehicle,
/// but a plate whose row is gone is an integrity violation like any other
/// dangling reference.
pub struct ReservationAssembler {
    store: SharedRowStore,
    options: AssemblyOptions,
    clients: Arc<ClientAssembler>,
    vehicles: Arc<VehicleAssembler>,
}

impl ReservationAssembler {
    pub const TABLE: TableSpec = TableSpec {
        table: "RESERVATION",
        key_column: "reservation_id",
        columns: &[
            "plate",
            "client_id",
            "reservation_date",
            "desired_start",
            "desired_end",
        ],
    };

    pub fn new(
        store: SharedRowStore,
        options: AssemblyOptions,
        clients: Arc<ClientAssembler>,
        vehicles: Arc<VehicleAssembler>,
    ) -> Self {
        Self {
            store,
            options,
            clients,
            vehicles,
        }
    }

    /// Non-key column values in declared order.
    pub fn to_row_fields(reservation: &Reservation) -> DomainResult<Vec<Value>> {
        let client_id = reservation.client.id.ok_or_else(|| {
            DomainError::Validation("reservation references an unsaved client".into())
        })?;
        Ok(vec![
            Value::opt(reservation.vehicle.as_ref().map(|v| v.plate.as_str())),
            Value::from(client_id),
            Value::from(reservation.reservation_date),
            Value::from(reservation.desired_start),
            Value::from(reservation.desired_end),
        ])
    }

    fn decode(row: &Row) -> Option<RawReservation> {
        Some(RawReservation {
            id: row.first()?.as_int()?,
            plate: nullable_text(row.get(1)?)?,
            client_id: row.get(2)?.as_int()?,
            reservation_date: row.get(3)?.as_date()?,
            desired_start: row.get(4)?.as_date()?,
            desired_end: row.get(5)?.as_date()?,
        })
    }

    /// Build a reservation from its raw row, resolving the client and the
    /// optional vehicle.
    pub async fn assemble(&self, row: &Row) -> DomainResult<Option<Reservation>> {
        let Some(raw) = Self::decode(row) else {
            self.options.report_malformed("reservation", row);
            return Ok(None);
        };
        let Some(client) = self.clients.find_by_key(raw.client_id).await? else {
            self.options
                .report_orphaned("reservation", raw.id, "client", raw.client_id);
            return Ok(None);
        };
        let vehicle = match &raw.plate {
            Some(plate) => match self.vehicles.find_by_plate(plate).await? {
                Some(vehicle) => Some(vehicle),
                None => {
                    self.options
                        .report_orphaned("reservation", raw.id, "vehicle", plate);
                    return Ok(None);
                }
            },
            None => None,
        };
        match Reservation::new(
            Some(raw.id),
            raw.reservation_date,
            raw.desired_start,
            raw.desired_end,
            client,
            vehicle,
        ) {
            Ok(mut reservation) => {
                registrar::register_reservation(&mut reservation);
                Ok(Some(reservation))
            }
            Err(error) => {
                self.options.report_invalid("reservation", raw.id, &error);
                Ok(None)
            }
        }
    }

    async fn assemble_all(&self, rows: &[Row]) -> DomainResult<Vec<Reservation>> {
        let mut reservations = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(reservation) = self.assemble(row).await? {
                reservations.push(reservation);
            }
        }
        Ok(reservations)
    }

    pub async fn find_by_key(&self, id: ReservationId) -> DomainResult<Option<Reservation>> {
        let row = self.store.get_by_key(&Self::TABLE, &Key::Int(id)).await?;
        match row {
            Some(row) => self.assemble(&row).await,
            None => Ok(None),
        }
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Reservation>> {
        let rows = self.store.list_all(&Self::TABLE).await?;
        self.assemble_all(&rows).await
    }

    pub async fn find_by_client(&self, client_id: ClientId) -> DomainResult<Vec<Reservation>> {
        let rows = self
            .store
            .list_where(&Self::TABLE, Filter::eq("client_id", client_id))
            .await?;
        self.assemble_all(&rows).await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::Assemblers;
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

    async fn seed_client(store: &SharedRowStore) -> i64 {
        store
            .insert(
                &ClientAssembler::TABLE,
                None,
                vec![
                    Value::from("Ana"),
                    Value::from("Gomez"),
                    Value::from("30123456"),
                    Value::from("addr"),
                    Value::from("1144556677"),
                    Value::from("ana@example.com"),
                ],
            )
            .await
            .unwrap();
        1
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

    fn reservation_fields(plate: Option<&str>, client_id: i64) -> Vec<Value> {
        vec![
            Value::opt(plate),
            Value::from(client_id),
            Value::from(date(2024, 5, 1)),
            Value::from(date(2024, 5, 10)),
            Value::from(date(2024, 5, 12)),
        ]
    }

    #[tokio::test]
    async fn null_plate_assembles_without_a_vehicle() {
        let (assemblers, store) = setup();
        let client_id = seed_client(&store).await;
        store
            .insert(
                &ReservationAssembler::TABLE,
                None,
                reservation_fields(None, client_id),
            )
            .await
            .unwrap();

        let reservation = assemblers
            .reservations
            .find_by_key(1)
            .await
            .unwrap()
            .unwrap();
        assert!(reservation.vehicle.is_none());
        assert_eq!(reservation.client.reservations, vec![1]);
    }

    #[tokio::test]
    async fn present_vehicle_is_resolved_and_claimed() {
        let (assemblers, store) = setup();
        let client_id = seed_client(&store).await;
        seed_vehicle(&store, "ABC123").await;
        store
            .insert(
                &ReservationAssembler::TABLE,
                None,
                reservation_fields(Some("ABC123"), client_id),
            )
            .await
            .unwrap();

        let reservation = assemblers
            .reservations
            .find_by_key(1)
            .await
            .unwrap()
            .unwrap();
        let vehicle = reservation.vehicle.as_ref().unwrap();
        assert_eq!(vehicle.reservations, vec![1]);
        assert!(!vehicle.is_available());
    }

    #[tokio::test]
    async fn dangling_plate_is_an_integrity_violation() {
        let (assemblers, store) = setup();
        let client_id = seed_client(&store).await;
        store
            .insert(
                &ReservationAssembler::TABLE,
                None,
                reservation_fields(Some("GONE99"), client_id),
            )
            .await
            .unwrap();

        assert!(assemblers
            .reservations
            .find_by_key(1)
            .await
            .unwrap()
            .is_none());
        assert!(assemblers.reservations.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_client_drops_the_reservation() {
        let (assemblers, store) = setup();
        store
            .insert(
                &ReservationAssembler::TABLE,
                None,
                reservation_fields(None, 42),
            )
            .await
            .unwrap();

        assert!(assemblers
            .reservations
            .find_by_key(1)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn stored_date_disorder_drops_the_row() {
        let (assemblers, store) = setup();
        let client_id = seed_client(&store).await;
        store
            .insert(
                &ReservationAssembler::TABLE,
                None,
                vec![
                    Value::Null,
                    Value::from(client_id),
                    Value::from(date(2024, 5, 10)),
                    Value::from(date(2024, 5, 1)),
                    Value::from(date(2024, 5, 12)),
                ],
            )
            .await
            .unwrap();

        assert!(assemblers.reservations.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn finds_reservations_by_client() {
        let (assemblers, store) = setup();
        let client_id = seed_client(&store).await;
        store
            .insert(
                &ReservationAssembler::TABLE,
                None,
                reservation_fields(None, client_id),
            )
            .await
            .unwrap();
        store
            .insert(
                &ReservationAssembler::TABLE,
                None,
                reservation_fields(None, client_id),
            )
            .await
            .unwrap();

        let reservations = assemblers
            .reservations
            .find_by_client(client_id)
            .await
            .unwrap();
        assert_eq!(reservations.len(), 2);
    }
}
