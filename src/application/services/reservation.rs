//! Reservation lifecycle service
//!
//! A reservation may name a vehicle up front or leave the choice open.
//! When a vehicle is named it is parked durably, and released again when
//! the reservation is deleted.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::assembly::{Assemblers, ReservationAssembler, VehicleAssembler};
use crate::domain::{ClientId, Reservation, ReservationId};
use crate::infrastructure::storage::{Key, SharedRowStore};
use crate::shared::errors::{DomainError, DomainResult};

use super::{generated_id, validate_request};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    pub client_id: ClientId,
    /// Vehicle to hold, or `None` to decide at pickup
    pub plate: Option<String>,
    pub desired_start: NaiveDate,
    pub desired_end: NaiveDate,
}

/// Only the desired window can change; the client and vehicle stay as
/// they were booked.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateReservationRequest {
    pub desired_start: Option<NaiveDate>,
    pub desired_end: Option<NaiveDate>,
}

pub struct ReservationService {
    assemblers: Assemblers,
    store: SharedRowStore,
}

impl ReservationService {
    pub fn new(assemblers: Assemblers, store: SharedRowStore) -> Self {
        Self { assemblers, store }
    }

    /// Book a reservation, holding the named vehicle when one is given.
    pub async fn create(&self, request: CreateReservationRequest) -> DomainResult<Reservation> {
        validate_request(&request)?;

        let client = self
            .assemblers
            .clients
            .find_by_key(request.client_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Client", "client_id", request.client_id))?;

        let vehicle = match &request.plate {
            Some(plate) => Some(
                self.assemblers
                    .vehicles
                    .find_by_plate(plate)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Vehicle", "plate", plate))?,
            ),
            None => None,
        };

        let reservation = Reservation::new(
            None,
            Utc::now().date_naive(),
            request.desired_start,
            request.desired_end,
            client,
            vehicle.clone(),
        )?;

        let fields = ReservationAssembler::to_row_fields(&reservation)?;
        let key = self
            .store
            .insert(&ReservationAssembler::TABLE, None, fields)
            .await?;
        let id = generated_id(key)?;

        if let Some(mut vehicle) = vehicle {
            vehicle.reserve();
            self.store
                .update(
                    &VehicleAssembler::TABLE,
                    &Key::Text(vehicle.plate.clone()),
                    VehicleAssembler::to_row_fields(&vehicle),
                )
                .await?;
        }

        let created = self.get(id).await?;
        info!(
            reservation_id = id,
            client_id = request.client_id,
            "reservation created"
        );
        Ok(created)
    }

    /// Fetch one reservation or fail with not-found.
    pub async fn get(&self, id: ReservationId) -> DomainResult<Reservation> {
        self.assemblers
            .reservations
            .find_by_key(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", "reservation_id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Reservation>> {
        self.assemblers.reservations.list_all().await
    }

    /// Open reservations of one client.
    pub async fn find_by_client(&self, client_id: ClientId) -> DomainResult<Vec<Reservation>> {
        self.assemblers.reservations.find_by_client(client_id).await
    }

    /// Merge the provided window into the stored reservation and persist.
    pub async fn update(
        &self,
        id: ReservationId,
        request: UpdateReservationRequest,
    ) -> DomainResult<Reservation> {
        let current = self.get(id).await?;

        let merged = Reservation::new(
            Some(id),
            current.reservation_date,
            request.desired_start.unwrap_or(current.desired_start),
            request.desired_end.unwrap_or(current.desired_end),
            current.client,
            current.vehicle,
        )?;

        let fields = ReservationAssembler::to_row_fields(&merged)?;
        self.store
            .update(&ReservationAssembler::TABLE, &Key::Int(id), fields)
            .await?;
        self.get(id).await
    }

    /// Cancel the reservation and release its vehicle, if it held one.
    pub async fn delete(&self, id: ReservationId) -> DomainResult<()> {
        let reservation = self.get(id).await?;
        self.store
            .delete(&ReservationAssembler::TABLE, &Key::Int(id))
            .await?;

        if let Some(mut vehicle) = reservation.vehicle {
            vehicle.release();
            self.store
                .update(
                    &VehicleAssembler::TABLE,
                    &Key::Text(vehicle.plate.clone()),
                    VehicleAssembler::to_row_fields(&vehicle),
                )
                .await?;
        }

        info!(reservation_id = id, "reservation deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
