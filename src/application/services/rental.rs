//! Rental lifecycle service
//!
//! Creating a rental claims the vehicle durably; deleting one releases it.
//! The release is unconditional: the two-state machine keeps no count of
//! other claims on the same vehicle.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::assembly::{Assemblers, RentalAssembler, VehicleAssembler};
use crate::domain::{ClientId, EmployeeId, Rental, RentalId};
use crate::infrastructure::storage::{Key, SharedRowStore};
use crate::shared::errors::{DomainError, DomainResult};

use super::{generated_id, validate_request};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRentalRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Agreed price for the whole rental, non-negative
    pub total_cost: Decimal,
    pub client_id: ClientId,
    pub employee_id: EmployeeId,
    #[validate(length(min = 1, message = "plate is required"))]
    pub plate: String,
}

/// Only the agreed dates and price can change; the client, employee and
/// vehicle identify the rental and are fixed at creation.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRentalRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_cost: Option<Decimal>,
}

pub struct RentalService {
    assemblers: Assemblers,
    store: SharedRowStore,
}

impl RentalService {
    pub fn new(assemblers: Assemblers, store: SharedRowStore) -> Self {
        Self { assemblers, store }
    }

    /// Record a new rental, claiming the vehicle.
    pub async fn create(&self, request: CreateRentalRequest) -> DomainResult<Rental> {
        validate_request(&request)?;

        let client = self
            .assemblers
            .clients
            .find_by_key(request.client_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Client", "client_id", request.client_id))?;
        let employee = self
            .assemblers
            .employees
            .find_by_key(request.employee_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Employee", "employee_id", request.employee_id)
            })?;
        let mut vehicle = self
            .assemblers
            .vehicles
            .find_by_plate(&request.plate)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "plate", &request.plate))?;

        let rental = Rental::new(
            None,
            request.start_date,
            request.end_date,
            request.total_cost,
            Utc::now().date_naive(),
            client,
            employee,
            vehicle.clone(),
        )?;

        let fields = RentalAssembler::to_row_fields(&rental)?;
        let key = self.store.insert(&RentalAssembler::TABLE, None, fields).await?;
        let id = generated_id(key)?;

        // The claim outlives this request: write the state change back.
        vehicle.rent();
        self.store
            .update(
                &VehicleAssembler::TABLE,
                &Key::Text(vehicle.plate.clone()),
                VehicleAssembler::to_row_fields(&vehicle),
            )
            .await?;

        let created = self.get(id).await?;
        info!(
            rental_id = id,
            client_id = request.client_id,
            plate = %vehicle.plate,
            "rental created"
        );
        Ok(created)
    }

    /// Fetch one rental or fail with not-found.
    pub async fn get(&self, id: RentalId) -> DomainResult<Rental> {
        self.assemblers
            .rentals
            .find_by_key(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental", "rental_id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Rental>> {
        self.assemblers.rentals.list_all().await
    }

    /// Rental history of one client.
    pub async fn find_by_client(&self, client_id: ClientId) -> DomainResult<Vec<Rental>> {
        self.assemblers.rentals.find_by_client(client_id).await
    }

    /// Rental history of one vehicle.
    pub async fn find_by_plate(&self, plate: &str) -> DomainResult<Vec<Rental>> {
        self.assemblers.rentals.find_by_plate(plate).await
    }

    /// Merge the provided fields into the stored rental and persist.
    pub async fn update(&self, id: RentalId, request: UpdateRentalRequest) -> DomainResult<Rental> {
        let current = self.get(id).await?;

        let merged = Rental::new(
            Some(id),
            request.start_date.unwrap_or(current.start_date),
            request.end_date.unwrap_or(current.end_date),
            request.total_cost.unwrap_or(current.total_cost),
            current.created_date,
            current.client,
            current.employee,
            current.vehicle,
        )?;

        let fields = RentalAssembler::to_row_fields(&merged)?;
        self.store
            .update(&RentalAssembler::TABLE, &Key::Int(id), fields)
            .await?;
        self.get(id).await
    }

    /// Remove the rental and release its vehicle.
    pub async fn delete(&self, id: RentalId) -> DomainResult<()> {
        let rental = self.get(id).await?;
        self.store
            .delete(&RentalAssembler::TABLE, &Key::Int(id))
            .await?;

        let mut vehicle = rental.vehicle;
        vehicle.release();
        self.store
            .update(
                &VehicleAssembler::TABLE,
                &Key::Text(vehicle.plate.clone()),
                VehicleAssembler::to_row_fields(&vehicle),
            )
            .await?;

        info!(rental_id = id, plate = %vehicle.plate, "rental deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
