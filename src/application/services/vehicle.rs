//! Vehicle lifecycle service

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::assembly::{Assemblers, VehicleAssembler};
use crate::domain::{Availability, Vehicle};
use crate::infrastructure::storage::{Key, SharedRowStore};
use crate::shared::errors::{DomainError, DomainResult};

use super::validate_request;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, message = "plate is required"))]
    pub plate: String,
    #[validate(length(min = 1, message = "make is required"))]
    pub make: String,
    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,
    pub year: i32,
    pub daily_price: Decimal,
    /// Initial state, `Available` when omitted
    pub availability: Option<String>,
}

/// Absent fields keep their stored value. The plate is the key and cannot
/// change. Availability set here is an operator override; rentals and
/// reservations drive it otherwise.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateVehicleRequest {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub daily_price: Option<Decimal>,
    pub availability: Option<String>,
}

pub struct VehicleService {
    assemblers: Assemblers,
    store: SharedRowStore,
}

impl VehicleService {
    pub fn new(assemblers: Assemblers, store: SharedRowStore) -> Self {
        Self { assemblers, store }
    }

    fn parse_availability(text: &str) -> DomainResult<Availability> {
        Availability::from_str(text.trim()).ok_or_else(|| {
            DomainError::Validation(
                "availability must be Available or Unavailable".to_string(),
            )
        })
    }

    /// Register a new vehicle under its normalized plate.
    pub async fn create(&self, request: CreateVehicleRequest) -> DomainResult<Vehicle> {
        validate_request(&request)?;

        let availability = match request.availability.as_deref() {
            Some(text) => Self::parse_availability(text)?,
            None => Availability::default(),
        };
        let vehicle = Vehicle::new(
            request.plate,
            request.make.trim(),
            request.model.trim(),
            request.year,
            request.daily_price,
            availability,
        )?;

        if self
            .assemblers
            .vehicles
            .find_by_plate(&vehicle.plate)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "vehicle with plate {}",
                vehicle.plate
            )));
        }

        self.store
            .insert(
                &VehicleAssembler::TABLE,
                Some(Key::Text(vehicle.plate.clone())),
                VehicleAssembler::to_row_fields(&vehicle),
            )
            .await?;

        let created = self.get(&vehicle.plate).await?;
        info!(plate = %created.plate, "vehicle created");
        Ok(created)
    }

    /// Fetch one vehicle by plate (normalized) or fail with not-found.
    pub async fn get(&self, plate: &str) -> DomainResult<Vehicle> {
        self.assemblers
            .vehicles
            .find_by_plate(plate)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "plate", plate))
    }

    pub async fn list(&self) -> DomainResult<Vec<Vehicle>> {
        self.assemblers.vehicles.list_all().await
    }

    /// Merge the provided fields into the stored vehicle and persist.
    pub async fn update(&self, plate: &str, request: UpdateVehicleRequest) -> DomainResult<Vehicle> {
        let mut current = self.get(plate).await?;

        if let Some(make) = request.make {
            current.make = make.trim().to_string();
        }
        if let Some(model) = request.model {
            current.model = model.trim().to_string();
        }
        if let Some(year) = request.year {
            current.year = year;
        }
        if let Some(daily_price) = request.daily_price {
            current.daily_price = daily_price;
        }
        if let Some(text) = request.availability.as_deref() {
            current.availability = Self::parse_availability(text)?;
        }

        let merged = Vehicle::new(
            current.plate,
            current.make,
            current.model,
            current.year,
            current.daily_price,
            current.availability,
        )?;

        self.store
            .update(
                &VehicleAssembler::TABLE,
                &Key::Text(merged.plate.clone()),
                VehicleAssembler::to_row_fields(&merged),
            )
            .await?;
        self.get(&merged.plate).await
    }

    /// Remove the vehicle row. Rentals, reservations and maintenance that
    /// still reference the plate become integrity violations surfaced at
    /// assembly time.
    pub async fn delete(&self, plate: &str) -> DomainResult<()> {
        let vehicle = self.get(plate).await?;
        self.store
            .delete(&VehicleAssembler::TABLE, &Key::Text(vehicle.plate.clone()))
            .await?;
        info!(plate = %vehicle.plate, "vehicle deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
