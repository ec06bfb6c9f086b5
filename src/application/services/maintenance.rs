//! Maintenance lifecycle service
//!
//! Shop visits are bookkeeping only: recording one never touches the
//! vehicle's availability.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::assembly::{Assemblers, MaintenanceAssembler};
use crate::domain::{MaintenanceId, MaintenanceRecord};
use crate::infrastructure::storage::{Key, SharedRowStore};
use crate::shared::errors::{DomainError, DomainResult};

use super::{generated_id, validate_request};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    #[validate(length(min = 1, message = "plate is required"))]
    pub plate: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(min = 1, message = "service_type is required"))]
    pub service_type: String,
    /// Workshop bill, non-negative
    pub cost: Decimal,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMaintenanceRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub service_type: Option<String>,
    pub cost: Option<Decimal>,
}

pub struct MaintenanceService {
    assemblers: Assemblers,
    store: SharedRowStore,
}

impl MaintenanceService {
    pub fn new(assemblers: Assemblers, store: SharedRowStore) -> Self {
        Self { assemblers, store }
    }

    /// Record a shop visit for an existing vehicle.
    pub async fn create(&self, request: CreateMaintenanceRequest) -> DomainResult<MaintenanceRecord> {
        validate_request(&request)?;

        let vehicle = self
            .assemblers
            .vehicles
            .find_by_plate(&request.plate)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "plate", &request.plate))?;

        let record = MaintenanceRecord::new(
            None,
            request.start_date,
            request.end_date,
            request.service_type.trim(),
            request.cost,
            vehicle,
        )?;

        let fields = MaintenanceAssembler::to_row_fields(&record);
        let key = self
            .store
            .insert(&MaintenanceAssembler::TABLE, None, fields)
            .await?;
        let id = generated_id(key)?;

        let created = self.get(id).await?;
        info!(maintenance_id = id, plate = %created.vehicle.plate, "maintenance recorded");
        Ok(created)
    }

    /// Fetch one record or fail with not-found.
    pub async fn get(&self, id: MaintenanceId) -> DomainResult<MaintenanceRecord> {
        self.assemblers
            .maintenance
            .find_by_key(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Maintenance", "maintenance_id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<MaintenanceRecord>> {
        self.assemblers.maintenance.list_all().await
    }

    /// Service history of one vehicle. The vehicle itself must exist;
    /// an empty history is a normal answer, an unknown plate is not.
    pub async fn find_by_plate(&self, plate: &str) -> DomainResult<Vec<MaintenanceRecord>> {
        self.assemblers
            .vehicles
            .find_by_plate(plate)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "plate", plate))?;
        self.assemblers.maintenance.find_by_plate(plate).await
    }

    /// Merge the provided fields into the stored record and persist.
    pub async fn update(
        &self,
        id: MaintenanceId,
        request: UpdateMaintenanceRequest,
    ) -> DomainResult<MaintenanceRecord> {
        let current = self.get(id).await?;

        let service_type = match &request.service_type {
            Some(service_type) => service_type.trim().to_owned(),
            None => current.service_type,
        };
        let merged = MaintenanceRecord::new(
            Some(id),
            request.start_date.unwrap_or(current.start_date),
            request.end_date.unwrap_or(current.end_date),
            service_type,
            request.cost.unwrap_or(current.cost),
            current.vehicle,
        )?;

        let fields = MaintenanceAssembler::to_row_fields(&merged);
        self.store
            .update(&MaintenanceAssembler::TABLE, &Key::Int(id), fields)
            .await?;
        self.get(id).await
    }

    /// Remove the record.
    pub async fn delete(&self, id: MaintenanceId) -> DomainResult<()> {
        self.get(id).await?;
        self.store
            .delete(&MaintenanceAssembler::TABLE, &Key::Int(id))
            .await?;
        info!(maintenance_id = id, "maintenance record deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
