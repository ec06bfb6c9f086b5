//! Fine lifecycle service
//!
//! Fines hang off rentals and never touch vehicle availability. The
//! client and vehicle finders walk the rental history, so they return
//! empty for unknown keys instead of failing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::assembly::{Assemblers, FineAssembler};
use crate::domain::{ClientId, Fine, FineId, RentalId};
use crate::infrastructure::storage::{Key, SharedRowStore};
use crate::shared::errors::{DomainError, DomainResult};

use super::{generated_id, validate_request};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFineRequest {
    pub rental_id: RentalId,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    /// Amount charged, strictly positive
    pub amount: Decimal,
    pub incident_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFineRequest {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub incident_date: Option<NaiveDate>,
}

pub struct FineService {
    assemblers: Assemblers,
    store: SharedRowStore,
}

impl FineService {
    pub fn new(assemblers: Assemblers, store: SharedRowStore) -> Self {
        Self { assemblers, store }
    }

    /// Charge a fine against an existing rental.
    pub async fn create(&self, request: CreateFineRequest) -> DomainResult<Fine> {
        validate_request(&request)?;

        let rental = self
            .assemblers
            .rentals
            .find_by_key(request.rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental", "rental_id", request.rental_id))?;

        let fine = Fine::new(
            None,
            request.description.trim(),
            request.amount,
            request.incident_date,
            rental,
        )?;

        let fields = FineAssembler::to_row_fields(&fine)?;
        let key = self.store.insert(&FineAssembler::TABLE, None, fields).await?;
        let id = generated_id(key)?;

        let created = self.get(id).await?;
        info!(fine_id = id, rental_id = request.rental_id, "fine created");
        Ok(created)
    }

    /// Fetch one fine or fail with not-found.
    pub async fn get(&self, id: FineId) -> DomainResult<Fine> {
        self.assemblers
            .fines
            .find_by_key(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Fine", "fine_id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Fine>> {
        self.assemblers.fines.list_all().await
    }

    /// Fines charged against one rental.
    pub async fn find_by_rental(&self, rental_id: RentalId) -> DomainResult<Vec<Fine>> {
        self.assemblers.fines.find_by_rental(rental_id).await
    }

    /// Fines accumulated by one client across all their rentals.
    pub async fn find_by_client(&self, client_id: ClientId) -> DomainResult<Vec<Fine>> {
        self.assemblers.fines.find_by_client(client_id).await
    }

    /// Fines incurred with one vehicle across all its rentals.
    pub async fn find_by_plate(&self, plate: &str) -> DomainResult<Vec<Fine>> {
        self.assemblers.fines.find_by_plate(plate).await
    }

    /// Merge the provided fields into the stored fine and persist.
    pub async fn update(&self, id: FineId, request: UpdateFineRequest) -> DomainResult<Fine> {
        let current = self.get(id).await?;

        let description = match &request.description {
            Some(description) => description.trim().to_owned(),
            None => current.description,
        };
        let merged = Fine::new(
            Some(id),
            description,
            request.amount.unwrap_or(current.amount),
            request.incident_date.unwrap_or(current.incident_date),
            current.rental,
        )?;

        let fields = FineAssembler::to_row_fields(&merged)?;
        self.store
            .update(&FineAssembler::TABLE, &Key::Int(id), fields)
            .await?;
        self.get(id).await
    }

    /// Remove the fine.
    pub async fn delete(&self, id: FineId) -> DomainResult<()> {
        self.get(id).await?;
        self.store
            .delete(&FineAssembler::TABLE, &Key::Int(id))
            .await?;
        info!(fine_id = id, "fine deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
