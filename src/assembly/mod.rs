//! Entity assemblers: raw rows in, fully wired aggregates out.
//!
//! Each aggregate has one assembler. Leaf assemblers decode and validate a
//! single row; composite assemblers additionally resolve foreign keys by
//! recursing into the referenced entity's assembler, one store round trip
//! at a time. A row that cannot produce a valid aggregate (malformed
//! scalar, failed validation, or a reference whose target row is gone)
//! yields no aggregate: single lookups surface that as `None`, listings
//! skip the row. Store failures are never absorbed.

mod client;
mod employee;
mod fine;
mod maintenance;
mod rental;
mod reservation;
mod user_account;
mod vehicle;

use std::sync::Arc;

use tracing::warn;

use crate::infrastructure::storage::{Row, SharedRowStore};
use crate::shared::errors::DomainError;

pub use client::ClientAssembler;
pub use employee::EmployeeAssembler;
pub use fine::FineAssembler;
pub use maintenance::MaintenanceAssembler;
pub use rental::RentalAssembler;
pub use reservation::ReservationAssembler;
pub use user_account::UserAccountAssembler;
pub use vehicle::VehicleAssembler;

fn record_dropped_row(entity: &'static str, reason: &'static str) {
    metrics::counter!("assembly_rows_dropped", "entity" => entity, "reason" => reason).increment(1);
}

/// Diagnostics switches shared by every assembler.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyOptions {
    /// Warn on each dropped row. Counters increment regardless.
    pub log_dropped_rows: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            log_dropped_rows: true,
        }
    }
}

impl AssemblyOptions {
    /// Row could not be decoded into the expected scalar shape.
    pub(crate) fn report_malformed(&self, entity: &'static str, row: &Row) {
        record_dropped_row(entity, "malformed");
        if self.log_dropped_rows {
            warn!(entity, key = ?row.first(), "dropped malformed row");
        }
    }

    /// Row decoded but its values failed domain validation.
    pub(crate) fn report_invalid(
        &self,
        entity: &'static str,
        key: impl std::fmt::Display,
        error: &DomainError,
    ) {
        record_dropped_row(entity, "invalid");
        if self.log_dropped_rows {
            warn!(entity, %key, %error, "dropped row failing validation");
        }
    }

    /// Row references a target row that no longer exists.
    pub(crate) fn report_orphaned(
        &self,
        entity: &'static str,
        key: impl std::fmt::Display,
        reference: &'static str,
        target: impl std::fmt::Display,
    ) {
        record_dropped_row(entity, "orphaned");
        if self.log_dropped_rows {
            warn!(entity, %key, reference, %target, "dropped row with missing reference");
        }
    }
}

/// The full assembler set over one row store, wired once and shared.
#[derive(Clone)]
pub struct Assemblers {
    pub clients: Arc<ClientAssembler>,
    pub employees: Arc<EmployeeAssembler>,
    pub vehicles: Arc<VehicleAssembler>,
    pub users: Arc<UserAccountAssembler>,
    pub rentals: Arc<RentalAssembler>,
    pub reservations: Arc<ReservationAssembler>,
    pub fines: Arc<FineAssembler>,
    pub maintenance: Arc<MaintenanceAssembler>,
}

impl Assemblers {
    pub fn new(store: SharedRowStore, options: AssemblyOptions) -> Self {
        let clients = Arc::new(ClientAssembler::new(store.clone(), options));
        let employees = Arc::new(EmployeeAssembler::new(store.clone(), options));
        let vehicles = Arc::new(VehicleAssembler::new(store.clone(), options));
        let users = Arc::new(UserAccountAssembler::new(store.clone(), options));
        let rentals = Arc::new(RentalAssembler::new(
            store.clone(),
            options,
            clients.clone(),
            employees.clone(),
            vehicles.clone(),
        ));
        let reservations = Arc::new(ReservationAssembler::new(
            store.clone(),
            options,
            clients.clone(),
            vehicles.clone(),
        ));
        let fines = Arc::new(FineAssembler::new(store.clone(), options, rentals.clone()));
        let maintenance = Arc::new(MaintenanceAssembler::new(store, options, vehicles.clone()));
        Self {
            clients,
            employees,
            vehicles,
            users,
            rentals,
            reservations,
            fines,
            maintenance,
        }
    }
}
