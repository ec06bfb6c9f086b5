//! Lifecycle services
//!
//! One service per aggregate. Services resolve referenced aggregates,
//! construct through the domain layer, and write through the row store;
//! all reads go through the assemblers, so every aggregate a caller gets
//! back is fully wired. Lookup misses on referenced keys surface as
//! `NotFound` here, never as half-built aggregates.

mod client;
mod employee;
mod fine;
mod maintenance;
mod rental;
mod reservation;
mod user_account;
mod vehicle;

use validator::Validate;

use crate::assembly::{Assemblers, AssemblyOptions};
use crate::infrastructure::storage::{Key, SharedRowStore};
use crate::shared::errors::{DomainError, DomainResult};

pub use client::{ClientService, CreateClientRequest, UpdateClientRequest};
pub use employee::{CreateEmployeeRequest, EmployeeService, UpdateEmployeeRequest};
pub use fine::{CreateFineRequest, FineService, UpdateFineRequest};
pub use maintenance::{CreateMaintenanceRequest, MaintenanceService, UpdateMaintenanceRequest};
pub use rental::{CreateRentalRequest, RentalService, UpdateRentalRequest};
pub use reservation::{CreateReservationRequest, ReservationService, UpdateReservationRequest};
pub use user_account::{CreateUserAccountRequest, UpdateUserAccountRequest, UserAccountService};
pub use vehicle::{CreateVehicleRequest, UpdateVehicleRequest, VehicleService};

/// Flatten request-level validation failures into one domain error.
pub(crate) fn validate_request(request: &impl Validate) -> DomainResult<()> {
    request.validate().map_err(|errors| {
        let details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{:?}", e.code));
                    format!("{}: {}", field, message)
                })
            })
            .collect();

        if details.is_empty() {
            DomainError::Validation("Validation failed".to_string())
        } else {
            DomainError::Validation(details.join("; "))
        }
    })
}

/// Auto-increment tables always hand back integer keys.
pub(crate) fn generated_id(key: Key) -> DomainResult<i64> {
    match key {
        Key::Int(id) => Ok(id),
        Key::Text(text) => Err(DomainError::Storage(format!(
            "expected a generated integer key, got {text}"
        ))),
    }
}

/// The full service set over one row store, wired once at startup.
pub struct Services {
    pub clients: ClientService,
    pub employees: EmployeeService,
    pub vehicles: VehicleService,
    pub users: UserAccountService,
    pub rentals: RentalService,
    pub reservations: ReservationService,
    pub fines: FineService,
    pub maintenance: MaintenanceService,
}

impl Services {
    pub fn new(store: SharedRowStore, options: AssemblyOptions) -> Self {
        let assemblers = Assemblers::new(store.clone(), options);
        Self {
            clients: ClientService::new(assemblers.clone(), store.clone()),
            employees: EmployeeService::new(assemblers.clone(), store.clone()),
            vehicles: VehicleService::new(assemblers.clone(), store.clone()),
            users: UserAccountService::new(assemblers.clone(), store.clone()),
            rentals: RentalService::new(assemblers.clone(), store.clone()),
            reservations: ReservationService::new(assemblers.clone(), store.clone()),
            fines: FineService::new(assemblers.clone(), store.clone()),
            maintenance: MaintenanceService::new(assemblers, store),
        }
    }
}
