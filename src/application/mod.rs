//! Application layer
//!
//! Lifecycle services over the assembled domain, one per aggregate.

pub mod services;

// Re-export key types for convenience
pub use services::{
    ClientService, CreateClientRequest, CreateEmployeeRequest, CreateFineRequest,
    CreateMaintenanceRequest, CreateRentalRequest, CreateReservationRequest,
    CreateUserAccountRequest, CreateVehicleRequest, EmployeeService, FineService,
    MaintenanceService, RentalService, ReservationService, Services, UpdateClientRequest,
    UpdateEmployeeRequest, UpdateFineRequest, UpdateMaintenanceRequest, UpdateRentalRequest,
    UpdateReservationRequest, UpdateUserAccountRequest, UpdateVehicleRequest, UserAccountService,
    VehicleService,
};
