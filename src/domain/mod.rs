pub mod client;
pub mod employee;
pub mod fine;
pub mod maintenance;
pub mod registrar;
pub mod rental;
pub mod reservation;
pub mod user_account;
pub mod validation;
pub mod vehicle;

// Re-export commonly used types
pub use client::{Client, ClientId};
pub use employee::{Employee, EmployeeId};
pub use fine::{Fine, FineId};
pub use maintenance::{MaintenanceId, MaintenanceRecord};
pub use rental::{Rental, RentalId};
pub use reservation::{Reservation, ReservationId};
pub use user_account::{Role, UserAccount, UserAccountId};
pub use vehicle::{Availability, Vehicle};

pub use crate::shared::errors::{DomainError, DomainResult};
