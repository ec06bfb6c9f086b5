//! Serialized views of the assembled aggregates
//!
//! Forward references are nested in full; the back-reference id lists
//! the domain keeps for navigation never leave the process. Credentials
//! are stripped from the account view.

mod client;
mod employee;
mod fine;
mod maintenance;
mod rental;
mod reservation;
mod user_account;
mod vehicle;

pub use client::ClientDto;
pub use employee::EmployeeDto;
pub use fine::FineDto;
pub use maintenance::MaintenanceDto;
pub use rental::RentalDto;
pub use reservation::ReservationDto;
pub use user_account::UserAccountDto;
pub use vehicle::VehicleDto;
