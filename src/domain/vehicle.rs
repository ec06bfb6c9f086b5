//! Vehicle domain entity and its availability state machine

use rust_decimal::Decimal;

use super::maintenance::MaintenanceId;
use super::rental::RentalId;
use super::reservation::ReservationId;
use super::validation;
use crate::shared::errors::DomainResult;

/// Vehicle availability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Free to be rented or reserved
    Available,
    /// Claimed by an active rental or reservation
    Unavailable,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
        }
    }

    /// Strict parse of a stored state. Unknown text marks the row malformed.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(Self::Available),
            "Unavailable" => Some(Self::Unavailable),
            _ => None,
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self::Available
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fleet vehicle, keyed by its license plate.
#[derive(Debug, Clone)]
pub struct Vehicle {
    /// Natural key: normalized plate, 6-7 uppercase alphanumerics
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Rental price per day
    pub daily_price: Decimal,
    pub availability: Availability,
    /// Keys of rentals that claimed this vehicle
    pub rentals: Vec<RentalId>,
    /// Keys of reservations targeting this vehicle
    pub reservations: Vec<ReservationId>,
    /// Keys of maintenance records for this vehicle
    pub maintenance: Vec<MaintenanceId>,
}

impl Vehicle {
    pub fn new(
        plate: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        daily_price: Decimal,
        availability: Availability,
    ) -> DomainResult<Self> {
        let plate = validation::plate(&plate.into())?;
        validation::non_negative("daily_price", daily_price)?;
        Ok(Self {
            plate,
            make: make.into(),
            model: model.into(),
            year,
            daily_price,
            availability,
            rentals: Vec::new(),
            reservations: Vec::new(),
            maintenance: Vec::new(),
        })
    }

    /// Claim by a rental. Renting an already-unavailable vehicle is silent.
    pub fn rent(&mut self) {
        self.availability = Availability::Unavailable;
    }

    /// Claim by a reservation.
    pub fn reserve(&mut self) {
        self.availability = Availability::Unavailable;
    }

    /// Free the vehicle when a rental or reservation ends.
    pub fn release(&mut self) {
        self.availability = Availability::Available;
    }

    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }
}

// ── Tests ──────────────────────────────────────────────────────
