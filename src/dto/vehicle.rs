//! Vehicle DTO

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Vehicle;

#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleDto {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub daily_price: Decimal,
    pub availability: String,
}

impl VehicleDto {
    pub fn from_domain(vehicle: Vehicle) -> Self {
        Self {
            plate: vehicle.plate,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            daily_price: vehicle.daily_price,
            availability: vehicle.availability.to_string(),
        }
    }
}
