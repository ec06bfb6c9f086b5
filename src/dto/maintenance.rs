//! Maintenance DTO

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{MaintenanceId, MaintenanceRecord};

use super::VehicleDto;

#[derive(Debug, Serialize, Deserialize)]
pub struct MaintenanceDto {
    pub id: Option<MaintenanceId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub service_type: String,
    pub cost: Decimal,
    pub vehicle: VehicleDto,
}

impl MaintenanceDto {
    pub fn from_domain(record: MaintenanceRecord) -> Self {
        Self {
            id: record.id,
            start_date: record.start_date,
            end_date: record.end_date,
            service_type: record.service_type,
            cost: record.cost,
            vehicle: VehicleDto::from_domain(record.vehicle),
        }
    }
}
