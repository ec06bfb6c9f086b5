//! Employee DTO

use serde::{Deserialize, Serialize};

use crate::domain::{Employee, EmployeeId};

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub id: Option<EmployeeId>,
    pub name: String,
    pub surname: String,
    pub national_id: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<EmployeeId>,
}

impl EmployeeDto {
    pub fn from_domain(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            surname: employee.surname,
            national_id: employee.national_id,
            position: employee.position,
            supervisor_id: employee.supervisor_id,
        }
    }
}
