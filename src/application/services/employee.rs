//! Employee lifecycle service

use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::assembly::{Assemblers, EmployeeAssembler};
use crate::domain::{Employee, EmployeeId};
use crate::infrastructure::storage::{Key, SharedRowStore};
use crate::shared::errors::{DomainError, DomainResult};

use super::{generated_id, validate_request};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "surname is required"))]
    pub surname: String,
    #[validate(length(min = 1, message = "national_id is required"))]
    pub national_id: String,
    #[validate(length(min = 1, message = "position is required"))]
    pub position: String,
    pub supervisor_id: Option<EmployeeId>,
}

/// Absent fields keep their stored value. The supervisor field is doubled:
/// `Some(None)` clears the supervisor, `Some(Some(id))` reassigns it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub national_id: Option<String>,
    pub position: Option<String>,
    pub supervisor_id: Option<Option<EmployeeId>>,
}

pub struct EmployeeService {
    assemblers: Assemblers,
    store: SharedRowStore,
}

impl EmployeeService {
    pub fn new(assemblers: Assemblers, store: SharedRowStore) -> Self {
        Self { assemblers, store }
    }

    /// Register a new employee and return the stored aggregate.
    pub async fn create(&self, request: CreateEmployeeRequest) -> DomainResult<Employee> {
        validate_request(&request)?;

        if let Some(supervisor_id) = request.supervisor_id {
            self.get(supervisor_id).await.map_err(|_| {
                DomainError::not_found("Employee", "supervisor_id", supervisor_id)
            })?;
        }

        let employee = Employee::new(
            None,
            request.name.trim(),
            request.surname.trim(),
            request.national_id.trim(),
            request.position.trim(),
            request.supervisor_id,
        )?;

        if self
            .assemblers
            .employees
            .find_by_national_id(&employee.national_id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "employee with national_id {}",
                employee.national_id
            )));
        }

        let key = self
            .store
            .insert(
                &EmployeeAssembler::TABLE,
                None,
                EmployeeAssembler::to_row_fields(&employee),
            )
            .await?;
        let id = generated_id(key)?;

        let created = self.get(id).await?;
        info!(employee_id = id, "employee created");
        Ok(created)
    }

    /// Fetch one employee or fail with not-found.
    pub async fn get(&self, id: EmployeeId) -> DomainResult<Employee> {
        self.assemblers
            .employees
            .find_by_key(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee", "employee_id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Employee>> {
        self.assemblers.employees.list_all().await
    }

    /// Resolve the employee's supervisor, if one is assigned and still exists.
    pub async fn supervisor(&self, id: EmployeeId) -> DomainResult<Option<Employee>> {
        let employee = self.get(id).await?;
        self.assemblers.employees.supervisor_of(&employee).await
    }

    /// Merge the provided fields into the stored employee and persist.
    pub async fn update(
        &self,
        id: EmployeeId,
        request: UpdateEmployeeRequest,
    ) -> DomainResult<Employee> {
        let mut current = self.get(id).await?;

        if let Some(name) = request.name {
            current.name = name.trim().to_string();
        }
        if let Some(surname) = request.surname {
            current.surname = surname.trim().to_string();
        }
        if let Some(national_id) = request.national_id {
            current.national_id = national_id.trim().to_string();
        }
        if let Some(position) = request.position {
            current.position = position.trim().to_string();
        }
        if let Some(supervisor_id) = request.supervisor_id {
            if let Some(supervisor_id) = supervisor_id {
                self.get(supervisor_id).await.map_err(|_| {
                    DomainError::not_found("Employee", "supervisor_id", supervisor_id)
                })?;
            }
            current.supervisor_id = supervisor_id;
        }

        let merged = Employee::new(
            Some(id),
            current.name,
            current.surname,
            current.national_id,
            current.position,
            current.supervisor_id,
        )?;

        self.store
            .update(
                &EmployeeAssembler::TABLE,
                &Key::Int(id),
                EmployeeAssembler::to_row_fields(&merged),
            )
            .await?;
        self.get(id).await
    }

    /// Remove the employee row. Rentals that still reference it become
    /// integrity violations surfaced at assembly time.
    pub async fn delete(&self, id: EmployeeId) -> DomainResult<()> {
        self.get(id).await?;
        self.store
            .delete(&EmployeeAssembler::TABLE, &Key::Int(id))
            .await?;
        info!(employee_id = id, "employee deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
