//! Employee domain entity

use super::rental::RentalId;
use super::validation;
use crate::shared::errors::DomainResult;

pub type EmployeeId = i64;

/// A staff member who processes rentals.
///
/// The supervisor is kept as a lazy key reference instead of a nested
/// aggregate, so assembling an employee never recurses into another one.
#[derive(Debug, Clone)]
pub struct Employee {
    /// Store-generated key, `None` until the row is inserted
    pub id: Option<EmployeeId>,
    pub name: String,
    pub surname: String,
    /// National identity number, 7 or 8 digits
    pub national_id: String,
    pub position: String,
    /// Key of the supervising employee, if any
    pub supervisor_id: Option<EmployeeId>,
    /// Keys of rentals processed by this employee
    pub rentals: Vec<RentalId>,
}

impl Employee {
    pub fn new(
        id: Option<EmployeeId>,
        name: impl Into<String>,
        surname: impl Into<String>,
        national_id: impl Into<String>,
        position: impl Into<String>,
        supervisor_id: Option<EmployeeId>,
    ) -> DomainResult<Self> {
        let national_id = national_id.into();
        validation::national_id(&national_id)?;
        Ok(Self {
            id,
            name: name.into(),
            surname: surname.into(),
            national_id,
            position: position.into(),
            supervisor_id,
            rentals: Vec::new(),
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
