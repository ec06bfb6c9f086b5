//! Employee assembly

use crate::domain::employee::{Employee, EmployeeId};
use crate::infrastructure::storage::{
    nullable_int, Filter, Key, Row, SharedRowStore, TableSpec, Value,
};
use crate::shared::errors::DomainResult;

use super::AssemblyOptions;

/// Builds [`Employee`] aggregates from EMPLOYEE rows.
pub struct EmployeeAssembler {
    store: SharedRowStore,
    options: AssemblyOptions,
}

impl EmployeeAssembler {
    pub const TABLE: TableSpec = TableSpec {
        table: "EMPLOYEE",
        key_column: "employee_id",
        columns: &["name", "surname", "national_id", "position", "supervisor_id"],
    };

    pub fn new(store: SharedRowStore, options: AssemblyOptions) -> Self {
        Self { store, options }
    }

    /// Non-key column values in declared order.
    pub fn to_row_fields(employee: &Employee) -> Vec<Value> {
        vec![
            Value::from(employee.name.as_str()),
            Value::from(employee.surname.as_str()),
            Value::from(employee.national_id.as_str()),
            Value::from(employee.position.as_str()),
            Value::opt(employee.supervisor_id),
        ]
    }

    fn decode(row: &Row) -> Option<(EmployeeId, String, String, String, String, Option<i64>)> {
        Some((
            row.first()?.as_int()?,
            row.get(1)?.as_text()?.to_string(),
            row.get(2)?.as_text()?.to_string(),
            row.get(3)?.as_text()?.to_string(),
            row.get(4)?.as_text()?.to_string(),
            nullable_int(row.get(5)?)?,
        ))
    }

    /// Build an employee from its raw row. The supervisor stays a plain
    /// key; nothing is resolved here.
    pub fn assemble(&self, row: &Row) -> Option<Employee> {
        let Some((id, name, surname, national_id, position, supervisor_id)) = Self::decode(row)
        else {
            self.options.report_malformed("employee", row);
            return None;
        };
        match Employee::new(Some(id), name, surname, national_id, position, supervisor_id) {
            Ok(employee) => Some(employee),
            Err(error) => {
                self.options.report_invalid("employee", id, &error);
                None
            }
        }
    }

    pub async fn find_by_key(&self, id: EmployeeId) -> DomainResult<Option<Employee>> {
        let row = self.store.get_by_key(&Self::TABLE, &Key::Int(id)).await?;
        Ok(row.as_ref().and_then(|row| self.assemble(row)))
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Employee>> {
        let rows = self.store.list_all(&Self::TABLE).await?;
        Ok(rows.iter().filter_map(|row| self.assemble(row)).collect())
    }

    pub async fn find_by_national_id(&self, national_id: &str) -> DomainResult<Option<Employee>> {
        let rows = self
            .store
            .list_where(&Self::TABLE, Filter::eq("national_id", national_id))
            .await?;
        Ok(rows.iter().find_map(|row| self.assemble(row)))
    }

    /// Resolve the lazy supervisor reference with one extra lookup.
    /// A dangling supervisor key resolves to `None`.
    pub async fn supervisor_of(&self, employee: &Employee) -> DomainResult<Option<Employee>> {
        match employee.supervisor_id {
            Some(id) => self.find_by_key(id).await,
            None => Ok(None),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
