//! User account domain entity

use super::client::ClientId;
use super::employee::EmployeeId;
use super::validation;
use crate::shared::errors::{DomainError, DomainResult};

pub type UserAccountId = i64;

/// Access role of a user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// Self-service client login, linked to a client profile
    Client,
    /// Front-desk staff login, linked to an employee profile
    ServiceAgent,
    /// Supervisor login, linked to an employee profile
    Supervisor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::ServiceAgent => "service-agent",
            Self::Supervisor => "supervisor",
        }
    }

    /// Strict parse of a stored role. Unknown text marks the row malformed.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "client" => Some(Self::Client),
            "service-agent" => Some(Self::ServiceAgent),
            "supervisor" => Some(Self::Supervisor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A login account. Depending on the role it references either a client or
/// an employee profile by key; the referenced aggregate is never nested
/// here, so assembling an account costs a single row.
#[derive(Debug, Clone)]
pub struct UserAccount {
    /// Store-generated key, `None` until the row is inserted
    pub id: Option<UserAccountId>,
    pub username: String,
    /// bcrypt hash, never the raw password
    pub password_hash: String,
    pub role: Role,
    /// Linked client profile, required for the client role
    pub client_id: Option<ClientId>,
    /// Linked employee profile, required for staff roles
    pub employee_id: Option<EmployeeId>,
}

impl UserAccount {
    pub fn new(
        id: Option<UserAccountId>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
        client_id: Option<ClientId>,
        employee_id: Option<EmployeeId>,
    ) -> DomainResult<Self> {
        let username = username.into();
        validation::username(&username)?;
        let password_hash = validation::required_text("password_hash", &password_hash.into())?;
        match role {
            Role::Client => {
                if client_id.is_none() {
                    return Err(DomainError::Validation(
                        "client_id is required for client accounts".to_string(),
                    ));
                }
            }
            Role::ServiceAgent | Role::Supervisor => {
                if employee_id.is_none() {
                    return Err(DomainError::Validation(
                        "employee_id is required for staff accounts".to_string(),
                    ));
                }
            }
        }
        Ok(Self {
            id,
            username,
            password_hash,
            role,
            client_id,
            employee_id,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_account_requires_client_reference() {
        let ok = UserAccount::new(Some(1), "ana.gomez", "$2b$hash", Role::Client, Some(1), None);
        assert!(ok.is_ok());

        let err =
            UserAccount::new(None, "ana.gomez", "$2b$hash", Role::Client, None, None).unwrap_err();
        assert!(err.to_string().contains("client_id"));
    }

    #[test]
    fn staff_accounts_require_employee_reference() {
        assert!(
            UserAccount::new(None, "luis", "$2b$hash", Role::ServiceAgent, None, Some(2)).is_ok()
        );
        assert!(UserAccount::new(None, "luis", "$2b$hash", Role::Supervisor, None, None).is_err());
    }

    #[test]
    fn username_is_validated() {
        assert!(UserAccount::new(None, "ab", "$2b$hash", Role::Client, Some(1), None).is_err());
        assert!(UserAccount::new(None, "bad user", "$2b$hash", Role::Client, Some(1), None).is_err());
    }

    #[test]
    fn role_parse_is_strict_and_round_trips() {
        for role in &[Role::Client, Role::ServiceAgent, Role::Supervisor] {
            assert_eq!(Role::from_str(role.as_str()).as_ref(), Some(role));
        }
        assert_eq!(Role::from_str("admin"), None);
    }
}
