//! User account DTO

use serde::{Deserialize, Serialize};

use crate::domain::{ClientId, EmployeeId, UserAccount, UserAccountId};

/// Account view without the credential. The hash stays server side.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserAccountDto {
    pub id: Option<UserAccountId>,
    pub username: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
}

impl UserAccountDto {
    pub fn from_domain(account: UserAccount) -> Self {
        Self {
            id: account.id,
            username: account.username,
            role: account.role.to_string(),
            client_id: account.client_id,
            employee_id: account.employee_id,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn the_hash_never_leaves() {
        let account = UserAccount::new(
            Some(1),
            "ana.gomez",
            "$2b$12$secret",
            Role::Client,
            Some(4),
            None,
        )
        .unwrap();

        let json = serde_json::to_value(UserAccountDto::from_domain(account)).unwrap();
        assert_eq!(json["username"], "ana.gomez");
        assert_eq!(json["role"], "client");
        assert_eq!(json["client_id"], 4);
        assert!(json.get("password_hash").is_none());
        assert!(json.get("employee_id").is_none());
    }
}
