//! User account lifecycle service and authentication

use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::assembly::{Assemblers, UserAccountAssembler};
use crate::domain::{validation, Role, UserAccount, UserAccountId};
use crate::infrastructure::storage::{Key, SharedRowStore};
use crate::shared::errors::{DomainError, DomainResult};

use super::{generated_id, validate_request};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserAccountRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// `client`, `service-agent` or `supervisor`
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
    /// Linked client profile, required for the client role
    pub client_id: Option<i64>,
    /// Linked employee profile, required for staff roles
    pub employee_id: Option<i64>,
}

/// Only the login credentials can change; the role and profile links are
/// fixed at creation.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserAccountRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub struct UserAccountService {
    assemblers: Assemblers,
    store: SharedRowStore,
}

impl UserAccountService {
    pub fn new(assemblers: Assemblers, store: SharedRowStore) -> Self {
        Self { assemblers, store }
    }

    fn hash_password(password: &str) -> DomainResult<String> {
        validation::password(password)?;
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))
    }

    /// Register a new account. The raw password is checked, hashed and
    /// never stored.
    pub async fn create(&self, request: CreateUserAccountRequest) -> DomainResult<UserAccount> {
        validate_request(&request)?;

        let role = Role::from_str(request.role.trim()).ok_or_else(|| {
            DomainError::Validation(
                "role must be client, service-agent or supervisor".to_string(),
            )
        })?;

        if let Some(client_id) = request.client_id {
            if self.assemblers.clients.find_by_key(client_id).await?.is_none() {
                return Err(DomainError::not_found("Client", "client_id", client_id));
            }
        }
        if let Some(employee_id) = request.employee_id {
            if self
                .assemblers
                .employees
                .find_by_key(employee_id)
                .await?
                .is_none()
            {
                return Err(DomainError::not_found("Employee", "employee_id", employee_id));
            }
        }

        let username = request.username.trim().to_string();
        if self
            .assemblers
            .users
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "user account with username {}",
                username
            )));
        }

        let password_hash = Self::hash_password(&request.password)?;
        let account = UserAccount::new(
            None,
            username,
            password_hash,
            role,
            request.client_id,
            request.employee_id,
        )?;

        let key = self
            .store
            .insert(
                &UserAccountAssembler::TABLE,
                None,
                UserAccountAssembler::to_row_fields(&account),
            )
            .await?;
        let id = generated_id(key)?;

        let created = self.get(id).await?;
        info!(user_id = id, username = %created.username, "user account created");
        Ok(created)
    }

    /// Fetch one account or fail with not-found.
    pub async fn get(&self, id: UserAccountId) -> DomainResult<UserAccount> {
        self.assemblers
            .users
            .find_by_key(id)
            .await?
            .ok_or_else(|| DomainError::not_found("UserAccount", "user_id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<UserAccount>> {
        self.assemblers.users.list_all().await
    }

    /// Check a username/password pair and return the matching account.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<UserAccount> {
        let username = username.trim();
        let Some(account) = self.assemblers.users.find_by_username(username).await? else {
            return Err(DomainError::not_found("UserAccount", "username", username));
        };

        let valid = bcrypt::verify(password, &account.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Validation("Invalid credentials".to_string()));
        }
        Ok(account)
    }

    /// Change the username or password; a new password is re-hashed.
    pub async fn update(
        &self,
        id: UserAccountId,
        request: UpdateUserAccountRequest,
    ) -> DomainResult<UserAccount> {
        let mut current = self.get(id).await?;

        if let Some(username) = request.username {
            current.username = username.trim().to_string();
        }
        if let Some(password) = request.password.as_deref() {
            current.password_hash = Self::hash_password(password)?;
        }

        let merged = UserAccount::new(
            Some(id),
            current.username,
            current.password_hash,
            current.role,
            current.client_id,
            current.employee_id,
        )?;

        self.store
            .update(
                &UserAccountAssembler::TABLE,
                &Key::Int(id),
                UserAccountAssembler::to_row_fields(&merged),
            )
            .await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: UserAccountId) -> DomainResult<()> {
        self.get(id).await?;
        self.store
            .delete(&UserAccountAssembler::TABLE, &Key::Int(id))
            .await?;
        info!(user_id = id, "user account deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
