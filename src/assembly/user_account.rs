//! User account assembly

use crate::domain::user_account::{Role, UserAccount, UserAccountId};
use crate::infrastructure::storage::{
    nullable_int, Filter, Key, Row, SharedRowStore, TableSpec, Value,
};
use crate::shared::errors::DomainResult;

use super::AssemblyOptions;

/// Builds [`UserAccount`] aggregates from USER_ACCOUNT rows.
///
/// Accounts reference their client or employee profile by key only, so
/// assembly never recurses; the lifecycle service checks the reference
/// exists when the account is created.
pub struct UserAccountAssembler {
    store: SharedRowStore,
    options: AssemblyOptions,
}

impl UserAccountAssembler {
    pub const TABLE: TableSpec = TableSpec {
        table: "USER_ACCOUNT",
        key_column: "user_id",
        columns: &["username", "password_hash", "role", "client_id", "employee_id"],
    };

    pub fn new(store: SharedRowStore, options: AssemblyOptions) -> Self {
        Self { store, options }
    }

    /// Non-key column values in declared order.
    pub fn to_row_fields(account: &UserAccount) -> Vec<Value> {
        vec![
            Value::from(account.username.as_str()),
            Value::from(account.password_hash.as_str()),
            Value::from(account.role.as_str()),
            Value::opt(account.client_id),
            Value::opt(account.employee_id),
        ]
    }

    fn decode(
        row: &Row,
    ) -> Option<(UserAccountId, String, String, Role, Option<i64>, Option<i64>)> {
        Some((
            row.first()?.as_int()?,
            row.get(1)?.as_text()?.to_string(),
            row.get(2)?.as_text()?.to_string(),
            Role::from_str(row.get(3)?.as_text()?)?,
            nullable_int(row.get(4)?)?,
            nullable_int(row.get(5)?)?,
        ))
    }

    /// Build an account from its raw row. An unknown stored role counts as
    /// a malformed row.
    pub fn assemble(&self, row: &Row) -> Option<UserAccount> {
        let Some((id, username, password_hash, role, client_id, employee_id)) = Self::decode(row)
        else {
            self.options.report_malformed("user_account", row);
            return None;
        };
        match UserAccount::new(Some(id), username, password_hash, role, client_id, employee_id) {
            Ok(account) => Some(account),
            Err(error) => {
                self.options.report_invalid("user_account", id, &error);
                None
            }
        }
    }

    pub async fn find_by_key(&self, id: UserAccountId) -> DomainResult<Option<UserAccount>> {
        let row = self.store.get_by_key(&Self::TABLE, &Key::Int(id)).await?;
        Ok(row.as_ref().and_then(|row| self.assemble(row)))
    }

    pub async fn list_all(&self) -> DomainResult<Vec<UserAccount>> {
        let rows = self.store.list_all(&Self::TABLE).await?;
        Ok(rows.iter().filter_map(|row| self.assemble(row)).collect())
    }

    pub async fn find_by_username(&self, username: &str) -> DomainResult<Option<UserAccount>> {
        let rows = self
            .store
            .list_where(&Self::TABLE, Filter::eq("username", username))
            .await?;
        Ok(rows.iter().find_map(|row| self.assemble(row)))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::{InMemoryRowStore, RowStore};
    use std::sync::Arc;

    fn assembler_with_store() -> (UserAccountAssembler, SharedRowStore) {
        let store: SharedRowStore = Arc::new(InMemoryRowStore::new());
        (
            UserAccountAssembler::new(store.clone(), AssemblyOptions::default()),
            store,
        )
    }

    fn account_fields(username: &str, role: &str, client: Option<i64>) -> Vec<Value> {
        vec![
            Value::from(username),
            Value::from("$2b$12$hash"),
            Value::from(role),
            Value::opt(client),
            Value::Null,
        ]
    }

    #[tokio::test]
    async fn assembles_a_client_account() {
        let (assembler, store) = assembler_with_store();
        store
            .insert(
                &UserAccountAssembler::TABLE,
                None,
                account_fields("ana.gomez", "client", Some(1)),
            )
            .await
            .unwrap();

        let account = assembler.find_by_key(1).await.unwrap().unwrap();
        assert_eq!(account.role, Role::Client);
        assert_eq!(account.client_id, Some(1));
        assert_eq!(account.employee_id, None);
    }

    #[tokio::test]
    async fn unknown_role_text_is_malformed() {
        let (assembler, store) = assembler_with_store();
        store
            .insert(
                &UserAccountAssembler::TABLE,
                None,
                account_fields("ana.gomez", "admin", Some(1)),
            )
            .await
            .unwrap();

        assert!(assembler.find_by_key(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn role_reference_mismatch_drops_the_row() {
        let (assembler, store) = assembler_with_store();
        // Client role with no client_id fails account validation.
        store
            .insert(
                &UserAccountAssembler::TABLE,
                None,
                account_fields("ana.gomez", "client", None),
            )
            .await
            .unwrap();

        assert!(assembler.find_by_key(1).await.unwrap().is_none());
        assert!(assembler.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn finds_accounts_by_username() {
        let (assembler, store) = assembler_with_store();
        store
            .insert(
                &UserAccountAssembler::TABLE,
                None,
                account_fields("ana.gomez", "client", Some(1)),
            )
            .await
            .unwrap();

        let found = assembler.find_by_username("ana.gomez").await.unwrap();
        assert!(found.is_some());
        assert!(assembler
            .find_by_username("nobody")
            .await
            .unwrap()
            .is_none());
    }
}
