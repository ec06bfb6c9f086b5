//! Client assembly

use crate::domain::client::{Client, ClientId};
use crate::infrastructure::storage::{Filter, Key, Row, SharedRowStore, TableSpec, Value};
use crate::shared::errors::DomainResult;

use super::AssemblyOptions;

/// Builds [`Client`] aggregates from CLIENT rows.
pub struct ClientAssembler {
    store: SharedRowStore,
    options: AssemblyOptions,
}

impl ClientAssembler {
    pub const TABLE: TableSpec = TableSpec {
        table: "CLIENT",
        key_column: "client_id",
        columns: &["name", "surname", "national_id", "address", "phone", "email"],
    };

    pub fn new(store: SharedRowStore, options: AssemblyOptions) -> Self {
        Self { store, options }
    }

    /// Non-key column values in declared order. Inverse of [`assemble`],
    /// used by the lifecycle service for insert and update.
    ///
    /// [`assemble`]: Self::assemble
    pub fn to_row_fields(client: &Client) -> Vec<Value> {
        vec![
            Value::from(client.name.as_str()),
            Value::from(client.surname.as_str()),
            Value::from(client.national_id.as_str()),
            Value::from(client.address.as_str()),
            Value::from(client.phone.as_str()),
            Value::from(client.email.as_str()),
        ]
    }

    fn decode(row: &Row) -> Option<(ClientId, String, String, String, String, String, String)> {
        Some((
            row.first()?.as_int()?,
            row.get(1)?.as_text()?.to_string(),
            row.get(2)?.as_text()?.to_string(),
            row.get(3)?.as_text()?.to_string(),
            row.get(4)?.as_text()?.to_string(),
            row.get(5)?.as_text()?.to_string(),
            row.get(6)?.as_text()?.to_string(),
        ))
    }

    /// Build a client from its raw row. `None` means the row was unusable
    /// and has been reported.
    pub fn assemble(&self, row: &Row) -> Option<Client> {
        let Some((id, name, surname, national_id, address, phone, email)) = Self::decode(row)
        else {
            self.options.report_malformed("client", row);
            return None;
        };
        match Client::new(Some(id), name, surname, national_id, address, phone, email) {
            Ok(client) => Some(client),
            Err(error) => {
                self.options.report_invalid("client", id, &error);
                None
            }
        }
    }

    /// Fetch and assemble one client. `Ok(None)` covers both a missing row
    /// and a dropped one; callers decide whether that is an error.
    pub async fn find_by_key(&self, id: ClientId) -> DomainResult<Option<Client>> {
        let row = self.store.get_by_key(&Self::TABLE, &Key::Int(id)).await?;
        Ok(row.as_ref().and_then(|row| self.assemble(row)))
    }

    /// Every assemblable client; unusable rows are skipped, never fatal.
    pub async fn list_all(&self) -> DomainResult<Vec<Client>> {
        let rows = self.store.list_all(&Self::TABLE).await?;
        Ok(rows.iter().filter_map(|row| self.assemble(row)).collect())
    }

    pub async fn find_by_national_id(&self, national_id: &str) -> DomainResult<Option<Client>> {
        let rows = self
            .store
            .list_where(&Self::TABLE, Filter::eq("national_id", national_id))
            .await?;
        Ok(rows.iter().find_map(|row| self.assemble(row)))
    }

    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<Client>> {
        let rows = self
            .store
            .list_where(&Self::TABLE, Filter::eq("email", email))
            .await?;
        Ok(rows.iter().find_map(|row| self.assemble(row)))
    }

    /// Clients whose name or surname contains `term`, plus an exact
    /// national-id match, merged without duplicates.
    pub async fn search(&self, term: &str) -> DomainResult<Vec<Client>> {
        let mut found: Vec<Client> = Vec::new();
        for filter in [
            Filter::contains("name", term),
            Filter::contains("surname", term),
            Filter::eq("national_id", term),
        ] {
            let rows = self.store.list_where(&Self::TABLE, filter).await?;
            for row in &rows {
                if let Some(client) = self.assemble(row) {
                    if !found.iter().any(|c| c.id == client.id) {
                        found.push(client);
                    }
                }
            }
        }
        Ok(found)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::{InMemoryRowStore, RowStore};
    use std::sync::Arc;

    fn assembler_with_store() -> (ClientAssembler, SharedRowStore) {
        let store: SharedRowStore = Arc::new(InMemoryRowStore::new());
        (
            ClientAssembler::new(store.clone(), AssemblyOptions::default()),
            store,
        )
    }

    fn client_fields(name: &str, national_id: &str, email: &str) -> Vec<Value> {
        vec![
            Value::from(name),
            Value::from("Gomez"),
            Value::from(national_id),
            Value::from("Av. Siempreviva 742"),
            Value::from("1144556677"),
            Value::from(email),
        ]
    }

    #[tokio::test]
    async fn assembles_a_stored_row() {
        let (assembler, store) = assembler_with_store();
        let key = store
            .insert(
                &ClientAssembler::TABLE,
                None,
                client_fields("Ana", "30123456", "ana@example.com"),
            )
            .await
            .unwrap();

        let client = assembler.find_by_key(1).await.unwrap().unwrap();
        assert_eq!(Key::Int(client.id.unwrap()), key);
        assert_eq!(client.name, "Ana");
        assert_eq!(client.national_id, "30123456");
        assert!(client.rentals.is_empty());
    }

    #[tokio::test]
    async fn missing_row_is_none() {
        let (assembler, _store) = assembler_with_store();
        assert!(assembler.find_by_key(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_skips_rows_that_fail_validation() {
        let (assembler, store) = assembler_with_store();
        store
            .insert(
                &ClientAssembler::TABLE,
                None,
                client_fields("Ana", "30123456", "ana@example.com"),
            )
            .await
            .unwrap();
        // National id too short: decodes fine, fails validation.
        store
            .insert(
                &ClientAssembler::TABLE,
                None,
                client_fields("Eva", "123", "eva@example.com"),
            )
            .await
            .unwrap();

        let clients = assembler.list_all().await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "Ana");
    }

    #[tokio::test]
    async fn listing_skips_malformed_rows() {
        let (assembler, store) = assembler_with_store();
        store
            .insert(
                &ClientAssembler::TABLE,
                None,
                client_fields("Ana", "30123456", "ana@example.com"),
            )
            .await
            .unwrap();
        // Wrong arity: row is unusable.
        store
            .insert(&ClientAssembler::TABLE, None, vec![Value::from("Eva")])
            .await
            .unwrap();

        let clients = assembler.list_all().await.unwrap();
        assert_eq!(clients.len(), 1);
    }

    #[tokio::test]
    async fn search_merges_name_and_national_id_matches() {
        let (assembler, store) = assembler_with_store();
        store
            .insert(
                &ClientAssembler::TABLE,
                None,
                client_fields("Ana", "30123456", "ana@example.com"),
            )
            .await
            .unwrap();
        store
            .insert(
                &ClientAssembler::TABLE,
                None,
                client_fields("Anastasia", "27999888", "anastasia@example.com"),
            )
            .await
            .unwrap();
        store
            .insert(
                &ClientAssembler::TABLE,
                None,
                client_fields("Luis", "20111222", "luis@example.com"),
            )
            .await
            .unwrap();

        let by_name = assembler.search("ana").await.unwrap();
        assert_eq!(by_name.len(), 2);

        let by_id = assembler.search("20111222").await.unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].name, "Luis");

        // "Gomez" appears in every surname, but each client shows up once.
        let by_surname = assembler.search("gomez").await.unwrap();
        assert_eq!(by_surname.len(), 3);
    }

    #[tokio::test]
    async fn duplicate_probes_find_stored_values() {
        let (assembler, store) = assembler_with_store();
        store
            .insert(
                &ClientAssembler::TABLE,
                None,
                client_fields("Ana", "30123456", "ana@example.com"),
            )
            .await
            .unwrap();

        assert!(assembler
            .find_by_national_id("30123456")
            .await
            .unwrap()
            .is_some());
        assert!(assembler
            .find_by_national_id("00000000")
            .await
            .unwrap()
            .is_none());
        assert!(assembler
            .find_by_email("ana@example.com")
            .await
            .unwrap()
            .is_some());
    }

    #[test]
    fn row_fields_round_trip() {
        let client = Client::new(
            Some(1),
            "Ana",
            "Gomez",
            "30123456",
            "Av. Siempreviva 742",
            "1144556677",
            "ana@example.com",
        )
        .unwrap();
        let fields = ClientAssembler::to_row_fields(&client);
        assert_eq!(fields.len(), ClientAssembler::TABLE.columns.len());
        assert_eq!(fields[2], Value::from("30123456"));
    }
}
