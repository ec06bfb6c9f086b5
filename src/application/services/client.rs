//! Client lifecycle service

use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::assembly::{Assemblers, ClientAssembler};
use crate::domain::{Client, ClientId};
use crate::infrastructure::storage::{Key, SharedRowStore};
use crate::shared::errors::{DomainError, DomainResult};

use super::{generated_id, validate_request};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "surname is required"))]
    pub surname: String,
    #[validate(length(min = 1, message = "national_id is required"))]
    pub national_id: String,
    pub address: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
}

/// Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub national_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub struct ClientService {
    assemblers: Assemblers,
    store: SharedRowStore,
}

impl ClientService {
    pub fn new(assemblers: Assemblers, store: SharedRowStore) -> Self {
        Self { assemblers, store }
    }

    /// Register a new client and return the stored aggregate.
    pub async fn create(&self, request: CreateClientRequest) -> DomainResult<Client> {
        validate_request(&request)?;

        let client = Client::new(
            None,
            request.name.trim(),
            request.surname.trim(),
            request.national_id.trim(),
            request.address.trim(),
            request.phone.trim(),
            request.email.trim(),
        )?;

        if self
            .assemblers
            .clients
            .find_by_national_id(&client.national_id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "client with national_id {}",
                client.national_id
            )));
        }
        if self
            .assemblers
            .clients
            .find_by_email(&client.email)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "client with email {}",
                client.email
            )));
        }

        let key = self
            .store
            .insert(
                &ClientAssembler::TABLE,
                None,
                ClientAssembler::to_row_fields(&client),
            )
            .await?;
        let id = generated_id(key)?;

        let created = self.get(id).await?;
        info!(client_id = id, "client created");
        Ok(created)
    }

    /// Fetch one client or fail with not-found.
    pub async fn get(&self, id: ClientId) -> DomainResult<Client> {
        self.assemblers
            .clients
            .find_by_key(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Client", "client_id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Client>> {
        self.assemblers.clients.list_all().await
    }

    /// Name or surname substring, or exact national-id match.
    pub async fn search(&self, term: &str) -> DomainResult<Vec<Client>> {
        self.assemblers.clients.search(term).await
    }

    /// Merge the provided fields into the stored client and persist.
    pub async fn update(&self, id: ClientId, request: UpdateClientRequest) -> DomainResult<Client> {
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
        if let Some(address) = request.address {
            current.address = address.trim().to_string();
        }
        if let Some(phone) = request.phone {
            current.phone = phone.trim().to_string();
        }
        if let Some(email) = request.email {
            current.email = email.trim().to_string();
        }

        // Reconstruct so the merged values pass the same checks as creation.
        let merged = Client::new(
            Some(id),
            current.name,
            current.surname,
            current.national_id,
            current.address,
            current.phone,
            current.email,
        )?;

        self.store
            .update(
                &ClientAssembler::TABLE,
                &Key::Int(id),
                ClientAssembler::to_row_fields(&merged),
            )
            .await?;
        self.get(id).await
    }

    /// Remove the client row. Rentals or reservations that still reference
    /// it become integrity violations surfaced at assembly time.
    pub async fn delete(&self, id: ClientId) -> DomainResult<()> {
        self.get(id).await?;
        self.store
            .delete(&ClientAssembler::TABLE, &Key::Int(id))
            .await?;
        info!(client_id = id, "client deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::AssemblyOptions;
    use crate::infrastructure::storage::InMemoryRowStore;
    use std::sync::Arc;

    fn service() -> ClientService {
        let store: SharedRowStore = Arc::new(InMemoryRowStore::new());
        let assemblers = Assemblers::new(store.clone(), AssemblyOptions::default());
        ClientService::new(assemblers, store)
    }

    fn create_request() -> CreateClientRequest {
        CreateClientRequest {
            name: "Ana".into(),
            surname: "Gomez".into(),
            national_id: "30123456".into(),
            address: "Av. Siempreviva 742".into(),
            phone: "1144556677".into(),
            email: "ana@example.com".into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_a_key_and_round_trips() {
        let service = service();

        let client = service.create(create_request()).await.unwrap();
        assert_eq!(client.id, Some(1));

        let fetched = service.get(1).await.unwrap();
        assert_eq!(fetched.name, "Ana");
        assert_eq!(fetched.email, "ana@example.com");
    }

    #[tokio::test]
    async fn blank_name_fails_request_validation() {
        let service = service();
        let mut request = create_request();
        request.name = "".into();

        let err = service.create(request).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_national_id_is_a_conflict() {
        let service = service();
        service.create(create_request()).await.unwrap();

        let mut second = create_request();
        second.email = "other@example.com".into();
        let err = service.create(second).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let service = service();
        service.create(create_request()).await.unwrap();

        let mut second = create_request();
        second.national_id = "30999888".into();
        let err = service.create(second).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn get_missing_client_is_not_found() {
        let service = service();
        let err = service.get(9).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_merges_only_provided_fields() {
        let service = service();
        service.create(create_request()).await.unwrap();

        let updated = service
            .update(
                1,
                UpdateClientRequest {
                    phone: Some("1199887766".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.phone, "1199887766");
        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.email, "ana@example.com");
    }

    #[tokio::test]
    async fn update_rejects_an_invalid_merged_value() {
        let service = service();
        service.create(create_request()).await.unwrap();

        let err = service
            .update(
                1,
                UpdateClientRequest {
                    email: Some("not-an-email".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // The stored row is untouched.
        assert_eq!(service.get(1).await.unwrap().email, "ana@example.com");
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let service = service();
        service.create(create_request()).await.unwrap();

        service.delete(1).await.unwrap();
        assert!(matches!(
            service.get(1).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn search_finds_by_name_fragment() {
        let service = service();
        service.create(create_request()).await.unwrap();

        let hits = service.search("ome").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(service.search("zzz").await.unwrap().is_empty());
    }
}
