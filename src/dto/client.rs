//! Client DTO

use serde::{Deserialize, Serialize};

use crate::domain::{Client, ClientId};

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientDto {
    pub id: Option<ClientId>,
    pub name: String,
    pub surname: String,
    pub national_id: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl ClientDto {
    pub fn from_domain(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            surname: client.surname,
            national_id: client.national_id,
            address: client.address,
            phone: client.phone,
            email: client.email,
        }
    }
}
