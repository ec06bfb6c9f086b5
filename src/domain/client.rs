//! Client domain entity

use super::rental::RentalId;
use super::reservation::ReservationId;
use super::validation;
use crate::shared::errors::DomainResult;

pub type ClientId = i64;

/// A registered client.
///
/// The back-reference vectors hold keys of aggregates that point here; they
/// are derived while assembling and never persisted with the client row.
#[derive(Debug, Clone)]
pub struct Client {
    /// Store-generated key, `None` until the row is inserted
    pub id: Option<ClientId>,
    pub name: String,
    pub surname: String,
    /// National identity number, 7 or 8 digits
    pub national_id: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Keys of rentals taken out by this client
    pub rentals: Vec<RentalId>,
    /// Keys of reservations placed by this client
    pub reservations: Vec<ReservationId>,
}

impl Client {
    pub fn new(
        id: Option<ClientId>,
        name: impl Into<String>,
        surname: impl Into<String>,
        national_id: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> DomainResult<Self> {
        let national_id = national_id.into();
        let phone = phone.into();
        let email = email.into();
        validation::national_id(&national_id)?;
        validation::phone(&phone)?;
        validation::email(&email)?;
        Ok(Self {
            id,
            name: name.into(),
            surname: surname.into(),
            national_id,
            address: address.into(),
            phone,
            email,
            rentals: Vec::new(),
            reservations: Vec::new(),
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
