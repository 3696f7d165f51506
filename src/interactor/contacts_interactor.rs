use async_trait::async_trait;
use std::sync::Arc;

use crate::api::{endpoints, ApiClient};
use crate::entity::{ApiError, Contact, NewContact};

#[async_trait]
pub trait ContactsInteractor: Send + Sync {
    async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError>;
    async fn add_contact(&self, contact: NewContact) -> Result<Contact, ApiError>;
    async fn remove_contact(&self, id: &str) -> Result<(), ApiError>;
}

pub struct ContactsInteractorImpl {
    api: Arc<ApiClient>,
}

impl ContactsInteractorImpl {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ContactsInteractor for ContactsInteractorImpl {
    async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        self.api.get(endpoints::CONTACTS).await
    }

    async fn add_contact(&self, contact: NewContact) -> Result<Contact, ApiError> {
        if !contact.email.contains('@') {
            return Err(ApiError::InvalidInput(format!(
                "Invalid contact email: {}",
                contact.email
            )));
        }
        self.api.post(endpoints::CONTACTS, &contact).await
    }

    async fn remove_contact(&self, id: &str) -> Result<(), ApiError> {
        super::require_id(id)?;
        self.api.delete(&endpoints::contact(id)).await
    }
}
