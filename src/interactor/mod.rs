use crate::entity::ApiError;

pub mod auth_interactor;
pub mod contacts_interactor;
pub mod multisig_interactor;

pub use auth_interactor::{AuthInteractor, AuthInteractorImpl};
pub use contacts_interactor::{ContactsInteractor, ContactsInteractorImpl};
pub use multisig_interactor::{MultiSigInteractor, MultiSigInteractorImpl};

// Ids are interpolated into paths, a blank one would hit the collection endpoint
fn require_id(id: &str) -> Result<(), ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::InvalidInput("Id is required".to_string()));
    }
    Ok(())
}
