use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::api::{endpoints, ApiClient};
use crate::entity::{ApiError, AuthSession, LoginRequest, RegisterRequest, User};

#[async_trait]
pub trait AuthInteractor: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError>;
    async fn register(&self, request: RegisterRequest) -> Result<AuthSession, ApiError>;
    async fn profile(&self) -> Result<User, ApiError>;
    fn logout(&self) -> Result<(), ApiError>;
    fn is_authenticated(&self) -> bool;
}

pub struct AuthInteractorImpl {
    api: Arc<ApiClient>,
}

impl AuthInteractorImpl {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    fn store_session(&self, session: &AuthSession) -> Result<(), ApiError> {
        self.api.token_store().save(&session.token)?;
        info!("Signed in as {}", session.user.email);
        Ok(())
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(ApiError::InvalidInput("A valid email is required".to_string()));
    }
    if password.is_empty() {
        return Err(ApiError::InvalidInput("Password is required".to_string()));
    }
    Ok(())
}

#[async_trait]
impl AuthInteractor for AuthInteractorImpl {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        validate_credentials(email, password)?;

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        // Persist the token so every following request is authenticated
        let session: AuthSession = self.api.post(endpoints::AUTH_LOGIN, &request).await?;
        self.store_session(&session)?;

        Ok(session)
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthSession, ApiError> {
        validate_credentials(&request.email, &request.password)?;

        let session: AuthSession = self.api.post(endpoints::AUTH_REGISTER, &request).await?;
        self.store_session(&session)?;

        Ok(session)
    }

    async fn profile(&self) -> Result<User, ApiError> {
        self.api.get(endpoints::AUTH_PROFILE).await
    }

    fn logout(&self) -> Result<(), ApiError> {
        self.api.token_store().clear()?;
        info!("Signed out");
        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        self.api.token_store().load().is_some()
    }
}
