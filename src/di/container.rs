use std::sync::Arc;

use crate::api::{ApiClient, FileTokenStore, TokenStore};
use crate::config::ClientConfig;
use crate::entity::ApiError;
use crate::interactor::{
    AuthInteractor, AuthInteractorImpl, ContactsInteractor, ContactsInteractorImpl,
    MultiSigInteractor, MultiSigInteractorImpl,
};
use crate::services::MultiSigWatcher;

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Interactors
    auth_interactor: Arc<dyn AuthInteractor>,
    contacts_interactor: Arc<dyn ContactsInteractor>,
    multisig_interactor: Arc<dyn MultiSigInteractor>,

    // Configuration
    config: ClientConfig,
}

impl ServiceContainer {
    /// Create a container that keeps the token in `config.token_path`
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let token_store = Arc::new(FileTokenStore::new(config.token_path.clone()));
        Self::with_token_store(config, token_store)
    }

    pub fn with_token_store(
        config: ClientConfig,
        token_store: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        let api_client = Arc::new(ApiClient::new(&config, token_store)?);

        let auth_interactor =
            Arc::new(AuthInteractorImpl::new(api_client.clone())) as Arc<dyn AuthInteractor>;
        let contacts_interactor = Arc::new(ContactsInteractorImpl::new(api_client.clone()))
            as Arc<dyn ContactsInteractor>;
        let multisig_interactor = Arc::new(MultiSigInteractorImpl::new(api_client.clone()))
            as Arc<dyn MultiSigInteractor>;

        Ok(Self {
            auth_interactor,
            contacts_interactor,
            multisig_interactor,
            config,
        })
    }

    // Accessor methods

    pub fn auth_interactor(&self) -> Arc<dyn AuthInteractor> {
        self.auth_interactor.clone()
    }

    pub fn contacts_interactor(&self) -> Arc<dyn ContactsInteractor> {
        self.contacts_interactor.clone()
    }

    pub fn multisig_interactor(&self) -> Arc<dyn MultiSigInteractor> {
        self.multisig_interactor.clone()
    }

    /// New watcher polling at the configured interval
    pub fn multisig_watcher(&self) -> MultiSigWatcher {
        MultiSigWatcher::new(self.multisig_interactor.clone(), self.config.poll_interval)
    }
}
