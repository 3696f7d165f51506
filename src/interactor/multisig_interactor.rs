use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::api::{endpoints, ApiClient};
use crate::entity::{
    ApiError, MultiSignSettings, NewPendingTransaction, PendingTransaction,
    UpdateMultiSignSettings,
};

/// REST surface of the multi-signature approval workflow
#[async_trait]
pub trait MultiSigInteractor: Send + Sync {
    async fn get_settings(&self) -> Result<MultiSignSettings, ApiError>;

    async fn update_settings(
        &self,
        update: UpdateMultiSignSettings,
    ) -> Result<MultiSignSettings, ApiError>;

    /// `false` when disabled, partnerless, or reported as not configured
    async fn is_configured(&self) -> Result<bool, ApiError> {
        match self.get_settings().await {
            Ok(settings) => Ok(settings.is_configured()),
            Err(e) if e.is_not_configured() => {
                debug!("Multi-signature is not configured: {}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Transactions waiting for my signature
    async fn pending_approvals(&self) -> Result<Vec<PendingTransaction>, ApiError>;

    /// Transactions I initiated
    async fn my_transactions(&self) -> Result<Vec<PendingTransaction>, ApiError>;

    async fn create_transaction(
        &self,
        transaction: NewPendingTransaction,
    ) -> Result<PendingTransaction, ApiError>;

    async fn approve(
        &self,
        id: &str,
        message: Option<String>,
    ) -> Result<PendingTransaction, ApiError>;

    async fn reject(&self, id: &str, reason: Option<String>)
        -> Result<PendingTransaction, ApiError>;

    async fn cancel(&self, id: &str) -> Result<PendingTransaction, ApiError>;
}

#[derive(Serialize)]
struct DecisionBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

pub struct MultiSigInteractorImpl {
    api: Arc<ApiClient>,
}

impl MultiSigInteractorImpl {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MultiSigInteractor for MultiSigInteractorImpl {
    async fn get_settings(&self) -> Result<MultiSignSettings, ApiError> {
        self.api.get(endpoints::MULTISIG_SETTINGS).await
    }

    async fn update_settings(
        &self,
        update: UpdateMultiSignSettings,
    ) -> Result<MultiSignSettings, ApiError> {
        // Validate locally before hitting the backend
        if update.threshold_usd.is_some_and(|t| t < Decimal::ZERO) {
            return Err(ApiError::InvalidInput(
                "Threshold cannot be negative".to_string(),
            ));
        }
        if let Some(email) = &update.partner_email {
            if !email.is_empty() && !email.contains('@') {
                return Err(ApiError::InvalidInput(format!(
                    "Invalid partner email: {}",
                    email
                )));
            }
        }

        let settings: MultiSignSettings =
            self.api.put(endpoints::MULTISIG_SETTINGS, &update).await?;
        info!(
            "Multi-signature settings updated (enabled: {}, threshold: {} USD)",
            settings.enabled, settings.threshold_usd
        );
        Ok(settings)
    }

    async fn pending_approvals(&self) -> Result<Vec<PendingTransaction>, ApiError> {
        self.api.get(endpoints::MULTISIG_PENDING).await
    }

    async fn my_transactions(&self) -> Result<Vec<PendingTransaction>, ApiError> {
        self.api.get(endpoints::MULTISIG_TRANSACTIONS).await
    }

    async fn create_transaction(
        &self,
        transaction: NewPendingTransaction,
    ) -> Result<PendingTransaction, ApiError> {
        // Amount and currency are required for the threshold check on the backend
        if transaction.amount <= Decimal::ZERO {
            return Err(ApiError::InvalidInput(
                "Amount must be greater than zero".to_string(),
            ));
        }
        if transaction.currency.trim().is_empty() {
            return Err(ApiError::InvalidInput("Currency is required".to_string()));
        }

        let created: PendingTransaction = self
            .api
            .post(endpoints::MULTISIG_TRANSACTIONS, &transaction)
            .await?;
        info!(
            "Created multi-signature {} {} {} ({})",
            created.transaction_type, created.amount, created.currency, created.id
        );
        Ok(created)
    }

    async fn approve(
        &self,
        id: &str,
        message: Option<String>,
    ) -> Result<PendingTransaction, ApiError> {
        super::require_id(id)?;
        let body = DecisionBody {
            message,
            reason: None,
        };
        let tx: PendingTransaction = self.api.post(&endpoints::multisig_approve(id), &body).await?;
        info!("Approved multi-signature transaction {}", id);
        Ok(tx)
    }

    async fn reject(
        &self,
        id: &str,
        reason: Option<String>,
    ) -> Result<PendingTransaction, ApiError> {
        super::require_id(id)?;
        let body = DecisionBody {
            message: None,
            reason,
        };
        let tx: PendingTransaction = self.api.post(&endpoints::multisig_reject(id), &body).await?;
        info!("Rejected multi-signature transaction {}", id);
        Ok(tx)
    }

    async fn cancel(&self, id: &str) -> Result<PendingTransaction, ApiError> {
        super::require_id(id)?;
        let tx: PendingTransaction = self
            .api
            .post(&endpoints::multisig_cancel(id), &serde_json::json!({}))
            .await?;
        info!("Cancelled multi-signature transaction {}", id);
        Ok(tx)
    }
}
