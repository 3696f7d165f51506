use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of operation waiting for a second signature
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Transfer,
    Market,
    Withdrawal,
    Payment,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Transfer => write!(f, "Transfer"),
            TransactionType::Market => write!(f, "Market order"),
            TransactionType::Withdrawal => write!(f, "Withdrawal"),
            TransactionType::Payment => write!(f, "Payment"),
        }
    }
}

/// Status of a multi-signature transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Expired,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }

    /// Once a transaction leaves `Pending` its status never changes again.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        *self == TransactionStatus::Pending && next.is_terminal()
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "PENDING"),
            TransactionStatus::Approved => write!(f, "APPROVED"),
            TransactionStatus::Rejected => write!(f, "REJECTED"),
            TransactionStatus::Cancelled => write!(f, "CANCELLED"),
            TransactionStatus::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// Client-side mirror of a transaction that needs the partner's approval
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransaction {
    pub id: String,
    pub initiator_id: String,
    pub signer_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub approval_message: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

impl PendingTransaction {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn time_remaining(&self, now: DateTime<Utc>) -> Duration {
        if self.is_expired(now) {
            Duration::zero()
        } else {
            self.expires_at - now
        }
    }

    /// Still waiting for a decision and not past its expiry
    pub fn is_actionable(&self, now: DateTime<Utc>) -> bool {
        self.status == TransactionStatus::Pending && !self.is_expired(now)
    }

    /// Only the designated signer approves or rejects
    pub fn can_be_decided_by(&self, user_id: &str) -> bool {
        self.status == TransactionStatus::Pending && self.signer_id == user_id
    }

    /// Only the initiator cancels
    pub fn can_be_cancelled_by(&self, user_id: &str) -> bool {
        self.status == TransactionStatus::Pending && self.initiator_id == user_id
    }
}

/// Request body for creating a multi-signature transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPendingTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub description: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> PendingTransaction {
        serde_json::from_value(json!({
            "id": "tx-1",
            "initiatorId": "alice",
            "signerId": "bob",
            "type": "withdrawal",
            "amount": 1500.25,
            "currency": "USD",
            "description": "Rent",
            "status": "pending",
            "createdAt": "2026-01-01T10:00:00Z",
            "expiresAt": "2026-01-02T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn deserializes_backend_shape() {
        let tx = sample();
        assert_eq!(tx.transaction_type, TransactionType::Withdrawal);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.amount, Decimal::new(150025, 2));
        assert!(tx.recipient.is_none());
        assert!(tx.payload.is_null());
    }

    #[test]
    fn amounts_serialize_as_numbers() {
        let new_tx = NewPendingTransaction {
            transaction_type: TransactionType::Payment,
            amount: Decimal::new(250050, 2),
            currency: "USD".to_string(),
            recipient: None,
            description: "Invoice".to_string(),
            payload: serde_json::Value::Null,
        };
        let value = serde_json::to_value(&new_tx).unwrap();
        assert!(value["amount"].is_number());
        assert_eq!(value["amount"].as_f64(), Some(2500.5));
        assert!(value.get("recipient").is_none());

        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["amount"].as_f64(), Some(1500.25));
    }

    #[test]
    fn terminal_statuses_never_transition() {
        use TransactionStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Expired));
        assert!(!Pending.can_transition_to(Pending));
        for status in [Approved, Rejected, Cancelled, Expired] {
            assert!(status.is_terminal());
            assert!(!status.can_transition_to(Pending));
            assert!(!status.can_transition_to(Approved));
        }
    }

    #[test]
    fn expiry_is_time_based() {
        let tx = sample();
        let before = Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 1, 2, 10, 0, 0).unwrap();

        assert!(tx.is_actionable(before));
        assert_eq!(tx.time_remaining(before), Duration::hours(1));
        assert!(tx.is_expired(after));
        assert!(!tx.is_actionable(after));
        assert_eq!(tx.time_remaining(after), Duration::zero());
    }

    #[test]
    fn roles_gate_actions() {
        let mut tx = sample();
        assert!(tx.can_be_decided_by("bob"));
        assert!(!tx.can_be_decided_by("alice"));
        assert!(tx.can_be_cancelled_by("alice"));
        assert!(!tx.can_be_cancelled_by("bob"));

        tx.status = TransactionStatus::Approved;
        assert!(!tx.can_be_decided_by("bob"));
        assert!(!tx.can_be_cancelled_by("alice"));
    }
}
