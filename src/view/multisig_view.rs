use chrono::{DateTime, Utc};

use crate::entity::PendingTransaction;
use crate::services::WatcherSnapshot;
use crate::utils::{format_amount, format_duration, shorten_id};

/// One line per transaction awaiting approval
pub fn format_transaction(tx: &PendingTransaction, now: DateTime<Utc>) -> String {
    let mut line = format!(
        "[{}] {} {}",
        shorten_id(&tx.id),
        tx.transaction_type,
        format_amount(tx.amount, &tx.currency)
    );

    if let Some(recipient) = &tx.recipient {
        line.push_str(&format!(" to {}", recipient));
    }
    if !tx.description.is_empty() {
        line.push_str(&format!(" - {}", tx.description));
    }

    if tx.is_expired(now) {
        line.push_str(" (expired)");
    } else {
        line.push_str(&format!(
            " (expires in {})",
            format_duration(tx.time_remaining(now))
        ));
    }

    line
}

/// Notification text for the current watcher state
pub fn format_pending_list(snapshot: &WatcherSnapshot, now: DateTime<Utc>) -> String {
    let mut text = match snapshot.configured {
        None => "Checking multi-signature status...".to_string(),
        Some(false) => "Multi-signature is not configured".to_string(),
        Some(true) if snapshot.pending.is_empty() => "No transactions awaiting your approval".to_string(),
        Some(true) => {
            let mut text = format!(
                "{} transaction(s) awaiting your approval:",
                snapshot.pending.len()
            );
            for tx in &snapshot.pending {
                text.push_str("\n  • ");
                text.push_str(&format_transaction(tx, now));
            }
            text
        }
    };

    if let Some(error) = &snapshot.last_error {
        text.push_str(&format!("\n⚠️ {}", error));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{TransactionStatus, TransactionType};
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;

    fn tx(now: DateTime<Utc>) -> PendingTransaction {
        PendingTransaction {
            id: "tx-42".to_string(),
            initiator_id: "alice".to_string(),
            signer_id: "bob".to_string(),
            transaction_type: TransactionType::Payment,
            amount: Decimal::new(120000, 2),
            currency: "USD".to_string(),
            recipient: Some("carol".to_string()),
            description: "Supplier invoice".to_string(),
            payload: serde_json::Value::Null,
            status: TransactionStatus::Pending,
            created_at: now,
            expires_at: now + Duration::minutes(90),
            approval_message: None,
            rejection_reason: None,
        }
    }

    #[test]
    fn transaction_line_has_amount_and_expiry() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(
            format_transaction(&tx(now), now),
            "[tx-42] Payment 1200 USD to carol - Supplier invoice (expires in 1h 30m)"
        );
        assert!(format_transaction(&tx(now), now + Duration::hours(2)).ends_with("(expired)"));
    }

    #[test]
    fn list_reflects_configuration_state() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut snapshot = WatcherSnapshot::default();
        assert_eq!(format_pending_list(&snapshot, now), "Checking multi-signature status...");

        snapshot.configured = Some(false);
        assert_eq!(format_pending_list(&snapshot, now), "Multi-signature is not configured");

        snapshot.configured = Some(true);
        snapshot.pending = vec![tx(now)];
        snapshot.last_error = Some("Unable to reach the server".to_string());
        let text = format_pending_list(&snapshot, now);
        assert!(text.starts_with("1 transaction(s) awaiting your approval:"));
        assert!(text.contains("[tx-42] Payment"));
        assert!(text.ends_with("⚠️ Unable to reach the server"));
    }
}
