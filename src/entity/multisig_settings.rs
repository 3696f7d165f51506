use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Multi-signature preferences of the current user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultiSignSettings {
    pub enabled: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub threshold_usd: Decimal,
    #[serde(default)]
    pub partner_id: Option<String>,
    #[serde(default)]
    pub partner_email: Option<String>,
}

impl MultiSignSettings {
    pub fn has_partner(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.partner_id) || present(&self.partner_email)
    }

    /// Enabled and a partner is designated
    pub fn is_configured(&self) -> bool {
        self.enabled && self.has_partner()
    }

    /// Amounts strictly above the threshold need the partner's signature.
    pub fn requires_approval(&self, amount_usd: Decimal) -> bool {
        self.is_configured() && amount_usd > self.threshold_usd
    }
}

/// Partial update of the multi-signature settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMultiSignSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub threshold_usd: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_email: Option<String>,
}
