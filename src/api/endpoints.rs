// REST paths relative to the configured API base URL

pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_REGISTER: &str = "/auth/register";
pub const AUTH_PROFILE: &str = "/auth/profile";

pub const CONTACTS: &str = "/contacts";

pub const MULTISIG_SETTINGS: &str = "/multisig/settings";
pub const MULTISIG_PENDING: &str = "/multisig/pending";
pub const MULTISIG_TRANSACTIONS: &str = "/multisig/transactions";

pub fn contact(id: &str) -> String {
    format!("{}/{}", CONTACTS, id)
}

pub fn multisig_approve(id: &str) -> String {
    format!("{}/{}/approve", MULTISIG_TRANSACTIONS, id)
}

pub fn multisig_reject(id: &str) -> String {
    format!("{}/{}/reject", MULTISIG_TRANSACTIONS, id)
}

pub fn multisig_cancel(id: &str) -> String {
    format!("{}/{}/cancel", MULTISIG_TRANSACTIONS, id)
}
