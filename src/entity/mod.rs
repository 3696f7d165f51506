mod api_error;
mod contact;
mod multisig_settings;
mod pending_transaction;
mod user;

pub use api_error::{ApiError, MULTISIG_NOT_CONFIGURED};
pub use contact::{Contact, NewContact};
pub use multisig_settings::{MultiSignSettings, UpdateMultiSignSettings};
pub use pending_transaction::{
    NewPendingTransaction, PendingTransaction, TransactionStatus, TransactionType,
};
pub use user::{AuthSession, LoginRequest, RegisterRequest, User};
