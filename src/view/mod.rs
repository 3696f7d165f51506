pub mod multisig_view;

pub use multisig_view::{format_pending_list, format_transaction};
