pub mod client;
pub mod endpoints;
pub mod token_store;

pub use client::ApiClient;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
