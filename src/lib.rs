pub mod api;
pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod services;
pub mod utils;
pub mod view;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used items
pub use api::*;
pub use crate::config::ClientConfig;
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use services::*;
pub use utils::*;
pub use view::*;
