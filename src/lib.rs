pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use app::{build_controller, LiveController};
pub use config::{Credentials, TomlConfig};
pub use crate::core::controller::{Dispatch, SermonController};
pub use crate::core::state::{SaveStatus, ViewState};
pub use domain::model::{BlogPost, NewsletterContent, SaveRecord};
pub use utils::error::{Result, SermonError};
