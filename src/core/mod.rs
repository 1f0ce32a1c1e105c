pub mod controller;
pub mod parser;
pub mod prompt;
pub mod state;

pub use crate::domain::model::{BlogPost, NewsletterContent, SaveRecord};
pub use crate::domain::ports::{CompletionClient, ConfigProvider, ContentFetcher, PersistenceClient, Storage};
pub use crate::utils::error::Result;
