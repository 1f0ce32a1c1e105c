use crate::domain::model::{BlogPost, NewsletterContent, SaveRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn newsletter_url(&self) -> &str;
    fn completion_model(&self) -> &str;
    fn completion_endpoint(&self) -> &str;
    fn persistence_table(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

/// GETs the newsletter export; non-2xx becomes `SermonError::Network`.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<NewsletterContent>;
}

/// Any failure is reported as `SermonError::Generation`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn generate(&self, newsletter: &NewsletterContent) -> Result<BlogPost>;
}

/// Blind append; failures are reported as `SermonError::Persistence`.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    async fn save(&self, record: &SaveRecord) -> Result<()>;
}
