use crate::domain::model::SaveRecord;
use crate::domain::ports::PersistenceClient;
use crate::utils::error::{Result, SermonError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_TABLE: &str = "blog_posts";

/// PostgREST error body.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

/// Inserts rows through the Supabase REST interface with the anonymous key.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
    table: String,
}

impl SupabaseClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            table: table.into(),
        }
    }

    fn insert_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table)
    }
}

#[async_trait]
impl PersistenceClient for SupabaseClient {
    async fn save(&self, record: &SaveRecord) -> Result<()> {
        tracing::debug!("Inserting into {}: {}", self.table, record.title);

        let response = self
            .client
            .post(self.insert_url())
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await
            .map_err(|e| SermonError::persistence(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<PostgrestError>(&body) {
            Ok(err) => err.message,
            Err(_) => format!("HTTP {}: {}", status.as_u16(), body),
        };
        tracing::error!("Error saving post to {}: {}", self.table, message);
        Err(SermonError::persistence(message))
    }
}
