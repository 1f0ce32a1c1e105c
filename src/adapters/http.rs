use crate::domain::model::NewsletterContent;
use crate::domain::ports::ContentFetcher;
use crate::utils::error::{Result, SermonError};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub struct HttpNewsletterFetcher {
    client: Client,
}

impl HttpNewsletterFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Appends `timestamp=<epoch ms>` so the export is never served from a cache.
pub fn cache_busted_url(url: &str, timestamp_ms: i64) -> Result<Url> {
    let mut parsed = Url::parse(url).map_err(|e| SermonError::InvalidConfigValueError {
        field: "newsletter.url".to_string(),
        value: url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;
    parsed
        .query_pairs_mut()
        .append_pair("timestamp", &timestamp_ms.to_string());
    Ok(parsed)
}

#[async_trait]
impl ContentFetcher for HttpNewsletterFetcher {
    async fn fetch(&self, url: &str) -> Result<NewsletterContent> {
        let url = cache_busted_url(url, chrono::Utc::now().timestamp_millis())?;

        tracing::debug!("Fetching newsletter from: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Newsletter response status: {}", status);
        if !status.is_success() {
            return Err(SermonError::Network {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        Ok(NewsletterContent::from(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_cache_busted_url_extends_existing_query() {
        let url = cache_busted_url(
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv",
            1_700_000_000_000,
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv&timestamp=1700000000000"
        );
    }

    #[test]
    fn test_cache_busted_url_without_query() {
        let url = cache_busted_url("http://localhost/newsletter.csv", 42).unwrap();
        assert_eq!(url.as_str(), "http://localhost/newsletter.csv?timestamp=42");
    }

    #[test]
    fn test_cache_busted_url_rejects_garbage() {
        assert!(matches!(
            cache_busted_url("not a url", 1),
            Err(SermonError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_returns_body_text() {
        let server = MockServer::start();
        let csv_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/export")
                .query_param("format", "csv")
                .query_param_exists("timestamp");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body("Top story: X happened.\n");
        });

        let fetcher = HttpNewsletterFetcher::new(Client::new());
        let content = fetcher
            .fetch(&server.url("/export?format=csv"))
            .await
            .unwrap();

        csv_mock.assert();
        assert_eq!(content.as_str(), "Top story: X happened.\n");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_network_error() {
        let server = MockServer::start();
        let csv_mock = server.mock(|when, then| {
            when.method(GET).path("/export");
            then.status(500);
        });

        let fetcher = HttpNewsletterFetcher::new(Client::new());
        let result = fetcher.fetch(&server.url("/export?format=csv")).await;

        csv_mock.assert_hits(1);
        match result {
            Err(SermonError::Network { status }) => assert_eq!(status, 500),
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_not_found_reports_status_in_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let fetcher = HttpNewsletterFetcher::new(Client::new());
        let err = fetcher.fetch(&server.url("/missing")).await.unwrap_err();

        assert!(err.to_string().contains("404"));
    }
}
