// Adapters layer: concrete implementations of the domain ports (http, completion, persistence, storage).

pub mod gemini;
pub mod http;
pub mod storage;
pub mod supabase;

use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

/// One `reqwest::Client` is shared by all three outbound adapters.
pub fn build_http_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
