// App layer: wires the live adapters into the controller.

use crate::adapters::build_http_client;
use crate::adapters::gemini::GeminiClient;
use crate::adapters::http::HttpNewsletterFetcher;
use crate::adapters::supabase::SupabaseClient;
use crate::config::Credentials;
use crate::core::controller::SermonController;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;

pub type LiveController = SermonController<HttpNewsletterFetcher, GeminiClient, SupabaseClient>;

pub fn build_controller<C: ConfigProvider>(
    config: &C,
    system_instruction: String,
    credentials: &Credentials,
) -> Result<LiveController> {
    let client = build_http_client(config.request_timeout())?;

    let fetcher = HttpNewsletterFetcher::new(client.clone());
    let completion = GeminiClient::new(
        client.clone(),
        config.completion_endpoint(),
        config.completion_model(),
        credentials.completion_api_key.clone(),
    )
    .with_system_instruction(system_instruction);
    let persistence = SupabaseClient::new(
        client,
        credentials.supabase_url.clone(),
        credentials.supabase_anon_key.clone(),
        config.persistence_table(),
    );

    tracing::debug!(
        "Controller wired: model={}, table={}",
        config.completion_model(),
        config.persistence_table()
    );

    Ok(SermonController::new(
        fetcher,
        completion,
        persistence,
        config.newsletter_url(),
    ))
}
