use crate::config::HttpSettings;
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Builds the shared transport. The cookie store keeps the prices session
/// cookie set by `login` for the calls that follow.
pub fn build_http_client(settings: &HttpSettings) -> Result<Client> {
    let mut builder = Client::builder()
        .cookie_store(true)
        .user_agent(settings.user_agent.clone());

    if let Some(timeout) = settings.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout));
    }

    Ok(builder.build()?)
}

/// Joins a base URL and an absolute path without doubling the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
