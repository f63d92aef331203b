// src/fetch/mod.rs
pub mod error;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub use error::IngestionError;

/// Build the HTTP client used for sheet exports.
///
/// No timeout unless one is configured; a hung export then simply never
/// completes, which matches the page this replaces.
pub fn build_client(timeout: Option<Duration>) -> Result<Client, IngestionError> {
    let mut builder = Client::builder();
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder.build().map_err(IngestionError::Client)
}

/// One GET of the export URL, returning the body as text.
///
/// Non-2xx responses are errors; nothing is retried.
#[instrument(level = "info", skip(client), fields(url = %url))]
pub async fn fetch_csv_text(client: &Client, url: &Url) -> Result<String, IngestionError> {
    debug!("fetching sheet export");
    let resp = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| IngestionError::Transport {
            url: url.clone(),
            source,
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(IngestionError::Status {
            url: url.clone(),
            status,
        });
    }

    let text = resp.text().await.map_err(|source| IngestionError::Body {
        url: url.clone(),
        source,
    })?;
    debug!(bytes = text.len(), "sheet export received");
    Ok(text)
}
