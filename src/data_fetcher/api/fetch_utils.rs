//! Single-attempt JSON document fetching with source error classification

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::data_fetcher::provider::parse_document;
use crate::error::AppError;

/// Fetches and parses one source document.
///
/// - transport errors and timeouts map to `SourceUnavailable`
/// - HTTP 404 maps to `SeasonNotFound` for `dataset_key`
/// - any other non-success status maps to `SourceUnavailable`
/// - bodies that do not parse into `T` map to `SourceMalformed`
#[instrument(skip(client))]
pub(crate) async fn fetch_document<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    dataset_key: &str,
) -> Result<T, AppError> {
    info!("Fetching source document: {url}");

    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                format!("connection failed: {e}")
            } else {
                e.to_string()
            };
            return Err(AppError::source_unavailable(url, message));
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        return Err(match status_code {
            404 => AppError::season_not_found(dataset_key, url),
            _ => AppError::source_unavailable(url, format!("HTTP {status_code} {reason}")),
        });
    }

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::source_unavailable(
                url,
                format!("failed to read response body: {e}"),
            ));
        }
    };

    debug!("Response length: {} bytes", response_text.len());
    let preview: String = response_text.chars().take(512).collect();
    debug!("Response text (first 512 chars): {preview}");

    parse_document(&response_text, url)
}
