use anyhow::{Context, Result};
use tracing::info;

/// Load a document from a local path or an http(s) URL.
/// Remote fetches are a single plain GET: no auth, no retries.
pub async fn load_document(source: &str) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        info!("Fetching {}", source);
        let client = reqwest::Client::new();
        let body = client
            .get(source)
            .send()
            .await?
            .text()
            .await
            .with_context(|| format!("Failed to fetch {}", source))?;
        Ok(body)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))
    }
}
