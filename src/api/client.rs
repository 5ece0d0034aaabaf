use std::time::Duration;

use reqwest::Client;

use super::error::FetchError;
use super::types::Asociado;

/// Default associate index endpoint.
pub const SOURCE_URL: &str =
    "https://raw.githubusercontent.com/managerrojo/COAVANCOL-Prueba-T-cnica-/refs/heads/main/IndexAsociados";

/// HTTP client for the associate index endpoint. One GET per session.
pub struct AsociadosClient {
    client: Client,
    source_url: String,
}

impl AsociadosClient {
    /// Create a client for the given source URL; [`SOURCE_URL`] is the
    /// production default carried by the config.
    pub fn with_source_url(source_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self { client, source_url }
    }

    /// Fetch the full associate list. Non-2xx responses and bodies that do
    /// not parse as an associate array are both fetch failures.
    pub async fn fetch_asociados(&self) -> Result<Vec<Asociado>, FetchError> {
        let response = self.client.get(&self.source_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(FetchError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let asociados = response.json::<Vec<Asociado>>().await?;
        Ok(asociados)
    }
}
