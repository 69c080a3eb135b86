//! Cloudflare Workers AI speech provider.
//!
//! Posts the request parameters to the `ai/run/<model>` REST endpoint and
//! drains the streamed MP3 response into an audio file chunk by chunk.

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};
use tts_gateway_common::config::CloudflareConfig;
use tts_gateway_common::error::{ConfigError, Error};

use crate::handler::{CloudflareSynthesizeParams, MP3_MIME_TYPE, SpeechProvider, SynthesizedAudio};
use crate::storage::{AudioFile, AudioStore};

/// Speech provider backed by Cloudflare Workers AI.
#[derive(Debug, Clone)]
pub struct CloudflareProvider {
    config: CloudflareConfig,
    http: reqwest::Client,
    store: AudioStore,
}

impl CloudflareProvider {
    /// Create a new provider with a default HTTP client.
    pub fn new(config: CloudflareConfig, store: AudioStore) -> Self {
        Self::with_client(config, reqwest::Client::new(), store)
    }

    /// Create a new provider with a caller-supplied HTTP client.
    pub fn with_client(config: CloudflareConfig, http: reqwest::Client, store: AudioStore) -> Self {
        Self { config, http, store }
    }

    /// Get the Workers AI endpoint for the configured model.
    pub fn get_endpoint(&self) -> Result<String, ConfigError> {
        self.config.endpoint()
    }

    /// Stream the response body into `file`.
    ///
    /// A body that breaks off midway is reported like a failed request
    /// (status 0), since the audio never fully arrived.
    async fn drain_to_file(
        endpoint: &str,
        mut response: reqwest::Response,
        file: &AudioFile,
    ) -> Result<u64, Error> {
        let mut out = tokio::fs::File::create(file.path()).await?;
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await.map_err(|e| {
            Error::api(endpoint, 0, format!("Failed to read response body: {}", e))
        })? {
            out.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        out.flush().await?;
        Ok(written)
    }
}

#[async_trait]
impl SpeechProvider for CloudflareProvider {
    type Params = CloudflareSynthesizeParams;

    fn name(&self) -> &'static str {
        "cloudflare"
    }

    #[instrument(level = "info", name = "cloudflare_synthesize", skip(self, params))]
    async fn synthesize(
        &self,
        params: CloudflareSynthesizeParams,
    ) -> Result<SynthesizedAudio, Error> {
        let endpoint = self.get_endpoint()?;
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or_else(|| ConfigError::missing_env_var("CF_API_TOKEN"))?;

        info!(model = %self.config.model, speaker = ?params.speaker, "Synthesizing speech with Cloudflare Workers AI");
        debug!(endpoint = %endpoint, "Calling Workers AI");

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(token)
            .json(&params)
            .send()
            .await
            .map_err(|e| Error::api(&endpoint, 0, format!("Request failed: {}", e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_else(|e| {
                warn!(error = %e, status = status.as_u16(), "Failed to read Workers AI error body");
                String::new()
            });
            return Err(Error::api(&endpoint, status.as_u16(), body));
        }

        let file = self.store.allocate("mp3").await?;
        let bytes = Self::drain_to_file(&endpoint, response, &file).await?;
        info!(bytes, "Received audio from Workers AI");

        self.store.finish(file, MP3_MIME_TYPE, "speech.mp3").await
    }
}
