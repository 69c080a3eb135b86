//! HTTP front end for the gateway.
//!
//! This module exposes the routes:
//! - `GET /health` - liveness check
//! - `POST /tts`, `POST /tts/v1` - Riva synthesis, returns WAV
//! - `POST /tts/v2` - Cloudflare synthesis, returns MP3
//!
//! Every route sits behind the bearer-token guard, which runs before the
//! request body is read. Bodies are JSON; a request without a `Content-Type`
//! is still parsed as JSON.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRequest, Request, State, rejection::JsonRejection},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, info, instrument, warn};
use tts_gateway_common::{BearerAuth, Config, Error};

use crate::cloudflare::CloudflareProvider;
use crate::handler::{
    CloudflareSynthesizeParams, RivaSynthesizeParams, SpeechProvider, SynthesizedAudio,
};
use crate::riva::RivaProvider;
use crate::storage::AudioStore;

/// Riva provider as seen by the front end.
pub type DynRivaProvider = Arc<dyn SpeechProvider<Params = RivaSynthesizeParams>>;

/// Cloudflare provider as seen by the front end.
pub type DynCloudflareProvider = Arc<dyn SpeechProvider<Params = CloudflareSynthesizeParams>>;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    auth: BearerAuth,
    riva: DynRivaProvider,
    cloudflare: DynCloudflareProvider,
}

impl AppState {
    /// Create state from an auth guard and the two providers.
    pub fn new(auth: BearerAuth, riva: DynRivaProvider, cloudflare: DynCloudflareProvider) -> Self {
        Self {
            auth,
            riva,
            cloudflare,
        }
    }

    /// Build the production providers from configuration.
    pub fn from_config(config: &Config, http: reqwest::Client) -> Self {
        let store = AudioStore::from_config(&config.audio);
        let riva = RivaProvider::new(config.riva.clone(), store.clone());
        let cloudflare = CloudflareProvider::with_client(config.cloudflare.clone(), http, store);

        Self::new(
            BearerAuth::new(config.protect_token.clone()),
            Arc::new(riva),
            Arc::new(cloudflare),
        )
    }
}

/// Build the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tts", post(tts_v1))
        .route("/tts/v1", post(tts_v1))
        .route("/tts/v2", post(tts_v2))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state)
}

/// Health check response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[instrument(level = "info", name = "tts_v1", skip_all)]
async fn tts_v1(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<RivaSynthesizeParams>,
) -> Result<Response, ApiError> {
    speak(state.riva.as_ref(), params).await
}

#[instrument(level = "info", name = "tts_v2", skip_all)]
async fn tts_v2(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<CloudflareSynthesizeParams>,
) -> Result<Response, ApiError> {
    speak(state.cloudflare.as_ref(), params).await
}

/// JSON request body.
///
/// Behaves like [`Json`], except that a request carrying no `Content-Type`
/// at all is parsed as JSON instead of being rejected.
struct JsonBody<T>(T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if request.headers().contains_key(header::CONTENT_TYPE) {
            let Json(value) = Json::<T>::from_request(request, state).await?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| ApiError {
                status: rejection.status(),
                detail: rejection.body_text(),
            })?;
        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}

/// Run one provider call and turn the audio into a file response.
async fn speak<P>(provider: &P, params: P::Params) -> Result<Response, ApiError>
where
    P: SpeechProvider + ?Sized,
{
    let audio = provider.synthesize(params).await?;
    info!(
        provider = provider.name(),
        bytes = audio.data.len(),
        mime_type = audio.mime_type,
        "Synthesis complete"
    );
    Ok(audio_response(audio))
}

fn audio_response(audio: SynthesizedAudio) -> Response {
    (
        [
            (header::CONTENT_TYPE, audio.mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", audio.file_name),
            ),
        ],
        audio.data,
    )
        .into_response()
}

/// Reject requests without the shared bearer token.
async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    state.auth.verify(authorization).map_err(Error::from)?;
    Ok(next.run(request).await)
}

// =============================================================================
// Error Responses
// =============================================================================

/// Error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// An error ready to be sent as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Detail message sent to the client.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: "Internal Server Error".to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Auth(e) => {
                debug!(reason = %e, "Unauthorized request");
                Self {
                    status: StatusCode::UNAUTHORIZED,
                    detail: "Unauthorized".to_string(),
                }
            }
            Error::Validation(message) => {
                debug!(%message, "Rejected invalid request");
                Self {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    detail: message,
                }
            }
            Error::Api {
                endpoint,
                status_code,
                message,
            } => {
                warn!(%endpoint, status_code, %message, "TTS provider call failed");
                let detail = if status_code == 0 {
                    format!("TTS provider request failed: {}", message)
                } else {
                    format!("TTS provider returned {}: {}", status_code, message)
                };
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    detail,
                }
            }
            other @ (Error::Config(_) | Error::Io(_) | Error::Process(_)) => {
                error!(error = %other, "Request failed");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Error::validation(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}
