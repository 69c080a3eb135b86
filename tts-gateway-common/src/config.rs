//! Configuration module for loading environment variables and settings.
//!
//! Configuration is read once at startup into an immutable [`Config`] and
//! handed to each speech provider; nothing reads the environment afterwards.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Default Riva gRPC endpoint (NVIDIA Cloud Functions).
pub const DEFAULT_TTS_SERVER: &str = "grpc.nvcf.nvidia.com:443";

/// Default command used to reach the Riva service.
pub const DEFAULT_TALK_COMMAND: &str = "python python-clients/scripts/tts/talk.py";

/// Default Workers AI text-to-speech model.
pub const DEFAULT_CF_MODEL: &str = "@cf/deepgram/aura-1";

/// Default Cloudflare REST API base URL.
pub const DEFAULT_CF_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default shared secret for the bearer-token guard.
pub const DEFAULT_PROTECT_TOKEN: &str = "my-secret-token";

/// Application configuration loaded from environment variables.
///
/// `Debug` output never shows the bearer token or provider credentials.
#[derive(Clone)]
pub struct Config {
    /// Riva subprocess provider settings
    pub riva: RivaConfig,
    /// Cloudflare Workers AI provider settings
    pub cloudflare: CloudflareConfig,
    /// Where per-request audio files live and whether they are kept
    pub audio: AudioConfig,
    /// Shared secret every request must present as a bearer token
    pub protect_token: String,
}

/// Settings for the Riva provider.
#[derive(Clone)]
pub struct RivaConfig {
    /// gRPC server address passed to the client (`host:port`)
    pub server: String,
    /// NVCF function id sent as `function-id` metadata
    pub function_id: Option<String>,
    /// NVCF API key sent as `authorization` metadata
    pub api_key: Option<String>,
    /// Program and leading arguments of the speech client
    pub talk_command: Vec<String>,
}

/// Settings for the Cloudflare provider.
#[derive(Clone)]
pub struct CloudflareConfig {
    /// Cloudflare account id
    pub account_id: Option<String>,
    /// API token with Workers AI access
    pub api_token: Option<String>,
    /// Model name, e.g. `@cf/deepgram/aura-1`
    pub model: String,
    /// REST API base URL (overridable for testing)
    pub base_url: String,
}

/// Settings for per-request audio files.
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Directory where audio files are written
    pub output_dir: PathBuf,
    /// Keep successfully produced files instead of deleting them
    pub retain_files: bool,
}

impl Config {
    /// Load configuration from environment variables and .env file.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if `RETAIN_AUDIO_FILES` is not a
    /// boolean or `TTS_TALK_COMMAND` is blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let talk_command: Vec<String> = get("TTS_TALK_COMMAND")
            .unwrap_or_else(|| DEFAULT_TALK_COMMAND.to_string())
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if talk_command.is_empty() {
            return Err(ConfigError::invalid_value(
                "TTS_TALK_COMMAND",
                "command cannot be empty",
            ));
        }

        let riva = RivaConfig {
            server: get("TTS_SERVER").unwrap_or_else(|| DEFAULT_TTS_SERVER.to_string()),
            function_id: get("TTS_FUNCTION_ID"),
            api_key: get("TTS_API_KEY"),
            talk_command,
        };

        let cloudflare = CloudflareConfig {
            account_id: get("CF_ACCOUNT_ID"),
            api_token: get("CF_API_TOKEN"),
            model: get("CF_TTS_MODEL").unwrap_or_else(|| DEFAULT_CF_MODEL.to_string()),
            base_url: get("CF_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CF_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        };

        let retain_files = match get("RETAIN_AUDIO_FILES") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ConfigError::invalid_value("RETAIN_AUDIO_FILES", value))?,
            None => false,
        };

        let audio = AudioConfig {
            output_dir: get("AUDIO_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            retain_files,
        };

        // Unlike the other settings, a blank token is passed through as-is
        let protect_token =
            lookup("PROTECT_TOKEN").unwrap_or_else(|| DEFAULT_PROTECT_TOKEN.to_string());

        Ok(Self {
            riva,
            cloudflare,
            audio,
            protect_token,
        })
    }
}

impl CloudflareConfig {
    /// Get the Workers AI run endpoint for the configured account and model.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVar` if `CF_ACCOUNT_ID` is not set.
    pub fn endpoint(&self) -> Result<String, ConfigError> {
        let account_id = self
            .account_id
            .as_deref()
            .ok_or_else(|| ConfigError::missing_env_var("CF_ACCOUNT_ID"))?;

        Ok(format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url, account_id, self.model
        ))
    }
}

const REDACTED: &str = "<redacted>";

/// Show whether a secret is set without showing it.
fn redact(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| REDACTED)
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("riva", &self.riva)
            .field("cloudflare", &self.cloudflare)
            .field("audio", &self.audio)
            .field("protect_token", &REDACTED)
            .finish()
    }
}

impl std::fmt::Debug for RivaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RivaConfig")
            .field("server", &self.server)
            .field("function_id", &self.function_id)
            .field("api_key", &redact(&self.api_key))
            .field("talk_command", &self.talk_command)
            .finish()
    }
}

impl std::fmt::Debug for CloudflareConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareConfig")
            .field("account_id", &self.account_id)
            .field("api_token", &redact(&self.api_token))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
