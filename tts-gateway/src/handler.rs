//! Speech request types and the provider capability.
//!
//! This module provides the request parameter types accepted by the gateway
//! endpoints and the [`SpeechProvider`] trait implemented by the Riva and
//! Cloudflare adapters.
//!
//! Beyond what deserialization enforces (`text` present, numbers numeric),
//! values are forwarded untouched; the providers decide what they accept.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tts_gateway_common::error::Error;

/// Default voice for Riva synthesis.
pub const DEFAULT_VOICE: &str = "Magpie-Multilingual.EN-US.Sofia";

/// Default language code for Riva synthesis.
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// MIME type of Riva output.
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// MIME type of Cloudflare output.
pub const MP3_MIME_TYPE: &str = "audio/mpeg";

/// Parameters for `POST /tts` and `POST /tts/v1`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RivaSynthesizeParams {
    /// Text to synthesize into speech.
    pub text: String,

    /// Language code (e.g., "en-US", "es-US").
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Riva voice name.
    #[serde(default = "default_voice")]
    pub voice: String,
}

fn default_language_code() -> String {
    DEFAULT_LANGUAGE_CODE.to_string()
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

/// Parameters for `POST /tts/v2`.
///
/// Serialized as-is into the Workers AI request body. Fields left unset are
/// omitted so the model applies its own defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CloudflareSynthesizeParams {
    /// Text to synthesize into speech.
    pub text: String,

    /// Speaker voice (e.g., "angus", "asteria").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,

    /// Audio encoding (e.g., "mp3", "linear16").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    /// Container format (e.g., "none", "wav").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    /// Sample rate in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,

    /// Bit rate in bits per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u32>,
}

// =============================================================================
// Result Types
// =============================================================================

/// Audio produced by a provider.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// Raw audio bytes
    pub data: Vec<u8>,
    /// MIME type of the audio
    pub mime_type: &'static str,
    /// File name suggested to the client
    pub file_name: &'static str,
    /// Location on disk when the file was retained after the request
    pub retained_path: Option<PathBuf>,
}

/// A text-to-speech backend.
///
/// Each adapter translates its own parameter type into a provider call and
/// returns the complete audio.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Request parameters accepted by this provider.
    type Params: Send + 'static;

    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Synthesize speech for the given parameters.
    async fn synthesize(&self, params: Self::Params) -> Result<SynthesizedAudio, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_riva_default_params() {
        let params: RivaSynthesizeParams = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(params.text, "hello");
        assert_eq!(params.language_code, "en-US");
        assert_eq!(params.voice, "Magpie-Multilingual.EN-US.Sofia");
    }

    #[test]
    fn test_riva_explicit_params() {
        let params: RivaSynthesizeParams = serde_json::from_str(
            r#"{"text": "hola", "language_code": "es-US", "voice": "Magpie-Multilingual.ES-US.Diego"}"#,
        )
        .unwrap();
        assert_eq!(params.language_code, "es-US");
        assert_eq!(params.voice, "Magpie-Multilingual.ES-US.Diego");
    }

    #[test]
    fn test_riva_missing_text_is_rejected() {
        let result: Result<RivaSynthesizeParams, _> =
            serde_json::from_str(r#"{"voice": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_riva_blank_values_are_kept() {
        let params: RivaSynthesizeParams =
            serde_json::from_str(r#"{"text": "  ", "language_code": "", "voice": ""}"#).unwrap();
        assert_eq!(params.text, "  ");
        assert_eq!(params.language_code, "");
        assert_eq!(params.voice, "");
    }

    #[test]
    fn test_cloudflare_omits_unset_fields() {
        let params: CloudflareSynthesizeParams =
            serde_json::from_str(r#"{"text": "hello", "speaker": "x"}"#).unwrap();
        let payload = serde_json::to_value(&params).unwrap();
        assert_eq!(payload, serde_json::json!({"text": "hello", "speaker": "x"}));
    }

    #[test]
    fn test_cloudflare_keeps_all_set_fields() {
        let params = CloudflareSynthesizeParams {
            text: "hello".to_string(),
            speaker: Some("angus".to_string()),
            encoding: Some("mp3".to_string()),
            container: Some("none".to_string()),
            sample_rate: Some(24000),
            bit_rate: Some(48000),
        };
        let payload = serde_json::to_value(&params).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "text": "hello",
                "speaker": "angus",
                "encoding": "mp3",
                "container": "none",
                "sample_rate": 24000,
                "bit_rate": 48000
            })
        );
    }

    #[test]
    fn test_cloudflare_rejects_non_numeric_sample_rate() {
        let result: Result<CloudflareSynthesizeParams, _> =
            serde_json::from_str(r#"{"text": "hello", "sample_rate": "fast"}"#);
        assert!(result.is_err());
    }
}
