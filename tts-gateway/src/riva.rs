//! Riva speech provider.
//!
//! Synthesis is delegated to NVIDIA's `talk.py` client, which speaks gRPC over
//! TLS to the Riva service and writes a WAV file. The client runs as a
//! subprocess per request; its stderr is logged but never returned to
//! callers.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};
use tts_gateway_common::config::RivaConfig;
use tts_gateway_common::error::{ConfigError, Error};

use crate::handler::{RivaSynthesizeParams, SpeechProvider, SynthesizedAudio, WAV_MIME_TYPE};
use crate::storage::AudioStore;

/// Speech provider backed by the Riva command-line client.
#[derive(Debug, Clone)]
pub struct RivaProvider {
    config: RivaConfig,
    store: AudioStore,
}

impl RivaProvider {
    /// Create a new provider from configuration and an audio store.
    pub fn new(config: RivaConfig, store: AudioStore) -> Self {
        Self { config, store }
    }

    /// Split the configured command into program and leading arguments.
    fn command(&self) -> Result<(&str, &[String]), ConfigError> {
        self.config
            .talk_command
            .split_first()
            .map(|(program, rest)| (program.as_str(), rest))
            .ok_or_else(|| ConfigError::invalid_value("TTS_TALK_COMMAND", "command cannot be empty"))
    }

    /// Build the client arguments for one request, excluding the program.
    ///
    /// # Errors
    /// Returns a config error if the function id or API key is not set.
    pub fn talk_args(
        &self,
        params: &RivaSynthesizeParams,
        output: &Path,
    ) -> Result<Vec<String>, ConfigError> {
        let function_id = self
            .config
            .function_id
            .as_deref()
            .ok_or_else(|| ConfigError::missing_env_var("TTS_FUNCTION_ID"))?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ConfigError::missing_env_var("TTS_API_KEY"))?;

        let (_, leading) = self.command()?;
        let mut args: Vec<String> = leading.to_vec();
        args.extend([
            "--server".to_string(),
            self.config.server.clone(),
            "--use-ssl".to_string(),
            "--metadata".to_string(),
            "function-id".to_string(),
            function_id.to_string(),
            "--metadata".to_string(),
            "authorization".to_string(),
            format!("Bearer {}", api_key),
            "--language-code".to_string(),
            params.language_code.clone(),
            "--text".to_string(),
            params.text.clone(),
            "--voice".to_string(),
            params.voice.clone(),
            "--output".to_string(),
            output.display().to_string(),
        ]);
        Ok(args)
    }

    /// Run the client and wait for it to exit.
    async fn run_talk(&self, args: &[String]) -> Result<(), Error> {
        let (program, _) = self.command()?;

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::process(format!("failed to start '{}': {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                program = %program,
                status = %output.status,
                stderr = %stderr.trim(),
                "Riva client failed"
            );
            return Err(Error::process(format!(
                "'{}' exited with {}",
                program, output.status
            )));
        }

        debug!(stdout = %String::from_utf8_lossy(&output.stdout).trim(), "Riva client finished");
        Ok(())
    }
}

#[async_trait]
impl SpeechProvider for RivaProvider {
    type Params = RivaSynthesizeParams;

    fn name(&self) -> &'static str {
        "riva"
    }

    #[instrument(level = "info", name = "riva_synthesize", skip(self, params), fields(voice = %params.voice, language_code = %params.language_code))]
    async fn synthesize(&self, params: RivaSynthesizeParams) -> Result<SynthesizedAudio, Error> {
        let file = self.store.allocate("wav").await?;
        let args = self.talk_args(&params, file.path())?;

        info!(server = %self.config.server, "Synthesizing speech with Riva");
        self.run_talk(&args).await?;

        self.store.finish(file, WAV_MIME_TYPE, "speech.wav").await
    }
}
