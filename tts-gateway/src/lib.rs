//! TTS Gateway Library
//!
//! A thin HTTP gateway that forwards text-to-speech requests to NVIDIA Riva
//! (through its command-line client) or Cloudflare Workers AI and returns
//! the resulting audio.

pub mod cloudflare;
pub mod handler;
pub mod riva;
pub mod server;
pub mod storage;

pub use cloudflare::CloudflareProvider;
pub use handler::{
    CloudflareSynthesizeParams, RivaSynthesizeParams, SpeechProvider, SynthesizedAudio,
};
pub use riva::RivaProvider;
pub use server::{AppState, router};
pub use storage::AudioStore;
