use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use super::FragmentStream;
use super::GeneratedImage;
use super::ImageRequest;
use super::Message;
use super::TranscriptionRequest;

/// Parameter bundle for a chat completion call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify all configurations are available to work with
    /// the backend.
    async fn health_check(&self) -> Result<()>;

    /// Lists the models the service exposes. Used by `/models` to flag
    /// configured models the service doesn't know about.
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Requests a completion and waits for the full response text.
    async fn get_completion(&self, request: &CompletionRequest) -> Result<String>;

    /// Requests a streamed completion. Fragments are produced lazily as the
    /// service sends them; nothing is read until the stream is polled.
    async fn stream_completion(&self, request: &CompletionRequest) -> Result<FragmentStream>;

    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>>;

    async fn transcribe(&self, request: TranscriptionRequest) -> Result<String>;
}

pub type BackendBox = Arc<dyn Backend + Send + Sync>;
