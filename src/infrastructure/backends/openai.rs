#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream;
use futures::stream::TryStreamExt;
use serde::Deserialize;
use serde::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::domain::models::Backend;
use crate::domain::models::ChatError;
use crate::domain::models::CompletionRequest;
use crate::domain::models::FinishReason;
use crate::domain::models::FragmentStream;
use crate::domain::models::GeneratedImage;
use crate::domain::models::ImageRequest;
use crate::domain::models::StreamFragment;
use crate::domain::models::TranscriptionRequest;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_millis(1000);

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Model {
    id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ModelListResponse {
    data: Vec<Model>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatChoiceResponse {
    message: ChatMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoiceResponse>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionDeltaResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    #[serde(default)]
    delta: CompletionDeltaResponse,
    #[serde(default)]
    finish_reason: Option<FinishReason>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoiceResponse>,
    #[serde(default)]
    error: Option<ErrorResponse>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ImageResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Debug, PartialEq, Eq)]
enum SseLine {
    Skip,
    Done,
    Fragment(StreamFragment),
}

fn parse_sse_line(line: &str) -> Result<SseLine> {
    let cleaned_line = line.trim();
    let data = match cleaned_line.strip_prefix("data:") {
        Some(data) => data.trim(),
        None => return Ok(SseLine::Skip),
    };

    if data.is_empty() {
        return Ok(SseLine::Skip);
    }
    if data == "[DONE]" {
        return Ok(SseLine::Done);
    }

    let ores: CompletionResponse = serde_json::from_str(data)?;
    tracing::debug!(body = ?ores, "Completion response");

    if let Some(err) = ores.error {
        let error_type = err.error_type.unwrap_or_else(|| return "unknown".to_string());
        tracing::error!(error_type = %error_type, message = %err.message, "Stream returned an error");
        bail!(format!(
            "The service failed mid-stream ({error_type}): {}",
            err.message
        ));
    }

    // Some services open the stream with metadata only chunks.
    let choice = match ores.choices.into_iter().next() {
        Some(choice) => choice,
        None => return Ok(SseLine::Skip),
    };

    return Ok(SseLine::Fragment(StreamFragment {
        delta_text: choice.delta.content,
        finish_reason: choice.finish_reason,
    }));
}

async fn check_status(res: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    tracing::error!(status = status.as_u16(), body = %body, "Failed to {action}");
    bail!(format!(
        "Failed to {action}, the service returned {status}: {body}"
    ));
}

/// Client for OpenAI compatible APIs. `url` includes the version prefix, for
/// example `https://api.openai.com/v1`.
pub struct OpenAI {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl OpenAI {
    pub fn new(url: &str, token: &str) -> OpenAI {
        return OpenAI {
            url: url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client: reqwest::Client::new(),
        };
    }

    async fn post_completion(&self, request: &CompletionRequest) -> Result<reqwest::Response> {
        let res = self
            .client
            .post(format!("{url}/chat/completions", url = self.url))
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        return check_status(res, "make completion request").await;
    }
}

#[async_trait]
impl Backend for OpenAI {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() || self.token.is_empty() {
            return Err(ChatError::CredentialMissing.into());
        }

        let res = self
            .client
            .get(format!("{url}/models", url = self.url))
            .bearer_auth(&self.token)
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "OpenAI is not reachable");
                bail!(format!("{} is not reachable", self.url));
            }
        };

        let status = res.status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "OpenAI health check failed");
            bail!(format!("Health check failed with status {status}"));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>> {
        let res = self
            .client
            .get(format!("{url}/models", url = self.url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let res = check_status(res, "list models")
            .await?
            .json::<ModelListResponse>()
            .await?;

        let mut models: Vec<String> = res
            .data
            .iter()
            .map(|model| {
                return model.id.to_string();
            })
            .collect();

        models.sort();

        return Ok(models);
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, request: &CompletionRequest) -> Result<String> {
        let req = CompletionRequest {
            stream: false,
            ..request.clone()
        };

        let res = self
            .post_completion(&req)
            .await?
            .json::<ChatResponse>()
            .await?;
        tracing::debug!(body = ?res, "Completion response");

        let text = res
            .choices
            .into_iter()
            .next()
            .and_then(|choice| return choice.message.content)
            .unwrap_or_default();

        return Ok(text);
    }

    #[allow(clippy::implicit_return)]
    async fn stream_completion(&self, request: &CompletionRequest) -> Result<FragmentStream> {
        let req = CompletionRequest {
            stream: true,
            ..request.clone()
        };

        let res = self.post_completion(&req).await?;
        let lines_reader = StreamReader::new(res.bytes_stream().map_err(convert_err)).lines();

        let fragments = stream::unfold(lines_reader, |mut lines_reader| async move {
            loop {
                let line = match lines_reader.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => return None,
                    Err(err) => return Some((Err(err.into()), lines_reader)),
                };

                match parse_sse_line(&line) {
                    Ok(SseLine::Skip) => continue,
                    Ok(SseLine::Done) => return None,
                    Ok(SseLine::Fragment(fragment)) => return Some((Ok(fragment), lines_reader)),
                    Err(err) => return Some((Err(err), lines_reader)),
                }
            }
        });

        return Ok(Box::pin(fragments));
    }

    #[allow(clippy::implicit_return)]
    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>> {
        let res = self
            .client
            .post(format!("{url}/images/generations", url = self.url))
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        let res = check_status(res, "generate images")
            .await?
            .json::<ImageResponse>()
            .await?;

        return Ok(res.data);
    }

    #[allow(clippy::implicit_return)]
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<String> {
        let file = reqwest::multipart::Part::bytes(request.bytes).file_name(request.file_name);
        let form = reqwest::multipart::Form::new()
            .text("model", request.model)
            .text("response_format", request.response_format)
            .text("language", request.language)
            .part("file", file);

        let res = self
            .client
            .post(format!("{url}/audio/transcriptions", url = self.url))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        let text = check_status(res, "transcribe audio").await?.text().await?;

        return Ok(text);
    }
}
