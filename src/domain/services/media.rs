#[cfg(test)]
#[path = "media_test.rs"]
mod tests;

use std::path::Path;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::check_upload;
use crate::domain::models::BackendBox;
use crate::domain::models::GeneratedImage;
use crate::domain::models::ImageOptions;
use crate::domain::models::ImageRequest;
use crate::domain::models::SpeechOptions;
use crate::domain::models::TranscriptionRequest;

/// Image generation and audio transcription, sharing the chat's backend.
pub struct MediaService {
    backend: BackendBox,
    image: ImageOptions,
    speech: SpeechOptions,
}

impl MediaService {
    pub fn new(backend: BackendBox, image: ImageOptions, speech: SpeechOptions) -> MediaService {
        return MediaService {
            backend,
            image,
            speech,
        };
    }

    pub async fn draw(&self, prompt: &str) -> Result<Vec<GeneratedImage>> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            bail!("You must describe the image to draw.");
        }
        if self.image.model == "dall-e-3" && self.image.n != 1 {
            bail!(format!(
                "dall-e-3 only supports generating 1 image at a time, got {}",
                self.image.n
            ));
        }

        let request = ImageRequest {
            model: self.image.model.to_string(),
            prompt: prompt.to_string(),
            size: self.image.size,
            quality: self.image.quality,
            n: self.image.n,
        };
        tracing::debug!(
            model = %request.model,
            size = %request.size,
            quality = %request.quality,
            "Generating images"
        );

        return self.backend.generate_images(&request).await;
    }

    /// Size and format are checked against the file metadata before any byte
    /// is read or uploaded.
    pub async fn transcribe_file(&self, path: &Path) -> Result<String> {
        let metadata = tokio::fs::metadata(path).await?;
        check_upload(path, metadata.len())?;

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|e| return e.to_string_lossy().to_string())
            .unwrap_or_else(|| return "audio.wav".to_string());

        tracing::debug!(
            file_name = %file_name,
            size = bytes.len(),
            model = %self.speech.model,
            "Transcribing audio"
        );

        let transcript = self
            .backend
            .transcribe(TranscriptionRequest {
                model: self.speech.model.to_string(),
                language: self.speech.language.to_string(),
                response_format: self.speech.response_format.to_string(),
                file_name,
                bytes,
            })
            .await?;

        return Ok(transcript.trim().to_string());
    }
}

pub fn format_images(images: &[GeneratedImage]) -> String {
    if images.is_empty() {
        return "The service returned no images.".to_string();
    }

    return images
        .iter()
        .enumerate()
        .map(|(idx, image)| {
            let mut text = format!("- ({}) {}", idx + 1, image.url);
            if let Some(revised_prompt) = &image.revised_prompt {
                text += &format!("\n  Revised prompt: {revised_prompt}");
            }
            return text;
        })
        .collect::<Vec<String>>()
        .join("\n");
}
