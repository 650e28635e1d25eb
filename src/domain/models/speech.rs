#[cfg(test)]
#[path = "speech_test.rs"]
mod tests;

use std::path::Path;

use super::ChatError;

/// Largest audio file the transcription endpoint accepts.
pub const MAX_FILE_SIZE: u64 = 25 * 1024 * 1024;

pub const AUDIO_EXTENSIONS: [&str; 3] = ["wav", "mp3", "m4a"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub model: String,
    pub language: String,
    pub response_format: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Rejects uploads the service would refuse, before anything is read or sent.
pub fn check_upload(path: &Path, size: u64) -> Result<(), ChatError> {
    let extension = path
        .extension()
        .map(|e| return e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if !AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ChatError::UnsupportedAudioFormat(
            path.display().to_string(),
            AUDIO_EXTENSIONS.join(", "),
        ));
    }

    if size > MAX_FILE_SIZE {
        return Err(ChatError::FileTooLarge {
            path: path.display().to_string(),
            size,
            limit: MAX_FILE_SIZE,
        });
    }

    return Ok(());
}
