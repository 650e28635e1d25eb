use super::ImageQuality;
use super::ImageSize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub num_tokens: bool,
    pub use_time: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageOptions {
    pub model: String,
    pub size: ImageSize,
    pub quality: ImageQuality,
    pub n: u8,
}

impl Default for ImageOptions {
    fn default() -> ImageOptions {
        return ImageOptions {
            model: "dall-e-3".to_string(),
            size: ImageSize::Square,
            quality: ImageQuality::Standard,
            n: 1,
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeechOptions {
    pub model: String,
    pub language: String,
    pub response_format: String,
}

impl Default for SpeechOptions {
    fn default() -> SpeechOptions {
        return SpeechOptions {
            model: "whisper-1".to_string(),
            language: "zh".to_string(),
            response_format: "text".to_string(),
        };
    }
}

/// Chat options that aren't part of the conversation itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatSettings {
    pub models: Vec<String>,
    pub prompt_language: String,
    pub reporting: ReportOptions,
    pub image: ImageOptions,
    pub speech: SpeechOptions,
}
