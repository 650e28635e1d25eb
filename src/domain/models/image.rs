use serde::Deserialize;
use serde::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display, Serialize)]
pub enum ImageSize {
    #[strum(serialize = "1024x1024")]
    #[serde(rename = "1024x1024")]
    Square,
    #[strum(serialize = "1024x1792")]
    #[serde(rename = "1024x1792")]
    Portrait,
    #[strum(serialize = "1792x1024")]
    #[serde(rename = "1792x1024")]
    Landscape,
}

impl ImageSize {
    pub fn parse(text: &str) -> Option<ImageSize> {
        return ImageSize::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Standard,
    Hd,
}

impl ImageQuality {
    pub fn parse(text: &str) -> Option<ImageQuality> {
        return ImageQuality::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub size: ImageSize,
    pub quality: ImageQuality,
    pub n: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}
