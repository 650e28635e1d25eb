#[cfg(test)]
#[path = "prompts_test.rs"]
mod tests;

use std::collections::HashMap;
use std::path::Path;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;

use crate::domain::models::PromptPreset;

/// Named system prompts, grouped by language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptPresets {
    languages: HashMap<String, Vec<PromptPreset>>,
}

impl PromptPresets {
    pub fn from_json(text: &str) -> Result<PromptPresets> {
        let languages = serde_json::from_str::<HashMap<String, Vec<PromptPreset>>>(text)?;
        return Ok(PromptPresets { languages });
    }

    pub async fn load(path: &Path) -> Result<PromptPresets> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| return format!("Failed to read prompts file {}", path.display()))?;

        let presets = PromptPresets::from_json(&text)
            .with_context(|| return format!("Failed to parse prompts file {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            languages = presets.languages.len(),
            "Loaded prompt presets"
        );

        return Ok(presets);
    }

    pub fn names(&self, language: &str) -> Vec<String> {
        return self
            .languages
            .get(language)
            .map(|presets| {
                return presets
                    .iter()
                    .map(|preset| return preset.name.to_string())
                    .collect();
            })
            .unwrap_or_default();
    }

    pub fn find(&self, language: &str, name: &str) -> Option<&PromptPreset> {
        return self
            .languages
            .get(language)?
            .iter()
            .find(|preset| return preset.name == name);
    }

    /// Like `find`, but a missing preset is an error naming what is available.
    pub fn get(&self, language: &str, name: &str) -> Result<&PromptPreset> {
        if let Some(preset) = self.find(language, name) {
            return Ok(preset);
        }

        let names = self.names(language);
        if names.is_empty() {
            bail!(format!("No prompts are configured for language {language}"));
        }

        bail!(format!(
            "No prompt named {name} for language {language}. Possible values are: {}",
            names.join(", ")
        ));
    }
}
