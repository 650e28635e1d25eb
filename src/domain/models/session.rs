#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use super::Conversation;

pub const MAX_TOKENS_LIMIT: u32 = 200_000;

#[derive(Clone, Debug, PartialEq)]
pub struct DecodingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stream: bool,
}

impl Default for DecodingParams {
    fn default() -> DecodingParams {
        return DecodingParams {
            max_tokens: 4096,
            temperature: 0.7,
            top_p: 1.0,
            stream: true,
        };
    }
}

impl DecodingParams {
    pub fn validate(&self) -> Result<()> {
        if self.max_tokens < 1 || self.max_tokens > MAX_TOKENS_LIMIT {
            bail!(format!(
                "max-tokens must be between 1 and {MAX_TOKENS_LIMIT}, got {}",
                self.max_tokens
            ));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            bail!(format!(
                "temperature must be between 0 and 1, got {}",
                self.temperature
            ));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            bail!(format!("top-p must be between 0 and 1, got {}", self.top_p));
        }

        return Ok(());
    }

    /// Applies a `/set KEY VALUE` style update, leaving the params untouched
    /// if the result would be out of range.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "max-tokens" => updated.max_tokens = value.parse::<u32>()?,
            "temperature" => updated.temperature = value.parse::<f32>()?,
            "top-p" => updated.top_p = value.parse::<f32>()?,
            "stream" => updated.stream = value.parse::<bool>()?,
            _ => bail!(format!(
                "Unknown parameter {key}. Possible values are: max-tokens, temperature, top-p, stream"
            )),
        }

        updated.validate()?;
        *self = updated;
        return Ok(());
    }

    pub fn format(&self) -> String {
        return [
            format!("- max-tokens: {}", self.max_tokens),
            format!("- temperature: {}", self.temperature),
            format!("- top-p: {}", self.top_p),
            format!("- stream: {}", self.stream),
        ]
        .join("\n");
    }
}

/// Everything a chat turn needs: the history, the model it is sent to and the
/// decoding parameters. Lives for one process; nothing is persisted.
#[derive(Clone, Debug)]
pub struct Session {
    pub model: String,
    pub params: DecodingParams,
    pub conversation: Conversation,
    system_prompt: String,
}

impl Session {
    pub fn new(model: &str, params: DecodingParams, system_prompt: &str) -> Session {
        return Session {
            model: model.to_string(),
            params,
            conversation: Conversation::new(system_prompt),
            system_prompt: system_prompt.to_string(),
        };
    }

    pub fn reset(&mut self) {
        self.conversation.reset(&self.system_prompt);
    }

    pub fn set_system_prompt(&mut self, system_prompt: &str) {
        self.system_prompt = system_prompt.to_string();
        self.reset();
    }
}
