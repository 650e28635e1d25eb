#[cfg(test)]
#[path = "request_builder_test.rs"]
mod tests;

use crate::domain::models::CompletionRequest;
use crate::domain::models::DecodingParams;
use crate::domain::models::Session;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub struct CompletionRequestBuilder {}

impl CompletionRequestBuilder {
    /// Maps the session onto a completion request. Unset fields fall back to
    /// their defaults, nothing else is altered.
    pub fn build(session: &Session) -> CompletionRequest {
        let defaults = DecodingParams::default();

        let mut model = session.model.trim().to_string();
        if model.is_empty() {
            model = DEFAULT_MODEL.to_string();
        }

        let mut max_tokens = session.params.max_tokens;
        if max_tokens == 0 {
            max_tokens = defaults.max_tokens;
        }

        return CompletionRequest {
            model,
            messages: session.conversation.messages().to_vec(),
            temperature: session.params.temperature,
            max_tokens,
            top_p: session.params.top_p,
            stream: session.params.stream,
        };
    }
}
