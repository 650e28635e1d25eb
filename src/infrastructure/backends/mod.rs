#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub mod openai;

use std::sync::Arc;

use dashmap::DashMap;

use crate::domain::models::BackendBox;
use crate::domain::models::ChatError;

/// Hands out one client per `(base_url, api_key)` pair. Owned by whoever runs
/// the session, clients live as long as the factory.
#[derive(Default)]
pub struct ClientFactory {
    clients: DashMap<(String, String), BackendBox>,
}

impl ClientFactory {
    pub fn get(&self, base_url: &str, api_key: &str) -> Result<BackendBox, ChatError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let api_key = api_key.trim();
        if base_url.is_empty() || api_key.is_empty() {
            return Err(ChatError::CredentialMissing);
        }

        let key = (base_url.to_string(), api_key.to_string());
        if let Some(backend) = self.clients.get(&key) {
            return Ok(backend.clone());
        }

        let backend: BackendBox = Arc::new(openai::OpenAI::new(base_url, api_key));
        self.clients.insert(key, backend.clone());
        tracing::debug!(url = base_url, "Created completion client");

        return Ok(backend);
    }
}
