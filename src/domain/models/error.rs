use thiserror::Error;

/// Failures a chat turn can end in. Each one is rendered verbatim to the user
/// and none of them end the session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("No API key or base URL is configured. Set OPENAI_API_KEY and OPENAI_BASE_URL, or pass --openai-token and --openai-url.")]
    CredentialMissing,

    #[error("Token counting is not implemented for model {0}")]
    UnsupportedModel(String),

    #[error("{0}")]
    StreamTransport(String),

    #[error("{path} is {size} bytes, which exceeds the {limit} byte upload limit")]
    FileTooLarge { path: String, size: u64, limit: u64 },

    #[error("{0} is not a supported audio file. Supported formats are: {1}")]
    UnsupportedAudioFormat(String, String),

    #[error("A response is still in progress")]
    TurnInProgress,
}

impl ChatError {
    pub fn transport(err: &anyhow::Error) -> ChatError {
        return ChatError::StreamTransport(err.to_string());
    }

    /// Keeps typed errors raised by a backend, everything else is a transport
    /// failure.
    pub fn from_backend(err: &anyhow::Error) -> ChatError {
        if let Some(chat_err) = err.downcast_ref::<ChatError>() {
            return chat_err.clone();
        }

        return ChatError::transport(err);
    }
}
