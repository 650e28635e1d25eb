#[cfg(test)]
#[path = "turn_test.rs"]
mod tests;

use std::time::Duration;

use super::StopReason;

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TurnState {
    Idle,
    AwaitingResponse,
    RenderingStream,
    RenderingComplete,
    Failed,
}

impl TurnState {
    pub fn can_transition_to(&self, next: TurnState) -> bool {
        return matches!(
            (self, next),
            (TurnState::Idle, TurnState::AwaitingResponse)
                | (TurnState::AwaitingResponse, TurnState::RenderingStream)
                | (TurnState::AwaitingResponse, TurnState::RenderingComplete)
                | (TurnState::AwaitingResponse, TurnState::Failed)
                | (TurnState::RenderingStream, TurnState::Failed)
                | (TurnState::RenderingStream, TurnState::Idle)
                | (TurnState::RenderingComplete, TurnState::Idle)
                | (TurnState::Failed, TurnState::Idle)
        );
    }
}

/// Outcome of a committed turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub text: String,
    pub stop_reason: StopReason,
    pub elapsed: Duration,
    /// Present when token reporting is enabled and the model is supported.
    pub tokens: Option<usize>,
    pub show_elapsed: bool,
}

impl TurnReport {
    /// Notices shown beneath the assistant's reply.
    pub fn notices(&self) -> Vec<String> {
        let mut notices = vec![];
        if self.stop_reason == StopReason::Cancelled {
            notices.push("Streaming stopped.".to_string());
        }
        if let Some(tokens) = self.tokens {
            notices.push(format!("use tokens: {tokens}"));
        }
        if self.show_elapsed {
            notices.push(format!("Use time: {:.2}s", self.elapsed.as_secs_f64()));
        }

        return notices;
    }
}
