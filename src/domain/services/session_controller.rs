#[cfg(test)]
#[path = "session_controller_test.rs"]
mod tests;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::CompletionRequestBuilder;
use super::StreamAccumulator;
use super::TokenCounter;
use crate::domain::models::BackendBox;
use crate::domain::models::ChatError;
use crate::domain::models::Message;
use crate::domain::models::ReportOptions;
use crate::domain::models::Session;
use crate::domain::models::StopReason;
use crate::domain::models::TurnReport;
use crate::domain::models::TurnState;

/// Drives a single session through its turns. Owns the session; one turn is
/// in flight at a time.
pub struct SessionController {
    backend: BackendBox,
    session: Session,
    token_counter: TokenCounter,
    reporting: ReportOptions,
    state: TurnState,
}

impl SessionController {
    pub fn new(backend: BackendBox, session: Session, reporting: ReportOptions) -> SessionController {
        return SessionController {
            backend,
            session,
            token_counter: TokenCounter::default(),
            reporting,
            state: TurnState::Idle,
        };
    }

    pub fn backend(&self) -> &BackendBox {
        return &self.backend;
    }

    pub fn session(&self) -> &Session {
        return &self.session;
    }

    pub fn session_mut(&mut self) -> &mut Session {
        return &mut self.session;
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Runs one user turn: the user message is appended before the service is
    /// called and stays in the history whatever the outcome. The assistant
    /// message is only appended once a reply completed or was cancelled.
    pub async fn submit<F>(
        &mut self,
        input: &str,
        cancel: &CancellationToken,
        on_partial: F,
    ) -> Result<TurnReport, ChatError>
    where
        F: FnMut(&str),
    {
        if self.state != TurnState::Idle {
            return Err(ChatError::TurnInProgress);
        }

        self.transition(TurnState::AwaitingResponse);
        self.session.conversation.append(Message::user(input));

        let started = Instant::now();
        let res = self.dispatch(cancel, on_partial).await;
        let elapsed = started.elapsed();

        let (text, stop_reason) = match res {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(error = %err, model = %self.session.model, "Turn failed");
                self.transition(TurnState::Failed);
                self.transition(TurnState::Idle);
                return Err(err);
            }
        };

        self.session.conversation.append(Message::assistant(&text));

        let mut tokens = None;
        if self.reporting.num_tokens {
            match self
                .token_counter
                .count(self.session.conversation.messages(), &self.session.model)
            {
                Ok(count) => tokens = Some(count),
                Err(err) => {
                    tracing::warn!(error = %err, model = %self.session.model, "Skipping token report");
                }
            }
        }

        self.transition(TurnState::Idle);

        return Ok(TurnReport {
            text,
            stop_reason,
            elapsed,
            tokens,
            show_elapsed: self.reporting.use_time,
        });
    }

    async fn dispatch<F>(
        &mut self,
        cancel: &CancellationToken,
        on_partial: F,
    ) -> Result<(String, StopReason), ChatError>
    where
        F: FnMut(&str),
    {
        let request = CompletionRequestBuilder::build(&self.session);
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            stream = request.stream,
            "Dispatching completion"
        );

        if !request.stream {
            let text = self
                .backend
                .get_completion(&request)
                .await
                .map_err(|err| return ChatError::from_backend(&err))?;

            self.transition(TurnState::RenderingComplete);
            return Ok((text, StopReason::NaturalStop));
        }

        let stream = self
            .backend
            .stream_completion(&request)
            .await
            .map_err(|err| return ChatError::from_backend(&err))?;

        self.transition(TurnState::RenderingStream);
        let accumulated = StreamAccumulator::accumulate(stream, cancel, on_partial).await?;

        return Ok((accumulated.text, accumulated.stop_reason));
    }

    fn transition(&mut self, next: TurnState) {
        if !self.state.can_transition_to(next) {
            tracing::error!(from = %self.state, to = %next, "Invalid turn transition");
        }
        self.state = next;
    }
}
