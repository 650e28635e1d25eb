#[cfg(test)]
#[path = "accumulator_test.rs"]
mod tests;

use anyhow::Result;
use futures::Stream;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::domain::models::ChatError;
use crate::domain::models::StopReason;
use crate::domain::models::StreamFragment;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accumulated {
    pub text: String,
    pub stop_reason: StopReason,
    pub fragments_applied: usize,
}

pub struct StreamAccumulator {}

impl StreamAccumulator {
    /// Pulls fragments until the service signals `stop`, the stream ends, or
    /// `cancel` fires. Cancellation is checked before and after every pull, so
    /// a fragment that arrives after cancellation is never applied.
    ///
    /// `on_partial` receives the text accumulated so far after every applied
    /// fragment. A failing fragment discards everything accumulated.
    pub async fn accumulate<S, F>(
        mut stream: S,
        cancel: &CancellationToken,
        mut on_partial: F,
    ) -> Result<Accumulated, ChatError>
    where
        S: Stream<Item = Result<StreamFragment>> + Unpin,
        F: FnMut(&str),
    {
        let mut text = String::new();
        let mut fragments_applied = 0;

        let stop_reason = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }

            let fragment = match stream.next().await {
                Some(Ok(fragment)) => fragment,
                Some(Err(err)) => {
                    tracing::error!(
                        error = ?err,
                        fragments_applied = fragments_applied,
                        "Stream failed, discarding partial response"
                    );
                    return Err(ChatError::transport(&err));
                }
                None => break StopReason::NaturalStop,
            };

            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if fragment.is_stop() {
                break StopReason::NaturalStop;
            }

            if let Some(delta) = fragment.delta_text {
                text += &delta;
            }
            fragments_applied += 1;
            on_partial(&text);
        };

        tracing::debug!(
            stop_reason = %stop_reason,
            fragments_applied = fragments_applied,
            "Stream finished"
        );

        return Ok(Accumulated {
            text,
            stop_reason,
            fragments_applied,
        });
    }
}
