#[cfg(test)]
#[path = "stream_test.rs"]
mod tests;

use std::pin::Pin;

use anyhow::Result;
use futures::Stream;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    FunctionCall,
    #[serde(other)]
    Other,
}

/// One incremental unit of a streamed completion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamFragment {
    pub delta_text: Option<String>,
    pub finish_reason: Option<FinishReason>,
}

impl StreamFragment {
    pub fn is_stop(&self) -> bool {
        return self.finish_reason == Some(FinishReason::Stop);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    NaturalStop,
    Cancelled,
}

pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<StreamFragment>> + Send>>;
