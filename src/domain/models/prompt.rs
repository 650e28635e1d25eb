use serde::Deserialize;
use serde::Serialize;

/// A named system prompt, selectable from the prompts file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPreset {
    pub name: String,
    pub context: String,
}
