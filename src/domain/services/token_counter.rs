#[cfg(test)]
#[path = "token_counter_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use dashmap::DashMap;
use tiktoken_rs::CoreBPE;

use crate::domain::models::ChatError;
use crate::domain::models::Message;

/// Every reply is primed with `<|start|>assistant<|message|>`.
pub const REPLY_PRIMING_TOKENS: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AccountingRule {
    pub tokens_per_message: usize,
    pub tokens_per_name: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModelPattern {
    Exact(&'static str),
    Contains(&'static str),
}

impl ModelPattern {
    pub fn matches(&self, model: &str) -> bool {
        match self {
            ModelPattern::Exact(name) => return model == *name,
            ModelPattern::Contains(family) => return model.contains(family),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RuleEntry {
    pub pattern: ModelPattern,
    pub canonical: &'static str,
    pub rule: AccountingRule,
}

const SNAPSHOT_RULE: AccountingRule = AccountingRule {
    tokens_per_message: 3,
    tokens_per_name: 1,
};

const fn snapshot(name: &'static str) -> RuleEntry {
    return RuleEntry {
        pattern: ModelPattern::Exact(name),
        canonical: name,
        rule: SNAPSHOT_RULE,
    };
}

const fn alias(family: &'static str, canonical: &'static str) -> RuleEntry {
    return RuleEntry {
        pattern: ModelPattern::Contains(family),
        canonical,
        rule: SNAPSHOT_RULE,
    };
}

/// Evaluated top to bottom, first match wins. Dated snapshots come first,
/// then family names from most to least specific so `gpt-4o-mini` never
/// resolves as `gpt-4o` and `gpt-4o` never resolves as `gpt-4`.
pub const ACCOUNTING_RULES: [RuleEntry; 11] = [
    snapshot("gpt-3.5-turbo-0125"),
    snapshot("gpt-4-0314"),
    snapshot("gpt-4-32k-0314"),
    snapshot("gpt-4-0613"),
    snapshot("gpt-4-32k-0613"),
    snapshot("gpt-4o-mini-2024-07-18"),
    snapshot("gpt-4o-2024-08-06"),
    alias("gpt-3.5-turbo", "gpt-3.5-turbo-0125"),
    alias("gpt-4o-mini", "gpt-4o-mini-2024-07-18"),
    alias("gpt-4o", "gpt-4o-2024-08-06"),
    alias("gpt-4", "gpt-4-0613"),
];

/// Counts the tokens the completion service charges for a message history.
pub struct TokenCounter {
    rules: Vec<RuleEntry>,
    encoders: DashMap<String, Arc<CoreBPE>>,
}

impl Default for TokenCounter {
    fn default() -> TokenCounter {
        return TokenCounter::new(ACCOUNTING_RULES.to_vec());
    }
}

impl TokenCounter {
    pub fn new(rules: Vec<RuleEntry>) -> TokenCounter {
        return TokenCounter {
            rules,
            encoders: DashMap::new(),
        };
    }

    /// Resolves a model name to the snapshot whose accounting rule applies.
    pub fn resolve(&self, model: &str) -> Result<RuleEntry, ChatError> {
        let entry = self
            .rules
            .iter()
            .find(|entry| return entry.pattern.matches(model))
            .ok_or_else(|| return ChatError::UnsupportedModel(model.to_string()))?;

        if entry.canonical != model {
            tracing::warn!(
                model = model,
                canonical = entry.canonical,
                "Model may update over time, counting tokens as its snapshot"
            );
        }

        return Ok(*entry);
    }

    pub fn count(&self, messages: &[Message], model: &str) -> Result<usize> {
        let entry = self.resolve(model)?;
        let encoder = self.encoder(entry.canonical)?;

        let mut num_tokens = 0;
        for message in messages {
            num_tokens += entry.rule.tokens_per_message;
            for value in message.field_values() {
                num_tokens += encoder.encode_ordinary(&value).len();
            }
            if message.name.is_some() {
                num_tokens += entry.rule.tokens_per_name;
            }
        }

        return Ok(num_tokens + REPLY_PRIMING_TOKENS);
    }

    fn encoder(&self, canonical: &str) -> Result<Arc<CoreBPE>> {
        if let Some(encoder) = self.encoders.get(canonical) {
            return Ok(encoder.clone());
        }

        let bpe = match tiktoken_rs::tokenizer::get_tokenizer(canonical) {
            Some(tokenizer) => tiktoken_rs::get_bpe_from_tokenizer(tokenizer)?,
            None => {
                tracing::warn!(
                    model = canonical,
                    "No encoder registered for model, using o200k_base"
                );
                tiktoken_rs::o200k_base()?
            }
        };

        let encoder = Arc::new(bpe);
        self.encoders
            .insert(canonical.to_string(), Arc::clone(&encoder));

        return Ok(encoder);
    }
}
