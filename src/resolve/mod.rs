//! Dynamic content resolution.
//!
//! Literal block text from the template is turned into the final contract
//! wording here. The first [`DynamicRule`] whose matcher accepts the text
//! replaces it wholesale; text no rule claims goes through the
//! [`TokenReplacer`] so inline markers still pick up record values.

mod rules;
mod tokens;

pub use rules::{default_rules, DynamicRule, Generator, Matcher};
pub use tokens::TokenReplacer;

use crate::data::ContractData;

/// Resolves literal template text against a contract record.
#[derive(Debug, Clone)]
pub struct ContentResolver {
    rules: Vec<DynamicRule>,
    tokens: TokenReplacer,
}

impl ContentResolver {
    /// Create a resolver with the standard contract rules.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
            tokens: TokenReplacer::new(),
        }
    }

    /// Replace the rule list. Rules are tried in order.
    pub fn with_rules(mut self, rules: Vec<DynamicRule>) -> Self {
        self.rules = rules;
        self
    }

    /// The active rules in match order.
    pub fn rules(&self) -> &[DynamicRule] {
        &self.rules
    }

    /// First rule accepting `text`, which should already be trimmed.
    pub fn matching_rule(&self, text: &str) -> Option<&DynamicRule> {
        self.rules.iter().find(|rule| rule.matches(text))
    }

    /// Resolve one block of literal text.
    ///
    /// Leading whitespace is kept in front of the result. Blank text is
    /// returned unchanged.
    pub fn resolve(&self, text: &str, data: &ContractData) -> String {
        let trimmed = text.trim_start();
        if trimmed.trim_end().is_empty() {
            return text.to_string();
        }
        let indent = &text[..text.len() - trimmed.len()];

        let body = match self.matching_rule(trimmed) {
            Some(rule) => {
                log::debug!("Rule '{}' matched block", rule.name);
                rule.apply(trimmed, data)
            }
            None => self.tokens.replace(trimmed, data),
        };

        // Conditional clauses that resolve to nothing drop their indent too.
        if body.is_empty() {
            return body;
        }
        format!("{}{}", indent, body)
    }
}

impl Default for ContentResolver {
    fn default() -> Self {
        Self::new()
    }
}
