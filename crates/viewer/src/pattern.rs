//! Pattern — compiled, labelled regex rules.
//!
//! Heuristics (timestamp column names, timestamp value shapes) are written as
//! ordered tables of `(label, pattern)` pairs and compiled once into a
//! [`RuleTable`]. The first rule that matches reports its label.

use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid regex pattern {pattern:?}: {message}")]
    InvalidRegex { pattern: String, message: String },
}

/// A single compiled pattern and the label it reports on a match.
#[derive(Clone)]
pub struct LabeledPattern<L> {
    label: L,
    matcher: RegexMatcher,
}

impl<L: Copy> LabeledPattern<L> {
    pub fn new(label: L, pattern: &str, case_sensitive: bool) -> Result<Self, PatternError> {
        let matcher = RegexMatcherBuilder::new()
            .case_insensitive(!case_sensitive)
            .multi_line(false)
            .build(pattern)
            .map_err(|e| PatternError::InvalidRegex {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { label, matcher })
    }

    pub fn label(&self) -> L {
        self.label
    }

    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text.as_bytes()).unwrap_or(false)
    }
}

/// Ordered rule table. Evaluation stops at the first matching rule.
#[derive(Clone)]
pub struct RuleTable<L> {
    rules: Vec<LabeledPattern<L>>,
}

impl<L: Copy> RuleTable<L> {
    pub fn compile(specs: &[(L, &'static str)], case_sensitive: bool) -> Result<Self, PatternError> {
        let rules = specs
            .iter()
            .map(|(label, pattern)| LabeledPattern::new(*label, pattern, case_sensitive))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn first_match(&self, text: &str) -> Option<L> {
        self.rules.iter().find(|rule| rule.is_match(text)).map(|rule| rule.label())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
