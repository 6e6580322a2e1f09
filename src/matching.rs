//! Pattern matching for certificate domain sets
//!
//! A single regular expression is compiled once at startup and applied to
//! every domain of every certificate update.

use crate::core::MatchResult;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("domain pattern must not be empty")]
    Empty,
    #[error("invalid domain pattern: {0}")]
    Invalid(#[from] regex::Error),
}

/// Matches certificate domains against the configured pattern.
#[derive(Debug, Clone)]
pub struct DomainMatcher {
    regex: Regex,
}

impl DomainMatcher {
    /// Compiles `pattern`.
    ///
    /// # Returns
    /// * `Ok(DomainMatcher)` if the pattern is non-empty and compiles
    /// * `Err(PatternError)` otherwise
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        let regex = Regex::new(pattern)?;
        Ok(Self { regex })
    }

    /// The source text of the compiled pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, domain: &str) -> bool {
        self.regex.is_match(domain)
    }

    /// Filters `domains` down to the ones matching the pattern.
    ///
    /// Matches are wrapped in backticks for display and sorted on that
    /// wrapped form. `others` counts every domain that did not match.
    pub fn match_domains(&self, domains: &[String]) -> MatchResult {
        let mut matched: Vec<String> = domains
            .iter()
            .filter(|domain| self.is_match(domain))
            .map(|domain| format!("`{}`", domain))
            .collect();

        if matched.is_empty() {
            return MatchResult::default();
        }

        matched.sort();
        let others = domains.len() - matched.len();
        MatchResult {
            domains: matched,
            others,
        }
    }
}
