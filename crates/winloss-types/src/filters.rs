//! Content filters applied to a message before it is reacted to.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Optional keyword / length gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFilters {
    /// When false, every message in an enabled channel qualifies.
    #[serde(default)]
    pub enabled: bool,
    /// At least one of these must appear (ignored when empty).
    #[serde(default)]
    pub required_keywords: Vec<String>,
    /// None of these may appear.
    #[serde(default)]
    pub excluded_keywords: Vec<String>,
    /// Minimum content length in characters.
    #[serde(default)]
    pub min_length: usize,
}

/// Why a message was rejected by [`ContentFilters::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterRejection {
    #[error("no required keyword present")]
    MissingRequiredKeyword,

    #[error("contains excluded keyword '{0}'")]
    ExcludedKeyword(String),

    #[error("content too short ({len} < {min})")]
    TooShort { len: usize, min: usize },
}

impl ContentFilters {
    /// Check `content` against the filters.
    ///
    /// Order: required keywords, excluded keywords, minimum length. Keyword
    /// matching is case-insensitive substring containment.
    pub fn evaluate(&self, content: &str) -> Result<(), FilterRejection> {
        if !self.enabled {
            return Ok(());
        }

        let lowered = content.to_lowercase();

        if !self.required_keywords.is_empty()
            && !self
                .required_keywords
                .iter()
                .any(|kw| lowered.contains(&kw.to_lowercase()))
        {
            return Err(FilterRejection::MissingRequiredKeyword);
        }

        if let Some(kw) = self
            .excluded_keywords
            .iter()
            .find(|kw| lowered.contains(&kw.to_lowercase()))
        {
            return Err(FilterRejection::ExcludedKeyword(kw.clone()));
        }

        let len = content.chars().count();
        if len < self.min_length {
            return Err(FilterRejection::TooShort {
                len,
                min: self.min_length,
            });
        }

        Ok(())
    }

    /// One-line human summary, used by the status command.
    pub fn summary(&self) -> String {
        if !self.enabled {
            return "off".to_string();
        }
        let mut parts = Vec::new();
        if !self.required_keywords.is_empty() {
            parts.push(format!("requires any of [{}]", self.required_keywords.join(", ")));
        }
        if !self.excluded_keywords.is_empty() {
            parts.push(format!("excludes [{}]", self.excluded_keywords.join(", ")));
        }
        if self.min_length > 0 {
            parts.push(format!("min length {}", self.min_length));
        }
        if parts.is_empty() {
            "on (no rules)".to_string()
        } else {
            parts.join("; ")
        }
    }
}
