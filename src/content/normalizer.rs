// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Validation and shaping of AI-generated social media content

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Number of headlines and captions in a normalized bundle.
const BUNDLE_SIZE: usize = 3;

/// Maximum headline length; longer headlines are truncated with an ellipsis.
const MAX_HEADLINE_LEN: usize = 80;

/// Headline length after truncation, before the `...` marker is appended.
const TRUNCATED_HEADLINE_LEN: usize = 77;

/// A validated social media content bundle: exactly three headlines
/// (each at most 80 characters) and exactly three captions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialContent {
    pub headlines: Vec<String>,
    pub captions: Vec<String>,
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The fence-stripped model output was not parseable JSON.
    #[error("Failed to parse AI response")]
    Parse,
}

/// Coerces a loosely structured model response into a fixed-shape
/// [`SocialContent`] bundle.
///
/// Models frequently wrap their JSON in a code fence, return a bare string
/// where a list was requested, or produce too few or too many entries; all
/// of that is repaired here. Only genuinely unparseable output fails.
#[derive(Clone)]
pub struct ContentNormalizer {
    code_fence: Regex,
    whitespace: Regex,
}

impl ContentNormalizer {
    pub fn new() -> Self {
        Self {
            code_fence: Regex::new(r"(?m)^```\w*\n|```$").unwrap(),
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    pub fn normalize(&self, raw: &str) -> Result<SocialContent, NormalizeError> {
        let stripped = self.code_fence.replace_all(raw, "");
        let stripped = stripped.trim();

        let data: Value = serde_json::from_str(stripped).map_err(|_| NormalizeError::Parse)?;

        let mut headlines: Vec<String> = string_or_list(data.get("headlines"))
            .into_iter()
            .map(|h| h.trim().to_string())
            .map(|h| self.whitespace.replace_all(&h, " ").into_owned())
            .map(|h| {
                if h.chars().count() > MAX_HEADLINE_LEN {
                    let cut: String = h.chars().take(TRUNCATED_HEADLINE_LEN).collect();
                    format!("{}...", cut)
                } else {
                    h
                }
            })
            .filter(|h| !h.trim().is_empty())
            .take(BUNDLE_SIZE)
            .collect();

        let mut captions: Vec<String> = string_or_list(data.get("captions"))
            .into_iter()
            .map(|c| c.trim().to_string())
            .take(BUNDLE_SIZE)
            .collect();

        while headlines.len() < BUNDLE_SIZE {
            headlines.push(format!("K-pop News Update {}", headlines.len() + 1));
        }
        while captions.len() < BUNDLE_SIZE {
            captions.push(format!(
                "Stay updated with the latest K-pop news! #Kpop (Variation {})",
                captions.len() + 1
            ));
        }

        Ok(SocialContent { headlines, captions })
    }
}

impl Default for ContentNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Accept either a single string or a list of strings; non-string list
/// entries are stringified rather than dropped.
fn string_or_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}
