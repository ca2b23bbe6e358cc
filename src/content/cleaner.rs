// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Promotional boilerplate removal for scraped article text

use regex::Regex;

/// Minimum trimmed line length to keep; shorter lines are navigation
/// fragments, bylines, or single words left over after pattern removal.
const MIN_LINE_LEN: usize = 30;

/// Strips promotional boilerplate and normalizes whitespace in scraped
/// article bodies.
///
/// Cleaning is pure and deterministic; running it twice yields the same
/// output as running it once.
#[derive(Clone)]
pub struct TextCleaner {
    promotional_patterns: Vec<Regex>,
    blank_lines: Regex,
    spaces: Regex,
}

impl TextCleaner {
    pub fn new() -> Self {
        let promotional_patterns = [
            r"(?i)Follow us on \w+",
            r"(?i)Like us on \w+",
            r"(?i)Subscribe to our \w+",
            r"(?i)Click here to \w+",
            r"(?i)Don't forget to \w+",
            r"(?i)Check out our \w+",
            r"(?i)Read more: https?://\S+",
            r"(?i)Source: https?://\S+",
            r"(?i)Credit: \S+",
            r"(?i)Image: \S+",
            r"(?i)Photo: \S+",
            r"(?i)Advertisement",
            r"(?i)Sponsored",
            r"(?i)Related Articles:",
            r"(?i)You might also like:",
            r"(?i)Share this article",
            r"(?i)Tags:",
            // Bracketed annotations ([Photo], [Translated], ...)
            r"\[.*?\]",
            // Bare URLs; must run after the prefixed URL patterns above
            r"https?://\S+",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        Self {
            promotional_patterns,
            blank_lines: Regex::new(r"\n\s*\n").unwrap(),
            spaces: Regex::new(r" +").unwrap(),
        }
    }

    /// Clean a raw article body.
    ///
    /// Applies the promotional pattern removals in order, collapses blank-line
    /// and space runs, drops lines whose trimmed length is at most
    /// [`MIN_LINE_LEN`] characters, and rejoins the survivors with one blank
    /// line between them.
    ///
    /// Returns an empty string when nothing survives; callers must treat that
    /// as an extraction failure.
    pub fn clean(&self, text: &str) -> String {
        let mut text = text.to_string();
        for pattern in &self.promotional_patterns {
            text = pattern.replace_all(&text, "").into_owned();
        }

        let text = self.blank_lines.replace_all(&text, "\n\n");
        let text = self.spaces.replace_all(&text, " ");

        let lines: Vec<&str> = text
            .split('\n')
            .map(str::trim)
            .filter(|line| line.chars().count() > MIN_LINE_LEN)
            .collect();

        lines.join("\n\n").trim().to_string()
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}
