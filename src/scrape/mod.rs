// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Article fetching and readable-text extraction

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::content::TextCleaner;

/// A fetched article ready for prompting: `text` is the title followed by
/// the cleaned body.
#[derive(Debug, Clone)]
pub struct ScrapedArticle {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid URL. Please provide a valid HTTP or HTTPS URL.")]
    InvalidUrl,
    #[error("Could not access the URL. Please check if the URL is correct and accessible.")]
    Download,
    #[error("Request timed out. Please try again.")]
    Timeout,
    #[error("Could not extract content from the provided URL.")]
    NoContent,
    #[error("No usable content found after cleaning the article.")]
    EmptyAfterCleaning,
}

/// Downloads a page and extracts its title and main text.
///
/// Extraction is deliberately generic (og:title/`<title>`/`<h1>` for the
/// title, `<article>` paragraphs with an all-paragraphs fallback for the
/// body) rather than tuned to particular news sites.
pub struct ArticleExtractor {
    client: Client,
    cleaner: TextCleaner,
}

impl ArticleExtractor {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            cleaner: TextCleaner::new(),
        }
    }

    /// Fetch `url` and return its extracted, cleaned article.
    ///
    /// Non-HTTP(S) URLs are rejected before any network access.
    pub async fn fetch(&self, url: &str) -> Result<ScrapedArticle, ScrapeError> {
        let parsed = Url::parse(url).map_err(|_| ScrapeError::InvalidUrl)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ScrapeError::InvalidUrl);
        }

        let response = self.client.get(parsed.as_str()).send().await.map_err(|e| {
            if e.is_timeout() {
                ScrapeError::Timeout
            } else {
                warn!(%url, error = %e, "article download failed");
                ScrapeError::Download
            }
        })?;

        if !response.status().is_success() {
            warn!(%url, status = %response.status(), "article fetch returned error status");
            return Err(ScrapeError::Download);
        }

        let html = response.text().await.map_err(|_| ScrapeError::Download)?;
        let (title, body) = extract_content(&html);

        let title = title.ok_or(ScrapeError::NoContent)?;
        if body.trim().is_empty() {
            return Err(ScrapeError::NoContent);
        }

        let cleaned = self.cleaner.clean(&body);
        if cleaned.is_empty() {
            return Err(ScrapeError::EmptyAfterCleaning);
        }

        debug!(%url, title = %title, bytes = cleaned.len(), "extracted article");

        Ok(ScrapedArticle {
            text: format!("{}\n\n{}", title, cleaned),
            title,
            url: url.to_string(),
        })
    }
}

/// Pull the title and paragraph text out of a parsed document.
fn extract_content(html: &str) -> (Option<String>, String) {
    let document = Html::parse_document(html);

    let og_title = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
    let title_tag = Selector::parse("title").unwrap();
    let h1 = Selector::parse("h1").unwrap();
    let article_paragraphs = Selector::parse("article p").unwrap();
    let paragraphs = Selector::parse("p").unwrap();

    let title = document
        .select(&og_title)
        .find_map(|el| el.value().attr("content").map(str::trim).map(String::from))
        .filter(|t| !t.is_empty())
        .or_else(|| {
            document
                .select(&title_tag)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|t| !t.is_empty())
        })
        .or_else(|| {
            document
                .select(&h1)
                .next()
                .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
                .filter(|t| !t.is_empty())
        });

    let mut blocks: Vec<String> = document
        .select(&article_paragraphs)
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .collect();
    if blocks.is_empty() {
        blocks = document
            .select(&paragraphs)
            .map(|el| el.text().collect::<Vec<_>>().join(" "))
            .collect();
    }

    (title, blocks.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAGRAPH: &str =
        "The group confirmed the June comeback during a fan meeting held in Seoul this weekend.";

    #[tokio::test]
    async fn test_fetch_rejects_non_http_scheme() {
        let extractor = ArticleExtractor::new(Duration::from_secs(1));
        let err = extractor.fetch("ftp://example.com/article").await.unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidUrl));
    }

    #[tokio::test]
    async fn test_fetch_rejects_unparseable_url() {
        let extractor = ArticleExtractor::new(Duration::from_secs(1));
        let err = extractor.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidUrl));
        assert_eq!(
            err.to_string(),
            "Invalid URL. Please provide a valid HTTP or HTTPS URL."
        );
    }

    #[test]
    fn test_extract_content_prefers_og_title() {
        let html = format!(
            r#"<html><head><meta property="og:title" content="OG Title"><title>Tag Title</title></head>
               <body><article><p>{}</p></article></body></html>"#,
            PARAGRAPH
        );
        let (title, body) = extract_content(&html);
        assert_eq!(title.as_deref(), Some("OG Title"));
        assert!(body.contains("June comeback"));
    }

    #[test]
    fn test_extract_content_falls_back_to_title_tag_and_all_paragraphs() {
        let html = format!(
            "<html><head><title>Tag Title</title></head><body><p>{}</p><p>{}</p></body></html>",
            PARAGRAPH, PARAGRAPH
        );
        let (title, body) = extract_content(&html);
        assert_eq!(title.as_deref(), Some("Tag Title"));
        assert_eq!(body.lines().count(), 2);
    }

    #[test]
    fn test_extract_content_missing_title() {
        let html = format!("<html><body><p>{}</p></body></html>", PARAGRAPH);
        let (title, _) = extract_content(&html);
        assert!(title.is_none());
    }
}
