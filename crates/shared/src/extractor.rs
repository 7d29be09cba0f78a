use anyhow::{Context, Result};
use reqwest::Client;
use scraper::Html;
use url::Url;

use crate::models::Post;

/// Elements whose text never reaches a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Content(String),
    /// The linked page could not be retrieved; the post is left out of the script
    Unrecoverable,
}

pub struct ContentExtractor {
    client: Client,
}

impl ContentExtractor {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; HNPodcast/1.0)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub async fn extract(&self, post: &Post) -> Extraction {
        let body = match post.external_url() {
            Some(url) => match self.fetch_page_text(url).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(title = %post.title, url, error = %e, "Failed to fetch article");
                    return Extraction::Unrecoverable;
                }
            },
            None => post.text.clone().unwrap_or_default(),
        };

        if post.is_ask() {
            Extraction::Content(with_comments(body, &post.comments))
        } else {
            Extraction::Content(body)
        }
    }

    async fn fetch_page_text(&self, url: &str) -> Result<String> {
        let url = Url::parse(url).context("Invalid article URL")?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Unsupported URL scheme: {}", url.scheme());
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send HTTP request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP error: {}", status);
        }

        let html = response.text().await.context("Failed to read response body")?;

        Ok(visible_text(&html))
    }
}

/// Strips markup, keeping the visible text joined by single spaces
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let words: Vec<&str> = document
        .root_element()
        .descendants()
        .filter(|node| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            })
        })
        .filter_map(|node| node.value().as_text())
        .flat_map(|text| text.split_whitespace())
        .collect();

    words.join(" ")
}

fn with_comments(body: String, comments: &[String]) -> String {
    let mut text = body;
    text.push_str(" Comments:");
    for comment in comments {
        text.push(' ');
        text.push_str(comment);
    }
    text
}
