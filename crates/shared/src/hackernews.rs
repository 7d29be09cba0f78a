use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::models::{CommentHit, Post};

const DEFAULT_BASE_URL: &str = "https://hn.algolia.com/api/v1";

/// Upper bound Algolia accepts for `hitsPerPage`
pub const MAX_COMMENTS: usize = 1000;

#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    hits: Vec<T>,
}

pub struct HackerNewsClient {
    client: Client,
    base_url: String,
}

impl HackerNewsClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Most recent posts carrying `tag` with more than one point
    pub async fn fetch_posts(&self, tag: &str, count: usize) -> Result<Vec<Post>> {
        let url = self.search_url(tag, count);
        let posts: Vec<Post> = self.search(&url).await?;
        tracing::debug!(tag, count = posts.len(), "Fetched posts");
        Ok(posts)
    }

    /// Comment bodies attached to the given post, newest first
    pub async fn fetch_comments(&self, post_id: &str) -> Result<Vec<String>> {
        let url = self.search_url(&format!("comment,story_{}", post_id), MAX_COMMENTS);
        let hits: Vec<CommentHit> = self.search(&url).await?;

        Ok(hits
            .into_iter()
            .filter_map(|hit| hit.comment_text)
            .filter(|text| !text.trim().is_empty())
            .collect())
    }

    /// Fetches posts and fills in comments for every ask-type post
    pub async fn fetch_posts_with_comments(&self, tag: &str, count: usize) -> Result<Vec<Post>> {
        let mut posts = self.fetch_posts(tag, count).await?;

        for post in posts.iter_mut().filter(|p| p.is_ask()) {
            post.comments = self
                .fetch_comments(&post.id)
                .await
                .with_context(|| format!("Failed to fetch comments for \"{}\"", post.title))?;
        }

        Ok(posts)
    }

    fn search_url(&self, tags: &str, hits_per_page: usize) -> String {
        format!(
            "{}/search_by_date?query=&tags={}&numericFilters={}&hitsPerPage={}&page=0",
            self.base_url,
            urlencoding::encode(tags),
            urlencoding::encode("points>1"),
            hits_per_page
        )
    }

    async fn search<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch from Hacker News search API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            anyhow::bail!("Hacker News API returned error: {} - {}", status, error_text);
        }

        let search_response = response
            .json::<SearchResponse<T>>()
            .await
            .context("Failed to parse Hacker News API response")?;

        Ok(search_response.hits)
    }
}
