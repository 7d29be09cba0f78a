use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single Hacker News entry as returned by the Algolia search API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "objectID")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "story_text", default)]
    pub text: Option<String>,
    #[serde(rename = "_tags", default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Comment bodies, only populated for ask-type posts
    #[serde(default)]
    pub comments: Vec<String>,
}

impl Post {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            text: None,
            tags: Vec::new(),
            author: None,
            points: None,
            created_at: None,
            comments: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Ask HN posts solicit discussion instead of linking out
    pub fn is_ask(&self) -> bool {
        self.tags.iter().any(|t| t == "ask_hn")
    }

    /// The external link, ignoring the empty strings Algolia sometimes returns
    pub fn external_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentHit {
    #[serde(default)]
    pub comment_text: Option<String>,
}

/// Narration text generated for one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub title: String,
    pub text: String,
}

impl Summary {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The linked article could not be retrieved
    Extraction,
    Summarization(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedPost {
    pub title: String,
    pub reason: SkipReason,
}
