use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::completion::CompletionClient;
use crate::extractor::{ContentExtractor, Extraction};
use crate::hackernews::HackerNewsClient;
use crate::io::save_audio;
use crate::models::{Post, SkipReason, SkippedPost, Summary};
use crate::retry::{pause, Pacing};
use crate::speech::SpeechSynthesizer;
use crate::summarizer::ChunkedSummarizer;

/// Summaries that made it through, in fetch order, plus the posts that did not
#[derive(Debug, Default)]
pub struct Digest {
    pub summaries: Vec<Summary>,
    pub skipped: Vec<SkippedPost>,
}

/// Per-post step reported while a digest is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extracting,
    Summarizing,
}

#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 1-based position in the fetched list
    pub index: usize,
    pub total: usize,
    pub title: &'a str,
    pub stage: Stage,
}

pub struct Pipeline<C> {
    fetcher: HackerNewsClient,
    extractor: ContentExtractor,
    summarizer: ChunkedSummarizer<C>,
    pacing: Pacing,
}

impl<C: CompletionClient> Pipeline<C> {
    pub fn new(
        fetcher: HackerNewsClient,
        extractor: ContentExtractor,
        summarizer: ChunkedSummarizer<C>,
        pacing: Pacing,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            summarizer,
            pacing,
        }
    }

    pub async fn fetch(&self, tag: &str, count: usize) -> Result<Vec<Post>> {
        self.fetcher
            .fetch_posts_with_comments(tag, count)
            .await
            .context("Failed to fetch posts")
    }

    /// Extracts and summarizes each post in turn. Posts that cannot be extracted
    /// or summarized are recorded in `skipped` and the run carries on.
    pub async fn summarize_posts(&self, posts: &[Post]) -> Digest {
        self.summarize_posts_with_progress(posts, |_| {}).await
    }

    /// Same as [`Pipeline::summarize_posts`], calling `on_progress` as each post
    /// enters a stage.
    pub async fn summarize_posts_with_progress<F>(
        &self,
        posts: &[Post],
        mut on_progress: F,
    ) -> Digest
    where
        F: FnMut(Progress<'_>),
    {
        let mut digest = Digest::default();
        let total = posts.len();

        for (i, post) in posts.iter().enumerate() {
            if i > 0 {
                pause(self.pacing.between_posts).await;
            }

            let mut report = |stage| {
                on_progress(Progress {
                    index: i + 1,
                    total,
                    title: &post.title,
                    stage,
                })
            };

            report(Stage::Extracting);
            let text = match self.extractor.extract(post).await {
                Extraction::Content(text) => text,
                Extraction::Unrecoverable => {
                    digest.skipped.push(SkippedPost {
                        title: post.title.clone(),
                        reason: SkipReason::Extraction,
                    });
                    continue;
                }
            };

            report(Stage::Summarizing);
            match self.summarizer.summarize(&text, Some(&post.title)).await {
                Ok(narration) => digest.summaries.push(Summary::new(&post.title, narration)),
                Err(e) => {
                    tracing::warn!(title = %post.title, error = %e, "Dropping post, summarization failed");
                    digest.skipped.push(SkippedPost {
                        title: post.title.clone(),
                        reason: SkipReason::Summarization(e.to_string()),
                    });
                }
            }
        }

        digest
    }
}

/// Renders the script and writes it to `output`. Any synthesis failure is fatal.
pub async fn synthesize_to_file(
    synthesizer: &dyn SpeechSynthesizer,
    script: &str,
    output: &Path,
) -> Result<PathBuf> {
    let audio = synthesizer
        .synthesize(script)
        .await
        .context("Speech synthesis failed, no audio was produced")?;

    save_audio(&audio, output)
}
