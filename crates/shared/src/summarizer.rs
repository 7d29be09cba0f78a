use crate::completion::{CompletionClient, CompletionError};
use crate::retry::{pause, Pacing, RetryPolicy};

/// Longest text, in characters, summarized with a single completion call
pub const CHUNK_THRESHOLD: usize = 12_000;

const NARRATION_STYLE: &str = "Make the summary interesting as it will be read out loud \
in a podcast format. The host and audience are very interested in programming and AI. \
Keep it to about two paragraphs. Open with a single hook sentence that makes the listener \
want to hear more. The summary will be read back to back with summaries of other stories, \
so use phrasing that flows naturally from whatever came before it.";

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("Gave up after {attempts} rate-limited attempts")]
    Exhausted { attempts: u32 },
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

pub struct ChunkedSummarizer<C> {
    client: C,
    retry: RetryPolicy,
    pacing: Pacing,
    threshold: usize,
}

impl<C: CompletionClient> ChunkedSummarizer<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            retry: RetryPolicy::default(),
            pacing: Pacing::default(),
            threshold: CHUNK_THRESHOLD,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Produces narration for `text`, summarizing chunk by chunk when it is too long
    /// for a single call. Any failed call fails the whole summary.
    pub async fn summarize(&self, text: &str, title: Option<&str>) -> Result<String, SummarizeError> {
        let title = title.map(str::trim).filter(|t| !t.is_empty());

        if text.chars().count() <= self.threshold {
            return self.complete(&narration_prompt(text, title)).await;
        }

        let chunks = split_into_chunks(text, self.threshold);
        if chunks.is_empty() {
            // Nothing but whitespace, no point in a chunked pass
            return self.complete(&narration_prompt("", title)).await;
        }
        tracing::info!(chunks = chunks.len(), title = ?title, "Summarizing long text in chunks");

        let mut partials = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            partials.push(self.complete(&chunk_prompt(chunk)).await?);
            pause(self.pacing.between_chunks).await;
        }

        let joined = partials.join(" ");
        self.complete(&final_prompt(&joined, title)).await
    }

    async fn complete(&self, prompt: &str) -> Result<String, SummarizeError> {
        let client = &self.client;
        self.retry.run(move || client.complete(prompt)).await
    }
}

/// Splits on whitespace into chunks whose summed word lengths stay within `threshold`.
///
/// Separators are not counted, so a joined chunk may be longer than `threshold`.
/// A single word longer than `threshold` becomes a chunk of its own.
pub fn split_into_chunks(text: &str, threshold: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        if current_len + len > threshold && !current.is_empty() {
            chunks.push(current.join(" "));
            current.clear();
            current_len = 0;
        }
        current.push(word);
        current_len += len;
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

fn narration_prompt(text: &str, title: Option<&str>) -> String {
    let mut prompt = format!(
        "Summarize the following text in a brief manner. {}\n\nText: {}",
        NARRATION_STYLE, text
    );
    push_title_hint(&mut prompt, title);
    prompt.push_str("\n\nSummary:");
    prompt
}

fn chunk_prompt(text: &str) -> String {
    format!(
        "Write a brief summary of the following text.\n\nText: {}\n\nSummary:",
        text
    )
}

fn final_prompt(partials: &str, title: Option<&str>) -> String {
    let mut prompt = format!(
        "The following are summaries of consecutive parts of one article. \
Write a concise final summary that combines them. {}\n\nText: {}",
        NARRATION_STYLE, partials
    );
    push_title_hint(&mut prompt, title);
    prompt.push_str("\n\nSummary:");
    prompt
}

fn push_title_hint(prompt: &mut String, title: Option<&str>) {
    if let Some(title) = title {
        prompt.push_str("\n\nTitle: ");
        prompt.push_str(title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_into_chunks("one two three", 100), vec!["one two three"]);
    }

    #[test]
    fn test_word_lengths_only_count_toward_threshold() {
        // 3 + 3 + 3 = 9 letters fits in 9 even though "abc def ghi" is 11 chars
        assert_eq!(split_into_chunks("abc def ghi", 9), vec!["abc def ghi"]);
        assert_eq!(split_into_chunks("abc def ghi jk", 9), vec!["abc def ghi", "jk"]);
    }

    #[test]
    fn test_overflowing_word_starts_next_chunk() {
        let chunks = split_into_chunks("aaaa bbbb cccc dddd", 8);
        assert_eq!(chunks, vec!["aaaa bbbb", "cccc dddd"]);
    }

    #[test]
    fn test_oversized_word_gets_own_chunk() {
        let chunks = split_into_chunks("tiny enormousword tiny", 5);
        assert_eq!(chunks, vec!["tiny", "enormousword", "tiny"]);
    }

    #[test]
    fn test_chunking_preserves_word_sequence() {
        let text = "The  quick\nbrown fox\tjumps over the lazy dog again and again";
        let chunks = split_into_chunks(text, 10);
        let rejoined: Vec<&str> = chunks.iter().flat_map(|c| c.split_whitespace()).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
        for chunk in &chunks {
            let letters: usize = chunk.split_whitespace().map(|w| w.chars().count()).sum();
            assert!(letters <= 10 || chunk.split_whitespace().count() == 1);
        }
    }

    #[test]
    fn test_twenty_five_thousand_chars_make_three_chunks() {
        // 250 words of 99 letters plus a space each
        let word = "x".repeat(99);
        let text = vec![word.as_str(); 250].join(" ") + " ";
        assert_eq!(text.len(), 25_000);
        let chunks = split_into_chunks(&text, CHUNK_THRESHOLD);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].split_whitespace().count(), 121);
        assert_eq!(chunks[2].split_whitespace().count(), 8);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(split_into_chunks("   ", 10).is_empty());
    }

    #[test]
    fn test_prompts_carry_title_hint() {
        let prompt = narration_prompt("body", Some("Rust 2.0"));
        assert!(prompt.contains("Text: body"));
        assert!(prompt.contains("Title: Rust 2.0"));
        assert!(prompt.ends_with("Summary:"));
        assert!(!narration_prompt("body", None).contains("Title:"));
        assert!(final_prompt("a b", Some("T")).contains("concise final summary"));
        assert!(chunk_prompt("a b").contains("brief summary"));
    }
}
