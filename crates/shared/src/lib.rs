// Public modules
pub mod completion;
pub mod config;
pub mod curator;
pub mod extractor;
pub mod hackernews;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod retry;
pub mod speech;
pub mod summarizer;

// Re-export commonly used types
pub use completion::{CompletionClient, CompletionError, OpenAiClient};
pub use config::Config;
pub use curator::{curate, PREAMBLE};
pub use extractor::{ContentExtractor, Extraction};
pub use hackernews::HackerNewsClient;
pub use io::{save_audio, DEFAULT_OUTPUT_FILE};
pub use models::{Post, SkipReason, SkippedPost, Summary};
pub use pipeline::{synthesize_to_file, Digest, Pipeline, Progress, Stage};
pub use retry::{Pacing, RetryPolicy};
pub use speech::{build_synthesizer, Backend, SpeechError, SpeechSynthesizer, VoiceProfile};
pub use summarizer::{ChunkedSummarizer, SummarizeError, CHUNK_THRESHOLD};
