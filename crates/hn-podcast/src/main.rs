use anyhow::{Context, Result};
use clap::Parser;
use shared::{
    build_synthesizer, curate, synthesize_to_file, Backend, ChunkedSummarizer, Config,
    ContentExtractor, HackerNewsClient, OpenAiClient, Pacing, Pipeline, RetryPolicy, SkipReason,
    Stage, VoiceProfile, DEFAULT_OUTPUT_FILE,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hn-podcast")]
#[command(about = "Summarize recent Hacker News posts into a spoken-word podcast episode")]
struct Args {
    /// Post type to fetch (story, ask_hn, show_hn)
    #[arg(short, long, default_value = "story")]
    tag: String,

    /// Number of posts to fetch
    #[arg(short, long, default_value = "10")]
    count: usize,

    /// Speech backend used to render the script
    #[arg(short, long, value_enum, default_value = "elevenlabs", env = "HN_PODCAST_BACKEND")]
    backend: Backend,

    /// Voice profile for the azure backend (newscaster, friendly, calm)
    #[arg(long, default_value = "newscaster")]
    voice_profile: String,

    /// Completion model used for summaries
    #[arg(long, default_value = shared::completion::DEFAULT_MODEL, env = "HN_PODCAST_MODEL")]
    model: String,

    /// Where the episode audio is written (overwritten each run)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Print the narration script instead of synthesizing audio
    #[arg(long)]
    no_audio: bool,

    /// Seconds to wait after a rate-limited completion call
    #[arg(long, default_value = "10")]
    retry_delay_secs: u64,

    /// Completion attempts before giving up on a text
    #[arg(long, default_value = "5")]
    max_attempts: u32,

    /// Seconds to pause after each chunk summary
    #[arg(long, default_value = "10")]
    chunk_delay_secs: u64,

    /// Seconds to pause between posts
    #[arg(long, default_value = "15")]
    post_delay_secs: u64,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();
    let config = Config::from_env()?;

    let profile = VoiceProfile::named(&args.voice_profile).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid voice profile: {}. Use one of: {}",
            args.voice_profile,
            VoiceProfile::NAMES.join(", ")
        )
    })?;

    // Build the synthesizer up front so missing credentials fail before any API spend
    let synthesizer = if args.no_audio {
        None
    } else {
        Some(build_synthesizer(args.backend, &config, profile)?)
    };

    let retry = RetryPolicy::new(Duration::from_secs(args.retry_delay_secs), args.max_attempts);
    let pacing = Pacing {
        between_chunks: Duration::from_secs(args.chunk_delay_secs),
        between_posts: Duration::from_secs(args.post_delay_secs),
    };
    tracing::debug!(?retry, ?pacing, backend = ?args.backend, model = %args.model, "Run settings");

    let completion = OpenAiClient::new(config.openai_api_key.clone())?.with_model(&args.model);
    let summarizer = ChunkedSummarizer::new(completion)
        .with_retry(retry)
        .with_pacing(pacing);
    let pipeline = Pipeline::new(
        HackerNewsClient::new()?,
        ContentExtractor::new()?,
        summarizer,
        pacing,
    );

    println!("\n📰 Fetching {} recent '{}' posts from Hacker News...", args.count, args.tag);
    let posts = pipeline.fetch(&args.tag, args.count).await?;

    if posts.is_empty() {
        println!("No posts found for tag '{}'.", args.tag);
    } else {
        println!("✓ Found {} posts", posts.len());
    }

    println!("\n🌐 Extracting and summarizing posts...");
    println!("  (Pausing between requests to stay under rate limits, this takes a while)");
    let digest = pipeline
        .summarize_posts_with_progress(&posts, |progress| match progress.stage {
            Stage::Extracting => println!(
                "  [{}/{}] \"{}\"",
                progress.index, progress.total, progress.title
            ),
            Stage::Summarizing => println!("        summarizing..."),
        })
        .await;

    println!(
        "✓ Summarized {}/{} posts",
        digest.summaries.len(),
        posts.len()
    );
    if !digest.skipped.is_empty() {
        println!("\n⚠ Skipped {} posts:", digest.skipped.len());
        for skipped in &digest.skipped {
            match &skipped.reason {
                SkipReason::Extraction => {
                    println!("  ✗ \"{}\" (article could not be fetched)", skipped.title)
                }
                SkipReason::Summarization(reason) => {
                    println!("  ✗ \"{}\" ({})", skipped.title, reason)
                }
            }
        }
    }

    println!("\n📝 Curating narration script...");
    let script = curate(&digest.summaries);

    let Some(synthesizer) = synthesizer else {
        println!("\n{}", script);
        return Ok(());
    };

    println!("\n🎙 Synthesizing audio...");
    let audio_path = synthesize_to_file(synthesizer.as_ref(), &script, &args.output)
        .await
        .context("Failed to produce the episode")?;

    println!("\n✅ Episode saved to: {}", audio_path.display());

    Ok(())
}
