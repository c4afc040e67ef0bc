use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use slide_deck_builder::delivery::{DEFAULT_FILE_NAME, DEFAULT_IMAGE_FILE_NAME};
use slide_deck_builder::{
    AzureOpenAiConfig, GenerationEvent, GenerationRequest, GenerationSettings, ParseFailurePolicy,
    PipelineState, SlideDeckGenerator,
};
use tokio::sync::mpsc;

/// Generate PowerPoint presentations and images with Azure OpenAI.
#[derive(Parser, Debug)]
#[command(name = "slide-deck-builder", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a presentation on a topic
    Deck(DeckArgs),
    /// Generate a single image from a prompt
    Image(ImageArgs),
}

#[derive(Args, Debug)]
struct DeckArgs {
    /// Presentation topic
    #[arg(short, long)]
    topic: String,

    /// Number of slides to generate
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    slides: u32,

    /// Where to write the .pptx file
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    output: PathBuf,

    /// Also write an HTML page with a download link for the deck
    #[arg(long)]
    html: Option<PathBuf>,

    /// Print the model's raw reply before the deck summary
    #[arg(long)]
    show_reply: bool,

    /// Stop instead of producing an empty deck when the model reply cannot be parsed
    #[arg(long)]
    abort_on_parse_error: bool,

    /// Image requests to run at once (1 = one slide at a time)
    #[arg(long, default_value_t = 1, env = "SLIDE_IMAGE_CONCURRENCY")]
    image_concurrency: usize,

    /// Skip image generation entirely
    #[arg(long)]
    no_images: bool,

    /// Token limit for the slide text completion
    #[arg(long, default_value_t = 800)]
    max_tokens: u32,
}

#[derive(Args, Debug)]
struct ImageArgs {
    /// Image prompt, sent as written
    #[arg(short, long)]
    prompt: String,

    /// Where to write the PNG file
    #[arg(short, long, default_value = DEFAULT_IMAGE_FILE_NAME)]
    output: PathBuf,

    /// Also write an HTML page with a download link for the image
    #[arg(long)]
    html: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Deck(args) => run_deck(args).await,
        Command::Image(args) => run_image(args).await,
    }
}

async fn run_deck(args: DeckArgs) -> anyhow::Result<()> {
    let request = GenerationRequest::new(args.topic.as_str(), args.slides)?;

    let settings = GenerationSettings {
        max_tokens: args.max_tokens,
        image_concurrency: args.image_concurrency,
        generate_images: !args.no_images,
        parse_failure_policy: if args.abort_on_parse_error {
            ParseFailurePolicy::Abort
        } else {
            ParseFailurePolicy::ContinueWithEmptyDeck
        },
        ..GenerationSettings::default()
    };

    let generator = SlideDeckGenerator::new(AzureOpenAiConfig::from_env(), settings)?;

    println!(
        "🚀 Generating {} slides on \"{}\"...",
        request.slide_count(),
        request.topic()
    );

    let (tx, mut rx) = mpsc::channel(64);
    let report = async {
        while let Some(event) = rx.recv().await {
            print_event(&event);
        }
    };

    let (result, ()) = tokio::join!(
        generator.generate_to_file(&request, &args.output, Some(tx)),
        report
    );
    let (outcome, link) = result.context("Presentation generation failed")?;

    if let Some(heading) = reply_heading(args.show_reply, outcome.parse_error.is_some()) {
        eprintln!("\n{}\n", heading);
        eprintln!("{}\n", outcome.raw_reply);
    }

    println!(
        "✅ Saved {} ({} slides, {} images)",
        link.path.display(),
        outcome.deck.slide_count(),
        outcome.deck.embedded_images()
    );

    if let Some(html_path) = &args.html {
        std::fs::write(html_path, link.html_page(request.topic()))
            .with_context(|| format!("Failed to write {}", html_path.display()))?;
        println!("🔗 Download page written to {}", html_path.display());
    }

    Ok(())
}

async fn run_image(args: ImageArgs) -> anyhow::Result<()> {
    let generator =
        SlideDeckGenerator::new(AzureOpenAiConfig::from_env(), GenerationSettings::default())?;

    println!("🎨 Generating image...");
    let outcome = generator
        .generate_image_to_file(&args.prompt, &args.output)
        .await
        .context("Image generation failed")?;

    println!("   Image URL: {}", outcome.url);
    println!("✅ Saved {}", outcome.link.path.display());

    if let Some(html_path) = &args.html {
        std::fs::write(html_path, outcome.link.html_page("Generated Image"))
            .with_context(|| format!("Failed to write {}", html_path.display()))?;
        println!("🔗 Download page written to {}", html_path.display());
    }

    Ok(())
}

/// The raw reply is always shown when it could not be parsed, otherwise only on request.
fn reply_heading(show_reply: bool, parse_failed: bool) -> Option<&'static str> {
    if parse_failed {
        Some("⚠️  The model reply was not usable slide data:")
    } else if show_reply {
        Some("📝 Model reply:")
    } else {
        None
    }
}

fn print_event(event: &GenerationEvent) {
    match event {
        GenerationEvent::StateChanged(PipelineState::Requesting) => {
            println!("   Asking the model for slide text...")
        }
        GenerationEvent::StateChanged(PipelineState::Enriching) => {
            println!("   Generating illustrations...")
        }
        GenerationEvent::StateChanged(PipelineState::Assembling) => {
            println!("   Building the presentation...")
        }
        GenerationEvent::ImageRequested { index, total } => {
            println!("   Image {}/{}", index + 1, total)
        }
        GenerationEvent::ParseFailed { reason, .. } => {
            eprintln!("⚠️  Could not parse slides: {}", reason)
        }
        GenerationEvent::SlideCountMismatch {
            requested,
            received,
        } => eprintln!(
            "⚠️  Asked for {} slides, the model returned {}",
            requested, received
        ),
        GenerationEvent::ImageFailed {
            index,
            title,
            reason,
        } => eprintln!(
            "⚠️  No image for slide {} (\"{}\"): {}",
            index + 1,
            title,
            reason
        ),
        GenerationEvent::Failed { reason } => eprintln!("❌ {}", reason),
        _ => {}
    }
}
