//! CLI for grokgen - Grok Imagine image and video generation.
//!
//! Every input can come from a flag, the environment (or `.env`), or an
//! interactive prompt, in that order.

use clap::Parser;
use grokgen::config::{require_api_key, OUTPUT_DIR_NAME};
use grokgen::{app, exitcode, report, Config, GrokProvider, GrokVideoProvider, StdinPrompter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grokgen")]
#[command(about = "Generate images or image-to-video clips with xAI Grok Imagine")]
#[command(version)]
struct Cli {
    /// xAI API key
    #[arg(long, env = "XAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Generation mode: image or video (v)
    #[arg(short, long, env = "MODE")]
    mode: Option<String>,

    /// Text prompt
    #[arg(short, long, env = "PROMPT")]
    prompt: Option<String>,

    /// Number of images (image mode)
    #[arg(short = 'n', long, env = "COUNT")]
    count: Option<String>,

    /// Source image to animate (video mode)
    #[arg(short, long = "image", env = "VIDEO_IMAGE_SOURCE")]
    video_image_source: Option<String>,

    /// Video duration in seconds, 1-15 (video mode)
    #[arg(short, long, env = "DURATION")]
    duration: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grokgen=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(api_key) = require_api_key(cli.api_key) else {
        eprintln!("Error: XAI_API_KEY not found in .env");
        std::process::exit(exitcode::MISSING_API_KEY);
    };

    let output_dir = std::env::current_dir()?.join(OUTPUT_DIR_NAME);
    let mut config = Config::new(api_key, output_dir);
    if let Some(v) = cli.mode {
        config = config.with_mode(v);
    }
    if let Some(v) = cli.prompt {
        config = config.with_prompt(v);
    }
    if let Some(v) = cli.count {
        config = config.with_count(v);
    }
    if let Some(v) = cli.video_image_source {
        config = config.with_video_image_source(v);
    }
    if let Some(v) = cli.duration {
        config = config.with_duration(v);
    }

    let images = GrokProvider::builder().api_key(&config.api_key).build()?;
    let videos = GrokVideoProvider::builder()
        .api_key(&config.api_key)
        .build()?;

    let mut prompter = StdinPrompter;
    let result = app::run(&config, &mut prompter, &images, &videos).await;
    let code = report::finish(&result);
    if code != exitcode::OK {
        std::process::exit(code);
    }

    Ok(())
}
