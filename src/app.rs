//! Single-pass orchestration: collect input, generate, save.

use crate::config::{Config, ASPECT_RATIO};
use crate::error::{Error, Result};
use crate::image::{GenerationRequest, ImageProvider};
use crate::input::{parse_count, parse_duration, parse_mode, resolve, Mode, Prompter};
use crate::output::{
    ensure_output_dir, image_filename, timestamp_slug, video_filename, write_output,
};
use crate::video::{VideoGenerationRequest, VideoProvider};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Characters of base64 shown for each saved image.
const PREVIEW_LEN: usize = 50;

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The prompt was empty; nothing was generated.
    EmptyPrompt,
    /// Video mode without a readable source image; nothing was generated.
    MissingSource(PathBuf),
    /// Files were written.
    Completed {
        /// Mode that ran.
        mode: Mode,
        /// Written files, in index order.
        files: Vec<PathBuf>,
    },
}

/// Runs one generation.
///
/// Aborts with an [`Outcome`] before any API call when the input is unusable.
/// Errors from the providers or the filesystem are returned for the caller to report.
pub async fn run(
    config: &Config,
    prompter: &mut dyn Prompter,
    images: &dyn ImageProvider,
    videos: &dyn VideoProvider,
) -> Result<Outcome> {
    let mode = resolve(
        prompter,
        config.mode.as_deref(),
        "Generate an image or a video? [image/video] (default image): ",
        parse_mode,
    )?;

    let question = match mode {
        Mode::Image => "Enter your image prompt: ",
        Mode::Video => "Enter your video prompt: ",
    };
    let prompt = resolve(prompter, config.prompt.as_deref(), question, str::to_string)?;

    if prompt.is_empty() {
        println!("No prompt entered. Exiting.");
        return Ok(Outcome::EmptyPrompt);
    }

    tracing::info!(%mode, "starting generation");

    match mode {
        Mode::Image => generate_images(config, prompter, images, &prompt).await,
        Mode::Video => generate_video(config, prompter, videos, &prompt).await,
    }
}

async fn generate_images(
    config: &Config,
    prompter: &mut dyn Prompter,
    provider: &dyn ImageProvider,
    prompt: &str,
) -> Result<Outcome> {
    let count = resolve(
        prompter,
        config.count.as_deref(),
        "How many images? (default 1): ",
        parse_count,
    )?;

    println!("\nGenerating {count} image(s) with prompt: \"{prompt}\" ...");
    tracing::debug!(provider = provider.name(), count, "requesting images");

    let request = GenerationRequest::new(prompt)
        .with_count(count)
        .with_aspect_ratio(ASPECT_RATIO);
    let images = provider.generate(&request).await?;
    if let Some(meta) = images.first().map(|i| &i.metadata) {
        tracing::info!(model = ?meta.model, duration_ms = ?meta.duration_ms, "images generated");
    }

    ensure_output_dir(&config.output_dir).await?;
    let timestamp = timestamp_slug(Utc::now());

    let mut files = Vec::with_capacity(images.len());
    for (i, image) in images.iter().enumerate() {
        let name = image_filename(&timestamp, i + 1, image.extension());
        let path = write_output(&config.output_dir, &name, &image.data).await?;

        println!("Saved: {}", path.display());
        println!(
            "   (base64 preview snippet: {}...)",
            image.base64_preview(PREVIEW_LEN)
        );
        files.push(path);
    }

    println!(
        "\nDone! {} image(s) saved to: {}",
        files.len(),
        config.output_dir.display()
    );

    Ok(Outcome::Completed {
        mode: Mode::Image,
        files,
    })
}

async fn generate_video(
    config: &Config,
    prompter: &mut dyn Prompter,
    provider: &dyn VideoProvider,
    prompt: &str,
) -> Result<Outcome> {
    let source = resolve(
        prompter,
        config.video_image_source.as_deref(),
        "Path to the source image: ",
        |s: &str| PathBuf::from(s),
    )?;

    if !is_readable_file(&source).await {
        println!(
            "Source image not found or not readable: \"{}\". Exiting.",
            source.display()
        );
        return Ok(Outcome::MissingSource(source));
    }

    let duration = resolve(
        prompter,
        config.duration.as_deref(),
        "Video duration in seconds? (1-15, default 6): ",
        parse_duration,
    )?;

    let source_image = tokio::fs::read(&source).await?;

    println!(
        "\nGenerating {duration}s video from \"{}\" with prompt: \"{prompt}\" ...",
        source.display()
    );
    tracing::debug!(
        provider = provider.name(),
        duration,
        source_bytes = source_image.len(),
        "requesting video"
    );

    let request = VideoGenerationRequest::new(prompt, source_image, duration)
        .with_aspect_ratio(ASPECT_RATIO);
    let video = provider.generate(&request).await?;
    tracing::info!(
        model = ?video.metadata.model,
        duration_ms = ?video.metadata.duration_ms,
        "video generated"
    );

    let data = match (video.data, video.url) {
        (Some(data), _) => data,
        (None, Some(url)) => {
            println!("Downloading video...");
            provider.download(&url).await?
        }
        (None, None) => return Err(Error::NoVideoData),
    };

    ensure_output_dir(&config.output_dir).await?;
    let path = write_output(&config.output_dir, &video_filename(&source), &data).await?;

    println!("Saved: {}", path.display());
    println!(
        "\nDone! 1 video saved to: {}",
        config.output_dir.display()
    );

    Ok(Outcome::Completed {
        mode: Mode::Video,
        files: vec![path],
    })
}

/// True when `path` is a regular file that can be opened for reading.
async fn is_readable_file(path: &Path) -> bool {
    if path.as_os_str().is_empty() {
        return false;
    }
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => tokio::fs::File::open(path).await.is_ok(),
        _ => false,
    }
}
