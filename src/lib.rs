#![warn(missing_docs)]
//! grokgen - generate images and image-to-video clips with xAI Grok Imagine.
//!
//! A run is a single pass: resolve inputs (environment first, interactive prompt
//! otherwise), make one generation call, write the results under
//! `./generated-images`.
//!
//! # Quick Start
//!
//! ```no_run
//! use grokgen::{app, Config, GrokProvider, GrokVideoProvider, StdinPrompter};
//!
//! #[tokio::main]
//! async fn main() -> grokgen::Result<()> {
//!     let config = Config::new("xai-...", "generated-images")
//!         .with_prompt("A lighthouse in a storm")
//!         .with_count("2");
//!     let images = GrokProvider::builder().api_key(&config.api_key).build()?;
//!     let videos = GrokVideoProvider::builder().api_key(&config.api_key).build()?;
//!
//!     let outcome = app::run(&config, &mut StdinPrompter, &images, &videos).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
mod error;
pub mod exitcode;
pub mod image;
pub mod input;
pub mod output;
pub mod report;
pub mod video;

// Re-export error types at crate root
pub use error::{Error, Result};

pub use app::Outcome;
pub use config::Config;
pub use image::providers::{GrokModel, GrokProvider, GrokProviderBuilder};
pub use image::{GeneratedImage, GenerationRequest, ImageProvider};
pub use input::{Mode, Prompter, StdinPrompter};
pub use video::providers::{GrokVideoModel, GrokVideoProvider, GrokVideoProviderBuilder};
pub use video::{GeneratedVideo, VideoGenerationRequest, VideoProvider};
