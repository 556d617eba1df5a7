//! Video generation module.

mod provider;
pub mod providers;
mod types;

pub use provider::VideoProvider;
pub use types::{GeneratedVideo, VideoGenerationRequest, VideoMetadata};
