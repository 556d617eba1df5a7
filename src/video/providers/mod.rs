//! Video generation providers.

mod grok;

pub use grok::{GrokVideoModel, GrokVideoProvider, GrokVideoProviderBuilder};
