//! Image generation providers.

mod grok;

pub use grok::{GrokModel, GrokProvider, GrokProviderBuilder};
