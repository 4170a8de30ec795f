//! Data models for the media catalog

mod envelope;
mod filter;
mod media;
mod stats;

pub use envelope::*;
pub use filter::*;
pub use media::*;
pub use stats::*;
