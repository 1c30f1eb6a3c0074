//! Palaver core crate - shared types, configuration, and error handling.
//!
//! Everything the other Palaver crates have in common lives here: the
//! `Message`/`Sender` model that the transcript is built from, the sectioned
//! `PalaverConfig`, and the top-level `PalaverError` that subsystem errors
//! convert into.

pub mod config;
pub mod error;
pub mod types;

pub use config::{BackendConfig, PalaverConfig, VoiceConfig};
pub use error::{PalaverError, Result};
pub use types::*;
