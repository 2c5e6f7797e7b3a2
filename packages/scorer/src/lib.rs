//! Client for the external interview scoring service.

pub mod client;
pub mod config;
pub mod error;
mod traits;

pub use client::ScoringClient;
pub use config::ScorerConfig;
pub use error::ScoringError;
pub use traits::Scorer;
