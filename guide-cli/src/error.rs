//! Error types emitted by the city guide CLI.

use std::sync::Arc;

use guide_core::{StoreError, ValidationError};
use thiserror::Error;

/// Errors emitted by the city guide CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature that would enable the operation.
        feature: &'static str,
        /// Operation that was attempted.
        action: &'static str,
    },
    /// Input was rejected before reaching the store.
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),
    /// The store failed.
    #[error(transparent)]
    Store(StoreError),
    /// A referenced guide or point of interest does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of entity looked up.
        entity: &'static str,
        /// Identifier that failed to resolve.
        id: i64,
    },
    /// Rendering command output as JSON failed.
    #[error("failed to serialize output: {0}")]
    Serialize(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<StoreError> for CliError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::GuideNotFound { guide_id } => Self::NotFound {
                entity: "guide",
                id: guide_id.get(),
            },
            StoreError::PoiNotFound { poi_id, .. } => Self::NotFound {
                entity: "point of interest",
                id: poi_id.get(),
            },
            other => Self::Store(other),
        }
    }
}
