//! Validation errors raised while constructing domain values.
//!
//! These errors are produced before any storage interaction, so callers can
//! always recover by re-prompting with corrected input.

use std::num::ParseFloatError;

use thiserror::Error;

use crate::{CoordinateAxis, GuideId};

/// Errors returned by the validated constructors.
///
/// Variants are ordered the way checks run: text coordinates report
/// [`Empty`](Self::Empty) before [`NotANumber`](Self::NotANumber), and both
/// before [`OutOfRange`](Self::OutOfRange).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// A guide or point of interest was given an empty name.
    #[error("name cannot be empty")]
    EmptyName,
    /// A coordinate component arrived as empty text.
    #[error("{axis} cannot be empty")]
    Empty {
        /// Component that was empty.
        axis: CoordinateAxis,
    },
    /// A coordinate component could not be parsed as a number.
    #[error("{axis} {value:?} is not a number")]
    NotANumber {
        /// Component that failed to parse.
        axis: CoordinateAxis,
        /// Text as supplied by the caller.
        value: String,
        /// Parser failure.
        #[source]
        source: ParseFloatError,
    },
    /// A coordinate component fell outside its valid range.
    #[error(
        "{axis} has to be in the {min}°, {max}° range, got {value}",
        min = .axis.min(),
        max = .axis.max()
    )]
    OutOfRange {
        /// Component that was out of range.
        axis: CoordinateAxis,
        /// Rejected value in degrees.
        value: f64,
    },
    /// A point of interest referenced a guide id that can never exist.
    #[error("guide id {guide_id} is not a valid guide reference")]
    InvalidGuideReference {
        /// Rejected guide id.
        guide_id: GuideId,
    },
}
