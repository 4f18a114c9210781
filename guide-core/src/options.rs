//! Optional attributes accepted by the entity constructors.

use crate::{Coordinate, ValidationError};

/// Where a constructor should take its coordinate from.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateSource {
    /// Numeric degrees, validated with [`Coordinate::new`].
    Degrees {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// Text degrees, validated with [`Coordinate::parse`].
    Text {
        /// Latitude as submitted.
        latitude: String,
        /// Longitude as submitted.
        longitude: String,
    },
    /// An already validated coordinate.
    Validated(Coordinate),
}

impl CoordinateSource {
    /// Produce the coordinate, validating it if needed.
    ///
    /// # Errors
    /// Propagates the [`ValidationError`] from [`Coordinate::new`] or
    /// [`Coordinate::parse`].
    pub fn resolve(&self) -> Result<Coordinate, ValidationError> {
        match self {
            Self::Degrees {
                latitude,
                longitude,
            } => Coordinate::new(*latitude, *longitude),
            Self::Text {
                latitude,
                longitude,
            } => Coordinate::parse(latitude, longitude),
            Self::Validated(coordinate) => Ok(*coordinate),
        }
    }
}

impl From<Coordinate> for CoordinateSource {
    fn from(coordinate: Coordinate) -> Self {
        Self::Validated(coordinate)
    }
}

/// Optional attributes shared by [`Guide::new`](crate::Guide::new) and
/// [`PointOfInterest::new`](crate::PointOfInterest::new).
///
/// Each field is orthogonal to the others, so callers compose "coordinate from
/// form text" with "description" without dedicated constructors. The
/// coordinate is resolved first; resolution stops at the first failure.
/// Entities built without a coordinate sit at the origin.
///
/// # Examples
/// ```
/// use guide_core::{EntityOptions, Guide};
///
/// # fn main() -> Result<(), guide_core::ValidationError> {
/// let options = EntityOptions::default()
///     .with_text_coordinates("16.7371", "-92.6375")
///     .with_description("Highland colonial town");
/// let guide = Guide::new("San Cristobal", options)?;
/// assert_eq!(guide.description(), Some("Highland colonial town"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityOptions {
    /// Free-form description. Empty text counts as no description.
    pub description: Option<String>,
    /// Coordinate source.
    pub coordinate: Option<CoordinateSource>,
}

impl EntityOptions {
    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Take the coordinate from numeric degrees.
    #[must_use]
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinate = Some(CoordinateSource::Degrees {
            latitude,
            longitude,
        });
        self
    }

    /// Take the coordinate from text, as submitted by a form.
    #[must_use]
    pub fn with_text_coordinates(
        mut self,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        self.coordinate = Some(CoordinateSource::Text {
            latitude: latitude.into(),
            longitude: longitude.into(),
        });
        self
    }

    /// Use an already validated coordinate.
    #[must_use]
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate.into());
        self
    }

    pub(crate) fn resolve(self) -> Result<Details, ValidationError> {
        let coordinate = match &self.coordinate {
            Some(source) => source.resolve()?,
            None => Coordinate::default(),
        };
        Ok(Details {
            description: normalise_description(self.description),
            coordinate,
        })
    }
}

/// Resolved optional attributes.
#[derive(Debug)]
pub(crate) struct Details {
    pub(crate) description: Option<String>,
    pub(crate) coordinate: Coordinate,
}

pub(crate) fn normalise_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.is_empty())
}
