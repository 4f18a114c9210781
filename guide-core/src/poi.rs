//! Points of interest belonging to a guide.

use crate::guide::validate_name;
use crate::options::normalise_description;
use crate::{Coordinate, EntityOptions, GuideId, PoiId, ValidationError};

/// A named location that belongs to exactly one [`Guide`](crate::Guide).
///
/// The owning guide is fixed at construction; there is no way to move a point
/// of interest to another guide.
///
/// # Examples
/// ```
/// use guide_core::{EntityOptions, GuideId, PointOfInterest};
///
/// # fn main() -> Result<(), guide_core::ValidationError> {
/// let poi = PointOfInterest::new(
///     "Cafeología",
///     GuideId::new(1),
///     EntityOptions::default().with_text_coordinates("16.737393", "-92.635857"),
/// )?;
/// assert_eq!(poi.guide_id(), GuideId::new(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PointOfInterest {
    id: Option<PoiId>,
    guide_id: GuideId,
    name: String,
    description: Option<String>,
    coordinate: Coordinate,
}

impl PointOfInterest {
    /// Validate and construct a transient point of interest.
    ///
    /// Checks run in order: empty name, then a non-positive guide reference,
    /// then the options.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`],
    /// [`ValidationError::InvalidGuideReference`] or the coordinate source's
    /// error, whichever check fails first.
    pub fn new(
        name: impl Into<String>,
        guide_id: GuideId,
        options: EntityOptions,
    ) -> Result<Self, ValidationError> {
        let checked_name = validate_name(name.into())?;
        if !guide_id.is_valid() {
            return Err(ValidationError::InvalidGuideReference { guide_id });
        }
        let details = options.resolve()?;
        Ok(Self {
            id: None,
            guide_id,
            name: checked_name,
            description: details.description,
            coordinate: details.coordinate,
        })
    }

    pub(crate) fn restore(
        id: PoiId,
        guide_id: GuideId,
        name: String,
        description: Option<String>,
        coordinate: Coordinate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Some(id),
            guide_id,
            name: validate_name(name)?,
            description: normalise_description(description),
            coordinate,
        })
    }

    /// Identifier, present once persisted.
    #[must_use]
    pub const fn id(&self) -> Option<PoiId> {
        self.id
    }

    /// Whether a store has assigned an identifier.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Guide this point of interest belongs to.
    #[must_use]
    pub const fn guide_id(&self) -> GuideId {
        self.guide_id
    }

    /// Display name, never empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Location of the point of interest.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Rename. The current name is kept on failure.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] for an empty name.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    /// Replace the description; empty text clears it.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = normalise_description(description);
    }

    /// Move the point of interest.
    pub const fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate = coordinate;
    }

    pub(crate) const fn assign_id(&mut self, id: PoiId) {
        self.id = Some(id);
    }
}
