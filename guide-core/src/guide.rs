//! The guide aggregate root.

use crate::options::normalise_description;
use crate::{Coordinate, EntityOptions, GuideId, ValidationError};

/// A named place with a coordinate.
///
/// A guide owns its points of interest by reference: they live in their own
/// table and are fetched with
/// [`GuideStore::get_all_pois`](crate::GuideStore::get_all_pois), never
/// embedded here.
///
/// A freshly constructed guide is transient (`id() == None`). A store assigns
/// the id exactly once, on the first successful
/// [`create_guide`](crate::GuideStore::create_guide).
///
/// # Examples
/// ```
/// use guide_core::{EntityOptions, Guide};
///
/// # fn main() -> Result<(), guide_core::ValidationError> {
/// let guide = Guide::new(
///     "San Cristobal",
///     EntityOptions::default().with_coordinates(16.7371, -92.6375),
/// )?;
/// assert_eq!(guide.name(), "San Cristobal");
/// assert!(guide.id().is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Guide {
    id: Option<GuideId>,
    name: String,
    description: Option<String>,
    coordinate: Coordinate,
}

impl Guide {
    /// Validate and construct a transient guide.
    ///
    /// Fails with [`ValidationError::EmptyName`] before looking at the
    /// options, then with whatever the coordinate source reports.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] raised by the name or the
    /// coordinate source.
    pub fn new(name: impl Into<String>, options: EntityOptions) -> Result<Self, ValidationError> {
        let checked_name = validate_name(name.into())?;
        let details = options.resolve()?;
        Ok(Self {
            id: None,
            name: checked_name,
            description: details.description,
            coordinate: details.coordinate,
        })
    }

    /// Rebuild a persisted guide from stored fields.
    pub(crate) fn restore(
        id: GuideId,
        name: String,
        description: Option<String>,
        coordinate: Coordinate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Some(id),
            name: validate_name(name)?,
            description: normalise_description(description),
            coordinate,
        })
    }

    /// Identifier, present once persisted.
    #[must_use]
    pub const fn id(&self) -> Option<GuideId> {
        self.id
    }

    /// Whether a store has assigned an identifier.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
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

    /// Location of the guide.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Rename the guide. The current name is kept on failure.
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

    /// Move the guide.
    pub const fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate = coordinate;
    }

    pub(crate) const fn assign_id(&mut self, id: GuideId) {
        self.id = Some(id);
    }
}

pub(crate) fn validate_name(name: String) -> Result<String, ValidationError> {
    if name.is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(name)
    }
}
