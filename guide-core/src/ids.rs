//! Identifiers assigned by a [`GuideStore`](crate::GuideStore) on first
//! successful persistence.

use std::fmt;

/// Identifier of a persisted [`Guide`](crate::Guide).
///
/// Valid identifiers are strictly positive. Stores never reuse an identifier
/// after the guide it named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct GuideId(i64);

impl GuideId {
    /// Wrap a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use guide_core::GuideId;
    ///
    /// assert_eq!(GuideId::new(7).get(), 7);
    /// ```
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether the identifier could have been assigned by a store.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for GuideId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for GuideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a persisted [`PointOfInterest`](crate::PointOfInterest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PoiId(i64);

impl PoiId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for PoiId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
