//! Validated WGS84 coordinates.

use std::fmt;

use geo::Coord;

use crate::ValidationError;

/// A component of a [`Coordinate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateAxis {
    /// North/south component, `[-90, 90]` degrees.
    Latitude,
    /// East/west component, `[-180, 180]` degrees.
    Longitude,
}

impl CoordinateAxis {
    /// Smallest accepted value in degrees.
    #[must_use]
    pub const fn min(self) -> f64 {
        match self {
            Self::Latitude => -90.0,
            Self::Longitude => -180.0,
        }
    }

    /// Largest accepted value in degrees.
    #[must_use]
    pub const fn max(self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }

    /// Check `value` against the axis bounds.
    ///
    /// `NaN` is never in range.
    ///
    /// # Errors
    /// Returns [`ValidationError::OutOfRange`] when `value` falls outside the
    /// axis bounds or is not finite.
    pub fn check(self, value: f64) -> Result<f64, ValidationError> {
        if (self.min()..=self.max()).contains(&value) {
            Ok(value)
        } else {
            Err(ValidationError::OutOfRange { axis: self, value })
        }
    }

    fn parse(self, text: &str) -> Result<f64, ValidationError> {
        text.parse::<f64>()
            .map_err(|source| ValidationError::NotANumber {
                axis: self,
                value: text.to_owned(),
                source,
            })
    }

    fn non_empty(self, text: &str) -> Result<&str, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Err(ValidationError::Empty { axis: self })
        } else {
            Ok(trimmed)
        }
    }
}

impl fmt::Display for CoordinateAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latitude => f.write_str("latitude"),
            Self::Longitude => f.write_str("longitude"),
        }
    }
}

/// An immutable latitude/longitude pair within Earth bounds.
///
/// Internally the value is a [`geo::Coord`] with `x = longitude` and
/// `y = latitude`. The only way to obtain a `Coordinate` is through a
/// validating constructor, so every value in circulation is in range.
///
/// # Examples
/// ```
/// use guide_core::Coordinate;
///
/// # fn main() -> Result<(), guide_core::ValidationError> {
/// let coordinate = Coordinate::new(16.7371, -92.6375)?;
/// assert_eq!(coordinate.latitude(), 16.7371);
/// assert_eq!(coordinate.longitude(), -92.6375);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Degrees", into = "Degrees")
)]
pub struct Coordinate {
    point: Coord<f64>,
}

impl Coordinate {
    /// Validate a numeric latitude/longitude pair.
    ///
    /// Latitude is checked before longitude.
    ///
    /// # Errors
    /// Returns [`ValidationError::OutOfRange`] for the first axis whose value
    /// is out of bounds, `NaN` or infinite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let y = CoordinateAxis::Latitude.check(latitude)?;
        let x = CoordinateAxis::Longitude.check(longitude)?;
        Ok(Self {
            point: Coord { x, y },
        })
    }

    /// Validate a latitude/longitude pair supplied as text, as submitted by a
    /// web form.
    ///
    /// Surrounding whitespace is ignored. Checks run in a fixed order so the
    /// first reported problem is stable: empty latitude, empty longitude,
    /// unparsable latitude, unparsable longitude, then the range checks of
    /// [`Coordinate::new`].
    ///
    /// # Errors
    /// Returns [`ValidationError::Empty`], [`ValidationError::NotANumber`] or
    /// [`ValidationError::OutOfRange`] for the first check that fails.
    ///
    /// # Examples
    /// ```
    /// use guide_core::{Coordinate, CoordinateAxis, ValidationError};
    ///
    /// assert!(Coordinate::parse("16.737393", "-92.635857").is_ok());
    /// assert_eq!(
    ///     Coordinate::parse("", ""),
    ///     Err(ValidationError::Empty { axis: CoordinateAxis::Latitude }),
    /// );
    /// ```
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, ValidationError> {
        let latitude_text = CoordinateAxis::Latitude.non_empty(latitude)?;
        let longitude_text = CoordinateAxis::Longitude.non_empty(longitude)?;
        let lat = CoordinateAxis::Latitude.parse(latitude_text)?;
        let lon = CoordinateAxis::Longitude.parse(longitude_text)?;
        Self::new(lat, lon)
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.point.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.point.x
    }

    /// The coordinate as a `geo` value (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn as_coord(self) -> Coord<f64> {
        self.point
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.point
    }
}

impl TryFrom<Coord<f64>> for Coordinate {
    type Error = ValidationError;

    fn try_from(point: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(point.y, point.x)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude(), self.longitude())
    }
}

/// Wire form of a [`Coordinate`]; deserialising goes through validation.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct Degrees {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl From<Coordinate> for Degrees {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<Degrees> for Coordinate {
    type Error = ValidationError;

    fn try_from(degrees: Degrees) -> Result<Self, Self::Error> {
        Self::new(degrees.latitude, degrees.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(-90.0, -180.0)]
    #[case(90.0, 180.0)]
    #[case(0.0, 0.0)]
    #[case(16.7371, -92.6375)]
    fn accepts_values_within_bounds(#[case] latitude: f64, #[case] longitude: f64) {
        let coordinate = Coordinate::new(latitude, longitude).expect("valid coordinate");
        assert_eq!(coordinate.latitude(), latitude);
        assert_eq!(coordinate.longitude(), longitude);
    }

    #[rstest]
    #[case(-90.1, 0.0, CoordinateAxis::Latitude)]
    #[case(90.1, 0.0, CoordinateAxis::Latitude)]
    #[case(0.0, -180.1, CoordinateAxis::Longitude)]
    #[case(0.0, 180.1, CoordinateAxis::Longitude)]
    #[case(f64::NAN, 0.0, CoordinateAxis::Latitude)]
    #[case(0.0, f64::INFINITY, CoordinateAxis::Longitude)]
    fn rejects_values_out_of_bounds(
        #[case] latitude: f64,
        #[case] longitude: f64,
        #[case] expected: CoordinateAxis,
    ) {
        let err = Coordinate::new(latitude, longitude).expect_err("out of range");
        assert!(matches!(err, ValidationError::OutOfRange { axis, .. } if axis == expected));
    }

    #[rstest]
    fn latitude_is_reported_before_longitude() {
        let err = Coordinate::new(100.0, 200.0).expect_err("both out of range");
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                axis: CoordinateAxis::Latitude,
                ..
            }
        ));
    }

    #[rstest]
    #[case("", "", ValidationError::Empty { axis: CoordinateAxis::Latitude })]
    #[case("10", "  ", ValidationError::Empty { axis: CoordinateAxis::Longitude })]
    #[case("", "abc", ValidationError::Empty { axis: CoordinateAxis::Latitude })]
    fn parse_reports_empty_text_first(
        #[case] latitude: &str,
        #[case] longitude: &str,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(Coordinate::parse(latitude, longitude), Err(expected));
    }

    #[rstest]
    #[case("north", "10", CoordinateAxis::Latitude)]
    #[case("10", "east", CoordinateAxis::Longitude)]
    #[case("north", "500", CoordinateAxis::Latitude)]
    #[case("500", "east", CoordinateAxis::Longitude)]
    fn parse_reports_numbers_before_ranges(
        #[case] latitude: &str,
        #[case] longitude: &str,
        #[case] expected: CoordinateAxis,
    ) {
        let err = Coordinate::parse(latitude, longitude).expect_err("unparsable text");
        assert!(matches!(err, ValidationError::NotANumber { axis, .. } if axis == expected));
    }

    #[rstest]
    fn parse_delegates_to_range_checks() {
        let err = Coordinate::parse("10", "181").expect_err("longitude out of range");
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                axis: CoordinateAxis::Longitude,
                value: 181.0,
            }
        );
    }

    #[rstest]
    fn parse_trims_whitespace() {
        let coordinate = Coordinate::parse(" 16.737393 ", "\t-92.635857").expect("valid text");
        assert_eq!(coordinate, Coordinate::new(16.737393, -92.635857).expect("valid"));
    }

    #[rstest]
    fn converts_to_geo_with_longitude_as_x() {
        let coordinate = Coordinate::new(10.0, 20.0).expect("valid");
        let point: Coord<f64> = coordinate.into();
        assert_eq!(point, Coord { x: 20.0, y: 10.0 });
        assert_eq!(Coordinate::try_from(point), Ok(coordinate));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialising_validates_bounds() {
        let err = serde_json::from_str::<Coordinate>(r#"{"latitude":95.0,"longitude":0.0}"#);
        assert!(err.is_err());
        let coordinate: Coordinate =
            serde_json::from_str(r#"{"latitude":1.5,"longitude":-2.5}"#).expect("valid json");
        assert_eq!(coordinate, Coordinate::new(1.5, -2.5).expect("valid"));
    }

    proptest! {
        #[test]
        fn in_range_pairs_round_trip_exactly(
            latitude in -90.0f64..=90.0,
            longitude in -180.0f64..=180.0,
        ) {
            let coordinate = Coordinate::new(latitude, longitude).expect("in range");
            prop_assert_eq!(coordinate.latitude().to_bits(), latitude.to_bits());
            prop_assert_eq!(coordinate.longitude().to_bits(), longitude.to_bits());
        }

        #[test]
        fn latitudes_beyond_the_poles_fail(
            magnitude in 90.000_001f64..1.0e9,
            negative in any::<bool>(),
            longitude in -180.0f64..=180.0,
        ) {
            let latitude = if negative { -magnitude } else { magnitude };
            prop_assert!(Coordinate::new(latitude, longitude).is_err());
        }

        #[test]
        fn longitudes_beyond_the_antimeridian_fail(
            latitude in -90.0f64..=90.0,
            magnitude in 180.000_001f64..1.0e9,
            negative in any::<bool>(),
        ) {
            let longitude = if negative { -magnitude } else { magnitude };
            prop_assert!(Coordinate::new(latitude, longitude).is_err());
        }
    }
}
