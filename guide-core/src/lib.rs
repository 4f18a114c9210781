//! Core domain types and persistence for city guides.
//!
//! A [`Guide`] describes a city or region and owns any number of
//! [`PointOfInterest`] entries. Constructors validate their input and return
//! `Result`, so a value of either type always carries a non-empty name and a
//! coordinate inside the WGS84 ranges.
//!
//! Storage is abstracted by [`GuideStore`]. [`MemoryGuideStore`] keeps
//! everything in process; with the `store-sqlite` feature,
//! [`SqliteGuideStore`] persists to a single SQLite file.

#![forbid(unsafe_code)]

mod coordinate;
mod error;
mod guide;
mod ids;
mod options;
mod poi;
pub mod store;

pub use coordinate::{Coordinate, CoordinateAxis};
pub use error::ValidationError;
pub use guide::Guide;
pub use ids::{GuideId, PoiId};
pub use options::{CoordinateSource, EntityOptions};
pub use poi::PointOfInterest;
pub use store::{GuideStore, MemoryGuideStore, StoreError};

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteGuideStore, SqliteStoreConfig};
