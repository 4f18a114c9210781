//! Facade crate for the city guide library.
//!
//! Re-exports the domain types and stores from `guide-core`. The SQLite
//! store is available behind the `store-sqlite` feature (on by default).

#![forbid(unsafe_code)]

pub use guide_core::{
    Coordinate, CoordinateAxis, CoordinateSource, EntityOptions, Guide, GuideId, GuideStore,
    MemoryGuideStore, PoiId, PointOfInterest, StoreError, ValidationError,
};

#[cfg(feature = "store-sqlite")]
pub use guide_core::{SqliteGuideStore, SqliteStoreConfig};
