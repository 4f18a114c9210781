//! Persistence of guides and their points of interest.
//!
//! The [`GuideStore`] trait is the contract; [`MemoryGuideStore`] and (with
//! the `store-sqlite` feature) [`SqliteGuideStore`] implement it. Both honour
//! the same semantics, so code written against the trait can swap backends.
//!
//! Entities move through three states: transient (no id), persisted (id
//! assigned by `create_*`), and deleted. Creation is one-way, updates keep
//! the id, deletion is terminal.

use crate::{Guide, GuideId, PoiId, PointOfInterest};

mod error;
mod memory;
#[cfg(feature = "store-sqlite")]
mod schema;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryGuideStore;
#[cfg(feature = "store-sqlite")]
pub use schema::SCHEMA_VERSION;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{DEFAULT_BUSY_TIMEOUT, SqliteGuideStore, SqliteStoreConfig};

/// Entity label used in [`StoreError`] messages for guides.
pub(crate) const GUIDE_ENTITY: &str = "guide";
/// Entity label used in [`StoreError`] messages for points of interest.
pub(crate) const POI_ENTITY: &str = "point of interest";

/// CRUD and search over guides and their points of interest.
///
/// Lookups distinguish "absent" (`Ok(None)`) from "failed" (`Err`). Deletes
/// are idempotent. Deleting a guide also deletes its points of interest.
/// Listing operations return entities in ascending id order.
///
/// # Examples
///
/// ```rust
/// use guide_core::{EntityOptions, Guide, GuideStore, MemoryGuideStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = MemoryGuideStore::default();
/// let mut guide = Guide::new(
///     "San Cristobal",
///     EntityOptions::default().with_coordinates(16.7371, -92.6375),
/// )?;
/// let id = store.create_guide(&mut guide)?;
///
/// assert_eq!(guide.id(), Some(id));
/// assert_eq!(store.get_guide(id)?, Some(guide));
/// assert_eq!(store.search("San")?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub trait GuideStore {
    /// Persist a transient guide and assign its id.
    ///
    /// The id is written back into `guide` and also returned.
    ///
    /// # Errors
    /// Fails with [`StoreError::AlreadyPersisted`] if the guide already has an
    /// id, or with a backend error when the write fails. The guide stays
    /// transient on failure.
    fn create_guide(&mut self, guide: &mut Guide) -> Result<GuideId, StoreError>;

    /// Fetch a guide, or `None` if no guide has this id.
    ///
    /// # Errors
    /// Fails when the backend cannot read or decode the row.
    fn get_guide(&self, id: GuideId) -> Result<Option<Guide>, StoreError>;

    /// Overwrite the name, description and coordinate of a persisted guide.
    ///
    /// # Errors
    /// Fails with [`StoreError::NotPersisted`] for a transient guide and
    /// [`StoreError::GuideNotFound`] if the id does not resolve.
    fn update_guide(&mut self, guide: &Guide) -> Result<(), StoreError>;

    /// Delete a guide and its points of interest. Succeeds if absent.
    ///
    /// # Errors
    /// Fails only when the backend rejects the delete.
    fn delete_guide(&mut self, id: GuideId) -> Result<(), StoreError>;

    /// Every guide.
    ///
    /// # Errors
    /// A failed query is an error; an empty store is `Ok(vec![])`.
    fn get_all_guides(&self) -> Result<Vec<Guide>, StoreError>;

    /// Guides whose name starts with `prefix` (case-sensitive). An empty
    /// prefix matches every guide.
    ///
    /// # Errors
    /// As for [`get_all_guides`](Self::get_all_guides).
    fn search(&self, prefix: &str) -> Result<Vec<Guide>, StoreError>;

    /// Number of stored guides.
    ///
    /// # Errors
    /// Fails when the backend cannot run the count.
    fn count_guides(&self) -> Result<u64, StoreError>;

    /// Persist a transient point of interest and assign its id.
    ///
    /// # Errors
    /// Fails with [`StoreError::AlreadyPersisted`] if it already has an id and
    /// [`StoreError::GuideNotFound`] if its guide does not exist.
    fn create_poi(&mut self, poi: &mut PointOfInterest) -> Result<PoiId, StoreError>;

    /// Fetch a point of interest under `guide_id`, or `None` if absent.
    ///
    /// # Errors
    /// Fails when the backend cannot read or decode the row.
    fn get_poi(
        &self,
        guide_id: GuideId,
        poi_id: PoiId,
    ) -> Result<Option<PointOfInterest>, StoreError>;

    /// Overwrite the name, description and coordinate of a persisted point
    /// of interest. Its guide reference is never changed.
    ///
    /// # Errors
    /// Fails with [`StoreError::NotPersisted`] for a transient point of
    /// interest and [`StoreError::PoiNotFound`] if the id does not resolve
    /// under the entity's guide.
    fn update_poi(&mut self, poi: &PointOfInterest) -> Result<(), StoreError>;

    /// Delete a point of interest under `guide_id`. Succeeds if absent.
    ///
    /// # Errors
    /// Fails only when the backend rejects the delete.
    fn delete_poi(&mut self, guide_id: GuideId, poi_id: PoiId) -> Result<(), StoreError>;

    /// Every point of interest belonging to `guide_id`.
    ///
    /// # Errors
    /// Fails when the backend cannot run the query or decode a row.
    fn get_all_pois(&self, guide_id: GuideId) -> Result<Vec<PointOfInterest>, StoreError>;
}

pub(crate) fn persisted_guide_id(guide: &Guide) -> Result<GuideId, StoreError> {
    guide.id().ok_or(StoreError::NotPersisted {
        entity: GUIDE_ENTITY,
    })
}

pub(crate) fn persisted_poi_id(poi: &PointOfInterest) -> Result<PoiId, StoreError> {
    poi.id().ok_or(StoreError::NotPersisted { entity: POI_ENTITY })
}

pub(crate) fn ensure_transient_guide(guide: &Guide) -> Result<(), StoreError> {
    match guide.id() {
        Some(id) => Err(StoreError::AlreadyPersisted {
            entity: GUIDE_ENTITY,
            id: id.get(),
        }),
        None => Ok(()),
    }
}

pub(crate) fn ensure_transient_poi(poi: &PointOfInterest) -> Result<(), StoreError> {
    match poi.id() {
        Some(id) => Err(StoreError::AlreadyPersisted {
            entity: POI_ENTITY,
            id: id.get(),
        }),
        None => Ok(()),
    }
}
