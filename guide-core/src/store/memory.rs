//! In-memory reference implementation of [`GuideStore`].

use std::collections::BTreeMap;

use log::debug;

use super::{
    GuideStore, StoreError, ensure_transient_guide, ensure_transient_poi, persisted_guide_id,
    persisted_poi_id,
};
use crate::{Guide, GuideId, PoiId, PointOfInterest};

/// `GuideStore` kept entirely in memory.
///
/// Ids come from per-type counters that only move forward, so an id is never
/// handed out twice by the same store, even after deletion. Deleting a guide
/// removes its points of interest, matching the cascading foreign key of the
/// SQLite schema.
#[derive(Debug, Default)]
pub struct MemoryGuideStore {
    guides: BTreeMap<GuideId, Guide>,
    pois: BTreeMap<PoiId, PointOfInterest>,
    last_guide_id: i64,
    last_poi_id: i64,
}

impl MemoryGuideStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with transient guides.
    ///
    /// Ids are assigned in iteration order starting at 1.
    ///
    /// # Errors
    /// Returns [`StoreError::AlreadyPersisted`] if any guide already has an id.
    pub fn with_guides<I>(guides: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = Guide>,
    {
        let mut store = Self::default();
        for mut guide in guides {
            store.create_guide(&mut guide)?;
        }
        Ok(store)
    }

    fn next_guide_id(&mut self) -> GuideId {
        self.last_guide_id += 1;
        GuideId::new(self.last_guide_id)
    }

    fn next_poi_id(&mut self) -> PoiId {
        self.last_poi_id += 1;
        PoiId::new(self.last_poi_id)
    }

    fn poi_under(&self, guide_id: GuideId, poi_id: PoiId) -> Option<&PointOfInterest> {
        self.pois
            .get(&poi_id)
            .filter(|poi| poi.guide_id() == guide_id)
    }
}

impl GuideStore for MemoryGuideStore {
    fn create_guide(&mut self, guide: &mut Guide) -> Result<GuideId, StoreError> {
        ensure_transient_guide(guide)?;
        let id = self.next_guide_id();
        guide.assign_id(id);
        self.guides.insert(id, guide.clone());
        debug!("created guide {id} in memory");
        Ok(id)
    }

    fn get_guide(&self, id: GuideId) -> Result<Option<Guide>, StoreError> {
        Ok(self.guides.get(&id).cloned())
    }

    fn update_guide(&mut self, guide: &Guide) -> Result<(), StoreError> {
        let id = persisted_guide_id(guide)?;
        let stored = self
            .guides
            .get_mut(&id)
            .ok_or(StoreError::GuideNotFound { guide_id: id })?;
        *stored = guide.clone();
        Ok(())
    }

    fn delete_guide(&mut self, id: GuideId) -> Result<(), StoreError> {
        if self.guides.remove(&id).is_some() {
            self.pois.retain(|_, poi| poi.guide_id() != id);
            debug!("deleted guide {id} and its points of interest from memory");
        }
        Ok(())
    }

    fn get_all_guides(&self) -> Result<Vec<Guide>, StoreError> {
        Ok(self.guides.values().cloned().collect())
    }

    fn search(&self, prefix: &str) -> Result<Vec<Guide>, StoreError> {
        Ok(self
            .guides
            .values()
            .filter(|guide| guide.name().starts_with(prefix))
            .cloned()
            .collect())
    }

    fn count_guides(&self) -> Result<u64, StoreError> {
        Ok(self.guides.len() as u64)
    }

    fn create_poi(&mut self, poi: &mut PointOfInterest) -> Result<PoiId, StoreError> {
        ensure_transient_poi(poi)?;
        let guide_id = poi.guide_id();
        if !self.guides.contains_key(&guide_id) {
            return Err(StoreError::GuideNotFound { guide_id });
        }
        let id = self.next_poi_id();
        poi.assign_id(id);
        self.pois.insert(id, poi.clone());
        debug!("created point of interest {id} under guide {guide_id} in memory");
        Ok(id)
    }

    fn get_poi(
        &self,
        guide_id: GuideId,
        poi_id: PoiId,
    ) -> Result<Option<PointOfInterest>, StoreError> {
        Ok(self.poi_under(guide_id, poi_id).cloned())
    }

    fn update_poi(&mut self, poi: &PointOfInterest) -> Result<(), StoreError> {
        let poi_id = persisted_poi_id(poi)?;
        let guide_id = poi.guide_id();
        let stored = self
            .pois
            .get_mut(&poi_id)
            .filter(|stored| stored.guide_id() == guide_id)
            .ok_or(StoreError::PoiNotFound { guide_id, poi_id })?;
        *stored = poi.clone();
        Ok(())
    }

    fn delete_poi(&mut self, guide_id: GuideId, poi_id: PoiId) -> Result<(), StoreError> {
        if self.poi_under(guide_id, poi_id).is_some() {
            self.pois.remove(&poi_id);
        }
        Ok(())
    }

    fn get_all_pois(&self, guide_id: GuideId) -> Result<Vec<PointOfInterest>, StoreError> {
        Ok(self
            .pois
            .values()
            .filter(|poi| poi.guide_id() == guide_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityOptions;
    use rstest::{fixture, rstest};

    fn guide(name: &str) -> Guide {
        Guide::new(name, EntityOptions::default().with_coordinates(30.0, 40.0))
            .expect("valid guide")
    }

    #[fixture]
    fn store() -> MemoryGuideStore {
        MemoryGuideStore::with_guides([guide("Tuscany"), guide("Sicily"), guide("Verona")])
            .expect("seed store")
    }

    #[rstest]
    fn with_guides_assigns_sequential_ids(store: MemoryGuideStore) {
        let ids: Vec<_> = store
            .get_all_guides()
            .expect("list")
            .iter()
            .filter_map(Guide::id)
            .map(GuideId::get)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[rstest]
    fn ids_are_not_reused_after_delete(mut store: MemoryGuideStore) {
        store.delete_guide(GuideId::new(3)).expect("delete");
        let mut replacement = guide("Umbria");
        let id = store.create_guide(&mut replacement).expect("create");
        assert_eq!(id, GuideId::new(4));
    }

    #[rstest]
    fn creating_a_persisted_guide_fails(mut store: MemoryGuideStore) {
        let mut existing = store
            .get_guide(GuideId::new(1))
            .expect("get")
            .expect("present");
        let err = store.create_guide(&mut existing).expect_err("already persisted");
        assert!(matches!(err, StoreError::AlreadyPersisted { id: 1, .. }));
        assert_eq!(store.count_guides().expect("count"), 3);
    }

    #[rstest]
    fn updating_a_transient_guide_fails(mut store: MemoryGuideStore) {
        let err = store
            .update_guide(&guide("Tuscany"))
            .expect_err("transient guide");
        assert!(matches!(err, StoreError::NotPersisted { .. }));
    }

    #[rstest]
    fn poi_lookup_is_scoped_to_its_guide(mut store: MemoryGuideStore) {
        let mut poi = PointOfInterest::new("Uffizi", GuideId::new(1), EntityOptions::default())
            .expect("valid poi");
        let poi_id = store.create_poi(&mut poi).expect("create poi");
        assert!(store.get_poi(GuideId::new(2), poi_id).expect("get").is_none());
        store
            .delete_poi(GuideId::new(2), poi_id)
            .expect("delete under wrong guide");
        assert!(store.get_poi(GuideId::new(1), poi_id).expect("get").is_some());
    }
}
