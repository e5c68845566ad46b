use uuid::Uuid;

use crate::error::StoreError;
use crate::slot::Slot;
use crate::workout::{Workout, WorkoutPatch};

/// View ordering toggled by [`WorkoutStore::sort_toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortMode {
    Insertion,
    ByKind,
}

/// Canonical ordered collection of workouts. The store is the sole owner of
/// the collection; every mutation mirrors the full state into the slot.
#[derive(Debug)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
    sort: SortMode,
    slot: Slot,
}

impl WorkoutStore {
    /// Load the persisted collection. The sort toggle always starts in
    /// insertion order.
    pub fn open(slot: Slot) -> Self {
        let workouts = slot.load();
        Self {
            workouts,
            sort: SortMode::Insertion,
            slot,
        }
    }

    pub fn add(&mut self, workout: Workout) -> Result<(), StoreError> {
        self.workouts.push(workout);
        self.mirror()
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> Result<Workout, StoreError> {
        let idx = self.position(id).ok_or(StoreError::NotFound(id))?;
        let removed = self.workouts.remove(idx);
        self.mirror()?;
        Ok(removed)
    }

    /// Clear the collection. Returns how many workouts were removed; an
    /// already-empty store is not an error.
    pub fn remove_all(&mut self) -> Result<usize, StoreError> {
        let removed = self.workouts.len();
        self.workouts.clear();
        self.mirror()?;
        Ok(removed)
    }

    /// Edit the numeric fields of one workout in place. The id, kind,
    /// coordinates and creation date stay as they are; the derived metric
    /// is recomputed. A failed edit leaves the workout untouched.
    pub fn update(&mut self, id: Uuid, patch: WorkoutPatch) -> Result<&Workout, StoreError> {
        let idx = self.position(id).ok_or(StoreError::NotFound(id))?;
        self.workouts[idx].apply(patch)?;
        self.mirror()?;
        Ok(&self.workouts[idx])
    }

    /// Flip between insertion order and a stable by-kind ordering, and
    /// return the view for the new state.
    pub fn sort_toggle(&mut self) -> Vec<&Workout> {
        self.sort = match self.sort {
            SortMode::Insertion => SortMode::ByKind,
            SortMode::ByKind => SortMode::Insertion,
        };

        let mut view: Vec<&Workout> = self.workouts.iter().collect();
        if self.sort == SortMode::ByKind {
            view.sort_by_key(|w| w.kind().as_str());
        }
        view
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.workouts.iter().position(|w| w.id() == id)
    }

    fn mirror(&self) -> Result<(), StoreError> {
        self.slot.save(&self.workouts)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::workout::{Coords, Kind, Metrics};
    use std::path::Path;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> WorkoutStore {
        WorkoutStore::open(Slot::in_dir(dir))
    }

    fn running() -> Workout {
        Workout::running(5.0, 25.0, Coords(10.0, 20.0), 180.0).unwrap()
    }

    fn cycling() -> Workout {
        Workout::cycling(20.0, 60.0, Coords(10.0, 20.0), 300.0).unwrap()
    }

    #[test]
    fn add_then_remove_restores_prior_state() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());

        store.add(running()).unwrap();
        store.add(cycling()).unwrap();
        let before: Vec<Uuid> = store.iter().map(Workout::id).collect();

        let extra = running();
        let extra_id = extra.id();
        store.add(extra).unwrap();
        store.remove_by_id(extra_id).unwrap();

        let after: Vec<Uuid> = store.iter().map(Workout::id).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn remove_unknown_id_leaves_collection_unchanged() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.add(running()).unwrap();

        let err = store.remove_by_id(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_all_empties_store_and_slot() {
        let dir = tempdir().unwrap();
        let slot = Slot::in_dir(dir.path());
        let mut store = WorkoutStore::open(slot.clone());

        store.add(running()).unwrap();
        store.add(cycling()).unwrap();

        assert_eq!(store.remove_all().unwrap(), 2);
        assert!(store.is_empty());
        assert!(slot.load().is_empty());

        // Removing again is a no-op, not an error.
        assert_eq!(store.remove_all().unwrap(), 0);
    }

    #[test]
    fn update_patches_and_recomputes_across_reload() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());

        store.add(running()).unwrap();
        let id = store.iter().next().unwrap().id();

        let updated = store
            .update(
                id,
                WorkoutPatch {
                    distance_km: Some(10.0),
                    ..WorkoutPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.distance_km(), 10.0);
        assert!(matches!(
            updated.metrics(),
            Metrics::Running { pace_min_per_km, .. } if pace_min_per_km == 2.5
        ));

        let reloaded = store_in(dir.path());
        let w = reloaded.find_by_id(id).unwrap();
        assert_eq!(w.distance_km(), 10.0);
    }

    #[test]
    fn invalid_patch_leaves_workout_unchanged() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());

        store.add(running()).unwrap();
        let id = store.iter().next().unwrap().id();

        let err = store
            .update(
                id,
                WorkoutPatch {
                    distance_km: Some(-1.0),
                    ..WorkoutPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(ValidationError::NotPositive { field: "distance", .. })
        ));

        let w = store.find_by_id(id).unwrap();
        assert_eq!(w.distance_km(), 5.0);
        assert!(matches!(
            w.metrics(),
            Metrics::Running { pace_min_per_km, .. } if pace_min_per_km == 5.0
        ));
    }

    #[test]
    fn update_rejects_other_variants_field() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());

        store.add(cycling()).unwrap();
        let id = store.iter().next().unwrap().id();

        let err = store
            .update(
                id,
                WorkoutPatch {
                    cadence_spm: Some(170.0),
                    ..WorkoutPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(ValidationError::FieldMismatch { field: "cadence", .. })
        ));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());

        let err = store
            .update(Uuid::new_v4(), WorkoutPatch::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn sort_toggle_alternates_between_kind_and_insertion_order() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());

        let r1 = running();
        let c = cycling();
        let r2 = running();
        let (r1_id, c_id, r2_id) = (r1.id(), c.id(), r2.id());

        store.add(r1).unwrap();
        store.add(c).unwrap();
        store.add(r2).unwrap();

        // First toggle: cycling sorts before running, stable within a kind.
        let by_kind: Vec<Uuid> = store.sort_toggle().iter().map(|w| w.id()).collect();
        assert_eq!(by_kind, vec![c_id, r1_id, r2_id]);
        assert_eq!(
            store.sort_toggle().first().map(|w| w.kind()),
            Some(Kind::Running)
        );

        // Second toggle restored insertion order.
        let insertion: Vec<Uuid> = store.iter().map(Workout::id).collect();
        assert_eq!(insertion, vec![r1_id, c_id, r2_id]);
    }
}
