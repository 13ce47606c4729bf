//! Broad phase: all-pairs overlap checks between registered entities
//!
//! The manager does not own entities, it only remembers their handles. Every
//! unordered pair is visited once per check; activity is read at the moment
//! a pair is visited, so an entity knocked out earlier in the same pass never
//! produces another hit.

use super::entity::Entity;
use super::store::{EntityId, EntityStore};

#[derive(Debug, Clone, Default)]
pub struct CollisionManager {
    objects: Vec<EntityId>,
}

impl CollisionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle; duplicates are ignored
    pub fn add_object(&mut self, id: EntityId) {
        if !self.objects.contains(&id) {
            self.objects.push(id);
        }
    }

    /// Unregister a handle; no-op when absent
    pub fn remove_object(&mut self, id: EntityId) {
        if let Some(pos) = self.objects.iter().position(|&o| o == id) {
            self.objects.remove(pos);
        }
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.objects.contains(&id)
    }

    /// Test every active pair and hand overlaps to `resolve`
    ///
    /// Returns the number of overlapping pairs found. Stale handles are
    /// skipped like inactive entities.
    pub fn check_collisions<F>(&self, store: &mut EntityStore<Entity>, mut resolve: F) -> usize
    where
        F: FnMut(&mut EntityStore<Entity>, EntityId, EntityId),
    {
        let mut hits = 0;
        for (i, &a) in self.objects.iter().enumerate() {
            for &b in &self.objects[i + 1..] {
                let overlapping = match (store.get(a), store.get(b)) {
                    (Some(ea), Some(eb)) if ea.is_active() && eb.is_active() => {
                        ea.collides_with(eb)
                    }
                    _ => false,
                };
                if overlapping {
                    hits += 1;
                    resolve(store, a, b);
                }
            }
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::colors;
    use crate::sim::body::Body;
    use crate::sim::polygon::Shape;
    use glam::Vec2;

    fn square(store: &mut EntityStore<Entity>, x: f32) -> EntityId {
        store.insert(Entity::Generic(Body::new(
            Shape::Rectangle,
            Vec2::new(x, 0.0),
            Vec2::splat(10.0),
            Vec2::ZERO,
            0.0,
            colors::WHITE,
        )))
    }

    #[test]
    fn test_each_overlapping_pair_reported_once() {
        let mut store = EntityStore::new();
        let mut broad = CollisionManager::new();
        let a = square(&mut store, 0.0);
        let b = square(&mut store, 5.0);
        let c = square(&mut store, 100.0);
        for id in [a, b, c] {
            broad.add_object(id);
        }
        broad.add_object(a);
        assert_eq!(broad.len(), 3);

        let mut pairs = Vec::new();
        let hits = broad.check_collisions(&mut store, |_, x, y| pairs.push((x, y)));
        assert_eq!(hits, 1);
        assert_eq!(pairs, vec![(a, b)]);
    }

    #[test]
    fn test_deactivated_mid_scan_does_not_retrigger() {
        let mut store = EntityStore::new();
        let mut broad = CollisionManager::new();
        // Three mutually overlapping squares
        let ids: Vec<_> = (0..3).map(|i| square(&mut store, i as f32)).collect();
        for &id in &ids {
            broad.add_object(id);
        }

        let mut calls = 0;
        broad.check_collisions(&mut store, |store, x, _| {
            calls += 1;
            if let Some(e) = store.get_mut(x) {
                e.body_mut().active = false;
            }
        });
        // (0,1) deactivates 0, so (0,2) is skipped; (1,2) still fires
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_remove_and_stale_handles() {
        let mut store = EntityStore::new();
        let mut broad = CollisionManager::new();
        let a = square(&mut store, 0.0);
        let b = square(&mut store, 1.0);
        broad.add_object(a);
        broad.add_object(b);

        store.remove(b);
        assert_eq!(broad.check_collisions(&mut store, |_, _, _| {}), 0);

        broad.remove_object(b);
        broad.remove_object(b);
        assert_eq!(broad.len(), 1);
        broad.clear();
        assert!(broad.is_empty());
    }
}
