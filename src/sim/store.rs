//! Entity storage with generation-checked handles
//!
//! Sparse set: entities sit packed in a dense `Vec`, while a slot table maps
//! stable handles to dense positions. Removal swaps the last entity into the
//! hole, so iteration order is not insertion order once anything is removed.

use serde::{Deserialize, Serialize};

/// Stable handle to a stored entity
///
/// A handle outlives its entity: once the slot is reused the generation no
/// longer matches and every lookup returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    /// Position in `dense`, `None` while the slot is free
    dense: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    slots: Vec<Slot>,
    dense: Vec<T>,
    /// Slot index owning each dense entry
    owners: Vec<u32>,
    free: Vec<u32>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            dense: Vec::new(),
            owners: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    pub fn insert(&mut self, value: T) -> EntityId {
        let dense = self.dense.len();
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].dense = Some(dense);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    dense: Some(dense),
                });
                (self.slots.len() - 1) as u32
            }
        };
        self.dense.push(value);
        self.owners.push(index);
        EntityId {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Remove and return the entity; stale handles return `None`
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let pos = self.dense_index(id)?;
        let last = self.dense.len() - 1;
        if pos != last {
            let moved = self.owners[last];
            self.slots[moved as usize].dense = Some(pos);
        }

        let slot = &mut self.slots[id.index as usize];
        slot.dense = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);

        self.owners.swap_remove(pos);
        Some(self.dense.swap_remove(pos))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.dense_index(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.dense_index(id).map(|i| &self.dense[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.dense_index(id).map(|i| &mut self.dense[i])
    }

    /// Two distinct live entities at once
    pub fn get_pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut T, &mut T)> {
        let ia = self.dense_index(a)?;
        let ib = self.dense_index(b)?;
        if ia == ib {
            return None;
        }

        if ia < ib {
            let (lo, hi) = self.dense.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.dense.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }

    /// Handles of every live entity, in dense order
    pub fn ids(&self) -> Vec<EntityId> {
        self.owners
            .iter()
            .map(|&index| EntityId {
                index,
                generation: self.slots[index as usize].generation,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.dense.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.dense.iter_mut()
    }

    /// Drop everything; outstanding handles all go stale
    pub fn clear(&mut self) {
        for &index in &self.owners {
            let slot = &mut self.slots[index as usize];
            slot.dense = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
        }
        self.owners.clear();
        self.dense.clear();
    }

    fn dense_index(&self, id: EntityId) -> Option<usize> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation == id.generation {
            slot.dense
        } else {
            None
        }
    }
}
