/// EntityRegistry: the village elements and ground pickups of one session.
///
/// Elements are never removed; tearing one down only flips its
/// `dismantled` flag, so indices stay valid for the whole session.
/// Pickups are removed outright when collected and their index is reused
/// by whatever shifts into it.

use crate::domain::entity::{GroundPickup, VillageElement};

#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    elements: Vec<VillageElement>,
    pickups: Vec<GroundPickup>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        EntityRegistry { elements: Vec::new(), pickups: Vec::new() }
    }

    pub fn from_parts(elements: Vec<VillageElement>, pickups: Vec<GroundPickup>) -> Self {
        EntityRegistry { elements, pickups }
    }

    pub fn all_elements(&self) -> &[VillageElement] {
        &self.elements
    }

    pub fn all_pickups(&self) -> &[GroundPickup] {
        &self.pickups
    }

    pub fn element(&self, idx: usize) -> Option<&VillageElement> {
        self.elements.get(idx)
    }

    pub(crate) fn element_mut(&mut self, idx: usize) -> Option<&mut VillageElement> {
        self.elements.get_mut(idx)
    }

    pub(crate) fn push_element(&mut self, element: VillageElement) {
        self.elements.push(element);
    }

    pub(crate) fn push_pickup(&mut self, pickup: GroundPickup) {
        self.pickups.push(pickup);
    }

    /// Remove and return the pickup at `idx`, preserving the order of the
    /// rest. Out-of-range indices are a no-op.
    pub fn remove_pickup(&mut self, idx: usize) -> Option<GroundPickup> {
        if idx < self.pickups.len() {
            Some(self.pickups.remove(idx))
        } else {
            None
        }
    }

    pub fn standing_count(&self) -> usize {
        self.elements.iter().filter(|e| !e.dismantled).count()
    }

    pub fn total_villagers(&self) -> u32 {
        self.elements.iter().map(|e| e.villagers).sum()
    }
}
