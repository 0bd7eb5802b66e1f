//! Registries of living entities, one per marker component.

use std::marker::PhantomData;

use bevy::prelude::*;

/// Living entities carrying marker `M`, in arrival order.
///
/// Entities join when the marker is added and leave when they die or the
/// marker goes away. Readers iterate a [`Roster::snapshot`], so roster
/// changes made while a scan is running never affect that scan.
#[derive(Resource)]
pub struct Roster<M: Component> {
    entities: Vec<Entity>,
    _marker: PhantomData<fn() -> M>,
}

impl<M: Component> Default for Roster<M> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            _marker: PhantomData,
        }
    }
}

impl<M: Component> Roster<M> {
    pub fn add(&mut self, entity: Entity) {
        if !self.entities.contains(&entity) {
            self.entities.push(entity);
        }
    }

    /// Returns false if the entity was not registered.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|&e| e != entity);
        self.entities.len() != before
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn snapshot(&self) -> Vec<Entity> {
        self.entities.clone()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

/// Register entities that just received marker `M`.
pub fn register_arrivals<M: Component>(
    arrivals: Query<Entity, Added<M>>,
    mut roster: ResMut<Roster<M>>,
) {
    for entity in arrivals.iter() {
        roster.add(entity);
    }
}

/// Forget entities that lost marker `M` or were despawned.
pub fn forget_departures<M: Component>(
    mut departures: RemovedComponents<M>,
    mut roster: ResMut<Roster<M>>,
) {
    for entity in departures.read() {
        roster.remove(entity);
    }
}
