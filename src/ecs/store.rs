//! Entity and component bookkeeping on top of a bevy [`World`].

use std::any::type_name;

use bevy_ecs::{
    bundle::Bundle,
    component::{Component, Mutable},
    entity::Entity,
    world::{Mut, World},
};
use tracing::trace;

use crate::error::EntityError;

/// Entity lifecycle and component lookups that report failures instead of panicking.
///
/// Inside systems, structural changes go through `Commands` and land once the system
/// finishes; these methods are for setup code, tests and the frame loop itself.
pub trait ComponentStore {
    /// Spawns a new entity holding `bundle`.
    fn create_entity<B: Bundle>(&mut self, bundle: B) -> Entity;

    /// Despawns `entity`. Deleting an entity that is already gone is a silent no-op.
    ///
    /// Returns whether anything was removed.
    fn delete_entity(&mut self, entity: Entity) -> bool;

    /// Attaches `component`, replacing any existing component of the same type.
    fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> Result<(), EntityError>;

    /// Detaches and returns a component, if the entity had one.
    fn remove_component<C: Component>(&mut self, entity: Entity) -> Option<C>;

    fn has_component<C: Component>(&self, entity: Entity) -> bool;

    fn component_for<C: Component>(&self, entity: Entity) -> Result<&C, EntityError>;

    fn component_for_mut<C: Component<Mutability = Mutable>>(&mut self, entity: Entity) -> Result<Mut<'_, C>, EntityError>;
}

impl ComponentStore for World {
    fn create_entity<B: Bundle>(&mut self, bundle: B) -> Entity {
        let entity = self.spawn(bundle).id();
        trace!(entity = ?entity, "Entity created");
        entity
    }

    fn delete_entity(&mut self, entity: Entity) -> bool {
        if self.get_entity(entity).is_err() {
            return false;
        }
        trace!(entity = ?entity, "Entity deleted");
        self.despawn(entity)
    }

    fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> Result<(), EntityError> {
        let mut entity_mut = self.get_entity_mut(entity).map_err(|_| EntityError::InvalidEntity(entity))?;
        entity_mut.insert(component);
        Ok(())
    }

    fn remove_component<C: Component>(&mut self, entity: Entity) -> Option<C> {
        self.get_entity_mut(entity).ok()?.take::<C>()
    }

    fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.get::<C>(entity).is_some()
    }

    fn component_for<C: Component>(&self, entity: Entity) -> Result<&C, EntityError> {
        let entity_ref = self.get_entity(entity).map_err(|_| EntityError::InvalidEntity(entity))?;
        entity_ref.get::<C>().ok_or(EntityError::MissingComponent {
            entity,
            component: short_type_name::<C>(),
        })
    }

    fn component_for_mut<C: Component<Mutability = Mutable>>(&mut self, entity: Entity) -> Result<Mut<'_, C>, EntityError> {
        let entity_mut = self.get_entity_mut(entity).map_err(|_| EntityError::InvalidEntity(entity))?;
        entity_mut.into_mut::<C>().ok_or(EntityError::MissingComponent {
            entity,
            component: short_type_name::<C>(),
        })
    }
}

/// The last path segment of a type name, e.g. `Health` for `tileclash::systems::Health`.
pub(crate) fn short_type_name<T>() -> &'static str {
    let name = type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::{Health, PlayerControlled};

    #[test]
    fn test_missing_component_is_reported() {
        let mut world = World::new();
        let entity = world.create_entity(PlayerControlled);

        let result = world.component_for::<Health>(entity);
        assert_eq!(
            result.unwrap_err(),
            EntityError::MissingComponent {
                entity,
                component: "Health"
            }
        );
    }

    #[test]
    fn test_delete_twice_is_silent() {
        let mut world = World::new();
        let entity = world.create_entity(Health::full(10.0));

        assert!(world.delete_entity(entity));
        assert!(!world.delete_entity(entity));
        assert_eq!(world.component_for::<Health>(entity).unwrap_err(), EntityError::InvalidEntity(entity));
    }

    #[test]
    fn test_add_and_remove_component() {
        let mut world = World::new();
        let entity = world.create_entity(PlayerControlled);

        world.add_component(entity, Health::full(10.0)).unwrap();
        assert!(world.has_component::<Health>(entity));
        world.component_for_mut::<Health>(entity).unwrap().damage(4.0);
        assert_eq!(world.component_for::<Health>(entity).unwrap().hp(), 6.0);

        assert!(world.remove_component::<Health>(entity).is_some());
        assert!(!world.has_component::<Health>(entity));
    }
}
