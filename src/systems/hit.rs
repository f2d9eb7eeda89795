//! Death detection and cleanup.

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::Has,
    system::{Commands, Query, ResMut},
};
use tracing::{debug, info};

use crate::error::GameResult;
use crate::events::GameEvent;
use crate::systems::components::{Health, Inventory, PlayerControlled};
use crate::systems::effect::Effects;

/// Raises [`GameEvent::EntityDied`] for entities whose HP dropped to zero this frame.
///
/// Dead mobs are despawned together with everything they carry. The player is left in
/// place for the host to handle. Every entity's HP is then snapshotted for the next frame.
pub fn hit_system(
    mut commands: Commands,
    mut effects: ResMut<Effects>,
    mut events: EventWriter<GameEvent>,
    mut living: Query<(Entity, &mut Health, Option<&Inventory>, Has<PlayerControlled>)>,
) -> GameResult<()> {
    for (entity, mut health, inventory, is_player) in living.iter_mut() {
        if health.took_damage() && health.is_dead() {
            events.write(GameEvent::EntityDied(entity));

            if is_player {
                info!(entity = ?entity, "Player died");
            } else {
                let carried = inventory.into_iter().flat_map(|inventory| inventory.slots().iter().flatten());
                for item in carried {
                    commands.entity(*item).try_despawn();
                }
                effects.remove(entity);
                commands.entity(entity).try_despawn();
                debug!(entity = ?entity, "Entity died");
            }
        }
        health.snapshot();
    }

    Ok(())
}
