use bevy_ecs::{entity::Entity, event::EventWriter, query::With, system::Query};
use tracing::trace;

use crate::error::GameResult;
use crate::events::GameEvent;
use crate::map::{Sign, Tile};
use crate::systems::components::{PlayerControlled, Position};

/// Raises [`GameEvent::SignInRange`] every frame the player overlaps a sign tile.
pub fn tile_interaction_system(
    players: Query<&Position, With<PlayerControlled>>,
    signs: Query<(Entity, &Tile), With<Sign>>,
    mut events: EventWriter<GameEvent>,
) -> GameResult<()> {
    let Ok(player) = players.single() else {
        return Ok(());
    };

    let body = player.rect();
    for (sign, tile) in signs.iter() {
        if tile.rect.overlaps(&body) {
            trace!(sign = ?sign, coords = ?tile.coords, "Player at sign");
            events.write(GameEvent::SignInRange { sign });
        }
    }

    Ok(())
}
