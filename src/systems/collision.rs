//! Terrain collision resolution and item pickup.

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::{Has, With},
    system::{ParamSet, Query, Res},
};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::constants::particles::INVENTORY_FULL;
use crate::error::GameResult;
use crate::events::{GameEvent, ParticleEvent};
use crate::geometry::Rect;
use crate::map::{TileKind, TileMap};
use crate::systems::components::{DeltaTime, Flags, Inventory, Movement, PlayerControlled, Position};
use crate::systems::item::{Item, ItemGraphics, ItemPosition};

/// Height of a ramp's walking surface under a body whose left edge is at `x`.
///
/// Returns the y coordinate of the surface, clamped to the ramp tile.
pub fn ramp_surface(kind: TileKind, ramp: &Rect, x: f32, width: f32) -> f32 {
    let rel_x = x - ramp.x;
    let height = if kind.contains(TileKind::RAMP_UP) {
        rel_x + width
    } else {
        ramp.h - rel_x
    };
    ramp.y + ramp.h - height.clamp(0.0, ramp.h)
}

/// Moves a body by its velocity and pushes it out of `obstacles`, one axis at a time.
///
/// The X axis resolves first, then Y; rects are visited in slice order and the last snap
/// wins. Velocity on an axis that snapped is zeroed. Returns whether the body landed.
pub fn resolve_collisions(
    position: &mut Position,
    movement: &mut Movement,
    obstacles: &[Rect],
    ramps: &[(TileKind, Rect)],
    dt: f32,
    map_width: f32,
) -> bool {
    let size = position.size;

    let x = position.pos().x + movement.velocity.x * dt;
    position.set_x(x.min(map_width - size.x).max(0.0));

    let mut snapped = false;
    for rect in obstacles {
        if !position.rect().overlaps(rect) {
            continue;
        }
        if movement.velocity.x > 0.0 {
            position.set_x(rect.left() - size.x);
            snapped = true;
        } else if movement.velocity.x < 0.0 {
            position.set_x(rect.right());
            snapped = true;
        }
    }
    if snapped {
        movement.velocity.x = 0.0;
    }

    position.set_y(position.pos().y + movement.velocity.y * dt);

    let mut landed = false;
    snapped = false;
    for rect in obstacles {
        if !position.rect().overlaps(rect) {
            continue;
        }
        if movement.velocity.y > 0.0 {
            position.set_y(rect.top() - size.y);
            landed = true;
            snapped = true;
        } else if movement.velocity.y < 0.0 {
            position.set_y(rect.bottom());
            snapped = true;
        }
    }

    for (kind, ramp) in ramps {
        let body = position.rect();
        if !ramp.overlaps(&body) {
            continue;
        }
        let surface = ramp_surface(*kind, ramp, body.x, body.w);
        if body.bottom() > surface {
            position.set_y(surface - size.y);
            landed = true;
            snapped = true;
        }
    }

    if snapped {
        movement.velocity.y = 0.0;
    }
    landed
}

/// Resolves every collidable mover against the solid tiles around it.
///
/// The player is also blocked by entities flagged `collide_with_player`, and those
/// entities are blocked by the player. Bodies resolve in turn, each against the others'
/// rects as already resolved this pass.
pub fn collision_system(
    map: Res<TileMap>,
    dt: Res<DeltaTime>,
    mut bodies: ParamSet<(
        Query<(Entity, &Position, &Flags, Has<PlayerControlled>)>,
        Query<(Entity, &mut Position, &mut Movement, &Flags, Has<PlayerControlled>)>,
    )>,
) -> GameResult<()> {
    let mut blockers: SmallVec<[(Entity, Rect, bool); 16]> = bodies
        .p0()
        .iter()
        .filter(|(_, _, flags, is_player)| *is_player || flags.collide_with_player)
        .map(|(entity, position, _, is_player)| (entity, position.rect(), is_player))
        .collect();
    let map_width = map.pixel_size().x;

    for (entity, mut position, mut movement, flags, is_player) in bodies.p1().iter_mut() {
        if !flags.collidable {
            continue;
        }

        let mut obstacles = map.unwalkable_rects(position.tile(), 1);
        if is_player {
            obstacles.extend(
                blockers
                    .iter()
                    .filter(|(other, _, other_is_player)| *other != entity && !other_is_player)
                    .map(|(_, rect, _)| *rect),
            );
        } else if flags.collide_with_player {
            obstacles.extend(blockers.iter().filter(|(_, _, other_is_player)| *other_is_player).map(|(_, rect, _)| *rect));
        }
        let ramps = map.ramps(position.tile(), 1);

        let landed = resolve_collisions(&mut position, &mut movement, &obstacles, &ramps, dt.0, map_width);
        if landed && !position.on_ground {
            trace!(entity = ?entity, pos = ?position.pos(), "Landed");
        }
        position.on_ground = landed;

        if let Some(blocker) = blockers.iter_mut().find(|(other, _, _)| *other == entity) {
            blocker.1 = position.rect();
        }
    }

    Ok(())
}

/// Moves world items the player walks over into the player's inventory.
pub fn item_pickup_system(
    mut players: Query<(Entity, &Position, &mut Inventory), With<PlayerControlled>>,
    mut items: Query<(Entity, &mut Item, &mut ItemPosition, &ItemGraphics)>,
    mut events: EventWriter<GameEvent>,
    mut particles: EventWriter<ParticleEvent>,
) -> GameResult<()> {
    let Ok((player, position, mut inventory)) = players.single_mut() else {
        return Ok(());
    };
    let body = position.rect();

    for (entity, mut item, mut item_position, graphics) in items.iter_mut() {
        if item_position.in_inventory || !body.overlaps(&graphics.world_rect(&item_position)) {
            continue;
        }

        match inventory.insert(entity) {
            Some(slot) => {
                item.owner = Some(player);
                item_position.in_inventory = true;
                events.write(GameEvent::ItemPickedUp { owner: player, item: entity });
                debug!(item = %item.name, slot, "Item picked up");
            }
            None => {
                events.write(GameEvent::InventoryFull(player));
                particles.write(ParticleEvent::Text {
                    pos: position.pos(),
                    text: INVENTORY_FULL.to_string(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_surface() {
        let ramp = Rect::new(0.0, 0.0, 32.0, 32.0);
        // Rising ramp: a body with its right edge at the ramp's left edge stands at the bottom
        assert_eq!(ramp_surface(TileKind::RAMP_UP, &ramp, -16.0, 16.0), 32.0);
        assert_eq!(ramp_surface(TileKind::RAMP_UP, &ramp, 0.0, 16.0), 16.0);
        assert_eq!(ramp_surface(TileKind::RAMP_UP, &ramp, 20.0, 16.0), 0.0);
        // Falling ramp
        assert_eq!(ramp_surface(TileKind::RAMP_DOWN, &ramp, 0.0, 16.0), 0.0);
        assert_eq!(ramp_surface(TileKind::RAMP_DOWN, &ramp, 24.0, 16.0), 24.0);
    }
}
