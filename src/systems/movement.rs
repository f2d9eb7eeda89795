//! Velocity updates: player control, gravity and mob steering.

use std::collections::HashMap;

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::{Has, With, Without},
    system::{ParamSet, Query, Res},
};
use glam::{IVec2, Vec2};
use tracing::{debug, trace};

use crate::clock::GameClock;
use crate::error::GameResult;
use crate::events::{GameCommand, ParticleEvent};
use crate::geometry::Facing;
use crate::input::{Bindings, FrameInput};
use crate::map::TileMap;
use crate::systems::components::{DeltaTime, Movement, PlayerControlled, Position};
use crate::systems::mob::{Behavior, Footing, FollowsEntity, MobState, Patroller};

/// Accelerates a mover downward, capped at its terminal speed.
pub fn apply_gravity(movement: &mut Movement, dt: f32) {
    movement.velocity.y = (movement.velocity.y + movement.gravity * dt).min(movement.max_fall_speed);
}

/// Walks in the facing direction, turning around at walls and ledges.
pub fn patrol(position: &mut Position, movement: &mut Movement, speed: f32, map: &TileMap) {
    let footing = Footing::probe(map, position.tile(), position.facing.sign() as i32);
    if footing.should_turn() {
        position.facing = position.facing.flipped();
        trace!(tile = ?position.tile(), facing = <&'static str>::from(position.facing), "Patrol turned");
    }
    movement.velocity.x = speed * position.facing.sign();
}

/// Advances a mob's patrol/follow/flee state machine by one frame.
///
/// `target` is the followed entity's tile and the follow range, if it has one.
pub fn steer(
    behavior: &mut Behavior,
    position: &mut Position,
    movement: &mut Movement,
    target: Option<(IVec2, f32)>,
    map: &TileMap,
    now: u64,
) {
    let tile = position.tile();
    let engaged = target.is_some_and(|(target_tile, range)| position.in_range(target_tile, range) && target_tile.y == tile.y);

    match behavior.state {
        MobState::Patrol => {
            patrol(position, movement, behavior.patrol_speed, map);
            if engaged {
                behavior.state = MobState::Follow;
                debug!(tile = ?tile, "Mob started following");
            }
        }
        MobState::Follow => {
            if let Some(facing) = target.and_then(|(target_tile, _)| Facing::toward((target_tile.x - tile.x) as f32)) {
                position.facing = facing;
            }
            movement.velocity.x = movement.speed * position.facing.sign();

            if !engaged {
                behavior.state = MobState::Patrol;
                debug!(tile = ?tile, "Mob lost its target");
            } else if Footing::probe(map, tile, position.facing.sign() as i32).about_to_fall() {
                behavior.state = MobState::Flee { since: now };
                position.facing = position.facing.flipped();
                debug!(tile = ?tile, "Mob fleeing from a ledge");
            }
        }
        MobState::Flee { since } => {
            if Footing::probe(map, tile, position.facing.sign() as i32).about_to_fall() {
                position.facing = position.facing.flipped();
            }
            movement.velocity.x = behavior.flee_speed * position.facing.sign();

            if now.saturating_sub(since) > behavior.flee_ms {
                behavior.state = MobState::Patrol;
                debug!(tile = ?tile, "Mob stopped fleeing");
            }
        }
    }
}

type MobQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut Position,
        &'static mut Movement,
        Option<&'static mut Behavior>,
        Option<&'static FollowsEntity>,
        Has<Patroller>,
    ),
    Without<PlayerControlled>,
>;

/// Sets velocities for the frame. Positions are left to the collision system.
pub fn velocity_system(
    clock: Res<GameClock>,
    dt: Res<DeltaTime>,
    input: Res<FrameInput>,
    bindings: Res<Bindings>,
    map: Res<TileMap>,
    mut particles: EventWriter<ParticleEvent>,
    mut movers: ParamSet<(
        Query<(Entity, &Position)>,
        Query<(&mut Position, &mut Movement), With<PlayerControlled>>,
        MobQuery,
    )>,
) -> GameResult<()> {
    let now = clock.ticks();

    if let Ok((mut position, mut movement)) = movers.p1().single_mut() {
        let horizontal = input.horizontal(&bindings);
        movement.velocity.x = horizontal * movement.speed;
        if let Some(facing) = Facing::toward(horizontal) {
            position.facing = facing;
        }

        let jump = input.commands(&bindings).any(|command| command == GameCommand::Jump);
        if jump && position.on_ground {
            movement.velocity.y = movement.jump_velocity;
            position.on_ground = false;
            let rect = position.rect();
            particles.write(ParticleEvent::Jump {
                pos: Vec2::new(rect.center().x, rect.bottom()),
            });
            debug!(pos = ?position.pos(), "Player jumped");
        }

        apply_gravity(&mut movement, dt.0);
    }

    let tiles: HashMap<Entity, IVec2> = movers.p0().iter().map(|(entity, position)| (entity, position.tile())).collect();

    for (_, mut position, mut movement, behavior, follows, patroller) in movers.p2().iter_mut() {
        apply_gravity(&mut movement, dt.0);

        if let Some(mut behavior) = behavior {
            let target = follows.and_then(|follows| tiles.get(&follows.target).map(|tile| (*tile, follows.range)));
            steer(&mut behavior, &mut position, &mut movement, target, &map, now);
        } else if patroller {
            let speed = movement.speed;
            patrol(&mut position, &mut movement, speed, &map);
        }
    }

    Ok(())
}
