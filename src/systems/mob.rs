//! Mob behaviour components and the decisions they drive.

use std::f32::consts::PI;

use bevy_ecs::{component::Component, entity::Entity};
use glam::{IVec2, Vec2};
use strum_macros::IntoStaticStr;

use crate::map::TileMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum MobState {
    Patrol,
    Follow,
    /// Running away from a ledge since the given clock tick.
    Flee { since: u64 },
}

/// A mob's movement state machine and the speeds it moves at in each state.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Behavior {
    pub state: MobState,
    pub patrol_speed: f32,
    pub flee_speed: f32,
    pub flee_ms: u64,
}

impl Behavior {
    pub fn new(patrol_speed: f32, flee_speed: f32, flee_ms: u64) -> Self {
        Self {
            state: MobState::Patrol,
            patrol_speed,
            flee_speed,
            flee_ms,
        }
    }
}

/// Chase `target` while it is within `range` tiles on the same row.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FollowsEntity {
    pub target: Entity,
    pub range: f32,
}

/// Walks back and forth, turning at walls and ledges.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Patroller;

/// Damages the player directly, on contact or within a tile range.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MeleeAttack {
    /// Reach in tiles; ignored for contact attacks.
    pub range: f32,
    pub damage: f32,
    pub cooldown_ms: u64,
    /// Attack on touching rects rather than tile range.
    pub contact: bool,
    pub last_attack: Option<u64>,
}

impl MeleeAttack {
    pub fn ready(&self, now: u64) -> bool {
        cooled_down(self.last_attack, self.cooldown_ms, now)
    }
}

/// Uses the equipped item when the player comes within `range` tiles.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MeleeWeaponAttack {
    pub range: f32,
}

/// Lobs projectiles at the player along a ballistic arc.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RangeAttack {
    /// Reach in tiles.
    pub range: f32,
    pub damage: f32,
    pub cooldown_ms: u64,
    /// Launch speed, in pixels per frame.
    pub launch_speed: f32,
    /// Per-frame gravity of the fired projectile.
    pub gravity: f32,
    /// Prefer the lofted solution over the flat one.
    pub high_arc: bool,
    pub last_attack: Option<u64>,
}

impl RangeAttack {
    pub fn ready(&self, now: u64) -> bool {
        cooled_down(self.last_attack, self.cooldown_ms, now)
    }
}

fn cooled_down(last: Option<u64>, cooldown_ms: u64, now: u64) -> bool {
    last.is_none_or(|last| now.saturating_sub(last) > cooldown_ms)
}

/// The terrain one step ahead of a walking mob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footing {
    /// Walkability of the tile directly ahead, `None` for open air.
    pub ahead: Option<bool>,
    /// Whether any tile lies below the tile ahead.
    pub ground_ahead: bool,
}

impl Footing {
    pub fn probe(map: &TileMap, tile: IVec2, direction: i32) -> Self {
        let next = tile.x + direction;
        Self {
            ahead: map.tile_at(0, next, tile.y).map(|record| record.walkable()),
            ground_ahead: map.tile_at(0, next, tile.y + 1).is_some(),
        }
    }

    /// Walking on would hit a wall, or step into open air with nothing below it.
    pub fn should_turn(&self) -> bool {
        match self.ahead {
            Some(walkable) => !walkable,
            None => !self.ground_ahead,
        }
    }

    pub fn about_to_fall(&self) -> bool {
        !self.ground_ahead
    }
}

/// Screen-space launch angle (radians) that lands a projectile on `target`.
///
/// `origin` and `target` are world pixels with y growing downward; `speed` and `gravity`
/// are per-frame. Returns `None` when the target is out of reach or straight above/below.
pub fn ballistic_angle(origin: Vec2, target: Vec2, speed: f32, gravity: f32, high_arc: bool) -> Option<f32> {
    let x = target.x - origin.x;
    // Height of the target above the launcher
    let y = origin.y - target.y;

    if x == 0.0 || gravity <= 0.0 {
        return None;
    }

    let v2 = speed * speed;
    let discriminant = v2 * v2 - gravity * (gravity * x * x + 2.0 * y * v2);
    if discriminant < 0.0 {
        return None;
    }

    let root = if high_arc { discriminant.sqrt() } else { -discriminant.sqrt() };
    let theta = ((v2 + root) / (gravity * x)).atan();

    Some(if x > 0.0 { -theta } else { -PI - theta })
}
