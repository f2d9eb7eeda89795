use bevy_ecs::{component::Component, entity::Entity, resource::Resource};
use glam::{IVec2, Vec2};
use strum_macros::IntoStaticStr;

use crate::geometry::{Facing, Rect, TileGrid};

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct PlayerControlled;

/// Archetype tag carried in [`Flags`], used for logging and spawning decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum MobKind {
    Player,
    Walker,
    Follower,
    Archer,
}

/// Boolean traits shared by every living entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    /// Resolved against terrain by the collision system.
    pub collidable: bool,
    /// Blocks (and is blocked by) the player.
    pub collide_with_player: bool,
    pub rotatable: bool,
    pub mob: MobKind,
}

impl Flags {
    pub fn new(mob: MobKind) -> Self {
        Self {
            collidable: true,
            collide_with_player: false,
            rotatable: false,
            mob,
        }
    }
}

/// World placement of an entity.
///
/// The tile coordinate is derived from the pixel position on every write, so the two
/// can never disagree.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pos: Vec2,
    tile: IVec2,
    grid: TileGrid,
    pub size: Vec2,
    pub facing: Facing,
    pub on_ground: bool,
}

impl Position {
    pub fn new(pos: Vec2, size: Vec2, grid: TileGrid) -> Self {
        Self {
            pos,
            tile: grid.to_tile(pos),
            grid,
            size,
            facing: Facing::Right,
            on_ground: false,
        }
    }

    /// Convenience constructor placing the entity's top-left corner on a tile.
    pub fn at_tile(tile: IVec2, size: Vec2, grid: TileGrid) -> Self {
        Self::new(grid.to_pixel(tile), size, grid)
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn tile(&self) -> IVec2 {
        self.tile
    }

    pub fn grid(&self) -> TileGrid {
        self.grid
    }

    pub fn set(&mut self, pos: Vec2) {
        self.pos = pos;
        self.tile = self.grid.to_tile(pos);
    }

    pub fn set_x(&mut self, x: f32) {
        self.set(Vec2::new(x, self.pos.y));
    }

    pub fn set_y(&mut self, y: f32) {
        self.set(Vec2::new(self.pos.x, y));
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Whether `tile` lies strictly closer than `radius` tiles to this entity's tile.
    pub fn in_range(&self, tile: IVec2, radius: f32) -> bool {
        self.tile.as_vec2().distance(tile.as_vec2()) < radius
    }
}

/// Velocity and movement parameters, in pixels per second.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub velocity: Vec2,
    pub speed: f32,
    /// Downward acceleration, in pixels per second squared.
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Jump impulse for entities that can jump (negative is up).
    pub jump_velocity: f32,
    /// Sprite rotation, for entities flagged as rotatable.
    pub rotation: Option<f32>,
}

impl Movement {
    pub fn new(speed: f32, gravity: f32, max_fall_speed: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            speed,
            gravity,
            max_fall_speed,
            jump_velocity: 0.0,
            rotation: None,
        }
    }

    pub fn with_jump(mut self, jump_velocity: f32) -> Self {
        self.jump_velocity = jump_velocity;
        self
    }
}

/// Hit points, clamped to `[0, max]` on every write.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    hp: f32,
    max_hp: f32,
    prev_hp: f32,
}

impl Health {
    pub fn new(hp: f32, max_hp: f32) -> Self {
        let hp = hp.clamp(0.0, max_hp);
        Self { hp, max_hp, prev_hp: hp }
    }

    pub fn full(max_hp: f32) -> Self {
        Self::new(max_hp, max_hp)
    }

    pub fn hp(&self) -> f32 {
        self.hp
    }

    pub fn max_hp(&self) -> f32 {
        self.max_hp
    }

    /// HP at the end of the previous frame.
    pub fn prev_hp(&self) -> f32 {
        self.prev_hp
    }

    pub fn set_hp(&mut self, hp: f32) {
        self.hp = hp.clamp(0.0, self.max_hp);
    }

    pub fn damage(&mut self, amount: f32) {
        self.set_hp(self.hp - amount);
    }

    pub fn heal(&mut self, amount: f32) {
        self.set_hp(self.hp + amount);
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    pub fn took_damage(&self) -> bool {
        self.hp < self.prev_hp
    }

    /// Records the current HP as the previous-frame value.
    pub fn snapshot(&mut self) {
        self.prev_hp = self.hp;
    }
}

/// A fixed-size set of item slots, the first `hotbar_size` of which are selectable.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Inventory {
    slots: Vec<Option<Entity>>,
    hotbar_size: usize,
    equipped: usize,
    /// Cooldown of the most recently used item, in milliseconds.
    pub cooldown_ms: u64,
    /// Clock tick of the most recent use.
    pub last_used: u64,
    pub on_cooldown: bool,
}

impl Inventory {
    pub fn new(size: usize, hotbar_size: usize) -> Self {
        Self {
            slots: vec![None; size],
            hotbar_size: hotbar_size.min(size),
            equipped: 0,
            cooldown_ms: 0,
            last_used: 0,
            on_cooldown: false,
        }
    }

    pub fn slots(&self) -> &[Option<Entity>] {
        &self.slots
    }

    pub fn hotbar_size(&self) -> usize {
        self.hotbar_size
    }

    pub fn equipped_index(&self) -> usize {
        self.equipped
    }

    pub fn equipped(&self) -> Option<Entity> {
        self.slots.get(self.equipped).copied().flatten()
    }

    /// Equips a hotbar slot. Returns false if `index` is outside the hotbar.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.hotbar_size {
            self.equipped = index;
            true
        } else {
            false
        }
    }

    pub fn available_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Stores `item` in the first free slot, returning the slot index.
    pub fn insert(&mut self, item: Entity) -> Option<usize> {
        let index = self.available_slot()?;
        self.slots[index] = Some(item);
        Some(index)
    }

    pub fn set_slot(&mut self, index: usize, item: Option<Entity>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = item;
        }
    }

    /// Clears whichever slot holds `item`.
    pub fn remove_item(&mut self, item: Entity) -> Option<usize> {
        let index = self.slots.iter().position(|slot| *slot == Some(item))?;
        self.slots[index] = None;
        Some(index)
    }

    pub fn contains(&self, item: Entity) -> bool {
        self.slots.contains(&Some(item))
    }

    /// Whether the last item's cooldown has fully elapsed at `now`.
    pub fn ready(&self, now: u64) -> bool {
        now.saturating_sub(self.last_used) > self.cooldown_ms
    }
}

/// Time elapsed since the previous frame, in seconds.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct DeltaTime(pub f32);

/// Global game state that affects the overall behavior of the game loop.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GlobalState {
    pub exit: bool,
}
