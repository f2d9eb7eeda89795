//! Item components and the item-usage state they share.

use bevy_ecs::{component::Component, entity::Entity};
use glam::Vec2;
use strum_macros::IntoStaticStr;

use crate::geometry::Rect;
use crate::systems::components::Inventory;

/// Common state of every item, carried or lying in the world.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    /// Minimum time between uses, in milliseconds.
    pub cooldown_ms: u64,
    pub owner: Option<Entity>,
    /// Set when the wielder triggers the item, cleared by the item's own behaviour.
    pub used: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, cooldown_ms: u64) -> Self {
        Self {
            name: name.into(),
            cooldown_ms,
            owner: None,
            used: false,
        }
    }

    /// Triggers the item and starts the wielder's cooldown.
    pub fn use_with(&mut self, inventory: &mut Inventory, now: u64) {
        self.used = true;
        inventory.cooldown_ms = self.cooldown_ms;
        inventory.last_used = now;
        inventory.on_cooldown = true;
    }
}

/// Where an item is drawn: in the world, or in its owner's hand.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ItemPosition {
    pub pos: Vec2,
    pub in_inventory: bool,
}

impl ItemPosition {
    pub fn in_world(pos: Vec2) -> Self {
        Self { pos, in_inventory: false }
    }
}

/// Sprite metrics of an item.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ItemGraphics {
    /// Sprite size when held.
    pub size: Vec2,
    /// Width and height of the held sprite's visible bounds, used for hand placement.
    pub bound_size: Vec2,
    /// Size when lying in the world, also its pickup area.
    pub world_size: Vec2,
    /// Held sprite rotation, in degrees.
    pub rotation: f32,
}

impl ItemGraphics {
    pub fn new(size: Vec2, bound_size: Vec2) -> Self {
        Self {
            size,
            bound_size,
            world_size: size,
            rotation: 0.0,
        }
    }

    pub fn world_rect(&self, position: &ItemPosition) -> Rect {
        Rect::from_pos_size(position.pos, self.world_size)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MeleeWeapon {
    pub attack_damage: f32,
    /// Latched once the current swing has damaged something.
    pub hit: bool,
}

impl MeleeWeapon {
    pub fn new(attack_damage: f32) -> Self {
        Self { attack_damage, hit: false }
    }
}

/// Phase of a sword swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoStaticStr)]
pub enum SwingState {
    #[default]
    Inactive,
    Swinging,
    /// The swing just completed; the sword returns to rest this frame.
    Reset,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct SlashingSword {
    /// Current swing angle in degrees; negative sweeps clockwise on screen.
    pub angle: f32,
    /// Hitbox of the rotated sprite.
    pub rect: Rect,
    pub state: SwingState,
}

impl SlashingSword {
    /// Whether the swing has passed `limit` degrees in the direction given by `sign`.
    pub fn swing_complete(&self, sign: f32, limit: f32) -> bool {
        if sign > 0.0 {
            self.angle <= -limit
        } else {
            self.angle >= limit
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RangedWeapon {
    pub projectile_damage: f32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GravityBow {
    /// Launch speed, in pixels per frame.
    pub launch_speed: f32,
    /// Per-frame gravity given to fired projectiles.
    pub gravity: f32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Consumable {
    pub total_uses: u32,
    pub uses_left: u32,
    /// Latched once the current use has been applied.
    pub consumed: bool,
}

impl Consumable {
    pub fn new(uses: u32) -> Self {
        Self {
            total_uses: uses,
            uses_left: uses,
            consumed: false,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HealthPotion {
    pub heal_power: f32,
}

/// How an item behaves when used, fixed when the item is created.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum ItemArchetype {
    SlashingSword,
    GravityBow,
    HealthPotion,
}

/// The broad capability an archetype provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Melee,
    Ranged,
    Consumable,
}

impl ItemArchetype {
    pub fn capability(self) -> Capability {
        match self {
            ItemArchetype::SlashingSword => Capability::Melee,
            ItemArchetype::GravityBow => Capability::Ranged,
            ItemArchetype::HealthPotion => Capability::Consumable,
        }
    }
}
