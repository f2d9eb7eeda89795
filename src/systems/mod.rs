//! The Entity-Component-System (ECS) module.
//!
//! This module contains the game's components, entity templates and the systems
//! the scheduler runs every frame.

pub mod bundles;
pub mod camera;
pub mod collision;
pub mod combat;
pub mod components;
pub mod effect;
pub mod hit;
pub mod input;
pub mod interaction;
pub mod item;
pub mod mob;
pub mod movement;
pub mod npc_combat;
pub mod projectile;

pub use self::components::{DeltaTime, Flags, GlobalState, Health, Inventory, MobKind, Movement, PlayerControlled, Position};
pub use self::effect::{Effect, EffectKind, Effects};
pub use self::item::{Item, ItemArchetype, ItemPosition};
pub use self::projectile::{Projectile, ProjectileRules};
