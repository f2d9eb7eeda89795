//! Spawnable entity templates.

use bevy_ecs::{bundle::Bundle, entity::Entity, world::World};
use glam::{IVec2, Vec2};
use tracing::debug;

use crate::constants::{items, mobs};
use crate::ecs::ComponentStore;
use crate::error::{EntityError, GameResult};
use crate::geometry::TileGrid;
use crate::settings::Settings;
use crate::systems::components::{Flags, Health, Inventory, MobKind, Movement, PlayerControlled, Position};
use crate::systems::item::{
    Consumable, GravityBow, HealthPotion, Item, ItemArchetype, ItemGraphics, ItemPosition, MeleeWeapon, RangedWeapon,
    SlashingSword,
};
use crate::systems::mob::{Behavior, FollowsEntity, MeleeAttack, MeleeWeaponAttack, Patroller, RangeAttack};

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub movement: Movement,
    pub health: Health,
    pub inventory: Inventory,
    pub flags: Flags,
}

impl PlayerBundle {
    pub fn new(tile: IVec2, grid: TileGrid, settings: &Settings) -> Self {
        Self {
            player: PlayerControlled,
            position: Position::at_tile(tile, crate::constants::player::SIZE, grid),
            movement: Movement::new(settings.player.speed, settings.physics.gravity, settings.physics.max_fall_speed)
                .with_jump(settings.player.jump_velocity),
            health: Health::full(settings.player.max_hp),
            inventory: Inventory::new(settings.player.inventory_size, settings.player.hotbar_size),
            flags: Flags::new(MobKind::Player),
        }
    }
}

#[derive(Bundle)]
pub struct MobBundle {
    pub position: Position,
    pub movement: Movement,
    pub health: Health,
    pub flags: Flags,
}

impl MobBundle {
    pub fn new(kind: MobKind, tile: IVec2, grid: TileGrid, speed: f32, health: Health, settings: &Settings) -> Self {
        Self {
            position: Position::at_tile(tile, mobs::SIZE, grid),
            movement: Movement::new(speed, settings.physics.gravity, settings.physics.max_fall_speed),
            health,
            flags: Flags::new(kind),
        }
    }

    fn blocking_player(mut self) -> Self {
        self.flags.collide_with_player = true;
        self
    }
}

/// Patrols its platform and hurts the player on contact.
pub fn walker(tile: IVec2, grid: TileGrid, settings: &Settings) -> impl Bundle {
    (
        MobBundle::new(
            MobKind::Walker,
            tile,
            grid,
            mobs::WALKER_SPEED,
            Health::new(mobs::WALKER_HP, mobs::WALKER_MAX_HP),
            settings,
        )
        .blocking_player(),
        Patroller,
        MeleeAttack {
            range: 1.0,
            damage: mobs::WALKER_DAMAGE,
            cooldown_ms: mobs::WALKER_COOLDOWN_MS,
            contact: true,
            last_attack: None,
        },
    )
}

/// Chases `target` along its row and swings whatever it carries.
pub fn follower(tile: IVec2, grid: TileGrid, settings: &Settings, target: Entity) -> impl Bundle {
    (
        MobBundle::new(
            MobKind::Follower,
            tile,
            grid,
            mobs::FOLLOWER_SPEED,
            Health::full(mobs::FOLLOWER_HP),
            settings,
        ),
        Behavior::new(mobs::FOLLOWER_PATROL_SPEED, mobs::FOLLOWER_FLEE_SPEED, mobs::FOLLOWER_FLEE_MS),
        FollowsEntity {
            target,
            range: mobs::FOLLOWER_RANGE,
        },
        MeleeWeaponAttack {
            range: mobs::FOLLOWER_ATTACK_RANGE,
        },
        Inventory::new(1, 1),
    )
}

/// Stands still and lobs arrows at the player.
pub fn archer(tile: IVec2, grid: TileGrid, settings: &Settings) -> impl Bundle {
    (
        MobBundle::new(MobKind::Archer, tile, grid, 0.0, Health::full(mobs::ARCHER_HP), settings).blocking_player(),
        RangeAttack {
            range: mobs::ARCHER_RANGE,
            damage: mobs::ARCHER_DAMAGE,
            cooldown_ms: mobs::ARCHER_COOLDOWN_MS,
            launch_speed: mobs::ARCHER_LAUNCH_SPEED,
            gravity: mobs::ARCHER_GRAVITY,
            high_arc: false,
            last_attack: None,
        },
    )
}

#[derive(Bundle)]
pub struct ItemBundle {
    pub item: Item,
    pub position: ItemPosition,
    pub graphics: ItemGraphics,
    pub archetype: ItemArchetype,
}

impl ItemBundle {
    fn new(name: &str, cooldown_ms: u64, pos: Vec2, graphics: ItemGraphics, archetype: ItemArchetype) -> Self {
        Self {
            item: Item::new(name, cooldown_ms),
            position: ItemPosition::in_world(pos),
            graphics,
            archetype,
        }
    }
}

pub fn sword(pos: Vec2) -> impl Bundle {
    (
        ItemBundle::new(
            items::SWORD_NAME,
            items::SWORD_COOLDOWN_MS,
            pos,
            ItemGraphics::new(items::SWORD_SIZE, items::SWORD_BOUND_SIZE),
            ItemArchetype::SlashingSword,
        ),
        MeleeWeapon::new(items::SWORD_DAMAGE),
        SlashingSword::default(),
    )
}

pub fn bow(pos: Vec2) -> impl Bundle {
    (
        ItemBundle::new(
            items::BOW_NAME,
            items::BOW_COOLDOWN_MS,
            pos,
            ItemGraphics::new(items::BOW_SIZE, items::BOW_SIZE),
            ItemArchetype::GravityBow,
        ),
        RangedWeapon {
            projectile_damage: items::BOW_DAMAGE,
        },
        GravityBow {
            launch_speed: items::BOW_LAUNCH_SPEED,
            gravity: crate::constants::physics::PROJECTILE_GRAVITY,
        },
    )
}

pub fn health_potion(pos: Vec2) -> impl Bundle {
    (
        ItemBundle::new(
            items::POTION_NAME,
            items::POTION_COOLDOWN_MS,
            pos,
            ItemGraphics::new(items::POTION_SIZE, items::POTION_SIZE),
            ItemArchetype::HealthPotion,
        ),
        Consumable::new(items::POTION_USES),
        HealthPotion {
            heal_power: items::POTION_HEAL,
        },
    )
}

/// Moves `item` into the first free slot of `owner`'s inventory.
///
/// Returns the slot index, or `None` when the inventory is full.
pub fn give_item(world: &mut World, owner: Entity, item: Entity) -> GameResult<Option<usize>> {
    let Some(slot) = world.component_for_mut::<Inventory>(owner)?.insert(item) else {
        return Ok(None);
    };

    let mut entity = world.get_entity_mut(item).map_err(|_| EntityError::InvalidEntity(item))?;
    if let Some(mut carried) = entity.get_mut::<Item>() {
        carried.owner = Some(owner);
    }
    if let Some(mut position) = entity.get_mut::<ItemPosition>() {
        position.in_inventory = true;
    }

    debug!(owner = ?owner, item = ?item, slot, "Item given");
    Ok(Some(slot))
}
