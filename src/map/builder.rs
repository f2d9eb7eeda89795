//! Level construction: turns a parsed layout into tile entities, the tile map index and
//! the level's inhabitants.

use bevy_ecs::{entity::Entity, world::World};
use tracing::{debug, info};

use crate::error::GameResult;
use crate::geometry::TileGrid;
use crate::map::parser::{LevelTile, ParsedLevel, Spawn};
use crate::map::tiles::{Sign, Tile, TileKind, TileMap};
use crate::settings::Settings;
use crate::systems::bundles::{self, give_item, PlayerBundle};

/// Entities created by [`spawn_level`].
#[derive(Debug, Clone)]
pub struct LevelEntities {
    pub player: Entity,
    pub mobs: Vec<Entity>,
    /// Items lying in the world, plus those handed out at spawn.
    pub items: Vec<Entity>,
    pub tiles: usize,
}

/// Spawns a parsed level into `world` and installs its [`TileMap`] resource.
///
/// Sign tiles take their text from `signs` in reading order; extra signs are left blank.
/// The player and every follower start with a sword equipped.
pub fn spawn_level(world: &mut World, level: &ParsedLevel, settings: &Settings, signs: &[&str]) -> GameResult<LevelEntities> {
    let grid = TileGrid::default();
    let mut map = TileMap::new(grid, level.width as u32, level.height as u32);
    let mut sign_texts = signs.iter();
    let mut tiles = 0;

    for (coords, tile) in level.placed_tiles() {
        let (kind, sign) = match tile {
            LevelTile::Empty => continue,
            LevelTile::Terrain(kind) => (kind, None),
            LevelTile::Sign => {
                let text = sign_texts.next().map(|text| text.to_string()).unwrap_or_default();
                (TileKind::INTERACTABLE, Some(Sign { text }))
            }
        };

        let mut entity = world.spawn(Tile {
            coords,
            layer: 0,
            rect: grid.tile_rect(coords),
            kind,
        });
        if let Some(sign) = sign {
            entity.insert(sign);
        }
        let entity = entity.id();
        map.insert(0, coords, kind, Some(entity))?;
        tiles += 1;
    }
    world.insert_resource(map);

    let player = world.spawn(PlayerBundle::new(level.player_start, grid, settings)).id();
    let sword = world.spawn(bundles::sword(grid.to_pixel(level.player_start))).id();
    give_item(world, player, sword)?;
    let mut spawned = LevelEntities {
        player,
        mobs: Vec::new(),
        items: vec![sword],
        tiles,
    };

    for &(spawn, tile) in &level.spawns {
        let pos = grid.to_pixel(tile);
        match spawn {
            Spawn::Walker => spawned.mobs.push(world.spawn(bundles::walker(tile, grid, settings)).id()),
            Spawn::Archer => spawned.mobs.push(world.spawn(bundles::archer(tile, grid, settings)).id()),
            Spawn::Follower => {
                let mob = world.spawn(bundles::follower(tile, grid, settings, player)).id();
                let sword = world.spawn(bundles::sword(pos)).id();
                give_item(world, mob, sword)?;
                spawned.mobs.push(mob);
                spawned.items.push(sword);
            }
            Spawn::HealthPotion => spawned.items.push(world.spawn(bundles::health_potion(pos)).id()),
            Spawn::Bow => spawned.items.push(world.spawn(bundles::bow(pos)).id()),
        }
        debug!(spawn = ?spawn, tile = ?tile, "Spawned");
    }

    info!(
        width = level.width,
        height = level.height,
        tiles = spawned.tiles,
        mobs = spawned.mobs.len(),
        items = spawned.items.len(),
        "Level loaded"
    );
    Ok(spawned)
}
