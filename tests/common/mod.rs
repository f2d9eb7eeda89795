#![allow(dead_code)]

use bevy_ecs::{
    entity::Entity,
    event::Events,
    system::{IntoSystem, RunSystemOnce},
    world::World,
};
use glam::{IVec2, Vec2};
use tileclash::{
    camera::Camera,
    clock::GameClock,
    constants::VIEWPORT_SIZE,
    error::GameResult,
    events::{GameEvent, ParticleEvent},
    geometry::TileGrid,
    input::{Bindings, FrameInput},
    map::{TileKind, TileMap},
    settings::Settings,
    systems::{
        bundles::{give_item, PlayerBundle},
        DeltaTime, Effects, GlobalState, ProjectileRules,
    },
};

pub const DT: f32 = 1.0 / 60.0;

/// A world holding every resource the systems read, with an empty 32x12 map.
pub fn create_test_world() -> World {
    let mut world = World::new();
    world.init_resource::<Events<GameEvent>>();
    world.init_resource::<Events<ParticleEvent>>();
    world.insert_resource(GameClock::default());
    world.insert_resource(Camera::new(VIEWPORT_SIZE));
    world.insert_resource(Effects::default());
    world.insert_resource(ProjectileRules::default());
    world.insert_resource(Bindings::default());
    world.insert_resource(GlobalState::default());
    world.insert_resource(FrameInput::default());
    world.insert_resource(Settings::default());
    world.insert_resource(DeltaTime(DT));
    world.insert_resource(TileMap::new(TileGrid::default(), 32, 12));
    world
}

/// Fills row `y` of the map with solid tiles.
pub fn add_floor(world: &mut World, y: i32) {
    let mut map = world.resource_mut::<TileMap>();
    for x in 0..map.width() as i32 {
        map.insert(0, IVec2::new(x, y), TileKind::SOLID, None).expect("floor tile should fit the map");
    }
}

pub fn add_tile(world: &mut World, coords: IVec2, kind: TileKind) {
    world
        .resource_mut::<TileMap>()
        .insert(0, coords, kind, None)
        .expect("tile should fit the map");
}

pub fn spawn_test_player(world: &mut World, tile: IVec2) -> Entity {
    let settings = world.resource::<Settings>().clone();
    world.spawn(PlayerBundle::new(tile, TileGrid::default(), &settings)).id()
}

/// Spawns an item bundle and hands it to `owner`.
pub fn equip(world: &mut World, owner: Entity, bundle: impl bevy_ecs::bundle::Bundle) -> Entity {
    let item = world.spawn(bundle).id();
    give_item(world, owner, item)
        .expect("owner should have an inventory")
        .expect("inventory should have room");
    item
}

pub fn advance_clock(world: &mut World, ms: u64) {
    world
        .resource_mut::<GameClock>()
        .advance(std::time::Duration::from_millis(ms));
}

pub fn set_input(world: &mut World, input: FrameInput) {
    world.insert_resource(input);
}

/// Runs a system once, panicking if it cannot run or returns an error.
pub fn run<S, M>(world: &mut World, system: S)
where
    S: IntoSystem<(), GameResult<()>, M>,
{
    world
        .run_system_once(system)
        .expect("System should run successfully")
        .expect("System should not fail");
}

pub fn game_events(world: &mut World) -> Vec<GameEvent> {
    world.resource_mut::<Events<GameEvent>>().drain().collect()
}

pub fn particles(world: &mut World) -> Vec<ParticleEvent> {
    world.resource_mut::<Events<ParticleEvent>>().drain().collect()
}

pub fn tile_pos(tile: IVec2) -> Vec2 {
    TileGrid::default().to_pixel(tile)
}
