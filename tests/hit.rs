use glam::{IVec2, Vec2};
use speculoos::prelude::*;
use tileclash::{
    events::GameEvent,
    geometry::TileGrid,
    settings::Settings,
    systems::{bundles, hit::hit_system, Health},
};

mod common;

#[test]
fn test_lethal_damage_despawns_mob_and_its_items() {
    let mut world = common::create_test_world();
    let settings = world.resource::<Settings>().clone();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));
    let follower = world
        .spawn(bundles::follower(IVec2::new(8, 7), TileGrid::default(), &settings, player))
        .id();
    let sword = common::equip(&mut world, follower, bundles::sword(Vec2::ZERO));

    world.get_mut::<Health>(follower).unwrap().damage(1000.0);
    common::run(&mut world, hit_system);

    assert_that(&world.get_entity(follower).is_err()).is_true();
    assert_that(&world.get_entity(sword).is_err()).is_true();
    assert_that(&common::game_events(&mut world)).contains(GameEvent::EntityDied(follower));
}

#[test]
fn test_player_death_is_reported_but_not_despawned() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));

    world.get_mut::<Health>(player).unwrap().damage(1000.0);
    common::run(&mut world, hit_system);

    assert_that(&world.get_entity(player).is_ok()).is_true();
    assert_that(&common::game_events(&mut world)).contains(GameEvent::EntityDied(player));
}

#[test]
fn test_death_is_reported_once() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));

    world.get_mut::<Health>(player).unwrap().damage(1000.0);
    common::run(&mut world, hit_system);
    common::run(&mut world, hit_system);

    assert_that(&common::game_events(&mut world)).has_length(1);
}

#[test]
fn test_snapshot_tracks_damage() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));

    world.get_mut::<Health>(player).unwrap().damage(10.0);
    assert_that(&world.get::<Health>(player).unwrap().took_damage()).is_true();
    common::run(&mut world, hit_system);

    let health = world.get::<Health>(player).unwrap();
    assert_that(&health.took_damage()).is_false();
    assert_that(&health.prev_hp()).is_equal_to(90.0);
    assert_that(&common::game_events(&mut world)).is_empty();
}
