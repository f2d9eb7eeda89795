use glam::IVec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use tileclash::{
    events::ParticleEvent,
    geometry::{Facing, TileGrid},
    input::{FrameInput, InputEvent, Key},
    map::TileKind,
    settings::Settings,
    systems::{bundles, movement::velocity_system, Movement, Position},
};

mod common;

use common::*;

#[test]
fn test_player_walks_with_held_keys() {
    let mut world = create_test_world();
    let player = spawn_test_player(&mut world, IVec2::new(4, 4));
    let speed = world.resource::<Settings>().player.speed;

    set_input(&mut world, FrameInput::default().holding(Key::D));
    run(&mut world, velocity_system);
    assert_eq!(world.get::<Movement>(player).unwrap().velocity.x, speed);
    assert_eq!(world.get::<Position>(player).unwrap().facing, Facing::Right);

    set_input(&mut world, FrameInput::default().holding(Key::Left));
    run(&mut world, velocity_system);
    assert_eq!(world.get::<Movement>(player).unwrap().velocity.x, -speed);
    assert_eq!(world.get::<Position>(player).unwrap().facing, Facing::Left);

    // Releasing the keys stops the player but keeps the facing
    set_input(&mut world, FrameInput::default());
    run(&mut world, velocity_system);
    assert_eq!(world.get::<Movement>(player).unwrap().velocity.x, 0.0);
    assert_eq!(world.get::<Position>(player).unwrap().facing, Facing::Left);
}

#[test]
fn test_gravity_accumulates_while_airborne() {
    let mut world = create_test_world();
    let player = spawn_test_player(&mut world, IVec2::new(4, 4));
    let gravity = world.resource::<Settings>().physics.gravity;

    run(&mut world, velocity_system);
    run(&mut world, velocity_system);

    let velocity = world.get::<Movement>(player).unwrap().velocity.y;
    assert_that(&velocity).is_close_to(2.0 * gravity * DT, 1e-3);
}

#[test]
fn test_jump_requires_ground() {
    let mut world = create_test_world();
    let player = spawn_test_player(&mut world, IVec2::new(4, 4));
    let settings = world.resource::<Settings>().clone();
    let jump = FrameInput::default().with_event(InputEvent::KeyDown(Key::Space));

    set_input(&mut world, jump.clone());
    run(&mut world, velocity_system);
    assert_that(&world.get::<Movement>(player).unwrap().velocity.y).is_greater_than(0.0);
    assert_that(&particles(&mut world)).is_empty();

    world.get_mut::<Movement>(player).unwrap().velocity.y = 0.0;
    world.get_mut::<Position>(player).unwrap().on_ground = true;
    run(&mut world, velocity_system);

    let velocity = world.get::<Movement>(player).unwrap().velocity.y;
    assert_that(&velocity).is_close_to(settings.player.jump_velocity + settings.physics.gravity * DT, 1e-3);
    assert_that(&world.get::<Position>(player).unwrap().on_ground).is_false();
    let emitted = particles(&mut world);
    assert_eq!(emitted.len(), 1);
    assert_that(&matches!(emitted[0], ParticleEvent::Jump { .. })).is_true();
}

#[test]
fn test_walker_turns_at_wall() {
    let mut world = create_test_world();
    add_floor(&mut world, 5);
    add_tile(&mut world, IVec2::new(6, 4), TileKind::SOLID);
    let settings = world.resource::<Settings>().clone();
    let walker = world
        .spawn(bundles::walker(IVec2::new(5, 4), TileGrid::default(), &settings))
        .id();

    run(&mut world, velocity_system);

    let position = world.get::<Position>(walker).unwrap();
    assert_eq!(position.facing, Facing::Left);
    assert_that(&world.get::<Movement>(walker).unwrap().velocity.x).is_less_than(0.0);
}

#[test]
fn test_walker_keeps_going_on_open_floor() {
    let mut world = create_test_world();
    add_floor(&mut world, 5);
    let settings = world.resource::<Settings>().clone();
    let walker = world
        .spawn(bundles::walker(IVec2::new(5, 4), TileGrid::default(), &settings))
        .id();

    run(&mut world, velocity_system);

    assert_eq!(world.get::<Position>(walker).unwrap().facing, Facing::Right);
    assert_that(&world.get::<Movement>(walker).unwrap().velocity.x).is_greater_than(0.0);
}

#[test]
fn test_follower_chases_player_on_same_row() {
    let mut world = create_test_world();
    add_floor(&mut world, 5);
    let settings = world.resource::<Settings>().clone();
    let player = spawn_test_player(&mut world, IVec2::new(3, 4));
    let follower = world
        .spawn(bundles::follower(IVec2::new(7, 4), TileGrid::default(), &settings, player))
        .id();

    // First frame notices the player, second frame turns toward it
    run(&mut world, velocity_system);
    run(&mut world, velocity_system);

    assert_eq!(world.get::<Position>(follower).unwrap().facing, Facing::Left);
    assert_that(&world.get::<Movement>(follower).unwrap().velocity.x).is_less_than(0.0);
}
