use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use tileclash::{
    constants::items::SWORD_COOLDOWN_MS,
    events::{GameCommand, GameEvent},
    input::{FrameInput, InputEvent, Key, MouseButton},
    systems::{bundles, input::input_system, Inventory, Item},
};

mod common;

use common::*;

fn click() -> FrameInput {
    FrameInput::default().with_event(InputEvent::MouseDown {
        button: MouseButton::Left,
        pos: glam::Vec2::new(200.0, 100.0),
    })
}

#[test]
fn test_digit_selects_hotbar_slot() {
    let mut world = create_test_world();
    let player = spawn_test_player(&mut world, glam::IVec2::new(2, 2));

    set_input(&mut world, FrameInput::default().with_event(InputEvent::KeyDown(Key::Digit(3))));
    run(&mut world, input_system);
    assert_eq!(world.get::<Inventory>(player).unwrap().equipped_index(), 2);

    // Slot 9 lies outside the five-slot hotbar
    set_input(&mut world, FrameInput::default().with_event(InputEvent::KeyDown(Key::Digit(9))));
    run(&mut world, input_system);
    assert_eq!(world.get::<Inventory>(player).unwrap().equipped_index(), 2);
}

#[test]
fn test_click_uses_equipped_item() {
    let mut world = create_test_world();
    let player = spawn_test_player(&mut world, glam::IVec2::new(2, 2));
    let sword = equip(&mut world, player, bundles::sword(tile_pos(glam::IVec2::new(2, 2))));
    advance_clock(&mut world, 100);

    set_input(&mut world, click());
    run(&mut world, input_system);

    assert_that(&world.get::<Item>(sword).unwrap().used).is_true();
    let inventory = world.get::<Inventory>(player).unwrap();
    assert_that(&inventory.on_cooldown).is_true();
    assert_eq!(inventory.last_used, 100);
    assert_eq!(inventory.cooldown_ms, SWORD_COOLDOWN_MS);
}

#[test]
fn test_cooldown_blocks_second_use() {
    let mut world = create_test_world();
    let player = spawn_test_player(&mut world, glam::IVec2::new(2, 2));
    let sword = equip(&mut world, player, bundles::sword(tile_pos(glam::IVec2::new(2, 2))));
    advance_clock(&mut world, 100);

    set_input(&mut world, click());
    run(&mut world, input_system);
    world.get_mut::<Item>(sword).unwrap().used = false;

    advance_clock(&mut world, SWORD_COOLDOWN_MS / 2);
    run(&mut world, input_system);
    assert_that(&world.get::<Item>(sword).unwrap().used).is_false();

    // Once the cooldown has elapsed the flag clears even without a click
    advance_clock(&mut world, SWORD_COOLDOWN_MS);
    set_input(&mut world, FrameInput::default());
    run(&mut world, input_system);
    assert_that(&world.get::<Inventory>(player).unwrap().on_cooldown).is_false();

    set_input(&mut world, click());
    run(&mut world, input_system);
    assert_that(&world.get::<Item>(sword).unwrap().used).is_true();
}

#[test]
fn test_click_with_empty_hand_does_nothing() {
    let mut world = create_test_world();
    let player = spawn_test_player(&mut world, glam::IVec2::new(2, 2));
    advance_clock(&mut world, 100);

    set_input(&mut world, click());
    run(&mut world, input_system);

    assert_that(&world.get::<Inventory>(player).unwrap().on_cooldown).is_false();
}

#[test]
fn test_commands_are_republished() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, glam::IVec2::new(2, 2));

    set_input(
        &mut world,
        FrameInput::default()
            .with_event(InputEvent::KeyDown(Key::Space))
            .with_event(InputEvent::KeyDown(Key::P))
            .with_event(InputEvent::KeyUp(Key::Space)),
    );
    run(&mut world, input_system);

    assert_eq!(
        game_events(&mut world),
        vec![
            GameEvent::Command(GameCommand::Jump),
            GameEvent::Command(GameCommand::TogglePause)
        ]
    );
}

#[test]
fn test_commands_published_without_player() {
    let mut world = create_test_world();

    set_input(&mut world, FrameInput::default().with_event(InputEvent::Quit));
    run(&mut world, input_system);

    assert_eq!(game_events(&mut world), vec![GameEvent::Command(GameCommand::Exit)]);
}
