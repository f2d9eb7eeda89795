use bevy_ecs::{entity::Entity, query::With, system::RunSystemOnce, world::World};
use glam::{IVec2, Vec2};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use tileclash::{
    error::{EntityError, GameError},
    events::ParticleEvent,
    geometry::{Facing, TileGrid},
    input::{FrameInput, InputEvent, MouseButton},
    systems::{
        bundles,
        combat::combat_system,
        item::{Consumable, ItemGraphics, SlashingSword, SwingState},
        Effects, Health, Inventory, Item, ItemArchetype, ItemPosition, Position, Projectile,
    },
};

mod common;

/// A 32px target standing flush against the right side of a player at tile (3, 7).
fn spawn_target(world: &mut World, player: Entity) -> Entity {
    let player_rect = world.get::<Position>(player).unwrap().rect();
    world
        .spawn((
            Position::new(Vec2::new(player_rect.right(), player_rect.y), Vec2::splat(32.0), TileGrid::default()),
            Health::full(100.0),
        ))
        .id()
}

fn use_item(world: &mut World, item: Entity) {
    world.get_mut::<Item>(item).unwrap().used = true;
}

fn swing_frames(world: &World) -> usize {
    let settings = world.resource::<tileclash::settings::Settings>();
    (settings.combat.swing_limit / settings.combat.swing_step).ceil() as usize
}

#[test]
fn test_sword_swing_damages_target_once() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));
    let sword = common::equip(&mut world, player, bundles::sword(Vec2::ZERO));
    let target = spawn_target(&mut world, player);

    use_item(&mut world, sword);
    for _ in 0..swing_frames(&world) {
        common::run(&mut world, combat_system);
    }

    assert_eq!(world.get::<Health>(target).unwrap().hp(), 80.0);
    assert_that(&world.get::<Item>(sword).unwrap().used).is_false();
    assert_eq!(world.get::<SlashingSword>(sword).unwrap().state, SwingState::Reset);
    assert_that(&common::particles(&mut world)).has_length(1);
}

#[test]
fn test_each_swing_hits_again() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));
    let sword = common::equip(&mut world, player, bundles::sword(Vec2::ZERO));
    let target = spawn_target(&mut world, player);
    let frames = swing_frames(&world);

    for _ in 0..2 {
        use_item(&mut world, sword);
        for _ in 0..frames {
            common::run(&mut world, combat_system);
        }
    }

    assert_eq!(world.get::<Health>(target).unwrap().hp(), 60.0);
}

#[test]
fn test_idle_sword_is_held_beside_wielder() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));
    let sword = common::equip(&mut world, player, bundles::sword(Vec2::ZERO));
    let target = spawn_target(&mut world, player);

    common::run(&mut world, combat_system);

    let body = world.get::<Position>(player).unwrap().rect();
    let held = world.get::<ItemPosition>(sword).unwrap();
    assert_eq!(held.pos.x, body.right() - 6.0);
    assert_eq!(held.pos.y, body.y - 16.0);
    assert_eq!(world.get::<Health>(target).unwrap().hp(), 100.0);

    world.get_mut::<Position>(player).unwrap().facing = Facing::Left;
    common::run(&mut world, combat_system);
    let bound = world.get::<ItemGraphics>(sword).unwrap().bound_size.x;
    assert_eq!(world.get::<ItemPosition>(sword).unwrap().pos.x, body.left() - bound + 6.0);
}

#[test]
fn test_last_potion_use_deletes_item() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));
    let potion = common::equip(&mut world, player, bundles::health_potion(Vec2::ZERO));
    world.get_mut::<Health>(player).unwrap().damage(50.0);
    assert_eq!(world.get::<Consumable>(potion).unwrap().uses_left, 1);

    use_item(&mut world, potion);
    common::run(&mut world, combat_system);

    assert_eq!(world.get::<Health>(player).unwrap().hp(), 95.0);
    assert_that(&world.get_entity(potion).is_err()).is_true();
    let inventory = world.get::<Inventory>(player).unwrap();
    assert_eq!(inventory.slots()[0], None);
    assert_eq!(inventory.equipped(), None);
    assert_that(&world.resource::<Effects>().get(player).is_some()).is_true();

    let particles = common::particles(&mut world);
    assert_that(&particles).has_length(1);
    assert!(matches!(particles[0], ParticleEvent::Burst { count: 8, .. }));
}

#[test]
fn test_bow_fires_toward_pointer() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));
    let bow = common::equip(&mut world, player, bundles::bow(Vec2::ZERO));
    let aim = world.get::<Position>(player).unwrap().center() + Vec2::new(300.0, 0.0);
    common::set_input(
        &mut world,
        FrameInput {
            pointer: aim,
            ..FrameInput::default()
        },
    );

    use_item(&mut world, bow);
    common::run(&mut world, combat_system);

    let projectiles: Vec<Projectile> = world.query::<&Projectile>().iter(&world).copied().collect();
    assert_that(&projectiles).has_length(1);
    assert_eq!(projectiles[0].shooter, Some(player));
    assert_eq!(projectiles[0].damage, 30.0);
    assert_that(&projectiles[0].velocity.x).is_greater_than(0.0);
    assert_that(&world.get::<Item>(bow).unwrap().used).is_false();

    // An unused bow fires nothing
    common::run(&mut world, combat_system);
    assert_eq!(world.query::<&Projectile>().iter(&world).count(), 1);
}

#[test]
fn test_bow_aims_at_click_position() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));
    let bow = common::equip(&mut world, player, bundles::bow(Vec2::ZERO));
    let click = world.get::<Position>(player).unwrap().center() + Vec2::new(300.0, 0.0);

    // Host-built snapshot: the pointer field is left at the screen origin
    common::set_input(
        &mut world,
        FrameInput {
            events: vec![InputEvent::MouseDown {
                button: MouseButton::Left,
                pos: click,
            }],
            ..FrameInput::default()
        },
    );

    use_item(&mut world, bow);
    common::run(&mut world, combat_system);

    let projectiles: Vec<Projectile> = world.query::<&Projectile>().iter(&world).copied().collect();
    assert_that(&projectiles).has_length(1);
    assert_that(&projectiles[0].velocity.x).is_greater_than(0.0);
    assert_that(&projectiles[0].velocity.y.abs()).is_less_than(projectiles[0].velocity.x);
}

#[test]
fn test_stale_slot_is_cleared() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));
    let sword = common::equip(&mut world, player, bundles::sword(Vec2::ZERO));
    world.despawn(sword);

    common::run(&mut world, combat_system);

    assert_eq!(world.get::<Inventory>(player).unwrap().equipped(), None);
}

#[test]
fn test_archetype_without_capability_aborts() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));
    let broken = common::equip(
        &mut world,
        player,
        (
            Item::new("broken", 0),
            ItemPosition::in_world(Vec2::ZERO),
            ItemGraphics::new(Vec2::splat(16.0), Vec2::splat(16.0)),
            ItemArchetype::SlashingSword,
        ),
    );

    let result = world.run_system_once(combat_system).expect("System should run successfully");

    assert!(matches!(
        result,
        Err(GameError::Entity(EntityError::MissingComponent { entity, .. })) if entity == broken
    ));
}

#[test]
fn test_only_equipped_item_acts() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, IVec2::new(3, 7));
    let _sword = common::equip(&mut world, player, bundles::sword(Vec2::ZERO));
    let bow = common::equip(&mut world, player, bundles::bow(Vec2::ZERO));

    use_item(&mut world, bow);
    common::run(&mut world, combat_system);

    assert_that(&world.get::<Item>(bow).unwrap().used).is_true();
    assert_eq!(world.query_filtered::<Entity, With<Projectile>>().iter(&world).count(), 0);
}
