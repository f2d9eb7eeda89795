//! Item usage: sword swings, bow shots and potions.

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::Has,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::camera::Camera;
use crate::clock::GameClock;
use crate::constants::{items, particles as colors};
use crate::ecs::store::short_type_name;
use crate::error::{EntityError, GameResult};
use crate::events::ParticleEvent;
use crate::geometry::{rotate_about_pivot, Facing, Rect};
use crate::input::{FrameInput, MouseButton};
use crate::map::TileMap;
use crate::settings::Settings;
use crate::systems::components::{Health, Inventory, PlayerControlled, Position};
use crate::systems::effect::{Effect, EffectKind, Effects};
use crate::systems::item::{
    Capability, Consumable, GravityBow, HealthPotion, Item, ItemArchetype, ItemGraphics, ItemPosition, MeleeWeapon,
    RangedWeapon, SlashingSword, SwingState,
};
use crate::systems::projectile::{Projectile, ProjectileBundle};

/// Places a held item beside its wielder, bobbing gently over time.
///
/// Returns the rotation pivot relative to the sprite's top-left corner.
pub fn hold_item(wielder: &Position, position: &mut ItemPosition, graphics: &ItemGraphics, now: u64) -> Vec2 {
    let body = wielder.rect();
    let pivot = match wielder.facing {
        Facing::Right => {
            position.pos.x = body.right();
            Vec2::new(0.0, graphics.size.y)
        }
        Facing::Left => {
            position.pos.x = body.left() - graphics.bound_size.x;
            Vec2::new(graphics.bound_size.x, graphics.size.y)
        }
    };
    position.pos.y = body.y + (now as f32 / items::BOB_PERIOD).sin() * items::BOB_AMPLITUDE;
    pivot
}

/// Burst shown where a blow lands; larger and darker when it kills.
fn hit_burst(at: Vec2, killed: bool) -> ParticleEvent {
    if killed {
        ParticleEvent::burst(at, colors::DEATH_COUNT, &colors::DEATH)
    } else {
        ParticleEvent::burst(at, colors::HIT_COUNT, &[colors::BLOOD])
    }
}

fn missing<C>(entity: Entity) -> EntityError {
    EntityError::MissingComponent {
        entity,
        component: short_type_name::<C>(),
    }
}

/// Drives each wielder's equipped item for one frame.
///
/// Every wielder handles only its equipped item, and wielders do not affect one another
/// except through damage.
#[allow(clippy::too_many_arguments)]
pub fn combat_system(
    mut commands: Commands,
    clock: Res<GameClock>,
    camera: Res<Camera>,
    input: Res<FrameInput>,
    settings: Res<Settings>,
    map: Res<TileMap>,
    mut effects: ResMut<Effects>,
    mut particles: EventWriter<ParticleEvent>,
    mut wielders: Query<(Entity, &Position, &mut Inventory, Has<PlayerControlled>)>,
    mut items: Query<(&mut Item, &mut ItemPosition, &mut ItemGraphics, &ItemArchetype)>,
    mut swords: Query<(&mut MeleeWeapon, &mut SlashingSword)>,
    bows: Query<(&RangedWeapon, &GravityBow)>,
    mut potions: Query<(&mut Consumable, &HealthPotion)>,
    mut targets: Query<(Entity, &Position, &mut Health)>,
) -> GameResult<()> {
    let now = clock.ticks();
    let tile_height = map.grid().tile_size.y;

    for (wielder, position, mut inventory, is_player) in wielders.iter_mut() {
        let Some(equipped) = inventory.equipped() else {
            continue;
        };
        let Ok((mut item, mut item_position, mut graphics, archetype)) = items.get_mut(equipped) else {
            warn!(wielder = ?wielder, item = ?equipped, "Clearing inventory slot of a missing item");
            inventory.remove_item(equipped);
            continue;
        };

        let pivot = hold_item(position, &mut item_position, &graphics, now);
        if archetype.capability() == Capability::Melee {
            item_position.pos.y -= graphics.size.y / 2.0;
        }

        match archetype {
            ItemArchetype::SlashingSword => {
                let (mut melee, mut sword) = swords.get_mut(equipped).map_err(|_| missing::<SlashingSword>(equipped))?;
                let sign = position.facing.sign();
                item_position.pos.x -= sign * items::SWORD_HOLD_OFFSET;

                if !item.used {
                    sword.state = SwingState::Inactive;
                    sword.angle = 0.0;
                    sword.rect = Rect::from_pos_size(item_position.pos, graphics.size);
                    graphics.rotation = 0.0;
                    continue;
                }

                if sword.state != SwingState::Swinging {
                    sword.state = SwingState::Swinging;
                    melee.hit = false;
                    trace!(wielder = ?wielder, "Swing started");
                }

                sword.angle -= settings.combat.swing_step * sign;
                let hitbox = rotate_about_pivot(graphics.size, item_position.pos, pivot, sword.angle);
                sword.rect = hitbox;
                graphics.rotation = sword.angle;

                let left_offset = if position.facing == Facing::Left {
                    items::SWORD_LEFT_SWING_OFFSET
                } else {
                    0.0
                };
                item_position.pos = Vec2::new(hitbox.x + left_offset, hitbox.y + tile_height);

                if !melee.hit {
                    let struck = targets
                        .iter_mut()
                        .find(|(target, target_position, _)| *target != wielder && hitbox.overlaps(&target_position.rect()));
                    if let Some((target, target_position, mut health)) = struck {
                        melee.hit = true;
                        health.damage(melee.attack_damage);
                        particles.write(hit_burst(target_position.center(), health.is_dead()));
                        debug!(wielder = ?wielder, target = ?target, damage = melee.attack_damage, hp = health.hp(), "Sword hit");
                    }
                }

                if sword.swing_complete(sign, settings.combat.swing_limit) {
                    sword.state = SwingState::Reset;
                    sword.angle = 0.0;
                    graphics.rotation = 0.0;
                    hold_item(position, &mut item_position, &graphics, now);
                    item_position.pos.y -= tile_height / 2.0;
                    sword.rect = Rect::from_pos_size(item_position.pos, graphics.size);
                    item.used = false;
                    melee.hit = false;
                    trace!(wielder = ?wielder, "Swing finished");
                }
            }
            ItemArchetype::GravityBow => {
                let (ranged, bow) = bows.get(equipped).map_err(|_| missing::<GravityBow>(equipped))?;
                if !item.used {
                    continue;
                }

                let origin = item_position.pos;
                let angle = if is_player {
                    let target = input.clicked(MouseButton::Left).unwrap_or(input.pointer);
                    let aim = camera.unapply_point(target) - origin;
                    aim.y.atan2(aim.x)
                } else if position.facing == Facing::Right {
                    0.0
                } else {
                    std::f32::consts::PI
                };

                let projectile = Projectile::launch(bow.launch_speed, angle, ranged.projectile_damage, Some(wielder), bow.gravity);
                commands.spawn(ProjectileBundle::new(projectile, origin, items::ARROW_SIZE, map.grid()));
                item.used = false;
                debug!(wielder = ?wielder, angle, damage = ranged.projectile_damage, "Arrow fired");
            }
            ItemArchetype::HealthPotion => {
                let (mut consumable, potion) = potions.get_mut(equipped).map_err(|_| missing::<HealthPotion>(equipped))?;
                if !item.used {
                    consumable.consumed = false;
                    continue;
                }
                if consumable.consumed {
                    continue;
                }

                consumable.consumed = true;
                consumable.uses_left = consumable.uses_left.saturating_sub(1);
                item.used = false;

                let owner = item.owner.unwrap_or(wielder);
                if let Ok((_, owner_position, mut health)) = targets.get_mut(owner) {
                    health.heal(potion.heal_power);
                    particles.write(ParticleEvent::burst(owner_position.center(), colors::HEAL_COUNT, &[colors::WHITE]));
                    debug!(owner = ?owner, heal = potion.heal_power, hp = health.hp(), "Potion drunk");
                }
                effects.add(
                    owner,
                    Effect::builder(EffectKind::Regen)
                        .heal(items::REGEN_HEAL)
                        .duration(
                            Duration::from_millis(items::REGEN_DURATION_MS),
                            Duration::from_millis(items::REGEN_INTERVAL_MS),
                        )
                        .build(now),
                );

                if consumable.uses_left == 0 {
                    inventory.remove_item(equipped);
                    commands.entity(equipped).try_despawn();
                    debug!(owner = ?owner, item = %item.name, "Consumable used up");
                }
            }
        }
    }

    Ok(())
}
