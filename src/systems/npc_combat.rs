//! Mob attacks against the player: contact hits, weapon swings and arrows.

use bevy_ecs::{
    entity::Entity,
    query::{With, Without},
    system::{Commands, Query, Res, ResMut},
};
use tracing::{debug, trace};

use crate::camera::Camera;
use crate::clock::GameClock;
use crate::constants::{items::ARROW_SIZE, mobs::CONTACT_SHAKE_FRAMES};
use crate::error::GameResult;
use crate::map::TileMap;
use crate::systems::components::{Health, Inventory, PlayerControlled, Position};
use crate::systems::item::Item;
use crate::systems::mob::{ballistic_angle, MeleeAttack, MeleeWeaponAttack, RangeAttack};
use crate::systems::projectile::{Projectile, ProjectileBundle};

#[allow(clippy::too_many_arguments)]
pub fn npc_combat_system(
    mut commands: Commands,
    clock: Res<GameClock>,
    map: Res<TileMap>,
    mut camera: ResMut<Camera>,
    mut players: Query<(Entity, &Position, &mut Health), With<PlayerControlled>>,
    mut brawlers: Query<(Entity, &Position, &mut MeleeAttack), Without<PlayerControlled>>,
    mut swordsmen: Query<(Entity, &Position, &mut Inventory, &MeleeWeaponAttack), Without<PlayerControlled>>,
    mut archers: Query<(Entity, &Position, &mut RangeAttack), Without<PlayerControlled>>,
    mut items: Query<&mut Item>,
) -> GameResult<()> {
    let now = clock.ticks();
    let Ok((player, target, mut health)) = players.single_mut() else {
        return Ok(());
    };

    for (mob, position, mut attack) in brawlers.iter_mut() {
        let in_reach = if attack.contact {
            position.rect().touches(&target.rect())
        } else {
            position.in_range(target.tile(), attack.range)
        };
        if !in_reach || !attack.ready(now) {
            continue;
        }

        attack.last_attack = Some(now);
        health.damage(attack.damage);
        camera.start_shake(CONTACT_SHAKE_FRAMES);
        debug!(mob = ?mob, player = ?player, damage = attack.damage, hp = health.hp(), "Mob struck the player");
    }

    for (mob, position, mut inventory, attack) in swordsmen.iter_mut() {
        if !position.in_range(target.tile(), attack.range) || !inventory.ready(now) {
            continue;
        }
        let Some(equipped) = inventory.equipped() else {
            continue;
        };
        if let Ok(mut item) = items.get_mut(equipped) {
            item.use_with(&mut inventory, now);
            trace!(mob = ?mob, item = %item.name, "Mob used its weapon");
        }
    }

    for (mob, position, mut attack) in archers.iter_mut() {
        if !attack.ready(now) || !position.in_range(target.tile(), attack.range) {
            continue;
        }

        let origin = position.center();
        let Some(angle) = ballistic_angle(origin, target.center(), attack.launch_speed, attack.gravity, attack.high_arc)
        else {
            trace!(mob = ?mob, "Player out of ballistic reach");
            continue;
        };

        attack.last_attack = Some(now);
        let projectile = Projectile::launch(attack.launch_speed, angle, attack.damage, Some(mob), attack.gravity);
        commands.spawn(ProjectileBundle::new(projectile, origin, ARROW_SIZE, map.grid()));
        debug!(mob = ?mob, angle, "Archer fired");
    }

    Ok(())
}
