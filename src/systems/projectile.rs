//! Ballistic projectiles fired by bows and archers.

use bevy_ecs::{
    bundle::Bundle,
    component::Component,
    entity::Entity,
    resource::Resource,
    system::{Commands, Query, Res},
};
use glam::{IVec2, Vec2};
use tracing::{debug, trace};

use crate::error::GameResult;
use crate::geometry::{Rect, TileGrid};
use crate::map::TileMap;
use crate::systems::components::{Health, Position};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Velocity in pixels per frame.
    pub velocity: Vec2,
    pub shooter: Option<Entity>,
    pub damage: f32,
    /// Launch angle in radians, screen space.
    pub launch_angle: f32,
    /// Added to the vertical velocity every frame.
    pub gravity: f32,
    /// Horizontal direction at launch: 1 for rightward, -1 otherwise.
    pub direction: f32,
}

impl Projectile {
    pub fn launch(speed: f32, angle: f32, damage: f32, shooter: Option<Entity>, gravity: f32) -> Self {
        Self {
            velocity: Vec2::from_angle(angle) * speed,
            shooter,
            damage,
            launch_angle: angle,
            gravity,
            direction: if angle.cos() > 0.0 { 1.0 } else { -1.0 },
        }
    }

    /// Sprite rotation in degrees for the current heading.
    ///
    /// The sprite points left at rest, so the heading is mirrored according to the
    /// launch direction rather than the current velocity.
    pub fn sprite_rotation(&self) -> f32 {
        let heading = 180.0 + self.velocity.y.atan2(self.velocity.x).to_degrees();
        if self.direction > 0.0 {
            180.0 - heading
        } else {
            heading * self.direction
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ProjectilePosition {
    pos: Vec2,
    tile: IVec2,
    grid: TileGrid,
    pub spawn_pos: Vec2,
}

impl ProjectilePosition {
    pub fn new(pos: Vec2, grid: TileGrid) -> Self {
        Self {
            pos,
            tile: grid.to_tile(pos),
            grid,
            spawn_pos: pos,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn tile(&self) -> IVec2 {
        self.tile
    }

    pub fn set(&mut self, pos: Vec2) {
        self.pos = pos;
        self.tile = self.grid.to_tile(pos);
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileGraphics {
    pub size: Vec2,
    /// Sprite rotation, in degrees.
    pub rotation: f32,
}

#[derive(Bundle)]
pub struct ProjectileBundle {
    pub projectile: Projectile,
    pub position: ProjectilePosition,
    pub graphics: ProjectileGraphics,
}

impl ProjectileBundle {
    pub fn new(projectile: Projectile, pos: Vec2, size: Vec2, grid: TileGrid) -> Self {
        Self {
            graphics: ProjectileGraphics {
                size,
                rotation: projectile.sprite_rotation(),
            },
            projectile,
            position: ProjectilePosition::new(pos, grid),
        }
    }
}

/// Optional projectile lifetime rules. All are off by default, so projectiles fly forever.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectileRules {
    /// Damage the first entity hit (other than the shooter) and despawn.
    pub hit_entities: bool,
    /// Despawn on touching solid terrain.
    pub despawn_on_terrain: bool,
    /// Despawn after falling below the bottom of the map.
    pub despawn_below_map: bool,
}

impl ProjectileRules {
    pub fn all() -> Self {
        Self {
            hit_entities: true,
            despawn_on_terrain: true,
            despawn_below_map: true,
        }
    }
}

/// Integrates every projectile by one frame and applies the enabled lifetime rules.
pub fn projectile_system(
    mut commands: Commands,
    rules: Res<ProjectileRules>,
    map: Res<TileMap>,
    mut projectiles: Query<(Entity, &mut Projectile, &mut ProjectilePosition, &mut ProjectileGraphics)>,
    mut targets: Query<(Entity, &Position, &mut Health)>,
) -> GameResult<()> {
    for (entity, mut projectile, mut position, mut graphics) in projectiles.iter_mut() {
        projectile.velocity.y += projectile.gravity;
        let next = position.pos() + projectile.velocity;
        position.set(next);
        graphics.rotation = projectile.sprite_rotation();

        let rect = Rect::from_pos_size(position.pos(), graphics.size);
        trace!(entity = ?entity, pos = ?position.pos(), "Projectile moved");

        if rules.hit_entities {
            let hit = targets
                .iter_mut()
                .find(|(target, target_pos, _)| Some(*target) != projectile.shooter && target_pos.rect().overlaps(&rect));
            if let Some((target, _, mut health)) = hit {
                health.damage(projectile.damage);
                debug!(projectile = ?entity, target = ?target, damage = projectile.damage, hp = health.hp(), "Projectile hit");
                commands.entity(entity).try_despawn();
                continue;
            }
        }

        if rules.despawn_below_map && position.pos().y > map.pixel_size().y {
            debug!(projectile = ?entity, "Projectile left the map");
            commands.entity(entity).try_despawn();
            continue;
        }

        if rules.despawn_on_terrain && map.unwalkable_rects(position.tile(), 2).iter().any(|tile| tile.overlaps(&rect)) {
            trace!(projectile = ?entity, "Projectile hit terrain");
            commands.entity(entity).try_despawn();
        }
    }

    Ok(())
}
