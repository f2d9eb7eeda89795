//! This module contains the game state: the ECS world, its resources and the frame loop.

use std::time::{Duration, Instant};

use bevy_ecs::{entity::Entity, event::Events, world::World};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::clock::GameClock;
use crate::constants::{priority, DEMO_LEVEL, DEMO_SIGNS, VIEWPORT_SIZE};
use crate::ecs::Scheduler;
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent, ParticleEvent};
use crate::input::{Bindings, FrameInput};
use crate::map::{spawn_level, LevelParser};
use crate::settings::Settings;
use crate::systems::camera::camera_system;
use crate::systems::collision::{collision_system, item_pickup_system};
use crate::systems::combat::combat_system;
use crate::systems::effect::effect_system;
use crate::systems::hit::hit_system;
use crate::systems::input::input_system;
use crate::systems::interaction::tile_interaction_system;
use crate::systems::movement::velocity_system;
use crate::systems::npc_combat::npc_combat_system;
use crate::systems::projectile::projectile_system;
use crate::systems::{Effects, GlobalState, Health, Position, ProjectileRules};

/// The core game state: the ECS world and the scheduler that drives it.
pub struct Game {
    pub world: World,
    scheduler: Scheduler,
    player: Entity,
}

impl Game {
    /// Builds a game from a level layout.
    ///
    /// # Errors
    ///
    /// Fails if the settings are invalid or the layout cannot be parsed or placed.
    pub fn new(layout: &[&str], signs: &[&str], settings: Settings) -> GameResult<Game> {
        settings.validate()?;
        let level = LevelParser::parse_level(layout)?;

        let mut world = World::new();
        Self::insert_resources(&mut world, settings.clone());
        let spawned = spawn_level(&mut world, &level, &settings, signs)?;

        if let Some(position) = world.get::<Position>(spawned.player) {
            let center = position.center();
            world.resource_mut::<Camera>().hard_adjust_to(center);
        }

        let mut scheduler = Scheduler::new();
        Self::configure_schedule(&mut world, &mut scheduler);
        info!(systems = ?scheduler.order(), "Game ready");

        Ok(Game {
            world,
            scheduler,
            player: spawned.player,
        })
    }

    /// The built-in demo level with default settings.
    pub fn demo() -> GameResult<Game> {
        Self::new(&DEMO_LEVEL, &DEMO_SIGNS, Settings::default())
    }

    fn insert_resources(world: &mut World, settings: Settings) {
        world.init_resource::<Events<GameEvent>>();
        world.init_resource::<Events<ParticleEvent>>();

        world.insert_resource(GameClock::default());
        world.insert_resource(Camera::new(VIEWPORT_SIZE));
        world.insert_resource(Effects::default());
        world.insert_resource(ProjectileRules::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(FrameInput::default());
        world.insert_resource(settings);
    }

    fn configure_schedule(world: &mut World, scheduler: &mut Scheduler) {
        scheduler.add_system(world, "input", priority::INPUT, input_system);
        scheduler.add_system(world, "velocity", priority::VELOCITY, velocity_system);
        scheduler.add_system(world, "collision", priority::COLLISION, collision_system);
        scheduler.add_system(world, "item_pickup", priority::ITEM_PICKUP, item_pickup_system);
        scheduler.add_system(world, "tile_interaction", priority::TILE_INTERACTION, tile_interaction_system);
        scheduler.add_system(world, "npc_combat", priority::NPC_COMBAT, npc_combat_system);
        scheduler.add_system(world, "combat", priority::COMBAT, combat_system);
        scheduler.add_system(world, "projectile", priority::PROJECTILE, projectile_system);
        scheduler.add_system(world, "effect", priority::EFFECT, effect_system);
        scheduler.add_system(world, "hit", priority::HIT, hit_system);
        scheduler.add_system(world, "camera", priority::CAMERA, camera_system);
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn is_paused(&self) -> bool {
        self.world.resource::<GameClock>().is_paused()
    }

    pub fn player_dead(&self) -> bool {
        self.world.get::<Health>(self.player).is_none_or(Health::is_dead)
    }

    /// Replaces the projectile lifetime rules.
    pub fn set_projectile_rules(&mut self, rules: ProjectileRules) {
        self.world.insert_resource(rules);
    }

    /// Runs one frame.
    ///
    /// Exit and pause commands are handled before any system runs; a paused game skips
    /// the frame entirely, leaving the clock frozen.
    ///
    /// # Returns
    ///
    /// `true` if the game should terminate (exit command or quit request), `false` to continue.
    pub fn tick(&mut self, input: FrameInput, dt: f32) -> GameResult<bool> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(GameError::InvalidState(format!("frame delta must be finite and non-negative, got {dt}")));
        }

        let commands: SmallVec<[GameCommand; 4]> = input.commands(self.world.resource::<Bindings>()).collect();
        for command in commands {
            match command {
                GameCommand::Exit => self.world.resource_mut::<GlobalState>().exit = true,
                GameCommand::TogglePause => self.world.resource_mut::<GameClock>().toggle(),
                _ => {}
            }
        }

        if self.world.resource::<GlobalState>().exit {
            info!("Exit requested");
            return Ok(true);
        }
        if self.is_paused() {
            return Ok(false);
        }

        self.world.resource_mut::<GameClock>().advance(Duration::from_secs_f32(dt));
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<ParticleEvent>>().update();

        let start = Instant::now();
        self.scheduler.run_frame(&mut self.world, input, dt)?;
        let total = start.elapsed();

        // Frames running over 120% of their delta are worth a warning
        let budget = Duration::from_secs_f32(dt * 1.2);
        if total > budget {
            warn!(
                total = format!("{total:.3?}"),
                frame = self.scheduler.frame(),
                systems = self.scheduler.timings().format_summary(3),
                budget = format!("{budget:.1?}"),
                "Frame took longer than expected"
            );
        }

        Ok(self.world.resource::<GlobalState>().exit)
    }

    /// Takes every gameplay event raised since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.resource_mut::<Events<GameEvent>>().drain().collect()
    }

    /// Takes every particle request raised since the last drain.
    pub fn drain_particles(&mut self) -> Vec<ParticleEvent> {
        let particles: Vec<_> = self.world.resource_mut::<Events<ParticleEvent>>().drain().collect();
        if !particles.is_empty() {
            debug!(count = particles.len(), "Particles drained");
        }
        particles
    }
}
