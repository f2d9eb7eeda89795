//! Runtime-tunable gameplay settings.
//!
//! Defaults come from [`crate::constants`]; a JSON document may override any subset of them.

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants;
use crate::error::ConfigError;

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub physics: PhysicsSettings,
    pub combat: CombatSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub speed: f32,
    pub jump_velocity: f32,
    pub max_hp: f32,
    pub inventory_size: usize,
    pub hotbar_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: f32,
    pub max_fall_speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatSettings {
    /// Degrees a sword swing advances per frame.
    pub swing_step: f32,
    /// Angle in degrees at which a swing completes.
    pub swing_limit: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed: constants::player::SPEED,
            jump_velocity: constants::player::JUMP_VELOCITY,
            max_hp: constants::player::MAX_HP,
            inventory_size: constants::player::INVENTORY_SIZE,
            hotbar_size: constants::player::HOTBAR_SIZE,
        }
    }
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: constants::physics::GRAVITY,
            max_fall_speed: constants::physics::MAX_FALL_SPEED,
        }
    }
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            swing_step: constants::items::SWING_STEP,
            swing_limit: constants::items::SWING_LIMIT,
        }
    }
}

impl Settings {
    /// Parses settings from JSON, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> Result<Settings, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        debug!(settings = ?settings, "Loaded settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.speed <= 0.0 {
            return Err(invalid("player.speed", "must be positive"));
        }
        if self.player.jump_velocity >= 0.0 {
            return Err(invalid("player.jump_velocity", "must be negative (upward)"));
        }
        if self.player.max_hp <= 0.0 {
            return Err(invalid("player.max_hp", "must be positive"));
        }
        if self.player.inventory_size == 0 {
            return Err(invalid("player.inventory_size", "must hold at least one item"));
        }
        if self.player.hotbar_size == 0 || self.player.hotbar_size > self.player.inventory_size {
            return Err(invalid(
                "player.hotbar_size",
                format!("must be within 1..={}", self.player.inventory_size),
            ));
        }
        if self.physics.max_fall_speed <= 0.0 {
            return Err(invalid("physics.max_fall_speed", "must be positive"));
        }
        if self.combat.swing_step <= 0.0 || self.combat.swing_limit <= 0.0 {
            return Err(invalid("combat", "swing step and limit must be positive"));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}
