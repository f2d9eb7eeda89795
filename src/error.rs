//! Centralized error types for the game core.
//!
//! This module defines all error types used throughout the crate,
//! providing a consistent error handling approach.

use bevy_ecs::entity::Entity;

/// Main error type for the game core.
///
/// This is the primary error type that should be used in public APIs.
/// A system returning it aborts the frame it runs in.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),

    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("System '{name}' could not run: {reason}")]
    System { name: &'static str, reason: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors related to entity and component lookups.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    #[error("Entity {entity} has no {component} component")]
    MissingComponent { entity: Entity, component: &'static str },

    #[error("Entity {0} does not exist")]
    InvalidEntity(Entity),
}

/// Error type for level parsing operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character {character:?} at ({x}, {y})")]
    UnknownCharacter { character: char, x: usize, y: usize },

    #[error("Level must have exactly one player spawn, found {0}")]
    InvalidPlayerSpawnCount(usize),

    #[error("Level is empty")]
    Empty,
}

/// Errors related to building or querying the tile map.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Tile ({x}, {y}) on layer {layer} is outside the map")]
    OutOfBounds { layer: u32, x: i32, y: i32 },

    #[error("Invalid map configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while loading or validating runtime settings.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Malformed settings: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid setting '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
