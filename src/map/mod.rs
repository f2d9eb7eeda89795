//! This module defines the tile map and the level loader that fills it.

pub mod builder;
pub mod parser;
pub mod tiles;

pub use self::builder::{spawn_level, LevelEntities};
pub use self::parser::{LevelParser, ParsedLevel};
pub use self::tiles::{Sign, Tile, TileKind, TileMap, TileRecord};
