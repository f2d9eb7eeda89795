//! Level parsing functionality for converting ASCII layouts into structured data.

use glam::IVec2;

use crate::error::ParseError;
use crate::map::tiles::TileKind;

/// What occupies a single cell of the level layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelTile {
    /// Open air.
    Empty,
    /// A placed tile with the given terrain properties.
    Terrain(TileKind),
    /// An interactable sign.
    Sign,
}

/// Something spawned at a cell when the level loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawn {
    Walker,
    Follower,
    Archer,
    HealthPotion,
    Bow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCell {
    Tile(LevelTile),
    PlayerStart,
    Spawn(Spawn),
}

/// Represents the parsed data from a raw level layout.
#[derive(Debug, Clone)]
pub struct ParsedLevel {
    pub width: usize,
    pub height: usize,
    /// Row-major tile layout, `tiles[y][x]`.
    pub tiles: Vec<Vec<LevelTile>>,
    pub player_start: IVec2,
    /// Spawns in reading order.
    pub spawns: Vec<(Spawn, IVec2)>,
}

impl ParsedLevel {
    /// Tiles with their coordinates, skipping open air.
    pub fn placed_tiles(&self) -> impl Iterator<Item = (IVec2, LevelTile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, tile)| **tile != LevelTile::Empty)
                .map(move |(x, tile)| (IVec2::new(x as i32, y as i32), *tile))
        })
    }
}

/// Parser for converting raw level layouts into structured level data.
pub struct LevelParser;

impl LevelParser {
    /// Parses a single character into a level cell, or `None` if it is unknown.
    pub fn parse_character(c: char) -> Option<LevelCell> {
        let cell = match c {
            ' ' | '.' => LevelCell::Tile(LevelTile::Empty),
            '#' => LevelCell::Tile(LevelTile::Terrain(TileKind::SOLID)),
            '-' => LevelCell::Tile(LevelTile::Terrain(TileKind::empty())),
            '/' => LevelCell::Tile(LevelTile::Terrain(TileKind::RAMP_UP)),
            '\\' => LevelCell::Tile(LevelTile::Terrain(TileKind::RAMP_DOWN)),
            'S' => LevelCell::Tile(LevelTile::Sign),
            'P' => LevelCell::PlayerStart,
            'W' => LevelCell::Spawn(Spawn::Walker),
            'F' => LevelCell::Spawn(Spawn::Follower),
            'A' => LevelCell::Spawn(Spawn::Archer),
            'H' => LevelCell::Spawn(Spawn::HealthPotion),
            'B' => LevelCell::Spawn(Spawn::Bow),
            _ => return None,
        };
        Some(cell)
    }

    /// Parses a raw level layout into structured level data.
    ///
    /// Rows shorter than the widest row are padded with open air.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is empty, contains unknown characters, or does not
    /// have exactly one player start.
    pub fn parse_level(rows: &[&str]) -> Result<ParsedLevel, ParseError> {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err(ParseError::Empty);
        }

        let mut tiles = vec![vec![LevelTile::Empty; width]; rows.len()];
        let mut player_starts = Vec::new();
        let mut spawns = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            for (x, character) in row.chars().enumerate() {
                let coords = IVec2::new(x as i32, y as i32);
                match Self::parse_character(character) {
                    Some(LevelCell::Tile(tile)) => tiles[y][x] = tile,
                    Some(LevelCell::PlayerStart) => player_starts.push(coords),
                    Some(LevelCell::Spawn(spawn)) => spawns.push((spawn, coords)),
                    None => return Err(ParseError::UnknownCharacter { character, x, y }),
                }
            }
        }

        let [player_start] = player_starts[..] else {
            return Err(ParseError::InvalidPlayerSpawnCount(player_starts.len()));
        };

        Ok(ParsedLevel {
            width,
            height: rows.len(),
            tiles,
            player_start,
            spawns,
        })
    }
}
