//! Tile components and the tile map index used for terrain queries.

use std::collections::HashMap;

use bevy_ecs::{component::Component, entity::Entity, resource::Resource};
use bitflags::bitflags;
use glam::{IVec2, Vec2};
use smallvec::SmallVec;

use crate::error::MapError;
use crate::geometry::{Rect, TileGrid};

bitflags! {
    /// Terrain properties of a tile. An empty set is a plain walkable tile.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TileKind: u8 {
        /// Blocks movement.
        const SOLID = 1 << 0;
        /// Slope rising toward the right.
        const RAMP_UP = 1 << 1;
        /// Slope falling toward the right.
        const RAMP_DOWN = 1 << 2;
        /// Something the player can interact with by standing on it.
        const INTERACTABLE = 1 << 3;
    }
}

impl TileKind {
    pub fn is_ramp(self) -> bool {
        self.intersects(TileKind::RAMP_UP | TileKind::RAMP_DOWN)
    }
}

/// A placed tile.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub coords: IVec2,
    pub layer: u32,
    pub rect: Rect,
    pub kind: TileKind,
}

/// Dialogue shown while the player stands on this tile.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Sign {
    pub text: String,
}

/// What the tile map index knows about one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRecord {
    pub entity: Option<Entity>,
    pub kind: TileKind,
    pub rect: Rect,
}

impl TileRecord {
    pub fn walkable(&self) -> bool {
        !self.kind.contains(TileKind::SOLID)
    }
}

/// Lookup from `(layer, x, y)` tile coordinates to tile records.
///
/// Built once when a level loads and only read during gameplay. Coordinates without a
/// record are open air.
#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    grid: TileGrid,
    width: u32,
    height: u32,
    layers: u32,
    tiles: HashMap<(u32, IVec2), TileRecord>,
}

impl TileMap {
    pub fn new(grid: TileGrid, width: u32, height: u32) -> Self {
        Self {
            grid,
            width,
            height,
            layers: 1,
            tiles: HashMap::new(),
        }
    }

    pub fn grid(&self) -> TileGrid {
        self.grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layers(&self) -> u32 {
        self.layers
    }

    /// Map extent in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.grid.tile_size
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Records a tile of `kind` at `coords`, deriving its pixel rect from the grid.
    pub fn insert(&mut self, layer: u32, coords: IVec2, kind: TileKind, entity: Option<Entity>) -> Result<TileRecord, MapError> {
        if coords.x < 0 || coords.y < 0 || coords.x >= self.width as i32 || coords.y >= self.height as i32 {
            return Err(MapError::OutOfBounds {
                layer,
                x: coords.x,
                y: coords.y,
            });
        }

        let record = TileRecord {
            entity,
            kind,
            rect: self.grid.tile_rect(coords),
        };
        self.tiles.insert((layer, coords), record);
        self.layers = self.layers.max(layer + 1);
        Ok(record)
    }

    pub fn tile_at(&self, layer: u32, x: i32, y: i32) -> Option<&TileRecord> {
        self.tiles.get(&(layer, IVec2::new(x, y)))
    }

    /// Records in the square of `radius` tiles around `center`.
    ///
    /// Iteration order is fixed: layer, then column, then row, each ascending.
    pub fn neighborhood(&self, center: IVec2, radius: i32) -> impl Iterator<Item = &TileRecord> + '_ {
        (0..self.layers).flat_map(move |layer| {
            (center.x - radius..=center.x + radius).flat_map(move |x| {
                (center.y - radius..=center.y + radius).filter_map(move |y| self.tile_at(layer, x, y))
            })
        })
    }

    /// Rects of the solid tiles around `center`, in [`TileMap::neighborhood`] order.
    pub fn unwalkable_rects(&self, center: IVec2, radius: i32) -> SmallVec<[Rect; 9]> {
        self.neighborhood(center, radius)
            .filter(|record| !record.walkable())
            .map(|record| record.rect)
            .collect()
    }

    pub fn ramps(&self, center: IVec2, radius: i32) -> SmallVec<[(TileKind, Rect); 4]> {
        self.neighborhood(center, radius)
            .filter(|record| record.kind.is_ramp())
            .map(|record| (record.kind, record.rect))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> TileMap {
        let mut map = TileMap::new(TileGrid::square(16.0), 10, 10);
        map.insert(0, IVec2::new(6, 5), TileKind::SOLID, None).unwrap();
        map.insert(0, IVec2::new(4, 4), TileKind::empty(), None).unwrap();
        map.insert(0, IVec2::new(5, 6), TileKind::RAMP_UP, None).unwrap();
        map
    }

    #[test]
    fn test_tile_at() {
        let map = sample_map();
        let wall = map.tile_at(0, 6, 5).unwrap();
        assert!(!wall.walkable());
        assert_eq!(wall.rect, Rect::new(96.0, 80.0, 16.0, 16.0));
        assert!(map.tile_at(0, 0, 0).is_none());
        assert!(map.tile_at(1, 6, 5).is_none());
    }

    #[test]
    fn test_neighborhood_filters() {
        let map = sample_map();
        let center = IVec2::new(5, 5);
        assert_eq!(map.neighborhood(center, 1).count(), 3);
        assert_eq!(map.unwalkable_rects(center, 1).as_slice(), &[Rect::new(96.0, 80.0, 16.0, 16.0)]);
        assert_eq!(map.ramps(center, 1).len(), 1);
        assert_eq!(map.unwalkable_rects(IVec2::new(0, 0), 1).len(), 0);
    }

    #[test]
    fn test_out_of_bounds_insert() {
        let mut map = TileMap::new(TileGrid::square(16.0), 4, 4);
        assert!(matches!(
            map.insert(0, IVec2::new(4, 0), TileKind::SOLID, None),
            Err(MapError::OutOfBounds { x: 4, .. })
        ));
        map.insert(2, IVec2::new(1, 1), TileKind::SOLID, None).unwrap();
        assert_eq!(map.layers(), 3);
    }
}
