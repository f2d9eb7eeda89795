//! Pixel-space geometry: rectangles, facing, and the pixel/tile grid.

use glam::{IVec2, Vec2};
use strum_macros::IntoStaticStr;

/// An axis-aligned rectangle in world pixels, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::from_pos_size(center - size / 2.0, size)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Inclusive overlap: shared edges count as contact.
    pub fn touches(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn translated(&self, offset: Vec2) -> Rect {
        Rect::from_pos_size(self.pos() + offset, self.size())
    }
}

/// Horizontal facing of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoStaticStr)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// `1.0` when facing right, `-1.0` when facing left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Facing toward the sign of `dx`; `None` when `dx` is zero.
    pub fn toward(dx: f32) -> Option<Facing> {
        if dx > 0.0 {
            Some(Facing::Right)
        } else if dx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Conversion between pixel positions and tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    pub tile_size: Vec2,
}

impl TileGrid {
    pub const fn square(size: f32) -> Self {
        Self {
            tile_size: Vec2::new(size, size),
        }
    }

    /// The tile a pixel position belongs to, rounding to the nearest tile.
    pub fn to_tile(&self, pos: Vec2) -> IVec2 {
        (pos / self.tile_size).round().as_ivec2()
    }

    pub fn to_pixel(&self, tile: IVec2) -> Vec2 {
        tile.as_vec2() * self.tile_size
    }

    pub fn tile_rect(&self, tile: IVec2) -> Rect {
        Rect::from_pos_size(self.to_pixel(tile), self.tile_size)
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::square(crate::constants::TILE_SIZE)
    }
}

/// Bounding rectangle of a `size` sprite rotated by `angle` degrees about a pivot.
///
/// `pos` is the pivot in world space and `origin` is the same pivot relative to the
/// sprite's top-left corner. Positive angles rotate counter-clockwise on screen.
pub fn rotate_about_pivot(size: Vec2, pos: Vec2, origin: Vec2, angle: f32) -> Rect {
    let unrotated = Rect::from_pos_size(pos - origin, size);
    let offset = pos - unrotated.center();
    let rotated_offset = Vec2::from_angle((-angle).to_radians()).rotate(offset);
    let center = pos - rotated_offset;

    let (sin, cos) = angle.to_radians().sin_cos();
    let bounds = Vec2::new(
        (size.x * cos).abs() + (size.y * sin).abs(),
        (size.x * sin).abs() + (size.y * cos).abs(),
    );
    Rect::from_center(center, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 16.0, 16.0);
        let b = Rect::new(16.0, 0.0, 16.0, 16.0);
        assert!(!a.overlaps(&b));
        assert!(a.touches(&b));
        assert!(a.overlaps(&Rect::new(15.0, 15.0, 4.0, 4.0)));
    }

    #[test]
    fn test_tile_grid_rounds_to_nearest() {
        let grid = TileGrid::square(16.0);
        assert_eq!(grid.to_tile(Vec2::new(80.0, 80.0)), IVec2::new(5, 5));
        assert_eq!(grid.to_tile(Vec2::new(87.0, 71.0)), IVec2::new(5, 4));
        assert_eq!(grid.to_tile(Vec2::new(89.0, 73.0)), IVec2::new(6, 5));
    }

    #[test]
    fn test_rotation_without_angle_is_identity() {
        let rect = rotate_about_pivot(Vec2::new(16.0, 32.0), Vec2::new(100.0, 100.0), Vec2::new(0.0, 32.0), 0.0);
        assert!((rect.x - 100.0).abs() < 1e-4);
        assert!((rect.y - 68.0).abs() < 1e-4);
        assert!((rect.w - 16.0).abs() < 1e-4);
        assert!((rect.h - 32.0).abs() < 1e-4);
    }

    #[test]
    fn test_quarter_turn_swaps_extent() {
        let rect = rotate_about_pivot(Vec2::new(16.0, 32.0), Vec2::new(100.0, 100.0), Vec2::new(0.0, 32.0), -90.0);
        assert!((rect.w - 32.0).abs() < 1e-3);
        assert!((rect.h - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_facing() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.flipped(), Facing::Left);
        assert_eq!(Facing::toward(-3.0), Some(Facing::Left));
        assert_eq!(Facing::toward(0.0), None);
    }
}
