//! World-to-screen camera transform with smoothed follow and screen shake.

use bevy_ecs::resource::Resource;
use glam::Vec2;
use rand::Rng;
use tracing::trace;

use crate::constants::camera::{FOLLOW_RATE, SHAKE_PIXELS, VERTICAL_ANCHOR};
use crate::geometry::Rect;

#[derive(Resource, Debug, Clone)]
pub struct Camera {
    /// World position of the top-left corner of the view.
    offset: Vec2,
    viewport: Vec2,
    shake_frames: u32,
    shake: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport,
            shake_frames: 0,
            shake: Vec2::ZERO,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// World point to screen point.
    pub fn apply_point(&self, point: Vec2) -> Vec2 {
        point - self.offset - self.shake
    }

    /// Screen point back to world point.
    pub fn unapply_point(&self, point: Vec2) -> Vec2 {
        point + self.offset + self.shake
    }

    pub fn apply_rect(&self, rect: Rect) -> Rect {
        rect.translated(-(self.offset + self.shake))
    }

    /// Eases the view toward `target`, keeping it horizontally centred and low in the view.
    pub fn adjust_to(&mut self, dt: f32, target: Vec2) {
        let goal = self.anchor_for(target);
        let t = (dt * FOLLOW_RATE).clamp(0.0, 1.0);
        self.offset += (goal - self.offset) * t;
        self.offset.x = self.offset.x.max(0.0);
    }

    /// Snaps the view onto `target` immediately.
    pub fn hard_adjust_to(&mut self, target: Vec2) {
        self.offset = self.anchor_for(target);
        self.offset.x = self.offset.x.max(0.0);
    }

    fn anchor_for(&self, target: Vec2) -> Vec2 {
        Vec2::new(target.x - self.viewport.x / 2.0, target.y - self.viewport.y * VERTICAL_ANCHOR)
    }

    /// Starts (or extends) a shake lasting `frames` frames.
    pub fn start_shake(&mut self, frames: u32) {
        self.shake_frames = self.shake_frames.max(frames);
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_frames > 0
    }

    pub fn shake_frames(&self) -> u32 {
        self.shake_frames
    }

    /// Advances the shake by one frame, jittering the view by a random offset.
    pub fn do_shake(&mut self, rng: &mut impl Rng) {
        if self.shake_frames == 0 {
            self.shake = Vec2::ZERO;
            return;
        }

        self.shake_frames -= 1;
        self.shake = if self.shake_frames == 0 {
            Vec2::ZERO
        } else {
            Vec2::new(
                rng.random_range(-SHAKE_PIXELS..=SHAKE_PIXELS) as f32,
                rng.random_range(-SHAKE_PIXELS..=SHAKE_PIXELS) as f32,
            )
        };
        trace!(remaining = self.shake_frames, shake = ?self.shake, "Camera shake");
    }
}
