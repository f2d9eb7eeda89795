//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::Vec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each tile, in pixels.
pub const TILE_SIZE: f32 = 32.0;

/// The size of the viewport the camera follows the player within, in pixels.
pub const VIEWPORT_SIZE: Vec2 = Vec2::new(960.0, 640.0);

/// Frame-loop ordering. Higher priorities run first within a frame.
pub mod priority {
    pub const INPUT: i32 = 90;
    pub const VELOCITY: i32 = 80;
    pub const COLLISION: i32 = 70;
    pub const ITEM_PICKUP: i32 = 65;
    pub const TILE_INTERACTION: i32 = 60;
    pub const NPC_COMBAT: i32 = 55;
    pub const COMBAT: i32 = 50;
    pub const PROJECTILE: i32 = 40;
    pub const EFFECT: i32 = 30;
    pub const HIT: i32 = 20;
    pub const CAMERA: i32 = 10;
}

pub mod physics {
    /// Downward acceleration applied to every mover, in pixels per second squared.
    pub const GRAVITY: f32 = 1500.0;
    /// Terminal falling speed, in pixels per second.
    pub const MAX_FALL_SPEED: f32 = 600.0;
    /// Default per-frame gravity for projectiles that do not specify their own.
    pub const PROJECTILE_GRAVITY: f32 = 0.5;
}

pub mod player {
    use glam::Vec2;

    pub const SIZE: Vec2 = Vec2::new(28.0, 32.0);
    pub const SPEED: f32 = 250.0;
    /// Initial upward velocity of a jump (negative is up).
    pub const JUMP_VELOCITY: f32 = -560.0;
    pub const MAX_HP: f32 = 100.0;
    pub const INVENTORY_SIZE: usize = 14;
    pub const HOTBAR_SIZE: usize = 5;
}

pub mod mobs {
    use glam::Vec2;

    pub const SIZE: Vec2 = Vec2::new(32.0, 32.0);

    pub const WALKER_HP: f32 = 60.0;
    pub const WALKER_MAX_HP: f32 = 80.0;
    pub const WALKER_SPEED: f32 = 90.0;
    pub const WALKER_DAMAGE: f32 = 15.0;
    pub const WALKER_COOLDOWN_MS: u64 = 1300;

    pub const FOLLOWER_HP: f32 = 70.0;
    pub const FOLLOWER_SPEED: f32 = 120.0;
    pub const FOLLOWER_PATROL_SPEED: f32 = 70.0;
    pub const FOLLOWER_FLEE_SPEED: f32 = 160.0;
    pub const FOLLOWER_FLEE_MS: u64 = 1500;
    /// Follow range, in tiles.
    pub const FOLLOWER_RANGE: f32 = 6.0;
    /// Range at which a follower swings its sword, in tiles.
    pub const FOLLOWER_ATTACK_RANGE: f32 = 1.5;

    pub const ARCHER_HP: f32 = 50.0;
    pub const ARCHER_COOLDOWN_MS: u64 = 2500;
    pub const ARCHER_LAUNCH_SPEED: f32 = 20.0;
    pub const ARCHER_GRAVITY: f32 = 0.6;
    /// Range at which an archer starts shooting, in tiles.
    pub const ARCHER_RANGE: f32 = 12.0;
    pub const ARCHER_DAMAGE: f32 = 12.0;

    /// Camera shake duration (frames) when a mob lands a contact hit on the player.
    pub const CONTACT_SHAKE_FRAMES: u32 = 10;
}

pub mod items {
    use glam::Vec2;

    pub const SWORD_NAME: &str = "sword";
    pub const SWORD_DAMAGE: f32 = 20.0;
    pub const SWORD_COOLDOWN_MS: u64 = 1000;
    pub const SWORD_SIZE: Vec2 = Vec2::new(16.0, 32.0);
    pub const SWORD_BOUND_SIZE: Vec2 = Vec2::new(10.0, 32.0);
    /// Horizontal pull-back applied to a held sword, against the facing direction.
    pub const SWORD_HOLD_OFFSET: f32 = 6.0;
    /// Extra horizontal offset applied to a swinging sword held in the left hand.
    pub const SWORD_LEFT_SWING_OFFSET: f32 = 12.0;
    /// Degrees the swing advances per frame.
    pub const SWING_STEP: f32 = 16.0;
    /// Angle (degrees) past which a swing completes.
    pub const SWING_LIMIT: f32 = 150.0;

    pub const BOW_NAME: &str = "bow";
    pub const BOW_DAMAGE: f32 = 30.0;
    pub const BOW_COOLDOWN_MS: u64 = 2000;
    pub const BOW_SIZE: Vec2 = Vec2::new(16.0, 32.0);
    /// Launch speed, in pixels per frame.
    pub const BOW_LAUNCH_SPEED: f32 = 20.0;

    pub const POTION_NAME: &str = "health potion";
    pub const POTION_HEAL: f32 = 45.0;
    pub const POTION_USES: u32 = 1;
    pub const POTION_COOLDOWN_MS: u64 = 0;
    pub const POTION_SIZE: Vec2 = Vec2::new(16.0, 16.0);

    pub const REGEN_HEAL: f32 = 10.0;
    pub const REGEN_DURATION_MS: u64 = 8000;
    pub const REGEN_INTERVAL_MS: u64 = 2000;

    pub const ARROW_SIZE: Vec2 = Vec2::new(16.0, 5.0);

    /// Amplitude (pixels) and period divisor (ms) of the held-item bob.
    pub const BOB_AMPLITUDE: f32 = 2.0;
    pub const BOB_PERIOD: f32 = 250.0;
}

pub mod particles {
    use crate::events::Color;

    pub const BLOOD: Color = Color::new(200, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const DEATH: [Color; 3] = [Color::new(120, 0, 0), Color::new(60, 60, 60), Color::new(230, 230, 230)];

    pub const HIT_COUNT: u32 = 5;
    pub const DEATH_COUNT: u32 = 30;
    pub const HEAL_COUNT: u32 = 8;

    pub const INVENTORY_FULL: &str = "No more room in inventory!";
}

pub mod camera {
    /// Fraction of the remaining distance covered per second of camera smoothing.
    pub const FOLLOW_RATE: f32 = 3.0;
    /// Vertical anchor of the followed target, as a fraction of the viewport height.
    pub const VERTICAL_ANCHOR: f32 = 0.65;
    /// Maximum shake displacement, in pixels.
    pub const SHAKE_PIXELS: i32 = 3;
}

/// The demo level layout.
///
/// `#` solid, `-` passable background tile, `/` and `\` ramps, `P` player, `W` walker, `F` follower,
/// `A` archer, `H` health potion, `B` bow, `S` sign, ` ` air.
pub const DEMO_LEVEL: [&str; 12] = [
    "################################",
    "#                              #",
    "#                              #",
    "#                         A    #",
    "#                      ######  #",
    "#                              #",
    "#       H            /##\\      #",
    "#  P  S    B   W    /####\\   F #",
    "######  ########################",
    "######  ########################",
    "######--########################",
    "################################",
];

/// Sign texts of the demo level, in reading order.
pub const DEMO_SIGNS: [&str; 1] = ["Arrows: move. Space: jump. Click: use the equipped item. 1-5: hotbar."];
