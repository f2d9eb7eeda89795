//! Core simulation of a tile-based 2D action game.
//!
//! The host feeds a [`input::FrameInput`] snapshot and a frame delta into
//! [`game::Game::tick`] and drains gameplay and particle events afterwards; everything
//! in between runs as prioritized systems over a `bevy_ecs` world.

pub mod camera;
pub mod clock;
pub mod constants;
pub mod ecs;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod map;
pub mod settings;
pub mod systems;
