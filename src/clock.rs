//! The pausable game clock.

use std::time::Duration;

use bevy_ecs::resource::Resource;
use tracing::debug;

/// Milliseconds of simulated time since the game started.
///
/// The clock only moves when the frame loop advances it, so pausing freezes every
/// cooldown, effect timer and animation that reads it.
#[derive(Resource, Debug, Default, Clone)]
pub struct GameClock {
    elapsed: Duration,
    paused: bool,
}

impl GameClock {
    /// Milliseconds since start, excluding time spent paused.
    pub fn ticks(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Moves the clock forward; a paused clock ignores the call.
    pub fn advance(&mut self, delta: Duration) {
        if !self.paused {
            self.elapsed += delta;
        }
    }

    pub fn pause(&mut self) {
        if !self.paused {
            debug!(ticks = self.ticks(), "Clock paused");
            self.paused = true;
        }
    }

    pub fn unpause(&mut self) {
        if self.paused {
            debug!(ticks = self.ticks(), "Clock resumed");
            self.paused = false;
        }
    }

    pub fn toggle(&mut self) {
        if self.paused {
            self.unpause();
        } else {
            self.pause();
        }
    }
}
