//! Priority-ordered frame scheduler.

use std::time::Instant;

use bevy_ecs::{
    system::{IntoSystem, SystemId},
    world::World,
};
use tracing::{debug, error, trace};

use crate::ecs::profiling::SystemTimings;
use crate::error::{GameError, GameResult};
use crate::input::FrameInput;
use crate::systems::DeltaTime;

struct ScheduledSystem {
    name: &'static str,
    priority: i32,
    id: SystemId<(), GameResult<()>>,
}

/// Runs every registered system exactly once per frame.
///
/// Systems run in descending priority: the highest priority runs first and the lowest
/// runs last. Systems sharing a priority run in the order they were added. A system
/// returning an error aborts the rest of the frame.
#[derive(Default)]
pub struct Scheduler {
    systems: Vec<ScheduledSystem>,
    timings: SystemTimings,
    frame: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_system<S, M>(&mut self, world: &mut World, name: &'static str, priority: i32, system: S)
    where
        S: IntoSystem<(), GameResult<()>, M> + 'static,
    {
        let id = world.register_system(system);
        let index = self.systems.partition_point(|scheduled| scheduled.priority >= priority);
        self.systems.insert(index, ScheduledSystem { name, priority, id });
        debug!(system = name, priority, position = index, "System scheduled");
    }

    /// System names in execution order.
    pub fn order(&self) -> Vec<&'static str> {
        self.systems.iter().map(|scheduled| scheduled.name).collect()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn timings(&self) -> &SystemTimings {
        &self.timings
    }

    /// Publishes the frame's input snapshot and delta time, then runs every system once.
    pub fn run_frame(&mut self, world: &mut World, input: FrameInput, dt: f32) -> GameResult<()> {
        world.insert_resource(input);
        world.insert_resource(DeltaTime(dt));
        self.frame += 1;
        crate::logging::set_frame(self.frame);

        for scheduled in &self.systems {
            let start = Instant::now();
            let outcome = world.run_system(scheduled.id).map_err(|e| GameError::System {
                name: scheduled.name,
                reason: e.to_string(),
            })?;
            self.timings.add_timing(scheduled.name, start.elapsed());

            if let Err(e) = outcome {
                error!(system = scheduled.name, frame = self.frame, error = %e, "System failed, aborting frame");
                return Err(e);
            }
        }

        trace!(frame = self.frame, dt, "Frame complete");
        Ok(())
    }
}
