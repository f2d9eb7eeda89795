//! Headless driver: plays a short scripted session of the demo level and logs what happens.
//!
//! Usage: `tileclash [--frames N] [--settings path.json]`

use std::env;
use std::fs;
use std::time::Instant;

use anyhow::{bail, Context};
use glam::Vec2;
use tileclash::constants::{DEMO_LEVEL, DEMO_SIGNS, LOOP_TIME, VIEWPORT_SIZE};
use tileclash::events::GameEvent;
use tileclash::game::Game;
use tileclash::input::{FrameInput, InputEvent, Key, MouseButton};
use tileclash::logging;
use tileclash::settings::Settings;
use tileclash::systems::ProjectileRules;
use tracing::{debug, info};

const DEFAULT_FRAMES: u64 = 600;

/// A canned walk through the demo level: run right, hop the pit, swing at whatever is close.
fn scripted_input(frame: u64) -> FrameInput {
    let pointer = VIEWPORT_SIZE / 2.0 + Vec2::new(200.0, -40.0);
    let mut input = FrameInput::default().with_event(InputEvent::MouseMotion(pointer));

    if frame > 30 {
        input = input.holding(Key::Right);
    }
    if frame % 45 == 20 {
        input = input.with_event(InputEvent::KeyDown(Key::Space));
    }
    if frame % 70 == 0 {
        input = input.with_event(InputEvent::MouseDown {
            button: MouseButton::Left,
            pos: pointer,
        });
    }
    if frame == 300 {
        input = input.with_event(InputEvent::KeyDown(Key::Digit(2)));
    }
    input
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> anyhow::Result<Option<&'a str>> {
    match args.iter().position(|arg| arg == flag) {
        Some(index) => match args.get(index + 1) {
            Some(value) => Ok(Some(value.as_str())),
            None => bail!("{flag} expects a value"),
        },
        None => Ok(None),
    }
}

pub fn main() -> anyhow::Result<()> {
    logging::setup_logging(&format!("warn,{}=info", env!("CARGO_CRATE_NAME")));

    let args: Vec<String> = env::args().collect();
    let frames = match flag_value(&args, "--frames")? {
        Some(value) => value.parse().with_context(|| format!("invalid frame count {value:?}"))?,
        None => DEFAULT_FRAMES,
    };
    let settings = match flag_value(&args, "--settings")? {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("could not read settings from {path}"))?;
            Settings::from_json(&json)?
        }
        None => Settings::default(),
    };

    let mut game = Game::new(&DEMO_LEVEL, &DEMO_SIGNS, settings)?;
    game.set_projectile_rules(ProjectileRules::all());
    info!(frames, "Starting scripted session");

    let mut last_tick = Instant::now();
    for frame in 0..frames {
        let start = Instant::now();
        let dt = if frame == 0 {
            LOOP_TIME.as_secs_f32()
        } else {
            last_tick.elapsed().as_secs_f32()
        };
        last_tick = start;

        let exit = game.tick(scripted_input(frame), dt)?;

        for event in game.drain_events() {
            match event {
                GameEvent::EntityDied(entity) if entity == game.player() => {
                    info!(frame, "Player died, ending session");
                    return Ok(());
                }
                GameEvent::Command(_) => {}
                other => debug!(event = ?other, "Game event"),
            }
        }
        game.drain_particles();

        if exit {
            break;
        }

        let elapsed = start.elapsed();
        if elapsed < LOOP_TIME {
            spin_sleep::sleep(LOOP_TIME - elapsed);
        }
    }

    info!(
        frames = game.scheduler().frame(),
        slowest = game.scheduler().timings().format_summary(5),
        "Session finished"
    );
    Ok(())
}
