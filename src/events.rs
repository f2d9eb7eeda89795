use bevy_ecs::prelude::*;
use glam::Vec2;
use smallvec::SmallVec;

/// A high-level action produced from raw input through the key bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    TogglePause,
    Jump,
    /// Equip the hotbar slot with this zero-based index.
    SelectSlot(usize),
}

/// Gameplay notifications produced during a frame, drained by the host afterwards.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
    ItemPickedUp { owner: Entity, item: Entity },
    InventoryFull(Entity),
    /// The player is standing on a sign tile.
    SignInRange { sign: Entity },
    EntityDied(Entity),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fire-and-forget request for a visual particle effect.
///
/// The core never renders these; it only queues them for whatever draws the frame.
#[derive(Event, Clone, Debug, PartialEq)]
pub enum ParticleEvent {
    /// A burst of `count` particles at `pos`, colored from `colors`.
    Burst {
        pos: Vec2,
        count: u32,
        colors: SmallVec<[Color; 4]>,
    },
    /// Floating text, such as inventory warnings.
    Text { pos: Vec2, text: String },
    /// Dust kicked up at the feet of a jumping entity.
    Jump { pos: Vec2 },
    /// A periodic effect ticked on an entity.
    Effect { entity: Entity, healed: bool },
}

impl ParticleEvent {
    pub fn burst(pos: Vec2, count: u32, colors: &[Color]) -> Self {
        ParticleEvent::Burst {
            pos,
            count,
            colors: SmallVec::from_slice(colors),
        }
    }
}
