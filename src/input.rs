//! Raw per-frame input as handed to the simulation by the host.
//!
//! The host translates its platform events into [`InputEvent`]s and a snapshot of held
//! keys once per frame; the systems only ever read the resulting [`FrameInput`].

use std::collections::{HashMap, HashSet};

use bevy_ecs::resource::Resource;
use glam::Vec2;

use crate::events::GameCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    W,
    A,
    S,
    D,
    P,
    Space,
    Escape,
    /// A number-row key, `0..=9`.
    Digit(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// A mouse press at a screen-space position.
    MouseDown { button: MouseButton, pos: Vec2 },
    MouseMotion(Vec2),
    Quit,
}

/// The immutable input snapshot every system sees during one frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameInput {
    /// Discrete events received since the previous frame, in arrival order.
    pub events: Vec<InputEvent>,
    /// Keys held down at the start of the frame.
    pub held: HashSet<Key>,
    /// Last known pointer position, in screen space.
    pub pointer: Vec2,
}

impl FrameInput {
    pub fn with_event(mut self, event: InputEvent) -> Self {
        if let InputEvent::MouseDown { pos, .. } | InputEvent::MouseMotion(pos) = event {
            self.pointer = pos;
        }
        self.events.push(event);
        self
    }

    pub fn holding(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn quit_requested(&self) -> bool {
        self.events.iter().any(|event| matches!(event, InputEvent::Quit))
    }

    /// Screen position of the first press of `button` this frame, if any.
    pub fn clicked(&self, button: MouseButton) -> Option<Vec2> {
        self.events.iter().find_map(|event| match event {
            InputEvent::MouseDown { button: b, pos } if *b == button => Some(*pos),
            _ => None,
        })
    }

    /// Commands bound to keys pressed this frame, in arrival order.
    pub fn commands<'a>(&'a self, bindings: &'a Bindings) -> impl Iterator<Item = GameCommand> + 'a {
        self.events.iter().filter_map(move |event| match event {
            InputEvent::KeyDown(key) => bindings.command_for(*key),
            InputEvent::Quit => Some(GameCommand::Exit),
            _ => None,
        })
    }

    /// Horizontal intent from held keys: -1 for left, 1 for right, 0 for neither.
    ///
    /// When both directions are held, right wins.
    pub fn horizontal(&self, bindings: &Bindings) -> f32 {
        if bindings.right_keys.iter().any(|key| self.is_held(*key)) {
            1.0
        } else if bindings.left_keys.iter().any(|key| self.is_held(*key)) {
            -1.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Key, GameCommand>,
    left_keys: HashSet<Key>,
    right_keys: HashSet<Key>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        key_bindings.insert(Key::Space, GameCommand::Jump);
        key_bindings.insert(Key::W, GameCommand::Jump);
        key_bindings.insert(Key::Up, GameCommand::Jump);

        key_bindings.insert(Key::P, GameCommand::TogglePause);
        key_bindings.insert(Key::Escape, GameCommand::Exit);

        // Hotbar slots are numbered from 1 on the keyboard
        for digit in 1..=9u8 {
            key_bindings.insert(Key::Digit(digit), GameCommand::SelectSlot(usize::from(digit - 1)));
        }

        Self {
            key_bindings,
            left_keys: HashSet::from([Key::Left, Key::A]),
            right_keys: HashSet::from([Key::Right, Key::D]),
        }
    }
}

impl Bindings {
    pub fn command_for(&self, key: Key) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }
}
