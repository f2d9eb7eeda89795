use bevy_ecs::{
    event::EventWriter,
    query::With,
    system::{Query, Res},
};
use tracing::{debug, warn};

use crate::clock::GameClock;
use crate::error::GameResult;
use crate::events::{GameCommand, GameEvent};
use crate::input::{Bindings, FrameInput, MouseButton};
use crate::systems::components::{Inventory, PlayerControlled};
use crate::systems::item::Item;

/// Applies the frame's input to the player's inventory: hotbar selection and item use.
///
/// Every bound command is also re-published as a [`GameEvent::Command`].
pub fn input_system(
    clock: Res<GameClock>,
    input: Res<FrameInput>,
    bindings: Res<Bindings>,
    mut players: Query<&mut Inventory, With<PlayerControlled>>,
    mut items: Query<&mut Item>,
    mut events: EventWriter<GameEvent>,
) -> GameResult<()> {
    let now = clock.ticks();

    for command in input.commands(&bindings) {
        events.write(command.into());
    }

    let Ok(mut inventory) = players.single_mut() else {
        return Ok(());
    };

    for command in input.commands(&bindings) {
        if let GameCommand::SelectSlot(index) = command {
            if inventory.select(index) {
                debug!(slot = index, "Hotbar slot selected");
            }
        }
    }

    if input.clicked(MouseButton::Left).is_some() && inventory.ready(now) {
        if let Some(equipped) = inventory.equipped() {
            match items.get_mut(equipped) {
                Ok(mut item) => {
                    item.use_with(&mut inventory, now);
                    debug!(item = %item.name, now, cooldown_ms = item.cooldown_ms, "Item used");
                }
                Err(_) => warn!(item = ?equipped, "Equipped slot holds a missing item"),
            }
        }
    }

    if inventory.on_cooldown && inventory.ready(now) {
        inventory.on_cooldown = false;
    }

    Ok(())
}
