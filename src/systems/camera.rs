use bevy_ecs::{
    query::With,
    system::{Query, Res, ResMut},
};

use crate::camera::Camera;
use crate::error::GameResult;
use crate::systems::components::{DeltaTime, PlayerControlled, Position};

/// Eases the camera toward the player and advances any running shake.
pub fn camera_system(
    dt: Res<DeltaTime>,
    mut camera: ResMut<Camera>,
    players: Query<&Position, With<PlayerControlled>>,
) -> GameResult<()> {
    if let Ok(player) = players.single() {
        camera.adjust_to(dt.0, player.center());
    }
    camera.do_shake(&mut rand::rng());
    Ok(())
}
