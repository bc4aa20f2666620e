use serde::Deserialize;
use serde::Serialize;

use crate::actor::Actor;
use crate::config::PhysicsConfig;
use crate::physics::PhysicsStepper;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
}

/// Apply a key event to the actor's velocity. Returns true if a jump
/// started.
///
/// Releasing either direction stops horizontal movement even while the
/// other direction is still held.
pub fn apply_input(
    event: InputEvent,
    actor: &mut Actor,
    physics: &impl PhysicsStepper,
    config: &PhysicsConfig,
) -> bool {
    match event {
        InputEvent::Pressed(Key::Left) => actor.velocity.x = -config.movement_speed,
        InputEvent::Pressed(Key::Right) => actor.velocity.x = config.movement_speed,
        InputEvent::Pressed(Key::Jump) => {
            if physics.can_jump(actor) {
                actor.velocity.y = config.jump_speed;
                return true;
            }
        }
        InputEvent::Released(Key::Left | Key::Right) => actor.velocity.x = 0.,
        InputEvent::Released(Key::Jump) => {}
    }
    false
}
