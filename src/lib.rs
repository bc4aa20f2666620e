//! A small side-scrolling platformer.
//!
//! Level data, physics and the camera are plain data types that can be
//! stepped without a window. The `client` binary wires them into bevy.

use bevy_math::IVec2;
use serde::Deserialize;

pub mod actor;
pub mod config;
pub mod game;
pub mod game_state;
pub mod input;
pub mod level;
pub mod physics;
pub mod render;
pub mod sprite_list;
pub mod viewport;

#[cfg(test)]
mod test;

pub use actor::Actor;
pub use actor::AnimationState;
pub use actor::Facing;
pub use config::GameConfig;
pub use game::GameEvent;
pub use game::GameMode;
pub use game::GameView;
pub use game::PlayState;
pub use game_state::GameStateTracker;
pub use game_state::Respawn;
pub use input::InputEvent;
pub use input::Key;
pub use level::LayerKind;
pub use level::Level;
pub use level::LevelData;
pub use physics::PhysicsStepper;
pub use physics::PlatformerPhysics;
pub use render::Renderer;
pub use sprite_list::SpriteList;
pub use viewport::Camera;
pub use viewport::ViewportController;

// Custom deserializer for IVec2 written as `[x, y]`
pub(crate) fn deserialize_ivec2<'de, D>(deserializer: D) -> Result<IVec2, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let arr: [i32; 2] = Deserialize::deserialize(deserializer)?;
    Ok(IVec2::new(arr[0], arr[1]))
}
