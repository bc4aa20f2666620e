use bevy_math::IRect;
use bevy_math::IVec2;

use crate::actor::Actor;
use crate::level::LayerKind;
use crate::sprite_list::SpriteList;

/// Receives a frame's drawing in order: viewport, layers back to front,
/// the actor, then overlay text.
pub trait Renderer {
    /// Visible world rectangle, `min` is the lower left corner.
    fn set_viewport(&mut self, viewport: IRect);
    fn draw_layer(&mut self, kind: LayerKind, sprites: &SpriteList);
    fn draw_actor(&mut self, actor: &Actor);
    /// `position` is the lower left corner of the text in world pixels.
    fn draw_text(&mut self, text: &str, position: IVec2);
}

pub fn score_text(score: u64) -> String {
    format!("Score: {score}")
}
