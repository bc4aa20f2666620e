use std::collections::BTreeMap;

use bevy::prelude::*;

use platformer::Actor;
use platformer::LayerKind;
use platformer::Renderer;
use platformer::SpriteList;

use super::ActiveGame;

pub struct DrawPlugin;

/// Label for the system that fills [`FrameDraw`]. Entity sync systems run
/// after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrawFrame;

/// The latest frame as drawn by the game view. Systems turn it into
/// sprites, text and the camera position.
#[derive(Resource, Default)]
pub struct FrameDraw {
    pub viewport: IRect,
    pub layers: BTreeMap<LayerKind, SpriteList>,
    pub actor: Option<Actor>,
    pub text: Option<(String, IVec2)>,
}

impl Renderer for FrameDraw {
    fn set_viewport(&mut self, viewport: IRect) {
        self.viewport = viewport;
    }

    fn draw_layer(&mut self, kind: LayerKind, sprites: &SpriteList) {
        if self.layers.get(&kind) != Some(sprites) {
            self.layers.insert(kind, sprites.clone());
        }
    }

    fn draw_actor(&mut self, actor: &Actor) {
        self.actor = Some(actor.clone());
    }

    fn draw_text(&mut self, text: &str, position: IVec2) {
        self.text = Some((text.to_string(), position));
    }
}

impl Plugin for DrawPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameDraw>()
            .add_systems(Update, draw_frame.in_set(DrawFrame));
    }
}

fn draw_frame(active_game: Res<ActiveGame>, mut frame_draw: ResMut<FrameDraw>) {
    if let Err(e) = active_game.0.on_draw(&mut *frame_draw) {
        warn!("nothing to draw: {e:#}");
    }
}
