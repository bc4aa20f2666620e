use bevy::prelude::*;

use super::draw::DrawFrame;
use super::draw::FrameDraw;

pub struct ViewportCameraPlugin;

impl Plugin for ViewportCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, follow_viewport.after(DrawFrame));
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// The game decides the viewport, the camera only centers on it.
fn follow_viewport(
    frame_draw: Res<FrameDraw>,
    mut camera: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut camera_transform) = camera.single_mut() else {
        return;
    };
    let center = frame_draw.viewport.as_rect().center();
    camera_transform.translation.x = center.x;
    camera_transform.translation.y = center.y;
}
