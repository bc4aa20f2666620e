use bevy::prelude::*;
use bevy::sprite::Anchor;

use super::draw::DrawFrame;
use super::draw::FrameDraw;

const SCORE_FONT_SIZE: f32 = 40.;
const SCORE_COLOR: Color = Color::srgb(1., 0.84, 0.);

pub struct HudPlugin;

#[derive(Component)]
pub struct ScoreText;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_score_text)
            .add_systems(Update, sync_score_text.after(DrawFrame));
    }
}

fn spawn_score_text(mut commands: Commands) {
    commands.spawn((
        ScoreText,
        Text2d::default(),
        TextFont {
            font_size: SCORE_FONT_SIZE,
            ..default()
        },
        TextColor(SCORE_COLOR),
        Anchor::BottomLeft,
        Transform::from_translation(Vec3::new(0., 0., 2.)),
    ));
}

/// The score is drawn in world space, it moves with the camera offset.
fn sync_score_text(
    frame_draw: Res<FrameDraw>,
    mut query: Query<(&mut Text2d, &mut Transform), With<ScoreText>>,
) {
    let Some((text, position)) = &frame_draw.text else {
        return;
    };
    let Ok((mut text_2d, mut transform)) = query.single_mut() else {
        return;
    };
    if text_2d.0 != *text {
        text_2d.0 = text.clone();
    }
    transform.translation.x = position.x as f32;
    transform.translation.y = position.y as f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_text_is_large_and_gold() {
        let mut app = App::new();
        app.add_systems(Startup, spawn_score_text);
        app.update();
        let mut query = app
            .world_mut()
            .query_filtered::<(&TextFont, &TextColor), With<ScoreText>>();
        let (font, color) = query.single(app.world()).unwrap();
        assert_eq!(font.font_size, 40.);
        assert_eq!(color.0, Color::srgb(1., 0.84, 0.));
    }
}
