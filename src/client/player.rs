use bevy::prelude::*;

use platformer::AnimationState;
use platformer::GameMode;
use platformer::InputEvent;
use platformer::Key;

use super::ActiveGame;
use super::draw::DrawFrame;
use super::draw::FrameDraw;

pub struct PlayerPlugin;

#[derive(Component)]
pub struct PlayerSprite;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player)
            .add_systems(Update, input_system.before(DrawFrame))
            .add_systems(Update, sync_player.after(DrawFrame));
    }
}

fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Key::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Key::Right),
        KeyCode::ArrowUp | KeyCode::KeyW | KeyCode::Space => Some(Key::Jump),
        _ => None,
    }
}

fn animation_color(animation: AnimationState) -> Color {
    match animation {
        AnimationState::Standing => Color::srgb(0.9, 0.5, 0.2),
        // alternate shades per walk frame
        AnimationState::Walking { frame } if frame % 2 == 0 => Color::srgb(0.95, 0.55, 0.25),
        AnimationState::Walking { .. } => Color::srgb(0.85, 0.45, 0.15),
        AnimationState::Jumping => Color::srgb(1., 0.65, 0.3),
    }
}

fn spawn_player(mut commands: Commands) {
    commands.spawn((
        PlayerSprite,
        Name::new("idle"),
        Sprite::default(),
        Transform::from_translation(Vec3::new(0., 0., 1.)),
    ));
}

fn input_system(keyboard: Res<ButtonInput<KeyCode>>, mut active_game: ResMut<ActiveGame>) {
    for code in keyboard.get_just_pressed() {
        if let Some(key) = key_for(*code) {
            active_game.0.on_input(InputEvent::Pressed(key));
        }
    }
    for code in keyboard.get_just_released() {
        if let Some(key) = key_for(*code) {
            active_game.0.on_input(InputEvent::Released(key));
        }
    }
}

fn sync_player(
    frame_draw: Res<FrameDraw>,
    mut query: Query<(&mut Transform, &mut Sprite, &mut Name), With<PlayerSprite>>,
) {
    let Some(actor) = &frame_draw.actor else {
        return;
    };
    let Ok((mut transform, mut sprite, mut name)) = query.single_mut() else {
        return;
    };
    transform.translation.x = actor.position.x;
    transform.translation.y = actor.position.y;
    sprite.custom_size = Some(actor.size);
    sprite.flip_x = actor.mirrored();
    sprite.color = animation_color(actor.animation);
    let texture_name = actor.animation.texture_name();
    if name.as_str() != texture_name {
        name.set(texture_name);
    }
}
