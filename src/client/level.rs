use bevy::prelude::*;
use bevy::sprite::Anchor;

use platformer::GameEvent;
use platformer::LayerKind;

use super::GameEventMessage;
use super::draw::DrawFrame;
use super::draw::FrameDraw;

pub struct LevelPlugin;

/// A sprite of the level, drawn in the layer it came from.
#[derive(Component)]
pub struct LevelSprite {
    pub kind: LayerKind,
    pub id: u128,
}

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (clear_on_level_load, sync_level_sprites)
                .chain()
                .after(DrawFrame),
        );
    }
}

fn layer_color(kind: LayerKind) -> Color {
    match kind {
        LayerKind::BackObjects => Color::srgba(1., 1., 1., 0.6),
        LayerKind::Ground => Color::srgb(0.36, 0.6, 0.25),
        LayerKind::Goal => Color::srgb(0.8, 0.2, 0.2),
        LayerKind::Collectable => Color::srgb(1., 0.84, 0.),
    }
}

// back to front
fn layer_z(kind: LayerKind) -> f32 {
    match kind {
        LayerKind::BackObjects => -4.,
        LayerKind::Ground => -3.,
        LayerKind::Goal => -2.,
        LayerKind::Collectable => -1.,
    }
}

fn clear_on_level_load(
    mut commands: Commands,
    mut game_events: EventReader<GameEventMessage>,
    sprite_query: Query<Entity, With<LevelSprite>>,
) {
    let level_loaded = game_events
        .read()
        .any(|event| matches!(event.0, GameEvent::LevelLoaded { .. }));
    if !level_loaded {
        return;
    }
    for entity in &sprite_query {
        commands.entity(entity).despawn();
    }
}

/// Spawn sprites that appeared in the frame and despawn the ones that
/// are gone (collected coins).
fn sync_level_sprites(
    mut commands: Commands,
    frame_draw: Res<FrameDraw>,
    sprite_query: Query<(Entity, &LevelSprite)>,
) {
    if !frame_draw.is_changed() {
        return;
    }
    let mut spawned = std::collections::BTreeSet::new();
    for (entity, level_sprite) in &sprite_query {
        let still_drawn = frame_draw
            .layers
            .get(&level_sprite.kind)
            .is_some_and(|sprites| sprites.contains(&level_sprite.id));
        if still_drawn {
            spawned.insert((level_sprite.kind, level_sprite.id));
        } else {
            commands.entity(entity).despawn();
        }
    }
    for (kind, sprites) in &frame_draw.layers {
        for sprite in sprites.iter() {
            if spawned.contains(&(*kind, sprite.id)) {
                continue;
            }
            commands.spawn((
                LevelSprite {
                    kind: *kind,
                    id: sprite.id,
                },
                Name::new(
                    sprite
                        .texture
                        .clone()
                        .unwrap_or_else(|| format!("{kind} {}", sprite.id)),
                ),
                Sprite {
                    color: layer_color(*kind),
                    custom_size: Some(sprite.rect.size()),
                    anchor: Anchor::BottomLeft,
                    ..default()
                },
                Transform::from_translation(sprite.rect.min.extend(layer_z(*kind))),
            ));
        }
    }
}
