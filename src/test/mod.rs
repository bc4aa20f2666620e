//! Scenarios played on the shipped level.

use bevy_math::IRect;
use bevy_math::IVec2;
use bevy_math::Vec2;

use crate::Actor;
use crate::Camera;
use crate::GameConfig;
use crate::GameEvent;
use crate::GameMode;
use crate::GameView;
use crate::InputEvent;
use crate::Key;
use crate::LayerKind;
use crate::Renderer;
use crate::SpriteList;

const STEP: f32 = 1. / 60.;

fn shipped_view() -> GameView {
    let config = GameConfig::load("./assets/config.json5").unwrap();
    let mut view = GameView::new(config);
    view.on_enter().unwrap();
    view
}

fn drain(events: &flume::Receiver<GameEvent>) -> Vec<GameEvent> {
    events.drain().collect()
}

fn run_frames(view: &mut GameView, frames: usize) {
    for _ in 0..frames {
        view.on_frame(STEP).unwrap();
    }
}

fn actor(view: &GameView) -> &Actor {
    &view.state().unwrap().actor
}

fn camera(view: &GameView) -> Camera {
    view.state().unwrap().camera
}

/// Put the actor on the floor with its left edge at `left`.
fn place_on_floor(view: &mut GameView, left: f32) {
    let state = view.state_mut().unwrap();
    state.actor.set_min(Vec2::new(left, 64.));
    state.actor.velocity = Vec2::ZERO;
}

#[test]
fn spawns_at_level_spawn() {
    let view = shipped_view();
    assert_eq!(actor(&view).position, Vec2::new(256., 192.));
    assert_eq!(camera(&view), Camera::ORIGIN);
    assert_eq!(view.score(), 0);
    assert_eq!(view.tracker().spawn_point(), Vec2::new(256., 192.));
}

#[test]
fn walking_right_collects_and_scrolls() {
    let mut view = shipped_view();
    view.on_input(InputEvent::Pressed(Key::Right));
    run_frames(&mut view, 100);

    assert_eq!(view.score(), 3);
    let state = view.state().unwrap();
    assert_eq!(state.level.layer(LayerKind::Collectable).len(), 2);
    assert_eq!(state.actor.bottom(), 64.);
    assert_eq!(state.actor.right(), 1104.);
    // the right margin keeps the actor 300px from the screen edge
    assert_eq!(state.camera.view_left, 1104 - (1152 - 300));

    view.on_input(InputEvent::Released(Key::Right));
    run_frames(&mut view, 10);
    assert_eq!(actor(&view).right(), 1104.);
    assert_eq!(actor(&view).velocity.x, 0.);
}

#[test]
fn holding_left_at_the_start_keeps_the_camera_home() {
    let mut view = shipped_view();
    view.on_input(InputEvent::Pressed(Key::Left));
    run_frames(&mut view, 30);
    assert!(actor(&view).left() < 50.);
    assert_eq!(camera(&view), Camera::ORIGIN);
}

#[test]
fn falling_into_the_pit_respawns() {
    let mut view = shipped_view();
    let events = view.subscribe();
    view.on_input(InputEvent::Pressed(Key::Right));

    let mut respawned = None;
    for _ in 0..400 {
        view.on_frame(STEP).unwrap();
        respawned = drain(&events).into_iter().find_map(|event| match event {
            GameEvent::Respawned { position } => Some(position),
            _ => None,
        });
        if respawned.is_some() {
            break;
        }
    }

    assert_eq!(respawned, Some(Vec2::new(256., 192.)));
    assert_eq!(actor(&view).position, Vec2::new(256., 192.));
    assert_eq!(camera(&view), Camera::ORIGIN);
    // velocity survives the respawn, the right key is still held
    assert_eq!(actor(&view).velocity.x, 8.);
    // collected coins stay collected
    assert_eq!(view.score(), 3);
    assert_eq!(view.tracker().respawn_count(), 1);
}

#[test]
fn camera_stops_at_the_end_of_the_map() {
    let mut view = shipped_view();
    place_on_floor(&mut view, 3300.);
    view.state_mut().unwrap().camera = Camera {
        view_left: 2500,
        view_bottom: 0,
    };
    view.on_input(InputEvent::Pressed(Key::Right));
    run_frames(&mut view, 60);

    let max_view_left = 3840 - 1152;
    assert_eq!(camera(&view).view_left, max_view_left);
    assert!(actor(&view).right() > (max_view_left + 1152 - 300) as f32);
}

#[test]
fn jumping_over_the_crate() {
    let mut view = shipped_view();
    place_on_floor(&mut view, 2400.);
    view.on_input(InputEvent::Pressed(Key::Right));
    run_frames(&mut view, 30);
    // the crate at x 2560 blocks the way
    assert_eq!(actor(&view).right(), 2560.);

    let events = view.subscribe();
    view.on_input(InputEvent::Pressed(Key::Jump));
    assert_eq!(drain(&events), vec![GameEvent::Jumped]);
    run_frames(&mut view, 60);
    assert!(actor(&view).left() > 2624.);
    assert_eq!(actor(&view).bottom(), 64.);
    assert_eq!(actor(&view).velocity.y, 0.);
}

#[derive(Default)]
struct CountingRenderer {
    viewport: Option<IRect>,
    layers: Vec<(LayerKind, usize)>,
    actor_at: Option<Vec2>,
    text: Vec<(String, IVec2)>,
}

impl Renderer for CountingRenderer {
    fn set_viewport(&mut self, viewport: IRect) {
        self.viewport = Some(viewport);
    }

    fn draw_layer(&mut self, kind: LayerKind, sprites: &SpriteList) {
        self.layers.push((kind, sprites.len()));
    }

    fn draw_actor(&mut self, actor: &Actor) {
        self.actor_at = Some(actor.position);
    }

    fn draw_text(&mut self, text: &str, position: IVec2) {
        self.text.push((text.to_string(), position));
    }
}

#[test]
fn draws_every_layer_and_the_score() {
    let mut view = shipped_view();
    view.on_input(InputEvent::Pressed(Key::Right));
    run_frames(&mut view, 100);

    let mut renderer = CountingRenderer::default();
    view.on_draw(&mut renderer).unwrap();
    assert_eq!(renderer.viewport, Some(IRect::new(252, 0, 252 + 1152, 896)));
    assert_eq!(renderer.layers, vec![
        (LayerKind::BackObjects, 5),
        (LayerKind::Ground, 4),
        (LayerKind::Goal, 1),
        (LayerKind::Collectable, 2),
    ]);
    assert_eq!(renderer.actor_at, Some(actor(&view).position));
    assert_eq!(renderer.text, vec![(
        "Score: 3".to_string(),
        IVec2::new(252 + 10, 820)
    )]);
}

#[test]
fn reentering_reloads_the_level() {
    let mut view = shipped_view();
    view.on_input(InputEvent::Pressed(Key::Right));
    run_frames(&mut view, 100);
    view.on_exit();
    view.on_enter().unwrap();

    let state = view.state().unwrap();
    assert_eq!(state.level.layer(LayerKind::Collectable).len(), 5);
    assert_eq!(state.actor.velocity, Vec2::ZERO);
    assert_eq!(state.camera, Camera::ORIGIN);
    assert_eq!(view.score(), 3);
}
