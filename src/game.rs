//! The playable level.
//!
//! Anatomy of a frame:
//!   - physics: the actor moves under gravity against the ground layer
//!   - fall check: an actor below the fall threshold is respawned
//!   - camera: the viewport scrolls to keep the actor inside the margins
//!   - animation: the actor picks its next texture (visual only)
//!   - collection: collectibles touched by the actor are scored and removed
//!
//! Input is applied between frames and only touches the actor's velocity.

use anyhow::Context;
use bevy_math::IVec2;
use bevy_math::Vec2;
use serde::Deserialize;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::actor::Actor;
use crate::config::GameConfig;
use crate::game_state::GameStateTracker;
use crate::game_state::Respawn;
use crate::input::InputEvent;
use crate::input::apply_input;
use crate::level::LayerKind;
use crate::level::Level;
use crate::physics::PhysicsStepper;
use crate::physics::PlatformerPhysics;
use crate::render::Renderer;
use crate::render::score_text;
use crate::viewport::Camera;
use crate::viewport::ViewportController;

/// Things that happened inside the game, for the client to react to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelLoaded { name: String, collectables: usize },
    Jumped,
    CoinCollected { id: u128, score: u64 },
    Respawned { position: Vec2 },
}

/// A state the application can be in. There is only one in this game but
/// the client drives it through this interface.
pub trait GameMode {
    fn on_enter(&mut self) -> anyhow::Result<()>;
    fn on_frame(&mut self, delta_time: f32) -> anyhow::Result<()>;
    fn on_input(&mut self, event: InputEvent);
    fn on_exit(&mut self);
}

/// Everything that changes while a level is played.
#[derive(Clone, Debug)]
pub struct PlayState<P: PhysicsStepper = PlatformerPhysics> {
    pub level: Level,
    pub actor: Actor,
    pub camera: Camera,
    pub physics: P,
    pub viewport: ViewportController,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub respawn: Option<Respawn>,
    /// ids of the collectibles picked up this frame
    pub collected: Vec<u128>,
}

/// Run one frame over `state`.
pub fn step_frame<P: PhysicsStepper>(
    state: &mut PlayState<P>,
    tracker: &mut GameStateTracker,
    delta_time: f32,
) -> FrameReport {
    state.physics.step(&mut state.actor);

    let respawn = tracker.on_frame(&mut state.actor, &mut state.camera);

    state.camera = state.viewport.recompute(state.camera, state.actor.rect());

    state.actor.update_animation(delta_time);

    let body = state.actor.rect();
    let collectibles = state.level.layer_mut(LayerKind::Collectable);
    let hits = collectibles.collisions_with(body);
    tracker.on_collect(&hits, collectibles);

    FrameReport {
        respawn,
        collected: hits,
    }
}

#[derive(Clone, Debug)]
enum LevelSource {
    Path(String),
    Preloaded(Level),
}

/// The game view: owns the config, the score and, once entered, the
/// play state.
pub struct GameView {
    config: GameConfig,
    level_source: LevelSource,
    tracker: GameStateTracker,
    state: Option<PlayState>,
    /// Set by [`GameView::subscribe`]. Without a subscriber events are
    /// not queued.
    game_events: Option<flume::Sender<GameEvent>>,
}

impl GameView {
    /// The level is read from `config.level_path` on every `on_enter`.
    pub fn new(config: GameConfig) -> Self {
        let level_source = LevelSource::Path(config.level_path.clone());
        Self::with_source(config, level_source)
    }

    /// Play an already loaded level. Entering again restarts from this
    /// copy.
    pub fn with_level(config: GameConfig, level: Level) -> Self {
        Self::with_source(config, LevelSource::Preloaded(level))
    }

    fn with_source(config: GameConfig, level_source: LevelSource) -> Self {
        let tracker = GameStateTracker::new(config.fall_threshold, config.player.start);
        Self {
            config,
            level_source,
            tracker,
            state: None,
            game_events: None,
        }
    }

    pub fn state(&self) -> Option<&PlayState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut PlayState> {
        self.state.as_mut()
    }

    pub fn tracker(&self) -> &GameStateTracker {
        &self.tracker
    }

    pub fn score(&self) -> u64 {
        self.tracker.score()
    }

    /// Start queueing game events on a new channel and return its
    /// receiver. A previous subscriber stops receiving. The channel is
    /// unbounded, the subscriber is expected to drain it every frame.
    pub fn subscribe(&mut self) -> flume::Receiver<GameEvent> {
        let (sender, receiver) = flume::unbounded();
        self.game_events = Some(sender);
        receiver
    }

    fn emit(&mut self, event: GameEvent) {
        let Some(sender) = &self.game_events else {
            return;
        };
        if sender.send(event).is_err() {
            log::debug!("game event receiver dropped, no longer queueing events");
            self.game_events = None;
        }
    }

    fn setup(&mut self) -> anyhow::Result<()> {
        let level = match &self.level_source {
            LevelSource::Path(path) => Level::load(path)?,
            LevelSource::Preloaded(level) => level.clone(),
        };
        let spawn = level.spawn_location.unwrap_or(self.config.player.start);
        let screen_size = IVec2::new(self.config.screen.width, self.config.screen.height);
        let viewport = ViewportController::new(screen_size, self.config.margins, level.map_width_px())
            .with_context(|| format!("level {} does not fit the viewport", level.name))?;
        let physics = PlatformerPhysics::new(
            level.layer(LayerKind::Ground).rects(),
            self.config.physics.gravity,
        );
        let actor = Actor::new(spawn, self.config.player.size);
        self.tracker.set_spawn_point(spawn);

        let event = GameEvent::LevelLoaded {
            name: level.name.clone(),
            collectables: level.layer(LayerKind::Collectable).len(),
        };
        self.state = Some(PlayState {
            level,
            actor,
            camera: Camera::ORIGIN,
            physics,
            viewport,
        });
        self.emit(event);
        Ok(())
    }

    /// Draw the current frame into `renderer`.
    pub fn on_draw(&self, renderer: &mut impl Renderer) -> anyhow::Result<()> {
        let state = self
            .state
            .as_ref()
            .context("on_draw called before on_enter")?;
        renderer.set_viewport(state.viewport.viewport(state.camera));
        for kind in LayerKind::iter() {
            renderer.draw_layer(kind, state.level.layer(kind));
        }
        renderer.draw_actor(&state.actor);
        renderer.draw_text(
            &score_text(self.score()),
            state.camera.offset() + self.config.score_text_offset,
        );
        Ok(())
    }
}

impl GameMode for GameView {
    /// (Re)start the level. The camera returns to the origin and the actor
    /// to the spawn point; the score carries over.
    fn on_enter(&mut self) -> anyhow::Result<()> {
        self.setup()
    }

    fn on_frame(&mut self, delta_time: f32) -> anyhow::Result<()> {
        let state = self
            .state
            .as_mut()
            .context("on_frame called before on_enter")?;
        let report = step_frame(state, &mut self.tracker, delta_time);
        if let Some(respawn) = report.respawn {
            self.emit(GameEvent::Respawned {
                position: respawn.position,
            });
        }
        // the tracker already counted these, replay the running total
        let first_score = self.tracker.score() - report.collected.len() as u64;
        for (i, id) in report.collected.into_iter().enumerate() {
            self.emit(GameEvent::CoinCollected {
                id,
                score: first_score + i as u64 + 1,
            });
        }
        Ok(())
    }

    fn on_input(&mut self, event: InputEvent) {
        let Some(state) = self.state.as_mut() else {
            log::warn!("input {event:?} before the level was entered");
            return;
        };
        log::debug!("input {event:?}");
        if apply_input(event, &mut state.actor, &state.physics, &self.config.physics) {
            self.emit(GameEvent::Jumped);
        }
    }

    fn on_exit(&mut self) {
        if let Some(state) = self.state.take() {
            log::info!("leaving level {} with score {}", state.level.name, self.score());
        }
    }
}
