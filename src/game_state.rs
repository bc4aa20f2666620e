use bevy_math::Vec2;
use serde::Deserialize;
use serde::Serialize;

use crate::actor::Actor;
use crate::sprite_list::SpriteList;
use crate::viewport::Camera;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Alive,
    /// Only observable inside [`GameStateTracker::on_frame`], the actor
    /// is repositioned and the tracker goes back to `Alive` in the same
    /// frame.
    Respawning,
}

/// Where to put the actor and camera after falling out of the level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Respawn {
    pub position: Vec2,
    pub camera: Camera,
}

/// Decide whether an actor at height `actor_y` has fallen out of the level.
pub fn check_fall(actor_y: f32, fall_threshold: f32, spawn_point: Vec2) -> Option<Respawn> {
    if actor_y < fall_threshold {
        Some(Respawn {
            position: spawn_point,
            camera: Camera::ORIGIN,
        })
    } else {
        None
    }
}

/// Score and respawn bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateTracker {
    score: u64,
    phase: Phase,
    respawn_count: u64,
    fall_threshold: f32,
    spawn_point: Vec2,
}

impl GameStateTracker {
    pub fn new(fall_threshold: f32, spawn_point: Vec2) -> Self {
        Self {
            fall_threshold,
            spawn_point,
            ..Default::default()
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn respawn_count(&self) -> u64 {
        self.respawn_count
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    /// Used when a new level provides a different spawn point. The score
    /// is kept.
    pub fn set_spawn_point(&mut self, spawn_point: Vec2) {
        self.spawn_point = spawn_point;
    }

    /// Respawn the actor if it fell below the threshold. Velocity is left
    /// untouched.
    pub fn on_frame(&mut self, actor: &mut Actor, camera: &mut Camera) -> Option<Respawn> {
        let respawn = check_fall(actor.position.y, self.fall_threshold, self.spawn_point)?;
        self.phase = Phase::Respawning;
        actor.position = respawn.position;
        *camera = respawn.camera;
        self.respawn_count += 1;
        self.phase = Phase::Alive;
        log::info!(
            "actor fell below {}, respawned at {} ({} respawns)",
            self.fall_threshold,
            respawn.position,
            self.respawn_count
        );
        Some(respawn)
    }

    /// Remove each collected sprite and score a point for it. Ids that are
    /// no longer in `collectibles` are ignored. Returns the points added.
    pub fn on_collect(&mut self, collected: &[u128], collectibles: &mut SpriteList) -> u64 {
        let mut added = 0;
        for id in collected {
            if collectibles.remove(id).is_some() {
                added += 1;
            }
        }
        self.score += added;
        added
    }
}
