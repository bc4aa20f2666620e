use bevy_math::Rect;
use bevy_math::Vec2;
use serde::Deserialize;
use serde::Serialize;

/// Number of frames in the walk cycle.
pub const WALK_FRAME_COUNT: usize = 7;
/// Distance travelled before the next walk frame is shown.
pub const TEXTURE_CHANGE_DISTANCE: f32 = 20.;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Standing,
    Walking {
        frame: usize,
    },
    Jumping,
}

impl AnimationState {
    pub fn texture_name(&self) -> String {
        match self {
            AnimationState::Standing => "idle".to_string(),
            AnimationState::Walking { frame } => format!("walk{frame}"),
            AnimationState::Jumping => "jump".to_string(),
        }
    }
}

/// The player controlled body. `position` is the center of the body,
/// velocity is in pixels per frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub animation: AnimationState,
    last_texture_change: Vec2,
}

impl Actor {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            last_texture_change: position,
            ..Default::default()
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.size.x / 2.
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x / 2.
    }

    pub fn bottom(&self) -> f32 {
        self.position.y - self.size.y / 2.
    }

    pub fn top(&self) -> f32 {
        self.position.y + self.size.y / 2.
    }

    /// Move the body so its lower left corner is at `min`.
    pub fn set_min(&mut self, min: Vec2) {
        self.position = min + self.size / 2.;
    }

    /// Whether textures should be mirrored to face left.
    pub fn mirrored(&self) -> bool {
        self.facing == Facing::Left
    }

    /// Pick the animation frame for the current movement. Purely visual.
    pub fn update_animation(&mut self, _delta_time: f32) {
        let velocity = self.velocity;
        let mut change_direction = false;
        if velocity.y == 0. {
            if velocity.x > 0. && self.facing != Facing::Right {
                self.facing = Facing::Right;
                change_direction = true;
            } else if velocity.x < 0. && self.facing != Facing::Left {
                self.facing = Facing::Left;
                change_direction = true;
            }
        }

        if velocity.y != 0. {
            self.animation = AnimationState::Jumping;
            self.last_texture_change = self.position;
            return;
        }
        if velocity.x == 0. {
            self.animation = AnimationState::Standing;
            self.last_texture_change = self.position;
            return;
        }
        let distance = self.position.distance(self.last_texture_change);
        let was_walking = matches!(self.animation, AnimationState::Walking { .. });
        if change_direction || !was_walking || distance >= TEXTURE_CHANGE_DISTANCE {
            self.last_texture_change = self.position;
            let frame = match self.animation {
                AnimationState::Walking { frame } if !change_direction => {
                    (frame + 1) % WALK_FRAME_COUNT
                }
                _ => 0,
            };
            self.animation = AnimationState::Walking { frame };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walker() -> Actor {
        let mut actor = Actor::new(Vec2::new(100., 100.), Vec2::new(96., 128.));
        actor.velocity.x = 8.;
        actor
    }

    #[test]
    fn edges() {
        let actor = Actor::new(Vec2::new(256., 192.), Vec2::new(96., 128.));
        assert_eq!(actor.left(), 208.);
        assert_eq!(actor.right(), 304.);
        assert_eq!(actor.bottom(), 128.);
        assert_eq!(actor.top(), 256.);
        assert_eq!(actor.rect(), Rect::new(208., 128., 304., 256.));
    }

    #[test]
    fn walk_frames_advance_with_distance() {
        let mut actor = walker();
        actor.update_animation(1. / 60.);
        assert_eq!(actor.animation, AnimationState::Walking { frame: 0 });
        // 16 px is not far enough for a new frame
        actor.position.x += 16.;
        actor.update_animation(1. / 60.);
        assert_eq!(actor.animation, AnimationState::Walking { frame: 0 });
        actor.position.x += 8.;
        actor.update_animation(1. / 60.);
        assert_eq!(actor.animation, AnimationState::Walking { frame: 1 });
        assert_eq!(actor.animation.texture_name(), "walk1");
    }

    #[test]
    fn walk_cycle_wraps() {
        let mut actor = walker();
        actor.update_animation(0.);
        for _ in 0..WALK_FRAME_COUNT {
            actor.position.x += TEXTURE_CHANGE_DISTANCE;
            actor.update_animation(0.);
        }
        assert_eq!(actor.animation, AnimationState::Walking { frame: 0 });
    }

    #[test]
    fn turning_and_jumping() {
        let mut actor = walker();
        actor.update_animation(0.);
        assert!(!actor.mirrored());
        actor.velocity.x = -8.;
        actor.update_animation(0.);
        assert_eq!(actor.facing, Facing::Left);
        assert!(actor.mirrored());
        actor.velocity.y = 20.;
        actor.update_animation(0.);
        assert_eq!(actor.animation, AnimationState::Jumping);
        // facing does not change mid air
        actor.velocity.x = 8.;
        actor.update_animation(0.);
        assert_eq!(actor.facing, Facing::Left);
        actor.velocity = Vec2::ZERO;
        actor.update_animation(0.);
        assert_eq!(actor.animation, AnimationState::Standing);
        assert_eq!(actor.animation.texture_name(), "idle");
    }
}
