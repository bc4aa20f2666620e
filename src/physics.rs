//! Platformer physics: gravity plus axis aligned collision against
//! static solids. No slopes, ladders or moving platforms.

use bevy_math::Rect;
use bevy_math::Vec2;

use crate::actor::Actor;

/// How far below the body we look for ground when deciding if a jump
/// is allowed.
pub const JUMP_PROBE_DISTANCE: f32 = 5.;

/// Advances a controllable actor once per frame.
pub trait PhysicsStepper {
    fn step(&mut self, actor: &mut Actor);
    /// Is the actor standing on something it can jump off?
    fn can_jump(&self, actor: &Actor) -> bool;
}

#[derive(Clone, Debug, Default)]
pub struct PlatformerPhysics {
    solids: Vec<Rect>,
    gravity: f32,
}

impl PlatformerPhysics {
    pub fn new(solids: Vec<Rect>, gravity: f32) -> Self {
        Self { solids, gravity }
    }
}

impl PhysicsStepper for PlatformerPhysics {
    fn step(&mut self, actor: &mut Actor) {
        actor.velocity.y -= self.gravity;

        let body = actor.rect();
        let (y, hit_y) = move_y(body, actor.velocity.y, &self.solids);
        if hit_y {
            actor.velocity.y = 0.;
        }
        let body = translate(body, Vec2::new(0., y - body.min.y));
        // horizontal velocity belongs to input, a wall only stops the motion
        let (x, _) = move_x(body, actor.velocity.x, &self.solids);
        actor.set_min(Vec2::new(x, y));
    }

    fn can_jump(&self, actor: &Actor) -> bool {
        on_platform(actor.rect(), &self.solids)
    }
}

pub fn contains_solid(rect: Rect, solids: &[Rect]) -> bool {
    solids
        .iter()
        .any(|solid| !solid.intersect(rect).is_empty())
}

/// Is there a solid just beneath the body?
pub fn on_platform(body: Rect, solids: &[Rect]) -> bool {
    let probe = translate(body, Vec2::new(0., -JUMP_PROBE_DISTANCE));
    contains_solid(probe, solids)
}

fn translate(rect: Rect, by: Vec2) -> Rect {
    Rect::from_corners(rect.min + by, rect.max + by)
}

/// Sweep `body` horizontally by `dx`. Returns the new left edge and
/// whether a solid stopped the motion. Solids already overlapping the
/// body are ignored.
pub fn move_x(body: Rect, dx: f32, solids: &[Rect]) -> (f32, bool) {
    if dx == 0. {
        return (body.min.x, false);
    }
    let mut allowed = dx;
    let mut collided = false;
    for solid in solids {
        if solid.max.y <= body.min.y || solid.min.y >= body.max.y {
            continue;
        }
        if !solid.intersect(body).is_empty() {
            continue;
        }
        if dx > 0. && solid.min.x >= body.max.x {
            let gap = solid.min.x - body.max.x;
            if gap <= allowed {
                allowed = gap;
                collided = true;
            }
        } else if dx < 0. && solid.max.x <= body.min.x {
            let gap = solid.max.x - body.min.x;
            if gap >= allowed {
                allowed = gap;
                collided = true;
            }
        }
    }
    (body.min.x + allowed, collided)
}

/// Sweep `body` vertically by `dy`. Returns the new bottom edge and
/// whether a solid stopped the motion.
pub fn move_y(body: Rect, dy: f32, solids: &[Rect]) -> (f32, bool) {
    if dy == 0. {
        return (body.min.y, false);
    }
    let mut allowed = dy;
    let mut collided = false;
    for solid in solids {
        if solid.max.x <= body.min.x || solid.min.x >= body.max.x {
            continue;
        }
        if !solid.intersect(body).is_empty() {
            continue;
        }
        if dy > 0. && solid.min.y >= body.max.y {
            // head against a ceiling
            let gap = solid.min.y - body.max.y;
            if gap <= allowed {
                allowed = gap;
                collided = true;
            }
        } else if dy < 0. && solid.max.y <= body.min.y {
            // landing on the top face
            let gap = solid.max.y - body.min.y;
            if gap >= allowed {
                allowed = gap;
                collided = true;
            }
        }
    }
    (body.min.y + allowed, collided)
}
