use bevy_math::IRect;
use bevy_math::IVec2;
use bevy_math::Rect;
use serde::Deserialize;
use serde::Serialize;

use crate::config::ViewportMargins;
use crate::config::validate_margins;

/// Pixel offset of the visible window into the level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Camera {
    pub view_left: i32,
    pub view_bottom: i32,
}

impl Camera {
    pub const ORIGIN: Camera = Camera {
        view_left: 0,
        view_bottom: 0,
    };

    pub fn offset(&self) -> IVec2 {
        IVec2::new(self.view_left, self.view_bottom)
    }

    /// The visible world rectangle for a screen of `screen_size`.
    pub fn viewport(&self, screen_size: IVec2) -> IRect {
        IRect::from_corners(self.offset(), self.offset() + screen_size)
    }
}

/// Scroll the camera so the actor stays inside the margin box.
///
/// The left edge is handled first, then the right edge against the
/// updated offset. Map edges win over margins: the offset never goes
/// below 0 when scrolling left, nor past `map_width_px - screen_width_px`
/// when scrolling right. The result is truncated to whole pixels.
pub fn recompute(
    camera: Camera,
    actor_bounds: Rect,
    map_width_px: f32,
    screen_width_px: i32,
    margin_left: i32,
    margin_right: i32,
) -> Camera {
    let mut view_left = camera.view_left as f32;

    let left_boundary = view_left + margin_left as f32;
    if actor_bounds.min.x < left_boundary {
        view_left -= left_boundary - actor_bounds.min.x;
        if view_left < 0. {
            view_left = 0.;
        }
    }

    let right_boundary = view_left + (screen_width_px - margin_right) as f32;
    if actor_bounds.max.x > right_boundary {
        view_left += actor_bounds.max.x - right_boundary;
        let max_view_left = map_width_px - screen_width_px as f32;
        if view_left > max_view_left {
            view_left = max_view_left;
        }
    }

    Camera {
        view_left: view_left as i32,
        view_bottom: camera.view_bottom,
    }
}

/// [`recompute`] with the per level metrics bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportController {
    screen_size: IVec2,
    margins: ViewportMargins,
    map_width_px: f32,
}

impl ViewportController {
    pub fn new(
        screen_size: IVec2,
        margins: ViewportMargins,
        map_width_px: f32,
    ) -> anyhow::Result<Self> {
        validate_margins(&margins, screen_size.x)?;
        if map_width_px < screen_size.x as f32 {
            anyhow::bail!(
                "map is {map_width_px}px wide, narrower than the {}px screen",
                screen_size.x
            );
        }
        Ok(Self {
            screen_size,
            margins,
            map_width_px,
        })
    }

    pub fn recompute(&self, camera: Camera, actor_bounds: Rect) -> Camera {
        recompute(
            camera,
            actor_bounds,
            self.map_width_px,
            self.screen_size.x,
            self.margins.left,
            self.margins.right,
        )
    }

    pub fn viewport(&self, camera: Camera) -> IRect {
        camera.viewport(self.screen_size)
    }
}
