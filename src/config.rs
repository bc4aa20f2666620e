use std::path::Path;

use anyhow::Context;
use bevy_math::IVec2;
use bevy_math::Vec2;
use serde::Deserialize;
use serde::Serialize;

pub const SCREEN_WIDTH: i32 = 1152;
pub const SCREEN_HEIGHT: i32 = 896;
pub const SCREEN_TITLE: &str = "Platformer";

// pixels per frame
pub const MOVEMENT_SPEED: f32 = 8.;
pub const GRAVITY: f32 = 1.;
pub const PLAYER_JUMP_SPEED: f32 = 20.;

pub const PLAYER_START_X: f32 = 256.;
pub const PLAYER_START_Y: f32 = 192.;

pub const LEFT_VIEWPORT_MARGIN: i32 = 50;
pub const RIGHT_VIEWPORT_MARGIN: i32 = 300;

pub const FALL_THRESHOLD: f32 = -100.;
pub const STEPS_PER_SECOND: u32 = 60;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            title: SCREEN_TITLE.to_string(),
        }
    }
}

/// Distance from each screen edge the player may reach before the
/// camera scrolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportMargins {
    pub left: i32,
    pub right: i32,
}

impl Default for ViewportMargins {
    fn default() -> Self {
        Self {
            left: LEFT_VIEWPORT_MARGIN,
            right: RIGHT_VIEWPORT_MARGIN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub movement_speed: f32,
    pub jump_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            movement_speed: MOVEMENT_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Used when the level does not specify a spawn location.
    pub start: Vec2,
    pub size: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            // the adventurer textures are 96x128
            size: Vec2::new(96., 128.),
        }
    }
}

/// Everything tunable about a play session. Every field is optional in
/// the json5 representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub margins: ViewportMargins,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub fall_threshold: f32,
    /// Score text position relative to the camera offset.
    pub score_text_offset: IVec2,
    pub steps_per_second: u32,
    pub level_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            margins: ViewportMargins::default(),
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            fall_threshold: FALL_THRESHOLD,
            score_text_offset: IVec2::new(10, 820),
            steps_per_second: STEPS_PER_SECOND,
            level_path: "assets/levels/level1.json5".to_string(),
        }
    }
}

impl GameConfig {
    pub fn from_json5_str(data_str: &str) -> anyhow::Result<Self> {
        let config = json5::from_str::<GameConfig>(data_str).context("malformed game config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json5_str(&data_str).with_context(|| format!("in {}", path.display()))
    }

    /// Load the config at `path`, or the defaults if there is no file there.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn step_len_s(&self) -> f64 {
        1. / f64::from(self.steps_per_second)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.screen.width <= 0 || self.screen.height <= 0 {
            anyhow::bail!(
                "screen size must be positive, got {}x{}",
                self.screen.width,
                self.screen.height
            );
        }
        validate_margins(&self.margins, self.screen.width)?;
        if self.physics.gravity <= 0. {
            anyhow::bail!("gravity must be positive, got {}", self.physics.gravity);
        }
        if self.player.size.x <= 0. || self.player.size.y <= 0. {
            anyhow::bail!("player size must be positive, got {}", self.player.size);
        }
        if self.steps_per_second == 0 {
            anyhow::bail!("steps_per_second must be positive");
        }
        Ok(())
    }
}

/// Margins that overlap leave no position where the camera is at rest.
pub fn validate_margins(margins: &ViewportMargins, screen_width: i32) -> anyhow::Result<()> {
    if margins.left < 0 || margins.right < 0 {
        anyhow::bail!(
            "viewport margins must not be negative, got left {} right {}",
            margins.left,
            margins.right
        );
    }
    if margins.left + margins.right >= screen_width {
        anyhow::bail!(
            "viewport margins overlap: left {} + right {} >= screen width {}",
            margins.left,
            margins.right,
            screen_width
        );
    }
    Ok(())
}
