use std::path::Path;

use anyhow::Context;
use bevy_math::IVec2;
use bevy_math::Rect;
use bevy_math::Vec2;
use serde::Deserialize;
use serde::Serialize;
use strum::EnumIter;
use strum::IntoEnumIterator;

use crate::deserialize_ivec2;
use crate::sprite_list::SpriteList;

/// Layers of a level in draw order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayerKind {
    BackObjects,
    Ground,
    Goal,
    Collectable,
}

fn default_span() -> IVec2 {
    IVec2::ONE
}

fn default_tile_scaling() -> f32 {
    0.5
}

#[derive(Clone, Debug, Deserialize)]
pub struct TileData {
    /// column and row, rows counted from the bottom of the map
    #[serde(deserialize_with = "deserialize_ivec2")]
    pub tile: IVec2,
    /// number of tiles covered to the right and upward
    #[serde(default = "default_span", deserialize_with = "deserialize_ivec2")]
    pub span: IVec2,
    #[serde(default)]
    pub texture: Option<String>,
}

/// On disk representation of a level.
#[derive(Clone, Debug, Deserialize)]
pub struct LevelData {
    pub name: String,
    /// columns and rows
    #[serde(deserialize_with = "deserialize_ivec2")]
    pub map_size: IVec2,
    /// unscaled tile size in pixels
    #[serde(deserialize_with = "deserialize_ivec2")]
    pub tile_size: IVec2,
    #[serde(default = "default_tile_scaling")]
    pub tile_scaling: f32,
    /// player center in world pixels
    #[serde(default)]
    pub spawn_location: Option<Vec2>,
    #[serde(default)]
    pub back_objects: Option<Vec<TileData>>,
    #[serde(default)]
    pub ground: Option<Vec<TileData>>,
    #[serde(default)]
    pub goal: Option<Vec<TileData>>,
    #[serde(default)]
    pub collectable: Option<Vec<TileData>>,
}

impl LevelData {
    pub fn layer(&self, kind: LayerKind) -> Option<&Vec<TileData>> {
        match kind {
            LayerKind::BackObjects => self.back_objects.as_ref(),
            LayerKind::Ground => self.ground.as_ref(),
            LayerKind::Goal => self.goal.as_ref(),
            LayerKind::Collectable => self.collectable.as_ref(),
        }
    }

    pub fn grid_pixel_size(&self) -> Vec2 {
        self.tile_size.as_vec2() * self.tile_scaling
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.map_size.cmple(IVec2::ZERO).any() {
            anyhow::bail!("map_size must be positive, got {}", self.map_size);
        }
        if self.tile_size.cmple(IVec2::ZERO).any() {
            anyhow::bail!("tile_size must be positive, got {}", self.tile_size);
        }
        if !(self.tile_scaling > 0.) {
            anyhow::bail!("tile_scaling must be positive, got {}", self.tile_scaling);
        }
        for kind in LayerKind::iter() {
            for tile in self.layer(kind).into_iter().flatten() {
                if tile.span.cmple(IVec2::ZERO).any() {
                    anyhow::bail!("{kind} tile at {} has a non-positive span", tile.tile);
                }
                let end = tile.tile + tile.span;
                if tile.tile.cmplt(IVec2::ZERO).any() || end.cmpgt(self.map_size).any() {
                    log::warn!("{kind} tile at {} lies outside the map", tile.tile);
                }
            }
        }
        Ok(())
    }
}

/// A loaded level: sprite lists per layer plus the metrics game logic needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub name: String,
    pub map_size: IVec2,
    pub tile_size: IVec2,
    pub grid_pixel_size: Vec2,
    pub spawn_location: Option<Vec2>,
    back_objects: SpriteList,
    ground: SpriteList,
    goal: SpriteList,
    collectable: SpriteList,
}

impl Level {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read level {}", path.display()))?;
        Self::from_json5_str(&data_str).with_context(|| format!("in {}", path.display()))
    }

    pub fn from_json5_str(data_str: &str) -> anyhow::Result<Self> {
        let data = json5::from_str::<LevelData>(data_str).context("malformed level data")?;
        Self::from_data(&data)
    }

    pub fn from_data(data: &LevelData) -> anyhow::Result<Self> {
        data.validate()?;
        let grid = data.grid_pixel_size();
        let mut level = Level {
            name: data.name.clone(),
            map_size: data.map_size,
            tile_size: data.tile_size,
            grid_pixel_size: grid,
            spawn_location: data.spawn_location,
            back_objects: SpriteList::new(),
            ground: SpriteList::new(),
            goal: SpriteList::new(),
            collectable: SpriteList::new(),
        };
        for kind in LayerKind::iter() {
            let Some(tiles) = data.layer(kind) else {
                log::warn!("no layer named '{kind}' in level {}", data.name);
                continue;
            };
            let sprites = level.layer_mut(kind);
            for tile in tiles {
                let min = tile.tile.as_vec2() * grid;
                let max = (tile.tile + tile.span).as_vec2() * grid;
                sprites.push(Rect::from_corners(min, max), tile.texture.clone());
            }
        }
        log::info!(
            "loaded level {} ({}x{} tiles, {} collectables)",
            level.name,
            level.map_size.x,
            level.map_size.y,
            level.collectable.len()
        );
        Ok(level)
    }

    pub fn layer(&self, kind: LayerKind) -> &SpriteList {
        match kind {
            LayerKind::BackObjects => &self.back_objects,
            LayerKind::Ground => &self.ground,
            LayerKind::Goal => &self.goal,
            LayerKind::Collectable => &self.collectable,
        }
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut SpriteList {
        match kind {
            LayerKind::BackObjects => &mut self.back_objects,
            LayerKind::Ground => &mut self.ground,
            LayerKind::Goal => &mut self.goal,
            LayerKind::Collectable => &mut self.collectable,
        }
    }

    /// Rendered width of the map in pixels, every column at its scaled
    /// size. The camera stops scrolling where the last column ends.
    pub fn map_width_px(&self) -> f32 {
        self.map_size.x as f32 * self.grid_pixel_size.x
    }
}
