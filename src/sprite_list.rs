use std::collections::BTreeMap;

use bevy_math::Rect;
use serde::Deserialize;
use serde::Serialize;

/// A static sprite placed by the level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSprite {
    pub id: u128,
    /// world space, y up
    pub rect: Rect,
    pub texture: Option<String>,
}

/// Sprites keyed by id. Ids are never reused, so a removed sprite can't
/// come back under the same id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteList {
    id_counter: u128,
    sprites: BTreeMap<u128, LevelSprite>,
}

impl SpriteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: Rect, texture: Option<String>) -> u128 {
        self.id_counter += 1;
        let id = self.id_counter;
        self.sprites.insert(id, LevelSprite { id, rect, texture });
        id
    }

    pub fn get(&self, id: &u128) -> Option<&LevelSprite> {
        self.sprites.get(id)
    }

    pub fn contains(&self, id: &u128) -> bool {
        self.sprites.contains_key(id)
    }

    pub fn remove(&mut self, id: &u128) -> Option<LevelSprite> {
        self.sprites.remove(id)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelSprite> {
        self.sprites.values()
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.sprites.values().map(|sprite| sprite.rect).collect()
    }

    /// Ids of every sprite overlapping `body` with a non-zero area.
    /// Touching edges is not a collision.
    pub fn collisions_with(&self, body: Rect) -> Vec<u128> {
        self.sprites
            .values()
            .filter(|sprite| !sprite.rect.intersect(body).is_empty())
            .map(|sprite| sprite.id)
            .collect()
    }
}
