//! Tilling, watering, grass clearing and external surface resets.

use crate::shared::*;

impl FarmWorld {
    /// Grass or Dirt → Tilled.
    pub fn till_soil(&mut self, x: i32, y: i32) -> bool {
        let Some(tile) = self.tile_mut(x, y) else {
            return false;
        };
        if !matches!(tile.kind, SurfaceKind::Grass | SurfaceKind::Dirt) {
            return false;
        }
        tile.kind = SurfaceKind::Tilled;
        true
    }

    /// Tilled → Watered. Already-watered soil is not watered twice.
    pub fn water_tile(&mut self, x: i32, y: i32) -> bool {
        let Some(tile) = self.tile_mut(x, y) else {
            return false;
        };
        if tile.kind != SurfaceKind::Tilled {
            return false;
        }
        tile.kind = SurfaceKind::Watered;
        tile.is_watered = true;
        true
    }

    /// Grass → Dirt. Any drop (fiber) is the caller's business.
    pub fn clear_grass(&mut self, x: i32, y: i32) -> bool {
        let Some(tile) = self.tile_mut(x, y) else {
            return false;
        };
        if tile.kind != SurfaceKind::Grass {
            return false;
        }
        tile.kind = SurfaceKind::Dirt;
        true
    }

    /// Force a tile's surface. A crop survives only on soil; the watered
    /// flag follows the new kind.
    pub fn set_surface(&mut self, x: i32, y: i32, kind: SurfaceKind) -> bool {
        let Some(tile) = self.tile_mut(x, y) else {
            return false;
        };
        tile.kind = kind;
        tile.is_watered = kind == SurfaceKind::Watered;
        if !kind.is_soil() {
            tile.crop = None;
        }
        true
    }
}
