//! Harvest: turns a mature crop into produce.

use crate::shared::*;

impl FarmWorld {
    /// Remove a harvestable crop, leave the tile Tilled and hand back the
    /// produce. Immature crops are left untouched.
    pub fn harvest_crop(&mut self, x: i32, y: i32, registry: &CropRegistry) -> Option<ItemKind> {
        let tile = self.tile_mut(x, y)?;
        if !tile.crop.as_ref().is_some_and(Crop::is_harvestable) {
            return None;
        }
        let crop = tile.crop.take()?;
        tile.kind = SurfaceKind::Tilled;
        tile.is_watered = false;
        Some(ItemKind::Produce(registry.produce(crop.seed)))
    }
}
