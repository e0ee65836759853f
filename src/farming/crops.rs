//! Crop growth model and planting.

use crate::shared::*;

impl Crop {
    pub(crate) fn new(seed: SeedKind, days_to_maturity: u32) -> Self {
        Self {
            seed,
            growth_stage: GrowthStage::Seed,
            days_growing: 0,
            days_to_maturity: days_to_maturity.max(1),
        }
    }

    pub fn seed(&self) -> SeedKind {
        self.seed
    }

    pub fn growth_stage(&self) -> GrowthStage {
        self.growth_stage
    }

    pub fn days_growing(&self) -> u32 {
        self.days_growing
    }

    pub fn days_to_maturity(&self) -> u32 {
        self.days_to_maturity
    }

    pub fn is_harvestable(&self) -> bool {
        self.days_growing >= self.days_to_maturity
    }

    /// One watered day of growth.
    pub(crate) fn advance_growth(&mut self) {
        self.days_growing = self.days_growing.saturating_add(1);
        self.growth_stage = stage_for(self.days_growing, self.days_to_maturity);
    }
}

/// `min(4, floor(days_growing / days_to_maturity * 5))`.
pub fn stage_for(days_growing: u32, days_to_maturity: u32) -> GrowthStage {
    let maturity = u64::from(days_to_maturity.max(1));
    let bucket = u64::from(days_growing) * 5 / maturity;
    GrowthStage::from_index(bucket.min(u64::from(MAX_GROWTH_STAGE)) as u32)
}

impl FarmWorld {
    /// Plant on empty Tilled/Watered soil.
    pub fn plant_seed(
        &mut self,
        x: i32,
        y: i32,
        seed: SeedKind,
        registry: &CropRegistry,
    ) -> bool {
        let Some(tile) = self.tile_mut(x, y) else {
            return false;
        };
        if !tile.kind.is_soil() || tile.crop.is_some() {
            return false;
        }
        tile.crop = Some(Crop::new(seed, registry.days_to_maturity(seed)));
        true
    }
}
