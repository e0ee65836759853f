//! Overnight pass over the grid, driven only by the calendar rollover.

use crate::shared::*;

impl FarmWorld {
    /// Advance the grid by one day under the newly rolled `weather`.
    ///
    /// Per tile, in order:
    /// 1. effective watering = persisted flag, or rain on a planted tile
    /// 2. advance the crop if effectively watered
    /// 3. Watered → Tilled, flag cleared
    /// 4. rain leaves planted tiles Watered for the new day
    ///
    /// Returns the number of crops that advanced.
    pub(crate) fn on_new_day(&mut self, weather: Weather) -> usize {
        let raining = weather.waters_crops();
        let mut advanced = 0;

        for tile in &mut self.tiles {
            let rain_soaked = raining && tile.crop.is_some();
            let effectively_watered = tile.is_watered || rain_soaked;

            if effectively_watered {
                if let Some(crop) = tile.crop.as_mut() {
                    crop.advance_growth();
                    advanced += 1;
                }
            }

            if tile.kind == SurfaceKind::Watered {
                tile.kind = SurfaceKind::Tilled;
                tile.is_watered = false;
            }

            if rain_soaked {
                tile.kind = SurfaceKind::Watered;
                tile.is_watered = true;
            }
        }

        advanced
    }
}
