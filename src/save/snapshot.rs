//! The on-disk shape of a savegame and the checks run before it is applied.

use serde::{Deserialize, Serialize};

use super::SaveError;
use crate::farming::crops::stage_for;
use crate::shared::*;

pub const SAVE_VERSION: u32 = 1;

// ═══════════════════════════════════════════════════════════════════════
// RECORDS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub player: PlayerRecord,
    pub inventory: Inventory,
    pub time: TimeRecord,
    pub world: WorldRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub x: f32,
    pub y: f32,
    pub energy: u32,
    pub max_energy: u32,
    pub facing: Facing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub day: u8,
    pub season: Season,
    pub year: u32,
    pub hour: u8,
    pub minute: u8,
    pub weather: Weather,
}

/// Tiles are column-major: `tiles[x][y]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldRecord {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Vec<Tile>>,
}

impl SaveFile {
    /// Copy the live state. The clock's speed and real-time accumulator are
    /// not part of a save.
    pub fn capture(
        world: &FarmWorld,
        clock: &Clock,
        player: &PlayerState,
        inventory: &Inventory,
    ) -> Self {
        let tiles = (0..world.width)
            .map(|x| {
                (0..world.height)
                    .map(|y| world.tiles[y * world.width + x].clone())
                    .collect()
            })
            .collect();

        Self {
            version: SAVE_VERSION,
            player: PlayerRecord {
                x: player.x,
                y: player.y,
                energy: player.energy,
                max_energy: player.max_energy,
                facing: player.facing,
            },
            inventory: inventory.clone(),
            time: TimeRecord {
                day: clock.day,
                season: clock.season,
                year: clock.year,
                hour: clock.hour,
                minute: clock.minute,
                weather: clock.weather,
            },
            world: WorldRecord {
                width: world.width,
                height: world.height,
                tiles,
            },
        }
    }

    /// Check everything that could make the snapshot unusable against a
    /// world of `expected` (width, height).
    pub fn validate(&self, expected: (usize, usize)) -> Result<(), SaveError> {
        self.validate_time()?;
        self.validate_player()?;
        self.validate_inventory()?;
        self.validate_world(expected)
    }

    fn validate_time(&self) -> Result<(), SaveError> {
        let t = &self.time;
        if t.minute >= 60 || t.hour >= 24 {
            return Err(corrupt(format!("time {:02}:{:02} out of range", t.hour, t.minute)));
        }
        if !(1..=DAYS_PER_SEASON).contains(&t.day) {
            return Err(corrupt(format!("day {} out of range", t.day)));
        }
        if t.year == 0 {
            return Err(corrupt("year 0"));
        }
        Ok(())
    }

    fn validate_player(&self) -> Result<(), SaveError> {
        let p = &self.player;
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(corrupt("player position is not finite"));
        }
        if p.energy > p.max_energy {
            return Err(corrupt(format!(
                "player energy {} exceeds max {}",
                p.energy, p.max_energy
            )));
        }
        Ok(())
    }

    fn validate_inventory(&self) -> Result<(), SaveError> {
        let inv = &self.inventory;
        if inv.items.len() > INVENTORY_SLOTS {
            return Err(corrupt(format!("{} inventory stacks", inv.items.len())));
        }
        if inv.selected_slot >= HOTBAR_SLOTS {
            return Err(corrupt(format!("selected slot {}", inv.selected_slot)));
        }
        if let Some(stack) = inv.items.iter().find(|s| s.quantity == 0) {
            return Err(corrupt(format!("empty stack of {:?}", stack.kind)));
        }
        Ok(())
    }

    fn validate_world(&self, expected: (usize, usize)) -> Result<(), SaveError> {
        let w = &self.world;
        let found = (w.width, w.height);
        if found != expected {
            return Err(SaveError::DimensionMismatch { expected, found });
        }
        if w.tiles.len() != w.width || w.tiles.iter().any(|col| col.len() != w.height) {
            return Err(corrupt(format!(
                "tile array does not match declared size {}x{}",
                w.width, w.height
            )));
        }

        for (x, column) in w.tiles.iter().enumerate() {
            for (y, tile) in column.iter().enumerate() {
                validate_tile(tile).map_err(|reason| corrupt(format!("tile ({x},{y}): {reason}")))?;
            }
        }
        Ok(())
    }

    /// Overwrite the live state. Only call after `validate` succeeded.
    pub fn apply(
        self,
        world: &mut FarmWorld,
        clock: &mut Clock,
        player: &mut PlayerState,
        inventory: &mut Inventory,
    ) {
        let width = self.world.width;
        for (x, column) in self.world.tiles.into_iter().enumerate() {
            for (y, tile) in column.into_iter().enumerate() {
                world.tiles[y * width + x] = tile;
            }
        }

        clock.day = self.time.day;
        clock.season = self.time.season;
        clock.year = self.time.year;
        clock.hour = self.time.hour;
        clock.minute = self.time.minute;
        clock.weather = self.time.weather;
        clock.elapsed_real_seconds = 0.0;

        player.x = self.player.x;
        player.y = self.player.y;
        player.energy = self.player.energy;
        player.max_energy = self.player.max_energy;
        player.facing = self.player.facing;

        *inventory = self.inventory;
    }
}

fn validate_tile(tile: &Tile) -> Result<(), String> {
    if tile.is_watered && tile.kind != SurfaceKind::Watered {
        return Err(format!("watered flag on {:?}", tile.kind));
    }
    let Some(crop) = &tile.crop else {
        return Ok(());
    };
    if !tile.kind.is_soil() {
        return Err(format!("crop on {:?}", tile.kind));
    }
    if crop.days_to_maturity == 0 {
        return Err("crop with zero days to maturity".to_string());
    }
    let expected = stage_for(crop.days_growing, crop.days_to_maturity);
    if crop.growth_stage != expected {
        return Err(format!(
            "growth stage {:?} after {} of {} days, expected {:?}",
            crop.growth_stage, crop.days_growing, crop.days_to_maturity, expected
        ));
    }
    Ok(())
}

fn corrupt(reason: impl Into<String>) -> SaveError {
    SaveError::Corrupt(reason.into())
}
