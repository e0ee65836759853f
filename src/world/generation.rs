//! One-shot procedural farm generation.
//!
//! Three passes over a fresh Grass grid, each overriding the last:
//! 1. coordinate noise paints Dirt and (inside a horizontal band) Stone
//! 2. a small pond is carved at (width/3, height/3)
//! 3. a 31×31 Grass patch at the centre guarantees farmable land
//!
//! Without a seed the result is fully determined by the grid size.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::shared::*;

const NOISE_SCALE: f64 = 0.1;
const DIRT_THRESHOLD: f64 = -0.3;
const STONE_THRESHOLD: f64 = 0.4;
/// Stone only appears in rows strictly inside this margin from the edges.
const STONE_BAND_MARGIN: usize = 10;

const POND_HALF_WIDTH: i32 = 4;
const POND_HALF_HEIGHT: i32 = 3;
const POND_RADIUS_SQ: i32 = 12;

const FARM_PATCH_HALF: i32 = 15;

/// Build a populated grid. No crops are present.
pub fn generate_world(width: usize, height: usize, seed: Option<u64>) -> FarmWorld {
    let mut world = FarmWorld::filled(width, height, SurfaceKind::Grass);
    let offset = noise_offset(seed);

    paint_noise(&mut world, offset);
    carve_pond(&mut world);
    clear_farm_patch(&mut world);

    world
}

/// Seeded runs shift the sample window; unseeded runs sample at the origin.
fn noise_offset(seed: Option<u64>) -> (f64, f64) {
    match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            (rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0))
        }
        None => (0.0, 0.0),
    }
}

/// Hash-style pseudo noise in (-1, 1). Keeps the sign of the sine.
pub fn coordinate_noise(x: f64, y: f64) -> f64 {
    ((x * 12.9898 + y * 78.233).sin() * 43758.5453) % 1.0
}

fn paint_noise(world: &mut FarmWorld, offset: (f64, f64)) {
    let (width, height) = (world.width, world.height);
    for y in 0..height {
        for x in 0..width {
            let noise = coordinate_noise(
                x as f64 * NOISE_SCALE + offset.0,
                y as f64 * NOISE_SCALE + offset.1,
            );
            let in_stone_band =
                y > STONE_BAND_MARGIN && y + STONE_BAND_MARGIN < height;

            let kind = if noise < DIRT_THRESHOLD {
                SurfaceKind::Dirt
            } else if noise > STONE_THRESHOLD && in_stone_band {
                SurfaceKind::Stone
            } else {
                continue;
            };
            world.tiles[y * width + x].kind = kind;
        }
    }
}

fn carve_pond(world: &mut FarmWorld) {
    let cx = (world.width / 3) as i32;
    let cy = (world.height / 3) as i32;
    for dy in -POND_HALF_HEIGHT..=POND_HALF_HEIGHT {
        for dx in -POND_HALF_WIDTH..=POND_HALF_WIDTH {
            if dx * dx + dy * dy >= POND_RADIUS_SQ {
                continue;
            }
            if let Some(tile) = world.tile_mut(cx + dx, cy + dy) {
                tile.kind = SurfaceKind::Water;
            }
        }
    }
}

fn clear_farm_patch(world: &mut FarmWorld) {
    let cx = (world.width / 2) as i32;
    let cy = (world.height / 2) as i32;
    for dy in -FARM_PATCH_HALF..=FARM_PATCH_HALF {
        for dx in -FARM_PATCH_HALF..=FARM_PATCH_HALF {
            if let Some(tile) = world.tile_mut(cx + dx, cy + dy) {
                tile.kind = SurfaceKind::Grass;
            }
        }
    }
}
