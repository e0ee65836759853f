//! Farming domain: the tile grid's state machine.
//!
//! Every mutator is an inherent method on `FarmWorld`, takes tile
//! coordinates, and is a silent no-op outside the grid or on a tile in the
//! wrong state. Callers check the returned bool / Option.
//!
//! Surface transitions:
//!   Grass ─clear_grass→ Dirt
//!   Grass | Dirt ─till_soil→ Tilled ─water_tile→ Watered
//!   Watered ─rollover→ Tilled
//!   harvest_crop → Tilled
//!
//! Crops live on Tilled/Watered tiles only and are created, advanced and
//! destroyed exclusively through these methods.

pub mod crops;
pub mod day_end;
pub mod harvest;
pub mod soil;
