//! Data layer: populates the static tables at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the CropRegistry
//! (seed → maturity days, seed → produce) and the ItemRegistry (buy/sell
//! prices) from the hard-coded game-design data defined in submodules,
//! then transitions the game into GameState::Playing.

pub mod crops;
pub mod items;

use bevy::prelude::*;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Single system that populates every registry and then transitions to Playing.
fn load_all_data(
    mut crop_registry: ResMut<CropRegistry>,
    mut item_registry: ResMut<ItemRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("[Data] Populating registries…");

    crops::populate_crops(&mut crop_registry);
    info!("[Data]   Crops loaded: {}", crop_registry.crops.len());

    items::populate_prices(&mut item_registry);
    info!("[Data]   Prices loaded: {}", item_registry.prices.len());

    info!("[Data] All registries populated. Transitioning to Playing.");
    next_state.set(GameState::Playing);
}
