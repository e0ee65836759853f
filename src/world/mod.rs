//! World domain plugin for Homestead.
//!
//! Responsible for:
//! - Generating the farm grid once at startup from `FarmConfig`
//! - Placing the player and their starter kit on the fresh map
//! - Starting over on NewGameEvent

use bevy::prelude::*;

use crate::config::FarmConfig;
use crate::shared::*;

pub mod generation;

pub use generation::generate_world;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_initial_world).add_systems(
            Update,
            handle_new_game
                .run_if(in_state(GameState::Playing).or(in_state(GameState::Paused))),
        );
    }
}

/// Fresh world, rested player at the centre, starter inventory, new clock.
pub fn new_game_state(config: &FarmConfig) -> (FarmWorld, PlayerState, Inventory, Clock) {
    let world = generate_world(config.world_width, config.world_height, config.world_seed);
    let player = PlayerState::spawn_on(&world, config.max_energy);
    let inventory = Inventory::starter(config.starting_money);
    (world, player, inventory, config.new_clock())
}

fn reset_to_new_game(
    config: &FarmConfig,
    world: &mut FarmWorld,
    player: &mut PlayerState,
    inventory: &mut Inventory,
    clock: &mut Clock,
) {
    let paused = clock.time_paused;
    (*world, *player, *inventory, *clock) = new_game_state(config);
    clock.time_paused = paused;

    info!(
        "[World] Generated {}x{} farm (seed {:?}): {} grass, {} dirt, {} stone, {} water",
        world.width(),
        world.height(),
        config.world_seed,
        world.count_kind(SurfaceKind::Grass),
        world.count_kind(SurfaceKind::Dirt),
        world.count_kind(SurfaceKind::Stone),
        world.count_kind(SurfaceKind::Water),
    );
}

fn spawn_initial_world(
    config: Res<FarmConfig>,
    mut world: ResMut<FarmWorld>,
    mut player: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut clock: ResMut<Clock>,
) {
    reset_to_new_game(&config, &mut world, &mut player, &mut inventory, &mut clock);
}

fn handle_new_game(
    mut events: EventReader<NewGameEvent>,
    config: Res<FarmConfig>,
    mut world: ResMut<FarmWorld>,
    mut player: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut clock: ResMut<Clock>,
) {
    // One reset covers any number of requests in a frame.
    if events.read().count() == 0 {
        return;
    }
    info!("[World] Starting a new game for profile '{}'", config.profile);
    reset_to_new_game(&config, &mut world, &mut player, &mut inventory, &mut clock);
}
