//! Player domain: the collaborator that turns the selected item into grid
//! mutations.
//!
//! Responsible for:
//! - Dispatching ToolUseEvent onto the farm grid with the held item
//! - Dispatching HarvestAttemptEvent
//! - Energy costs and the scythe's fiber drop
//! - Announcing CropHarvestedEvent / ItemPickupEvent

mod actions;

use bevy::prelude::*;

use crate::config::FarmConfig;
use crate::shared::*;

pub use actions::{try_harvest, use_item, ActionOutcome, FarmContext};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_tool_use, handle_harvest_attempt.after(handle_tool_use))
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers shared across sub-modules
// ═══════════════════════════════════════════════════════════════════════════

pub const PLANT_ENERGY_COST: u32 = 2;
pub const HARVEST_ENERGY_COST: u32 = 3;

/// Energy cost for each tool kind. Charged whether or not the swing changed
/// anything.
pub fn energy_cost(tool: ToolKind) -> u32 {
    match tool {
        ToolKind::Hoe => 2,
        ToolKind::WateringCan => 2,
        ToolKind::Scythe => 1,
        ToolKind::Axe => 5,
        ToolKind::Pickaxe => 5,
    }
}

/// Get the facing-direction offset as a grid delta. Rows grow downwards.
pub fn facing_offset(facing: Facing) -> (i32, i32) {
    match facing {
        Facing::Up => (0, -1),
        Facing::Down => (0, 1),
        Facing::Left => (-1, 0),
        Facing::Right => (1, 0),
    }
}

/// The tile directly in front of the player.
pub fn target_tile(player: &PlayerState) -> (i32, i32) {
    let (px, py) = world_to_tile(player.x, player.y);
    let (dx, dy) = facing_offset(player.facing);
    (px + dx, py + dy)
}

// ═══════════════════════════════════════════════════════════════════════════
// Systems
// ═══════════════════════════════════════════════════════════════════════════

#[allow(clippy::too_many_arguments)]
fn handle_tool_use(
    mut events: EventReader<ToolUseEvent>,
    config: Res<FarmConfig>,
    crops: Res<CropRegistry>,
    mut world: ResMut<FarmWorld>,
    mut player: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut rng: ResMut<SimRng>,
    mut pickup_writer: EventWriter<ItemPickupEvent>,
) {
    for event in events.read() {
        let mut ctx = FarmContext {
            world: &mut world,
            player: &mut player,
            inventory: &mut inventory,
            crops: &crops,
        };
        let outcome = use_item(
            &mut ctx,
            event.tile_x,
            event.tile_y,
            config.fiber_drop_chance,
            &mut rng.0,
        );
        debug!(
            "[Player] Used item on ({}, {}): {:?}",
            event.tile_x, event.tile_y, outcome
        );

        if let ActionOutcome::Swung {
            drop: Some(item), ..
        } = outcome
        {
            pickup_writer.send(ItemPickupEvent { item, quantity: 1 });
        }
    }
}

fn handle_harvest_attempt(
    mut events: EventReader<HarvestAttemptEvent>,
    crops: Res<CropRegistry>,
    mut world: ResMut<FarmWorld>,
    mut player: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut harvest_writer: EventWriter<CropHarvestedEvent>,
    mut pickup_writer: EventWriter<ItemPickupEvent>,
) {
    for event in events.read() {
        let mut ctx = FarmContext {
            world: &mut world,
            player: &mut player,
            inventory: &mut inventory,
            crops: &crops,
        };
        if let ActionOutcome::Harvested(item) = try_harvest(&mut ctx, event.tile_x, event.tile_y)
        {
            info!(
                "[Player] Harvested {:?} at ({}, {})",
                item, event.tile_x, event.tile_y
            );
            harvest_writer.send(CropHarvestedEvent {
                tile_x: event.tile_x,
                tile_y: event.tile_y,
                item,
            });
            pickup_writer.send(ItemPickupEvent { item, quantity: 1 });
        }
    }
}
