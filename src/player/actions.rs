use rand::Rng;

use super::{energy_cost, HARVEST_ENERGY_COST, PLANT_ENERGY_COST};
use crate::shared::*;

/// Everything a player action may touch, borrowed for one call.
pub struct FarmContext<'a> {
    pub world: &'a mut FarmWorld,
    pub player: &'a mut PlayerState,
    pub inventory: &'a mut Inventory,
    pub crops: &'a CropRegistry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// No energy left; nothing happened.
    Exhausted,
    /// The selected slot is empty or holds something that cannot be used.
    NothingHeld,
    /// A tool was swung and its energy spent. `changed` reports whether the
    /// grid changed; `drop` is an item that went into the inventory.
    Swung {
        tool: ToolKind,
        changed: bool,
        drop: Option<ItemKind>,
    },
    Planted(SeedKind),
    Harvested(ItemKind),
    /// Planting or harvesting did not apply here. No energy is spent.
    Failed,
}

/// Use the selected inventory item on tile (`x`, `y`).
pub fn use_item(
    ctx: &mut FarmContext,
    x: i32,
    y: i32,
    fiber_drop_chance: f64,
    rng: &mut impl Rng,
) -> ActionOutcome {
    let Some(held) = ctx.inventory.current_item().map(|stack| stack.kind) else {
        return ActionOutcome::NothingHeld;
    };
    if ctx.player.energy == 0 {
        return ActionOutcome::Exhausted;
    }

    match held {
        ItemKind::Tool(tool) => swing(ctx, tool, x, y, fiber_drop_chance, rng),
        ItemKind::Seed(seed) => {
            if !ctx.world.plant_seed(x, y, seed, ctx.crops) {
                return ActionOutcome::Failed;
            }
            ctx.inventory.remove_item(held, 1);
            ctx.player.consume_energy(PLANT_ENERGY_COST);
            ActionOutcome::Planted(seed)
        }
        _ => ActionOutcome::NothingHeld,
    }
}

fn swing(
    ctx: &mut FarmContext,
    tool: ToolKind,
    x: i32,
    y: i32,
    fiber_drop_chance: f64,
    rng: &mut impl Rng,
) -> ActionOutcome {
    let mut drop = None;
    let changed = match tool {
        ToolKind::Hoe => ctx.world.till_soil(x, y),
        ToolKind::WateringCan => ctx.world.water_tile(x, y),
        ToolKind::Scythe => {
            let cleared = ctx.world.clear_grass(x, y);
            if cleared
                && rng.gen_bool(fiber_drop_chance.clamp(0.0, 1.0))
                && ctx.inventory.add_item(ItemKind::Fiber, 1)
            {
                drop = Some(ItemKind::Fiber);
            }
            cleared
        }
        // Nothing to chop or break on the farm grid yet.
        ToolKind::Axe | ToolKind::Pickaxe => false,
    };

    ctx.player.consume_energy(energy_cost(tool));
    ActionOutcome::Swung {
        tool,
        changed,
        drop,
    }
}

/// Harvest the crop on tile (`x`, `y`) into the inventory.
pub fn try_harvest(ctx: &mut FarmContext, x: i32, y: i32) -> ActionOutcome {
    if ctx.player.energy == 0 {
        return ActionOutcome::Exhausted;
    }
    let Some(item) = ctx.world.harvest_crop(x, y, ctx.crops) else {
        return ActionOutcome::Failed;
    };

    if !ctx.inventory.add_item(item, 1) {
        bevy::log::warn!("[Player] Inventory full, {:?} was lost", item);
    }
    ctx.player.consume_energy(HARVEST_ENERGY_COST);
    ActionOutcome::Harvested(item)
}
