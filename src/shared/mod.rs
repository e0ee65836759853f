//! Shared components, resources, events, and states for Homestead.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Paused,
}

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
    Snowy,
    /// Representable and persisted, but the daily roll never produces it.
    Stormy,
}

impl Weather {
    /// Whether this weather waters every planted tile at rollover.
    pub fn waters_crops(self) -> bool {
        self == Weather::Rainy
    }
}

/// The in-game clock. Mutated only by the calendar domain; rollover is the
/// only place that reaches into the farm and the player.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Clock {
    pub minute: u8,  // 0-59
    pub hour: u8,    // 0-23, a new day starts at 6
    pub day: u8,     // 1-28
    pub season: Season,
    pub year: u32,   // >= 1
    pub weather: Weather,
    /// Real seconds per clock step.
    pub minute_duration_secs: f32,
    /// Game minutes added per clock step.
    pub minutes_per_step: u8,
    pub time_paused: bool,
    /// Accumulator for real seconds not yet converted into a step. Transient.
    pub elapsed_real_seconds: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            minute: 0,
            hour: DAY_START_HOUR,
            day: 1,
            season: Season::Spring,
            year: 1,
            weather: Weather::Sunny,
            minute_duration_secs: MINUTE_DURATION_SECS,
            minutes_per_step: MINUTES_PER_STEP,
            time_paused: false,
            elapsed_real_seconds: 0.0,
        }
    }
}

impl Clock {
    /// "HH:MM", 24-hour.
    pub fn time_string(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    /// e.g. "Spring 3, Year 1".
    pub fn date_string(&self) -> String {
        format!("{} {}, Year {}", self.season.name(), self.day, self.year)
    }

    pub fn total_days_elapsed(&self) -> u32 {
        (self.year.saturating_sub(1) * DAYS_PER_SEASON as u32 * SEASONS_PER_YEAR as u32)
            + (self.season.index() as u32 * DAYS_PER_SEASON as u32)
            + (self.day as u32).saturating_sub(1)
    }
}

/// The one random source of the simulation: weather rolls and item drops.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub StdRng);

impl Default for SimRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl SimRng {
    /// Deterministic when a seed is given, entropy otherwise.
    pub fn seeded(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self::default(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedKind {
    Parsnip,
    Cauliflower,
    Potato,
    Tomato,
    Corn,
    Pumpkin,
    Wheat,
}

impl SeedKind {
    pub const ALL: [SeedKind; 7] = [
        SeedKind::Parsnip,
        SeedKind::Cauliflower,
        SeedKind::Potato,
        SeedKind::Tomato,
        SeedKind::Corn,
        SeedKind::Pumpkin,
        SeedKind::Wheat,
    ];
}

/// Harvested produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropKind {
    Parsnip,
    Cauliflower,
    Potato,
    Tomato,
    Corn,
    Pumpkin,
    Wheat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Hoe,
    WateringCan,
    Axe,
    Pickaxe,
    Scythe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Seed(SeedKind),
    Produce(CropKind),
    Tool(ToolKind),
    Wood,
    Stone,
    Fiber,
}

impl ItemKind {
    pub fn is_tool(self) -> bool {
        matches!(self, ItemKind::Tool(_))
    }

    pub fn as_seed(self) -> Option<SeedKind> {
        match self {
            ItemKind::Seed(seed) => Some(seed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(kind: ItemKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemPrice {
    pub buy: u32,
    pub sell: u32,
}

/// Buy/sell prices per item. Items without an entry trade for 0.
#[derive(Resource, Debug, Clone, Default)]
pub struct ItemRegistry {
    pub prices: std::collections::HashMap<ItemKind, ItemPrice>,
}

impl ItemRegistry {
    pub fn sell_price(&self, kind: ItemKind) -> u32 {
        self.prices.get(&kind).map(|p| p.sell).unwrap_or(0)
    }

    pub fn buy_price(&self, kind: ItemKind) -> u32 {
        self.prices.get(&kind).map(|p| p.buy).unwrap_or(0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

/// Ordered item list plus money. Slot `i` is `items[i]`; the first
/// `HOTBAR_SLOTS` entries are selectable.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<ItemStack>,
    pub money: u32,
    pub selected_slot: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            money: 0,
            selected_slot: 0,
        }
    }
}

impl Inventory {
    /// The kit a new farmer starts with.
    pub fn starter(money: u32) -> Self {
        let mut inventory = Self {
            money,
            ..Default::default()
        };
        inventory.add_item(ItemKind::Seed(SeedKind::Parsnip), 15);
        inventory.add_item(ItemKind::Tool(ToolKind::WateringCan), 1);
        inventory.add_item(ItemKind::Tool(ToolKind::Hoe), 1);
        inventory.add_item(ItemKind::Tool(ToolKind::Scythe), 1);
        inventory
    }

    /// Add items, stacking onto an existing stack unless it is a tool.
    /// Returns false if a new stack was needed and the list is full.
    pub fn add_item(&mut self, kind: ItemKind, quantity: u32) -> bool {
        if quantity == 0 {
            return true;
        }
        if !kind.is_tool() {
            if let Some(stack) = self.items.iter_mut().find(|s| s.kind == kind) {
                stack.quantity = stack.quantity.saturating_add(quantity);
                return true;
            }
        }
        if self.items.len() >= INVENTORY_SLOTS {
            return false;
        }
        self.items.push(ItemStack::new(kind, quantity));
        true
    }

    /// Remove up to `quantity` from the first stack of `kind`. Empty stacks
    /// are dropped from the list. Returns how many were removed.
    pub fn remove_item(&mut self, kind: ItemKind, quantity: u32) -> u32 {
        let Some(idx) = self.items.iter().position(|s| s.kind == kind) else {
            return 0;
        };
        let stack = &mut self.items[idx];
        let removed = stack.quantity.min(quantity);
        stack.quantity -= removed;
        if stack.quantity == 0 {
            self.items.remove(idx);
        }
        removed
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        self.items
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }

    pub fn has_item(&self, kind: ItemKind, quantity: u32) -> bool {
        self.count(kind) >= quantity
    }

    pub fn current_item(&self) -> Option<&ItemStack> {
        self.items.get(self.selected_slot)
    }

    /// Select a hotbar slot. Slots outside the hotbar are ignored.
    pub fn select_slot(&mut self, slot: usize) -> bool {
        if slot < HOTBAR_SLOTS {
            self.selected_slot = slot;
            true
        } else {
            false
        }
    }

    /// Sell `quantity` of `kind` for its registry price.
    pub fn sell_item(&mut self, registry: &ItemRegistry, kind: ItemKind, quantity: u32) -> bool {
        if quantity == 0 || !self.has_item(kind, quantity) {
            return false;
        }
        self.remove_item(kind, quantity);
        let earned = registry.sell_price(kind).saturating_mul(quantity);
        self.money = self.money.saturating_add(earned);
        true
    }

    /// Buy `quantity` of `kind`. Money is only spent if the items fit.
    pub fn buy_item(&mut self, registry: &ItemRegistry, kind: ItemKind, quantity: u32) -> bool {
        let cost = registry.buy_price(kind).saturating_mul(quantity);
        if quantity == 0 || self.money < cost {
            return false;
        }
        if !self.add_item(kind, quantity) {
            return false;
        }
        self.money -= cost;
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// World-pixel position.
    pub x: f32,
    pub y: f32,
    pub facing: Facing,
    pub energy: u32,
    pub max_energy: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            x: (WORLD_WIDTH / 2) as f32 * TILE_SIZE,
            y: (WORLD_HEIGHT / 2) as f32 * TILE_SIZE,
            facing: Facing::Down,
            energy: MAX_ENERGY,
            max_energy: MAX_ENERGY,
        }
    }
}

impl PlayerState {
    /// A rested player standing on the centre tile of `world`.
    pub fn spawn_on(world: &FarmWorld, max_energy: u32) -> Self {
        Self {
            x: (world.width() / 2) as f32 * TILE_SIZE,
            y: (world.height() / 2) as f32 * TILE_SIZE,
            facing: Facing::Down,
            energy: max_energy,
            max_energy,
        }
    }

    pub fn consume_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_sub(amount);
    }

    pub fn restore_energy(&mut self) {
        self.energy = self.max_energy;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FARM GRID
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Grass,
    Dirt,
    Tilled,
    Watered,
    Stone,
    Wood,
    Water,
    Sand,
}

impl SurfaceKind {
    /// Tilled or watered soil: the only surfaces a crop can sit on.
    pub fn is_soil(self) -> bool {
        matches!(self, SurfaceKind::Tilled | SurfaceKind::Watered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    Seed,
    Sprout,
    Growing,
    Mature,
    Harvestable,
}

impl GrowthStage {
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => GrowthStage::Seed,
            1 => GrowthStage::Sprout,
            2 => GrowthStage::Growing,
            3 => GrowthStage::Mature,
            _ => GrowthStage::Harvestable,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// A planted crop. Owned by exactly one tile; only the grid mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub(crate) seed: SeedKind,
    pub(crate) growth_stage: GrowthStage,
    pub(crate) days_growing: u32,
    pub(crate) days_to_maturity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) kind: SurfaceKind,
    pub(crate) is_watered: bool,
    pub(crate) crop: Option<Crop>,
}

impl Tile {
    pub fn new(kind: SurfaceKind) -> Self {
        Self {
            kind,
            is_watered: false,
            crop: None,
        }
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn is_watered(&self) -> bool {
        self.is_watered
    }

    pub fn crop(&self) -> Option<&Crop> {
        self.crop.as_ref()
    }
}

/// The fixed-size tile grid. Created once, mutated in place, never resized.
/// Tiles are stored row-major: `tiles[y * width + x]`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FarmWorld {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) tiles: Vec<Tile>,
}

impl Default for FarmWorld {
    fn default() -> Self {
        Self::filled(WORLD_WIDTH, WORLD_HEIGHT, SurfaceKind::Grass)
    }
}

impl FarmWorld {
    /// A grid of `width × height` tiles, all of one kind.
    pub fn filled(width: usize, height: usize, kind: SurfaceKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::new(kind); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub(crate) fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    pub(crate) fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        let i = self.index(x, y)?;
        Some(&mut self.tiles[i])
    }

    pub fn tiles(&self) -> impl Iterator<Item = ((i32, i32), &Tile)> {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| (((i % width) as i32, (i / width) as i32), t))
    }

    pub fn count_kind(&self, kind: SurfaceKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }

    pub fn crop_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.crop.is_some()).count()
    }
}

/// Convert a world-pixel coordinate to a tile coordinate.
pub fn world_to_tile(px: f32, py: f32) -> (i32, i32) {
    (
        (px / TILE_SIZE).floor() as i32,
        (py / TILE_SIZE).floor() as i32,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// CROP TABLES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropDef {
    pub seed: SeedKind,
    pub produce: CropKind,
    pub days_to_maturity: u32,
}

/// seed → maturity days and seed → produce. Populated by the data domain.
#[derive(Resource, Debug, Clone, Default)]
pub struct CropRegistry {
    pub crops: std::collections::HashMap<SeedKind, CropDef>,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Sent once per rollover, after crops advanced and energy was restored.
#[derive(Event, Debug, Clone)]
pub struct NewDayEvent {
    pub day: u8,
    pub season: Season,
    pub year: u32,
    pub weather: Weather,
    pub crops_advanced: usize,
}

#[derive(Event, Debug, Clone)]
pub struct SeasonChangeEvent {
    pub new_season: Season,
    pub year: u32,
}

/// Player-facing "go to bed".
#[derive(Event, Debug, Clone)]
pub struct SleepEvent;

/// Use the selected inventory item on a tile.
#[derive(Event, Debug, Clone)]
pub struct ToolUseEvent {
    pub tile_x: i32,
    pub tile_y: i32,
}

#[derive(Event, Debug, Clone)]
pub struct HarvestAttemptEvent {
    pub tile_x: i32,
    pub tile_y: i32,
}

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub tile_x: i32,
    pub tile_y: i32,
    pub item: ItemKind,
}

#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    pub item: ItemKind,
    pub quantity: u32,
}

/// Throw away the current game: fresh world, clock, player and inventory.
#[derive(Event, Debug, Clone)]
pub struct NewGameEvent;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 32.0;
pub const WORLD_WIDTH: usize = 100;
pub const WORLD_HEIGHT: usize = 100;

pub const DAYS_PER_SEASON: u8 = 28;
pub const SEASONS_PER_YEAR: u8 = 4;
pub const DAY_START_HOUR: u8 = 6;
pub const MINUTE_DURATION_SECS: f32 = 0.7;
pub const MINUTES_PER_STEP: u8 = 10;

pub const MAX_ENERGY: u32 = 100;
pub const STARTING_MONEY: u32 = 500;

pub const INVENTORY_SLOTS: usize = 36;
pub const HOTBAR_SLOTS: usize = 10;

pub const DEFAULT_DAYS_TO_MATURITY: u32 = 7;
pub const MAX_GROWTH_STAGE: u32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_strings() {
        let clock = Clock {
            hour: 7,
            minute: 5,
            day: 3,
            ..Default::default()
        };
        assert_eq!(clock.time_string(), "07:05");
        assert_eq!(clock.date_string(), "Spring 3, Year 1");
        assert_eq!(clock.total_days_elapsed(), 2);
    }

    #[test]
    fn test_starter_inventory() {
        let inv = Inventory::starter(STARTING_MONEY);
        assert_eq!(inv.money, 500);
        assert_eq!(inv.count(ItemKind::Seed(SeedKind::Parsnip)), 15);
        assert_eq!(inv.current_item().unwrap().kind, ItemKind::Seed(SeedKind::Parsnip));
        assert!(inv.has_item(ItemKind::Tool(ToolKind::WateringCan), 1));
        assert!(inv.has_item(ItemKind::Tool(ToolKind::Hoe), 1));
        assert!(inv.has_item(ItemKind::Tool(ToolKind::Scythe), 1));
    }

    #[test]
    fn test_items_stack_but_tools_do_not() {
        let mut inv = Inventory::default();
        assert!(inv.add_item(ItemKind::Fiber, 3));
        assert!(inv.add_item(ItemKind::Fiber, 2));
        assert_eq!(inv.items.len(), 1);
        assert_eq!(inv.count(ItemKind::Fiber), 5);

        inv.add_item(ItemKind::Tool(ToolKind::Axe), 1);
        inv.add_item(ItemKind::Tool(ToolKind::Axe), 1);
        assert_eq!(inv.items.len(), 3);
    }

    #[test]
    fn test_full_inventory_rejects_new_stacks() {
        let mut inv = Inventory::default();
        for _ in 0..INVENTORY_SLOTS {
            assert!(inv.add_item(ItemKind::Tool(ToolKind::Hoe), 1));
        }
        assert!(!inv.add_item(ItemKind::Wood, 1));
        assert_eq!(inv.count(ItemKind::Wood), 0);
    }

    #[test]
    fn test_remove_drops_empty_stacks() {
        let mut inv = Inventory::default();
        inv.add_item(ItemKind::Stone, 4);
        assert_eq!(inv.remove_item(ItemKind::Stone, 10), 4);
        assert!(inv.items.is_empty());
        assert_eq!(inv.remove_item(ItemKind::Stone, 1), 0);
    }

    #[test]
    fn test_select_slot_is_limited_to_hotbar() {
        let mut inv = Inventory::default();
        assert!(inv.select_slot(HOTBAR_SLOTS - 1));
        assert!(!inv.select_slot(HOTBAR_SLOTS));
        assert_eq!(inv.selected_slot, HOTBAR_SLOTS - 1);
    }

    #[test]
    fn test_buy_and_sell() {
        let mut registry = ItemRegistry::default();
        registry.prices.insert(
            ItemKind::Seed(SeedKind::Corn),
            ItemPrice { buy: 150, sell: 0 },
        );
        registry.prices.insert(
            ItemKind::Produce(CropKind::Corn),
            ItemPrice { buy: 0, sell: 50 },
        );

        let mut inv = Inventory::starter(200);
        assert!(!inv.buy_item(&registry, ItemKind::Seed(SeedKind::Corn), 2), "too poor");
        assert_eq!(inv.money, 200);
        assert!(inv.buy_item(&registry, ItemKind::Seed(SeedKind::Corn), 1));
        assert_eq!(inv.money, 50);
        assert_eq!(inv.count(ItemKind::Seed(SeedKind::Corn)), 1);

        inv.add_item(ItemKind::Produce(CropKind::Corn), 3);
        assert!(!inv.sell_item(&registry, ItemKind::Produce(CropKind::Corn), 4));
        assert!(inv.sell_item(&registry, ItemKind::Produce(CropKind::Corn), 3));
        assert_eq!(inv.money, 200);
        assert_eq!(inv.count(ItemKind::Produce(CropKind::Corn)), 0);
    }

    #[test]
    fn test_world_to_tile_floors() {
        assert_eq!(world_to_tile(0.0, 31.9), (0, 0));
        assert_eq!(world_to_tile(32.0, 64.0), (1, 2));
        assert_eq!(world_to_tile(-0.5, -33.0), (-1, -2));
    }
}
