//! Headless integration tests for Homestead.
//!
//! These tests drive the real plugins through Bevy's `MinimalPlugins`
//! without a window or GPU, ticking the app by hand and steering time with
//! `TimeUpdateStrategy::ManualDuration`.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use homestead::calendar::CalendarPlugin;
use homestead::config::FarmConfig;
use homestead::data::DataPlugin;
use homestead::player::{target_tile, PlayerPlugin};
use homestead::save::{
    save_game, LoadCompleteEvent, LoadRequestEvent, SaveCompleteEvent, SavePlugin,
    SaveRequestEvent,
};
use homestead::shared::*;
use homestead::world::WorldPlugin;

const FRAME: Duration = Duration::from_millis(100);

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events registered
/// but no domain plugins. Plugins are added per test.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<Clock>()
        .init_resource::<FarmWorld>()
        .init_resource::<PlayerState>()
        .init_resource::<Inventory>()
        .init_resource::<ItemRegistry>()
        .init_resource::<CropRegistry>()
        .insert_resource(SimRng::seeded(Some(7)));

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<NewDayEvent>()
        .add_event::<SeasonChangeEvent>()
        .add_event::<SleepEvent>()
        .add_event::<ToolUseEvent>()
        .add_event::<HarvestAttemptEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<ItemPickupEvent>()
        .add_event::<NewGameEvent>();

    app
}

/// Every domain plugin on a small seeded world, saving under `saves_dir`.
fn build_full_app(saves_dir: &std::path::Path) -> App {
    let config = FarmConfig {
        world_width: 40,
        world_height: 40,
        world_seed: Some(11),
        saves_dir: saves_dir.to_path_buf(),
        profile: "tester".into(),
        ..Default::default()
    };
    build_app_with_config(config)
}

fn build_app_with_config(config: FarmConfig) -> App {
    let mut app = build_test_app();
    app.insert_resource(config)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .add_plugins((
            CalendarPlugin,
            PlayerPlugin,
            WorldPlugin,
            SavePlugin,
            DataPlugin,
        ));
    app
}

/// Ticks until the data layer has moved the game into Playing.
fn boot(app: &mut App) {
    // First update enters Loading and populates registries; second applies NextState.
    app.update();
    app.update();
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing,
        "Expected to reach Playing after loading data"
    );
}

fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

fn clock(app: &App) -> &Clock {
    app.world().resource::<Clock>()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_smoke_transitions_and_ticks() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);
    boot(&mut app);

    let crop_count = app.world().resource::<CropRegistry>().crops.len();
    let price_count = app.world().resource::<ItemRegistry>().prices.len();
    assert_eq!(crop_count, 7, "one crop definition per seed");
    assert!(price_count > 0, "Item registry should be populated during boot");

    // Smoke: run a small frame budget in Playing without panic.
    for _ in 0..120 {
        app.update();
    }
}

#[test]
fn test_startup_generates_configured_world() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_full_app(dir.path());
    boot(&mut app);

    let world = app.world().resource::<FarmWorld>();
    assert_eq!((world.width(), world.height()), (40, 40));
    assert_eq!(world.crop_count(), 0);
    assert_eq!(world.tile(20, 20).unwrap().kind(), SurfaceKind::Grass);

    let player = app.world().resource::<PlayerState>();
    assert_eq!((player.x, player.y), (20.0 * TILE_SIZE, 20.0 * TILE_SIZE));
    let inventory = app.world().resource::<Inventory>();
    assert_eq!(inventory.money, STARTING_MONEY);

    let loads = drain::<LoadCompleteEvent>(&mut app);
    assert!(
        loads.iter().any(|e| e.nothing_to_load),
        "a profile without a save reports nothing to load"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Calendar
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_clock_advances_with_real_time() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_full_app(dir.path());
    boot(&mut app);

    {
        let mut clock = app.world_mut().resource_mut::<Clock>();
        clock.minute_duration_secs = FRAME.as_secs_f32();
        clock.elapsed_real_seconds = 0.0;
        clock.hour = 8;
        clock.minute = 0;
    }
    for _ in 0..6 {
        app.update();
    }

    assert_eq!(clock(&app).time_string(), "09:00");
}

#[test]
fn test_midnight_rollover_sends_new_day() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_full_app(dir.path());
    boot(&mut app);
    drain::<NewDayEvent>(&mut app);

    {
        let mut clock = app.world_mut().resource_mut::<Clock>();
        clock.minute_duration_secs = FRAME.as_secs_f32();
        clock.elapsed_real_seconds = 0.0;
        clock.day = 28;
        clock.season = Season::Winter;
        clock.hour = 23;
        clock.minute = 50;
    }
    app.world_mut().resource_mut::<PlayerState>().energy = 5;
    app.update();

    let clock = clock(&app).clone();
    assert_eq!((clock.day, clock.season, clock.year), (1, Season::Spring, 2));
    assert_eq!(clock.time_string(), "06:00");
    assert_eq!(app.world().resource::<PlayerState>().energy, MAX_ENERGY);

    let days = drain::<NewDayEvent>(&mut app);
    assert_eq!(days.len(), 1, "exactly one rollover");
    assert_eq!(days[0].year, 2);
    let seasons = drain::<SeasonChangeEvent>(&mut app);
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].new_season, Season::Spring);
}

#[test]
fn test_sleep_starts_next_morning() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_full_app(dir.path());
    boot(&mut app);
    drain::<NewDayEvent>(&mut app);

    {
        let mut clock = app.world_mut().resource_mut::<Clock>();
        clock.hour = 15;
        clock.minute = 30;
    }
    app.world_mut().send_event(SleepEvent);
    app.update();

    assert_eq!(clock(&app).day, 2);
    assert_eq!(clock(&app).time_string(), "06:00");
    assert_eq!(drain::<NewDayEvent>(&mut app).len(), 1);
}

#[test]
fn test_time_stops_while_paused() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_full_app(dir.path());
    boot(&mut app);

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Paused);
    app.update();
    assert!(clock(&app).time_paused);

    let before = clock(&app).time_string();
    for _ in 0..50 {
        app.update();
    }
    assert_eq!(clock(&app).time_string(), before);

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();
    assert!(!clock(&app).time_paused);
}

// ─────────────────────────────────────────────────────────────────────────────
// Farming through the player
// ─────────────────────────────────────────────────────────────────────────────

fn use_selected_item(app: &mut App) {
    let (tile_x, tile_y) = target_tile(app.world().resource::<PlayerState>());
    app.world_mut().send_event(ToolUseEvent { tile_x, tile_y });
    app.update();
}

fn select(app: &mut App, kind: ItemKind) {
    let mut inventory = app.world_mut().resource_mut::<Inventory>();
    let slot = inventory
        .items
        .iter()
        .position(|s| s.kind == kind)
        .expect("item should be in the starter kit");
    assert!(inventory.select_slot(slot));
}

#[test]
fn test_full_crop_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_full_app(dir.path());
    boot(&mut app);
    app.world_mut().resource_mut::<Clock>().weather = Weather::Sunny;

    let (tx, ty) = target_tile(app.world().resource::<PlayerState>());

    select(&mut app, ItemKind::Tool(ToolKind::Hoe));
    use_selected_item(&mut app);
    select(&mut app, ItemKind::Seed(SeedKind::Parsnip));
    use_selected_item(&mut app);

    {
        let world = app.world().resource::<FarmWorld>();
        let tile = world.tile(tx, ty).unwrap();
        assert!(tile.kind().is_soil());
        assert_eq!(tile.crop().unwrap().seed(), SeedKind::Parsnip);
    }
    assert_eq!(
        app.world().resource::<Inventory>().count(ItemKind::Seed(SeedKind::Parsnip)),
        14
    );

    // Water every morning and sleep; parsnips need 4 days.
    for day in 0..4 {
        select(&mut app, ItemKind::Tool(ToolKind::WateringCan));
        use_selected_item(&mut app);
        app.world_mut().send_event(SleepEvent);
        app.update();
        let crop_days = app
            .world()
            .resource::<FarmWorld>()
            .tile(tx, ty)
            .unwrap()
            .crop()
            .unwrap()
            .days_growing();
        assert!(crop_days > day, "crop should grow every watered night");
    }

    drain::<CropHarvestedEvent>(&mut app);
    app.world_mut()
        .send_event(HarvestAttemptEvent { tile_x: tx, tile_y: ty });
    app.update();

    let harvested = drain::<CropHarvestedEvent>(&mut app);
    assert_eq!(harvested.len(), 1);
    assert_eq!(harvested[0].item, ItemKind::Produce(CropKind::Parsnip));
    assert_eq!(
        app.world().resource::<Inventory>().count(ItemKind::Produce(CropKind::Parsnip)),
        1
    );
    let tile = app.world().resource::<FarmWorld>().tile(tx, ty).unwrap().clone();
    assert!(tile.crop().is_none());
    assert_eq!(tile.kind(), SurfaceKind::Tilled);
}

// ─────────────────────────────────────────────────────────────────────────────
// Save / Load
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_save_new_game_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_full_app(dir.path());
    boot(&mut app);

    let (tx, ty) = target_tile(app.world().resource::<PlayerState>());
    select(&mut app, ItemKind::Tool(ToolKind::Hoe));
    use_selected_item(&mut app);
    app.world_mut().resource_mut::<Inventory>().money = 4321;

    let saved_world = app.world().resource::<FarmWorld>().clone();
    let saved_player = app.world().resource::<PlayerState>().clone();
    let saved_inventory = app.world().resource::<Inventory>().clone();

    app.world_mut().send_event(SaveRequestEvent);
    app.update();
    let saves = drain::<SaveCompleteEvent>(&mut app);
    assert!(saves.iter().all(|e| e.success), "save failed: {saves:?}");
    assert!(dir.path().join("tester").join("savegame.json").exists());

    app.world_mut().send_event(NewGameEvent);
    app.update();
    assert_eq!(
        app.world().resource::<FarmWorld>().tile(tx, ty).unwrap().kind(),
        SurfaceKind::Grass,
        "new game regenerates the farm"
    );
    assert_eq!(app.world().resource::<Inventory>().money, STARTING_MONEY);

    drain::<LoadCompleteEvent>(&mut app);
    app.world_mut().send_event(LoadRequestEvent);
    app.update();

    let loads = drain::<LoadCompleteEvent>(&mut app);
    assert_eq!(loads.len(), 1);
    assert!(loads[0].success);
    assert_eq!(app.world().resource::<FarmWorld>(), &saved_world);
    assert_eq!(app.world().resource::<PlayerState>().energy, saved_player.energy);
    assert_eq!(app.world().resource::<Inventory>(), &saved_inventory);
}

#[test]
fn test_corrupt_save_keeps_running_game() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_full_app(dir.path());
    boot(&mut app);

    let path = dir.path().join("tester").join("savegame.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json at all").unwrap();

    let before = app.world().resource::<FarmWorld>().clone();
    drain::<LoadCompleteEvent>(&mut app);
    app.world_mut().send_event(LoadRequestEvent);
    app.update();

    let loads = drain::<LoadCompleteEvent>(&mut app);
    assert_eq!(loads.len(), 1);
    assert!(!loads[0].success);
    assert!(!loads[0].nothing_to_load);
    assert!(loads[0].error_message.is_some());
    assert_eq!(app.world().resource::<FarmWorld>(), &before);
}

#[test]
fn test_autosave_on_new_day() {
    let dir = tempfile::tempdir().unwrap();
    let config = FarmConfig {
        world_width: 40,
        world_height: 40,
        saves_dir: dir.path().to_path_buf(),
        profile: "auto".into(),
        autosave_on_new_day: true,
        ..Default::default()
    };
    let mut app = build_app_with_config(config);
    boot(&mut app);

    let path = dir.path().join("auto").join("savegame.json");
    assert!(!path.exists());

    app.world_mut().send_event(SleepEvent);
    for _ in 0..3 {
        app.update();
    }

    assert!(path.exists(), "sleeping should autosave");
    let saved = homestead::save::read_save(&path).unwrap();
    assert_eq!(saved.time.day, 2);
}

#[test]
fn test_startup_resumes_existing_save() {
    let dir = tempfile::tempdir().unwrap();
    let config = FarmConfig {
        world_width: 40,
        world_height: 40,
        saves_dir: dir.path().to_path_buf(),
        profile: "resume".into(),
        ..Default::default()
    };

    // A save made on an earlier run: tilled row, late autumn evening.
    let mut world = homestead::world::generate_world(40, 40, None);
    for x in 10..15 {
        world.till_soil(x, 20);
    }
    let saved_clock = Clock {
        day: 21,
        season: Season::Fall,
        hour: 19,
        minute: 10,
        ..Default::default()
    };
    let player = PlayerState::spawn_on(&world, MAX_ENERGY);
    let inventory = Inventory::starter(77);
    save_game(&config.save_path(), &world, &saved_clock, &player, &inventory).unwrap();

    let mut app = build_app_with_config(config);
    app.update();

    assert_eq!(app.world().resource::<FarmWorld>(), &world);
    assert_eq!(app.world().resource::<Inventory>().money, 77);
    let clock = clock(&app);
    assert_eq!((clock.day, clock.season), (21, Season::Fall));
}
