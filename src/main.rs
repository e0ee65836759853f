use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use homestead::config::FarmConfig;
use homestead::shared::*;
use homestead::{calendar, data, player, save, world};

const TICK_RATE_HZ: f64 = 60.0;

fn main() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / TICK_RATE_HZ,
        ))),
        LogPlugin::default(),
        StatesPlugin,
    ));

    // Loaded after LogPlugin so fallbacks are reported.
    let config = FarmConfig::load_or_default(&FarmConfig::default_path());

    app
        // Game state
        .init_state::<GameState>()
        // Configuration
        .insert_resource(SimRng::seeded(config.weather_seed))
        .insert_resource(config)
        // Shared resources
        .init_resource::<Clock>()
        .init_resource::<FarmWorld>()
        .init_resource::<PlayerState>()
        .init_resource::<Inventory>()
        .init_resource::<ItemRegistry>()
        .init_resource::<CropRegistry>()
        // Events
        .add_event::<NewDayEvent>()
        .add_event::<SeasonChangeEvent>()
        .add_event::<SleepEvent>()
        .add_event::<ToolUseEvent>()
        .add_event::<HarvestAttemptEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<ItemPickupEvent>()
        .add_event::<NewGameEvent>()
        // Domain plugins
        .add_plugins(calendar::CalendarPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(save::SavePlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        .run();
}
