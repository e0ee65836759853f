//! Calendar domain, the clock of Homestead.
//!
//! Responsible for:
//! - Advancing game time from real elapsed seconds (frame-rate independent)
//! - Day rollover: date, season and year, weather roll, crop growth, energy
//! - Sending NewDayEvent and SeasonChangeEvent
//! - Pausing / unpausing time based on GameState
//! - The sleep action (SleepEvent), which jumps straight to the next morning
//!
//! Rollover is synchronous: the clock, the farm grid and the player are all
//! updated inside the same call, before the next minute can advance.

pub mod weather;

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub use weather::roll_weather;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app
            // Pause time whenever we leave Playing state
            .add_systems(OnEnter(GameState::Playing), resume_time)
            .add_systems(OnExit(GameState::Playing), pause_time)
            .add_systems(
                Update,
                tick_time
                    .run_if(in_state(GameState::Playing))
                    .run_if(time_not_paused),
            )
            .add_systems(
                Update,
                handle_sleep
                    .run_if(in_state(GameState::Playing))
                    .after(tick_time),
            );
    }
}

/// What one rollover did, for logging and event emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRollover {
    pub day: u8,
    pub season: Season,
    pub year: u32,
    pub weather: Weather,
    pub crops_advanced: usize,
    pub season_changed: bool,
}

// ─── Pure clock logic ─────────────────────────────────────────────────────────

/// Feed `delta_secs` of real time into the clock. Every full
/// `minute_duration_secs` advances the clock by one step; a long frame can
/// advance several steps and even several days.
pub fn advance_clock(
    clock: &mut Clock,
    delta_secs: f32,
    world: &mut FarmWorld,
    player: &mut PlayerState,
    rng: &mut impl Rng,
) -> Vec<DayRollover> {
    let mut rollovers = Vec::new();
    if clock.minute_duration_secs <= 0.0 {
        return rollovers;
    }

    clock.elapsed_real_seconds += delta_secs;
    while clock.elapsed_real_seconds >= clock.minute_duration_secs {
        clock.elapsed_real_seconds -= clock.minute_duration_secs;
        if let Some(rollover) = step_clock(clock, world, player, rng) {
            rollovers.push(rollover);
        }
    }
    rollovers
}

/// Advance by `minutes_per_step` game minutes. Returns the rollover if the
/// hour passed midnight.
pub fn step_clock(
    clock: &mut Clock,
    world: &mut FarmWorld,
    player: &mut PlayerState,
    rng: &mut impl Rng,
) -> Option<DayRollover> {
    clock.minute += clock.minutes_per_step;
    while clock.minute >= 60 {
        clock.minute -= 60;
        clock.hour += 1;
    }

    if clock.hour >= 24 {
        Some(roll_over_day(clock, world, player, rng))
    } else {
        None
    }
}

/// Go to bed: the clock jumps to 06:00 and exactly one rollover happens.
pub fn sleep(
    clock: &mut Clock,
    world: &mut FarmWorld,
    player: &mut PlayerState,
    rng: &mut impl Rng,
) -> DayRollover {
    clock.minute = 0;
    clock.elapsed_real_seconds = 0.0;
    roll_over_day(clock, world, player, rng)
}

/// Start a new day with freshly rolled weather.
pub fn roll_over_day(
    clock: &mut Clock,
    world: &mut FarmWorld,
    player: &mut PlayerState,
    rng: &mut impl Rng,
) -> DayRollover {
    let season_changed = advance_date(clock);
    let weather = roll_weather(clock.season, rng);
    finish_rollover(clock, world, player, weather, season_changed)
}

/// Rollover with a known weather for the new day.
pub fn roll_over_day_with_weather(
    clock: &mut Clock,
    world: &mut FarmWorld,
    player: &mut PlayerState,
    weather: Weather,
) -> DayRollover {
    let season_changed = advance_date(clock);
    finish_rollover(clock, world, player, weather, season_changed)
}

/// day += 1 with season/year carry. Returns true if the season changed.
fn advance_date(clock: &mut Clock) -> bool {
    clock.day += 1;
    if clock.day <= DAYS_PER_SEASON {
        return false;
    }

    clock.day = 1;
    let old_season = clock.season;
    clock.season = clock.season.next();
    if old_season == Season::Winter {
        clock.year += 1;
    }
    true
}

fn finish_rollover(
    clock: &mut Clock,
    world: &mut FarmWorld,
    player: &mut PlayerState,
    weather: Weather,
    season_changed: bool,
) -> DayRollover {
    clock.weather = weather;
    clock.hour = DAY_START_HOUR;

    let crops_advanced = world.on_new_day(weather);
    player.restore_energy();

    DayRollover {
        day: clock.day,
        season: clock.season,
        year: clock.year,
        weather,
        crops_advanced,
        season_changed,
    }
}

// ─── Run Conditions ───────────────────────────────────────────────────────────

fn time_not_paused(clock: Res<Clock>) -> bool {
    !clock.time_paused
}

// ─── State transition hooks ───────────────────────────────────────────────────

fn resume_time(mut clock: ResMut<Clock>) {
    clock.time_paused = false;
    info!(
        "[Calendar] Time resumed at {} on {}",
        clock.time_string(),
        clock.date_string()
    );
}

fn pause_time(mut clock: ResMut<Clock>) {
    clock.time_paused = true;
    info!("[Calendar] Time paused");
}

// ─── Systems ──────────────────────────────────────────────────────────────────

fn tick_time(
    time: Res<Time>,
    mut clock: ResMut<Clock>,
    mut world: ResMut<FarmWorld>,
    mut player: ResMut<PlayerState>,
    mut rng: ResMut<SimRng>,
    mut day_writer: EventWriter<NewDayEvent>,
    mut season_writer: EventWriter<SeasonChangeEvent>,
) {
    let rollovers = advance_clock(
        &mut clock,
        time.delta_secs(),
        &mut world,
        &mut player,
        &mut rng.0,
    );
    for rollover in rollovers {
        announce(rollover, &mut day_writer, &mut season_writer);
    }
}

fn handle_sleep(
    mut events: EventReader<SleepEvent>,
    mut clock: ResMut<Clock>,
    mut world: ResMut<FarmWorld>,
    mut player: ResMut<PlayerState>,
    mut rng: ResMut<SimRng>,
    mut day_writer: EventWriter<NewDayEvent>,
    mut season_writer: EventWriter<SeasonChangeEvent>,
) {
    for _ in events.read() {
        info!(
            "[Calendar] Player went to bed at {} on {}",
            clock.time_string(),
            clock.date_string()
        );
        let rollover = sleep(&mut clock, &mut world, &mut player, &mut rng.0);
        announce(rollover, &mut day_writer, &mut season_writer);
    }
}

fn announce(
    rollover: DayRollover,
    day_writer: &mut EventWriter<NewDayEvent>,
    season_writer: &mut EventWriter<SeasonChangeEvent>,
) {
    info!(
        "[Calendar] New day: {} {}, Year {} ({:?}), {} crops grew",
        rollover.season.name(),
        rollover.day,
        rollover.year,
        rollover.weather,
        rollover.crops_advanced
    );

    if rollover.season_changed {
        if rollover.season == Season::Spring {
            info!("[Calendar] Happy new year! Year {}", rollover.year);
        }
        info!(
            "[Calendar] Season changed to {} (Year {})",
            rollover.season.name(),
            rollover.year
        );
        season_writer.send(SeasonChangeEvent {
            new_season: rollover.season,
            year: rollover.year,
        });
    }

    day_writer.send(NewDayEvent {
        day: rollover.day,
        season: rollover.season,
        year: rollover.year,
        weather: rollover.weather,
        crops_advanced: rollover.crops_advanced,
    });
}
