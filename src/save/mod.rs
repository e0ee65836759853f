//! Save domain: one savegame per profile, as pretty JSON.
//!
//! Loading validates the whole snapshot before touching any resource, so a
//! corrupt or mismatched file leaves the running game exactly as it was.

pub mod snapshot;

use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::FarmConfig;
use crate::shared::*;

pub use snapshot::{SaveFile, SAVE_VERSION};

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("no save at {}", .0.display())]
    NotFound(PathBuf),

    #[error("save is corrupt: {0}")]
    Corrupt(String),

    #[error(
        "save is for a {}x{} world, this world is {}x{}",
        .found.0, .found.1, .expected.0, .expected.1
    )]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("cannot encode save: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Save the current game to the configured profile.
#[derive(Event, Debug, Clone)]
pub struct SaveRequestEvent;

/// Replace the current game with the configured profile's save.
#[derive(Event, Debug, Clone)]
pub struct LoadRequestEvent;

/// Sent by SavePlugin after a save completes (success or failure).
#[derive(Event, Debug, Clone)]
pub struct SaveCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

/// Sent by SavePlugin after a load attempt. `nothing_to_load` marks a
/// missing save, which is not an error.
#[derive(Event, Debug, Clone)]
pub struct LoadCompleteEvent {
    pub success: bool,
    pub nothing_to_load: bool,
    pub error_message: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveRequestEvent>()
            .add_event::<LoadRequestEvent>()
            .add_event::<SaveCompleteEvent>()
            .add_event::<LoadCompleteEvent>()
            // The world is generated in Startup; a saved game replaces it.
            .add_systems(PostStartup, resume_saved_game)
            .add_systems(
                Update,
                (autosave_on_new_day, handle_save_request, handle_load_request)
                    .chain()
                    .run_if(in_state(GameState::Playing).or(in_state(GameState::Paused))),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ENCODING & FILESYSTEM
// ═══════════════════════════════════════════════════════════════════════

pub fn encode(file: &SaveFile) -> Result<String, SaveError> {
    serde_json::to_string_pretty(file).map_err(SaveError::Encode)
}

pub fn decode(json: &str) -> Result<SaveFile, SaveError> {
    let file: SaveFile =
        serde_json::from_str(json).map_err(|e| SaveError::Corrupt(e.to_string()))?;

    // Future versions can add migration here
    if file.version != SAVE_VERSION {
        warn!(
            "[Save] Save has version {} but current version is {}. Attempting to load anyway.",
            file.version, SAVE_VERSION
        );
    }
    Ok(file)
}

/// Write `file` to `path`, creating parent directories. Goes through a temp
/// file and a rename so a crash never leaves a truncated save.
pub fn write_save(path: &Path, file: &SaveFile) -> Result<(), SaveError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
    }

    let json = encode(file)?;
    let tmp_path = path.with_extension("json.tmp");
    if let Err(e) = fs::write(&tmp_path, json) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(&tmp_path, e));
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(path, e));
    }
    Ok(())
}

pub fn read_save(path: &Path) -> Result<SaveFile, SaveError> {
    if !path.exists() {
        return Err(SaveError::NotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    decode(&json)
}

fn io_error(path: &Path, source: std::io::Error) -> SaveError {
    SaveError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Snapshot the live state to `path`.
pub fn save_game(
    path: &Path,
    world: &FarmWorld,
    clock: &Clock,
    player: &PlayerState,
    inventory: &Inventory,
) -> Result<(), SaveError> {
    write_save(path, &SaveFile::capture(world, clock, player, inventory))
}

/// Read, validate, then apply. On any error nothing is modified.
pub fn load_game(
    path: &Path,
    world: &mut FarmWorld,
    clock: &mut Clock,
    player: &mut PlayerState,
    inventory: &mut Inventory,
) -> Result<(), SaveError> {
    let file = read_save(path)?;
    file.validate((world.width(), world.height()))?;
    file.apply(world, clock, player, inventory);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn handle_save_request(
    mut save_events: EventReader<SaveRequestEvent>,
    mut complete_events: EventWriter<SaveCompleteEvent>,
    config: Res<FarmConfig>,
    world: Res<FarmWorld>,
    clock: Res<Clock>,
    player: Res<PlayerState>,
    inventory: Res<Inventory>,
) {
    // Several requests in one frame would write the same bytes.
    if save_events.read().count() == 0 {
        return;
    }

    let path = config.save_path();
    info!("[Save] Saving to {}...", path.display());

    match save_game(&path, &world, &clock, &player, &inventory) {
        Ok(()) => {
            info!("[Save] Saved {} {}", clock.date_string(), clock.time_string());
            complete_events.send(SaveCompleteEvent {
                success: true,
                error_message: None,
            });
        }
        Err(e) => {
            warn!("[Save] Save FAILED: {}", e);
            complete_events.send(SaveCompleteEvent {
                success: false,
                error_message: Some(e.to_string()),
            });
        }
    }
}

fn handle_load_request(
    mut load_events: EventReader<LoadRequestEvent>,
    mut complete_events: EventWriter<LoadCompleteEvent>,
    config: Res<FarmConfig>,
    mut world: ResMut<FarmWorld>,
    mut clock: ResMut<Clock>,
    mut player: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
) {
    for _ in load_events.read() {
        let path = config.save_path();
        info!("[Save] Loading from {}...", path.display());
        let result = load_game(&path, &mut world, &mut clock, &mut player, &mut inventory);
        complete_events.send(report_load(result, &clock));
    }
}

/// Pick up where the profile left off, if it has a save.
fn resume_saved_game(
    mut complete_events: EventWriter<LoadCompleteEvent>,
    config: Res<FarmConfig>,
    mut world: ResMut<FarmWorld>,
    mut clock: ResMut<Clock>,
    mut player: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
) {
    let path = config.save_path();
    let result = load_game(&path, &mut world, &mut clock, &mut player, &mut inventory);
    complete_events.send(report_load(result, &clock));
}

fn report_load(result: Result<(), SaveError>, clock: &Clock) -> LoadCompleteEvent {
    match result {
        Ok(()) => {
            info!("[Save] Loaded {} {}", clock.date_string(), clock.time_string());
            LoadCompleteEvent {
                success: true,
                nothing_to_load: false,
                error_message: None,
            }
        }
        Err(SaveError::NotFound(path)) => {
            info!("[Save] Nothing to load at {}", path.display());
            LoadCompleteEvent {
                success: false,
                nothing_to_load: true,
                error_message: None,
            }
        }
        Err(e) => {
            warn!("[Save] Load FAILED, keeping current game: {}", e);
            LoadCompleteEvent {
                success: false,
                nothing_to_load: false,
                error_message: Some(e.to_string()),
            }
        }
    }
}

/// Listen for NewDayEvent and autosave when the config asks for it.
fn autosave_on_new_day(
    mut new_day_events: EventReader<NewDayEvent>,
    mut save_writer: EventWriter<SaveRequestEvent>,
    config: Res<FarmConfig>,
) {
    for ev in new_day_events.read() {
        if !config.autosave_on_new_day {
            continue;
        }
        info!(
            "[Save] Autosaving at start of {} {}, Year {}",
            ev.season.name(),
            ev.day,
            ev.year
        );
        save_writer.send(SaveRequestEvent);
    }
}
