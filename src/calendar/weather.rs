//! Daily weather roll.

use rand::Rng;

use crate::shared::{Season, Weather};

/// Chance of the season's wet weather on any given day.
pub fn wet_chance(season: Season) -> f64 {
    match season {
        Season::Winter => 0.7,
        Season::Spring => 0.4,
        Season::Summer | Season::Fall => 0.2,
    }
}

/// Roll tomorrow's weather. Winter is Snowy or Sunny; every other season is
/// Rainy or Sunny. Stormy is never produced.
pub fn roll_weather(season: Season, rng: &mut impl Rng) -> Weather {
    if !rng.gen_bool(wet_chance(season)) {
        return Weather::Sunny;
    }
    match season {
        Season::Winter => Weather::Snowy,
        _ => Weather::Rainy,
    }
}
