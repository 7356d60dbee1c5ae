// League configuration, read from JSON.
use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::{LeagueError, Result}, handicap::{threshold::ThresholdChart, HandicapVariant}, types::TeamFormat};

// Numeric bounds of one handicap variant.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq)]
pub struct VariantRules {
    pub min: f64,
    pub max: f64,
    pub decimals: u8,   // Handicaps are rounded to this many decimal places.
}

impl VariantRules {
    pub fn build(min: f64, max: f64, decimals: u8) -> Self {
        Self { min: min, max: max, decimals: decimals }
    }

    // Clamp into range, then round to the variant's precision.
    pub fn normalise(&self, value: f64) -> f64 {
        let factor = 10_f64.powi(self.decimals as i32);
        let rounded = (value.clamp(self.min, self.max) * factor).round() / factor;

        // Rounding must not push the value back outside the range.
        return rounded.clamp(self.min, self.max);
    }

    // The largest absolute value a single handicap can take.
    pub fn magnitude(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq)]
#[serde(default)]
pub struct HandicapRules {
    pub game_limit: usize,  // How many recent games a handicap is computed from.
    pub standard: VariantRules,
    pub reduced: VariantRules,
}

impl Default for HandicapRules {
    fn default() -> Self {
        Self {
            game_limit: 200,
            standard: VariantRules::build(-2.0, 2.0, 0),
            reduced: VariantRules::build(-1.0, 1.0, 0),
        }
    }
}

impl HandicapRules {
    // Get the bounds for a variant. Variant none has no bounds to speak of.
    pub fn variant_rules(&self, variant: HandicapVariant) -> Option<&VariantRules> {
        match variant {
            HandicapVariant::Standard => Some(&self.standard),
            HandicapVariant::Reduced => Some(&self.reduced),
            HandicapVariant::None => None,
        }
    }

    // Get the widest differential two lineups can produce under these rules, before any team bonus.
    pub fn max_lineup_differential(&self, team_format: TeamFormat) -> i32 {
        let per_player = self.standard.magnitude().max(self.reduced.magnitude());
        let per_side = per_player * team_format.players_per_team() as f64;
        return (per_side * 2.0).ceil() as i32;
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq)]
#[serde(default)]
pub struct SeasonDefaults {
    pub season_length: u16,
    pub season_end_break_weeks: u16,
}

impl Default for SeasonDefaults {
    fn default() -> Self {
        Self {
            season_length: 16,
            season_end_break_weeks: 1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq)]
#[serde(default)]
pub struct PlayoffRules {
    pub bracket_capacity: usize,
}

impl Default for PlayoffRules {
    fn default() -> Self {
        Self { bracket_capacity: 8 }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone, PartialEq)]
#[serde(default)]
pub struct LeagueConfig {
    pub handicap: HandicapRules,
    pub season: SeasonDefaults,
    pub playoffs: PlayoffRules,
}

// Loading.
impl LeagueConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        return Ok(config);
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        log::debug!("loaded league configuration from {}", path.display());
        return Self::from_json_str(&json);
    }
}

// Checks.
impl LeagueConfig {
    // Make sure the configuration does not have illegal values.
    pub fn validate(&self) -> Result<()> {
        for (name, rules) in [("standard", &self.handicap.standard), ("reduced", &self.handicap.reduced)] {
            if !(rules.min.is_finite() && rules.max.is_finite()) || rules.min > rules.max {
                return Err(LeagueError::invalid_input(format!(
                    "{name} handicap range {}..{} is not a valid range", rules.min, rules.max
                )));
            }
        }

        // Every differential two lineups can produce needs a threshold row.
        for team_format in [TeamFormat::FiveMan, TeamFormat::EightMan] {
            let needed = self.handicap.max_lineup_differential(team_format);
            let chart = ThresholdChart::for_format(team_format);
            if !chart.covers(-needed..=needed) {
                return Err(LeagueError::invalid_input(format!(
                    "handicap rules allow differentials up to {needed}, beyond the {team_format:?} threshold chart"
                )));
            }
        }

        if self.season.season_length == 0 {
            return Err(LeagueError::invalid_input("season_length must be positive"));
        }

        let capacity = self.playoffs.bracket_capacity;
        if capacity == 0 || capacity % 2 != 0 {
            return Err(LeagueError::invalid_input(format!("bracket capacity {capacity} must be a positive even number")));
        }

        return Ok(());
    }
}
