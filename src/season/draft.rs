// The state of a season being set up, passed around by value between setup steps.
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

use crate::{
    config::SeasonDefaults, error::Result, season::{calendar::{self, BlackoutDate, WeekEntry}, conflict::{self, ReferenceRange}}, time::iso_date_format
};

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq, Eq)]
pub struct SeasonDraft {
    #[serde(with = "iso_date_format")]
    pub start_date: Date,
    pub weekday: Weekday,
    pub season_length: u16,
    pub season_end_break_weeks: u16,
    #[serde(default)]
    pub blackouts: Vec<BlackoutDate>,
}

// Basics.
impl SeasonDraft {
    pub fn build(start_date: Date, weekday: Weekday, defaults: &SeasonDefaults) -> Self {
        Self {
            start_date: start_date,
            weekday: weekday,
            season_length: defaults.season_length,
            season_end_break_weeks: defaults.season_end_break_weeks,
            blackouts: Vec::new(),
        }
    }

    // Play on the weekday of the start date.
    pub fn starting_on(start_date: Date, defaults: &SeasonDefaults) -> Self {
        Self::build(start_date, start_date.weekday(), defaults)
    }
}

// Functional.
impl SeasonDraft {
    // Add a blackout, or remove it if the date is already blacked out.
    // Return whether the date is blacked out afterwards.
    pub fn toggle_blackout(&mut self, date: Date, name: &str) -> bool {
        match self.blackouts.iter().position(|blackout| blackout.date == date) {
            Some(i) => {
                self.blackouts.remove(i);
                false
            }
            None => {
                self.blackouts.push(BlackoutDate::build(date, name));
                self.blackouts.sort_by_key(|blackout| blackout.date);
                true
            }
        }
    }

    // Blackout every regular week that clashes with something.
    // Return how many blackouts were added.
    pub fn accept_suggestions(&mut self, weeks: &[WeekEntry]) -> usize {
        let mut added = 0;
        for suggestion in conflict::suggested_blackouts(weeks) {
            if self.blackouts.iter().all(|blackout| blackout.date != suggestion.date) {
                self.blackouts.push(suggestion);
                added += 1;
            }
        }

        self.blackouts.sort_by_key(|blackout| blackout.date);
        return added;
    }

    // Generate the calendar and mark the conflicts on it.
    pub fn build_calendar(&self, reference_ranges: &[ReferenceRange]) -> Result<Vec<WeekEntry>> {
        let weeks = calendar::generate(self.start_date, self.weekday, self.season_length, &self.blackouts, self.season_end_break_weeks)?;
        return Ok(conflict::annotate(&weeks, reference_ranges));
    }
}
