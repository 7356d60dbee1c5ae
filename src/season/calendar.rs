// Week-by-week calendar generation for a season.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

use crate::{error::{LeagueError, Result}, season::conflict::Conflict, time::{iso_date_format, next_week, parse_date, roll_to_weekday}};

pub const SEASON_END_BREAK_NAME: &str = "Season End Break";
pub const PLAYOFFS_NAME: &str = "Playoffs";
const DEFAULT_BLACKOUT_NAME: &str = "Week Off";

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum WeekType {
    Regular,
    WeekOff,
    Playoffs,
    // Older calendars mark the break before playoffs with its own type.
    SeasonEndBreak,
}

impl WeekType {
    // Check if league matches are played on this week.
    pub fn is_played(&self) -> bool {
        matches!(self, Self::Regular | Self::Playoffs)
    }
}

// A week the operator has chosen to skip.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq, Eq)]
pub struct BlackoutDate {
    #[serde(with = "iso_date_format")]
    pub date: Date,
    pub name: String,
}

impl BlackoutDate {
    pub fn build(date: Date, name: &str) -> Self {
        Self {
            date: date,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq, Eq)]
pub struct WeekEntry {
    pub week_number: u16,   // 0 for blackout weeks.
    #[serde(with = "iso_date_format")]
    pub date: Date,
    pub week_name: String,
    #[serde(rename = "type")]
    pub week_type: WeekType,
    #[serde(default)]
    pub conflicts: Vec<Conflict>,
}

impl WeekEntry {
    pub fn build(week_number: u16, date: Date, week_name: String, week_type: WeekType) -> Self {
        Self {
            week_number: week_number,
            date: date,
            week_name: week_name,
            week_type: week_type,
            conflicts: Vec::new(),
        }
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

// Generate the calendar of a season.
// Regular weeks fall every 7 days from the first play date, blackout weeks take a slot
// without counting towards the season, and the break weeks and playoffs follow the last regular week.
pub fn generate(start_date: Date, weekday: Weekday, season_length: u16, blackout_dates: &[BlackoutDate], season_end_break_weeks: u16) -> Result<Vec<WeekEntry>> {
    if season_length == 0 {
        return Err(LeagueError::invalid_input("season length must be positive"));
    }

    let first_date = roll_to_weekday(start_date, weekday)?;
    if first_date != start_date {
        log::debug!("start date {start_date} is not a {weekday}, season starts on {first_date}");
    }

    let blackouts = blackout_map(blackout_dates, first_date, weekday);
    let mut weeks = Vec::new();
    let mut week_number: u16 = 0;
    let mut date = first_date;

    while week_number < season_length {
        match blackouts.get(&date) {
            Some(blackout) => weeks.push(WeekEntry::build(0, date, blackout_name(blackout), WeekType::WeekOff)),
            None => {
                week_number += 1;
                weeks.push(WeekEntry::build(week_number, date, format!("Week {week_number}"), WeekType::Regular));
            }
        }

        date = next_week(date)?;
    }

    for _ in 0..season_end_break_weeks {
        week_number = next_number(week_number)?;
        weeks.push(WeekEntry::build(week_number, date, SEASON_END_BREAK_NAME.to_string(), WeekType::WeekOff));
        date = next_week(date)?;
    }

    week_number = next_number(week_number)?;
    weeks.push(WeekEntry::build(week_number, date, PLAYOFFS_NAME.to_string(), WeekType::Playoffs));

    log::debug!("generated {} calendar weeks from {first_date} to {date}", weeks.len());
    return Ok(weeks);
}

// Same as generate, for a start date that has not been parsed yet.
pub fn generate_from_iso(start_date: &str, weekday: Weekday, season_length: u16, blackout_dates: &[BlackoutDate], season_end_break_weeks: u16) -> Result<Vec<WeekEntry>> {
    let start = parse_date(start_date)?;
    generate(start, weekday, season_length, blackout_dates, season_end_break_weeks)
}

// Get the date the playoffs are held on.
pub fn season_end_date(weeks: &[WeekEntry]) -> Option<Date> {
    weeks.iter()
        .rev()
        .find(|week| week.week_type == WeekType::Playoffs)
        .map(|week| week.date)
}

// Get the weeks that count towards the season.
pub fn regular_weeks(weeks: &[WeekEntry]) -> impl Iterator<Item = &WeekEntry> {
    weeks.iter().filter(|week| week.week_type == WeekType::Regular)
}

// Index the blackouts by date. The first blackout wins if a date is listed twice.
fn blackout_map(blackout_dates: &[BlackoutDate], first_date: Date, weekday: Weekday) -> HashMap<Date, &BlackoutDate> {
    let mut map = HashMap::new();
    for blackout in blackout_dates {
        if blackout.date.weekday() != weekday || blackout.date < first_date {
            log::warn!("blackout '{}' on {} never falls on a play date", blackout.name, blackout.date);
            continue;
        }

        map.entry(blackout.date).or_insert(blackout);
    }

    return map;
}

fn blackout_name(blackout: &BlackoutDate) -> String {
    match blackout.name.trim().is_empty() {
        true => DEFAULT_BLACKOUT_NAME.to_string(),
        false => blackout.name.clone(),
    }
}

fn next_number(week_number: u16) -> Result<u16> {
    week_number.checked_add(1)
        .ok_or_else(|| LeagueError::invalid_input("too many weeks in the season"))
}
