// Marking calendar weeks that clash with holidays and championships.
use serde::{Deserialize, Serialize};

use crate::{season::calendar::{BlackoutDate, WeekEntry, WeekType}, time::DateRange};

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictCategory {
    Holiday,
    BcaChampionship,
    ApaChampionship,
}

// Reference data from the league's backend: a named span of days.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq, Eq)]
pub struct ReferenceRange {
    pub name: String,
    pub category: ConflictCategory,
    #[serde(flatten)]
    pub range: DateRange,
}

impl ReferenceRange {
    pub fn build(name: &str, category: ConflictCategory, range: DateRange) -> Self {
        Self {
            name: name.to_string(),
            category: category,
            range: range,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq, Eq)]
pub struct Conflict {
    pub name: String,
    pub category: ConflictCategory,
    pub date_range: DateRange,
}

impl From<&ReferenceRange> for Conflict {
    fn from(reference: &ReferenceRange) -> Self {
        Self {
            name: reference.name.clone(),
            category: reference.category,
            date_range: reference.range,
        }
    }
}

// Attach the overlapping reference ranges to every played week.
// Existing conflicts are replaced, so annotating the same calendar again gives the same result.
pub fn annotate(weeks: &[WeekEntry], reference_ranges: &[ReferenceRange]) -> Vec<WeekEntry> {
    let mut annotated = Vec::with_capacity(weeks.len());
    let mut conflict_count = 0;

    for week in weeks {
        let mut week = week.clone();
        week.conflicts = match week.week_type.is_played() {
            true => conflicts_on(&week, reference_ranges),
            false => Vec::new(),
        };

        conflict_count += week.conflicts.len();
        annotated.push(week);
    }

    log::debug!("found {conflict_count} conflicts across {} weeks", annotated.len());
    return annotated;
}

// Get regular weeks that clash with something, as blackouts the operator may want to add.
pub fn suggested_blackouts(weeks: &[WeekEntry]) -> Vec<BlackoutDate> {
    weeks.iter()
        .filter(|week| week.week_type == WeekType::Regular)
        .filter_map(|week| week.conflicts.first().map(|conflict| BlackoutDate::build(week.date, &conflict.name)))
        .collect()
}

fn conflicts_on(week: &WeekEntry, reference_ranges: &[ReferenceRange]) -> Vec<Conflict> {
    reference_ranges.iter()
        .filter(|reference| reference.range.contains(week.date))
        .map(Conflict::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::calendar::generate;
    use time::{macros::date, Weekday};

    fn references() -> Vec<ReferenceRange> {
        vec![
            ReferenceRange::build("Presidents Day", ConflictCategory::Holiday, DateRange::single_day(date!(2025 - 02 - 17))),
            ReferenceRange::build(
                "BCA Championships", ConflictCategory::BcaChampionship,
                DateRange::build(date!(2025 - 02 - 10), date!(2025 - 02 - 22))
            ),
            ReferenceRange::build(
                "APA World Championships", ConflictCategory::ApaChampionship,
                DateRange::build(date!(2025 - 02 - 15), date!(2025 - 02 - 25))
            ),
        ]
    }

    #[test]
    fn attaches_every_overlapping_range_in_order() {
        // Mondays, so 2025-02-17 hits all three ranges.
        let weeks = generate(date!(2025 - 02 - 03), Weekday::Monday, 4, &[], 0).unwrap();
        let annotated = annotate(&weeks, &references());

        assert!(annotated[0].conflicts.is_empty());
        assert_eq!(annotated[1].conflicts.len(), 1);
        assert_eq!(annotated[1].conflicts[0].category, ConflictCategory::BcaChampionship);

        let names: Vec<&str> = annotated[2].conflicts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Presidents Day", "BCA Championships", "APA World Championships"]);
        assert_eq!(annotated[3].conflicts.len(), 1);
    }

    #[test]
    fn week_off_is_never_annotated() {
        // The blackout sits between the two regular weeks, inside all three ranges.
        let blackouts = [BlackoutDate::build(date!(2025 - 02 - 17), "Presidents Day")];
        let weeks = generate(date!(2025 - 02 - 10), Weekday::Monday, 2, &blackouts, 1).unwrap();
        let annotated = annotate(&weeks, &references());

        let off = annotated.iter().find(|w| w.date == date!(2025 - 02 - 17)).unwrap();
        assert_eq!((off.week_number, off.week_type), (0, WeekType::WeekOff));
        assert_eq!(off.week_name, "Presidents Day");
        assert!(off.conflicts.is_empty());
        assert_eq!(annotated[0].conflicts.len(), 1);
        assert_eq!(annotated[2].date, date!(2025 - 02 - 24));
        assert_eq!(annotated[2].conflicts.len(), 1);
    }

    #[test]
    fn season_end_break_is_never_annotated() {
        // Two regular weeks from 2025-02-03 put the break week on 2025-02-17.
        let weeks = generate(date!(2025 - 02 - 03), Weekday::Monday, 2, &[], 1).unwrap();
        let annotated = annotate(&weeks, &references());

        let break_week = &annotated[2];
        assert_eq!(break_week.date, date!(2025 - 02 - 17));
        assert_eq!(break_week.week_type, WeekType::WeekOff);
        assert!(break_week.conflicts.is_empty());
        assert_eq!(annotated[3].week_type, WeekType::Playoffs);
        assert_eq!(annotated[3].conflicts.len(), 1);
    }

    #[test]
    fn reversed_reference_ranges_still_match() {
        let json = r#"{"name": "BCA Championships", "category": "bca-championship", "start": "2025-02-22", "end": "2025-02-10"}"#;
        let reference: ReferenceRange = serde_json::from_str(json).unwrap();
        let weeks = generate(date!(2025 - 02 - 10), Weekday::Monday, 2, &[], 0).unwrap();

        let annotated = annotate(&weeks, &[reference]);
        assert_eq!(annotated[0].conflicts.len(), 1);
        assert_eq!(annotated[1].conflicts.len(), 1);
        assert_eq!(annotated[0].conflicts[0].date_range.start, date!(2025 - 02 - 10));
    }

    #[test]
    fn playoffs_are_annotated() {
        let weeks = generate(date!(2025 - 02 - 03), Weekday::Monday, 2, &[], 0).unwrap();
        let annotated = annotate(&weeks, &references());
        let playoffs = annotated.last().unwrap();
        assert_eq!(playoffs.week_type, WeekType::Playoffs);
        assert_eq!(playoffs.conflicts.len(), 3);
    }

    #[test]
    fn idempotent() {
        let weeks = generate(date!(2025 - 01 - 06), Weekday::Monday, 10, &[], 1).unwrap();
        let once = annotate(&weeks, &references());
        let twice = annotate(&once, &references());
        assert_eq!(once, twice);
        assert_eq!(once, annotate(&weeks, &references()));
    }

    #[test]
    fn no_references_no_conflicts() {
        let weeks = generate(date!(2025 - 01 - 06), Weekday::Monday, 5, &[], 1).unwrap();
        assert!(annotate(&weeks, &[]).iter().all(|w| !w.has_conflicts()));
    }

    #[test]
    fn suggests_conflicting_regular_weeks() {
        let weeks = generate(date!(2025 - 02 - 03), Weekday::Monday, 4, &[], 0).unwrap();
        let suggestions = suggested_blackouts(&annotate(&weeks, &references()));
        assert_eq!(suggestions, vec![
            BlackoutDate::build(date!(2025 - 02 - 10), "BCA Championships"),
            BlackoutDate::build(date!(2025 - 02 - 17), "Presidents Day"),
            BlackoutDate::build(date!(2025 - 02 - 24), "APA World Championships"),
        ]);
    }

    #[test]
    fn reference_ranges_read_flat_json() {
        let json = r#"{"name": "Thanksgiving", "category": "holiday", "start": "2025-11-27", "end": "2025-11-28"}"#;
        let reference: ReferenceRange = serde_json::from_str(json).unwrap();
        assert_eq!(reference.range.days(), 2);
        assert_eq!(reference.category, ConflictCategory::Holiday);
    }
}
