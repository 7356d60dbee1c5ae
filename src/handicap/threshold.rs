// Differential charts: how many games each side needs once the handicaps are known.
use std::{collections::BTreeMap, ops::RangeInclusive};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::{error::{LeagueError, Result}, types::{Differential, TeamFormat}};

lazy_static! {
    // 18 games, differentials -16..=16.
    static ref FIVE_MAN_CHART: ThresholdChart = ThresholdChart::build(TeamFormat::FiveMan.games_per_match(), 16);
    // 25 games, differentials -20..=20.
    static ref EIGHT_MAN_CHART: ThresholdChart = ThresholdChart::build(TeamFormat::EightMan.games_per_match(), 20);
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Tie,
    Undecided,
}

// Games the home side needs, for one differential.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ThresholdRow {
    pub differential: Differential,
    pub games_to_win: u16,
    pub games_to_tie: Option<u16>,
    pub games_to_lose: u16,    // The home side loses at or below this many games.
}

impl ThresholdRow {
    // Build the row. The stronger home side needs a game more for every two points of differential.
    // Ties only exist when the match has an even number of games and the differential is even.
    fn build(total_games: u16, differential: Differential) -> Self {
        let base = (total_games / 2 + 1) as i32;
        let win = (base + differential.div_euclid(2)).clamp(1, total_games as i32);

        let (tie, lose) = match total_games % 2 == 0 && differential % 2 == 0 {
            true => (Some(win - 1), win - 2),
            false => (None, win - 1),
        };

        Self {
            differential: differential,
            games_to_win: win as u16,
            games_to_tie: tie.map(|t| t.max(0) as u16),
            games_to_lose: lose.max(0) as u16,
        }
    }

    // Check the match state, given the home side's won games and the games still to play.
    pub fn outcome(&self, home_games_won: u16, games_remaining: u16) -> MatchOutcome {
        if home_games_won >= self.games_to_win {
            return MatchOutcome::HomeWin;
        }
        if home_games_won.saturating_add(games_remaining) <= self.games_to_lose {
            return MatchOutcome::AwayWin;
        }
        if games_remaining == 0 && self.games_to_tie == Some(home_games_won) {
            return MatchOutcome::Tie;
        }

        return MatchOutcome::Undecided;
    }
}

#[derive(Debug)]
#[derive(Clone, PartialEq)]
pub struct ThresholdChart {
    pub total_games: u16,
    rows: BTreeMap<Differential, ThresholdRow>,
}

impl ThresholdChart {
    fn build(total_games: u16, max_differential: Differential) -> Self {
        let rows = (-max_differential..=max_differential)
            .map(|d| (d, ThresholdRow::build(total_games, d)))
            .collect();

        Self {
            total_games: total_games,
            rows: rows,
        }
    }

    // Get the chart used by a team format.
    pub fn for_format(team_format: TeamFormat) -> &'static Self {
        match team_format {
            TeamFormat::FiveMan => &FIVE_MAN_CHART,
            TeamFormat::EightMan => &EIGHT_MAN_CHART,
        }
    }

    // Look up the row of a differential. A differential off the chart is an error, never a default.
    pub fn resolve(&self, differential: Differential) -> Result<ThresholdRow> {
        self.rows.get(&differential)
            .copied()
            .ok_or(LeagueError::NoThresholdFound { differential: differential })
    }

    // Check if every differential in the range has a row.
    pub fn covers(&self, range: RangeInclusive<Differential>) -> bool {
        range.into_iter().all(|d| self.rows.contains_key(&d))
    }

    pub fn differentials(&self) -> RangeInclusive<Differential> {
        let min = self.rows.keys().next().copied().unwrap_or_default();
        let max = self.rows.keys().next_back().copied().unwrap_or_default();
        return min..=max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_match_rows() {
        let chart = ThresholdChart::for_format(TeamFormat::FiveMan);
        let row = chart.resolve(0).unwrap();
        assert_eq!((row.games_to_win, row.games_to_tie, row.games_to_lose), (10, Some(9), 8));

        let row = chart.resolve(1).unwrap();
        assert_eq!((row.games_to_win, row.games_to_tie, row.games_to_lose), (10, None, 9));

        let row = chart.resolve(-1).unwrap();
        assert_eq!((row.games_to_win, row.games_to_tie, row.games_to_lose), (9, None, 8));

        let row = chart.resolve(4).unwrap();
        assert_eq!((row.games_to_win, row.games_to_tie, row.games_to_lose), (12, Some(11), 10));
    }

    #[test]
    fn chart_edges() {
        let chart = ThresholdChart::for_format(TeamFormat::FiveMan);
        assert_eq!(chart.differentials(), -16..=16);
        let top = chart.resolve(16).unwrap();
        assert_eq!((top.games_to_win, top.games_to_tie, top.games_to_lose), (18, Some(17), 16));
        let bottom = chart.resolve(-16).unwrap();
        assert_eq!((bottom.games_to_win, bottom.games_to_tie, bottom.games_to_lose), (2, Some(1), 0));
    }

    #[test]
    fn eight_man_has_no_ties() {
        let chart = ThresholdChart::for_format(TeamFormat::EightMan);
        assert_eq!(chart.total_games, 25);
        assert_eq!(chart.differentials(), -20..=20);
        for d in chart.differentials() {
            let row = chart.resolve(d).unwrap();
            assert_eq!(row.games_to_tie, None);
            assert_eq!(row.games_to_lose + 1, row.games_to_win);
            assert!(row.games_to_win <= 25);
        }
        assert_eq!(chart.resolve(0).unwrap().games_to_win, 13);
    }

    #[test]
    fn stronger_home_side_never_needs_fewer_games() {
        for team_format in [TeamFormat::FiveMan, TeamFormat::EightMan] {
            let chart = ThresholdChart::for_format(team_format);
            let rows: Vec<ThresholdRow> = chart.differentials().map(|d| chart.resolve(d).unwrap()).collect();
            for pair in rows.windows(2) {
                assert!(pair[0].games_to_win <= pair[1].games_to_win);
            }
        }
    }

    #[test]
    fn off_chart_is_an_error() {
        let chart = ThresholdChart::for_format(TeamFormat::FiveMan);
        assert!(matches!(chart.resolve(17), Err(LeagueError::NoThresholdFound { differential: 17 })));
        assert!(matches!(chart.resolve(-17), Err(LeagueError::NoThresholdFound { differential: -17 })));
        assert!(chart.covers(-16..=16));
        assert!(!chart.covers(-17..=0));
    }

    #[test]
    fn outcomes() {
        let row = ThresholdChart::for_format(TeamFormat::FiveMan).resolve(0).unwrap();
        assert_eq!(row.outcome(10, 3), MatchOutcome::HomeWin);
        assert_eq!(row.outcome(9, 0), MatchOutcome::Tie);
        assert_eq!(row.outcome(8, 0), MatchOutcome::AwayWin);
        assert_eq!(row.outcome(5, 3), MatchOutcome::AwayWin);
        assert_eq!(row.outcome(6, 3), MatchOutcome::Undecided);

        let odd = ThresholdChart::for_format(TeamFormat::FiveMan).resolve(1).unwrap();
        assert_eq!(odd.outcome(9, 0), MatchOutcome::AwayWin);

        assert_eq!(row.outcome(5, u16::MAX), MatchOutcome::Undecided);
        assert_eq!(row.outcome(u16::MAX, u16::MAX), MatchOutcome::HomeWin);
    }
}
