// Functions for ranking teams by their final standings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::TeamId;

// A team's aggregated season record, as stored by the backend.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone, PartialEq, Eq)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub match_wins: u16,
    pub match_losses: u16,
    pub points: u32,
    pub games_won: u32,
}

// What ranking criteria the standings are ordered by.
#[derive(Debug)]
#[derive(Eq, Hash, PartialEq)]
#[derive(Clone, Copy)]
pub enum RankCriteria {
    MatchWins,
    Points,
    GamesWon,

    // Last resort, so that equal records still rank the same way every time.
    TeamId,
}

// The playoff tie-break chain.
pub const PLAYOFF_CRITERIA: [RankCriteria; 4] = [
    RankCriteria::MatchWins,
    RankCriteria::Points,
    RankCriteria::GamesWon,
    RankCriteria::TeamId,
];

type CmpFunc = fn (&TeamStanding, &TeamStanding) -> Ordering;

// Compare functions here.

fn compare_match_wins(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.match_wins.cmp(&a.match_wins)
}

fn compare_points(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.points.cmp(&a.points)
}

fn compare_games_won(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.games_won.cmp(&a.games_won)
}

fn compare_team_id(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    a.team_id.cmp(&b.team_id)
}

impl RankCriteria {
    // Get the compare function of the criterion.
    fn sort_function(&self) -> CmpFunc {
        match self {
            Self::MatchWins => compare_match_wins,
            Self::Points => compare_points,
            Self::GamesWon => compare_games_won,
            Self::TeamId => compare_team_id,
        }
    }
}

// Compare two teams criterion by criterion until one of them decides.
pub fn compare(a: &TeamStanding, b: &TeamStanding, criteria: &[RankCriteria]) -> Ordering {
    criteria.iter()
        .map(|criterion| criterion.sort_function()(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

// Get the teams in the order of betterhood.
pub fn rank_teams(standings: &mut [TeamStanding], criteria: &[RankCriteria]) {
    standings.sort_by(|a, b| compare(a, b, criteria));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(team_id: TeamId, match_wins: u16, points: u32, games_won: u32) -> TeamStanding {
        TeamStanding { team_id, match_wins, match_losses: 0, points, games_won }
    }

    #[test]
    fn tie_break_chain_is_applied_in_order() {
        let mut standings = vec![
            standing(1, 8, 40, 100),
            standing(2, 9, 30, 90),
            standing(3, 8, 45, 80),
            standing(4, 8, 40, 110),
        ];

        rank_teams(&mut standings, &PLAYOFF_CRITERIA);
        let ids: Vec<TeamId> = standings.iter().map(|s| s.team_id).collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);
    }

    #[test]
    fn identical_records_fall_back_to_team_id() {
        let mut standings = vec![standing(9, 5, 20, 50), standing(3, 5, 20, 50)];
        rank_teams(&mut standings, &PLAYOFF_CRITERIA);
        assert_eq!(standings[0].team_id, 3);
    }

    #[test]
    fn no_criteria_no_order() {
        let a = TeamStanding { team_id: 1, match_wins: 2, ..Default::default() };
        let b = TeamStanding { team_id: 2, match_wins: 5, ..Default::default() };
        assert_eq!(compare(&a, &b, &[RankCriteria::MatchWins]), Ordering::Greater);
        assert_eq!(compare(&a, &b, &[]), Ordering::Equal);
    }
}
