// Seeding the final standings into a playoff bracket.
pub mod ranking;

use std::collections::HashSet;

use ordinal::ToOrdinal;
use serde::{Deserialize, Serialize};

use crate::{error::{LeagueError, Result}, types::{convert, TeamId}};

use self::ranking::{rank_teams, TeamStanding, PLAYOFF_CRITERIA};

#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone, PartialEq, Eq)]
pub struct SeededTeam {
    pub seed: u16,  // 1 is the best seed.
    pub team_id: TeamId,
    pub match_wins: u16,
    pub match_losses: u16,
    pub points: u32,
    pub games_won: u32,
}

impl SeededTeam {
    fn build(seed: u16, standing: &TeamStanding) -> Self {
        Self {
            seed: seed,
            team_id: standing.team_id,
            match_wins: standing.match_wins,
            match_losses: standing.match_losses,
            points: standing.points,
            games_won: standing.games_won,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq, Eq)]
pub struct Matchup {
    pub match_number: u16,
    pub home_seed: u16,
    pub away_seed: u16,
    pub home: SeededTeam,  // The better seed always plays at home.
    pub away: SeededTeam,
}

impl Matchup {
    fn build(match_number: u16, home: SeededTeam, away: SeededTeam) -> Self {
        Self {
            match_number: match_number,
            home_seed: home.seed,
            away_seed: away.seed,
            home: home,
            away: away,
        }
    }

    // E.g. "1st vs 8th".
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_seed.to_ordinal_string(), self.away_seed.to_ordinal_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    LastPlace,
    BelowCutoff,
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq, Eq)]
pub struct ExcludedTeam {
    pub seed: u16,
    pub team_id: TeamId,
    pub reason: ExclusionReason,
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone, PartialEq, Eq)]
pub struct PlayoffBracket {
    pub matchups: Vec<Matchup>,
    pub excluded_teams: Vec<ExcludedTeam>,
}

impl PlayoffBracket {
    // How many teams made the bracket.
    pub fn size(&self) -> usize {
        self.matchups.len() * 2
    }

    // Get a generic name for the opening round based on how many teams it has.
    pub fn round_name(&self) -> String {
        match self.size() {
            2 => "Final".to_string(),
            4 => "Semi Final".to_string(),
            8 => "Quarter Final".to_string(),
            n => format!("Round of {n}"),
        }
    }
}

// Seed the standings and pair the best remaining seed against the worst.
// An odd team count drops the last place team, and seeds beyond the bracket capacity are cut.
pub fn seed(standings: &[TeamStanding], bracket_capacity: usize) -> Result<PlayoffBracket> {
    if standings.is_empty() {
        return Err(LeagueError::InsufficientTeams);
    }
    if bracket_capacity == 0 || bracket_capacity % 2 != 0 {
        return Err(LeagueError::invalid_input(format!("bracket capacity {bracket_capacity} must be a positive even number")));
    }

    let mut team_ids = HashSet::new();
    if let Some(duplicate) = standings.iter().find(|standing| !team_ids.insert(standing.team_id)) {
        return Err(LeagueError::invalid_input(format!("team {} appears twice in the standings", duplicate.team_id)));
    }

    let mut ranked = standings.to_vec();
    rank_teams(&mut ranked, &PLAYOFF_CRITERIA);

    let mut seeded = Vec::with_capacity(ranked.len());
    for (i, standing) in ranked.iter().enumerate() {
        seeded.push(SeededTeam::build(convert::int(i + 1)?, standing));
    }

    let mut excluded_teams = Vec::new();
    let mut bracket_size = seeded.len();
    if bracket_size % 2 != 0 {
        bracket_size -= 1;
        excluded_teams.push(exclude(&seeded[bracket_size], ExclusionReason::LastPlace));
    }
    while bracket_size > bracket_capacity {
        bracket_size -= 1;
        excluded_teams.push(exclude(&seeded[bracket_size], ExclusionReason::BelowCutoff));
    }
    excluded_teams.sort_by_key(|team| team.seed);

    let mut matchups = Vec::with_capacity(bracket_size / 2);
    for i in 0..bracket_size / 2 {
        let home = seeded[i].clone();
        let away = seeded[bracket_size - 1 - i].clone();
        matchups.push(Matchup::build(convert::int(i + 1)?, home, away));
    }

    log::debug!("seeded {} teams into {} matchups, {} excluded", seeded.len(), matchups.len(), excluded_teams.len());
    return Ok(PlayoffBracket { matchups: matchups, excluded_teams: excluded_teams });
}

fn exclude(team: &SeededTeam, reason: ExclusionReason) -> ExcludedTeam {
    ExcludedTeam {
        seed: team.seed,
        team_id: team.team_id,
        reason: reason,
    }
}
