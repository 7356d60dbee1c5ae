// Player and team handicaps, and the game thresholds they lead to.
pub mod history;
pub mod lineup;
pub mod threshold;

use serde::{Deserialize, Serialize};

use crate::{
    config::HandicapRules, error::{LeagueError, Result}, types::{convert, Differential, GameType, PlayerId, SeasonId, TeamFormat, TeamId}
};

use self::{history::{GameRecord, Tally}, threshold::{ThresholdChart, ThresholdRow}};

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HandicapVariant {
    Standard,
    Reduced,
    None,
}

// A team's record in a season, as stored by the backend.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq, Eq)]
pub struct TeamRecord {
    pub team_id: TeamId,
    pub season_id: SeasonId,
    pub match_wins: u16,
    pub match_losses: u16,
}

// Everything needed to start scoring a match.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq)]
pub struct MatchHandicap {
    pub home_total: f64,
    pub away_total: f64,
    pub home_bonus: i32,
    pub away_bonus: i32,   // Always 0. The team bonus only ever goes to the home side.
    pub differential: Differential,
    pub thresholds: ThresholdRow,
}

#[derive(Debug)]
#[derive(Default, Clone)]
pub struct HandicapEngine {
    rules: HandicapRules,
}

// Basics.
impl HandicapEngine {
    pub fn build(rules: HandicapRules) -> Self {
        Self { rules: rules }
    }

    pub fn rules(&self) -> &HandicapRules {
        &self.rules
    }
}

// Player handicaps.
impl HandicapEngine {
    // Compute a player's handicap from their most recent games of one game type.
    // Players without any games, and the variant none, get 0.
    pub fn calculate_player_handicap(
        &self, player_id: PlayerId, team_format: TeamFormat, variant: HandicapVariant, game_type: GameType,
        season_id: Option<SeasonId>, game_limit: usize, history: &[GameRecord]
    ) -> f64 {
        let Some(variant_rules) = self.rules.variant_rules(variant) else { return 0.0 };

        if game_limit == 0 {
            log::warn!("handicap of player {player_id} requested with a game limit of 0");
            return 0.0;
        }

        let games = history::select_games(history, player_id, team_format, game_type, season_id, game_limit);
        let tally = Tally::from_games(&games);
        if tally.games() == 0 {
            return 0.0;
        }

        let handicap = variant_rules.normalise(tally.win_ratio() * variant_rules.magnitude());
        log::debug!(
            "player {player_id}: {}-{} over {} {game_type:?} games gives {handicap} ({variant:?})",
            tally.wins, tally.losses, tally.games()
        );
        return handicap;
    }

    // Same as calculate_player_handicap, with the configured game limit.
    pub fn player_handicap(
        &self, player_id: PlayerId, team_format: TeamFormat, variant: HandicapVariant, game_type: GameType,
        season_id: Option<SeasonId>, history: &[GameRecord]
    ) -> f64 {
        self.calculate_player_handicap(player_id, team_format, variant, game_type, season_id, self.rules.game_limit, history)
    }
}

// Team handicaps.
impl HandicapEngine {
    // Get the bonus for the home side of a match.
    // Every 2 match wins the home team is ahead of the away team lower it by 1,
    // every 2 match wins behind raise it by 1. The away side never gets one.
    // The bonus is not capped: a differential pushed off the chart fails when its thresholds are resolved.
    pub fn team_handicap_bonus(
        &self, home_team_id: TeamId, away_team_id: TeamId, season_id: SeasonId,
        team_format: TeamFormat, standings: &[TeamRecord]
    ) -> Result<i32> {
        if team_format != TeamFormat::FiveMan {
            return Err(LeagueError::unsupported_format(format!("no team handicap bonus is defined for {team_format:?} leagues")));
        }

        let home_wins: i32 = convert::int(match_wins(standings, home_team_id, season_id))?;
        let away_wins: i32 = convert::int(match_wins(standings, away_team_id, season_id))?;
        let advantage = home_wins - away_wins;
        return Ok(-(advantage / 2));
    }

    // Look up the games each side needs for a differential.
    pub fn resolve_thresholds(&self, team_format: TeamFormat, differential: Differential) -> Result<ThresholdRow> {
        ThresholdChart::for_format(team_format).resolve(differential)
    }

    // Combine both lineups and the home bonus into the match differential and its thresholds.
    pub fn match_handicap(&self, team_format: TeamFormat, home: &[f64], away: &[f64], home_bonus: i32) -> Result<MatchHandicap> {
        let players = team_format.players_per_team() as usize;
        if home.len() != players || away.len() != players {
            return Err(LeagueError::invalid_input(format!(
                "{team_format:?} lineups need {players} players a side, got {} and {}", home.len(), away.len()
            )));
        }

        let home_total: f64 = home.iter().sum();
        let away_total: f64 = away.iter().sum();
        let spread = home_total - away_total;
        if !spread.is_finite() {
            return Err(LeagueError::invalid_input(format!("lineup handicaps {home_total} and {away_total} are not finite")));
        }

        // Float to int casts saturate, so only the bonus can overflow.
        let differential = (spread.round() as Differential)
            .checked_add(home_bonus)
            .ok_or_else(|| LeagueError::invalid_input(format!("home bonus {home_bonus} overflows the differential")))?;

        Ok(MatchHandicap {
            home_total: home_total,
            away_total: away_total,
            home_bonus: home_bonus,
            away_bonus: 0,
            differential: differential,
            thresholds: self.resolve_thresholds(team_format, differential)?,
        })
    }
}

fn match_wins(standings: &[TeamRecord], team_id: TeamId, season_id: SeasonId) -> u16 {
    standings.iter()
        .find(|record| record.team_id == team_id && record.season_id == season_id)
        .map(|record| record.match_wins)
        .unwrap_or(0)
}
