// Picking the historical games a player's handicap is computed from.
use std::{cmp::Ordering, collections::HashSet};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{time::iso_date_format, types::{GameType, MatchId, PlayerId, Position, SeasonId, TeamFormat}};

// One game played by one player, as stored by the backend.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub match_id: MatchId,
    pub season_id: SeasonId,
    pub game_number: u16,
    pub player_id: PlayerId,
    pub position: Position,    // Lineup slot the player occupied for this game.
    pub team_format: TeamFormat,
    pub game_type: GameType,
    pub won: bool,
    #[serde(with = "iso_date_format")]
    pub played_on: Date,
}

impl GameRecord {
    // A game is identified by its match, the lineup slot and its number in the match.
    // A player on double duty has games under two slots of the same match, and those stay separate.
    fn key(&self) -> (MatchId, Position, u16) {
        (self.match_id, self.position, self.game_number)
    }
}

#[derive(Debug)]
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
}

impl Tally {
    pub fn from_games(games: &[&GameRecord]) -> Self {
        let mut tally = Self::default();
        for game in games {
            match game.won {
                true => tally.wins += 1,
                false => tally.losses += 1,
            }
        }

        return tally;
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    // Wins minus losses per game played, between -1 and 1.
    pub fn win_ratio(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            games => (self.wins as f64 - self.losses as f64) / games as f64,
        }
    }
}

// Select at most game_limit games of the player, current season first, then the most recent.
pub fn select_games<'a>(
    history: &'a [GameRecord], player_id: PlayerId, team_format: TeamFormat, game_type: GameType,
    season_id: Option<SeasonId>, game_limit: usize
) -> Vec<&'a GameRecord> {
    let mut seen = HashSet::new();
    let mut games: Vec<&GameRecord> = history.iter()
        .filter(|game| game.player_id == player_id && game.team_format == team_format && game.game_type == game_type)
        .filter(|game| seen.insert(game.key()))
        .collect();

    games.sort_by(|a, b| compare_season(a, b, season_id).then(compare_recency(a, b)));
    games.truncate(game_limit);
    return games;
}

// Games of the current season come first.
fn compare_season(a: &GameRecord, b: &GameRecord, season_id: Option<SeasonId>) -> Ordering {
    match season_id {
        Some(id) => (b.season_id == id).cmp(&(a.season_id == id)),
        None => Ordering::Equal,
    }
}

// Newer games come first. Slot order keeps the result stable for games on the same night.
fn compare_recency(a: &GameRecord, b: &GameRecord) -> Ordering {
    b.played_on.cmp(&a.played_on)
        .then(b.match_id.cmp(&a.match_id))
        .then(b.game_number.cmp(&a.game_number))
        .then(a.position.cmp(&b.position))
}
