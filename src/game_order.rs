// The order in which the individual games of a team match are played.
use serde::{Deserialize, Serialize};

use crate::{error::{LeagueError, Result}, types::Position};

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Break,
    Rack,
}

impl Action {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Break => Self::Rack,
            Self::Rack => Self::Break,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSlot {
    pub game_number: u16,
    pub home_player_position: Position,
    pub away_player_position: Position,
    pub home_action: Action,
    pub away_action: Action,
}

impl GameSlot {
    fn build(game_number: u16, home: Position, away: Position, home_action: Action) -> Self {
        Self {
            game_number: game_number,
            home_player_position: home,
            away_player_position: away,
            home_action: home_action,
            away_action: home_action.opposite(),
        }
    }

    // The roles swapped, for the second meeting of the same players.
    fn rematch(&self, game_number: u16) -> Self {
        Self::build(game_number, self.home_player_position, self.away_player_position, self.away_action)
    }
}

// Generate the fixed game order for a match.
// Round r pairs home position h with away position ((h - 1 + r) mod n) + 1.
// The breaking side alternates game by game, and a double robin replays the first pass with roles swapped.
pub fn generate(players_per_team: u8, use_double_robin: bool) -> Result<Vec<GameSlot>> {
    if players_per_team != 3 && players_per_team != 5 {
        return Err(LeagueError::unsupported_format(format!(
            "{players_per_team} players per team, expected 3 or 5"
        )));
    }

    let first_pass = single_robin(players_per_team);
    if !use_double_robin {
        return Ok(first_pass);
    }

    let offset = first_pass.len() as u16;
    let second_pass: Vec<GameSlot> = first_pass.iter()
        .map(|slot| slot.rematch(slot.game_number + offset))
        .collect();

    let mut slots = first_pass;
    slots.extend(second_pass);
    return Ok(slots);
}

// Every home position meets every away position once.
fn single_robin(players: u8) -> Vec<GameSlot> {
    let mut slots = Vec::with_capacity(players as usize * players as usize);
    let mut game_number: u16 = 0;

    for round in 0..players {
        for home in 1..=players {
            let away = (home - 1 + round) % players + 1;
            game_number += 1;

            let home_action = match game_number % 2 {
                1 => Action::Break,
                _ => Action::Rack,
            };
            slots.push(GameSlot::build(game_number, home, away, home_action));
        }
    }

    return slots;
}
