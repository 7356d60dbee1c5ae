// Handicaps of a match lineup, substitutes included.
use serde::{Deserialize, Serialize};

use crate::{error::{LeagueError, Result}, types::PlayerId};

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq)]
pub struct RosterPlayer {
    pub player_id: PlayerId,
    pub handicap: f64,
}

impl RosterPlayer {
    pub fn build(player_id: PlayerId, handicap: f64) -> Self {
        Self {
            player_id: player_id,
            handicap: handicap,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineupSlot {
    Player { player_id: PlayerId },
    // Placeholder for someone who is not on the roster.
    Substitute { manual_override: Option<f64> },
}

// The handicap of a substitute: the operator's override or the strongest player left on the bench,
// whichever is higher. With neither, the substitute plays at 0.
pub fn substitute_handicap(manual_override: Option<f64>, roster: &[RosterPlayer], lineup: &[PlayerId]) -> f64 {
    let bench_best = roster.iter()
        .filter(|player| !lineup.contains(&player.player_id))
        .map(|player| player.handicap)
        .fold(None, |best: Option<f64>, handicap| Some(best.map_or(handicap, |b| b.max(handicap))));

    match (manual_override, bench_best) {
        (Some(manual), Some(bench)) => manual.max(bench),
        (Some(manual), None) => manual,
        (None, Some(bench)) => bench,
        (None, None) => 0.0,
    }
}

// Resolve the handicap of every slot in lineup order.
// A player on double duty fills two slots, and both carry the player's handicap.
pub fn lineup_handicaps(slots: &[LineupSlot], roster: &[RosterPlayer]) -> Result<Vec<f64>> {
    let placed: Vec<PlayerId> = slots.iter()
        .filter_map(|slot| match slot {
            LineupSlot::Player { player_id } => Some(*player_id),
            LineupSlot::Substitute { .. } => None,
        })
        .collect();

    let mut handicaps = Vec::with_capacity(slots.len());
    for slot in slots {
        let handicap = match slot {
            LineupSlot::Player { player_id } => roster.iter()
                .find(|player| player.player_id == *player_id)
                .map(|player| player.handicap)
                .ok_or_else(|| LeagueError::invalid_input(format!("player {player_id} is not on the roster")))?,
            LineupSlot::Substitute { manual_override } => substitute_handicap(*manual_override, roster, &placed),
        };
        handicaps.push(handicap);
    }

    return Ok(handicaps);
}
