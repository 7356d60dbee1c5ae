// Custom types that are widely used are defined here.
use serde::{Deserialize, Serialize};

// Backend ID types.
pub type SeasonId = u32;
pub type MatchId = u32;
pub type TeamId = u32;
pub type PlayerId = u32;

// Roster slots are 1-indexed.
pub type Position = u8;

// Handicap differential between the two sides of a match.
pub type Differential = i32;

// How a league fields its teams.
// 5-man teams play three a side, 8-man teams play five a side.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamFormat {
    FiveMan,
    EightMan,
}

impl TeamFormat {
    pub fn players_per_team(&self) -> u8 {
        match self {
            Self::FiveMan => 3,
            Self::EightMan => 5,
        }
    }

    // 5-man matches are short enough to play everyone twice.
    pub fn uses_double_robin(&self) -> bool {
        matches!(self, Self::FiveMan)
    }

    // Games played in a full match.
    pub fn games_per_match(&self) -> u16 {
        let players = self.players_per_team() as u16;
        match self.uses_double_robin() {
            true => players * players * 2,
            false => players * players,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    EightBall,
    NineBall,
    TenBall,
}

// Type conversions.
pub mod convert {
    use crate::error::{LeagueError, Result};

    // Convert between integers without panicking.
    pub fn int<N1: std::fmt::Display + Copy, N2: TryFrom<N1>>(num: N1) -> Result<N2> {
        N2::try_from(num).map_err(|_| LeagueError::invalid_input(format!("{num} is out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_formats_describe_their_matches() {
        assert_eq!(TeamFormat::FiveMan.players_per_team(), 3);
        assert!(TeamFormat::FiveMan.uses_double_robin());
        assert_eq!(TeamFormat::FiveMan.games_per_match(), 18);

        assert_eq!(TeamFormat::EightMan.players_per_team(), 5);
        assert!(!TeamFormat::EightMan.uses_double_robin());
        assert_eq!(TeamFormat::EightMan.games_per_match(), 25);
    }

    #[test]
    fn wire_names() {
        assert_eq!(serde_json::to_string(&TeamFormat::FiveMan).unwrap(), "\"five_man\"");
        assert_eq!(serde_json::to_string(&GameType::NineBall).unwrap(), "\"nine_ball\"");
    }

    #[test]
    fn int_conversion_reports_overflow() {
        let ok: u8 = convert::int(200_u32).unwrap();
        assert_eq!(ok, 200);
        assert!(convert::int::<u32, u8>(300).is_err());
    }
}
