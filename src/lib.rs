// Season calendars, game orders, handicaps and playoff seeding for a pool league.
pub mod config;
pub mod error;
pub mod game_order;
pub mod handicap;
pub mod playoffs;
pub mod season;
pub mod time;
pub mod types;

pub use config::LeagueConfig;
pub use error::{LeagueError, Result};
pub use handicap::{HandicapEngine, HandicapVariant};
pub use playoffs::PlayoffBracket;
pub use types::{GameType, TeamFormat};
