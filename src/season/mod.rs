// A season's calendar: when league nights fall, which weeks are skipped and what clashes with them.
pub mod calendar;
pub mod conflict;
pub mod draft;

pub use calendar::{BlackoutDate, WeekEntry, WeekType};
pub use conflict::{Conflict, ConflictCategory, ReferenceRange};
pub use draft::SeasonDraft;
