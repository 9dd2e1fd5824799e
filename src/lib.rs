//! Parse SubRip (`.srt`) subtitle data into a time-indexed cue timeline.
//!
//! [`Parser::parse`] takes fully buffered bytes (decoded as UTF-8) and
//! returns a [`Subtitle`]: a sorted, de-duplicated sequence of event times
//! with the set of cues visible at each one, ready for binary-search lookup
//! during playback. Malformed real-world input is tolerated: a block with an
//! undecodable start timecode is skipped, a missing end timecode extends the
//! cue to the next block's start (or to the end of the media for the last
//! block), and stray blank lines and mixed line endings are accepted.

mod error;
mod parser;
mod srt;
mod timeline;

pub use crate::error::SrtError;
pub use crate::parser::Parser;
pub use crate::srt::{micros_to_timecode, Cue, CueEnd};
pub use crate::timeline::Subtitle;
