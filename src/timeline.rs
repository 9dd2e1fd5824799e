use crate::parser::CueBlock;
use crate::srt::{Cue, CueEnd};

/// The parse result: an immutable, time-indexed view of a subtitle file.
///
/// Event times are the instants at which the set of visible cues changes:
/// every distinct cue start plus every distinct bounded cue end, sorted
/// ascending with no duplicates. The active cue set per event is computed
/// once at build time, so playback lookups are a binary search away.
#[derive(Debug)]
pub struct Subtitle {
    cues: Vec<Cue>,
    event_times: Vec<i64>,
    // Per event time, indices into `cues` in original block order.
    active: Vec<Vec<usize>>,
}

impl Subtitle {
    /// Resolves unterminated cues and assembles the event timeline.
    ///
    /// A block without an end timecode extends to the start of the next
    /// block; the last block without one extends to the end of the media.
    pub(crate) fn build(blocks: Vec<CueBlock>) -> Self {
        let starts: Vec<i64> = blocks.iter().map(|b| b.start).collect();
        let cues: Vec<Cue> = blocks
            .into_iter()
            .enumerate()
            .map(|(i, block)| {
                let end = match (block.end, starts.get(i + 1)) {
                    (Some(end), _) => CueEnd::Bounded(end),
                    (None, Some(&next_start)) => CueEnd::Bounded(next_start),
                    (None, None) => CueEnd::Unbounded,
                };
                Cue {
                    start: block.start,
                    end,
                    text: block.text,
                }
            })
            .collect();

        let mut event_times: Vec<i64> = cues
            .iter()
            .flat_map(|cue| {
                let end = match cue.end {
                    CueEnd::Bounded(end) => Some(end),
                    CueEnd::Unbounded => None,
                };
                Some(cue.start).into_iter().chain(end)
            })
            .collect();
        event_times.sort_unstable();
        event_times.dedup();

        let active = event_times
            .iter()
            .map(|&time| {
                cues.iter()
                    .enumerate()
                    .filter(|(_, cue)| cue.start <= time && cue.end.contains(time))
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();

        Self {
            cues,
            event_times,
            active,
        }
    }

    /// Number of event times in the timeline.
    pub fn event_time_count(&self) -> usize {
        self.event_times.len()
    }

    /// The event time at `index`, in microseconds. Strictly increasing with
    /// `index`. Panics if `index >= event_time_count()`.
    pub fn event_time(&self, index: usize) -> i64 {
        self.event_times[index]
    }

    /// The cues visible at `time_us`, in original block order.
    ///
    /// `time_us` need not be an exact event time; the lookup floors it to
    /// the latest event at or before it. Times before the first event have
    /// no visible cues.
    pub fn cues_at(&self, time_us: i64) -> Vec<&Cue> {
        let index = match self.event_times.binary_search(&time_us) {
            Ok(index) => index,
            Err(0) => return Vec::new(),
            Err(insertion) => insertion - 1,
        };
        self.active[index].iter().map(|&i| &self.cues[i]).collect()
    }

    /// All parsed cues in original block order, ends resolved.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }
}
