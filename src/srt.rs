/// A single subtitle unit: visible from `start` until `end`.
///
/// Times are offsets from the start of the media, in microseconds. Cue text
/// is opaque; any markup embedded in the source file is preserved verbatim.
/// Multi-line source text is joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub start: i64,
    pub end: CueEnd,
    pub text: String,
}

/// Upper bound of a cue's visibility interval.
///
/// SubRip files in the wild sometimes omit the end timecode. After
/// resolution (see `timeline`), a cue without one either borrows the next
/// cue's start or, for the last cue in the file, stays visible until the end
/// of the media. `Unbounded` models the latter; no numeric sentinel is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueEnd {
    Bounded(i64),
    Unbounded,
}

impl CueEnd {
    /// Whether `time_us` lies below this upper bound.
    pub fn contains(&self, time_us: i64) -> bool {
        match self {
            CueEnd::Bounded(end) => time_us < *end,
            CueEnd::Unbounded => true,
        }
    }
}

/// Formats a microsecond offset as an SRT timecode, `HH:MM:SS,mmm`.
/// Sub-millisecond precision is truncated.
pub fn micros_to_timecode(micros: i64) -> String {
    let total_millis = micros / 1000;
    let total_secs = total_millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = total_millis % 1000;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        hours, minutes, seconds, millis
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_timecode {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (micros, expected) = $value;

                assert_eq!(micros_to_timecode(micros), expected);
            }
        )*
        }
    }

    test_timecode! {
        test_timecode_0: (0, "00:00:00,000"),
        test_timecode_1: (1_000, "00:00:00,001"),
        test_timecode_2: (999_000, "00:00:00,999"),
        test_timecode_3: (1_000_000, "00:00:01,000"),
        test_timecode_4: (1_234_000, "00:00:01,234"),
        test_timecode_5: (59_999_000, "00:00:59,999"),
        test_timecode_6: (60_000_000, "00:01:00,000"),
        test_timecode_7: (3_600_000_000, "01:00:00,000"),
        test_timecode_8: (7_326_159_000, "02:02:06,159"),
        test_timecode_9: (360_000_001_000, "100:00:00,001"),
        test_timecode_10: (500, "00:00:00,000"),
    }

    #[test]
    fn bounded_end_is_exclusive() {
        let end = CueEnd::Bounded(2_000_000);
        assert!(end.contains(1_999_999));
        assert!(!end.contains(2_000_000));
    }

    #[test]
    fn unbounded_end_contains_everything() {
        assert!(CueEnd::Unbounded.contains(0));
        assert!(CueEnd::Unbounded.contains(i64::MAX));
    }
}
