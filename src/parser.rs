use crate::error::SrtError;
use crate::timeline::Subtitle;

use std::convert::TryFrom;
use std::str;

use log::warn;
use nom::bytes::complete::{tag, take_while_m_n};
use nom::character::complete::{digit1, space0};
use nom::combinator::{map_res, opt};
use nom::error::{convert_error, ErrorKind, VerboseError};
use nom::sequence::{delimited, preceded};
use nom::{error_position, Err, IResult};

/// A cue block as it appears in the source file, before end-time resolution.
/// `end` is `None` when the timing line carried no usable end timecode.
#[derive(Debug)]
pub(crate) struct CueBlock {
    pub(crate) start: i64,
    pub(crate) end: Option<i64>,
    pub(crate) text: String,
}

pub struct Parser;
impl Parser {
    pub fn new() -> Self {
        Self {}
    }

    /// Parses SubRip bytes into a time-indexed [`Subtitle`].
    ///
    /// Input is decoded as UTF-8; anything else is a fatal
    /// [`SrtError::Decode`]. A block whose start timecode cannot be decoded
    /// is dropped and parsing resumes at the next blank-line boundary, so a
    /// single corrupt cue never loses the rest of the file.
    pub fn parse(&self, data: &[u8]) -> Result<Subtitle, SrtError> {
        let input = str::from_utf8(data).map_err(SrtError::Decode)?;
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);

        Ok(Subtitle::build(all_blocks(&split_lines(input))))
    }
}

/// Splits decoded text into lines, accepting LF, CRLF and lone CR endings.
fn split_lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        match rest.find(|c| c == '\n' || c == '\r') {
            Some(idx) => {
                lines.push(&rest[..idx]);
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

fn all_blocks(lines: &[&str]) -> Vec<CueBlock> {
    let mut blocks = Vec::new();
    let mut pos = 0;
    while pos < lines.len() {
        match next_block(lines, &mut pos) {
            Some(Ok(block)) => blocks.push(block),
            Some(Err(err)) => {
                warn!("skipping cue block: {}", err);
                // Resynchronise at the next blank-line boundary.
                while pos < lines.len() && !is_blank(lines[pos]) {
                    pos += 1;
                }
            }
            None => break,
        }
    }
    blocks
}

/// Consumes one cue block starting at `*pos`: optional blank lines, a
/// sequence-number line (any non-blank line, content discarded), a timing
/// line, then the text lines up to the next blank line or end of input.
///
/// Returns `None` once the input is exhausted. A timing line whose start
/// timecode does not decode yields `Err`; the caller drops the block.
fn next_block(lines: &[&str], pos: &mut usize) -> Option<Result<CueBlock, SrtError>> {
    while *pos < lines.len() && is_blank(lines[*pos]) {
        *pos += 1;
    }
    if *pos >= lines.len() {
        return None;
    }

    // Sequence-number line. Its value is irrelevant; cue order is source
    // order, and renumbered or unnumbered-but-present markers are common.
    *pos += 1;

    let (start, end) = match timing_line(lines.get(*pos).copied().unwrap_or("")) {
        Ok(timing) => timing,
        Err(err) => return Some(Err(err)),
    };
    *pos += 1;

    let mut text_lines = Vec::new();
    while *pos < lines.len() && !is_blank(lines[*pos]) {
        text_lines.push(lines[*pos]);
        *pos += 1;
    }

    Some(Ok(CueBlock {
        start,
        end,
        text: text_lines.join("\n"),
    }))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Decodes a timing line. The start timecode is mandatory; the arrow and end
/// timecode are optional, and a non-conforming remainder after a valid start
/// is ignored rather than rejected (the end is then left unresolved).
fn timing_line(line: &str) -> Result<(i64, Option<i64>), SrtError> {
    match timing(line) {
        Ok((_, parsed)) => Ok(parsed),
        Err(Err::Error(err)) | Err(Err::Failure(err)) => {
            Err(SrtError::MalformedTimecode(convert_error(line, err)))
        }
        Err(Err::Incomplete(_)) => {
            unreachable!("Incomplete data received by non-streaming parser.")
        }
    }
}

fn timing(input: &str) -> IResult<&str, (i64, Option<i64>), VerboseError<&str>> {
    let (input, _) = space0(input)?;
    let (input, start) = timestamp(input)?;
    let (input, end) = opt(preceded(
        delimited(space0, tag("-->"), space0),
        timestamp,
    ))(input)?;

    Ok((input, (start, end)))
}

/// Decodes one `HH:MM:SS,mmm` token into microseconds. Hours, minutes and
/// seconds take any number of digits; milliseconds take exactly three.
fn timestamp(input: &str) -> IResult<&str, i64, VerboseError<&str>> {
    let (input, hours) = component(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = component(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = component(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, millis) = map_res(
        take_while_m_n(3, 3, |c: char| c.is_ascii_digit()),
        |s: &str| s.parse::<u64>(),
    )(input)?;

    match to_micros(hours, minutes, seconds, millis) {
        Some(micros) => Ok((input, micros)),
        None => Err(Err::Error(error_position!(input, ErrorKind::MapRes))),
    }
}

fn component(input: &str) -> IResult<&str, u64, VerboseError<&str>> {
    map_res(digit1, |s: &str| s.parse())(input)
}

fn to_micros(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<i64> {
    let total_millis = hours
        .checked_mul(60)?
        .checked_add(minutes)?
        .checked_mul(60)?
        .checked_add(seconds)?
        .checked_mul(1000)?
        .checked_add(millis)?;
    i64::try_from(total_millis.checked_mul(1000)?).ok()
}
