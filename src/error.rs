use std::error::Error;
use std::fmt;
use std::str::Utf8Error;

#[derive(Debug)]
pub enum SrtError {
    /// A timecode token did not match `HH:MM:SS,mmm` or overflowed.
    /// Recovered per block during parsing; the offending block is dropped.
    MalformedTimecode(String),
    /// The input bytes were not valid UTF-8. Fatal for the whole parse.
    Decode(Utf8Error),
}

impl Error for SrtError {}

impl fmt::Display for SrtError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SrtError::MalformedTimecode(msg) => write!(fmt, "malformed timecode: {}", msg),
            SrtError::Decode(err) => write!(fmt, "input is not valid UTF-8: {}", err),
        }
    }
}
