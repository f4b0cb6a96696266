use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::constants::UNKNOWN_TIMESTAMP;

fn clock_regex() -> &'static Regex {
    static CLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
    CLOCK_REGEX.get_or_init(|| {
        Regex::new(r"^(?:(?P<h>\d{1,3}):)?(?P<m>\d{1,2}):(?P<s>\d{2})(?:[.,]\d{1,3})?$")
            .expect("Failed to compile clock regex")
    })
}

/// Elapsed time since the start of a meeting, at whole-second precision.
///
/// `Unknown` stands in for a marker that could not be recovered from the
/// source and renders as `??`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timestamp {
    Clock { hours: u32, minutes: u8, seconds: u8 },
    Unknown,
}

impl Timestamp {
    /// Returns `None` when minutes or seconds are out of range.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        if minutes >= 60 || seconds >= 60 {
            return None;
        }
        Some(Timestamp::Clock {
            hours,
            minutes: minutes as u8,
            seconds: seconds as u8,
        })
    }

    /// Parses `[H]H:MM:SS` or `MM:SS`, with an optional `.mmm` / `,mmm`
    /// fraction that is truncated.
    pub fn parse_clock(value: &str) -> Option<Self> {
        let caps = clock_regex().captures(value.trim())?;
        let hours = match caps.name("h") {
            Some(h) => h.as_str().parse().ok()?,
            None => 0,
        };
        let minutes = caps["m"].parse().ok()?;
        let seconds = caps["s"].parse().ok()?;
        Self::from_hms(hours, minutes, seconds)
    }

    /// Like [`Timestamp::parse_clock`], but also accepts the `??` placeholder
    /// that table exports use for missing markers.
    pub fn parse_cell(value: &str) -> Option<Self> {
        if value.trim() == UNKNOWN_TIMESTAMP {
            return Some(Timestamp::Unknown);
        }
        Self::parse_clock(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Clock {
                hours,
                minutes,
                seconds,
            } => write!(f, "{hours:02}:{minutes:02}:{seconds:02}"),
            Timestamp::Unknown => f.write_str(UNKNOWN_TIMESTAMP),
        }
    }
}
