use std::fmt;

/// What went wrong with a single cue block or table row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// The cue file does not start with its format header.
    MissingHeader,
    /// A cue block has no `-->` time-range line; the block was skipped.
    MissingTimeRange,
    /// A timestamp could not be read; the placeholder was used instead.
    InvalidTimestamp,
    /// The record had no text left after cleanup; it was dropped.
    EmptyText,
    /// No speaker could be attributed; the placeholder was used instead.
    UnknownSpeaker,
    /// A cue carries more than one voice; its text went to the first.
    MultipleVoices,
    /// A table row has fewer than three cells; the row was skipped.
    ShortRow,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::MissingHeader => "missing-header",
            WarningKind::MissingTimeRange => "missing-time-range",
            WarningKind::InvalidTimestamp => "invalid-timestamp",
            WarningKind::EmptyText => "empty-text",
            WarningKind::UnknownSpeaker => "unknown-speaker",
            WarningKind::MultipleVoices => "multiple-voices",
            WarningKind::ShortRow => "short-row",
        }
    }
}

/// Where in the source a warning was raised. Indices are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarningLocation {
    Block(usize),
    Row(usize),
    Document,
}

impl fmt::Display for WarningLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningLocation::Block(n) => write!(f, "block {n}"),
            WarningLocation::Row(n) => write!(f, "row {n}"),
            WarningLocation::Document => f.write_str("document"),
        }
    }
}

/// A non-fatal problem found while parsing. Parsing carries on past it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseWarning {
    pub location: WarningLocation,
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.location, self.kind.as_str(), self.message)
    }
}

/// A parse result together with the warnings collected while producing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<ParseWarning>,
}

impl<T> Parsed<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, location: WarningLocation, kind: WarningKind, message: impl Into<String>) {
        self.warnings.push(ParseWarning {
            location,
            kind,
            message: message.into(),
        });
    }

    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }
}
