use std::fmt;

/// The closed set of transcript formats the parsers understand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TranscriptFormat {
    /// WebVTT cue blocks with optional `<v Speaker>` voice tags.
    Cue,
    /// DOCX document whose first wide table holds speaker/timestamp/text rows.
    Table,
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptFormat::Cue => f.write_str("cue"),
            TranscriptFormat::Table => f.write_str("table"),
        }
    }
}
