use std::path::PathBuf;

use thiserror::Error;

/// Stable, programmatic classification of a [`TranscriptError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedFormat,
    TranscriptParse,
    Io,
}

/// Fatal failures of the parsing layer. Problems confined to one cue or row
/// are reported as warnings instead.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error(
        "unsupported transcript format for {path}: expected a .vtt or .docx file \
         (or content starting with WEBVTT or a zip header), found {found}"
    )]
    UnsupportedFormat { path: PathBuf, found: String },
    #[error("could not parse transcript: expected {expected}, found {found}")]
    TranscriptParse { expected: String, found: String },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TranscriptError {
    pub fn parse(expected: impl Into<String>, found: impl Into<String>) -> Self {
        TranscriptError::TranscriptParse {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscriptError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            TranscriptError::TranscriptParse { .. } => ErrorKind::TranscriptParse,
            TranscriptError::Read { .. } => ErrorKind::Io,
        }
    }
}
