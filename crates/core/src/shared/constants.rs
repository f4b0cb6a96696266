/// Speaker name used when a cue or row carries no identifiable speaker.
pub const UNKNOWN_SPEAKER: &str = "Unknown Speaker";

/// Sentinel rendered in place of an unrecoverable timestamp.
pub const UNKNOWN_TIMESTAMP: &str = "??";

pub const DEFAULT_TITLE: &str = "Meeting Transcript";

pub const EMPTY_TRANSCRIPT_NOTICE: &str = "*No transcript content found.*";

pub const CUE_EXTENSIONS: &[&str] = &["vtt", "webvtt"];
pub const TABLE_EXTENSIONS: &[&str] = &["docx"];

/// First token of a WebVTT file.
pub const CUE_HEADER_TOKEN: &str = "WEBVTT";

/// Zip local file header, the first bytes of every DOCX container.
pub const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Part of a DOCX container holding the main document body.
pub const DOCX_DOCUMENT_PART: &str = "word/document.xml";

/// First-cell label identifying a table header row.
pub const TABLE_HEADER_LABEL: &str = "Speaker";

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_PUBLISH_TIMEOUT_SECS: u64 = 60;
