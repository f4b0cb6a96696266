pub mod format_detector;
pub mod parse_warning;
pub mod transcript_error;
pub mod transcript_format;
