pub mod domain;
pub mod infrastructure;

use domain::parse_warning::Parsed;
use domain::transcript_error::TranscriptError;
use domain::transcript_format::TranscriptFormat;
use infrastructure::cue_parser::parse_cue_transcript;
use infrastructure::table_parser::parse_table_transcript;

use crate::shared::utterance::Utterance;

/// Runs the parser for `format` over the raw file content.
pub fn parse_transcript(
    format: TranscriptFormat,
    bytes: &[u8],
) -> Result<Parsed<Vec<Utterance>>, TranscriptError> {
    match format {
        TranscriptFormat::Cue => {
            let text = std::str::from_utf8(bytes).map_err(|e| {
                TranscriptError::parse("UTF-8 cue text", format!("invalid UTF-8 ({e})"))
            })?;
            Ok(parse_cue_transcript(text))
        }
        TranscriptFormat::Table => parse_table_transcript(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::domain::transcript_error::ErrorKind;

    #[test]
    fn test_dispatches_cue() {
        let parsed = parse_transcript(
            TranscriptFormat::Cue,
            b"WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n<v A>hi",
        )
        .unwrap();
        assert_eq!(parsed.value.len(), 1);
    }

    #[test]
    fn test_cue_rejects_invalid_utf8() {
        let err = parse_transcript(TranscriptFormat::Cue, b"WEBVTT\n\n\xff\xfe").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TranscriptParse);
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_dispatches_table() {
        let err = parse_transcript(TranscriptFormat::Table, b"not a zip").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TranscriptParse);
    }
}
