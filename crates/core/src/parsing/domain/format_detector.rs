use std::path::Path;

use super::transcript_error::TranscriptError;
use super::transcript_format::TranscriptFormat;
use crate::shared::constants::{CUE_EXTENSIONS, CUE_HEADER_TOKEN, TABLE_EXTENSIONS, ZIP_MAGIC};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Picks the parser for a file.
///
/// The extension decides when it is a known one. Otherwise the leading bytes
/// are sniffed for the WebVTT header token or the zip magic of a DOCX
/// container.
pub fn detect_format(path: &Path, head: &[u8]) -> Result<TranscriptFormat, TranscriptError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    if let Some(ext) = extension.as_deref() {
        if CUE_EXTENSIONS.contains(&ext) {
            return Ok(TranscriptFormat::Cue);
        }
        if TABLE_EXTENSIONS.contains(&ext) {
            return Ok(TranscriptFormat::Table);
        }
    }

    if let Some(format) = sniff(head) {
        log::debug!(
            "Detected {format} format for {} from content signature",
            path.display()
        );
        return Ok(format);
    }

    let found = match extension {
        Some(ext) => format!("extension '{ext}' and no known content signature"),
        None => "no extension and no known content signature".to_string(),
    };
    Err(TranscriptError::UnsupportedFormat {
        path: path.to_path_buf(),
        found,
    })
}

fn sniff(head: &[u8]) -> Option<TranscriptFormat> {
    if head.starts_with(ZIP_MAGIC) {
        return Some(TranscriptFormat::Table);
    }
    let text = head.strip_prefix(UTF8_BOM).unwrap_or(head);
    if text.starts_with(CUE_HEADER_TOKEN.as_bytes()) {
        return Some(TranscriptFormat::Cue);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::domain::transcript_error::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case::vtt("meeting.vtt", TranscriptFormat::Cue)]
    #[case::upper_vtt("MEETING.VTT", TranscriptFormat::Cue)]
    #[case::webvtt("meeting.webvtt", TranscriptFormat::Cue)]
    #[case::docx("meeting.docx", TranscriptFormat::Table)]
    #[case::mixed_case_docx("Standup.DocX", TranscriptFormat::Table)]
    fn test_detect_by_extension(#[case] name: &str, #[case] expected: TranscriptFormat) {
        assert_eq!(detect_format(Path::new(name), b"").unwrap(), expected);
    }

    #[test]
    fn test_extension_wins_over_content() {
        let format = detect_format(Path::new("meeting.vtt"), b"PK\x03\x04rest").unwrap();
        assert_eq!(format, TranscriptFormat::Cue);
    }

    #[rstest]
    #[case::cue_header("export.txt", b"WEBVTT\n\n00:00:01.000 --> 00:00:02.000", TranscriptFormat::Cue)]
    #[case::cue_header_with_bom("export", b"\xEF\xBB\xBFWEBVTT\n", TranscriptFormat::Cue)]
    #[case::zip_magic("export.bin", b"PK\x03\x04\x14\x00", TranscriptFormat::Table)]
    fn test_detect_by_signature(
        #[case] name: &str,
        #[case] head: &[u8],
        #[case] expected: TranscriptFormat,
    ) {
        assert_eq!(detect_format(Path::new(name), head).unwrap(), expected);
    }

    #[test]
    fn test_unknown_extension_and_content_fails() {
        let err = detect_format(Path::new("notes.txt"), b"Some content").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        assert!(err.to_string().contains("extension 'txt'"));
    }

    #[test]
    fn test_missing_extension_mentions_it() {
        let err = detect_format(Path::new("transcript"), b"").unwrap_err();
        assert!(err.to_string().contains("no extension"));
    }

    #[test]
    fn test_header_must_lead() {
        let err = detect_format(Path::new("x.txt"), b"something before WEBVTT").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }
}
