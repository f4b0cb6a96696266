use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::parsing::domain::format_detector::detect_format;
use crate::parsing::domain::parse_warning::ParseWarning;
use crate::parsing::domain::transcript_error::TranscriptError;
use crate::parsing::domain::transcript_format::TranscriptFormat;
use crate::parsing::parse_transcript;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::utterance_normalizer::normalize;
use crate::rendering::markdown_renderer::render_markdown;
use crate::rendering::render_options::RenderOptions;

/// Result of converting one transcript file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub markdown: String,
    /// Utterances after normalization.
    pub utterance_count: usize,
    pub warnings: Vec<ParseWarning>,
    pub format: TranscriptFormat,
}

/// File to markdown pipeline: read → detect → parse → normalize → render.
pub struct ConvertTranscriptUseCase {
    options: RenderOptions,
    logger: Box<dyn PipelineLogger>,
}

impl ConvertTranscriptUseCase {
    pub fn new(options: RenderOptions, logger: Box<dyn PipelineLogger>) -> Self {
        Self { options, logger }
    }

    pub fn execute(&mut self, path: &Path) -> Result<Conversion, TranscriptError> {
        let bytes = fs::read(path).map_err(|source| TranscriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let start = Instant::now();
        let format = detect_format(path, &bytes)?;
        self.record("detect", start);
        self.logger
            .info(&format!("Detected {format} transcript: {}", path.display()));

        let start = Instant::now();
        let parsed = parse_transcript(format, &bytes)?;
        self.record("parse", start);
        for warning in &parsed.warnings {
            self.logger.warning(warning);
        }

        let start = Instant::now();
        let utterances = normalize(&parsed.value);
        self.record("normalize", start);

        let start = Instant::now();
        let markdown = render_markdown(&utterances, &self.options);
        self.record("render", start);

        self.logger.info(&format!(
            "Parsed {} utterances, {} after merging",
            parsed.value.len(),
            utterances.len()
        ));
        self.logger.summary();

        Ok(Conversion {
            markdown,
            utterance_count: utterances.len(),
            warnings: parsed.warnings,
            format,
        })
    }

    fn record(&mut self, stage: &str, start: Instant) {
        self.logger
            .timing(stage, start.elapsed().as_secs_f64() * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::domain::parse_warning::WarningKind;
    use crate::parsing::domain::transcript_error::ErrorKind;
    use crate::parsing::infrastructure::docx_reader::test_support::{
        docx_bytes, document_xml, table_xml,
    };
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Default)]
    struct Events {
        stages: Vec<String>,
        warnings: Vec<ParseWarning>,
    }

    struct RecordingLogger {
        events: Arc<Mutex<Events>>,
    }

    impl PipelineLogger for RecordingLogger {
        fn timing(&mut self, stage: &str, _duration_ms: f64) {
            self.events.lock().unwrap().stages.push(stage.to_string());
        }

        fn warning(&mut self, warning: &ParseWarning) {
            self.events.lock().unwrap().warnings.push(warning.clone());
        }

        fn info(&mut self, _message: &str) {}
    }

    const STANDUP_VTT: &str = "WEBVTT\n\n\
        00:00:05.000 --> 00:00:08.000\n\
        <v John Doe>Hello everyone, let's get started.\n\n\
        00:00:08.500 --> 00:00:12.000\n\
        <v Jane Smith>Thanks John. I have updates on the project.\n";

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    fn use_case() -> ConvertTranscriptUseCase {
        ConvertTranscriptUseCase::new(RenderOptions::default(), Box::new(NullPipelineLogger))
    }

    #[test]
    fn test_converts_cue_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "standup.vtt", STANDUP_VTT.as_bytes());

        let conversion = use_case().execute(&path).unwrap();

        assert_eq!(conversion.format, TranscriptFormat::Cue);
        assert_eq!(conversion.utterance_count, 2);
        assert!(conversion.warnings.is_empty());
        assert!(conversion.markdown.contains("## John Doe"));
        assert!(conversion.markdown.contains("**[00:00:08]** Thanks John."));
    }

    #[test]
    fn test_converts_table_file() {
        let dir = TempDir::new().unwrap();
        let xml = document_xml(&table_xml(&[
            vec!["Speaker", "Time", "Text"],
            vec!["Alice", "00:01:00", "Morning."],
            vec!["Alice", "00:01:05", "Shall we start?"],
            vec!["Bob", "00:01:10", "Yes."],
        ]));
        let path = write(&dir, "minutes.docx", &docx_bytes(&xml));

        let conversion = use_case().execute(&path).unwrap();

        assert_eq!(conversion.format, TranscriptFormat::Table);
        assert_eq!(conversion.utterance_count, 2);
        assert!(conversion
            .markdown
            .contains("**[00:01:00]** Morning. Shall we start?"));
    }

    #[test]
    fn test_empty_cue_file_renders_notice() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "empty.vtt", b"");

        let conversion = use_case().execute(&path).unwrap();

        assert_eq!(conversion.utterance_count, 0);
        assert!(conversion.markdown.contains("No transcript content"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = use_case()
            .execute(&dir.path().join("absent.vtt"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_unsupported_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.txt", b"just some notes");
        let err = use_case().execute(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_reports_stages_and_warnings() {
        let dir = TempDir::new().unwrap();
        let input = "WEBVTT\n\n\
            00:00:01.000 --> 00:00:02.000\n\
            <v Alice>First.\n\n\
            just text without timing\n\n\
            00:00:03.000 --> 00:00:04.000\n\
            <v Bob>Second.\n";
        let path = write(&dir, "call.vtt", input.as_bytes());
        let events = Arc::new(Mutex::new(Events::default()));
        let logger = RecordingLogger {
            events: Arc::clone(&events),
        };

        let conversion = ConvertTranscriptUseCase::new(RenderOptions::default(), Box::new(logger))
            .execute(&path)
            .unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.stages, vec!["detect", "parse", "normalize", "render"]);
        assert_eq!(events.warnings, conversion.warnings);
        assert_eq!(events.warnings.len(), 1);
        assert_eq!(events.warnings[0].kind, WarningKind::MissingTimeRange);
        assert_eq!(conversion.utterance_count, 2);
        assert!(!conversion.markdown.contains("ms"));
    }
}
