pub mod convert_transcript_use_case;
pub mod pipeline_logger;
pub mod publish_transcript_use_case;
pub mod utterance_normalizer;
