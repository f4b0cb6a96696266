pub mod constants;
pub mod text;
pub mod timestamp;
pub mod utterance;
