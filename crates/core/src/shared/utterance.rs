use std::fmt;

use super::constants::UNKNOWN_SPEAKER;
use super::timestamp::Timestamp;

/// One contiguous spoken segment of a transcript.
///
/// Fields are private so that every instance goes through [`Utterance::new`]:
/// the speaker is never blank and the text is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utterance {
    speaker: String,
    timestamp: Timestamp,
    text: String,
}

impl Utterance {
    /// Builds an utterance, trimming speaker and text.
    ///
    /// A blank speaker is replaced by [`UNKNOWN_SPEAKER`]. Returns `None` when
    /// the text is blank.
    pub fn new(speaker: &str, timestamp: Timestamp, text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let speaker = match speaker.trim() {
            "" => UNKNOWN_SPEAKER,
            name => name,
        };
        Some(Self {
            speaker: speaker.to_string(),
            timestamp,
            text: text.to_string(),
        })
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns a new utterance holding this one's speaker and timestamp and
    /// both texts joined by a single space.
    pub fn merged_with(&self, next: &Utterance) -> Utterance {
        Utterance {
            speaker: self.speaker.clone(),
            timestamp: self.timestamp,
            text: format!("{} {}", self.text, next.text),
        }
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.timestamp, self.speaker, self.text)
    }
}
