use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::domain::parse_warning::{Parsed, WarningKind, WarningLocation};
use crate::shared::constants::{CUE_HEADER_TOKEN, UNKNOWN_SPEAKER};
use crate::shared::text::{collapse_whitespace, decode_entities};
use crate::shared::timestamp::Timestamp;
use crate::shared::utterance::Utterance;

const TIME_RANGE_ARROW: &str = "-->";
const METADATA_BLOCK_KEYWORDS: &[&str] = &["NOTE", "STYLE", "REGION"];

fn voice_tag_regex() -> &'static Regex {
    static VOICE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    VOICE_TAG_REGEX.get_or_init(|| {
        Regex::new(r"<v(?:\.[^\s>]*)?\s+([^>]+)>").expect("Failed to compile voice tag regex")
    })
}

fn markup_tag_regex() -> &'static Regex {
    static MARKUP_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    MARKUP_TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Failed to compile tag regex"))
}

/// Parses WebVTT text into utterances, one per cue block that has text.
///
/// Never fails: a bad time range, a block without one, or a cue without text
/// costs only that block and leaves a warning behind. Input with no blocks at
/// all produces an empty sequence.
pub fn parse_cue_transcript(input: &str) -> Parsed<Vec<Utterance>> {
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
    let mut parsed = Parsed::new(Vec::new());
    let mut last_speaker: Option<String> = None;

    for (index, block) in split_blocks(input).iter().enumerate() {
        let location = WarningLocation::Block(index + 1);

        if index == 0 {
            if block[0].trim_start().starts_with(CUE_HEADER_TOKEN) {
                // A cue may follow the header without a separating blank line.
                let rest = &block[1..];
                if rest.iter().any(|line| line.contains(TIME_RANGE_ARROW)) {
                    parse_block(rest, location, &mut last_speaker, &mut parsed);
                }
                continue;
            }
            parsed.warn(
                WarningLocation::Document,
                WarningKind::MissingHeader,
                format!(
                    "expected the first line to start with {CUE_HEADER_TOKEN}, found '{}'",
                    block[0].trim()
                ),
            );
        }

        if is_metadata_block(block) {
            continue;
        }
        parse_block(block, location, &mut last_speaker, &mut parsed);
    }

    log::debug!(
        "Parsed {} cue(s) with {} warning(s)",
        parsed.value.len(),
        parsed.warnings.len()
    );
    parsed
}

/// Groups lines into blocks separated by whitespace-only lines.
fn split_blocks(input: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in input.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn is_metadata_block(block: &[&str]) -> bool {
    let first_token = block[0].split_whitespace().next().unwrap_or("");
    METADATA_BLOCK_KEYWORDS.contains(&first_token)
        && !block.iter().any(|line| line.contains(TIME_RANGE_ARROW))
}

fn parse_block(
    block: &[&str],
    location: WarningLocation,
    last_speaker: &mut Option<String>,
    parsed: &mut Parsed<Vec<Utterance>>,
) {
    // Lines before the time range are a cue identifier, which carries nothing we keep.
    let Some(timing_index) = block.iter().position(|line| line.contains(TIME_RANGE_ARROW))
    else {
        parsed.warn(
            location,
            WarningKind::MissingTimeRange,
            format!(
                "expected a 'start --> end' line, found '{}'; block skipped",
                block[0].trim()
            ),
        );
        return;
    };

    let timing_line = block[timing_index].trim();
    let timestamp = match parse_start_time(timing_line) {
        Some(ts) => ts,
        None => {
            parsed.warn(
                location,
                WarningKind::InvalidTimestamp,
                format!("could not read a start time from '{timing_line}'"),
            );
            Timestamp::Unknown
        }
    };

    let payload = &block[timing_index + 1..];
    let voices = voice_tag_speakers(payload);
    let speaker = voices.first().cloned().or_else(|| last_speaker.clone());
    if let Some(latest) = voices.last() {
        *last_speaker = Some(latest.clone());
    }

    let text = clean_payload(payload);
    if text.is_empty() {
        parsed.warn(location, WarningKind::EmptyText, "cue has no text; dropped");
        return;
    }

    let speaker = match speaker {
        Some(name) => name,
        None => {
            parsed.warn(
                location,
                WarningKind::UnknownSpeaker,
                format!("no voice tag and no earlier speaker; using '{UNKNOWN_SPEAKER}'"),
            );
            UNKNOWN_SPEAKER.to_string()
        }
    };

    let mut others: Vec<&str> = Vec::new();
    for name in &voices {
        if *name != speaker && !others.contains(&name.as_str()) {
            others.push(name);
        }
    }
    if !others.is_empty() {
        parsed.warn(
            location,
            WarningKind::MultipleVoices,
            format!(
                "cue also voices {}; all text attributed to '{speaker}'",
                others.join(", ")
            ),
        );
    }

    if let Some(utterance) = Utterance::new(&speaker, timestamp, &text) {
        parsed.value.push(utterance);
    }
}

fn parse_start_time(timing_line: &str) -> Option<Timestamp> {
    let (start, _end) = timing_line.split_once(TIME_RANGE_ARROW)?;
    Timestamp::parse_clock(start)
}

/// Names from every `<v Name>` tag in the payload, in order.
fn voice_tag_speakers(payload: &[&str]) -> Vec<String> {
    payload
        .iter()
        .flat_map(|line| voice_tag_regex().captures_iter(*line))
        .map(|caps| collapse_whitespace(&decode_entities(&caps[1])))
        .filter(|name| !name.is_empty())
        .collect()
}

fn clean_payload(payload: &[&str]) -> String {
    let lines: Vec<String> = payload
        .iter()
        .map(|line| {
            let stripped = markup_tag_regex().replace_all(line, "");
            decode_entities(&stripped).trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect();
    collapse_whitespace(&lines.join(" "))
}
