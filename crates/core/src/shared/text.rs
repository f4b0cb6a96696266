use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

const MARKDOWN_METACHARACTERS: &[char] = &['*', '_', '`', '[', ']'];

fn entity_regex() -> &'static Regex {
    static ENTITY_REGEX: OnceLock<Regex> = OnceLock::new();
    ENTITY_REGEX.get_or_init(|| {
        Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[a-zA-Z]+);")
            .expect("Failed to compile entity regex")
    })
}

/// Decodes the character references shared by WebVTT cue text and XML.
///
/// Unknown named references are left untouched. `&nbsp;` becomes a plain
/// space and the bidi marks `&lrm;` / `&rlm;` are dropped.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }
    entity_regex().replace_all(input, |caps: &Captures| {
        let body = &caps[1];
        let decoded = match body {
            "amp" => Some("&".to_string()),
            "lt" => Some("<".to_string()),
            "gt" => Some(">".to_string()),
            "quot" => Some("\"".to_string()),
            "apos" => Some("'".to_string()),
            "nbsp" => Some(" ".to_string()),
            "lrm" | "rlm" => Some(String::new()),
            _ => decode_numeric(body).map(String::from),
        };
        decoded.unwrap_or_else(|| caps[0].to_string())
    })
}

fn decode_numeric(body: &str) -> Option<char> {
    let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        body.strip_prefix('#')?.parse().ok()?
    };
    char::from_u32(code)
}

/// Trims and collapses every whitespace run to a single space.
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Backslash-escapes the characters that would otherwise change how a
/// title, speaker name or utterance renders in markdown.
pub fn escape_markdown(input: &str) -> Cow<'_, str> {
    if !input.contains(MARKDOWN_METACHARACTERS) {
        return Cow::Borrowed(input);
    }
    let mut escaped = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        if MARKDOWN_METACHARACTERS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}
