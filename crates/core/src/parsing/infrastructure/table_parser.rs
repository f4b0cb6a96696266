use crate::parsing::domain::parse_warning::{Parsed, WarningKind, WarningLocation};
use crate::parsing::domain::transcript_error::TranscriptError;
use crate::shared::constants::{TABLE_HEADER_LABEL, UNKNOWN_SPEAKER, UNKNOWN_TIMESTAMP};
use crate::shared::timestamp::Timestamp;
use crate::shared::utterance::Utterance;

use super::docx_reader::{read_docx_tables, DocxTable};

/// Speaker, timestamp and text.
const MIN_COLUMNS: usize = 3;

/// Parses a DOCX transcript whose first table of three or more columns holds
/// (speaker, timestamp, text) rows.
pub fn parse_table_transcript(bytes: &[u8]) -> Result<Parsed<Vec<Utterance>>, TranscriptError> {
    let tables = read_docx_tables(bytes)?;
    parse_tables(&tables)
}

/// Turns the rows of the first wide-enough table into utterances.
///
/// Fails only when no table has at least three columns. Malformed rows are
/// skipped or patched with placeholders, each with a warning.
pub fn parse_tables(tables: &[DocxTable]) -> Result<Parsed<Vec<Utterance>>, TranscriptError> {
    let Some(table) = tables.iter().find(|t| t.column_count() >= MIN_COLUMNS) else {
        let widest = tables.iter().map(DocxTable::column_count).max().unwrap_or(0);
        return Err(TranscriptError::parse(
            format!("a table with at least {MIN_COLUMNS} columns (speaker, timestamp, text)"),
            format!(
                "{} table(s), the widest with {widest} column(s)",
                tables.len()
            ),
        ));
    };

    let mut parsed = Parsed::new(Vec::new());
    for (index, row) in table.rows.iter().enumerate() {
        let location = WarningLocation::Row(index + 1);
        if is_header_row(row) {
            continue;
        }
        parse_row(row, location, &mut parsed);
    }

    log::debug!(
        "Parsed {} table row(s) with {} warning(s)",
        parsed.value.len(),
        parsed.warnings.len()
    );
    Ok(parsed)
}

fn is_header_row(row: &[String]) -> bool {
    row.first()
        .is_some_and(|cell| cell.trim().eq_ignore_ascii_case(TABLE_HEADER_LABEL))
}

fn parse_row(row: &[String], location: WarningLocation, parsed: &mut Parsed<Vec<Utterance>>) {
    if row.len() < MIN_COLUMNS {
        parsed.warn(
            location,
            WarningKind::ShortRow,
            format!(
                "expected {MIN_COLUMNS} cells, found {}; row skipped",
                row.len()
            ),
        );
        return;
    }

    let (speaker_cell, timestamp_cell, text_cell) = (&row[0], &row[1], &row[2]);

    if text_cell.trim().is_empty() {
        parsed.warn(location, WarningKind::EmptyText, "row has no text; dropped");
        return;
    }

    let timestamp = match Timestamp::parse_cell(timestamp_cell) {
        Some(ts) => ts,
        None => {
            parsed.warn(
                location,
                WarningKind::InvalidTimestamp,
                format!(
                    "expected HH:MM:SS or {UNKNOWN_TIMESTAMP}, found '{}'",
                    timestamp_cell.trim()
                ),
            );
            Timestamp::Unknown
        }
    };

    if speaker_cell.trim().is_empty() {
        parsed.warn(
            location,
            WarningKind::UnknownSpeaker,
            format!("speaker cell is blank; using '{UNKNOWN_SPEAKER}'"),
        );
    }

    if let Some(utterance) = Utterance::new(speaker_cell, timestamp, text_cell) {
        parsed.value.push(utterance);
    }
}
