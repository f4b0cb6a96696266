use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::domain::transcript_error::TranscriptError;
use crate::shared::constants::DOCX_DOCUMENT_PART;
use crate::shared::text::{collapse_whitespace, decode_entities};

/// Matches the WordprocessingML elements that shape a table and its text.
fn element_regex() -> &'static Regex {
    static ELEMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    ELEMENT_REGEX.get_or_init(|| {
        Regex::new(r"<(/?)w:(tbl|tr|tc|t|br|cr|tab|p)(?:\s[^>]*?)?(/?)>")
            .expect("Failed to compile element regex")
    })
}

/// One table of a document, as rows of plain-text cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocxTable {
    pub rows: Vec<Vec<String>>,
}

impl DocxTable {
    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Reads every table from the main body of a DOCX container, in document
/// order.
pub fn read_docx_tables(bytes: &[u8]) -> Result<Vec<DocxTable>, TranscriptError> {
    let xml = read_document_xml(bytes)?;
    Ok(extract_tables(&xml))
}

fn read_document_xml(bytes: &[u8]) -> Result<String, TranscriptError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        TranscriptError::parse("a DOCX document (zip container)", format!("an unreadable container: {e}"))
    })?;

    let mut part = archive.by_name(DOCX_DOCUMENT_PART).map_err(|_| {
        TranscriptError::parse(
            format!("a {DOCX_DOCUMENT_PART} part in the DOCX container"),
            "a container without it",
        )
    })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml).map_err(|e| {
        TranscriptError::parse(
            format!("UTF-8 XML in {DOCX_DOCUMENT_PART}"),
            format!("unreadable content: {e}"),
        )
    })?;
    Ok(xml)
}

/// Extracts top-level tables from WordprocessingML markup.
///
/// A table nested inside a cell is not reported on its own; its text is
/// folded into the enclosing cell so nothing is lost.
pub fn extract_tables(xml: &str) -> Vec<DocxTable> {
    let mut walker = TableWalker::default();
    let mut text_start = 0;
    for caps in element_regex().captures_iter(xml) {
        let Some(tag) = caps.get(0) else { continue };
        if walker.in_text {
            walker.push_text(&xml[text_start..tag.start()]);
        }
        text_start = tag.end();

        let closing = !caps[1].is_empty();
        let self_closing = !caps[3].is_empty();
        match (&caps[2], closing, self_closing) {
            (_, true, true) => {}
            ("tbl", false, false) => walker.open_table(),
            ("tbl", true, _) => walker.close_table(),
            ("tr", false, false) if walker.depth == 1 => walker.row.clear(),
            ("tr", true, _) if walker.depth == 1 => {
                let row = std::mem::take(&mut walker.row);
                walker.table.rows.push(row);
            }
            ("tc", false, false) if walker.depth == 1 => {
                walker.cell.clear();
                walker.in_cell = true;
            }
            ("tc", true, _) if walker.depth == 1 => {
                let cell = collapse_whitespace(&std::mem::take(&mut walker.cell));
                walker.row.push(cell);
                walker.in_cell = false;
            }
            ("t", false, false) => walker.in_text = true,
            ("t", true, _) => walker.in_text = false,
            ("br" | "cr" | "tab", false, true) | ("p", true, _) => walker.push_text(" "),
            _ => {}
        }
    }
    walker.tables
}

/// Tracks table nesting while walking document elements. Only depth-one
/// rows and cells are recorded.
#[derive(Default)]
struct TableWalker {
    tables: Vec<DocxTable>,
    table: DocxTable,
    row: Vec<String>,
    cell: String,
    depth: usize,
    in_cell: bool,
    in_text: bool,
}

impl TableWalker {
    fn open_table(&mut self) {
        self.depth += 1;
        if self.depth == 1 {
            self.table = DocxTable::default();
        }
    }

    fn close_table(&mut self) {
        if self.depth == 1 {
            self.tables.push(std::mem::take(&mut self.table));
        }
        self.depth = self.depth.saturating_sub(1);
    }

    fn push_text(&mut self, text: &str) {
        if self.in_cell {
            self.cell.push_str(&decode_entities(text));
        }
    }
}
