pub mod cue_parser;
pub mod docx_reader;
pub mod table_parser;
