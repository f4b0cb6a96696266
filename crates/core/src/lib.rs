//! Meeting transcript conversion: WebVTT and DOCX transcripts in, markdown out,
//! with optional publishing to a GitHub repository.

pub mod parsing;
pub mod pipeline;
pub mod publishing;
pub mod rendering;
pub mod shared;
