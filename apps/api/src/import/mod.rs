// Plain-text résumé import.
// Best-effort and total: the parser merges what it recognises into the current
// document and returns it; it has no error path.

pub mod lines;
pub mod parser;

pub use parser::parse_resume_text;
