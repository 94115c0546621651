//! Text preparation before synthesis.
//!
//! Input text arrives straight from the command line or a file and may carry
//! control characters or exceed what a single service request accepts.

mod tokenizer;

pub use tokenizer::{GOOGLE_MAX_CHARS, chunk, sanitize, truncate_chars};
