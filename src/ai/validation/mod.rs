//! AI Response Validation
//!
//! Validation layer between the raw model answer and a `GeneratedPost`:
//! - Code fence stripping and strict JSON parsing
//! - HTML fragment well-formedness over the allowed tag set
//! - Markdown leakage detection
//!
//! Fail fast: nothing here repairs output, it only accepts or rejects.

mod markup;
mod post_parser;

pub use markup::{reject_markdown, validate_fragment};
pub use post_parser::{parse_post, strip_code_fences};
