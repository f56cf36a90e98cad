//! Translate VerTeX, a plain-word shorthand for mathematics, into TeX.
//!
//! Math regions of a document are found between `$`, `$$`, `\[` and `\]`
//! delimiters and translated when they carry the key character:
//!
//! ```
//! let tex = vertex2tex::translate_document("Let $@frac 1 over 2;@$ be small.").unwrap();
//! assert_eq!(tex, "Let $\\frac{1}{2}$ be small.");
//! ```

mod autosub;
pub mod config;
pub mod document;
pub mod error;
pub mod keywords;
mod node;
pub mod parser;
pub mod processor;
pub mod token;

pub use config::Config;
pub use document::{Segment, SegmentKind, SegmentStream};
pub use error::{Error, Result};
pub use node::RANGE_ERROR_MARKER;
pub use parser::tokenize;
pub use processor::{TranslatingReader, Translator, compress};
pub use token::{Token, TokenStream};

/// Translate one math snippet with the default configuration.
pub fn translate_snippet(text: &str) -> Result<String> {
    Translator::default().translate_snippet(text)
}

/// Translate every keyed math region of a document with the default
/// configuration.
pub fn translate_document(text: &str) -> Result<String> {
    Translator::default().translate_document(text)
}
