//! Whole documents.
//!
//! A document is split into alternating text and boundary segments on the
//! math delimiters `$$`, `$`, `\[` and `\]`. Delimiters preceded by a
//! backslash are literal. With no nesting, every fourth segment starting at
//! index 2 is the content of a math region.
//!
//! ```text
//! "a $x$ b"  =>  "a ", "$", "x", "$", " b"
//!                  0    1    2    3    4
//! ```

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::processor::Translator;

const DELIMITERS: [&str; 4] = ["$$", "$", "\\[", "\\]"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Text,
    Boundary,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Text => f.write_str("text"),
            SegmentKind::Boundary => f.write_str("bdry"),
        }
    }
}

/// A piece of a document and where it starts, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub line: usize,
    pub column: usize,
    pub kind: SegmentKind,
    pub text: &'a str,
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}, {:>3}, {}: {:?}",
            self.line, self.column, self.kind, self.text
        )
    }
}

/// Iterator over the segments of a document.
#[derive(Debug, Clone)]
pub struct SegmentStream<'a> {
    text: &'a str,
    /// Byte offset of the next segment.
    offset: usize,
    next_kind: SegmentKind,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> SegmentStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            next_kind: SegmentKind::Text,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Find the next unescaped delimiter at or after byte `from`.
    fn find_delimiter(&self, from: usize) -> Option<(usize, usize)> {
        let bytes = self.text.as_bytes();
        (from..self.text.len()).find_map(|i| {
            if !self.text.is_char_boundary(i) || (i > 0 && bytes[i - 1] == b'\\') {
                return None;
            }
            let rest = &self.text[i..];
            DELIMITERS
                .iter()
                .find(|d| rest.starts_with(*d))
                .map(|d| (i, d.len()))
        })
    }

    fn advance_position(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(last) => {
                self.line += text.matches('\n').count();
                self.column = text[last + 1..].chars().count() + 1;
            }
            None => self.column += text.chars().count(),
        }
    }
}

impl<'a> Iterator for SegmentStream<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let kind = self.next_kind;
        let end = match kind {
            SegmentKind::Text => match self.find_delimiter(self.offset) {
                Some((start, _)) => start,
                None => {
                    self.finished = true;
                    self.text.len()
                }
            },
            // A boundary segment is only produced right after a text segment
            // that stopped at a delimiter.
            SegmentKind::Boundary => match self.find_delimiter(self.offset) {
                Some((start, len)) if start == self.offset => start + len,
                _ => {
                    self.finished = true;
                    return None;
                }
            },
        };

        let text = &self.text[self.offset..end];
        let segment = Segment {
            line: self.line,
            column: self.column,
            kind,
            text,
        };

        self.offset = end;
        self.next_kind = match kind {
            SegmentKind::Text => SegmentKind::Boundary,
            SegmentKind::Boundary => SegmentKind::Text,
        };
        self.advance_position(text);
        Some(segment)
    }
}

impl Translator {
    /// Translate every math region of a document, leaving the rest untouched.
    ///
    /// Nested math modes are not recognized.
    pub fn translate_document(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        for (n, segment) in SegmentStream::new(text).enumerate() {
            if n % 4 == 2 && !segment.text.is_empty() {
                let translated = self
                    .translate_region(segment.text)
                    .map_err(|e| e.at(segment.line, segment.column))?;
                match translated {
                    Some(tex) => {
                        debug!(
                            line = segment.line,
                            column = segment.column,
                            "translated math region"
                        );
                        out.push_str(&tex);
                    }
                    None => {
                        debug!(
                            line = segment.line,
                            column = segment.column,
                            "skipped math region without key"
                        );
                        out.push_str(segment.text);
                    }
                }
            } else {
                out.push_str(segment.text);
            }
        }
        Ok(out)
    }

    /// Translate the content of one math region, or `None` when the key
    /// character says to leave it alone.
    fn translate_region(&self, content: &str) -> Result<Option<String>> {
        let Some(key) = self.config().key_char else {
            return self.translate_snippet(content).map(Some);
        };

        let (content, leading) = match content.strip_prefix(key) {
            Some(rest) => (rest, true),
            None => (content, false),
        };
        let (content, trailing) = match content.strip_suffix(key) {
            Some(rest) => (rest, true),
            None => (content, false),
        };

        if leading || trailing {
            self.translate_snippet(content).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn segments(text: &str) -> Vec<(SegmentKind, &str)> {
        SegmentStream::new(text).map(|s| (s.kind, s.text)).collect()
    }

    #[test]
    fn test_segments_alternate() {
        use SegmentKind::*;
        assert_eq!(
            segments("a $x$ b"),
            vec![(Text, "a "), (Boundary, "$"), (Text, "x"), (Boundary, "$"), (Text, " b")]
        );
        assert_eq!(
            segments("$$y$$"),
            vec![(Text, ""), (Boundary, "$$"), (Text, "y"), (Boundary, "$$"), (Text, "")]
        );
        assert_eq!(
            segments("\\[z\\]"),
            vec![(Text, ""), (Boundary, "\\["), (Text, "z"), (Boundary, "\\]"), (Text, "")]
        );
        assert_eq!(segments("plain"), vec![(Text, "plain")]);
        assert_eq!(segments(""), vec![(Text, "")]);
    }

    #[test]
    fn test_escaped_dollar_is_not_a_boundary() {
        assert_eq!(segments("cost \\$5"), vec![(SegmentKind::Text, "cost \\$5")]);
        assert_eq!(segments("\\\\[x"), vec![(SegmentKind::Text, "\\\\[x")]);
    }

    #[test]
    fn test_segment_positions() {
        let segs: Vec<_> = SegmentStream::new("ab\ncd $x$\n$y$").collect();
        let positions: Vec<_> = segs.iter().map(|s| (s.line, s.column)).collect();
        assert_eq!(
            positions,
            vec![(1, 1), (2, 4), (2, 5), (2, 6), (2, 7), (3, 1), (3, 2), (3, 3), (3, 4)]
        );
    }

    #[test]
    fn test_segment_display() {
        let seg = SegmentStream::new("ab").next().unwrap();
        assert_eq!(seg.to_string(), "  1,   1, text: \"ab\"");
    }

    #[test]
    fn test_key_char_gate() {
        let translator = Translator::default();
        let cases = [
            ("$alp$", "$alp$"),
            ("$@alp$", "$\\alpha$"),
            ("$alp@$", "$\\alpha$"),
            ("$@alp@$", "$\\alpha$"),
            ("$$alp$$", "$$alp$$"),
            ("$$@alp$$", "$$\\alpha$$"),
            ("$$alp@$$", "$$\\alpha$$"),
            ("$$@alp@$$", "$$\\alpha$$"),
        ];
        for (input, expected) in cases {
            assert_eq!(translator.translate_document(input).unwrap(), expected);
        }
    }

    #[test]
    fn test_without_key_char() {
        let translator = Translator::new(Config::new().with_key_char(None)).unwrap();
        assert_eq!(
            translator.translate_document("Take $alp$ and \\[bet\\].").unwrap(),
            "Take $\\alpha$ and \\[\\beta\\]."
        );
    }

    #[test]
    fn test_custom_key_char() {
        let translator = Translator::new(Config::new().with_key_char(Some('!'))).unwrap();
        assert_eq!(translator.translate_document("$!alp$ $@alp$").unwrap(), "$\\alpha$ $@alp$");
    }

    #[test]
    fn test_lone_key_char() {
        let translator = Translator::default();
        assert_eq!(translator.translate_document("$@$").unwrap(), "$$");
    }

    #[test]
    fn test_fault_carries_location() {
        let err = Translator::default()
            .translate_document("line one\nthen $@frac 1 over 2$")
            .unwrap_err();
        assert_eq!(err.location(), Some((2, 7)));
        let Error::Located { source, .. } = err else {
            panic!("expected a located fault, got {err:?}");
        };
        assert_eq!(
            *source,
            Error::Unterminated {
                keyword: "frac",
                expected: ";"
            }
        );
    }

    #[test]
    fn test_text_outside_math_is_untouched() {
        let text = "alp and frac; stay as they are, $@alp$ does not.";
        assert_eq!(
            Translator::default().translate_document(text).unwrap(),
            "alp and frac; stay as they are, $\\alpha$ does not."
        );
    }
}
