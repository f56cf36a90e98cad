//! Automatic subscripting and superscripting.
//!
//! An unrecognized word like `ai2` is read as a letter name followed by a
//! subscript, giving `a_{i 2}`. Inside the tail, `uu` (or `^^`) switches to a
//! superscript and `vv` (or `__`) opens a nested subscript. `UU` (or `^^^`)
//! closes one nested subscript and opens a superscript on the enclosing level.
//!
//! A leading `vv` opens nothing extra; it only stops the tail from being read
//! as a keyword, so `pvvie` gives `p_{i e}` rather than `\pi`.

use crate::error::Result;
use crate::keywords::KEYWORDS;
use crate::processor::Translator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    /// `uu`, `^^`
    Superscript,
    /// `UU`, `^^^`
    CloseSuperscript,
    /// `vv`, `__`
    Subscript,
}

/// Tried in order before anything else at each position of the tail.
const MARKERS: &[(&str, Marker)] = &[
    ("UU", Marker::CloseSuperscript),
    ("uu", Marker::Superscript),
    ("vv", Marker::Subscript),
    ("^^^", Marker::CloseSuperscript),
    ("^^", Marker::Superscript),
    ("__", Marker::Subscript),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Marker(Marker, &'a str),
    /// An optionally font-prefixed letter name.
    Letter(&'a str),
    /// Digits, `,`, `+` and `-`.
    Run(&'a str),
}

fn is_run_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ',' | '+' | '-')
}

/// Split a subscript tail into pieces, skipping characters that fit none.
fn split_tail(tail: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = tail;
    while let Some(c) = rest.chars().next() {
        let (piece, len) = if let Some(&(text, marker)) =
            MARKERS.iter().find(|(text, _)| rest.starts_with(text))
        {
            (Some(Piece::Marker(marker, text)), text.len())
        } else if let Some(len) = KEYWORDS.font_letter_len(rest) {
            (Some(Piece::Letter(&rest[..len])), len)
        } else if is_run_char(c) {
            let len = rest.find(|c| !is_run_char(c)).unwrap_or(rest.len());
            (Some(Piece::Run(&rest[..len])), len)
        } else {
            (None, c.len_utf8())
        };
        pieces.extend(piece);
        rest = &rest[len..];
    }
    pieces
}

/// Tracks nesting while the tail is emitted.
#[derive(Debug, Default)]
struct Script {
    /// Subscripts opened by a non-leading `vv` that still need a brace.
    pending: usize,
    started: bool,
}

impl Script {
    fn emit(&mut self, translator: &Translator, piece: Piece<'_>, depth: usize) -> Result<String> {
        let out = match piece {
            Piece::Marker(Marker::Superscript, _) => "}^{".to_owned(),
            Piece::Marker(Marker::CloseSuperscript, text) => {
                if self.pending == 0 {
                    text.to_owned()
                } else {
                    self.pending -= 1;
                    "}}^{".to_owned()
                }
            }
            Piece::Marker(Marker::Subscript, _) => {
                if self.started {
                    self.pending += 1;
                }
                "_{".to_owned()
            }
            Piece::Letter(word) => translator.translate_word(word, depth)?,
            Piece::Run(run) => run.to_owned(),
        };
        self.started = true;
        Ok(out)
    }
}

/// Expand `word`, which starts with an ASCII letter and has no spaces.
pub(crate) fn autosubscript(translator: &Translator, word: &str, depth: usize) -> Result<String> {
    let Some(head_len) = KEYWORDS.font_letter_len(word) else {
        return Ok(word.to_owned());
    };
    let (head, tail) = word.split_at(head_len);
    let head = translator.translate_word(head, depth)?;

    let mut script = Script::default();
    let pieces = split_tail(tail)
        .into_iter()
        .map(|piece| script.emit(translator, piece, depth))
        .collect::<Result<Vec<_>>>()?;

    let mut sub = format!("_{{{}}}", pieces.join(" "));
    sub.push_str(&"}".repeat(script.pending));

    // A tail starting with `uu` leaves an empty subscript in front, one
    // starting with `vv` a doubled `_{`.
    let sub = if let Some(rest) = sub.strip_prefix("_{}") {
        rest
    } else if sub.starts_with("_{_") {
        &sub[2..]
    } else {
        &sub
    };

    Ok(format!("{head}{sub}"))
}
