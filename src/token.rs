use std::fmt;

use crate::keywords::KEYWORDS;

/// A slice of snippet text produced by the tokenizer.
///
/// Tokens carry no tag; what a token means is decided when it is read, by
/// looking it up in the keyword tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a>(&'a str);

impl<'a> Token<'a> {
    pub fn new(text: &'a str) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    pub fn is_escaped(&self) -> bool {
        self.0.starts_with('\\')
    }

    /// Text to emit for a backslash token: `\\word` loses both backslashes,
    /// everything else is kept as written.
    pub fn unescaped(&self) -> &'a str {
        match self.0.strip_prefix("\\\\") {
            Some(rest) if !rest.is_empty() => rest,
            _ => self.0,
        }
    }

    pub fn is_html_entity(&self) -> bool {
        KEYWORDS.is_html_entity(self.0)
    }

    /// Whether an otherwise unrecognized token should be auto-subscripted.
    pub fn is_identifier_like(&self) -> bool {
        self.0.chars().count() >= 2
            && self.0.starts_with(|c: char| c.is_ascii_alphabetic())
            && !self.0.contains(' ')
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Forward-only cursor over a token sequence.
///
/// Nested constructs all read from the same stream, each picking up where the
/// previous one stopped.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> &[Token<'a>] {
        &self.tokens[self.position..]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Tokens in `start..end`, clamped to the stream.
    pub fn slice(&self, start: usize, end: usize) -> &[Token<'a>] {
        let end = end.min(self.tokens.len());
        let start = start.min(end);
        &self.tokens[start..end]
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.get(self.position).copied()?;
        self.position += 1;
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(words: &[&'static str]) -> TokenStream<'static> {
        TokenStream::new(words.iter().copied().map(Token::new).collect())
    }

    #[test]
    fn test_unescaped() {
        assert_eq!(Token::new("\\\\frac").unescaped(), "frac");
        assert_eq!(Token::new("\\\\").unescaped(), "\\\\");
        assert_eq!(Token::new("\\alpha").unescaped(), "\\alpha");
        assert_eq!(Token::new("\\").unescaped(), "\\");
    }

    #[test]
    fn test_identifier_like() {
        assert!(Token::new("ab").is_identifier_like());
        assert!(Token::new("x1").is_identifier_like());
        assert!(!Token::new("x").is_identifier_like());
        assert!(!Token::new("1x").is_identifier_like());
        assert!(!Token::new("#12").is_identifier_like());
    }

    #[test]
    fn test_stream_advances() {
        let mut ts = stream(&["a", " ", "b"]);
        assert_eq!(ts.position(), 0);
        assert_eq!(ts.next(), Some(Token::new("a")));
        assert_eq!(ts.position(), 1);
        assert_eq!(ts.remaining(), &[Token::new(" "), Token::new("b")]);
        assert_eq!(ts.next(), Some(Token::new(" ")));
        assert_eq!(ts.next(), Some(Token::new("b")));
        assert!(ts.is_exhausted());
        assert_eq!(ts.next(), None);
        assert_eq!(ts.position(), 3);
    }

    #[test]
    fn test_remaining_does_not_advance() {
        let ts = stream(&["a", "b"]);
        assert_eq!(ts.remaining().len(), 2);
        assert_eq!(ts.remaining().len(), 2);
        assert_eq!(ts.position(), 0);
    }

    #[test]
    fn test_slice_is_clamped() {
        let ts = stream(&["a", "b", "c"]);
        assert_eq!(ts.slice(1, 2), &[Token::new("b")]);
        assert_eq!(ts.slice(1, 10).len(), 2);
        assert!(ts.slice(5, 10).is_empty());
        assert!(ts.slice(2, 1).is_empty());
    }
}
