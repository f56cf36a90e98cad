use std::io::{self, Cursor, Read};

use tracing::trace;

use crate::autosub;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::keywords::KEYWORDS;
use crate::node::Node;
use crate::parser::VertexParser;
use crate::token::{Token, TokenStream};

/// VerTeX to TeX translator with recursive construct expansion
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: Config,
}

impl Translator {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate the contents of one math region (main entry point)
    pub fn translate_snippet(&self, text: &str) -> Result<String> {
        let tokens = VertexParser::tokenize(text)?;
        let mut stream = TokenStream::new(tokens);
        let out = self.consume(Node::root(), &mut stream, 0)?;
        Ok(compress(&out))
    }

    /// Translate a single word as if it were a snippet of its own, without
    /// compressing the result.
    pub(crate) fn translate_word(&self, word: &str, depth: usize) -> Result<String> {
        let mut stream = TokenStream::new(vec![Token::new(word)]);
        self.consume(Node::root(), &mut stream, depth)
    }

    /// Feed tokens from `stream` into `node` until the node is complete, then
    /// render it. Constructs opened along the way read from the same stream
    /// and return before `node` sees another token.
    pub(crate) fn consume(
        &self,
        mut node: Node,
        stream: &mut TokenStream<'_>,
        depth: usize,
    ) -> Result<String> {
        if depth > self.config.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.config.max_depth,
            });
        }

        loop {
            let Some(token) = stream.next() else {
                return match node.final_terminator() {
                    None => node.build(),
                    Some(expected) => Err(Error::Unterminated {
                        keyword: node.keyword(),
                        expected,
                    }),
                };
            };
            let word = token.as_str();

            let emitted = if token.is_escaped() {
                token.unescaped().to_owned()
            } else if token.is_html_entity() {
                word.to_owned()
            } else if let Some(construct) = KEYWORDS.construct(word) {
                trace!(keyword = construct.keyword(), depth, "opening construct");
                self.consume(Node::open(construct), stream, depth + 1)?
            } else if node.is_terminator(word) {
                if node.terminate(word)? {
                    break;
                }
                continue;
            } else if let Some(expansion) = KEYWORDS.builtin(word) {
                expansion.to_owned()
            } else if KEYWORDS.is_backslash_me(word) {
                format!("\\{word}")
            } else if let Some((font, letter)) = KEYWORDS.split_font_word(word) {
                let letter = self.translate_word(letter, depth + 1)?;
                format!("\\{font}{{{letter}}}")
            } else if token.is_identifier_like() {
                autosub::autosubscript(self, word, depth + 1)?
            } else {
                word.to_owned()
            };
            node.push(&emitted);
        }

        node.build()
    }
}

/// Delete all whitespace except a single character before an ASCII letter,
/// which keeps adjacent control words like `\in A` apart.
pub fn compress(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending = None;
    for c in text.chars() {
        if c.is_whitespace() {
            pending = Some(c);
            continue;
        }
        if let Some(space) = pending.take() {
            if c.is_ascii_alphabetic() {
                out.push(space);
            }
        }
        out.push(c);
    }
    out
}

/// Reads a whole VerTeX document from `inner` on first use and yields its
/// translation. Faults surface as [`io::ErrorKind::InvalidData`]; once reading
/// or translating has failed, every later read fails the same way.
pub struct TranslatingReader<R: Read> {
    inner: R,
    translator: Translator,
    translated: Option<std::result::Result<Cursor<Vec<u8>>, (io::ErrorKind, String)>>,
}

impl<R: Read> TranslatingReader<R> {
    pub fn new(inner: R, translator: Translator) -> Self {
        Self {
            inner,
            translator,
            translated: None,
        }
    }
}

fn translate_input(inner: &mut impl Read, translator: &Translator) -> io::Result<Cursor<Vec<u8>>> {
    // Math regions can span the whole input, so it is read in one go.
    let mut source = String::new();
    inner.read_to_string(&mut source)?;

    let tex = translator
        .translate_document(&source)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Cursor::new(tex.into_bytes()))
}

impl<R: Read> Read for TranslatingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Self {
            inner,
            translator,
            translated,
        } = self;
        let translated = translated.get_or_insert_with(|| {
            translate_input(inner, translator).map_err(|e| (e.kind(), e.to_string()))
        });
        match translated {
            Ok(cursor) => cursor.read(buf),
            Err((kind, message)) => Err(io::Error::new(*kind, message.clone())),
        }
    }
}
