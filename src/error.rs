use thiserror::Error;

/// A translation fault.
///
/// Any of these aborts the snippet being translated. Malformed range operators
/// are not faults; they render as an inline marker instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("failed to tokenize snippet: {0}")]
    Tokenize(String),

    #[error("unterminated `{keyword}`: expected `{expected}` before end of snippet")]
    Unterminated {
        keyword: &'static str,
        expected: &'static str,
    },

    #[error("too many operands for `{keyword}`")]
    TooManyOperands { keyword: &'static str },

    #[error("matrix is missing its `cols` column count")]
    MissingColumnCount,

    #[error("bad matrix column count {0:?}")]
    BadColumnCount(String),

    #[error("maximum nesting depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    #[error("invalid key character {0:?}: must not be `\\` or `$`")]
    InvalidKeyChar(char),

    #[error("line {line}, column {column}: {source}")]
    Located {
        line: usize,
        column: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the position of the enclosing math region.
    pub fn at(self, line: usize, column: usize) -> Self {
        Error::Located {
            line,
            column,
            source: Box::new(self),
        }
    }

    /// Line and column of the math region the fault was raised in, if known.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Error::Located { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
