use crate::error::{Error, Result};

pub const DEFAULT_KEY_CHAR: char = '@';
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Translator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// When set, a math region is translated only if its content starts and/or
    /// ends with this character. `None` translates every math region.
    pub key_char: Option<char>,
    /// Maximum nesting of constructs before translation gives up.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_char: Some(DEFAULT_KEY_CHAR),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_char(mut self, key_char: Option<char>) -> Self {
        self.key_char = key_char;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<()> {
        match self.key_char {
            Some(c @ ('\\' | '$')) => Err(Error::InvalidKeyChar(c)),
            _ => Ok(()),
        }
    }
}
