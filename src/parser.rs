use pest::Parser;
use pest_derive::Parser;

use crate::error::{Error, Result};
use crate::token::Token;

#[derive(Parser)]
#[grammar = "src/vertex.pest"]
pub struct VertexParser;

impl VertexParser {
    /// Split a snippet into tokens. Concatenating the tokens gives back the
    /// input.
    pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>> {
        let pairs = VertexParser::parse(Rule::snippet, input)
            .map_err(|e| Error::Tokenize(e.to_string()))?;

        Ok(pairs
            .flat_map(|snippet| snippet.into_inner())
            .filter(|pair| pair.as_rule() != Rule::EOI)
            .map(|pair| Token::new(pair.as_str()))
            .collect())
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>> {
    VertexParser::tokenize(input)
}
