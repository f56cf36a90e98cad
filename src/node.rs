//! Parse nodes.
//!
//! A node collects the translations of the tokens read while it is open and
//! renders them once its final terminator has been seen. Which words count as
//! terminators, and what rendering looks like, is decided by the variant.

use std::mem;

use tracing::warn;

use crate::error::{Error, Result};
use crate::keywords::{BinaryTemplate, BlockKind, Construct, TertiaryTemplate, UnaryTemplate};

const END_ARGS: &str = ";";
const RANGE_CLAUSES: [&str; 3] = ["over", "from", "to"];
const MATRIX_COLS: &str = "cols";
const MATRIX_END: &str = "endmatrix";
const SPACED_END: &str = "end";
const SPACED_SEPARATOR: &str = "\\: ";

pub const RANGE_ERROR_MARKER: &str = "--error in range operator--";

#[derive(Debug)]
pub(crate) enum Node {
    Root {
        output: String,
    },
    Unary {
        keyword: &'static str,
        template: &'static UnaryTemplate,
        body: String,
    },
    Binary {
        keyword: &'static str,
        template: &'static BinaryTemplate,
        /// Operands closed by a separator word.
        operands: Vec<String>,
        current: String,
    },
    Tertiary {
        keyword: &'static str,
        template: &'static TertiaryTemplate,
        /// Operands closed by a separator word.
        operands: Vec<String>,
        current: String,
    },
    Range {
        keyword: &'static str,
        symbol: &'static str,
        /// Anything read before the first clause word.
        leading: String,
        clauses: Vec<(&'static str, String)>,
    },
    Matrix {
        columns: Option<usize>,
        entries: Vec<String>,
        current: String,
    },
    SpacedGroup {
        entries: Vec<String>,
        current: String,
    },
}

impl Node {
    pub fn root() -> Self {
        Node::Root {
            output: String::new(),
        }
    }

    pub fn open(construct: Construct) -> Self {
        match construct {
            Construct::Unary(keyword, template) => Node::Unary {
                keyword,
                template,
                body: String::new(),
            },
            Construct::Binary(keyword, template) => Node::Binary {
                keyword,
                template,
                operands: Vec::new(),
                current: String::new(),
            },
            Construct::Tertiary(keyword, template) => Node::Tertiary {
                keyword,
                template,
                operands: Vec::new(),
                current: String::new(),
            },
            Construct::Range(keyword, symbol) => Node::Range {
                keyword,
                symbol,
                leading: String::new(),
                clauses: Vec::new(),
            },
            Construct::Block(_, BlockKind::Matrix) => Node::Matrix {
                columns: None,
                entries: Vec::new(),
                current: String::new(),
            },
            Construct::Block(_, BlockKind::SpacedGroup) => Node::SpacedGroup {
                entries: Vec::new(),
                current: String::new(),
            },
        }
    }

    /// The word that closes this node, or `None` for the root.
    pub fn final_terminator(&self) -> Option<&'static str> {
        match self {
            Node::Root { .. } => None,
            Node::Unary { .. }
            | Node::Binary { .. }
            | Node::Tertiary { .. }
            | Node::Range { .. } => Some(END_ARGS),
            Node::Matrix { .. } => Some(MATRIX_END),
            Node::SpacedGroup { .. } => Some(SPACED_END),
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Node::Root { .. } => "",
            Node::Unary { keyword, .. }
            | Node::Binary { keyword, .. }
            | Node::Tertiary { keyword, .. }
            | Node::Range { keyword, .. } => *keyword,
            Node::Matrix { .. } => "matrix",
            Node::SpacedGroup { .. } => "padsp",
        }
    }

    pub fn is_terminator(&self, word: &str) -> bool {
        match self {
            Node::Root { .. } => false,
            Node::Unary { .. } => word == END_ARGS,
            Node::Binary { template, .. } => word == template.separator || word == END_ARGS,
            Node::Tertiary { template, .. } => {
                template.separators.contains(&word) || word == END_ARGS
            }
            Node::Range { .. } => RANGE_CLAUSES.contains(&word) || word == END_ARGS,
            Node::Matrix { .. } => matches!(word, MATRIX_COLS | END_ARGS | MATRIX_END),
            Node::SpacedGroup { .. } => matches!(word, END_ARGS | SPACED_END),
        }
    }

    /// Append one translated piece, followed by a separating space.
    pub fn push(&mut self, text: &str) {
        let buffer = match self {
            Node::Root { output } => output,
            Node::Unary { body, .. } => body,
            Node::Binary { current, .. } | Node::Tertiary { current, .. } => current,
            Node::Range {
                leading, clauses, ..
            } => match clauses.last_mut() {
                Some((_, bound)) => bound,
                None => leading,
            },
            Node::Matrix { current, .. } | Node::SpacedGroup { current, .. } => current,
        };
        buffer.push_str(text);
        buffer.push(' ');
    }

    /// Handle one of this node's terminator words. Returns `true` once the
    /// node is complete.
    pub fn terminate(&mut self, word: &str) -> Result<bool> {
        match self {
            Node::Root { .. } => Ok(false),
            Node::Unary { .. } => Ok(true),
            Node::Binary {
                keyword,
                operands,
                current,
                ..
            } => Self::next_operand(*keyword, operands, current, 2, word),
            Node::Tertiary {
                keyword,
                operands,
                current,
                ..
            } => Self::next_operand(*keyword, operands, current, 3, word),
            Node::Range { clauses, .. } => {
                if let Some(clause) = RANGE_CLAUSES.iter().find(|c| **c == word) {
                    clauses.push((*clause, String::new()));
                    return Ok(false);
                }
                Ok(true)
            }
            Node::Matrix {
                columns,
                entries,
                current,
            } => match word {
                MATRIX_COLS => {
                    // Digits arrive as separate tokens, so `12` reads as `1 2`.
                    let count: String = current.split_whitespace().collect();
                    match count.parse::<usize>() {
                        Ok(n) if n > 0 => *columns = Some(n),
                        _ => return Err(Error::BadColumnCount(count)),
                    }
                    current.clear();
                    Ok(false)
                }
                MATRIX_END => {
                    Self::close_entry(entries, current);
                    Ok(true)
                }
                _ => {
                    entries.push(mem::take(current));
                    Ok(false)
                }
            },
            Node::SpacedGroup { entries, current } => match word {
                SPACED_END => {
                    Self::close_entry(entries, current);
                    Ok(true)
                }
                _ => {
                    entries.push(mem::take(current));
                    Ok(false)
                }
            },
        }
    }

    fn next_operand(
        keyword: &'static str,
        operands: &mut Vec<String>,
        current: &mut String,
        arity: usize,
        word: &str,
    ) -> Result<bool> {
        if word == END_ARGS {
            return Ok(true);
        }
        // `current` is the last operand, so a full set of separators has
        // been seen once `arity - 1` operands are closed.
        if operands.len() + 1 == arity {
            return Err(Error::TooManyOperands { keyword });
        }
        operands.push(mem::take(current));
        Ok(false)
    }

    /// A blank trailing entry is not an entry.
    fn close_entry(entries: &mut Vec<String>, current: &mut String) {
        if !current.trim().is_empty() {
            entries.push(mem::take(current));
        }
    }

    pub fn build(self) -> Result<String> {
        match self {
            Node::Root { output } => Ok(output.trim().to_owned()),
            Node::Unary { template, body, .. } => {
                Ok(format!("{}{}{}", template.open, body, template.close))
            }
            Node::Binary {
                template,
                mut operands,
                current,
                ..
            } => {
                operands.push(current);
                operands.resize(2, String::new());
                let [a, b] = template.order.map(|i| operands[i].as_str());
                let [p0, p1, p2] = template.parts;
                Ok(format!("{p0}{a}{p1}{b}{p2}"))
            }
            Node::Tertiary {
                template,
                mut operands,
                current,
                ..
            } => {
                operands.push(current);
                operands.resize(3, String::new());
                let [a, b, c] = template.order.map(|i| operands[i].as_str());
                let [p0, p1, p2, p3] = template.parts;
                Ok(format!("{p0}{a}{p1}{b}{p2}{c}{p3}"))
            }
            Node::Range {
                keyword,
                symbol,
                leading,
                clauses,
            } => Ok(Self::build_range(keyword, symbol, &leading, &clauses)),
            Node::Matrix {
                columns, entries, ..
            } => {
                let columns = columns.ok_or(Error::MissingColumnCount)?;
                Ok(Self::build_matrix(columns, &entries))
            }
            Node::SpacedGroup { entries, .. } => Ok(entries.join(SPACED_SEPARATOR)),
        }
    }

    /// Pick the output form from the clause words alone. Text read before
    /// the first clause lands in the upper bound, so it only shows in the
    /// full `over`/`from`/`to` form.
    fn build_range(
        keyword: &str,
        symbol: &str,
        leading: &str,
        clauses: &[(&'static str, String)],
    ) -> String {
        let words: Vec<&str> = clauses.iter().map(|(word, _)| *word).collect();
        match (words.as_slice(), clauses) {
            ([], _) => format!("{symbol} "),
            (["over"], [(_, range)]) => format!("{symbol}_{{{range}}} "),
            (["over", "from", "to"], [(_, var), (_, start), (_, end)]) => {
                format!("{symbol}_{{{var}={start}}}^{{{leading}{end}}} ")
            }
            _ => {
                warn!(keyword, clauses = ?words, "malformed range operator");
                RANGE_ERROR_MARKER.to_owned()
            }
        }
    }

    /// Lay entries out row-major, `columns` to a row.
    fn build_matrix(columns: usize, entries: &[String]) -> String {
        let mut out = format!("\\begin{{array}}{{{}}}", "c".repeat(columns));
        for (k, entry) in entries.iter().enumerate() {
            let col = k % columns;
            if col > 0 {
                out.push_str(" & ");
            }
            out.push_str(entry);
            if col == columns - 1 {
                out.push_str("\\\\");
            }
        }
        out.push('\n');
        out.push_str("\\end{array}");
        out
    }
}
