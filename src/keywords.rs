//! Keyword tables.
//!
//! The keyword strings and their TeX expansions are a compatibility contract:
//! documents written against one release must translate identically in the
//! next, so entries are only ever added.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Fixed abbreviations.
pub const BUILTINS: &[(&str, &str)] = &[
    // Dots
    ("ccc", "\\cdots"),
    ("ddd", "\\ldots"),
    ("vvv", "\\vdots"),
    // Arrows
    ("to", "\\rightarrow"),
    ("gets", "\\leftarrow"),
    ("implies", "\\Rightarrow"),
    // Infixes
    ("equ", "="),
    ("div", "|"),
    ("plus", "+"),
    ("minus", "-"),
    ("in", "\\in"),
    ("ltn", "<"),
    ("gtn", ">"),
    // Differential operators
    ("par", "\\partial"),
    ("grad", "\\nabla"),
    ("mod", "~\\mathrm{mod}~"),
    // Signs
    ("mipl", "\\mp"),
    ("plmi", "\\pm"),
    ("empty", "\\varnothing"),
    // Powers
    ("inv", "^{-1}"),
    ("squ", "^2"),
    ("cubed", "^3"),
    // Ordinals
    ("rst", "^{\\mathrm{st}}"),
    ("ond", "^{\\mathrm{nd}}"),
    ("ird", "^{\\mathrm{rd}}"),
    ("eth", "^{\\mathrm{th}}"),
    ("star", "^*"),
    ("mult", "^\\times"),
    ("deg", "^\\circ"),
];

/// Three-letter names for every Greek letter. These are builtins as well as
/// letter names for auto-subscripting.
pub const GREEK_THREE_LETTER: &[(&str, &str)] = &[
    ("alp", "\\alpha"),
    ("bet", "\\beta"),
    ("gam", "\\gamma"),
    ("del", "\\delta"),
    ("eps", "\\epsilon"),
    ("zet", "\\zeta"),
    ("the", "\\theta"),
    ("iot", "\\iota"),
    ("kap", "\\kappa"),
    ("lam", "\\lambda"),
    ("sig", "\\sigma"),
    ("ups", "\\upsilon"),
    ("ome", "\\omega"),
    ("Gam", "\\Gamma"),
    ("Del", "\\Delta"),
    ("The", "\\Theta"),
    ("Lam", "\\Lambda"),
    ("Sig", "\\Sigma"),
    ("Ome", "\\Omega"),
    ("mew", "\\mu"),
    ("new", "\\nu"),
    ("pie", "\\pi"),
    ("ksi", "\\xi"),
    ("Pie", "\\Pi"),
    ("Ksi", "\\Xi"),
    ("vep", "\\varepsilon"),
    ("vph", "\\varphi"),
    ("vth", "\\vartheta"),
    ("vpi", "\\varpi"),
];

/// Words that are already TeX control words; they only need the backslash.
pub const BACKSLASH_ME: &[&str] = &[
    "mapsto", "leq", "geq", "neq", "times", "subseteq", "supseteq", "subsetneq", "supsetneq",
    "subset", "supset", "wedge", "vee", "not", "cdot", "top", "bot", "det", "equiv", "cong",
    "sim", "cup", "cap", "setminus", "nmid", "mid", "infty", "ker", "iff", "forall", "exists",
    "int", "sin", "cos", "log", "exp", "tan", "arctan", "arcsin", "arccos", "quad", "qquad",
];

/// Backslash-me words that also count as letter names.
pub const BACKSLASH_ME_LETTERS: &[&str] = &[
    "ell", "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi", "omega", "Gamma", "Delta",
    "Theta", "Lambda", "Sigma", "Phi", "Psi", "Omega",
];

/// Font and decoration prefixes, with the TeX command each one stands for.
pub const FONTS: &[(&str, &str)] = &[
    ("fr", "mathfrak"),
    ("sf", "mathsf"),
    ("bf", "mathbf"),
    ("bb", "mathbb"),
    ("rm", "mathrm"),
    ("cal", "mathcal"),
    ("scr", "mathscr"),
    ("bar", "bar"),
    ("hat", "hat"),
    ("til", "tilde"),
];

/// Brackets placed around everything up to the next `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnaryTemplate {
    pub open: &'static str,
    pub close: &'static str,
}

pub const UNARY: &[(&str, UnaryTemplate)] = &[
    ("of", UnaryTemplate { open: "(", close: ")" }),
    ("qnt", UnaryTemplate { open: "\\left( ", close: "\\right)" }),
    ("bqnt", UnaryTemplate { open: "\\left[", close: "\\right]" }),
    ("set", UnaryTemplate { open: "\\left\\lbrace ", close: " \\right\\rbrace" }),
    ("abs", UnaryTemplate { open: "\\left|", close: "\\right|" }),
    ("seq", UnaryTemplate { open: "\\left\\langle", close: "\\right\\rangle" }),
    ("floor", UnaryTemplate { open: "\\left\\lfloor", close: "\\right\\rfloor" }),
    ("ceil", UnaryTemplate { open: "\\left\\lceil", close: "\\right\\rceil" }),
    ("sup", UnaryTemplate { open: "^{", close: "}" }),
    ("supp", UnaryTemplate { open: "^{(", close: ")}" }),
    ("sub", UnaryTemplate { open: "_{", close: "}" }),
    ("pmod", UnaryTemplate { open: "~\\left(\\mathrm{mod}\\, ", close: "\\right)" }),
    ("sqrt", UnaryTemplate { open: "\\sqrt{", close: "}" }),
    ("bar", UnaryTemplate { open: "\\bar{", close: "}" }),
    ("tilde", UnaryTemplate { open: "\\tilde{", close: "}" }),
    ("hat", UnaryTemplate { open: "\\hat{", close: "}" }),
    ("widehat", UnaryTemplate { open: "\\widehat{", close: "}" }),
    ("words", UnaryTemplate { open: "\\:\\mbox{", close: "}\\:" }),
];

/// Two operands split by `separator`. `order` picks which operand goes into
/// the first and second slot of `parts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryTemplate {
    pub parts: [&'static str; 3],
    pub separator: &'static str,
    pub order: [usize; 2],
}

pub const BINARY: &[(&str, BinaryTemplate)] = &[
    (
        "frac",
        BinaryTemplate { parts: ["\\frac{", "}{", "}"], separator: "over", order: [0, 1] },
    ),
    (
        "root",
        BinaryTemplate { parts: ["\\sqrt[", "]{", "}"], separator: "base", order: [0, 1] },
    ),
    (
        "legen",
        BinaryTemplate {
            parts: ["\\left(\\frac{", "}{", "}\\right)"],
            separator: "over",
            order: [0, 1],
        },
    ),
    (
        "binom",
        BinaryTemplate { parts: ["\\binom{", "}{", "}"], separator: "choose", order: [0, 1] },
    ),
    (
        "index",
        BinaryTemplate { parts: ["\\left[", " : ", "\\right]"], separator: "in", order: [1, 0] },
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TertiaryTemplate {
    pub parts: [&'static str; 4],
    pub separators: [&'static str; 2],
    pub order: [usize; 3],
}

pub const TERTIARY: &[(&str, TertiaryTemplate)] = &[(
    "map",
    TertiaryTemplate {
        parts: ["", " : ", "\\rightarrow", ""],
        separators: ["from", "to"],
        order: [0, 1, 2],
    },
)];

/// Big operators that take optional `over`/`from`/`to` bounds.
pub const RANGE: &[(&str, &str)] = &[
    ("sum", "\\sum"),
    ("product", "\\prod"),
    ("prod", "\\prod"),
    ("limit", "\\lim"),
    ("union", "\\bigcup"),
    ("inters", "\\bigcap"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `matrix N cols a; b; ... endmatrix`
    Matrix,
    /// `padsp a; b; ... end`
    SpacedGroup,
}

pub const BLOCKS: &[(&str, BlockKind)] = &[
    ("matrix", BlockKind::Matrix),
    ("padsp", BlockKind::SpacedGroup),
];

pub const HTML_ENTITIES: &[&str] = &["&gt;", "&lt;", "&apos;", "&quot;", "&amp;"];

/// A keyword that opens a nested construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Unary(&'static str, &'static UnaryTemplate),
    Binary(&'static str, &'static BinaryTemplate),
    Tertiary(&'static str, &'static TertiaryTemplate),
    Range(&'static str, &'static str),
    Block(&'static str, BlockKind),
}

impl Construct {
    pub fn keyword(&self) -> &'static str {
        match self {
            Construct::Unary(kw, _)
            | Construct::Binary(kw, _)
            | Construct::Tertiary(kw, _)
            | Construct::Range(kw, _)
            | Construct::Block(kw, _) => *kw,
        }
    }
}

/// Lookup structures over the tables above.
pub struct Keywords {
    builtins: HashMap<&'static str, &'static str>,
    backslash_me: HashSet<&'static str>,
    constructs: HashMap<&'static str, Construct>,
    /// Every letter name longer than one character, longest first.
    letter_names: Vec<&'static str>,
}

pub static KEYWORDS: Lazy<Keywords> = Lazy::new(Keywords::build);

impl Keywords {
    fn build() -> Self {
        let builtins = BUILTINS
            .iter()
            .chain(GREEK_THREE_LETTER)
            .copied()
            .collect();

        let backslash_me = BACKSLASH_ME
            .iter()
            .chain(BACKSLASH_ME_LETTERS)
            .copied()
            .collect();

        let mut constructs = HashMap::new();
        for (word, template) in UNARY {
            constructs.insert(*word, Construct::Unary(*word, template));
        }
        for (word, template) in BINARY {
            constructs.insert(*word, Construct::Binary(*word, template));
        }
        for (word, template) in TERTIARY {
            constructs.insert(*word, Construct::Tertiary(*word, template));
        }
        for (word, symbol) in RANGE {
            constructs.insert(*word, Construct::Range(*word, *symbol));
        }
        for (word, kind) in BLOCKS {
            constructs.insert(*word, Construct::Block(*word, *kind));
        }

        let mut letter_names: Vec<&'static str> = BACKSLASH_ME_LETTERS
            .iter()
            .copied()
            .chain(GREEK_THREE_LETTER.iter().map(|&(word, _)| word))
            .collect();
        letter_names.sort_by(|a, b| b.len().cmp(&a.len()));

        Self {
            builtins,
            backslash_me,
            constructs,
            letter_names,
        }
    }

    pub fn construct(&self, word: &str) -> Option<Construct> {
        self.constructs.get(word).copied()
    }

    pub fn builtin(&self, word: &str) -> Option<&'static str> {
        self.builtins.get(word).copied()
    }

    pub fn is_backslash_me(&self, word: &str) -> bool {
        self.backslash_me.contains(word)
    }

    pub fn is_html_entity(&self, word: &str) -> bool {
        HTML_ENTITIES.contains(&word)
    }

    /// Length of the longest letter name at the start of `text`: a known name,
    /// or else a single ASCII letter.
    pub fn letter_len(&self, text: &str) -> Option<usize> {
        if let Some(name) = self.letter_names.iter().find(|name| text.starts_with(*name)) {
            return Some(name.len());
        }
        text.chars()
            .next()
            .filter(char::is_ascii_alphabetic)
            .map(|_| 1)
    }

    /// Length of an optionally font-prefixed letter name at the start of
    /// `text`. A prefix is taken whenever a letter name follows it.
    pub fn font_letter_len(&self, text: &str) -> Option<usize> {
        FONTS
            .iter()
            .filter_map(|(prefix, _)| {
                let rest = text.strip_prefix(prefix)?;
                Some(prefix.len() + self.letter_len(rest)?)
            })
            .next()
            .or_else(|| self.letter_len(text))
    }

    /// Split a font word like `bfx` or `calalpha` into its font command and
    /// letter name.
    pub fn split_font_word<'a>(&self, word: &'a str) -> Option<(&'static str, &'a str)> {
        FONTS.iter().find_map(|&(prefix, command)| {
            let letter = word.strip_prefix(prefix)?;
            let is_letter = self.letter_len(letter) == Some(letter.len());
            is_letter.then_some((command, letter))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_abbreviations_are_builtins() {
        assert_eq!(KEYWORDS.builtin("alp"), Some("\\alpha"));
        assert_eq!(KEYWORDS.builtin("ddd"), Some("\\ldots"));
        assert_eq!(KEYWORDS.builtin("alpha"), None);
    }

    #[test]
    fn test_constructs() {
        assert!(matches!(KEYWORDS.construct("abs"), Some(Construct::Unary("abs", _))));
        assert!(matches!(KEYWORDS.construct("frac"), Some(Construct::Binary("frac", _))));
        assert!(matches!(KEYWORDS.construct("map"), Some(Construct::Tertiary("map", _))));
        assert_eq!(KEYWORDS.construct("prod"), Some(Construct::Range("prod", "\\prod")));
        assert_eq!(
            KEYWORDS.construct("padsp"),
            Some(Construct::Block("padsp", BlockKind::SpacedGroup))
        );
        assert_eq!(KEYWORDS.construct("over"), None);
    }

    #[test]
    fn test_letter_len_prefers_longest_name() {
        assert_eq!(KEYWORDS.letter_len("thetax"), Some(5));
        assert_eq!(KEYWORDS.letter_len("thex"), Some(3));
        assert_eq!(KEYWORDS.letter_len("epsilon1"), Some(7));
        assert_eq!(KEYWORDS.letter_len("etai"), Some(3));
        assert_eq!(KEYWORDS.letter_len("xy"), Some(1));
        assert_eq!(KEYWORDS.letter_len("1x"), None);
    }

    #[test]
    fn test_font_letter_len() {
        assert_eq!(KEYWORDS.font_letter_len("bfx1"), Some(3));
        assert_eq!(KEYWORDS.font_letter_len("calpha"), Some(4));
        assert_eq!(KEYWORDS.font_letter_len("baralpha2"), Some(8));
        assert_eq!(KEYWORDS.font_letter_len("bf"), Some(1));
        assert_eq!(KEYWORDS.font_letter_len("x2"), Some(1));
    }

    #[test]
    fn test_split_font_word() {
        assert_eq!(KEYWORDS.split_font_word("bfx"), Some(("mathbf", "x")));
        assert_eq!(KEYWORDS.split_font_word("calalpha"), Some(("mathcal", "alpha")));
        assert_eq!(KEYWORDS.split_font_word("tilGam"), Some(("tilde", "Gam")));
        assert_eq!(KEYWORDS.split_font_word("bfxy"), None);
        assert_eq!(KEYWORDS.split_font_word("bf"), None);
    }
}
