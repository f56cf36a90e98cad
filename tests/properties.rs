//! Property-based tests for tokenizing, compressing and translating

use proptest::prelude::*;
use vertex2tex::{Error, compress, tokenize, translate_document, translate_snippet};

/// Words drawn from the keyword tables mixed with plain letters and digits
fn vertex_word() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "frac", "over", "sqrt", "abs", "root", "base", "map", "from", "to", "sum", "prod",
            "lim", "matrix", "cols", "endmatrix", "padsp", "end", ";", "alp", "zeta", "bfx",
            "calA", "ddd", "squ", "in", "\\\\", "&lt;",
        ])
        .prop_map(str::to_owned),
        "[a-z]{1,3}[0-9]{0,2}",
        "[0-9+,()^-]{1,3}",
    ]
}

fn vertex_snippet() -> impl Strategy<Value = String> {
    prop::collection::vec(vertex_word(), 0..24).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn test_tokenize_is_lossless(input in "\\PC*") {
        let tokens = tokenize(&input).unwrap();
        let joined: String = tokens.iter().map(|t| t.as_str()).collect();
        prop_assert_eq!(joined, input);
    }

    #[test]
    fn test_compress_is_idempotent(input in "[a-z \\t\\n\\\\{}^_0-9]*") {
        let once = compress(&input);
        prop_assert_eq!(compress(&once), once);
    }

    #[test]
    fn test_translate_never_panics(input in vertex_snippet()) {
        // Faults are fine, panics are not
        let _ = translate_snippet(&input);
    }

    #[test]
    fn test_translate_arbitrary_text_never_panics(input in "\\PC{0,64}") {
        let _ = translate_snippet(&input);
        let _ = translate_document(&input);
    }

    #[test]
    fn test_matrix_breaks_after_every_full_row(entries in 1usize..20, columns in 1usize..6) {
        let body: Vec<String> = (0..entries).map(|n| n.to_string()).collect();
        let snippet = format!("matrix {columns} cols {} endmatrix", body.join("; "));
        let tex = translate_snippet(&snippet).unwrap();
        prop_assert_eq!(tex.matches("\\\\").count(), entries / columns);
        let header = format!("\\begin{{array}}{{{}}}", "c".repeat(columns));
        prop_assert!(tex.starts_with(&header));
        prop_assert!(tex.ends_with("\\end{array}"), "{}", tex);
    }

    #[test]
    fn test_leading_superscript_leaves_no_empty_subscript(head in "[a-z]", tail in "[0-9]{1,3}") {
        let tex = translate_snippet(&format!("{head}uu{tail}")).unwrap();
        prop_assert!(!tex.contains("_{}"), "{}", tex);
    }

    #[test]
    fn test_leading_subscript_is_not_doubled(head in "[a-z]", tail in "[0-9]{1,3}") {
        let tex = translate_snippet(&format!("{head}vv{tail}")).unwrap();
        prop_assert!(!tex.contains("_{_{"), "{}", tex);
    }

    #[test]
    fn test_escaped_dollar_never_opens_math(before in "[a-z ]{0,8}", after in "[a-z@ ]{0,8}") {
        let text = format!("{before}\\$@alp{after}");
        prop_assert_eq!(translate_document(&text).unwrap(), text);
    }

    #[test]
    fn test_located_faults(prefix_lines in 0usize..5) {
        let text = format!("{}$@frac 1 over 2$", "text\n".repeat(prefix_lines));
        let err = translate_document(&text).unwrap_err();
        prop_assert_eq!(err.location(), Some((prefix_lines + 1, 2)));
        let is_located = matches!(err, Error::Located { .. });
        prop_assert!(is_located);
    }
}
