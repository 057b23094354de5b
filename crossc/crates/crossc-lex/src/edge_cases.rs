//! Edge case tests for crossc-lex.


#[cfg(test)]
mod properties {
    use crate::{tokenize, Lang, TokenKind};
    use proptest::prelude::*;

    proptest! {
        // Tokenizer totality: every input terminates with exactly one EOF.
        #[test]
        fn prop_tokenize_total_js(source in ".*") {
            let tokens = tokenize(&source, Lang::Js);
            prop_assert!(!tokens.is_empty());
            prop_assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
            prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
        }

        #[test]
        fn prop_tokenize_total_cs(source in ".*") {
            let tokens = tokenize(&source, Lang::Cs);
            prop_assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        }

        // Lines and columns are always 1-based.
        #[test]
        fn prop_positions_one_based(source in ".*") {
            for token in tokenize(&source, Lang::Js) {
                prop_assert!(token.span.line >= 1);
                prop_assert!(token.span.column >= 1);
            }
        }
    }
}
