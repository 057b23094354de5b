//! Edge case tests for crossc-par: boundary inputs and recovery behavior.

#[cfg(test)]
mod tests {
    use crate::cs::ast::CsMember;
    use crate::js::ast::JsStmt;
    use crate::{parse_cs, parse_js};
    use crossc_lex::{tokenize_cs, tokenize_js};
    use crossc_util::{Handler, Metrics};

    // ==================== BOUNDARY BEHAVIORS ====================

    #[test]
    fn test_empty_input_js() {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let program = parse_js(tokenize_js(""), &handler, &mut metrics);
        assert!(program.body.is_empty());
        assert!(!handler.has_errors());
        assert_eq!(metrics.tokens_processed, 0);
        assert_eq!(metrics.ast_nodes, 1); // the program node itself
    }

    #[test]
    fn test_empty_input_cs() {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let unit = parse_cs(tokenize_cs(""), &handler, &mut metrics);
        assert!(unit.usings.is_empty());
        assert!(unit.members.is_empty());
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_whitespace_and_comments_only() {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let program = parse_js(
            tokenize_js("  // nothing\n/* and\nnothing */\n\t "),
            &handler,
            &mut metrics,
        );
        assert!(program.body.is_empty());
        assert!(!handler.has_errors());
        assert_eq!(metrics.tokens_processed, 0);
    }

    #[test]
    fn test_unterminated_string_no_crash() {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let program = parse_js(tokenize_js("let s = \"open"), &handler, &mut metrics);
        // The missing `;` is an error, but parsing terminated and produced
        // a root.
        assert!(handler.has_errors());
        drop(program);
    }

    #[test]
    fn test_unmatched_brace_at_eof() {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let program = parse_js(tokenize_js("{ let x = 1;"), &handler, &mut metrics);
        assert_eq!(handler.error_count(), 1);
        assert_eq!(metrics.error_recovery_count, 1);
        // The partial block survives.
        let JsStmt::Block(block) = &program.body[0] else {
            panic!("expected block");
        };
        assert_eq!(block.body.len(), 1);
    }

    // ==================== RECOVERY ====================

    #[test]
    fn test_parser_totality_on_garbage() {
        let sources = [
            ";;;;",
            ")(",
            "let",
            "if (",
            "§§§",
            "} } }",
            "let x = = 5;",
            "function",
            "class {",
            "{ class }",
            "public class A { class B { } }",
            "public class A { void M() { class } }",
            "namespace N { { { }",
        ];
        for source in sources {
            let handler = Handler::new();
            let mut metrics = Metrics::new();
            let _ = parse_js(tokenize_js(source), &handler, &mut metrics);
            let handler = Handler::new();
            let mut metrics = Metrics::new();
            let _ = parse_cs(tokenize_cs(source), &handler, &mut metrics);
        }
    }

    #[test]
    fn test_unknown_byte_surfaces_as_syntax_error() {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        parse_js(tokenize_js("let x = #;"), &handler, &mut metrics);
        let errors = handler.errors();
        assert!(errors
            .iter()
            .any(|e| e.kind == crossc_util::DiagnosticKind::Syntax
                && e.message.contains('#')));
    }

    #[test]
    fn test_recovery_consumes_semicolon_sync_point() {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let program = parse_js(
            tokenize_js("let = broken tokens here;\nconsole.log(1);"),
            &handler,
            &mut metrics,
        );
        assert_eq!(metrics.error_recovery_count, 1);
        // The statement after the `;` sync point parsed normally.
        assert_eq!(program.body.len(), 1);
        assert!(matches!(program.body[0], JsStmt::Expr(_)));
    }

    #[test]
    fn test_cs_top_level_mix_after_recovery() {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let unit = parse_cs(
            tokenize_cs("public wat;\npublic class Ok { }\nConsole.WriteLine(1);"),
            &handler,
            &mut metrics,
        );
        assert!(handler.has_errors());
        assert!(unit
            .members
            .iter()
            .any(|m| matches!(m, CsMember::Class(c) if c.name == "Ok")));
        assert!(unit
            .members
            .iter()
            .any(|m| matches!(m, CsMember::GlobalStmt(_))));
    }

    // ==================== METRICS INVARIANTS ====================

    #[test]
    fn test_tokens_processed_excludes_eof() {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let tokens = tokenize_js("let x = 1;");
        let count = tokens.len() - 1;
        parse_js(tokens, &handler, &mut metrics);
        assert_eq!(metrics.tokens_processed, count);
    }

    #[test]
    fn test_node_count_monotone_with_input() {
        let handler = Handler::new();
        let mut small_metrics = Metrics::new();
        parse_js(tokenize_js("let x = 1;"), &handler, &mut small_metrics);

        let handler = Handler::new();
        let mut big_metrics = Metrics::new();
        parse_js(
            tokenize_js("let x = 1;\nlet y = 2;\nlet z = x + y;"),
            &handler,
            &mut big_metrics,
        );
        assert!(big_metrics.ast_nodes > small_metrics.ast_nodes);
    }
}
