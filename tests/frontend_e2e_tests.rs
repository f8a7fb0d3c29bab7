/// End-to-end tests for the layout front end
/// Demonstrates: RawLexer → IndentNormalizer → TreeBuilder working together
use offside::{
    parse, Frontend, IndentNormalizer, LexicalErrorKind, Position, RawLexer, SyntaxErrorKind,
    TokenKind, TokenStream, Tree, TreeBuilder,
};

fn ident(s: &str) -> TokenKind {
    TokenKind::Identifier(s.to_string())
}

fn kinds(tokens: Vec<offside::Token>) -> Vec<TokenKind> {
    tokens.into_iter().map(|t| t.kind).collect()
}

const SCENARIO: &str = "my-fun = fn (a b)\n    print \"hello world\"";

#[test]
fn test_scenario_raw_tokens() {
    let frontend = Frontend::new();
    assert_eq!(
        kinds(frontend.raw_tokens(SCENARIO).unwrap()),
        vec![
            ident("my-fun"),
            TokenKind::Operator("=".to_string()),
            ident("fn"),
            TokenKind::OpenBracket,
            ident("a"),
            ident("b"),
            TokenKind::CloseBracket,
            TokenKind::Indent(1),
            ident("print"),
            TokenKind::String("hello world".to_string()),
        ]
    );
}

#[test]
fn test_scenario_normalized_tokens() {
    let frontend = Frontend::new();
    assert_eq!(
        kinds(frontend.normalized_tokens(SCENARIO).unwrap()),
        vec![
            ident("my-fun"),
            TokenKind::Operator("=".to_string()),
            ident("fn"),
            TokenKind::OpenBracket,
            ident("a"),
            ident("b"),
            TokenKind::CloseBracket,
            TokenKind::OpenBracket,
            ident("print"),
            TokenKind::String("hello world".to_string()),
            TokenKind::CloseBracket,
        ]
    );
}

#[test]
fn test_scenario_tree() {
    let tree = parse(SCENARIO).unwrap();

    let Tree::List(items) = &tree else {
        panic!("root must be a list");
    };
    assert_eq!(items.len(), 5);
    assert_eq!(items[0].as_atom().unwrap().kind, ident("my-fun"));
    assert_eq!(
        items[1].as_atom().unwrap().kind,
        TokenKind::Operator("=".to_string())
    );
    assert_eq!(items[2].as_atom().unwrap().kind, ident("fn"));
    assert_eq!(items[3].to_string(), "(a b)");
    assert_eq!(items[4].to_string(), "(print \"hello world\")");
    assert_eq!(
        items[4].children()[1].as_atom().unwrap().position,
        Position::new(2, 11)
    );
}

#[test]
fn test_two_levels_back_to_column_zero() {
    let source = "outer\n    inner\n        innermost\ndone";

    let raw = kinds(Frontend::new().raw_tokens(source).unwrap());
    let dedents: Vec<&TokenKind> = raw
        .iter()
        .filter(|k| matches!(k, TokenKind::Dedent(_)))
        .collect();
    assert_eq!(dedents, vec![&TokenKind::Dedent(2)]);

    let normalized = kinds(Frontend::new().normalized_tokens(source).unwrap());
    let before_done: Vec<&TokenKind> = normalized
        .iter()
        .rev()
        .skip(1)
        .take_while(|k| **k == TokenKind::CloseBracket)
        .collect();
    assert_eq!(before_done.len(), 2);

    assert_eq!(
        parse(source).unwrap().to_string(),
        "(outer (inner (innermost)) done)"
    );
}

#[test]
fn test_classification_through_pipeline() {
    let tree = parse("42 -7 3.14 and foo-bar \"abc\"").unwrap();
    let got: Vec<TokenKind> = tree
        .children()
        .iter()
        .map(|t| t.as_atom().unwrap().kind.clone())
        .collect();
    assert_eq!(
        got,
        vec![
            TokenKind::Int("42".to_string()),
            TokenKind::Int("-7".to_string()),
            TokenKind::Float("3.14".to_string()),
            TokenKind::Operator("and".to_string()),
            ident("foo-bar"),
            TokenKind::String("abc".to_string()),
        ]
    );
}

#[test]
fn test_layout_walkthrough_program() {
    let source = "my-fun = fn (a b)
    print \"hello world\"

    map
        a b
    some-call
    line-ends-here
dedented-all-the-way
    indent-one-level
      indent-two-levels
dedent-again
";
    let tree = parse(source).unwrap();
    assert_eq!(
        tree.to_string(),
        "(my-fun = fn (a b) (print \"hello world\") (map (a b) some-call) \
         (line-ends-here) dedented-all-the-way (indent-one-level (indent-two-levels)) \
         dedent-again)"
    );
}

#[test]
fn test_ambiguous_dedent_is_not_snapped() {
    let err = parse("a\n  b\n      c\n    d").unwrap_err();
    assert_eq!(
        err.lexical_kind(),
        Some(&LexicalErrorKind::AmbiguousDedent { width: 4 })
    );
    assert_eq!(err.position(), Position::new(4, 5));
}

#[test]
fn test_tab_indentation_is_rejected() {
    let err = parse("f\n\tg").unwrap_err();
    assert_eq!(err.lexical_kind(), Some(&LexicalErrorKind::TabIndentation));
}

#[test]
fn test_unterminated_string_is_fatal() {
    let err = parse("say \"never closed\n  more").unwrap_err();
    assert_eq!(err.lexical_kind(), Some(&LexicalErrorKind::UnterminatedString));
    assert_eq!(err.position(), Position::new(1, 5));
}

#[test]
fn test_escaped_quote_does_not_end_string() {
    let tree = parse(r#"say "a\"b""#).unwrap();
    assert_eq!(tree.children().len(), 2);
    assert_eq!(
        tree.children()[1].as_atom().unwrap().kind,
        TokenKind::String("a\\\"b".to_string())
    );
    assert_eq!(tree.to_source(), r#"say "a\"b""#);
}

#[test]
fn test_unbalanced_explicit_brackets() {
    let err = parse("f (a (b c)").unwrap_err();
    assert_eq!(err.syntax_kind(), Some(&SyntaxErrorKind::UnbalancedBrackets));
    assert_eq!(err.position(), Position::new(1, 3));

    let err = parse("f a) b").unwrap_err();
    assert_eq!(err.syntax_kind(), Some(&SyntaxErrorKind::UnbalancedBrackets));
    assert_eq!(err.position(), Position::new(1, 4));
}

#[test]
fn test_manual_pipeline_matches_frontend() {
    let source = "loop\n  step 1\n  step 2";
    let lexer = RawLexer::from_source(source);
    let manual = TreeBuilder::new(IndentNormalizer::new(lexer)).build().unwrap();
    assert_eq!(manual, parse(source).unwrap());
}

#[test]
fn test_stages_pull_one_token_at_a_time() {
    let mut normalizer = IndentNormalizer::new(RawLexer::from_source("a\n  b c"));
    assert_eq!(normalizer.next_token().unwrap().unwrap().kind, ident("a"));
    assert_eq!(normalizer.open_groups(), 0);
    assert_eq!(
        normalizer.next_token().unwrap().unwrap().kind,
        TokenKind::OpenBracket
    );
    assert_eq!(normalizer.open_groups(), 1);
}

#[test]
fn test_reparse_of_rendered_tree() {
    let source = "define area\n    fn (w h)\n        * w h\n\nprint (area 2 3.5) \"done\"";
    let tree = parse(source).unwrap();
    let rendered = tree.to_source();
    let reparsed = parse(&rendered).unwrap();
    assert!(tree.structurally_eq(&reparsed), "{} vs {}", tree, reparsed);
}

#[test]
fn test_tree_serializes_to_json() {
    let tree = parse("x (1)").unwrap();
    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["List"][0]["Atom"]["kind"]["Identifier"], "x");
    assert_eq!(json["List"][0]["Atom"]["position"]["column"], 1);
    assert_eq!(json["List"][1]["List"][0]["Atom"]["kind"]["Int"], "1");

    let back: Tree = serde_json::from_value(json).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn test_deeply_nested_input_parses_renders_and_drops() {
    let depth = 200_000;
    let source = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    let handle = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || {
            let tree = parse(&source).unwrap();
            assert_eq!(tree.depth(), depth + 1);
            assert_eq!(tree.to_source(), source);
        })
        .unwrap();
    handle.join().unwrap();
}

#[test]
fn test_independent_parses_share_nothing() {
    let frontend = Frontend::new();
    assert!(frontend.parse_str("a\n    b\n  c").is_err());
    // A failed parse leaves no state behind
    assert_eq!(frontend.parse_str("a\n  b").unwrap().to_string(), "(a (b))");
}
