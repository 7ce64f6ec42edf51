//! End-to-end tests for lumen-syntax using insta for snapshot testing.
//!
//! These tests drive the public API from language detection through to HTML,
//! with inline snapshots for user-facing output.

use std::path::Path;

use insta::assert_snapshot;
use rstest::rstest;

use lumen_syntax::{
    AngleBrackets, BuiltinTheme, HighlightError, RenderOptions, SupportedLanguage, Theme,
    TokenKind, TokenizeOptions, render_document, render_html, tokenize,
};

fn highlight(language: SupportedLanguage, source: &str) -> Vec<lumen_syntax::Span> {
    let rules = language
        .rule_set()
        .unwrap_or_else(|err| panic!("rule set: {err}"));
    tokenize(source, rules, &TokenizeOptions::default())
}

// =============================================================================
// Happy Path: Detection and Tokenizing
// =============================================================================

#[rstest]
#[case("src/app.mjs", SupportedLanguage::JavaScript)]
#[case("src/app.cts", SupportedLanguage::TypeScript)]
#[case("ui/View.JSX", SupportedLanguage::Jsx)]
#[case("ui/View.tsx", SupportedLanguage::Tsx)]
#[case("stubs/os.pyi", SupportedLanguage::Python)]
#[case("paper/main.tex", SupportedLanguage::Latex)]
fn detect_language_from_path(#[case] path: &str, #[case] expected: SupportedLanguage) {
    let language =
        SupportedLanguage::detect(Path::new(path)).unwrap_or_else(|err| panic!("detect: {err}"));
    assert_eq!(language, expected);
}

#[rstest]
#[case(SupportedLanguage::JavaScript, "for (const [k, v] of Object.entries(o)) { log(`${k}`); }")]
#[case(SupportedLanguage::TypeScript, "type Pair<A, B> = { a: A; b: Array<B> };")]
#[case(SupportedLanguage::Tsx, "const v = <List items={[1, 2]} render={(x) => x} />;")]
#[case(SupportedLanguage::Python, "print({k: [v] for k, v in d.items()})")]
#[case(SupportedLanguage::Latex, "\\frac{a}{b} + \\left( x \\right)")]
fn delimiters_are_balanced_per_depth_class(
    #[case] language: SupportedLanguage,
    #[case] source: &str,
) {
    let tokens = highlight(language, source);
    for kind in [TokenKind::Bracket0, TokenKind::Bracket1, TokenKind::Bracket2] {
        let count = tokens.iter().filter(|token| token.kind == kind).count();
        assert_eq!(count % 2, 0, "unbalanced {kind} in {source}: {tokens:?}");
    }
}

#[test]
fn disabling_angle_brackets_leaves_type_parameters_unpaired() {
    let rules = SupportedLanguage::TypeScript
        .rule_set()
        .unwrap_or_else(|err| panic!("rule set: {err}"));
    let options = TokenizeOptions {
        angle_brackets: AngleBrackets::Disabled,
        ..TokenizeOptions::default()
    };
    let tokens = tokenize("let m: Map<K, V>;", rules, &options);
    assert!(
        tokens
            .iter()
            .filter(|token| token.kind.is_depth_class())
            .all(|token| token.from != 10 && token.from != 15),
        "{tokens:?}"
    );
}

// =============================================================================
// Unhappy Path
// =============================================================================

#[rstest]
#[case("notes.md")]
#[case("Makefile")]
fn undetectable_paths_are_reported(#[case] path: &str) {
    let Err(err) = SupportedLanguage::detect(Path::new(path)) else {
        panic!("{path} should not map to a language");
    };
    assert!(matches!(
        err,
        HighlightError::UnsupportedExtension { .. } | HighlightError::UnknownLanguage { .. }
    ));
}

#[test]
fn unknown_language_name_is_rejected() {
    let Err(err) = "cobol".parse::<SupportedLanguage>() else {
        panic!("cobol should not parse");
    };
    assert_eq!(err.input(), "cobol");
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn snapshot_language_detection() {
    let extensions = ["js", "mjs", "ts", "tsx", "jsx", "py", "tex", "json", "md"];
    let results: Vec<_> = extensions
        .iter()
        .map(|ext| {
            let lang = SupportedLanguage::from_extension(ext);
            format!("{ext}: {lang:?}")
        })
        .collect();

    assert_snapshot!(results.join("\n"), @r"
    js: Some(JavaScript)
    mjs: Some(JavaScript)
    ts: Some(TypeScript)
    tsx: Some(Tsx)
    jsx: Some(Jsx)
    py: Some(Python)
    tex: Some(Latex)
    json: None
    md: None
    ");
}

#[test]
fn snapshot_token_json() {
    let tokens = highlight(SupportedLanguage::JavaScript, "f(x)");
    let json = serde_json::to_string(&tokens).unwrap_or_else(|err| panic!("json: {err}"));

    assert_snapshot!(json, @r#"[{"from":0,"to":1,"type":"function","priority":7},{"from":1,"to":2,"type":"bracket0","priority":20},{"from":2,"to":3,"type":"variable","priority":1},{"from":3,"to":4,"type":"bracket0","priority":20}]"#);
}

#[test]
fn snapshot_html_fragment() {
    let source = "let x = [1];";
    let tokens = highlight(SupportedLanguage::JavaScript, source);

    assert_snapshot!(
        render_html(source, &tokens, &Theme::default()),
        @r#"<span class="tok-keyword" style="">let</span> <span class="tok-variable" style="">x</span> <span class="tok-operator" style="">=</span> <span class="tok-bracket0" style="">[</span><span class="tok-number" style="">1</span><span class="tok-bracket0" style="">]</span><span class="tok-punctuation" style="">;</span>"#
    );
}

#[test]
fn snapshot_document_with_gutter() {
    let source = "% a\n%b";
    let tokens = highlight(SupportedLanguage::Latex, source);
    let theme = BuiltinTheme::LatexClair.theme();
    let options = RenderOptions {
        line_numbers: true,
        ..RenderOptions::default()
    };

    assert_snapshot!(
        render_document(source, &tokens, &theme, &options),
        @r#"
    <pre class="lumen" style="background:#ffffff;color:#000000ff"><div class="lumen-gutter" style="background:transparent;color:#6b7280" aria-hidden="true">1
    2</div><code><span class="tok-comment" style="color:#62864aff">% a</span>
    <span class="tok-comment" style="color:#62864aff">%b</span></code></pre>
    "#
    );
}
