//! HTML rendering of resolved tokens.

use crate::priority::sort_spans;
use crate::span::{Span, TokenKind};
use crate::theme::Theme;

/// Gutter text colour used when the theme does not override it.
const GUTTER_FOREGROUND: &str = "#6b7280";

/// Options for [`render_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emits a line-number gutter before the code.
    pub line_numbers: bool,
    /// Number of the first line in the gutter.
    pub first_line: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_numbers: false,
            first_line: 1,
        }
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'` for HTML text and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn inline_style(kind: TokenKind, theme: &Theme) -> String {
    theme
        .color(kind)
        .map(|color| format!("color:{}", escape_html(color)))
        .unwrap_or_default()
}

/// Renders `text` as HTML, wrapping each token in a classed, coloured span.
///
/// Tokens are sorted first. Text not covered by any token is emitted
/// escaped; a token overlapping an earlier one only renders its uncovered
/// tail.
#[must_use]
pub fn render_html(text: &str, tokens: &[Span], theme: &Theme) -> String {
    let mut ordered = tokens.to_vec();
    sort_spans(&mut ordered);

    let mut html = String::with_capacity(text.len() * 2);
    let mut cursor = 0;
    for token in &ordered {
        if token.from > cursor {
            html.push_str(&escape_html(text.get(cursor..token.from).unwrap_or_default()));
        }
        if token.to > cursor {
            let content = text.get(cursor.max(token.from)..token.to).unwrap_or_default();
            html.push_str(&format!(
                r#"<span class="tok-{}" style="{}">{}</span>"#,
                token.kind,
                inline_style(token.kind, theme),
                escape_html(content)
            ));
            cursor = token.to;
        }
    }
    if cursor < text.len() {
        html.push_str(&escape_html(text.get(cursor..).unwrap_or_default()));
    }
    html
}

/// Renders a standalone `<pre>` block with the theme's page colours and an
/// optional line-number gutter.
#[must_use]
pub fn render_document(
    text: &str,
    tokens: &[Span],
    theme: &Theme,
    options: &RenderOptions,
) -> String {
    let mut style = Vec::new();
    if let Some(background) = &theme.background {
        style.push(format!("background:{}", escape_html(background)));
    }
    if let Some(foreground) = &theme.foreground {
        style.push(format!("color:{}", escape_html(foreground)));
    }

    let mut document = format!(r#"<pre class="lumen" style="{}">"#, style.join(";"));
    if options.line_numbers {
        let gutter = theme.gutter.as_deref().unwrap_or("transparent");
        let numbers = (0..text.split('\n').count())
            .map(|line| (options.first_line + line).to_string())
            .collect::<Vec<_>>()
            .join("\n");
        document.push_str(&format!(
            r#"<div class="lumen-gutter" style="background:{};color:{GUTTER_FOREGROUND}" aria-hidden="true">{numbers}</div>"#,
            escape_html(gutter),
        ));
    }
    document.push_str("<code>");
    document.push_str(&render_html(text, tokens, theme));
    document.push_str("</code></pre>");
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme::default().with_color(TokenKind::Keyword, "red")
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x" title='y'>&</a>"#),
            "&lt;a href=&quot;x&quot; title=&#39;y&#39;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn gaps_and_uncoloured_tokens() {
        let tokens = [
            Span::new(0, 3, TokenKind::Keyword),
            Span::new(4, 5, TokenKind::Variable),
        ];
        assert_eq!(
            render_html("let x<", &tokens, &theme()),
            concat!(
                r#"<span class="tok-keyword" style="color:red">let</span> "#,
                r#"<span class="tok-variable" style="">x</span>&lt;"#,
            )
        );
    }

    #[test]
    fn unsorted_and_overlapping_tokens_render_once() {
        let tokens = [
            Span::new(2, 4, TokenKind::Variable),
            Span::new(0, 3, TokenKind::Keyword),
        ];
        assert_eq!(
            render_html("abcd", &tokens, &Theme::default()),
            concat!(
                r#"<span class="tok-keyword" style="">abc</span>"#,
                r#"<span class="tok-variable" style="">d</span>"#,
            )
        );
    }

    #[test]
    fn document_gutter_counts_lines_from_first_line() {
        let options = RenderOptions {
            line_numbers: true,
            first_line: 9,
        };
        let html = render_document("a\nb", &[], &Theme::default(), &options);
        assert!(html.contains(">9\n10</div>"), "{html}");
        assert!(html.starts_with(r#"<pre class="lumen" style="">"#));
        assert!(html.ends_with("<code>a\nb</code></pre>"));
    }
}
