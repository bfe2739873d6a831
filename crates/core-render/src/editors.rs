//! Code editor painter and the pluggable syntax tokenizer.
//!
//! The editor owns its viewport discipline: `scroll_top`/`scroll_left` in
//! lines/cells, a line-number gutter sized to the largest visible line
//! number, per-visible-line tokenization, diagnostic curly underlines,
//! selection backgrounds and the cursor cell.

use core_geometry::Rect;
use core_layout::{LayoutNode, gutter_width};
use core_node::{Props, RuntimeInstance, Selection, Severity, VNode};
use core_text::{slice_columns, str_width};
use core_theme::{Color, StyleAttrs, TextStyle, Theme, UnderlineStyle};

use crate::walk::PaintCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Keyword,
    Type,
    String,
    Number,
    Comment,
    Operator,
    Punctuation,
    Function,
    Variable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, Copy)]
pub struct TokenizeContext<'a> {
    pub language: Option<&'a str>,
    pub line_number: usize,
}

/// Pluggable per-line tokenizer. Implementations must cover the entire
/// line: concatenated token text equals the input.
pub trait Tokenizer {
    fn tokenize_line(&self, line: &str, ctx: &TokenizeContext<'_>) -> Vec<Token>;
}

/// Single plain token per line.
#[derive(Debug, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize_line(&self, line: &str, _ctx: &TokenizeContext<'_>) -> Vec<Token> {
        vec![Token {
            text: line.to_string(),
            kind: TokenKind::Plain,
        }]
    }
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "else", "enum", "false", "fn", "for",
    "function", "if", "impl", "import", "in", "let", "loop", "match", "mod", "mut", "pub",
    "return", "static", "struct", "trait", "true", "type", "use", "var", "while",
];

/// Keyword/number/string scanner used when no external tokenizer is
/// supplied. Language-agnostic by construction; the language hint only
/// picks the line-comment leader.
#[derive(Debug, Default)]
pub struct HeuristicTokenizer;

impl Tokenizer for HeuristicTokenizer {
    fn tokenize_line(&self, line: &str, ctx: &TokenizeContext<'_>) -> Vec<Token> {
        let comment_leader = match ctx.language {
            Some("python") | Some("sh") | Some("toml") | Some("yaml") => "#",
            _ => "//",
        };
        let mut tokens = Vec::new();
        let mut rest = line;
        while !rest.is_empty() {
            if rest.starts_with(comment_leader) {
                tokens.push(Token {
                    text: rest.to_string(),
                    kind: TokenKind::Comment,
                });
                break;
            }
            let c = rest.chars().next().expect("non-empty");
            let taken = if c == '"' || c == '\'' {
                scan_string(rest, c)
            } else if c.is_ascii_digit() {
                rest.find(|ch: char| !ch.is_ascii_alphanumeric() && ch != '.' && ch != '_')
                    .unwrap_or(rest.len())
            } else if c.is_alphanumeric() || c == '_' {
                rest.find(|ch: char| !ch.is_alphanumeric() && ch != '_')
                    .unwrap_or(rest.len())
            } else {
                c.len_utf8()
            };
            let (word, tail) = rest.split_at(taken);
            let kind = classify_word(word, tail, c);
            // Merge runs of the same kind to keep token lists short.
            let merged = match tokens.last_mut() {
                Some(last) if last.kind == kind => {
                    last.text.push_str(word);
                    true
                }
                _ => false,
            };
            if !merged {
                tokens.push(Token {
                    text: word.to_string(),
                    kind,
                });
            }
            rest = tail;
        }
        if tokens.is_empty() {
            tokens.push(Token {
                text: String::new(),
                kind: TokenKind::Plain,
            });
        }
        tokens
    }
}

fn scan_string(s: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return i + c.len_utf8();
        }
    }
    s.len()
}

fn classify_word(word: &str, tail: &str, first: char) -> TokenKind {
    if first == '"' || first == '\'' {
        TokenKind::String
    } else if first.is_ascii_digit() {
        TokenKind::Number
    } else if first.is_alphanumeric() || first == '_' {
        if KEYWORDS.binary_search(&word).is_ok() {
            TokenKind::Keyword
        } else if word.chars().next().is_some_and(|c| c.is_uppercase()) {
            TokenKind::Type
        } else if tail.starts_with('(') {
            TokenKind::Function
        } else {
            TokenKind::Variable
        }
    } else if first.is_whitespace() {
        TokenKind::Plain
    } else if "(){}[],;:".contains(first) {
        TokenKind::Punctuation
    } else {
        TokenKind::Operator
    }
}

pub fn token_color(theme: &Theme, kind: TokenKind) -> Color {
    let s = &theme.colors.syntax;
    match kind {
        TokenKind::Plain => s.plain,
        TokenKind::Keyword => s.keyword,
        TokenKind::Type => s.ty,
        TokenKind::String => s.string,
        TokenKind::Number => s.number,
        TokenKind::Comment => s.comment,
        TokenKind::Operator => s.operator,
        TokenKind::Punctuation => s.punctuation,
        TokenKind::Function => s.function,
        TokenKind::Variable => s.variable,
    }
}

fn severity_color(theme: &Theme, severity: Severity) -> Color {
    match severity {
        Severity::Error => theme.colors.danger,
        Severity::Warning => theme.colors.warning,
        Severity::Info => theme.colors.info,
        Severity::Hint => theme.colors.muted,
    }
}

pub(crate) fn paint_code_editor(
    ctx: &mut PaintCtx<'_, '_>,
    _inst: &RuntimeInstance,
    layout: &LayoutNode,
    vnode: &VNode,
    rect: Rect,
    style: TextStyle,
) {
    let Props::CodeEditor(p) = &vnode.props else {
        return;
    };
    let theme = ctx.params.theme;
    let meta = layout.meta.unwrap_or_default();
    let scroll_top = meta.scroll_y.max(0) as usize;
    let scroll_left = meta.scroll_x.max(0);
    let gutter = if p.show_line_numbers {
        gutter_width(p.lines.len())
    } else {
        0
    };
    let text_x = rect.x + gutter;
    let default_tokenizer = HeuristicTokenizer;
    let tokenizer: &dyn Tokenizer = ctx.params.tokenizer.unwrap_or(&default_tokenizer);

    ctx.builder.push_clip(rect);
    for row in 0..rect.h {
        let line_idx = scroll_top + row as usize;
        let Some(line) = p.lines.get(line_idx) else {
            break;
        };
        let y = rect.y + row;
        if gutter > 0 {
            let number = format!("{:>width$} ", line_idx + 1, width = (gutter - 1) as usize);
            ctx.builder.draw_text(
                rect.x,
                y,
                &number,
                TextStyle::fg(theme.colors.muted)
                    .with_attrs(StyleAttrs::DIM)
                    .merged_over(style),
            );
        }

        // Selection background first, then text over it.
        if let Some(sel) = p.selection {
            paint_selection_row(ctx, sel, line_idx, line, text_x, y, scroll_left, rect, theme);
        }

        let tctx = TokenizeContext {
            language: p.language.as_deref(),
            line_number: line_idx,
        };
        let mut col = -scroll_left;
        for token in tokenizer.tokenize_line(line, &tctx) {
            let token_style = TextStyle::fg(token_color(theme, token.kind)).merged_over(style);
            ctx.builder.draw_text(text_x + col, y, &token.text, token_style);
            col += str_width(&token.text);
        }

        // Diagnostic squiggles re-draw the affected cells with a curly
        // underline in the severity color.
        for diag in p.diagnostics.iter().filter(|d| d.line == line_idx) {
            let span = slice_columns(line, diag.col_start, (diag.col_end - diag.col_start).max(0));
            if span.text.is_empty() {
                continue;
            }
            let color = severity_color(theme, diag.severity);
            ctx.builder.draw_text(
                text_x + span.start_col - scroll_left,
                y,
                &span.text,
                TextStyle::fg(token_color(theme, TokenKind::Plain))
                    .with_underline(UnderlineStyle::Curly, Some(color))
                    .merged_over(style),
            );
        }
    }

    if let Some((line, col)) = p.cursor {
        let visible = line >= scroll_top && (line - scroll_top) < rect.h as usize;
        let focused = ctx.params.focus.is_focused(vnode.id.as_deref()) || vnode.id.is_none();
        if visible && focused {
            let cx = text_x + col - scroll_left;
            let cy = rect.y + (line - scroll_top) as i32;
            if p.highlight_cursor_cell {
                let cell = p
                    .lines
                    .get(line)
                    .map(|l| slice_columns(l, col, 1).text)
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| " ".to_string());
                ctx.builder.draw_text(
                    cx,
                    cy,
                    &cell,
                    TextStyle::default()
                        .with_attrs(StyleAttrs::INVERSE)
                        .merged_over(style),
                );
            }
            ctx.claim_cursor(cx, cy);
        }
    }
    ctx.builder.pop_clip();
}

#[allow(clippy::too_many_arguments)]
fn paint_selection_row(
    ctx: &mut PaintCtx<'_, '_>,
    sel: Selection,
    line_idx: usize,
    line: &str,
    text_x: i32,
    y: i32,
    scroll_left: i32,
    rect: Rect,
    theme: &Theme,
) {
    let (first, last) = if (sel.start_line, sel.start_col) <= (sel.end_line, sel.end_col) {
        (
            (sel.start_line, sel.start_col),
            (sel.end_line, sel.end_col),
        )
    } else {
        ((sel.end_line, sel.end_col), (sel.start_line, sel.start_col))
    };
    if line_idx < first.0 || line_idx > last.0 {
        return;
    }
    let line_w = str_width(line);
    let from = if line_idx == first.0 { first.1 } else { 0 };
    let to = if line_idx == last.0 { last.1 } else { line_w };
    let w = (to - from).max(0);
    if w == 0 {
        return;
    }
    ctx.builder.fill_rect(
        Rect::new(text_x + from - scroll_left, y, w.min(rect.w), 1),
        TextStyle::bg(theme.colors.selection_bg),
    );
}
