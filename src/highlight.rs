//! Syntax highlighting of solution code into ratatui lines.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::debug;

const THEME: &str = "base16-ocean.dark";

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

fn theme() -> Option<&'static Theme> {
    let themes = &theme_set().themes;
    themes.get(THEME).or_else(|| themes.values().next())
}

fn syntax_for(extension: &str) -> &'static SyntaxReference {
    let ss = syntax_set();
    ss.find_syntax_by_extension(extension)
        .unwrap_or_else(|| ss.find_syntax_plain_text())
}

/// Highlights `code` for the language with file extension `extension`.
/// Unknown languages and highlighting failures fall back to plain lines.
pub fn highlight(code: &str, extension: &str) -> Vec<Line<'static>> {
    let Some(theme) = theme() else {
        return plain(code);
    };

    let ss = syntax_set();
    let mut highlighter = HighlightLines::new(syntax_for(extension), theme);
    let mut lines = Vec::new();

    for line in code.split('\n') {
        let with_newline = format!("{line}\n");
        match highlighter.highlight_line(&with_newline, ss) {
            Ok(ranges) => lines.push(Line::from(
                ranges
                    .into_iter()
                    .map(|(style, text)| Span::styled(text.trim_end_matches('\n').to_string(), to_style(style)))
                    .collect::<Vec<_>>(),
            )),
            Err(err) => {
                debug!(%err, "highlighting failed, showing plain code");
                return plain(code);
            }
        }
    }

    lines
}

fn plain(code: &str) -> Vec<Line<'static>> {
    code.split('\n').map(|line| Line::from(line.to_string())).collect()
}

fn to_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut out = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    out
}
