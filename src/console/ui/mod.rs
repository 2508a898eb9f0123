//! Console renderer.

use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::app::App;
use super::state::{FormField, ListFocus, Page};
use crate::quiz::QuizPhase;

mod form;
mod list;
mod quiz;

/// Render the current page with the shared header and footer.
pub fn render(frame: &mut Frame, app: &App, language: &str) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let [header, body, footer] = page_layout(area);
    render_header(frame, header, app);

    match app.page() {
        Page::List(page) => list::render(frame, body, page),
        Page::Form(page) => form::render(frame, body, page, language),
        Page::Quiz(page) => quiz::render(frame, body, page, language),
    }

    render_footer(frame, footer, app);
}

/// Screen area covered by the form's tag widget, suggestions included.
/// `None` when the form page is not showing.
pub fn tag_field_bounds(area: Rect, app: &App) -> Option<Rect> {
    let Page::Form(page) = app.page() else {
        return None;
    };
    let [_, body, _] = page_layout(area);
    Some(form::tag_bounds(body, page))
}

fn page_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(8),    // Page
        Constraint::Length(3), // Notice and controls
    ])
    .areas(area)
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("AlgoQuiz", Style::default().fg(Color::Cyan).bold()),
        Span::raw("  "),
        Span::styled(app.route().to_string(), Style::default().fg(Color::DarkGray)),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let notice = app
        .notice()
        .map(|notice| Line::from(Span::styled(notice, Style::default().fg(Color::Yellow).bold())))
        .unwrap_or_default();

    let content = vec![notice, Line::from(Span::styled(hints(app), Style::default().fg(Color::DarkGray)))];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP).border_style(Color::DarkGray));

    frame.render_widget(widget, area);
}

fn hints(app: &App) -> &'static str {
    match app.page() {
        Page::List(page) if page.pending_delete.is_some() => "y confirm  ·  n cancel",
        Page::List(page) => match page.focus {
            ListFocus::Grid => "j/k move  ·  / search  ·  t tags  ·  n new  ·  e edit  ·  d delete  ·  g quiz  ·  q quit",
            ListFocus::Search => "type to search  ·  Enter/Esc done",
            ListFocus::Tags => "h/l move  ·  Space toggle  ·  Esc done",
        },
        Page::Form(page) => match page.focus {
            FormField::Tags => "type to filter  ·  ↑/↓ highlight  ·  → pick  ·  Enter add typed  ·  ← tags, Del remove  ·  Ctrl+S save",
            FormField::Code => "Tab indent  ·  BackTab previous field  ·  Ctrl+S save  ·  Esc back",
            _ => "Tab next field  ·  Ctrl+S save  ·  Esc back",
        },
        Page::Quiz(page) => match page.session.phase() {
            QuizPhase::Preview => "Enter start  ·  Esc back  ·  q quit",
            QuizPhase::InProgress => "j/k move  ·  Space/1-9 select  ·  Enter next  ·  Tab details  ·  Esc back",
            QuizPhase::Finished => "r restart  ·  Esc back  ·  q quit",
        },
    }
}

/// Cursor cell for text at `column`/`row` inside a bordered box, kept on
/// the box's last inner cell when the text runs past it.
fn cursor_in(area: Rect, column: usize, row: usize) -> Position {
    let offset = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(offset(column));
    let y = area.y.saturating_add(1).saturating_add(offset(row));
    Position::new(
        x.min(area.right().saturating_sub(2)),
        y.min(area.bottom().saturating_sub(2)),
    )
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(row);
    cell
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(Color::Cyan))
}

fn status(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let [row] = Layout::vertical([Constraint::Length(3)]).flex(Flex::Center).areas(area);
    let widget = Paragraph::new(text).alignment(Alignment::Center).fg(color);
    frame.render_widget(widget, row);
}
