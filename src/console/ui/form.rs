//! Create and edit form.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use tui_textarea::TextArea;

use crate::console::state::{FormField, FormPage, LoadState, text_of};
use crate::highlight::highlight;
use crate::tags::Suggestion;

use super::{cursor_in, panel, status};

const MAX_SUGGESTIONS: usize = 6;

pub fn render(frame: &mut Frame, area: Rect, page: &FormPage, language: &str) {
    if let LoadState::Failed(message) = &page.load {
        let text = format!("{message}\n\nPress Esc to go back");
        return status(frame, area, &text, Color::Red);
    }
    if page.is_loading() {
        return status(frame, area, "Loading...", Color::Yellow);
    }

    let [title, name, description, tags, code, footer] = layout(area);

    let heading = Paragraph::new(Span::styled(page.title(), Style::default().fg(Color::Cyan).bold()));
    frame.render_widget(heading, title);

    render_name(frame, name, page);
    render_buffer(
        frame,
        description,
        "Description",
        plain_lines(&page.description),
        &page.description,
        page.focus == FormField::Description,
    );
    render_tags(frame, tags, page);
    render_buffer(
        frame,
        code,
        "Solution code",
        highlight(&text_of(&page.code), language),
        &page.code,
        page.focus == FormField::Code,
    );
    render_status(frame, footer, page);

    // Drawn last so it overlaps the code box.
    if let Some(dropdown) = dropdown_area(tags, area, page) {
        render_suggestions(frame, dropdown, page);
    }
}

/// Tag field plus its open suggestion list.
pub fn tag_bounds(area: Rect, page: &FormPage) -> Rect {
    let [_, _, _, tags, _, _] = layout(area);
    match dropdown_area(tags, area, page) {
        Some(dropdown) => tags.union(dropdown),
        None => tags,
    }
}

fn layout(area: Rect) -> [Rect; 6] {
    Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Length(3), // Name
        Constraint::Length(6), // Description
        Constraint::Length(3), // Tags
        Constraint::Min(6),    // Code
        Constraint::Length(1), // Status
    ])
    .margin(1)
    .areas(area)
}

fn dropdown_area(tags: Rect, area: Rect, page: &FormPage) -> Option<Rect> {
    if !page.tag_input.is_open() {
        return None;
    }
    let rows = page
        .tag_input
        .suggestions(&page.catalog, &page.tags)
        .len()
        .min(MAX_SUGGESTIONS);
    if rows == 0 {
        return None;
    }

    let y = tags.bottom();
    let height = (to_u16(rows) + 2).min(area.bottom().saturating_sub(y));
    Some(Rect::new(tags.x, y, tags.width, height))
}

fn render_name(frame: &mut Frame, area: Rect, page: &FormPage) {
    let focused = page.focus == FormField::Name;
    let width = page.name.chars().count();
    let scroll = width.saturating_sub(inner_width(area).saturating_sub(1));

    let widget = Paragraph::new(page.name.as_str())
        .scroll((0, to_u16(scroll)))
        .block(panel("Name", focused));
    frame.render_widget(widget, area);

    if focused {
        frame.set_cursor_position(cursor_in(area, width - scroll, 0));
    }
}

fn plain_lines(area: &TextArea) -> Vec<Line<'static>> {
    area.lines().iter().map(|line| Line::from(line.clone())).collect()
}

/// Renders an editor's lines, scrolled so the cursor stays visible.
fn render_buffer(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    lines: Vec<Line<'static>>,
    editor: &TextArea,
    focused: bool,
) {
    let (row, col) = editor.cursor();
    let top = row.saturating_sub(inner_height(area).saturating_sub(1));
    let left = col.saturating_sub(inner_width(area).saturating_sub(1));

    let widget = Paragraph::new(lines)
        .scroll((to_u16(top), to_u16(left)))
        .block(panel(title, focused));
    frame.render_widget(widget, area);

    if focused {
        frame.set_cursor_position(cursor_in(area, col - left, row - top));
    }
}

fn inner_width(area: Rect) -> usize {
    usize::from(area.width.saturating_sub(2))
}

fn inner_height(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(2))
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn render_tags(frame: &mut Frame, area: Rect, page: &FormPage) {
    let focused = page.focus == FormField::Tags;

    let mut spans: Vec<Span> = page
        .tags
        .tags()
        .iter()
        .enumerate()
        .flat_map(|(i, tag)| {
            // Tags without an id are created when the algorithm is saved.
            let color = if tag.id.is_some() { Color::Cyan } else { Color::Green };
            let mut style = Style::default().fg(color);
            if focused && page.tag_cursor == Some(i) {
                style = style.reversed();
            }
            [Span::styled(format!("[{}]", tag.name), style), Span::raw(" ")]
        })
        .collect();

    if page.tag_input.input().is_empty() && !focused && page.tags.is_empty() {
        spans.push(Span::styled("Add tags", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(page.tag_input.input()));
    }

    let line = Line::from(spans);
    let width = line.width();
    frame.render_widget(Paragraph::new(line).block(panel("Tags", focused)), area);

    if focused && page.tag_cursor.is_none() {
        frame.set_cursor_position(cursor_in(area, width, 0));
    }
}

fn render_suggestions(frame: &mut Frame, area: Rect, page: &FormPage) {
    let highlighted = page.tag_input.highlighted();
    let rows = page.tag_input.suggestions(&page.catalog, &page.tags);
    let offset = (highlighted + 1).saturating_sub(MAX_SUGGESTIONS);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(MAX_SUGGESTIONS)
        .map(|(i, row)| {
            let is_highlighted = i == highlighted;
            let prefix = if is_highlighted { "> " } else { "  " };
            let (text, color) = match row {
                Suggestion::Existing(tag) => (tag.name.clone(), Color::White),
                Suggestion::Create(name) => (format!("Create \"{name}\""), Color::Green),
            };
            let style = if is_highlighted {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(color)
            };
            Line::from(vec![Span::styled(prefix, style), Span::styled(text, style)])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, page: &FormPage) {
    let (text, color) = if page.saving {
        ("Saving...", Color::Yellow)
    } else if let Some(error) = &page.error {
        (error.as_str(), Color::Red)
    } else if page.can_submit() {
        ("Ready to save (Ctrl+S)", Color::Green)
    } else {
        ("Name, description and solution code are required", Color::DarkGray)
    };

    frame.render_widget(Paragraph::new(text).fg(color), area);
}
