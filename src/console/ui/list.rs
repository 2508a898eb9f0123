//! Algorithm list page.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::console::state::{ListFocus, ListPage, LoadState};
use crate::models::Algorithm;

use super::{centered, cursor_in, panel, status};

pub fn render(frame: &mut Frame, area: Rect, page: &ListPage) {
    match &page.load {
        LoadState::Loading => return status(frame, area, "Loading algorithms...", Color::Yellow),
        LoadState::Failed(message) => {
            let text = format!("{message}\n\nPress r to retry");
            return status(frame, area, &text, Color::Red);
        }
        LoadState::Ready => {}
    }

    let chunks = Layout::vertical([
        Constraint::Length(3), // Search
        Constraint::Length(3), // Tag filter
        Constraint::Min(4),    // Algorithms
    ])
    .margin(1)
    .split(area);

    render_search(frame, chunks[0], page);
    render_tag_bar(frame, chunks[1], page);
    render_algorithms(frame, chunks[2], page);

    if let Some(algorithm) = &page.pending_delete {
        render_delete_dialog(frame, area, algorithm);
    }
}

fn render_search(frame: &mut Frame, area: Rect, page: &ListPage) {
    let focused = page.focus == ListFocus::Search;
    let text = if page.search.is_empty() && !focused {
        Span::styled("Search by name or description", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(page.search.as_str())
    };

    let width = page.search.chars().count();
    let scroll = width.saturating_sub(usize::from(area.width.saturating_sub(3)));

    let widget = Paragraph::new(text)
        .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX)))
        .block(panel("Search", focused));
    frame.render_widget(widget, area);

    if focused {
        frame.set_cursor_position(cursor_in(area, width - scroll, 0));
    }
}

fn render_tag_bar(frame: &mut Frame, area: Rect, page: &ListPage) {
    let focused = page.focus == ListFocus::Tags;

    let spans: Vec<Span> = if page.catalog.is_empty() {
        vec![Span::styled("No tags", Style::default().fg(Color::DarkGray))]
    } else {
        page.catalog
            .iter()
            .enumerate()
            .flat_map(|(i, tag)| {
                let active = page.tag_filter.contains(&tag.name);
                let mut style = if active {
                    Style::default().fg(Color::Green).bold()
                } else {
                    Style::default().fg(Color::White)
                };
                if focused && i == page.tag_cursor {
                    style = style.reversed();
                }
                let mark = if active { "x" } else { " " };
                [Span::styled(format!("[{mark}] {}", tag.name), style), Span::raw("  ")]
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(Line::from(spans)).block(panel("Tags", focused)), area);
}

fn render_algorithms(frame: &mut Frame, area: Rect, page: &ListPage) {
    let title = match page.generating {
        Some(_) => "Algorithms · Generating quiz...".to_string(),
        None => format!("Algorithms ({} of {})", page.filtered.len(), page.algorithms.len()),
    };
    let block = panel(&title, page.focus == ListFocus::Grid).padding(Padding::horizontal(1));

    if page.filtered.is_empty() {
        let message = if page.algorithms.is_empty() {
            "No algorithms yet. Press n to create one."
        } else {
            "No algorithms match the current filters."
        };
        let widget = Paragraph::new(message).fg(Color::DarkGray).block(block);
        frame.render_widget(widget, area);
        return;
    }

    let height = area.height.saturating_sub(2) as usize;
    let offset = (page.cursor + 1).saturating_sub(height);

    let lines: Vec<Line> = page
        .filtered
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, algorithm)| algorithm_line(algorithm, i == page.cursor, page.generating == Some(algorithm.id)))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn algorithm_line(algorithm: &Algorithm, is_selected: bool, generating: bool) -> Line<'static> {
    let prefix = if is_selected { "> " } else { "  " };
    let style = if is_selected {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::White)
    };

    let tags = algorithm
        .tags
        .iter()
        .map(|tag| format!("#{}", tag.name))
        .collect::<Vec<_>>()
        .join(" ");

    let mut spans = vec![
        Span::styled(prefix, style),
        Span::styled(algorithm.name.clone(), style),
        Span::styled(format!("  {}", algorithm.created_on()), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("  {tags}"), Style::default().fg(Color::Cyan)),
    ];
    if generating {
        spans.push(Span::styled("  generating...", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn render_delete_dialog(frame: &mut Frame, area: Rect, algorithm: &Algorithm) {
    let dialog = centered(area, 50.min(area.width), 7.min(area.height));

    let content = vec![
        Line::from(""),
        Line::from(format!("Delete \"{}\"?", algorithm.name)),
        Line::from(Span::styled("This cannot be undone.", Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled("[Y] delete   [N] cancel", Style::default().fg(Color::Yellow))),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Confirm deletion ")
                .title_style(Style::default().fg(Color::Red).bold()),
        );

    frame.render_widget(Clear, dialog);
    frame.render_widget(widget, dialog);
}
