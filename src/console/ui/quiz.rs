//! Quiz page: preview, questions and score.

use ratatui::layout::Margin;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::console::state::{LoadState, QuizPage};
use crate::highlight::highlight;
use crate::models::Question;
use crate::quiz::QuizPhase;

pub fn render(frame: &mut Frame, area: Rect, page: &QuizPage, language: &str) {
    match page.session.phase() {
        QuizPhase::Preview => render_preview(frame, area, page, language),
        QuizPhase::InProgress => render_in_progress(frame, area, page, language),
        QuizPhase::Finished => render_finished(frame, area, page),
    }
}

fn render_preview(frame: &mut Frame, area: Rect, page: &QuizPage, language: &str) {
    let chunks = Layout::vertical([
        Constraint::Min(8),    // Algorithm
        Constraint::Length(3), // Start prompt
    ])
    .margin(1)
    .split(area);

    render_details(frame, chunks[0], page, language);

    let total = page.session.total_questions();
    let prompt = vec![
        Line::from(Span::styled(
            format!("{total} question{} ready", if total == 1 { "" } else { "s" }),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled("Press Enter to start the quiz", Style::default().fg(Color::Yellow))),
    ];
    frame.render_widget(Paragraph::new(prompt).alignment(Alignment::Center), chunks[1]);
}

fn render_in_progress(frame: &mut Frame, area: Rect, page: &QuizPage, language: &str) {
    let question_area = if page.session.details_visible() {
        let columns = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .margin(1)
            .split(area);
        render_details(frame, columns[0], page, language);
        columns[1]
    } else {
        area.inner(Margin::new(1, 1))
    };

    let chunks = Layout::vertical([
        Constraint::Length(2), // Progress
        Constraint::Length(5), // Question text
        Constraint::Min(6),    // Options
        Constraint::Length(1), // Next / Finish
    ])
    .split(question_area);

    let progress = format!(
        "Question {} of {}",
        page.session.current_question_number(),
        page.session.total_questions()
    );
    frame.render_widget(
        Paragraph::new(progress)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan).bold()),
        chunks[0],
    );

    let question = page.session.current_question();
    let text = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(text, chunks[1]);

    render_options(frame, chunks[2], question, page.option_cursor, page.session.selected_answer());

    let label = if page.session.is_last_question() { "Finish" } else { "Next" };
    let next = match page.session.selected_answer() {
        Some(_) => Span::styled(format!("[Enter] {label}"), Style::default().fg(Color::Green).bold()),
        None => Span::styled(
            format!("[Enter] {label}  (select an option first)"),
            Style::default().fg(Color::DarkGray),
        ),
    };
    frame.render_widget(Paragraph::new(next).alignment(Alignment::Right), chunks[3]);
}

fn render_options(frame: &mut Frame, area: Rect, question: &Question, cursor: usize, selected: Option<&str>) {
    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let under_cursor = i == cursor;
            let chosen = selected == Some(option.id.as_str());
            let prefix = if under_cursor { "> " } else { "  " };
            let mark = if chosen { "(*) " } else { "( ) " };

            let style = if chosen {
                Style::default().fg(Color::Green).bold()
            } else if under_cursor {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(mark, style),
                Span::styled(format!("{}) ", option.id), style),
                Span::styled(option.text.clone(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

/// Algorithm name, description and highlighted solution.
fn render_details(frame: &mut Frame, area: Rect, page: &QuizPage, language: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Algorithm ")
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let algorithm = match (&page.load, &page.algorithm) {
        (LoadState::Ready, Some(algorithm)) => algorithm,
        (LoadState::Failed(message), _) => {
            let widget = Paragraph::new(message.as_str()).fg(Color::Red).block(block);
            frame.render_widget(widget, area);
            return;
        }
        _ => {
            let widget = Paragraph::new("Loading algorithm...").fg(Color::Yellow).block(block);
            frame.render_widget(widget, area);
            return;
        }
    };

    let mut lines = vec![
        Line::from(Span::styled(algorithm.name.clone(), Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
    ];
    lines.extend(algorithm.description.lines().map(|line| Line::from(line.to_string())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Solution", Style::default().fg(Color::DarkGray))));
    lines.extend(highlight(&algorithm.solution_code, language));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_finished(frame: &mut Frame, area: Rect, page: &QuizPage) {
    let score = page.session.score();
    let total = page.session.total_questions();
    let percentage = score as f64 / total as f64 * 100.0;

    let grade_color = match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    };

    let chunks = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(7),
        Constraint::Percentage(35),
    ])
    .split(area);

    let content = vec![
        Line::from(Span::styled("QUIZ FINISHED", Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Your score: {score} out of {total}"),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to restart or Esc to go back",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), chunks[1]);
}
