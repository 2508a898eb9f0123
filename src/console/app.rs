//! Console controller: routes keys and API responses to the current page.
//!
//! Nothing here performs I/O. Handlers return [`Command`]s that the runner
//! turns into requests, and responses come back through [`App::apply`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position, Rect};
use tracing::{debug, info, warn};
use tui_textarea::{CursorMove, TextArea};
use uuid::Uuid;

use crate::api::ApiError;
use crate::models::{Algorithm, AlgorithmDraft, AlgorithmId, Question, Tag};
use crate::quiz::{Advance, QuizPhase, QuizSession};

use super::Route;
use super::state::{
    FormField, FormMode, FormPage, ListFocus, ListPage, LoadState, Page, QuizPage, newline_with_indent,
};

const LOAD_ALGORITHMS_FAILED: &str = "Failed to load algorithms. Please try again later.";
const LOAD_ALGORITHM_FAILED: &str = "Failed to load algorithm. Please try again later.";
const CREATE_FAILED: &str = "Failed to create algorithm. Please try again.";
const UPDATE_FAILED: &str = "Failed to update algorithm. Please try again.";
const DELETE_FAILED: &str = "Failed to delete algorithm. Please try again.";
const QUIZ_FAILED: &str = "Failed to generate quiz. Please try again.";
const NO_QUIZ: &str = "No quiz was generated for this algorithm.";

/// Identifies one visit of a page. Responses for an older visit are dropped.
pub type ViewId = Uuid;

/// A remote call requested by a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadAlgorithms,
    LoadTags,
    LoadAlgorithm(AlgorithmId),
    CreateAlgorithm(AlgorithmDraft),
    UpdateAlgorithm(Algorithm),
    DeleteAlgorithm(AlgorithmId),
    GenerateQuiz(AlgorithmId),
}

impl Command {
    /// Mutations run to completion even after their page is gone.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::CreateAlgorithm(_) | Command::UpdateAlgorithm(_) | Command::DeleteAlgorithm(_)
        )
    }
}

#[derive(Debug)]
pub enum Outcome {
    Algorithms(Result<Vec<Algorithm>, ApiError>),
    Tags(Result<Vec<Tag>, ApiError>),
    Algorithm(Result<Algorithm, ApiError>),
    Created(Result<Algorithm, ApiError>),
    Updated(Result<Algorithm, ApiError>),
    Deleted(AlgorithmId, Result<(), ApiError>),
    Quiz(AlgorithmId, Result<Vec<Question>, ApiError>),
}

/// A finished request, addressed to the view that issued it.
#[derive(Debug)]
pub struct Response {
    pub view: ViewId,
    pub outcome: Outcome,
}

pub struct App {
    page: Page,
    view: ViewId,
    notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// Opens the console on `route`, returning the initial requests.
    pub fn open(route: Route) -> (Self, Vec<Command>) {
        let mut app = Self {
            page: Page::List(ListPage::new()),
            view: Uuid::new_v4(),
            notice: None,
            should_quit: false,
        };
        let commands = app.navigate(route, None);
        (app, commands)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn route(&self) -> Route {
        self.page.route()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Replaces the current page. `quiz` is the question set handed to the
    /// quiz page; without one the quiz page is never entered.
    pub fn navigate(&mut self, route: Route, quiz: Option<Vec<Question>>) -> Vec<Command> {
        self.view = Uuid::new_v4();
        debug!(%route, view = %self.view, "navigating");

        match route {
            Route::List => {
                self.page = Page::List(ListPage::new());
                vec![Command::LoadAlgorithms, Command::LoadTags]
            }
            Route::Create => {
                self.page = Page::Form(FormPage::create());
                vec![Command::LoadTags]
            }
            Route::Edit(id) => {
                self.page = Page::Form(FormPage::edit(id));
                vec![Command::LoadAlgorithm(id), Command::LoadTags]
            }
            Route::Quiz(id) => match quiz.and_then(QuizSession::new) {
                Some(session) => {
                    self.page = Page::Quiz(QuizPage::new(id, session));
                    vec![Command::LoadAlgorithm(id)]
                }
                None => {
                    warn!(algorithm_id = id, "quiz page opened without questions, redirecting");
                    self.notice = Some(NO_QUIZ.to_string());
                    self.navigate(Route::List, None)
                }
            },
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Vec::new();
        }
        self.notice = None;

        match self.page {
            Page::List(_) => self.handle_list_key(key),
            Page::Form(_) => self.handle_form_key(key),
            Page::Quiz(_) => self.handle_quiz_key(key),
        }
    }

    /// A pointer press outside the tag widget closes its suggestions.
    pub fn handle_click(&mut self, position: Position, tag_bounds: Option<Rect>) {
        let Page::Form(form) = &mut self.page else {
            return;
        };

        if tag_bounds.is_some_and(|bounds| bounds.contains(position)) {
            form.focus = FormField::Tags;
            form.tag_input.open();
        } else if form.tag_input.is_open() {
            form.tag_input.dismiss();
        }
    }

    pub fn apply(&mut self, response: Response) -> Vec<Command> {
        if response.view != self.view {
            debug!(view = %response.view, "dropping response for a closed view");
            return Vec::new();
        }

        let mut next: Option<(Route, Option<Vec<Question>>)> = None;

        match (&mut self.page, response.outcome) {
            (Page::List(list), Outcome::Algorithms(result)) => match result {
                Ok(algorithms) => list.set_algorithms(algorithms),
                Err(_) => list.load = LoadState::Failed(LOAD_ALGORITHMS_FAILED.to_string()),
            },
            (Page::List(list), Outcome::Tags(result)) => list.catalog = catalog_or_empty(result),
            (Page::List(_), Outcome::Deleted(id, result)) => match result {
                Ok(()) => info!(algorithm_id = id, "algorithm deleted"),
                Err(_) => self.notice = Some(DELETE_FAILED.to_string()),
            },
            (Page::List(list), Outcome::Quiz(id, result)) => {
                list.generating = None;
                match result {
                    Ok(questions) => {
                        info!(algorithm_id = id, questions = questions.len(), "quiz generated");
                        next = Some((Route::Quiz(id), Some(questions)));
                    }
                    Err(_) => self.notice = Some(QUIZ_FAILED.to_string()),
                }
            }
            (Page::Form(form), Outcome::Tags(result)) => form.set_catalog(catalog_or_empty(result)),
            (Page::Form(form), Outcome::Algorithm(result)) => match result {
                Ok(algorithm) => form.fill(algorithm),
                Err(_) => form.load = LoadState::Failed(LOAD_ALGORITHM_FAILED.to_string()),
            },
            (Page::Form(form), Outcome::Created(result)) => {
                form.saving = false;
                match result {
                    Ok(created) => {
                        info!(algorithm_id = created.id, "algorithm created");
                        next = Some((Route::Edit(created.id), None));
                    }
                    Err(_) => form.error = Some(CREATE_FAILED.to_string()),
                }
            }
            (Page::Form(form), Outcome::Updated(result)) => {
                form.saving = false;
                match result {
                    Ok(updated) => {
                        info!(algorithm_id = updated.id, "algorithm updated");
                        next = Some((Route::List, None));
                    }
                    Err(_) => form.error = Some(UPDATE_FAILED.to_string()),
                }
            }
            (Page::Quiz(quiz), Outcome::Algorithm(result)) => match result {
                Ok(algorithm) => {
                    quiz.algorithm = Some(algorithm);
                    quiz.load = LoadState::Ready;
                }
                Err(_) => quiz.load = LoadState::Failed(LOAD_ALGORITHM_FAILED.to_string()),
            },
            (_, outcome) => debug!(?outcome, "response not used by the current page"),
        }

        match next {
            Some((route, quiz)) => self.navigate(route, quiz),
            None => Vec::new(),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let Page::List(list) = &mut self.page else {
            return Vec::new();
        };

        if let Some(pending) = &list.pending_delete {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    let id = pending.id;
                    list.pending_delete = None;
                    list.remove(id);
                    return vec![Command::DeleteAlgorithm(id)];
                }
                KeyCode::Char('n') | KeyCode::Esc => list.pending_delete = None,
                _ => {}
            }
            return Vec::new();
        }

        if !list.load.is_ready() {
            return match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                    Vec::new()
                }
                KeyCode::Char('r') => self.navigate(Route::List, None),
                KeyCode::Char('n') => self.navigate(Route::Create, None),
                _ => Vec::new(),
            };
        }

        match list.focus {
            ListFocus::Search => {
                match key.code {
                    KeyCode::Char(c) => list.push_search(c),
                    KeyCode::Backspace => list.pop_search(),
                    KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => list.focus = ListFocus::Grid,
                    _ => {}
                }
                Vec::new()
            }
            ListFocus::Tags => {
                match key.code {
                    KeyCode::Left | KeyCode::Char('h') => list.move_tag_cursor(false),
                    KeyCode::Right | KeyCode::Char('l') => list.move_tag_cursor(true),
                    KeyCode::Char(' ') | KeyCode::Enter => list.toggle_tag_at_cursor(),
                    KeyCode::Esc | KeyCode::Tab | KeyCode::Char('t') => list.focus = ListFocus::Grid,
                    _ => {}
                }
                Vec::new()
            }
            ListFocus::Grid => match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    list.select_next();
                    Vec::new()
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    list.select_previous();
                    Vec::new()
                }
                KeyCode::Char('/') | KeyCode::Tab => {
                    list.focus = ListFocus::Search;
                    Vec::new()
                }
                KeyCode::Char('t') => {
                    if !list.catalog.is_empty() {
                        list.focus = ListFocus::Tags;
                    }
                    Vec::new()
                }
                KeyCode::Char('d') => {
                    list.pending_delete = list.selected().cloned();
                    Vec::new()
                }
                KeyCode::Char('g') => match (list.generating, list.selected()) {
                    (None, Some(algorithm)) => {
                        let id = algorithm.id;
                        list.generating = Some(id);
                        vec![Command::GenerateQuiz(id)]
                    }
                    _ => Vec::new(),
                },
                KeyCode::Char('e') | KeyCode::Enter => match list.selected() {
                    Some(algorithm) => {
                        let id = algorithm.id;
                        self.navigate(Route::Edit(id), None)
                    }
                    None => Vec::new(),
                },
                KeyCode::Char('n') => self.navigate(Route::Create, None),
                KeyCode::Char('r') => self.navigate(Route::List, None),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                    Vec::new()
                }
                _ => Vec::new(),
            },
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let Page::Form(form) = &mut self.page else {
            return Vec::new();
        };

        if key.code == KeyCode::Esc {
            if form.tag_input.is_open() {
                form.tag_input.dismiss();
                return Vec::new();
            }
            return self.navigate(Route::List, None);
        }

        if form.is_loading() || !form.load.is_ready() {
            return Vec::new();
        }

        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        if control {
            if key.code == KeyCode::Char('s') {
                return submit(form);
            }
            return Vec::new();
        }

        match key.code {
            KeyCode::BackTab => {
                form.focus_previous();
                return Vec::new();
            }
            KeyCode::Tab if form.focus != FormField::Code => {
                form.focus_next();
                return Vec::new();
            }
            _ => {}
        }

        form.error = None;
        match form.focus {
            FormField::Name => match key.code {
                KeyCode::Char(c) => form.name.push(c),
                KeyCode::Backspace => {
                    form.name.pop();
                }
                KeyCode::Enter => form.focus_next(),
                _ => {}
            },
            FormField::Description => edit_text(&mut form.description, key.code, false),
            FormField::Code => edit_text(&mut form.code, key.code, true),
            FormField::Tags if form.tag_cursor.is_some() => match key.code {
                KeyCode::Left => form.move_tag_cursor(false),
                KeyCode::Right => form.move_tag_cursor(true),
                KeyCode::Delete | KeyCode::Backspace => {
                    form.remove_tag_at_cursor();
                }
                KeyCode::Char(c) => {
                    form.tag_cursor = None;
                    form.tag_input.push_char(c);
                }
                _ => form.tag_cursor = None,
            },
            FormField::Tags => {
                let input = &mut form.tag_input;
                match key.code {
                    KeyCode::Char(c) => input.push_char(c),
                    KeyCode::Backspace => {
                        if input.input().is_empty() {
                            form.tags.pop();
                        } else {
                            input.pop_char();
                        }
                    }
                    KeyCode::Left if input.input().is_empty() => form.move_tag_cursor(false),
                    KeyCode::Down => input.highlight_next(&form.catalog, &form.tags),
                    KeyCode::Up => input.highlight_previous(&form.catalog, &form.tags),
                    KeyCode::Right if input.is_open() => {
                        input.choose(&form.catalog, &mut form.tags);
                    }
                    KeyCode::Enter => {
                        if !input.input().trim().is_empty() {
                            input.commit(&mut form.tags);
                        } else if input.is_open() {
                            input.choose(&form.catalog, &mut form.tags);
                        } else {
                            input.open();
                        }
                    }
                    _ => {}
                }
            }
        }
        Vec::new()
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let Page::Quiz(quiz) = &mut self.page else {
            return Vec::new();
        };

        match quiz.session.phase() {
            QuizPhase::Preview => match key.code {
                KeyCode::Enter | KeyCode::Char('s') => quiz.session.start(),
                KeyCode::Esc | KeyCode::Char('b') => return self.navigate(Route::List, None),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            QuizPhase::InProgress => match key.code {
                KeyCode::Down | KeyCode::Char('j') => quiz.move_cursor(true),
                KeyCode::Up | KeyCode::Char('k') => quiz.move_cursor(false),
                KeyCode::Char(' ') => {
                    quiz.select_at_cursor();
                }
                KeyCode::Char(c @ '1'..='9') => {
                    quiz.select_index(c as usize - '1' as usize);
                }
                KeyCode::Enter | KeyCode::Char('n') => {
                    if quiz.session.advance() == Advance::Next {
                        quiz.option_cursor = 0;
                    }
                }
                KeyCode::Tab | KeyCode::Char('i') => quiz.session.toggle_details(),
                KeyCode::Esc => return self.navigate(Route::List, None),
                _ => {}
            },
            QuizPhase::Finished => match key.code {
                KeyCode::Char('r') => {
                    quiz.session.restart();
                    quiz.option_cursor = 0;
                }
                KeyCode::Esc | KeyCode::Char('b') => return self.navigate(Route::List, None),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
        }
        Vec::new()
    }
}

fn submit(form: &mut FormPage) -> Vec<Command> {
    if !form.can_submit() {
        return Vec::new();
    }

    let command = match form.mode {
        FormMode::Create => Command::CreateAlgorithm(form.draft()),
        FormMode::Edit(_) => match form.edited() {
            Some(algorithm) => Command::UpdateAlgorithm(algorithm),
            None => return Vec::new(),
        },
    };
    form.saving = true;
    form.error = None;
    vec![command]
}

fn edit_text(area: &mut TextArea, code: KeyCode, is_code: bool) {
    match code {
        KeyCode::Char(c) => area.insert_char(c),
        KeyCode::Enter => newline_with_indent(area),
        KeyCode::Tab if is_code => {
            area.insert_tab();
        }
        KeyCode::Backspace => {
            area.delete_char();
        }
        KeyCode::Delete => {
            area.delete_next_char();
        }
        KeyCode::Left => area.move_cursor(CursorMove::Back),
        KeyCode::Right => area.move_cursor(CursorMove::Forward),
        KeyCode::Up => area.move_cursor(CursorMove::Up),
        KeyCode::Down => area.move_cursor(CursorMove::Down),
        KeyCode::Home => area.move_cursor(CursorMove::Head),
        KeyCode::End => area.move_cursor(CursorMove::End),
        _ => {}
    }
}

/// Tag catalog failures degrade to an empty catalog.
fn catalog_or_empty(result: Result<Vec<Tag>, ApiError>) -> Vec<Tag> {
    result.unwrap_or_else(|err| {
        warn!(%err, "tag catalog unavailable, continuing without suggestions");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use reqwest::StatusCode;

    use super::*;
    use crate::api::Method;
    use crate::console::state::text_of;
    use crate::models::QuizOption;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn failure() -> ApiError {
        ApiError::Status {
            method: Method::Get,
            url: "http://localhost/api".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn algorithm(id: AlgorithmId, name: &str, description: &str, tags: &[&str]) -> Algorithm {
        let at = NaiveDateTime::parse_from_str("2024-03-04 05:06:07", "%Y-%m-%d %H:%M:%S").unwrap();
        Algorithm {
            id,
            name: name.to_string(),
            description: description.to_string(),
            solution_code: "pass".to_string(),
            tags: tags.iter().enumerate().map(|(i, t)| Tag::existing(i as i64, *t)).collect(),
            created_at: at,
            updated_at: at,
        }
    }

    fn question(id: &str, correct: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {id}"),
            options: ["a", "b", "c"]
                .iter()
                .map(|o| QuizOption {
                    id: o.to_string(),
                    text: o.to_string(),
                })
                .collect(),
            correct_answer_id: correct.to_string(),
        }
    }

    fn respond(app: &mut App, outcome: Outcome) -> Vec<Command> {
        let view = app.view();
        app.apply(Response { view, outcome })
    }

    fn loaded_list() -> App {
        let (mut app, _) = App::open(Route::List);
        respond(
            &mut app,
            Outcome::Algorithms(Ok(vec![
                algorithm(1, "BFS", "graph", &["graph"]),
                algorithm(2, "Quicksort", "sort", &["sort"]),
            ])),
        );
        respond(
            &mut app,
            Outcome::Tags(Ok(vec![Tag::existing(1, "graph"), Tag::existing(2, "sort")])),
        );
        app
    }

    fn list(app: &App) -> &ListPage {
        match app.page() {
            Page::List(list) => list,
            other => panic!("expected list page, got {other:?}"),
        }
    }

    fn form(app: &App) -> &FormPage {
        match app.page() {
            Page::Form(form) => form,
            other => panic!("expected form page, got {other:?}"),
        }
    }

    fn quiz(app: &App) -> &QuizPage {
        match app.page() {
            Page::Quiz(quiz) => quiz,
            other => panic!("expected quiz page, got {other:?}"),
        }
    }

    fn filtered_names(app: &App) -> Vec<String> {
        list(app).filtered.iter().map(|a| a.name.clone()).collect()
    }

    #[test]
    fn test_list_loads_algorithms_and_tags() {
        let (app, commands) = App::open(Route::List);
        assert_eq!(commands, vec![Command::LoadAlgorithms, Command::LoadTags]);
        assert_eq!(list(&app).load, LoadState::Loading);

        let app = loaded_list();
        assert!(list(&app).load.is_ready());
        assert_eq!(list(&app).catalog.len(), 2);
    }

    #[test]
    fn test_search_and_tag_filter_are_local() {
        let mut app = loaded_list();

        app.handle_key(key(KeyCode::Char('/')));
        let mut commands = Vec::new();
        for c in "qui".chars() {
            commands.extend(app.handle_key(key(KeyCode::Char(c))));
        }
        assert!(commands.is_empty());
        assert_eq!(filtered_names(&app), vec!["Quicksort"]);

        for _ in 0..3 {
            app.handle_key(key(KeyCode::Backspace));
        }
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char('t')));
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(filtered_names(&app), vec!["BFS"]);

        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(filtered_names(&app).len(), 2);
    }

    #[test]
    fn test_failed_load_shows_message() {
        let (mut app, _) = App::open(Route::List);
        respond(&mut app, Outcome::Algorithms(Err(failure())));
        respond(&mut app, Outcome::Tags(Err(failure())));

        assert_eq!(
            list(&app).load,
            LoadState::Failed("Failed to load algorithms. Please try again later.".to_string())
        );
        assert!(list(&app).catalog.is_empty());
        assert_eq!(
            app.handle_key(key(KeyCode::Char('r'))),
            vec![Command::LoadAlgorithms, Command::LoadTags]
        );
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let (mut app, _) = App::open(Route::List);
        let old_view = app.view();
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.route(), Route::Create);

        let commands = app.apply(Response {
            view: old_view,
            outcome: Outcome::Tags(Ok(vec![Tag::existing(1, "graph")])),
        });
        assert!(commands.is_empty());
        assert!(form(&app).catalog.is_empty());
        assert!(form(&app).tags_pending);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut app = loaded_list();

        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(list(&app).pending_delete.as_ref().map(|a| a.id), Some(1));
        assert!(app.handle_key(key(KeyCode::Char('n'))).is_empty());
        assert_eq!(list(&app).algorithms.len(), 2);

        app.handle_key(key(KeyCode::Char('d')));
        let commands = app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(commands, vec![Command::DeleteAlgorithm(1)]);
        assert_eq!(list(&app).algorithms.len(), 1);
        assert_eq!(filtered_names(&app), vec!["Quicksort"]);

        respond(&mut app, Outcome::Deleted(1, Err(failure())));
        assert_eq!(app.notice(), Some("Failed to delete algorithm. Please try again."));
        assert_eq!(list(&app).algorithms.len(), 1);
    }

    #[test]
    fn test_direct_quiz_navigation_redirects() {
        let (app, commands) = App::open(Route::Quiz(3));
        assert_eq!(app.route(), Route::List);
        assert_eq!(commands, vec![Command::LoadAlgorithms, Command::LoadTags]);
        assert_eq!(app.notice(), Some("No quiz was generated for this algorithm."));
    }

    #[test]
    fn test_empty_generated_quiz_redirects() {
        let mut app = loaded_list();
        assert_eq!(app.handle_key(key(KeyCode::Char('g'))), vec![Command::GenerateQuiz(1)]);
        assert!(app.handle_key(key(KeyCode::Char('g'))).is_empty());

        respond(&mut app, Outcome::Quiz(1, Ok(Vec::new())));
        assert_eq!(app.route(), Route::List);
        assert!(list(&app).generating.is_none());
    }

    #[test]
    fn test_quiz_flow_scores_two_of_three() {
        let mut app = loaded_list();
        app.handle_key(key(KeyCode::Char('g')));
        let commands = respond(
            &mut app,
            Outcome::Quiz(
                1,
                Ok(vec![question("1", "a"), question("2", "b"), question("3", "c")]),
            ),
        );
        assert_eq!(commands, vec![Command::LoadAlgorithm(1)]);
        assert_eq!(app.route(), Route::Quiz(1));
        respond(&mut app, Outcome::Algorithm(Ok(algorithm(1, "BFS", "graph", &[]))));
        assert!(quiz(&app).load.is_ready());

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(quiz(&app).session.phase(), QuizPhase::InProgress);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(quiz(&app).session.current_question_number(), 1);

        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(key(KeyCode::Char('3')));
        app.handle_key(key(KeyCode::Tab));
        assert!(!quiz(&app).session.details_visible());
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Enter));

        let session = &quiz(&app).session;
        assert_eq!(session.phase(), QuizPhase::Finished);
        assert_eq!(session.score(), 2);

        app.handle_key(key(KeyCode::Char('r')));
        let session = &quiz(&app).session;
        assert_eq!(session.phase(), QuizPhase::Preview);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_question_index(), 0);
    }

    #[test]
    fn test_generate_failure_keeps_list() {
        let mut app = loaded_list();
        app.handle_key(key(KeyCode::Char('g')));
        respond(&mut app, Outcome::Quiz(1, Err(failure())));
        assert_eq!(app.route(), Route::List);
        assert_eq!(app.notice(), Some("Failed to generate quiz. Please try again."));
    }

    #[test]
    fn test_create_form_submits_draft() {
        let (mut app, commands) = App::open(Route::Create);
        assert_eq!(commands, vec![Command::LoadTags]);
        respond(&mut app, Outcome::Tags(Ok(vec![Tag::existing(4, "graph")])));

        type_text(&mut app, "BFS");
        assert!(app.handle_key(ctrl('s')).is_empty());

        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Breadth first");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "gr");
        app.handle_key(key(KeyCode::Right));
        assert!(!form(&app).tag_input.is_open());
        type_text(&mut app, "Queue");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "QUEUE");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "def bfs():");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "pass");

        let commands = app.handle_key(ctrl('s'));
        let expected = AlgorithmDraft {
            name: "BFS".to_string(),
            description: "Breadth first".to_string(),
            solution_code: "def bfs():\n    pass".to_string(),
            tags: vec![Tag::existing(4, "graph"), Tag::unsaved("Queue")],
        };
        assert_eq!(commands, vec![Command::CreateAlgorithm(expected)]);
        assert!(form(&app).saving);
        assert!(app.handle_key(ctrl('s')).is_empty());

        let commands = respond(&mut app, Outcome::Created(Ok(algorithm(9, "BFS", "Breadth first", &[]))));
        assert_eq!(app.route(), Route::Edit(9));
        assert_eq!(commands, vec![Command::LoadAlgorithm(9), Command::LoadTags]);
    }

    #[test]
    fn test_create_failure_stays_on_form() {
        let (mut app, _) = App::open(Route::Create);
        respond(&mut app, Outcome::Tags(Ok(Vec::new())));
        respond(&mut app, Outcome::Created(Err(failure())));
        assert_eq!(app.route(), Route::Create);
        assert_eq!(form(&app).error.as_deref(), Some("Failed to create algorithm. Please try again."));
        assert!(!form(&app).saving);
    }

    #[test]
    fn test_edit_form_updates_record() {
        let (mut app, _) = App::open(Route::Edit(2));
        assert!(form(&app).is_loading());
        respond(&mut app, Outcome::Algorithm(Ok(algorithm(2, "Quicksort", "sort", &["sort"]))));
        respond(&mut app, Outcome::Tags(Err(failure())));
        assert!(!form(&app).is_loading());
        assert!(form(&app).catalog.is_empty());

        type_text(&mut app, "!");
        let commands = app.handle_key(ctrl('s'));
        let Some(Command::UpdateAlgorithm(updated)) = commands.first() else {
            panic!("expected update command, got {commands:?}");
        };
        assert_eq!(updated.id, 2);
        assert_eq!(updated.name, "Quicksort!");
        assert_eq!(updated.tags.len(), 1);

        respond(&mut app, Outcome::Updated(Ok(updated.clone())));
        assert_eq!(app.route(), Route::List);
    }

    #[test]
    fn test_edit_load_failure() {
        let (mut app, _) = App::open(Route::Edit(2));
        respond(&mut app, Outcome::Algorithm(Err(failure())));
        assert_eq!(
            form(&app).load,
            LoadState::Failed("Failed to load algorithm. Please try again later.".to_string())
        );
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.route(), Route::List);
    }

    #[test]
    fn test_click_outside_dismisses_suggestions() {
        let (mut app, _) = App::open(Route::Create);
        respond(&mut app, Outcome::Tags(Ok(vec![Tag::existing(1, "graph")])));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "g");
        assert!(form(&app).tag_input.is_open());

        let bounds = Rect::new(0, 10, 40, 5);
        app.handle_click(Position::new(5, 12), Some(bounds));
        assert!(form(&app).tag_input.is_open());

        app.handle_click(Position::new(5, 30), Some(bounds));
        assert!(!form(&app).tag_input.is_open());
        assert_eq!(form(&app).tag_input.input(), "g");
    }

    #[test]
    fn test_remove_earlier_selected_tag() {
        let (mut app, _) = App::open(Route::Create);
        respond(&mut app, Outcome::Tags(Ok(Vec::new())));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "graph");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "sort");
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(form(&app).tag_cursor, Some(0));
        app.handle_key(key(KeyCode::Delete));

        let tags = &form(&app).tags;
        assert!(tags.contains("sort"));
        assert!(!tags.contains("graph"));
        assert_eq!(tags.len(), 1);

        type_text(&mut app, "dp");
        assert_eq!(form(&app).tag_cursor, None);
        assert_eq!(form(&app).tag_input.input(), "dp");
    }

    #[test]
    fn test_code_field_indents() {
        let (mut app, _) = App::open(Route::Create);
        respond(&mut app, Outcome::Tags(Ok(Vec::new())));
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Tab));
        }
        type_text(&mut app, "for x in xs:");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "if x:");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "yield x");
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(
            text_of(&form(&app).code),
            "for x in xs:\n    if x:\n    yield "
        );
    }

    #[test]
    fn test_mutations_are_flagged() {
        assert!(Command::DeleteAlgorithm(1).is_mutation());
        assert!(!Command::GenerateQuiz(1).is_mutation());
        assert!(!Command::LoadTags.is_mutation());
    }
}
