//! Page-local state of the console views.

use tui_textarea::{CursorMove, TextArea};

use crate::filter::filter_algorithms;
use crate::models::{Algorithm, AlgorithmDraft, AlgorithmId, Tag};
use crate::quiz::QuizSession;
use crate::tags::{TagInput, TagSelection};

use super::Route;

/// Progress of the data a page needs before it can be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Carries the message shown in place of the content.
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

/// The page currently on screen.
#[derive(Debug)]
pub enum Page {
    List(ListPage),
    Form(FormPage),
    Quiz(QuizPage),
}

impl Page {
    pub fn route(&self) -> Route {
        match self {
            Page::List(_) => Route::List,
            Page::Form(form) => match form.mode {
                FormMode::Create => Route::Create,
                FormMode::Edit(id) => Route::Edit(id),
            },
            Page::Quiz(quiz) => Route::Quiz(quiz.algorithm_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFocus {
    Grid,
    Search,
    Tags,
}

/// Algorithm list with local search and tag filtering.
#[derive(Debug)]
pub struct ListPage {
    pub load: LoadState,
    /// Everything the service returned, minus local deletions.
    pub algorithms: Vec<Algorithm>,
    /// `algorithms` narrowed by `search` and `tag_filter`.
    pub filtered: Vec<Algorithm>,
    pub catalog: Vec<Tag>,
    pub search: String,
    pub tag_filter: TagSelection,
    pub tag_cursor: usize,
    pub cursor: usize,
    pub focus: ListFocus,
    pub pending_delete: Option<Algorithm>,
    pub generating: Option<AlgorithmId>,
}

impl ListPage {
    pub fn new() -> Self {
        Self {
            load: LoadState::Loading,
            algorithms: Vec::new(),
            filtered: Vec::new(),
            catalog: Vec::new(),
            search: String::new(),
            tag_filter: TagSelection::new(),
            tag_cursor: 0,
            cursor: 0,
            focus: ListFocus::Grid,
            pending_delete: None,
            generating: None,
        }
    }

    pub fn set_algorithms(&mut self, algorithms: Vec<Algorithm>) {
        self.algorithms = algorithms;
        self.load = LoadState::Ready;
        self.refilter();
    }

    /// Recomputes `filtered` from the local list; never goes back to the
    /// service.
    pub fn refilter(&mut self) {
        self.filtered = filter_algorithms(&self.algorithms, &self.search, self.tag_filter.tags());
        self.cursor = self.cursor.min(self.filtered.len().saturating_sub(1));
    }

    pub fn selected(&self) -> Option<&Algorithm> {
        self.filtered.get(self.cursor)
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.filtered.len() {
            self.cursor += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.refilter();
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.refilter();
    }

    pub fn toggle_tag_at_cursor(&mut self) {
        if let Some(tag) = self.catalog.get(self.tag_cursor) {
            self.tag_filter.toggle(tag);
            self.refilter();
        }
    }

    pub fn move_tag_cursor(&mut self, forward: bool) {
        let count = self.catalog.len();
        if count == 0 {
            return;
        }
        self.tag_cursor = if forward {
            (self.tag_cursor + 1) % count
        } else {
            (self.tag_cursor + count - 1) % count
        };
    }

    /// Drops the algorithm from both the backing and the filtered list.
    pub fn remove(&mut self, id: AlgorithmId) {
        self.algorithms.retain(|algorithm| algorithm.id != id);
        self.filtered.retain(|algorithm| algorithm.id != id);
        self.cursor = self.cursor.min(self.filtered.len().saturating_sub(1));
    }
}

impl Default for ListPage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(AlgorithmId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Tags,
    Code,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Description,
            FormField::Description => FormField::Tags,
            FormField::Tags => FormField::Code,
            FormField::Code => FormField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::Code,
            FormField::Description => FormField::Name,
            FormField::Tags => FormField::Description,
            FormField::Code => FormField::Tags,
        }
    }
}

/// Create and edit form.
#[derive(Debug)]
pub struct FormPage {
    pub mode: FormMode,
    pub load: LoadState,
    pub tags_pending: bool,
    /// The record being edited, kept for its id and timestamps.
    pub record: Option<Algorithm>,
    pub name: String,
    pub description: TextArea<'static>,
    pub code: TextArea<'static>,
    pub tags: TagSelection,
    pub tag_input: TagInput,
    /// Selected tag picked for removal, by position.
    pub tag_cursor: Option<usize>,
    pub catalog: Vec<Tag>,
    pub focus: FormField,
    pub saving: bool,
    pub error: Option<String>,
}

impl FormPage {
    fn blank(mode: FormMode, load: LoadState) -> Self {
        Self {
            mode,
            load,
            tags_pending: true,
            record: None,
            name: String::new(),
            description: editor(""),
            code: editor(""),
            tags: TagSelection::new(),
            tag_input: TagInput::new(),
            tag_cursor: None,
            catalog: Vec::new(),
            focus: FormField::Name,
            saving: false,
            error: None,
        }
    }

    pub fn create() -> Self {
        Self::blank(FormMode::Create, LoadState::Ready)
    }

    pub fn edit(id: AlgorithmId) -> Self {
        Self::blank(FormMode::Edit(id), LoadState::Loading)
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading || self.tags_pending
    }

    pub fn fill(&mut self, algorithm: Algorithm) {
        self.name = algorithm.name.clone();
        self.description = editor(&algorithm.description);
        self.code = editor(&algorithm.solution_code);
        self.tags = TagSelection::from(algorithm.tags.clone());
        self.record = Some(algorithm);
        self.load = LoadState::Ready;
    }

    pub fn set_catalog(&mut self, catalog: Vec<Tag>) {
        self.catalog = catalog;
        self.tags_pending = false;
    }

    pub fn can_submit(&self) -> bool {
        self.load.is_ready()
            && !self.saving
            && !self.name.trim().is_empty()
            && !is_blank(&self.description)
            && !is_blank(&self.code)
    }

    pub fn draft(&self) -> AlgorithmDraft {
        AlgorithmDraft {
            name: self.name.clone(),
            description: text_of(&self.description),
            solution_code: text_of(&self.code),
            tags: self.tags.tags().to_vec(),
        }
    }

    /// The loaded record with the edited fields applied.
    pub fn edited(&self) -> Option<Algorithm> {
        let mut algorithm = self.record.clone()?;
        let draft = self.draft();
        algorithm.name = draft.name;
        algorithm.description = draft.description;
        algorithm.solution_code = draft.solution_code;
        algorithm.tags = draft.tags;
        Some(algorithm)
    }

    pub fn focus_next(&mut self) {
        self.tag_input.dismiss();
        self.tag_cursor = None;
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.tag_input.dismiss();
        self.tag_cursor = None;
        self.focus = self.focus.previous();
    }

    /// Walks the selected tags. Moving left from the input picks the last
    /// tag, moving right past the last one returns to the input.
    pub fn move_tag_cursor(&mut self, forward: bool) {
        let count = self.tags.len();
        self.tag_cursor = match (self.tag_cursor, forward) {
            _ if count == 0 => None,
            (None, false) => Some(count - 1),
            (None, true) => None,
            (Some(i), false) => Some(i.saturating_sub(1)),
            (Some(i), true) if i + 1 < count => Some(i + 1),
            (Some(_), true) => None,
        };
        if self.tag_cursor.is_some() {
            self.tag_input.dismiss();
        }
    }

    /// Removes the tag under the cursor, keeping the cursor on its neighbour.
    pub fn remove_tag_at_cursor(&mut self) -> Option<Tag> {
        let index = self.tag_cursor?;
        let tag = self.tags.tags().get(index)?.clone();
        self.tags.remove(&tag.name);
        self.tag_cursor = match self.tags.len() {
            0 => None,
            count => Some(index.min(count - 1)),
        };
        Some(tag)
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New algorithm",
            FormMode::Edit(_) => "Edit algorithm",
        }
    }
}

/// Multi-line field holding `text`, cursor at the end. Tab inserts four
/// spaces.
pub fn editor(text: &str) -> TextArea<'static> {
    let mut area = TextArea::from(text.split('\n').map(|line| line.trim_end_matches('\r').to_string()));
    area.set_tab_length(4);
    area.set_hard_tab_indent(false);
    area.move_cursor(CursorMove::Bottom);
    area.move_cursor(CursorMove::End);
    area
}

pub fn text_of(area: &TextArea) -> String {
    area.lines().join("\n")
}

fn is_blank(area: &TextArea) -> bool {
    area.lines().iter().all(|line| line.trim().is_empty())
}

/// Splits the line at the cursor and repeats its indentation on the new line.
pub fn newline_with_indent(area: &mut TextArea) {
    let (row, col) = area.cursor();
    let indent: String = area.lines()[row]
        .chars()
        .take(col)
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    area.insert_newline();
    area.insert_str(indent);
}

/// Quiz page: the algorithm shown alongside a quiz session.
#[derive(Debug)]
pub struct QuizPage {
    pub algorithm_id: AlgorithmId,
    pub load: LoadState,
    pub algorithm: Option<Algorithm>,
    pub session: QuizSession,
    pub option_cursor: usize,
}

impl QuizPage {
    pub fn new(algorithm_id: AlgorithmId, session: QuizSession) -> Self {
        Self {
            algorithm_id,
            load: LoadState::Loading,
            algorithm: None,
            session,
            option_cursor: 0,
        }
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let count = self.session.current_question().options.len();
        if count == 0 {
            return;
        }
        self.option_cursor = if forward {
            (self.option_cursor + 1) % count
        } else {
            (self.option_cursor + count - 1) % count
        };
    }

    /// Records the option under the cursor as the answer.
    pub fn select_at_cursor(&mut self) -> bool {
        let Some(option) = self.session.current_question().options.get(self.option_cursor) else {
            return false;
        };
        let id = option.id.clone();
        self.session.select_answer(&id)
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.session.current_question().options.len() {
            return false;
        }
        self.option_cursor = index;
        self.select_at_cursor()
    }
}
