//! Tag identity, selection sets and the tag input widget state.

use crate::models::Tag;

/// Identity of a tag name: trimmed and lower-cased.
pub fn tag_key(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn same_tag(a: &str, b: &str) -> bool {
    tag_key(a) == tag_key(b)
}

/// Selected tags, never holding two entries with the same [`tag_key`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSelection {
    tags: Vec<Tag>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| same_tag(&tag.name, name))
    }

    /// Adds `tag` unless a tag with the same name is already selected.
    pub fn select(&mut self, tag: Tag) -> bool {
        if tag_key(&tag.name).is_empty() || self.contains(&tag.name) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Adds a not-yet-stored tag named `name` (trimmed).
    pub fn create(&mut self, name: &str) -> bool {
        self.select(Tag::unsaved(name.trim()))
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|tag| !same_tag(&tag.name, name));
        self.tags.len() != before
    }

    /// Selects `tag` if absent, removes it otherwise.
    pub fn toggle(&mut self, tag: &Tag) {
        if !self.remove(&tag.name) {
            self.select(tag.clone());
        }
    }

    pub fn pop(&mut self) -> Option<Tag> {
        self.tags.pop()
    }

    pub fn into_vec(self) -> Vec<Tag> {
        self.tags
    }
}

impl From<Vec<Tag>> for TagSelection {
    fn from(tags: Vec<Tag>) -> Self {
        let mut selection = Self::new();
        for tag in tags {
            selection.select(tag);
        }
        selection
    }
}

/// A row of the suggestion list.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion<'a> {
    Existing(&'a Tag),
    Create(String),
}

/// Typed text, suggestion list visibility and the highlighted row.
#[derive(Debug, Clone, Default)]
pub struct TagInput {
    input: String,
    open: bool,
    highlighted: usize,
}

impl TagInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Catalog tags whose name contains the typed text, minus those already
    /// selected.
    pub fn matches<'a>(&self, catalog: &'a [Tag], selected: &TagSelection) -> Vec<&'a Tag> {
        let needle = self.input.to_lowercase();
        catalog
            .iter()
            .filter(|tag| tag.name.to_lowercase().contains(&needle))
            .filter(|tag| !selected.contains(&tag.name))
            .collect()
    }

    /// True when the typed text names no existing tag, whether it is
    /// selected already or still in the catalog.
    pub fn offers_create(&self, catalog: &[Tag], selected: &TagSelection) -> bool {
        let typed = self.input.trim();
        !typed.is_empty()
            && !selected.contains(typed)
            && !catalog.iter().any(|tag| same_tag(&tag.name, typed))
    }

    pub fn suggestions<'a>(&self, catalog: &'a [Tag], selected: &TagSelection) -> Vec<Suggestion<'a>> {
        let mut rows: Vec<Suggestion<'a>> = self
            .matches(catalog, selected)
            .into_iter()
            .map(Suggestion::Existing)
            .collect();
        if self.offers_create(catalog, selected) {
            rows.push(Suggestion::Create(self.input.trim().to_string()));
        }
        rows
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn dismiss(&mut self) {
        self.open = false;
        self.highlighted = 0;
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.open = true;
        self.highlighted = 0;
    }

    pub fn pop_char(&mut self) -> bool {
        self.open = true;
        self.highlighted = 0;
        self.input.pop().is_some()
    }

    pub fn highlight_next(&mut self, catalog: &[Tag], selected: &TagSelection) {
        let rows = self.suggestions(catalog, selected).len();
        self.open = true;
        if rows > 0 {
            self.highlighted = (self.highlighted + 1) % rows;
        }
    }

    pub fn highlight_previous(&mut self, catalog: &[Tag], selected: &TagSelection) {
        let rows = self.suggestions(catalog, selected).len();
        self.open = true;
        if rows > 0 {
            self.highlighted = (self.highlighted + rows - 1) % rows;
        }
    }

    /// Applies the highlighted row: selects the existing tag or creates the
    /// typed one.
    pub fn choose(&mut self, catalog: &[Tag], selected: &mut TagSelection) -> bool {
        let chosen = match self.suggestions(catalog, selected).into_iter().nth(self.highlighted) {
            Some(Suggestion::Existing(tag)) => selected.select(tag.clone()),
            Some(Suggestion::Create(name)) => selected.create(&name),
            None => return false,
        };
        self.reset();
        chosen
    }

    /// Commit key: creates a tag from whatever text is typed, even when it
    /// also appears in the suggestion list.
    pub fn commit(&mut self, selected: &mut TagSelection) -> bool {
        if self.input.trim().is_empty() {
            return false;
        }
        let created = selected.create(&self.input);
        self.reset();
        created
    }

    fn reset(&mut self) {
        self.input.clear();
        self.dismiss();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Tag> {
        vec![
            Tag::existing(1, "Graph"),
            Tag::existing(2, "Sorting"),
            Tag::existing(3, "Greedy"),
        ]
    }

    fn typed(text: &str) -> TagInput {
        let mut input = TagInput::new();
        text.chars().for_each(|c| input.push_char(c));
        input
    }

    #[test]
    fn test_tag_key() {
        assert_eq!(tag_key("  Dynamic Programming "), "dynamic programming");
        assert!(same_tag("GRAPH", "graph "));
    }

    #[test]
    fn test_select_duplicate_is_noop() {
        let mut selection = TagSelection::new();
        assert!(selection.select(Tag::existing(1, "Graph")));
        assert!(!selection.select(Tag::existing(9, "graph")));
        assert!(!selection.create(" GRAPH "));
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.tags()[0].id, Some(1));
    }

    #[test]
    fn test_create_trims_and_has_no_id() {
        let mut selection = TagSelection::new();
        assert!(selection.create("  two pointers "));
        assert_eq!(selection.tags(), &[Tag::unsaved("two pointers")]);
        assert!(!selection.create("   "));
    }

    #[test]
    fn test_from_vec_dedups() {
        let selection = TagSelection::from(vec![Tag::existing(1, "a"), Tag::unsaved("A")]);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut selection = TagSelection::new();
        let graph = Tag::existing(1, "Graph");
        selection.toggle(&graph);
        assert!(selection.contains("graph"));
        selection.toggle(&graph);
        assert!(selection.is_empty());
        assert!(!selection.remove("graph"));
    }

    #[test]
    fn test_matches_filter_substring_and_exclude_selected() {
        let catalog = catalog();
        let mut selected = TagSelection::new();
        selected.select(Tag::existing(1, "Graph"));

        let input = typed("gr");
        let names: Vec<&str> = input.matches(&catalog, &selected).iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Greedy"]);
    }

    #[test]
    fn test_create_affordance() {
        let catalog = catalog();
        let selected = TagSelection::new();

        assert!(!typed("sorting").offers_create(&catalog, &selected));
        assert!(typed("sort").offers_create(&catalog, &selected));
        assert!(!typed("").offers_create(&catalog, &selected));

        let rows = typed("sort").suggestions(&catalog, &selected);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], Suggestion::Create("sort".to_string()));
    }

    #[test]
    fn test_no_create_row_for_selected_tag() {
        let catalog = vec![Tag::existing(1, "graph")];
        let mut selected = TagSelection::new();
        selected.select(Tag::existing(1, "graph"));

        let input = typed("Graph");
        assert!(!input.offers_create(&catalog, &selected));
        assert!(input.suggestions(&catalog, &selected).is_empty());

        selected.create("queue");
        assert!(!typed("queue ").offers_create(&catalog, &selected));
    }

    #[test]
    fn test_choose_highlighted_existing() {
        let catalog = catalog();
        let mut selected = TagSelection::new();
        let mut input = typed("gr");
        input.highlight_next(&catalog, &selected);

        assert!(input.choose(&catalog, &mut selected));
        assert_eq!(selected.tags(), &[Tag::existing(3, "Greedy")]);
        assert_eq!(input.input(), "");
        assert!(!input.is_open());
    }

    #[test]
    fn test_commit_creates_typed_text_even_when_listed() {
        let catalog = catalog();
        let mut selected = TagSelection::new();
        let mut input = typed("Sorting");
        assert_eq!(input.matches(&catalog, &selected).len(), 1);

        assert!(input.commit(&mut selected));
        assert_eq!(selected.tags(), &[Tag::unsaved("Sorting")]);
    }

    #[test]
    fn test_highlight_wraps() {
        let catalog = catalog();
        let selected = TagSelection::new();
        let mut input = TagInput::new();
        input.highlight_previous(&catalog, &selected);
        assert_eq!(input.highlighted(), 2);
        input.highlight_next(&catalog, &selected);
        assert_eq!(input.highlighted(), 0);
    }

    #[test]
    fn test_dismiss_closes_list() {
        let mut input = typed("x");
        assert!(input.is_open());
        input.dismiss();
        assert!(!input.is_open());
        assert_eq!(input.input(), "x");
    }
}
