//! Quiz session state for one visit of the quiz page.

use crate::models::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Description and solution are shown, nothing is scored yet.
    Preview,
    InProgress,
    Finished,
}

/// What an advance request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the next question.
    Next,
    /// The last question was answered.
    Finished,
    /// Nothing was selected, or the session is not in progress.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    phase: QuizPhase,
    questions: Vec<Question>,
    current_question_index: usize,
    selected_answer: Option<String>,
    score: usize,
    details_visible: bool,
}

impl QuizSession {
    /// Returns `None` for an empty question set; such a quiz cannot be taken.
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }

        Some(Self {
            phase: QuizPhase::Preview,
            questions,
            current_question_index: 0,
            selected_answer: None,
            score: 0,
            details_visible: true,
        })
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_question_index]
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question_number() == self.total_questions()
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn details_visible(&self) -> bool {
        self.details_visible
    }

    pub fn start(&mut self) {
        if self.phase == QuizPhase::Preview {
            self.phase = QuizPhase::InProgress;
        }
    }

    /// Records the chosen option without scoring it.
    pub fn select_answer(&mut self, option_id: &str) -> bool {
        if self.phase != QuizPhase::InProgress || self.current_question().option(option_id).is_none() {
            return false;
        }
        self.selected_answer = Some(option_id.to_string());
        true
    }

    /// Scores the recorded selection against the current question, then
    /// moves on or finishes.
    pub fn advance(&mut self) -> Advance {
        if self.phase != QuizPhase::InProgress {
            return Advance::Ignored;
        }
        let Some(selected) = self.selected_answer.take() else {
            return Advance::Ignored;
        };

        if self.current_question().is_correct(&selected) {
            self.score += 1;
        }

        if self.current_question_index + 1 < self.questions.len() {
            self.current_question_index += 1;
            Advance::Next
        } else {
            self.phase = QuizPhase::Finished;
            Advance::Finished
        }
    }

    /// Back to the preview with index, selection and score cleared.
    pub fn restart(&mut self) {
        self.phase = QuizPhase::Preview;
        self.current_question_index = 0;
        self.selected_answer = None;
        self.score = 0;
        self.details_visible = true;
    }

    /// Shows or hides the algorithm panel; quiz progress is untouched.
    pub fn toggle_details(&mut self) {
        self.details_visible = !self.details_visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuizOption;

    fn question(id: &str, correct: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {id}"),
            options: ["a", "b", "c"]
                .iter()
                .map(|o| QuizOption {
                    id: o.to_string(),
                    text: o.to_uppercase(),
                })
                .collect(),
            correct_answer_id: correct.to_string(),
        }
    }

    fn three_questions() -> QuizSession {
        QuizSession::new(vec![question("1", "a"), question("2", "b"), question("3", "c")]).unwrap()
    }

    fn answer(session: &mut QuizSession, option: &str) -> Advance {
        assert!(session.select_answer(option));
        session.advance()
    }

    #[test]
    fn test_empty_quiz_is_rejected() {
        assert!(QuizSession::new(Vec::new()).is_none());
    }

    #[test]
    fn test_starts_in_preview() {
        let mut session = three_questions();
        assert_eq!(session.phase(), QuizPhase::Preview);
        assert!(!session.select_answer("a"));
        assert_eq!(session.advance(), Advance::Ignored);

        session.start();
        assert_eq!(session.phase(), QuizPhase::InProgress);
    }

    #[test]
    fn test_two_of_three() {
        let mut session = three_questions();
        session.start();

        assert_eq!(answer(&mut session, "a"), Advance::Next);
        assert_eq!(answer(&mut session, "a"), Advance::Next);
        assert!(session.is_last_question());
        assert_eq!(answer(&mut session, "c"), Advance::Finished);

        assert_eq!(session.phase(), QuizPhase::Finished);
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn test_selection_is_scored_only_on_advance() {
        let mut session = three_questions();
        session.start();

        session.select_answer("b");
        session.select_answer("a");
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected_answer(), Some("a"));

        session.advance();
        assert_eq!(session.score(), 1);
        assert_eq!(session.selected_answer(), None);
        assert_eq!(session.current_question_number(), 2);
    }

    #[test]
    fn test_advance_without_selection_is_ignored() {
        let mut session = three_questions();
        session.start();
        assert_eq!(session.advance(), Advance::Ignored);
        assert_eq!(session.current_question_index(), 0);
        assert!(!session.select_answer("zz"));
    }

    #[test]
    fn test_finished_needs_restart() {
        let mut session = three_questions();
        session.start();
        for option in ["a", "b", "c"] {
            answer(&mut session, option);
        }
        assert_eq!(session.score(), 3);

        session.start();
        assert_eq!(session.phase(), QuizPhase::Finished);
        assert!(!session.select_answer("a"));

        session.restart();
        assert_eq!(session.phase(), QuizPhase::Preview);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_question_index(), 0);
    }

    #[test]
    fn test_toggle_details_keeps_progress() {
        let mut session = three_questions();
        session.start();
        session.select_answer("a");
        session.toggle_details();

        assert!(!session.details_visible());
        assert_eq!(session.selected_answer(), Some("a"));
        assert_eq!(session.phase(), QuizPhase::InProgress);

        session.restart();
        assert!(session.details_visible());
    }
}
