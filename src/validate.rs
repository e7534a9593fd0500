//! Pure validation predicates over a quiz document.
//!
//! Each rule is independently queryable so the builder screen can render a
//! checklist of outstanding issues; `quiz_valid` is the overall gate used
//! before testing or exporting. Nothing here mutates state.

use crate::models::Quiz;

/// Quiz title is non-blank after trimming.
pub fn quiz_title_valid(quiz: &Quiz) -> bool {
    !quiz.title.trim().is_empty()
}

/// At least one question is present.
pub fn has_questions(quiz: &Quiz) -> bool {
    !quiz.questions.is_empty()
}

/// Every question title is non-blank after trimming.
pub fn question_titles_valid(quiz: &Quiz) -> bool {
    quiz.questions.iter().all(|q| !q.title.trim().is_empty())
}

/// Every answer of every question is non-blank after trimming.
pub fn answers_filled(quiz: &Quiz) -> bool {
    quiz.questions
        .iter()
        .all(|q| q.answers.iter().all(|a| !a.trim().is_empty()))
}

/// Every question has at least one correct answer chosen.
pub fn correct_answers_chosen(quiz: &Quiz) -> bool {
    quiz.questions.iter().all(|q| !q.correct.is_empty())
}

/// Overall gate: every rule passes.
pub fn quiz_valid(quiz: &Quiz) -> bool {
    quiz_title_valid(quiz)
        && has_questions(quiz)
        && question_titles_valid(quiz)
        && answers_filled(quiz)
        && correct_answers_chosen(quiz)
}

/// Snapshot of every rule, for rendering the builder checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    pub title_present: bool,
    pub has_questions: bool,
    pub question_titles_filled: bool,
    pub answers_filled: bool,
    pub correct_answers_chosen: bool,
}

impl ValidationReport {
    pub fn for_quiz(quiz: &Quiz) -> Self {
        Self {
            title_present: quiz_title_valid(quiz),
            has_questions: has_questions(quiz),
            question_titles_filled: question_titles_valid(quiz),
            answers_filled: answers_filled(quiz),
            correct_answers_chosen: correct_answers_chosen(quiz),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.title_present
            && self.has_questions
            && self.question_titles_filled
            && self.answers_filled
            && self.correct_answers_chosen
    }

    /// Every rule label with its pass state, in checklist order.
    pub fn rules(&self) -> [(&'static str, bool); 5] {
        [
            ("quiz title", self.title_present),
            ("at least one question", self.has_questions),
            ("a title for every question", self.question_titles_filled),
            ("text for every answer", self.answers_filled),
            ("a correct answer for every question", self.correct_answers_chosen),
        ]
    }

    /// Labels of the failing rules, in checklist order.
    pub fn issues(&self) -> Vec<&'static str> {
        self.rules()
            .into_iter()
            .filter(|(_, passed)| !passed)
            .map(|(label, _)| label)
            .collect()
    }
}
