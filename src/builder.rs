//! Builder state manager: owns the single in-progress quiz document.
//!
//! Every mutation below is atomic and preserves the document invariants
//! (answer counts stay within bounds, ids stay unique). Out-of-bounds
//! requests are silent no-ops rather than errors; only exporting and storing
//! can fail, and only on IO.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{AnswerKey, Question, QuestionId, QuestionType, Quiz};
use crate::storage::{self, KeyValueStore, StorageError};

/// Answer slots per question stay within these bounds.
pub const MIN_ANSWERS: usize = 2;
pub const MAX_ANSWERS: usize = 4;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write the quiz file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize the quiz: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Owns the in-progress quiz and hands out read access only; all edits go
/// through the operations below.
pub struct QuizBuilder {
    quiz: Quiz,
    /// Id to position map, rebuilt on deletion.
    index: HashMap<QuestionId, usize>,
    next_id: QuestionId,
}

impl QuizBuilder {
    pub fn new() -> Self {
        Self {
            quiz: Quiz::default(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.index
            .get(&id)
            .and_then(|&position| self.quiz.questions.get(position))
    }

    fn question_mut(&mut self, id: QuestionId) -> Option<&mut Question> {
        let position = *self.index.get(&id)?;
        self.quiz.questions.get_mut(position)
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.quiz.title = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.quiz.description = value.into();
    }

    /// Appends a blank single-choice question and returns its fresh id.
    pub fn add_question(&mut self) -> QuestionId {
        let id = self.next_id;
        self.next_id += 1;

        let previous = self.index.insert(id, self.quiz.questions.len());
        debug_assert!(previous.is_none(), "question ids are unique per session");
        self.quiz.questions.push(Question::new(id));
        id
    }

    pub fn update_question_title(&mut self, id: QuestionId, value: impl Into<String>) {
        if let Some(question) = self.question_mut(id) {
            question.title = value.into();
        }
    }

    pub fn delete_question(&mut self, id: QuestionId) {
        let Some(position) = self.index.remove(&id) else {
            return;
        };
        self.quiz.questions.remove(position);
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .quiz
            .questions
            .iter()
            .enumerate()
            .map(|(position, question)| (question.id, position))
            .collect();
    }

    /// Appends an empty answer slot unless the question already has four.
    pub fn add_answer(&mut self, id: QuestionId) {
        if let Some(question) = self.question_mut(id)
            && question.answers.len() < MAX_ANSWERS
        {
            question.answers.push(String::new());
        }
    }

    /// Replaces the answer text at `index`.
    ///
    /// A correct-answer entry that referenced the previous text is left
    /// untouched and goes stale, matching the authoring flow where the mark
    /// is set after the text settles.
    pub fn update_answer(&mut self, id: QuestionId, index: usize, value: impl Into<String>) {
        if let Some(question) = self.question_mut(id)
            && let Some(slot) = question.answers.get_mut(index)
        {
            *slot = value.into();
        }
    }

    /// Removes the answer at `index` unless the question is at the minimum
    /// of two. A correct-answer entry for the removed text is not pruned.
    pub fn delete_answer(&mut self, id: QuestionId, index: usize) {
        if let Some(question) = self.question_mut(id)
            && question.answers.len() > MIN_ANSWERS
            && index < question.answers.len()
        {
            question.answers.remove(index);
        }
    }

    pub fn toggle_correct_answer(&mut self, id: QuestionId, answer: &str) {
        if let Some(question) = self.question_mut(id) {
            question.correct.toggle(answer);
        }
    }

    /// Switches the question type, always discarding previously marked
    /// correct answers: the two payload shapes are incompatible.
    pub fn change_question_type(&mut self, id: QuestionId, new_type: QuestionType) {
        if let Some(question) = self.question_mut(id) {
            question.correct = AnswerKey::empty(new_type);
        }
    }

    /// Writes `<dir>/<slug>.json` (pretty-printed, ids stripped) and the
    /// same document to the hand-off slot. Returns the file path.
    pub fn export_quiz(
        &self,
        store: &mut dyn KeyValueStore,
        dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        storage::save_to_slot(store, &self.quiz)?;

        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", slug_file_name(&self.quiz.title)));
        fs::write(&path, serde_json::to_string_pretty(&self.quiz)?)?;
        log::debug!("exported quiz to {}", path.display());
        Ok(path)
    }

    /// Clears the whole store, then writes the document to the slot.
    pub fn store_quiz(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        storage::store_quiz(store, &self.quiz)
    }
}

impl Default for QuizBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Download-style file name: lowercased title with every whitespace run
/// collapsed to a hyphen, `quiz` when the title is empty.
fn slug_file_name(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_run = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_run {
                slug.push('-');
            }
            in_run = true;
        } else {
            slug.push(ch);
            in_run = false;
        }
    }

    if slug.is_empty() { "quiz".to_string() } else { slug }
}
