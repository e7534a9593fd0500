//! Play session: shuffled question order, answer tracking and scoring.
//!
//! A session snapshots the quiz's questions in a random order once, at
//! construction. Navigation, answering and restarting all happen against
//! that fixed order; only a brand-new session reshuffles.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::models::{AnswerKey, Question, QuestionId, QuestionType, Quiz};

/// What the player has picked for one question, shaped by the question type.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAnswer {
    Unique(String),
    Multiple(Vec<String>),
}

impl UserAnswer {
    pub fn is_empty(&self) -> bool {
        match self {
            UserAnswer::Unique(answer) => answer.is_empty(),
            UserAnswer::Multiple(answers) => answers.is_empty(),
        }
    }

    pub fn contains(&self, answer: &str) -> bool {
        match self {
            UserAnswer::Unique(picked) => picked == answer,
            UserAnswer::Multiple(picked) => picked.iter().any(|a| a == answer),
        }
    }
}

pub struct PlaySession {
    questions: Vec<Question>,
    current: usize,
    answers: HashMap<QuestionId, UserAnswer>,
    finished: bool,
    score: u8,
}

impl PlaySession {
    /// Starts a session over a copy of the quiz's questions, shuffled once.
    pub fn new(quiz: &Quiz) -> Self {
        let mut questions = quiz.questions.clone();
        questions.shuffle(&mut thread_rng());
        Self {
            questions,
            current: 0,
            answers: HashMap::new(),
            finished: false,
            score: 0,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn user_answer(&self, id: QuestionId) -> Option<&UserAnswer> {
        self.answers.get(&id)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    /// Records `answer` against the current question: single-choice picks
    /// replace the previous one, multiple-choice picks toggle in and out.
    pub fn select_answer(&mut self, answer: &str) {
        let Some(question) = self.questions.get(self.current) else {
            return;
        };
        let (id, kind) = (question.id, question.kind());

        match kind {
            QuestionType::Unique => {
                self.answers
                    .insert(id, UserAnswer::Unique(answer.to_string()));
            }
            QuestionType::Multiple => {
                let entry = self
                    .answers
                    .entry(id)
                    .or_insert_with(|| UserAnswer::Multiple(Vec::new()));
                if let UserAnswer::Multiple(picked) = entry {
                    match picked.iter().position(|a| a == answer) {
                        Some(index) => {
                            picked.remove(index);
                        }
                        None => picked.push(answer.to_string()),
                    }
                }
            }
        }
    }

    pub fn next_question(&mut self) {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
    }

    pub fn previous_question(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// The current question has a non-empty answer recorded.
    pub fn can_proceed(&self) -> bool {
        self.current_question()
            .and_then(|question| self.answers.get(&question.id))
            .is_some_and(|answer| !answer.is_empty())
    }

    pub fn is_last_question(&self) -> bool {
        self.questions.is_empty() || self.current + 1 == self.questions.len()
    }

    pub fn finish_quiz(&mut self) {
        self.score = self.calculate_score();
        self.finished = true;
        log::debug!(
            "quiz finished: {}/{} correct, score {}",
            self.correct_count(),
            self.questions.len(),
            self.score
        );
    }

    /// Clears all picks and jumps back to the first question. The question
    /// order from construction is kept.
    pub fn reset_quiz(&mut self) {
        self.current = 0;
        self.answers.clear();
        self.finished = false;
        self.score = 0;
    }

    pub fn correct_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|question| self.is_correct(question))
            .count()
    }

    /// Percentage of questions answered exactly right, rounded to the
    /// nearest whole number. An empty quiz scores zero.
    pub fn calculate_score(&self) -> u8 {
        if self.questions.is_empty() {
            return 0;
        }
        let ratio = self.correct_count() as f64 / self.questions.len() as f64;
        (ratio * 100.0).round() as u8
    }

    fn is_correct(&self, question: &Question) -> bool {
        match (&question.correct, self.answers.get(&question.id)) {
            (AnswerKey::Unique { correct_answers }, Some(UserAnswer::Unique(picked))) => {
                picked == correct_answers
            }
            (AnswerKey::Multiple { correct_answers }, Some(UserAnswer::Multiple(picked))) => {
                picked.len() == correct_answers.len()
                    && correct_answers.iter().all(|correct| picked.contains(correct))
            }
            _ => false,
        }
    }
}
