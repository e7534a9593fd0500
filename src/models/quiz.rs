//! The quiz document model shared by the builder and the play session.
//!
//! The serialized form of these types is the exchange format for both file
//! export and the persistence slot. Question ids exist only in memory: they
//! are skipped during serialization and re-assigned on every load.

use serde::{Deserialize, Serialize};

/// In-session question identifier. Never serialized.
pub type QuestionId = u64;

/// The two supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    /// Exactly one correct answer (radio semantics).
    Unique,
    /// A set of correct answers (checkbox semantics).
    Multiple,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Unique => write!(f, "single choice"),
            QuestionType::Multiple => write!(f, "multiple choice"),
        }
    }
}

/// Correct-answer payload, tagged by the question type.
///
/// On the wire this flattens into the question object as
/// `"type": "unique" | "multiple"` plus a `correct_answers` field that is a
/// string for `unique` and an array for `multiple`. A missing
/// `correct_answers` deserializes as the empty payload, which the validation
/// engine then reports as "no correct answer chosen".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnswerKey {
    Unique {
        #[serde(default)]
        correct_answers: String,
    },
    Multiple {
        #[serde(default)]
        correct_answers: Vec<String>,
    },
}

impl AnswerKey {
    /// The empty payload for the given question type.
    pub fn empty(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Unique => AnswerKey::Unique {
                correct_answers: String::new(),
            },
            QuestionType::Multiple => AnswerKey::Multiple {
                correct_answers: Vec::new(),
            },
        }
    }

    /// The question type this payload belongs to.
    pub fn kind(&self) -> QuestionType {
        match self {
            AnswerKey::Unique { .. } => QuestionType::Unique,
            AnswerKey::Multiple { .. } => QuestionType::Multiple,
        }
    }

    /// True when no correct answer has been chosen yet.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerKey::Unique { correct_answers } => correct_answers.is_empty(),
            AnswerKey::Multiple { correct_answers } => correct_answers.is_empty(),
        }
    }

    /// Whether the given answer text is currently marked correct.
    pub fn contains(&self, answer: &str) -> bool {
        match self {
            AnswerKey::Unique { correct_answers } => correct_answers == answer,
            AnswerKey::Multiple { correct_answers } => {
                correct_answers.iter().any(|a| a == answer)
            }
        }
    }

    /// Mark or unmark an answer as correct.
    ///
    /// `Unique` replaces the stored answer (radio semantics). `Multiple`
    /// toggles membership: add when absent, remove when present.
    pub fn toggle(&mut self, answer: &str) {
        match self {
            AnswerKey::Unique { correct_answers } => {
                *correct_answers = answer.to_owned();
            }
            AnswerKey::Multiple { correct_answers } => {
                if let Some(pos) = correct_answers.iter().position(|a| a == answer) {
                    correct_answers.remove(pos);
                } else {
                    correct_answers.push(answer.to_owned());
                }
            }
        }
    }
}

/// A single question of a quiz.
///
/// `answers` always holds between two and four entries; the builder ops
/// enforce the bounds. Correct answers refer to answer *text*, not position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(skip)]
    pub id: QuestionId,
    pub title: String,
    pub answers: Vec<String>,
    #[serde(flatten)]
    pub correct: AnswerKey,
}

impl Question {
    /// A blank single-choice question with the minimum two answer slots.
    pub fn new(id: QuestionId) -> Self {
        Self {
            id,
            title: String::new(),
            answers: vec![String::new(), String::new()],
            correct: AnswerKey::empty(QuestionType::Unique),
        }
    }

    /// The question type, read off the correct-answer payload.
    pub fn kind(&self) -> QuestionType {
        self.correct.kind()
    }
}

/// The quiz document authored by the builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_question_has_no_id() {
        let question = Question {
            id: 42,
            title: "Capital of France?".to_string(),
            answers: vec!["Paris".to_string(), "Lyon".to_string()],
            correct: AnswerKey::Unique {
                correct_answers: "Paris".to_string(),
            },
        };

        let value = serde_json::to_value(&question).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert_eq!(object["type"], "unique");
        assert_eq!(object["correct_answers"], "Paris");
    }

    #[test]
    fn test_multiple_question_round_trip() {
        let json = r#"{
            "title": "Select the vowels",
            "type": "multiple",
            "answers": ["A", "B", "E"],
            "correct_answers": ["A", "E"]
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.id, 0);
        assert_eq!(question.kind(), QuestionType::Multiple);
        assert_eq!(
            question.correct,
            AnswerKey::Multiple {
                correct_answers: vec!["A".to_string(), "E".to_string()],
            }
        );

        let out = serde_json::to_value(&question).unwrap();
        assert_eq!(out["type"], "multiple");
        assert_eq!(out["correct_answers"], serde_json::json!(["A", "E"]));
    }

    #[test]
    fn test_missing_correct_answers_defaults_to_empty() {
        let json = r#"{"title": "q", "type": "unique", "answers": ["a", "b"]}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert!(question.correct.is_empty());

        let json = r#"{"title": "q", "type": "multiple", "answers": ["a", "b"]}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert!(question.correct.is_empty());
    }

    #[test]
    fn test_unknown_type_tag_is_rejected() {
        let json = r#"{"title": "q", "type": "boolean", "answers": ["a", "b"]}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn test_toggle_unique_replaces() {
        let mut key = AnswerKey::empty(QuestionType::Unique);
        key.toggle("Paris");
        key.toggle("Lyon");
        assert_eq!(
            key,
            AnswerKey::Unique {
                correct_answers: "Lyon".to_string(),
            }
        );
    }

    #[test]
    fn test_toggle_multiple_is_idempotent_under_double_toggle() {
        let mut key = AnswerKey::Multiple {
            correct_answers: vec!["A".to_string()],
        };
        key.toggle("C");
        assert!(key.contains("A") && key.contains("C"));

        key.toggle("C");
        key.toggle("C");
        assert!(key.contains("C"));
        key.toggle("C");
        assert_eq!(
            key,
            AnswerKey::Multiple {
                correct_answers: vec!["A".to_string()],
            }
        );
    }
}
