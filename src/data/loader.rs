//! Quiz document loading from JSON files and the persistence slot.
//!
//! The wire format carries no question ids, so every successful load stamps
//! fresh session-local ids (a unix-millisecond base plus the question's
//! position) before handing the quiz to the rest of the app.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use thiserror::Error;

use crate::models::Quiz;
use crate::storage::{KeyValueStore, QUIZ_SLOT_KEY, StorageError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("the file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not a quiz document: it needs a non-empty title and a question list")]
    InvalidFormat,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Parses a quiz document and stamps fresh question ids.
///
/// The document must carry a non-empty string `title` and an array
/// `questions`; anything else is rejected as [`LoadError::InvalidFormat`]
/// before the questions themselves are decoded.
pub fn parse_quiz(text: &str) -> Result<Quiz, LoadError> {
    let value: Value = serde_json::from_str(text)?;

    let title_ok = matches!(value.get("title"), Some(Value::String(title)) if !title.is_empty());
    let questions_ok = matches!(value.get("questions"), Some(Value::Array(_)));
    if !title_ok || !questions_ok {
        return Err(LoadError::InvalidFormat);
    }

    let mut quiz: Quiz = serde_json::from_value(value).map_err(|err| {
        log::debug!("quiz document failed to decode: {err}");
        LoadError::InvalidFormat
    })?;
    let base = unix_millis();
    for (index, question) in quiz.questions.iter_mut().enumerate() {
        question.id = base + index as u64;
    }
    Ok(quiz)
}

pub fn load_quiz_from_path(path: &Path) -> Result<Quiz, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let quiz = parse_quiz(&text)?;
    log::info!("loaded quiz \"{}\" from {}", quiz.title, path.display());
    Ok(quiz)
}

/// Reads the hand-off slot. An absent slot is `Ok(None)`; a slot holding
/// data that no longer parses is an error.
pub fn load_stored_quiz(store: &dyn KeyValueStore) -> Result<Option<Quiz>, LoadError> {
    let Some(text) = store.get(QUIZ_SLOT_KEY)? else {
        return Ok(None);
    };
    Ok(Some(parse_quiz(&text)?))
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerKey, QuestionType};
    use crate::storage::MemoryStore;
    use std::io::Write;

    const CAPITALS: &str = r#"{
        "title": "Capitals",
        "description": "European capitals",
        "questions": [
            {
                "title": "Capital of France?",
                "answers": ["Paris", "Lyon"],
                "type": "unique",
                "correct_answers": "Paris"
            },
            {
                "title": "Which are in Italy?",
                "answers": ["Rome", "Madrid", "Milan"],
                "type": "multiple",
                "correct_answers": ["Rome", "Milan"]
            }
        ]
    }"#;

    #[test]
    fn test_parse_quiz_stamps_unique_ids() {
        let quiz = parse_quiz(CAPITALS).unwrap();
        assert_eq!(quiz.title, "Capitals");
        assert_eq!(quiz.questions.len(), 2);
        assert_ne!(quiz.questions[0].id, 0);
        assert_eq!(quiz.questions[1].id, quiz.questions[0].id + 1);
        assert_eq!(quiz.questions[0].kind(), QuestionType::Unique);
        assert_eq!(
            quiz.questions[1].correct,
            AnswerKey::Multiple {
                correct_answers: vec!["Rome".to_string(), "Milan".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_quiz_accepts_an_empty_question_list() {
        let quiz = parse_quiz(r#"{"title": "Empty", "questions": []}"#).unwrap();
        assert!(quiz.questions.is_empty());
        assert_eq!(quiz.description, "");
    }

    #[test]
    fn test_parse_quiz_rejects_documents_without_a_title() {
        for text in [
            r#"{"questions": []}"#,
            r#"{"title": "", "questions": []}"#,
            r#"{"title": 42, "questions": []}"#,
        ] {
            assert!(matches!(parse_quiz(text), Err(LoadError::InvalidFormat)));
        }
    }

    #[test]
    fn test_parse_quiz_rejects_a_bad_question_list() {
        for text in [
            r#"{"title": "Capitals"}"#,
            r#"{"title": "Capitals", "questions": "none"}"#,
            r#"{"title": "Capitals", "questions": {}}"#,
        ] {
            assert!(matches!(parse_quiz(text), Err(LoadError::InvalidFormat)));
        }
    }

    #[test]
    fn test_parse_quiz_rejects_malformed_json() {
        assert!(matches!(parse_quiz("{not json"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_parse_quiz_rejects_a_broken_question() {
        // The list gate passes but the question itself cannot be decoded.
        let text = r#"{"title": "Capitals", "questions": [{"answers": []}]}"#;
        assert!(matches!(parse_quiz(text), Err(LoadError::InvalidFormat)));
    }

    #[test]
    fn test_load_quiz_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capitals.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(CAPITALS.as_bytes()).unwrap();

        let quiz = load_quiz_from_path(&path).unwrap();
        assert_eq!(quiz.title, "Capitals");

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_quiz_from_path(&missing),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn test_load_stored_quiz() {
        let mut store = MemoryStore::new();
        assert!(load_stored_quiz(&store).unwrap().is_none());

        let quiz = parse_quiz(CAPITALS).unwrap();
        crate::storage::store_quiz(&mut store, &quiz).unwrap();
        let restored = load_stored_quiz(&store).unwrap().unwrap();
        assert_eq!(restored.title, quiz.title);
        assert_eq!(restored.questions.len(), 2);

        store.set(QUIZ_SLOT_KEY, "{broken".to_string()).unwrap();
        assert!(load_stored_quiz(&store).is_err());
    }
}
