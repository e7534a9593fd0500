mod quiz;

pub use quiz::{AnswerKey, Question, QuestionId, QuestionType, Quiz};
