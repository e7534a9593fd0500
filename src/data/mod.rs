mod loader;

pub use loader::{LoadError, load_quiz_from_path, load_stored_quiz, parse_quiz};
