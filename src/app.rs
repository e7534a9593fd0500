//! Root application state: one flat struct driving the four screens.

use std::path::{Path, PathBuf};

use crate::builder::QuizBuilder;
use crate::data;
use crate::models::{QuestionId, QuestionType, Quiz};
use crate::session::PlaySession;
use crate::storage::{self, KeyValueStore};
use crate::validate::ValidationReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Builder,
    Load,
    Play,
    Results,
}

/// Which builder field currently receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    QuizTitle,
    QuizDescription,
    QuestionTitle(QuestionId),
    Answer(QuestionId, usize),
}

pub struct App {
    pub view: View,
    pub focus: Focus,
    pub builder: QuizBuilder,
    pub load_input: String,
    pub load_error: Option<String>,
    /// The quiz currently being played, kept for the header.
    pub quiz: Option<Quiz>,
    pub session: Option<PlaySession>,
    pub selected_option: usize,
    pub status: Option<String>,
    pub should_quit: bool,
    store: Box<dyn KeyValueStore>,
    out_dir: PathBuf,
}

impl App {
    pub fn new(store: Box<dyn KeyValueStore>, out_dir: PathBuf) -> Self {
        Self {
            view: View::Builder,
            focus: Focus::QuizTitle,
            builder: QuizBuilder::new(),
            load_input: String::new(),
            load_error: None,
            quiz: None,
            session: None,
            selected_option: 0,
            status: None,
            should_quit: false,
            store,
            out_dir,
        }
    }

    pub fn validation(&self) -> ValidationReport {
        ValidationReport::for_quiz(self.builder.quiz())
    }

    // --- builder: focus movement ---

    /// Flat field order: quiz title, description, then per question its
    /// title followed by its answer rows.
    fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::QuizTitle, Focus::QuizDescription];
        for question in &self.builder.quiz().questions {
            order.push(Focus::QuestionTitle(question.id));
            for index in 0..question.answers.len() {
                order.push(Focus::Answer(question.id, index));
            }
        }
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let position = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(position + 1) % order.len()];
    }

    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let position = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(position + order.len() - 1) % order.len()];
    }

    fn focused_question_id(&self) -> Option<QuestionId> {
        match self.focus {
            Focus::QuestionTitle(id) | Focus::Answer(id, _) => Some(id),
            _ => None,
        }
    }

    // --- builder: text editing ---

    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            Focus::QuizTitle => {
                let mut title = self.builder.quiz().title.clone();
                title.push(c);
                self.builder.set_title(title);
            }
            Focus::QuizDescription => {
                let mut description = self.builder.quiz().description.clone();
                description.push(c);
                self.builder.set_description(description);
            }
            Focus::QuestionTitle(id) => {
                if let Some(question) = self.builder.question(id) {
                    let mut title = question.title.clone();
                    title.push(c);
                    self.builder.update_question_title(id, title);
                }
            }
            Focus::Answer(id, index) => {
                if let Some(question) = self.builder.question(id)
                    && let Some(answer) = question.answers.get(index)
                {
                    let mut answer = answer.clone();
                    answer.push(c);
                    self.builder.update_answer(id, index, answer);
                }
            }
        }
        self.status = None;
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Focus::QuizTitle => {
                let mut title = self.builder.quiz().title.clone();
                title.pop();
                self.builder.set_title(title);
            }
            Focus::QuizDescription => {
                let mut description = self.builder.quiz().description.clone();
                description.pop();
                self.builder.set_description(description);
            }
            Focus::QuestionTitle(id) => {
                if let Some(question) = self.builder.question(id) {
                    let mut title = question.title.clone();
                    title.pop();
                    self.builder.update_question_title(id, title);
                }
            }
            Focus::Answer(id, index) => {
                if let Some(question) = self.builder.question(id)
                    && let Some(answer) = question.answers.get(index)
                {
                    let mut answer = answer.clone();
                    answer.pop();
                    self.builder.update_answer(id, index, answer);
                }
            }
        }
    }

    // --- builder: commands ---

    pub fn add_question(&mut self) {
        let id = self.builder.add_question();
        self.focus = Focus::QuestionTitle(id);
    }

    pub fn delete_focused_question(&mut self) {
        let Some(id) = self.focused_question_id() else {
            return;
        };
        self.builder.delete_question(id);
        self.focus = match self.builder.quiz().questions.last() {
            Some(question) => Focus::QuestionTitle(question.id),
            None => Focus::QuizTitle,
        };
    }

    pub fn add_answer_to_focused(&mut self) {
        if let Some(id) = self.focused_question_id() {
            self.builder.add_answer(id);
        }
    }

    pub fn delete_focused_answer(&mut self) {
        let Focus::Answer(id, index) = self.focus else {
            return;
        };
        self.builder.delete_answer(id, index);
        if let Some(question) = self.builder.question(id)
            && index >= question.answers.len()
        {
            self.focus = Focus::Answer(id, question.answers.len() - 1);
        }
    }

    /// Marks the focused answer row correct (or unmarks it). Blank rows
    /// cannot be marked, so an empty string never becomes a correct answer.
    pub fn toggle_focused_correct(&mut self) {
        let Focus::Answer(id, index) = self.focus else {
            return;
        };
        let Some(question) = self.builder.question(id) else {
            return;
        };
        let Some(answer) = question.answers.get(index) else {
            return;
        };
        if answer.is_empty() {
            return;
        }
        let answer = answer.clone();
        self.builder.toggle_correct_answer(id, &answer);
    }

    pub fn toggle_focused_type(&mut self) {
        let Some(id) = self.focused_question_id() else {
            return;
        };
        let Some(question) = self.builder.question(id) else {
            return;
        };
        let next = match question.kind() {
            QuestionType::Unique => QuestionType::Multiple,
            QuestionType::Multiple => QuestionType::Unique,
        };
        self.builder.change_question_type(id, next);
    }

    /// Exports the built quiz to `<out_dir>/<slug>.json` once the
    /// validation report passes.
    pub fn export(&mut self) {
        if !self.validation().is_valid() {
            return;
        }
        let out_dir = self.out_dir.clone();
        match self.builder.export_quiz(self.store.as_mut(), &out_dir) {
            Ok(path) => self.status = Some(format!("Exported to {}", path.display())),
            Err(err) => self.status = Some(format!("Export failed: {err}")),
        }
    }

    /// Hands the built quiz off to the player: stores it when it has a title
    /// and at least one question, then enters the play flow either way.
    pub fn test_quiz(&mut self) {
        let quiz = self.builder.quiz();
        if !quiz.title.is_empty() && !quiz.questions.is_empty() {
            if let Err(err) = self.builder.store_quiz(self.store.as_mut()) {
                log::warn!("could not store the quiz for testing: {err}");
            }
        }
        self.start_play();
    }

    // --- play flow ---

    /// Entry into the player. Plays the stored quiz when the slot holds
    /// one; otherwise falls to the load screen, with an inline message when
    /// the slot is unreadable.
    pub fn start_play(&mut self) {
        match data::load_stored_quiz(self.store.as_ref()) {
            Ok(Some(quiz)) => self.begin_session(quiz),
            Ok(None) => {
                self.view = View::Load;
                self.load_error = None;
            }
            Err(err) => {
                log::warn!("stored quiz could not be loaded: {err}");
                self.view = View::Load;
                self.load_error = Some(err.to_string());
            }
        }
    }

    /// Loads a quiz file straight away, as if it had been typed into the
    /// load screen.
    pub fn start_play_with_file(&mut self, path: &Path) {
        self.load_input = path.display().to_string();
        self.load_file(path);
    }

    pub fn load_from_input(&mut self) {
        let path = PathBuf::from(self.load_input.trim());
        self.load_file(&path);
    }

    pub fn load_input_push(&mut self, c: char) {
        self.load_input.push(c);
    }

    pub fn load_input_pop(&mut self) {
        self.load_input.pop();
    }

    pub fn clear_load_error(&mut self) {
        self.load_error = None;
    }

    fn load_file(&mut self, path: &Path) {
        match data::load_quiz_from_path(path) {
            Ok(quiz) => {
                // A loaded file also becomes the stored quiz.
                if let Err(err) = storage::save_to_slot(self.store.as_mut(), &quiz) {
                    log::warn!("could not persist the loaded quiz: {err}");
                }
                self.load_error = None;
                self.begin_session(quiz);
            }
            Err(err) => {
                self.view = View::Load;
                self.load_error = Some(err.to_string());
            }
        }
    }

    fn begin_session(&mut self, quiz: Quiz) {
        self.session = Some(PlaySession::new(&quiz));
        self.quiz = Some(quiz);
        self.selected_option = 0;
        self.view = View::Play;
    }

    fn current_option_count(&self) -> Option<usize> {
        let session = self.session.as_ref()?;
        let question = session.current_question()?;
        let count = question.answers.len();
        (count > 0).then_some(count)
    }

    pub fn select_next_option(&mut self) {
        if let Some(count) = self.current_option_count() {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        if let Some(count) = self.current_option_count() {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// Records the highlighted option as the answer to the current question.
    pub fn select_answer(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(question) = session.current_question() else {
            return;
        };
        let Some(answer) = question.answers.get(self.selected_option).cloned() else {
            return;
        };
        session.select_answer(&answer);
    }

    pub fn next_question(&mut self) {
        if let Some(session) = self.session.as_mut()
            && session.can_proceed()
        {
            session.next_question();
            self.selected_option = 0;
        }
    }

    pub fn previous_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.previous_question();
            self.selected_option = 0;
        }
    }

    pub fn finish_quiz(&mut self) {
        if let Some(session) = self.session.as_mut()
            && session.is_last_question()
            && (session.can_proceed() || session.total_questions() == 0)
        {
            session.finish_quiz();
            self.view = View::Results;
        }
    }

    // --- results ---

    /// Replays the same session: answers cleared, question order kept.
    pub fn restart(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reset_quiz();
            self.selected_option = 0;
            self.view = View::Play;
        }
    }

    /// Back to an empty builder.
    pub fn new_quiz(&mut self) {
        self.builder = QuizBuilder::new();
        self.focus = Focus::QuizTitle;
        self.quiz = None;
        self.session = None;
        self.status = None;
        self.view = View::Builder;
    }

    pub fn back_to_builder(&mut self) {
        self.view = View::Builder;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, QUIZ_SLOT_KEY};
    use std::fs;

    fn memory_app() -> App {
        App::new(Box::new(MemoryStore::new()), PathBuf::from("."))
    }

    /// Builds a minimal valid quiz through the app surface.
    fn build_capitals(app: &mut App) {
        for c in "Capitals".chars() {
            app.insert_char(c);
        }
        app.add_question();
        for c in "Capital of France?".chars() {
            app.insert_char(c);
        }
        app.focus_next();
        for c in "Paris".chars() {
            app.insert_char(c);
        }
        app.toggle_focused_correct();
        app.focus_next();
        for c in "Lyon".chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn test_new_app_opens_the_builder() {
        let app = memory_app();
        assert_eq!(app.view, View::Builder);
        assert_eq!(app.focus, Focus::QuizTitle);
        assert!(app.builder.quiz().questions.is_empty());
    }

    #[test]
    fn test_typing_edits_the_focused_field() {
        let mut app = memory_app();
        app.insert_char('H');
        app.insert_char('i');
        app.backspace();
        assert_eq!(app.builder.quiz().title, "H");

        app.focus_next();
        assert_eq!(app.focus, Focus::QuizDescription);
        app.insert_char('d');
        assert_eq!(app.builder.quiz().description, "d");
    }

    #[test]
    fn test_focus_cycles_through_every_field() {
        let mut app = memory_app();
        app.add_question();
        let id = app.builder.quiz().questions[0].id;
        assert_eq!(app.focus, Focus::QuestionTitle(id));

        // title, description, question title, two answers
        app.focus = Focus::QuizTitle;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(app.focus);
            app.focus_next();
        }
        assert_eq!(
            seen,
            vec![
                Focus::QuizTitle,
                Focus::QuizDescription,
                Focus::QuestionTitle(id),
                Focus::Answer(id, 0),
                Focus::Answer(id, 1),
            ]
        );
        assert_eq!(app.focus, Focus::QuizTitle);

        app.focus_prev();
        assert_eq!(app.focus, Focus::Answer(id, 1));
    }

    #[test]
    fn test_delete_focused_question_repairs_focus() {
        let mut app = memory_app();
        app.add_question();
        app.add_question();
        let first = app.builder.quiz().questions[0].id;

        app.delete_focused_question();
        assert_eq!(app.focus, Focus::QuestionTitle(first));

        app.delete_focused_question();
        assert_eq!(app.focus, Focus::QuizTitle);
        assert!(app.builder.quiz().questions.is_empty());
    }

    #[test]
    fn test_delete_focused_answer_clamps_focus() {
        let mut app = memory_app();
        app.add_question();
        let id = app.builder.quiz().questions[0].id;
        app.add_answer_to_focused();
        app.focus = Focus::Answer(id, 2);

        app.delete_focused_answer();
        assert_eq!(app.builder.question(id).unwrap().answers.len(), 2);
        assert_eq!(app.focus, Focus::Answer(id, 1));
    }

    #[test]
    fn test_blank_answers_cannot_be_marked_correct() {
        let mut app = memory_app();
        app.add_question();
        let id = app.builder.quiz().questions[0].id;
        app.focus = Focus::Answer(id, 0);

        app.toggle_focused_correct();
        assert!(app.builder.question(id).unwrap().correct.is_empty());

        app.insert_char('A');
        app.toggle_focused_correct();
        assert!(app.builder.question(id).unwrap().correct.contains("A"));
    }

    #[test]
    fn test_toggle_focused_type_switches_and_resets() {
        let mut app = memory_app();
        app.add_question();
        let id = app.builder.quiz().questions[0].id;
        app.focus = Focus::Answer(id, 0);
        app.insert_char('A');
        app.toggle_focused_correct();

        app.toggle_focused_type();
        let question = app.builder.question(id).unwrap();
        assert_eq!(question.kind(), QuestionType::Multiple);
        assert!(question.correct.is_empty());
    }

    #[test]
    fn test_export_is_gated_by_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(Box::new(MemoryStore::new()), dir.path().to_path_buf());

        app.export();
        assert_eq!(app.status, None);

        build_capitals(&mut app);
        app.export();
        let status = app.status.clone().unwrap();
        assert!(status.starts_with("Exported to"));
        assert!(dir.path().join("capitals.json").exists());
    }

    #[test]
    fn test_test_quiz_stores_and_enters_play() {
        let mut app = memory_app();
        build_capitals(&mut app);

        app.test_quiz();
        assert_eq!(app.view, View::Play);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.total_questions(), 1);
        assert_eq!(app.quiz.as_ref().unwrap().title, "Capitals");
    }

    #[test]
    fn test_test_quiz_without_a_title_lands_on_the_load_screen() {
        let mut app = memory_app();
        app.add_question();

        app.test_quiz();
        assert_eq!(app.view, View::Load);
        assert!(app.session.is_none());
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_start_play_with_a_corrupt_slot_shows_the_error() {
        let mut store = MemoryStore::new();
        store.set(QUIZ_SLOT_KEY, "{broken".to_string()).unwrap();
        let mut app = App::new(Box::new(store), PathBuf::from("."));

        app.start_play();
        assert_eq!(app.view, View::Load);
        assert!(app.load_error.is_some());
    }

    #[test]
    fn test_load_from_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capitals.json");
        fs::write(
            &path,
            r#"{"title": "Capitals", "questions": [
                {"title": "Capital of France?", "answers": ["Paris", "Lyon"],
                 "type": "unique", "correct_answers": "Paris"}
            ]}"#,
        )
        .unwrap();

        let mut app = memory_app();
        app.view = View::Load;
        app.load_input = path.display().to_string();
        app.load_from_input();

        assert_eq!(app.view, View::Play);
        assert!(app.load_error.is_none());

        // The miss keeps the view and reports inline.
        let mut app = memory_app();
        app.view = View::Load;
        app.load_input = dir.path().join("missing.json").display().to_string();
        app.load_from_input();
        assert_eq!(app.view, View::Load);
        assert!(app.load_error.is_some());
    }

    #[test]
    fn test_play_through_to_results() {
        let mut app = memory_app();
        build_capitals(&mut app);
        app.test_quiz();

        // Finish is refused until an answer is picked.
        app.finish_quiz();
        assert_eq!(app.view, View::Play);

        // Highlight "Paris" whatever the display order and pick it.
        let session = app.session.as_ref().unwrap();
        let position = session
            .current_question()
            .unwrap()
            .answers
            .iter()
            .position(|a| a == "Paris")
            .unwrap();
        for _ in 0..position {
            app.select_next_option();
        }
        app.select_answer();
        app.finish_quiz();

        assert_eq!(app.view, View::Results);
        assert_eq!(app.session.as_ref().unwrap().score(), 100);
    }

    #[test]
    fn test_restart_and_new_quiz_from_results() {
        let mut app = memory_app();
        build_capitals(&mut app);
        app.test_quiz();
        app.select_answer();
        app.finish_quiz();
        assert_eq!(app.view, View::Results);

        app.restart();
        assert_eq!(app.view, View::Play);
        let session = app.session.as_ref().unwrap();
        assert!(!session.is_finished());
        assert_eq!(session.current_index(), 0);

        app.new_quiz();
        assert_eq!(app.view, View::Builder);
        assert!(app.builder.quiz().questions.is_empty());
        assert!(app.session.is_none());
    }
}
