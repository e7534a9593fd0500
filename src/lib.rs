//! # quizforge
//!
//! Build multiple-choice quizzes in the terminal, play them in a shuffled
//! order, and pass them around as JSON files.
//!
//! The builder edits a single quiz document and exports it once it passes
//! validation; the player picks the quiz up from the persistence slot (or a
//! file), shuffles its questions once, and scores exact answers.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quizforge::{App, FileStore, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     let store = FileStore::open_default()?;
//!     let mut app = App::new(Box::new(store), ".".into());
//!     quizforge::run(&mut app)?;
//!     Ok(())
//! }
//! ```

mod app;
mod builder;
mod data;
mod models;
mod session;
mod storage;
mod ui;
mod validate;

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;

pub use app::{App, Focus, View};
pub use builder::{ExportError, MAX_ANSWERS, MIN_ANSWERS, QuizBuilder};
pub use data::{LoadError, load_quiz_from_path, load_stored_quiz, parse_quiz};
pub use models::{AnswerKey, Question, QuestionId, QuestionType, Quiz};
pub use session::{PlaySession, UserAnswer};
pub use storage::{
    FileStore, KeyValueStore, MemoryStore, QUIZ_SLOT_KEY, StorageError, save_to_slot, store_quiz,
};
pub use validate::{ValidationReport, quiz_valid};

/// Top-level error for running the application.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load the quiz: {0}")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Takes over the terminal and drives the app until the user quits.
pub fn run(app: &mut App) -> Result<(), QuizError> {
    let mut terminal = ratatui::init();
    let result = run_event_loop(&mut terminal, app);
    ratatui::restore();
    result
}

fn run_event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), QuizError> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_input(app, key);
        }
    }

    Ok(())
}

fn handle_input(app: &mut App, key: KeyEvent) {
    match app.view {
        View::Builder => handle_builder_input(app, key),
        View::Load => handle_load_input(app, key),
        View::Play => handle_play_input(app, key),
        View::Results => handle_results_input(app, key),
    }
}

fn handle_builder_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('n') => app.add_question(),
            KeyCode::Char('d') => app.delete_focused_question(),
            KeyCode::Char('a') => app.add_answer_to_focused(),
            KeyCode::Char('x') => app.delete_focused_answer(),
            KeyCode::Char('t') => app.toggle_focused_type(),
            KeyCode::Char('e') => app.export(),
            KeyCode::Char('p') => app.test_quiz(),
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Enter => match app.focus {
            Focus::Answer(..) => app.toggle_focused_correct(),
            _ => app.focus_next(),
        },
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

fn handle_load_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('q') {
            app.should_quit = true;
        }
        return;
    }

    match key.code {
        KeyCode::Enter => app.load_from_input(),
        KeyCode::Esc => app.back_to_builder(),
        KeyCode::Char(c) => {
            app.clear_load_error();
            app.load_input_push(c);
        }
        KeyCode::Backspace => {
            app.clear_load_error();
            app.load_input_pop();
        }
        _ => {}
    }
}

fn handle_play_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_answer(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Char('f') => app.finish_quiz(),
        KeyCode::Esc => app.back_to_builder(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_results_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.new_quiz(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}
