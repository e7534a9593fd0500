use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quizforge::{App, FileStore, QuizError};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a quiz and export it as a JSON file
    Build {
        /// Directory exported quiz files are written to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Play the stored quiz, or a quiz file
    Play {
        /// Quiz JSON file to load instead of the stored quiz
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), QuizError> {
    let store = FileStore::open_default()?;
    let command = args.command.unwrap_or(Command::Build {
        out: PathBuf::from("."),
    });

    match command {
        Command::Build { out } => {
            let mut app = App::new(Box::new(store), out);
            quizforge::run(&mut app)
        }
        Command::Play { file } => {
            let mut app = App::new(Box::new(store), PathBuf::from("."));
            match file {
                Some(path) => app.start_play_with_file(&path),
                None => app.start_play(),
            }
            quizforge::run(&mut app)
        }
    }
}
