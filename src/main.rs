use std::io;
use std::process::ExitCode;
use vocab_quiz::cli::{CliInterface, Command, browse_words, display_categories, parse_cli};
use vocab_quiz::game_state::{GameOutcome, GameSummary, game_loop};
use vocab_quiz::logging::{LogTarget, init_logging};
use vocab_quiz::progress::{ProgressStore, data_dir, default_progress_path};
use vocab_quiz::tui::TuiInterface;
use vocab_quiz::word_source::{LocalSession, LocalWordSource, WordSource, resolve_category};
use vocab_quiz::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};
use vocab_quiz::{QuizError, SessionProvider};

const LOG_FILE: &str = "vocab-quiz.log";

fn main() -> ExitCode {
    let cli = parse_cli();

    let log_path = data_dir().map(|dir| dir.join(LOG_FILE));
    match (&cli.command, log_path.as_deref()) {
        (Command::Play { tui: true, .. }, Some(path)) => init_logging(LogTarget::File(path)),
        _ => init_logging(LogTarget::Stderr),
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: vocab_quiz::cli::Cli) -> Result<(), QuizError> {
    let bank = match &cli.wordbank_path {
        Some(path) => load_wordbank_from_file(path)?,
        None => load_wordbank_from_str(EMBEDDED_WORDBANK)?,
    };
    let progress = match cli.progress_path.clone().or_else(default_progress_path) {
        Some(path) => ProgressStore::open(path)?,
        None => {
            log::warn!("No data directory available; progress will not be saved");
            ProgressStore::in_memory()
        }
    };
    let mut source = LocalWordSource::new(bank, progress);
    let session = LocalSession::new(cli.user);

    match cli.command {
        Command::Categories => {
            display_categories(&source.list_categories()?);
        }
        Command::Words { category } => {
            let category = resolve_category(&source, &category)?;
            let mut out = io::stdout().lock();
            browse_words(&source, &category, &mut io::stdin().lock(), &mut out)?;
        }
        Command::Play { category, tui } => {
            let category = resolve_category(&source, &category)?;
            let summary = if tui {
                let mut interface = TuiInterface::new()?;
                game_loop(&mut source, &session, &category, &mut interface)?
            } else {
                let mut interface = CliInterface::new(io::stdin().lock());
                game_loop(&mut source, &session, &category, &mut interface)?
            };
            display_summary(&summary);
        }
        Command::Reset { category } => {
            let category = resolve_category(&source, &category)?;
            let user = session.current_user_id().ok_or(QuizError::NotSignedIn)?;
            source.delete_progress(category.id, &user)?;
            println!("Progress in {} has been reset.", category.name);
        }
    }
    Ok(())
}

fn display_summary(summary: &GameSummary) {
    if summary.outcome == GameOutcome::EmptyCategory {
        return;
    }
    println!(
        "Solved {} word{} using {} hint{}.",
        summary.solved,
        if summary.solved == 1 { "" } else { "s" },
        summary.hints_used,
        if summary.hints_used == 1 { "" } else { "s" },
    );
}
