use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordbox::config;
use wordbox::db::{WordDb, WordStore};
use wordbox::domain::{NewWord, QuestionMode};
use wordbox::error::LogOnError;
use wordbox::session::ReviewSession;
use wordbox::srs::BoxOfQuestions;
use wordbox::BoxError;

fn main() -> ExitCode {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "wordbox=info".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .init();

  let app_config = config::load_config();
  let list_path = std::env::args().nth(1).map(PathBuf::from).or(app_config.words.path);

  let records = match read_word_list(list_path.as_deref()) {
    Ok(records) => records,
    Err(e) => {
      tracing::error!("Failed to load word list: {}", e);
      return ExitCode::FAILURE;
    }
  };

  let mut lw = BoxOfQuestions::new(WordDb::new("wordbox"));
  if let Err(e) = lw.config(app_config.settings) {
    tracing::warn!("Keeping default settings: {}", e);
  }
  if let Err(e) = lw.import_from(records) {
    tracing::error!("Failed to import word list: {}", e);
    return ExitCode::FAILURE;
  }

  if lw.words_to_review().is_empty() {
    lw.add_more_words_for_learning(None);
  }

  match run_session(&mut lw) {
    Ok(()) => {
      let status = lw.status();
      println!(
        "\n{} words: {} in rotation, {} unseen, {} due now",
        status.number_of_words, status.in_rotation, status.unseen, status.due
      );
      ExitCode::SUCCESS
    }
    Err(e) => {
      tracing::error!("Session aborted: {}", e);
      ExitCode::FAILURE
    }
  }
}

fn read_word_list(path: Option<&Path>) -> Result<Vec<NewWord>, BoxError> {
  let json = match path {
    Some(path) => {
      tracing::info!("Using word list {}", path.display());
      std::fs::read_to_string(path)
        .map_err(|e| BoxError::InvalidInput(format!("{}: {}", path.display(), e)))?
    }
    None => {
      tracing::info!("Using bundled word list");
      config::BUNDLED_WORD_LIST.to_string()
    }
  };
  Ok(serde_json::from_str(&json)?)
}

/// Ask multiple choice questions until the session is complete, the pool is
/// empty, or stdin closes.
fn run_session<S: WordStore>(lw: &mut BoxOfQuestions<S>) -> Result<(), BoxError> {
  let mut session = ReviewSession::new(&lw.settings());
  let stdin = io::stdin();
  let mut lines = stdin.lock().lines();

  while !session.is_complete(Utc::now()) {
    let Some(question) = lw.question(None, QuestionMode::Review) else {
      println!("Nothing left to review.");
      break;
    };

    let options = match lw.get_answer_options() {
      Ok(options) => options,
      Err(e) => {
        println!("{}", e.user_message());
        break;
      }
    };

    println!("\n{}  (step {})", question.translate, question.step);
    for (i, option) in options.iter().enumerate() {
      println!("  {}) {}", i + 1, option.word);
    }
    print!("> ");
    io::stdout().flush().log_warn("flush stdout");

    let Some(Ok(line)) = lines.next() else {
      break;
    };
    let line = line.trim();
    if line.is_empty() || line == "q" {
      break;
    }

    let chosen = line
      .parse::<usize>()
      .ok()
      .and_then(|n| n.checked_sub(1))
      .and_then(|i| options.get(i));
    let correct = chosen.is_some_and(|w| w.id == question.id);

    if correct {
      lw.move_question_forward()?;
      println!("Correct.");
    } else {
      let moved = lw.move_question_backwards()?;
      println!("Wrong, it was: {}", moved.word);
    }
    session.record(correct);
  }

  let summary = session.summary();
  println!(
    "\nSession: {} asked, {} correct, {} wrong",
    summary.asked, summary.correct, summary.wrong
  );
  Ok(())
}
