//! The question box: review pool, question selection and answer outcomes.
//!
//! The box owns its store, so every operation reads, decides and writes back
//! before returning. A question handed out by [`BoxOfQuestions::question`]
//! stays pending until it is moved forward or backwards.

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;

use crate::db::WordStore;
use crate::domain::{
  Answer, BoxStatus, NewWord, Question, QuestionMode, STEP_FRESH, STEP_UNSEEN, Settings, Word, WordId,
};
use crate::error::{BoxError, Result};

use super::{leitner, selector};

pub struct BoxOfQuestions<S: WordStore> {
  db: S,
  /// Id of the last question handed out and not yet answered
  pending: Option<WordId>,
  rng: StdRng,
}

impl<S: WordStore> BoxOfQuestions<S> {
  pub fn new(db: S) -> Self {
    Self {
      db,
      pending: None,
      rng: StdRng::from_os_rng(),
    }
  }

  /// Box with a reproducible question order
  pub fn with_seed(db: S, seed: u64) -> Self {
    Self {
      db,
      pending: None,
      rng: StdRng::seed_from_u64(seed),
    }
  }

  pub fn name(&self) -> &str {
    self.db.name()
  }

  pub fn db(&self) -> &S {
    &self.db
  }

  /// Direct store access. The pending question is kept; it is re-read from
  /// the store when answered.
  pub fn db_mut(&mut self) -> &mut S {
    &mut self.db
  }

  pub fn into_inner(self) -> S {
    self.db
  }

  pub fn settings(&self) -> Settings {
    self.db.get_settings()
  }

  /// Validate and replace the store's settings
  pub fn config(&mut self, settings: Settings) -> Result<()> {
    self.db.put_settings(settings)
  }

  /// Load a word list and apply `defaultInitialStepValue` to every record
  /// that did not bring its own step.
  pub fn import_from(&mut self, words: Vec<NewWord>) -> Result<Vec<WordId>> {
    let settings = self.db.get_settings();
    let explicit: Vec<bool> = words.iter().map(|w| w.step.is_some()).collect();
    let ids = self.db.load_words(words)?;

    let initial_step = settings.default_initial_step_value;
    if initial_step != STEP_UNSEEN {
      let now = Utc::now();
      for (id, has_step) in ids.iter().zip(explicit) {
        if has_step {
          continue;
        }
        let mut word = self.db.get_word(*id)?;
        word.step = initial_step;
        word.date = now;
        self.db.put_word(word);
      }
    }

    tracing::info!("{}: imported {} words", self.db.name(), ids.len());
    Ok(ids)
  }

  /// Introduced words whose date has passed
  pub fn words_to_review(&self) -> Vec<Word> {
    let now = Utc::now();
    self.db.all_words().into_iter().filter(|w| w.is_due(now)).collect()
  }

  /// Words with `min <= step <= max`; only `step == min` when `max` is None
  pub fn words_with_step_value(&self, min: i64, max: Option<i64>) -> Vec<Word> {
    let max = max.unwrap_or(min);
    self
      .db
      .all_words()
      .into_iter()
      .filter(|w| (min..=max).contains(&w.step))
      .collect()
  }

  /// Words carrying `tag`; every word when the tag is absent or empty
  pub fn all_words_filtered_by_tag(&self, tag: Option<&str>) -> Vec<Word> {
    let tag = tag.unwrap_or("");
    self.db.all_words().into_iter().filter(|w| w.has_tag(tag)).collect()
  }

  /// Move up to `count` unseen words (default: the session size) into
  /// rotation, oldest first. Returns how many were moved.
  pub fn add_more_words_for_learning(&mut self, count: Option<usize>) -> usize {
    let count = count.unwrap_or_else(|| self.db.get_settings().suggested_number_of_words_in_a_session);
    let now = Utc::now();

    let unseen: Vec<Word> = self
      .db
      .all_words()
      .into_iter()
      .filter(|w| w.is_unseen())
      .take(count)
      .collect();
    let added = unseen.len();

    for mut word in unseen {
      word.step = STEP_FRESH;
      word.date = now;
      self.db.put_word(word);
    }

    tracing::info!("{}: {} words added for learning", self.db.name(), added);
    added
  }

  fn candidates(&self, tag: &str, mode: QuestionMode) -> Vec<Word> {
    let now = Utc::now();
    self
      .db
      .all_words()
      .into_iter()
      .filter(|w| w.has_tag(tag))
      .filter(|w| match mode {
        QuestionMode::Review => w.is_due(now),
        QuestionMode::Practice => w.is_introduced(),
      })
      .collect()
  }

  /// Next question, or None when nothing is left to ask.
  ///
  /// While a question is pending and still eligible it is returned again.
  pub fn question(&mut self, tag: Option<&str>, mode: QuestionMode) -> Option<Question> {
    let tag = tag.unwrap_or("");
    let candidates = self.candidates(tag, mode);

    if let Some(id) = self.pending {
      if let Some(word) = candidates.iter().find(|w| w.id == id) {
        return Some(Question::from(word));
      }
    }

    let Ok(word) = selector::choose_random_object(&candidates, &mut self.rng) else {
      self.pending = None;
      tracing::debug!("{}: no {} questions left", self.db.name(), mode.as_str());
      return None;
    };

    tracing::debug!(
      "{}: question {} (step {}) from {} candidates",
      self.db.name(),
      word.id,
      word.step,
      candidates.len()
    );
    self.pending = Some(word.id);
    Some(Question::from(word))
  }

  pub fn pending_question(&self) -> Option<WordId> {
    self.pending
  }

  /// Answer side of the current question (issuing one if none is pending).
  /// The word is not moved. `Ok(None)` means nothing is left to ask.
  pub fn answer(&mut self, tag: Option<&str>, mode: QuestionMode) -> Result<Option<Answer>> {
    let Some(question) = self.question(tag, mode) else {
      return Ok(None);
    };
    let word = self.db.get_word(question.id)?;
    Ok(Some(Answer::from(&word)))
  }

  /// Correct answer for the pending question: one step up, later due date.
  pub fn move_question_forward(&mut self) -> Result<Word> {
    let id = self.pending.take().ok_or(BoxError::NoPendingQuestion)?;
    let settings = self.db.get_settings();
    let mut word = self.db.get_word(id)?;

    let result = leitner::advance(word.step, &settings, Utc::now())?;
    word.step = result.step;
    word.date = result.next_review;
    word.queried += 1;
    self.db.put_word(word.clone());

    tracing::debug!("{}: word {} forward to step {}", self.db.name(), id, word.step);
    Ok(word)
  }

  /// Wrong answer for the pending question: back to step 0, due again soon.
  pub fn move_question_backwards(&mut self) -> Result<Word> {
    let id = self.pending.take().ok_or(BoxError::NoPendingQuestion)?;
    let settings = self.db.get_settings();
    let mut word = self.db.get_word(id)?;

    let result = leitner::reset(&settings, Utc::now())?;
    word.step = result.step;
    word.date = result.next_review;
    word.queried += 1;
    self.db.put_word(word.clone());

    tracing::debug!("{}: word {} back to step {}", self.db.name(), id, word.step);
    Ok(word)
  }

  pub fn answer_was_correct(&mut self) -> Result<Word> {
    self.move_question_forward()
  }

  pub fn answer_was_wrong(&mut self) -> Result<Word> {
    self.move_question_backwards()
  }

  pub fn choose_random_object<'a, T>(&mut self, collection: &'a [T]) -> Result<&'a T> {
    selector::choose_random_object(collection, &mut self.rng)
  }

  /// Multiple choice options for the pending question: the correct word plus
  /// `numberOfOptions - 1` distractors from the whole store.
  pub fn get_answer_options(&mut self) -> Result<Vec<Word>> {
    let id = self.pending.ok_or(BoxError::NoPendingQuestion)?;
    let correct = self.db.get_word(id)?;
    let count = self.db.get_settings().number_of_options;
    let all = self.db.all_words();
    selector::answer_options(&correct, &all, count, &mut self.rng)
  }

  pub fn status(&self) -> BoxStatus {
    let now = Utc::now();
    let mut status = BoxStatus {
      number_of_words: self.db.number_of_words(),
      ..BoxStatus::default()
    };
    let mut steps = BTreeMap::new();

    for word in self.db.all_words() {
      *steps.entry(word.step).or_insert(0) += 1;
      if word.is_unseen() {
        status.unseen += 1;
      } else {
        status.in_rotation += 1;
      }
      if word.is_due(now) {
        status.due += 1;
      }
    }

    status.steps = steps;
    status
  }
}
