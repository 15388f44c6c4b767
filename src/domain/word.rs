use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BoxError, Result};

/// Step value of a word that has not been introduced yet
pub const STEP_UNSEEN: i64 = -1;
/// Step value of an introduced word that has not been answered correctly yet
pub const STEP_FRESH: i64 = 0;

/// Stable identifier assigned by the store at import (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub u64);

impl std::fmt::Display for WordId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
  #[serde(rename = "_id")]
  pub id: WordId,
  /// Source term (the expected answer)
  pub word: String,
  /// Translated term shown as the prompt
  pub translate: String,
  /// -1 = unseen, 0 = fresh, n = answered correctly n times in a row
  pub step: i64,
  /// Earliest instant at which the word may be asked again
  pub date: DateTime<Utc>,
  /// How many times the word has been presented
  pub queried: u32,
  #[serde(default)]
  pub tags: Vec<String>,
}

impl Word {
  pub fn is_unseen(&self) -> bool {
    self.step == STEP_UNSEEN
  }

  pub fn is_introduced(&self) -> bool {
    self.step >= STEP_FRESH
  }

  /// Introduced and past its due date
  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.is_introduced() && self.date <= now
  }

  /// An empty tag matches every word.
  pub fn has_tag(&self, tag: &str) -> bool {
    tag.is_empty() || self.tags.iter().any(|t| t == tag)
  }
}

/// Import record as supplied by a word list.
///
/// Only `translate` is required; the store assigns the id and defaults the
/// scheduling fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewWord {
  #[serde(default)]
  pub word: String,
  #[serde(default)]
  pub translate: Option<String>,
  #[serde(default)]
  pub step: Option<i64>,
  #[serde(default)]
  pub date: Option<DateTime<Utc>>,
  #[serde(default)]
  pub tags: Vec<String>,
}

impl NewWord {
  pub fn new(word: impl Into<String>, translate: impl Into<String>) -> Self {
    Self {
      word: word.into(),
      translate: Some(translate.into()),
      ..Self::default()
    }
  }

  pub fn with_step(mut self, step: i64) -> Self {
    self.step = Some(step);
    self
  }

  pub fn with_tags<I, S>(mut self, tags: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.tags = tags.into_iter().map(Into::into).collect();
    self
  }

  /// Check the record before it enters the store. `position` is the 0-based
  /// index in the import list, used only for the error message.
  pub fn validate(&self, position: usize) -> Result<()> {
    match self.translate.as_deref() {
      Some(t) if !t.trim().is_empty() => {}
      _ => {
        return Err(BoxError::InvalidInput(format!(
          "record {} has no translatable term",
          position
        )));
      }
    }

    if let Some(step) = self.step {
      if step < STEP_UNSEEN {
        return Err(BoxError::InvalidInput(format!(
          "record {} has step {} (minimum is {})",
          position, step, STEP_UNSEEN
        )));
      }
    }

    Ok(())
  }

  /// Build the stored record. Callers must have run `validate` first.
  pub(crate) fn into_word(self, id: WordId) -> Word {
    Word {
      id,
      word: self.word,
      translate: self.translate.unwrap_or_default(),
      step: self.step.unwrap_or(STEP_UNSEEN),
      date: self.date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
      queried: 0,
      tags: self.tags,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn word(step: i64, date: DateTime<Utc>) -> Word {
    Word {
      id: WordId(1),
      word: "Hund".to_string(),
      translate: "dog".to_string(),
      step,
      date,
      queried: 0,
      tags: vec!["animals".to_string()],
    }
  }

  #[test]
  fn test_unseen_word_is_never_due() {
    let w = word(STEP_UNSEEN, DateTime::<Utc>::UNIX_EPOCH);
    assert!(w.is_unseen());
    assert!(!w.is_introduced());
    assert!(!w.is_due(Utc::now()));
  }

  #[test]
  fn test_fresh_word_with_epoch_date_is_due() {
    let w = word(STEP_FRESH, DateTime::<Utc>::UNIX_EPOCH);
    assert!(w.is_due(Utc::now()));
  }

  #[test]
  fn test_future_date_is_not_due() {
    let now = Utc::now();
    let w = word(2, now + Duration::minutes(1));
    assert!(!w.is_due(now));
    assert!(w.is_due(now + Duration::minutes(1)));
  }

  #[test]
  fn test_has_tag() {
    let w = word(0, Utc::now());
    assert!(w.has_tag("animals"));
    assert!(w.has_tag(""));
    assert!(!w.has_tag("food"));
  }

  #[test]
  fn test_new_word_defaults() {
    let w = NewWord::new("Hund", "dog").into_word(WordId(5));
    assert_eq!(w.id, WordId(5));
    assert_eq!(w.step, STEP_UNSEEN);
    assert_eq!(w.date, DateTime::<Utc>::UNIX_EPOCH);
    assert_eq!(w.queried, 0);
    assert!(w.tags.is_empty());
  }

  #[test]
  fn test_validate_rejects_missing_translation() {
    let record = NewWord {
      word: "Hund".into(),
      ..NewWord::default()
    };
    assert!(matches!(record.validate(3), Err(BoxError::InvalidInput(_))));
  }

  #[test]
  fn test_validate_rejects_blank_translation() {
    let record = NewWord::new("Hund", "   ");
    assert!(record.validate(0).is_err());
  }

  #[test]
  fn test_validate_rejects_step_below_unseen() {
    let record = NewWord::new("Hund", "dog").with_step(-2);
    assert!(record.validate(0).is_err());
  }

  #[test]
  fn test_new_word_from_minimal_json() {
    let record: NewWord = serde_json::from_str(r#"{"translate": "dog"}"#).unwrap();
    assert!(record.validate(0).is_ok());
    assert_eq!(record.word, "");
    assert!(record.step.is_none());
  }

  #[test]
  fn test_word_serializes_id_as_underscore_id() {
    let json = serde_json::to_value(word(1, DateTime::<Utc>::UNIX_EPOCH)).unwrap();
    assert_eq!(json["_id"], 1);
    assert_eq!(json["translate"], "dog");
  }
}
