use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Word, WordId};

/// Which words a question may be drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionMode {
  /// Introduced words that are due
  #[default]
  Review,
  /// Any introduced word, due or not
  Practice,
}

impl QuestionMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Review => "review",
      Self::Practice => "practice",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "review" => Some(Self::Review),
      "practice" => Some(Self::Practice),
      _ => None,
    }
  }
}

/// Prompt side of the pending word
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
  #[serde(rename = "_id")]
  pub id: WordId,
  pub translate: String,
  pub step: i64,
  pub date: DateTime<Utc>,
}

impl From<&Word> for Question {
  fn from(word: &Word) -> Self {
    Self {
      id: word.id,
      translate: word.translate.clone(),
      step: word.step,
      date: word.date,
    }
  }
}

/// Answer side of the pending word
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
  #[serde(rename = "_id")]
  pub id: WordId,
  pub word: String,
  pub translate: String,
}

impl From<&Word> for Answer {
  fn from(word: &Word) -> Self {
    Self {
      id: word.id,
      word: word.word.clone(),
      translate: word.translate.clone(),
    }
  }
}

/// Aggregate counters reported by the box
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoxStatus {
  pub number_of_words: usize,
  /// Words with step -1
  pub unseen: usize,
  /// Words with step >= 0
  pub in_rotation: usize,
  /// Size of the review pool right now
  pub due: usize,
  /// Word count per step value, unseen included
  pub steps: BTreeMap<i64, usize>,
}
