//! Caller-side review session.
//!
//! A session is a bounded run of questions: it ends after
//! `suggestedNumberOfWordsInASession` questions or once
//! `sessionExpiryTimeInSeconds` have passed since it started. The box never
//! looks at it; hosting code decides when to stop asking.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::Settings;

#[derive(Debug, Clone)]
pub struct ReviewSession {
  started_at: DateTime<Utc>,
  expires_after: Duration,
  size: usize,
  asked: usize,
  correct: usize,
}

/// Counts for display at the end of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
  pub asked: usize,
  pub correct: usize,
  pub wrong: usize,
}

impl ReviewSession {
  pub fn new(settings: &Settings) -> Self {
    Self::starting_at(settings, Utc::now())
  }

  pub fn starting_at(settings: &Settings, started_at: DateTime<Utc>) -> Self {
    Self {
      started_at,
      expires_after: settings.session_expiry(),
      size: settings.suggested_number_of_words_in_a_session,
      asked: 0,
      correct: 0,
    }
  }

  pub fn started_at(&self) -> DateTime<Utc> {
    self.started_at
  }

  pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
    now - self.started_at >= self.expires_after
  }

  /// Expired, or the suggested number of questions has been asked
  pub fn is_complete(&self, now: DateTime<Utc>) -> bool {
    self.is_expired(now) || self.asked >= self.size
  }

  /// Questions left before the size limit
  pub fn remaining(&self) -> usize {
    self.size.saturating_sub(self.asked)
  }

  pub fn record(&mut self, correct: bool) {
    self.asked += 1;
    if correct {
      self.correct += 1;
    }
  }

  pub fn summary(&self) -> SessionSummary {
    SessionSummary {
      asked: self.asked,
      correct: self.correct,
      wrong: self.asked - self.correct,
    }
  }
}
