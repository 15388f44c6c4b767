use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{BoxError, Result};

/// Scheduling settings, one record per store.
///
/// Field names serialize in camelCase so a config file or word list export can
/// use `factorForDelayValue` and friends. Absent fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
  /// Base time unit in milliseconds
  pub delay: i64,
  /// Multiplier of `delay` indexed by step
  pub factor_for_delay_value: Vec<u32>,
  pub default_initial_step_value: i64,
  pub number_of_options: usize,
  pub session_expiry_time_in_seconds: u64,
  pub suggested_number_of_words_in_a_session: usize,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      delay: config::DEFAULT_DELAY_MS,
      factor_for_delay_value: config::DEFAULT_FACTOR_FOR_DELAY_VALUE.to_vec(),
      default_initial_step_value: config::DEFAULT_INITIAL_STEP_VALUE,
      number_of_options: config::DEFAULT_NUMBER_OF_OPTIONS,
      session_expiry_time_in_seconds: config::DEFAULT_SESSION_EXPIRY_SECONDS,
      suggested_number_of_words_in_a_session: config::DEFAULT_WORDS_PER_SESSION,
    }
  }
}

impl Settings {
  /// Reject settings the scheduler cannot work with.
  pub fn validate(&self) -> Result<()> {
    if self.delay <= 0 {
      return Err(invalid(format!("delay must be positive, got {}", self.delay)));
    }
    if self.factor_for_delay_value.is_empty() {
      return Err(invalid("factorForDelayValue must not be empty".to_string()));
    }
    if self.factor_for_delay_value.contains(&0) {
      return Err(invalid("factorForDelayValue entries must be positive".to_string()));
    }
    if self.factor_for_delay_value.windows(2).any(|w| w[0] > w[1]) {
      return Err(invalid("factorForDelayValue must be non-decreasing".to_string()));
    }
    let longest = self
      .factor_for_delay_value
      .iter()
      .max()
      .and_then(|&factor| self.delay.checked_mul(i64::from(factor)));
    if !longest.is_some_and(|ms| ms <= config::MAX_SCHEDULE_DELAY_MS) {
      return Err(invalid(format!(
        "delay times the largest factor must not exceed {} ms",
        config::MAX_SCHEDULE_DELAY_MS
      )));
    }
    if self.number_of_options < 2 {
      return Err(invalid(format!(
        "numberOfOptions must be at least 2, got {}",
        self.number_of_options
      )));
    }
    if self.suggested_number_of_words_in_a_session == 0 {
      return Err(invalid("suggestedNumberOfWordsInASession must be at least 1".to_string()));
    }
    if self.session_expiry_time_in_seconds > config::MAX_SESSION_EXPIRY_SECONDS {
      return Err(invalid(format!(
        "sessionExpiryTimeInSeconds must not exceed {}, got {}",
        config::MAX_SESSION_EXPIRY_SECONDS,
        self.session_expiry_time_in_seconds
      )));
    }
    if self.default_initial_step_value < -1 {
      return Err(invalid(format!(
        "defaultInitialStepValue must be -1 or more, got {}",
        self.default_initial_step_value
      )));
    }
    Ok(())
  }

  /// Session lifetime. Values beyond chrono's range never expire.
  pub fn session_expiry(&self) -> Duration {
    i64::try_from(self.session_expiry_time_in_seconds)
      .ok()
      .and_then(Duration::try_seconds)
      .unwrap_or(Duration::MAX)
  }
}

fn invalid(reason: String) -> BoxError {
  BoxError::InvalidInput(reason)
}
