use chrono::{DateTime, Duration, Utc};

use crate::domain::{Settings, STEP_FRESH};
use crate::error::{BoxError, Result};

pub struct StepResult {
  pub step: i64,
  pub next_review: DateTime<Utc>,
}

/// Multiplier for `step`, clamped to the last entry of the factor table.
pub fn delay_factor(settings: &Settings, step: i64) -> u32 {
  let factors = &settings.factor_for_delay_value;
  let last = factors.len().saturating_sub(1);
  let index = (step.max(0) as usize).min(last);
  factors.get(index).copied().unwrap_or(1)
}

/// Waiting time before a word at `step` becomes due again
pub fn delay_for_step(settings: &Settings, step: i64) -> Duration {
  let millis = settings.delay.saturating_mul(delay_factor(settings, step) as i64);
  Duration::milliseconds(millis)
}

/// Due date for a word landing on `step`, or an error when it falls outside
/// the representable date range.
fn due_after(settings: &Settings, step: i64, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
  now
    .checked_add_signed(delay_for_step(settings, step))
    .ok_or_else(|| BoxError::InvalidInput(format!("delay for step {} is out of range", step)))
}

/// Correct answer: one step up, due after that step's delay
pub fn advance(current_step: i64, settings: &Settings, now: DateTime<Utc>) -> Result<StepResult> {
  // An unseen word answered correctly counts from fresh
  let step = current_step.max(STEP_FRESH) + 1;
  Ok(StepResult {
    step,
    next_review: due_after(settings, step, now)?,
  })
}

/// Wrong answer: back to step 0, due after the step 0 delay so the word does
/// not come straight back in the same pass
pub fn reset(settings: &Settings, now: DateTime<Utc>) -> Result<StepResult> {
  Ok(StepResult {
    step: STEP_FRESH,
    next_review: due_after(settings, STEP_FRESH, now)?,
  })
}
