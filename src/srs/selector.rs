//! Random question selection and multiple choice option building.
//!
//! Selection is addressed by position in the candidate slice, never by word
//! id, so any collection works regardless of how ids are numbered.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::Word;
use crate::error::{BoxError, Result};

/// Pick a uniformly random element of `collection`.
pub fn choose_random_object<'a, T, R>(collection: &'a [T], rng: &mut R) -> Result<&'a T>
where
  R: Rng,
{
  if collection.is_empty() {
    return Err(BoxError::EmptyCollection);
  }
  let idx = rng.random_range(0..collection.len());
  Ok(&collection[idx])
}

/// Build `count` options: `correct` plus `count - 1` distinct distractors from
/// `all_words`, in random order.
///
/// Distractors whose source term differs from the correct one are preferred,
/// so the learner does not see the right answer twice when a word list has
/// homonyms. Words sharing the term are only used to fill up.
pub fn answer_options<R>(correct: &Word, all_words: &[Word], count: usize, rng: &mut R) -> Result<Vec<Word>>
where
  R: Rng,
{
  if all_words.len() < count {
    return Err(BoxError::InsufficientWords {
      needed: count,
      available: all_words.len(),
    });
  }

  let mut distractors: Vec<&Word> = all_words.iter().filter(|w| w.id != correct.id).collect();

  // Shuffle, then move same-term words to the back (stable sort keeps shuffle order)
  distractors.shuffle(rng);
  distractors.sort_by_key(|w| w.word == correct.word);

  let needed = count.saturating_sub(1);
  if distractors.len() < needed {
    // Only reachable when `correct` is not part of `all_words`
    return Err(BoxError::InsufficientWords {
      needed: count,
      available: distractors.len() + 1,
    });
  }

  let mut options: Vec<Word> = vec![correct.clone()];
  options.extend(distractors.into_iter().take(needed).cloned());
  options.shuffle(rng);

  Ok(options)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::WordId;
  use chrono::{DateTime, Utc};
  use std::collections::HashSet;

  fn words(n: u64) -> Vec<Word> {
    (1..=n)
      .map(|i| Word {
        id: WordId(i),
        word: format!("word{}", i),
        translate: format!("Wort{}", i),
        step: 0,
        date: DateTime::<Utc>::UNIX_EPOCH,
        queried: 0,
        tags: vec![],
      })
      .collect()
  }

  #[test]
  fn test_choose_from_empty() {
    let empty: Vec<u32> = vec![];
    let result = choose_random_object(&empty, &mut rand::rng());
    assert_eq!(result, Err(BoxError::EmptyCollection));
  }

  #[test]
  fn test_choose_single() {
    let one = vec![42];
    assert_eq!(choose_random_object(&one, &mut rand::rng()), Ok(&42));
  }

  #[test]
  fn test_choose_reaches_every_position() {
    let items: Vec<usize> = (0..5).collect();
    let mut seen = HashSet::new();
    let mut rng = rand::rng();
    for _ in 0..1000 {
      seen.insert(*choose_random_object(&items, &mut rng).unwrap());
    }
    assert_eq!(seen.len(), 5);
  }

  #[test]
  fn test_options_contain_correct_once() {
    let all = words(10);
    let correct = all[3].clone();
    let options = answer_options(&correct, &all, 4, &mut rand::rng()).unwrap();

    assert_eq!(options.len(), 4);
    assert_eq!(options.iter().filter(|w| w.id == correct.id).count(), 1);
    let ids: HashSet<WordId> = options.iter().map(|w| w.id).collect();
    assert_eq!(ids.len(), 4);
  }

  #[test]
  fn test_options_use_whole_store_when_exact() {
    let all = words(4);
    let options = answer_options(&all[0], &all, 4, &mut rand::rng()).unwrap();
    let ids: HashSet<WordId> = options.iter().map(|w| w.id).collect();
    assert_eq!(ids.len(), 4);
  }

  #[test]
  fn test_options_insufficient_words() {
    let all = words(3);
    let result = answer_options(&all[0], &all, 4, &mut rand::rng());
    assert_eq!(
      result,
      Err(BoxError::InsufficientWords {
        needed: 4,
        available: 3
      })
    );
  }

  #[test]
  fn test_options_prefer_distinct_terms() {
    let mut all = words(6);
    // word 2 is a homonym of word 1
    all[1].word = all[0].word.clone();
    let correct = all[0].clone();

    for _ in 0..50 {
      let options = answer_options(&correct, &all, 4, &mut rand::rng()).unwrap();
      assert!(options.iter().all(|w| w.id != WordId(2)));
    }
  }

  #[test]
  fn test_options_order_varies() {
    let all = words(20);
    let correct = all[0].clone();
    let mut positions = HashSet::new();
    for _ in 0..200 {
      let options = answer_options(&correct, &all, 4, &mut rand::rng()).unwrap();
      positions.insert(options.iter().position(|w| w.id == correct.id).unwrap());
    }
    assert!(positions.len() > 1);
  }
}
