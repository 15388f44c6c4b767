//! Test fixtures built on the bundled word list.
//!
//! The standard fixture imports all 84 words and puts eight of them into
//! rotation with steps `0, 0, 0, 1, 1, 1, 2, 3`, leaving 76 unseen.

use crate::config::BUNDLED_WORD_LIST;
use crate::db::{WordDb, WordStore};
use crate::domain::NewWord;
use crate::srs::BoxOfQuestions;

/// Number of words in the bundled list
pub const FIXTURE_WORDS: usize = 84;

/// Steps given to the first eight words of the fixture
pub const FIXTURE_STEPS: [i64; 8] = [0, 0, 0, 1, 1, 1, 2, 3];

pub fn word_list() -> Vec<NewWord> {
    serde_json::from_str(BUNDLED_WORD_LIST).expect("bundled word list is valid JSON")
}

/// Box over the bundled list with eight words in rotation, all due now.
pub fn fixture_box() -> BoxOfQuestions<WordDb> {
    let mut lw = BoxOfQuestions::new(WordDb::new("learnWords"));
    lw.import_from(word_list()).expect("bundled word list imports");

    let mut settings = lw.settings();
    settings.suggested_number_of_words_in_a_session = 7;
    lw.config(settings).expect("fixture settings are valid");

    let all = lw.db().all_words();
    for (word, step) in all.into_iter().zip(FIXTURE_STEPS) {
        let mut word = word;
        word.step = step;
        word.queried = 1;
        lw.db_mut().put_word(word);
    }

    lw
}
