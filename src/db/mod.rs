//! Word store: records and the settings singleton.
//!
//! The box talks to storage only through [`WordStore`]. [`WordDb`] is the
//! in-memory implementation; a hosting application that persists words can
//! provide its own.

pub mod words;

pub use words::WordDb;

use crate::domain::{NewWord, Settings, Word, WordId};
use crate::error::Result;

pub trait WordStore {
    /// Name given to the store at construction
    fn name(&self) -> &str;

    /// Bulk insert, assigning sequential ids in input order.
    ///
    /// The whole list is validated first; on error nothing is inserted.
    fn load_words(&mut self, words: Vec<NewWord>) -> Result<Vec<WordId>>;

    /// Insert or replace by id
    fn put_word(&mut self, word: Word);

    fn get_word(&self, id: WordId) -> Result<Word>;

    /// Snapshot of every record in insertion order
    fn all_words(&self) -> Vec<Word>;

    fn number_of_words(&self) -> usize;

    /// Stored settings, or the defaults when none were ever put
    fn get_settings(&self) -> Settings;

    /// Validate and replace the settings record
    fn put_settings(&mut self, settings: Settings) -> Result<()>;
}
