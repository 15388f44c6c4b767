//! In-memory word store

use std::collections::HashMap;

use crate::domain::{NewWord, Settings, Word, WordId};
use crate::error::{BoxError, Result};

use super::WordStore;

#[derive(Debug, Clone, Default)]
pub struct WordDb {
    name: String,
    /// Records in insertion order
    words: Vec<Word>,
    /// id -> position in `words`
    index: HashMap<WordId, usize>,
    settings: Option<Settings>,
}

impl WordDb {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a store and load a JSON array of import records into it.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self> {
        let records: Vec<NewWord> = serde_json::from_str(json)?;
        let mut db = Self::new(name);
        db.load_words(records)?;
        Ok(db)
    }

    fn next_id(&self) -> u64 {
        self.index.keys().map(|id| id.0).max().unwrap_or(0) + 1
    }
}

impl WordStore for WordDb {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_words(&mut self, words: Vec<NewWord>) -> Result<Vec<WordId>> {
        for (position, record) in words.iter().enumerate() {
            record.validate(position)?;
        }

        let first = self.next_id();
        let mut ids = Vec::with_capacity(words.len());
        for (offset, record) in words.into_iter().enumerate() {
            let id = WordId(first + offset as u64);
            self.put_word(record.into_word(id));
            ids.push(id);
        }

        tracing::debug!("{}: loaded {} words", self.name, ids.len());
        Ok(ids)
    }

    fn put_word(&mut self, word: Word) {
        match self.index.get(&word.id) {
            Some(&position) => self.words[position] = word,
            None => {
                self.index.insert(word.id, self.words.len());
                self.words.push(word);
            }
        }
    }

    fn get_word(&self, id: WordId) -> Result<Word> {
        self.index
            .get(&id)
            .map(|&position| self.words[position].clone())
            .ok_or(BoxError::NotFound(id))
    }

    fn all_words(&self) -> Vec<Word> {
        self.words.clone()
    }

    fn number_of_words(&self) -> usize {
        self.words.len()
    }

    fn get_settings(&self) -> Settings {
        self.settings.clone().unwrap_or_default()
    }

    fn put_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        self.settings = Some(settings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::STEP_UNSEEN;

    fn sample() -> Vec<NewWord> {
        vec![
            NewWord::new("Hund", "dog"),
            NewWord::new("Katze", "cat"),
            NewWord::new("Maus", "mouse").with_step(2),
        ]
    }

    #[test]
    fn test_new_db_is_empty() {
        let db = WordDb::new("learnWords");
        assert_eq!(db.name(), "learnWords");
        assert_eq!(db.number_of_words(), 0);
        assert!(db.all_words().is_empty());
    }

    #[test]
    fn test_load_assigns_sequential_ids_from_one() {
        let mut db = WordDb::new("test");
        let ids = db.load_words(sample()).unwrap();
        assert_eq!(ids, vec![WordId(1), WordId(2), WordId(3)]);

        let all = db.all_words();
        assert_eq!(all[0].translate, "dog");
        assert_eq!(all[2].translate, "mouse");
        assert_eq!(all[0].step, STEP_UNSEEN);
        assert_eq!(all[2].step, 2);
    }

    #[test]
    fn test_second_load_continues_numbering() {
        let mut db = WordDb::new("test");
        db.load_words(sample()).unwrap();
        let ids = db.load_words(vec![NewWord::new("Vogel", "bird")]).unwrap();
        assert_eq!(ids, vec![WordId(4)]);
        assert_eq!(db.number_of_words(), 4);
    }

    #[test]
    fn test_load_rejects_record_without_translation() {
        let mut db = WordDb::new("test");
        let mut words = sample();
        words.push(NewWord {
            word: "Fisch".into(),
            ..NewWord::default()
        });

        let result = db.load_words(words);
        assert!(matches!(result, Err(BoxError::InvalidInput(_))));
        // Nothing from the failed batch is kept
        assert_eq!(db.number_of_words(), 0);
    }

    #[test]
    fn test_get_unknown_word() {
        let db = WordDb::new("test");
        assert_eq!(db.get_word(WordId(1)), Err(BoxError::NotFound(WordId(1))));
    }

    #[test]
    fn test_put_word_replaces_in_place() {
        let mut db = WordDb::new("test");
        db.load_words(sample()).unwrap();

        let mut cat = db.get_word(WordId(2)).unwrap();
        cat.step = 1;
        cat.queried = 3;
        db.put_word(cat);

        assert_eq!(db.number_of_words(), 3);
        let stored = db.get_word(WordId(2)).unwrap();
        assert_eq!(stored.step, 1);
        assert_eq!(stored.queried, 3);
        // Order is unchanged
        assert_eq!(db.all_words()[1].id, WordId(2));
    }

    #[test]
    fn test_all_words_is_a_snapshot() {
        let mut db = WordDb::new("test");
        db.load_words(sample()).unwrap();

        let mut all = db.all_words();
        all[0].step = 5;
        assert_eq!(db.get_word(WordId(1)).unwrap().step, STEP_UNSEEN);
    }

    #[test]
    fn test_settings_default_until_put() {
        let mut db = WordDb::new("test");
        assert_eq!(db.get_settings(), Settings::default());

        let mut settings = db.get_settings();
        settings.suggested_number_of_words_in_a_session = 12;
        db.put_settings(settings).unwrap();
        assert_eq!(db.get_settings().suggested_number_of_words_in_a_session, 12);
    }

    #[test]
    fn test_put_settings_validates() {
        let mut db = WordDb::new("test");
        let settings = Settings {
            factor_for_delay_value: vec![],
            ..Settings::default()
        };
        assert!(db.put_settings(settings).is_err());
        assert_eq!(db.get_settings(), Settings::default());
    }

    #[test]
    fn test_from_json() {
        let db = WordDb::from_json(
            "json",
            r#"[{"word": "Hund", "translate": "dog"}, {"translate": "cat", "tags": ["pets"]}]"#,
        )
        .unwrap();
        assert_eq!(db.number_of_words(), 2);
        assert_eq!(db.get_word(WordId(2)).unwrap().tags, vec!["pets".to_string()]);
    }

    #[test]
    fn test_from_json_malformed() {
        let result = WordDb::from_json("json", r#"[{"word": "Hund""#);
        assert!(matches!(result, Err(BoxError::InvalidInput(_))));
    }
}
