pub mod question;
pub mod settings;
pub mod word;

pub use question::{Answer, BoxStatus, Question, QuestionMode};
pub use settings::Settings;
pub use word::{NewWord, Word, WordId, STEP_FRESH, STEP_UNSEEN};
