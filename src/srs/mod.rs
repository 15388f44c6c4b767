pub mod box_of_questions;
pub mod leitner;
pub mod selector;

pub use box_of_questions::BoxOfQuestions;
pub use leitner::{advance, delay_for_step, reset, StepResult};
pub use selector::{answer_options, choose_random_object};
