mod answers;
mod manifest;
mod question;

pub use answers::{AnswerRecord, AnswerStore};
pub use manifest::{Questionnaire, DEFAULT_SCALED_VALUE};
pub use question::{AnswerKind, AnswerValue, Question, SCALE_MAX, SCALE_MIN, SELECT_AN_OPTION};
