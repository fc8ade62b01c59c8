//! The fixed, validated question manifest.
//!
//! A `Questionnaire` is built once per wizard and never changes afterwards;
//! its order is the step order and the review order.

use serde::Serialize;
use std::collections::HashSet;

use super::question::{Question, SELECT_AN_OPTION};
use crate::error::QuestionnaireError;

/// Default value for scaled questions.
pub const DEFAULT_SCALED_VALUE: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    /// Validate and wrap a question list.
    ///
    /// # Errors
    ///
    /// Fails on an empty list, duplicate keys, or any malformed question.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionnaireError> {
        if questions.is_empty() {
            return Err(QuestionnaireError::EmptyManifest);
        }
        let mut seen = HashSet::new();
        for q in &questions {
            q.validate()?;
            if !seen.insert(q.key.as_str()) {
                return Err(QuestionnaireError::DuplicateKey(q.key.clone()));
            }
        }
        Ok(Self { questions })
    }

    /// The built-in mobile payment application questionnaire.
    pub fn builtin(scaled_default: u8) -> Result<Self, QuestionnaireError> {
        Self::new(builtin_questions(scaled_default))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Result<&Question, QuestionnaireError> {
        self.questions
            .get(index)
            .ok_or(QuestionnaireError::InvalidQuestionIndex {
                index,
                len: self.questions.len(),
            })
    }

    pub fn find(&self, key: &str) -> Result<&Question, QuestionnaireError> {
        self.questions
            .iter()
            .find(|q| q.key == key)
            .ok_or_else(|| QuestionnaireError::UnknownKey(key.to_string()))
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.key == key)
    }
}

fn builtin_questions(scaled_default: u8) -> Vec<Question> {
    vec![
        Question::enumerated(
            "age",
            "What is your age group?",
            "Select your age",
            &["Under 18", "18-24", "25-34", "35-44", "45-54", "55 and above"],
        ),
        Question::enumerated(
            "gender",
            "What is your gender?",
            "Select your gender",
            &["Male", "Female", "Prefer not to say"],
        ),
        Question::enumerated(
            "residence",
            "Where do you live?",
            "Select your place of residence",
            &["Yangon", "Mandalay", "Naypyidaw", "Other city", "Rural area"],
        ),
        Question::enumerated(
            "occupation",
            "What is your occupation?",
            "Select your occupation",
            &[
                "Student",
                "Employee",
                "Business owner",
                "Freelancer",
                "Unemployed",
                "Retired",
            ],
        ),
        Question::enumerated(
            "has_bank_account",
            "Do you have a bank account?",
            SELECT_AN_OPTION,
            &["Yes", "No"],
        ),
        Question::enumerated(
            "uses_mobile_banking",
            "Have you used a mobile banking application before?",
            SELECT_AN_OPTION,
            &["Yes", "No"],
        ),
        Question::enumerated(
            "shops_online",
            "Do you shop online regularly?",
            SELECT_AN_OPTION,
            &["Yes", "No"],
        ),
        Question::scaled(
            "ease_of_use",
            "How important is ease of use?",
            scaled_default,
        ),
        Question::scaled(
            "transaction_speed",
            "How important is transaction speed?",
            scaled_default,
        ),
        Question::scaled(
            "low_fees",
            "How important are low transaction fees?",
            scaled_default,
        ),
        Question::scaled(
            "security",
            "How important is security?",
            scaled_default,
        ),
        Question::scaled(
            "promotions",
            "How important are promotions and cashback?",
            scaled_default,
        ),
        Question::scaled(
            "merchant_acceptance",
            "How important is wide merchant acceptance?",
            scaled_default,
        ),
    ]
}
