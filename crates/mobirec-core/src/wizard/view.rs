//! Derived view state for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::questionnaire::AnswerValue;

/// Which screen is shown. Exactly one at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum WizardView {
    /// Before the first question; the welcome text is revealed here.
    Landing,
    Question { index: usize },
    Review,
    Result { label: String },
}

impl WizardView {
    /// Integer cursor form: -1 on landing, the question index, or the
    /// question count for review and result.
    pub fn position(&self, question_count: usize) -> isize {
        match self {
            WizardView::Landing => -1,
            WizardView::Question { index } => *index as isize,
            WizardView::Review | WizardView::Result { .. } => question_count as isize,
        }
    }

    pub fn question_index(&self) -> Option<usize> {
        match self {
            WizardView::Question { index } => Some(*index),
            _ => None,
        }
    }
}

/// One button of the step indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepMarker {
    pub index: usize,
    pub key: String,
    pub answered: bool,
    pub current: bool,
}

/// One row of the review list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub index: usize,
    pub key: String,
    pub text: String,
    pub value: AnswerValue,
    pub answered: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_matches_cursor_encoding() {
        assert_eq!(WizardView::Landing.position(4), -1);
        assert_eq!(WizardView::Question { index: 2 }.position(4), 2);
        assert_eq!(WizardView::Review.position(4), 4);
        assert_eq!(WizardView::Result { label: "x".into() }.position(4), 4);
    }

    #[test]
    fn serializes_with_view_tag() {
        let json = serde_json::to_value(WizardView::Question { index: 1 }).unwrap();
        assert_eq!(json["view"], "question");
        assert_eq!(json["index"], 1);
    }
}
