use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::questionnaire::AnswerValue;
use crate::wizard::WizardView;

/// Every state change in the wizard produces an Event.
/// The presentation layer renders from them; `PredictionSucceeded` and
/// `PredictionFailed` are the transient notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    WizardStarted {
        question_count: usize,
        at: DateTime<Utc>,
    },
    QuestionShown {
        index: usize,
        key: String,
        at: DateTime<Utc>,
    },
    AnswerChanged {
        key: String,
        value: AnswerValue,
        answered: bool,
        at: DateTime<Utc>,
    },
    ReviewOpened {
        answered_count: usize,
        question_count: usize,
        at: DateTime<Utc>,
    },
    SubmissionStarted {
        submission_id: String,
        at: DateTime<Utc>,
    },
    PredictionSucceeded {
        submission_id: String,
        label: String,
        asset_key: String,
        at: DateTime<Utc>,
    },
    /// Submission failed; the wizard stays on review and may retry.
    PredictionFailed {
        submission_id: String,
        message: String,
        at: DateTime<Utc>,
    },
    WizardReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        view: WizardView,
        position: isize,
        answered_count: usize,
        question_count: usize,
        submitting: bool,
        start_enabled: bool,
        reveal_text: String,
        at: DateTime<Utc>,
    },
}
