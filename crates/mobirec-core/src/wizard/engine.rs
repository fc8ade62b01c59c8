//! Wizard controller implementation.
//!
//! The controller is a single-threaded state machine over `WizardView`. It
//! does not spawn tasks - the caller drives the text reveal with
//! `tick_reveal()` (or `play_reveal()`) and resolves submissions.
//!
//! ## State Transitions
//!
//! ```text
//! Landing -start-> Question(0) <-next/back/jump-> Question(i)
//! Question(N-1) -review-> Review -back-> Question(N-1)
//! Review -jump(k)-> Question(k)
//! Review -submit ok-> Result      Review -submit err-> Review
//! any -reset-> Landing
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut wizard = WizardController::new(questionnaire);
//! wizard.finish_reveal();
//! wizard.start();
//! wizard.answer_current("Yes")?;
//! wizard.next();
//! // ...
//! wizard.submit(&predictor).await;
//! ```

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::reveal::{RevealStep, RevealTicket, TextReveal};
use super::view::{ReviewEntry, StepMarker, WizardView};
use crate::error::{PredictionError, QuestionnaireError};
use crate::events::Event;
use crate::prediction::{Predictor, Recommendation};
use crate::questionnaire::{AnswerRecord, AnswerStore, AnswerValue, Question, Questionnaire};

pub const DEFAULT_WELCOME_TEXT: &str = "Welcome to Mobile Application Recommendation System";
pub const DEFAULT_RESULT_PREFIX: &str = "Recommended Mobile Application For You : ";

/// Texts revealed on the landing and result screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardTexts {
    pub welcome: String,
    /// Prepended to the recommendation label.
    pub result_prefix: String,
}

impl Default for WizardTexts {
    fn default() -> Self {
        Self {
            welcome: DEFAULT_WELCOME_TEXT.to_string(),
            result_prefix: DEFAULT_RESULT_PREFIX.to_string(),
        }
    }
}

/// An in-flight submission: its id and the answers it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    id: Uuid,
    record: AnswerRecord,
}

impl SubmissionTicket {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }
}

/// Core wizard controller.
#[derive(Debug, Clone)]
pub struct WizardController {
    questionnaire: Arc<Questionnaire>,
    answers: AnswerStore,
    view: WizardView,
    recommendation: Option<Recommendation>,
    reveal: TextReveal,
    texts: WizardTexts,
    /// Id of the submission awaiting its outcome.
    pending: Option<Uuid>,
}

impl WizardController {
    /// Create a controller on the landing view with the welcome reveal started.
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self::with_texts(questionnaire, WizardTexts::default())
    }

    pub fn with_texts(questionnaire: Questionnaire, texts: WizardTexts) -> Self {
        let questionnaire = Arc::new(questionnaire);
        let mut reveal = TextReveal::new();
        reveal.start(&texts.welcome);
        Self {
            answers: AnswerStore::new(Arc::clone(&questionnaire)),
            questionnaire,
            view: WizardView::Landing,
            recommendation: None,
            reveal,
            texts,
            pending: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn view(&self) -> &WizardView {
        &self.view
    }

    pub fn position(&self) -> isize {
        self.view.position(self.question_count())
    }

    pub fn question_count(&self) -> usize {
        self.questionnaire.len()
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.recommendation.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Start is offered only on landing once the welcome text is fully shown.
    pub fn start_enabled(&self) -> bool {
        self.view == WizardView::Landing && self.reveal.is_finished()
    }

    /// Reset is offered to the user on the result view only.
    pub fn reset_enabled(&self) -> bool {
        matches!(self.view, WizardView::Result { .. })
    }

    pub fn submit_enabled(&self) -> bool {
        self.view == WizardView::Review && self.pending.is_none()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.view
            .question_index()
            .and_then(|i| self.questionnaire.questions().get(i))
    }

    pub fn reveal_text(&self) -> String {
        self.reveal.displayed()
    }

    pub fn step_indicator(&self) -> Vec<StepMarker> {
        let current = self.view.question_index();
        self.questionnaire
            .questions()
            .iter()
            .zip(self.answers.iter())
            .enumerate()
            .map(|(index, (q, (_, value)))| StepMarker {
                index,
                key: q.key.clone(),
                answered: q.is_answered_by(value),
                current: current == Some(index),
            })
            .collect()
    }

    pub fn review_entries(&self) -> Vec<ReviewEntry> {
        self.questionnaire
            .questions()
            .iter()
            .zip(self.answers.iter())
            .enumerate()
            .map(|(index, (q, (_, value)))| ReviewEntry {
                index,
                key: q.key.clone(),
                text: q.text.clone(),
                value: value.clone(),
                answered: q.is_answered_by(value),
            })
            .collect()
    }

    /// Build a full state snapshot event.
    pub fn state_snapshot(&self) -> Event {
        Event::StateSnapshot {
            view: self.view.clone(),
            position: self.position(),
            answered_count: self.answers.answered_count(),
            question_count: self.question_count(),
            submitting: self.is_submitting(),
            start_enabled: self.start_enabled(),
            reveal_text: self.reveal.displayed(),
            at: Utc::now(),
        }
    }

    // ── Text reveal ──────────────────────────────────────────────────

    pub fn reveal_ticket(&self) -> RevealTicket {
        self.reveal.ticket()
    }

    /// Advance the reveal by one character if `ticket` is still current.
    pub fn tick_reveal(&mut self, ticket: RevealTicket) -> RevealStep {
        self.reveal.advance(ticket)
    }

    pub fn finish_reveal(&mut self) {
        self.reveal.finish();
    }

    /// Run the current reveal to completion, waiting `delay` between frames.
    pub async fn play_reveal<F>(&mut self, delay: Duration, mut on_frame: F)
    where
        F: FnMut(&str),
    {
        let ticket = self.reveal.ticket();
        while let RevealStep::Frame(text) = self.reveal.advance(ticket) {
            on_frame(&text);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if !self.start_enabled() {
            debug!(view = ?self.view, "start ignored");
            return None;
        }
        self.view = WizardView::Question { index: 0 };
        debug!("wizard started");
        Some(Event::WizardStarted {
            question_count: self.question_count(),
            at: Utc::now(),
        })
    }

    pub fn next(&mut self) -> Option<Event> {
        match self.view {
            WizardView::Question { index } if index + 1 < self.question_count() => {
                self.show_question(index + 1)
            }
            _ => None,
        }
    }

    pub fn back(&mut self) -> Option<Event> {
        match self.view {
            WizardView::Question { index } if index > 0 => self.show_question(index - 1),
            WizardView::Review if self.pending.is_none() => {
                self.show_question(self.question_count() - 1)
            }
            _ => None,
        }
    }

    /// Leave the last question for the review screen.
    pub fn review(&mut self) -> Option<Event> {
        match self.view {
            WizardView::Question { index } if index + 1 == self.question_count() => {
                self.view = WizardView::Review;
                debug!("review opened");
                Some(Event::ReviewOpened {
                    answered_count: self.answers.answered_count(),
                    question_count: self.question_count(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Show question `index` directly, from a question or the review list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuestionIndex` without changing state if `index` is
    /// outside the manifest.
    pub fn jump_to(&mut self, index: usize) -> Result<Option<Event>, QuestionnaireError> {
        self.questionnaire.get(index)?;
        let enabled = match self.view {
            WizardView::Question { .. } => true,
            WizardView::Review => self.pending.is_none(),
            WizardView::Landing | WizardView::Result { .. } => false,
        };
        if !enabled {
            return Ok(None);
        }
        Ok(self.show_question(index))
    }

    /// Store a new value for `key`. Only accepted while a question is shown.
    ///
    /// # Errors
    ///
    /// `UnknownKey` or `OutOfDomainValue`; the store is unchanged on error.
    pub fn answer(
        &mut self,
        key: &str,
        value: AnswerValue,
    ) -> Result<Option<Event>, QuestionnaireError> {
        if self.view.question_index().is_none() {
            debug!(key, view = ?self.view, "edit ignored outside question view");
            return Ok(None);
        }
        self.answers.set(key, value.clone())?;
        let answered = self.answers.is_answered(key)?;
        debug!(key, %value, answered, "answer changed");
        Ok(Some(Event::AnswerChanged {
            key: key.to_string(),
            value,
            answered,
            at: Utc::now(),
        }))
    }

    /// Parse raw input for the displayed question and store it.
    pub fn answer_current(&mut self, raw: &str) -> Result<Option<Event>, QuestionnaireError> {
        let Some(question) = self.current_question() else {
            return Ok(None);
        };
        let key = question.key.clone();
        let value = question.parse_value(raw)?;
        self.answer(&key, value)
    }

    /// Take a snapshot and mark one submission in flight.
    ///
    /// Returns `None` outside review or while another submission is pending.
    pub fn begin_submit(&mut self) -> Option<(SubmissionTicket, Event)> {
        if !self.submit_enabled() {
            debug!(view = ?self.view, submitting = self.is_submitting(), "submit ignored");
            return None;
        }
        let ticket = SubmissionTicket {
            id: Uuid::new_v4(),
            record: self.answers.snapshot(),
        };
        self.pending = Some(ticket.id);
        debug!(submission_id = %ticket.id, "submission started");
        let event = Event::SubmissionStarted {
            submission_id: ticket.id.to_string(),
            at: Utc::now(),
        };
        Some((ticket, event))
    }

    /// Apply the outcome of the in-flight submission.
    ///
    /// Outcomes for superseded tickets (after a reset) are dropped.
    pub fn finish_submit(
        &mut self,
        ticket: &SubmissionTicket,
        outcome: Result<String, PredictionError>,
    ) -> Option<Event> {
        if self.pending != Some(ticket.id) {
            debug!(submission_id = %ticket.id, "stale submission outcome dropped");
            return None;
        }
        self.pending = None;

        let outcome = outcome.and_then(|label| {
            let label = label.trim().to_string();
            if label.is_empty() {
                Err(PredictionError::EmptyLabel)
            } else {
                Ok(label)
            }
        });

        match outcome {
            Ok(label) => {
                let recommendation = Recommendation::new(label.clone());
                let asset_key = recommendation.asset_key();
                info!(%label, asset = %asset_key, "recommendation received");
                self.reveal
                    .start(&format!("{}{}", self.texts.result_prefix, label));
                self.view = WizardView::Result {
                    label: label.clone(),
                };
                self.recommendation = Some(recommendation);
                Some(Event::PredictionSucceeded {
                    submission_id: ticket.id.to_string(),
                    label,
                    asset_key,
                    at: Utc::now(),
                })
            }
            Err(e) => {
                warn!(submission_id = %ticket.id, error = %e, "prediction failed");
                Some(Event::PredictionFailed {
                    submission_id: ticket.id.to_string(),
                    message: e.to_string(),
                    at: Utc::now(),
                })
            }
        }
    }

    /// Submit the current answers to `predictor` and apply the outcome.
    ///
    /// Returns `SubmissionStarted` followed by the outcome event, or nothing
    /// when submitting is not enabled.
    pub async fn submit<P: Predictor>(&mut self, predictor: &P) -> Vec<Event> {
        let Some((ticket, started)) = self.begin_submit() else {
            return Vec::new();
        };
        debug!(predictor = predictor.name(), "calling predictor");
        let outcome = predictor.predict(ticket.record()).await;
        let mut events = vec![started];
        events.extend(self.finish_submit(&ticket, outcome));
        events
    }

    /// Return to landing with default answers and no result.
    ///
    /// Applies from any view; front-ends gate the user command on
    /// `reset_enabled()`.
    pub fn reset(&mut self) -> Option<Event> {
        self.answers.reset();
        self.recommendation = None;
        self.pending = None;
        self.view = WizardView::Landing;
        self.reveal.start(&self.texts.welcome);
        debug!("wizard reset");
        Some(Event::WizardReset { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn show_question(&mut self, index: usize) -> Option<Event> {
        let key = self.questionnaire.questions().get(index)?.key.clone();
        self.view = WizardView::Question { index };
        debug!(index, %key, "question shown");
        Some(Event::QuestionShown {
            index,
            key,
            at: Utc::now(),
        })
    }
}
