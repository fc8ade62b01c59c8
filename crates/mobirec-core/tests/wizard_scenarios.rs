//! End-to-end wizard scenarios with stub predictors.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use mobirec_core::questionnaire::SELECT_AN_OPTION;
use mobirec_core::{
    AnswerRecord, AnswerValue, Event, PredictionError, Predictor, Question, Questionnaire,
    WizardController, WizardView,
};

/// Predictor returning a canned outcome and recording what it received.
struct StubPredictor {
    outcome: Result<String, PredictionError>,
    calls: AtomicUsize,
    last_record: Mutex<Option<AnswerRecord>>,
}

impl StubPredictor {
    fn new(outcome: Result<String, PredictionError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_record: Mutex::new(None),
        }
    }
}

impl Predictor for StubPredictor {
    fn name(&self) -> &str {
        "stub"
    }

    async fn predict(&self, record: &AnswerRecord) -> Result<String, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_record.lock().unwrap() = Some(record.clone());
        self.outcome.clone()
    }
}

fn questionnaire() -> Questionnaire {
    Questionnaire::new(vec![
        Question::enumerated("q1", "q1 text", SELECT_AN_OPTION, &["yes", "no"]),
        Question::scaled("q2", "q2 text", 3),
    ])
    .unwrap()
}

fn wizard_at_review() -> WizardController {
    let mut wizard = WizardController::new(questionnaire());
    wizard.finish_reveal();
    wizard.start().unwrap();
    wizard.answer("q1", AnswerValue::from("yes")).unwrap();
    wizard.next().unwrap();
    wizard.review().unwrap();
    wizard
}

#[tokio::test]
async fn test_successful_submission_scenario() {
    let mut wizard = WizardController::new(questionnaire());
    assert_eq!(wizard.position(), -1);
    wizard.finish_reveal();

    wizard.start().unwrap();
    assert_eq!(wizard.position(), 0);

    wizard.answer("q1", AnswerValue::from("yes")).unwrap();
    assert!(wizard.answers().is_answered("q1").unwrap());

    wizard.next().unwrap();
    assert_eq!(wizard.position(), 1);
    assert!(wizard.next().is_none());

    wizard.review().unwrap();
    assert_eq!(wizard.view(), &WizardView::Review);
    assert_eq!(wizard.position(), 2);

    let review: Vec<(String, AnswerValue)> = wizard
        .review_entries()
        .into_iter()
        .map(|e| (e.text, e.value))
        .collect();
    assert_eq!(
        review,
        vec![
            ("q1 text".to_string(), AnswerValue::from("yes")),
            ("q2 text".to_string(), AnswerValue::Scale(3)),
        ]
    );

    let predictor = StubPredictor::new(Ok("Wave Money".into()));
    let events = wizard.submit(&predictor).await;
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], Event::SubmissionStarted { .. }));
    assert!(matches!(events[1], Event::PredictionSucceeded { .. }));
    assert_eq!(
        wizard.view(),
        &WizardView::Result {
            label: "Wave Money".into()
        }
    );
    let rec = wizard.recommendation().unwrap();
    assert_eq!(rec.label, "Wave Money");
    assert_eq!(rec.asset_key(), "wave");
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 1);

    let sent = predictor.last_record.lock().unwrap().clone().unwrap();
    assert_eq!(sent.get("q1"), Some(&AnswerValue::from("yes")));
    assert_eq!(sent.get("q2"), Some(&AnswerValue::Scale(3)));
}

#[tokio::test]
async fn test_failed_submission_keeps_review_and_answers() {
    let mut wizard = wizard_at_review();
    let before = wizard.answers().snapshot();

    let predictor = StubPredictor::new(Err(PredictionError::Transport(
        "connection refused".into(),
    )));
    let events = wizard.submit(&predictor).await;

    let failures = events
        .iter()
        .filter(|e| matches!(e, Event::PredictionFailed { .. }))
        .count();
    assert_eq!(failures, 1);
    assert_eq!(wizard.view(), &WizardView::Review);
    assert_eq!(wizard.answers().snapshot(), before);
    assert!(wizard.recommendation().is_none());
    assert!(!wizard.is_submitting());
}

#[tokio::test]
async fn test_retry_after_failure_succeeds() {
    let mut wizard = wizard_at_review();
    let failing = StubPredictor::new(Err(PredictionError::Status(503)));
    wizard.submit(&failing).await;
    assert_eq!(wizard.view(), &WizardView::Review);

    let working = StubPredictor::new(Ok("AYA Pay".into()));
    wizard.submit(&working).await;
    assert_eq!(wizard.recommendation().unwrap().asset_key(), "aya");
}

#[tokio::test]
async fn test_submit_outside_review_does_not_call_predictor() {
    let mut wizard = WizardController::new(questionnaire());
    wizard.finish_reveal();
    wizard.start();
    let predictor = StubPredictor::new(Ok("KBZ Pay".into()));
    assert!(wizard.submit(&predictor).await.is_empty());
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_reset_after_result_starts_fresh_session() {
    let mut wizard = wizard_at_review();
    let predictor = StubPredictor::new(Ok("CB Pay".into()));
    wizard.submit(&predictor).await;

    wizard.reset();
    assert_eq!(wizard.view(), &WizardView::Landing);
    assert_eq!(wizard.position(), -1);
    assert!(wizard.recommendation().is_none());
    assert_eq!(
        wizard.answers().get("q1").unwrap(),
        &AnswerValue::from(SELECT_AN_OPTION)
    );
    assert_eq!(wizard.answers().get("q2").unwrap(), &AnswerValue::Scale(3));

    // Welcome text plays again before start is offered.
    assert!(wizard.start().is_none());
    wizard.finish_reveal();
    assert!(wizard.start().is_some());
}

#[test]
fn test_jump_from_review_entry_then_edit() {
    let mut wizard = wizard_at_review();
    wizard.jump_to(0).unwrap().unwrap();
    wizard.answer_current("No").unwrap();
    wizard.jump_to(1).unwrap();
    wizard.review().unwrap();
    assert_eq!(wizard.review_entries()[0].value, AnswerValue::from("no"));
}
