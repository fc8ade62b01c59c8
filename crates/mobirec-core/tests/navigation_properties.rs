//! Property tests for wizard navigation, submission and answer status.

use proptest::prelude::*;

use mobirec_core::questionnaire::{SCALE_MAX, SCALE_MIN};
use mobirec_core::{
    AnswerValue, PredictionError, Questionnaire, SubmissionTicket, WizardController, WizardView,
};

#[derive(Debug, Clone)]
enum Command {
    Next,
    Back,
    Review,
    /// Jump to the last question and open the review.
    ToReview,
    Jump(usize),
    Answer(usize),
    Reset,
    Start,
    /// Take a snapshot and leave the submission in flight.
    Begin,
    /// Resolve the in-flight submission, successfully or not.
    Finish(bool),
    /// Begin and finish in one step.
    Submit(bool),
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => Just(Command::Next),
        4 => Just(Command::Back),
        1 => Just(Command::Review),
        2 => Just(Command::ToReview),
        2 => (0usize..20).prop_map(Command::Jump),
        3 => (0usize..8).prop_map(Command::Answer),
        1 => Just(Command::Reset),
        1 => Just(Command::Start),
        2 => Just(Command::Begin),
        2 => any::<bool>().prop_map(Command::Finish),
        2 => any::<bool>().prop_map(Command::Submit),
    ]
}

fn outcome(success: bool) -> Result<String, PredictionError> {
    if success {
        Ok("Wave Money".to_string())
    } else {
        Err(PredictionError::Status(503))
    }
}

/// A wizard plus the ticket of the submission the user left in flight.
struct Session {
    wizard: WizardController,
    ticket: Option<SubmissionTicket>,
}

impl Session {
    fn started() -> Self {
        let mut wizard = WizardController::new(Questionnaire::builtin(3).unwrap());
        wizard.finish_reveal();
        wizard.start().unwrap();
        Self {
            wizard,
            ticket: None,
        }
    }

    /// Apply a command the way a user would, choosing a legal value for edits.
    fn apply(&mut self, cmd: &Command) {
        let wizard = &mut self.wizard;
        match cmd {
            Command::Next => {
                wizard.next();
            }
            Command::Back => {
                wizard.back();
            }
            Command::Review => {
                wizard.review();
            }
            Command::ToReview => {
                let _ = wizard.jump_to(wizard.question_count() - 1);
                wizard.review();
            }
            Command::Jump(i) => {
                let _ = wizard.jump_to(*i);
            }
            Command::Answer(pick) => {
                if let Some(q) = wizard.current_question() {
                    let domain = q.domain();
                    let key = q.key.clone();
                    let value = domain[pick % domain.len()].clone();
                    wizard.answer(&key, value).unwrap();
                }
            }
            Command::Reset => {
                wizard.reset();
                wizard.finish_reveal();
            }
            Command::Start => {
                wizard.start();
            }
            Command::Begin => {
                if let Some((ticket, _)) = wizard.begin_submit() {
                    self.ticket = Some(ticket);
                }
            }
            Command::Finish(success) => {
                if let Some(ticket) = self.ticket.take() {
                    wizard.finish_submit(&ticket, outcome(*success));
                }
            }
            Command::Submit(success) => {
                if let Some((ticket, _)) = wizard.begin_submit() {
                    wizard.finish_submit(&ticket, outcome(*success));
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn next_back_never_leave_question_range(
        moves in proptest::collection::vec(any::<bool>(), 0..60)
    ) {
        let mut session = Session::started();
        let wizard = &mut session.wizard;
        let n = wizard.question_count() as isize;
        for forward in moves {
            if forward { wizard.next(); } else { wizard.back(); }
            let pos = wizard.position();
            prop_assert!(pos >= 0 && pos < n);
            prop_assert!(matches!(wizard.view(), WizardView::Question { .. }), "view is not a Question");
        }
    }

    #[test]
    fn cursor_is_always_well_defined(cmds in proptest::collection::vec(command(), 0..80)) {
        let mut session = Session::started();
        let n = session.wizard.question_count() as isize;
        for cmd in &cmds {
            session.apply(cmd);
            let wizard = &session.wizard;
            let pos = wizard.position();
            match wizard.view() {
                WizardView::Landing => prop_assert_eq!(pos, -1),
                WizardView::Question { index } => {
                    prop_assert_eq!(pos, *index as isize);
                    prop_assert!(pos < n);
                }
                WizardView::Review => prop_assert_eq!(pos, n),
                WizardView::Result { label } => {
                    prop_assert_eq!(pos, n);
                    let shown = wizard.recommendation().map(|r| r.label.as_str());
                    prop_assert_eq!(shown, Some(label.as_str()));
                }
            }
            prop_assert_eq!(
                wizard.recommendation().is_some(),
                matches!(wizard.view(), WizardView::Result { .. })
            );
            if wizard.is_submitting() {
                prop_assert_eq!(wizard.view(), &WizardView::Review);
            }
        }
    }

    #[test]
    fn failed_submission_changes_nothing_but_the_flag(
        cmds in proptest::collection::vec(command(), 0..40)
    ) {
        let mut session = Session::started();
        for cmd in &cmds {
            session.apply(cmd);
        }
        session.apply(&Command::ToReview);
        let wizard = &mut session.wizard;
        if let Some((ticket, _)) = wizard.begin_submit() {
            let before = wizard.answers().snapshot();
            wizard.finish_submit(&ticket, outcome(false));
            prop_assert_eq!(wizard.view(), &WizardView::Review);
            prop_assert_eq!(wizard.answers().snapshot(), before);
            prop_assert!(!wizard.is_submitting());
            prop_assert!(wizard.submit_enabled());
        }
    }

    #[test]
    fn jump_to_is_idempotent(cmds in proptest::collection::vec(command(), 0..30), k in 0usize..13) {
        let mut session = Session::started();
        for cmd in &cmds {
            session.apply(cmd);
        }
        let wizard = &mut session.wizard;
        if wizard.view() == &WizardView::Landing {
            wizard.finish_reveal();
            wizard.start();
        }
        let before = wizard.answers().snapshot();
        let _ = wizard.jump_to(k);
        let _ = wizard.jump_to(k);
        if matches!(wizard.view(), WizardView::Question { .. }) {
            prop_assert_eq!(wizard.position(), k as isize);
        }
        prop_assert_eq!(wizard.answers().snapshot(), before);
    }

    #[test]
    fn enumerated_answered_iff_not_placeholder(pick in 0usize..16) {
        let questionnaire = Questionnaire::builtin(3).unwrap();
        for q in questionnaire.questions().iter().filter(|q| !q.is_scaled()) {
            let domain = q.domain();
            let value = &domain[pick % domain.len()];
            let is_placeholder = value == &domain[0];
            prop_assert_eq!(q.is_answered_by(value), !is_placeholder);
        }
    }

    #[test]
    fn scaled_always_answered(v in SCALE_MIN..=SCALE_MAX) {
        let mut session = Session::started();
        let wizard = &mut session.wizard;
        let questionnaire = Questionnaire::builtin(3).unwrap();
        for (index, q) in questionnaire.questions().iter().enumerate() {
            if q.is_scaled() {
                wizard.jump_to(index).unwrap();
                wizard.answer(&q.key, AnswerValue::Scale(v)).unwrap();
                prop_assert!(wizard.answers().is_answered(&q.key).unwrap());
            }
        }
    }

    #[test]
    fn reset_restores_defaults_regardless_of_history(
        cmds in proptest::collection::vec(command(), 0..80),
        late_success in any::<bool>()
    ) {
        let mut session = Session::started();
        let defaults = session.wizard.answers().snapshot();
        for cmd in &cmds {
            session.apply(cmd);
        }
        session.wizard.reset();
        let wizard = &session.wizard;
        prop_assert_eq!(wizard.answers().snapshot(), defaults.clone());
        prop_assert_eq!(wizard.position(), -1);
        prop_assert!(wizard.recommendation().is_none());
        prop_assert!(!wizard.is_submitting());

        // An outcome for a submission started before the reset is dropped.
        session.apply(&Command::Finish(late_success));
        let wizard = &session.wizard;
        prop_assert_eq!(wizard.view(), &WizardView::Landing);
        prop_assert!(wizard.recommendation().is_none());
        prop_assert_eq!(wizard.answers().snapshot(), defaults);
    }
}
