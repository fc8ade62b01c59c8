mod engine;
mod reveal;
mod view;

pub use engine::{
    SubmissionTicket, WizardController, WizardTexts, DEFAULT_RESULT_PREFIX, DEFAULT_WELCOME_TEXT,
};
pub use reveal::{RevealStep, RevealTicket, TextReveal, DEFAULT_REVEAL_DELAY};
pub use view::{ReviewEntry, StepMarker, WizardView};
