//! # Mobirec Core Library
//!
//! This library provides the core logic for Mobirec, a questionnaire wizard
//! that collects answers and asks a prediction service which mobile payment
//! application to recommend. The CLI binary is a thin presentation layer
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Questionnaire**: A validated, ordered question manifest and the answer
//!   store holding one live value per question
//! - **Wizard**: A single-threaded state machine over landing, question,
//!   review and result views, plus the text-reveal effect
//! - **Prediction**: The external recommendation service behind a trait,
//!   with an HTTP implementation
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`WizardController`]: Core wizard state machine
//! - [`AnswerStore`]: Answer values and "answered" status
//! - [`Predictor`]: Trait for the recommendation service
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod prediction;
pub mod questionnaire;
pub mod storage;
pub mod wizard;

pub use error::{ConfigError, CoreError, PredictionError, QuestionnaireError};
pub use events::Event;
pub use prediction::{AppAsset, HttpPredictor, Predictor, Recommendation};
pub use questionnaire::{AnswerKind, AnswerRecord, AnswerStore, AnswerValue, Question, Questionnaire};
pub use storage::Config;
pub use wizard::{
    RevealStep, ReviewEntry, StepMarker, SubmissionTicket, WizardController, WizardTexts,
    WizardView,
};
