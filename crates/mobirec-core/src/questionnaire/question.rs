//! Question definitions and the input-boundary value parser.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::QuestionnaireError;

/// Lowest value of a scaled question.
pub const SCALE_MIN: u8 = 1;
/// Highest value of a scaled question.
pub const SCALE_MAX: u8 = 5;
/// Placeholder shared by the yes/no questions.
pub const SELECT_AN_OPTION: &str = "Select an option";

/// Current value of one question.
///
/// Serialized untagged so an answer record becomes a flat JSON object of
/// strings and integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Scale(u8),
    Choice(String),
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Choice(s) => f.write_str(s),
            AnswerValue::Scale(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Choice(s.to_string())
    }
}

impl From<u8> for AnswerValue {
    fn from(n: u8) -> Self {
        AnswerValue::Scale(n)
    }
}

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnswerKind {
    /// Pick one of a fixed set. The placeholder is part of the domain and
    /// means "unanswered".
    Enumerated {
        placeholder: String,
        options: Vec<String>,
        /// Initial value; the placeholder when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    /// Integer from 1 to 5, always considered answered.
    Scaled { default: u8 },
}

/// A question in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, also the field name in the prediction body.
    pub key: String,
    /// Display text.
    pub text: String,
    #[serde(flatten)]
    pub kind: AnswerKind,
}

impl Question {
    pub fn enumerated(
        key: impl Into<String>,
        text: impl Into<String>,
        placeholder: impl Into<String>,
        options: &[&str],
    ) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            kind: AnswerKind::Enumerated {
                placeholder: placeholder.into(),
                options: options.iter().map(|s| s.to_string()).collect(),
                default: None,
            },
        }
    }

    pub fn scaled(key: impl Into<String>, text: impl Into<String>, default: u8) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            kind: AnswerKind::Scaled { default },
        }
    }

    pub fn is_scaled(&self) -> bool {
        matches!(self.kind, AnswerKind::Scaled { .. })
    }

    /// Every legal value, placeholder first for enumerated questions.
    pub fn domain(&self) -> Vec<AnswerValue> {
        match &self.kind {
            AnswerKind::Enumerated {
                placeholder,
                options,
                ..
            } => std::iter::once(placeholder)
                .chain(options.iter())
                .map(|s| AnswerValue::Choice(s.clone()))
                .collect(),
            AnswerKind::Scaled { .. } => (SCALE_MIN..=SCALE_MAX).map(AnswerValue::Scale).collect(),
        }
    }

    pub fn default_value(&self) -> AnswerValue {
        match &self.kind {
            AnswerKind::Enumerated {
                placeholder,
                default,
                ..
            } => AnswerValue::Choice(default.clone().unwrap_or_else(|| placeholder.clone())),
            AnswerKind::Scaled { default } => AnswerValue::Scale(*default),
        }
    }

    pub fn accepts(&self, value: &AnswerValue) -> bool {
        match (&self.kind, value) {
            (
                AnswerKind::Enumerated {
                    placeholder,
                    options,
                    ..
                },
                AnswerValue::Choice(s),
            ) => s == placeholder || options.iter().any(|o| o == s),
            (AnswerKind::Scaled { .. }, AnswerValue::Scale(n)) => (SCALE_MIN..=SCALE_MAX).contains(n),
            _ => false,
        }
    }

    /// Placeholder and empty values are unanswered; scaled questions never are.
    pub fn is_answered_by(&self, value: &AnswerValue) -> bool {
        match (&self.kind, value) {
            (AnswerKind::Enumerated { placeholder, .. }, AnswerValue::Choice(s)) => {
                !s.is_empty() && s != placeholder
            }
            (AnswerKind::Scaled { .. }, _) => true,
            _ => false,
        }
    }

    /// Reject `value` unless it lies in this question's domain.
    pub fn check(&self, value: &AnswerValue) -> Result<(), QuestionnaireError> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(self.out_of_domain(&value.to_string()))
        }
    }

    /// Parse raw user input into a legal value.
    ///
    /// Enumerated input matches case-insensitively and yields the canonical
    /// spelling. Scaled input must be an integer within 1..=5.
    pub fn parse_value(&self, raw: &str) -> Result<AnswerValue, QuestionnaireError> {
        let raw = raw.trim();
        match &self.kind {
            AnswerKind::Enumerated {
                placeholder,
                options,
                ..
            } => std::iter::once(placeholder)
                .chain(options.iter())
                .find(|candidate| candidate.eq_ignore_ascii_case(raw))
                .map(|s| AnswerValue::Choice(s.clone()))
                .ok_or_else(|| self.out_of_domain(raw)),
            AnswerKind::Scaled { .. } => raw
                .parse::<u8>()
                .ok()
                .filter(|n| (SCALE_MIN..=SCALE_MAX).contains(n))
                .map(AnswerValue::Scale)
                .ok_or_else(|| self.out_of_domain(raw)),
        }
    }

    /// Validate the question definition itself.
    pub(crate) fn validate(&self) -> Result<(), QuestionnaireError> {
        let invalid = |message: &str| QuestionnaireError::InvalidManifest {
            key: self.key.clone(),
            message: message.to_string(),
        };
        if self.key.trim().is_empty() {
            return Err(invalid("key is empty"));
        }
        match &self.kind {
            AnswerKind::Enumerated {
                placeholder,
                options,
                default,
            } => {
                if placeholder.is_empty() {
                    return Err(invalid("placeholder is empty"));
                }
                if options.is_empty() {
                    return Err(invalid("no options"));
                }
                for (i, option) in options.iter().enumerate() {
                    if option.is_empty() {
                        return Err(invalid("empty option"));
                    }
                    if option == placeholder {
                        return Err(invalid("placeholder repeated among options"));
                    }
                    if options[..i].contains(option) {
                        return Err(invalid("duplicate option"));
                    }
                }
                if let Some(d) = default {
                    if d != placeholder && !options.contains(d) {
                        return Err(invalid("default is not one of the options"));
                    }
                }
            }
            AnswerKind::Scaled { default } => {
                if !(SCALE_MIN..=SCALE_MAX).contains(default) {
                    return Err(invalid("scaled default must be within 1..=5"));
                }
            }
        }
        Ok(())
    }

    fn expected(&self) -> String {
        match &self.kind {
            AnswerKind::Enumerated {
                placeholder,
                options,
                ..
            } => {
                let all: Vec<&str> = std::iter::once(placeholder.as_str())
                    .chain(options.iter().map(String::as_str))
                    .collect();
                format!("one of [{}]", all.join(", "))
            }
            AnswerKind::Scaled { .. } => format!("an integer {SCALE_MIN}-{SCALE_MAX}"),
        }
    }

    fn out_of_domain(&self, value: &str) -> QuestionnaireError {
        QuestionnaireError::OutOfDomainValue {
            key: self.key.clone(),
            value: value.to_string(),
            expected: self.expected(),
        }
    }
}
