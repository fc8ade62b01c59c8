//! Answer store: one live value per manifest question.
//!
//! Keys are fixed when the store is created. Values change in place and
//! every key always holds exactly one legal value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::manifest::Questionnaire;
use super::question::AnswerValue;
use crate::error::QuestionnaireError;

/// Immutable, ordered copy of every answer, as sent to the predictor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord(IndexMap<String, AnswerValue>);

impl AnswerRecord {
    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug, Clone)]
pub struct AnswerStore {
    questionnaire: Arc<Questionnaire>,
    values: IndexMap<String, AnswerValue>,
}

impl AnswerStore {
    /// Create a store holding every question's default.
    pub fn new(questionnaire: Arc<Questionnaire>) -> Self {
        let values = defaults(&questionnaire);
        Self {
            questionnaire,
            values,
        }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn get(&self, key: &str) -> Result<&AnswerValue, QuestionnaireError> {
        self.values
            .get(key)
            .ok_or_else(|| QuestionnaireError::UnknownKey(key.to_string()))
    }

    /// Overwrite one value. Rejected values leave the store untouched.
    pub fn set(&mut self, key: &str, value: AnswerValue) -> Result<(), QuestionnaireError> {
        self.questionnaire.find(key)?.check(&value)?;
        let slot = self
            .values
            .get_mut(key)
            .ok_or_else(|| QuestionnaireError::UnknownKey(key.to_string()))?;
        *slot = value;
        Ok(())
    }

    pub fn is_answered(&self, key: &str) -> Result<bool, QuestionnaireError> {
        let question = self.questionnaire.find(key)?;
        Ok(question.is_answered_by(self.get(key)?))
    }

    pub fn answered_count(&self) -> usize {
        self.questionnaire
            .questions()
            .iter()
            .zip(self.values.values())
            .filter(|(q, v)| q.is_answered_by(v))
            .count()
    }

    pub fn snapshot(&self) -> AnswerRecord {
        AnswerRecord(self.values.clone())
    }

    pub fn reset(&mut self) {
        self.values = defaults(&self.questionnaire);
    }

    /// Values in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn defaults(questionnaire: &Questionnaire) -> IndexMap<String, AnswerValue> {
    questionnaire
        .questions()
        .iter()
        .map(|q| (q.key.clone(), q.default_value()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::question::{Question, SELECT_AN_OPTION};

    fn store() -> AnswerStore {
        let q = Questionnaire::new(vec![
            Question::enumerated("q1", "Q1 text", SELECT_AN_OPTION, &["yes", "no"]),
            Question::scaled("q2", "Q2 text", 3),
        ])
        .unwrap();
        AnswerStore::new(Arc::new(q))
    }

    #[test]
    fn starts_at_defaults() {
        let s = store();
        assert_eq!(s.get("q1").unwrap(), &AnswerValue::from(SELECT_AN_OPTION));
        assert_eq!(s.get("q2").unwrap(), &AnswerValue::Scale(3));
        assert!(!s.is_answered("q1").unwrap());
        assert!(s.is_answered("q2").unwrap());
        assert_eq!(s.answered_count(), 1);
    }

    #[test]
    fn set_updates_in_place() {
        let mut s = store();
        s.set("q1", "yes".into()).unwrap();
        assert!(s.is_answered("q1").unwrap());
        assert_eq!(s.iter().map(|(k, _)| k).collect::<Vec<_>>(), ["q1", "q2"]);
    }

    #[test]
    fn unknown_key_is_reported() {
        let mut s = store();
        assert_eq!(
            s.get("q3"),
            Err(QuestionnaireError::UnknownKey("q3".into()))
        );
        assert!(s.set("q3", "yes".into()).is_err());
        assert!(s.is_answered("q3").is_err());
    }

    #[test]
    fn out_of_domain_value_leaves_store_untouched() {
        let mut s = store();
        let before = s.snapshot();
        assert!(matches!(
            s.set("q2", AnswerValue::Scale(6)),
            Err(QuestionnaireError::OutOfDomainValue { .. })
        ));
        assert!(s.set("q1", "maybe".into()).is_err());
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut s = store();
        let snap = s.snapshot();
        s.set("q2", AnswerValue::Scale(5)).unwrap();
        assert_eq!(snap.get("q2"), Some(&AnswerValue::Scale(3)));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut s = store();
        s.set("q1", "no".into()).unwrap();
        s.set("q2", AnswerValue::Scale(1)).unwrap();
        s.reset();
        assert_eq!(s.snapshot(), store().snapshot());
    }

    #[test]
    fn record_serializes_in_manifest_order() {
        let mut s = store();
        s.set("q1", "yes".into()).unwrap();
        let json = serde_json::to_string(&s.snapshot()).unwrap();
        assert_eq!(json, r#"{"q1":"yes","q2":3}"#);
    }
}
