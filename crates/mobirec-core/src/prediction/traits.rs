use std::future::Future;

use crate::error::PredictionError;
use crate::questionnaire::AnswerRecord;

/// The external recommendation service.
///
/// Implementations receive a detached snapshot of every answer and return
/// the recommendation label. Any failure is a `PredictionError`; callers do
/// not distinguish between the variants beyond reporting them.
pub trait Predictor: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn predict(
        &self,
        record: &AnswerRecord,
    ) -> impl Future<Output = Result<String, PredictionError>> + Send;
}
