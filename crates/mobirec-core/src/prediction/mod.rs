mod assets;
mod http;
pub mod traits;

pub use assets::{AppAsset, Recommendation};
pub use http::HttpPredictor;
pub use traits::Predictor;
