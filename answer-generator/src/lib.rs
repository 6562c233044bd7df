//! Support-answer generation on top of the completion client.
//!
//! Public API: [`AnswerGenerator::generate`]. It renders account records into a
//! context block, wraps it in the fixed support prompt, asks the model once and
//! returns the trimmed answer.

mod error;
mod generator;
pub mod prompt;

pub use error::AnswerError;
pub use generator::AnswerGenerator;
