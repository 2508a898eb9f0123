//! Records exchanged with the catalog service.

mod algorithm;
mod question;
mod tag;

pub use algorithm::{Algorithm, AlgorithmDraft, AlgorithmId};
pub use question::{Question, QuizOption, QuizPayload};
pub use tag::Tag;
