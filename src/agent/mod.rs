//! The question-answering core: candidate selection and the self-correction
//! controller.

mod controller;
pub mod selector;

pub use controller::{Agent, Answer, Attempt, QuestionOutcome};
pub use selector::{score, select_best, Selection, SelectionOutcome};
