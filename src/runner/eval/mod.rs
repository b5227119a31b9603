//! Evaluation of parsed programs: expressions, statements and the call
//! pipeline, plus the completion and reference types they share.

pub mod expression;
pub mod function;
pub mod statement;
pub mod types;

pub use types::{Completion, CompletionType, Reference, ReferenceBase};
