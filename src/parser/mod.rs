mod api;
pub mod ast;
pub(crate) mod static_semantics;
#[cfg(test)]
mod unit_tests;

pub use api::{JsParser, Rule};
