//! The runtime: data structures, the evaluator and the standard library,
//! fronted by [`api::EvalContext`].

pub mod api;
pub mod ds;
pub mod eval;
pub mod std_lib;
