//! # thus - a receiver-binding playground engine
//!
//! A small JavaScript-flavoured engine built around one question: when a
//! function runs, what is `this`? It features:
//! - PEG parser producing an ESTree-style AST
//! - Tree-walking interpreter with explicit receiver threading
//! - call / apply / bind on a shared function prototype
//! - Strict mode, where a missing receiver stays missing and dereferencing
//!   it raises an unbound receiver error
//!
//! ## Quick Start
//!
//! ### Parsing
//!
//! ```
//! use thus::parser::JsParser;
//!
//! let ast = JsParser::parse_to_ast_from_str("var x = 5 + 3;").unwrap();
//! assert_eq!(ast.body.len(), 1);
//! ```
//!
//! ### Running code
//!
//! ```
//! use thus::runner::api::EvalContext;
//! use thus::runner::ds::value::{JsNumberType, JsValue};
//!
//! let mut ctx = EvalContext::new();
//! let code = "
//!     var counter = { count: 0 };
//!     counter.bump = function (n) {
//!         this.count = this.count + n;
//!         return this.count;
//!     };
//!     counter.bump(5);
//! ";
//! let result = ctx.eval_source(code).unwrap();
//! assert_eq!(result, JsValue::Number(JsNumberType::Integer(5)));
//! ```
//!
//! The context survives across calls, so a REPL is just `eval_source` in a
//! loop against one [`runner::api::EvalContext`].
//!
//! ## Architecture
//!
//! - **[`parser`]** - PEG parser and AST types
//! - **[`runner`]** - The runtime
//!   - **[`runner::ds`]** - Values, objects, environments, realms
//!   - **[`runner::eval`]** - Interpreter and the call pipeline
//!   - **[`runner::std_lib`]** - console and the function prototype builtins

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
