//! Core types threaded through the evaluator.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lex_env::JsLexEnvironmentType;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::value::JsValue;

/// How a statement finished.
///
/// `return` has to unwind through every enclosing block and loop before
/// the call machinery can pick its value up, so statement evaluation
/// reports which of the two outcomes happened. Thrown errors travel
/// separately as `Err(JErrorType)`.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionType {
    Normal,
    Return,
}

/// Completion record produced by every statement evaluation.
pub struct Completion {
    pub completion_type: CompletionType,
    /// Value of the statement, if it produced one. Expression statements
    /// do, declarations do not.
    pub value: Option<JsValue>,
}

impl Completion {
    pub fn normal() -> Self {
        Completion {
            completion_type: CompletionType::Normal,
            value: None,
        }
    }

    pub fn normal_with_value(value: JsValue) -> Self {
        Completion {
            completion_type: CompletionType::Normal,
            value: Some(value),
        }
    }

    pub fn return_value(value: JsValue) -> Self {
        Completion {
            completion_type: CompletionType::Return,
            value: Some(value),
        }
    }

    /// Bare `return;`.
    pub fn return_undefined() -> Self {
        Completion {
            completion_type: CompletionType::Return,
            value: Some(JsValue::Undefined),
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self.completion_type, CompletionType::Normal)
    }

    pub fn is_abrupt(&self) -> bool {
        !self.is_normal()
    }

    /// The carried value, or undefined when the statement produced none.
    pub fn get_value(&self) -> JsValue {
        self.value.clone().unwrap_or(JsValue::Undefined)
    }

    /// Fill in a value only if this completion carries none yet. Keeps
    /// the last expression value of a statement list alive across
    /// trailing declarations.
    pub fn update_empty(self, value: JsValue) -> Self {
        if self.value.is_none() {
            Completion {
                value: Some(value),
                ..self
            }
        } else {
            self
        }
    }
}

/// Where an assignable expression points.
#[derive(Clone)]
pub enum ReferenceBase {
    /// Property slot on a value, usually an object.
    Value(JsValue),
    /// Binding inside an environment record.
    Environment(JsLexEnvironmentType),
    /// Identifier that resolved to nothing.
    Unresolvable,
}

/// The result of evaluating an expression in reference position.
///
/// Member accesses and identifiers evaluate to a `Reference` first so
/// that assignment can write through it and a call can recover its
/// receiver from it.
#[derive(Clone)]
pub struct Reference {
    pub base: ReferenceBase,
    pub referenced_name: PropertyKey,
    pub strict: bool,
    /// Set when the base value came from evaluating `this`. An undefined
    /// base is then reported as an unbound receiver instead of a plain
    /// bad property access.
    pub via_this: bool,
}

impl Reference {
    /// Property reference, `base.name` or `base[expr]`.
    pub fn property(base: JsValue, key: PropertyKey, strict: bool) -> Self {
        Reference {
            base: ReferenceBase::Value(base),
            referenced_name: key,
            strict,
            via_this: false,
        }
    }

    /// Property reference whose base expression was `this`.
    pub fn this_property(base: JsValue, key: PropertyKey, strict: bool) -> Self {
        Reference {
            base: ReferenceBase::Value(base),
            referenced_name: key,
            strict,
            via_this: true,
        }
    }

    /// Reference to a binding in `env`.
    pub fn binding(env: JsLexEnvironmentType, name: &str, strict: bool) -> Self {
        Reference {
            base: ReferenceBase::Environment(env),
            referenced_name: PropertyKey::Str(name.to_string()),
            strict,
            via_this: false,
        }
    }

    /// Identifier that resolved to no binding anywhere on the chain.
    pub fn unresolvable(name: &str, strict: bool) -> Self {
        Reference {
            base: ReferenceBase::Unresolvable,
            referenced_name: PropertyKey::Str(name.to_string()),
            strict,
            via_this: false,
        }
    }

    pub fn is_property_reference(&self) -> bool {
        matches!(self.base, ReferenceBase::Value(_))
    }

    pub fn is_unresolvable(&self) -> bool {
        matches!(self.base, ReferenceBase::Unresolvable)
    }

    /// True for property references whose base is not an object.
    pub fn has_primitive_base(&self) -> bool {
        match &self.base {
            ReferenceBase::Value(v) => !matches!(v, JsValue::Object(_)),
            _ => false,
        }
    }

    /// Referenced name in string form, for messages and binding lookups.
    pub fn referenced_name_str(&self) -> String {
        self.referenced_name.to_string()
    }

    /// Receiver a call through this reference gets: the base object for
    /// property references, undefined otherwise.
    pub fn get_this_value(&self) -> JsValue {
        match &self.base {
            ReferenceBase::Value(base) => base.clone(),
            _ => JsValue::Undefined,
        }
    }
}

/// Result of a statement-level evaluation.
pub type EvalResult = Result<Completion, JErrorType>;

/// Result of a value-producing evaluation.
pub type ValueResult = Result<JsValue, JErrorType>;

/// Result of evaluating an expression in reference position.
pub type ReferenceResult = Result<Reference, JErrorType>;
