use std::rc::Rc;

use crate::parser::ast::FunctionData;
use crate::runner::api::EvalContext;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lex_env::JsLexEnvironmentType;
use crate::runner::ds::object::{JsObjectType, ObjectBase};
use crate::runner::ds::value::JsValue;

/// How a function resolves `this` when entered.
///
/// `Global` substitutes the default context object for a missing receiver,
/// `Strict` takes whatever was passed (including nothing), and `Lexical`
/// never binds `this` at all, leaving lookups to the defining scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThisMode {
    Global,
    Strict,
    Lexical,
}

/// Signature of a builtin. Receives the evaluation context, the receiver
/// (`this`) and the argument list.
pub type NativeFn =
    fn(ctx: &mut EvalContext, this: JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType>;

/// A callable heap object: properties plus one of the three callable forms.
pub struct FunctionObject {
    base: ObjectBase,
    callable: CallableForm,
}

impl FunctionObject {
    pub fn new(base: ObjectBase, callable: CallableForm) -> Self {
        FunctionObject { base, callable }
    }

    pub fn base(&self) -> &ObjectBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    pub fn callable(&self) -> &CallableForm {
        &self.callable
    }

    /// Diagnostic name. Empty for anonymous functions.
    pub fn function_name(&self) -> String {
        match &self.callable {
            CallableForm::Script(f) => match &f.function.name {
                Some(id) => id.name.clone(),
                None => String::new(),
            },
            CallableForm::Bound(b) => b.name.clone(),
            CallableForm::Native(n) => n.name.clone(),
        }
    }

    pub fn to_display_string(&self) -> String {
        match &self.callable {
            CallableForm::Script(_) => {
                format!("function {}() {{ ... }}", self.function_name())
            }
            CallableForm::Bound(_) | CallableForm::Native(_) => {
                format!("function {}() {{ [native code] }}", self.function_name())
            }
        }
    }
}

pub enum CallableForm {
    Script(ScriptFunction),
    Bound(BoundFunction),
    Native(NativeFunction),
}

/// Function defined by source code. Carries the definition-site environment
/// so the body closes over the scope it was written in.
pub struct ScriptFunction {
    pub function: Rc<FunctionData>,
    pub environment: JsLexEnvironmentType,
    pub this_mode: ThisMode,
    pub is_strict: bool,
}

/// Result of rebinding: a fixed receiver, optional leading arguments, and
/// the callable they apply to. `target` is itself a function object.
pub struct BoundFunction {
    pub name: String,
    pub target: JsObjectType,
    pub bound_this: JsValue,
    pub bound_args: Vec<JsValue>,
}

pub struct NativeFunction {
    pub name: String,
    pub func: NativeFn,
}
