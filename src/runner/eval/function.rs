//! Function objects and the call pipeline. Everything about receivers is
//! decided here: what a call was given, what the activation actually binds,
//! and what construction substitutes.

use std::cell::RefCell;
use std::rc::Rc;

use crate::parser::ast::FunctionData;
use crate::parser::static_semantics::var_declared_names;
use crate::runner::api::EvalContext;
use crate::runner::ds::env_record::{new_function_environment, EnvironmentRecordType};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::ExecutionContext;
use crate::runner::ds::function_object::{
    CallableForm, FunctionObject, NativeFn, ScriptFunction, ThisMode,
};
use crate::runner::ds::lex_env::JsLexEnvironmentType;
use crate::runner::ds::object::{object_create, JsObjectType, ObjectBase, ObjectType};
use crate::runner::ds::object_property::{CONSTRUCTOR_PROP, LENGTH_PROP, NAME_PROP, PROTOTYPE_PROP};
use crate::runner::ds::operations::object::get_property;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::value::{JsNumberType, JsValue};

use super::statement::{hoist_function_declarations, run_statement_list};
use super::types::{CompletionType, EvalResult, ValueResult};

pub fn is_callable(value: &JsValue) -> bool {
    matches!(value, JsValue::Object(o) if o.borrow().is_callable())
}

/// Turn a function definition into a callable object closing over the
/// current scope. Strictness is inherited from the surrounding code, and
/// arrows are marked as never binding their own `this`.
pub fn instantiate_function_object(ctx: &EvalContext, function: &Rc<FunctionData>) -> JsValue {
    let environment = ctx.current_lex_env();
    let is_strict = function.body.is_strict || ctx.is_strict_code();
    let this_mode = if function.is_arrow {
        ThisMode::Lexical
    } else if is_strict {
        ThisMode::Strict
    } else {
        ThisMode::Global
    };
    let name = match &function.name {
        Some(id) => id.name.clone(),
        None => String::new(),
    };
    let mut function_object = FunctionObject::new(
        ObjectBase::new_with_prototype(ctx.realm.function_prototype.clone()),
        CallableForm::Script(ScriptFunction {
            function: function.clone(),
            environment,
            this_mode,
            is_strict,
        }),
    );
    function_object
        .base_mut()
        .set_own_property(NAME_PROP.clone(), JsValue::String(name));
    function_object.base_mut().set_own_property(
        LENGTH_PROP.clone(),
        JsValue::Number(JsNumberType::Integer(function.params.len() as i64)),
    );
    let object: JsObjectType = Rc::new(RefCell::new(ObjectType::Function(function_object)));
    if !function.is_arrow {
        // Plain functions double as constructors. Give them the prototype
        // object their instances will inherit from, with the usual
        // constructor back-reference.
        let prototype = object_create(Some(ctx.realm.object_prototype.clone()));
        prototype
            .borrow_mut()
            .base_mut()
            .set_own_property(CONSTRUCTOR_PROP.clone(), JsValue::Object(object.clone()));
        object
            .borrow_mut()
            .base_mut()
            .set_own_property(PROTOTYPE_PROP.clone(), JsValue::Object(prototype));
    }
    JsValue::Object(object)
}

enum Dispatch {
    Script {
        function: Rc<FunctionData>,
        this_mode: ThisMode,
        is_strict: bool,
    },
    Bound {
        target: JsObjectType,
        bound_this: JsValue,
        bound_args: Vec<JsValue>,
    },
    Native(NativeFn),
}

/// Invoke `callee` with an explicit receiver argument. Every call in the
/// evaluator funnels through here, so the receiver is always passed, never
/// ambient: a plain `f()` simply passes undefined.
pub fn call_function(
    ctx: &mut EvalContext,
    callee: &JsValue,
    this_argument: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    let func_obj = match callee {
        JsValue::Object(o) => o.clone(),
        _ => return Err(not_a_function(callee)),
    };
    // Clone the dispatch data out before running anything. The body may
    // mutate the function object it is running under.
    let dispatch = {
        let obj = func_obj.borrow();
        match obj.as_function() {
            Some(function) => match function.callable() {
                CallableForm::Script(sf) => Dispatch::Script {
                    function: sf.function.clone(),
                    this_mode: sf.this_mode,
                    is_strict: sf.is_strict,
                },
                CallableForm::Bound(b) => Dispatch::Bound {
                    target: b.target.clone(),
                    bound_this: b.bound_this.clone(),
                    bound_args: b.bound_args.clone(),
                },
                CallableForm::Native(n) => Dispatch::Native(n.func),
            },
            None => return Err(not_a_function(callee)),
        }
    };
    match dispatch {
        Dispatch::Script {
            function,
            this_mode,
            is_strict,
        } => call_script_function(
            ctx,
            &func_obj,
            function,
            this_mode,
            is_strict,
            this_argument,
            args,
        ),
        Dispatch::Bound {
            target,
            bound_this,
            mut bound_args,
        } => {
            // The caller's receiver is discarded. The bound one wins even
            // when the call came in through call or apply.
            bound_args.extend(args);
            call_function(ctx, &JsValue::Object(target), bound_this, bound_args)
        }
        Dispatch::Native(func) => func(ctx, this_argument, args),
    }
}

fn call_script_function(
    ctx: &mut EvalContext,
    func_obj: &JsObjectType,
    function: Rc<FunctionData>,
    this_mode: ThisMode,
    is_strict: bool,
    this_argument: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if ctx.ctx_stack.depth() >= ctx.options.max_call_depth {
        return Err(JErrorType::RangeError(
            "Maximum call stack size exceeded".to_string(),
        ));
    }
    let local_env = prepare_for_ordinary_call(ctx, func_obj, is_strict);
    let result = match ordinary_call_bind_this(ctx, &local_env, this_mode, this_argument) {
        Ok(()) => ordinary_call_evaluate_body(ctx, &function, args),
        Err(e) => Err(e),
    };
    // The frame pops no matter how the body ended.
    ctx.ctx_stack.pop_running_execution_ctx();
    let completion = result?;
    Ok(match completion.completion_type {
        CompletionType::Return => completion.get_value(),
        CompletionType::Normal => JsValue::Undefined,
    })
}

/// Create the activation environment and push the call's frame. The new
/// environment chains to the function's definition scope, not the caller's.
fn prepare_for_ordinary_call(
    ctx: &mut EvalContext,
    func_obj: &JsObjectType,
    is_strict: bool,
) -> JsLexEnvironmentType {
    let local_env = new_function_environment(func_obj);
    ctx.ctx_stack.push_execution_ctx(ExecutionContext {
        function: Some(func_obj.clone()),
        lex_env: local_env.clone(),
        var_env: local_env.clone(),
        is_strict,
    });
    local_env
}

/// Install the receiver for this activation. Strict functions take the
/// argument exactly as passed, even when nothing was; non-strict ones
/// substitute the default context object for a missing receiver. Arrows
/// skip the step and keep reading `this` from their defining scope.
fn ordinary_call_bind_this(
    ctx: &mut EvalContext,
    local_env: &JsLexEnvironmentType,
    this_mode: ThisMode,
    this_argument: JsValue,
) -> Result<(), JErrorType> {
    let this_value = match this_mode {
        ThisMode::Lexical => return Ok(()),
        ThisMode::Strict => this_argument,
        ThisMode::Global => {
            if this_argument.is_undefined_or_null() {
                JsValue::Object(ctx.realm.global_this.clone())
            } else {
                this_argument
            }
        }
    };
    let mut env = local_env.borrow_mut();
    match &mut env.inner {
        EnvironmentRecordType::Function(record) => record.bind_this_value(this_value),
        _ => Ok(()),
    }
}

fn ordinary_call_evaluate_body(
    ctx: &mut EvalContext,
    function: &Rc<FunctionData>,
    args: Vec<JsValue>,
) -> EvalResult {
    function_declaration_instantiation(ctx, function, args)?;
    run_statement_list(&function.body.statements, ctx)
}

/// Bind parameters to arguments and hoist the body's `var` and function
/// declarations into the activation scope. Later duplicates win, so a
/// repeated parameter name ends up holding the rightmost argument.
fn function_declaration_instantiation(
    ctx: &mut EvalContext,
    function: &Rc<FunctionData>,
    args: Vec<JsValue>,
) -> Result<(), JErrorType> {
    let local_env = ctx.current_lex_env();
    {
        let mut env = local_env.borrow_mut();
        let record = env.inner.as_env_record_mut();
        let mut args = args.into_iter();
        for param in &function.params {
            let value = args.next().unwrap_or(JsValue::Undefined);
            if record.has_binding(&param.name) {
                record.set_mutable_binding(&param.name, value)?;
            } else {
                record.create_mutable_binding(param.name.clone());
                record.initialize_binding(&param.name, value)?;
            }
        }
        for name in var_declared_names(&function.body.statements) {
            if !record.has_binding(&name) {
                record.create_mutable_binding(name.clone());
                record.initialize_binding(&name, JsValue::Undefined)?;
            }
        }
    }
    hoist_function_declarations(&function.body.statements, ctx)
}

enum ConstructDispatch {
    Script {
        function: Rc<FunctionData>,
        this_mode: ThisMode,
        is_strict: bool,
    },
    Bound {
        target: JsObjectType,
        bound_args: Vec<JsValue>,
    },
}

/// `new callee(...)`: allocate an instance inheriting from the callee's
/// prototype property, run the body with the instance as receiver, and let
/// an explicit object return value replace it. Arrows and builtins cannot
/// be constructed; bound functions construct their target.
pub fn construct_function(
    ctx: &mut EvalContext,
    callee: &JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    let func_obj = match callee {
        JsValue::Object(o) => o.clone(),
        _ => return Err(not_a_constructor(callee)),
    };
    let dispatch = {
        let obj = func_obj.borrow();
        match obj.as_function() {
            Some(function) => match function.callable() {
                CallableForm::Script(sf) => {
                    if sf.this_mode == ThisMode::Lexical {
                        return Err(not_a_constructor(callee));
                    }
                    ConstructDispatch::Script {
                        function: sf.function.clone(),
                        this_mode: sf.this_mode,
                        is_strict: sf.is_strict,
                    }
                }
                CallableForm::Bound(b) => ConstructDispatch::Bound {
                    target: b.target.clone(),
                    bound_args: b.bound_args.clone(),
                },
                CallableForm::Native(_) => return Err(not_a_constructor(callee)),
            },
            None => return Err(not_a_constructor(callee)),
        }
    };
    match dispatch {
        ConstructDispatch::Bound {
            target,
            mut bound_args,
        } => {
            // Bound-argument prepending applies to construction too; only
            // the bound receiver is ignored, replaced by the new instance.
            bound_args.extend(args);
            construct_function(ctx, &JsValue::Object(target), bound_args)
        }
        ConstructDispatch::Script {
            function,
            this_mode,
            is_strict,
        } => {
            let prototype = match get_property(&func_obj, &PROTOTYPE_PROP) {
                JsValue::Object(p) => p,
                _ => ctx.realm.object_prototype.clone(),
            };
            let this_object = object_create(Some(prototype));
            let result = call_script_function(
                ctx,
                &func_obj,
                function,
                this_mode,
                is_strict,
                JsValue::Object(this_object.clone()),
                args,
            )?;
            Ok(match result {
                JsValue::Object(o) => JsValue::Object(o),
                _ => JsValue::Object(this_object),
            })
        }
    }
}

fn not_a_function(callee: &JsValue) -> JErrorType {
    JErrorType::TypeError(format!("{} is not a function", to_string(callee)))
}

fn not_a_constructor(callee: &JsValue) -> JErrorType {
    JErrorType::TypeError(format!("{} is not a constructor", to_string(callee)))
}
