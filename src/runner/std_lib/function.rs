//! call, apply and bind, the three ways code overrides receiver selection.
//! They live on the shared function prototype, so every function object
//! inherits them.

use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::api::EvalContext;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::{BoundFunction, CallableForm, FunctionObject};
use crate::runner::ds::object::{ObjectBase, ObjectType};
use crate::runner::ds::object_property::{LENGTH_PROP, NAME_PROP, PropertyKey};
use crate::runner::ds::operations::object::create_list_from_array_like;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::realm::CodeRealm;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::eval::function::{call_function, is_callable};

use super::core::native_fn_object;

pub fn register(realm: &CodeRealm) {
    let call = native_fn_object(realm, "call", 1, function_call);
    let apply = native_fn_object(realm, "apply", 2, function_apply);
    let bind = native_fn_object(realm, "bind", 1, function_bind);

    let mut prototype = realm.function_prototype.borrow_mut();
    let base = prototype.base_mut();
    base.set_own_property(PropertyKey::Str("call".to_string()), JsValue::Object(call));
    base.set_own_property(PropertyKey::Str("apply".to_string()), JsValue::Object(apply));
    base.set_own_property(PropertyKey::Str("bind".to_string()), JsValue::Object(bind));
}

/// The first argument names the receiver; everything after it is passed
/// through as the argument list.
fn function_call(
    ctx: &mut EvalContext,
    this: JsValue,
    mut args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    if !is_callable(&this) {
        return Err(JErrorType::TypeError(format!(
            "{} is not a function",
            to_string(&this)
        )));
    }
    let this_argument = if args.is_empty() {
        JsValue::Undefined
    } else {
        args.remove(0)
    };
    call_function(ctx, &this, this_argument, args)
}

/// Like call, but the arguments arrive as one array-like value. undefined
/// and null spread to an empty list; any other non-object is rejected.
fn function_apply(
    ctx: &mut EvalContext,
    this: JsValue,
    mut args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    if !is_callable(&this) {
        return Err(JErrorType::TypeError(format!(
            "{} is not a function",
            to_string(&this)
        )));
    }
    let this_argument = if args.is_empty() {
        JsValue::Undefined
    } else {
        args.remove(0)
    };
    let call_args = match args.first() {
        None => Vec::new(),
        Some(v) if v.is_undefined_or_null() => Vec::new(),
        Some(v) => create_list_from_array_like(v)?,
    };
    call_function(ctx, &this, this_argument, call_args)
}

/// Make a callable with a fixed receiver and leading arguments. The result
/// has no prototype property of its own; constructing it goes through the
/// target. Rebinding the result never changes the receiver, because the
/// inner bound function keeps discarding whatever it is handed.
fn function_bind(
    ctx: &mut EvalContext,
    this: JsValue,
    mut args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let target = match &this {
        JsValue::Object(o) if o.borrow().is_callable() => o.clone(),
        _ => {
            return Err(JErrorType::TypeError(
                "Bind must be called on a function".to_string(),
            ))
        }
    };
    let bound_this = if args.is_empty() {
        JsValue::Undefined
    } else {
        args.remove(0)
    };
    let bound_args = args;

    let (target_name, target_length) = {
        let obj = target.borrow();
        let name = match obj.as_function() {
            Some(function) => function.function_name(),
            None => String::new(),
        };
        let length = match obj.base().get_own_property(&LENGTH_PROP) {
            Some(JsValue::Number(JsNumberType::Integer(i))) => *i,
            _ => 0,
        };
        (name, length)
    };
    let name = format!("bound {}", target_name);
    let length = (target_length - bound_args.len() as i64).max(0);

    let mut function_object = FunctionObject::new(
        ObjectBase::new_with_prototype(ctx.realm.function_prototype.clone()),
        CallableForm::Bound(BoundFunction {
            name: name.clone(),
            target,
            bound_this,
            bound_args,
        }),
    );
    function_object
        .base_mut()
        .set_own_property(NAME_PROP.clone(), JsValue::String(name));
    function_object.base_mut().set_own_property(
        LENGTH_PROP.clone(),
        JsValue::Number(JsNumberType::Integer(length)),
    );
    Ok(JsValue::Object(Rc::new(RefCell::new(
        ObjectType::Function(function_object),
    ))))
}
