//! Builtin registration and the helper that wraps a native function in a
//! callable heap object.

use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::function_object::{CallableForm, FunctionObject, NativeFn, NativeFunction};
use crate::runner::ds::object::{JsObjectType, ObjectBase, ObjectType};
use crate::runner::ds::object_property::{LENGTH_PROP, NAME_PROP};
use crate::runner::ds::realm::CodeRealm;
use crate::runner::ds::value::{JsNumberType, JsValue};

use super::console;
use super::function;

/// Install every builtin into the realm. Runs once during context setup,
/// after the intrinsic prototypes exist and before any code does.
pub fn register_builtins(realm: &CodeRealm) {
    function::register(realm);
    console::register(realm);
}

/// Wrap `func` as a function object with the standard name and length
/// properties.
pub(super) fn native_fn_object(
    realm: &CodeRealm,
    name: &str,
    length: usize,
    func: NativeFn,
) -> JsObjectType {
    let mut function_object = FunctionObject::new(
        ObjectBase::new_with_prototype(realm.function_prototype.clone()),
        CallableForm::Native(NativeFunction {
            name: name.to_string(),
            func,
        }),
    );
    function_object
        .base_mut()
        .set_own_property(NAME_PROP.clone(), JsValue::String(name.to_string()));
    function_object.base_mut().set_own_property(
        LENGTH_PROP.clone(),
        JsValue::Number(JsNumberType::Integer(length as i64)),
    );
    Rc::new(RefCell::new(ObjectType::Function(function_object)))
}
