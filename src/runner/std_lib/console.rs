//! The console object: log, error, warn and info.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::object_create;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::realm::CodeRealm;
use crate::runner::ds::value::JsValue;
use crate::runner::api::EvalContext;

use super::core::native_fn_object;

pub fn register(realm: &CodeRealm) {
    let log = native_fn_object(realm, "log", 0, console_log);
    let error = native_fn_object(realm, "error", 0, console_error);
    let warn = native_fn_object(realm, "warn", 0, console_warn);
    let info = native_fn_object(realm, "info", 0, console_info);

    let console = object_create(Some(realm.object_prototype.clone()));
    {
        let mut obj = console.borrow_mut();
        let base = obj.base_mut();
        base.set_own_property(PropertyKey::Str("log".to_string()), JsValue::Object(log));
        base.set_own_property(PropertyKey::Str("error".to_string()), JsValue::Object(error));
        base.set_own_property(PropertyKey::Str("warn".to_string()), JsValue::Object(warn));
        base.set_own_property(PropertyKey::Str("info".to_string()), JsValue::Object(info));
    }
    realm.global_this.borrow_mut().base_mut().set_own_property(
        PropertyKey::Str("console".to_string()),
        JsValue::Object(console),
    );
}

/// Space-joined arguments, each in its display form.
fn format_args(args: &[JsValue]) -> String {
    args.iter()
        .map(to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn console_log(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    println!("{}", format_args(&args));
    Ok(JsValue::Undefined)
}

fn console_error(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    eprintln!("{}", format_args(&args));
    Ok(JsValue::Undefined)
}

fn console_warn(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    eprintln!("Warning: {}", format_args(&args));
    Ok(JsValue::Undefined)
}

/// Same stream as log.
fn console_info(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    println!("{}", format_args(&args));
    Ok(JsValue::Undefined)
}
