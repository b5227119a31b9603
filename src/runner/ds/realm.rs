use crate::runner::ds::env_record::new_global_environment;
use crate::runner::ds::lex_env::JsLexEnvironmentType;
use crate::runner::ds::object::{object_create, JsObjectType};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::value::{JsNumberType, JsValue};

/// One isolated world of execution: the global object, its environment and
/// the intrinsic prototypes. The global object is also the default context
/// object, the receiver substituted when a non-strict call arrives without
/// one.
pub struct CodeRealm {
    pub global_this: JsObjectType,
    pub global_env: JsLexEnvironmentType,
    pub object_prototype: JsObjectType,
    pub function_prototype: JsObjectType,
}

impl CodeRealm {
    pub fn new() -> Self {
        let object_prototype = object_create(None);
        let function_prototype = object_create(Some(object_prototype.clone()));
        let global_this = object_create(Some(object_prototype.clone()));
        let global_env = new_global_environment(global_this.clone());
        CodeRealm {
            global_this,
            global_env,
            object_prototype,
            function_prototype,
        }
    }
}

impl Default for CodeRealm {
    fn default() -> Self {
        CodeRealm::new()
    }
}

/// Value properties every program can rely on. Builtin functions are
/// installed separately by the standard library setup.
pub fn set_default_global_bindings(realm: &CodeRealm) {
    let mut global = realm.global_this.borrow_mut();
    let base = global.base_mut();
    base.set_own_property(
        PropertyKey::Str("Infinity".to_string()),
        JsValue::Number(JsNumberType::PositiveInfinity),
    );
    base.set_own_property(
        PropertyKey::Str("NaN".to_string()),
        JsValue::Number(JsNumberType::NaN),
    );
    base.set_own_property(
        PropertyKey::Str("undefined".to_string()),
        JsValue::Undefined,
    );
    base.set_own_property(
        PropertyKey::Str("globalThis".to_string()),
        JsValue::Object(realm.global_this.clone()),
    );
    // Node-style alias for the same object.
    base.set_own_property(
        PropertyKey::Str("global".to_string()),
        JsValue::Object(realm.global_this.clone()),
    );
}
