use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::{CallableForm, ThisMode};
use crate::runner::ds::lex_env::{JsLexEnvironmentType, LexEnvironment};
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::{get_property, has_property, set_property};
use crate::runner::ds::value::JsValue;

pub trait EnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool;
    fn create_mutable_binding(&mut self, name: String);
    fn create_immutable_binding(&mut self, name: String);
    fn initialize_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType>;
    fn set_mutable_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType>;
    fn get_binding_value(&self, name: &str) -> Result<JsValue, JErrorType>;
    fn has_this_binding(&self) -> bool;
}

pub enum EnvironmentRecordType {
    Declarative(DeclarativeEnvironmentRecord),
    Object(ObjectEnvironmentRecord),
    Function(FunctionEnvironmentRecord),
    Global(GlobalEnvironmentRecord),
}

impl EnvironmentRecordType {
    pub fn as_env_record(&self) -> &dyn EnvironmentRecord {
        match self {
            EnvironmentRecordType::Declarative(d) => d,
            EnvironmentRecordType::Object(d) => d,
            EnvironmentRecordType::Function(d) => d,
            EnvironmentRecordType::Global(d) => d,
        }
    }

    pub fn as_env_record_mut(&mut self) -> &mut dyn EnvironmentRecord {
        match self {
            EnvironmentRecordType::Declarative(d) => d,
            EnvironmentRecordType::Object(d) => d,
            EnvironmentRecordType::Function(d) => d,
            EnvironmentRecordType::Global(d) => d,
        }
    }

    /// The `this` value this record supplies. Only function records with
    /// their own binding and the global record can answer; callers check
    /// [`EnvironmentRecord::has_this_binding`] first.
    pub fn get_this_binding(&self) -> Result<JsValue, JErrorType> {
        match self {
            EnvironmentRecordType::Function(f) => f.get_this_binding(),
            EnvironmentRecordType::Global(g) => Ok(JsValue::Object(g.get_this_binding().clone())),
            _ => Err(JErrorType::ReferenceError(
                "'this' is not resolvable here".to_string(),
            )),
        }
    }
}

struct Binding {
    /// `None` until the declaration's initializer has run.
    value: Option<JsValue>,
    is_immutable: bool,
}

pub struct DeclarativeEnvironmentRecord {
    bindings: HashMap<String, Binding>,
}

impl DeclarativeEnvironmentRecord {
    pub fn new() -> Self {
        DeclarativeEnvironmentRecord {
            bindings: HashMap::new(),
        }
    }
}

impl EnvironmentRecord for DeclarativeEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    fn create_mutable_binding(&mut self, name: String) {
        self.bindings.entry(name).or_insert(Binding {
            value: None,
            is_immutable: false,
        });
    }

    fn create_immutable_binding(&mut self, name: String) {
        self.bindings.entry(name).or_insert(Binding {
            value: None,
            is_immutable: true,
        });
    }

    fn initialize_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        if let Some(binding) = self.bindings.get_mut(name) {
            if binding.value.is_none() {
                binding.value = Some(value);
            }
        }
        Ok(())
    }

    fn set_mutable_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        match self.bindings.get_mut(name) {
            None => Err(JErrorType::ReferenceError(format!(
                "'{}' is not defined",
                name
            ))),
            Some(binding) => {
                if binding.value.is_none() {
                    Err(JErrorType::ReferenceError(format!(
                        "'{}' is not initialized",
                        name
                    )))
                } else if binding.is_immutable {
                    Err(JErrorType::TypeError(
                        "Assignment to constant variable".to_string(),
                    ))
                } else {
                    binding.value = Some(value);
                    Ok(())
                }
            }
        }
    }

    fn get_binding_value(&self, name: &str) -> Result<JsValue, JErrorType> {
        match self.bindings.get(name) {
            None => Err(JErrorType::ReferenceError(format!(
                "'{}' is not defined",
                name
            ))),
            Some(binding) => match &binding.value {
                None => Err(JErrorType::ReferenceError(format!(
                    "'{}' is not initialized",
                    name
                ))),
                Some(v) => Ok(v.clone()),
            },
        }
    }

    fn has_this_binding(&self) -> bool {
        false
    }
}

/// Bindings backed by an object's properties. The global `var` scope uses
/// this to make declarations visible as properties of the global object.
pub struct ObjectEnvironmentRecord {
    binding_object: JsObjectType,
}

impl ObjectEnvironmentRecord {
    pub fn new(o: JsObjectType) -> Self {
        ObjectEnvironmentRecord { binding_object: o }
    }
}

impl EnvironmentRecord for ObjectEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        has_property(&self.binding_object, &PropertyKey::Str(name.to_string()))
    }

    fn create_mutable_binding(&mut self, name: String) {
        let key = PropertyKey::Str(name);
        let exists = self.binding_object.borrow().base().has_own_property(&key);
        if !exists {
            self.binding_object
                .borrow_mut()
                .base_mut()
                .set_own_property(key, JsValue::Undefined);
        }
    }

    fn create_immutable_binding(&mut self, _name: String) {
        panic!("immutable bindings are not representable on an object record");
    }

    fn initialize_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        self.set_mutable_binding(name, value)
    }

    fn set_mutable_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        set_property(
            &self.binding_object,
            PropertyKey::Str(name.to_string()),
            value,
        )
    }

    fn get_binding_value(&self, name: &str) -> Result<JsValue, JErrorType> {
        let key = PropertyKey::Str(name.to_string());
        if has_property(&self.binding_object, &key) {
            Ok(get_property(&self.binding_object, &key))
        } else {
            Err(JErrorType::ReferenceError(format!(
                "'{}' is not defined",
                name
            )))
        }
    }

    fn has_this_binding(&self) -> bool {
        false
    }
}

/// Scope created for one function invocation. On top of ordinary bindings it
/// owns the `this` slot for that call, unless the function is an arrow, in
/// which case the slot stays disabled and lookups pass through to `outer`.
pub struct FunctionEnvironmentRecord {
    base_env: DeclarativeEnvironmentRecord,
    this_value: Option<JsValue>,
    is_lexical_binding: bool,
}

impl FunctionEnvironmentRecord {
    pub fn new(f: &JsObjectType) -> Self {
        let is_lexical = {
            let obj = f.borrow();
            match obj.as_function() {
                Some(fo) => match fo.callable() {
                    CallableForm::Script(sf) => sf.this_mode == ThisMode::Lexical,
                    _ => false,
                },
                None => false,
            }
        };
        FunctionEnvironmentRecord {
            base_env: DeclarativeEnvironmentRecord::new(),
            this_value: None,
            is_lexical_binding: is_lexical,
        }
    }

    /// Install the receiver for this invocation. Happens exactly once, right
    /// after the environment is created.
    pub fn bind_this_value(&mut self, this: JsValue) -> Result<(), JErrorType> {
        if self.is_lexical_binding {
            return Err(JErrorType::TypeError(
                "cannot bind 'this' of an arrow function".to_string(),
            ));
        }
        if self.this_value.is_some() {
            return Err(JErrorType::ReferenceError(
                "'this' is already initialized".to_string(),
            ));
        }
        self.this_value = Some(this);
        Ok(())
    }

    pub fn get_this_binding(&self) -> Result<JsValue, JErrorType> {
        match &self.this_value {
            Some(this) => Ok(this.clone()),
            None => Err(JErrorType::ReferenceError(
                "'this' is not initialized".to_string(),
            )),
        }
    }
}

impl EnvironmentRecord for FunctionEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        self.base_env.has_binding(name)
    }

    fn create_mutable_binding(&mut self, name: String) {
        self.base_env.create_mutable_binding(name)
    }

    fn create_immutable_binding(&mut self, name: String) {
        self.base_env.create_immutable_binding(name)
    }

    fn initialize_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        self.base_env.initialize_binding(name, value)
    }

    fn set_mutable_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        self.base_env.set_mutable_binding(name, value)
    }

    fn get_binding_value(&self, name: &str) -> Result<JsValue, JErrorType> {
        self.base_env.get_binding_value(name)
    }

    fn has_this_binding(&self) -> bool {
        !self.is_lexical_binding
    }
}

/// The outermost scope. `let`/`const` live in the declarative side; `var`
/// and function declarations surface as properties of the global object,
/// which doubles as the default context object for receiverless calls.
pub struct GlobalEnvironmentRecord {
    object_record: ObjectEnvironmentRecord,
    declarative_record: DeclarativeEnvironmentRecord,
    var_names: Vec<String>,
}

impl GlobalEnvironmentRecord {
    pub fn new(global_object: JsObjectType) -> Self {
        GlobalEnvironmentRecord {
            object_record: ObjectEnvironmentRecord::new(global_object),
            declarative_record: DeclarativeEnvironmentRecord::new(),
            var_names: Vec::new(),
        }
    }

    pub fn get_this_binding(&self) -> &JsObjectType {
        &self.object_record.binding_object
    }

    pub fn has_var_declaration(&self, name: &str) -> bool {
        self.var_names.iter().any(|n| n == name)
    }

    pub fn has_lexical_declaration(&self, name: &str) -> bool {
        self.declarative_record.has_binding(name)
    }

    pub fn create_global_var_binding(&mut self, name: String) -> Result<(), JErrorType> {
        let key = PropertyKey::Str(name.clone());
        let exists = self
            .object_record
            .binding_object
            .borrow()
            .base()
            .has_own_property(&key);
        if !exists {
            self.object_record
                .binding_object
                .borrow_mut()
                .base_mut()
                .set_own_property(key, JsValue::Undefined);
        }
        if !self.has_var_declaration(&name) {
            self.var_names.push(name);
        }
        Ok(())
    }

    pub fn create_global_function_binding(
        &mut self,
        name: String,
        f: JsValue,
    ) -> Result<(), JErrorType> {
        set_property(
            &self.object_record.binding_object,
            PropertyKey::Str(name.clone()),
            f,
        )?;
        if !self.has_var_declaration(&name) {
            self.var_names.push(name);
        }
        Ok(())
    }
}

impl EnvironmentRecord for GlobalEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        self.declarative_record.has_binding(name) || self.object_record.has_binding(name)
    }

    fn create_mutable_binding(&mut self, name: String) {
        self.declarative_record.create_mutable_binding(name)
    }

    fn create_immutable_binding(&mut self, name: String) {
        self.declarative_record.create_immutable_binding(name)
    }

    fn initialize_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        if self.declarative_record.has_binding(name) {
            self.declarative_record.initialize_binding(name, value)
        } else {
            self.object_record.initialize_binding(name, value)
        }
    }

    fn set_mutable_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        if self.declarative_record.has_binding(name) {
            self.declarative_record.set_mutable_binding(name, value)
        } else {
            self.object_record.set_mutable_binding(name, value)
        }
    }

    fn get_binding_value(&self, name: &str) -> Result<JsValue, JErrorType> {
        if self.declarative_record.has_binding(name) {
            self.declarative_record.get_binding_value(name)
        } else {
            self.object_record.get_binding_value(name)
        }
    }

    fn has_this_binding(&self) -> bool {
        true
    }
}

pub fn new_declarative_environment(
    outer_lex: Option<JsLexEnvironmentType>,
) -> JsLexEnvironmentType {
    Rc::new(RefCell::new(LexEnvironment {
        inner: EnvironmentRecordType::Declarative(DeclarativeEnvironmentRecord::new()),
        outer: outer_lex,
    }))
}

/// Environment for one call to `f`. The outer link comes from the closure
/// scope stored on the function object, not from the caller.
pub fn new_function_environment(f: &JsObjectType) -> JsLexEnvironmentType {
    let outer_lex = {
        let obj = f.borrow();
        match obj.as_function() {
            Some(fo) => match fo.callable() {
                CallableForm::Script(sf) => Some(sf.environment.clone()),
                _ => None,
            },
            None => None,
        }
    };
    Rc::new(RefCell::new(LexEnvironment {
        inner: EnvironmentRecordType::Function(FunctionEnvironmentRecord::new(f)),
        outer: outer_lex,
    }))
}

pub fn new_global_environment(global_object: JsObjectType) -> JsLexEnvironmentType {
    Rc::new(RefCell::new(LexEnvironment {
        inner: EnvironmentRecordType::Global(GlobalEnvironmentRecord::new(global_object)),
        outer: None,
    }))
}
