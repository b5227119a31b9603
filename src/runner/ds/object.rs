use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::runner::ds::array_object::ArrayObject;
use crate::runner::ds::function_object::FunctionObject;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::value::JsValue;

/// Shared handle to a heap object. Everything that can appear on the heap
/// goes through this one type so receivers, prototypes and bindings can all
/// point at the same allocation.
pub type JsObjectType = Rc<RefCell<ObjectType>>;

/// Heap object. The variants share [`ObjectBase`] for named properties and
/// the prototype link; functions and arrays add the state their kind needs.
pub enum ObjectType {
    Ordinary(ObjectBase),
    Function(FunctionObject),
    Array(ArrayObject),
}

impl ObjectType {
    pub fn base(&self) -> &ObjectBase {
        match self {
            ObjectType::Ordinary(b) => b,
            ObjectType::Function(f) => f.base(),
            ObjectType::Array(a) => a.base(),
        }
    }

    pub fn base_mut(&mut self) -> &mut ObjectBase {
        match self {
            ObjectType::Ordinary(b) => b,
            ObjectType::Function(f) => f.base_mut(),
            ObjectType::Array(a) => a.base_mut(),
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, ObjectType::Function(_))
    }

    pub fn as_function(&self) -> Option<&FunctionObject> {
        match self {
            ObjectType::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut FunctionObject> {
        match self {
            ObjectType::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayObject> {
        match self {
            ObjectType::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayObject> {
        match self {
            ObjectType::Array(a) => Some(a),
            _ => None,
        }
    }

    /// ToString rendering of the object itself. Array elements are joined by
    /// [`to_string`](crate::runner::ds::operations::type_conversion::to_string);
    /// this only covers the non-recursive cases.
    pub fn to_display_string(&self) -> String {
        match self {
            ObjectType::Ordinary(_) => "[object Object]".to_string(),
            ObjectType::Function(f) => f.to_display_string(),
            ObjectType::Array(a) => format!("[array of {}]", a.len()),
        }
    }
}

/// Property storage common to all object kinds. Insertion order is kept so
/// enumeration matches creation order, the way object literals read.
pub struct ObjectBase {
    properties: IndexMap<PropertyKey, JsValue>,
    prototype: Option<JsObjectType>,
}

impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: IndexMap::new(),
            prototype: None,
        }
    }

    pub fn new_with_prototype(prototype: JsObjectType) -> Self {
        ObjectBase {
            properties: IndexMap::new(),
            prototype: Some(prototype),
        }
    }

    pub fn get_own_property(&self, key: &PropertyKey) -> Option<&JsValue> {
        self.properties.get(key)
    }

    pub fn set_own_property(&mut self, key: PropertyKey, value: JsValue) {
        self.properties.insert(key, value);
    }

    pub fn has_own_property(&self, key: &PropertyKey) -> bool {
        self.properties.contains_key(key)
    }

    pub fn delete_own_property(&mut self, key: &PropertyKey) -> bool {
        self.properties.shift_remove(key).is_some()
    }

    /// Integer keys first in ascending order, then string keys in insertion
    /// order.
    pub fn own_property_keys(&self) -> Vec<PropertyKey> {
        let mut int_keys = vec![];
        let mut str_keys = vec![];
        for key in self.properties.keys() {
            match key {
                PropertyKey::Int(i) => int_keys.push(*i),
                PropertyKey::Str(s) => str_keys.push(s.clone()),
            }
        }
        int_keys.sort_unstable();

        let mut result: Vec<PropertyKey> = int_keys.into_iter().map(PropertyKey::Int).collect();
        result.extend(str_keys.into_iter().map(PropertyKey::Str));
        result
    }

    pub fn prototype(&self) -> Option<&JsObjectType> {
        self.prototype.as_ref()
    }

    pub fn set_prototype(&mut self, prototype: Option<JsObjectType>) {
        self.prototype = prototype;
    }
}

/// Fresh ordinary object with the given prototype.
pub fn object_create(prototype: Option<JsObjectType>) -> JsObjectType {
    let base = match prototype {
        Some(p) => ObjectBase::new_with_prototype(p),
        None => ObjectBase::new(),
    };
    Rc::new(RefCell::new(ObjectType::Ordinary(base)))
}
