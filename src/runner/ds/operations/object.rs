use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsObjectType, ObjectType};
use crate::runner::ds::object_property::{PropertyKey, LENGTH_PROP};
use crate::runner::ds::operations::type_conversion::to_number;
use crate::runner::ds::value::{JsNumberType, JsValue};

/// Property lookup through the prototype chain. Missing properties read as
/// `undefined`. Array element and `length` reads are answered from the
/// element store before named properties are consulted.
pub fn get_property(o: &JsObjectType, key: &PropertyKey) -> JsValue {
    let mut current = o.clone();
    loop {
        let next = {
            let obj = current.borrow();
            if let ObjectType::Array(a) = &*obj {
                if let PropertyKey::Int(i) = key {
                    if let Some(v) = a.get_element(*i) {
                        return v.clone();
                    }
                }
                if *key == *LENGTH_PROP {
                    return JsValue::Number(JsNumberType::Integer(a.len() as i64));
                }
            }
            if let Some(v) = obj.base().get_own_property(key) {
                return v.clone();
            }
            match obj.base().prototype() {
                Some(p) => p.clone(),
                None => return JsValue::Undefined,
            }
        };
        current = next;
    }
}

pub fn has_property(o: &JsObjectType, key: &PropertyKey) -> bool {
    let mut current = o.clone();
    loop {
        let next = {
            let obj = current.borrow();
            if let ObjectType::Array(a) = &*obj {
                if let PropertyKey::Int(i) = key {
                    if (*i as usize) < a.len() {
                        return true;
                    }
                }
                if *key == *LENGTH_PROP {
                    return true;
                }
            }
            if obj.base().has_own_property(key) {
                return true;
            }
            match obj.base().prototype() {
                Some(p) => p.clone(),
                None => return false,
            }
        };
        current = next;
    }
}

/// Property write. Always lands on the receiver itself; the prototype chain
/// is never mutated through it. Array index and `length` writes go to the
/// element store.
pub fn set_property(
    o: &JsObjectType,
    key: PropertyKey,
    value: JsValue,
) -> Result<(), JErrorType> {
    let mut obj = o.borrow_mut();
    if let ObjectType::Array(a) = &mut *obj {
        if let PropertyKey::Int(i) = key {
            a.set_element(i, value);
            return Ok(());
        }
        if key == *LENGTH_PROP {
            let len = array_length_value(&value)?;
            a.set_length(len);
            return Ok(());
        }
    }
    obj.base_mut().set_own_property(key, value);
    Ok(())
}

fn array_length_value(value: &JsValue) -> Result<u32, JErrorType> {
    let invalid = || JErrorType::RangeError("Invalid array length".to_string());
    match to_number(value) {
        JsNumberType::Integer(i) if i >= 0 && i <= u32::MAX as i64 => Ok(i as u32),
        JsNumberType::Float(f) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => {
            Ok(f as u32)
        }
        _ => Err(invalid()),
    }
}

/// Materialize the argument list for a spread-style call: indexed reads up
/// to `length`. Anything without a usable `length` is rejected.
pub fn create_list_from_array_like(v: &JsValue) -> Result<Vec<JsValue>, JErrorType> {
    let o = match v {
        JsValue::Object(o) => o,
        _ => {
            return Err(JErrorType::TypeError(
                "CreateListFromArrayLike called on non-object".to_string(),
            ))
        }
    };
    let len = match to_number(&get_property(o, &LENGTH_PROP)) {
        JsNumberType::Integer(i) if i >= 0 => i as u32,
        JsNumberType::Float(f) if f >= 0.0 => f as u32,
        _ => 0,
    };
    let mut list = Vec::with_capacity(len as usize);
    for i in 0..len {
        list.push(get_property(o, &PropertyKey::Int(i)));
    }
    Ok(list)
}
