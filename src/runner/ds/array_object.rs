use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::object::{JsObjectType, ObjectBase, ObjectType};
use crate::runner::ds::value::JsValue;

/// Dense array. Elements live in a `Vec`; named (non-index) properties fall
/// back to the shared [`ObjectBase`]. Writing past the end fills the gap
/// with `undefined`.
pub struct ArrayObject {
    base: ObjectBase,
    elements: Vec<JsValue>,
}

impl ArrayObject {
    pub fn new(base: ObjectBase, elements: Vec<JsValue>) -> Self {
        ArrayObject { base, elements }
    }

    pub fn base(&self) -> &ObjectBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[JsValue] {
        &self.elements
    }

    pub fn get_element(&self, index: u32) -> Option<&JsValue> {
        self.elements.get(index as usize)
    }

    pub fn set_element(&mut self, index: u32, value: JsValue) {
        let index = index as usize;
        if index >= self.elements.len() {
            self.elements.resize(index + 1, JsValue::Undefined);
        }
        self.elements[index] = value;
    }

    /// Assigning `length` truncates or extends, the same as writing the
    /// property does on a real array.
    pub fn set_length(&mut self, new_len: u32) {
        self.elements.resize(new_len as usize, JsValue::Undefined);
    }
}

/// Fresh array holding `elements`, with the given prototype on its base.
pub fn array_create(elements: Vec<JsValue>, prototype: Option<JsObjectType>) -> JsObjectType {
    let base = match prototype {
        Some(p) => ObjectBase::new_with_prototype(p),
        None => ObjectBase::new(),
    };
    Rc::new(RefCell::new(ObjectType::Array(ArrayObject::new(
        base, elements,
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::value::JsNumberType;

    #[test]
    fn writing_past_the_end_fills_with_undefined() {
        let mut a = ArrayObject::new(ObjectBase::new(), vec![]);
        a.set_element(2, JsValue::Number(JsNumberType::Integer(7)));
        assert_eq!(a.len(), 3);
        assert_eq!(a.get_element(0), Some(&JsValue::Undefined));
        assert_eq!(a.get_element(1), Some(&JsValue::Undefined));
        assert_eq!(
            a.get_element(2),
            Some(&JsValue::Number(JsNumberType::Integer(7)))
        );
    }
}
