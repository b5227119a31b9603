use std::cmp::Ordering;
use std::rc::Rc;

use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::operations::type_conversion::{number_to_f64, to_number, to_primitive};
use crate::runner::ds::value::{JsNumberType, JsValue};

pub fn same_object(a: &JsObjectType, b: &JsObjectType) -> bool {
    Rc::ptr_eq(a, b)
}

/// `===`. Numbers compare numerically across the integer/float split;
/// `NaN` is unequal to everything including itself; objects compare by
/// identity.
pub fn strict_equality_comparison(a: &JsValue, b: &JsValue) -> bool {
    match (a, b) {
        (JsValue::Undefined, JsValue::Undefined) => true,
        (JsValue::Null, JsValue::Null) => true,
        (JsValue::Boolean(x), JsValue::Boolean(y)) => x == y,
        (JsValue::String(x), JsValue::String(y)) => x == y,
        (JsValue::Number(x), JsValue::Number(y)) => number_equality(x, y, false),
        (JsValue::Object(x), JsValue::Object(y)) => same_object(x, y),
        _ => false,
    }
}

/// SameValue: like `===` except `NaN` equals `NaN`. Used by tests and
/// anywhere identity of stored values matters.
pub fn same_value(a: &JsValue, b: &JsValue) -> bool {
    match (a, b) {
        (JsValue::Number(x), JsValue::Number(y)) => number_equality(x, y, true),
        _ => strict_equality_comparison(a, b),
    }
}

fn number_equality(a: &JsNumberType, b: &JsNumberType, nan_is_equal: bool) -> bool {
    match (a, b) {
        (JsNumberType::NaN, JsNumberType::NaN) => nan_is_equal,
        (JsNumberType::NaN, _) | (_, JsNumberType::NaN) => false,
        _ => number_to_f64(a) == number_to_f64(b),
    }
}

/// `==`. Same-type operands defer to strict equality; otherwise the usual
/// coercions apply: `null`/`undefined` match each other, strings and
/// booleans become numbers, objects become primitives.
pub fn abstract_equality_comparison(a: &JsValue, b: &JsValue) -> bool {
    match (a, b) {
        (JsValue::Undefined, JsValue::Undefined)
        | (JsValue::Null, JsValue::Null)
        | (JsValue::Boolean(_), JsValue::Boolean(_))
        | (JsValue::String(_), JsValue::String(_))
        | (JsValue::Number(_), JsValue::Number(_))
        | (JsValue::Object(_), JsValue::Object(_)) => strict_equality_comparison(a, b),
        (JsValue::Undefined, JsValue::Null) | (JsValue::Null, JsValue::Undefined) => true,
        (JsValue::Number(_), JsValue::String(_)) => {
            number_equality(&to_number(a), &to_number(b), false)
        }
        (JsValue::String(_), JsValue::Number(_)) => {
            number_equality(&to_number(a), &to_number(b), false)
        }
        (JsValue::Boolean(_), _) => {
            abstract_equality_comparison(&JsValue::Number(to_number(a)), b)
        }
        (_, JsValue::Boolean(_)) => {
            abstract_equality_comparison(a, &JsValue::Number(to_number(b)))
        }
        (JsValue::Object(_), JsValue::String(_)) | (JsValue::Object(_), JsValue::Number(_)) => {
            abstract_equality_comparison(&to_primitive(a), b)
        }
        (JsValue::String(_), JsValue::Object(_)) | (JsValue::Number(_), JsValue::Object(_)) => {
            abstract_equality_comparison(a, &to_primitive(b))
        }
        _ => false,
    }
}

/// Ordering for the relational operators. `None` means the comparison is
/// undefined (a `NaN` was involved), which makes every relational operator
/// answer false.
pub fn relational_comparison(a: &JsValue, b: &JsValue) -> Option<Ordering> {
    let pa = to_primitive(a);
    let pb = to_primitive(b);
    if let (JsValue::String(sa), JsValue::String(sb)) = (&pa, &pb) {
        return Some(sa.cmp(sb));
    }
    let na = to_number(&pa);
    let nb = to_number(&pb);
    if matches!(na, JsNumberType::NaN) || matches!(nb, JsNumberType::NaN) {
        return None;
    }
    number_to_f64(&na).partial_cmp(&number_to_f64(&nb))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(i: i64) -> JsValue {
        JsValue::Number(JsNumberType::Integer(i))
    }

    #[test]
    fn strict_equality_across_number_forms() {
        assert!(strict_equality_comparison(
            &int(2),
            &JsValue::Number(JsNumberType::Float(2.0))
        ));
        assert!(!strict_equality_comparison(
            &JsValue::Number(JsNumberType::NaN),
            &JsValue::Number(JsNumberType::NaN)
        ));
        assert!(!strict_equality_comparison(
            &int(0),
            &JsValue::String("0".to_string())
        ));
    }

    #[test]
    fn loose_equality_coercions() {
        assert!(abstract_equality_comparison(&JsValue::Null, &JsValue::Undefined));
        assert!(abstract_equality_comparison(
            &int(0),
            &JsValue::String("0".to_string())
        ));
        assert!(abstract_equality_comparison(
            &JsValue::Boolean(true),
            &int(1)
        ));
        assert!(!abstract_equality_comparison(&JsValue::Null, &int(0)));
    }

    #[test]
    fn relational_ordering() {
        assert_eq!(relational_comparison(&int(1), &int(2)), Some(Ordering::Less));
        assert_eq!(
            relational_comparison(
                &JsValue::String("a".to_string()),
                &JsValue::String("b".to_string())
            ),
            Some(Ordering::Less)
        );
        // "10" < "9" lexicographically when both sides are strings
        assert_eq!(
            relational_comparison(
                &JsValue::String("10".to_string()),
                &JsValue::String("9".to_string())
            ),
            Some(Ordering::Less)
        );
        assert_eq!(
            relational_comparison(&JsValue::Number(JsNumberType::NaN), &int(1)),
            None
        );
    }
}
