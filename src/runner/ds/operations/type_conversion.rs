use crate::runner::ds::object::ObjectType;
use crate::runner::ds::value::{JsNumberType, JsValue};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

/// Nested arrays deeper than this render as an empty slot instead of
/// recursing further. Guards against self-referencing arrays.
const TO_STRING_DEPTH_LIMIT: u32 = 8;

/// The `typeof` answer for a value. As in the language it imitates, `null`
/// reports `"object"`.
pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_OBJECT,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Object(o) => match &*(**o).borrow() {
            ObjectType::Function(_) => TYPE_STR_FUNCTION,
            _ => TYPE_STR_OBJECT,
        },
    }
}

pub fn to_boolean(v: &JsValue) -> bool {
    match v {
        JsValue::Undefined | JsValue::Null => false,
        JsValue::Boolean(b) => *b,
        JsValue::String(s) => !s.is_empty(),
        JsValue::Number(n) => match n {
            JsNumberType::Integer(i) => *i != 0,
            JsNumberType::Float(f) => *f != 0.0,
            JsNumberType::NaN => false,
            JsNumberType::PositiveInfinity | JsNumberType::NegativeInfinity => true,
        },
        JsValue::Object(_) => true,
    }
}

/// Collapse an object to a primitive. With data-only properties there are
/// no conversion hooks to run, so objects simply take their string form.
pub fn to_primitive(v: &JsValue) -> JsValue {
    match v {
        JsValue::Object(_) => JsValue::String(to_string(v)),
        other => other.clone(),
    }
}

pub fn to_number(v: &JsValue) -> JsNumberType {
    match v {
        JsValue::Undefined => JsNumberType::NaN,
        JsValue::Null => JsNumberType::Integer(0),
        JsValue::Boolean(b) => JsNumberType::Integer(if *b { 1 } else { 0 }),
        JsValue::String(s) => string_to_number(s),
        JsValue::Number(n) => n.clone(),
        JsValue::Object(_) => to_number(&to_primitive(v)),
    }
}

fn string_to_number(s: &str) -> JsNumberType {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return JsNumberType::Integer(0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return JsNumberType::PositiveInfinity,
        "-Infinity" => return JsNumberType::NegativeInfinity,
        _ => {}
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return JsNumberType::Integer(i);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => JsNumberType::Float(f),
        Ok(f) if f.is_infinite() => {
            if f > 0.0 {
                JsNumberType::PositiveInfinity
            } else {
                JsNumberType::NegativeInfinity
            }
        }
        _ => JsNumberType::NaN,
    }
}

pub fn number_to_f64(n: &JsNumberType) -> f64 {
    match n {
        JsNumberType::Integer(i) => *i as f64,
        JsNumberType::Float(f) => *f,
        JsNumberType::NaN => f64::NAN,
        JsNumberType::PositiveInfinity => f64::INFINITY,
        JsNumberType::NegativeInfinity => f64::NEG_INFINITY,
    }
}

/// Classify an f64 back into the number variants. Finite values stay
/// floats; integer narrowing only happens on the checked arithmetic paths.
pub fn f64_to_number(f: f64) -> JsNumberType {
    if f.is_nan() {
        JsNumberType::NaN
    } else if f == f64::INFINITY {
        JsNumberType::PositiveInfinity
    } else if f == f64::NEG_INFINITY {
        JsNumberType::NegativeInfinity
    } else {
        JsNumberType::Float(f)
    }
}

pub fn to_string(v: &JsValue) -> String {
    to_string_at_depth(v, TO_STRING_DEPTH_LIMIT)
}

fn to_string_at_depth(v: &JsValue, depth: u32) -> String {
    match v {
        JsValue::Undefined => TYPE_STR_UNDEFINED.to_string(),
        JsValue::Null => TYPE_STR_NULL.to_string(),
        JsValue::Boolean(b) => b.to_string(),
        JsValue::String(s) => s.clone(),
        JsValue::Number(n) => n.to_string(),
        JsValue::Object(o) => match &*(**o).borrow() {
            ObjectType::Array(a) => {
                if depth == 0 {
                    return String::new();
                }
                let parts: Vec<String> = a
                    .elements()
                    .iter()
                    .map(|e| {
                        if e.is_undefined_or_null() {
                            String::new()
                        } else {
                            to_string_at_depth(e, depth - 1)
                        }
                    })
                    .collect();
                parts.join(",")
            }
            other => other.to_display_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_coercion_of_numbers() {
        assert_eq!(to_string(&JsValue::Number(JsNumberType::Integer(42))), "42");
        assert_eq!(to_string(&JsValue::Number(JsNumberType::Float(2.5))), "2.5");
        assert_eq!(to_string(&JsValue::Number(JsNumberType::Float(2.0))), "2");
        assert_eq!(to_string(&JsValue::Number(JsNumberType::NaN)), "NaN");
        assert_eq!(
            to_string(&JsValue::Number(JsNumberType::PositiveInfinity)),
            "Infinity"
        );
    }

    #[test]
    fn numeric_coercion_of_strings() {
        assert_eq!(
            to_number(&JsValue::String("  12  ".to_string())),
            JsNumberType::Integer(12)
        );
        assert_eq!(
            to_number(&JsValue::String("".to_string())),
            JsNumberType::Integer(0)
        );
        assert_eq!(
            to_number(&JsValue::String("1.5e2".to_string())),
            JsNumberType::Float(150.0)
        );
        assert_eq!(
            to_number(&JsValue::String("twelve".to_string())),
            JsNumberType::NaN
        );
        assert_eq!(
            to_number(&JsValue::String("-Infinity".to_string())),
            JsNumberType::NegativeInfinity
        );
    }

    #[test]
    fn truthiness() {
        assert!(!to_boolean(&JsValue::Undefined));
        assert!(!to_boolean(&JsValue::Null));
        assert!(!to_boolean(&JsValue::Number(JsNumberType::Integer(0))));
        assert!(!to_boolean(&JsValue::Number(JsNumberType::NaN)));
        assert!(!to_boolean(&JsValue::String(String::new())));
        assert!(to_boolean(&JsValue::String(" ".to_string())));
        assert!(to_boolean(&JsValue::Number(JsNumberType::Float(0.5))));
    }
}
