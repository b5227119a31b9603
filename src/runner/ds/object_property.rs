use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::ds::value::{JsNumberType, JsValue};

lazy_static! {
    pub static ref LENGTH_PROP: PropertyKey = PropertyKey::Str("length".to_string());
    pub static ref NAME_PROP: PropertyKey = PropertyKey::Str("name".to_string());
    pub static ref PROTOTYPE_PROP: PropertyKey = PropertyKey::Str("prototype".to_string());
    pub static ref CONSTRUCTOR_PROP: PropertyKey = PropertyKey::Str("constructor".to_string());
}

/// Key of an object property. Integer-like keys get their own variant so
/// array indices stay cheap and sort numerically in `own_property_keys`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Str(String),
    Int(u32),
}

impl PropertyKey {
    /// Canonical key for a runtime value used in a computed access. Numbers
    /// that are exact unsigned integers become [`PropertyKey::Int`], all
    /// other values key by their string form.
    pub fn from_value(value: &JsValue) -> PropertyKey {
        match value {
            JsValue::Number(JsNumberType::Integer(i)) if *i >= 0 && *i <= u32::MAX as i64 => {
                PropertyKey::Int(*i as u32)
            }
            JsValue::Number(JsNumberType::Float(f))
                if f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64 =>
            {
                PropertyKey::Int(*f as u32)
            }
            other => PropertyKey::Str(
                crate::runner::ds::operations::type_conversion::to_string(other),
            ),
        }
    }

    /// Non-canonical numeric spellings like `"03"` stay string keys.
    pub fn from_str(name: &str) -> PropertyKey {
        match name.parse::<u32>() {
            Ok(i) if i.to_string() == name => PropertyKey::Int(i),
            _ => PropertyKey::Str(name.to_string()),
        }
    }
}

impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Str(s) => write!(f, "{}", s),
            PropertyKey::Int(i) => write!(f, "{}", i),
        }
    }
}
