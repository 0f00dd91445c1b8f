use super::{Element, Type, Value};
use crate::{Error, Result};

use indexmap::IndexMap;

macro_rules! int_from {
    ($value:expr, $ty:ty, $variant:ident) => {{
        let value = $value;
        let parsed: Option<i64> = match &value {
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(*b as i64),
            Value::F32(v) => whole_i64(f64::from(*v)),
            Value::F64(v) => whole_i64(*v),
            other => other.as_i64(),
        };

        match parsed.and_then(|v| <$ty>::try_from(v).ok()) {
            Some(v) => Ok(Value::$variant(v)),
            None => Err(Error::type_conversion(value, stringify!($ty))),
        }
    }};
}

/// Converts a float with no fractional part that lies within `i64`.
fn whole_i64(v: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
    (v.fract() == 0.0 && in_range).then_some(v as i64)
}

impl Value {
    /// Coerces the value into the given type.
    ///
    /// Null and unbound parameters pass through unchanged. Numbers convert
    /// between widths when the value fits, and strings parse into scalars.
    pub fn coerce(self, ty: &Type) -> Result<Value> {
        if self.is_null() || self.is_param() {
            return Ok(self);
        }

        match ty {
            Type::Any => Ok(self),
            Type::Bool => {
                let parsed = match &self {
                    Value::Bool(v) => Some(*v),
                    Value::String(s) => s.trim().parse().ok(),
                    v => match v.as_i64() {
                        Some(0) => Some(false),
                        Some(1) => Some(true),
                        _ => None,
                    },
                };
                parsed
                    .map(Value::Bool)
                    .ok_or_else(|| Error::type_conversion(self, "bool"))
            }
            Type::I8 => int_from!(self, i8, I8),
            Type::I16 => int_from!(self, i16, I16),
            Type::I32 => int_from!(self, i32, I32),
            Type::I64 => int_from!(self, i64, I64),
            Type::F32 => {
                let parsed = match &self {
                    Value::F32(v) => Some(*v),
                    Value::F64(v) => Some(*v as f32),
                    Value::String(s) => s.trim().parse().ok(),
                    v => v.as_i64().map(|v| v as f32),
                };
                parsed
                    .map(Value::F32)
                    .ok_or_else(|| Error::type_conversion(self, "f32"))
            }
            Type::F64 => {
                let parsed = match &self {
                    Value::String(s) => s.trim().parse().ok(),
                    v => v.as_f64(),
                };
                parsed
                    .map(Value::F64)
                    .ok_or_else(|| Error::type_conversion(self, "f64"))
            }
            Type::String => {
                if matches!(self, Value::String(_)) {
                    return Ok(self);
                }

                let rendered = match &self {
                    Value::Bool(v) => Some(v.to_string()),
                    Value::Uuid(v) => Some(v.to_string()),
                    Value::F32(v) => Some(v.to_string()),
                    Value::F64(v) => Some(v.to_string()),
                    v => v.as_i64().map(|v| v.to_string()),
                };
                rendered
                    .map(Value::String)
                    .ok_or_else(|| Error::type_conversion(self, "String"))
            }
            Type::Uuid => {
                let parsed = match &self {
                    Value::Uuid(v) => Some(*v),
                    Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                };
                parsed
                    .map(Value::Uuid)
                    .ok_or_else(|| Error::type_conversion(self, "Uuid"))
            }
            Type::Bytes => match self {
                Value::Bytes(_) => Ok(self),
                Value::String(s) => Ok(Value::Bytes(s.into_bytes())),
                _ => Err(Error::type_conversion(self, "Bytes")),
            },
            Type::List(item) => match self {
                Value::List(items) => items
                    .into_iter()
                    .map(|v| v.coerce(item))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::List),
                // A single value is read as a list of one
                value if value.is_scalar() || value.is_entity() => {
                    Ok(Value::List(vec![value.coerce(item)?]))
                }
                value => Err(Error::type_conversion(value, ty.to_string())),
            },
            Type::Map(item) => match self {
                Value::Map(map) => map
                    .into_iter()
                    .map(|(k, v)| Ok((k, v.coerce(item)?)))
                    .collect::<Result<IndexMap<_, _>>>()
                    .map(Value::Map),
                Value::Entity(elements) => elements
                    .into_iter()
                    .map(|e| Ok((e.name, e.value.coerce(item)?)))
                    .collect::<Result<IndexMap<_, _>>>()
                    .map(Value::Map),
                value => Err(Error::type_conversion(value, ty.to_string())),
            },
            Type::Entity => match self {
                Value::Entity(_) => Ok(self),
                Value::Map(map) => Ok(Value::Entity(
                    map.into_iter().map(|(k, v)| Element::new(k, v)).collect(),
                )),
                value => Err(Error::type_conversion(value, "Entity")),
            },
        }
    }
}
