use super::Attribute;
use crate::{stmt::Value, Result};

use std::fmt::Debug;

/// Custom conversion between a field's attribute and its stored value.
///
/// When a field declares a converter, it replaces value coercion in both
/// directions. For map fields the converter sees the whole map.
pub trait AttributeConverter: Debug + Send + Sync + 'static {
    fn to_database(&self, attribute: Attribute) -> Result<Value>;

    fn to_attribute(&self, value: Value) -> Result<Attribute>;
}
