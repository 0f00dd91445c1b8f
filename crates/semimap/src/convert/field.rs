use super::EntityConverter;

use semimap_core::{
    schema::{Attribute, EntityMetadata, FieldMetadata, MappingKind, Model, TypeKey},
    stmt::{Element, Type, Value},
    Error, Result,
};

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::trace;

/// How one field moves between an object and an element list.
///
/// Chosen from the field's metadata alone, see [`FieldConversion::of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldConversion {
    /// A scalar, through the field's converter or value coercion
    Default,

    /// Sub-fields share the parent's element list
    Embedded,

    /// One element holding a nested sub-entity
    Entity,

    /// One element holding a list of sub-entities
    Collection,

    /// A fixed-size array of values or sub-entities
    Array,

    /// A string-keyed map of values or sub-entities
    Map,
}

impl FieldConversion {
    pub(crate) fn of(field: &FieldMetadata) -> Self {
        match field.kind {
            MappingKind::Embedded => Self::Embedded,
            MappingKind::Entity | MappingKind::EmbeddedGroup => Self::Entity,
            MappingKind::Collection if field.embeddable_element().is_some() => Self::Collection,
            MappingKind::Map => Self::Map,
            MappingKind::Array => Self::Array,
            _ => Self::Default,
        }
    }

    /// Appends the elements for `attribute` to `out`. Null attributes add
    /// nothing.
    pub(crate) fn write(
        self,
        cx: &EntityConverter,
        field: &FieldMetadata,
        attribute: Attribute,
        out: &mut Vec<Element>,
    ) -> Result<()> {
        if attribute.is_null() {
            return Ok(());
        }

        if let Some(converter) = &field.converter {
            if !matches!(self, Self::Embedded | Self::Entity) {
                out.push(Element::new(&field.column, converter.to_database(attribute)?));
                return Ok(());
            }
        }

        match self {
            Self::Default => {
                out.push(Element::new(&field.column, attribute.into_value()?));
            }
            Self::Embedded => {
                let (metadata, model) = expect_model(cx, field, attribute)?;
                cx.write_fields(&metadata, model.as_ref(), out)?;
            }
            Self::Entity => {
                out.push(Element::new(&field.column, nested(cx, field, attribute)?));
            }
            Self::Collection => {
                let found = attribute.variant_name();
                let Some(items) = attribute.into_items() else {
                    return Err(Error::unsupported_collection_type(&field.name, found));
                };

                let items = items
                    .into_iter()
                    .map(|item| match item {
                        Attribute::Model(_) => nested(cx, field, item),
                        item if item.is_null() => Ok(Value::Null),
                        item => Err(Error::unsupported_collection_type(
                            &field.name,
                            item.variant_name(),
                        )),
                    })
                    .collect::<Result<Vec<_>>>()?;

                out.push(Element::new(&field.column, Value::List(items)));
            }
            Self::Array => {
                let value = match attribute {
                    // Raw arrays are stored as they are
                    Attribute::Value(value) => value,
                    attribute if field.embeddable_element().is_some() => {
                        let found = attribute.variant_name();
                        let Some(items) = attribute.into_items() else {
                            return Err(Error::unsupported_collection_type(&field.name, found));
                        };

                        Value::List(
                            items
                                .into_iter()
                                .map(|item| nested(cx, field, item))
                                .collect::<Result<_>>()?,
                        )
                    }
                    attribute => attribute.into_value()?,
                };

                out.push(Element::new(&field.column, value));
            }
            Self::Map => {
                let value = match attribute {
                    Attribute::Map(map) if field.embeddable_element().is_some() => Value::Entity(
                        map.into_iter()
                            .map(|(key, item)| Ok(Element::new(key, nested(cx, field, item)?)))
                            .collect::<Result<_>>()?,
                    ),
                    Attribute::Map(_) | Attribute::Value(Value::Map(_)) => attribute.into_value()?,
                    other => {
                        return Err(Error::invalid_map_value_type(
                            &field.name,
                            other.variant_name(),
                        ))
                    }
                };

                out.push(Element::new(&field.column, value));
            }
        }

        Ok(())
    }

    /// Reads the attribute for `field` from `elements`.
    ///
    /// Returns `None` when there is nothing to set: the element is absent or
    /// null, or every sub-field of an embedded field is absent.
    pub(crate) fn read(
        self,
        cx: &EntityConverter,
        field: &FieldMetadata,
        elements: &[Element],
    ) -> Result<Option<Attribute>> {
        if self == Self::Embedded {
            let metadata = cx.registry().get(expect_target(field)?)?;
            let (model, populated) = cx.materialize(&metadata, elements)?;

            if !populated {
                trace!(field = %field.name, "embedded field has no stored columns; skipping");
                return Ok(None);
            }

            return Ok(Some(Attribute::Model(model)));
        }

        let Some(element) = elements.iter().find(|e| e.name == field.column) else {
            return Ok(None);
        };

        if element.value.is_null() {
            return Ok(None);
        }

        let value = element.value.clone();

        if let Some(converter) = &field.converter {
            if self != Self::Entity {
                return converter.to_attribute(value).map(Some);
            }
        }

        let attribute = match self {
            Self::Default => Attribute::from(value.coerce(&field.ty)?),
            Self::Embedded => unreachable!("handled above"),
            Self::Entity => {
                let target = expect_target(field)?;
                sub_entity(cx, field, target, value)?
            }
            Self::Collection => {
                let target = expect_element(field)?;
                let Value::List(items) = value else {
                    return Err(Error::unsupported_collection_type(
                        &field.name,
                        value.variant_name(),
                    ));
                };

                Attribute::List(read_items(cx, field, target, items)?)
            }
            Self::Array => match field.embeddable_element() {
                Some(target) => {
                    let Value::List(items) = value else {
                        return Err(Error::unsupported_collection_type(
                            &field.name,
                            value.variant_name(),
                        ));
                    };

                    Attribute::Array(read_items(cx, field, target, items)?)
                }
                // Raw bytes are kept whole
                None if matches!(value, Value::Bytes(_)) => Attribute::Value(value),
                None => {
                    let ty = field.scalar_element().cloned().unwrap_or(Type::Any);
                    let items = value.coerce(&Type::list(ty))?.into_list()?;
                    Attribute::Array(items.into_iter().map(Attribute::from).collect())
                }
            },
            Self::Map => {
                let entries = match value {
                    Value::Map(map) => map,
                    Value::Entity(elements) => elements
                        .into_iter()
                        .map(|element| (element.name, element.value))
                        .collect(),
                    other => {
                        return Err(Error::invalid_map_value_type(
                            &field.name,
                            other.variant_name(),
                        ))
                    }
                };

                Attribute::Map(read_entries(cx, field, entries)?)
            }
        };

        Ok(Some(attribute))
    }
}

fn expect_target(field: &FieldMetadata) -> Result<TypeKey> {
    field.target.ok_or_else(|| {
        Error::illegal_argument(format!("field `{}` does not name its mapped type", field.name))
    })
}

fn expect_element(field: &FieldMetadata) -> Result<TypeKey> {
    field.embeddable_element().ok_or_else(|| {
        Error::illegal_argument(format!(
            "field `{}` does not name its item type",
            field.name
        ))
    })
}

fn expect_model(
    cx: &EntityConverter,
    field: &FieldMetadata,
    attribute: Attribute,
) -> Result<(Arc<EntityMetadata>, Box<dyn Model>)> {
    match attribute {
        Attribute::Model(model) => Ok((cx.registry().get(model.type_key())?, model)),
        other => Err(Error::type_mismatch(
            other.variant_name(),
            format!("a mapped object for `{}`", field.name),
        )),
    }
}

/// The nested sub-entity value of a mapped object.
fn nested(cx: &EntityConverter, field: &FieldMetadata, attribute: Attribute) -> Result<Value> {
    let (metadata, model) = expect_model(cx, field, attribute)?;
    let mut elements = vec![];
    cx.write_fields(&metadata, model.as_ref(), &mut elements)?;
    Ok(Value::Entity(elements))
}

/// Reads one nested sub-entity. A map is accepted in place of an element
/// list, its entries read as elements.
fn sub_entity(
    cx: &EntityConverter,
    field: &FieldMetadata,
    target: TypeKey,
    value: Value,
) -> Result<Attribute> {
    let elements = match value {
        Value::Entity(elements) => elements,
        Value::Map(map) => map
            .into_iter()
            .map(|(name, value)| Element::new(name, value))
            .collect(),
        other => {
            return Err(Error::type_mismatch(
                other.variant_name(),
                format!("a sub-entity for `{}`", field.name),
            ))
        }
    };

    let metadata = cx.registry().get(target)?;
    let (model, _) = cx.materialize(&metadata, &elements)?;
    Ok(Attribute::Model(model))
}

fn read_items(
    cx: &EntityConverter,
    field: &FieldMetadata,
    target: TypeKey,
    items: Vec<Value>,
) -> Result<Vec<Attribute>> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Null => Ok(Attribute::Null),
            Value::Entity(_) | Value::Map(_) => sub_entity(cx, field, target, item),
            other => Err(Error::unsupported_collection_type(
                &field.name,
                other.variant_name(),
            )),
        })
        .collect()
}

fn read_entries(
    cx: &EntityConverter,
    field: &FieldMetadata,
    entries: IndexMap<String, Value>,
) -> Result<IndexMap<String, Attribute>> {
    let item_ty = field.scalar_element().cloned().unwrap_or(Type::Any);

    entries
        .into_iter()
        .map(|(key, value)| {
            let attribute = match field.embeddable_element() {
                Some(target) => match value {
                    Value::Entity(_) | Value::Map(_) => sub_entity(cx, field, target, value)?,
                    other => {
                        return Err(Error::invalid_map_value_type(
                            &field.name,
                            other.variant_name(),
                        ))
                    }
                },
                None => Attribute::from(value.coerce(&item_ty)?),
            };

            Ok((key, attribute))
        })
        .collect()
}
