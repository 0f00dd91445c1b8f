use super::{Field, Restriction};

use semimap_core::{
    schema::{Attribute, EntitiesMetadata, EntityMetadata, FieldMetadata, MappingKind},
    stmt::{CriteriaCondition, Direction, Element, FunctionExpr, Operator, Sort, Value},
    Error, Result,
};

/// Turns field paths and user values into columns and stored values for
/// one entity.
pub(crate) struct Resolver<'a> {
    registry: &'a dyn EntitiesMetadata,
    metadata: &'a EntityMetadata,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(registry: &'a dyn EntitiesMetadata, metadata: &'a EntityMetadata) -> Self {
        Self { registry, metadata }
    }

    pub(crate) fn metadata(&self) -> &'a EntityMetadata {
        self.metadata
    }

    pub(crate) fn column(&self, path: &str) -> Result<String> {
        self.registry.column_path(self.metadata, path)
    }

    pub(crate) fn field(&self, path: &str) -> Result<FieldMetadata> {
        self.registry.field_path(self.metadata, path)
    }

    /// The discriminator filter every query against a subtype carries.
    pub(crate) fn discriminator(&self) -> Option<CriteriaCondition> {
        self.metadata.subtype_inheritance().map(|inheritance| {
            CriteriaCondition::eq(
                &inheritance.discriminator_column,
                inheritance.discriminator_value.as_str(),
            )
        })
    }

    /// Resolves the condition's left-hand side. Plain fields also return
    /// their metadata so the value can be converted to the stored form.
    fn target(&self, field: &Field) -> Result<(String, Option<FieldMetadata>)> {
        match field {
            Field::Name(path) => {
                let metadata = self.field(path)?;
                Ok((self.column(path)?, Some(metadata)))
            }
            Field::Function(expr) => Ok((self.function(expr)?.to_string(), None)),
        }
    }

    fn function(&self, expr: &FunctionExpr) -> Result<FunctionExpr> {
        Ok(FunctionExpr::new(expr.function, self.column(&expr.field)?))
    }

    pub(crate) fn compare(
        &self,
        field: &Field,
        op: Operator,
        value: Attribute,
    ) -> Result<CriteriaCondition> {
        let (column, metadata) = self.target(field)?;

        let value = match op {
            Operator::Between | Operator::In => {
                let items = value.into_items().ok_or_else(|| {
                    Error::illegal_argument(format!("`{op}` on `{column}` expects a list of values"))
                })?;

                if op == Operator::Between && items.len() != 2 {
                    return Err(Error::illegal_argument(format!(
                        "`BETWEEN` on `{column}` requires exactly two bounds, got {}",
                        items.len()
                    )));
                }

                if items.is_empty() {
                    return Err(Error::illegal_argument(format!(
                        "`IN` on `{column}` requires at least one value"
                    )));
                }

                items
                    .into_iter()
                    .map(|item| self.value(metadata.as_ref(), op, item))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::List)?
            }
            _ => {
                if value.is_null() {
                    return Err(Error::null_argument(format!("value compared to `{column}`")));
                }

                self.value(metadata.as_ref(), op, value)?
            }
        };

        Ok(CriteriaCondition::compare(op, Element::new(column, value)))
    }

    /// Only comparisons against plain fields go through the field's
    /// converter and declared type. Text operators and functions take the
    /// value as given.
    fn value(&self, field: Option<&FieldMetadata>, op: Operator, value: Attribute) -> Result<Value> {
        match field {
            Some(field) if op.is_comparison() => to_database(field, value),
            _ => value.into_value(),
        }
    }

    pub(crate) fn assignment(&self, path: &str, value: Attribute) -> Result<Element> {
        let field = self.field(path)?;
        Ok(Element::new(self.column(path)?, to_database(&field, value)?))
    }

    pub(crate) fn sort(&self, field: &Field, direction: Direction) -> Result<Sort> {
        match field {
            Field::Name(path) => Ok(Sort::new(self.column(path)?, direction)),
            Field::Function(expr) => Ok(Sort::by_function(&self.function(expr)?, direction)),
        }
    }

    pub(crate) fn restriction(&self, restriction: &Restriction) -> Result<Option<CriteriaCondition>> {
        match restriction {
            Restriction::Compare { field, op, value } => {
                self.compare(field, *op, value.clone()).map(Some)
            }
            Restriction::All(items) => Ok(CriteriaCondition::and_from_vec(self.restrictions(items)?)),
            Restriction::Any(items) => Ok(CriteriaCondition::or_from_vec(self.restrictions(items)?)),
            Restriction::Not(inner) => Ok(self.restriction(inner)?.map(CriteriaCondition::not)),
        }
    }

    fn restrictions(&self, items: &[Restriction]) -> Result<Vec<CriteriaCondition>> {
        let mut ret = Vec::with_capacity(items.len());

        for item in items {
            ret.extend(self.restriction(item)?);
        }

        Ok(ret)
    }
}

/// Converts an object-level value into the form stored for `field`.
pub(crate) fn to_database(field: &FieldMetadata, value: Attribute) -> Result<Value> {
    if let Some(converter) = &field.converter {
        return converter.to_database(value);
    }

    let value = value.into_value()?;

    match field.kind {
        MappingKind::Default if !value.is_null() => value.coerce(&field.ty),
        _ => Ok(value),
    }
}
