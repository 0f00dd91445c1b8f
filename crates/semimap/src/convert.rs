mod field;
pub(crate) use field::FieldConversion;

mod parameter;

use semimap_core::{
    schema::{EntitiesMetadata, EntityMetadata, Mapped, Model, TypeKey},
    stmt::{CommunicationEntity, Element, Value},
    Error, Result,
};

use std::sync::Arc;

/// Converts mapped objects to and from [`CommunicationEntity`] values by
/// walking their metadata.
#[derive(Debug, Clone)]
pub struct EntityConverter {
    registry: Arc<dyn EntitiesMetadata>,
}

impl EntityConverter {
    pub fn new(registry: Arc<dyn EntitiesMetadata>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<dyn EntitiesMetadata> {
        &self.registry
    }

    /// Converts an object into its storage form.
    ///
    /// Null fields are left out. Embedded fields contribute their sub-fields
    /// to the same element list, nested entity fields contribute one element.
    pub fn to_communication(&self, model: &dyn Model) -> Result<CommunicationEntity> {
        let metadata = self.registry.get(model.type_key())?;
        let mut entity = CommunicationEntity::new(metadata.name());
        self.write_fields(&metadata, model, entity.elements_mut())?;
        Ok(entity)
    }

    /// Builds a new `T` from stored elements.
    ///
    /// When the elements carry the discriminator of a subtype of `T`, the
    /// fields shared with `T` are read. A subtype `T` refuses elements whose
    /// discriminator names another type of its hierarchy.
    pub fn to_entity<T: Mapped>(&self, entity: &CommunicationEntity) -> Result<T> {
        let metadata = self.registry.get(TypeKey::of::<T>())?;
        self.check_discriminator(&metadata, entity)?;
        let (model, _) = self.materialize(&metadata, entity.elements())?;

        match model.downcast::<T>() {
            Ok(model) => Ok(*model),
            Err(other) => Err(Error::type_mismatch(
                other.type_key().simple_name(),
                TypeKey::of::<T>().simple_name(),
            )),
        }
    }

    /// Builds an object of the type registered under `key`, or of the
    /// subtype named by the elements' discriminator.
    pub fn to_model(&self, entity: &CommunicationEntity, key: TypeKey) -> Result<Box<dyn Model>> {
        let metadata = self.resolve_subtype(self.registry.get(key)?, entity)?;
        let (model, _) = self.materialize(&metadata, entity.elements())?;
        Ok(model)
    }

    /// Merges stored elements into an existing object. Fields without a
    /// matching element keep their current value.
    pub fn fill(&self, entity: &CommunicationEntity, model: &mut dyn Model) -> Result<()> {
        let metadata = self.registry.get(model.type_key())?;
        self.read_fields(&metadata, model, entity.elements())?;
        Ok(())
    }

    fn check_discriminator(
        &self,
        metadata: &EntityMetadata,
        entity: &CommunicationEntity,
    ) -> Result<()> {
        let Some(inheritance) = metadata.subtype_inheritance() else {
            return Ok(());
        };

        match entity.find_value(&inheritance.discriminator_column) {
            None | Some(Value::Null) => Ok(()),
            Some(Value::String(value)) if *value == inheritance.discriminator_value => Ok(()),
            Some(Value::String(value)) => Err(Error::class_information_not_found(format!(
                "{} with discriminator `{value}`",
                metadata.simple_name()
            ))),
            Some(other) => Err(Error::type_conversion(other.clone(), "String")),
        }
    }

    fn resolve_subtype(
        &self,
        metadata: Arc<EntityMetadata>,
        entity: &CommunicationEntity,
    ) -> Result<Arc<EntityMetadata>> {
        let Some(inheritance) = metadata.inheritance() else {
            return Ok(metadata);
        };

        let Some(discriminator) = entity.find_value(&inheritance.discriminator_column) else {
            return Ok(metadata);
        };

        let Value::String(discriminator) = discriminator else {
            return Err(Error::type_conversion(discriminator.clone(), "String"));
        };

        self.registry
            .find_by_parent_group_by_discriminator_value(inheritance.parent)
            .get(discriminator)
            .cloned()
            .ok_or_else(|| {
                Error::class_information_not_found(format!(
                    "{} with discriminator `{discriminator}`",
                    inheritance.parent
                ))
            })
    }

    pub(crate) fn write_fields(
        &self,
        metadata: &EntityMetadata,
        model: &dyn Model,
        out: &mut Vec<Element>,
    ) -> Result<()> {
        for field in metadata.fields() {
            let attribute = model
                .get(&field.name)
                .ok_or_else(|| Error::field_not_found(metadata.simple_name(), &field.name))?;

            FieldConversion::of(field).write(self, field, attribute, out)?;
        }

        Ok(())
    }

    /// Populates `model` from `elements`. Returns `true` if any field was
    /// found.
    pub(crate) fn read_fields(
        &self,
        metadata: &EntityMetadata,
        model: &mut dyn Model,
        elements: &[Element],
    ) -> Result<bool> {
        let mut populated = false;

        for field in metadata.fields() {
            if let Some(attribute) = FieldConversion::of(field).read(self, field, elements)? {
                populated = true;
                model.set(&field.name, attribute)?;
            }
        }

        Ok(populated)
    }

    /// Creates an object of the described type from `elements`, through its
    /// constructor when it declares one. Returns `true` alongside the object
    /// if any element was found for it.
    pub(crate) fn materialize(
        &self,
        metadata: &EntityMetadata,
        elements: &[Element],
    ) -> Result<(Box<dyn Model>, bool)> {
        match metadata.constructor() {
            Some(constructor) => parameter::construct(self, constructor, elements),
            None => {
                let mut model = metadata.new_instance()?;
                let populated = self.read_fields(metadata, model.as_mut(), elements)?;
                Ok((model, populated))
            }
        }
    }
}
