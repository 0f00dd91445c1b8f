use super::{EntityConverter, FieldConversion};

use semimap_core::{
    schema::{Attribute, ConstructorMetadata, Model},
    stmt::{Element, Value},
    Result,
};

/// Builds an object through its constructor.
///
/// Each parameter is read like a field of the same kind. A parameter with no
/// stored value receives the empty placeholder of its type, so construction
/// does not fail on missing optional data.
pub(super) fn construct(
    cx: &EntityConverter,
    constructor: &ConstructorMetadata,
    elements: &[Element],
) -> Result<(Box<dyn Model>, bool)> {
    let mut populated = false;
    let mut args = Vec::with_capacity(constructor.parameters.len());

    for parameter in &constructor.parameters {
        let arg = match FieldConversion::of(parameter).read(cx, parameter, elements)? {
            Some(attribute) => {
                populated = true;
                attribute
            }
            None => Attribute::from(Value::empty_of(&parameter.ty)),
        };

        args.push(arg);
    }

    let model = (constructor.build)(args)?;
    Ok((model, populated))
}
