mod error;
pub(crate) use error::ErrorSet;

mod field;
pub(crate) use field::Field;

mod inheritance;
pub(crate) use inheritance::Inheritance;

mod model;
pub(crate) use model::Model;

mod model_attr;
pub(crate) use model_attr::ModelAttr;

mod ty;
pub(crate) use ty::Shape;
