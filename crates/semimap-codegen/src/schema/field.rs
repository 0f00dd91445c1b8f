use super::{ty, ErrorSet, Shape};

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier on the struct
    pub(crate) ident: syn::Ident,

    /// Field name as seen by queries
    pub(crate) name: String,

    /// Declared field type
    pub(crate) ty: syn::Type,

    pub(crate) kind: FieldKind,

    /// Mapped type of embedded, nested and group fields
    pub(crate) target: Option<syn::Type>,

    /// Item type of collection, array and map fields
    pub(crate) element: Option<syn::Type>,

    /// True if the items are mapped types: `#[embeddable]`
    pub(crate) embeddable: bool,

    /// True if the field is annotated with `#[id]`
    pub(crate) id: Option<syn::Attribute>,

    /// Storage name: `#[column("name")]`
    pub(crate) column: Option<syn::LitStr>,

    /// Converter expression: `#[convert(MyConverter)]`
    pub(crate) convert: Option<syn::Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Default,
    Embedded,
    Entity,
    EmbeddedGroup,
    Collection,
    Array,
    Map,
}

impl FieldKind {
    pub(crate) fn ident(self) -> syn::Ident {
        let name = match self {
            Self::Default => "Default",
            Self::Embedded => "Embedded",
            Self::Entity => "Entity",
            Self::EmbeddedGroup => "EmbeddedGroup",
            Self::Collection => "Collection",
            Self::Array => "Array",
            Self::Map => "Map",
        };

        syn::Ident::new(name, proc_macro2::Span::call_site())
    }

    fn is_nested(self) -> bool {
        matches!(self, Self::Embedded | Self::Entity | Self::EmbeddedGroup)
    }
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut id = None;
        let mut column = None;
        let mut convert = None;
        let mut embeddable = false;
        let mut nested: Option<(FieldKind, &syn::Attribute)> = None;

        for attr in &field.attrs {
            let path = attr.path();

            if path.is_ident("id") {
                if id.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[id] attribute"));
                } else {
                    id = Some(attr.clone());
                }
            } else if path.is_ident("column") {
                if column.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[column] attribute"));
                } else {
                    column = Some(attr.parse_args::<syn::LitStr>()?);
                }
            } else if path.is_ident("convert") {
                if convert.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[convert] attribute"));
                } else {
                    convert = Some(attr.parse_args::<syn::Expr>()?);
                }
            } else if path.is_ident("embeddable") {
                embeddable = true;
            } else {
                let kind = if path.is_ident("embedded") {
                    FieldKind::Embedded
                } else if path.is_ident("nested") {
                    FieldKind::Entity
                } else if path.is_ident("group") {
                    FieldKind::EmbeddedGroup
                } else {
                    continue;
                };

                if nested.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "field has more than one of #[embedded], #[nested] and #[group]",
                    ));
                } else {
                    nested = Some((kind, attr));
                }
            }
        }

        let shape = Shape::of(&field.ty);
        let element = shape.element().cloned();

        let kind = match (nested, &shape) {
            (Some((kind, _)), Shape::Scalar) => kind,
            (Some((_, attr)), _) => {
                errs.push(syn::Error::new_spanned(
                    attr,
                    "collections of mapped types take #[embeddable] instead",
                ));
                FieldKind::Default
            }
            (None, Shape::Scalar) => FieldKind::Default,
            (None, Shape::Collection(_)) => FieldKind::Collection,
            (None, Shape::Array(_)) => FieldKind::Array,
            (None, Shape::Map(_)) => FieldKind::Map,
        };

        if embeddable && element.is_none() {
            errs.push(syn::Error::new_spanned(
                &field.ty,
                "#[embeddable] applies to `Vec`, array and map fields",
            ));
        }

        if let (Some(attr), true) = (&id, kind.is_nested()) {
            errs.push(syn::Error::new_spanned(attr, "the id field must be a plain value"));
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        let target = kind
            .is_nested()
            .then(|| ty::unwrap_optional(&field.ty).clone());

        let name = ident.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name).to_string();

        Ok(Self {
            ident: ident.clone(),
            name,
            ty: field.ty.clone(),
            kind,
            target,
            element,
            embeddable,
            id,
            column,
            convert,
        })
    }
}
