use super::{ErrorSet, Field, ModelAttr};

#[derive(Debug)]
pub(crate) struct Model {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Struct-level attributes
    pub(crate) attr: ModelAttr,

    /// Model fields, in declared order
    pub(crate) fields: Vec<Field>,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "model fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "model generics are not supported",
            ));
        }

        let mut errs = ErrorSet::new();
        let mut attr = ModelAttr::default();
        let mut fields = vec![];

        if let Err(err) = attr.populate_from_ast(&ast.attrs, &ast.ident) {
            errs.push(err);
        }

        for node in &node.named {
            match Field::from_ast(node) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        let mut ids = fields.iter().filter_map(|field| field.id.as_ref());

        if let (Some(_), Some(second)) = (ids.next(), ids.next()) {
            errs.push(syn::Error::new_spanned(second, "only one field can be the #[id]"));
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            ident: ast.ident.clone(),
            attr,
            fields,
        })
    }
}
