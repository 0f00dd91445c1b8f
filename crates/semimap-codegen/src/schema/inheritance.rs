/// `#[inheritance(parent = Animal, value = "dog", column = "type")]`
///
/// Every key is optional. Without `parent` the type is the root of its
/// hierarchy.
#[derive(Debug, Default)]
pub(crate) struct Inheritance {
    pub(crate) parent: Option<syn::Path>,
    pub(crate) value: Option<syn::LitStr>,
    pub(crate) column: Option<syn::LitStr>,
}

impl Inheritance {
    pub(super) fn from_ast(attr: &syn::Attribute, ident: &syn::Ident) -> syn::Result<Self> {
        let mut inheritance = Self::default();

        if matches!(attr.meta, syn::Meta::Path(_)) {
            return Ok(inheritance);
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("parent") {
                let parent: syn::Path = meta.value()?.parse()?;

                // Naming itself as the parent is the same as naming none
                if !parent.is_ident("Self") && !parent.is_ident(ident) {
                    inheritance.parent = Some(parent);
                }
            } else if meta.path.is_ident("value") {
                inheritance.value = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("column") {
                inheritance.column = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error("expected `parent`, `value` or `column`"));
            }

            Ok(())
        })?;

        Ok(inheritance)
    }
}
