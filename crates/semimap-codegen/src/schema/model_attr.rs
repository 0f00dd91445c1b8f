use super::{ErrorSet, Inheritance};

#[derive(Debug, Default)]
pub(crate) struct ModelAttr {
    /// Storage name: `#[entity("people")]`
    pub(crate) entity: Option<syn::LitStr>,

    /// Only stored inside other entities: `#[embeddable]`
    pub(crate) embeddable: bool,

    pub(crate) inheritance: Option<Inheritance>,

    /// Built through its fields in declared order instead of `Default`:
    /// `#[record]`
    pub(crate) record: bool,
}

impl ModelAttr {
    pub(super) fn populate_from_ast(
        &mut self,
        attrs: &[syn::Attribute],
        ident: &syn::Ident,
    ) -> syn::Result<()> {
        let mut errs = ErrorSet::new();

        for attr in attrs {
            let path = attr.path();

            if path.is_ident("entity") {
                if let syn::Meta::List(_) = &attr.meta {
                    match attr.parse_args::<syn::LitStr>() {
                        Ok(name) => self.entity = Some(name),
                        Err(err) => errs.push(err),
                    }
                }
            } else if path.is_ident("embeddable") {
                self.embeddable = true;
            } else if path.is_ident("record") {
                self.record = true;
            } else if path.is_ident("inheritance") {
                if self.inheritance.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[inheritance] attribute"));
                } else {
                    match Inheritance::from_ast(attr, ident) {
                        Ok(inheritance) => self.inheritance = Some(inheritance),
                        Err(err) => errs.push(err),
                    }
                }
            }
        }

        if self.embeddable && self.inheritance.is_some() {
            errs.push(syn::Error::new_spanned(
                ident,
                "embeddable types cannot take part in inheritance",
            ));
        }

        match errs.collect() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
