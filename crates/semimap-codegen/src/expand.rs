mod metadata;
mod model;

use crate::schema::Model;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The model being expanded
    model: &'a Model,

    /// Path prefix for semimap types
    semimap: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let model_impl = self.expand_model_impl();
        let attribute_field_impl = self.expand_attribute_field_impl();
        let mapped_impl = self.expand_mapped_impl();

        wrap_in_const(quote! {
            #model_impl
            #attribute_field_impl
            #mapped_impl
        })
    }
}

pub(super) fn model(model: &Model) -> TokenStream {
    Expand {
        model,
        semimap: quote!(_semimap::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use semimap as _semimap;
            #code
        };
    }
}
