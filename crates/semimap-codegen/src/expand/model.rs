use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_model_impl(&self) -> TokenStream {
        let semimap = &self.semimap;
        let model_ident = &self.model.ident;
        let simple_name = model_ident.to_string();

        let names = self.model.fields.iter().map(|field| &field.name);
        let idents = self.model.fields.iter().map(|field| &field.ident);
        let get_arms = quote! {
            #( #names => #semimap::Option::Some(#semimap::AttributeField::to_attribute(&self.#idents)), )*
        };

        let names = self.model.fields.iter().map(|field| &field.name);
        let idents = self.model.fields.iter().map(|field| &field.ident);
        let set_arms = quote! {
            #(
                #names => {
                    self.#idents = #semimap::AttributeField::from_attribute(value)?;
                    Ok(())
                }
            )*
        };

        quote! {
            impl #semimap::Model for #model_ident {
                fn type_key(&self) -> #semimap::TypeKey {
                    #semimap::TypeKey::of::<Self>()
                }

                fn get(&self, field: &str) -> #semimap::Option<#semimap::Attribute> {
                    match field {
                        #get_arms
                        _ => #semimap::Option::None,
                    }
                }

                fn set(&mut self, field: &str, value: #semimap::Attribute) -> #semimap::Result<()> {
                    match field {
                        #set_arms
                        _ => Err(#semimap::Error::field_not_found(#simple_name, field)),
                    }
                }

                fn clone_model(&self) -> #semimap::Box<dyn #semimap::Model> {
                    #semimap::Box::new(::core::clone::Clone::clone(self))
                }

                fn as_any(&self) -> &dyn #semimap::Any {
                    self
                }

                fn into_any(self: #semimap::Box<Self>) -> #semimap::Box<dyn #semimap::Any> {
                    self
                }
            }
        }
    }

    /// Mapped types travel as boxed models inside attributes.
    pub(super) fn expand_attribute_field_impl(&self) -> TokenStream {
        let semimap = &self.semimap;
        let model_ident = &self.model.ident;
        let simple_name = model_ident.to_string();

        quote! {
            impl #semimap::AttributeField for #model_ident {
                fn to_attribute(&self) -> #semimap::Attribute {
                    #semimap::Attribute::Model(#semimap::Box::new(::core::clone::Clone::clone(self)))
                }

                fn from_attribute(attribute: #semimap::Attribute) -> #semimap::Result<Self> {
                    match attribute {
                        #semimap::Attribute::Model(model) => match model.downcast::<Self>() {
                            Ok(model) => Ok(*model),
                            Err(other) => Err(#semimap::Error::type_mismatch(
                                other.type_key().simple_name(),
                                #simple_name,
                            )),
                        },
                        other => Err(#semimap::Error::type_mismatch(other.variant_name(), #simple_name)),
                    }
                }
            }
        }
    }
}
