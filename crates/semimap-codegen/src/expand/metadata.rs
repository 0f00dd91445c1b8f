use super::Expand;
use crate::schema::Field;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_mapped_impl(&self) -> TokenStream {
        let semimap = &self.semimap;
        let model_ident = &self.model.ident;
        let attr = &self.model.attr;

        let fields = self.model.fields.iter().map(|field| self.expand_field_metadata(field));
        let parent = attr.inheritance.as_ref().and_then(|i| i.parent.as_ref());

        let reads_parent = attr.entity.is_none()
            || attr.inheritance.as_ref().is_some_and(|i| i.column.is_none());

        let parent_metadata = parent.filter(|_| reads_parent).map(|parent| {
            quote!(let parent = <#parent as #semimap::Mapped>::metadata();)
        });

        // Subtypes are stored with their root
        let name = match (&attr.entity, parent) {
            (Some(name), _) => quote!(#name),
            (None, Some(_)) => quote!(parent.name()),
            (None, None) => {
                let name = model_ident.to_string();
                quote!(#name)
            }
        };

        let inheritance = attr.inheritance.as_ref().map(|inheritance| {
            let value = match &inheritance.value {
                Some(value) => quote!(#value),
                None => {
                    let value = model_ident.to_string();
                    quote!(#value)
                }
            };

            let column = match (&inheritance.column, parent) {
                (Some(column), _) => quote!(#semimap::String::from(#column)),
                (None, Some(_)) => quote! {
                    parent
                        .inheritance()
                        .map(|inheritance| inheritance.discriminator_column.clone())
                        .unwrap_or_else(|| {
                            #semimap::String::from(#semimap::InheritanceMetadata::DEFAULT_COLUMN)
                        })
                },
                (None, None) => {
                    quote!(#semimap::String::from(#semimap::InheritanceMetadata::DEFAULT_COLUMN))
                }
            };

            let parent_key = match parent {
                Some(parent) => quote!(#semimap::TypeKey::of::<#parent>()),
                None => quote!(#semimap::TypeKey::of::<Self>()),
            };

            quote!(builder = builder.inheritance(#value, #column, #parent_key);)
        });

        let embeddable = attr.embeddable.then(|| quote!(builder = builder.embeddable();));

        let construction = if attr.record {
            let idents = self.model.fields.iter().map(|field| &field.ident);

            quote! {
                builder = builder.constructor(fields, |args| {
                    let mut args = args.into_iter();
                    let model: #semimap::Box<dyn #semimap::Model> = #semimap::Box::new(Self {
                        #(
                            #idents: #semimap::AttributeField::from_attribute(
                                args.next().unwrap_or_default(),
                            )?,
                        )*
                    });
                    Ok(model)
                });
            }
        } else {
            quote! {
                builder = builder.instance(|| {
                    #semimap::Box::new(<Self as #semimap::Default>::default())
                });
            }
        };

        quote! {
            impl #semimap::Mapped for #model_ident {
                fn metadata() -> #semimap::EntityMetadata {
                    #parent_metadata

                    let fields: #semimap::Vec<#semimap::FieldMetadata> =
                        #semimap::Vec::from([ #( #fields ),* ]);

                    let mut builder = #semimap::EntityMetadata::builder::<Self>(#name);

                    for field in &fields {
                        builder = builder.field(::core::clone::Clone::clone(field));
                    }

                    #inheritance
                    #embeddable
                    #construction

                    builder.build()
                }
            }
        }
    }

    fn expand_field_metadata(&self, field: &Field) -> TokenStream {
        let semimap = &self.semimap;
        let name = &field.name;
        let ty = &field.ty;
        let kind = field.kind.ident();

        let mut expr = quote! {
            #semimap::FieldMetadata::new(#name, #semimap::MappingKind::#kind)
                .ty(<#ty as #semimap::AttributeField>::ty())
        };

        // `id()` renames the column, so an explicit column goes after it
        if field.id.is_some() {
            expr = quote!(#expr.id());
        }

        if let Some(column) = &field.column {
            expr = quote!(#expr.column(#column));
        }

        if let Some(target) = &field.target {
            expr = quote!(#expr.target(#semimap::TypeKey::of::<#target>()));
        }

        if let Some(element) = &field.element {
            let element = if field.embeddable {
                quote!(#semimap::ElementTy::Embeddable(#semimap::TypeKey::of::<#element>()))
            } else {
                quote!(#semimap::ElementTy::Scalar(<#element as #semimap::AttributeField>::ty()))
            };

            expr = quote!(#expr.element(#element));
        }

        if let Some(convert) = &field.convert {
            expr = quote!(#expr.converter(#convert));
        }

        expr
    }
}
