//! `#[derive(Surface)]` expansion

use crate::attrs::{ContainerArgs, DelegateArgs, FieldArgs};
use crate::classify::{field_kind, is_eligible, kind_path};
use delegacy_core::MemberKind;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, Result, Type};

/// One named field after attribute parsing and classification
struct SurfaceField {
    ident: Ident,
    name: String,
    ty: Type,
    kind: MemberKind,
    delegate: Option<DelegateArgs>,
}

impl SurfaceField {
    fn eligible(&self) -> bool {
        is_eligible(&self.name, self.kind)
    }
}

/// Render a type the way it reads in source
fn type_label(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
}

fn type_key(ty: &Type) -> String {
    ty.to_token_stream().to_string()
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Surface)] does not support generic types",
        ));
    }
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named,
            _ => {
                return Err(syn::Error::new(
                    Span::call_site(),
                    "#[derive(Surface)] requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                Span::call_site(),
                "#[derive(Surface)] can only be used on structs",
            ))
        }
    };

    let container = ContainerArgs::from_attrs(&input.attrs)?;
    let mut fields = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let args = FieldArgs::from_field(field)?;
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        fields.push(SurfaceField {
            name: ident.unraw().to_string(),
            kind: field_kind(field, args.skip),
            ty: field.ty.clone(),
            ident,
            delegate: args.delegate,
        });
    }

    let mut seen_delegates: Vec<String> = Vec::new();
    for field in &fields {
        if let Some(delegate) = &field.delegate {
            let key = type_key(&delegate.to);
            if seen_delegates.contains(&key) {
                let label = type_label(&delegate.to);
                return Err(syn::Error::new_spanned(
                    &delegate.to,
                    format!("`{label}` is already delegated to by another field"),
                ));
            }
            seen_delegates.push(key);
        }
    }

    let descriptor = expand_descriptor(name, &container, &fields);
    let disjoint = expand_disjoint_check(name, &fields);
    let reflect = expand_reflect(name, &fields);
    let delegate_impls = expand_delegate_impls(name, &fields);
    let fields_trait = expand_fields_trait(&input, &container, &fields);

    Ok(quote! {
        const _: () = {
            #descriptor
            #reflect
            #delegate_impls
        };
        #disjoint
        #fields_trait
    })
}

fn expand_descriptor(
    name: &Ident,
    container: &ContainerArgs,
    fields: &[SurfaceField],
) -> TokenStream {
    let display = name.unraw().to_string();

    let members = fields.iter().map(|field| {
        let member = &field.name;
        let kind = kind_path(field.kind);
        let label = type_label(&field.ty);
        quote!(::delegacy_core::Member::new(#member, #kind, #label))
    });
    let member_count = fields.len();

    let delegated: Vec<_> = fields
        .iter()
        .filter_map(|field| field.delegate.as_ref().map(|delegate| (field, delegate)))
        .collect();
    let bindings = delegated.iter().map(|(field, delegate)| {
        let member = &field.name;
        let to = &delegate.to;
        quote! {
            ::delegacy_core::StaticBinding::new(
                #member,
                <#to as ::delegacy_core::Surface>::descriptor,
            )
        }
    });
    let binding_count = delegated.len();

    // capability set: every delegate, everything reached through one, and explicit extends
    let mut supertypes: Vec<TokenStream> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    let candidates = delegated
        .iter()
        .flat_map(|(_, delegate)| {
            std::iter::once(delegate.to.to_token_stream())
                .chain(delegate.also.iter().map(ToTokens::to_token_stream))
        })
        .chain(container.extends.iter().map(ToTokens::to_token_stream));
    for candidate in candidates {
        let key = candidate.to_string();
        if !seen.contains(&key) {
            seen.push(key);
            supertypes.push(quote!(<#candidate as ::delegacy_core::Surface>::descriptor));
        }
    }
    let supertype_count = supertypes.len();

    let own_names = eligible_names(fields);
    let nested = delegate_names(fields);

    quote! {
        static MEMBERS: [::delegacy_core::Member; #member_count] = [#(#members),*];

        static BINDINGS: [::delegacy_core::StaticBinding; #binding_count] = [#(#bindings),*];

        static SUPERTYPES: [fn() -> &'static ::delegacy_core::TypeDescriptor; #supertype_count] =
            [#(#supertypes),*];

        static DESCRIPTOR: ::delegacy_core::TypeDescriptor = ::delegacy_core::TypeDescriptor::new(
            ::delegacy_core::TypeKey::new(#display, ::core::any::TypeId::of::<#name>),
            &MEMBERS,
        )
        .with_bindings(&BINDINGS)
        .with_supertypes(&SUPERTYPES);

        impl ::delegacy_core::Surface for #name {
            const NAMES: &'static ::delegacy_core::NameSet = &::delegacy_core::NameSet {
                own: &[#(#own_names),*],
                nested: &[#(#nested),*],
            };

            fn descriptor() -> &'static ::delegacy_core::TypeDescriptor {
                &DESCRIPTOR
            }

            fn ledger() -> &'static ::delegacy_core::DelegationLedger {
                static LEDGER: ::std::sync::OnceLock<::delegacy_core::DelegationLedger> =
                    ::std::sync::OnceLock::new();
                LEDGER.get_or_init(|| {
                    ::delegacy_core::DelegationLedger::from_descriptor(&DESCRIPTOR)
                })
            }
        }
    }
}

fn eligible_names(fields: &[SurfaceField]) -> Vec<&str> {
    fields
        .iter()
        .filter(|field| field.eligible())
        .map(|field| field.name.as_str())
        .collect()
}

/// `NAMES` of every direct delegate, in field order
fn delegate_names(fields: &[SurfaceField]) -> Vec<TokenStream> {
    fields
        .iter()
        .filter_map(|field| field.delegate.as_ref())
        .map(|delegate| {
            let to = &delegate.to;
            quote!(<#to as ::delegacy_core::Surface>::NAMES)
        })
        .collect()
}

/// Compile-time refusal of hosts that would expose one name through two layers
///
/// Typed accessors of the host and of each delegate are separate traits, so an
/// overlap would make the call ambiguous and disagree with the ledger.
fn expand_disjoint_check(name: &Ident, fields: &[SurfaceField]) -> TokenStream {
    let own_names = eligible_names(fields);
    let nested = delegate_names(fields);
    if nested.is_empty() {
        return TokenStream::new();
    }
    let message = format!(
        "`{}` exposes a member name through more than one delegation layer; \
         rename the field or mark it #[surface(skip)]",
        name.unraw()
    );
    quote! {
        const _: () = ::core::assert!(
            ::delegacy_core::layers_are_disjoint(&[#(#own_names),*], &[#(#nested),*]),
            #message
        );
    }
}

fn expand_reflect(name: &Ident, fields: &[SurfaceField]) -> TokenStream {
    let field_arms = fields.iter().filter(|field| field.eligible()).map(|field| {
        let member = &field.name;
        let ident = &field.ident;
        quote! {
            #member => ::core::option::Option::Some(&self.#ident as &dyn ::core::any::Any),
        }
    });

    let delegate_arms = fields.iter().filter_map(|field| {
        let delegate = field.delegate.as_ref()?;
        let member = &field.name;
        let ident = &field.ident;
        let ty = &field.ty;
        let to = &delegate.to;
        Some(quote! {
            #member => ::core::option::Option::Some(
                <#ty as ::core::borrow::Borrow<#to>>::borrow(&self.#ident)
                    as &dyn ::delegacy_core::Reflect,
            ),
        })
    });

    quote! {
        impl ::delegacy_core::Reflect for #name {
            fn type_descriptor(&self) -> &'static ::delegacy_core::TypeDescriptor {
                &DESCRIPTOR
            }

            fn type_ledger(&self) -> &'static ::delegacy_core::DelegationLedger {
                <Self as ::delegacy_core::Surface>::ledger()
            }

            fn field(&self, name: &str) -> ::core::option::Option<&dyn ::core::any::Any> {
                match name {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn delegate_field(
                &self,
                field: &str,
            ) -> ::core::option::Option<&dyn ::delegacy_core::Reflect> {
                match field {
                    #(#delegate_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

fn expand_delegate_impls(name: &Ident, fields: &[SurfaceField]) -> TokenStream {
    let impls = fields.iter().filter_map(|field| {
        let delegate = field.delegate.as_ref()?;
        let ident = &field.ident;
        let ty = &field.ty;
        let to = &delegate.to;
        let also = delegate.also.iter().map(|reached| {
            quote! {
                impl ::delegacy_core::DelegateTo<#reached> for #name {
                    fn delegate(&self) -> &#reached {
                        <#to as ::delegacy_core::DelegateTo<#reached>>::delegate(
                            <#ty as ::core::borrow::Borrow<#to>>::borrow(&self.#ident),
                        )
                    }
                }
            }
        });
        Some(quote! {
            impl ::delegacy_core::DelegateTo<#to> for #name {
                fn delegate(&self) -> &#to {
                    <#ty as ::core::borrow::Borrow<#to>>::borrow(&self.#ident)
                }
            }
            #(#also)*
        })
    });
    quote!(#(#impls)*)
}

fn expand_fields_trait(
    input: &DeriveInput,
    container: &ContainerArgs,
    fields: &[SurfaceField],
) -> TokenStream {
    let name = &input.ident;
    let vis = &input.vis;
    let trait_name = container
        .trait_name
        .clone()
        .unwrap_or_else(|| format_ident!("{}Fields", name.unraw()));
    let display = name.unraw().to_string();
    let trait_doc = format!("Read-only accessors for the public fields of [`{display}`].");

    let eligible: Vec<_> = fields.iter().filter(|field| field.eligible()).collect();
    let signatures = eligible.iter().map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        let doc = format!("See `{display}::{}`.", field.name);
        quote! {
            #[doc = #doc]
            fn #ident(&self) -> &#ty;
        }
    });
    let own = eligible.iter().map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        quote! {
            #[inline]
            fn #ident(&self) -> &#ty {
                &self.#ident
            }
        }
    });
    let forwarded = eligible.iter().map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        quote! {
            #[inline]
            fn #ident(&self) -> &#ty {
                <#name as #trait_name>::#ident(::delegacy_core::DelegateTo::<#name>::delegate(self))
            }
        }
    });

    quote! {
        #[doc = #trait_doc]
        #vis trait #trait_name {
            #(#signatures)*
        }

        impl #trait_name for #name {
            #(#own)*
        }

        impl<T> #trait_name for T
        where
            T: ::delegacy_core::DelegateTo<#name> + ?Sized,
        {
            #(#forwarded)*
        }
    }
}
