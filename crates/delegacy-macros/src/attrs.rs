//! Helper attribute parsing for `#[derive(Surface)]`

use syn::{Attribute, Field, GenericArgument, Ident, Meta, Path, PathArguments, Result, Type};

/// Container-level `#[surface(..)]` arguments
#[derive(Default)]
pub struct ContainerArgs {
    pub trait_name: Option<Ident>,
    pub extends: Vec<Path>,
}

impl ContainerArgs {
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut args = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("surface")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("trait_name") {
                    if args.trait_name.is_some() {
                        return Err(meta.error("duplicate `trait_name`"));
                    }
                    args.trait_name = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("extends") {
                    meta.parse_nested_meta(|inner| {
                        args.extends.push(inner.path);
                        Ok(())
                    })
                } else {
                    Err(meta.error(
                        "unknown surface attribute key, expected `trait_name` or `extends`",
                    ))
                }
            })?;
        }
        Ok(args)
    }
}

/// A field's `#[delegate]` declaration
pub struct DelegateArgs {
    /// Delegate type the field borrows as
    pub to: Type,
    /// Further types reached through the delegate
    pub also: Vec<Path>,
}

/// Field-level helper arguments
#[derive(Default)]
pub struct FieldArgs {
    pub skip: bool,
    pub delegate: Option<DelegateArgs>,
}

impl FieldArgs {
    pub fn from_field(field: &Field) -> Result<Self> {
        let mut args = Self::default();
        for attr in &field.attrs {
            if attr.path().is_ident("surface") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        args.skip = true;
                        Ok(())
                    } else {
                        Err(meta.error("unknown surface field attribute key, expected `skip`"))
                    }
                })?;
            } else if attr.path().is_ident("delegate") {
                if args.delegate.is_some() {
                    return Err(syn::Error::new_spanned(attr, "duplicate `#[delegate]` attribute"));
                }
                args.delegate = Some(parse_delegate(attr, &field.ty)?);
            }
        }
        Ok(args)
    }
}

fn parse_delegate(attr: &Attribute, field_ty: &Type) -> Result<DelegateArgs> {
    let mut to = None;
    let mut also = Vec::new();
    if !matches!(attr.meta, Meta::Path(_)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("to") {
                to = Some(meta.value()?.parse::<Type>()?);
                Ok(())
            } else if meta.path.is_ident("also") {
                meta.parse_nested_meta(|inner| {
                    also.push(inner.path);
                    Ok(())
                })
            } else {
                Err(meta.error("unknown delegate attribute key, expected `to` or `also`"))
            }
        })?;
    }
    Ok(DelegateArgs {
        to: to.unwrap_or_else(|| default_delegate(field_ty)),
        also,
    })
}

/// `Arc<D>`, `Rc<D>` and `Box<D>` delegate to `D`; anything else to itself
pub fn default_delegate(ty: &Type) -> Type {
    if let Type::Path(path) = ty {
        if let Some(last) = path.path.segments.last() {
            let pointer = ["Arc", "Rc", "Box"].iter().any(|name| last.ident == name);
            if let (true, PathArguments::AngleBracketed(args)) = (pointer, &last.arguments) {
                let single = (args.args.len(), args.args.first());
                if let (1, Some(GenericArgument::Type(inner))) = single {
                    return inner.clone();
                }
            }
        }
    }
    ty.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;
    use syn::{parse_quote, DeriveInput, FieldsNamed};

    fn tokens(ty: &Type) -> String {
        ty.to_token_stream().to_string()
    }

    #[test]
    fn container_args_parse() {
        let input: DeriveInput = parse_quote! {
            #[surface(trait_name = MemberView, extends(Snowflake, crate::Mentionable))]
            struct Member { id: u64 }
        };
        let args = ContainerArgs::from_attrs(&input.attrs).unwrap();
        assert_eq!(args.trait_name.unwrap().to_string(), "MemberView");
        assert_eq!(args.extends.len(), 2);
    }

    #[test]
    fn unknown_container_key_is_rejected() {
        let input: DeriveInput = parse_quote! {
            #[surface(rename = "x")]
            struct Member { id: u64 }
        };
        let err = ContainerArgs::from_attrs(&input.attrs).err().unwrap();
        assert!(err.to_string().contains("unknown surface attribute key"));
    }

    #[test]
    fn bare_delegate_unwraps_shared_pointers() {
        let fields: FieldsNamed = parse_quote!({
            #[delegate]
            pub user: std::sync::Arc<User>,
            #[delegate]
            pub presence: Presence,
        });
        let mut iter = fields.named.iter();
        let user = FieldArgs::from_field(iter.next().unwrap()).unwrap();
        assert_eq!(tokens(&user.delegate.unwrap().to), "User");
        let presence = FieldArgs::from_field(iter.next().unwrap()).unwrap();
        assert_eq!(tokens(&presence.delegate.unwrap().to), "Presence");
    }

    #[test]
    fn explicit_delegate_and_also() {
        let fields: FieldsNamed = parse_quote!({
            #[delegate(to = Member, also(User, Presence))]
            pub member: Box<Member>,
        });
        let args = FieldArgs::from_field(&fields.named[0]).unwrap();
        let delegate = args.delegate.unwrap();
        assert_eq!(tokens(&delegate.to), "Member");
        assert_eq!(delegate.also.len(), 2);
    }

    #[test]
    fn skip_is_parsed() {
        let fields: FieldsNamed = parse_quote!({
            #[surface(skip)]
            pub cache_slot: u32,
        });
        let args = FieldArgs::from_field(&fields.named[0]).unwrap();
        assert!(args.skip);
        assert!(args.delegate.is_none());
    }
}
