//! Compile-time member classification
//!
//! Applies the runtime classifier's rules to `syn` fields so the accessor
//! trait and the static descriptor agree on what is forwarded.

use delegacy_core::{is_forwardable_name, MemberKind};
use quote::format_ident;
use syn::{Field, PathArguments, Type, TypeParamBound, Visibility};

/// Kind of a struct field as seen by the classifier
pub fn field_kind(field: &Field, skip: bool) -> MemberKind {
    if skip {
        MemberKind::Hidden
    } else if !matches!(field.vis, Visibility::Public(_)) {
        MemberKind::Private
    } else if is_callable(&field.ty) {
        MemberKind::Callable
    } else if is_marker(&field.ty) {
        MemberKind::Marker
    } else {
        MemberKind::Field
    }
}

/// Whether a field of `kind` named `name` is forwarded
pub fn is_eligible(name: &str, kind: MemberKind) -> bool {
    kind == MemberKind::Field && is_forwardable_name(name)
}

/// Tokens naming `kind` in generated code
pub fn kind_path(kind: MemberKind) -> proc_macro2::TokenStream {
    let variant = format_ident!("{}", format!("{kind:?}"));
    quote::quote!(::delegacy_core::MemberKind::#variant)
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(path) => path.path.segments.last(),
        _ => None,
    }
}

fn is_fn_bound(bounds: &syn::punctuated::Punctuated<TypeParamBound, syn::Token![+]>) -> bool {
    bounds.iter().any(|bound| match bound {
        TypeParamBound::Trait(trait_bound) => trait_bound
            .path
            .segments
            .last()
            .is_some_and(|segment| ["Fn", "FnMut", "FnOnce"].iter().any(|f| segment.ident == f)),
        _ => false,
    })
}

/// `fn(..)`, `dyn Fn*`, `impl Fn*`, and `Box`/`Arc`/`Rc` of those
pub fn is_callable(ty: &Type) -> bool {
    match ty {
        Type::BareFn(_) => true,
        Type::TraitObject(object) => is_fn_bound(&object.bounds),
        Type::ImplTrait(imp) => is_fn_bound(&imp.bounds),
        Type::Paren(inner) => is_callable(&inner.elem),
        Type::Reference(reference) => is_callable(&reference.elem),
        Type::Path(_) => last_segment(ty).is_some_and(|segment| {
            let pointer = ["Box", "Arc", "Rc"].iter().any(|p| segment.ident == p);
            pointer
                && match &segment.arguments {
                    PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| {
                        matches!(arg, syn::GenericArgument::Type(inner) if is_callable(inner))
                    }),
                    _ => false,
                }
        }),
        _ => false,
    }
}

/// `PhantomData<..>` and `PhantomPinned`
pub fn is_marker(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|segment| {
        segment.ident == "PhantomData" || segment.ident == "PhantomPinned"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, FieldsNamed};

    fn kinds(fields: FieldsNamed) -> Vec<(String, MemberKind)> {
        fields
            .named
            .iter()
            .map(|field| {
                let name = field.ident.as_ref().map(ToString::to_string).unwrap_or_default();
                (name, field_kind(field, false))
            })
            .collect()
    }

    #[test]
    fn public_data_fields_are_fields() {
        let fields = kinds(parse_quote!({
            pub id: u64,
            pub avatar: Option<String>,
            password_hash: String,
            pub(crate) token: String,
        }));
        assert_eq!(fields[0].1, MemberKind::Field);
        assert_eq!(fields[1].1, MemberKind::Field);
        assert_eq!(fields[2].1, MemberKind::Private);
        assert_eq!(fields[3].1, MemberKind::Private);
    }

    #[test]
    fn callables_are_detected() {
        let fields = kinds(parse_quote!({
            pub on_update: fn(&str),
            pub handler: Box<dyn Fn(u64) + Send + Sync>,
            pub shared: std::sync::Arc<dyn FnMut()>,
            pub borrowed: &'static dyn Fn(),
            pub not_a_callable: Box<str>,
        }));
        let callables: Vec<_> = fields
            .iter()
            .filter(|(_, kind)| *kind == MemberKind::Callable)
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(callables, ["on_update", "handler", "shared", "borrowed"]);
    }

    #[test]
    fn markers_are_detected() {
        let fields = kinds(parse_quote!({
            pub _owner: std::marker::PhantomData<u8>,
            pub pinned: PhantomPinned,
        }));
        assert!(fields.iter().all(|(_, kind)| *kind == MemberKind::Marker));
    }

    #[test]
    fn dunder_and_reserved_names_are_not_eligible() {
        assert!(is_eligible("username", MemberKind::Field));
        assert!(!is_eligible("__internal", MemberKind::Field));
        assert!(!is_eligible("_marker", MemberKind::Field));
        assert!(!is_eligible("username", MemberKind::Hidden));
    }

    #[test]
    fn kind_paths_name_the_runtime_variant() {
        assert_eq!(
            kind_path(MemberKind::Callable).to_string(),
            ":: delegacy_core :: MemberKind :: Callable"
        );
    }
}
