//! Delegacy Derive Macros
//!
//! This crate provides `#[derive(Surface)]`, which turns a struct into a
//! delegation participant: it emits the struct's static descriptor, its
//! lazily built ledger, a read-only accessor trait for its public data fields
//! and, for every `#[delegate]` field, the capability impl that lets the
//! struct stand in for the delegate.
//!
//! # Example
//!
//! ```ignore
//! use delegacy_macros::Surface;
//! use std::sync::Arc;
//!
//! #[derive(Surface)]
//! pub struct User {
//!     pub id: u64,
//!     pub username: String,
//! }
//!
//! #[derive(Surface)]
//! pub struct Member {
//!     #[delegate]
//!     pub user: Arc<User>,
//!     pub nickname: Option<String>,
//! }
//!
//! // `Member` reads like a `User`
//! let user = Arc::new(User { id: 1, username: "nekokatt".into() });
//! let member = Member { user, nickname: None };
//! assert_eq!(member.username(), "nekokatt");
//! ```
//!
//! Forwarded members are read-only. The accessor trait hands out shared
//! references, so writing through one does not compile:
//!
//! ```compile_fail
//! use delegacy_macros::Surface;
//!
//! #[derive(Surface)]
//! pub struct User {
//!     pub username: String,
//! }
//!
//! #[derive(Surface)]
//! pub struct Member {
//!     #[delegate]
//!     pub user: User,
//! }
//!
//! let member = Member { user: User { username: "a".into() } };
//! *member.username() = String::from("b");
//! ```
//!
//! A name may be exposed through one layer only. A host field named like a
//! member of its delegate is refused at compile time:
//!
//! ```compile_fail
//! use delegacy_macros::Surface;
//!
//! #[derive(Surface)]
//! pub struct User {
//!     pub username: String,
//! }
//!
//! #[derive(Surface)]
//! pub struct Member {
//!     #[delegate]
//!     pub user: User,
//!     pub username: String,
//! }
//! ```
//!
//! So are two delegates sharing a member name:
//!
//! ```compile_fail
//! use delegacy_macros::Surface;
//!
//! #[derive(Surface)]
//! pub struct User {
//!     pub username: String,
//! }
//!
//! #[derive(Surface)]
//! pub struct Profile {
//!     pub username: String,
//! }
//!
//! #[derive(Surface)]
//! pub struct Member {
//!     #[delegate]
//!     pub user: User,
//!     #[delegate]
//!     pub profile: Profile,
//! }
//! ```

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod attrs;
mod classify;
mod surface;

/// Derive the delegation surface of a struct
///
/// # Container Attributes
///
/// - `#[surface(trait_name = Name)]` - accessor trait name, `<Struct>Fields` by default
/// - `#[surface(extends(A, B))]` - further types the struct can stand in for
///
/// # Field Attributes
///
/// - `#[surface(skip)]` - keep the field out of the accessor trait
/// - `#[delegate]` - forward the field's type; `Arc<D>`, `Rc<D>` and `Box<D>` forward `D`
/// - `#[delegate(to = D)]` - forward `D`; the field must implement `Borrow<D>`
/// - `#[delegate(also(E))]` - also stand in for `E`, reached through the delegate
///
/// # Generated Code
///
/// - `impl Surface` and `impl Reflect` backed by a static descriptor
/// - `impl DelegateTo<D>` for every delegate field
/// - the accessor trait, implemented for the struct and for every `T: DelegateTo<Struct>`
/// - a `const` assertion that own fields and delegate layers expose disjoint names
///
/// # Nested Hosts
///
/// Typed accessors follow `DelegateTo` impls only. A host delegating to another
/// host, such as `CachedMember` holding a `Member`, reads the `User` and
/// `Presence` members through typed accessors only when those types are listed
/// in `#[delegate(also(User, Presence))]`. The runtime surface
/// (`delegacy_core::surface`, `Reflect::read`) follows nested ledgers without it.
#[proc_macro_derive(Surface, attributes(surface, delegate))]
pub fn derive_surface(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    match surface::expand(input) {
        Ok(output) => output.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
