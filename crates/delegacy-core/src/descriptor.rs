//! Static type descriptors
//!
//! A descriptor is the statically declared surface of a type: its identity,
//! its members, the delegation layers it declares and the types it can stand
//! in for. `#[derive(Surface)]` emits one per type as a `static` item; tests
//! and tooling may also write them by hand.

use crate::member::Member;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Bound on supertype and nested-delegate walks
pub const MAX_SUPERTYPE_DEPTH: usize = 32;

/// Identity of a type taking part in delegation
#[derive(Clone, Copy)]
pub struct TypeKey {
    name: &'static str,
    id: fn() -> TypeId,
}

impl TypeKey {
    /// Create a key from a display name and a `TypeId` thunk
    pub const fn new(name: &'static str, id: fn() -> TypeId) -> Self {
        Self { name, id }
    }

    /// Key for `T`, named after its full type path
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(std::any::type_name::<T>(), TypeId::of::<T>)
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runtime type identity
    pub fn type_id(&self) -> TypeId {
        (self.id)()
    }

    /// Whether this key identifies `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A delegation layer declared at compile time
#[derive(Clone, Copy)]
pub struct StaticBinding {
    field: &'static str,
    delegate: fn() -> &'static TypeDescriptor,
}

impl StaticBinding {
    /// Declare that `field` holds a value of the type described by `delegate`
    pub const fn new(field: &'static str, delegate: fn() -> &'static TypeDescriptor) -> Self {
        Self { field, delegate }
    }

    /// Host field holding the delegate
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Descriptor of the delegate type
    pub fn delegate(&self) -> &'static TypeDescriptor {
        (self.delegate)()
    }
}

impl fmt::Debug for StaticBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticBinding")
            .field("field", &self.field)
            .field("delegate", &self.delegate().name())
            .finish()
    }
}

/// Statically declared surface of a type
pub struct TypeDescriptor {
    key: TypeKey,
    members: &'static [Member],
    bindings: &'static [StaticBinding],
    supertypes: &'static [fn() -> &'static TypeDescriptor],
}

impl TypeDescriptor {
    /// Create a descriptor with no bindings and no supertypes
    pub const fn new(key: TypeKey, members: &'static [Member]) -> Self {
        Self {
            key,
            members,
            bindings: &[],
            supertypes: &[],
        }
    }

    /// Declare the type's static delegation layers, in application order
    pub const fn with_bindings(self, bindings: &'static [StaticBinding]) -> Self {
        Self { bindings, ..self }
    }

    /// Declare the types this type can stand in for
    pub const fn with_supertypes(
        self,
        supertypes: &'static [fn() -> &'static TypeDescriptor],
    ) -> Self {
        Self { supertypes, ..self }
    }

    /// Type identity
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// Every declared member, eligible or not
    pub fn members(&self) -> &'static [Member] {
        self.members
    }

    /// Look up a declared member by name
    pub fn member(&self, name: &str) -> Option<&'static Member> {
        self.members.iter().find(|member| member.name() == name)
    }

    /// Static delegation layers, in application order
    pub fn bindings(&self) -> &'static [StaticBinding] {
        self.bindings
    }

    /// Direct supertypes, in declaration order
    pub fn supertypes(&self) -> impl Iterator<Item = &'static TypeDescriptor> {
        self.supertypes.iter().map(|supertype| supertype())
    }

    /// Whether this type can stand in for the type identified by `key`
    ///
    /// A type satisfies itself and, transitively, every declared supertype.
    pub fn satisfies(&self, key: &TypeKey) -> bool {
        self.satisfies_at(key, 0)
    }

    fn satisfies_at(&self, key: &TypeKey, depth: usize) -> bool {
        if self.key == *key {
            return true;
        }
        depth < MAX_SUPERTYPE_DEPTH
            && self
                .supertypes()
                .any(|supertype| supertype.satisfies_at(key, depth + 1))
    }

    /// Every transitive supertype, ancestors before descendants, without repeats
    pub fn ancestors(&self) -> Vec<&'static TypeDescriptor> {
        let mut out: Vec<&'static TypeDescriptor> = Vec::new();
        self.collect_ancestors(&mut out, 0);
        out
    }

    fn collect_ancestors(&self, out: &mut Vec<&'static TypeDescriptor>, depth: usize) {
        if depth >= MAX_SUPERTYPE_DEPTH {
            return;
        }
        for supertype in self.supertypes() {
            supertype.collect_ancestors(out, depth + 1);
            if !out.iter().any(|seen| seen.key == supertype.key) {
                out.push(supertype);
            }
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("key", &self.key)
            .field("members", &self.members)
            .field("bindings", &self.bindings)
            .field(
                "supertypes",
                &self.supertypes().map(TypeDescriptor::name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
