//! Member classification
//!
//! Decides which members of a delegate type are eligible for forwarding.
//! Only public data fields qualify: callables, methods, markers, private and
//! hidden members are dropped, as are `__`-prefixed names and the names in
//! [`RESERVED_MEMBERS`]. Results are `BTreeSet`s so identical input always
//! yields identical, ordered output.

use crate::config::RegistryConfig;
use crate::descriptor::{TypeDescriptor, MAX_SUPERTYPE_DEPTH};
use crate::ledger::DelegationLedger;
use crate::member::{Member, MemberKind, DUNDER_PREFIX};
use std::collections::BTreeSet;

/// Bookkeeping names that are never forwarded
pub const RESERVED_MEMBERS: &[&str] = &["_marker", "_phantom"];

/// Whether a name may be forwarded regardless of its kind
pub fn is_forwardable_name(name: &str) -> bool {
    !name.starts_with(DUNDER_PREFIX) && !RESERVED_MEMBERS.contains(&name)
}

/// Whether a member is eligible under `config`
pub fn is_eligible(member: &Member, config: &RegistryConfig) -> bool {
    member.kind() == MemberKind::Field && !config.is_reserved(member.name())
}

/// Eligible members of `descriptor` under the default configuration
pub fn classify(descriptor: &TypeDescriptor) -> BTreeSet<&'static str> {
    classify_with(descriptor, &RegistryConfig::default())
}

/// Eligible members of `descriptor` under `config`
pub fn classify_with(
    descriptor: &TypeDescriptor,
    config: &RegistryConfig,
) -> BTreeSet<&'static str> {
    descriptor
        .members()
        .iter()
        .filter(|member| is_eligible(member, config))
        .map(Member::name)
        .collect()
}

/// Readable surface of `descriptor`
///
/// The eligible members plus every name the type forwards through its own
/// static delegation layers. Forwarded names pass through the same reserved
/// name filter as declared ones.
pub fn surface(
    descriptor: &'static TypeDescriptor,
    config: &RegistryConfig,
) -> BTreeSet<&'static str> {
    surface_at(descriptor, config, 0)
}

pub(crate) fn surface_at(
    descriptor: &'static TypeDescriptor,
    config: &RegistryConfig,
    depth: usize,
) -> BTreeSet<&'static str> {
    let mut names = classify_with(descriptor, config);
    if depth < MAX_SUPERTYPE_DEPTH && !descriptor.bindings().is_empty() {
        let nested = DelegationLedger::build(descriptor, config, depth + 1);
        names.extend(
            nested
                .forwarded_names()
                .into_iter()
                .filter(|name| !config.is_reserved(name)),
        );
    }
    names
}

/// Names a type exposes through typed accessors, checked at compile time
///
/// `own` lists the type's eligible fields; `nested` holds the sets of the
/// types it delegates to. `#[derive(Surface)]` emits one per type and refuses
/// a host whose layers would expose the same name twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameSet {
    /// Eligible fields of the type itself
    pub own: &'static [&'static str],
    /// Sets of the type's delegates
    pub nested: &'static [&'static NameSet],
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

impl NameSet {
    /// Set of a type exposing nothing
    pub const EMPTY: Self = Self::new(&[], &[]);

    /// Create a set
    pub const fn new(own: &'static [&'static str], nested: &'static [&'static NameSet]) -> Self {
        Self { own, nested }
    }

    /// Whether `name` is exposed by the type or any of its delegates
    pub const fn contains(&self, name: &str) -> bool {
        let mut i = 0;
        while i < self.own.len() {
            if str_eq(self.own[i], name) {
                return true;
            }
            i += 1;
        }
        let mut j = 0;
        while j < self.nested.len() {
            if self.nested[j].contains(name) {
                return true;
            }
            j += 1;
        }
        false
    }

    /// Whether the two sets share a name
    pub const fn overlaps(&self, other: &NameSet) -> bool {
        let mut i = 0;
        while i < self.own.len() {
            if other.contains(self.own[i]) {
                return true;
            }
            i += 1;
        }
        let mut j = 0;
        while j < self.nested.len() {
            if self.nested[j].overlaps(other) {
                return true;
            }
            j += 1;
        }
        false
    }
}

/// Whether a host's own names and each of its layers are pairwise disjoint
///
/// Evaluated in a `const` by `#[derive(Surface)]`: a host whose own field
/// shares a name with a delegate member, or whose delegates share a member
/// name, fails to compile.
pub const fn layers_are_disjoint(own: &[&str], layers: &[&NameSet]) -> bool {
    let mut i = 0;
    while i < layers.len() {
        let mut k = 0;
        while k < own.len() {
            if layers[i].contains(own[k]) {
                return false;
            }
            k += 1;
        }
        let mut j = i + 1;
        while j < layers.len() {
            if layers[i].overlaps(layers[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}
