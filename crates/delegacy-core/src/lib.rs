//! Delegacy Core - Attribute Delegation Runtime
//!
//! This crate lets a host type expose the read surface of a delegate type it
//! holds in a field, so several hosts can share one delegate instance (for
//! example several guild `Member`s holding one `Arc<User>`) while still
//! reading like the delegate.
//!
//! # Architecture
//!
//! ## Static Model
//! - `TypeDescriptor`: members, declared layers and capability set of a type
//! - `Member` / `MemberKind`: one declared member and its classification input
//!
//! ## Delegation
//! - `classify`: which delegate members are eligible for forwarding
//! - `ForwardingAccessor`: read-only view of one delegate member
//! - `DelegationLedger`: applied layers and installed accessors of a host
//! - `DelegationRegistry`: applies layers at run time, all or nothing
//!
//! ## Traits
//! - `Reflect`: object-safe read surface used by accessors
//! - `Surface`: type-level view, implemented by `#[derive(Surface)]`
//! - `DelegateTo<D>`: capability declaration, the host can stand in for `D`
//!
//! Forwarded members are read-only: the accessor types expose no write path
//! and generated accessor traits return shared references only.

#![forbid(unsafe_code)]

// === Static Model ===

/// Static type descriptors and type identity
pub mod descriptor;

/// Declared members and their kinds
pub mod member;

// === Delegation ===

/// Member classification
pub mod classify;

/// Forwarding accessors and name-based reads
pub mod accessor;

/// Per-host record of applied layers
pub mod ledger;

/// Runtime composition of delegation layers
pub mod registry;

/// Read and capability traits
pub mod surface;

// === Infrastructure ===

/// Registry configuration
pub mod config;

/// Unified error handling
pub mod errors;

#[cfg(test)]
mod fixtures;

// === Public API Re-exports ===

pub use accessor::{read, read_as, read_with, Access, ForwardingAccessor};
pub use classify::{
    classify, classify_with, is_forwardable_name, layers_are_disjoint, surface, NameSet,
    RESERVED_MEMBERS,
};
pub use config::{CollisionPolicy, RegistryConfig};
pub use descriptor::{StaticBinding, TypeDescriptor, TypeKey, MAX_SUPERTYPE_DEPTH};
pub use errors::{ConfigurationError, DelegationError, Result};
pub use ledger::{AccessorSummary, BindingSummary, DelegateBinding, DelegationLedger, LedgerSummary};
pub use member::{Member, MemberKind, DUNDER_PREFIX};
pub use registry::DelegationRegistry;
pub use surface::{DelegateTo, Reflect, Surface};
