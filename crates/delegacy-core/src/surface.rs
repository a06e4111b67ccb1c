//! Traits implemented by delegating types
//!
//! [`Reflect`] is the object-safe read surface used by accessors at run time.
//! [`Surface`] adds the type-level view (descriptor, ledger) and is what
//! `#[derive(Surface)]` implements. [`DelegateTo`] is the capability
//! declaration: a host implementing `DelegateTo<D>` can stand in for `D`.

use crate::accessor::ForwardingAccessor;
use crate::classify::{self, NameSet};
use crate::descriptor::{TypeDescriptor, TypeKey};
use crate::errors::Result;
use crate::ledger::{DelegateBinding, DelegationLedger};
use std::any::Any;
use std::collections::BTreeSet;

/// Object-safe read surface of a value
pub trait Reflect {
    /// Descriptor of the value's type
    fn type_descriptor(&self) -> &'static TypeDescriptor;

    /// Ledger of the value's type
    fn type_ledger(&self) -> &'static DelegationLedger {
        DelegationLedger::empty()
    }

    /// Own eligible field by name
    fn field(&self, name: &str) -> Option<&dyn Any>;

    /// Delegate held in `field`, if the field is populated
    fn delegate_field(&self, field: &str) -> Option<&dyn Reflect>;

    /// Read a member by name, forwarded names first
    fn read(&self, name: &str) -> Result<&dyn Any>
    where
        Self: Sized,
    {
        crate::accessor::read(self, name)
    }
}

/// Type-level delegation surface
pub trait Surface: Reflect + Sized + 'static {
    /// Names exposed through typed accessors, checked for overlap at compile time
    const NAMES: &'static NameSet = &NameSet::EMPTY;

    /// Static descriptor of the type
    fn descriptor() -> &'static TypeDescriptor;

    /// Ledger built from the type's static layers
    fn ledger() -> &'static DelegationLedger;

    /// Type identity
    fn key() -> TypeKey {
        *Self::descriptor().key()
    }

    /// Accessor installed for `name`, read at type level
    fn accessor(name: &str) -> Option<&'static ForwardingAccessor> {
        Self::ledger().accessor(name)
    }

    /// Every name forwarded by the type
    fn forwarded_names() -> BTreeSet<&'static str> {
        Self::ledger().forwarded_names()
    }

    /// Applied layers, ancestors first
    fn bindings() -> &'static [DelegateBinding] {
        Self::ledger().bindings()
    }

    /// The type's own members eligible for forwarding
    fn eligible_members() -> BTreeSet<&'static str> {
        classify::classify(Self::descriptor())
    }
}

/// Capability declaration: the implementor can stand in for `D`
pub trait DelegateTo<D: ?Sized> {
    /// The delegate instance
    fn delegate(&self) -> &D;
}
