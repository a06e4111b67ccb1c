//! Forwarding accessors
//!
//! A [`ForwardingAccessor`] is bound to a host field and a delegate member.
//! Reading it on a host instance reads the field, then the member off the
//! value held there. Accessors have no write path.

use crate::descriptor::TypeKey;
use crate::errors::{DelegationError, Result};
use crate::ledger::{DelegateBinding, DelegationLedger};
use crate::surface::Reflect;
use std::any::Any;

/// Read-only view of a delegate member through a host field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForwardingAccessor {
    field: &'static str,
    member: &'static str,
    delegate: TypeKey,
}

/// Result of resolving an accessor with or without an instance
#[derive(Debug, Clone, Copy)]
pub enum Access<'a> {
    /// No instance was given: the accessor itself
    Descriptor(&'a ForwardingAccessor),
    /// The forwarded value read off an instance
    Value(&'a dyn Any),
}

impl<'a> Access<'a> {
    /// The accessor, when resolved at type level
    pub fn descriptor(&self) -> Option<&'a ForwardingAccessor> {
        match self {
            Self::Descriptor(accessor) => Some(accessor),
            Self::Value(_) => None,
        }
    }

    /// The value, when resolved on an instance
    pub fn value(&self) -> Option<&'a dyn Any> {
        match self {
            Self::Descriptor(_) => None,
            Self::Value(value) => Some(*value),
        }
    }
}

impl ForwardingAccessor {
    /// Bind `member` of the delegate held in `field`
    pub const fn new(field: &'static str, member: &'static str, delegate: TypeKey) -> Self {
        Self {
            field,
            member,
            delegate,
        }
    }

    /// Host field holding the delegate
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Member read off the delegate
    pub fn member(&self) -> &'static str {
        self.member
    }

    /// Delegate type the accessor was installed for
    pub fn delegate(&self) -> &TypeKey {
        &self.delegate
    }

    /// Layer this accessor belongs to
    pub fn binding(&self) -> DelegateBinding {
        DelegateBinding::new(self.field, self.delegate)
    }

    /// Documentation line pointing at the delegate member
    pub fn doc(&self) -> String {
        let delegate = self.delegate.name();
        let short = delegate.rsplit("::").next().unwrap_or(delegate);
        format!("See `{short}::{}`.", self.member)
    }

    /// Read the forwarded member off `instance`
    pub fn get<'a>(&self, instance: &'a dyn Reflect) -> Result<&'a dyn Any> {
        let delegate = instance.delegate_field(self.field).ok_or_else(|| {
            DelegationError::missing_delegate(instance.type_descriptor().name(), self.field)
        })?;
        read(delegate, self.member).map_err(|err| match err {
            DelegationError::UnknownMember { .. } => {
                DelegationError::missing_member(self.field, self.member)
            }
            other => other,
        })
    }

    /// Read the forwarded member off `instance` as a `T`
    pub fn get_as<'a, T: Any>(&self, instance: &'a dyn Reflect) -> Result<&'a T> {
        self.get(instance)?
            .downcast_ref::<T>()
            .ok_or_else(|| DelegationError::member_type(self.member, std::any::type_name::<T>()))
    }

    /// Resolve at type level (`None`) or on an instance
    pub fn resolve<'a>(&'a self, instance: Option<&'a dyn Reflect>) -> Result<Access<'a>> {
        match instance {
            None => Ok(Access::Descriptor(self)),
            Some(instance) => self.get(instance).map(Access::Value),
        }
    }
}

/// Read a member by name through the instance's own ledger
///
/// Forwarded names shadow the instance's own fields.
pub fn read<'a>(instance: &'a dyn Reflect, name: &str) -> Result<&'a dyn Any> {
    read_with(instance, instance.type_ledger(), name)
}

/// Read a member by name, consulting `ledger` for forwarded names
pub fn read_with<'a>(
    instance: &'a dyn Reflect,
    ledger: &DelegationLedger,
    name: &str,
) -> Result<&'a dyn Any> {
    if let Some(accessor) = ledger.accessor(name) {
        return accessor.get(instance);
    }
    instance
        .field(name)
        .ok_or_else(|| DelegationError::unknown_member(instance.type_descriptor().name(), name))
}

/// Typed variant of [`read`]
pub fn read_as<'a, T: Any>(instance: &'a dyn Reflect, name: &str) -> Result<&'a T> {
    read(instance, name)?
        .downcast_ref::<T>()
        .ok_or_else(|| DelegationError::member_type(name, std::any::type_name::<T>()))
}
