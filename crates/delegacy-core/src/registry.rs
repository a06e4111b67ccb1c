//! Delegation registry
//!
//! The registry applies delegation layers at run time and keeps one ledger
//! per host type, keyed by `TypeId`. Queries merge the ledgers of registered
//! supertypes first, so a descendant that applies a new layer builds on its
//! ancestors rather than replacing them.
//!
//! Each [`DelegationRegistry::apply`] call validates everything before it
//! touches a ledger: a rejected layer leaves no trace.

use crate::accessor::{self, ForwardingAccessor};
use crate::classify;
use crate::config::{CollisionPolicy, RegistryConfig};
use crate::descriptor::{TypeDescriptor, TypeKey, MAX_SUPERTYPE_DEPTH};
use crate::errors::{ConfigurationError, Result};
use crate::ledger::{DelegateBinding, DelegationLedger};
use crate::member::Member;
use crate::surface::{Reflect, Surface};
use std::any::{Any, TypeId};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, trace};

#[derive(Debug, Clone)]
struct HostRecord {
    descriptor: &'static TypeDescriptor,
    ledger: DelegationLedger,
}

/// Registry of delegation layers applied at run time
#[derive(Debug, Default)]
pub struct DelegationRegistry {
    config: RegistryConfig,
    hosts: HashMap<TypeId, HostRecord>,
}

impl DelegationRegistry {
    /// Create a registry with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with a validated configuration
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            hosts: HashMap::new(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Apply one delegation layer to `host`
    ///
    /// Forwards every member in the surface of `delegate` through the host
    /// field named `field`. Returns `host` so layers can be stacked.
    ///
    /// # Errors
    /// - [`ConfigurationError::NotCapable`] if `host` cannot stand in for `delegate`
    /// - [`ConfigurationError::UnknownField`] if `host` declares no such field
    /// - [`ConfigurationError::MemberCollision`] under [`CollisionPolicy::Reject`]
    pub fn apply(
        &mut self,
        host: &'static TypeDescriptor,
        delegate: &'static TypeDescriptor,
        field: &str,
    ) -> Result<&'static TypeDescriptor> {
        if !host.satisfies(delegate.key()) {
            debug!(
                host = host.name(),
                delegate = delegate.name(),
                "Rejected delegation layer: host lacks the delegate's capability set"
            );
            return Err(ConfigurationError::not_capable(host.name(), delegate.name()).into());
        }

        let field = host
            .member(field)
            .map(Member::name)
            .ok_or_else(|| ConfigurationError::unknown_field(host.name(), field))?;
        let binding = DelegateBinding::new(field, *delegate.key());
        let names = classify::surface(delegate, &self.config);

        if self.config.collision_policy == CollisionPolicy::Reject {
            let collisions = self.ledger(host).collisions(&binding, &names);
            if !collisions.is_empty() {
                debug!(
                    host = host.name(),
                    delegate = delegate.name(),
                    collisions = ?collisions,
                    "Rejected delegation layer: members already forwarded"
                );
                return Err(ConfigurationError::member_collision(host.name(), collisions).into());
            }
        }

        for name in names.iter().filter(|name| host.member(name).is_some()) {
            trace!(
                host = host.name(),
                member = *name,
                "Forwarded member shadows a host member"
            );
        }

        let record = self
            .hosts
            .entry(host.key().type_id())
            .or_insert_with(|| HostRecord {
                descriptor: host,
                ledger: DelegationLedger::new(),
            });
        record.ledger.record(binding, names);

        debug!(
            host = host.name(),
            delegate = delegate.name(),
            field,
            "Applied delegation layer"
        );
        Ok(host)
    }

    /// Typed form of [`apply`](Self::apply)
    pub fn apply_typed<H: Surface, D: Surface>(
        &mut self,
        field: &str,
    ) -> Result<&'static TypeDescriptor> {
        self.apply(H::descriptor(), D::descriptor(), field)
    }

    /// Apply every static layer `host` declares, all or nothing
    pub fn register(&mut self, host: &'static TypeDescriptor) -> Result<&'static TypeDescriptor> {
        let id = host.key().type_id();
        let snapshot = self.hosts.get(&id).cloned();

        for binding in host.bindings() {
            if let Err(err) = self.apply(host, binding.delegate(), binding.field()) {
                match snapshot {
                    Some(record) => {
                        self.hosts.insert(id, record);
                    }
                    None => {
                        self.hosts.remove(&id);
                    }
                }
                return Err(err);
            }
        }
        Ok(host)
    }

    /// Typed form of [`register`](Self::register)
    pub fn register_typed<H: Surface>(&mut self) -> Result<&'static TypeDescriptor> {
        self.register(H::descriptor())
    }

    /// Whether any layer was applied to the host identified by `key`
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.hosts.contains_key(&key.type_id())
    }

    /// Every host with at least one applied layer
    pub fn hosts(&self) -> impl Iterator<Item = &'static TypeDescriptor> + '_ {
        self.hosts.values().map(|record| record.descriptor)
    }

    /// Merged ledger of `host`, registered ancestors first
    pub fn ledger(&self, host: &TypeDescriptor) -> DelegationLedger {
        self.merged(host, 0)
    }

    fn merged(&self, host: &TypeDescriptor, depth: usize) -> DelegationLedger {
        let mut ledger = DelegationLedger::new();
        if depth >= MAX_SUPERTYPE_DEPTH {
            return ledger;
        }
        for supertype in host.supertypes() {
            ledger.merge(&self.merged(supertype, depth + 1));
        }
        if let Some(record) = self.hosts.get(&host.key().type_id()) {
            ledger.merge(&record.ledger);
        }
        ledger
    }

    /// Applied layers of `host`, ancestors first
    pub fn bindings(&self, host: &TypeDescriptor) -> Vec<DelegateBinding> {
        self.ledger(host).bindings().to_vec()
    }

    /// Every name `host` forwards
    pub fn forwarded_names(&self, host: &TypeDescriptor) -> BTreeSet<&'static str> {
        self.ledger(host).forwarded_names()
    }

    /// Accessor `host` installed for `name`
    ///
    /// # Errors
    /// - [`ConfigurationError::ReservedMember`] for names that are never forwarded
    /// - [`ConfigurationError::NotForwarded`] for names no layer covers
    pub fn accessor(&self, host: &TypeDescriptor, name: &str) -> Result<ForwardingAccessor> {
        if self.config.is_reserved(name) {
            return Err(ConfigurationError::reserved_member(name).into());
        }
        self.ledger(host)
            .accessor(name)
            .copied()
            .ok_or_else(|| ConfigurationError::not_forwarded(host.name(), name).into())
    }

    /// Read `name` off `instance` using the layers registered for its type
    pub fn read<'a>(&self, instance: &'a dyn Reflect, name: &str) -> Result<&'a dyn Any> {
        let ledger = self.ledger(instance.type_descriptor());
        accessor::read_with(instance, &ledger, name)
    }
}
