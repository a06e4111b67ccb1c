//! Delegation ledger
//!
//! Per-host record of every applied delegation layer and of the accessor
//! installed for each forwarded name. Forwarded names are the keys of the
//! accessor map, so each name always has exactly one accessor: the one
//! installed by the most recent layer that covered it.

use crate::accessor::ForwardingAccessor;
use crate::classify;
use crate::config::RegistryConfig;
use crate::descriptor::{TypeDescriptor, TypeKey, MAX_SUPERTYPE_DEPTH};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// One applied delegation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelegateBinding {
    field: &'static str,
    delegate: TypeKey,
}

impl DelegateBinding {
    /// Bind `field` to values of the `delegate` type
    pub const fn new(field: &'static str, delegate: TypeKey) -> Self {
        Self { field, delegate }
    }

    /// Host field holding the delegate
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Delegate type
    pub fn delegate(&self) -> &TypeKey {
        &self.delegate
    }
}

/// Applied layers and installed accessors of one host type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelegationLedger {
    bindings: Vec<DelegateBinding>,
    accessors: BTreeMap<&'static str, ForwardingAccessor>,
}

static EMPTY_LEDGER: DelegationLedger = DelegationLedger::new();

impl DelegationLedger {
    /// Create an empty ledger
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
            accessors: BTreeMap::new(),
        }
    }

    /// Shared empty ledger for types that delegate nothing
    pub fn empty() -> &'static Self {
        &EMPTY_LEDGER
    }

    /// Build the ledger a type declares statically
    ///
    /// Ledgers of direct supertypes are layered first, in declaration order,
    /// then the type's own bindings in application order.
    pub fn from_descriptor(descriptor: &'static TypeDescriptor) -> Self {
        Self::build(descriptor, &RegistryConfig::default(), 0)
    }

    pub(crate) fn build(
        descriptor: &'static TypeDescriptor,
        config: &RegistryConfig,
        depth: usize,
    ) -> Self {
        let mut ledger = Self::new();
        if depth >= MAX_SUPERTYPE_DEPTH {
            return ledger;
        }
        for supertype in descriptor.supertypes() {
            ledger.merge(&Self::build(supertype, config, depth + 1));
        }
        for binding in descriptor.bindings() {
            let delegate = binding.delegate();
            let names = classify::surface_at(delegate, config, depth + 1);
            ledger.record(DelegateBinding::new(binding.field(), *delegate.key()), names);
        }
        ledger
    }

    /// Append `binding` and install one accessor per name
    ///
    /// Returns the names whose accessor from an earlier layer was replaced.
    pub fn record<I>(&mut self, binding: DelegateBinding, names: I) -> Vec<&'static str>
    where
        I: IntoIterator<Item = &'static str>,
    {
        if !self.bindings.contains(&binding) {
            self.bindings.push(binding);
        }

        let mut shadowed = Vec::new();
        for name in names {
            let accessor = ForwardingAccessor::new(binding.field, name, binding.delegate);
            if let Some(previous) = self.accessors.insert(name, accessor) {
                if previous.binding() != binding {
                    shadowed.push(name);
                }
            }
        }

        if !shadowed.is_empty() {
            warn!(
                field = binding.field,
                delegate = binding.delegate.name(),
                shadowed = ?shadowed,
                "Delegation layer shadows members forwarded by an earlier layer"
            );
        }
        debug!(
            field = binding.field,
            delegate = binding.delegate.name(),
            forwarded = self.accessors.len(),
            "Recorded delegation layer"
        );
        shadowed
    }

    /// Names in `names` that a layer other than `binding` already forwards
    pub fn collisions(
        &self,
        binding: &DelegateBinding,
        names: &BTreeSet<&'static str>,
    ) -> Vec<&'static str> {
        names
            .iter()
            .copied()
            .filter(|name| {
                self.accessors
                    .get(name)
                    .is_some_and(|accessor| accessor.binding() != *binding)
            })
            .collect()
    }

    /// Layer `other` on top of this ledger
    pub fn merge(&mut self, other: &DelegationLedger) {
        for binding in &other.bindings {
            if !self.bindings.contains(binding) {
                self.bindings.push(*binding);
            }
        }
        for (name, accessor) in &other.accessors {
            self.accessors.insert(*name, *accessor);
        }
    }

    /// Applied layers, in application order
    pub fn bindings(&self) -> &[DelegateBinding] {
        &self.bindings
    }

    /// Every forwarded name
    pub fn forwarded_names(&self) -> BTreeSet<&'static str> {
        self.accessors.keys().copied().collect()
    }

    /// Whether `name` is forwarded
    pub fn is_forwarded(&self, name: &str) -> bool {
        self.accessors.contains_key(name)
    }

    /// Accessor installed for `name`
    pub fn accessor(&self, name: &str) -> Option<&ForwardingAccessor> {
        self.accessors.get(name)
    }

    /// Every installed accessor, ordered by name
    pub fn accessors(&self) -> impl Iterator<Item = &ForwardingAccessor> {
        self.accessors.values()
    }

    /// Number of forwarded names
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    /// Whether nothing is forwarded
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    /// Serializable view for documentation and inspection tooling
    pub fn summary(&self, host: &str) -> LedgerSummary {
        LedgerSummary {
            host: host.to_string(),
            bindings: self
                .bindings
                .iter()
                .map(|binding| BindingSummary {
                    field: binding.field.to_string(),
                    delegate: binding.delegate.name().to_string(),
                })
                .collect(),
            accessors: self
                .accessors
                .values()
                .map(|accessor| AccessorSummary {
                    name: accessor.member().to_string(),
                    field: accessor.field().to_string(),
                    doc: accessor.doc(),
                })
                .collect(),
        }
    }
}

/// Serializable view of a ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    /// Host type name
    pub host: String,
    /// Applied layers, in application order
    pub bindings: Vec<BindingSummary>,
    /// Installed accessors, ordered by name
    pub accessors: Vec<AccessorSummary>,
}

/// Serializable view of one layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingSummary {
    /// Host field
    pub field: String,
    /// Delegate type name
    pub delegate: String,
}

/// Serializable view of one accessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessorSummary {
    /// Forwarded member name
    pub name: String,
    /// Host field it reads through
    pub field: String,
    /// Documentation line
    pub doc: String,
}

impl LedgerSummary {
    /// Render as TOML
    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string(self).map_err(|e| {
            crate::ConfigurationError::invalid_config(format!("Failed to render ledger: {e}"))
                .into()
        })
    }
}
