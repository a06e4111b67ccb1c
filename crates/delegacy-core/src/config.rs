//! Registry configuration
//!
//! Configuration is plain data with serde derives so it can be embedded in a
//! larger TOML document or loaded on its own with [`RegistryConfig::from_toml_str`].

use crate::classify::RESERVED_MEMBERS;
use crate::errors::{ConfigurationError, DelegationError, Result};
use crate::member::DUNDER_PREFIX;
use serde::{Deserialize, Serialize};

/// How a new layer treats names another layer already forwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The most recently applied layer wins
    #[default]
    Shadow,
    /// Refuse the new layer
    Reject,
}

/// Configuration for a [`DelegationRegistry`](crate::DelegationRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Collision handling between layers
    pub collision_policy: CollisionPolicy,
    /// Additional member names that are never forwarded
    pub extra_reserved: Vec<String>,
}

impl RegistryConfig {
    /// Configuration that rejects colliding layers
    pub fn strict() -> Self {
        Self {
            collision_policy: CollisionPolicy::Reject,
            ..Self::default()
        }
    }

    /// Parse and validate a configuration from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| {
            DelegationError::from(ConfigurationError::invalid_config(format!(
                "Invalid TOML: {e}"
            )))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| {
            ConfigurationError::invalid_config(format!("Failed to render TOML: {e}")).into()
        })
    }

    /// Check reserved names are usable identifiers
    pub fn validate(&self) -> Result<()> {
        for name in &self.extra_reserved {
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !name.starts_with(|c: char| c.is_ascii_digit());
            if !valid {
                return Err(ConfigurationError::invalid_config(format!(
                    "reserved name `{name}` is not an identifier"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Layer `other` on top of this configuration
    ///
    /// The collision policy is taken from `other`; reserved names accumulate.
    pub fn merge_with(&mut self, other: &Self) {
        self.collision_policy = other.collision_policy;
        for name in &other.extra_reserved {
            if !self.extra_reserved.contains(name) {
                self.extra_reserved.push(name.clone());
            }
        }
    }

    /// Whether `name` is never forwarded under this configuration
    pub fn is_reserved(&self, name: &str) -> bool {
        name.starts_with(DUNDER_PREFIX)
            || RESERVED_MEMBERS.contains(&name)
            || self.extra_reserved.iter().any(|reserved| reserved == name)
    }
}
