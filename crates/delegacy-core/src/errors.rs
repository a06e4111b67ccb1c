//! Error types for delegation
//!
//! Definition-time failures are grouped under [`ConfigurationError`]; the
//! remaining [`DelegationError`] variants surface when a forwarded member is
//! read. Nothing here is retried: every error reaches the caller unchanged.

/// Failures detected while a delegation layer is being declared or queried
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// Host does not satisfy the delegate's capability set
    #[error("host `{host}` does not satisfy the capability set of `{delegate}`")]
    NotCapable {
        /// Host type name
        host: String,
        /// Delegate type name
        delegate: String,
    },

    /// Host declares no field with the requested name
    #[error("host `{host}` has no field named `{field}`")]
    UnknownField {
        /// Host type name
        host: String,
        /// Requested delegate field
        field: String,
    },

    /// A member is already forwarded by another layer and collisions are rejected
    #[error("host `{host}` already forwards {}", names.join(", "))]
    MemberCollision {
        /// Host type name
        host: String,
        /// Colliding member names
        names: Vec<String>,
    },

    /// Member is reserved for framework bookkeeping and is never forwarded
    #[error("member `{member}` is reserved and cannot be forwarded")]
    ReservedMember {
        /// Reserved member name
        member: String,
    },

    /// Member is not forwarded by the host
    #[error("host `{host}` does not forward member `{member}`")]
    NotForwarded {
        /// Host type name
        host: String,
        /// Requested member name
        member: String,
    },

    /// Registry configuration is invalid
    #[error("invalid registry configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },
}

impl ConfigurationError {
    /// Create a capability error
    pub fn not_capable(host: impl Into<String>, delegate: impl Into<String>) -> Self {
        Self::NotCapable {
            host: host.into(),
            delegate: delegate.into(),
        }
    }

    /// Create an unknown field error
    pub fn unknown_field(host: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            host: host.into(),
            field: field.into(),
        }
    }

    /// Create a collision error
    pub fn member_collision<I, S>(host: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MemberCollision {
            host: host.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a reserved member error
    pub fn reserved_member(member: impl Into<String>) -> Self {
        Self::ReservedMember {
            member: member.into(),
        }
    }

    /// Create a not forwarded error
    pub fn not_forwarded(host: impl Into<String>, member: impl Into<String>) -> Self {
        Self::NotForwarded {
            host: host.into(),
            member: member.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Unified error type for delegation operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelegationError {
    /// Definition-time failure
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The host's delegate field is unset
    #[error("`{host}` holds no delegate in field `{field}`")]
    MissingDelegate {
        /// Host type name
        host: String,
        /// Delegate field name
        field: String,
    },

    /// The delegate does not expose the forwarded member
    #[error("delegate in field `{field}` does not expose member `{member}`")]
    MissingMember {
        /// Delegate field name
        field: String,
        /// Forwarded member name
        member: String,
    },

    /// A plain lookup found no member with that name
    #[error("`{host}` has no readable member `{member}`")]
    UnknownMember {
        /// Type name the lookup ran against
        host: String,
        /// Requested member name
        member: String,
    },

    /// A typed read asked for the wrong type
    #[error("member `{member}` is not a `{expected}`")]
    MemberType {
        /// Member name
        member: String,
        /// Requested type name
        expected: &'static str,
    },
}

impl DelegationError {
    /// Create a missing delegate error
    pub fn missing_delegate(host: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingDelegate {
            host: host.into(),
            field: field.into(),
        }
    }

    /// Create a missing member error
    pub fn missing_member(field: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MissingMember {
            field: field.into(),
            member: member.into(),
        }
    }

    /// Create an unknown member error
    pub fn unknown_member(host: impl Into<String>, member: impl Into<String>) -> Self {
        Self::UnknownMember {
            host: host.into(),
            member: member.into(),
        }
    }

    /// Create a member type error
    pub fn member_type(member: impl Into<String>, expected: &'static str) -> Self {
        Self::MemberType {
            member: member.into(),
            expected,
        }
    }

    /// Whether the error was raised while declaring delegation
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Standard Result type for delegation operations
pub type Result<T> = std::result::Result<T, DelegationError>;
