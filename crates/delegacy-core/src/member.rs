//! Declared members of a type

/// Prefix of implementation-internal member names
pub const DUNDER_PREFIX: &str = "__";

/// What a declared member holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Public data field
    Field,
    /// Data field not visible outside its module
    Private,
    /// Field holding a callable (`fn` pointer, closure, `dyn Fn*`)
    Callable,
    /// Zero-sized marker such as `PhantomData`
    Marker,
    /// Declared behavior
    Method,
    /// Field explicitly hidden from the surface
    Hidden,
}

impl MemberKind {
    /// Whether the member stores data
    pub fn is_data(&self) -> bool {
        !matches!(self, Self::Callable | Self::Method)
    }
}

/// A single declared member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Member {
    name: &'static str,
    kind: MemberKind,
    ty: &'static str,
}

impl Member {
    /// Create a member
    pub const fn new(name: &'static str, kind: MemberKind, ty: &'static str) -> Self {
        Self { name, kind, ty }
    }

    /// Create a public data field
    pub const fn field(name: &'static str, ty: &'static str) -> Self {
        Self::new(name, MemberKind::Field, ty)
    }

    /// Member name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Member kind
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Declared type, as written in source
    pub fn ty(&self) -> &'static str {
        self.ty
    }

    /// Whether the name carries the internal `__` prefix
    pub fn is_dunder(&self) -> bool {
        self.name.starts_with(DUNDER_PREFIX)
    }
}
