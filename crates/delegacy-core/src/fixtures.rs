//! Hand-written descriptors and `Reflect` impls shared by unit tests
//!
//! These mirror what `#[derive(Surface)]` emits, written out so the core crate
//! can be tested without the macro crate.

use crate::descriptor::{StaticBinding, TypeDescriptor, TypeKey};
use crate::ledger::DelegationLedger;
use crate::member::{Member as Decl, MemberKind};
use crate::surface::{DelegateTo, Reflect, Surface};
use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock};

pub(crate) struct User {
    pub id: u64,
    pub username: String,
    pub avatar: Option<String>,
    password_hash: String,
}

impl User {
    pub fn new(id: u64, username: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
            avatar: None,
            password_hash: String::new(),
        }
    }
}

static USER_MEMBERS: [Decl; 8] = [
    Decl::field("id", "u64"),
    Decl::field("username", "String"),
    Decl::field("avatar", "Option<String>"),
    Decl::new("password_hash", MemberKind::Private, "String"),
    Decl::new("mention", MemberKind::Method, "fn(&self) -> String"),
    Decl::new("on_update", MemberKind::Callable, "fn(&User)"),
    Decl::field("__internal", "u8"),
    Decl::field("_marker", "()"),
];

static USER: TypeDescriptor =
    TypeDescriptor::new(TypeKey::new("User", TypeId::of::<User>), &USER_MEMBERS);

pub(crate) fn user() -> &'static TypeDescriptor {
    &USER
}

impl Reflect for User {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        user()
    }

    fn field(&self, name: &str) -> Option<&dyn Any> {
        match name {
            "id" => Some(&self.id),
            "username" => Some(&self.username),
            "avatar" => Some(&self.avatar),
            _ => {
                let _ = &self.password_hash;
                None
            }
        }
    }

    fn delegate_field(&self, _field: &str) -> Option<&dyn Reflect> {
        None
    }
}

impl Surface for User {
    fn descriptor() -> &'static TypeDescriptor {
        user()
    }

    fn ledger() -> &'static DelegationLedger {
        DelegationLedger::empty()
    }
}

pub(crate) struct Presence {
    pub status: String,
    pub activity: Option<String>,
}

impl Presence {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            activity: None,
        }
    }
}

static PRESENCE_MEMBERS: [Decl; 2] = [
    Decl::field("status", "String"),
    Decl::field("activity", "Option<String>"),
];

static PRESENCE: TypeDescriptor =
    TypeDescriptor::new(TypeKey::new("Presence", TypeId::of::<Presence>), &PRESENCE_MEMBERS);

pub(crate) fn presence() -> &'static TypeDescriptor {
    &PRESENCE
}

impl Reflect for Presence {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        presence()
    }

    fn field(&self, name: &str) -> Option<&dyn Any> {
        match name {
            "status" => Some(&self.status),
            "activity" => Some(&self.activity),
            _ => None,
        }
    }

    fn delegate_field(&self, _field: &str) -> Option<&dyn Reflect> {
        None
    }
}

pub(crate) struct Profile {
    pub username: String,
    pub bio: String,
}

static PROFILE_MEMBERS: [Decl; 2] = [
    Decl::field("username", "String"),
    Decl::field("bio", "String"),
];

static PROFILE: TypeDescriptor =
    TypeDescriptor::new(TypeKey::new("Profile", TypeId::of::<Profile>), &PROFILE_MEMBERS);

pub(crate) fn profile() -> &'static TypeDescriptor {
    &PROFILE
}

impl Reflect for Profile {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        profile()
    }

    fn field(&self, name: &str) -> Option<&dyn Any> {
        match name {
            "username" => Some(&self.username),
            "bio" => Some(&self.bio),
            _ => None,
        }
    }

    fn delegate_field(&self, _field: &str) -> Option<&dyn Reflect> {
        None
    }
}

/// Host sharing one `User` with other members, with optional extra layers
pub(crate) struct Member {
    pub user: Arc<User>,
    pub presence: Option<Presence>,
    pub profile: Option<Profile>,
    pub nickname: Option<String>,
}

impl Member {
    pub fn new(user: Arc<User>) -> Self {
        Self {
            user,
            presence: None,
            profile: None,
            nickname: None,
        }
    }
}

static MEMBER_MEMBERS: [Decl; 4] = [
    Decl::field("user", "Arc<User>"),
    Decl::field("presence", "Option<Presence>"),
    Decl::field("profile", "Option<Profile>"),
    Decl::field("nickname", "Option<String>"),
];

static MEMBER_BINDINGS: [StaticBinding; 2] = [
    StaticBinding::new("user", user),
    StaticBinding::new("presence", presence),
];

static MEMBER_SUPERTYPES: [fn() -> &'static TypeDescriptor; 3] = [user, presence, profile];

static MEMBER: TypeDescriptor =
    TypeDescriptor::new(TypeKey::new("Member", TypeId::of::<Member>), &MEMBER_MEMBERS)
        .with_bindings(&MEMBER_BINDINGS)
        .with_supertypes(&MEMBER_SUPERTYPES);

pub(crate) fn member() -> &'static TypeDescriptor {
    &MEMBER
}

impl Reflect for Member {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        member()
    }

    fn type_ledger(&self) -> &'static DelegationLedger {
        <Self as Surface>::ledger()
    }

    fn field(&self, name: &str) -> Option<&dyn Any> {
        match name {
            "user" => Some(&self.user),
            "presence" => Some(&self.presence),
            "profile" => Some(&self.profile),
            "nickname" => Some(&self.nickname),
            _ => None,
        }
    }

    fn delegate_field(&self, field: &str) -> Option<&dyn Reflect> {
        match field {
            "user" => Some(&*self.user),
            "presence" => self.presence.as_ref().map(|p| p as &dyn Reflect),
            "profile" => self.profile.as_ref().map(|p| p as &dyn Reflect),
            _ => None,
        }
    }
}

impl Surface for Member {
    fn descriptor() -> &'static TypeDescriptor {
        member()
    }

    fn ledger() -> &'static DelegationLedger {
        static LEDGER: OnceLock<DelegationLedger> = OnceLock::new();
        LEDGER.get_or_init(|| DelegationLedger::from_descriptor(member()))
    }
}

impl DelegateTo<User> for Member {
    fn delegate(&self) -> &User {
        &self.user
    }
}

/// Host delegating to another host
pub(crate) struct CachedMember {
    pub member: Member,
    pub cached_at: u64,
}

impl CachedMember {
    pub fn new(member: Member, cached_at: u64) -> Self {
        Self { member, cached_at }
    }
}

static CACHED_MEMBER_MEMBERS: [Decl; 2] = [
    Decl::field("member", "Member"),
    Decl::field("cached_at", "u64"),
];

static CACHED_MEMBER_BINDINGS: [StaticBinding; 1] = [StaticBinding::new("member", member)];

static CACHED_MEMBER_SUPERTYPES: [fn() -> &'static TypeDescriptor; 1] = [member];

static CACHED_MEMBER: TypeDescriptor = TypeDescriptor::new(
    TypeKey::new("CachedMember", TypeId::of::<CachedMember>),
    &CACHED_MEMBER_MEMBERS,
)
.with_bindings(&CACHED_MEMBER_BINDINGS)
.with_supertypes(&CACHED_MEMBER_SUPERTYPES);

pub(crate) fn cached_member() -> &'static TypeDescriptor {
    &CACHED_MEMBER
}

impl Reflect for CachedMember {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        cached_member()
    }

    fn type_ledger(&self) -> &'static DelegationLedger {
        static LEDGER: OnceLock<DelegationLedger> = OnceLock::new();
        LEDGER.get_or_init(|| DelegationLedger::from_descriptor(cached_member()))
    }

    fn field(&self, name: &str) -> Option<&dyn Any> {
        match name {
            "cached_at" => Some(&self.cached_at),
            _ => None,
        }
    }

    fn delegate_field(&self, field: &str) -> Option<&dyn Reflect> {
        match field {
            "member" => Some(&self.member),
            _ => None,
        }
    }
}

/// Host that never declared it can stand in for `User`
pub(crate) struct Stranger;

static STRANGER_MEMBERS: [Decl; 1] = [Decl::field("user", "Arc<User>")];

static STRANGER: TypeDescriptor =
    TypeDescriptor::new(TypeKey::new("Stranger", TypeId::of::<Stranger>), &STRANGER_MEMBERS);

pub(crate) fn stranger() -> &'static TypeDescriptor {
    &STRANGER
}

/// Host whose second static layer names a type outside its capability set
pub(crate) struct Lopsided;

static LOPSIDED_MEMBERS: [Decl; 2] = [
    Decl::field("user", "Arc<User>"),
    Decl::field("presence", "Presence"),
];

static LOPSIDED_BINDINGS: [StaticBinding; 2] = [
    StaticBinding::new("user", user),
    StaticBinding::new("presence", presence),
];

static LOPSIDED_SUPERTYPES: [fn() -> &'static TypeDescriptor; 1] = [user];

static LOPSIDED: TypeDescriptor =
    TypeDescriptor::new(TypeKey::new("Lopsided", TypeId::of::<Lopsided>), &LOPSIDED_MEMBERS)
        .with_bindings(&LOPSIDED_BINDINGS)
        .with_supertypes(&LOPSIDED_SUPERTYPES);

pub(crate) fn lopsided() -> &'static TypeDescriptor {
    &LOPSIDED
}
