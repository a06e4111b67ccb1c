use delegacy_macros::Surface;

#[derive(Surface)]
pub struct User {
    pub username: String,
}

#[derive(Surface)]
pub struct Member {
    #[delegate]
    pub user: User,
}

#[derive(Surface)]
pub struct CachedMember {
    #[delegate(also(User))]
    pub member: Member,
    #[surface(skip)]
    pub hits: u32,
}

fn main() {
    let cached = CachedMember {
        member: Member {
            user: User {
                username: "davfsa".to_string(),
            },
        },
        hits: 0,
    };
    assert_eq!(cached.username(), "davfsa");
    assert_eq!(cached.hits, 0);
}
