use delegacy_macros::Surface;
use std::rc::Rc;

#[derive(Surface)]
pub struct User {
    pub id: u64,
    pub username: String,
}

#[derive(Surface)]
pub struct Member {
    #[delegate]
    pub user: Rc<User>,
    pub nickname: Option<String>,
}

fn main() {
    let user = Rc::new(User {
        id: 1,
        username: "nekokatt".to_string(),
    });
    let member = Member {
        user: Rc::clone(&user),
        nickname: None,
    };
    assert_eq!(member.username(), "nekokatt");
    assert_eq!(member.id(), &1);
    assert!(member.nickname().is_none());
}
