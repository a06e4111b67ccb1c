use delegacy_core::Surface as _;
use delegacy_macros::Surface;

#[derive(Surface)]
#[surface(trait_name = SnowflakeView)]
pub struct Snowflake {
    pub id: u64,
}

#[derive(Surface)]
#[surface(extends(Snowflake))]
pub struct Channel {
    #[delegate(to = Snowflake)]
    pub key: Box<Snowflake>,
    pub r#type: u8,
}

fn main() {
    let channel = Channel {
        key: Box::new(Snowflake { id: 9 }),
        r#type: 0,
    };
    assert_eq!(SnowflakeView::id(&channel), &9);
    assert_eq!(ChannelFields::r#type(&channel), &0);
    assert_eq!(Channel::descriptor().bindings().len(), 1);
}
