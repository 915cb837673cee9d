pub mod berries;
pub mod cake;
pub mod client;
pub mod complaint;
pub mod decor;
pub mod level;
pub mod link;
pub mod order;
pub mod promo_code;
pub mod shape;
pub mod topping;

pub use berries::Entity as BerriesEntity;
pub use cake::Entity as CakeEntity;
pub use client::Entity as ClientEntity;
pub use complaint::Entity as ComplaintEntity;
pub use decor::Entity as DecorEntity;
pub use level::Entity as LevelEntity;
pub use link::Entity as LinkEntity;
pub use order::Entity as OrderEntity;
pub use promo_code::Entity as PromoCodeEntity;
pub use shape::Entity as ShapeEntity;
pub use topping::Entity as ToppingEntity;
