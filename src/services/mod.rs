pub mod link_service;
pub mod pricing;
pub mod shortener;

pub use link_service::LinkService;
pub use pricing::PricingService;
pub use shortener::{HttpShortenerClient, ShortenerClient};
