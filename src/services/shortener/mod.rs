//! External link-shortening service integration.
//!
//! The core only consumes the contract: probe whether a numeric identifier
//! is already a known short link, materialize one, and read click counts.

pub mod http_api;
pub mod provider;

pub use http_api::HttpShortenerClient;
pub use provider::ShortenerClient;
