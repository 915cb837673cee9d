//! BakeCake - core domain library for a cake-ordering bot
//!
//! Customers compose a cake from a fixed catalog of priced parameters
//! (levels, shape, topping, berries, decor), place orders with an urgency
//! surcharge and promo discounts, and the shop hands out click-tracked
//! short links allocated against an external shortening service.
//!
//! # Architecture
//! - `repository`: domain models, repository traits and the Sea-ORM backend
//! - `services`: pricing, availability gating and short-link allocation
//! - `config`: TOML + environment configuration
//! - `errors`: crate-wide error type
//! - `logging`: tracing subscriber setup

pub mod config;
pub mod errors;
pub mod logging;
pub mod repository;
pub mod services;
pub mod utils;
