//! REST API routers and shared extractors.

pub mod admin;
pub mod extractors;
pub mod user;
