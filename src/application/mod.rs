//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating store calls,
//! validation, and expiry rules. Services consume the
//! [`crate::domain::repositories::LinkStore`] trait and provide a clean API for
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::allocator::Allocator`] - Collision-free short code allocation
//! - [`services::resolver::Resolver`] - Code lookup with expiry policy
//! - [`services::link_service::LinkService`] - Create/resolve facade with timeouts

pub mod services;
