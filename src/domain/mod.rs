//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait definitions
//! - [`sweep_worker`] - Periodic deletion of expired links
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Store traits define contracts implemented by the infrastructure layer
//! - Allocation and resolution rules live in [`crate::application::services`]

pub mod entities;
pub mod repositories;
pub mod sweep_worker;
