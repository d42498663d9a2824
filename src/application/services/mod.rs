//! Business logic services for the application layer.

pub mod allocator;
pub mod link_service;
pub mod resolver;

pub use allocator::{AllocationError, Allocator};
pub use link_service::{CreatedLink, LinkService, LinkServiceSettings, MAX_LINK_TTL_SECONDS};
pub use resolver::{Resolution, Resolver};
