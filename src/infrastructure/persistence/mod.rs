//! Link store implementations.
//!
//! - [`PgLinkStore`] - PostgreSQL via SQLx, safe across processes
//! - [`InMemoryLinkStore`] - `DashMap`-backed store for tests and single-node runs

pub mod memory_link_store;
pub mod pg_link_store;

pub use memory_link_store::InMemoryLinkStore;
pub use pg_link_store::PgLinkStore;
