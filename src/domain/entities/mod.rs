//! Core domain entities.
//!
//! - [`Link`] - A stored short code to URL mapping
//! - [`NewLink`] - Insert payload for a link
//!
//! Entities are plain data structures; allocation and resolution rules live in
//! [`crate::application::services`].

pub mod link;

pub use link::{Link, NewLink};
