//! Shoe Shop Core - Shared types library.
//!
//! This crate provides common types used across all Shoe Shop components:
//! - `storefront` - Public-facing shop (catalog, cart, checkout)
//! - `integration-tests` - Workspace-level tests
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
