//! Marigold Core - Shared types library.
//!
//! This crate provides common types used across all Marigold components:
//! - `cart` - Cart & pricing engine
//! - `cli` - Command-line storefront tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no async.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
