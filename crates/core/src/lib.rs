//! Catalog Admin Core - Shared types library.
//!
//! This crate provides the types used across all Catalog Admin components:
//! - `client` - REST client, state slices, and session handling
//! - `cli` - The `catalog` command-line dashboard
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. This keeps it lightweight and trivially testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, and request status
//! - [`catalog`] - Category and product entities as returned by the API
//! - [`page`] - Offset pagination cursor and page results
//! - [`validation`] - Form validation for product and category input

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod page;
pub mod types;
pub mod validation;

pub use catalog::*;
pub use page::{Cursor, Page};
pub use types::*;
