//! Botica Core - Shared types library.
//!
//! This crate provides common domain types used across Botica components:
//! - `storefront` - The public web application for pharmacies, deposits, and admins
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! handling. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, tax ids,
//!   and entity roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
