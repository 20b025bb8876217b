//! Core types for Botica.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod role;
pub mod tax_id;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use role::{EntityKind, EntityRole};
pub use tax_id::{TaxId, TaxIdError};
