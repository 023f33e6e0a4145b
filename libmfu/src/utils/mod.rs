//! Utilities for libmfu: small, reusable helpers used across the crate.
//!
//! Hex helpers for UID/password formatting and parsing, and the poll
//! interval used while waiting for a tag.

pub mod hex;
pub mod poll;

// Re-export the most common helpers at the `utils` module level so callers can
// use `crate::utils::bytes_to_hex(...)` etc if they prefer.
pub use hex::*;
pub use poll::*;
