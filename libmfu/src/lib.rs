// libmfu-rs/libmfu/src/lib.rs

//! libmfu
//!
//! Dump and restore MIFARE Ultralight-family tags (Ultralight, Ultralight
//! EV1 MF0UL11/MF0UL21, NTAG213/215/216) through a contactless reader driver.
#![warn(missing_docs)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod constants;
pub mod driver;
pub mod error;
pub mod image;
pub mod policy;
pub mod prelude;
pub mod protocol;
pub mod session;
pub mod tag;
pub mod test_support;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
