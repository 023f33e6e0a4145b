// libmfu-rs/libmfu/src/driver/mod.rs

//! Reader drivers: the [`Driver`] trait, the in-memory mock and the
//! libnfc binding.

pub mod mock;
pub mod traits;
#[cfg(feature = "libnfc")]
pub mod libnfc;

pub use mock::{Call, MagicKind, MockDriver};
pub use traits::{Driver, Property};
#[cfg(feature = "libnfc")]
pub use libnfc::LibnfcDriver;
