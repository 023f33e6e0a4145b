// libmfu-rs/libmfu/src/prelude.rs

//! Commonly used types in one import.

pub use crate::driver::{Driver, MockDriver, Property};
pub use crate::image::PageImage;
pub use crate::policy::WritePolicy;
pub use crate::session::operations::{ReadReport, WriteReport};
pub use crate::session::{Session, SessionConfig};
pub use crate::tag::{SecretLayout, TagVariant};
pub use crate::{Credentials, Error, Pack, Password, Result, TargetInfo, Uid};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, default_poll_interval, ms, parse_hex};
