// libmfu-rs/libmfu/src/session/operations/mod.rs

//! Operations on a selected tag, one concern per file.

pub mod auth;
pub mod magic;
pub mod read;
pub mod version;
pub mod write;

// Re-export the operations at the module root so callers can use
// `crate::session::operations::read_all(...)` directly.
pub use auth::authenticate;
pub use magic::{ensure_writable, unlock_backdoor};
pub use read::{ReadReport, read_all};
pub use version::{detect_variant, get_version};
pub use write::{WriteReport, write_all, write_pages};
