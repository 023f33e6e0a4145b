// libmfu-rs/libmfu/src/policy.rs

//! Write permissions for protected pages.

use crate::constants::{FIRST_DATA_PAGE, LOCK_PAGE, OTP_PAGE};
use crate::tag::TagVariant;

/// Which protected pages a write session may touch. Resolved before the
/// write starts (from flags or operator prompts) and never changed after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WritePolicy {
    /// OTP / capability container page
    pub write_otp: bool,
    /// Static lock bytes (page 2). Lock bits are one-time programmable.
    pub write_lock: bool,
    /// Dynamic lock page of EV1 UL21 and NTAG tags
    pub write_dyn_lock: bool,
    /// UID pages 0-1; requires a magic tag
    pub write_uid: bool,
}

impl WritePolicy {
    /// Touch nothing protected.
    pub fn none() -> Self {
        Self::default()
    }

    /// Touch every page.
    pub fn all() -> Self {
        Self {
            write_otp: true,
            write_lock: true,
            write_dyn_lock: true,
            write_uid: true,
        }
    }

    /// True if `page` must not be written under this policy.
    pub fn skips(&self, variant: TagVariant, page: usize) -> bool {
        if page < FIRST_DATA_PAGE {
            return !self.write_uid;
        }
        if page == LOCK_PAGE {
            return !self.write_lock;
        }
        if page == OTP_PAGE {
            return !self.write_otp;
        }
        if variant.dynamic_lock_page() == Some(page) {
            return !self.write_dyn_lock;
        }
        false
    }
}
