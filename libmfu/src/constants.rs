// libmfu-rs/libmfu/src/constants.rs
//! Common protocol constants used across the crate

/// Bytes per tag page
pub const PAGE_SIZE: usize = 4;

/// Pages returned by a single READ command (one block)
pub const BLOCK_PAGES: usize = 4;

/// Bytes returned by a single READ command
pub const BLOCK_SIZE: usize = PAGE_SIZE * BLOCK_PAGES;

/// Page count of the largest supported tag (NTAG216). The page image is
/// always backed by a buffer of this size.
pub const MAX_PAGES: usize = 231;

/// Linear byte size of the largest supported dump
pub const MAX_DUMP_SIZE: usize = MAX_PAGES * PAGE_SIZE;

/// Page count assumed for tags that do not answer GET_VERSION
pub const ULTRALIGHT_PAGES: usize = 16;

/// Maximum UID length of an ISO14443-A target (triple size)
pub const MAX_UID_LEN: usize = 10;

/// Maximum number of targets listed during discovery
pub const MAX_TARGET_COUNT: usize = 16;

/// Second ATQA byte reported by Ultralight-family tags
pub const ULTRALIGHT_ATQA1: u8 = 0x44;

/// Delay between selection attempts when waiting for a tag (ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// ISO14443-A CRC_A preset value
pub const CRC_A_PRESET: u16 = 0x6363;

/// READ, four pages at once
pub const CMD_READ: u8 = 0x30;
/// COMPATIBILITY_WRITE
pub const CMD_COMPAT_WRITE: u8 = 0xA0;
/// GET_VERSION
pub const CMD_GET_VERSION: u8 = 0x60;
/// PWD_AUTH
pub const CMD_PWD_AUTH: u8 = 0x1B;
/// HLTA
pub const CMD_HALT: u8 = 0x50;

/// First magic backdoor frame, sent as a 7-bit short frame
pub const MAGIC_UNLOCK1: u8 = 0x40;
/// Bit length of [`MAGIC_UNLOCK1`]
pub const MAGIC_UNLOCK1_BITS: usize = 7;
/// Second magic backdoor frame, one byte without CRC
pub const MAGIC_UNLOCK2: u8 = 0x43;

/// 4-bit ACK returned by Ultralight-family tags
pub const ACK: u8 = 0x0A;

/// Length of a GET_VERSION response (without CRC)
pub const VERSION_RESPONSE_LEN: usize = 8;

/// Index of the storage size byte within a GET_VERSION response
pub const VERSION_STORAGE_INDEX: usize = 6;

/// Page holding BCC1, internal and static lock bytes
pub const LOCK_PAGE: usize = 2;

/// OTP / capability container page
pub const OTP_PAGE: usize = 3;

/// First page written when UID pages are left alone
pub const FIRST_DATA_PAGE: usize = 2;

/// Start of the byte range the CLI prints by default
pub const DEFAULT_START_BYTE: usize = 28;
/// End of the default range (exclusive)
pub const DEFAULT_STOP_BYTE: usize = 45;
