// libmfu-rs/libmfu/src/protocol/mod.rs

//! Tag-level framing: CRC_A and the raw command builders.

pub mod commands;
pub mod crc;

pub use commands::*;
pub use crc::{append_crc_a, check_crc_a, crc_a};
