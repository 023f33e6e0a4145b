// libmfu-rs/libmfu/src/protocol/commands.rs

//! Raw tag frames that the reader driver does not build by itself.
//!
//! GET_VERSION, PWD_AUTH and HLTA go out in raw mode (driver CRC handling
//! and easy framing disabled); the builders return the bare command and
//! CRC_A is appended through [`Driver::crc_append`] when the frame is sent.
//!
//! [`Driver::crc_append`]: crate::driver::Driver::crc_append

use crate::constants::{
    BLOCK_SIZE, CMD_COMPAT_WRITE, CMD_GET_VERSION, CMD_HALT, CMD_PWD_AUTH, CMD_READ,
    MAGIC_UNLOCK1, MAGIC_UNLOCK2, PAGE_SIZE,
};
use crate::types::Password;

/// GET_VERSION (1 byte, 3 on the air).
pub fn get_version() -> Vec<u8> {
    vec![CMD_GET_VERSION]
}

/// PWD_AUTH (5 bytes, 7 on the air).
pub fn pwd_auth(password: &Password) -> Vec<u8> {
    let mut frame = Vec::with_capacity(7);
    frame.push(CMD_PWD_AUTH);
    frame.extend_from_slice(password.as_bytes());
    frame
}

/// HLTA (2 bytes, 4 on the air).
pub fn halt() -> Vec<u8> {
    vec![CMD_HALT, 0x00]
}

/// First backdoor frame, sent as a 7-bit short frame.
pub fn magic_unlock1() -> [u8; 1] {
    [MAGIC_UNLOCK1]
}

/// Second backdoor frame, sent as a single byte without CRC.
pub fn magic_unlock2() -> [u8; 1] {
    [MAGIC_UNLOCK2]
}

/// READ of four pages starting at `page` (easy framing, CRC by driver).
pub fn read(page: u8) -> [u8; 2] {
    [CMD_READ, page]
}

/// COMPATIBILITY_WRITE of a page. Only the first four data bytes reach the
/// tag; the rest pads the frame to the 16-byte MIFARE Classic write width.
pub fn compat_write(page: u8, data: &[u8; BLOCK_SIZE]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(2 + BLOCK_SIZE);
    frame.push(CMD_COMPAT_WRITE);
    frame.push(page);
    frame.extend_from_slice(data);
    frame
}

/// Pad a single page to the compatibility-write width.
pub fn pad_page(page: &[u8; PAGE_SIZE]) -> [u8; BLOCK_SIZE] {
    let mut data = [0u8; BLOCK_SIZE];
    data[..PAGE_SIZE].copy_from_slice(page);
    data
}
