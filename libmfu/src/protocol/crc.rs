// libmfu-rs/libmfu/src/protocol/crc.rs

//! ISO14443-A CRC_A.

use crate::constants::CRC_A_PRESET;

/// Compute the ISO14443-A CRC_A over `data`.
/// Preset 0x6363, reflected polynomial 0x8408, no final XOR.
pub fn crc_a(data: &[u8]) -> u16 {
    data.iter().fold(CRC_A_PRESET, |crc, &b| {
        let mut bt = b ^ (crc & 0x00ff) as u8;
        bt ^= bt << 4;
        let bt = bt as u16;
        (crc >> 8) ^ (bt << 8) ^ (bt << 3) ^ (bt >> 4)
    })
}

/// Append CRC_A to a frame, low byte first.
pub fn append_crc_a(frame: &mut Vec<u8>) {
    let crc = crc_a(frame);
    frame.extend_from_slice(&crc.to_le_bytes());
}

/// Verify a frame whose last two bytes are its CRC_A.
pub fn check_crc_a(frame: &[u8]) -> bool {
    if frame.len() < 2 {
        return false;
    }
    let (data, crc) = frame.split_at(frame.len() - 2);
    crc_a(data).to_le_bytes() == [crc[0], crc[1]]
}
