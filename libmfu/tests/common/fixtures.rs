// fixtures.rs: commonly used tags, credentials and frames

use libmfu::driver::MockDriver;
use libmfu::types::{Pack, Password};
use libmfu::{Uid, tag::TagVariant};

pub fn sample_uid_bytes() -> [u8; 7] {
    [0x04, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]
}

pub fn sample_uid() -> Uid {
    Uid::try_from(&sample_uid_bytes()[..]).unwrap()
}

pub fn other_uid_bytes() -> [u8; 7] {
    [0x04, 0xA0, 0xB1, 0xC2, 0xD3, 0xE4, 0xF5]
}

pub fn sample_password() -> Password {
    Password::from_bytes([0x11, 0x22, 0x33, 0x44])
}

pub fn sample_pack() -> Pack {
    Pack::from_bytes([0x80, 0x80])
}

/// EV1 tag protected with the sample password.
pub fn protected_mock(variant: TagVariant) -> MockDriver {
    libmfu::test_support::patterned_mock(variant, 0x3c)
        .with_password(sample_password(), sample_pack())
}

/// GET_VERSION answer of an NTAG with the given storage size byte.
pub fn version_response(storage: u8) -> [u8; 8] {
    [0x00, 0x04, 0x04, 0x02, 0x01, 0x00, storage, 0x03]
}

/// Page 0 and 1 contents for `uid`, check byte BCC0 included.
pub fn uid_pages(uid: [u8; 7]) -> ([u8; 4], [u8; 4]) {
    (
        [uid[0], uid[1], uid[2], 0x88 ^ uid[0] ^ uid[1] ^ uid[2]],
        [uid[3], uid[4], uid[5], uid[6]],
    )
}
