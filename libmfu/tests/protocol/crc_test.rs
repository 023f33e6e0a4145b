use libmfu::protocol::{append_crc_a, check_crc_a, crc_a};
use proptest::prelude::*;

#[test]
fn known_frames() {
    // GET_VERSION, HLTA, READ 0 and PWD_AUTH with the factory password
    let cases = [
        ("60", "60f832"),
        ("5000", "500057cd"),
        ("3000", "300002a8"),
        ("1bffffffff", "1bffffffff6300"),
    ];
    for (payload, framed) in cases {
        let mut frame = hex::decode(payload).unwrap();
        append_crc_a(&mut frame);
        assert_eq!(hex::encode(&frame), framed);
        assert!(check_crc_a(&frame));
    }
}

#[test]
fn empty_payload_is_preset() {
    assert_eq!(crc_a(&[]), 0x6363);
}

proptest! {
    #[test]
    fn corrupted_frame_fails_check(payload in proptest::collection::vec(any::<u8>(), 1..32), bit in 0usize..8) {
        let mut frame = payload.clone();
        append_crc_a(&mut frame);
        frame[0] ^= 1 << bit;
        prop_assert!(!check_crc_a(&frame));
    }
}
