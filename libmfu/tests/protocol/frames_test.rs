use libmfu::constants::BLOCK_SIZE;
use libmfu::driver::{Driver, MockDriver};
use libmfu::protocol::{check_crc_a, commands};
use libmfu::tag::TagVariant;
use libmfu::types::Password;

#[test]
fn raw_frames_take_crc_from_driver() {
    let driver = MockDriver::new(TagVariant::Ntag213);
    let pwd: Password = "11223344".parse().unwrap();
    for mut frame in [commands::get_version(), commands::halt(), commands::pwd_auth(&pwd)] {
        driver.crc_append(&mut frame);
        assert!(check_crc_a(&frame), "{}", hex::encode(&frame));
    }
    assert_eq!(commands::pwd_auth(&pwd).len(), 5);
    assert_eq!(commands::halt().len(), 2);
    assert_eq!(driver.crc_appends(), 3);
}

#[test]
fn backdoor_frames_have_no_crc() {
    assert_eq!(commands::magic_unlock1(), [0x40]);
    assert_eq!(commands::magic_unlock2(), [0x43]);
}

#[test]
fn compat_write_pads_page() {
    let data = commands::pad_page(&[1, 2, 3, 4]);
    assert_eq!(data.len(), BLOCK_SIZE);
    assert!(data[4..].iter().all(|&b| b == 0));

    let frame = commands::compat_write(0x10, &data);
    assert_eq!(&frame[..6], &[0xA0, 0x10, 1, 2, 3, 4]);
    assert_eq!(frame.len(), 2 + BLOCK_SIZE);
    assert_eq!(commands::read(0x2c), [0x30, 0x2c]);
}
