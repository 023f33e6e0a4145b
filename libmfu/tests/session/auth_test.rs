#[path = "../common/mod.rs"]
mod common;

use libmfu::driver::{Call, MockDriver};
use libmfu::protocol::check_crc_a;
use libmfu::tag::TagVariant;
use libmfu::types::Password;
use libmfu::Error;

use common::fixtures::{protected_mock, sample_pack, sample_password};
use common::helpers::detected_mock_session;

#[test]
fn auth_returns_pack_and_stores_credentials() {
    let mut s = detected_mock_session(protected_mock(TagVariant::Ntag216)).unwrap();
    let pack = s.authenticate(sample_password()).unwrap();
    assert_eq!(pack, sample_pack());
    assert!(s.credentials().is_known());

    let auth = s
        .driver()
        .calls
        .iter()
        .rev()
        .find_map(|c| match c {
            Call::TransceiveBytes(tx) if tx[0] == 0x1B => Some(tx.clone()),
            _ => None,
        })
        .unwrap();
    let expected = hex::decode("1b11223344").unwrap();
    assert_eq!(&auth[..5], &expected[..]);
    assert!(check_crc_a(&auth));
}

#[test]
fn wrong_password_is_auth_failed() {
    let mut s = detected_mock_session(protected_mock(TagVariant::Ev1Ul21)).unwrap();
    let res = s.authenticate(Password::from_bytes([0xde, 0xad, 0xbe, 0xef]));
    assert!(matches!(res, Err(Error::AuthFailed)));
    assert!(!s.credentials().is_known());
}

#[test]
fn original_ultralight_cannot_authenticate() {
    let mut s = detected_mock_session(MockDriver::new(TagVariant::UltralightOriginal)).unwrap();
    assert!(matches!(
        s.authenticate(sample_password()),
        Err(Error::AuthFailed)
    ));
    assert!(!s.driver().is_raw_mode());
}
