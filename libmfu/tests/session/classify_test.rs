#[path = "../common/mod.rs"]
mod common;

use libmfu::driver::{Call, MockDriver};
use libmfu::tag::TagVariant;
use libmfu::Error;

use common::fixtures::version_response;
use common::helpers::{detected_mock_session, selected_mock_session};

#[test]
fn every_documented_storage_byte_is_detected() {
    let table = [
        (0x0b, TagVariant::Ev1Ul11, 20),
        (0x00, TagVariant::Ev1Ul11, 20),
        (0x0e, TagVariant::Ev1Ul21, 41),
        (0x0f, TagVariant::Ntag213, 45),
        (0x11, TagVariant::Ntag215, 135),
        (0x13, TagVariant::Ntag216, 231),
    ];
    for (storage, variant, pages) in table {
        let mock = MockDriver::new(variant).with_version(Some(version_response(storage)));
        let s = detected_mock_session(mock).unwrap();
        assert_eq!(s.variant(), variant);
        assert_eq!(s.image().pages(), pages);
    }
}

#[test]
fn silent_tag_is_original_ultralight() {
    common::helpers::init_logger();
    let s = detected_mock_session(MockDriver::new(TagVariant::UltralightOriginal)).unwrap();
    assert_eq!(s.variant(), TagVariant::UltralightOriginal);
    assert_eq!(s.image().pages(), 16);
    // selected once for the session and once more after the silent exchange
    assert_eq!(s.driver().count(|c| *c == Call::Select), 2);
}

#[test]
fn undocumented_storage_byte_is_fatal() {
    let mock = MockDriver::new(TagVariant::Ntag213).with_version(Some(version_response(0x12)));
    let mut s = selected_mock_session(mock).unwrap();
    assert!(matches!(s.detect_variant(), Err(Error::UnknownVersion(0x12))));
}

#[test]
fn raw_mode_is_left_after_detection() {
    let s = detected_mock_session(MockDriver::new(TagVariant::Ntag216)).unwrap();
    assert!(!s.driver().is_raw_mode());
    let props: Vec<&Call> = s
        .driver()
        .calls
        .iter()
        .filter(|c| matches!(c, Call::SetProperty(..)))
        .collect();
    // InfiniteSelect off, then raw mode on and off again
    assert_eq!(props.len(), 5);
}
