#[path = "../common/mod.rs"]
mod common;

use libmfu::driver::{Call, MagicKind, MockDriver};
use libmfu::tag::TagVariant;

use common::helpers::selected_mock_session;

fn halts(mock: &MockDriver) -> usize {
    mock.count(|c| matches!(c, Call::TransceiveBytes(tx) if tx.len() == 4 && tx[0] == 0x50))
}

fn short_frames(mock: &MockDriver) -> usize {
    mock.count(|c| *c == Call::TransceiveBits(vec![0x40], 7))
}

fn unlock_frames(mock: &MockDriver) -> usize {
    mock.count(|c| *c == Call::TransceiveBytes(vec![0x43]))
}

#[test]
fn direct_write_tag_sends_no_unlock_traffic() {
    let mock = MockDriver::new(TagVariant::Ntag213).with_magic(MagicKind::DirectWrite);
    let mut s = selected_mock_session(mock).unwrap();
    assert!(s.ensure_writable().unwrap());
    assert_eq!(halts(s.driver()), 0);
    assert_eq!(short_frames(s.driver()), 0);
    assert_eq!(unlock_frames(s.driver()), 0);
    // block 0 went back unchanged
    assert_eq!(s.driver().page(0)[0], 0x04);
}

#[test]
fn backdoor_tag_gets_exactly_one_of_each_frame() {
    let mock = MockDriver::new(TagVariant::UltralightOriginal).with_magic(MagicKind::Backdoor);
    let mut s = selected_mock_session(mock).unwrap();
    assert!(s.ensure_writable().unwrap());
    assert_eq!(halts(s.driver()), 1);
    assert_eq!(short_frames(s.driver()), 1);
    assert_eq!(unlock_frames(s.driver()), 1);
    assert!(s.driver().is_unlocked());
}

#[test]
fn unanswered_final_frame_means_no_unlock() {
    let mut mock = MockDriver::new(TagVariant::UltralightOriginal).with_magic(MagicKind::Backdoor);
    mock.fail_unlock2 = true;
    let mut s = selected_mock_session(mock).unwrap();
    assert!(!s.ensure_writable().unwrap());
    assert_eq!(halts(s.driver()), 1);
    assert_eq!(short_frames(s.driver()), 1);
    assert_eq!(unlock_frames(s.driver()), 1);
    assert!(!s.driver().is_raw_mode());
}

#[test]
fn genuine_tag_stops_after_short_frame() {
    let mut s = selected_mock_session(MockDriver::new(TagVariant::Ev1Ul11)).unwrap();
    assert!(!s.ensure_writable().unwrap());
    assert_eq!(halts(s.driver()), 1);
    assert_eq!(short_frames(s.driver()), 1);
    assert_eq!(unlock_frames(s.driver()), 0);
    assert!(!s.driver().is_raw_mode());
}
