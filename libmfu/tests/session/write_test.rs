#[path = "../common/mod.rs"]
mod common;

use libmfu::driver::{Call, MagicKind, MockDriver};
use libmfu::policy::WritePolicy;
use libmfu::tag::TagVariant;
use libmfu::Error;

use common::fixtures::{other_uid_bytes, uid_pages};
use common::helpers::{detected_mock_session, page_pattern, patterned_image};

#[test]
fn ntag213_without_protected_pages() {
    let mut s = detected_mock_session(MockDriver::new(TagVariant::Ntag213)).unwrap();
    s.load_image(patterned_image(TagVariant::Ntag213, 2).unwrap())
        .unwrap();

    let report = s.write_all(WritePolicy::none()).unwrap();
    assert_eq!(report.pages, 45);
    assert_eq!(report.skipped, 5);
    assert_eq!(report.failed, 0);
    assert_eq!(report.written, 45 - report.skipped - report.failed);

    let expected: Vec<u8> = (4..45).filter(|&p| p != 0x28).collect();
    assert_eq!(s.driver().writes(), expected);
}

#[test]
fn written_pages_read_back_identical() {
    let variant = TagVariant::Ntag215;
    // OTP and lock bits only ever OR into the tag, so they are left out
    let policy = WritePolicy::none();
    let mut s = detected_mock_session(MockDriver::new(variant)).unwrap();
    let source = patterned_image(variant, 0x77).unwrap();
    s.load_image(source.clone()).unwrap();
    s.write_all(policy).unwrap();

    s.read_all();
    for page in (0..variant.pages()).filter(|&p| !policy.skips(variant, p)) {
        assert_eq!(s.image().page(page).unwrap(), source.page(page).unwrap());
    }
}

#[test]
fn repeated_writes_report_the_same() {
    let mut s = detected_mock_session(MockDriver::new(TagVariant::Ev1Ul21)).unwrap();
    s.load_image(patterned_image(TagVariant::Ev1Ul21, 1).unwrap())
        .unwrap();
    let first = s.write_all(WritePolicy::none()).unwrap();
    let second = s.write_all(WritePolicy::none()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn gated_pages_only_means_no_writes() {
    let mut s = detected_mock_session(MockDriver::new(TagVariant::Ntag213)).unwrap();
    for _ in 0..2 {
        let report = s.write_pages(WritePolicy::none(), 2..4).unwrap();
        assert_eq!(report.written, 0);
        assert_eq!(report.skipped, 2);
    }
    assert!(s.driver().writes().is_empty());
}

#[test]
fn every_page_on_direct_write_tag() {
    let variant = TagVariant::Ntag213;
    let mut s =
        detected_mock_session(MockDriver::new(variant).with_magic(MagicKind::DirectWrite))
            .unwrap();
    let mut image = patterned_image(variant, 5).unwrap();
    let (p0, p1) = uid_pages(other_uid_bytes());
    image.set_page(0, p0).unwrap();
    image.set_page(1, p1).unwrap();
    s.load_image(image).unwrap();

    let report = s.write_all(WritePolicy::all()).unwrap();
    assert_eq!(report.written, 45);
    assert_eq!(report.skipped, 0);
    assert_eq!(s.driver().page(0), p0);
    assert_eq!(s.driver().page(1), p1);
    assert_eq!(s.driver().page(0x28), page_pattern(0x28, 5));
}

#[test]
fn removed_tag_aborts_write() {
    let mut mock = MockDriver::new(TagVariant::Ntag213);
    mock.fail_writes.insert(10);
    mock.remove_on_failure = true;
    let mut s = detected_mock_session(mock).unwrap();
    assert!(matches!(
        s.write_all(WritePolicy::none()),
        Err(Error::TagRemoved)
    ));
    assert_eq!(s.driver().writes().last(), Some(&10));
}

#[test]
fn failed_pages_are_not_retried() {
    let mut mock = MockDriver::new(TagVariant::Ntag213);
    mock.fail_writes.extend([5u8, 6, 20]);
    let mut s = detected_mock_session(mock).unwrap();
    let selects = s.driver().count(|c| *c == Call::Select);

    let report = s.write_all(WritePolicy::none()).unwrap();
    assert_eq!(report.failed, 3);
    assert_eq!(report.written, 45 - 5 - 3);
    assert_eq!(s.driver().writes().iter().filter(|&&p| p == 5).count(), 1);
    assert_eq!(s.driver().count(|c| *c == Call::Select), selects + 3);
}
