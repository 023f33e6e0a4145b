#[path = "../common/mod.rs"]
mod common;

use libmfu::driver::MockDriver;
use libmfu::session::operations::ReadReport;
use libmfu::tag::TagVariant;

use common::fixtures::{protected_mock, sample_pack, sample_password};
use common::helpers::{detected_mock_session, page_pattern, patterned_mock};

#[test]
fn sixteen_page_tag_takes_four_block_reads() {
    let mut s = detected_mock_session(MockDriver::new(TagVariant::UltralightOriginal)).unwrap();
    let report = s.read_all();
    assert_eq!(s.driver().reads(), vec![0, 4, 8, 12]);
    assert_eq!(
        report,
        ReadReport {
            pages: 16,
            read: 16,
            failed: 0
        }
    );
}

#[test]
fn trailing_partial_block_counts_only_real_pages() {
    // 41 pages: the last READ starts at page 40 and one page is kept
    let mut s = detected_mock_session(patterned_mock(TagVariant::Ev1Ul21, 9)).unwrap();
    let report = s.read_all();
    assert_eq!(s.driver().reads().len(), 11);
    assert_eq!(report.read, 41);
    assert_eq!(s.image().page(40).unwrap(), page_pattern(40, 9));
    // the rolled-over pages 0-2 were not copied past the end
    assert!(s.image().linear_bytes()[41 * 4..].iter().all(|&b| b == 0));
}

#[test]
fn failed_trailing_block_counts_one_page() {
    let mut mock = MockDriver::new(TagVariant::Ev1Ul21);
    mock.fail_reads.insert(40);
    let mut s = detected_mock_session(mock).unwrap();
    let report = s.read_all();
    assert_eq!(report.failed, 1);
    assert_eq!(report.read, 40);
    assert!(!report.is_complete());
}

#[test]
fn every_block_failing_reads_nothing() {
    let mut mock = MockDriver::new(TagVariant::Ntag213);
    mock.fail_reads.extend((0..45).step_by(4).map(|p| p as u8));
    let mut s = detected_mock_session(mock).unwrap();
    let report = s.read_all();
    assert_eq!(report.read, 0);
    assert_eq!(report.failed, 45);
    assert!(s.image().as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn ev1_ul11_secrets_are_overlaid_after_auth() {
    let mut s = detected_mock_session(protected_mock(TagVariant::Ev1Ul11)).unwrap();
    s.authenticate(sample_password()).unwrap();
    s.read_all();

    // the tag reads PWD and PACK back as zeros; the image carries them
    assert_eq!(&s.image().page(0x12).unwrap(), sample_password().as_bytes());
    assert_eq!(&s.image().page(0x13).unwrap()[..2], sample_pack().as_bytes());
    assert_eq!(s.image().page(0x10).unwrap(), page_pattern(0x10, 0x3c));
}

#[test]
fn ntag215_secrets_land_on_last_two_pages() {
    let mut s = detected_mock_session(protected_mock(TagVariant::Ntag215)).unwrap();
    s.authenticate(sample_password()).unwrap();
    s.read_all();
    assert_eq!(&s.image().page(0x85).unwrap(), sample_password().as_bytes());
    assert_eq!(&s.image().page(0x86).unwrap()[..2], sample_pack().as_bytes());
}

#[test]
fn without_password_secrets_stay_unknown() {
    let mut s = detected_mock_session(protected_mock(TagVariant::Ntag213)).unwrap();
    s.read_all();
    assert_eq!(s.image().page(0x2B).unwrap(), [0; 4]);
}

#[test]
fn blocks_after_a_nak_are_read_after_reselect() {
    let mut mock = patterned_mock(TagVariant::Ntag213, 0x21);
    mock.fail_reads.insert(8);
    let mut s = detected_mock_session(mock).unwrap();
    let report = s.read_all();
    assert_eq!(report.failed, 4);
    assert_eq!(report.read, 41);
    assert_eq!(s.image().page(12).unwrap(), page_pattern(12, 0x21));
    assert_eq!(s.image().page(44).unwrap(), page_pattern(44, 0x21));
}
