//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockDriver and Session setup so tests
//! across the crate and the tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::constants::PAGE_SIZE;
use crate::driver::MockDriver;
use crate::image::PageImage;
use crate::session::{Session, SessionConfig};
use crate::tag::TagVariant;
use crate::Result;

/// Open a session on `mock` and select its tag.
#[doc(hidden)]
pub fn selected_mock_session(mock: MockDriver) -> Result<Session<MockDriver>> {
    let mut session = Session::open(mock, SessionConfig::default())?;
    session.select()?;
    Ok(session)
}

/// Open, select, check the ATQA and classify, the way the CLI does before
/// reading.
#[doc(hidden)]
pub fn detected_mock_session(mock: MockDriver) -> Result<Session<MockDriver>> {
    let mut session = selected_mock_session(mock)?;
    session.check_ultralight()?;
    session.detect_variant()?;
    Ok(session)
}

/// Recognizable content for page `page`: every byte differs between pages
/// and between `seed`s.
#[doc(hidden)]
pub fn page_pattern(page: usize, seed: u8) -> [u8; PAGE_SIZE] {
    let p = page as u8;
    [p, p ^ seed, p.wrapping_add(seed), !p]
}

/// Mock tag whose user pages (4 and up) carry [`page_pattern`].
#[doc(hidden)]
pub fn patterned_mock(variant: TagVariant, seed: u8) -> MockDriver {
    let mut mock = MockDriver::new(variant);
    for page in 4..variant.pages() {
        mock.set_page(page, page_pattern(page, seed));
    }
    mock
}

/// Image for `variant` whose every page carries [`page_pattern`].
#[doc(hidden)]
pub fn patterned_image(variant: TagVariant, seed: u8) -> Result<PageImage> {
    let mut image = PageImage::for_variant(variant);
    for page in 0..variant.pages() {
        image.set_page(page, page_pattern(page, seed))?;
    }
    Ok(image)
}
