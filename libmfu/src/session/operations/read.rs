// libmfu-rs/libmfu/src/session/operations/read.rs

//! Dumping tag memory into the page image.

use log::{debug, info, warn};

use crate::constants::BLOCK_PAGES;
use crate::driver::Driver;
use crate::session::Session;

/// Outcome of a read pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadReport {
    /// Pages of the variant
    pub pages: usize,
    /// Pages copied into the image
    pub read: usize,
    /// Pages whose block could not be read
    pub failed: usize,
}

impl ReadReport {
    /// Every page was read.
    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.read == self.pages
    }
}

/// Read all pages of the detected variant, four at a time. A failed block
/// keeps its previous image contents and the tag is selected again before
/// the next block; if it is gone, the remaining pages count as failed.
/// Known secrets are placed in the image afterwards, since the tag never
/// reveals them.
pub fn read_all<D: Driver>(session: &mut Session<D>) -> ReadReport {
    let pages = session.variant.pages();
    let mut report = ReadReport {
        pages,
        ..ReadReport::default()
    };
    let mut markers = String::with_capacity(pages);
    let mut failure = false;
    debug!("Reading {} pages", pages);

    for page in (0..pages).step_by(BLOCK_PAGES) {
        let count = (pages - page).min(BLOCK_PAGES);
        if failure {
            // the failed READ left the tag idle
            if let Err(e) = session.reselect() {
                warn!("tag was removed: {}", e);
                report.failed += pages - page;
                markers.extend(std::iter::repeat_n('f', pages - page));
                break;
            }
            failure = false;
        }
        let res = session
            .driver
            .mifare_read(page as u8)
            .and_then(|block| session.image.copy_block(page, &block));
        match res {
            Ok(copied) => {
                report.read += copied;
                markers.extend(std::iter::repeat_n('.', copied));
            }
            Err(e) => {
                debug!("unable to read block {:#04x}: {}", page, e);
                failure = true;
                report.failed += count;
                markers.extend(std::iter::repeat_n('f', count));
            }
        }
    }
    debug!("|{}|", markers);

    if session
        .image
        .apply_secrets(session.variant, &session.credentials)
    {
        debug!("password and pack copied to image");
    }

    info!(
        "Done, {} of {} pages read ({} pages failed).",
        report.read, report.pages, report.failed
    );
    report
}
