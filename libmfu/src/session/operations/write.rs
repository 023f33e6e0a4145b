// libmfu-rs/libmfu/src/session/operations/write.rs

//! Writing the page image back to the tag.

use std::ops::Range;

use log::{debug, info, warn};

use crate::driver::Driver;
use crate::policy::WritePolicy;
use crate::protocol::pad_page;
use crate::session::Session;
use crate::session::operations::magic::ensure_writable;
use crate::{Error, Result};

/// Outcome of a write pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteReport {
    /// Pages of the variant
    pub pages: usize,
    /// Pages the tag accepted
    pub written: usize,
    /// Pages the policy protected
    pub skipped: usize,
    /// Pages the tag refused
    pub failed: usize,
}

/// Write the whole image back to the tag. With `write_uid` the tag must be
/// unlocked first; otherwise pages 0 and 1 count as skipped.
pub fn write_all<D: Driver>(session: &mut Session<D>, policy: WritePolicy) -> Result<WriteReport> {
    if policy.write_uid && !ensure_writable(session)? {
        warn!("unable to unlock card - are you sure the card is magic?");
        return Err(Error::NotMagic);
    }
    let pages = session.variant.pages();
    write_pages(session, policy, 0..pages)
}

/// Write `range` page by page. Pages the policy protects are skipped. A
/// failed page is counted and the tag is selected again before the next
/// write; the pass aborts with [`Error::TagRemoved`] if that fails.
pub fn write_pages<D: Driver>(
    session: &mut Session<D>,
    policy: WritePolicy,
    range: Range<usize>,
) -> Result<WriteReport> {
    let variant = session.variant;
    let pages = variant.pages();
    if range.end > pages {
        return Err(Error::PageOutOfRange {
            page: range.end - 1,
            pages,
        });
    }

    let mut report = WriteReport {
        pages,
        ..WriteReport::default()
    };
    let mut markers = String::with_capacity(range.len());
    let mut failure = false;
    debug!("Writing {} pages", pages);

    for page in range {
        if policy.skips(variant, page) {
            report.skipped += 1;
            markers.push('s');
            continue;
        }
        if failure {
            // the failed command left the tag idle
            if let Err(e) = session.reselect() {
                debug!("|{}|", markers);
                warn!("tag was removed: {}", e);
                return Err(Error::TagRemoved);
            }
            failure = false;
        }

        let data = pad_page(&session.image.page(page)?);
        match session.driver.mifare_write(page as u8, &data) {
            Ok(()) => {
                report.written += 1;
                markers.push('.');
            }
            Err(e) => {
                debug!("unable to write page {:#04x}: {}", page, e);
                failure = true;
                report.failed += 1;
                markers.push('f');
            }
        }
    }
    debug!("|{}|", markers);
    info!(
        "Done, {} of {} pages written ({} pages skipped, {} pages failed).",
        report.written, report.pages, report.skipped, report.failed
    );
    Ok(report)
}
