// libmfu-rs/libmfu/src/session/operations/version.rs

//! GET_VERSION and variant detection.

use log::{debug, info, warn};

use crate::constants::VERSION_STORAGE_INDEX;
use crate::driver::Driver;
use crate::image::PageImage;
use crate::protocol::commands;
use crate::session::{RawMode, Session};
use crate::tag::{self, TagVariant};
use crate::Result;

/// Send GET_VERSION in raw mode. `None` when the tag did not answer, the
/// answer is too short to hold the storage size byte, or the reader could
/// not leave raw mode afterwards.
pub fn get_version<D: Driver + ?Sized>(driver: &mut D) -> Result<Option<Vec<u8>>> {
    let mut raw = RawMode::enter(driver)?;
    let res = raw.transceive_frame(&commands::get_version());
    if let Err(e) = raw.finish() {
        debug!("unable to leave raw mode after GET_VERSION: {}", e);
        return Ok(None);
    }

    Ok(match res {
        Ok(rx) if rx.len() > VERSION_STORAGE_INDEX => Some(rx),
        Ok(rx) => {
            debug!("short version response ({} bytes)", rx.len());
            None
        }
        Err(e) => {
            debug!("no version response: {}", e);
            None
        }
    })
}

/// Classify the selected tag. A tag without GET_VERSION is left halted by
/// the failed exchange and gets selected again.
pub fn detect_variant<D: Driver>(session: &mut Session<D>) -> Result<TagVariant> {
    let response = get_version(&mut session.driver)?;
    if response.is_none() {
        session.reselect()?;
    }

    let variant = tag::classify(response.as_deref())?;
    session.variant = variant;
    session.image = PageImage::for_variant(variant);

    if variant.is_ev1() {
        info!("EV1 type: {} ({} user bytes)", variant, variant.user_bytes());
    } else if variant.is_ntag() {
        info!("NTAG type: {} ({} user bytes)", variant, variant.user_bytes());
    } else {
        info!("{} ({} pages)", variant, variant.pages());
    }
    if variant.secret_layout().is_some() && !session.credentials.is_known() {
        warn!("tag is EV1 or NTAG - password may be required");
    }
    Ok(variant)
}
