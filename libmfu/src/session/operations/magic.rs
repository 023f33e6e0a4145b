// libmfu-rs/libmfu/src/session/operations/magic.rs

//! Unlocking the UID pages of magic clones.

use log::{debug, info};

use crate::constants::{MAGIC_UNLOCK1_BITS, PAGE_SIZE};
use crate::driver::Driver;
use crate::protocol::{commands, pad_page};
use crate::session::{RawMode, Session};
use crate::utils::bytes_to_hex;
use crate::Result;

/// Make pages 0-2 writable. A clone that takes plain writes needs nothing
/// else; otherwise the vendor backdoor is tried.
pub fn ensure_writable<D: Driver>(session: &mut Session<D>) -> Result<bool> {
    if direct_write(&mut session.driver) {
        info!("Card is DirectWrite");
        return Ok(true);
    }
    info!("Card is not DirectWrite");
    unlock_backdoor(&mut session.driver)
}

/// Read block 0 and write its first three pages back unchanged.
fn direct_write<D: Driver + ?Sized>(driver: &mut D) -> bool {
    debug!("Checking if UL badge is DirectWrite...");
    let block = match driver.mifare_read(0) {
        Ok(block) => block,
        Err(e) => {
            debug!("unable to read block 0x00: {}", e);
            return false;
        }
    };
    debug!("Original block 0 (pages 0-2): {}", bytes_to_hex(&block[..12]));
    info!(
        "Original UID: {}",
        bytes_to_hex(&[block[0], block[1], block[2], block[4], block[5], block[6], block[7]])
    );

    for page in 0..3 {
        let mut data = [0u8; PAGE_SIZE];
        data.copy_from_slice(&block[page * PAGE_SIZE..(page + 1) * PAGE_SIZE]);
        if let Err(e) = driver.mifare_write(page as u8, &pad_page(&data)) {
            debug!("failure writing page {}: {}", page, e);
            return false;
        }
    }
    true
}

/// Halt, then the 7-bit 0x40 and 1-byte 0x43 frames. True only when the
/// last frame got through.
pub fn unlock_backdoor<D: Driver + ?Sized>(driver: &mut D) -> Result<bool> {
    let mut raw = RawMode::enter(driver)?;
    // HLTA is never answered
    let _ = raw.transceive_frame(&commands::halt());
    let unlocked = match raw.transceive_bits(&commands::magic_unlock1(), MAGIC_UNLOCK1_BITS) {
        Ok(_) => raw.transceive_bytes(&commands::magic_unlock2()).is_ok(),
        Err(e) => {
            debug!("unlock frame 1 not answered: {}", e);
            false
        }
    };
    raw.finish()?;
    Ok(unlocked)
}
