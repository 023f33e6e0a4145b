// libmfu-rs/libmfu/src/session/raw.rs

//! Scoped raw-frame mode of the reader.

use log::warn;

use crate::driver::{Driver, Property};
use crate::Result;

/// Raw mode: the driver neither appends/checks CRC_A nor wraps frames, so
/// the caller frames tag commands itself, usually through
/// [`RawMode::transceive_frame`].
///
/// Entering switches both properties off. Leaving through [`RawMode::finish`]
/// restores them and reports failures; dropping the guard restores them on
/// every other path.
pub struct RawMode<'a, D: Driver + ?Sized> {
    driver: &'a mut D,
    active: bool,
}

impl<'a, D: Driver + ?Sized> RawMode<'a, D> {
    /// Switch CRC handling and easy framing off.
    pub fn enter(driver: &'a mut D) -> Result<Self> {
        driver.set_property(Property::HandleCrc, false)?;
        if let Err(e) = driver.set_property(Property::EasyFraming, false) {
            let _ = driver.set_property(Property::HandleCrc, true);
            return Err(e);
        }
        Ok(Self {
            driver,
            active: true,
        })
    }

    /// Send a complete frame as is.
    pub fn transceive_bytes(&mut self, tx: &[u8]) -> Result<Vec<u8>> {
        #[cfg(feature = "diagnostics")]
        log::trace!("raw tx: {}", crate::utils::bytes_to_hex_spaced(tx));
        self.driver.transceive_bytes(tx)
    }

    /// Append CRC_A through the driver's [`Driver::crc_append`] and send.
    pub fn transceive_frame(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        let mut frame = payload.to_vec();
        self.driver.crc_append(&mut frame);
        self.transceive_bytes(&frame)
    }

    /// Send a short frame of `tx_bits` bits.
    pub fn transceive_bits(&mut self, tx: &[u8], tx_bits: usize) -> Result<Vec<u8>> {
        #[cfg(feature = "diagnostics")]
        log::trace!("raw tx ({} bits): {}", tx_bits, crate::utils::bytes_to_hex_spaced(tx));
        self.driver.transceive_bits(tx, tx_bits)
    }

    /// Leave raw mode and report whether restoring the driver worked.
    pub fn finish(mut self) -> Result<()> {
        self.active = false;
        restore(&mut *self.driver)
    }
}

impl<D: Driver + ?Sized> Drop for RawMode<'_, D> {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = restore(&mut *self.driver) {
                warn!("unable to leave raw mode: {}", e);
            }
        }
    }
}

fn restore<D: Driver + ?Sized>(driver: &mut D) -> Result<()> {
    let crc = driver.set_property(Property::HandleCrc, true);
    let framing = driver.set_property(Property::EasyFraming, true);
    crc.and(framing)
}
