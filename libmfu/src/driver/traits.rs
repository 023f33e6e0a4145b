// libmfu-rs/libmfu/src/driver/traits.rs

//! The reader abstraction the session talks through.

use crate::constants::BLOCK_SIZE;
use crate::types::{TargetInfo, Uid};
use crate::Result;

/// Reader properties the session toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Driver appends and checks CRC_A
    HandleCrc,
    /// Driver wraps frames for the reader's data exchange command
    EasyFraming,
    /// Selection retries until a target shows up
    InfiniteSelect,
}

/// Driver trait abstracts the contactless reader away from tag logic.
///
/// Anticollision, bit framing and timing live behind this trait; the
/// session only issues the handful of raw tag commands a generic driver
/// does not provide.
pub trait Driver {
    /// Put the reader into initiator mode
    fn initiator_init(&mut self) -> Result<()>;

    /// Switch a reader property on or off
    fn set_property(&mut self, property: Property, enable: bool) -> Result<()>;

    /// Select one ISO14443-A target at 106 kbps. `Ok(None)` when nothing
    /// answered.
    fn select_passive_target(&mut self, uid: Option<&Uid>) -> Result<Option<TargetInfo>>;

    /// List targets in the field. Default implementation selects once.
    fn list_passive_targets(&mut self, max_targets: usize) -> Result<Vec<TargetInfo>> {
        if max_targets == 0 {
            return Ok(Vec::new());
        }
        Ok(self.select_passive_target(None)?.into_iter().collect())
    }

    /// Transmit `tx_bits` bits of `tx` and return the response bytes.
    fn transceive_bits(&mut self, tx: &[u8], tx_bits: usize) -> Result<Vec<u8>>;

    /// Transmit a byte frame and return the response bytes.
    fn transceive_bytes(&mut self, tx: &[u8]) -> Result<Vec<u8>>;

    /// READ four pages starting at `page`.
    fn mifare_read(&mut self, page: u8) -> Result<[u8; BLOCK_SIZE]>;

    /// Write one page. Only the first four bytes of `data` are stored.
    fn mifare_write(&mut self, page: u8, data: &[u8; BLOCK_SIZE]) -> Result<()>;

    /// Human readable reader name
    fn name(&self) -> String {
        "unknown".to_string()
    }

    /// Append CRC_A to a raw frame. Default uses the software CRC.
    fn crc_append(&self, frame: &mut Vec<u8>) {
        crate::protocol::append_crc_a(frame)
    }
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn initiator_init(&mut self) -> Result<()> {
        (**self).initiator_init()
    }
    fn set_property(&mut self, property: Property, enable: bool) -> Result<()> {
        (**self).set_property(property, enable)
    }
    fn select_passive_target(&mut self, uid: Option<&Uid>) -> Result<Option<TargetInfo>> {
        (**self).select_passive_target(uid)
    }
    fn list_passive_targets(&mut self, max_targets: usize) -> Result<Vec<TargetInfo>> {
        (**self).list_passive_targets(max_targets)
    }
    fn transceive_bits(&mut self, tx: &[u8], tx_bits: usize) -> Result<Vec<u8>> {
        (**self).transceive_bits(tx, tx_bits)
    }
    fn transceive_bytes(&mut self, tx: &[u8]) -> Result<Vec<u8>> {
        (**self).transceive_bytes(tx)
    }
    fn mifare_read(&mut self, page: u8) -> Result<[u8; BLOCK_SIZE]> {
        (**self).mifare_read(page)
    }
    fn mifare_write(&mut self, page: u8, data: &[u8; BLOCK_SIZE]) -> Result<()> {
        (**self).mifare_write(page, data)
    }
    fn name(&self) -> String {
        (**self).name()
    }
    fn crc_append(&self, frame: &mut Vec<u8>) {
        (**self).crc_append(frame)
    }
}

impl<D: Driver + ?Sized> Driver for &mut D {
    fn initiator_init(&mut self) -> Result<()> {
        (**self).initiator_init()
    }
    fn set_property(&mut self, property: Property, enable: bool) -> Result<()> {
        (**self).set_property(property, enable)
    }
    fn select_passive_target(&mut self, uid: Option<&Uid>) -> Result<Option<TargetInfo>> {
        (**self).select_passive_target(uid)
    }
    fn list_passive_targets(&mut self, max_targets: usize) -> Result<Vec<TargetInfo>> {
        (**self).list_passive_targets(max_targets)
    }
    fn transceive_bits(&mut self, tx: &[u8], tx_bits: usize) -> Result<Vec<u8>> {
        (**self).transceive_bits(tx, tx_bits)
    }
    fn transceive_bytes(&mut self, tx: &[u8]) -> Result<Vec<u8>> {
        (**self).transceive_bytes(tx)
    }
    fn mifare_read(&mut self, page: u8) -> Result<[u8; BLOCK_SIZE]> {
        (**self).mifare_read(page)
    }
    fn mifare_write(&mut self, page: u8, data: &[u8; BLOCK_SIZE]) -> Result<()> {
        (**self).mifare_write(page, data)
    }
    fn name(&self) -> String {
        (**self).name()
    }
    fn crc_append(&self, frame: &mut Vec<u8>) {
        (**self).crc_append(frame)
    }
}
