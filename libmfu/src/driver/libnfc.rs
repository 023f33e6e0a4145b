// libmfu-rs/libmfu/src/driver/libnfc.rs

//! Driver backed by the system libnfc library.
//!
//! Only the handful of libnfc entry points the session needs are bound.
//! READ and COMPATIBILITY_WRITE go through `nfc_initiator_transceive_bytes`
//! with easy framing on, which makes the reader handle the MIFARE framing.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;

use log::{debug, info};

use crate::constants::{BLOCK_SIZE, MAX_TARGET_COUNT, MAX_UID_LEN};
use crate::driver::traits::{Driver, Property};
use crate::protocol::{compat_write, read};
use crate::types::{TargetInfo, Uid};
use crate::{Error, Result};

#[repr(C)]
struct NfcContext {
    _private: [u8; 0],
}

#[repr(C)]
struct NfcDevice {
    _private: [u8; 0],
}

#[repr(C)]
#[derive(Clone, Copy)]
struct NfcModulation {
    nmt: c_int,
    nbr: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
struct NfcIso14443aInfo {
    abt_atqa: [u8; 2],
    bt_sak: u8,
    sz_uid_len: usize,
    abt_uid: [u8; MAX_UID_LEN],
    sz_ats_len: usize,
    abt_ats: [u8; 254],
}

/// nfc_target_info is a union over every modulation; only the ISO14443-A
/// member is read. The padding keeps room for the larger members.
#[repr(C)]
#[derive(Clone, Copy)]
union NfcTargetInfo {
    nai: NfcIso14443aInfo,
    _pad: [u8; 512],
}

#[repr(C)]
#[derive(Clone, Copy)]
#[allow(dead_code)]
struct NfcTarget {
    nti: NfcTargetInfo,
    nm: NfcModulation,
}

impl NfcTarget {
    fn empty() -> Self {
        Self {
            nti: NfcTargetInfo { _pad: [0; 512] },
            nm: ISO14443A_106,
        }
    }

    fn info(&self) -> TargetInfo {
        // SAFETY: targets are only selected with the ISO14443-A modulation,
        // so libnfc filled the `nai` member.
        let nai = unsafe { self.nti.nai };
        let len = nai.sz_uid_len.min(MAX_UID_LEN);
        let uid = Uid::try_from(&nai.abt_uid[..len]).unwrap_or_default();
        TargetInfo::new(nai.abt_atqa, nai.bt_sak, uid)
    }
}

const NMT_ISO14443A: c_int = 1;
const NBR_106: c_int = 1;
const ISO14443A_106: NfcModulation = NfcModulation {
    nmt: NMT_ISO14443A,
    nbr: NBR_106,
};

const NP_HANDLE_CRC: c_int = 3;
const NP_INFINITE_SELECT: c_int = 7;
const NP_EASY_FRAMING: c_int = 11;

/// Let libnfc pick its own timeout
const TIMEOUT_DEFAULT: c_int = 0;
const RX_CAPACITY: usize = 264;

#[link(name = "nfc")]
unsafe extern "C" {
    fn nfc_init(context: *mut *mut NfcContext);
    fn nfc_exit(context: *mut NfcContext);
    fn nfc_open(context: *mut NfcContext, connstring: *const c_char) -> *mut NfcDevice;
    fn nfc_close(device: *mut NfcDevice);
    fn nfc_device_get_name(device: *mut NfcDevice) -> *const c_char;
    fn nfc_strerror(device: *const NfcDevice) -> *const c_char;
    fn nfc_device_set_property_bool(device: *mut NfcDevice, property: c_int, enable: bool)
    -> c_int;
    fn nfc_initiator_init(device: *mut NfcDevice) -> c_int;
    fn nfc_initiator_select_passive_target(
        device: *mut NfcDevice,
        nm: NfcModulation,
        init_data: *const u8,
        init_data_len: usize,
        target: *mut NfcTarget,
    ) -> c_int;
    fn nfc_initiator_list_passive_targets(
        device: *mut NfcDevice,
        nm: NfcModulation,
        targets: *mut NfcTarget,
        max_targets: usize,
    ) -> c_int;
    fn nfc_initiator_transceive_bytes(
        device: *mut NfcDevice,
        tx: *const u8,
        tx_len: usize,
        rx: *mut u8,
        rx_len: usize,
        timeout: c_int,
    ) -> c_int;
    fn nfc_initiator_transceive_bits(
        device: *mut NfcDevice,
        tx: *const u8,
        tx_bits: usize,
        tx_par: *const u8,
        rx: *mut u8,
        rx_len: usize,
        rx_par: *mut u8,
    ) -> c_int;
}

/// Reader opened through libnfc. The device and the library context are
/// released on drop.
pub struct LibnfcDriver {
    context: *mut NfcContext,
    device: *mut NfcDevice,
}

impl LibnfcDriver {
    /// Open a reader. `None` opens the first device libnfc finds.
    pub fn open(connstring: Option<&str>) -> Result<Self> {
        let conn = connstring
            .map(CString::new)
            .transpose()
            .map_err(|e| Error::Driver(format!("invalid connection string: {}", e)))?;

        let mut context: *mut NfcContext = ptr::null_mut();
        unsafe { nfc_init(&mut context) };
        if context.is_null() {
            return Err(Error::Driver("unable to init libnfc".into()));
        }

        let conn_ptr = conn.as_ref().map_or(ptr::null(), |c| c.as_ptr());
        let device = unsafe { nfc_open(context, conn_ptr) };
        if device.is_null() {
            unsafe { nfc_exit(context) };
            return Err(Error::DeviceNotFound);
        }

        let driver = Self { context, device };
        info!("NFC device: {} opened", driver.name());
        Ok(driver)
    }

    fn last_error(&self) -> String {
        unsafe {
            let p = nfc_strerror(self.device);
            if p.is_null() {
                "unknown error".to_string()
            } else {
                CStr::from_ptr(p).to_string_lossy().into_owned()
            }
        }
    }

    fn check(&self, res: c_int, what: &str) -> Result<c_int> {
        if res < 0 {
            debug!("{} failed: {} ({})", what, self.last_error(), res);
            return Err(Error::Transport(res));
        }
        Ok(res)
    }
}

impl Driver for LibnfcDriver {
    fn initiator_init(&mut self) -> Result<()> {
        let res = unsafe { nfc_initiator_init(self.device) };
        if res < 0 {
            return Err(Error::Driver(self.last_error()));
        }
        Ok(())
    }

    fn set_property(&mut self, property: Property, enable: bool) -> Result<()> {
        let prop = match property {
            Property::HandleCrc => NP_HANDLE_CRC,
            Property::EasyFraming => NP_EASY_FRAMING,
            Property::InfiniteSelect => NP_INFINITE_SELECT,
        };
        let res = unsafe { nfc_device_set_property_bool(self.device, prop, enable) };
        if res < 0 {
            return Err(Error::Driver(self.last_error()));
        }
        Ok(())
    }

    fn select_passive_target(&mut self, uid: Option<&Uid>) -> Result<Option<TargetInfo>> {
        let mut target = NfcTarget::empty();
        let (init_ptr, init_len) = match uid {
            Some(u) => (u.as_bytes().as_ptr(), u.len()),
            None => (ptr::null(), 0),
        };
        let res = unsafe {
            nfc_initiator_select_passive_target(
                self.device,
                ISO14443A_106,
                init_ptr,
                init_len,
                &mut target,
            )
        };
        if self.check(res, "select")? == 0 {
            return Ok(None);
        }
        Ok(Some(target.info()))
    }

    fn list_passive_targets(&mut self, max_targets: usize) -> Result<Vec<TargetInfo>> {
        let max = max_targets.min(MAX_TARGET_COUNT);
        if max == 0 {
            return Ok(Vec::new());
        }
        let mut targets = [NfcTarget::empty(); MAX_TARGET_COUNT];
        let res = unsafe {
            nfc_initiator_list_passive_targets(
                self.device,
                ISO14443A_106,
                targets.as_mut_ptr(),
                max,
            )
        };
        let found = self.check(res, "list targets")? as usize;
        Ok(targets[..found.min(max)].iter().map(NfcTarget::info).collect())
    }

    fn transceive_bits(&mut self, tx: &[u8], tx_bits: usize) -> Result<Vec<u8>> {
        let mut rx = vec![0u8; RX_CAPACITY];
        let res = unsafe {
            nfc_initiator_transceive_bits(
                self.device,
                tx.as_ptr(),
                tx_bits,
                ptr::null(),
                rx.as_mut_ptr(),
                rx.len(),
                ptr::null_mut(),
            )
        };
        let bits = self.check(res, "transceive bits")? as usize;
        rx.truncate(bits.div_ceil(8));
        Ok(rx)
    }

    fn transceive_bytes(&mut self, tx: &[u8]) -> Result<Vec<u8>> {
        let mut rx = vec![0u8; RX_CAPACITY];
        let res = unsafe {
            nfc_initiator_transceive_bytes(
                self.device,
                tx.as_ptr(),
                tx.len(),
                rx.as_mut_ptr(),
                rx.len(),
                TIMEOUT_DEFAULT,
            )
        };
        let len = self.check(res, "transceive")? as usize;
        rx.truncate(len);
        Ok(rx)
    }

    fn mifare_read(&mut self, page: u8) -> Result<[u8; BLOCK_SIZE]> {
        let rx = self.transceive_bytes(&read(page))?;
        if rx.len() < BLOCK_SIZE {
            return Err(Error::InvalidLength {
                expected: BLOCK_SIZE,
                actual: rx.len(),
            });
        }
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(&rx[..BLOCK_SIZE]);
        Ok(block)
    }

    fn mifare_write(&mut self, page: u8, data: &[u8; BLOCK_SIZE]) -> Result<()> {
        self.transceive_bytes(&compat_write(page, data)).map(|_| ())
    }

    fn name(&self) -> String {
        unsafe {
            let p = nfc_device_get_name(self.device);
            if p.is_null() {
                "unknown".to_string()
            } else {
                CStr::from_ptr(p).to_string_lossy().into_owned()
            }
        }
    }
}

impl Drop for LibnfcDriver {
    fn drop(&mut self) {
        unsafe {
            nfc_close(self.device);
            nfc_exit(self.context);
        }
    }
}
