// libmfu-rs/libmfu/src/driver/mock.rs

//! In-memory tag behind the [`Driver`] trait, for tests.

use std::cell::Cell;
use std::collections::HashSet;

use crate::constants::{
    ACK, BLOCK_PAGES, BLOCK_SIZE, CMD_GET_VERSION, CMD_HALT, CMD_PWD_AUTH, LOCK_PAGE,
    MAGIC_UNLOCK1, MAGIC_UNLOCK1_BITS, MAGIC_UNLOCK2, OTP_PAGE, PAGE_SIZE,
};
use crate::driver::traits::{Driver, Property};
use crate::protocol::{append_crc_a, check_crc_a};
use crate::tag::TagVariant;
use crate::types::{Pack, Password, TargetInfo, Uid};
use crate::{Error, Result};

/// No answer from the tag (libnfc NFC_ETIMEOUT)
const E_TIMEOUT: i32 = -6;
/// NAK or corrupted frame (libnfc NFC_ERFTRANS)
const E_RFTRANS: i32 = -20;

/// Every call the session made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// Reader put into initiator mode
    InitiatorInit,
    /// Property change
    SetProperty(Property, bool),
    /// Selection attempt
    Select,
    /// Short frame and its bit count
    TransceiveBits(Vec<u8>, usize),
    /// Byte frame as sent
    TransceiveBytes(Vec<u8>),
    /// READ of a block
    Read(u8),
    /// WRITE of a page
    Write(u8, [u8; PAGE_SIZE]),
}

/// How a simulated tag treats writes to its UID pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MagicKind {
    /// Genuine tag: pages 0-1 are read-only
    #[default]
    None,
    /// Clone accepting plain writes to pages 0-2
    DirectWrite,
    /// Clone that needs the halt + 0x40/0x43 backdoor first
    Backdoor,
}

/// Mock driver for unit tests. It simulates a single Ultralight-family tag
/// in the field and records every call made through the Driver trait.
#[derive(Debug)]
pub struct MockDriver {
    /// Simulated variant
    pub variant: TagVariant,
    /// Tag memory, `pages * 4` bytes
    pub memory: Vec<u8>,
    /// UID reported on selection
    pub uid: Uid,
    /// ATQA reported on selection
    pub atqa: [u8; 2],
    /// GET_VERSION answer; `None` for an original Ultralight
    pub version: Option<[u8; 8]>,
    /// Password PWD_AUTH accepts
    pub password: Option<Password>,
    /// PACK returned on successful PWD_AUTH
    pub pack: Pack,
    /// UID page behaviour
    pub magic: MagicKind,
    /// Tag is in the field
    pub present: bool,
    /// Block start pages whose READ is NAKed
    pub fail_reads: HashSet<u8>,
    /// Pages whose WRITE is NAKed
    pub fail_writes: HashSet<u8>,
    /// Testing hook: the tag leaves the field after a failed READ or WRITE
    pub remove_on_failure: bool,
    /// Testing hook: number of selections that find nothing
    pub select_failures: usize,
    /// Testing hook: number of selections the reader itself fails
    pub select_errors: usize,
    /// Testing hook: this property change is refused by the reader
    pub fail_property: Option<(Property, bool)>,
    /// Testing hook: the second backdoor frame gets no answer
    pub fail_unlock2: bool,
    /// Every call made so far
    pub calls: Vec<Call>,
    handle_crc: bool,
    easy_framing: bool,
    crc_appends: Cell<usize>,
    halted: bool,
    backdoor_armed: bool,
    unlocked: bool,
}

impl MockDriver {
    /// Factory-fresh tag with a fixed 7-byte UID.
    pub fn new(variant: TagVariant) -> Self {
        let version = variant.storage_byte().map(|storage| {
            let (kind, subtype) = if variant.is_ntag() { (0x04, 0x02) } else { (0x03, 0x01) };
            [0x00, 0x04, kind, subtype, 0x01, 0x00, storage, 0x03]
        });
        let uid = Uid::try_from(&[0x04u8, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06][..])
            .unwrap_or_default();
        let mut mock = Self {
            variant,
            memory: vec![0u8; variant.pages() * PAGE_SIZE],
            uid,
            atqa: [0x00, 0x44],
            version,
            password: None,
            pack: Pack::default(),
            magic: MagicKind::None,
            present: true,
            fail_reads: HashSet::new(),
            fail_writes: HashSet::new(),
            remove_on_failure: false,
            select_failures: 0,
            select_errors: 0,
            fail_property: None,
            fail_unlock2: false,
            calls: Vec::new(),
            handle_crc: true,
            easy_framing: true,
            crc_appends: Cell::new(0),
            halted: true,
            backdoor_armed: false,
            unlocked: false,
        };
        mock.store_uid();
        if variant.is_ntag() {
            let size = (variant.user_bytes() / 8) as u8;
            mock.set_page(OTP_PAGE, [0xE1, 0x10, size, 0x00]);
        }
        mock
    }

    /// Replace the UID; pages 0-2 follow.
    pub fn with_uid(mut self, uid: &[u8]) -> Self {
        if let Ok(uid) = Uid::try_from(uid) {
            self.uid = uid;
            self.store_uid();
        }
        self
    }

    /// Protect the tag; PWD and PACK are also stored in memory.
    pub fn with_password(mut self, password: Password, pack: Pack) -> Self {
        self.password = Some(password);
        self.pack = pack;
        if let Some(layout) = self.variant.secret_layout() {
            let pwd = layout.pwd_byte();
            self.memory[pwd..pwd + 4].copy_from_slice(password.as_bytes());
            let pk = layout.pack_byte();
            self.memory[pk..pk + 2].copy_from_slice(pack.as_bytes());
        }
        self
    }

    /// Turn the tag into a magic clone.
    pub fn with_magic(mut self, magic: MagicKind) -> Self {
        self.magic = magic;
        self
    }

    /// Override the GET_VERSION answer.
    pub fn with_version(mut self, version: Option<[u8; 8]>) -> Self {
        self.version = version;
        self
    }

    /// Override the ATQA.
    pub fn with_atqa(mut self, atqa: [u8; 2]) -> Self {
        self.atqa = atqa;
        self
    }

    /// Copy of one page of tag memory.
    pub fn page(&self, page: usize) -> [u8; PAGE_SIZE] {
        let start = page * PAGE_SIZE;
        let mut out = [0u8; PAGE_SIZE];
        out.copy_from_slice(&self.memory[start..start + PAGE_SIZE]);
        out
    }

    /// Overwrite one page of tag memory.
    pub fn set_page(&mut self, page: usize, data: [u8; PAGE_SIZE]) {
        let start = page * PAGE_SIZE;
        self.memory[start..start + PAGE_SIZE].copy_from_slice(&data);
    }

    /// True while HANDLE_CRC or EASY_FRAMING is switched off.
    pub fn is_raw_mode(&self) -> bool {
        !self.handle_crc || !self.easy_framing
    }

    /// Backdoor unlocked since the last selection.
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Number of frames that got their CRC_A through [`Driver::crc_append`].
    pub fn crc_appends(&self) -> usize {
        self.crc_appends.get()
    }

    /// Pages written, in order.
    pub fn writes(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Write(page, _) => Some(*page),
                _ => None,
            })
            .collect()
    }

    /// Blocks read, in order.
    pub fn reads(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Read(page) => Some(*page),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn store_uid(&mut self) {
        let u = self.uid.as_bytes();
        if u.len() < 7 {
            return;
        }
        let bcc0 = 0x88 ^ u[0] ^ u[1] ^ u[2];
        let bcc1 = u[3] ^ u[4] ^ u[5] ^ u[6];
        let (p0, p1) = ([u[0], u[1], u[2], bcc0], [u[3], u[4], u[5], u[6]]);
        let lock = self.page(LOCK_PAGE);
        self.set_page(0, p0);
        self.set_page(1, p1);
        self.set_page(LOCK_PAGE, [bcc1, 0x48, lock[2], lock[3]]);
    }

    fn uid_writable(&self) -> bool {
        match self.magic {
            MagicKind::None => false,
            MagicKind::DirectWrite => true,
            MagicKind::Backdoor => self.unlocked,
        }
    }

    fn ready(&self) -> Result<()> {
        if self.is_raw_mode() {
            return Err(Error::Driver("mifare command while in raw mode".into()));
        }
        if !self.present || self.halted {
            return Err(Error::Transport(E_TIMEOUT));
        }
        Ok(())
    }

    fn nak(&mut self) -> Error {
        self.halted = true;
        Error::Transport(E_RFTRANS)
    }

    fn no_answer(&mut self) -> Error {
        self.halted = true;
        Error::Transport(E_TIMEOUT)
    }

    fn redacted(&self, page: usize, data: &mut [u8; PAGE_SIZE]) {
        let Some(layout) = self.variant.secret_layout() else {
            return;
        };
        if self.password.is_none() {
            return;
        }
        if page == layout.pwd_page {
            *data = [0; PAGE_SIZE];
        }
        if page == layout.pack_page {
            data[layout.pack_offset..layout.pack_offset + 2].fill(0);
        }
    }

    fn respond(&self, mut data: Vec<u8>) -> Vec<u8> {
        if !self.handle_crc {
            append_crc_a(&mut data);
        }
        data
    }
}

impl Driver for MockDriver {
    fn initiator_init(&mut self) -> Result<()> {
        self.calls.push(Call::InitiatorInit);
        Ok(())
    }

    fn set_property(&mut self, property: Property, enable: bool) -> Result<()> {
        self.calls.push(Call::SetProperty(property, enable));
        if self.fail_property == Some((property, enable)) {
            return Err(Error::Driver(format!("unable to set {:?}", property)));
        }
        match property {
            Property::HandleCrc => self.handle_crc = enable,
            Property::EasyFraming => self.easy_framing = enable,
            Property::InfiniteSelect => {}
        }
        Ok(())
    }

    fn select_passive_target(&mut self, uid: Option<&Uid>) -> Result<Option<TargetInfo>> {
        self.calls.push(Call::Select);
        if self.select_errors > 0 {
            self.select_errors -= 1;
            return Err(Error::Transport(E_TIMEOUT));
        }
        if !self.present {
            return Ok(None);
        }
        if self.select_failures > 0 {
            self.select_failures -= 1;
            return Ok(None);
        }
        if uid.is_some_and(|u| *u != self.uid) {
            return Ok(None);
        }
        self.halted = false;
        self.backdoor_armed = false;
        self.unlocked = false;
        Ok(Some(TargetInfo::new(self.atqa, 0x00, self.uid)))
    }

    fn transceive_bits(&mut self, tx: &[u8], tx_bits: usize) -> Result<Vec<u8>> {
        self.calls.push(Call::TransceiveBits(tx.to_vec(), tx_bits));
        let backdoor = self.magic == MagicKind::Backdoor && self.present;
        if backdoor && tx_bits == MAGIC_UNLOCK1_BITS && tx.first() == Some(&MAGIC_UNLOCK1) {
            self.backdoor_armed = true;
            return Ok(vec![ACK]);
        }
        Err(self.no_answer())
    }

    fn transceive_bytes(&mut self, tx: &[u8]) -> Result<Vec<u8>> {
        self.calls.push(Call::TransceiveBytes(tx.to_vec()));
        if !self.present {
            return Err(Error::Transport(E_TIMEOUT));
        }

        if tx == [MAGIC_UNLOCK2] && !self.handle_crc {
            if self.backdoor_armed && !self.fail_unlock2 {
                self.backdoor_armed = false;
                self.unlocked = true;
                self.halted = false;
                return Ok(vec![ACK]);
            }
            return Err(self.no_answer());
        }

        let payload = if self.handle_crc {
            tx
        } else if check_crc_a(tx) {
            &tx[..tx.len() - 2]
        } else {
            return Err(self.nak());
        };
        if self.halted {
            return Err(Error::Transport(E_TIMEOUT));
        }

        match payload.first().copied() {
            Some(CMD_GET_VERSION) => match self.version {
                Some(v) => Ok(self.respond(v.to_vec())),
                None => Err(self.no_answer()),
            },
            Some(CMD_PWD_AUTH) if payload.len() == 5 => {
                match (self.version, self.password) {
                    (Some(_), Some(p)) if p.as_bytes()[..] == payload[1..5] => {
                        Ok(self.respond(self.pack.as_bytes().to_vec()))
                    }
                    (Some(_), None) if payload[1..5] == [0xff; 4] => {
                        // factory default password
                        Ok(self.respond(vec![0x00, 0x00]))
                    }
                    _ => Err(self.nak()),
                }
            }
            Some(CMD_HALT) => Err(self.no_answer()),
            _ => Err(self.nak()),
        }
    }

    fn mifare_read(&mut self, page: u8) -> Result<[u8; BLOCK_SIZE]> {
        self.calls.push(Call::Read(page));
        self.ready()?;
        let pages = self.variant.pages();
        let page = page as usize;
        if page >= pages {
            return Err(self.nak());
        }
        if self.fail_reads.contains(&(page as u8)) {
            if self.remove_on_failure {
                self.present = false;
            }
            return Err(self.nak());
        }

        let mut out = [0u8; BLOCK_SIZE];
        for i in 0..BLOCK_PAGES {
            // reads past the last page roll over to page 0
            let p = (page + i) % pages;
            let mut data = self.page(p);
            self.redacted(p, &mut data);
            out[i * PAGE_SIZE..(i + 1) * PAGE_SIZE].copy_from_slice(&data);
        }
        Ok(out)
    }

    fn mifare_write(&mut self, page: u8, data: &[u8; BLOCK_SIZE]) -> Result<()> {
        let mut four = [0u8; PAGE_SIZE];
        four.copy_from_slice(&data[..PAGE_SIZE]);
        self.calls.push(Call::Write(page, four));
        self.ready()?;

        let page = page as usize;
        if page >= self.variant.pages() {
            return Err(self.nak());
        }
        if self.fail_writes.contains(&(page as u8)) {
            if self.remove_on_failure {
                self.present = false;
            }
            return Err(self.nak());
        }

        match page {
            0 | 1 if !self.uid_writable() => Err(self.nak()),
            LOCK_PAGE | OTP_PAGE if !self.uid_writable() => {
                // lock and OTP bits can only be set, bytes 0-1 of page 2
                // hold the read-only BCC1 and internal byte
                let mut cur = self.page(page);
                let from = if page == LOCK_PAGE { 2 } else { 0 };
                for i in from..PAGE_SIZE {
                    cur[i] |= four[i];
                }
                self.set_page(page, cur);
                Ok(())
            }
            _ => {
                self.set_page(page, four);
                Ok(())
            }
        }
    }

    fn name(&self) -> String {
        "mock".to_string()
    }

    fn crc_append(&self, frame: &mut Vec<u8>) {
        self.crc_appends.set(self.crc_appends.get() + 1);
        append_crc_a(frame);
    }
}
