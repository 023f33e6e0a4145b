// libmfu-rs/libmfu/src/image.rs

//! In-memory page image of a tag.
//!
//! The image always owns a buffer large enough for the biggest supported
//! tag and uses an explicit linear layout: byte `n` of page `p` lives at
//! `p * 4 + n`. The variant's page count bounds the active region.

use log::warn;

use crate::constants::{BLOCK_PAGES, BLOCK_SIZE, MAX_DUMP_SIZE, PAGE_SIZE};
use crate::tag::TagVariant;
use crate::types::Credentials;
use crate::{Error, Result};

/// One 4-byte page
pub type Page = [u8; PAGE_SIZE];

/// Linear copy of tag memory. The buffer always spans the largest tag;
/// only the first `pages` pages belong to the current variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageImage {
    bytes: Vec<u8>,
    pages: usize,
}

impl PageImage {
    /// Zero-filled image sized for `variant`.
    pub fn for_variant(variant: TagVariant) -> Self {
        Self {
            bytes: vec![0u8; MAX_DUMP_SIZE],
            pages: variant.pages(),
        }
    }

    /// Build an image from a dump file's contents. Short dumps are padded
    /// with zeros; dumps longer than the tag are rejected.
    pub fn from_dump(variant: TagVariant, dump: &[u8]) -> Result<Self> {
        let mut image = Self::for_variant(variant);
        let size = image.active_len();
        if dump.len() > size {
            return Err(Error::InvalidLength {
                expected: size,
                actual: dump.len(),
            });
        }
        if dump.len() < size {
            warn!(
                "dump holds {} bytes, {} expected for {}; remaining pages are zero",
                dump.len(),
                size,
                variant
            );
        }
        image.bytes[..dump.len()].copy_from_slice(dump);
        Ok(image)
    }

    /// Number of active pages.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Bytes covered by the active pages.
    pub fn active_len(&self) -> usize {
        self.pages * PAGE_SIZE
    }

    fn check(&self, page: usize) -> Result<()> {
        if page >= self.pages {
            return Err(Error::PageOutOfRange {
                page,
                pages: self.pages,
            });
        }
        Ok(())
    }

    /// Copy of page `page`.
    pub fn page(&self, page: usize) -> Result<Page> {
        self.check(page)?;
        let start = page * PAGE_SIZE;
        let mut out = [0u8; PAGE_SIZE];
        out.copy_from_slice(&self.bytes[start..start + PAGE_SIZE]);
        Ok(out)
    }

    /// Overwrite page `page`.
    pub fn set_page(&mut self, page: usize, data: Page) -> Result<()> {
        self.check(page)?;
        let start = page * PAGE_SIZE;
        self.bytes[start..start + PAGE_SIZE].copy_from_slice(&data);
        Ok(())
    }

    /// Copy a READ result starting at `page`. Only the pages that exist on
    /// the tag are copied; returns how many were.
    pub fn copy_block(&mut self, page: usize, block: &[u8; BLOCK_SIZE]) -> Result<usize> {
        self.check(page)?;
        let count = (self.pages - page).min(BLOCK_PAGES);
        let start = page * PAGE_SIZE;
        self.bytes[start..start + count * PAGE_SIZE]
            .copy_from_slice(&block[..count * PAGE_SIZE]);
        Ok(count)
    }

    /// Active region, as written to a dump file.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.active_len()]
    }

    /// Whole backing buffer of the largest supported dump.
    pub fn linear_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes `start..stop` of the linear layout, clamped to the largest
    /// supported dump.
    pub fn byte_range(&self, start: usize, stop: usize) -> &[u8] {
        let stop = stop.min(self.bytes.len());
        let start = start.min(stop);
        &self.bytes[start..stop]
    }

    /// Overlay the known password and pack at the variant's secret fields.
    /// Returns false when there was nothing to place.
    pub fn apply_secrets(&mut self, variant: TagVariant, credentials: &Credentials) -> bool {
        let (Some(layout), Some(password)) = (variant.secret_layout(), credentials.password)
        else {
            return false;
        };
        if layout.pack_page >= self.pages {
            return false;
        }
        let pack = credentials.pack.unwrap_or_default();

        let pwd = layout.pwd_byte();
        self.bytes[pwd..pwd + 4].copy_from_slice(password.as_bytes());
        let pk = layout.pack_byte();
        self.bytes[pk..pk + 2].copy_from_slice(pack.as_bytes());
        true
    }

    /// UID bytes stored in pages 0-1 (the check byte BCC0 at offset 3 is
    /// skipped).
    pub fn uid(&self) -> [u8; 7] {
        let b = &self.bytes;
        [b[0], b[1], b[2], b[4], b[5], b[6], b[7]]
    }
}
