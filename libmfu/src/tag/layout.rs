// libmfu-rs/libmfu/src/tag/layout.rs

//! Where password-capable variants keep PWD and PACK.

use super::TagVariant;

/// Position of the PWD and PACK fields inside the linear page image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecretLayout {
    /// Page holding PWD
    pub pwd_page: usize,
    /// Byte offset of PWD within its page
    pub pwd_offset: usize,
    /// Page holding PACK
    pub pack_page: usize,
    /// Byte offset of PACK within its page
    pub pack_offset: usize,
}

impl SecretLayout {
    const fn at(pwd_page: usize, pack_page: usize) -> Self {
        Self {
            pwd_page,
            pwd_offset: 0,
            pack_page,
            pack_offset: 0,
        }
    }

    /// Linear byte offset of the 4-byte password.
    pub fn pwd_byte(&self) -> usize {
        self.pwd_page * crate::constants::PAGE_SIZE + self.pwd_offset
    }

    /// Linear byte offset of the 2-byte pack.
    pub fn pack_byte(&self) -> usize {
        self.pack_page * crate::constants::PAGE_SIZE + self.pack_offset
    }
}

// PWD and PACK occupy the last two configuration pages of every
// password-capable variant.
const EV1_UL11: SecretLayout = SecretLayout::at(0x12, 0x13);
const EV1_UL21: SecretLayout = SecretLayout::at(0x27, 0x28);
const NTAG213: SecretLayout = SecretLayout::at(0x2b, 0x2c);
const NTAG215: SecretLayout = SecretLayout::at(0x85, 0x86);
const NTAG216: SecretLayout = SecretLayout::at(0xe5, 0xe6);

pub(super) fn secret_layout(variant: TagVariant) -> Option<SecretLayout> {
    match variant {
        TagVariant::UltralightOriginal => None,
        TagVariant::Ev1Ul11 => Some(EV1_UL11),
        TagVariant::Ev1Ul21 => Some(EV1_UL21),
        TagVariant::Ntag213 => Some(NTAG213),
        TagVariant::Ntag215 => Some(NTAG215),
        TagVariant::Ntag216 => Some(NTAG216),
    }
}
