// libmfu-rs/libmfu/src/types.rs

//! Small value types: UID, password, pack and target info.

use crate::constants::MAX_UID_LEN;
use crate::Error;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// UID of an ISO14443-A target (4, 7 or 10 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uid {
    bytes: [u8; MAX_UID_LEN],
    len: usize,
}

impl Uid {
    /// UID bytes as received.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of UID bytes (4, 7 or 10).
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for the zero-length default UID.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lowercase hex without separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() > MAX_UID_LEN {
            return Err(Error::InvalidLength {
                expected: MAX_UID_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; MAX_UID_LEN];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: arr,
            len: bytes.len(),
        })
    }
}

impl FromStr for Uid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = crate::utils::parse_hex(s)?;
        Uid::try_from(&bytes[..])
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Selected target as reported by the reader driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetInfo {
    /// Answer to request, type A
    pub atqa: [u8; 2],
    /// Select acknowledge
    pub sak: u8,
    /// UID from anticollision
    pub uid: Uid,
}

impl TargetInfo {
    /// Target from selection.
    pub fn new(atqa: [u8; 2], sak: u8, uid: Uid) -> Self {
        Self { atqa, sak, uid }
    }

    /// Ultralight-family tags report 0x44 in the second ATQA byte.
    pub fn is_ultralight(&self) -> bool {
        self.atqa[1] == crate::constants::ULTRALIGHT_ATQA1
    }
}

/// 32-bit tag password (PWD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Password([u8; 4]);

impl Password {
    /// Password from raw bytes.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Raw password bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

/// Parses exactly eight hex digits, e.g. `"ffffffff"`.
impl FromStr for Password {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = crate::utils::parse_hex(s)?;
        if bytes.len() != 4 {
            return Err(Error::InvalidHex(format!(
                "password needs 8 hex digits, got '{}'",
                s
            )));
        }
        let mut arr = [0u8; 4];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::utils::bytes_to_hex(&self.0))
    }
}

/// 16-bit password acknowledge (PACK)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pack([u8; 2]);

impl Pack {
    /// Pack from raw bytes.
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    /// Raw pack bytes.
    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Pack {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() < 2 {
            return Err(Error::InvalidLength {
                expected: 2,
                actual: bytes.len(),
            });
        }
        Ok(Self([bytes[0], bytes[1]]))
    }
}

impl fmt::Display for Pack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::utils::bytes_to_hex(&self.0))
    }
}

/// Password and pack known for the current tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Credentials {
    /// Password used for PWD_AUTH
    pub password: Option<Password>,
    /// PACK the tag answered with
    pub pack: Option<Pack>,
}

impl Credentials {
    /// Credentials after a successful PWD_AUTH.
    pub fn new(password: Password, pack: Pack) -> Self {
        Self {
            password: Some(password),
            pack: Some(pack),
        }
    }

    /// True once authentication succeeded.
    pub fn is_known(&self) -> bool {
        self.password.is_some()
    }
}
