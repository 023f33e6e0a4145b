// libmfu-rs/libmfu/src/error.rs

//! Error type shared by the library and the CLI.

use thiserror::Error;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    /// No reader could be opened
    #[error("device not found")]
    DeviceNotFound,

    /// Reader-side failure outside a tag exchange
    #[error("driver error: {0}")]
    Driver(String),

    /// Negative status returned by a driver transceive call.
    #[error("transport error: code {0}")]
    Transport(i32),

    /// Selection found no target
    #[error("no tag was found")]
    NoTag,

    /// Target vanished and could not be selected again
    #[error("tag was removed")]
    TagRemoved,

    /// ATQA is not the Ultralight one
    #[error("tag is not a MIFARE Ultralight card: atqa=({atqa0:#04x}, {atqa1:#04x})")]
    NotUltralight {
        /// First ATQA byte
        atqa0: u8,
        /// Second ATQA byte
        atqa1: u8,
    },

    /// GET_VERSION storage byte of an unsupported tag
    #[error("unknown tag version: {0:#04x}")]
    UnknownVersion(u8),

    /// PWD_AUTH rejected or unanswered
    #[error("password authentication failed")]
    AuthFailed,

    /// UID pages stayed read-only
    #[error("unable to unlock card: not a magic tag")]
    NotMagic,

    /// Buffer of the wrong size
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required size
        expected: usize,
        /// Size found
        actual: usize,
    },

    /// Malformed hex input
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Page beyond the end of the tag
    #[error("page {page:#04x} out of range (tag has {pages} pages)")]
    PageOutOfRange {
        /// Offending page
        page: usize,
        /// Page count of the tag
        pages: usize,
    },

    /// Malformed command line
    #[error("usage: {0}")]
    Usage(String),

    /// Dump file or terminal I/O
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors that originate from a single failed exchange with the
    /// tag, as opposed to protocol or operator errors.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Driver(_))
    }
}
