//! Error types for ntrflash.

use crate::card::TransportError;
use std::io;
use thiserror::Error;

/// Result type for ntrflash operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ntrflash operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (image file operations).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Card transport error.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Flash chip id is not on the driver's allow-list.
    #[error("Unsupported flash chip: {id:#06x}")]
    UnsupportedChip {
        /// Chip identity as returned by the unlock-and-read-ID sequence.
        id: u32,
    },

    /// Cart software revision is not in the known set.
    #[error("Unsupported software revision: {revision:#010x}")]
    UnsupportedRevision {
        /// Raw 32-bit revision value read from the cart.
        revision: u32,
    },

    /// Every key candidate failed the secure-session handshake.
    #[error("Secure session failed: all {attempts} key candidates exhausted")]
    SecureInitFailed {
        /// Number of candidates tried.
        attempts: usize,
    },

    /// A polling loop exhausted its attempt budget.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Payload does not fit the device's firmware region.
    #[error("Payload too large: {size} bytes, {available} available")]
    PayloadTooLarge {
        /// Payload size in bytes.
        size: usize,
        /// Space available for it on this device.
        available: usize,
    },

    /// Recognized but disabled command dialect or operation.
    #[error("Unimplemented: {0}")]
    Unimplemented(String),

    /// Address range falls outside the device capacity.
    #[error("Range {address:#x}+{length:#x} exceeds capacity {capacity:#x}")]
    OutOfRange {
        /// Start address of the rejected range.
        address: u32,
        /// Length of the rejected range.
        length: u32,
        /// Device capacity in bytes.
        capacity: u32,
    },

    /// Malformed payload or key blob.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Operation issued before a successful `initialize`.
    #[error("Device not initialized")]
    NotInitialized,

    /// Operation aborted by the embedding application.
    #[error("Interrupted")]
    Interrupted,
}
