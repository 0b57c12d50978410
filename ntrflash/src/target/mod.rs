//! Cart driver abstraction.
//!
//! Each supported cart family implements the [`Flashcart`] trait;
//! [`CartFamily`] is the explicit registry mapping a cart identity to a
//! driver instance, built at process start instead of relying on
//! static-initialization tricks.

pub mod jedec;
pub mod r4isdhc;

use crate::card::NtrCard;
use crate::error::{Error, Result};
use crate::protocol::secure::KeyCandidate;
use std::fmt;

pub use jedec::{JedecCart, JedecProfile};
pub use r4isdhc::R4iSdhcHk;

/// Progress sink: `(label, current, total)`.
pub type ProgressSink<'a> = dyn FnMut(&str, usize, usize) + 'a;

/// Erase strategy used by [`Flashcart::write_flash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EraseMode {
    /// Erase exactly the aligned blocks covering the write range;
    /// partial edge blocks are read first and re-programmed, so bytes
    /// outside the range survive.
    #[default]
    Covering,
    /// The stock updater's recipe: a fixed device-specific erase span at
    /// the write offset, preserving nothing. Kept for bit-compatibility;
    /// known to destroy data outside the write range.
    Legacy,
}

/// Driver surface exposed to the device registry.
///
/// `initialize` must succeed before any flash operation; a failed
/// initialization retains no partial state. Operations are synchronous,
/// strictly ordered, and must not be interleaved across callers (the
/// `&mut self` receivers enforce this within one process).
pub trait Flashcart {
    /// Marketed cart name.
    fn name(&self) -> &'static str;

    /// Short support notes.
    fn description(&self) -> &'static str;

    /// Flash capacity in bytes.
    fn capacity(&self) -> u32;

    /// Identify the cart and bring it to a programmable state.
    fn initialize(&mut self) -> Result<()>;

    /// End the programming session; session state is discarded.
    fn shutdown(&mut self) -> Result<()>;

    /// Read `length` raw flash bytes starting at `address`.
    fn read_flash(
        &mut self,
        address: u32,
        length: u32,
        progress: &mut ProgressSink<'_>,
    ) -> Result<Vec<u8>>;

    /// Erase and program `data` at `address`.
    fn write_flash(
        &mut self,
        address: u32,
        data: &[u8],
        erase: EraseMode,
        progress: &mut ProgressSink<'_>,
    ) -> Result<()>;

    /// Install an ntrboot payload: key blob plus firmware image.
    fn inject_ntrboot(
        &mut self,
        key: &[u8],
        firmware: &[u8],
        progress: &mut ProgressSink<'_>,
    ) -> Result<()>;
}

/// Supported cart families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartFamily {
    /// DSONE SDHC.
    Dsone,
    /// DSONEi SDHC.
    Dsonei,
    /// R4i SDHC Dual-Core (r4isdhc.hk) and compatibles.
    R4isdhcHk,
}

impl CartFamily {
    /// Every supported family, in registry order.
    pub const ALL: [Self; 3] = [Self::Dsone, Self::Dsonei, Self::R4isdhcHk];

    /// Get the cart family from a string name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dsone" => Some(Self::Dsone),
            "dsonei" => Some(Self::Dsonei),
            "r4isdhc-hk" | "r4isdhchk" | "r4isdhc.hk" => Some(Self::R4isdhcHk),
            _ => None,
        }
    }

    /// Flash capacity of this family in bytes.
    pub fn capacity(&self) -> u32 {
        match self {
            Self::Dsone => jedec::DSONE.capacity,
            Self::Dsonei => jedec::DSONEI.capacity,
            Self::R4isdhcHk => r4isdhc::CAPACITY,
        }
    }

    /// Create a driver instance for this family over `card`.
    ///
    /// `keys` is only consumed by families with a secure-session
    /// handshake; JEDEC carts ignore it.
    pub fn create_driver<C: NtrCard + 'static>(
        self,
        card: C,
        keys: Vec<KeyCandidate>,
    ) -> Box<dyn Flashcart> {
        match self {
            Self::Dsone => Box::new(JedecCart::new(jedec::DSONE, card)),
            Self::Dsonei => Box::new(JedecCart::new(jedec::DSONEI, card)),
            Self::R4isdhcHk => Box::new(R4iSdhcHk::new(card, keys)),
        }
    }
}

impl fmt::Display for CartFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dsone => write!(f, "DSONE"),
            Self::Dsonei => write!(f, "DSONEi"),
            Self::R4isdhcHk => write!(f, "R4i SDHC Dual-Core"),
        }
    }
}

/// Reject ranges that fall outside the device capacity.
pub(crate) fn check_range(address: u32, length: u32, capacity: u32) -> Result<()> {
    let end = u64::from(address) + u64::from(length);
    if end > u64::from(capacity) {
        return Err(Error::OutOfRange {
            address,
            length,
            capacity,
        });
    }
    Ok(())
}

/// No-op progress sink.
#[cfg(test)]
pub(crate) fn quiet() -> impl FnMut(&str, usize, usize) {
    |_, _, _| {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_from_name() {
        assert_eq!(CartFamily::from_name("dsone"), Some(CartFamily::Dsone));
        assert_eq!(CartFamily::from_name("DSONEi"), Some(CartFamily::Dsonei));
        assert_eq!(
            CartFamily::from_name("r4isdhc.hk"),
            Some(CartFamily::R4isdhcHk)
        );
        assert_eq!(CartFamily::from_name("unknown"), None);
    }

    #[test]
    fn family_capacities() {
        assert_eq!(CartFamily::Dsone.capacity(), 0x8_0000);
        assert_eq!(CartFamily::Dsonei.capacity(), 0x40_0000);
        assert_eq!(CartFamily::R4isdhcHk.capacity(), 0x20_0000);
    }

    #[test]
    fn range_check_rejects_overflowing_ranges() {
        assert!(check_range(0, 0x100, 0x100).is_ok());
        assert!(check_range(0x80, 0x81, 0x100).is_err());
        assert!(check_range(u32::MAX, 2, u32::MAX).is_err());
    }
}
