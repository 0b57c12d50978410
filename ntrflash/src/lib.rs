//! # ntrflash
//!
//! A library for programming the flash memory of NDS flashcarts.
//!
//! This crate provides the hardware-programming protocol layer shared by
//! the supported cart drivers:
//!
//! - 8-byte command frame construction per cart dialect
//! - JEDEC unlock/identify/erase/program sequences with bounded polling
//! - The per-byte wire cipher used by auto-encrypting carts
//! - KEY1/KEY2 secure-session establishment over ordered key candidates
//! - ntrboot payload injection via chunked read-modify-write
//!
//! ## Supported carts
//!
//! - DSONE SDHC
//! - DSONEi SDHC (experimental)
//! - R4i SDHC Dual-Core (r4isdhc.hk) and compatibles
//!
//! The physical cart bus is abstracted behind the [`NtrCard`] trait; an
//! in-memory [`EmuCart`](card::emu::EmuCart) implementation backs the
//! test suite and the CLI's image-file mode.
//!
//! ## Example
//!
//! ```rust
//! use ntrflash::card::emu::{EmuCart, EmuConfig};
//! use ntrflash::{CartFamily, EraseMode, Flashcart};
//!
//! fn main() -> ntrflash::Result<()> {
//!     // Emulated DSONE cart; a real transport implements NtrCard.
//!     let card = EmuCart::new(EmuConfig::jedec(0x8_0000, 0xD7BF, 0x1000));
//!     let mut cart = CartFamily::Dsone.create_driver(card, Vec::new());
//!
//!     cart.initialize()?;
//!     cart.write_flash(0x2000, b"hello", EraseMode::Covering, &mut |_, _, _| {})?;
//!     let back = cart.read_flash(0x2000, 5, &mut |_, _, _| {})?;
//!     assert_eq!(&back, b"hello");
//!     cart.shutdown()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::sync::{Arc, OnceLock};

pub mod card;
pub mod error;
pub mod protocol;
pub mod target;

static INTERRUPT_CHECKER: OnceLock<Arc<dyn Fn() -> bool + Send + Sync>> = OnceLock::new();

/// Register a global interruption checker used by long-running library loops.
///
/// The checker should return `true` when the current operation should stop
/// (for example after receiving Ctrl-C in CLI applications). Interrupted
/// operations surface [`Error::Interrupted`] and leave the flash in an
/// indeterminate state, like any other aborted erase/program.
pub fn set_interrupt_checker<F>(checker: F)
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    let _ = INTERRUPT_CHECKER.set(Arc::new(checker));
}

/// Returns whether interruption was requested by the embedding application.
#[must_use]
pub fn is_interrupt_requested() -> bool {
    INTERRUPT_CHECKER
        .get()
        .is_some_and(|checker| checker())
}

// Thread-local so one test toggling the flag cannot abort polling loops
// running on other test threads.
#[cfg(test)]
pub(crate) fn test_set_interrupted(value: bool) {
    use std::cell::Cell;

    thread_local! {
        static TEST_INTERRUPT_FLAG: Cell<bool> = const { Cell::new(false) };
    }

    static REGISTER: OnceLock<()> = OnceLock::new();
    REGISTER.get_or_init(|| {
        set_interrupt_checker(|| TEST_INTERRUPT_FLAG.with(Cell::get));
    });

    TEST_INTERRUPT_FLAG.with(|flag| flag.set(value));
}

// Re-exports for convenience
pub use {
    card::{CardState, NtrCard, TransportError},
    error::{Error, Result},
    protocol::{
        CommandFrame, Dialect, KeyCandidate, KeyKind, PollPolicy,
        cipher::{decrypt_byte, encrypt_byte},
    },
    target::{CartFamily, EraseMode, Flashcart, JedecCart, JedecProfile, R4iSdhcHk},
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_checker_default_false() {
        test_set_interrupted(false);
        assert!(!is_interrupt_requested());
    }

    #[test]
    fn test_interrupt_checker_toggle_true_false() {
        test_set_interrupted(true);
        assert!(is_interrupt_requested());

        test_set_interrupted(false);
        assert!(!is_interrupt_requested());
    }
}
