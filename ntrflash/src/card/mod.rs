//! Card transport abstraction.
//!
//! This module defines the seam between the protocol layer and whatever
//! actually drives the NDS cart bus. The protocol layer only ever needs a
//! narrow capability: send an 8-byte command frame, read back a response,
//! and walk the cart through the KEY1/KEY2 authentication phases.
//!
//! ```text
//! +---------------------------+     +---------------------------+
//! |      Protocol Layer       |     |      Protocol Layer       |
//! |  (jedec, cipher, secure)  |     |  (jedec, cipher, secure)  |
//! +-------------+-------------+     +-------------+-------------+
//!               |                                 |
//!               v                                 v
//! +-------------+-------------+     +-------------+-------------+
//! |       NtrCard Trait       |     |       NtrCard Trait       |
//! +-------------+-------------+     +-------------+-------------+
//!               |                                 |
//!               v                                 v
//! +-------------+-------------+     +-------------+-------------+
//! |     Hardware cart bus     |     |    EmuCart (in-memory)    |
//! +---------------------------+     +---------------------------+
//!        Console/firmware             Tests and the CLI
//! ```

pub mod emu;

use thiserror::Error;

/// Length of a cart command frame in bytes.
pub const FRAME_LEN: usize = 8;

/// Length of the Blowfish P-array + S-box material installed before KEY1.
pub const BLOWFISH_PS_LEN: usize = 0x1048;

/// Error type for card transport operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The transport does not support this operation. Callers may treat
    /// this as success-equivalent where the protocol allows it.
    #[error("operation not supported by this transport")]
    Unsupported,

    /// The cart bus rejected or failed the operation.
    #[error("card bus failure (errno {0})")]
    Bus(i32),
}

/// Authentication state of the cart bus.
///
/// A cart comes up `Raw`; the KEY1 and KEY2 handshake phases move it into
/// the corresponding states. There is no way back to `Raw` short of a
/// power cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    /// Pre-authentication state; plain commands only.
    #[default]
    Raw,
    /// KEY1 handshake completed.
    Key1,
    /// KEY2 handshake completed; authenticated streaming mode.
    Key2,
}

/// Narrow command-transport capability over one physical (or emulated) cart.
///
/// All operations are synchronous and must be issued in strict program
/// order: the flash chip behind the bus tracks unlock-sequence position and
/// write-in-progress state, so reordering or interleaving commands from two
/// callers corrupts it. `&mut self` receivers enforce exclusive access.
pub trait NtrCard {
    /// Send one 8-byte command frame and read `response.len()` bytes back.
    ///
    /// `timing` is the raw bus timing word for this command; each cart
    /// family has a fixed value that is part of its wire contract.
    fn send_command(
        &mut self,
        frame: &[u8; FRAME_LEN],
        response: &mut [u8],
        timing: u32,
    ) -> std::result::Result<(), TransportError>;

    /// Bring the transport to its initial state.
    ///
    /// Transports that cannot re-initialize return
    /// [`TransportError::Unsupported`]; the secure-session layer treats
    /// that as non-fatal.
    fn init(&mut self) -> std::result::Result<(), TransportError>;

    /// Current authentication state of the bus.
    fn state(&self) -> CardState;

    /// Configure the KEY1 bus timing word.
    fn set_key1_timing(&mut self, romcnt: u32);

    /// Configure the KEY2 bus timing word.
    fn set_key2_timing(&mut self, romcnt: u32);

    /// Configure the KEY2 seed byte.
    fn set_key2_seed(&mut self, seed: u8);

    /// Install Blowfish key material for the KEY1 handshake.
    ///
    /// `is_dev` selects the development-unit key schedule.
    fn set_blowfish_state(&mut self, secret: &[u8], is_dev: bool);

    /// Run the KEY1 handshake phase.
    fn begin_key1(&mut self) -> std::result::Result<(), TransportError>;

    /// Run the KEY2 handshake phase.
    fn begin_key2(&mut self) -> std::result::Result<(), TransportError>;
}
