//! Driver for the R4i SDHC Dual-Core cart family.
//!
//! These carts only accept programming commands over an authenticated
//! KEY1/KEY2 session, and scramble flash contents on the wire: the read
//! command decrypts raw bytes before returning them, and the write
//! command encrypts whatever the host sends. Raw contents are therefore
//! recovered by *encrypting* read responses, and stored by *decrypting*
//! outgoing bytes; see [`crate::protocol::cipher`].
//!
//! The flash layout and the read command shape depend on the cart's
//! software revision, read during initialization and gated against the
//! known set.

mod header;

pub use header::STOCK_HEADER_506;

use crate::card::{BLOWFISH_PS_LEN, NtrCard};
use crate::error::{Error, Result};
use crate::protocol::cipher;
use crate::protocol::frame::CommandFrame;
use crate::protocol::poll::{self, PollPolicy};
use crate::protocol::secure::{self, KeyCandidate, KeyKind};
use crate::target::{EraseMode, Flashcart, ProgressSink, check_range};
use byteorder::{ByteOrder, LittleEndian};
use log::{debug, error, info, trace};

/// Flash capacity of this family in bytes.
pub const CAPACITY: u32 = 0x20_0000;

/// Bus timing word used for every command.
const BUS_TIMING: u32 = 80;

/// Bytes returned by one read command.
const PAGE: usize = 0x200;

/// Erase-block granularity.
const BLOCK: u32 = 0x1_0000;

/// Flash offset of the firmware body.
const FIRM_BASE: u32 = 0x3_0000;

/// Firmware header length, split off and stored separately.
const FIRM_HEADER_LEN: usize = 0x200;

/// In-chunk offset of the firmware header inside the key chunk.
const FIRM_HEADER_OFFSET: usize = 0x55A8;

const CMD_UNK_D0AA: CommandFrame = CommandFrame::raw([0xD0, 0xAA, 0, 0, 0, 0, 0, 0]);

fn cmd_sw_rev() -> CommandFrame {
    CommandFrame::from_opcode(0xC5)
}

fn cmd_chip_id() -> CommandFrame {
    CommandFrame::from_opcode(0xD0)
}

fn cmd_wait_busy() -> CommandFrame {
    CommandFrame::from_opcode(0xC0)
}

/// Unique-key window read; the response is only stable once the session
/// has settled.
fn cmd_unique_key() -> CommandFrame {
    CommandFrame::banked(0xB7, 0x00, 0, 0x15)
}

fn cmd_erase(addr: u32) -> CommandFrame {
    CommandFrame::addr24(0xD4, addr, 0x00, 0x01)
}

fn cmd_write_byte(addr: u32, value: u8) -> CommandFrame {
    CommandFrame::addr24(0xD4, addr, value, 0x03)
}

/// Known software revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    /// Revision 6.05: banked reads, no stock header rewrite.
    V605,
    /// Revision 7.00.
    V700,
    /// Revision 7.07.
    V707,
}

impl Revision {
    /// Map a raw revision word to a known revision.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x0000_0605 => Some(Self::V605),
            0x0000_0007 => Some(Self::V700),
            0x0000_0707 => Some(Self::V707),
            _ => None,
        }
    }

    /// Whether injection rewrites the stock 5.06 header first.
    fn installs_stock_header(self) -> bool {
        matches!(self, Self::V700 | Self::V707)
    }

    /// The read command for `addr` under this revision.
    fn read_command(self, addr: u32) -> CommandFrame {
        match self {
            // 6.05 firmware exposes flash through a banked window.
            Self::V605 => CommandFrame::banked(0xB7, 0x01, addr + 0x61_0000, 0x00),
            Self::V700 | Self::V707 => CommandFrame::banked(0xB7, 0x00, addr, 0x22),
        }
    }
}

/// Driver for R4i SDHC Dual-Core carts (r4isdhc.hk, r4igold.cc, r4itt.net).
pub struct R4iSdhcHk<C: NtrCard> {
    card: C,
    candidates: Vec<KeyCandidate>,
    poll: PollPolicy,
    revision: Option<Revision>,
    session_key: Option<KeyKind>,
}

impl<C: NtrCard> R4iSdhcHk<C> {
    /// Create a driver over an opened card transport.
    ///
    /// `candidates` is the ordered Blowfish key material tried during
    /// session establishment; see [`KeyCandidate::standard_order`].
    pub fn new(card: C, candidates: Vec<KeyCandidate>) -> Self {
        Self {
            card,
            candidates,
            poll: PollPolicy::default(),
            revision: None,
            session_key: None,
        }
    }

    /// Override the polling budget for busy-wait and stabilization loops.
    #[must_use]
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Get a reference to the underlying card.
    pub fn card(&self) -> &C {
        &self.card
    }

    /// Get a mutable reference to the underlying card.
    pub fn card_mut(&mut self) -> &mut C {
        &mut self.card
    }

    /// Consume the driver and return the underlying card.
    pub fn into_card(self) -> C {
        self.card
    }

    /// Software revision resolved during initialization.
    pub fn revision(&self) -> Option<Revision> {
        self.revision
    }

    /// Key that established the current session.
    pub fn session_key(&self) -> Option<KeyKind> {
        self.session_key
    }

    fn send(&mut self, frame: &CommandFrame, response: &mut [u8]) -> Result<()> {
        self.card
            .send_command(frame.bytes(), response, BUS_TIMING)?;
        Ok(())
    }

    /// Wait for the unique-key window to return two identical responses
    /// in a row. Right after session start the cart returns transient
    /// garbage; reads are unreliable until this settles.
    fn settle_unique_key(&mut self) -> Result<()> {
        let poll = self.poll;
        poll::poll_until(poll, "unique-key stabilization", || {
            let mut first = [0u8; PAGE];
            let mut second = [0u8; PAGE];
            self.send(&cmd_unique_key(), &mut first)?;
            self.send(&cmd_unique_key(), &mut second)?;
            trace!(
                "settle: {:#010x} / {:#010x}",
                LittleEndian::read_u32(&first),
                LittleEndian::read_u32(&second)
            );
            Ok((first == second).then_some(()))
        })
    }

    fn read_revision(&mut self) -> Result<u32> {
        let mut resp = [0u8; 4];
        self.send(&cmd_sw_rev(), &mut resp)?;
        Ok(LittleEndian::read_u32(&resp))
    }

    fn wait_flash_busy(&mut self) -> Result<()> {
        let poll = self.poll;
        poll::poll_until(poll, "flash busy", || {
            let mut resp = [0u8; 4];
            self.send(&cmd_wait_busy(), &mut resp)?;
            Ok((LittleEndian::read_u32(&resp) == 0).then_some(()))
        })
    }

    fn erase_cmd(&mut self, addr: u32) -> Result<()> {
        debug!("r4isdhc.hk: erase({addr:#010x})");
        self.send(&cmd_erase(addr), &mut [])?;
        self.wait_flash_busy()
    }

    fn write_cmd(&mut self, addr: u32, value: u8) -> Result<()> {
        trace!("r4isdhc.hk: write({addr:#010x}) = {value:#04x}");
        self.send(&cmd_write_byte(addr, value), &mut [])?;
        self.wait_flash_busy()
    }

    fn require_revision(&self) -> Result<Revision> {
        self.revision.ok_or(Error::NotInitialized)
    }

    /// Read the covering chunk, splice `src` at `offset` (through the
    /// wire cipher when `scrambled`), and write the chunk back.
    fn inject_chunk(
        &mut self,
        chunk_addr: u32,
        chunk_len: u32,
        offset: usize,
        src: &[u8],
        scrambled: bool,
        progress: &mut ProgressSink<'_>,
    ) -> Result<()> {
        debug!(
            "r4isdhc.hk: patching {:#x} bytes at {chunk_addr:#010x}+{offset:#x}",
            src.len()
        );
        let mut chunk = self.read_flash(chunk_addr, chunk_len, progress)?;
        if scrambled {
            cipher::encrypt_into(&mut chunk[offset..offset + src.len()], src);
        } else {
            chunk[offset..offset + src.len()].copy_from_slice(src);
        }
        self.write_flash(chunk_addr, &chunk, EraseMode::Covering, progress)
    }
}

impl<C: NtrCard> Flashcart for R4iSdhcHk<C> {
    fn name(&self) -> &'static str {
        "R4i SDHC Dual-Core"
    }

    fn description(&self) -> &'static str {
        "Works with several carts similar to the r4isdhc.hk:\n\
         * R4i SDHC Dual-Core (r4isdhc.hk)\n\
         * R4i Gold (r4igold.cc)\n\
         * R4iTT 3DS (r4itt.net)"
    }

    fn capacity(&self) -> u32 {
        CAPACITY
    }

    fn initialize(&mut self) -> Result<()> {
        info!("r4isdhc.hk: init");

        match secure::establish(&mut self.card, &self.candidates) {
            Ok(kind) => self.session_key = Some(kind),
            Err(e) => {
                error!("r4isdhc.hk: secure init failed!");
                return Err(e);
            }
        }

        self.settle_unique_key()?;

        let raw = self.read_revision()?;
        info!("r4isdhc.hk: current software revision: {raw:08x}");

        // The stock updater pokes these before trusting reads; their
        // responses are not interpreted.
        self.send(&CMD_UNK_D0AA, &mut [0u8; 4])?;
        self.send(&CMD_UNK_D0AA, &mut [0u8; 4])?;
        self.send(&cmd_chip_id(), &mut [])?;
        self.send(&CMD_UNK_D0AA, &mut [0u8; 4])?;

        self.settle_unique_key()?;

        match Revision::from_raw(raw) {
            Some(revision) => {
                self.revision = Some(revision);
                Ok(())
            }
            None => {
                if raw == 0x0000_0505 {
                    error!("r4isdhc.hk: anything below 0x00000605 is not supported");
                } else {
                    error!("r4isdhc.hk: {raw:#010x} is not a recognized revision");
                }
                Err(Error::UnsupportedRevision { revision: raw })
            }
        }
    }

    fn shutdown(&mut self) -> Result<()> {
        info!("r4isdhc.hk: shutdown");
        self.revision = None;
        self.session_key = None;
        Ok(())
    }

    fn read_flash(
        &mut self,
        address: u32,
        length: u32,
        progress: &mut ProgressSink<'_>,
    ) -> Result<Vec<u8>> {
        info!("r4isdhc.hk: read_flash(addr={address:#010x}, size={length:#x})");
        check_range(address, length, CAPACITY)?;
        let revision = self.require_revision()?;

        let mut buffer = Vec::with_capacity(length as usize);
        let mut offset = 0u32;
        while offset < length {
            if crate::is_interrupt_requested() {
                return Err(Error::Interrupted);
            }
            let mut page = [0u8; PAGE];
            self.send(&revision.read_command(address + offset), &mut page)?;
            // The cart decrypted the raw bytes on the way out; encrypt
            // the response to get them back.
            cipher::encrypt_in_place(&mut page);
            let take = ((length - offset) as usize).min(PAGE);
            buffer.extend_from_slice(&page[..take]);
            offset += PAGE as u32;
            progress("Reading", buffer.len(), length as usize);
        }
        Ok(buffer)
    }

    fn write_flash(
        &mut self,
        address: u32,
        data: &[u8],
        erase: EraseMode,
        progress: &mut ProgressSink<'_>,
    ) -> Result<()> {
        info!(
            "r4isdhc.hk: write_flash(addr={address:#010x}, size={:#x})",
            data.len()
        );
        check_range(address, data.len() as u32, CAPACITY)?;
        self.require_revision()?;

        let (start, span) = match erase {
            EraseMode::Covering => {
                let len = data.len() as u32;
                let start = address - address % BLOCK;
                let end = (address + len).div_ceil(BLOCK) * BLOCK;
                let span = if start == address && end == address + len {
                    data.to_vec()
                } else {
                    let mut span = self.read_flash(start, end - start, progress)?;
                    let offset = (address - start) as usize;
                    span[offset..offset + data.len()].copy_from_slice(data);
                    span
                };
                (start, span)
            }
            // The stock updater erases the covering 64 KiB steps in
            // place and preserves nothing around the write.
            EraseMode::Legacy => (address, data.to_vec()),
        };

        let mut erased = 0u32;
        while erased < span.len() as u32 {
            progress("Erasing", erased as usize, span.len());
            self.erase_cmd(start + erased)?;
            erased += BLOCK;
        }

        for (i, byte) in span.iter().enumerate() {
            if crate::is_interrupt_requested() {
                return Err(Error::Interrupted);
            }
            // The write command encrypts inbound bytes, so pre-decrypt.
            self.write_cmd(start + i as u32, cipher::decrypt_byte(*byte))?;
            progress("Writing", i + 1, span.len());
        }
        Ok(())
    }

    fn inject_ntrboot(
        &mut self,
        key: &[u8],
        firmware: &[u8],
        progress: &mut ProgressSink<'_>,
    ) -> Result<()> {
        info!("r4isdhc.hk: injecting ntrboot");
        let revision = self.require_revision()?;

        if key.len() != BLOWFISH_PS_LEN {
            return Err(Error::InvalidImage(format!(
                "key blob must be {BLOWFISH_PS_LEN:#x} bytes, got {:#x}",
                key.len()
            )));
        }
        if firmware.len() < FIRM_HEADER_LEN {
            return Err(Error::InvalidImage(
                "firmware shorter than its header".into(),
            ));
        }
        let available = (CAPACITY - FIRM_BASE) as usize;
        if firmware.len() > available {
            return Err(Error::PayloadTooLarge {
                size: firmware.len(),
                available,
            });
        }

        if revision.installs_stock_header() {
            info!("r4isdhc.hk: write firmware header (revision 5.06)");
            self.inject_chunk(0, BLOCK, 0, &STOCK_HEADER_506, false, progress)?;
        }

        self.inject_chunk(BLOCK, BLOCK, 0, key, true, progress)?;
        self.inject_chunk(
            BLOCK,
            BLOCK,
            FIRM_HEADER_OFFSET,
            &firmware[..FIRM_HEADER_LEN],
            true,
            progress,
        )?;

        let body = &firmware[FIRM_HEADER_LEN..];
        if !body.is_empty() {
            let span = (body.len() as u32).div_ceil(BLOCK) * BLOCK;
            self.inject_chunk(FIRM_BASE, span, 0, body, true, progress)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::emu::{EmuCart, EmuConfig};
    use crate::error::Error;
    use crate::target::quiet;

    fn unkeyed_candidates() -> Vec<KeyCandidate> {
        vec![
            KeyCandidate::unkeyed(KeyKind::Retail),
            KeyCandidate::unkeyed(KeyKind::BootromRetail),
            KeyCandidate::unkeyed(KeyKind::BootromDev),
        ]
    }

    fn initialized(revision: u32) -> R4iSdhcHk<EmuCart> {
        let card = EmuCart::new(EmuConfig::r4(revision));
        let mut cart = R4iSdhcHk::new(card, unkeyed_candidates());
        cart.initialize().unwrap();
        cart
    }

    #[test]
    fn last_candidate_wins_after_two_failures() {
        let good = vec![0x5Au8; 0x10];
        let mut config = EmuConfig::r4(0x707);
        config.accept_secret = Some(good.clone());
        let card = EmuCart::new(config);

        let candidates = vec![
            KeyCandidate::new(KeyKind::Retail, vec![0x01; 0x10]),
            KeyCandidate::new(KeyKind::BootromRetail, vec![0x02; 0x10]),
            KeyCandidate::new(KeyKind::BootromDev, good),
        ];
        let mut cart = R4iSdhcHk::new(card, candidates);
        cart.initialize().unwrap();

        assert_eq!(cart.session_key(), Some(KeyKind::BootromDev));
        // One handshake and one transport init per candidate, none after
        // the success.
        assert_eq!(cart.card().key1_attempts(), 3);
        assert_eq!(cart.card().init_calls(), 3);
    }

    #[test]
    fn all_candidates_failing_is_secure_init_failed() {
        let mut config = EmuConfig::r4(0x707);
        config.accept_secret = Some(vec![0x5A; 0x10]);
        let card = EmuCart::new(config);

        let candidates = vec![
            KeyCandidate::new(KeyKind::Retail, vec![0x01; 0x10]),
            KeyCandidate::new(KeyKind::BootromRetail, vec![0x02; 0x10]),
            KeyCandidate::new(KeyKind::BootromDev, vec![0x03; 0x10]),
        ];
        let mut cart = R4iSdhcHk::new(card, candidates);
        match cart.initialize() {
            Err(Error::SecureInitFailed { attempts }) => assert_eq!(attempts, 3),
            other => panic!("expected SecureInitFailed, got {other:?}"),
        }
        assert_eq!(cart.card().key1_attempts(), 3);
    }

    #[test]
    fn unsupported_transport_init_is_not_fatal() {
        let mut config = EmuConfig::r4(0x707);
        config.init_unsupported = true;
        let card = EmuCart::new(config);
        let mut cart = R4iSdhcHk::new(card, unkeyed_candidates());
        cart.initialize().unwrap();
        assert_eq!(cart.revision(), Some(Revision::V707));
    }

    #[test]
    fn revision_505_is_rejected() {
        let card = EmuCart::new(EmuConfig::r4(0x505));
        let mut cart = R4iSdhcHk::new(card, unkeyed_candidates());
        match cart.initialize() {
            Err(Error::UnsupportedRevision { revision }) => assert_eq!(revision, 0x505),
            other => panic!("expected UnsupportedRevision, got {other:?}"),
        }
        assert!(matches!(
            cart.read_flash(0, 0x200, &mut quiet()),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn unknown_revision_is_rejected() {
        let card = EmuCart::new(EmuConfig::r4(0xDEAD));
        let mut cart = R4iSdhcHk::new(card, unkeyed_candidates());
        assert!(matches!(
            cart.initialize(),
            Err(Error::UnsupportedRevision { revision: 0xDEAD })
        ));
    }

    #[test]
    fn never_settling_cart_times_out() {
        let mut config = EmuConfig::r4(0x707);
        config.settle_reads = u32::MAX;
        let card = EmuCart::new(config);
        let mut cart =
            R4iSdhcHk::new(card, unkeyed_candidates()).with_poll_policy(PollPolicy::new(8));
        assert!(matches!(cart.initialize(), Err(Error::Timeout(_))));
    }

    #[test]
    fn write_then_read_round_trips_through_cipher() {
        let mut cart = initialized(0x707);
        let data: Vec<u8> = (0..0x400u32).map(|i| (i % 253) as u8).collect();
        cart.write_flash(0x1_0000, &data, EraseMode::Covering, &mut quiet())
            .unwrap();
        let back = cart.read_flash(0x1_0000, 0x400, &mut quiet()).unwrap();
        assert_eq!(back, data);
        // Raw array holds the same bytes: the cart re-encrypts what the
        // host pre-decrypted.
        assert_eq!(&cart.card().memory()[0x1_0000..0x1_0400], &data[..]);
    }

    #[test]
    fn banked_reads_work_on_revision_605() {
        let mut cart = initialized(0x605);
        let data: Vec<u8> = (0..0x200u32).map(|i| (i % 89) as u8).collect();
        cart.write_flash(0x4_0000, &data, EraseMode::Covering, &mut quiet())
            .unwrap();
        let back = cart.read_flash(0x4_0000, 0x200, &mut quiet()).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn inject_patches_only_documented_ranges() {
        let mut cart = initialized(0x707);
        let seed: Vec<u8> = (0..CAPACITY).map(|i| (i % 239) as u8).collect();
        cart.card_mut().memory_mut().copy_from_slice(&seed);

        let key: Vec<u8> = (0..BLOWFISH_PS_LEN).map(|i| (i % 11) as u8).collect();
        let firmware: Vec<u8> = (0..0x300u32).map(|i| (i % 17) as u8).collect();
        cart.inject_ntrboot(&key, &firmware, &mut quiet()).unwrap();

        let image = cart.card().memory();

        // Stock header, plain.
        assert_eq!(&image[..0x984], &STOCK_HEADER_506[..]);
        // Key blob and firmware header, cipher-mapped.
        for (i, b) in key.iter().enumerate() {
            assert_eq!(image[0x1_0000 + i], cipher::encrypt_byte(*b));
        }
        for (i, b) in firmware[..0x200].iter().enumerate() {
            assert_eq!(image[0x1_0000 + 0x55A8 + i], cipher::encrypt_byte(*b));
        }
        // Firmware body, cipher-mapped.
        for (i, b) in firmware[0x200..].iter().enumerate() {
            assert_eq!(image[0x3_0000 + i], cipher::encrypt_byte(*b));
        }

        // Everything outside the documented sub-ranges is untouched.
        assert_eq!(&image[0x984..0x1_0000], &seed[0x984..0x1_0000]);
        assert_eq!(&image[0x1_1048..0x1_55A8], &seed[0x1_1048..0x1_55A8]);
        assert_eq!(&image[0x1_57A8..0x3_0000], &seed[0x1_57A8..0x3_0000]);
        assert_eq!(&image[0x3_0100..], &seed[0x3_0100..]);
    }

    #[test]
    fn revision_605_skips_stock_header() {
        let mut cart = initialized(0x605);
        let seed: Vec<u8> = (0..CAPACITY).map(|i| (i % 239) as u8).collect();
        cart.card_mut().memory_mut().copy_from_slice(&seed);

        let key = vec![0x22u8; BLOWFISH_PS_LEN];
        let firmware = vec![0x33u8; 0x280];
        cart.inject_ntrboot(&key, &firmware, &mut quiet()).unwrap();

        assert_eq!(&cart.card().memory()[..0x984], &seed[..0x984]);
    }

    #[test]
    fn oversized_firmware_writes_nothing() {
        let mut cart = initialized(0x707);
        let calls_before = cart.card().send_calls();

        let key = vec![0u8; BLOWFISH_PS_LEN];
        let firmware = vec![0u8; (CAPACITY - FIRM_BASE) as usize + 1];
        match cart.inject_ntrboot(&key, &firmware, &mut quiet()) {
            Err(Error::PayloadTooLarge { size, available }) => {
                assert_eq!(size, firmware.len());
                assert_eq!(available, (CAPACITY - FIRM_BASE) as usize);
            }
            other => panic!("expected PayloadTooLarge, got {other:?}"),
        }
        assert_eq!(cart.card().send_calls(), calls_before);
    }

    #[test]
    fn hung_flash_surfaces_as_timeout() {
        let mut config = EmuConfig::r4(0x707);
        config.busy_polls = u32::MAX;
        let card = EmuCart::new(config);
        let mut cart =
            R4iSdhcHk::new(card, unkeyed_candidates()).with_poll_policy(PollPolicy::new(8));
        cart.initialize().unwrap();
        let result = cart.write_flash(0, &[0x42], EraseMode::Covering, &mut quiet());
        assert!(matches!(result, Err(Error::Timeout(_))));
    }
}
