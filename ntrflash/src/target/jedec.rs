//! Drivers for carts exposing a raw JEDEC flash bus.
//!
//! The DSONE and DSONEi carts pass flash write cycles straight through
//! the cart protocol, so one driver covers both; a [`JedecProfile`]
//! carries the per-cart capacity, allow-list, and erase geometry.

use crate::card::NtrCard;
use crate::error::{Error, Result};
use crate::protocol::jedec::{Dialect, JedecBus};
use crate::protocol::poll::PollPolicy;
use crate::target::{EraseMode, Flashcart, ProgressSink, check_range};
use log::{debug, info};

/// Chip id that selects the status-register word-write dialect.
const TYPE_B_CHIP: u16 = 0x9789;

/// Per-cart parameters for the JEDEC driver.
#[derive(Debug, Clone, Copy)]
pub struct JedecProfile {
    /// Marketed cart name.
    pub name: &'static str,
    /// Short support notes.
    pub description: &'static str,
    /// Flash capacity in bytes.
    pub capacity: u32,
    /// Supported chip ids (low 16 bits); `None` accepts any chip.
    pub allowed_ids: Option<&'static [u16]>,
    /// Smallest erasable block.
    pub erase_unit: u32,
    /// Block sequence the stock updater erases before a write.
    pub legacy_erase_blocks: &'static [u32],
}

/// DSONE SDHC: 512 KiB, SST39VF040, 4 KiB sector erase.
pub const DSONE: JedecProfile = JedecProfile {
    name: "DSONE",
    description: "Only works with DSONE SDHC (SST39VF040) for now.",
    capacity: 0x8_0000,
    allowed_ids: Some(&[0xD7BF]),
    erase_unit: 0x1000,
    legacy_erase_blocks: &[0x1000; 16],
};

/// DSONEi SDHC: 4 MiB, 64 KiB block erase, no chip allow-list.
pub const DSONEI: JedecProfile = JedecProfile {
    name: "DSONEi",
    description: "Experimental DSONEi support.",
    capacity: 0x40_0000,
    allowed_ids: None,
    erase_unit: 0x1_0000,
    legacy_erase_blocks: &[0x1_0000],
};

/// Driver for JEDEC-bus carts.
///
/// Generic over the card transport `C`, which must implement
/// [`NtrCard`]. The chip identity and command dialect are resolved once
/// in [`initialize`](Flashcart::initialize) and held for the session.
pub struct JedecCart<C: NtrCard> {
    card: C,
    profile: JedecProfile,
    poll: PollPolicy,
    dialect: Option<Dialect>,
}

impl<C: NtrCard> JedecCart<C> {
    /// Create a driver for `profile` over an opened card transport.
    pub fn new(profile: JedecProfile, card: C) -> Self {
        Self {
            card,
            profile,
            poll: PollPolicy::default(),
            dialect: None,
        }
    }

    /// Override the polling budget for erase/program verification.
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

    fn dialect(&self) -> Result<Dialect> {
        self.dialect.ok_or(Error::NotInitialized)
    }

    fn bus(&mut self) -> Result<JedecBus<'_, C>> {
        let dialect = self.dialect()?;
        Ok(JedecBus::new(&mut self.card, dialect, self.poll))
    }

    fn chip_supported(&self, id: u32) -> bool {
        match self.profile.allowed_ids {
            Some(ids) => ids.contains(&(id as u16)),
            None => true,
        }
    }

    /// Erase the aligned blocks covering `[address, address + len)` and
    /// program `span`, which must start at the aligned-down address.
    fn erase_and_program(
        &mut self,
        start: u32,
        span: &[u8],
        progress: &mut ProgressSink<'_>,
    ) -> Result<()> {
        let unit = self.profile.erase_unit;
        let mut bus = self.bus()?;

        let mut addr = start;
        let end = start + span.len() as u32;
        while addr < end {
            progress("Erasing blocks", (addr - start) as usize, span.len());
            bus.erase_block(addr, unit)?;
            addr += unit;
        }

        for (i, byte) in span.iter().enumerate() {
            if crate::is_interrupt_requested() {
                return Err(Error::Interrupted);
            }
            bus.program_byte(start + i as u32, *byte)?;
            progress("Writing", i + 1, span.len());
        }
        Ok(())
    }
}

impl<C: NtrCard> Flashcart for JedecCart<C> {
    fn name(&self) -> &'static str {
        self.profile.name
    }

    fn description(&self) -> &'static str {
        self.profile.description
    }

    fn capacity(&self) -> u32 {
        self.profile.capacity
    }

    fn initialize(&mut self) -> Result<()> {
        info!("{}: init", self.profile.name);

        // Identification runs with the default dialect; the reset that
        // ends it is the same for every chip we bring up.
        let poll = self.poll;
        let mut bus = JedecBus::new(&mut self.card, Dialect::default(), poll);
        bus.mode_enter()?;
        let id = bus.read_id()?;
        info!("{}: flash chip id = {:#06x}", self.profile.name, id);

        if !self.chip_supported(id) {
            return Err(Error::UnsupportedChip { id });
        }

        self.dialect = Some(if id as u16 == TYPE_B_CHIP {
            Dialect::TypeB
        } else {
            Dialect::TypeA
        });
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        debug!("{}: shutdown", self.profile.name);
        let poll = self.poll;
        let mut bus = JedecBus::new(&mut self.card, Dialect::default(), poll);
        bus.mode_exit()?;
        self.dialect = None;
        Ok(())
    }

    fn read_flash(
        &mut self,
        address: u32,
        length: u32,
        progress: &mut ProgressSink<'_>,
    ) -> Result<Vec<u8>> {
        info!(
            "{}: read_flash(addr={address:#010x}, size={length:#x})",
            self.profile.name
        );
        check_range(address, length, self.profile.capacity)?;
        let mut bus = self.bus()?;
        bus.reset()?;
        bus.read_words(address, length, progress)
    }

    fn write_flash(
        &mut self,
        address: u32,
        data: &[u8],
        erase: EraseMode,
        progress: &mut ProgressSink<'_>,
    ) -> Result<()> {
        info!(
            "{}: write_flash(addr={address:#010x}, size={:#x})",
            self.profile.name,
            data.len()
        );
        check_range(address, data.len() as u32, self.profile.capacity)?;

        match erase {
            EraseMode::Covering => {
                let unit = self.profile.erase_unit;
                let len = data.len() as u32;
                let start = address - address % unit;
                let end = (address + len).div_ceil(unit) * unit;

                let span = if start == address && end == address + len {
                    data.to_vec()
                } else {
                    // Partial edge blocks: preserve the bytes the erase
                    // would otherwise destroy.
                    let mut span = self.read_flash(start, end - start, progress)?;
                    let offset = (address - start) as usize;
                    span[offset..offset + data.len()].copy_from_slice(data);
                    span
                };
                self.erase_and_program(start, &span, progress)
            }
            EraseMode::Legacy => {
                let blocks = self.profile.legacy_erase_blocks;
                self.bus()?.erase_blocks(address, blocks, progress)?;
                let mut bus = self.bus()?;
                for (i, byte) in data.iter().enumerate() {
                    if crate::is_interrupt_requested() {
                        return Err(Error::Interrupted);
                    }
                    bus.program_byte(address + i as u32, *byte)?;
                    progress("Writing", i + 1, data.len());
                }
                Ok(())
            }
        }
    }

    fn inject_ntrboot(
        &mut self,
        key: &[u8],
        firmware: &[u8],
        progress: &mut ProgressSink<'_>,
    ) -> Result<()> {
        info!("{}: injecting ntrboot", self.profile.name);
        self.dialect()?;

        if key.len() != crate::card::BLOWFISH_PS_LEN {
            return Err(Error::InvalidImage(format!(
                "key blob must be {:#x} bytes, got {:#x}",
                crate::card::BLOWFISH_PS_LEN,
                key.len()
            )));
        }

        let available = (self.profile.capacity - FIRM_OFFSET) as usize;
        if firmware.len() > available {
            return Err(Error::PayloadTooLarge {
                size: firmware.len(),
                available,
            });
        }

        // The payload regions are scattered across the first blocks, so
        // the whole image is patched in one read-modify-write pass.
        let capacity = self.profile.capacity;
        let mut image = self.read_flash(0, capacity, progress)?;
        image[KEY_P_OFFSET..KEY_P_OFFSET + KEY_SPLIT].copy_from_slice(&key[..KEY_SPLIT]);
        image[KEY_S_OFFSET..KEY_S_OFFSET + (key.len() - KEY_SPLIT)]
            .copy_from_slice(&key[KEY_SPLIT..]);
        image[FIRM_OFFSET as usize..FIRM_OFFSET as usize + firmware.len()]
            .copy_from_slice(firmware);
        self.write_flash(0, &image, EraseMode::Covering, progress)
    }
}

/// P-array length; the key blob is split here across two regions.
const KEY_SPLIT: usize = 0x48;
/// Flash offset of the Blowfish P-array.
const KEY_P_OFFSET: usize = 0x1000;
/// Flash offset of the Blowfish S-boxes.
const KEY_S_OFFSET: usize = 0x2000;
/// Flash offset of the firmware image.
const FIRM_OFFSET: u32 = 0x7E00;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::emu::{EmuCart, EmuConfig};
    use crate::target::quiet;

    fn dsone_cart() -> JedecCart<EmuCart> {
        let card = EmuCart::new(EmuConfig::jedec(DSONE.capacity, 0xD7BF, DSONE.erase_unit));
        JedecCart::new(DSONE, card)
    }

    fn initialized() -> JedecCart<EmuCart> {
        let mut cart = dsone_cart();
        cart.initialize().unwrap();
        cart
    }

    #[test]
    fn initialize_accepts_listed_chip() {
        let mut cart = dsone_cart();
        cart.initialize().unwrap();
        assert_eq!(cart.dialect().unwrap(), Dialect::TypeA);
    }

    #[test]
    fn initialize_rejects_unlisted_chip() {
        let card = EmuCart::new(EmuConfig::jedec(DSONE.capacity, 0x1234, DSONE.erase_unit));
        let mut cart = JedecCart::new(DSONE, card);
        match cart.initialize() {
            Err(Error::UnsupportedChip { id }) => assert_eq!(id, 0x1234),
            other => panic!("expected UnsupportedChip, got {other:?}"),
        }
        // No dialect retained: the device stays unusable.
        assert!(matches!(
            cart.read_flash(0, 4, &mut quiet()),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn type_b_chip_is_recognized_but_disabled() {
        let card = EmuCart::new(EmuConfig::jedec(DSONEI.capacity, 0x9789, DSONEI.erase_unit));
        let mut cart = JedecCart::new(DSONEI, card);
        cart.initialize().unwrap();
        assert!(matches!(
            cart.write_flash(0, &[0u8; 4], EraseMode::Covering, &mut quiet()),
            Err(Error::Unimplemented(_))
        ));
    }

    #[test]
    fn erase_then_read_is_all_ones() {
        let mut cart = initialized();
        cart.card_mut().memory_mut()[..0x3000].fill(0x00);
        cart.bus().unwrap().erase_block(0x1000, 0x1000).unwrap();
        let data = cart.read_flash(0x1000, 0x1000, &mut quiet()).unwrap();
        assert!(data.iter().all(|b| *b == 0xFF));
        // The neighboring sectors were not touched.
        assert_eq!(cart.card().memory()[0x0FFF], 0x00);
        assert_eq!(cart.card().memory()[0x2000], 0x00);
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut cart = initialized();
        let data: Vec<u8> = (0..0x1000u32).map(|i| (i % 251) as u8).collect();
        cart.write_flash(0x2000, &data, EraseMode::Covering, &mut quiet())
            .unwrap();
        let back = cart.read_flash(0x2000, 0x1000, &mut quiet()).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn covering_write_preserves_unaligned_edges() {
        let mut cart = initialized();
        // Seed a recognizable pattern through flash-legal writes.
        let seed: Vec<u8> = (0..0x3000u32).map(|i| (i % 13) as u8).collect();
        cart.write_flash(0x1000, &seed, EraseMode::Covering, &mut quiet())
            .unwrap();

        // Overwrite a range that straddles two sectors mid-block.
        let patch = vec![0xA5u8; 0x800];
        cart.write_flash(0x1C00, &patch, EraseMode::Covering, &mut quiet())
            .unwrap();

        let image = cart.read_flash(0x1000, 0x3000, &mut quiet()).unwrap();
        assert_eq!(&image[0xC00..0x1400], &patch[..]);
        assert_eq!(&image[..0xC00], &seed[..0xC00]);
        assert_eq!(&image[0x1400..], &seed[0x1400..]);
    }

    #[test]
    fn write_out_of_range_is_rejected() {
        let mut cart = initialized();
        assert!(matches!(
            cart.write_flash(
                DSONE.capacity - 4,
                &[0u8; 8],
                EraseMode::Covering,
                &mut quiet()
            ),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn hung_chip_surfaces_as_timeout() {
        let mut config = EmuConfig::jedec(DSONE.capacity, 0xD7BF, DSONE.erase_unit);
        config.busy_polls = u32::MAX;
        let mut cart = JedecCart::new(DSONE, EmuCart::new(config)).with_poll_policy(PollPolicy::new(16));
        cart.initialize().unwrap();
        let result = cart.write_flash(0, &[0x42], EraseMode::Covering, &mut quiet());
        assert!(matches!(result, Err(Error::Timeout(_))));
    }

    #[test]
    fn inject_patches_only_documented_ranges() {
        let mut cart = initialized();
        let seed: Vec<u8> = (0..DSONE.capacity).map(|i| (i % 241) as u8).collect();
        cart.card_mut().memory_mut().copy_from_slice(&seed);

        let key: Vec<u8> = (0..crate::card::BLOWFISH_PS_LEN).map(|i| (i % 7) as u8).collect();
        let firmware = vec![0xF1u8; 0x400];
        cart.inject_ntrboot(&key, &firmware, &mut quiet()).unwrap();

        let image = cart.card().memory();
        assert_eq!(&image[0x1000..0x1048], &key[..0x48]);
        assert_eq!(&image[0x2000..0x3000], &key[0x48..]);
        assert_eq!(&image[0x7E00..0x8200], &firmware[..]);
        // Everything outside the documented sub-ranges is untouched.
        assert_eq!(&image[..0x1000], &seed[..0x1000]);
        assert_eq!(&image[0x1048..0x2000], &seed[0x1048..0x2000]);
        assert_eq!(&image[0x3000..0x7E00], &seed[0x3000..0x7E00]);
        assert_eq!(&image[0x8200..], &seed[0x8200..]);
    }

    #[test]
    fn oversized_firmware_writes_nothing() {
        let mut cart = initialized();
        let seed: Vec<u8> = (0..DSONE.capacity).map(|i| (i % 241) as u8).collect();
        cart.card_mut().memory_mut().copy_from_slice(&seed);
        let calls_before = cart.card().send_calls();

        let key = vec![0u8; crate::card::BLOWFISH_PS_LEN];
        let firmware = vec![0u8; (DSONE.capacity - 0x7E00) as usize + 1];
        let result = cart.inject_ntrboot(&key, &firmware, &mut quiet());
        assert!(matches!(result, Err(Error::PayloadTooLarge { .. })));
        assert_eq!(cart.card().send_calls(), calls_before);
        assert_eq!(cart.card().memory(), &seed[..]);
    }
}
