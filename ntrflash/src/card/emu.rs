//! In-memory emulated cart.
//!
//! `EmuCart` implements [`NtrCard`] over a plain byte array, emulating
//! either cart personality well enough to exercise every driver code
//! path without hardware: the JEDEC write-cycle state machine (unlock
//! sequence, id mode, sector erase, AND-semantics byte program) and the
//! auto-encrypting command set (scrambled reads/writes, busy polling,
//! software revision, the KEY1/KEY2 handshake ladder).
//!
//! Busy and settle counters are deterministic, so tests can drive every
//! polling loop, including never-completing configurations for timeout
//! coverage.

use crate::card::{CardState, FRAME_LEN, NtrCard, TransportError};
use crate::protocol::cipher;

/// Which cart personality the emulator speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmuModel {
    /// Pass-through JEDEC flash bus (wide frames, opcodes 0x86..0x88).
    Jedec,
    /// Auto-encrypting command set (0xB7/0xC0/0xC5/0xD0/0xD4).
    Scrambled,
}

/// Emulated cart configuration.
#[derive(Debug, Clone)]
pub struct EmuConfig {
    /// Cart personality.
    pub model: EmuModel,
    /// Flash capacity in bytes.
    pub capacity: u32,
    /// Identity returned in id mode (JEDEC personality).
    pub chip_id: u32,
    /// Sector span cleared by one erase command.
    pub erase_span: u32,
    /// Raw software revision (scrambled personality).
    pub software_revision: u32,
    /// Number of busy reads reported after an erase or program command.
    pub busy_polls: u32,
    /// Number of garbage unique-key reads after session start.
    pub settle_reads: u32,
    /// Secret the KEY1 handshake requires; `None` accepts any material.
    pub accept_secret: Option<Vec<u8>>,
    /// Report `Unsupported` from `init()` (the non-fatal path).
    pub init_unsupported: bool,
}

impl EmuConfig {
    /// JEDEC personality defaults.
    pub fn jedec(capacity: u32, chip_id: u32, erase_span: u32) -> Self {
        Self {
            model: EmuModel::Jedec,
            capacity,
            chip_id,
            erase_span,
            software_revision: 0,
            busy_polls: 2,
            settle_reads: 0,
            accept_secret: None,
            init_unsupported: false,
        }
    }

    /// Scrambled personality defaults (2 MiB cart).
    pub fn r4(software_revision: u32) -> Self {
        Self {
            model: EmuModel::Scrambled,
            capacity: 0x20_0000,
            chip_id: 0x0FC2,
            erase_span: 0x1_0000,
            software_revision,
            busy_polls: 2,
            settle_reads: 2,
            accept_secret: None,
            init_unsupported: false,
        }
    }
}

/// Position in the JEDEC unlock sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Seq {
    #[default]
    Idle,
    Aa,
    Unlocked,
    EraseArming,
    EraseAa,
    EraseUnlocked,
}

/// What array reads currently return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    Array,
    Id,
    ProgramPending,
}

/// In-memory emulated cart.
pub struct EmuCart {
    config: EmuConfig,
    mem: Vec<u8>,
    state: CardState,
    seq: Seq,
    mode: Mode,
    busy: u32,
    settle: u32,
    blowfish: Option<(Vec<u8>, bool)>,
    key1_romcnt: u32,
    key2_romcnt: u32,
    key2_seed: u8,
    key1_attempts: u32,
    init_calls: u32,
    send_calls: u64,
}

impl EmuCart {
    /// Create a blank (all-ones) emulated cart.
    pub fn new(config: EmuConfig) -> Self {
        let mem = vec![0xFF; config.capacity as usize];
        Self {
            config,
            mem,
            state: CardState::Raw,
            seq: Seq::Idle,
            mode: Mode::Array,
            busy: 0,
            settle: 0,
            blowfish: None,
            key1_romcnt: 0,
            key2_romcnt: 0,
            key2_seed: 0,
            key1_attempts: 0,
            init_calls: 0,
            send_calls: 0,
        }
    }

    /// Create an emulated cart pre-filled with `data` (padded with 0xFF).
    pub fn with_contents(config: EmuConfig, data: &[u8]) -> Self {
        let mut cart = Self::new(config);
        let len = data.len().min(cart.mem.len());
        cart.mem[..len].copy_from_slice(&data[..len]);
        cart.settle = cart.config.settle_reads;
        cart
    }

    /// The configuration this cart was created with.
    pub fn config(&self) -> &EmuConfig {
        &self.config
    }

    /// Raw flash contents.
    pub fn memory(&self) -> &[u8] {
        &self.mem
    }

    /// Mutable raw flash contents.
    pub fn memory_mut(&mut self) -> &mut [u8] {
        &mut self.mem
    }

    /// Consume the cart, returning the flash contents.
    pub fn into_memory(self) -> Vec<u8> {
        self.mem
    }

    /// Number of KEY1 handshake attempts seen so far.
    pub fn key1_attempts(&self) -> u32 {
        self.key1_attempts
    }

    /// Number of `init()` calls seen so far.
    pub fn init_calls(&self) -> u32 {
        self.init_calls
    }

    /// Number of command frames seen so far.
    pub fn send_calls(&self) -> u64 {
        self.send_calls
    }

    /// Timing words and seed installed before the handshake, as
    /// `(key1_romcnt, key2_romcnt, key2_seed)`.
    pub fn handshake_config(&self) -> (u32, u32, u8) {
        (self.key1_romcnt, self.key2_romcnt, self.key2_seed)
    }

    fn erase_span_at(&mut self, addr: u32) {
        let start = addr as usize;
        let end = (addr.saturating_add(self.config.erase_span) as usize).min(self.mem.len());
        if start < end {
            self.mem[start..end].fill(0xFF);
        }
        self.busy = self.config.busy_polls;
    }

    fn jedec_write_cycle(&mut self, addr: u32, value: u8) {
        // A pending program consumes the next cycle as data, even 0xF0.
        if self.mode == Mode::ProgramPending {
            if let Some(byte) = self.mem.get_mut(addr as usize) {
                *byte &= value;
            }
            self.busy = self.config.busy_polls;
            self.mode = Mode::Array;
            return;
        }
        if value == 0xF0 {
            self.seq = Seq::Idle;
            self.mode = Mode::Array;
            return;
        }
        self.seq = match (self.seq, addr, value) {
            (Seq::Idle, 0x5555, 0xAA) => Seq::Aa,
            (Seq::Aa, 0x2AAA, 0x55) => Seq::Unlocked,
            (Seq::Unlocked, 0x5555, 0x90) => {
                self.mode = Mode::Id;
                Seq::Idle
            }
            (Seq::Unlocked, 0x5555, 0xA0) => {
                self.mode = Mode::ProgramPending;
                Seq::Idle
            }
            (Seq::Unlocked, 0x5555, 0x80) => Seq::EraseArming,
            (Seq::EraseArming, 0x5555, 0xAA) => Seq::EraseAa,
            (Seq::EraseAa, 0x2AAA, 0x55) => Seq::EraseUnlocked,
            (Seq::EraseUnlocked, sector, 0x30) => {
                self.erase_span_at(sector);
                Seq::Idle
            }
            _ => Seq::Idle,
        };
    }

    fn jedec_read_word(&mut self, addr: u32) -> u32 {
        if self.mode == Mode::Id {
            return self.config.chip_id;
        }
        let word = self.word_at(addr);
        if self.busy > 0 {
            self.busy -= 1;
            // Busy chips drive the data bus with complemented bits.
            return !word;
        }
        word
    }

    fn word_at(&self, addr: u32) -> u32 {
        let addr = addr as usize;
        if addr + 4 > self.mem.len() {
            return 0xFFFF_FFFF;
        }
        u32::from_le_bytes([
            self.mem[addr],
            self.mem[addr + 1],
            self.mem[addr + 2],
            self.mem[addr + 3],
        ])
    }

    fn jedec_command(&mut self, frame: &[u8; FRAME_LEN], response: &mut [u8]) {
        let opcode = frame[0];
        let addr = u32::from_be_bytes([frame[1], frame[2], frame[3], frame[4]]);
        let value = frame[6];
        match opcode {
            0x86 | 0x88 => {
                self.seq = Seq::Idle;
                self.mode = Mode::Array;
                response.fill(0);
            }
            0x87 => {
                self.jedec_write_cycle(addr, value);
                response.fill(0);
            }
            0x00 => {
                let word = self.jedec_read_word(addr);
                let bytes = word.to_le_bytes();
                for (i, b) in response.iter_mut().enumerate() {
                    *b = *bytes.get(i).unwrap_or(&0);
                }
            }
            _ => response.fill(0),
        }
    }

    fn scrambled_read(&mut self, addr: u32, response: &mut [u8]) {
        for (i, b) in response.iter_mut().enumerate() {
            let raw = self
                .mem
                .get(addr as usize + i)
                .copied()
                .unwrap_or(0xFF);
            *b = cipher::decrypt_byte(raw);
        }
    }

    fn scrambled_command(&mut self, frame: &[u8; FRAME_LEN], response: &mut [u8]) {
        match frame[0] {
            0xC5 => {
                let rev = self.config.software_revision.to_le_bytes();
                for (i, b) in response.iter_mut().enumerate() {
                    *b = *rev.get(i).unwrap_or(&0);
                }
            }
            0xC0 => {
                let status: u32 = if self.busy > 0 {
                    self.busy -= 1;
                    1
                } else {
                    0
                };
                let bytes = status.to_le_bytes();
                for (i, b) in response.iter_mut().enumerate() {
                    *b = *bytes.get(i).unwrap_or(&0);
                }
            }
            0xB7 => {
                let bank = frame[1];
                let hi = u32::from(frame[2] & 0x1F);
                let lo = u32::from(frame[3]) << 8 | u32::from(frame[4]);
                let sub = frame[5];
                if sub == 0x15 {
                    // Unique-key window at 0x2FE00; returns transient
                    // garbage for a few reads after session start.
                    if self.settle > 0 {
                        let salt = self.settle as u8;
                        self.settle -= 1;
                        for (i, b) in response.iter_mut().enumerate() {
                            *b = salt ^ (i as u8);
                        }
                    } else {
                        self.scrambled_read(0x2FE00, response);
                    }
                    return;
                }
                // Bank 1 reads come in offset by 0x61_0000.
                let hi = if bank == 0x01 { (hi + 0x1F) & 0x1F } else { hi };
                self.scrambled_read(hi << 16 | lo, response);
            }
            0xD0 => {
                // Chip-id dance; no observable state change.
                response.fill(0);
            }
            0xD4 => {
                let addr = u32::from(frame[1]) << 16
                    | u32::from(frame[2]) << 8
                    | u32::from(frame[3]);
                match frame[5] {
                    0x01 => self.erase_span_at(addr),
                    0x03 => {
                        // The cart scrambles inbound bytes before the
                        // program cycle hits the array.
                        if let Some(byte) = self.mem.get_mut(addr as usize) {
                            *byte &= cipher::encrypt_byte(frame[4]);
                        }
                        self.busy = self.config.busy_polls;
                    }
                    _ => {}
                }
                response.fill(0);
            }
            _ => response.fill(0),
        }
    }
}

impl NtrCard for EmuCart {
    fn send_command(
        &mut self,
        frame: &[u8; FRAME_LEN],
        response: &mut [u8],
        _timing: u32,
    ) -> Result<(), TransportError> {
        self.send_calls += 1;
        match self.config.model {
            EmuModel::Jedec => self.jedec_command(frame, response),
            EmuModel::Scrambled => self.scrambled_command(frame, response),
        }
        Ok(())
    }

    fn init(&mut self) -> Result<(), TransportError> {
        self.init_calls += 1;
        if self.config.init_unsupported {
            return Err(TransportError::Unsupported);
        }
        Ok(())
    }

    fn state(&self) -> CardState {
        self.state
    }

    fn set_key1_timing(&mut self, romcnt: u32) {
        self.key1_romcnt = romcnt;
    }

    fn set_key2_timing(&mut self, romcnt: u32) {
        self.key2_romcnt = romcnt;
    }

    fn set_key2_seed(&mut self, seed: u8) {
        self.key2_seed = seed;
    }

    fn set_blowfish_state(&mut self, secret: &[u8], is_dev: bool) {
        self.blowfish = Some((secret.to_vec(), is_dev));
    }

    fn begin_key1(&mut self) -> Result<(), TransportError> {
        self.key1_attempts += 1;
        if self.state != CardState::Raw {
            return Err(TransportError::Bus(-2));
        }
        // Handshake needs the bus timing words programmed first.
        if self.key1_romcnt == 0 || self.key2_romcnt == 0 {
            return Err(TransportError::Bus(-4));
        }
        if let Some(expected) = &self.config.accept_secret {
            let installed = self.blowfish.as_ref().map(|(secret, _)| secret);
            if installed != Some(expected) {
                return Err(TransportError::Bus(-5));
            }
        }
        self.state = CardState::Key1;
        // Session start leaves the unique-key window unsettled.
        self.settle = self.config.settle_reads;
        Ok(())
    }

    fn begin_key2(&mut self) -> Result<(), TransportError> {
        if self.state != CardState::Key1 {
            return Err(TransportError::Bus(-3));
        }
        self.state = CardState::Key2;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jedec_cart() -> EmuCart {
        EmuCart::new(EmuConfig::jedec(0x8_0000, 0xD7BF, 0x1000))
    }

    fn cycle(cart: &mut EmuCart, addr: u32, value: u8) {
        let frame = crate::protocol::CommandFrame::wide(0x87, addr, u16::from(value));
        cart.send_command(frame.bytes(), &mut [], 0).unwrap();
    }

    fn read_word(cart: &mut EmuCart, addr: u32) -> u32 {
        let frame = crate::protocol::CommandFrame::wide(0x00, addr, 0);
        let mut resp = [0u8; 4];
        cart.send_command(frame.bytes(), &mut resp, 0).unwrap();
        u32::from_le_bytes(resp)
    }

    #[test]
    fn unlock_sequence_reaches_id_mode() {
        let mut cart = jedec_cart();
        cycle(&mut cart, 0x5555, 0xAA);
        cycle(&mut cart, 0x2AAA, 0x55);
        cycle(&mut cart, 0x5555, 0x90);
        assert_eq!(read_word(&mut cart, 0), 0xD7BF);
        cycle(&mut cart, 0, 0xF0);
        assert_eq!(read_word(&mut cart, 0), 0xFFFF_FFFF);
    }

    #[test]
    fn program_uses_and_semantics() {
        let mut cart = jedec_cart();
        cart.memory_mut()[0x10] = 0x0F;
        cycle(&mut cart, 0x5555, 0xAA);
        cycle(&mut cart, 0x2AAA, 0x55);
        cycle(&mut cart, 0x5555, 0xA0);
        cycle(&mut cart, 0x10, 0x3C);
        assert_eq!(cart.memory()[0x10], 0x0C);
    }

    #[test]
    fn busy_reads_complement_the_array() {
        let mut cart = jedec_cart();
        cycle(&mut cart, 0x5555, 0xAA);
        cycle(&mut cart, 0x2AAA, 0x55);
        cycle(&mut cart, 0x5555, 0xA0);
        cycle(&mut cart, 0x20, 0x42);
        // Two busy reads, then the programmed value.
        assert_ne!(read_word(&mut cart, 0x20) as u8, 0x42);
        assert_ne!(read_word(&mut cart, 0x20) as u8, 0x42);
        assert_eq!(read_word(&mut cart, 0x20) as u8, 0x42);
    }

    #[test]
    fn scrambled_write_then_read_round_trips() {
        let mut cart = EmuCart::new(EmuConfig::r4(0x707));
        // Store raw byte 0x5A the way the host does: send decrypt(0x5A).
        let frame = crate::protocol::CommandFrame::addr24(
            0xD4,
            0x100,
            crate::protocol::cipher::decrypt_byte(0x5A),
            0x03,
        );
        cart.send_command(frame.bytes(), &mut [], 80).unwrap();
        assert_eq!(cart.memory()[0x100], 0x5A);
    }

    #[test]
    fn key1_validates_secret_when_configured() {
        let mut config = EmuConfig::r4(0x707);
        config.accept_secret = Some(vec![0x11; 8]);
        let mut cart = EmuCart::new(config);
        cart.set_key1_timing(0x18_08F8);
        cart.set_key2_timing(0x41_6017);
        cart.set_blowfish_state(&[0x22; 8], false);
        assert!(cart.begin_key1().is_err());
        assert_eq!(cart.state(), CardState::Raw);
        cart.set_blowfish_state(&[0x11; 8], false);
        assert!(cart.begin_key1().is_ok());
        assert!(cart.begin_key2().is_ok());
        assert_eq!(cart.state(), CardState::Key2);
    }

    #[test]
    fn key1_requires_timing_words() {
        let mut cart = EmuCart::new(EmuConfig::r4(0x707));
        assert_eq!(cart.begin_key1(), Err(TransportError::Bus(-4)));
        cart.set_key1_timing(0x18_08F8);
        cart.set_key2_timing(0x41_6017);
        assert!(cart.begin_key1().is_ok());
    }
}
