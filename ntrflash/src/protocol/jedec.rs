//! JEDEC-style flash command engine.
//!
//! Carts in this family expose the flash chip's own command bus through
//! the cart protocol: a *wide* frame with opcode `0x87` performs one
//! write cycle on the chip, opcode `0x00` reads a 32-bit word back, and
//! `0x86`/`0x88` bracket the programming session. Erase and program are
//! the classic unlock sequences:
//!
//! ```text
//! identify   0x5555:0xAA  0x2AAA:0x55  0x5555:0x90
//! erase      0x5555:0xAA  0x2AAA:0x55  0x5555:0x80
//!            0x5555:0xAA  0x2AAA:0x55  sector:0x30
//! program    0x5555:0xAA  0x2AAA:0x55  0x5555:0xA0  offset:data
//! reset      0x0000:0xF0
//! ```
//!
//! Completion is observed by polling reads: an erased range reads
//! all-ones, a programmed byte reads back its own value. Both polls are
//! bounded by a [`PollPolicy`].

use crate::card::NtrCard;
use crate::error::{Error, Result};
use crate::protocol::frame::CommandFrame;
use crate::protocol::poll::{self, PollPolicy};
use byteorder::{ByteOrder, LittleEndian};
use log::debug;

/// Bus timing word used for every command in this family.
pub const BUS_TIMING: u32 = 0xA718_0000;

/// First unlock-cycle address.
pub const UNLOCK_ADDR1: u32 = 0x5555;
/// Second unlock-cycle address.
pub const UNLOCK_ADDR2: u32 = 0x2AAA;

const OP_MODE_ENTER: u8 = 0x86;
const OP_WRITE_CYCLE: u8 = 0x87;
const OP_MODE_EXIT: u8 = 0x88;
const OP_READ_WORD: u8 = 0x00;

/// Flash command dialect, selected once from the chip identity.
///
/// Only `TypeA` is exercised by the supported chips. `TypeB` (the
/// status-register word-write family) is recognized so its chips are not
/// misdriven with `TypeA` sequences, but every `TypeB` operation reports
/// [`Error::Unimplemented`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// JEDEC unlock/erase/program sequences.
    #[default]
    TypeA,
    /// Status-register word-write sequences; recognized but disabled.
    TypeB,
}

impl Dialect {
    fn type_a(self, operation: &str) -> Result<()> {
        match self {
            Self::TypeA => Ok(()),
            Self::TypeB => Err(Error::Unimplemented(format!(
                "{operation} for the status-register dialect"
            ))),
        }
    }
}

/// Flash command engine borrowing a card for one operation.
pub struct JedecBus<'a, C: NtrCard> {
    card: &'a mut C,
    dialect: Dialect,
    poll: PollPolicy,
}

impl<'a, C: NtrCard> JedecBus<'a, C> {
    /// Create an engine over `card` speaking `dialect`.
    pub fn new(card: &'a mut C, dialect: Dialect, poll: PollPolicy) -> Self {
        Self {
            card,
            dialect,
            poll,
        }
    }

    /// Send one wide frame and read the 32-bit little-endian response.
    pub fn command(&mut self, opcode: u8, param: u32, value: u16) -> Result<u32> {
        let frame = CommandFrame::wide(opcode, param, value);
        let mut resp = [0u8; 4];
        self.card
            .send_command(frame.bytes(), &mut resp, BUS_TIMING)?;
        Ok(LittleEndian::read_u32(&resp))
    }

    fn write_cycle(&mut self, addr: u32, value: u16) -> Result<()> {
        self.command(OP_WRITE_CYCLE, addr, value)?;
        Ok(())
    }

    /// Read one 32-bit word from the flash array.
    pub fn read_word(&mut self, addr: u32) -> Result<u32> {
        self.command(OP_READ_WORD, addr, 0)
    }

    /// Enter the programming session.
    pub fn mode_enter(&mut self) -> Result<()> {
        self.command(OP_MODE_ENTER, 0, 0)?;
        Ok(())
    }

    /// Leave the programming session.
    pub fn mode_exit(&mut self) -> Result<()> {
        self.command(OP_MODE_EXIT, 0, 0)?;
        Ok(())
    }

    /// Return the chip to array-read mode.
    pub fn reset(&mut self) -> Result<()> {
        debug!("jedec: reset");
        self.dialect.type_a("reset")?;
        self.write_cycle(0, 0xF0)
    }

    /// Issue the unlock + read-ID sequence and return the raw identity.
    ///
    /// The chip is reset back to array mode afterwards.
    pub fn read_id(&mut self) -> Result<u32> {
        self.write_cycle(UNLOCK_ADDR1, 0xAA)?;
        self.write_cycle(UNLOCK_ADDR2, 0x55)?;
        self.write_cycle(UNLOCK_ADDR1, 0x90)?;
        let id = self.read_word(0)?;
        self.reset()?;
        Ok(id)
    }

    /// Erase the block starting at `offset` and wait until every word in
    /// `[offset, offset + length)` reads erased.
    pub fn erase_block(&mut self, offset: u32, length: u32) -> Result<()> {
        debug!("jedec: erase_block({offset:#010x})");
        self.dialect.type_a("block erase")?;
        self.write_cycle(UNLOCK_ADDR1, 0xAA)?;
        self.write_cycle(UNLOCK_ADDR2, 0x55)?;
        self.write_cycle(UNLOCK_ADDR1, 0x80)?;
        self.write_cycle(UNLOCK_ADDR1, 0xAA)?;
        self.write_cycle(UNLOCK_ADDR2, 0x55)?;
        self.write_cycle(offset, 0x30)?;

        let poll = self.poll;
        for addr in (offset..offset + length).step_by(4) {
            poll::poll_until(poll, "erase", || {
                Ok((self.read_word(addr)? == 0xFFFF_FFFF).then_some(()))
            })?;
        }
        Ok(())
    }

    /// Run a sequence of block erases, reporting cumulative progress.
    pub fn erase_blocks(
        &mut self,
        offset: u32,
        blocks: &[u32],
        progress: &mut dyn FnMut(&str, usize, usize),
    ) -> Result<()> {
        let total: u32 = blocks.iter().sum();
        let mut addr = offset;
        for block in blocks {
            progress("Erasing blocks", (addr - offset) as usize, total as usize);
            self.erase_block(addr, *block)?;
            addr += block;
        }
        progress("Erasing blocks", total as usize, total as usize);
        Ok(())
    }

    /// Program one byte and poll until it reads back.
    pub fn program_byte(&mut self, offset: u32, value: u8) -> Result<()> {
        self.dialect.type_a("byte program")?;
        self.write_cycle(UNLOCK_ADDR1, 0xAA)?;
        self.write_cycle(UNLOCK_ADDR2, 0x55)?;
        self.write_cycle(UNLOCK_ADDR1, 0xA0)?;
        self.write_cycle(offset, u16::from(value))?;

        let poll = self.poll;
        poll::poll_until(poll, "program verify", || {
            Ok((self.read_word(offset)? as u8 == value).then_some(()))
        })
    }

    /// Read `length` bytes starting at `address`, one 32-bit word at a
    /// time, little-endian.
    pub fn read_words(
        &mut self,
        address: u32,
        length: u32,
        progress: &mut dyn FnMut(&str, usize, usize),
    ) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(length as usize);
        let mut addr = address;
        let end = address + length;
        while addr < end {
            if crate::is_interrupt_requested() {
                return Err(Error::Interrupted);
            }
            let word = self.read_word(addr)?;
            buffer.extend_from_slice(&word.to_le_bytes());
            addr += 4;
            progress("Reading", (addr - address) as usize, length as usize);
        }
        buffer.truncate(length as usize);
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_b_operations_are_unimplemented() {
        assert!(Dialect::TypeA.type_a("x").is_ok());
        assert!(matches!(
            Dialect::TypeB.type_a("x"),
            Err(Error::Unimplemented(_))
        ));
    }
}
