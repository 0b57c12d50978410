//! Secure-session establishment.
//!
//! Carts that auto-decrypt their flash only accept programming commands
//! after the bus has gone through the KEY1/KEY2 authentication handshake.
//! The Blowfish secret the cart expects varies between production runs,
//! so establishment walks an ordered list of key candidates and keeps the
//! first one that completes both phases.

use crate::card::{CardState, NtrCard, TransportError};
use crate::error::{Error, Result};
use log::{debug, error, info};
use std::fmt;

/// KEY1 bus timing word installed before the handshake.
pub const KEY1_ROMCNT: u32 = 0x0018_08F8;

/// KEY2 bus timing word installed before the handshake.
pub const KEY2_ROMCNT: u32 = 0x0041_6017;

/// KEY2 seed byte installed before the handshake.
pub const KEY2_SEED: u8 = 0x00;

/// Origin of a Blowfish key candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Stock retail cart key.
    Retail,
    /// Retail bootrom-derived key.
    BootromRetail,
    /// Development-unit bootrom-derived key.
    BootromDev,
}

impl KeyKind {
    /// Candidate tag, as shown in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::Retail => "retail-default",
            Self::BootromRetail => "bootrom-retail",
            Self::BootromDev => "bootrom-dev",
        }
    }

    /// Whether the transport should use the development key schedule.
    pub fn is_dev(self) -> bool {
        !matches!(self, Self::Retail)
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One Blowfish secret to try during session establishment.
#[derive(Clone)]
pub struct KeyCandidate {
    kind: KeyKind,
    material: Vec<u8>,
}

impl KeyCandidate {
    /// Create a candidate from caller-supplied key material.
    pub fn new(kind: KeyKind, material: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            material: material.into(),
        }
    }

    /// Candidate with zeroed material, for transports that do not verify
    /// the secret (emulated carts).
    pub fn unkeyed(kind: KeyKind) -> Self {
        Self::new(kind, vec![0u8; crate::card::BLOWFISH_PS_LEN])
    }

    /// The candidate order the stock updaters try: retail first, then the
    /// two bootrom-derived variants.
    pub fn standard_order(
        retail: Vec<u8>,
        bootrom_retail: Vec<u8>,
        bootrom_dev: Vec<u8>,
    ) -> Vec<Self> {
        vec![
            Self::new(KeyKind::Retail, retail),
            Self::new(KeyKind::BootromRetail, bootrom_retail),
            Self::new(KeyKind::BootromDev, bootrom_dev),
        ]
    }

    /// Origin tag of this candidate.
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// The secret bytes.
    pub fn material(&self) -> &[u8] {
        &self.material
    }
}

// Manual Debug so logs never carry key material.
impl fmt::Debug for KeyCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyCandidate")
            .field("kind", &self.kind)
            .field("material_len", &self.material.len())
            .finish()
    }
}

/// Bring the card from its raw state into authenticated streaming mode.
///
/// Candidates are tried in order; the first one whose handshake completes
/// is returned and no further transport calls are made. If every
/// candidate fails, [`Error::SecureInitFailed`] reports how many were
/// tried.
pub fn establish<C: NtrCard>(card: &mut C, candidates: &[KeyCandidate]) -> Result<KeyKind> {
    for candidate in candidates {
        if try_candidate(card, candidate) {
            info!("secure session established with {} key", candidate.kind());
            return Ok(candidate.kind());
        }
    }
    Err(Error::SecureInitFailed {
        attempts: candidates.len(),
    })
}

/// One establishment attempt; failures are diagnostic, not fatal.
fn try_candidate<C: NtrCard>(card: &mut C, candidate: &KeyCandidate) -> bool {
    debug!("secure init: trying {} key", candidate.kind());

    match card.init() {
        Ok(()) | Err(TransportError::Unsupported) => {}
        Err(e) => {
            error!("secure init: transport init failed: {e}");
            return false;
        }
    }

    // Past RAW there is no way to restart the handshake.
    if card.state() != CardState::Raw {
        error!(
            "secure init: state {:?} is not RAW and cannot reset",
            card.state()
        );
        return false;
    }

    card.set_key1_timing(KEY1_ROMCNT);
    card.set_key2_timing(KEY2_ROMCNT);
    card.set_key2_seed(KEY2_SEED);
    card.set_blowfish_state(candidate.material(), candidate.kind().is_dev());

    if let Err(e) = card.begin_key1() {
        error!("secure init: key1 ({}) failed: {e}", candidate.kind());
        return false;
    }
    if let Err(e) = card.begin_key2() {
        error!("secure init: key2 failed: {e}");
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_kind_labels() {
        assert_eq!(KeyKind::Retail.label(), "retail-default");
        assert_eq!(KeyKind::BootromRetail.label(), "bootrom-retail");
        assert_eq!(KeyKind::BootromDev.label(), "bootrom-dev");
    }

    #[test]
    fn only_retail_uses_production_schedule() {
        assert!(!KeyKind::Retail.is_dev());
        assert!(KeyKind::BootromRetail.is_dev());
        assert!(KeyKind::BootromDev.is_dev());
    }

    #[test]
    fn debug_does_not_leak_material() {
        let candidate = KeyCandidate::new(KeyKind::Retail, vec![0xAB; 16]);
        let repr = format!("{candidate:?}");
        assert!(repr.contains("material_len"));
        assert!(!repr.contains("0xAB") && !repr.contains("171"));
    }

    #[test]
    fn no_candidates_fails_immediately() {
        let mut card = crate::card::emu::EmuCart::new(crate::card::emu::EmuConfig::r4(0x707));
        let result = establish(&mut card, &[]);
        assert!(matches!(
            result,
            Err(Error::SecureInitFailed { attempts: 0 })
        ));
    }

    #[test]
    fn establish_installs_timing_words_and_seed() {
        let mut card = crate::card::emu::EmuCart::new(crate::card::emu::EmuConfig::r4(0x707));
        let kind = establish(&mut card, &[KeyCandidate::unkeyed(KeyKind::Retail)]).unwrap();
        assert_eq!(kind, KeyKind::Retail);
        assert_eq!(
            card.handshake_config(),
            (KEY1_ROMCNT, KEY2_ROMCNT, KEY2_SEED)
        );
        assert_eq!(card.state(), CardState::Key2);
    }
}
