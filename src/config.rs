//! Index configuration: hash size, word length, match threshold, and the
//! derived quantities built from them.
//!
//! A [`Config`] is immutable once constructed; all three parameters are
//! validated eagerly so that every other module can trust them without
//! re-checking.

use crate::error::{Error, Result};

/// `H`, `W`, `T` triple plus the derived slot count and MIH window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Hash size in bits. Always a multiple of 8.
    pub h: u32,
    /// Word length in bits. `H` is always divisible by `W`.
    pub w: u32,
    /// Match threshold in bits. Always even and `<= H`.
    pub t: u32,
}

impl Config {
    /// Construct and validate an explicit `(H, W, T)` triple.
    ///
    /// Rejects `H % 8 != 0`, `H % W != 0`, `T % 2 != 0`, or `T > H`.
    pub fn new(h: u32, w: u32, t: u32) -> Result<Self> {
        if h % 8 != 0 {
            return Err(Error::input_invalid(format!(
                "hash size H={h} must be a multiple of 8"
            )));
        }
        if w == 0 || h % w != 0 {
            return Err(Error::input_invalid(format!(
                "hash size H={h} must be divisible by word length W={w}"
            )));
        }
        if t % 2 != 0 {
            return Err(Error::input_invalid(format!(
                "match threshold T={t} must be even"
            )));
        }
        if t > h {
            return Err(Error::input_invalid(format!(
                "match threshold T={t} must not exceed hash size H={h}"
            )));
        }
        Ok(Config { h, w, t })
    }

    /// The PDQ preset: `H=256, W=16, T=32` (so `S=16`, `WindowSize=2`).
    pub fn preset_pdq() -> Self {
        // Constructed from known-valid constants; the invariants above all
        // hold by inspection (256 % 8 == 0, 256 % 16 == 0, 32 % 2 == 0, 32 <= 256).
        Config {
            h: 256,
            w: 16,
            t: 32,
        }
    }

    /// Number of word slots, `S = H / W`.
    pub fn slot_count(&self) -> u32 {
        self.h / self.w
    }

    /// `WindowSize = T / W`.
    pub fn window_size(&self) -> u32 {
        self.t / self.w
    }

    /// Number of hex characters in a valid input hash: `H / 4`.
    pub fn hash_hex_len(&self) -> usize {
        (self.h / 4) as usize
    }

    /// Number of packed bytes in a decoded hash: `H / 8`.
    pub fn hash_byte_len(&self) -> usize {
        (self.h / 8) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdq_preset_derives_slot_count_and_window_size() {
        let cfg = Config::preset_pdq();
        assert_eq!(cfg.slot_count(), 16);
        assert_eq!(cfg.window_size(), 2);
        assert_eq!(cfg.hash_hex_len(), 64);
        assert_eq!(cfg.hash_byte_len(), 32);
    }

    #[test]
    fn rejects_h_not_multiple_of_8() {
        assert!(Config::new(254, 16, 32).is_err());
    }

    #[test]
    fn rejects_h_not_divisible_by_w() {
        assert!(Config::new(256, 48, 32).is_err());
    }

    #[test]
    fn rejects_odd_threshold() {
        assert!(Config::new(256, 16, 33).is_err());
    }

    #[test]
    fn rejects_threshold_above_hash_size() {
        assert!(Config::new(256, 16, 300).is_err());
    }

    #[test]
    fn accepts_valid_custom_triple() {
        let cfg = Config::new(128, 8, 16).unwrap();
        assert_eq!(cfg.slot_count(), 16);
        assert_eq!(cfg.window_size(), 2);
    }
}
