//! RX/TX digital FIR programming.
//!
//! The hardware takes only the first half of a symmetric filter; the mirror
//! image is written at addresses offset by `num_taps / 2`. Coefficients come
//! from the tail of the shared low-pass prototype in [`crate::tables`].

use crate::regs::*;
use crate::tables::FIR_PROTOTYPE;
use crate::{Ad9361, Direction, Interface, Result};

/// Supported filter lengths, in ascending order.
const TAP_COUNTS: [i32; 8] = [16, 32, 48, 64, 80, 96, 112, 128];

/// Quantize a tap budget to the next-lower supported filter length.
///
/// Scans ascending from the second entry; the first entry `max_taps` does
/// not reach selects the previous one. A budget beyond the whole list (or
/// any degenerate small budget) falls through to 128 taps.
pub fn quantize_num_taps(max_taps: i32) -> i32 {
    for i in 1..TAP_COUNTS.len() {
        if max_taps < TAP_COUNTS[i] {
            return TAP_COUNTS[i - 1];
        }
    }
    128
}

impl<I: Interface> Ad9361<I> {
    /// Write a symmetric FIR of `num_taps` total taps; `coeffs` holds the
    /// unique first half. Leaves the filter's programming clock disabled.
    /// The caller is responsible for an ENSM state that allows SPI access.
    pub(crate) fn program_fir(
        &mut self,
        direction: Direction,
        num_taps: usize,
        coeffs: &[u16],
    ) -> Result<()> {
        let base = match direction {
            Direction::Rx => REG_RX_FIR_BASE,
            Direction::Tx => REG_TX_FIR_BASE,
        };
        if direction == Direction::Rx {
            self.write_reg(base + FIR_RX_GAIN, 0x02)?; // -6 dB filter gain
        }

        let taps_field = (((num_taps / 16) as u8 - 1) & 0x07) << 5;
        self.write_reg(base + FIR_CONFIG, taps_field | 0x1A)?; // start clock

        let half_len = coeffs.len();
        for pass in 0..2 {
            for i in 0..half_len {
                // Second pass mirrors the sequence at the upper addresses.
                let (addr, c) = if pass == 0 {
                    (i, coeffs[i])
                } else {
                    (half_len + i, coeffs[half_len - 1 - i])
                };
                self.write_reg(base + FIR_COEF_ADDR, addr as u8)?;
                self.write_reg(base + FIR_COEF_LSB, (c & 0xFF) as u8)?;
                self.write_reg(base + FIR_COEF_MSB, (c >> 8) as u8)?;
                self.write_reg(base + FIR_CONFIG, taps_field | 0x1E)?; // strobe
                self.write_reg(base + FIR_COEF_CLOCK, 0x00)?;
                self.write_reg(base + FIR_COEF_CLOCK, 0x00)?;
            }
        }

        self.write_reg(base + FIR_CONFIG, taps_field | 0x02)?; // stop clock
        Ok(())
    }

    pub(crate) fn setup_rx_fir(&mut self, total_taps: usize) -> Result<()> {
        let coeffs = prototype_tail(total_taps / 2);
        self.program_fir(Direction::Rx, total_taps, &coeffs)
    }

    pub(crate) fn setup_tx_fir(&mut self, total_taps: usize) -> Result<()> {
        let coeffs = prototype_tail(total_taps / 2);
        self.program_fir(Direction::Tx, total_taps, &coeffs)
    }
}

/// The last `half` prototype entries, center tap last.
fn prototype_tail(half: usize) -> Vec<u16> {
    let mut coeffs = vec![0u16; half];
    for i in 0..half {
        coeffs[half - 1 - i] = FIR_PROTOTYPE[63 - i] as u16;
    }
    coeffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn quantize_in_range(n in 1..=1000_i32) {
            let taps = quantize_num_taps(n);
            prop_assert!(TAP_COUNTS.contains(&taps));
        }

        #[test]
        fn quantize_monotone(n in 1..=500_i32) {
            prop_assert!(quantize_num_taps(n) <= quantize_num_taps(n + 1));
        }

        #[test]
        fn quantize_never_exceeds_budget_above_min(n in 32..=128_i32) {
            prop_assert!(quantize_num_taps(n) <= n);
        }
    }

    #[test]
    fn quantize_boundaries() {
        assert_eq!(quantize_num_taps(16), 16);
        assert_eq!(quantize_num_taps(31), 16);
        assert_eq!(quantize_num_taps(32), 32);
        assert_eq!(quantize_num_taps(127), 112);
        assert_eq!(quantize_num_taps(128), 128);
        assert_eq!(quantize_num_taps(4096), 128);
    }

    /// Reconstruct the coefficient sequence a mock saw, in address order.
    fn programmed_coeffs(dev: &crate::Ad9361<mock::Mock>, base: u16) -> Vec<u16> {
        let addrs = dev.io.writes_to(base + FIR_COEF_ADDR);
        let lsbs = dev.io.writes_to(base + FIR_COEF_LSB);
        let msbs = dev.io.writes_to(base + FIR_COEF_MSB);
        let mut out = vec![0u16; addrs.len()];
        for ((&a, &l), &m) in addrs.iter().zip(&lsbs).zip(&msbs) {
            out[a as usize] = u16::from(l) | u16::from(m) << 8;
        }
        out
    }

    #[test]
    fn fir_mirror_symmetry() {
        for total in [16usize, 32, 64, 128] {
            let mut dev = mock::device();
            dev.setup_rx_fir(total).unwrap();
            let coeffs = programmed_coeffs(&dev, REG_RX_FIR_BASE);
            assert_eq!(coeffs.len(), total);
            let (lo, hi) = coeffs.split_at(total / 2);
            let mut rev = hi.to_vec();
            rev.reverse();
            assert_eq!(lo, &rev[..]);
        }
    }

    #[test]
    fn fir_clock_left_disabled() {
        let mut dev = mock::device();
        dev.setup_tx_fir(64).unwrap();
        let cfg = dev.io.writes_to(REG_TX_FIR_BASE + FIR_CONFIG);
        let taps_field = ((64 / 16 - 1) as u8) << 5;
        assert_eq!(*cfg.last().unwrap(), taps_field | 0x02);
    }
}
