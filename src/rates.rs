//! Sample-rate planning: decimation/interpolation chain selection, BBPLL
//! retuning, and FIR sizing for a requested complex sample rate.

use crate::fir::quantize_num_taps;
use crate::regs::*;
use crate::{Ad9361, Interface, Result, Warning};

/// One half-band/FIR chain arrangement. `filt` is the enable-filter shadow
/// byte (both chains on), `divfactor` relates the ADC clock to the sample
/// rate, `tfir` is the TX FIR interpolation.
struct RateBracket {
    limit: f64,
    filt: u8,
    divfactor: u32,
    tfir: u32,
}

/// Brackets in ascending rate order; the first whose `limit` covers the
/// request wins. The last row is the full-bandwidth chain with the TX FIR
/// at interpolate-by-1.
const BRACKETS: [RateBracket; 7] = [
    // DEC3, HB2, HB1, FIR x4
    RateBracket { limit: 0.33e6, filt: 0xEE, divfactor: 48, tfir: 2 },
    // HB3, HB2, HB1, FIR x4
    RateBracket { limit: 0.66e6, filt: 0xDE, divfactor: 32, tfir: 2 },
    // HB3, HB2, HB1, FIR x2
    RateBracket { limit: 20e6, filt: 0xDD, divfactor: 16, tfir: 2 },
    // DEC3, HB2, HB1, FIR x2
    RateBracket { limit: 23e6, filt: 0xED, divfactor: 24, tfir: 2 },
    // HB3, HB2, HB1, FIR x1
    RateBracket { limit: 41e6, filt: 0xDC, divfactor: 16, tfir: 2 },
    // DEC3, HB1, FIR x2
    RateBracket { limit: 56e6, filt: 0xE5, divfactor: 12, tfir: 2 },
    // DEC3, HB2, FIR x2
    RateBracket { limit: 61.44e6, filt: 0xE1, divfactor: 6, tfir: 1 },
];

impl<I: Interface> Ad9361<I> {
    /// Plan and program the clock chain for `rate` samples per second.
    /// Returns the rate actually achieved after BBPLL quantization.
    ///
    /// Does not touch the ENSM; the caller must already hold the chip in a
    /// state where the BBPLL and FIRs may be reprogrammed.
    pub(crate) fn setup_rates(&mut self, rate: f64) -> Result<f64> {
        let bracket = match BRACKETS.iter().find(|b| rate <= b.limit) {
            Some(b) => b,
            None => {
                self.warn(Warning::RateUnrecognized);
                &BRACKETS[BRACKETS.len() - 1]
            }
        };

        // Preserve the chain-enable bits across the filter-config rewrite.
        self.shadow.rxfilt = (self.shadow.rxfilt & CHAIN_MASK) | (bracket.filt & !CHAIN_MASK);
        self.shadow.txfilt = (self.shadow.txfilt & CHAIN_MASK) | (bracket.filt & !CHAIN_MASK);
        self.state.tfir_factor = bracket.tfir;

        let adcclk = self.tune_bbvco(rate * f64::from(bracket.divfactor))?;

        // The DAC can only track the ADC up to 336 MHz; above that it runs
        // at half rate.
        let dacclk = if adcclk > 336e6 {
            self.shadow.bbpll |= BBPLL_DACCLK_HALF;
            adcclk / 2.0
        } else {
            self.shadow.bbpll &= !BBPLL_DACCLK_HALF;
            adcclk
        };

        self.write_reg(REG_RX_ENABLE_FILTER, self.shadow.rxfilt)?;
        self.write_reg(REG_TX_ENABLE_FILTER, self.shadow.txfilt)?;
        self.write_reg(REG_BBPLL, self.shadow.bbpll)?;

        // Longest FIR whose programming clock budget fits at this rate.
        let tap_ceiling = if bracket.tfir == 1 { 64 } else { 128 };
        let max_tx_taps = ((16.0 * (dacclk / rate) + 0.5) as i32).min(tap_ceiling);
        let max_rx_taps = ((16.0 * (adcclk / rate)) as i32).min(128);
        let num_tx_taps = quantize_num_taps(max_tx_taps) as usize;
        let num_rx_taps = quantize_num_taps(max_rx_taps) as usize;

        self.setup_tx_fir(num_tx_taps)?;
        self.setup_rx_fir(num_rx_taps)?;

        self.state.baseband_bw = rate / 2.0;
        Ok(adcclk / f64::from(bracket.divfactor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn bracket_boundary_inclusive() {
        // Exactly 20 MS/s stays in the /16 bracket, not the /24 one.
        let mut dev = mock::device();
        let achieved = dev.setup_rates(20e6).unwrap();
        assert!(dev.take_warnings().is_empty());
        assert_eq!(dev.shadow.rxfilt, 0xDD);
        assert_eq!(dev.state.tfir_factor, 2);
        // 20e6 * 16 = 320 MHz ADC clock; BBVCO 640 MHz is below range, so
        // the search settles on 1280 MHz with a /4 divider.
        assert!(crate::nearly_equal(dev.state.bbpll_freq, 1280e6));
        assert!(crate::nearly_equal(achieved, 20e6));
    }

    #[test]
    fn every_bracket_boundary_is_inclusive() {
        // Each upper edge stays in its own bracket.
        let edges: [(f64, u8, u32); 5] = [
            (0.33e6, 0xEE, 2),
            (0.66e6, 0xDE, 2),
            (23e6, 0xED, 2),
            (41e6, 0xDC, 2),
            (56e6, 0xE5, 2),
        ];
        for (rate, filt, tfir) in edges {
            let mut dev = mock::device();
            let achieved = dev.setup_rates(rate).unwrap();
            assert!(dev.take_warnings().is_empty(), "{rate}");
            assert_eq!(dev.shadow.rxfilt, filt, "{rate}");
            assert_eq!(dev.shadow.txfilt, filt, "{rate}");
            assert_eq!(dev.state.tfir_factor, tfir, "{rate}");
            assert!(crate::nearly_equal(achieved, rate), "{rate}");
        }
    }

    #[test]
    fn just_past_an_edge_moves_brackets() {
        let mut dev = mock::device();
        dev.setup_rates(23e6 + 1.0).unwrap();
        assert_eq!(dev.shadow.rxfilt, 0xDC);
    }

    #[test]
    fn thirty_msps_plan() {
        let mut dev = mock::device();
        let achieved = dev.setup_rates(30e6).unwrap();
        assert!(dev.take_warnings().is_empty());
        assert_eq!(dev.shadow.rxfilt, 0xDC);
        assert_eq!(dev.state.tfir_factor, 2);
        // 30e6 * 16 = 480 MHz ADC clock from a 960 MHz BBVCO.
        assert!(crate::nearly_equal(dev.state.bbpll_freq, 960e6));
        assert!(crate::nearly_equal(achieved, 30e6));
        assert!(crate::nearly_equal(dev.state.baseband_bw, 15e6));
        // ADC clock above 336 MHz halves the DAC clock.
        assert_ne!(dev.shadow.bbpll & BBPLL_DACCLK_HALF, 0);
    }

    #[test]
    fn top_bracket_shrinks_tx_fir() {
        let mut dev = mock::device();
        dev.setup_rates(61.44e6).unwrap();
        assert_eq!(dev.state.tfir_factor, 1);
        assert_eq!(dev.shadow.rxfilt, 0xE1);
        // TX FIR capped at 64 taps when interpolating by 1.
        let cfg = dev.io.writes_to(REG_TX_FIR_BASE + FIR_CONFIG);
        let taps_field = cfg[0] >> 5;
        assert!(taps_field <= 3); // (taps/16 - 1) for <= 64 taps
    }

    #[test]
    fn out_of_range_rate_warns() {
        let mut dev = mock::device();
        dev.setup_rates(70e6).unwrap();
        assert!(dev.take_warnings().contains(&Warning::RateUnrecognized));
    }

    #[test]
    fn chain_enable_bits_survive() {
        let mut dev = mock::device();
        dev.shadow.rxfilt = CHAIN_1; // only chain 1 active
        dev.setup_rates(10e6).unwrap();
        assert_eq!(dev.shadow.rxfilt & CHAIN_MASK, CHAIN_1);
        assert_eq!(dev.shadow.rxfilt & !CHAIN_MASK, 0xDD & !CHAIN_MASK);
    }
}
