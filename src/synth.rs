//! BBPLL and RFPLL frequency synthesis.
//!
//! Both PLLs are fractional-N. The BBPLL generates the shared ADC/DAC sample
//! clock; each RFPLL generates an RX or TX local oscillator from a VCO that
//! runs at `2 * 2^i` times the LO and is tuned with the 53-row analog LUT.

use crate::regs::*;
use crate::tables::{SynthRow, SYNTH_CAL_LUT, VCO_INDEX};
use crate::{nearly_equal, Ad9361, Direction, Interface, Result, Warning};

const BBPLL_FREF: f64 = 40e6;
const BBPLL_MODULUS: u32 = 2_088_960;
const BBVCO_MIN: f64 = 672e6;
const BBVCO_MAX: f64 = 1430e6;

const RFPLL_FREF: f64 = 80e6;
const RFPLL_MODULUS: u32 = 8_388_593;
const RFVCO_MIN: f64 = 6e9;
const RFVCO_MAX: f64 = 12e9;

impl<I: Interface> Ad9361<I> {
    /// Tune the BBPLL so its divided output hits `rate`. Returns the
    /// resulting ADC clock. Re-requests of the current core clock are no-ops.
    pub(crate) fn tune_bbvco(&mut self, rate: f64) -> Result<f64> {
        if nearly_equal(rate, self.state.req_coreclk) {
            return Ok(self.state.adcclock_freq);
        }
        self.state.req_coreclk = rate;

        let mut vcodiv_exp = 0;
        let mut vcorate = 0.0;
        for i in 1..=6 {
            let candidate = rate * f64::from(1 << i);
            if (BBVCO_MIN..=BBVCO_MAX).contains(&candidate) {
                vcodiv_exp = i;
                vcorate = candidate;
                break;
            }
        }
        if vcodiv_exp == 0 {
            self.warn(Warning::BbvcoRange);
            return Ok(self.state.adcclock_freq);
        }
        self.state.bbpll_freq = vcorate;
        self.state.adcclock_freq = vcorate / f64::from(1 << vcodiv_exp);
        self.shadow.bbpll = (self.shadow.bbpll & 0xF8) | (vcodiv_exp as u8);

        let nint = (vcorate / BBPLL_FREF).floor();
        let nfrac = ((vcorate / BBPLL_FREF - nint) * f64::from(BBPLL_MODULUS)).floor() as u32;

        self.write_reg(REG_BBPLL_VCO_CTRL, 0x10)?;
        self.write_reg(REG_BBPLL_NFRAC_0, (nfrac & 0xFF) as u8)?;
        self.write_reg(REG_BBPLL_NFRAC_1, ((nfrac >> 8) & 0xFF) as u8)?;
        self.write_reg(REG_BBPLL_NFRAC_2, ((nfrac >> 16) & 0xFF) as u8)?;
        self.write_reg(REG_BBPLL_NINT, nint as u8)?;
        self.write_reg(REG_BBPLL, self.shadow.bbpll)?;

        // Charge pump current scales with the VCO rate; 25 uA per LSB.
        let icp = 150e-6 * (vcorate / 1280e6);
        let icp_reg = (icp / 25e-6) as i32 - 1;
        self.write_reg(REG_BBPLL_CP_CURRENT, (icp_reg as u8) & 0x3F)?;

        self.write_reg(REG_BBPLL_LOOP_FILTER_1, 0xE8)?;
        self.write_reg(REG_BBPLL_LOOP_FILTER_2, 0x5B)?;
        self.write_reg(REG_BBPLL_LOOP_FILTER_3, 0x35)?;
        self.write_reg(REG_BBPLL_REF_DIV, 0x00)?; // REFCLK / 1

        self.calibrate_lock_bbpll()?;
        Ok(self.state.adcclock_freq)
    }

    /// Synthesize one LO. Computes the fractional-N configuration, applies
    /// the VCO LUT row for the actual VCO rate, and performs a single lock
    /// check after a 2 ms settle (the RFPLL locks within that by design;
    /// there is no retry loop here, unlike the calibrations).
    pub(crate) fn tune_helper(&mut self, direction: Direction, value: f64) -> Result<f64> {
        let mut vcodiv_exp = None;
        let mut vcorate = 0.0;
        for i in 0..=6u32 {
            let candidate = value * f64::from(2 << i);
            if (RFVCO_MIN..=RFVCO_MAX).contains(&candidate) {
                vcodiv_exp = Some(i);
                vcorate = candidate;
                break;
            }
        }
        let Some(vcodiv_exp) = vcodiv_exp else {
            self.warn(Warning::RfvcoRange);
            return Ok(match direction {
                Direction::Rx => self.state.rx_freq,
                Direction::Tx => self.state.tx_freq,
            });
        };
        let vcodiv = f64::from(2 << vcodiv_exp);

        let nint = (vcorate / RFPLL_FREF).floor();
        let nfrac = ((vcorate / RFPLL_FREF - nint) * f64::from(RFPLL_MODULUS)).floor() as u32;
        let actual_vcorate =
            RFPLL_FREF * (nint + f64::from(nfrac) / f64::from(RFPLL_MODULUS));
        let actual_lo = actual_vcorate / vcodiv;
        let nint = nint as u32;

        match direction {
            Direction::Rx => {
                self.state.req_rx_freq = value;
                // RF input port by band: C below edge0, B below edge1, A above.
                let band = if value < self.config.rx_band_edge0 {
                    0x30
                } else if value < self.config.rx_band_edge1 {
                    0x0C
                } else {
                    0x03
                };
                self.shadow.inputsel = (self.shadow.inputsel & 0xC0) | band;
                self.write_reg(REG_INPUT_SELECT, self.shadow.inputsel)?;

                self.setup_synth(direction, actual_vcorate)?;

                self.write_reg(REG_RX_NFRAC_0, (nfrac & 0xFF) as u8)?;
                self.write_reg(REG_RX_NFRAC_1, ((nfrac >> 8) & 0xFF) as u8)?;
                self.write_reg(REG_RX_NFRAC_2, ((nfrac >> 16) & 0xFF) as u8)?;
                self.write_reg(REG_RX_NINT_MSB, ((nint >> 8) & 0xFF) as u8)?;
                self.write_reg(REG_RX_NINT_LSB, (nint & 0xFF) as u8)?;

                self.shadow.vcodivs =
                    (self.shadow.vcodivs & 0xF0) | (vcodiv_exp as u8 & 0x0F);
                self.write_reg(REG_RFPLL_DIVIDERS, self.shadow.vcodivs)?;

                self.sleep_ms(2);
                if self.read_reg(REG_RX_LO_STATUS)? & 0x02 == 0 {
                    self.warn(Warning::LoNotLocked(Direction::Rx));
                }
                self.state.rx_freq = actual_lo;
            }
            Direction::Tx => {
                self.state.req_tx_freq = value;
                // TX output port B below the edge, A above.
                if value < self.config.tx_band_edge {
                    self.shadow.inputsel |= INPUTSEL_TXB;
                } else {
                    self.shadow.inputsel &= !INPUTSEL_TXB;
                }
                self.write_reg(REG_INPUT_SELECT, self.shadow.inputsel)?;

                self.setup_synth(direction, actual_vcorate)?;

                self.write_reg(REG_RX_NFRAC_0 + TX_SYNTH_OFFSET, (nfrac & 0xFF) as u8)?;
                self.write_reg(
                    REG_RX_NFRAC_1 + TX_SYNTH_OFFSET,
                    ((nfrac >> 8) & 0xFF) as u8,
                )?;
                self.write_reg(
                    REG_RX_NFRAC_2 + TX_SYNTH_OFFSET,
                    ((nfrac >> 16) & 0xFF) as u8,
                )?;
                self.write_reg(
                    REG_RX_NINT_MSB + TX_SYNTH_OFFSET,
                    ((nint >> 8) & 0xFF) as u8,
                )?;
                self.write_reg(REG_RX_NINT_LSB + TX_SYNTH_OFFSET, (nint & 0xFF) as u8)?;

                self.shadow.vcodivs =
                    (self.shadow.vcodivs & 0x0F) | ((vcodiv_exp as u8 & 0x0F) << 4);
                self.write_reg(REG_RFPLL_DIVIDERS, self.shadow.vcodivs)?;

                self.sleep_ms(2);
                if self.read_reg(REG_TX_LO_STATUS)? & 0x02 == 0 {
                    self.warn(Warning::LoNotLocked(Direction::Tx));
                }
                self.state.tx_freq = actual_lo;
            }
        }
        Ok(actual_lo)
    }

    /// Apply the analog VCO tuning row matching `vcorate` to the RX or TX
    /// synthesizer bank.
    pub(crate) fn setup_synth(&mut self, direction: Direction, vcorate: f64) -> Result<()> {
        let vcorate_mhz = vcorate / 1e6;
        let mut index = VCO_INDEX.len() - 1;
        for (i, &threshold) in VCO_INDEX.iter().enumerate() {
            if vcorate_mhz < f64::from(threshold) {
                index = i;
                break;
            }
        }
        let row: &SynthRow = &SYNTH_CAL_LUT[index];

        let offset = match direction {
            Direction::Rx => 0,
            Direction::Tx => TX_SYNTH_OFFSET,
        };
        self.write_reg(REG_RX_VCO_OUTPUT + offset, 0x40 | row.output_level)?;
        self.write_reg(REG_RX_VCO_VARACTOR + offset, 0xC0 | row.varactor)?;
        self.write_reg(REG_RX_VCO_BIAS + offset, row.bias_ref | row.bias_tcf << 3)?;
        self.write_reg(REG_RX_VCO_CAL_OFFSET + offset, row.cal_offset << 3)?;
        self.write_reg(REG_RX_CP_OFFSET + offset, 0x00)?;
        self.write_reg(REG_RX_VCO_VARACTOR_REF + offset, row.varactor_ref)?;
        self.write_reg(REG_RX_VCO_PD_OVERRIDE + offset, 0x70)?;
        self.write_reg(REG_RX_CP_CURRENT + offset, 0x80 | row.charge_pump)?;
        self.write_reg(
            REG_RX_LOOP_FILTER_1 + offset,
            row.loop_c2 | row.loop_c1 << 4,
        )?;
        self.write_reg(
            REG_RX_LOOP_FILTER_2 + offset,
            row.loop_r1 | row.loop_c3 << 4,
        )?;
        self.write_reg(REG_RX_LOOP_FILTER_3 + offset, row.loop_r3)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use proptest::prelude::*;

    #[test]
    fn bbvco_divider_search() {
        let mut dev = mock::device();
        // 50e6 * 16 = 800 MHz is the first product inside [672, 1430] MHz.
        let adc = dev.tune_bbvco(800e6 / 16.0).unwrap();
        assert!(nearly_equal(adc, 50e6));
        assert!(nearly_equal(dev.state.bbpll_freq, 800e6));
        assert_eq!(dev.shadow.bbpll & 0x07, 4);
        assert!(dev.take_warnings().is_empty());
    }

    #[test]
    fn bbvco_idempotent() {
        let mut dev = mock::device();
        dev.tune_bbvco(50e6).unwrap();
        let writes = dev.io.writes.len();
        let adc = dev.tune_bbvco(50e6 + 0.5).unwrap();
        assert_eq!(dev.io.writes.len(), writes);
        assert!(nearly_equal(adc, dev.state.adcclock_freq));
    }

    #[test]
    fn rf_lo_close_to_request() {
        let mut dev = mock::device();
        let actual = dev.tune_helper(Direction::Rx, 2.4e9).unwrap();
        // Fractional-N resolution at an 80 MHz reference is ~10 Hz per LSB.
        assert!((actual - 2.4e9).abs() < 100.0);
        assert_eq!(dev.state.rx_freq, actual);
        assert_eq!(dev.state.req_rx_freq, 2.4e9);
    }

    #[test]
    fn rx_band_bits_by_edge() {
        let mut dev = mock::device();
        dev.tune_helper(Direction::Rx, 800e6).unwrap();
        assert_eq!(dev.shadow.inputsel & 0x3F, 0x30);
        dev.tune_helper(Direction::Rx, 2.4e9).unwrap();
        assert_eq!(dev.shadow.inputsel & 0x3F, 0x0C);
        dev.tune_helper(Direction::Rx, 5.0e9).unwrap();
        assert_eq!(dev.shadow.inputsel & 0x3F, 0x03);
    }

    #[test]
    fn tx_divider_lands_in_high_nibble() {
        let mut dev = mock::device();
        dev.tune_helper(Direction::Rx, 800e6).unwrap();
        let rx_nibble = dev.shadow.vcodivs & 0x0F;
        dev.tune_helper(Direction::Tx, 850e6).unwrap();
        assert_eq!(dev.shadow.vcodivs & 0x0F, rx_nibble);
        assert_eq!(dev.shadow.vcodivs >> 4, 2); // 850e6 * 8 = 6.8 GHz in range
    }

    proptest! {
        #[test]
        fn rf_vco_in_range(freq in 70e6..6e9) {
            let mut dev = mock::device();
            dev.tune_helper(Direction::Rx, freq).unwrap();
            if dev.take_warnings().is_empty() {
                let exp = dev.shadow.vcodivs & 0x0F;
                let vcorate = dev.state.rx_freq * f64::from(2u32 << exp);
                prop_assert!(vcorate >= RFVCO_MIN - 1.0);
                prop_assert!(vcorate <= RFVCO_MAX + 1.0);
            }
        }
    }
}
