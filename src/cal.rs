//! Analog calibration routines.
//!
//! Every routine has the same shape: compute register values from the RC /
//! gain physics of the block, clamp to the hardware-valid range, trigger the
//! start bit, then poll completion with a bounded sleep loop. A timeout is
//! recorded as a warning and the sequence continues with whatever partial
//! state exists; nothing here aborts the caller.

use crate::regs::*;
use crate::{Ad9361, Direction, Interface, Result, Warning};
use std::f64::consts::{LN_2, TAU};

/// Legacy fast inverse square root. The original firmware used the bit-hack
/// approximation; calibration constants were validated against its error
/// profile, so it is kept behind this seam rather than replaced with
/// `f32::sqrt` outright.
pub(crate) fn approx_rsqrt(x: f32) -> f32 {
    let half = 0.5 * x;
    let mut bits = x.to_bits();
    bits = 0x5f37_59df - (bits >> 1);
    let y = f32::from_bits(bits);
    y * (1.5 - half * y * y)
}

pub(crate) fn approx_sqrt(x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    x * approx_rsqrt(x)
}

impl<I: Interface> Ad9361<I> {
    /// Poll `addr & mask` until it matches `want_set`, sleeping `sleep_ms`
    /// between reads, at most `max_polls` times. Returns whether it matched.
    fn poll_bit(
        &mut self,
        addr: u16,
        mask: u8,
        want_set: bool,
        sleep_ms: u64,
        max_polls: u32,
    ) -> Result<bool> {
        for _ in 0..max_polls {
            let bit = self.read_reg(addr)? & mask != 0;
            if bit == want_set {
                return Ok(true);
            }
            self.sleep_ms(sleep_ms);
        }
        Ok(false)
    }

    /// Start one of the `REG_CAL_CTRL` calibrations and wait for the bit to
    /// self-clear.
    fn run_cal(&mut self, cal: Cal, name: &'static str) -> Result<()> {
        self.write_reg(REG_CAL_CTRL, cal.bits())?;
        if !self.poll_bit(REG_CAL_CTRL, cal.bits(), false, 1, 100)? {
            self.warn(Warning::CalTimeout(name));
        }
        Ok(())
    }

    /// Kick the BBPLL calibration and wait for lock.
    pub(crate) fn calibrate_lock_bbpll(&mut self) -> Result<()> {
        self.write_reg(REG_BBPLL_CAL, 0x05)?; // start
        self.write_reg(REG_BBPLL_CAL, 0x01)?; // clear the start bit
        // Increase KV and phase margin.
        self.write_reg(REG_BBPLL_KV, 0x86)?;
        self.write_reg(REG_BBPLL_VCO_CTRL, 0x01)?;
        self.write_reg(REG_BBPLL_VCO_CTRL, 0x05)?;

        if !self.poll_bit(REG_BBPLL_STATUS, 0x80, true, 2, 1000)? {
            self.warn(Warning::BbpllNotLocked);
        }
        Ok(())
    }

    /// Calibrate the RX then TX RFPLL charge pumps. Requires ALERT.
    pub(crate) fn calibrate_synth_charge_pumps(&mut self) -> Result<()> {
        if self.ensm_state()? != Ensm::Alert {
            self.warn(Warning::NotInAlert("charge pump cal"));
        }
        self.write_reg(REG_RX_CP_CAL, 0x04)?;
        if !self.poll_bit(REG_RX_CP_STATUS, 0x80, true, 1, 5)? {
            self.warn(Warning::ChargePumpTimeout(Direction::Rx));
        }
        self.write_reg(REG_RX_CP_CAL, 0x00)?;

        self.write_reg(REG_TX_CP_CAL, 0x04)?;
        if !self.poll_bit(REG_TX_CP_STATUS, 0x80, true, 1, 5)? {
            self.warn(Warning::ChargePumpTimeout(Direction::Tx));
        }
        self.write_reg(REG_TX_CP_CAL, 0x00)?;
        Ok(())
    }

    /// Tune the RX baseband analog filter to the current baseband bandwidth.
    pub(crate) fn calibrate_baseband_rx_analog_filter(&mut self) -> Result<()> {
        // Baseband bandwidth is half the complex bandwidth.
        let bbbw = (self.state.baseband_bw / 2.0).clamp(0.2e6, 28e6);
        let tune_clk = 1.4 * bbbw * TAU / LN_2;
        self.state.rx_bbf_tunediv =
            ((self.state.bbpll_freq / tune_clk).ceil() as u16).min(511);
        self.shadow.bbftune_config = (self.shadow.bbftune_config & 0xFE)
            | ((self.state.rx_bbf_tunediv >> 8) & 0x01) as u8;

        // Corner registers: integer MHz plus the fractional part in
        // 7.8125 kHz steps, rounded half up.
        let bbbw_mhz = bbbw / 1e6;
        let frac = ((bbbw_mhz - bbbw_mhz.floor()) * 1000.0) / 7.8125;
        let bbbw_khz = ((frac + 0.5).floor() as u8).min(127);

        self.write_reg(REG_RX_BBF_MHZ, bbbw_mhz as u8)?;
        self.write_reg(REG_RX_BBF_KHZ, bbbw_khz)?;
        self.write_reg(REG_RX_BBF_TUNE_DIV, (self.state.rx_bbf_tunediv & 0xFF) as u8)?;
        self.write_reg(REG_RX_BBF_TUNE_CONFIG, self.shadow.bbftune_config)?;
        self.write_reg(REG_RX_BBF_POWER, 0x3F)?;
        self.write_reg(REG_RX_BBF_CONFIG, 0x03)?;
        self.write_reg(REG_RX1_TUNE_CTRL, 0x02)?;
        self.write_reg(REG_RX2_TUNE_CTRL, 0x02)?;
        self.run_cal(Cal::RX_BBF, "RX BBF")?;
        self.write_reg(REG_RX1_TUNE_CTRL, 0x03)?;
        self.write_reg(REG_RX2_TUNE_CTRL, 0x03)?;
        Ok(())
    }

    /// Tune the TX baseband analog filter.
    pub(crate) fn calibrate_baseband_tx_analog_filter(&mut self) -> Result<()> {
        let bbbw = (self.state.baseband_bw / 2.0).clamp(0.625e6, 20e6);
        let tune_clk = 1.6 * bbbw * TAU / LN_2;
        let tunediv = ((self.state.bbpll_freq / tune_clk).ceil() as u16).min(511);
        self.shadow.bbftune_mode =
            (self.shadow.bbftune_mode & 0xFE) | ((tunediv >> 8) & 0x01) as u8;

        self.write_reg(REG_TX_BBF_TUNE_DIV, (tunediv & 0xFF) as u8)?;
        self.write_reg(REG_TX_BBF_TUNE_MODE, self.shadow.bbftune_mode)?;
        self.write_reg(REG_TX_BBF_POWER, 0x22)?;
        self.run_cal(Cal::TX_BBF, "TX BBF")?;
        self.write_reg(REG_TX_BBF_POWER, 0x26)?;
        Ok(())
    }

    /// Configure the secondary (pre-PA) TX filter: double the resistor from
    /// 100 ohm until a capacitor code of at most 63 covers the corner.
    pub(crate) fn calibrate_secondary_tx_filter(&mut self) -> Result<()> {
        let bbbw = (self.state.baseband_bw / 2.0).clamp(0.53e6, 20e6);
        let bbbw_mhz = bbbw / 1e6;
        // Corner at 5x the baseband bandwidth, in Mrad/s.
        let corner = 5.0 * bbbw_mhz * TAU;

        let mut res = 100u32;
        let mut cap = 0i32;
        for _ in 0..4 {
            cap = ((1e18 / (corner * 1e6 * f64::from(res)) / 1e6) + 0.5).floor() as i32 - 12;
            if cap <= 63 {
                break;
            }
            res *= 2;
        }
        let cap = cap.clamp(0, 63) as u8;

        let complex_bw = bbbw * 2.0;
        let reg_bw = if complex_bw <= 9e6 {
            0x59
        } else if complex_bw <= 24e6 {
            0x56
        } else if complex_bw <= 25e6 {
            0x57
        } else {
            self.warn(Warning::SecondaryFilterRange);
            0x00
        };
        let reg_res = match res {
            100 => 0x0C,
            200 => 0x04,
            400 => 0x03,
            _ => 0x01,
        };

        self.write_reg(REG_TX_BBF2_CAP, cap)?;
        self.write_reg(REG_TX_BBF2_RES, reg_res)?;
        self.write_reg(REG_TX_BBF2_BW, reg_bw)?;
        Ok(())
    }

    /// Set the RX trans-impedance amplifier feedback caps from the codes the
    /// BBF calibration left behind.
    pub(crate) fn calibrate_rx_tias(&mut self) -> Result<()> {
        let c3_msb = f64::from(self.read_reg(REG_BBF_C3_MSB)? & 0x3F);
        let c3_lsb = f64::from(self.read_reg(REG_BBF_C3_LSB)? & 0x7F);
        let r2346 = 18300.0 * f64::from(self.read_reg(REG_BBF_R2346)? & 0x07);

        let cbbf = 160.0 * c3_msb + 10.0 * c3_lsb + 140.0; // fF
        let ctia_ff = cbbf * r2346 * 0.56 / 3500.0;

        let (c_lsb, c_msb);
        if ctia_ff > 2920.0 {
            c_lsb = 0x40;
            c_msb = (((ctia_ff - 400.0) / 320.0 + 0.5).floor() as i32).clamp(0, 127) as u8;
        } else {
            c_lsb = ((((ctia_ff - 400.0) / 40.0 + 0.5).floor() as i32 + 0x40).clamp(0, 127)) as u8;
            c_msb = 0;
        }

        self.write_reg(REG_TIA_CONFIG, 0x60)?;
        self.write_reg(REG_TIA1_C_MSB, c_msb)?;
        self.write_reg(REG_TIA2_C_MSB, c_msb)?;
        self.write_reg(REG_TIA1_C_LSB, c_lsb)?;
        self.write_reg(REG_TIA2_C_LSB, c_lsb)?;
        Ok(())
    }

    /// Program the 40-byte ADC setup block. Later bytes are derived from
    /// earlier ones, so the chain is computed strictly in index order.
    pub(crate) fn setup_adc(&mut self) -> Result<()> {
        let bbbw_mhz = (((self.state.bbpll_freq / 1e6)
            / f64::from(self.state.rx_bbf_tunediv.max(1)))
            * LN_2
            / (1.4 * TAU))
            .clamp(0.20, 28.0);

        let c3_msb = f64::from(self.read_reg(REG_BBF_C3_MSB)? & 0x3F);
        let c3_lsb = f64::from(self.read_reg(REG_BBF_C3_LSB)? & 0x7F);
        let r2346 = 18300.0 * f64::from(self.read_reg(REG_BBF_R2346)? & 0x07);
        let fsadc = self.state.adcclock_freq / 1e6;

        // BBF RC time constant, with the response flattening correction
        // above 18 MHz.
        let cbbf = 160e-15 * c3_msb + 10e-15 * c3_lsb + 140e-15;
        let mut rc = 1.4 * TAU * r2346 * cbbf * (bbbw_mhz * 1e6);
        if bbbw_mhz >= 18.0 {
            rc *= 1.0 + 0.01 * (bbbw_mhz - 18.0);
        }
        let scale_res = f64::from(approx_sqrt((1.0 / rc) as f32));
        let scale_cap = scale_res;
        let scale_snr = if self.state.adcclock_freq < 80e6 {
            1.0
        } else {
            1.584_893_192 // +2 dB
        };
        let maxsnr = 640.0 / 160.0;
        let min_term = (maxsnr * fsadc / 640.0).sqrt().min(1.0);

        let clamp8 = |v: f64, hi: u32| -> u8 { (v.max(0.0) as u32).min(hi) as u8 };

        let mut data = [0u8; ADC_SETUP_LEN];
        data[3] = 0x24;
        data[4] = 0x24;

        data[7] = clamp8(
            (80.0 * scale_snr * scale_res * min_term - 0.5).floor(),
            124,
        );
        let d7 = f64::from(data[7]);
        data[8] = clamp8(
            (20.0 * (640.0 / fsadc) * (d7 / 80.0) / (scale_res * scale_cap) + 0.5).floor(),
            255,
        );

        data[10] = clamp8((77.0 * scale_res * min_term - 0.5).floor(), 127);
        let d10 = f64::from(data[10]);
        data[9] = clamp8((0.8 * d10).floor(), 127);
        data[11] = clamp8(
            (20.0 * (640.0 / fsadc) * (d10 / 77.0) / (scale_res * scale_cap) + 0.5).floor(),
            255,
        );

        data[12] = clamp8((80.0 * scale_res * min_term - 0.5).floor(), 127);
        let d12 = f64::from(data[12]);
        data[13] = clamp8(
            (20.0 * (640.0 / fsadc) * (d12 / 80.0) / (scale_res * scale_cap) - 1.5).floor(),
            255,
        );
        data[14] = 21 * clamp8((0.1 * 640.0 / fsadc).floor(), 10);

        data[15] = clamp8((1.025 * d7).floor(), 127);
        let d15 = f64::from(data[15]);
        data[16] = clamp8(
            (d15 * (0.98 + 0.02 * (640.0 / fsadc / maxsnr).max(1.0))).floor(),
            127,
        );
        data[17] = data[15];

        data[18] = clamp8((0.975 * d10).floor(), 127);
        let d18 = f64::from(data[18]);
        data[19] = clamp8(
            (d18 * (0.98 + 0.02 * (640.0 / fsadc / maxsnr).max(1.0))).floor(),
            127,
        );
        data[20] = data[18];

        data[21] = clamp8((0.975 * d12).floor(), 127);
        let d21 = f64::from(data[21]);
        data[22] = clamp8(
            (d21 * (0.98 + 0.02 * (640.0 / fsadc / maxsnr).max(1.0))).floor(),
            127,
        );
        data[23] = data[21];

        data[24] = 0x2E;
        // Bias words for the four comparator banks.
        for b in &mut data[25..33] {
            *b = 0x10;
        }
        data[33] = 0x17;
        data[34] = 0x15;
        data[35] = 0x15;
        data[36] = 0x0B;
        data[37] = 0x03;
        data[38] = 0x03;
        data[39] = 0x30;

        for (i, &byte) in data.iter().enumerate() {
            self.write_reg(REG_ADC_SETUP_BASE + i as u16, byte)?;
        }
        Ok(())
    }

    pub(crate) fn calibrate_baseband_dc_offset(&mut self) -> Result<()> {
        self.write_reg(REG_BBDC_COUNT, 0x3F)?;
        self.write_reg(REG_BBDC_ATTEN, 0x0F)?;
        self.write_reg(REG_BBDC_SHIFT, 0x01)?;
        self.run_cal(Cal::BB_DC_OFFSET, "baseband DC offset")
    }

    pub(crate) fn calibrate_rf_dc_offset(&mut self) -> Result<()> {
        self.write_reg(REG_RFDC_WAIT, 0x20)?;
        self.write_reg(REG_RFDC_COUNT, 0x32)?;
        self.write_reg(REG_RFDC_CONFIG_1, 0x24)?;
        self.write_reg(REG_RFDC_CONFIG_2, 0x83)?;
        self.write_reg(REG_RFDC_GAIN, 0x05)?;
        self.write_reg(REG_RFDC_ATTEN, 0x30)?;
        self.run_cal(Cal::RF_DC_OFFSET, "RF DC offset")
    }

    pub(crate) fn calibrate_rx_quadrature(&mut self) -> Result<()> {
        self.write_reg(REG_RFDC_COUNT, 0x32)?;
        self.write_reg(REG_RFDC_CONFIG_1, 0x24)?;
        self.write_reg(REG_RFDC_GAIN, 0x05)?;
        self.write_reg(REG_RFDC_ATTEN, 0x30)?;
        self.run_cal(Cal::RX_QUAD, "RX quadrature")
    }

    /// One pass of the TX quadrature calibration for the currently selected
    /// TX path.
    fn tx_quadrature_routine(&mut self) -> Result<()> {
        // Mirror the calibrated NCO frequency bits into the RX NCO field,
        // then rewrite the TX side with them.
        let reg_status = self.read_reg(REG_QUAD_CAL_STATUS)?;
        let nco_freq = reg_status & 0xC0;
        self.write_reg(REG_QUAD_CAL_NCO, 0x15 | nco_freq >> 1)?;
        let reg_status = self.read_reg(REG_QUAD_CAL_STATUS)?;
        self.write_reg(REG_QUAD_CAL_STATUS, (reg_status & 0x3F) | nco_freq)?;

        // The two calibration tones must land inside the RX BBF or they
        // never reach the ADC.
        let max_cal_freq = self.state.baseband_bw
            * f64::from(self.state.tfir_factor)
            * f64::from((nco_freq >> 6) + 1)
            / 32.0
            * 2.0;
        let bbbw = (self.state.baseband_bw / 2.0).clamp(0.2e6, 28e6);
        if max_cal_freq > bbbw {
            self.warn(Warning::QuadToneRange);
        }

        self.write_reg(REG_QUAD_CAL_TRACK, 0x7B)?;
        self.write_reg(REG_QUAD_CAL_COUNT, 0xFF)?;
        self.write_reg(REG_QUAD_CAL_KEXP, 0x7F)?;
        self.write_reg(REG_QUAD_CAL_MAG_THRESH, 0x01)?;
        self.write_reg(REG_QUAD_CAL_PHASE_THRESH, 0x01)?;
        self.write_reg(REG_QUAD_CAL_SETTLE, 0x22)?;
        self.write_reg(REG_QUAD_CAL_CTRL, 0xF0)?;
        self.write_reg(REG_QUAD_CAL_LPF_GAIN, 0x00)?;

        self.write_reg(REG_CAL_CTRL, Cal::TX_QUAD.bits())?;
        if !self.poll_bit(REG_CAL_CTRL, Cal::TX_QUAD.bits(), false, 10, 100)? {
            self.warn(Warning::CalTimeout("TX quadrature"));
        }
        Ok(())
    }

    /// Calibrate TX quadrature on both TX paths (A then B) by toggling the
    /// path-select bit, restoring the original selection afterward.
    pub(crate) fn calibrate_tx_quadrature(&mut self) -> Result<()> {
        if self.ensm_state()? != Ensm::Alert {
            self.warn(Warning::NotInAlert("TX quad cal"));
        }
        let orig_inputsel = self.shadow.inputsel;

        self.shadow.inputsel &= !INPUTSEL_TXB;
        self.write_reg(REG_INPUT_SELECT, self.shadow.inputsel)?;
        self.tx_quadrature_routine()?;

        self.shadow.inputsel |= INPUTSEL_TXB;
        self.write_reg(REG_INPUT_SELECT, self.shadow.inputsel)?;
        self.tx_quadrature_routine()?;

        self.shadow.inputsel = orig_inputsel;
        self.write_reg(REG_INPUT_SELECT, self.shadow.inputsel)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn approx_sqrt_close(x in 1e-6f32..1e6) {
            let exact = x.sqrt();
            let approx = approx_sqrt(x);
            // One Newton step keeps the bit-hack within ~0.2%.
            prop_assert!((approx - exact).abs() / exact < 0.005);
        }
    }

    #[test]
    fn bbpll_lock_poll_timeout_warns() {
        let mut dev = mock::device();
        dev.io.reads.insert(REG_BBPLL_STATUS, 0x00); // never locks
        dev.calibrate_lock_bbpll().unwrap();
        assert_eq!(dev.take_warnings(), vec![Warning::BbpllNotLocked]);
        // 1000 polls x 2 ms
        assert_eq!(dev.io.slept_ms, 2000);
    }

    #[test]
    fn charge_pump_requires_alert() {
        let mut dev = mock::device();
        // ENSM readback still reports SLEEP.
        dev.calibrate_synth_charge_pumps().unwrap();
        assert!(dev
            .take_warnings()
            .contains(&Warning::NotInAlert("charge pump cal")));
    }

    #[test]
    fn rx_bbf_divider_clamped() {
        let mut dev = mock::device();
        dev.state.bbpll_freq = 1430e6;
        dev.state.baseband_bw = 0.2e6; // forces a huge divider
        dev.calibrate_baseband_rx_analog_filter().unwrap();
        assert_eq!(dev.state.rx_bbf_tunediv, 511);
        assert_eq!(dev.shadow.bbftune_config & 0x01, 1);
    }

    #[test]
    fn secondary_filter_resistor_search() {
        let mut dev = mock::device();
        dev.state.baseband_bw = 5e6;
        dev.calibrate_secondary_tx_filter().unwrap();
        let caps = dev.io.writes_to(REG_TX_BBF2_CAP);
        assert_eq!(caps.len(), 1);
        assert!(caps[0] <= 63);
        // Complex bandwidth 5 MHz maps to the <=9 MHz register constant.
        assert_eq!(dev.io.writes_to(REG_TX_BBF2_BW), vec![0x59]);
    }

    #[test]
    fn tia_codes_clamped() {
        let mut dev = mock::device();
        // Max codes push CTIA over the 2920 fF branch.
        dev.io.reads.insert(REG_BBF_C3_MSB, 0x3F);
        dev.io.reads.insert(REG_BBF_C3_LSB, 0x7F);
        dev.io.reads.insert(REG_BBF_R2346, 0x07);
        dev.calibrate_rx_tias().unwrap();
        for addr in [REG_TIA1_C_MSB, REG_TIA2_C_MSB, REG_TIA1_C_LSB, REG_TIA2_C_LSB] {
            for v in dev.io.writes_to(addr) {
                assert!(v <= 127);
            }
        }
    }

    #[test]
    fn adc_setup_writes_forty_bytes() {
        let mut dev = mock::device();
        dev.state.bbpll_freq = 800e6;
        dev.state.adcclock_freq = 50e6;
        dev.state.rx_bbf_tunediv = 63;
        dev.setup_adc().unwrap();
        for i in 0..ADC_SETUP_LEN {
            assert_eq!(
                dev.io.writes_to(REG_ADC_SETUP_BASE + i as u16).len(),
                1,
                "byte {i} written once"
            );
        }
    }

    #[test]
    fn tx_quadrature_restores_path_select() {
        let mut dev = mock::device();
        dev.ensm_force_alert().unwrap();
        dev.state.baseband_bw = 25e6;
        dev.state.tfir_factor = 2;
        dev.shadow.inputsel |= INPUTSEL_TXB;
        let orig = dev.shadow.inputsel;
        dev.calibrate_tx_quadrature().unwrap();
        assert_eq!(dev.shadow.inputsel, orig);
        let sel_writes = dev.io.writes_to(REG_INPUT_SELECT);
        // Path A, path B, restore.
        assert_eq!(sel_writes.len(), 3);
        assert_eq!(sel_writes[0] & INPUTSEL_TXB, 0);
        assert_eq!(sel_writes[1] & INPUTSEL_TXB, INPUTSEL_TXB);
        assert_eq!(*sel_writes.last().unwrap(), orig);
    }
}
