//! ENSM (enable state machine) control and the top-level sequences.
//!
//! The chip exposes three states this driver uses: SLEEP/WAIT (clocks may be
//! reprogrammed), ALERT (synthesizers running, calibrations allowed), and
//! FDD (both signal paths live). SLEEP and FDD are only reachable through
//! ALERT; anything else is a programming error, not a warning.

use crate::regs::*;
use crate::{nearly_equal, Ad9361, Direction, Error, Interface, Result, Warning};

/// Clock rate programmed by [`Ad9361::init`] before the caller picks one.
const INIT_CLOCK_RATE: f64 = 50e6;

const INIT_RX_FREQ: f64 = 800e6;
const INIT_TX_FREQ: f64 = 850e6;

impl<I: Interface> Ad9361<I> {
    /// Current ENSM state from the status register's low nibble.
    pub fn ensm_state(&mut self) -> Result<Ensm> {
        let nibble = self.read_reg(REG_ENSM_STATE)? & 0x0F;
        Ensm::try_from(nibble).map_err(|_| Error::EnsmDecode(nibble))
    }

    /// Command a transition to `to`. Same-state requests are no-ops;
    /// transitions that skip ALERT are rejected.
    pub(crate) fn transition(&mut self, to: Ensm) -> Result<()> {
        let from = self.ensm_state()?;
        if from == to {
            return Ok(());
        }
        let command = match (from, to) {
            (Ensm::Sleep, Ensm::Alert) | (Ensm::Fdd, Ensm::Alert) => ENSM_MODE_ALERT,
            (Ensm::Alert, Ensm::Fdd) => ENSM_MODE_FDD,
            (Ensm::Alert, Ensm::Sleep) => ENSM_MODE_WAIT,
            _ => return Err(Error::EnsmTransition { from, to }),
        };
        self.write_reg(REG_ENSM_MODE, command)?;
        Ok(())
    }

    /// Drop to ALERT from wherever the chip currently is.
    pub(crate) fn ensm_force_alert(&mut self) -> Result<()> {
        self.transition(Ensm::Alert)
    }

    /// Full bring-up from reset. The order matters: the BBPLL has to lock
    /// before either LO tunes, the quadrature calibrations need the gain
    /// table and ADC setup in place, and the chip ends in FDD with only RX1
    /// active until the host asks for more.
    pub fn init(&mut self) -> Result<()> {
        self.write_reg(REG_SPI_CONF, 0x81)?; // soft reset
        self.sleep_ms(20);
        self.write_reg(REG_SPI_CONF, 0x00)?;

        self.write_reg(REG_DIGITAL_IO_CTRL, 0x00)?;
        self.write_reg(REG_MASTER_BIAS, 0x0E)?;
        self.write_reg(REG_BANDGAP_TRIM, 0x0E)?;

        // REFCLK doubled into the RFPLLs; BBPLL fed per the board's routing.
        self.write_reg(REG_RFPLL_REF_SCALE, 0x07)?;
        self.write_reg(REG_RFPLL_REF_ENABLE, 0xFF)?;
        let clock_enable = match self.config.clocking_mode {
            crate::ClockingMode::Xtal => 0x17,
            crate::ClockingMode::ExtClk => 0x07,
        };
        self.write_reg(REG_CLOCK_ENABLE, clock_enable)?;

        // Parallel port: dual-port full-bus FDD timing.
        self.write_reg(REG_PPORT_CONF_1, 0x00)?;
        self.write_reg(REG_PPORT_CONF_2, 0x08)?;
        self.write_reg(REG_PPORT_CONF_3, 0x15)?;
        self.write_reg(REG_RX_CLOCK_DATA_DELAY, 0x20)?;
        self.write_reg(REG_TX_CLOCK_DATA_DELAY, 0x07)?;

        // Free-running temperature sensor; AuxADC and AuxDACs parked.
        self.write_reg(REG_TEMP_OFFSET, 0xCE)?;
        self.write_reg(REG_TEMP_WINDOW, 0x07)?;
        self.write_reg(REG_TEMP_PERIOD, 0x80)?;
        self.write_reg(REG_AUXADC_CONFIG, 0x00)?;
        self.write_reg(REG_AUXDAC_1_WORD, 0x00)?;
        self.write_reg(REG_AUXDAC_2_WORD, 0x00)?;
        self.write_reg(REG_AUXDAC_1_CONFIG, 0x00)?;
        self.write_reg(REG_AUXDAC_2_CONFIG, 0x00)?;
        self.write_reg(REG_CTRL_OUT_POINTER, 0x00)?;
        self.write_reg(REG_CTRL_OUT_ENABLE, 0xFF)?;
        self.write_reg(REG_GPO_CONFIG, 0x00)?;

        // FDD with independent synthesizers, transitions driven over SPI.
        self.write_reg(REG_ENSM_FDD_MODE, 0x01)?;
        self.write_reg(REG_ENSM_CONFIG_2, 0x0C)?;
        self.write_reg(REG_ENSM_MODE, ENSM_MODE_WAIT)?;
        self.write_reg(REG_INPUT_SELECT, self.shadow.inputsel)?;

        // Default clock plan, programmed while still in WAIT.
        self.state.req_clock_rate = INIT_CLOCK_RATE;
        let achieved = self.setup_rates(INIT_CLOCK_RATE)?;
        self.state.clock_rate = achieved;

        self.transition(Ensm::Alert)?;
        self.calibrate_synth_charge_pumps()?;
        self.tune_helper(Direction::Rx, INIT_RX_FREQ)?;
        self.tune_helper(Direction::Tx, INIT_TX_FREQ)?;

        self.program_mixer_gm_subtable()?;
        self.program_gain_table(INIT_RX_FREQ)?;
        self.setup_gain_control()?;

        self.calibrate_baseband_rx_analog_filter()?;
        self.calibrate_baseband_tx_analog_filter()?;
        self.calibrate_secondary_tx_filter()?;
        self.calibrate_rx_tias()?;
        self.setup_adc()?;
        self.calibrate_baseband_dc_offset()?;
        self.calibrate_rf_dc_offset()?;
        self.calibrate_tx_quadrature()?;
        self.calibrate_rx_quadrature()?;

        // DC offset tracking follows the statics calibrated above.
        self.write_reg(REG_BBDC_TRACK, 0x01)?;
        self.write_reg(REG_RFDC_TRACK, 0x01)?;

        self.set_active_chains(false, false, true, false)?;
        self.transition(Ensm::Fdd)
    }

    /// Reprogram the whole clock chain for `rate`, then rebuild everything
    /// that was derived from the old one: LO locks, gain programming, and
    /// every rate-dependent calibration. Returns the rate achieved. The
    /// ENSM is returned to the state it was entered in.
    pub fn set_clock_rate(&mut self, rate: f64) -> Result<f64> {
        if nearly_equal(rate, self.state.req_clock_rate) {
            return Ok(self.state.clock_rate);
        }
        self.state.req_clock_rate = rate;

        let entry = self.ensm_state()?;
        if entry == Ensm::Sleep {
            // Callers are expected to arrive from ALERT or FDD.
            self.warn(Warning::NotInAlert("clock rate change"));
        }
        if entry == Ensm::Fdd {
            self.transition(Ensm::Alert)?;
        }
        // Clock reprogramming only in WAIT.
        self.transition(Ensm::Sleep)?;
        let achieved = self.setup_rates(rate)?;
        self.state.clock_rate = achieved;
        self.transition(Ensm::Alert)?;

        // The RFPLLs and gain indices were set against the old clock chain;
        // bring them back before the analog filters recalibrate.
        self.calibrate_synth_charge_pumps()?;
        if self.state.rx_freq > 0.0 {
            self.tune_helper(Direction::Rx, self.state.rx_freq)?;
        }
        if self.state.tx_freq > 0.0 {
            self.tune_helper(Direction::Tx, self.state.tx_freq)?;
        }
        self.setup_gain_control()?;
        if self.state.rx_freq > 0.0 {
            self.state.curr_gain_table = 0; // force the reload
            self.program_gain_table(self.state.rx_freq)?;
        } else {
            self.program_gains()?;
        }

        self.calibrate_baseband_rx_analog_filter()?;
        self.calibrate_baseband_tx_analog_filter()?;
        self.calibrate_secondary_tx_filter()?;
        self.calibrate_rx_tias()?;
        self.setup_adc()?;
        self.calibrate_baseband_dc_offset()?;
        self.calibrate_rf_dc_offset()?;
        self.calibrate_tx_quadrature()?;
        self.calibrate_rx_quadrature()?;

        if entry == Ensm::Fdd {
            self.transition(Ensm::Fdd)?;
        }
        Ok(achieved)
    }

    /// Tune one LO. Re-requests of the current frequency are no-ops. On a
    /// real move the quadrature calibrations rerun and, for RX, the gain
    /// table follows the band. The ENSM is restored on exit.
    pub fn tune(&mut self, direction: Direction, freq: f64) -> Result<f64> {
        let (req, current) = match direction {
            Direction::Rx => (self.state.req_rx_freq, self.state.rx_freq),
            Direction::Tx => (self.state.req_tx_freq, self.state.tx_freq),
        };
        if nearly_equal(freq, req) {
            return Ok(current);
        }

        let entry = self.ensm_state()?;
        if entry == Ensm::Fdd {
            self.transition(Ensm::Alert)?;
        }

        let actual = self.tune_helper(direction, freq)?;
        if direction == Direction::Rx {
            self.program_gain_table(actual)?;
        }
        self.program_gains()?;
        self.calibrate_tx_quadrature()?;
        self.calibrate_rx_quadrature()?;

        if entry == Ensm::Fdd {
            self.transition(Ensm::Fdd)?;
        }
        Ok(actual)
    }

    /// Select which RX/TX chains are enabled at the next ALERT-to-FDD
    /// transition (and immediately, in FDD).
    pub fn set_active_chains(&mut self, tx1: bool, tx2: bool, rx1: bool, rx2: bool) -> Result<()> {
        let chains = |a: bool, b: bool| {
            (if a { CHAIN_1 } else { 0 }) | (if b { CHAIN_2 } else { 0 })
        };
        self.shadow.rxfilt = (self.shadow.rxfilt & !CHAIN_MASK) | chains(rx1, rx2);
        self.shadow.txfilt = (self.shadow.txfilt & !CHAIN_MASK) | chains(tx1, tx2);
        self.write_reg(REG_RX_ENABLE_FILTER, self.shadow.rxfilt)?;
        self.write_reg(REG_TX_ENABLE_FILTER, self.shadow.txfilt)?;
        Ok(())
    }

    /// Route the digital TX data port straight back to RX, bypassing the
    /// RF sections. Used by host-side link tests.
    pub fn data_port_loopback(&mut self, enabled: bool) -> Result<()> {
        self.write_reg(REG_CODEC_LOOPBACK, if enabled { 0x01 } else { 0x00 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn init_lands_in_fdd_with_no_warnings() {
        let mut dev = mock::device();
        dev.init().unwrap();
        assert_eq!(dev.ensm_state().unwrap(), Ensm::Fdd);
        assert_eq!(dev.take_warnings(), vec![]);
        assert!(nearly_equal(dev.state.clock_rate, 50e6));
        assert!(nearly_equal(dev.state.rx_freq, 800e6));
        assert_eq!(dev.state.curr_gain_table, 1);
    }

    #[test]
    fn init_activates_rx1_only() {
        let mut dev = mock::device();
        dev.init().unwrap();
        assert_eq!(dev.shadow.rxfilt & CHAIN_MASK, CHAIN_1);
        assert_eq!(dev.shadow.txfilt & CHAIN_MASK, 0);
        // The last enable-filter writes carry the single-chain selection.
        assert_eq!(
            dev.io.writes_to(REG_RX_ENABLE_FILTER).last().map(|v| v & CHAIN_MASK),
            Some(CHAIN_1)
        );
    }

    #[test]
    fn tune_is_idempotent() {
        let mut dev = mock::device();
        dev.init().unwrap();
        let first = dev.tune(Direction::Rx, 2.4e9).unwrap();
        assert!((first - 2.4e9).abs() < 100.0);
        assert_eq!(dev.state.curr_gain_table, 2);
        let writes = dev.io.writes.len();
        let second = dev.tune(Direction::Rx, 2.4e9).unwrap();
        assert_eq!(second, first);
        assert_eq!(dev.io.writes.len(), writes);
    }

    #[test]
    fn tune_restores_fdd() {
        let mut dev = mock::device();
        dev.init().unwrap();
        dev.tune(Direction::Tx, 1.2e9).unwrap();
        assert_eq!(dev.ensm_state().unwrap(), Ensm::Fdd);
    }

    #[test]
    fn tune_runs_tx_quadrature_before_rx() {
        let mut dev = mock::device();
        dev.init().unwrap();
        dev.io.writes.clear();
        dev.tune(Direction::Tx, 1.2e9).unwrap();
        // Two TX passes (path A, path B), then the RX quadrature trigger.
        assert_eq!(
            dev.io.writes_to(REG_CAL_CTRL),
            vec![Cal::TX_QUAD.bits(), Cal::TX_QUAD.bits(), Cal::RX_QUAD.bits()]
        );
    }

    #[test]
    fn set_clock_rate_retunes_los_and_gains() {
        let mut dev = mock::device();
        dev.init().unwrap();
        let rx = dev.tune(Direction::Rx, 2.4e9).unwrap();
        dev.io.writes.clear();
        dev.set_clock_rate(30e6).unwrap();
        // The RX LO was re-locked at its old frequency.
        assert!(!dev.io.writes_to(REG_RX_NINT_LSB).is_empty());
        assert!(!dev
            .io
            .writes_to(REG_RX_NINT_LSB + TX_SYNTH_OFFSET)
            .is_empty());
        assert!((dev.state.rx_freq - rx).abs() < 100.0);
        // Gain table and manual gain indices went back in too.
        assert!(!dev.io.writes_to(REG_GT_ADDR).is_empty());
        assert!(!dev.io.writes_to(REG_RX1_MANUAL_GAIN).is_empty());
        assert_eq!(dev.state.curr_gain_table, 2);
    }

    #[test]
    fn set_clock_rate_restores_entry_state() {
        let mut dev = mock::device();
        dev.init().unwrap();
        let achieved = dev.set_clock_rate(30e6).unwrap();
        assert!(nearly_equal(achieved, 30e6));
        assert_eq!(dev.ensm_state().unwrap(), Ensm::Fdd);
        assert_eq!(dev.state.tfir_factor, 2);
        // Single-chain selection from init survives the reclock.
        assert_eq!(dev.shadow.rxfilt & CHAIN_MASK, CHAIN_1);
    }

    #[test]
    fn set_clock_rate_guard_skips_hardware() {
        let mut dev = mock::device();
        dev.init().unwrap();
        let writes = dev.io.writes.len();
        let achieved = dev.set_clock_rate(50e6 + 0.2).unwrap();
        assert_eq!(dev.io.writes.len(), writes);
        assert!(nearly_equal(achieved, 50e6));
    }

    #[test]
    fn set_clock_rate_from_sleep_warns() {
        let mut dev = mock::device();
        // Mock comes up reporting SLEEP; no init.
        dev.set_clock_rate(30e6).unwrap();
        assert!(dev
            .take_warnings()
            .contains(&Warning::NotInAlert("clock rate change")));
    }

    #[test]
    fn sleep_to_fdd_is_rejected() {
        let mut dev = mock::device();
        // Mock comes up reporting SLEEP.
        let err = dev.transition(Ensm::Fdd).unwrap_err();
        assert!(matches!(
            err,
            Error::EnsmTransition { from: Ensm::Sleep, to: Ensm::Fdd }
        ));
    }

    #[test]
    fn unknown_state_nibble_is_an_error() {
        let mut dev = mock::device();
        dev.io.reads.insert(REG_ENSM_STATE, 0x07);
        assert!(matches!(dev.ensm_state(), Err(Error::EnsmDecode(0x07))));
    }

    #[test]
    fn loopback_toggles_register() {
        let mut dev = mock::device();
        dev.data_port_loopback(true).unwrap();
        dev.data_port_loopback(false).unwrap();
        assert_eq!(dev.io.writes_to(REG_CODEC_LOOPBACK), vec![0x01, 0x00]);
    }

    #[test]
    fn failed_lock_surfaces_as_warning_not_error() {
        let mut dev = mock::device();
        dev.io.reads.insert(REG_RX_LO_STATUS, 0x00);
        dev.init().unwrap();
        assert!(dev
            .take_warnings()
            .contains(&Warning::LoNotLocked(Direction::Rx)));
    }
}
