//! Register-level control of the AD9361 RF transceiver: bring-up sequencing,
//! BBPLL/RFPLL synthesis, analog calibration, FIR programming, and the
//! fixed-size binary transaction protocol spoken by the host.
//!
//! All hardware access goes through the [`Interface`] trait, so the same
//! driver runs against a real `spidev` node or a simulated chip in tests.

use serde::{Deserialize, Serialize};
use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};
use std::path::Path;
use thiserror::Error;

use regs::*;

pub mod cal;
pub mod dispatch;
pub mod ensm;
pub mod fir;
pub mod gain;
pub mod rates;
pub mod regs;
pub mod synth;
pub mod tables;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SPI communication failed")]
    Io(#[from] std::io::Error),
    #[error("ENSM status nibble {0:#04x} is not a known state")]
    EnsmDecode(u8),
    #[error("invalid ENSM transition {from:?} -> {to:?}")]
    EnsmTransition { from: Ensm, to: Ensm },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal faults. A failed calibration leaves the chip in a best-effort
/// state; the sequence keeps running and the fault is reported to the caller
/// through the transaction envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    #[error("BBPLL not locked")]
    BbpllNotLocked,
    #[error("BBVCO rate out of divider range")]
    BbvcoRange,
    #[error("RFVCO rate out of divider range")]
    RfvcoRange,
    #[error("{0:?} charge pump cal timeout")]
    ChargePumpTimeout(Direction),
    #[error("{0:?} PLL not locked")]
    LoNotLocked(Direction),
    #[error("{0} cal timeout")]
    CalTimeout(&'static str),
    #[error("not in ALERT during {0}")]
    NotInAlert(&'static str),
    #[error("quad cal tones outside RX BBF")]
    QuadToneRange,
    #[error("secondary TX filter BW unmapped")]
    SecondaryFilterRange,
    #[error("clock rate unrecognized")]
    RateUnrecognized,
    #[error("unknown action {0}")]
    UnknownAction(u32),
}

/// Blocking transport primitives supplied by the integrating target.
///
/// `transfer` shifts exactly one 24-bit word out (in the low bits of the
/// argument) and returns the word shifted in. It never retries; a wedged bus
/// surfaces later as a calibration timeout.
pub trait Interface {
    fn transfer(&mut self, word: u32) -> Result<u32>;
    fn sleep_ms(&mut self, ms: u64);
}

/// `Interface` over a Linux spidev character device.
pub struct SpiDevice {
    spi: Spidev,
}

impl SpiDevice {
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut spi = Spidev::open(path)?;
        let options = SpidevOptions::new()
            .max_speed_hz(10_000_000)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options)?;
        Ok(Self { spi })
    }
}

impl Interface for SpiDevice {
    fn transfer(&mut self, word: u32) -> Result<u32> {
        let tx = word.to_be_bytes();
        let mut rx = [0u8; 3];
        self.spi
            .transfer(&mut SpidevTransfer::read_write(&tx[1..], &mut rx))?;
        Ok(u32::from_be_bytes([0, rx[0], rx[1], rx[2]]))
    }

    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}

/// REFCLK routing, selected by the integrating board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockingMode {
    /// Crystal on XTALN, BBPLL fed directly.
    #[default]
    Xtal,
    /// External reference in, scaled to the BBPLL.
    ExtClk,
}

/// Board-supplied tuning contract: REFCLK routing and the RF input-path
/// band edges. Loadable from TOML by the bring-up binary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub clocking_mode: ClockingMode,
    /// RX input path uses port C below this frequency, Hz.
    pub rx_band_edge0: f64,
    /// RX input path uses port B below this frequency (port A above), Hz.
    pub rx_band_edge1: f64,
    /// TX output path uses port B below this frequency (port A above), Hz.
    pub tx_band_edge: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clocking_mode: ClockingMode::Xtal,
            rx_band_edge0: 2.2e9,
            rx_band_edge1: 4.0e9,
            tx_band_edge: 2.5e9,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Rx,
    Tx,
}

/// Frequencies within 1 Hz are the same frequency; used by every
/// idempotence guard.
pub(crate) fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < 1.0
}

/// Host-visible tuning state. Only the engines mutate this; it mirrors what
/// was last commanded to (and locked by) the hardware.
#[derive(Clone, Copy, Debug, Default)]
pub struct RfState {
    pub rx_freq: f64,
    pub tx_freq: f64,
    pub req_rx_freq: f64,
    pub req_tx_freq: f64,
    pub baseband_bw: f64,
    pub bbpll_freq: f64,
    pub adcclock_freq: f64,
    pub rx_bbf_tunediv: u16,
    /// Gain table band currently in hardware, 1..=3. 0 = never programmed.
    pub curr_gain_table: u8,
    pub rx1_gain: f64,
    pub rx2_gain: f64,
    pub tx1_gain: f64,
    pub tx2_gain: f64,
    pub tfir_factor: u32,
    pub req_clock_rate: f64,
    /// Sample rate actually achieved by the last clock-chain setup.
    pub clock_rate: f64,
    pub req_coreclk: f64,
}

/// One AD9361. Owns the transport, the shadow registers, and the RF state,
/// so independent instances never alias hardware state.
pub struct Ad9361<I: Interface> {
    pub(crate) io: I,
    pub config: Config,
    pub(crate) shadow: Shadow,
    pub(crate) state: RfState,
    warnings: Vec<Warning>,
}

impl<I: Interface> Ad9361<I> {
    pub fn new(io: I, config: Config) -> Self {
        Self {
            io,
            config,
            shadow: Shadow::default(),
            state: RfState::default(),
            warnings: Vec::new(),
        }
    }

    pub fn state(&self) -> &RfState {
        &self.state
    }

    /// Warnings accumulated since the last drain, oldest first.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    pub(crate) fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub(crate) fn sleep_ms(&mut self, ms: u64) {
        self.io.sleep_ms(ms);
    }

    /// One write transaction: write bit, 10-bit address, 8-bit value.
    pub(crate) fn write_reg(&mut self, addr: u16, val: u8) -> Result<()> {
        let word = (1 << 23) | (u32::from(addr & 0x3FF) << 8) | u32::from(val);
        self.io.transfer(word)?;
        Ok(())
    }

    /// One read transaction; the value comes back in the low byte.
    pub(crate) fn read_reg(&mut self, addr: u16) -> Result<u8> {
        let word = u32::from(addr & 0x3FF) << 8;
        Ok((self.io.transfer(word)? & 0xFF) as u8)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::HashMap;

    /// Scripted chip: records every register write, answers reads from a
    /// value map, and models just enough of the ENSM and calibration status
    /// bits for the sequencer to run to completion.
    #[derive(Default)]
    pub struct Mock {
        pub writes: Vec<(u16, u8)>,
        pub reads: HashMap<u16, u8>,
        pub slept_ms: u64,
    }

    impl Mock {
        /// Read-back values a freshly calibrated chip would report: BBPLL and
        /// LO lock bits set, calibration start bits self-clearing, plausible
        /// RX BBF capacitor/resistor codes.
        pub fn with_chip_defaults() -> Self {
            let mut m = Self::default();
            m.reads.insert(REG_BBPLL_STATUS, 0x80);
            m.reads.insert(REG_RX_CP_STATUS, 0x80);
            m.reads.insert(REG_TX_CP_STATUS, 0x80);
            m.reads.insert(REG_RX_LO_STATUS, 0x02);
            m.reads.insert(REG_TX_LO_STATUS, 0x02);
            m.reads.insert(REG_CAL_CTRL, 0x00);
            m.reads.insert(REG_BBF_C3_MSB, 0x1F);
            m.reads.insert(REG_BBF_C3_LSB, 0x3F);
            m.reads.insert(REG_BBF_R2346, 0x03);
            m
        }

        pub fn writes_to(&self, addr: u16) -> Vec<u8> {
            self.writes
                .iter()
                .filter(|(a, _)| *a == addr)
                .map(|(_, v)| *v)
                .collect()
        }
    }

    impl Interface for Mock {
        fn transfer(&mut self, word: u32) -> Result<u32> {
            let addr = ((word >> 8) & 0x3FF) as u16;
            if word & (1 << 23) != 0 {
                let val = (word & 0xFF) as u8;
                self.writes.push((addr, val));
                // ENSM control writes show up in the state readback nibble.
                if addr == REG_ENSM_MODE {
                    let nibble = match val {
                        ENSM_MODE_ALERT => Ensm::Alert as u8,
                        ENSM_MODE_FDD => Ensm::Fdd as u8,
                        _ => Ensm::Sleep as u8,
                    };
                    self.reads.insert(REG_ENSM_STATE, nibble);
                }
                Ok(0)
            } else {
                Ok(u32::from(*self.reads.get(&addr).unwrap_or(&0)))
            }
        }

        fn sleep_ms(&mut self, ms: u64) {
            self.slept_ms += ms;
        }
    }

    pub fn device() -> Ad9361<Mock> {
        Ad9361::new(Mock::with_chip_defaults(), Config::default())
    }
}
