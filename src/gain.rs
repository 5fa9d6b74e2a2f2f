//! RX gain table / mixer GM subtable programming and manual gain control.
//!
//! The RX gain tables are band-specific; retuning across a band edge
//! reprograms the table and reapplies the stored per-chain gains. TX "gain"
//! is attenuation from a fixed maximum in 0.25 dB steps.

use crate::regs::*;
use crate::tables::{
    GAIN_TABLE_BAND1, GAIN_TABLE_BAND2, GAIN_TABLE_BAND3, MIXER_GM_CODE, MIXER_GM_GAIN,
};
use crate::{Ad9361, Interface, Result};

/// Highest TX gain; anything below is dialed in as attenuation.
pub const TX_MAX_GAIN: f64 = 89.75;

/// Populated gain table rows; rows beyond these are zeroed.
const GAIN_TABLE_ROWS: usize = 77;
const GAIN_TABLE_ZERO_ROWS: usize = 14;

/// Band split points for gain table selection.
const BAND2_EDGE: f64 = 1.3e9;
const BAND3_EDGE: f64 = 4.0e9;

fn band_for(freq: f64) -> u8 {
    if freq < BAND2_EDGE {
        1
    } else if freq < BAND3_EDGE {
        2
    } else {
        3
    }
}

/// Index offset from the requested dB value into the band's table.
fn band_gain_offset(band: u8) -> f64 {
    match band {
        1 => 5.0,
        2 => 3.0,
        _ => 14.0,
    }
}

impl<I: Interface> Ad9361<I> {
    /// Load the RX gain table for the band containing `freq`. Skipped when
    /// that table is already in hardware.
    pub(crate) fn program_gain_table(&mut self, freq: f64) -> Result<()> {
        let band = band_for(freq);
        if band == self.state.curr_gain_table {
            return Ok(());
        }
        let table: &[[u8; 3]; GAIN_TABLE_ROWS] = match band {
            1 => &GAIN_TABLE_BAND1,
            2 => &GAIN_TABLE_BAND2,
            _ => &GAIN_TABLE_BAND3,
        };

        self.write_reg(REG_GT_CONFIG, 0x1A)?; // start table clock
        for (i, row) in table.iter().enumerate() {
            self.write_gain_table_row(i as u8, *row)?;
        }
        // The hardware reads past the populated region during AGC overload
        // recovery; keep it zeroed.
        for i in GAIN_TABLE_ROWS..GAIN_TABLE_ROWS + GAIN_TABLE_ZERO_ROWS {
            self.write_gain_table_row(i as u8, [0, 0, 0])?;
        }
        self.write_reg(REG_GT_CONFIG, 0x02)?; // stop table clock

        self.state.curr_gain_table = band;
        self.program_gains()
    }

    fn write_gain_table_row(&mut self, index: u8, row: [u8; 3]) -> Result<()> {
        self.write_reg(REG_GT_ADDR, index)?;
        self.write_reg(REG_GT_WORD_0, row[0])?;
        self.write_reg(REG_GT_WORD_1, row[1])?;
        self.write_reg(REG_GT_WORD_2, row[2])?;
        self.write_reg(REG_GT_STROBE, 0x05)?;
        self.write_reg(REG_GT_STROBE, 0x00)?;
        Ok(())
    }

    /// Load the 16-entry mixer GM bias subtable, highest gain first.
    pub(crate) fn program_mixer_gm_subtable(&mut self) -> Result<()> {
        self.write_reg(REG_GM_CONFIG, 0x02)?;
        for i in 0..MIXER_GM_GAIN.len() {
            self.write_reg(REG_GM_ADDR, (15 - i) as u8)?;
            self.write_reg(REG_GM_GAIN, MIXER_GM_GAIN[i])?;
            self.write_reg(REG_GM_PORT, 0x00)?;
            self.write_reg(REG_GM_CODE, MIXER_GM_CODE[i])?;
            self.write_reg(REG_GM_STROBE, 0x06)?;
            self.write_reg(REG_GM_STROBE, 0x00)?;
        }
        self.write_reg(REG_GM_CONFIG, 0x00)?;
        Ok(())
    }

    /// Put both RX chains in manual (table-indexed) gain mode with fixed
    /// peak detector thresholds.
    pub(crate) fn setup_gain_control(&mut self) -> Result<()> {
        self.write_reg(REG_AGC_CONFIG_1, 0xE0)?; // manual gain, both chains
        self.write_reg(REG_AGC_CONFIG_2, 0x08)?;
        self.write_reg(REG_AGC_CONFIG_3, 0x23)?;
        self.write_reg(REG_AGC_ATTACK_DELAY, 0x4C)?;
        self.write_reg(REG_AGC_PEAK_WAIT, 0x44)?;
        self.write_reg(REG_AGC_INNER_HIGH, 0x6F)?;
        self.write_reg(REG_AGC_GAIN_LOCK, 0x2F)?;
        self.write_reg(REG_AGC_GAIN_STEP, 0x3A)?;
        self.write_reg(REG_AGC_SETTLING, 0x31)?;
        self.write_reg(REG_AGC_ENERGY_LOST, 0x39)?;
        Ok(())
    }

    /// Set one RX chain's gain in dB. The dB value maps to a table index via
    /// the current band's offset; out-of-table requests clamp. Returns the
    /// gain actually applied.
    pub fn set_rx_gain(&mut self, chain: u8, gain: f64) -> Result<f64> {
        let offset = band_gain_offset(self.state.curr_gain_table);
        let index = ((gain + offset) as i32).clamp(0, GAIN_TABLE_ROWS as i32 - 1) as u8;
        let actual = f64::from(index) - offset;
        match chain {
            1 => {
                self.write_reg(REG_RX1_MANUAL_GAIN, index)?;
                self.state.rx1_gain = actual;
            }
            _ => {
                self.write_reg(REG_RX2_MANUAL_GAIN, index)?;
                self.state.rx2_gain = actual;
            }
        }
        Ok(actual)
    }

    /// Set one TX chain's gain in dB below [`TX_MAX_GAIN`], quantized to
    /// 0.25 dB attenuation steps. Returns the gain actually applied.
    pub fn set_tx_gain(&mut self, chain: u8, gain: f64) -> Result<f64> {
        let atten = (TX_MAX_GAIN - gain).clamp(0.0, TX_MAX_GAIN);
        let attenreg = (atten * 4.0) as u16; // 9 bits
        let actual = TX_MAX_GAIN - f64::from(attenreg) / 4.0;
        let (reg0, reg1) = match chain {
            1 => (REG_TX1_ATTEN_0, REG_TX1_ATTEN_1),
            _ => (REG_TX2_ATTEN_0, REG_TX2_ATTEN_1),
        };
        self.write_reg(reg0, (attenreg & 0xFF) as u8)?;
        self.write_reg(reg1, ((attenreg >> 8) & 0x01) as u8)?;
        if chain == 1 {
            self.state.tx1_gain = actual;
        } else {
            self.state.tx2_gain = actual;
        }
        Ok(actual)
    }

    /// Reapply every stored gain. Run after anything that invalidates the
    /// hardware's gain indices (gain table reload, retune).
    pub(crate) fn program_gains(&mut self) -> Result<()> {
        self.set_rx_gain(1, self.state.rx1_gain)?;
        self.set_rx_gain(2, self.state.rx2_gain)?;
        self.set_tx_gain(1, self.state.tx1_gain)?;
        self.set_tx_gain(2, self.state.tx2_gain)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn gain_table_rows_and_padding() {
        let mut dev = mock::device();
        dev.program_gain_table(2.4e9).unwrap();
        let addrs = dev.io.writes_to(REG_GT_ADDR);
        assert_eq!(addrs.len(), GAIN_TABLE_ROWS + GAIN_TABLE_ZERO_ROWS);
        assert_eq!(*addrs.last().unwrap(), 90);
        // Padding rows carry all-zero words.
        let words = dev.io.writes_to(REG_GT_WORD_0);
        assert!(words[GAIN_TABLE_ROWS..].iter().all(|&w| w == 0));
        assert_eq!(dev.state.curr_gain_table, 2);
    }

    #[test]
    fn same_band_is_not_reprogrammed() {
        let mut dev = mock::device();
        dev.program_gain_table(2.4e9).unwrap();
        let writes = dev.io.writes.len();
        dev.program_gain_table(3.6e9).unwrap(); // still band 2
        assert_eq!(dev.io.writes.len(), writes);
        dev.program_gain_table(5.0e9).unwrap(); // band 3
        assert!(dev.io.writes.len() > writes);
        assert_eq!(dev.state.curr_gain_table, 3);
    }

    #[test]
    fn rx_gain_clamps_to_table() {
        let mut dev = mock::device();
        dev.program_gain_table(900e6).unwrap(); // band 1, offset 5
        let actual = dev.set_rx_gain(1, 200.0).unwrap();
        assert_eq!(dev.io.writes_to(REG_RX1_MANUAL_GAIN).last(), Some(&76));
        assert_eq!(actual, 71.0);
        let actual = dev.set_rx_gain(1, -50.0).unwrap();
        assert_eq!(dev.io.writes_to(REG_RX1_MANUAL_GAIN).last(), Some(&0));
        assert_eq!(actual, -5.0);
    }

    #[test]
    fn tx_atten_split_across_registers() {
        let mut dev = mock::device();
        // 0 dB gain = 89.75 dB attenuation = code 359 = 0x167.
        let actual = dev.set_tx_gain(1, 0.0).unwrap();
        assert_eq!(dev.io.writes_to(REG_TX1_ATTEN_0), vec![0x67]);
        assert_eq!(dev.io.writes_to(REG_TX1_ATTEN_1), vec![0x01]);
        assert_eq!(actual, 0.0);
        // Full gain = zero attenuation on the other chain's registers.
        dev.set_tx_gain(2, TX_MAX_GAIN).unwrap();
        assert_eq!(dev.io.writes_to(REG_TX2_ATTEN_0), vec![0x00]);
        assert_eq!(dev.io.writes_to(REG_TX2_ATTEN_1), vec![0x00]);
    }

    #[test]
    fn gm_subtable_descending_addresses() {
        let mut dev = mock::device();
        dev.program_mixer_gm_subtable().unwrap();
        let addrs = dev.io.writes_to(REG_GM_ADDR);
        assert_eq!(addrs.len(), 16);
        assert_eq!(addrs[0], 15);
        assert_eq!(addrs[15], 0);
        assert_eq!(dev.io.writes_to(REG_GM_GAIN)[0], MIXER_GM_GAIN[0]);
    }
}
