//! Register map subset and the shadow register set.
//!
//! Only the registers this driver touches are named here. Shadow registers
//! mirror write-only hardware fields that must be merged with previously-set
//! bits before every rewrite.

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/* SPI / chip control */
pub const REG_SPI_CONF: u16 = 0x000;
pub const REG_TX_ENABLE_FILTER: u16 = 0x002;
pub const REG_RX_ENABLE_FILTER: u16 = 0x003;
pub const REG_INPUT_SELECT: u16 = 0x004;
pub const REG_RFPLL_DIVIDERS: u16 = 0x005;
pub const REG_RX_CLOCK_DATA_DELAY: u16 = 0x006;
pub const REG_TX_CLOCK_DATA_DELAY: u16 = 0x007;
pub const REG_CLOCK_ENABLE: u16 = 0x009;
pub const REG_BBPLL: u16 = 0x00A;

/* Temperature sensor / AuxADC */
pub const REG_TEMP_OFFSET: u16 = 0x00B;
pub const REG_TEMP_WINDOW: u16 = 0x00C;
pub const REG_TEMP_PERIOD: u16 = 0x00D;
pub const REG_AUXADC_CONFIG: u16 = 0x00F;

/* Parallel port */
pub const REG_PPORT_CONF_1: u16 = 0x010;
pub const REG_PPORT_CONF_2: u16 = 0x011;
pub const REG_PPORT_CONF_3: u16 = 0x012;

/* ENSM */
pub const REG_ENSM_FDD_MODE: u16 = 0x013;
pub const REG_ENSM_MODE: u16 = 0x014;
pub const REG_ENSM_CONFIG_2: u16 = 0x015;
pub const REG_CAL_CTRL: u16 = 0x016;
pub const REG_ENSM_STATE: u16 = 0x017;

/* AuxDAC */
pub const REG_AUXDAC_1_WORD: u16 = 0x018;
pub const REG_AUXDAC_2_WORD: u16 = 0x019;
pub const REG_AUXDAC_1_CONFIG: u16 = 0x01A;
pub const REG_AUXDAC_2_CONFIG: u16 = 0x01B;

/* Control outputs / GPO */
pub const REG_CTRL_OUT_POINTER: u16 = 0x035;
pub const REG_CTRL_OUT_ENABLE: u16 = 0x036;
pub const REG_GPO_CONFIG: u16 = 0x03E;

/* BBPLL synthesizer */
pub const REG_BBPLL_CAL: u16 = 0x03F;
pub const REG_BBPLL_NFRAC_2: u16 = 0x041;
pub const REG_BBPLL_NFRAC_1: u16 = 0x042;
pub const REG_BBPLL_NFRAC_0: u16 = 0x043;
pub const REG_BBPLL_NINT: u16 = 0x044;
pub const REG_BBPLL_REF_DIV: u16 = 0x045;
pub const REG_BBPLL_CP_CURRENT: u16 = 0x046;
pub const REG_BBPLL_LOOP_FILTER_1: u16 = 0x048;
pub const REG_BBPLL_LOOP_FILTER_2: u16 = 0x049;
pub const REG_BBPLL_LOOP_FILTER_3: u16 = 0x04A;
pub const REG_BBPLL_KV: u16 = 0x04C;
pub const REG_BBPLL_VCO_CTRL: u16 = 0x04D;
pub const REG_BBPLL_STATUS: u16 = 0x05E;

/* TX FIR block at 0x060, RX FIR block at 0x0F0; offsets within a block */
pub const REG_TX_FIR_BASE: u16 = 0x060;
pub const REG_RX_FIR_BASE: u16 = 0x0F0;
pub const FIR_COEF_ADDR: u16 = 0;
pub const FIR_COEF_LSB: u16 = 1;
pub const FIR_COEF_MSB: u16 = 2;
pub const FIR_COEF_CLOCK: u16 = 4;
pub const FIR_CONFIG: u16 = 5;
pub const FIR_RX_GAIN: u16 = 6;

/* TX attenuation */
pub const REG_TX1_ATTEN_0: u16 = 0x073;
pub const REG_TX1_ATTEN_1: u16 = 0x074;
pub const REG_TX2_ATTEN_0: u16 = 0x075;
pub const REG_TX2_ATTEN_1: u16 = 0x076;

/* TX quadrature calibration */
pub const REG_QUAD_CAL_NCO: u16 = 0x0A0;
pub const REG_QUAD_CAL_TRACK: u16 = 0x0A1;
pub const REG_QUAD_CAL_KEXP: u16 = 0x0A2;
pub const REG_QUAD_CAL_STATUS: u16 = 0x0A3;
pub const REG_QUAD_CAL_CTRL: u16 = 0x0A4;
pub const REG_QUAD_CAL_MAG_THRESH: u16 = 0x0A5;
pub const REG_QUAD_CAL_PHASE_THRESH: u16 = 0x0A6;
pub const REG_QUAD_CAL_COUNT: u16 = 0x0A9;
pub const REG_QUAD_CAL_SETTLE: u16 = 0x0AA;
pub const REG_QUAD_CAL_LPF_GAIN: u16 = 0x0AE;

/* TX secondary (pre-PA) filter */
pub const REG_TX_BBF2_CAP: u16 = 0x0D0;
pub const REG_TX_BBF2_RES: u16 = 0x0D1;
pub const REG_TX_BBF2_BW: u16 = 0x0D2;
pub const REG_TX_BBF_TUNE_DIV: u16 = 0x0D6;
pub const REG_TX_BBF_TUNE_MODE: u16 = 0x0D7;
pub const REG_TX_BBF_POWER: u16 = 0x0CA;

/* RX manual gain */
pub const REG_RX1_MANUAL_GAIN: u16 = 0x109;
pub const REG_RX2_MANUAL_GAIN: u16 = 0x10C;

/* Gain table programming */
pub const REG_GT_ADDR: u16 = 0x130;
pub const REG_GT_WORD_0: u16 = 0x131;
pub const REG_GT_WORD_1: u16 = 0x132;
pub const REG_GT_WORD_2: u16 = 0x133;
pub const REG_GT_STROBE: u16 = 0x134;
pub const REG_GT_CONFIG: u16 = 0x137;

/* Mixer GM subtable programming */
pub const REG_GM_ADDR: u16 = 0x138;
pub const REG_GM_GAIN: u16 = 0x139;
pub const REG_GM_PORT: u16 = 0x13A;
pub const REG_GM_CODE: u16 = 0x13B;
pub const REG_GM_STROBE: u16 = 0x13C;
pub const REG_GM_CONFIG: u16 = 0x13F;

/* Gain control */
pub const REG_AGC_CONFIG_1: u16 = 0x0FA;
pub const REG_AGC_CONFIG_2: u16 = 0x0FB;
pub const REG_AGC_CONFIG_3: u16 = 0x0FC;
pub const REG_AGC_ATTACK_DELAY: u16 = 0x0FD;
pub const REG_AGC_PEAK_WAIT: u16 = 0x0FE;
pub const REG_AGC_INNER_HIGH: u16 = 0x100;
pub const REG_AGC_GAIN_LOCK: u16 = 0x104;
pub const REG_AGC_GAIN_STEP: u16 = 0x105;
pub const REG_AGC_SETTLING: u16 = 0x107;
pub const REG_AGC_ENERGY_LOST: u16 = 0x108;

/* DC offset tracking */
pub const REG_BBDC_TRACK: u16 = 0x169;
pub const REG_RFDC_TRACK: u16 = 0x16D;

/* RX baseband analog filter calibration */
pub const REG_RX_BBF_TUNE_DIV: u16 = 0x1F8;
pub const REG_RX_BBF_TUNE_CONFIG: u16 = 0x1F9;
pub const REG_RX_BBF_MHZ: u16 = 0x1FB;
pub const REG_RX_BBF_KHZ: u16 = 0x1FC;
pub const REG_RX_BBF_POWER: u16 = 0x1D5;
pub const REG_RX_BBF_CONFIG: u16 = 0x1C0;
pub const REG_RX1_TUNE_CTRL: u16 = 0x1E2;
pub const REG_RX2_TUNE_CTRL: u16 = 0x1E3;

/* RX BBF readbacks consumed by the TIA and ADC setup */
pub const REG_BBF_R2346: u16 = 0x1E6;
pub const REG_BBF_C3_MSB: u16 = 0x1EB;
pub const REG_BBF_C3_LSB: u16 = 0x1EC;

/* RX TIA */
pub const REG_TIA_CONFIG: u16 = 0x1DB;
pub const REG_TIA1_C_LSB: u16 = 0x1DC;
pub const REG_TIA1_C_MSB: u16 = 0x1DD;
pub const REG_TIA2_C_LSB: u16 = 0x1DE;
pub const REG_TIA2_C_MSB: u16 = 0x1DF;

/* Baseband DC offset */
pub const REG_BBDC_ATTEN: u16 = 0x190;
pub const REG_BBDC_COUNT: u16 = 0x193;
pub const REG_BBDC_SHIFT: u16 = 0x194;

/* RF DC offset */
pub const REG_RFDC_WAIT: u16 = 0x185;
pub const REG_RFDC_COUNT: u16 = 0x186;
pub const REG_RFDC_CONFIG_1: u16 = 0x187;
pub const REG_RFDC_GAIN: u16 = 0x188;
pub const REG_RFDC_ATTEN: u16 = 0x189;
pub const REG_RFDC_CONFIG_2: u16 = 0x18B;

/* ADC setup block: 40 consecutive bytes */
pub const REG_ADC_SETUP_BASE: u16 = 0x200;
pub const ADC_SETUP_LEN: usize = 40;

/* RX RFPLL synthesizer */
pub const REG_RX_VCO_CAL_OFFSET: u16 = 0x238;
pub const REG_RX_VCO_VARACTOR: u16 = 0x239;
pub const REG_RX_VCO_OUTPUT: u16 = 0x23A;
pub const REG_RX_CP_CURRENT: u16 = 0x23B;
pub const REG_RX_CP_CAL: u16 = 0x23D;
pub const REG_RX_LOOP_FILTER_1: u16 = 0x23E;
pub const REG_RX_LOOP_FILTER_2: u16 = 0x23F;
pub const REG_RX_LOOP_FILTER_3: u16 = 0x240;
pub const REG_RX_VCO_BIAS: u16 = 0x242;
pub const REG_RX_CP_STATUS: u16 = 0x244;
pub const REG_RX_CP_OFFSET: u16 = 0x245;
pub const REG_RX_LO_STATUS: u16 = 0x247;
pub const REG_RX_VCO_PD_OVERRIDE: u16 = 0x250;
pub const REG_RX_VCO_VARACTOR_REF: u16 = 0x251;
pub const REG_RX_NINT_LSB: u16 = 0x231;
pub const REG_RX_NINT_MSB: u16 = 0x232;
pub const REG_RX_NFRAC_0: u16 = 0x233;
pub const REG_RX_NFRAC_1: u16 = 0x234;
pub const REG_RX_NFRAC_2: u16 = 0x235;

/* TX RFPLL synthesizer: RX block mirrored 0x40 higher */
pub const TX_SYNTH_OFFSET: u16 = 0x040;
pub const REG_TX_CP_CAL: u16 = REG_RX_CP_CAL + TX_SYNTH_OFFSET;
pub const REG_TX_CP_STATUS: u16 = REG_RX_CP_STATUS + TX_SYNTH_OFFSET;
pub const REG_TX_LO_STATUS: u16 = REG_RX_LO_STATUS + TX_SYNTH_OFFSET;

/* Misc */
pub const REG_MASTER_BIAS: u16 = 0x2A6;
pub const REG_BANDGAP_TRIM: u16 = 0x2A8;
pub const REG_RFPLL_REF_SCALE: u16 = 0x2AB;
pub const REG_RFPLL_REF_ENABLE: u16 = 0x2AC;
pub const REG_CODEC_LOOPBACK: u16 = 0x3F5;
pub const REG_DIGITAL_IO_CTRL: u16 = 0x3DF;

/// ENSM state, read from the low nibble of `REG_ENSM_STATE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Ensm {
    Sleep = 0x00,
    Alert = 0x05,
    Fdd = 0x0A,
}

/// `REG_ENSM_MODE` command values. `ENSM_MODE_FDD` carries the force-TX-on
/// bit so both chains come up during the transition.
pub const ENSM_MODE_WAIT: u8 = 0x00;
pub const ENSM_MODE_ALERT: u8 = 0x05;
pub const ENSM_MODE_FDD: u8 = 0x21;

/// Chain-enable bits in the high bits of the RX/TX enable-filter shadows.
pub const CHAIN_1: u8 = 0x40;
pub const CHAIN_2: u8 = 0x80;
pub const CHAIN_MASK: u8 = CHAIN_1 | CHAIN_2;

/// DAC-clock = ADC-clock/2 bypass bit in the BBPLL shadow.
pub const BBPLL_DACCLK_HALF: u8 = 1 << 3;

/// TX quadrature path select in the input-select shadow (TX1A vs TX1B).
pub const INPUTSEL_TXB: u8 = 1 << 6;

bitflags! {
    /// Calibration trigger/status bits in `REG_CAL_CTRL`. Each bit starts a
    /// calibration when written and self-clears on completion.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct Cal: u8 {
        const BB_DC_OFFSET = 0x01;
        const RF_DC_OFFSET = 0x02;
        const TX_QUAD      = 0x10;
        const RX_QUAD      = 0x20;
        const TX_BBF       = 0x40;
        const RX_BBF       = 0x80;
    }
}

/// In-memory mirrors of write-only configuration registers. Reset values
/// match the hardware's power-on state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// `REG_RFPLL_DIVIDERS`: RX divider exponent low nibble, TX high nibble.
    pub vcodivs: u8,
    /// `REG_INPUT_SELECT`: RF port routing and TX path select.
    pub inputsel: u8,
    /// `REG_RX_ENABLE_FILTER`: chain enables + RX filter chain config.
    pub rxfilt: u8,
    /// `REG_TX_ENABLE_FILTER`: chain enables + TX filter chain config.
    pub txfilt: u8,
    /// `REG_BBPLL`: VCO divider exponent + DAC clock bypass.
    pub bbpll: u8,
    /// `REG_RX_BBF_TUNE_CONFIG`: RX tune divider MSB + static config.
    pub bbftune_config: u8,
    /// `REG_TX_BBF_TUNE_MODE`: TX tune divider MSB + static config.
    pub bbftune_mode: u8,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            vcodivs: 0x00,
            inputsel: 0x30,
            rxfilt: CHAIN_MASK,
            txfilt: CHAIN_MASK,
            bbpll: 0x02,
            bbftune_config: 0x1E,
            bbftune_mode: 0x1E,
        }
    }
}
