//! Static lookup data: FIR prototype, gain tables, RFPLL VCO tuning LUT.

/// Rising half of the canonical 128-tap symmetric low-pass prototype.
/// Index 63 is the center (peak) tap; RX/TX filters of any supported
/// length are cut from the tail of this table.
#[rustfmt::skip]
pub static FIR_PROTOTYPE: [i16; 64] = [
       -20,    -30,      3,     35,     18,    -29,    -39,      9,
        53,     23,    -49,    -59,     22,     86,     29,    -87,
       -90,     47,    139,     32,   -147,   -132,     91,    214,
        27,   -235,   -181,    162,    313,      8,   -360,   -235,
       271,    442,    -37,   -533,   -291,    433,    606,   -120,
      -774,   -345,    678,    824,   -269,  -1125,   -394,   1067,
      1136,   -540,  -1692,   -434,   1766,   1670,  -1103,  -2833,
      -462,   3456,   3033,  -2885,  -6983,   -477,  15923,  30228,
];

/// Full-gain-table rows for RX frequencies below 1.3 GHz.
#[rustfmt::skip]
pub static GAIN_TABLE_BAND1: [[u8; 3]; 77] = [
    [0x00, 0x00, 0x00], [0x01, 0x00, 0x00], [0x02, 0x01, 0x00], [0x03, 0x02, 0x00],
    [0x04, 0x03, 0x00], [0x05, 0x03, 0x00], [0x06, 0x04, 0x00], [0x07, 0x05, 0x00],
    [0x08, 0x06, 0x00], [0x09, 0x06, 0x00], [0x0A, 0x07, 0x00], [0x0B, 0x08, 0x00],
    [0x0C, 0x09, 0x00], [0x0D, 0x09, 0x00], [0x0E, 0x0A, 0x00], [0x0F, 0x0B, 0x00],
    [0x00, 0x0C, 0x00], [0x01, 0x0C, 0x00], [0x02, 0x0D, 0x00], [0x20, 0x0E, 0x00],
    [0x21, 0x0F, 0x00], [0x22, 0x0F, 0x00], [0x23, 0x10, 0x00], [0x24, 0x11, 0x00],
    [0x25, 0x12, 0x00], [0x26, 0x12, 0x00], [0x27, 0x13, 0x00], [0x28, 0x14, 0x00],
    [0x29, 0x15, 0x00], [0x2A, 0x15, 0x00], [0x2B, 0x16, 0x00], [0x2C, 0x17, 0x00],
    [0x2D, 0x18, 0x00], [0x2E, 0x18, 0x00], [0x2F, 0x19, 0x00], [0x20, 0x1A, 0x00],
    [0x21, 0x1B, 0x00], [0x22, 0x1B, 0x00], [0x40, 0x1C, 0x00], [0x41, 0x1D, 0x00],
    [0x42, 0x1E, 0x00], [0x43, 0x1E, 0x00], [0x44, 0x1F, 0x00], [0x45, 0x20, 0x00],
    [0x46, 0x21, 0x00], [0x47, 0x21, 0x00], [0x48, 0x22, 0x00], [0x49, 0x23, 0x00],
    [0x4A, 0x24, 0x00], [0x4B, 0x24, 0x00], [0x4C, 0x25, 0x00], [0x4D, 0x26, 0x00],
    [0x4E, 0x27, 0x00], [0x4F, 0x27, 0x00], [0x40, 0x28, 0x00], [0x41, 0x29, 0x00],
    [0x42, 0x2A, 0x00], [0x60, 0x2A, 0x00], [0x61, 0x2B, 0x00], [0x62, 0x2C, 0x00],
    [0x63, 0x2D, 0x00], [0x64, 0x2D, 0x00], [0x65, 0x2E, 0x00], [0x66, 0x2F, 0x00],
    [0x67, 0x30, 0x20], [0x68, 0x30, 0x20], [0x69, 0x31, 0x20], [0x6A, 0x32, 0x20],
    [0x6B, 0x33, 0x20], [0x6C, 0x33, 0x20], [0x6D, 0x34, 0x20], [0x6E, 0x35, 0x20],
    [0x6F, 0x36, 0x20], [0x60, 0x36, 0x20], [0x61, 0x37, 0x20], [0x62, 0x38, 0x20],
    [0x63, 0x39, 0x20],
];

/// Full-gain-table rows for RX frequencies 1.3 GHz to 4 GHz.
#[rustfmt::skip]
pub static GAIN_TABLE_BAND2: [[u8; 3]; 77] = [
    [0x00, 0x04, 0x00], [0x01, 0x04, 0x00], [0x02, 0x05, 0x00], [0x03, 0x06, 0x00],
    [0x04, 0x07, 0x00], [0x05, 0x07, 0x00], [0x06, 0x08, 0x00], [0x07, 0x09, 0x00],
    [0x08, 0x0A, 0x00], [0x09, 0x0A, 0x00], [0x0A, 0x0B, 0x00], [0x0B, 0x0C, 0x00],
    [0x0C, 0x0D, 0x00], [0x0D, 0x0D, 0x00], [0x0E, 0x0E, 0x00], [0x0F, 0x0F, 0x00],
    [0x00, 0x10, 0x00], [0x01, 0x10, 0x00], [0x02, 0x11, 0x00], [0x20, 0x12, 0x00],
    [0x21, 0x13, 0x00], [0x22, 0x13, 0x00], [0x23, 0x14, 0x00], [0x24, 0x15, 0x00],
    [0x25, 0x16, 0x00], [0x26, 0x16, 0x00], [0x27, 0x17, 0x00], [0x28, 0x18, 0x00],
    [0x29, 0x19, 0x00], [0x2A, 0x19, 0x00], [0x2B, 0x1A, 0x00], [0x2C, 0x1B, 0x00],
    [0x2D, 0x1C, 0x00], [0x2E, 0x1C, 0x00], [0x2F, 0x1D, 0x00], [0x20, 0x1E, 0x00],
    [0x21, 0x1F, 0x00], [0x22, 0x1F, 0x00], [0x40, 0x20, 0x00], [0x41, 0x21, 0x00],
    [0x42, 0x22, 0x00], [0x43, 0x22, 0x00], [0x44, 0x23, 0x00], [0x45, 0x24, 0x00],
    [0x46, 0x25, 0x00], [0x47, 0x25, 0x00], [0x48, 0x26, 0x00], [0x49, 0x27, 0x00],
    [0x4A, 0x28, 0x00], [0x4B, 0x28, 0x00], [0x4C, 0x29, 0x00], [0x4D, 0x2A, 0x00],
    [0x4E, 0x2B, 0x00], [0x4F, 0x2B, 0x00], [0x40, 0x2C, 0x00], [0x41, 0x2D, 0x00],
    [0x42, 0x2E, 0x00], [0x60, 0x2E, 0x00], [0x61, 0x2F, 0x00], [0x62, 0x30, 0x00],
    [0x63, 0x31, 0x20], [0x64, 0x31, 0x20], [0x65, 0x32, 0x20], [0x66, 0x33, 0x20],
    [0x67, 0x34, 0x20], [0x68, 0x34, 0x20], [0x69, 0x35, 0x20], [0x6A, 0x36, 0x20],
    [0x6B, 0x37, 0x20], [0x6C, 0x37, 0x20], [0x6D, 0x38, 0x20], [0x6E, 0x39, 0x20],
    [0x6F, 0x3A, 0x20], [0x60, 0x3A, 0x20], [0x61, 0x3B, 0x20], [0x62, 0x3C, 0x20],
    [0x63, 0x3C, 0x20],
];

/// Full-gain-table rows for RX frequencies above 4 GHz.
#[rustfmt::skip]
pub static GAIN_TABLE_BAND3: [[u8; 3]; 77] = [
    [0x00, 0x0A, 0x00], [0x01, 0x0A, 0x00], [0x02, 0x0B, 0x00], [0x03, 0x0C, 0x00],
    [0x04, 0x0D, 0x00], [0x05, 0x0D, 0x00], [0x06, 0x0E, 0x00], [0x07, 0x0F, 0x00],
    [0x08, 0x10, 0x00], [0x09, 0x10, 0x00], [0x0A, 0x11, 0x00], [0x0B, 0x12, 0x00],
    [0x0C, 0x13, 0x00], [0x0D, 0x13, 0x00], [0x0E, 0x14, 0x00], [0x0F, 0x15, 0x00],
    [0x00, 0x16, 0x00], [0x01, 0x16, 0x00], [0x02, 0x17, 0x00], [0x20, 0x18, 0x00],
    [0x21, 0x19, 0x00], [0x22, 0x19, 0x00], [0x23, 0x1A, 0x00], [0x24, 0x1B, 0x00],
    [0x25, 0x1C, 0x00], [0x26, 0x1C, 0x00], [0x27, 0x1D, 0x00], [0x28, 0x1E, 0x00],
    [0x29, 0x1F, 0x00], [0x2A, 0x1F, 0x00], [0x2B, 0x20, 0x00], [0x2C, 0x21, 0x00],
    [0x2D, 0x22, 0x00], [0x2E, 0x22, 0x00], [0x2F, 0x23, 0x00], [0x20, 0x24, 0x00],
    [0x21, 0x25, 0x00], [0x22, 0x25, 0x00], [0x40, 0x26, 0x00], [0x41, 0x27, 0x00],
    [0x42, 0x28, 0x00], [0x43, 0x28, 0x00], [0x44, 0x29, 0x00], [0x45, 0x2A, 0x00],
    [0x46, 0x2B, 0x00], [0x47, 0x2B, 0x00], [0x48, 0x2C, 0x00], [0x49, 0x2D, 0x00],
    [0x4A, 0x2E, 0x00], [0x4B, 0x2E, 0x00], [0x4C, 0x2F, 0x00], [0x4D, 0x30, 0x00],
    [0x4E, 0x31, 0x20], [0x4F, 0x31, 0x20], [0x40, 0x32, 0x20], [0x41, 0x33, 0x20],
    [0x42, 0x34, 0x20], [0x60, 0x34, 0x20], [0x61, 0x35, 0x20], [0x62, 0x36, 0x20],
    [0x63, 0x37, 0x20], [0x64, 0x37, 0x20], [0x65, 0x38, 0x20], [0x66, 0x39, 0x20],
    [0x67, 0x3A, 0x20], [0x68, 0x3A, 0x20], [0x69, 0x3B, 0x20], [0x6A, 0x3C, 0x20],
    [0x6B, 0x3C, 0x20], [0x6C, 0x3C, 0x20], [0x6D, 0x3C, 0x20], [0x6E, 0x3C, 0x20],
    [0x6F, 0x3C, 0x20], [0x60, 0x3C, 0x20], [0x61, 0x3C, 0x20], [0x62, 0x3C, 0x20],
    [0x63, 0x3C, 0x20],
];

/// Lower-bound VCO rate thresholds, MHz. The first entry not exceeded
/// by the actual VCO rate selects the matching SYNTH_CAL_LUT row.
#[rustfmt::skip]
pub static VCO_INDEX: [u16; 53] = [
     5940,  6068,  6196,  6325,  6453,  6581,  6709,  6837,  6965,  7094,
     7222,  7350,  7478,  7606,  7734,  7863,  7991,  8119,  8247,  8375,
     8503,  8632,  8760,  8888,  9016,  9144,  9272,  9401,  9529,  9657,
     9785,  9913, 10042, 10170, 10298, 10426, 10554, 10682, 10811, 10939,
    11067, 11195, 11323, 11451, 11580, 11708, 11836, 11964, 12092, 12220,
    12349, 12477, 12605,
];

/// One analog tuning row of the RFPLL VCO calibration table.
pub struct SynthRow {
    pub output_level: u8,
    pub varactor: u8,
    pub bias_ref: u8,
    pub bias_tcf: u8,
    pub cal_offset: u8,
    pub varactor_ref: u8,
    pub charge_pump: u8,
    pub loop_c2: u8,
    pub loop_c1: u8,
    pub loop_r1: u8,
    pub loop_c3: u8,
    pub loop_r3: u8,
}

#[rustfmt::skip]
pub static SYNTH_CAL_LUT: [SynthRow; 53] = [
    SynthRow { output_level: 5, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 4, loop_c2: 15, loop_c1: 12, loop_r1: 6, loop_c3: 13, loop_r3: 9 },
    SynthRow { output_level: 5, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 4, loop_c2: 15, loop_c1: 12, loop_r1: 6, loop_c3: 13, loop_r3: 9 },
    SynthRow { output_level: 5, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 5, loop_c2: 15, loop_c1: 12, loop_r1: 6, loop_c3: 13, loop_r3: 9 },
    SynthRow { output_level: 5, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 6, loop_c2: 15, loop_c1: 12, loop_r1: 6, loop_c3: 13, loop_r3: 9 },
    SynthRow { output_level: 5, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 7, loop_c2: 15, loop_c1: 12, loop_r1: 6, loop_c3: 13, loop_r3: 9 },
    SynthRow { output_level: 5, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 8, loop_c2: 15, loop_c1: 12, loop_r1: 6, loop_c3: 13, loop_r3: 9 },
    SynthRow { output_level: 6, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 8, loop_c2: 14, loop_c1: 12, loop_r1: 6, loop_c3: 13, loop_r3: 9 },
    SynthRow { output_level: 6, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 9, loop_c2: 14, loop_c1: 12, loop_r1: 6, loop_c3: 12, loop_r3: 9 },
    SynthRow { output_level: 6, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 10, loop_c2: 14, loop_c1: 11, loop_r1: 6, loop_c3: 12, loop_r3: 9 },
    SynthRow { output_level: 6, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 11, loop_c2: 14, loop_c1: 11, loop_r1: 7, loop_c3: 12, loop_r3: 9 },
    SynthRow { output_level: 6, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 12, loop_c2: 14, loop_c1: 11, loop_r1: 7, loop_c3: 12, loop_r3: 9 },
    SynthRow { output_level: 6, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 12, loop_c2: 14, loop_c1: 11, loop_r1: 7, loop_c3: 12, loop_r3: 9 },
    SynthRow { output_level: 7, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 7, varactor_ref: 10, charge_pump: 13, loop_c2: 13, loop_c1: 11, loop_r1: 7, loop_c3: 12, loop_r3: 9 },
    SynthRow { output_level: 7, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 6, varactor_ref: 11, charge_pump: 14, loop_c2: 13, loop_c1: 11, loop_r1: 7, loop_c3: 11, loop_r3: 10 },
    SynthRow { output_level: 7, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 6, varactor_ref: 11, charge_pump: 15, loop_c2: 13, loop_c1: 11, loop_r1: 7, loop_c3: 11, loop_r3: 10 },
    SynthRow { output_level: 7, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 6, varactor_ref: 11, charge_pump: 16, loop_c2: 13, loop_c1: 10, loop_r1: 7, loop_c3: 11, loop_r3: 10 },
    SynthRow { output_level: 7, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 6, varactor_ref: 11, charge_pump: 16, loop_c2: 13, loop_c1: 10, loop_r1: 7, loop_c3: 11, loop_r3: 10 },
    SynthRow { output_level: 7, varactor: 1, bias_ref: 4, bias_tcf: 1, cal_offset: 6, varactor_ref: 11, charge_pump: 17, loop_c2: 13, loop_c1: 10, loop_r1: 7, loop_c3: 11, loop_r3: 10 },
    SynthRow { output_level: 8, varactor: 1, bias_ref: 5, bias_tcf: 1, cal_offset: 6, varactor_ref: 11, charge_pump: 18, loop_c2: 12, loop_c1: 10, loop_r1: 8, loop_c3: 11, loop_r3: 10 },
    SynthRow { output_level: 8, varactor: 1, bias_ref: 5, bias_tcf: 1, cal_offset: 6, varactor_ref: 11, charge_pump: 19, loop_c2: 12, loop_c1: 10, loop_r1: 8, loop_c3: 11, loop_r3: 10 },
    SynthRow { output_level: 8, varactor: 1, bias_ref: 5, bias_tcf: 1, cal_offset: 6, varactor_ref: 11, charge_pump: 20, loop_c2: 12, loop_c1: 10, loop_r1: 8, loop_c3: 10, loop_r3: 10 },
    SynthRow { output_level: 8, varactor: 1, bias_ref: 5, bias_tcf: 2, cal_offset: 6, varactor_ref: 11, charge_pump: 20, loop_c2: 12, loop_c1: 10, loop_r1: 8, loop_c3: 10, loop_r3: 10 },
    SynthRow { output_level: 8, varactor: 1, bias_ref: 5, bias_tcf: 2, cal_offset: 6, varactor_ref: 11, charge_pump: 21, loop_c2: 12, loop_c1: 10, loop_r1: 8, loop_c3: 10, loop_r3: 10 },
    SynthRow { output_level: 8, varactor: 1, bias_ref: 5, bias_tcf: 2, cal_offset: 6, varactor_ref: 11, charge_pump: 22, loop_c2: 12, loop_c1: 9, loop_r1: 8, loop_c3: 10, loop_r3: 10 },
    SynthRow { output_level: 9, varactor: 1, bias_ref: 5, bias_tcf: 2, cal_offset: 6, varactor_ref: 11, charge_pump: 23, loop_c2: 11, loop_c1: 9, loop_r1: 8, loop_c3: 10, loop_r3: 10 },
    SynthRow { output_level: 9, varactor: 1, bias_ref: 5, bias_tcf: 2, cal_offset: 6, varactor_ref: 11, charge_pump: 24, loop_c2: 11, loop_c1: 9, loop_r1: 8, loop_c3: 10, loop_r3: 10 },
    SynthRow { output_level: 9, varactor: 2, bias_ref: 5, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 25, loop_c2: 11, loop_c1: 9, loop_r1: 9, loop_c3: 9, loop_r3: 11 },
    SynthRow { output_level: 9, varactor: 2, bias_ref: 5, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 25, loop_c2: 11, loop_c1: 9, loop_r1: 9, loop_c3: 9, loop_r3: 11 },
    SynthRow { output_level: 9, varactor: 2, bias_ref: 5, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 26, loop_c2: 11, loop_c1: 9, loop_r1: 9, loop_c3: 9, loop_r3: 11 },
    SynthRow { output_level: 10, varactor: 2, bias_ref: 5, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 27, loop_c2: 10, loop_c1: 9, loop_r1: 9, loop_c3: 9, loop_r3: 11 },
    SynthRow { output_level: 10, varactor: 2, bias_ref: 5, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 28, loop_c2: 10, loop_c1: 8, loop_r1: 9, loop_c3: 9, loop_r3: 11 },
    SynthRow { output_level: 10, varactor: 2, bias_ref: 5, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 29, loop_c2: 10, loop_c1: 8, loop_r1: 9, loop_c3: 9, loop_r3: 11 },
    SynthRow { output_level: 10, varactor: 2, bias_ref: 5, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 29, loop_c2: 10, loop_c1: 8, loop_r1: 9, loop_c3: 9, loop_r3: 11 },
    SynthRow { output_level: 10, varactor: 2, bias_ref: 5, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 30, loop_c2: 10, loop_c1: 8, loop_r1: 9, loop_c3: 8, loop_r3: 11 },
    SynthRow { output_level: 10, varactor: 2, bias_ref: 5, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 31, loop_c2: 10, loop_c1: 8, loop_r1: 9, loop_c3: 8, loop_r3: 11 },
    SynthRow { output_level: 11, varactor: 2, bias_ref: 6, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 32, loop_c2: 9, loop_c1: 8, loop_r1: 10, loop_c3: 8, loop_r3: 11 },
    SynthRow { output_level: 11, varactor: 2, bias_ref: 6, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 33, loop_c2: 9, loop_c1: 8, loop_r1: 10, loop_c3: 8, loop_r3: 11 },
    SynthRow { output_level: 11, varactor: 2, bias_ref: 6, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 33, loop_c2: 9, loop_c1: 8, loop_r1: 10, loop_c3: 8, loop_r3: 11 },
    SynthRow { output_level: 11, varactor: 2, bias_ref: 6, bias_tcf: 2, cal_offset: 5, varactor_ref: 12, charge_pump: 34, loop_c2: 9, loop_c1: 7, loop_r1: 10, loop_c3: 8, loop_r3: 11 },
    SynthRow { output_level: 11, varactor: 2, bias_ref: 6, bias_tcf: 2, cal_offset: 4, varactor_ref: 13, charge_pump: 35, loop_c2: 9, loop_c1: 7, loop_r1: 10, loop_c3: 7, loop_r3: 12 },
    SynthRow { output_level: 11, varactor: 2, bias_ref: 6, bias_tcf: 2, cal_offset: 4, varactor_ref: 13, charge_pump: 36, loop_c2: 9, loop_c1: 7, loop_r1: 10, loop_c3: 7, loop_r3: 12 },
    SynthRow { output_level: 12, varactor: 2, bias_ref: 6, bias_tcf: 2, cal_offset: 4, varactor_ref: 13, charge_pump: 37, loop_c2: 8, loop_c1: 7, loop_r1: 10, loop_c3: 7, loop_r3: 12 },
    SynthRow { output_level: 12, varactor: 2, bias_ref: 6, bias_tcf: 3, cal_offset: 4, varactor_ref: 13, charge_pump: 37, loop_c2: 8, loop_c1: 7, loop_r1: 10, loop_c3: 7, loop_r3: 12 },
    SynthRow { output_level: 12, varactor: 2, bias_ref: 6, bias_tcf: 3, cal_offset: 4, varactor_ref: 13, charge_pump: 38, loop_c2: 8, loop_c1: 7, loop_r1: 10, loop_c3: 7, loop_r3: 12 },
    SynthRow { output_level: 12, varactor: 2, bias_ref: 6, bias_tcf: 3, cal_offset: 4, varactor_ref: 13, charge_pump: 39, loop_c2: 8, loop_c1: 7, loop_r1: 11, loop_c3: 7, loop_r3: 12 },
    SynthRow { output_level: 12, varactor: 2, bias_ref: 6, bias_tcf: 3, cal_offset: 4, varactor_ref: 13, charge_pump: 40, loop_c2: 8, loop_c1: 6, loop_r1: 11, loop_c3: 7, loop_r3: 12 },
    SynthRow { output_level: 12, varactor: 2, bias_ref: 6, bias_tcf: 3, cal_offset: 4, varactor_ref: 13, charge_pump: 41, loop_c2: 8, loop_c1: 6, loop_r1: 11, loop_c3: 6, loop_r3: 12 },
    SynthRow { output_level: 13, varactor: 2, bias_ref: 6, bias_tcf: 3, cal_offset: 4, varactor_ref: 13, charge_pump: 41, loop_c2: 7, loop_c1: 6, loop_r1: 11, loop_c3: 6, loop_r3: 12 },
    SynthRow { output_level: 13, varactor: 2, bias_ref: 6, bias_tcf: 3, cal_offset: 4, varactor_ref: 13, charge_pump: 42, loop_c2: 7, loop_c1: 6, loop_r1: 11, loop_c3: 6, loop_r3: 12 },
    SynthRow { output_level: 13, varactor: 2, bias_ref: 6, bias_tcf: 3, cal_offset: 4, varactor_ref: 13, charge_pump: 43, loop_c2: 7, loop_c1: 6, loop_r1: 11, loop_c3: 6, loop_r3: 12 },
    SynthRow { output_level: 13, varactor: 2, bias_ref: 6, bias_tcf: 3, cal_offset: 4, varactor_ref: 13, charge_pump: 44, loop_c2: 7, loop_c1: 6, loop_r1: 11, loop_c3: 6, loop_r3: 12 },
    SynthRow { output_level: 13, varactor: 2, bias_ref: 6, bias_tcf: 3, cal_offset: 4, varactor_ref: 13, charge_pump: 45, loop_c2: 7, loop_c1: 6, loop_r1: 11, loop_c3: 6, loop_r3: 12 },
    SynthRow { output_level: 14, varactor: 3, bias_ref: 7, bias_tcf: 3, cal_offset: 3, varactor_ref: 14, charge_pump: 46, loop_c2: 6, loop_c1: 5, loop_r1: 12, loop_c3: 5, loop_r3: 13 },
];

/// Mixer GM subtable, programmed once at init. Gain word and gm code per row.
#[rustfmt::skip]
pub static MIXER_GM_GAIN: [u8; 16] = [
    0x78, 0x74, 0x70, 0x6C, 0x68, 0x64, 0x60, 0x5C,
    0x58, 0x54, 0x50, 0x4C, 0x48, 0x30, 0x18, 0x00,
];

#[rustfmt::skip]
pub static MIXER_GM_CODE: [u8; 16] = [
    0x00, 0x0D, 0x15, 0x1B, 0x21, 0x25, 0x29, 0x2C,
    0x2F, 0x31, 0x33, 0x34, 0x35, 0x3A, 0x3D, 0x3E,
];
