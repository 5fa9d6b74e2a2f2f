//! Host transaction protocol: fixed 64-byte request/response envelopes.
//!
//! The host cannot assume the device side has native 64-bit floats, so the
//! value travels as a split mantissa/exponent pair rather than IEEE bits:
//! word 0 is the mantissa scaled to 31 bits (signed), word 1 the binary
//! exponent. Everything is little-endian.
//!
//! A response reuses the request envelope: the action echoes back, the value
//! field is overwritten with the result, and the tail carries a
//! NUL-terminated summary of any warnings raised while executing.

use num_enum::TryFromPrimitive;

use crate::{Ad9361, Direction, Interface, Result, Warning};

pub const PACKET_LEN: usize = 64;

const ACTION_OFFSET: usize = 0;
const VALUE_OFFSET: usize = 4;
const ERROR_MSG_OFFSET: usize = 12;
/// Message bytes available before the mandatory NUL.
pub const ERROR_MSG_LEN: usize = PACKET_LEN - ERROR_MSG_OFFSET - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum Action {
    Echo = 0,
    Init = 1,
    SetRx1Gain = 2,
    SetTx1Gain = 3,
    SetRx2Gain = 4,
    SetTx2Gain = 5,
    SetRxFreq = 6,
    SetTxFreq = 7,
    SetLoopback = 8,
    SetClockRate = 9,
    SetActiveChains = 10,
}

/// Split `x` into a 31-bit signed mantissa and a binary exponent, so that
/// `mantissa / 2^31 * 2^exponent` reconstructs it to ~9 decimal digits.
pub fn double_pack(x: f64) -> [u32; 2] {
    let (mantissa, exponent) = frexp(x);
    let scaled = (mantissa * (1i64 << 31) as f64) as i32;
    [scaled as u32, exponent as u32]
}

pub fn double_unpack(words: [u32; 2]) -> f64 {
    let mantissa = f64::from(words[0] as i32) / (1i64 << 31) as f64;
    let exponent = words[1] as i32;
    mantissa * pow2(exponent)
}

/// `(mantissa, exponent)` with `mantissa` in `[0.5, 1)` (sign preserved)
/// and `x == mantissa * 2^exponent`. Zero and non-finite values pass
/// through with exponent 0.
fn frexp(x: f64) -> (f64, i32) {
    if x == 0.0 || !x.is_finite() {
        return (x, 0);
    }
    let bits = x.to_bits();
    let exp_field = ((bits >> 52) & 0x7FF) as i32;
    if exp_field == 0 {
        // Subnormal: renormalize through a 2^52 scale.
        let (m, e) = frexp(x * (1u64 << 52) as f64);
        return (m, e - 52);
    }
    let exponent = exp_field - 1022;
    let mantissa = f64::from_bits((bits & !(0x7FFu64 << 52)) | (1022u64 << 52));
    (mantissa, exponent)
}

fn pow2(e: i32) -> f64 {
    2f64.powi(e)
}

impl<I: Interface> Ad9361<I> {
    /// Execute one transaction. Hard faults (SPI, invalid ENSM use)
    /// propagate as errors; warnings are drained into the response tail.
    pub fn dispatch(&mut self, request: &[u8; PACKET_LEN]) -> Result<[u8; PACKET_LEN]> {
        let mut response = *request;
        response[ERROR_MSG_OFFSET..].fill(0);

        let action_word = le_word(request, ACTION_OFFSET);
        let value = double_unpack([
            le_word(request, VALUE_OFFSET),
            le_word(request, VALUE_OFFSET + 4),
        ]);

        // Unknown actions leave the copied value bytes untouched.
        let result = match Action::try_from(action_word) {
            Ok(Action::Echo) => Some(value),
            Ok(Action::Init) => {
                self.init()?;
                Some(0.0)
            }
            Ok(Action::SetRx1Gain) => Some(self.set_rx_gain(1, value)?),
            Ok(Action::SetRx2Gain) => Some(self.set_rx_gain(2, value)?),
            Ok(Action::SetTx1Gain) => Some(self.set_tx_gain(1, value)?),
            Ok(Action::SetTx2Gain) => Some(self.set_tx_gain(2, value)?),
            Ok(Action::SetRxFreq) => Some(self.tune(Direction::Rx, value)?),
            Ok(Action::SetTxFreq) => Some(self.tune(Direction::Tx, value)?),
            Ok(Action::SetClockRate) => Some(self.set_clock_rate(value)?),
            Ok(Action::SetLoopback) => {
                self.data_port_loopback(value != 0.0)?;
                Some(value)
            }
            Ok(Action::SetActiveChains) => {
                let mask = value as u32;
                self.set_active_chains(
                    mask & 0x1 != 0,
                    mask & 0x2 != 0,
                    mask & 0x4 != 0,
                    mask & 0x8 != 0,
                )?;
                Some(value)
            }
            Err(_) => {
                self.warn(Warning::UnknownAction(action_word));
                None
            }
        };

        if let Some(result) = result {
            let packed = double_pack(result);
            response[VALUE_OFFSET..VALUE_OFFSET + 4].copy_from_slice(&packed[0].to_le_bytes());
            response[VALUE_OFFSET + 4..VALUE_OFFSET + 8]
                .copy_from_slice(&packed[1].to_le_bytes());
        }

        let warnings = self.take_warnings();
        if !warnings.is_empty() {
            let joined = warnings
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            let msg = joined.as_bytes();
            let len = msg.len().min(ERROR_MSG_LEN);
            response[ERROR_MSG_OFFSET..ERROR_MSG_OFFSET + len].copy_from_slice(&msg[..len]);
            // The fill above already guarantees the terminating NUL.
        }
        Ok(response)
    }
}

fn le_word(packet: &[u8; PACKET_LEN], offset: usize) -> u32 {
    u32::from_le_bytes([
        packet[offset],
        packet[offset + 1],
        packet[offset + 2],
        packet[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use proptest::prelude::*;

    fn request(action: Action, value: f64) -> [u8; PACKET_LEN] {
        let mut packet = [0u8; PACKET_LEN];
        packet[ACTION_OFFSET..ACTION_OFFSET + 4]
            .copy_from_slice(&(action as u32).to_le_bytes());
        let packed = double_pack(value);
        packet[VALUE_OFFSET..VALUE_OFFSET + 4].copy_from_slice(&packed[0].to_le_bytes());
        packet[VALUE_OFFSET + 4..VALUE_OFFSET + 8].copy_from_slice(&packed[1].to_le_bytes());
        packet
    }

    fn response_value(packet: &[u8; PACKET_LEN]) -> f64 {
        double_unpack([le_word(packet, VALUE_OFFSET), le_word(packet, VALUE_OFFSET + 4)])
    }

    #[test]
    fn codec_exact_for_small_mantissas() {
        for x in [0.0, 1.0, -1.0, 0.5, 2.0, 1024.0, -40e6, 61.44e6] {
            assert_eq!(double_unpack(double_pack(x)), x, "{x}");
        }
    }

    proptest! {
        #[test]
        fn codec_close_for_any_double(x in -1e12f64..1e12) {
            let y = double_unpack(double_pack(x));
            // 31-bit mantissa: relative error bounded by 2^-30.
            prop_assert!((y - x).abs() <= x.abs() / (1u64 << 30) as f64);
        }
    }

    #[test]
    fn echo_round_trips() {
        let mut dev = mock::device();
        let resp = dev.dispatch(&request(Action::Echo, 2.4e9)).unwrap();
        assert_eq!(response_value(&resp), 2.4e9);
        // No warnings: error message stays empty.
        assert_eq!(resp[ERROR_MSG_OFFSET], 0);
    }

    #[test]
    fn tune_via_dispatch() {
        let mut dev = mock::device();
        dev.dispatch(&request(Action::Init, 0.0)).unwrap();
        let resp = dev
            .dispatch(&request(Action::SetRxFreq, 2.4e9))
            .unwrap();
        let actual = response_value(&resp);
        assert!((actual - 2.4e9).abs() < 200.0);
        // The split-double codec costs a couple Hz at S-band.
        assert!((dev.state().rx_freq - actual).abs() < 5.0);
    }

    #[test]
    fn action_wire_numbers_are_stable() {
        // Host-facing contract; renumbering breaks deployed peers.
        let expected: [(Action, u32); 11] = [
            (Action::Echo, 0),
            (Action::Init, 1),
            (Action::SetRx1Gain, 2),
            (Action::SetTx1Gain, 3),
            (Action::SetRx2Gain, 4),
            (Action::SetTx2Gain, 5),
            (Action::SetRxFreq, 6),
            (Action::SetTxFreq, 7),
            (Action::SetLoopback, 8),
            (Action::SetClockRate, 9),
            (Action::SetActiveChains, 10),
        ];
        for (action, number) in expected {
            assert_eq!(action as u32, number, "{action:?}");
            assert_eq!(Action::try_from(number), Ok(action));
        }
    }

    #[test]
    fn unknown_action_reports_in_tail() {
        let mut dev = mock::device();
        let mut packet = request(Action::Echo, 7.5);
        packet[0..4].copy_from_slice(&999u32.to_le_bytes());
        let resp = dev.dispatch(&packet).unwrap();
        // The request's value bytes pass through unmodified.
        assert_eq!(resp[VALUE_OFFSET..VALUE_OFFSET + 8], packet[VALUE_OFFSET..VALUE_OFFSET + 8]);
        assert_eq!(response_value(&resp), 7.5);
        let tail = &resp[ERROR_MSG_OFFSET..];
        let end = tail.iter().position(|&b| b == 0).unwrap();
        let msg = std::str::from_utf8(&tail[..end]).unwrap();
        assert!(msg.contains("999"), "{msg}");
        // Terminator always present even at maximum length.
        assert!(end <= ERROR_MSG_LEN);
    }

    #[test]
    fn long_warning_text_truncates_with_nul() {
        let mut dev = mock::device();
        for _ in 0..8 {
            dev.warn(crate::Warning::BbpllNotLocked);
        }
        let resp = dev.dispatch(&request(Action::Echo, 1.0)).unwrap();
        assert_eq!(*resp.last().unwrap(), 0);
        let tail = &resp[ERROR_MSG_OFFSET..ERROR_MSG_OFFSET + ERROR_MSG_LEN];
        assert!(tail.iter().any(|&b| b != 0));
    }

    #[test]
    fn active_chains_mask() {
        let mut dev = mock::device();
        dev.dispatch(&request(Action::SetActiveChains, 0b0101 as f64))
            .unwrap();
        // tx1 + rx1 only.
        assert_eq!(dev.shadow.txfilt & crate::regs::CHAIN_MASK, crate::regs::CHAIN_1);
        assert_eq!(dev.shadow.rxfilt & crate::regs::CHAIN_MASK, crate::regs::CHAIN_1);
    }
}
