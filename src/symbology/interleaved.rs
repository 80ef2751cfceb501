//! # Interleaved 2 of 5
//!
//! A numeric two-width symbology. Digits are encoded in pairs: the first
//! digit of a pair is drawn in the bars, the second in the spaces between
//! them, so each pair yields 10 runs.
//!
//! ```text
//! 1 1 1 1 | pair × 10 runs ... | 2 1 1
//!  start                         stop
//! ```
//!
//! A trailing unpaired digit is dropped. Callers that need every digit
//! encoded pad to an even count, usually with [`checksum`].

use tracing::warn;

use super::{BarWidths, Encoder, Symbology, keep_numbers};
use crate::error::BarcodeError;

/// Narrow (1) and wide (2) widths of the digits 0-9.
const DIGITS: [[u8; 5]; 10] = [
    [1, 1, 2, 2, 1],
    [2, 1, 1, 1, 2],
    [1, 2, 1, 1, 2],
    [2, 2, 1, 1, 1],
    [1, 1, 2, 1, 2],
    [2, 1, 2, 1, 1],
    [1, 2, 2, 1, 1],
    [1, 1, 1, 2, 2],
    [2, 1, 1, 2, 1],
    [1, 2, 1, 2, 1],
];

const START: [u8; 4] = [1, 1, 1, 1];
const STOP: [u8; 3] = [2, 1, 1];

pub static INTERLEAVED_2OF5: Interleaved2of5 = Interleaved2of5;

/// Interleaved 2 of 5 encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interleaved2of5;

impl Encoder for Interleaved2of5 {
    fn symbology(&self) -> Symbology {
        Symbology::Interleaved2of5
    }

    /// Strip every non-digit character.
    fn raw_text(&self, text: &str) -> Result<String, BarcodeError> {
        Ok(keep_numbers(text))
    }

    fn bars(&self, text: &str) -> Result<BarWidths, BarcodeError> {
        let digits: Vec<usize> = text
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as usize)
            .collect();

        if digits.len() % 2 == 1 {
            warn!(
                digits = digits.len(),
                "interleaved 2 of 5: odd digit count, last digit not encoded"
            );
        }

        let pairs = digits.len() / 2;
        let mut bars = Vec::with_capacity(pairs * 10 + START.len() + STOP.len());
        bars.extend_from_slice(&START);
        for pair in digits.chunks_exact(2) {
            let (bar, space) = (&DIGITS[pair[0]], &DIGITS[pair[1]]);
            for (&b, &s) in bar.iter().zip(space) {
                bars.push(b);
                bars.push(s);
            }
        }
        bars.extend_from_slice(&STOP);
        Ok(BarWidths::new(bars))
    }
}

/// Mod-10 check digit (weights 3 and 1 from the right) as a character.
///
/// Appending it to an odd-length code gives an even digit count.
///
/// ```
/// use linebar::symbology::interleaved::checksum;
///
/// assert_eq!(checksum("400151300062"), '0');
/// ```
pub fn checksum(text: &str) -> char {
    let digit = super::ean::calculate_ean_parity(&keep_numbers(text));
    char::from(b'0' + digit)
}
