//! # EAN / UPC
//!
//! EAN-13 and EAN-8 encoders, reachable through [`Symbology`] dispatch, plus
//! standalone helpers for the rest of the family:
//!
//! - [`calculate_ean_parity`]: check digit for any EAN/UPC digit string
//! - [`convert_upca_to_upce`]: zero-suppression of a UPC-A code
//! - [`upce_bars`], [`supplemental2_bars`], [`supplemental5_bars`]
//!
//! The standalone bar builders are not wired into [`Symbology`]; callers use
//! them directly.
//!
//! ## EAN-13 Layout
//!
//! ```text
//! 1 1 1 | 6 digits × 4 runs | 1 1 1 1 1 | 6 digits × 4 runs | 1 1 1
//! start   left half           center      right half          end
//! ```
//!
//! The first digit is not drawn as bars: it selects the odd/even parity
//! sequence of the left half. Odd parity digits are drawn with their pattern
//! as is, even parity digits with the pattern reversed.

use super::{BarWidths, CharPosition, Encoder, Symbology};
use crate::error::BarcodeError;

/// Guard bar runs of EAN-13 (start, center and end guards).
pub const GUARD_EAN13: [usize; 6] = [0, 2, 28, 30, 56, 58];
/// Guard bar runs of EAN-8.
pub const GUARD_EAN8: [usize; 6] = [0, 2, 20, 22, 40, 42];
/// Guard bar runs of UPC-A (the outer digits are drawn long as well).
pub const GUARD_UPCA: [usize; 10] = [0, 2, 4, 6, 28, 30, 52, 54, 56, 58];
/// Guard bar runs of UPC-E.
pub const GUARD_UPCE: [usize; 5] = [0, 2, 28, 30, 32];

pub const TOTAL_BARS_EAN13: usize = 11 + 12 * 4;
pub const TOTAL_BARS_EAN8: usize = 11 + 8 * 4;
pub const TOTAL_BARS_UPCE: usize = 9 + 6 * 4;
pub const TOTAL_BARS_SUPP2: usize = 13;
pub const TOTAL_BARS_SUPP5: usize = 31;

/// Run widths of the digits 0-9 (odd parity / right half).
const DIGITS: [[u8; 4]; 10] = [
    [3, 2, 1, 1], // 0
    [2, 2, 2, 1], // 1
    [2, 1, 2, 2], // 2
    [1, 4, 1, 1], // 3
    [1, 1, 3, 2], // 4
    [1, 2, 3, 1], // 5
    [1, 1, 1, 4], // 6
    [1, 3, 1, 2], // 7
    [1, 2, 1, 3], // 8
    [3, 1, 1, 2], // 9
];

const START_GUARD: [u8; 3] = [1, 1, 1];
const CENTER_GUARD: [u8; 5] = [1, 1, 1, 1, 1];
const END_GUARD: [u8; 3] = [1, 1, 1];
const ADD_ON_START: [u8; 3] = [1, 1, 2];
const ADD_ON_SEPARATOR: [u8; 2] = [1, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parity {
    Odd,
    Even,
}

use Parity::{Even as E, Odd as O};

/// Left-half parity of EAN-13, indexed by the first digit.
const PARITY13: [[Parity; 6]; 10] = [
    [O, O, O, O, O, O],
    [O, O, E, O, E, E],
    [O, O, E, E, O, E],
    [O, O, E, E, E, O],
    [O, E, O, O, E, E],
    [O, E, E, O, O, E],
    [O, E, E, E, O, O],
    [O, E, O, E, O, E],
    [O, E, O, E, E, O],
    [O, E, E, O, E, O],
];

/// Parity of the 2-digit add-on, indexed by the value mod 4.
const PARITY2: [[Parity; 2]; 4] = [[O, O], [O, E], [E, O], [E, E]];

/// Parity of the 5-digit add-on, indexed by its weighted check value.
const PARITY5: [[Parity; 5]; 10] = [
    [E, E, O, O, O],
    [E, O, E, O, O],
    [E, O, O, E, O],
    [E, O, O, O, E],
    [O, E, E, O, O],
    [O, O, E, E, O],
    [O, O, O, E, E],
    [O, E, O, E, O],
    [O, E, O, O, E],
    [O, O, E, O, E],
];

/// Parity of UPC-E number system 0, indexed by the check digit.
const PARITY_UPCE: [[Parity; 6]; 10] = [
    [E, E, E, O, O, O],
    [E, E, O, E, O, O],
    [E, E, O, O, E, O],
    [E, E, O, O, O, E],
    [E, O, E, E, O, O],
    [E, O, O, E, E, O],
    [E, O, O, O, E, E],
    [E, O, E, O, E, O],
    [E, O, E, O, O, E],
    [E, O, O, E, O, E],
];

pub static EAN13: Ean = Ean::new(EanKind::Ean13);
pub static EAN8: Ean = Ean::new(EanKind::Ean8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EanKind {
    Ean13,
    Ean8,
}

impl EanKind {
    /// Number of digits, check digit included.
    pub fn digits(self) -> usize {
        match self {
            EanKind::Ean13 => 13,
            EanKind::Ean8 => 8,
        }
    }
}

/// EAN-13 / EAN-8 encoder.
///
/// The text must already contain the check digit; it is drawn as given and
/// never recomputed. Use [`calculate_ean_parity`] to obtain it.
#[derive(Debug, Clone, Copy)]
pub struct Ean {
    kind: EanKind,
}

impl Ean {
    pub const fn new(kind: EanKind) -> Self {
        Self { kind }
    }
}

impl Encoder for Ean {
    fn symbology(&self) -> Symbology {
        match self.kind {
            EanKind::Ean13 => Symbology::Ean13,
            EanKind::Ean8 => Symbology::Ean8,
        }
    }

    fn raw_text(&self, text: &str) -> Result<String, BarcodeError> {
        Ok(text.to_string())
    }

    fn bars(&self, text: &str) -> Result<BarWidths, BarcodeError> {
        let digits = check_length(text, self.kind.digits(), self.symbology().name())?;
        let bars = match self.kind {
            EanKind::Ean13 => ean13_bars(&digits),
            EanKind::Ean8 => ean8_bars(&digits),
        };
        Ok(BarWidths::new(bars))
    }

    fn guard_bar_indices(&self) -> &'static [usize] {
        match self.kind {
            EanKind::Ean13 => &GUARD_EAN13,
            EanKind::Ean8 => &GUARD_EAN8,
        }
    }

    /// Digit offsets in modules, for left-aligned text.
    ///
    /// EAN-13 places its first digit in the quiet zone left of the start
    /// guard and the two groups of six under each half. EAN-8 places two
    /// groups of four.
    fn char_positions(&self) -> Vec<CharPosition> {
        const STRETCH: f32 = 7.0;
        let group = |x: f32, count: usize| {
            (0..count).map(move |i| CharPosition::new(x + STRETCH * i as f32, 0.0))
        };

        match self.kind {
            EanKind::Ean13 => std::iter::once(CharPosition::new(-8.0, 0.0))
                .chain(group(5.0, 6))
                .chain(group(50.0, 6))
                .collect(),
            EanKind::Ean8 => group(4.0, 4).chain(group(37.0, 4)).collect(),
        }
    }
}

// ============================================================================
// BAR BUILDERS
// ============================================================================

fn parse_digits(text: &str, symbology: &'static str) -> Result<Vec<u8>, BarcodeError> {
    text.chars()
        .enumerate()
        .map(|(position, character)| {
            character
                .to_digit(10)
                .map(|d| d as u8)
                .ok_or(BarcodeError::InvalidCharacter {
                    character,
                    position,
                    symbology,
                })
        })
        .collect()
}

fn push_digit(bars: &mut Vec<u8>, digit: u8, parity: Parity) {
    let runs = DIGITS[usize::from(digit)];
    match parity {
        Parity::Odd => bars.extend_from_slice(&runs),
        Parity::Even => bars.extend(runs.iter().rev()),
    }
}

fn ean13_bars(digits: &[u8]) -> Vec<u8> {
    let mut bars = Vec::with_capacity(TOTAL_BARS_EAN13);
    bars.extend_from_slice(&START_GUARD);
    let sequence = &PARITY13[usize::from(digits[0])];
    for (&digit, &parity) in digits[1..7].iter().zip(sequence) {
        push_digit(&mut bars, digit, parity);
    }
    bars.extend_from_slice(&CENTER_GUARD);
    for &digit in &digits[7..13] {
        push_digit(&mut bars, digit, Parity::Odd);
    }
    bars.extend_from_slice(&END_GUARD);
    bars
}

fn ean8_bars(digits: &[u8]) -> Vec<u8> {
    let mut bars = Vec::with_capacity(TOTAL_BARS_EAN8);
    bars.extend_from_slice(&START_GUARD);
    for &digit in &digits[..4] {
        push_digit(&mut bars, digit, Parity::Odd);
    }
    bars.extend_from_slice(&CENTER_GUARD);
    for &digit in &digits[4..8] {
        push_digit(&mut bars, digit, Parity::Odd);
    }
    bars.extend_from_slice(&END_GUARD);
    bars
}

fn check_length(
    text: &str,
    expected: usize,
    symbology: &'static str,
) -> Result<Vec<u8>, BarcodeError> {
    let actual = text.chars().count();
    if actual != expected {
        return Err(BarcodeError::InvalidLength {
            symbology,
            expected,
            actual,
        });
    }
    parse_digits(text, symbology)
}

/// Bars of an 8-digit UPC-E code (number system, six data digits, check digit).
///
/// The check digit selects the parity sequence; number system 1 inverts it.
/// The result has [`TOTAL_BARS_UPCE`] runs and uses [`GUARD_UPCE`].
pub fn upce_bars(code: &str) -> Result<BarWidths, BarcodeError> {
    let digits = check_length(code, 8, "UPC-E")?;
    let flip = digits[0] != 0;
    let sequence = &PARITY_UPCE[usize::from(digits[7])];

    let mut bars = Vec::with_capacity(TOTAL_BARS_UPCE);
    bars.extend_from_slice(&START_GUARD);
    for (&digit, &parity) in digits[1..7].iter().zip(sequence) {
        let odd = if flip { Parity::Even } else { Parity::Odd };
        let drawn = if parity == odd { Parity::Odd } else { Parity::Even };
        push_digit(&mut bars, digit, drawn);
    }
    bars.extend_from_slice(&[1, 1, 1, 1, 1, 1]);
    Ok(BarWidths::new(bars))
}

/// Bars of a 2-digit supplemental add-on.
pub fn supplemental2_bars(code: &str) -> Result<BarWidths, BarcodeError> {
    let digits = check_length(code, 2, "supplemental 2")?;
    let parity = (digits[0] * 10 + digits[1]) % 4;

    let mut bars = Vec::with_capacity(TOTAL_BARS_SUPP2);
    bars.extend_from_slice(&ADD_ON_START);
    for (k, (&digit, &parity)) in digits.iter().zip(&PARITY2[usize::from(parity)]).enumerate() {
        if k > 0 {
            bars.extend_from_slice(&ADD_ON_SEPARATOR);
        }
        push_digit(&mut bars, digit, parity);
    }
    Ok(BarWidths::new(bars))
}

/// Bars of a 5-digit supplemental add-on.
pub fn supplemental5_bars(code: &str) -> Result<BarWidths, BarcodeError> {
    let digits = check_length(code, 5, "supplemental 5")?;
    let weighted = (u32::from(digits[0]) + u32::from(digits[2]) + u32::from(digits[4])) * 3
        + (u32::from(digits[1]) + u32::from(digits[3])) * 9;
    let sequence = &PARITY5[(weighted % 10) as usize];

    let mut bars = Vec::with_capacity(TOTAL_BARS_SUPP5);
    bars.extend_from_slice(&ADD_ON_START);
    for (k, (&digit, &parity)) in digits.iter().zip(sequence).enumerate() {
        if k > 0 {
            bars.extend_from_slice(&ADD_ON_SEPARATOR);
        }
        push_digit(&mut bars, digit, parity);
    }
    Ok(BarWidths::new(bars))
}

// ============================================================================
// CHECK DIGIT AND UPC CONVERSION
// ============================================================================

/// Check digit for an EAN/UPC digit string.
///
/// Scanning right to left, digits are weighted 3, 1, 3, 1, ...; the result
/// is `(10 - sum mod 10) mod 10`. Non-digit characters are skipped.
///
/// ```
/// use linebar::symbology::ean::calculate_ean_parity;
///
/// assert_eq!(calculate_ean_parity("400151300062"), 0);
/// assert_eq!(calculate_ean_parity("4012543"), 5);
/// ```
pub fn calculate_ean_parity(digits: &str) -> u8 {
    let total: u32 = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .zip([3, 1].into_iter().cycle())
        .map(|(digit, weight)| digit * weight)
        .sum();
    ((10 - total % 10) % 10) as u8
}

/// Convert a 12-digit UPC-A code into its 8-digit UPC-E form.
///
/// Returns `None` when the code is not in number system 0 or 1 or its
/// manufacturer/product digits do not allow zero suppression.
pub fn convert_upca_to_upce(text: &str) -> Option<String> {
    if text.len() != 12 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !(text.starts_with('0') || text.starts_with('1')) {
        return None;
    }

    let s = |from: usize, to: usize| &text[from..to];
    let mut out = String::with_capacity(8);

    if matches!(s(3, 6), "000" | "100" | "200") {
        if s(6, 8) != "00" {
            return None;
        }
        for part in [s(0, 3), s(8, 11), s(3, 4), s(11, 12)] {
            out.push_str(part);
        }
    } else if s(4, 6) == "00" {
        if s(6, 9) != "000" {
            return None;
        }
        for part in [s(0, 4), s(9, 11), "3", s(11, 12)] {
            out.push_str(part);
        }
    } else if s(5, 6) == "0" {
        if s(6, 10) != "0000" {
            return None;
        }
        for part in [s(0, 5), s(10, 11), "4", s(11, 12)] {
            out.push_str(part);
        }
    } else if text.as_bytes()[10] >= b'5' {
        if s(6, 10) != "0000" {
            return None;
        }
        for part in [s(0, 6), s(10, 11), s(11, 12)] {
            out.push_str(part);
        }
    } else {
        return None;
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ean13_length_and_width() {
        let bars = EAN13.bars("4001513000620").unwrap();
        assert_eq!(bars.len(), TOTAL_BARS_EAN13);
        assert_eq!(bars.len(), 59);
        assert_eq!(bars.module_width(), 95);
    }

    #[test]
    fn test_ean13_left_half_parity() {
        // First digit 4 -> O E O O E E
        let bars = EAN13.bars("4001513000620").unwrap();
        assert_eq!(&bars[..3], &[1, 1, 1]);
        assert_eq!(&bars[3..7], &DIGITS[0]); // 0, odd
        assert_eq!(&bars[7..11], &[1, 1, 2, 3]); // 0, even (reversed)
        assert_eq!(&bars[11..15], &DIGITS[1]); // 1, odd
        assert_eq!(&bars[27..32], &CENTER_GUARD);
        assert_eq!(&bars[56..], &END_GUARD);
    }

    #[test]
    fn test_ean8_layout() {
        let bars = EAN8.bars("40125435").unwrap();
        assert_eq!(bars.len(), 43);
        assert_eq!(bars.module_width(), 67);
        assert_eq!(&bars[3..7], &DIGITS[4]);
        assert_eq!(&bars[19..24], &CENTER_GUARD);
        assert_eq!(&bars[40..], &END_GUARD);
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        let err = EAN13.bars("4001513000").unwrap_err();
        assert_eq!(
            err,
            BarcodeError::InvalidLength {
                symbology: "EAN13",
                expected: 13,
                actual: 10,
            }
        );
        assert!(EAN8.bars("4001513000620").is_err());
    }

    #[test]
    fn test_non_digit_is_rejected() {
        assert!(matches!(
            EAN13.bars("40015130006X0"),
            Err(BarcodeError::InvalidCharacter {
                character: 'X',
                position: 11,
                ..
            })
        ));
    }

    #[test]
    fn test_check_digit_is_not_validated() {
        // Wrong check digit is still drawn as given.
        assert!(EAN13.bars("4001513000621").is_ok());
    }

    #[test]
    fn test_guard_indices_point_at_guard_runs() {
        let bars = EAN13.bars("4001513000620").unwrap();
        for &i in EAN13.guard_bar_indices() {
            assert_eq!(bars[i], 1);
            assert_eq!(i % 2, 0, "guards are bars, not spaces");
        }
        assert_eq!(EAN8.guard_bar_indices(), &GUARD_EAN8);
    }

    #[test]
    fn test_char_positions() {
        let positions = EAN13.char_positions();
        assert_eq!(positions.len(), 13);
        assert_eq!(positions[0], CharPosition::new(-8.0, 0.0));
        assert_eq!(positions[1], CharPosition::new(5.0, 0.0));
        assert_eq!(positions[6], CharPosition::new(40.0, 0.0));
        assert_eq!(positions[7], CharPosition::new(50.0, 0.0));

        let positions = EAN8.char_positions();
        assert_eq!(positions.len(), 8);
        assert_eq!(positions[3], CharPosition::new(25.0, 0.0));
        assert_eq!(positions[4], CharPosition::new(37.0, 0.0));
    }

    #[test]
    fn test_parity() {
        assert_eq!(calculate_ean_parity("400151300062"), 0);
        assert_eq!(calculate_ean_parity("590123412345"), 7);
        assert_eq!(calculate_ean_parity("9638507"), 4);
        assert_eq!(calculate_ean_parity(""), 0);
    }

    #[test]
    fn test_upca_to_upce() {
        assert_eq!(convert_upca_to_upce("042100005264").as_deref(), Some("04252614"));
        assert_eq!(convert_upca_to_upce("012300000647").as_deref(), Some("01236437"));
        assert_eq!(convert_upca_to_upce("012340000057").as_deref(), Some("01234547"));
        assert_eq!(convert_upca_to_upce("012345000058").as_deref(), Some("01234558"));
    }

    #[test]
    fn test_upca_to_upce_rejects() {
        assert_eq!(convert_upca_to_upce("212345000058"), None);
        assert_eq!(convert_upca_to_upce("01234"), None);
        assert_eq!(convert_upca_to_upce("012345600058"), None);
        assert_eq!(convert_upca_to_upce("01234500001a"), None);
    }

    #[test]
    fn test_upce_bars() {
        let bars = upce_bars("04252614").unwrap();
        assert_eq!(bars.len(), TOTAL_BARS_UPCE);
        assert_eq!(bars.module_width(), 51);
        // check digit 4 selects E O E E O O; the first data digit 4 is drawn reversed
        assert_eq!(&bars[3..7], &[2, 3, 1, 1]);
        assert_eq!(&bars[27..], &[1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_supplemental_bars() {
        let two = supplemental2_bars("12").unwrap();
        assert_eq!(two.len(), TOTAL_BARS_SUPP2);
        assert_eq!(two.module_width(), 20);

        let five = supplemental5_bars("52495").unwrap();
        assert_eq!(five.len(), TOTAL_BARS_SUPP5);
        assert_eq!(five.module_width(), 47);

        assert!(supplemental5_bars("5249").is_err());
    }
}
